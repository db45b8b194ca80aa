//! Packet sources feeding the aggregation loop.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::packet::RawPacket;

/// Anything that can hand the aggregation loop its next inbound packet.
#[async_trait]
pub trait PacketSource: Send {
    /// Retrieves the next packet. `None` means the source is exhausted.
    async fn next_packet(&mut self) -> Option<RawPacket>;
}

/// Fixed, in-memory sequence of packets. Mostly useful for tests and replays
/// that were already loaded.
#[derive(Debug, Default)]
pub struct QueuedSource {
    packets: VecDeque<RawPacket>,
}

impl QueuedSource {
    pub fn new(packets: impl IntoIterator<Item = RawPacket>) -> Self {
        Self {
            packets: packets.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PacketSource for QueuedSource {
    async fn next_packet(&mut self) -> Option<RawPacket> {
        self.packets.pop_front()
    }
}
