//! # fyrvakt-core
//!
//! Foundation layer shared by every fyrvakt crate: the telemetry packet model,
//! the structural validator gating the analyzer pipeline, and the packet source
//! abstraction the aggregation loop pulls from.
//!
//! ### Key Submodules:
//! - `packet`: inbound `RawPacket`, validated `Packet` and `Payload`
//! - `source`: `PacketSource` trait implemented by generators and replayers

pub mod error;
pub mod packet;
pub mod source;

pub use error::PacketError;
pub use packet::{validate, Packet, Payload, RawPacket};
pub use source::PacketSource;
