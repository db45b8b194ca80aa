// fyrvakt-simulator/src/lib.rs

/*!
# fyrvakt Simulator

Packet sources standing in for the edge fleet when the aggregation node runs
without real hardware attached.

## Key Components:
- **Generator:** Round-robin mock fleet with a periodically failing device.
- **Chaos Engine:** Seeded fault injection that strips required packet fields.
- **Replay Engine:** Newline-delimited JSON capture files played back in order.
*/

pub mod chaos;
pub mod error;
pub mod generator;
pub mod replay;

pub use chaos::ChaosInjector;
pub use error::SimulatorError;
pub use generator::PacketGenerator;
pub use replay::ReplaySource;
