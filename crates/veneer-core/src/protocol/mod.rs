//! Protocol module containing the bridge message types and the monotonic
//! sequence counter used for reload generations and theme-switch tickets.

pub mod messages;
pub mod sequence;

pub use messages::{BridgeFault, BridgeRequest, BridgeResponse, ConfigPush};
pub use sequence::SequenceCounter;
