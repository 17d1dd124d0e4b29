//! Protocol module containing the channel taxonomy, message types, and the
//! classification rules that turn raw channel payloads into domain events.

pub mod channel;
pub mod classify;
pub mod messages;

pub use channel::{Channel, UnknownChannel};
pub use classify::classify;
pub use messages::*;
