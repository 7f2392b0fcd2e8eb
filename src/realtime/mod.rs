//! Realtime group channel over WebSocket.

pub mod events;
pub mod hub;
pub mod socket;

pub use hub::RoomHub;
