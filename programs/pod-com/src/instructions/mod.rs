pub mod agent;
pub mod channel;
pub mod compression;
pub mod escrow;
pub mod message;
pub mod protocol;
