pub mod close_message;
pub mod send_message;
pub mod update_message_status;

pub use send_message::message_payload_with_nonce;
