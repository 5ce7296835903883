use anchor_lang::prelude::*;

/// Kind of payload a message carries
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum MessageType {
    Text,
    Data,
    Command,
    Response,
    Custom(u8),
}

impl MessageType {
    /// Two-byte derivation seed. Built-in types use `[tag, 0]`, custom
    /// codes use `[4, code]` so every code maps to its own address.
    pub fn seed(&self) -> [u8; 2] {
        match self {
            MessageType::Text => [0, 0],
            MessageType::Data => [1, 0],
            MessageType::Command => [2, 0],
            MessageType::Response => [3, 0],
            MessageType::Custom(code) => [4, *code],
        }
    }
}

/// Delivery state of a direct message
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum MessageStatus {
    Pending,
    Delivered,
    Read,
    Failed,
}

impl MessageStatus {
    /// Allowed edges: Pending -> Delivered -> Read, and Pending/Delivered -> Failed.
    pub fn can_transition_to(self, next: MessageStatus) -> bool {
        matches!(
            (self, next),
            (MessageStatus::Pending, MessageStatus::Delivered)
                | (MessageStatus::Delivered, MessageStatus::Read)
                | (MessageStatus::Pending, MessageStatus::Failed)
                | (MessageStatus::Delivered, MessageStatus::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, MessageStatus::Read | MessageStatus::Failed)
    }
}

/// Direct agent-to-agent message. Holds a digest of the payload, never the payload.
/// PDA seeds: ["message", sender, recipient, content_hash, message_type.seed()]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct MessageAccount {
    /// Sender agent address
    pub sender: Pubkey,
    /// Recipient agent address
    pub recipient: Pubkey,
    /// keccak256 of the payload
    pub content_hash: [u8; 32],
    pub message_type: MessageType,
    pub created_at: i64,
    pub expires_at: i64,
    pub status: MessageStatus,
    pub bump: u8,
}

impl MessageAccount {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expires_at
    }
}

/// Uncompressed channel broadcast record
/// PDA seeds: ["channel_message", channel, sender, nonce.to_le_bytes()]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct ChannelMessage {
    pub channel: Pubkey,
    /// Sender agent address
    pub sender: Pubkey,
    pub content_hash: [u8; 32],
    pub message_type: MessageType,
    pub reply_to: Option<Pubkey>,
    pub created_at: i64,
    pub bump: u8,
    #[max_len(1000)]
    pub content: String,
}

impl ChannelMessage {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;
}
