use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use super::merkle::{hash_leaf, keccak256, Hash};
use crate::state::{MessageAccount, MessageType};

/// Direct message archived into an agent-scoped batch
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompressedMessage {
    /// Sender agent
    pub sender: Pubkey,
    /// Recipient agent
    pub recipient: Pubkey,
    pub content_hash: [u8; 32],
    /// IPFS location of the payload
    pub ipfs_hash: String,
    pub message_type: MessageType,
    pub created_at: i64,
}

impl CompressedMessage {
    pub fn from_account(message: &MessageAccount, ipfs_hash: String) -> Self {
        Self {
            sender: message.sender,
            recipient: message.recipient,
            content_hash: message.content_hash,
            ipfs_hash,
            message_type: message.message_type,
            created_at: message.created_at,
        }
    }
}

/// Channel broadcast committed only through a batch root
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompressedChannelMessage {
    pub channel: Pubkey,
    /// Sender agent
    pub sender: Pubkey,
    /// keccak256 of the full content
    pub content_hash: [u8; 32],
    pub ipfs_hash: String,
    pub message_type: MessageType,
    pub reply_to: Option<Pubkey>,
    pub created_at: i64,
}

impl CompressedChannelMessage {
    pub fn new(
        channel: Pubkey,
        sender: Pubkey,
        content: &str,
        ipfs_hash: String,
        message_type: MessageType,
        reply_to: Option<Pubkey>,
        created_at: i64,
    ) -> Self {
        Self {
            channel,
            sender,
            content_hash: keccak256(content.as_bytes()),
            ipfs_hash,
            message_type,
            reply_to,
            created_at,
        }
    }
}

/// One leaf of a compressed batch
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum BatchItem {
    Direct(CompressedMessage),
    Channel(CompressedChannelMessage),
}

impl BatchItem {
    /// Canonical leaf hash: keccak256(0x00 || borsh(item))
    pub fn leaf_hash(&self) -> Result<Hash> {
        let mut bytes = Vec::new();
        self.serialize(&mut bytes)
            .map_err(|_| ErrorCode::AccountDidNotSerialize)?;
        Ok(hash_leaf(&bytes))
    }

    /// Channel or agent address this item is batched under
    pub fn scope(&self) -> Pubkey {
        match self {
            BatchItem::Direct(m) => m.sender,
            BatchItem::Channel(m) => m.channel,
        }
    }
}

impl From<CompressedMessage> for BatchItem {
    fn from(message: CompressedMessage) -> Self {
        BatchItem::Direct(message)
    }
}

impl From<CompressedChannelMessage> for BatchItem {
    fn from(message: CompressedChannelMessage) -> Self {
        BatchItem::Channel(message)
    }
}
