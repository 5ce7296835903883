use anchor_lang::prelude::*;

use crate::compression::CompressedChannelMessage;
use crate::state::{ChannelVisibility, MessageStatus, MessageType};

// ============================================================================
// Protocol Events
// ============================================================================

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub relay_authority: Option<Pubkey>,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ProtocolAuthorityUpdated {
    pub old_authority: Pubkey,
    pub new_authority: Option<Pubkey>,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct RelayAuthorityUpdated {
    pub old_relay: Option<Pubkey>,
    pub new_relay: Option<Pubkey>,
}

// ============================================================================
// Agent Events
// ============================================================================

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct AgentRegistered {
    pub agent: Pubkey,
    pub owner: Pubkey,
    pub capabilities: u8,
    pub metadata_uri: String,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct AgentUpdated {
    pub agent: Pubkey,
    pub capabilities: u8,
    pub metadata_uri: String,
}

// ============================================================================
// Message Events
// ============================================================================

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct MessageSent {
    pub message: Pubkey,
    /// Sender agent
    pub sender: Pubkey,
    /// Recipient agent
    pub recipient: Pubkey,
    pub content_hash: [u8; 32],
    pub message_type: MessageType,
    pub expires_at: i64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct MessageStatusUpdated {
    pub message: Pubkey,
    pub old_status: MessageStatus,
    pub new_status: MessageStatus,
    /// Wallet that performed the transition
    pub updated_by: Pubkey,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct MessageClosed {
    pub message: Pubkey,
    pub closed_by: Pubkey,
    pub refunded: u64,
}

// ============================================================================
// Channel Events
// ============================================================================

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelCreated {
    pub channel: Pubkey,
    pub creator: Pubkey,
    pub name: String,
    pub visibility: ChannelVisibility,
    pub max_participants: u32,
    pub fee_per_message: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelUpdated {
    pub channel: Pubkey,
    pub max_participants: u32,
    pub fee_per_message: u64,
    pub is_active: bool,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantJoined {
    pub channel: Pubkey,
    /// Joining agent
    pub participant: Pubkey,
    pub participant_count: u32,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantLeft {
    pub channel: Pubkey,
    pub participant: Pubkey,
    pub participant_count: u32,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelMessageBroadcast {
    pub channel: Pubkey,
    pub message: Pubkey,
    /// Sender agent
    pub sender: Pubkey,
    pub content_hash: [u8; 32],
    pub message_type: MessageType,
    pub fee_paid: u64,
}

/// Carries the full leaf so an off-ledger batch builder can append it
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedMessageBroadcast {
    pub leaf: CompressedChannelMessage,
    pub fee_paid: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct InvitationIssued {
    pub channel: Pubkey,
    pub invitation: Pubkey,
    pub inviter: Pubkey,
    pub invitee: Pubkey,
    pub expires_at: i64,
}

// ============================================================================
// Escrow Events
// ============================================================================

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct EscrowDeposited {
    pub channel: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    /// Depositor balance after the deposit
    pub balance: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct EscrowWithdrawn {
    pub channel: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub balance: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelFeesClaimed {
    pub channel: Pubkey,
    pub creator: Pubkey,
    pub amount: u64,
}

// ============================================================================
// Compression Events
// ============================================================================

/// Emitted when a batch root is committed for a scope
#[event]
#[derive(Clone, Debug, PartialEq)]
pub struct BatchCommitted {
    /// Channel or agent the batch belongs to
    pub scope: Pubkey,
    pub root: [u8; 32],
    pub leaf_count: u32,
    /// Zero-based index of this batch within the scope
    pub batch_index: u64,
    pub total_leaves: u64,
}

// ============================================================================
// Event Log
// ============================================================================

macro_rules! pod_events {
    ($($variant:ident),* $(,)?) => {
        /// Every event the program records, in the order it was emitted
        #[derive(Clone, Debug, PartialEq)]
        pub enum PodEvent {
            $($variant($variant),)*
        }

        $(
            impl From<$variant> for PodEvent {
                fn from(event: $variant) -> Self {
                    PodEvent::$variant(event)
                }
            }
        )*
    };
}

pod_events!(
    ProtocolInitialized,
    ProtocolAuthorityUpdated,
    RelayAuthorityUpdated,
    AgentRegistered,
    AgentUpdated,
    MessageSent,
    MessageStatusUpdated,
    MessageClosed,
    ChannelCreated,
    ChannelUpdated,
    ParticipantJoined,
    ParticipantLeft,
    ChannelMessageBroadcast,
    CompressedMessageBroadcast,
    InvitationIssued,
    EscrowDeposited,
    EscrowWithdrawn,
    ChannelFeesClaimed,
    BatchCommitted,
);
