//! Wire form of every program instruction.
//!
//! The Borsh variant tag acts as the instruction discriminator.

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;

use crate::ledger::InvokeContext;
use crate::pod_com;
use crate::state::{ChannelVisibility, MessageStatus, MessageType};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub enum PodInstruction {
    // Protocol
    Initialize {
        relay_authority: Option<Pubkey>,
    },
    UpdateProtocolAuthority {
        new_authority: Option<Pubkey>,
    },
    SetRelayAuthority {
        relay: Option<Pubkey>,
    },

    // Agent
    RegisterAgent {
        capabilities: u8,
        metadata_uri: String,
    },
    UpdateAgent {
        agent: Pubkey,
        capabilities: Option<u8>,
        metadata_uri: Option<String>,
    },

    // Message
    SendMessage {
        /// Recipient owner wallet
        recipient: Pubkey,
        payload: Vec<u8>,
        message_type: MessageType,
        ttl_days: Option<u16>,
    },
    UpdateMessageStatus {
        message: Pubkey,
        new_status: MessageStatus,
    },
    CloseMessage {
        message: Pubkey,
    },

    // Channel
    CreateChannel {
        name: String,
        description: String,
        visibility: ChannelVisibility,
        max_participants: u32,
        fee_per_message: u64,
    },
    UpdateChannel {
        channel: Pubkey,
        description: Option<String>,
        max_participants: Option<u32>,
        fee_per_message: Option<u64>,
        is_active: Option<bool>,
    },
    JoinChannel {
        channel: Pubkey,
    },
    LeaveChannel {
        channel: Pubkey,
    },
    BroadcastMessage {
        channel: Pubkey,
        content: String,
        message_type: MessageType,
        reply_to: Option<Pubkey>,
        nonce: u64,
    },
    BroadcastMessageCompressed {
        channel: Pubkey,
        content: String,
        message_type: MessageType,
        reply_to: Option<Pubkey>,
        ipfs_hash: String,
    },
    InviteToChannel {
        channel: Pubkey,
        /// Invited wallet
        invitee: Pubkey,
        nonce: u64,
    },

    // Escrow
    DepositEscrow {
        channel: Pubkey,
        amount: u64,
    },
    WithdrawEscrow {
        channel: Pubkey,
        amount: u64,
    },
    ClaimChannelFees {
        channel: Pubkey,
        amount: u64,
    },

    // Compression
    CommitBatch {
        scope: Pubkey,
        root: [u8; 32],
        leaf_count: u32,
    },
}

impl PodInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "initialize",
            Self::UpdateProtocolAuthority { .. } => "update_protocol_authority",
            Self::SetRelayAuthority { .. } => "set_relay_authority",
            Self::RegisterAgent { .. } => "register_agent",
            Self::UpdateAgent { .. } => "update_agent",
            Self::SendMessage { .. } => "send_message",
            Self::UpdateMessageStatus { .. } => "update_message_status",
            Self::CloseMessage { .. } => "close_message",
            Self::CreateChannel { .. } => "create_channel",
            Self::UpdateChannel { .. } => "update_channel",
            Self::JoinChannel { .. } => "join_channel",
            Self::LeaveChannel { .. } => "leave_channel",
            Self::BroadcastMessage { .. } => "broadcast_message",
            Self::BroadcastMessageCompressed { .. } => "broadcast_message_compressed",
            Self::InviteToChannel { .. } => "invite_to_channel",
            Self::DepositEscrow { .. } => "deposit_escrow",
            Self::WithdrawEscrow { .. } => "withdraw_escrow",
            Self::ClaimChannelFees { .. } => "claim_channel_fees",
            Self::CommitBatch { .. } => "commit_batch",
        }
    }

    /// Borsh encoding, as accepted by `Ledger::submit_bytes`
    pub fn data(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.serialize(&mut data)
            .map_err(|_| error!(ErrorCode::InstructionDidNotSerialize))?;
        Ok(data)
    }
}

/// Route an instruction to its entry point.
pub fn process_instruction(ctx: &mut InvokeContext, instruction: PodInstruction) -> Result<()> {
    msg!("Instruction: {}", instruction.name());

    match instruction {
        PodInstruction::Initialize { relay_authority } => pod_com::initialize(ctx, relay_authority),
        PodInstruction::UpdateProtocolAuthority { new_authority } => {
            pod_com::update_protocol_authority(ctx, new_authority)
        }
        PodInstruction::SetRelayAuthority { relay } => pod_com::set_relay_authority(ctx, relay),
        PodInstruction::RegisterAgent {
            capabilities,
            metadata_uri,
        } => pod_com::register_agent(ctx, capabilities, metadata_uri),
        PodInstruction::UpdateAgent {
            agent,
            capabilities,
            metadata_uri,
        } => pod_com::update_agent(ctx, agent, capabilities, metadata_uri),
        PodInstruction::SendMessage {
            recipient,
            payload,
            message_type,
            ttl_days,
        } => pod_com::send_message(ctx, recipient, payload, message_type, ttl_days),
        PodInstruction::UpdateMessageStatus {
            message,
            new_status,
        } => pod_com::update_message_status(ctx, message, new_status),
        PodInstruction::CloseMessage { message } => pod_com::close_message(ctx, message),
        PodInstruction::CreateChannel {
            name,
            description,
            visibility,
            max_participants,
            fee_per_message,
        } => pod_com::create_channel(
            ctx,
            name,
            description,
            visibility,
            max_participants,
            fee_per_message,
        ),
        PodInstruction::UpdateChannel {
            channel,
            description,
            max_participants,
            fee_per_message,
            is_active,
        } => pod_com::update_channel(
            ctx,
            channel,
            description,
            max_participants,
            fee_per_message,
            is_active,
        ),
        PodInstruction::JoinChannel { channel } => pod_com::join_channel(ctx, channel),
        PodInstruction::LeaveChannel { channel } => pod_com::leave_channel(ctx, channel),
        PodInstruction::BroadcastMessage {
            channel,
            content,
            message_type,
            reply_to,
            nonce,
        } => pod_com::broadcast_message(ctx, channel, content, message_type, reply_to, nonce),
        PodInstruction::BroadcastMessageCompressed {
            channel,
            content,
            message_type,
            reply_to,
            ipfs_hash,
        } => pod_com::broadcast_message_compressed(
            ctx,
            channel,
            content,
            message_type,
            reply_to,
            ipfs_hash,
        ),
        PodInstruction::InviteToChannel {
            channel,
            invitee,
            nonce,
        } => pod_com::invite_to_channel(ctx, channel, invitee, nonce),
        PodInstruction::DepositEscrow { channel, amount } => {
            pod_com::deposit_escrow(ctx, channel, amount)
        }
        PodInstruction::WithdrawEscrow { channel, amount } => {
            pod_com::withdraw_escrow(ctx, channel, amount)
        }
        PodInstruction::ClaimChannelFees { channel, amount } => {
            pod_com::claim_channel_fees(ctx, channel, amount)
        }
        PodInstruction::CommitBatch {
            scope,
            root,
            leaf_count,
        } => pod_com::commit_batch(ctx, scope, root, leaf_count),
    }
}
