use anchor_lang::prelude::*;
#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

pub mod compression;
pub mod constants;
pub mod errors;
pub mod events;
pub mod indexer;
pub mod instruction;
pub mod instructions;
pub mod ledger;
pub mod pda;
pub mod state;

pub use instruction::PodInstruction;
pub use ledger::{InvokeContext, Ledger, LedgerConfig, SharedLedger, TransactionReceipt};

use state::*;

declare_id!("PoD1111111111111111111111111111111111111111");

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "PoD Protocol",
    project_url: "https://github.com/PoD-Protocol/pod-protocol",
    contacts: "email:security@pod-protocol.com",
    policy: "https://github.com/PoD-Protocol/pod-protocol/blob/main/SECURITY.md",
    preferred_languages: "en",
    source_code: "https://github.com/PoD-Protocol/pod-protocol",
    auditors: "N/A"
}

pub mod pod_com {
    use super::*;

    // =========================================================================
    // Protocol Instructions
    // =========================================================================

    /// Initialize the protocol config. The signer becomes its authority.
    pub fn initialize(ctx: &mut InvokeContext, relay_authority: Option<Pubkey>) -> Result<()> {
        instructions::protocol::initialize::handler(ctx, relay_authority)
    }

    /// Update or renounce protocol authority.
    /// Pass None to renounce (makes config immutable).
    pub fn update_protocol_authority(
        ctx: &mut InvokeContext,
        new_authority: Option<Pubkey>,
    ) -> Result<()> {
        instructions::protocol::update_authority::handler(ctx, new_authority)
    }

    /// Set or clear the relay allowed to advance delivery status.
    pub fn set_relay_authority(ctx: &mut InvokeContext, relay: Option<Pubkey>) -> Result<()> {
        instructions::protocol::set_relay_authority::handler(ctx, relay)
    }

    // =========================================================================
    // Agent Instructions
    // =========================================================================

    /// Register the signer's agent.
    pub fn register_agent(
        ctx: &mut InvokeContext,
        capabilities: u8,
        metadata_uri: String,
    ) -> Result<()> {
        instructions::agent::register_agent::handler(ctx, capabilities, metadata_uri)
    }

    /// Change capabilities and/or metadata URI. Owner only.
    pub fn update_agent(
        ctx: &mut InvokeContext,
        agent: Pubkey,
        capabilities: Option<u8>,
        metadata_uri: Option<String>,
    ) -> Result<()> {
        instructions::agent::update_agent::handler(ctx, agent, capabilities, metadata_uri)
    }

    // =========================================================================
    // Message Instructions
    // =========================================================================

    /// Send a direct message to another registered agent's owner wallet.
    pub fn send_message(
        ctx: &mut InvokeContext,
        recipient: Pubkey,
        payload: Vec<u8>,
        message_type: MessageType,
        ttl_days: Option<u16>,
    ) -> Result<()> {
        instructions::message::send_message::handler(ctx, recipient, payload, message_type, ttl_days)
    }

    /// Advance a message along its delivery state machine.
    pub fn update_message_status(
        ctx: &mut InvokeContext,
        message: Pubkey,
        new_status: MessageStatus,
    ) -> Result<()> {
        instructions::message::update_message_status::handler(ctx, message, new_status)
    }

    /// Close a finished or expired message and reclaim its rent.
    pub fn close_message(ctx: &mut InvokeContext, message: Pubkey) -> Result<()> {
        instructions::message::close_message::handler(ctx, message)
    }

    // =========================================================================
    // Channel Instructions
    // =========================================================================

    pub fn create_channel(
        ctx: &mut InvokeContext,
        name: String,
        description: String,
        visibility: ChannelVisibility,
        max_participants: u32,
        fee_per_message: u64,
    ) -> Result<()> {
        instructions::channel::create_channel::handler(
            ctx,
            name,
            description,
            visibility,
            max_participants,
            fee_per_message,
        )
    }

    /// Creator-only settings change. Deactivation is a soft delete.
    pub fn update_channel(
        ctx: &mut InvokeContext,
        channel: Pubkey,
        description: Option<String>,
        max_participants: Option<u32>,
        fee_per_message: Option<u64>,
        is_active: Option<bool>,
    ) -> Result<()> {
        instructions::channel::update_channel::handler(
            ctx,
            channel,
            description,
            max_participants,
            fee_per_message,
            is_active,
        )
    }

    pub fn join_channel(ctx: &mut InvokeContext, channel: Pubkey) -> Result<()> {
        instructions::channel::join_channel::handler(ctx, channel)
    }

    pub fn leave_channel(ctx: &mut InvokeContext, channel: Pubkey) -> Result<()> {
        instructions::channel::leave_channel::handler(ctx, channel)
    }

    /// Post a message stored in its own account, paying the channel fee from escrow.
    pub fn broadcast_message(
        ctx: &mut InvokeContext,
        channel: Pubkey,
        content: String,
        message_type: MessageType,
        reply_to: Option<Pubkey>,
        nonce: u64,
    ) -> Result<()> {
        instructions::channel::broadcast_message::handler(
            ctx,
            channel,
            content,
            message_type,
            reply_to,
            nonce,
        )
    }

    /// Post a message whose content lives in IPFS and whose record is a batch leaf.
    pub fn broadcast_message_compressed(
        ctx: &mut InvokeContext,
        channel: Pubkey,
        content: String,
        message_type: MessageType,
        reply_to: Option<Pubkey>,
        ipfs_hash: String,
    ) -> Result<()> {
        instructions::channel::broadcast_message_compressed::handler(
            ctx,
            channel,
            content,
            message_type,
            reply_to,
            ipfs_hash,
        )
    }

    pub fn invite_to_channel(
        ctx: &mut InvokeContext,
        channel: Pubkey,
        invitee: Pubkey,
        nonce: u64,
    ) -> Result<()> {
        instructions::channel::invite_to_channel::handler(ctx, channel, invitee, nonce)
    }

    // =========================================================================
    // Escrow Instructions
    // =========================================================================

    pub fn deposit_escrow(ctx: &mut InvokeContext, channel: Pubkey, amount: u64) -> Result<()> {
        instructions::escrow::deposit_escrow::handler(ctx, channel, amount)
    }

    pub fn withdraw_escrow(ctx: &mut InvokeContext, channel: Pubkey, amount: u64) -> Result<()> {
        instructions::escrow::withdraw_escrow::handler(ctx, channel, amount)
    }

    /// Move collected message fees to the channel creator.
    pub fn claim_channel_fees(ctx: &mut InvokeContext, channel: Pubkey, amount: u64) -> Result<()> {
        instructions::escrow::claim_channel_fees::handler(ctx, channel, amount)
    }

    // =========================================================================
    // Compression Instructions
    // =========================================================================

    /// Record a batch root for a channel or agent scope.
    pub fn commit_batch(
        ctx: &mut InvokeContext,
        scope: Pubkey,
        root: [u8; 32],
        leaf_count: u32,
    ) -> Result<()> {
        instructions::compression::commit_batch::handler(ctx, scope, root, leaf_count)
    }
}
