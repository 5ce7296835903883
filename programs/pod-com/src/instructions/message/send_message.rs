use anchor_lang::prelude::*;

use crate::compression::keccak256;
use crate::constants::{
    DEFAULT_MESSAGE_TTL_DAYS, MAX_MESSAGE_CONTENT_LENGTH, MAX_MESSAGE_TTL_DAYS, SECONDS_PER_DAY,
};
use crate::errors::PodComError;
use crate::events::MessageSent;
use crate::instructions::agent::load_agent_of;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{MessageAccount, MessageStatus, MessageType};

/// Append a nonce so that repeated content derives a fresh message address.
pub fn message_payload_with_nonce(payload: &[u8], nonce: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 8);
    out.extend_from_slice(payload);
    out.extend_from_slice(&nonce.to_le_bytes());
    out
}

pub fn handler(
    ctx: &mut InvokeContext,
    recipient: Pubkey,
    payload: Vec<u8>,
    message_type: MessageType,
    ttl_days: Option<u16>,
) -> Result<()> {
    // === Input Validation ===
    require!(
        payload.len() <= MAX_MESSAGE_CONTENT_LENGTH,
        PodComError::PayloadTooLarge
    );
    let ttl_days = ttl_days.unwrap_or(DEFAULT_MESSAGE_TTL_DAYS);
    require!(
        (1..=MAX_MESSAGE_TTL_DAYS).contains(&ttl_days),
        PodComError::InvalidMessageTtl
    );

    let signer = ctx.signer()?;
    let (sender_agent, _) = load_agent_of(ctx, &signer)?;
    let (recipient_agent, _) = load_agent_of(ctx, &recipient)?;

    let content_hash = keccak256(&payload);
    let (message_address, bump) =
        pda::message_address(&sender_agent, &recipient_agent, &content_hash, message_type)?;
    require!(
        !ctx.exists(&message_address),
        PodComError::DuplicateMessage
    );

    let now = ctx.now();
    let expires_at = now
        .checked_add(i64::from(ttl_days) * SECONDS_PER_DAY)
        .ok_or(PodComError::Overflow)?;

    let message = MessageAccount {
        sender: sender_agent,
        recipient: recipient_agent,
        content_hash,
        message_type,
        created_at: now,
        expires_at,
        status: MessageStatus::Pending,
        bump,
    };
    ctx.create(&message_address, MessageAccount::SPACE, &message)?;

    msg!(
        "Message {} sent, content {}",
        message_address,
        bs58::encode(content_hash).into_string()
    );
    ctx.emit(MessageSent {
        message: message_address,
        sender: sender_agent,
        recipient: recipient_agent,
        content_hash,
        message_type,
        expires_at,
    });

    Ok(())
}
