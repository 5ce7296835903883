use anchor_lang::prelude::*;

use crate::constants::REPUTATION_READ_REWARD;
use crate::errors::PodComError;
use crate::events::MessageStatusUpdated;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{AgentAccount, MessageAccount, MessageStatus, ProtocolConfig};

pub fn handler(
    ctx: &mut InvokeContext,
    message_address: Pubkey,
    new_status: MessageStatus,
) -> Result<()> {
    let signer = ctx.signer()?;
    let mut message: MessageAccount = ctx.load(&message_address)?;

    // Expiry is checked before the transition so stale messages always
    // report MessageExpired.
    require!(
        !message.is_expired(ctx.now()),
        PodComError::MessageExpired
    );
    require!(
        message.status.can_transition_to(new_status),
        PodComError::InvalidStatusTransition
    );

    // === Authority ===
    let mut sender = ctx
        .try_load::<AgentAccount>(&message.sender)?
        .ok_or(PodComError::AgentNotFound)?;
    let recipient = ctx
        .try_load::<AgentAccount>(&message.recipient)?
        .ok_or(PodComError::AgentNotFound)?;
    let (config_address, _) = pda::config_address()?;
    let is_relay = ctx
        .try_load::<ProtocolConfig>(&config_address)?
        .is_some_and(|config| config.is_relay(&signer));

    let is_recipient = recipient.owner == signer;
    let is_sender = sender.owner == signer;
    let authorized = match new_status {
        MessageStatus::Delivered => is_recipient || is_relay,
        MessageStatus::Read => is_recipient,
        MessageStatus::Failed => is_recipient || is_sender || is_relay,
        MessageStatus::Pending => false,
    };
    require!(authorized, PodComError::Unauthorized);

    let old_status = message.status;
    message.status = new_status;
    ctx.store(&message_address, &message)?;

    if new_status == MessageStatus::Read {
        sender.reputation = sender.reputation.saturating_add(REPUTATION_READ_REWARD);
        ctx.store(&message.sender, &sender)?;
    }

    msg!(
        "Message {} status {:?} -> {:?}",
        message_address,
        old_status,
        new_status
    );
    ctx.emit(MessageStatusUpdated {
        message: message_address,
        old_status,
        new_status,
        updated_by: signer,
    });

    Ok(())
}
