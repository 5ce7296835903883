use anchor_lang::prelude::*;

use super::active_participant;
use crate::errors::PodComError;
use crate::events::ParticipantLeft;
use crate::instructions::agent::load_agent_of;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::ChannelAccount;

/// Deactivates the participant record. Escrow is untouched.
pub fn handler(ctx: &mut InvokeContext, channel_address: Pubkey) -> Result<()> {
    let signer = ctx.signer()?;
    let mut channel: ChannelAccount = ctx.load(&channel_address)?;
    let (agent_address, _) = load_agent_of(ctx, &signer)?;

    let (participant_address, _) = pda::participant_address(&channel_address, &agent_address)?;
    let mut participant =
        active_participant(ctx, &participant_address)?.ok_or(PodComError::NotInChannel)?;

    channel.participant_count = channel
        .participant_count
        .checked_sub(1)
        .ok_or(PodComError::Overflow)?;
    participant.is_active = false;

    ctx.store(&participant_address, &participant)?;
    ctx.store(&channel_address, &channel)?;

    ctx.emit(ParticipantLeft {
        channel: channel_address,
        participant: agent_address,
        participant_count: channel.participant_count,
    });

    Ok(())
}
