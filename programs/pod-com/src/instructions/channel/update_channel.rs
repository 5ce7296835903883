use anchor_lang::prelude::*;

use crate::constants::{
    MAX_CHANNEL_DESCRIPTION_LENGTH, MAX_FEE_PER_MESSAGE, MAX_PARTICIPANTS_PER_CHANNEL,
};
use crate::errors::PodComError;
use crate::events::ChannelUpdated;
use crate::ledger::InvokeContext;
use crate::state::ChannelAccount;

pub fn handler(
    ctx: &mut InvokeContext,
    channel_address: Pubkey,
    description: Option<String>,
    max_participants: Option<u32>,
    fee_per_message: Option<u64>,
    is_active: Option<bool>,
) -> Result<()> {
    require!(
        description.is_some()
            || max_participants.is_some()
            || fee_per_message.is_some()
            || is_active.is_some(),
        PodComError::EmptyUpdate
    );

    let signer = ctx.signer()?;
    let mut channel: ChannelAccount = ctx.load(&channel_address)?;
    require_keys_eq!(channel.creator, signer, PodComError::Unauthorized);

    if let Some(description) = description {
        require!(
            description.len() <= MAX_CHANNEL_DESCRIPTION_LENGTH,
            PodComError::ChannelDescriptionTooLong
        );
        channel.description = description;
    }
    if let Some(max) = max_participants {
        require!(
            max >= channel.participant_count.max(1) && max <= MAX_PARTICIPANTS_PER_CHANNEL,
            PodComError::InvalidParticipantLimit
        );
        channel.max_participants = max;
    }
    if let Some(fee) = fee_per_message {
        require!(fee <= MAX_FEE_PER_MESSAGE, PodComError::FeeTooHigh);
        channel.fee_per_message = fee;
    }
    if let Some(active) = is_active {
        channel.is_active = active;
    }
    ctx.store(&channel_address, &channel)?;

    ctx.emit(ChannelUpdated {
        channel: channel_address,
        max_participants: channel.max_participants,
        fee_per_message: channel.fee_per_message,
        is_active: channel.is_active,
    });

    Ok(())
}
