use anchor_lang::prelude::*;

use crate::constants::{
    MAX_CHANNEL_DESCRIPTION_LENGTH, MAX_CHANNEL_NAME_LENGTH, MAX_FEE_PER_MESSAGE,
    MAX_PARTICIPANTS_PER_CHANNEL,
};
use crate::errors::PodComError;
use crate::events::ChannelCreated;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{ChannelAccount, ChannelVisibility};

pub fn handler(
    ctx: &mut InvokeContext,
    name: String,
    description: String,
    visibility: ChannelVisibility,
    max_participants: u32,
    fee_per_message: u64,
) -> Result<()> {
    // === Input Validation ===
    require!(
        name.len() <= MAX_CHANNEL_NAME_LENGTH,
        PodComError::ChannelNameTooLong
    );
    require!(
        !name.is_empty() && name.trim() == name,
        PodComError::InvalidChannelName
    );
    require!(
        description.len() <= MAX_CHANNEL_DESCRIPTION_LENGTH,
        PodComError::ChannelDescriptionTooLong
    );
    require!(
        (1..=MAX_PARTICIPANTS_PER_CHANNEL).contains(&max_participants),
        PodComError::InvalidParticipantLimit
    );
    require!(
        fee_per_message <= MAX_FEE_PER_MESSAGE,
        PodComError::FeeTooHigh
    );

    let creator = ctx.signer()?;
    let (channel_address, bump) = pda::channel_address(&creator, &name)?;
    require!(
        !ctx.exists(&channel_address),
        PodComError::ChannelExists
    );

    let channel = ChannelAccount {
        creator,
        name,
        description,
        visibility,
        max_participants,
        participant_count: 0,
        fee_per_message,
        escrow_balance: 0,
        fees_collected: 0,
        is_active: true,
        created_at: ctx.now(),
        bump,
    };
    ctx.create(&channel_address, ChannelAccount::SPACE, &channel)?;

    msg!("Channel '{}' created at {}", channel.name, channel_address);
    ctx.emit(ChannelCreated {
        channel: channel_address,
        creator,
        name: channel.name,
        visibility,
        max_participants,
        fee_per_message,
    });

    Ok(())
}
