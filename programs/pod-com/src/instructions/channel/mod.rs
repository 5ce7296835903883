pub mod broadcast_message;
pub mod broadcast_message_compressed;
pub mod create_channel;
pub mod invite_to_channel;
pub mod join_channel;
pub mod leave_channel;
pub mod update_channel;

use anchor_lang::prelude::*;

use crate::constants::MAX_MESSAGE_CONTENT_LENGTH;
use crate::errors::PodComError;
use crate::instructions::agent::load_agent_of;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{ChannelAccount, ChannelParticipant, EscrowAccount};

/// Active participant record at `address`, if any
pub(crate) fn active_participant(
    ctx: &InvokeContext,
    address: &Pubkey,
) -> Result<Option<ChannelParticipant>> {
    Ok(ctx
        .try_load::<ChannelParticipant>(address)?
        .filter(|participant| participant.is_active))
}

/// True when `wallet` is the creator or its agent is an active participant.
pub(crate) fn is_member(
    ctx: &InvokeContext,
    channel_address: &Pubkey,
    channel: &ChannelAccount,
    wallet: &Pubkey,
) -> Result<bool> {
    if channel.creator == *wallet {
        return Ok(true);
    }
    let (agent, _) = pda::agent_address(wallet)?;
    let (participant, _) = pda::participant_address(channel_address, &agent)?;
    Ok(active_participant(ctx, &participant)?.is_some())
}

/// Validated, not yet written, effects of a broadcast.
pub(crate) struct Broadcast {
    pub channel: ChannelAccount,
    pub sender_agent: Pubkey,
    pub participant: Option<(Pubkey, ChannelParticipant)>,
    pub escrow: Option<(Pubkey, EscrowAccount)>,
    pub fee: u64,
}

/// Run every check shared by plain and compressed broadcasts and stage the
/// rate-limit and fee bookkeeping in memory.
pub(crate) fn prepare_broadcast(
    ctx: &InvokeContext,
    channel_address: &Pubkey,
    content: &str,
) -> Result<Broadcast> {
    require!(
        content.len() <= MAX_MESSAGE_CONTENT_LENGTH,
        PodComError::PayloadTooLarge
    );

    let signer = ctx.signer()?;
    let now = ctx.now();
    let mut channel: ChannelAccount = ctx.load(channel_address)?;
    require!(channel.is_active, PodComError::ChannelInactive);

    let (sender_agent, _) = load_agent_of(ctx, &signer)?;
    let (participant_address, _) = pda::participant_address(channel_address, &sender_agent)?;
    let participant = match active_participant(ctx, &participant_address)? {
        Some(mut participant) => {
            participant.record_message(now)?;
            Some((participant_address, participant))
        }
        None => {
            require_keys_eq!(channel.creator, signer, PodComError::NotInChannel);
            None
        }
    };

    // The creator posts to its own channel without paying itself.
    let fee = if channel.creator == signer {
        0
    } else {
        channel.fee_per_message
    };

    let escrow = if fee > 0 {
        let (escrow_address, _) = pda::escrow_address(channel_address, &signer)?;
        let mut escrow = ctx
            .try_load::<EscrowAccount>(&escrow_address)?
            .ok_or(PodComError::InsufficientEscrow)?;
        require!(escrow.balance >= fee, PodComError::InsufficientEscrow);

        escrow.balance -= fee;
        escrow.last_updated = now;
        channel.escrow_balance = channel
            .escrow_balance
            .checked_sub(fee)
            .ok_or(PodComError::InsufficientEscrow)?;
        channel.fees_collected = channel
            .fees_collected
            .checked_add(fee)
            .ok_or(PodComError::Overflow)?;
        Some((escrow_address, escrow))
    } else {
        None
    };

    Ok(Broadcast {
        channel,
        sender_agent,
        participant,
        escrow,
        fee,
    })
}

impl Broadcast {
    /// Write the staged participant, escrow and channel state and move the fee.
    pub(crate) fn apply(&self, ctx: &mut InvokeContext, channel_address: &Pubkey) -> Result<()> {
        if let Some((address, participant)) = &self.participant {
            ctx.store(address, participant)?;
        }
        if let Some((address, escrow)) = &self.escrow {
            ctx.store(address, escrow)?;
            ctx.transfer_lamports(address, channel_address, self.fee)?;
        }
        ctx.store(channel_address, &self.channel)
    }
}
