use anchor_lang::prelude::*;

use super::is_member;
use crate::constants::INVITATION_TTL_SECONDS;
use crate::errors::PodComError;
use crate::events::InvitationIssued;
use crate::instructions::agent::load_agent_of;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{ChannelAccount, ChannelInvitation};

pub fn handler(
    ctx: &mut InvokeContext,
    channel_address: Pubkey,
    invitee: Pubkey,
    nonce: u64,
) -> Result<()> {
    let inviter = ctx.signer()?;
    let now = ctx.now();
    let channel: ChannelAccount = ctx.load(&channel_address)?;
    require!(channel.is_active, PodComError::ChannelInactive);

    let (inviter_agent_address, mut inviter_agent) = load_agent_of(ctx, &inviter)?;
    require!(
        is_member(ctx, &channel_address, &channel, &inviter)?,
        PodComError::Unauthorized
    );

    let (invitation_address, bump) = pda::invitation_address(&channel_address, &invitee)?;
    let existing = ctx.try_load::<ChannelInvitation>(&invitation_address)?;
    if let Some(ref open) = existing {
        require!(!open.is_open(now), PodComError::AlreadyInvited);
    }

    inviter_agent.record_invite(now)?;

    let expires_at = now
        .checked_add(INVITATION_TTL_SECONDS)
        .ok_or(PodComError::Overflow)?;
    let invitation = ChannelInvitation {
        channel: channel_address,
        inviter,
        invitee,
        invitation_hash: ChannelInvitation::compute_hash(
            &channel_address,
            &inviter,
            &invitee,
            nonce,
            now,
        ),
        nonce,
        created_at: now,
        expires_at,
        is_used: false,
        bump,
    };

    // Used or lapsed invitations are reissued in place.
    if existing.is_some() {
        ctx.store(&invitation_address, &invitation)?;
    } else {
        ctx.create(&invitation_address, ChannelInvitation::SPACE, &invitation)?;
    }
    ctx.store(&inviter_agent_address, &inviter_agent)?;

    msg!("Invitation {} issued to {}", invitation_address, invitee);
    ctx.emit(InvitationIssued {
        channel: channel_address,
        invitation: invitation_address,
        inviter,
        invitee,
        expires_at,
    });

    Ok(())
}
