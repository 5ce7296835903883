use anchor_lang::prelude::*;

use super::is_member;
use crate::errors::PodComError;
use crate::events::ParticipantJoined;
use crate::instructions::agent::load_agent_of;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{ChannelAccount, ChannelInvitation, ChannelParticipant};

pub fn handler(ctx: &mut InvokeContext, channel_address: Pubkey) -> Result<()> {
    let signer = ctx.signer()?;
    let now = ctx.now();
    let mut channel: ChannelAccount = ctx.load(&channel_address)?;
    let (agent_address, _) = load_agent_of(ctx, &signer)?;

    require!(channel.is_active, PodComError::ChannelInactive);

    let (participant_address, bump) = pda::participant_address(&channel_address, &agent_address)?;
    let previous = ctx.try_load::<ChannelParticipant>(&participant_address)?;
    require!(
        !previous.as_ref().is_some_and(|p| p.is_active),
        PodComError::AlreadyJoined
    );
    require!(!channel.is_full(), PodComError::ChannelFull);

    // === Invitation (private channels) ===
    let invitation = if channel.is_private() {
        let (invitation_address, _) = pda::invitation_address(&channel_address, &signer)?;
        let mut invitation = ctx
            .try_load::<ChannelInvitation>(&invitation_address)?
            .ok_or(PodComError::PrivateChannelRequiresInvitation)?;

        require!(
            invitation.is_open(now)
                && invitation.hash_matches()
                && invitation.channel == channel_address
                && invitation.invitee == signer,
            PodComError::InvalidInvitation
        );
        // The inviter must still hold access at the moment of joining.
        require!(
            is_member(ctx, &channel_address, &channel, &invitation.inviter)?,
            PodComError::InvalidInvitation
        );

        invitation.is_used = true;
        Some((invitation_address, invitation))
    } else {
        None
    };

    channel.participant_count = channel
        .participant_count
        .checked_add(1)
        .ok_or(PodComError::Overflow)?;

    // A returning agent keeps its counters and rate window.
    match previous {
        Some(mut participant) => {
            participant.is_active = true;
            participant.joined_at = now;
            ctx.store(&participant_address, &participant)?;
        }
        None => {
            let participant = ChannelParticipant {
                channel: channel_address,
                participant: agent_address,
                is_active: true,
                joined_at: now,
                messages_sent: 0,
                last_message_at: 0,
                window_start: 0,
                window_messages: 0,
                bump,
            };
            ctx.create(&participant_address, ChannelParticipant::SPACE, &participant)?;
        }
    }
    ctx.store(&channel_address, &channel)?;
    if let Some((address, invitation)) = invitation {
        ctx.store(&address, &invitation)?;
    }

    msg!(
        "Agent {} joined channel {} ({}/{})",
        agent_address,
        channel_address,
        channel.participant_count,
        channel.max_participants
    );
    ctx.emit(ParticipantJoined {
        channel: channel_address,
        participant: agent_address,
        participant_count: channel.participant_count,
    });

    Ok(())
}
