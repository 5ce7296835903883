use anchor_lang::prelude::*;

use super::prepare_broadcast;
use crate::compression::keccak256;
use crate::errors::PodComError;
use crate::events::ChannelMessageBroadcast;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{ChannelMessage, MessageType};

pub fn handler(
    ctx: &mut InvokeContext,
    channel_address: Pubkey,
    content: String,
    message_type: MessageType,
    reply_to: Option<Pubkey>,
    nonce: u64,
) -> Result<()> {
    let broadcast = prepare_broadcast(ctx, &channel_address, &content)?;

    let (message_address, bump) =
        pda::channel_message_address(&channel_address, &broadcast.sender_agent, nonce)?;
    require!(
        !ctx.exists(&message_address),
        PodComError::DuplicateMessage
    );

    let content_hash = keccak256(content.as_bytes());
    let message = ChannelMessage {
        channel: channel_address,
        sender: broadcast.sender_agent,
        content_hash,
        message_type,
        reply_to,
        created_at: ctx.now(),
        bump,
        content,
    };

    broadcast.apply(ctx, &channel_address)?;
    ctx.create(&message_address, ChannelMessage::SPACE, &message)?;

    ctx.emit(ChannelMessageBroadcast {
        channel: channel_address,
        message: message_address,
        sender: broadcast.sender_agent,
        content_hash,
        message_type,
        fee_paid: broadcast.fee,
    });

    Ok(())
}
