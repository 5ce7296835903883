use anchor_lang::prelude::*;

use super::prepare_broadcast;
use crate::compression::CompressedChannelMessage;
use crate::constants::MAX_IPFS_HASH_LENGTH;
use crate::errors::PodComError;
use crate::events::CompressedMessageBroadcast;
use crate::ledger::InvokeContext;
use crate::state::MessageType;

pub fn handler(
    ctx: &mut InvokeContext,
    channel_address: Pubkey,
    content: String,
    message_type: MessageType,
    reply_to: Option<Pubkey>,
    ipfs_hash: String,
) -> Result<()> {
    require!(
        !ipfs_hash.is_empty()
            && ipfs_hash.len() <= MAX_IPFS_HASH_LENGTH
            && ipfs_hash.chars().all(|c| c.is_ascii_alphanumeric()),
        PodComError::InvalidIpfsHash
    );

    let broadcast = prepare_broadcast(ctx, &channel_address, &content)?;
    broadcast.apply(ctx, &channel_address)?;

    let leaf = CompressedChannelMessage::new(
        channel_address,
        broadcast.sender_agent,
        &content,
        ipfs_hash,
        message_type,
        reply_to,
        ctx.now(),
    );

    msg!(
        "Compressed message from {} in {}",
        broadcast.sender_agent,
        channel_address
    );
    ctx.emit(CompressedMessageBroadcast {
        leaf,
        fee_paid: broadcast.fee,
    });

    Ok(())
}
