use anchor_lang::prelude::*;

use crate::errors::PodComError;
use crate::events::MessageClosed;
use crate::ledger::InvokeContext;
use crate::state::{AgentAccount, MessageAccount};

pub fn handler(ctx: &mut InvokeContext, message_address: Pubkey) -> Result<()> {
    let signer = ctx.signer()?;
    let message: MessageAccount = ctx.load(&message_address)?;

    let sender = ctx
        .try_load::<AgentAccount>(&message.sender)?
        .ok_or(PodComError::AgentNotFound)?;
    require_keys_eq!(sender.owner, signer, PodComError::Unauthorized);
    require!(
        message.status.is_terminal() || message.is_expired(ctx.now()),
        PodComError::MessageNotClosable
    );

    let refunded = ctx.close(&message_address, &signer)?;

    ctx.emit(MessageClosed {
        message: message_address,
        closed_by: signer,
        refunded,
    });

    Ok(())
}
