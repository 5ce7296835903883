use anchor_lang::prelude::*;

use crate::errors::PodComError;
use crate::events::ProtocolInitialized;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::ProtocolConfig;

pub fn handler(ctx: &mut InvokeContext, relay_authority: Option<Pubkey>) -> Result<()> {
    let authority = ctx.signer()?;
    let (config_address, bump) = pda::config_address()?;

    require!(
        !ctx.exists(&config_address),
        PodComError::ProtocolAlreadyInitialized
    );

    let config = ProtocolConfig {
        authority,
        relay_authority,
        bump,
    };
    ctx.create(&config_address, ProtocolConfig::SPACE, &config)?;

    msg!("Protocol initialized, authority {}", authority);
    ctx.emit(ProtocolInitialized {
        authority,
        relay_authority,
    });

    Ok(())
}
