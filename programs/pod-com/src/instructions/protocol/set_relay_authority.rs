use anchor_lang::prelude::*;

use super::update_authority::load_mutable_config;
use crate::events::RelayAuthorityUpdated;
use crate::ledger::InvokeContext;

pub fn handler(ctx: &mut InvokeContext, relay: Option<Pubkey>) -> Result<()> {
    let (config_address, mut config) = load_mutable_config(ctx)?;

    let old_relay = config.relay_authority;
    config.relay_authority = relay;
    ctx.store(&config_address, &config)?;

    ctx.emit(RelayAuthorityUpdated {
        old_relay,
        new_relay: relay,
    });

    Ok(())
}
