use anchor_lang::prelude::*;

use crate::errors::PodComError;
use crate::events::ProtocolAuthorityUpdated;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::ProtocolConfig;

/// Load the config and check the signer may change it.
pub(crate) fn load_mutable_config(ctx: &InvokeContext) -> Result<(Pubkey, ProtocolConfig)> {
    let signer = ctx.signer()?;
    let (config_address, _) = pda::config_address()?;
    let config: ProtocolConfig = ctx.load(&config_address)?;

    require!(!config.is_immutable(), PodComError::ImmutableAuthority);
    require_keys_eq!(config.authority, signer, PodComError::Unauthorized);

    Ok((config_address, config))
}

pub fn handler(ctx: &mut InvokeContext, new_authority: Option<Pubkey>) -> Result<()> {
    let (config_address, mut config) = load_mutable_config(ctx)?;

    let old_authority = config.authority;
    config.authority = new_authority.unwrap_or_default();
    ctx.store(&config_address, &config)?;

    msg!(
        "Protocol authority {} -> {}",
        old_authority,
        config.authority
    );
    ctx.emit(ProtocolAuthorityUpdated {
        old_authority,
        new_authority,
    });

    Ok(())
}
