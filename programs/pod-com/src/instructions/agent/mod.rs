pub mod register_agent;
pub mod update_agent;

use anchor_lang::prelude::*;

use crate::errors::PodComError;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::AgentAccount;

/// Resolve the agent registered to `owner`.
pub(crate) fn load_agent_of(ctx: &InvokeContext, owner: &Pubkey) -> Result<(Pubkey, AgentAccount)> {
    let (address, _) = pda::agent_address(owner)?;
    let agent = ctx
        .try_load::<AgentAccount>(&address)?
        .ok_or(PodComError::AgentNotFound)?;
    Ok((address, agent))
}

pub(crate) fn validate_metadata_uri(uri: &str) -> Result<()> {
    require!(
        uri.len() <= crate::constants::MAX_METADATA_URI_LENGTH,
        PodComError::MetadataUriTooLong
    );
    require!(!uri.trim().is_empty(), PodComError::InvalidMetadataUri);
    Ok(())
}
