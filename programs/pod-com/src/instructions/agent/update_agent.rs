use anchor_lang::prelude::*;

use super::validate_metadata_uri;
use crate::errors::PodComError;
use crate::events::AgentUpdated;
use crate::ledger::InvokeContext;
use crate::state::AgentAccount;

pub fn handler(
    ctx: &mut InvokeContext,
    agent_address: Pubkey,
    capabilities: Option<u8>,
    metadata_uri: Option<String>,
) -> Result<()> {
    require!(
        capabilities.is_some() || metadata_uri.is_some(),
        PodComError::EmptyUpdate
    );
    if let Some(ref uri) = metadata_uri {
        validate_metadata_uri(uri)?;
    }

    let signer = ctx.signer()?;
    let mut agent = ctx
        .try_load::<AgentAccount>(&agent_address)?
        .ok_or(PodComError::AgentNotFound)?;
    require_keys_eq!(agent.owner, signer, PodComError::Unauthorized);

    if let Some(capabilities) = capabilities {
        agent.capabilities = capabilities;
    }
    if let Some(uri) = metadata_uri {
        agent.metadata_uri = uri;
    }
    agent.last_updated = ctx.now();
    ctx.store(&agent_address, &agent)?;

    ctx.emit(AgentUpdated {
        agent: agent_address,
        capabilities: agent.capabilities,
        metadata_uri: agent.metadata_uri,
    });

    Ok(())
}
