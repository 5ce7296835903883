use anchor_lang::prelude::*;

use super::validate_metadata_uri;
use crate::errors::PodComError;
use crate::events::AgentRegistered;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::AgentAccount;

pub fn handler(ctx: &mut InvokeContext, capabilities: u8, metadata_uri: String) -> Result<()> {
    // === Input Validation ===
    validate_metadata_uri(&metadata_uri)?;

    let owner = ctx.signer()?;
    let (agent_address, bump) = pda::agent_address(&owner)?;
    require!(
        !ctx.exists(&agent_address),
        PodComError::AgentAlreadyRegistered
    );

    let now = ctx.now();
    let agent = AgentAccount {
        owner,
        capabilities,
        reputation: 0,
        created_at: now,
        last_updated: now,
        invites_sent: 0,
        last_invite_window_start: 0,
        metadata_uri,
        bump,
    };
    ctx.create(&agent_address, AgentAccount::SPACE, &agent)?;

    msg!("Agent registered: {} (owner {})", agent_address, owner);
    ctx.emit(AgentRegistered {
        agent: agent_address,
        owner,
        capabilities,
        metadata_uri: agent.metadata_uri,
    });

    Ok(())
}
