use anchor_lang::prelude::*;

use crate::constants::MAX_BATCH_LEAVES;
use crate::errors::PodComError;
use crate::events::BatchCommitted;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{AgentAccount, ChannelAccount, CompressionState};

/// Wallet allowed to commit batches for `scope`.
fn scope_authority(ctx: &InvokeContext, scope: &Pubkey) -> Result<Pubkey> {
    if let Some(channel) = ctx.try_load::<ChannelAccount>(scope).ok().flatten() {
        return Ok(channel.creator);
    }
    if let Some(agent) = ctx.try_load::<AgentAccount>(scope).ok().flatten() {
        return Ok(agent.owner);
    }
    err!(PodComError::InvalidBatchScope)
}

pub fn handler(
    ctx: &mut InvokeContext,
    scope: Pubkey,
    root: [u8; 32],
    leaf_count: u32,
) -> Result<()> {
    require!(leaf_count > 0, PodComError::BatchEmpty);
    require!(
        leaf_count as usize <= MAX_BATCH_LEAVES,
        PodComError::BatchTooLarge
    );

    let signer = ctx.signer()?;
    let authority = scope_authority(ctx, &scope)?;
    require_keys_eq!(authority, signer, PodComError::Unauthorized);

    let now = ctx.now();
    let (state_address, bump) = pda::compression_address(&scope)?;
    let existing = ctx.try_load::<CompressionState>(&state_address)?;
    let is_new = existing.is_none();
    let mut state = existing.unwrap_or(CompressionState {
        scope,
        authority,
        latest_root: [0u8; 32],
        batch_count: 0,
        total_leaves: 0,
        last_flush_at: 0,
        bump,
    });

    let batch_index = state.batch_count;
    state.latest_root = root;
    state.authority = authority;
    state.batch_count = state
        .batch_count
        .checked_add(1)
        .ok_or(PodComError::Overflow)?;
    state.total_leaves = state
        .total_leaves
        .checked_add(u64::from(leaf_count))
        .ok_or(PodComError::Overflow)?;
    state.last_flush_at = now;

    if is_new {
        ctx.create(&state_address, CompressionState::SPACE, &state)?;
    } else {
        ctx.store(&state_address, &state)?;
    }

    msg!(
        "Batch {} committed for {}: {} leaves, root {}",
        batch_index,
        scope,
        leaf_count,
        bs58::encode(root).into_string()
    );
    ctx.emit(BatchCommitted {
        scope,
        root,
        leaf_count,
        batch_index,
        total_leaves: state.total_leaves,
    });

    Ok(())
}
