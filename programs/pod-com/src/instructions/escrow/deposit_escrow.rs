use anchor_lang::prelude::*;

use crate::constants::MAX_DEPOSIT_LAMPORTS;
use crate::errors::PodComError;
use crate::events::EscrowDeposited;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{ChannelAccount, EscrowAccount};

pub fn handler(ctx: &mut InvokeContext, channel_address: Pubkey, amount: u64) -> Result<()> {
    // === Input Validation ===
    require!(amount > 0, PodComError::InvalidAmount);
    require!(amount <= MAX_DEPOSIT_LAMPORTS, PodComError::DepositTooLarge);

    let depositor = ctx.signer()?;
    let now = ctx.now();
    let mut channel: ChannelAccount = ctx.load(&channel_address)?;
    require!(channel.is_active, PodComError::ChannelInactive);
    require!(
        ctx.lamports(&depositor) >= amount,
        PodComError::InsufficientFunds
    );

    let (escrow_address, bump) = pda::escrow_address(&channel_address, &depositor)?;
    let existing = ctx.try_load::<EscrowAccount>(&escrow_address)?;
    let is_new = existing.is_none();
    let mut escrow = existing.unwrap_or(EscrowAccount {
        channel: channel_address,
        depositor,
        balance: 0,
        created_at: now,
        last_updated: now,
        bump,
    });

    escrow.balance = escrow
        .balance
        .checked_add(amount)
        .ok_or(PodComError::Overflow)?;
    escrow.last_updated = now;
    channel.escrow_balance = channel
        .escrow_balance
        .checked_add(amount)
        .ok_or(PodComError::Overflow)?;

    if is_new {
        ctx.create(&escrow_address, EscrowAccount::SPACE, &escrow)?;
    } else {
        ctx.store(&escrow_address, &escrow)?;
    }
    ctx.store(&channel_address, &channel)?;
    ctx.transfer_lamports(&depositor, &escrow_address, amount)?;

    msg!(
        "Escrow deposit {} lamports to {} (balance {})",
        amount,
        escrow_address,
        escrow.balance
    );
    ctx.emit(EscrowDeposited {
        channel: channel_address,
        depositor,
        amount,
        balance: escrow.balance,
    });

    Ok(())
}
