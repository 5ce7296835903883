use anchor_lang::prelude::*;

use crate::errors::PodComError;
use crate::events::EscrowWithdrawn;
use crate::ledger::InvokeContext;
use crate::pda;
use crate::state::{ChannelAccount, EscrowAccount};

pub fn handler(ctx: &mut InvokeContext, channel_address: Pubkey, amount: u64) -> Result<()> {
    require!(amount > 0, PodComError::InvalidAmount);

    let depositor = ctx.signer()?;
    let mut channel: ChannelAccount = ctx.load(&channel_address)?;

    let (escrow_address, _) = pda::escrow_address(&channel_address, &depositor)?;
    let mut escrow = ctx
        .try_load::<EscrowAccount>(&escrow_address)?
        .ok_or(PodComError::InsufficientFunds)?;
    require_keys_eq!(escrow.depositor, depositor, PodComError::Unauthorized);
    require!(escrow.balance >= amount, PodComError::InsufficientFunds);

    escrow.balance -= amount;
    escrow.last_updated = ctx.now();
    channel.escrow_balance = channel
        .escrow_balance
        .checked_sub(amount)
        .ok_or(PodComError::InsufficientFunds)?;

    ctx.store(&escrow_address, &escrow)?;
    ctx.store(&channel_address, &channel)?;
    ctx.transfer_lamports(&escrow_address, &depositor, amount)?;

    ctx.emit(EscrowWithdrawn {
        channel: channel_address,
        depositor,
        amount,
        balance: escrow.balance,
    });

    Ok(())
}
