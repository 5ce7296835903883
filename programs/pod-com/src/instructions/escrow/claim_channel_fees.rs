use anchor_lang::prelude::*;

use crate::errors::PodComError;
use crate::events::ChannelFeesClaimed;
use crate::ledger::InvokeContext;
use crate::state::ChannelAccount;

pub fn handler(ctx: &mut InvokeContext, channel_address: Pubkey, amount: u64) -> Result<()> {
    require!(amount > 0, PodComError::InvalidAmount);

    let creator = ctx.signer()?;
    let mut channel: ChannelAccount = ctx.load(&channel_address)?;
    require_keys_eq!(channel.creator, creator, PodComError::Unauthorized);
    require!(
        channel.fees_collected >= amount,
        PodComError::InsufficientFunds
    );

    channel.fees_collected -= amount;
    ctx.store(&channel_address, &channel)?;
    ctx.transfer_lamports(&channel_address, &creator, amount)?;

    msg!("Claimed {} lamports of fees from {}", amount, channel_address);
    ctx.emit(ChannelFeesClaimed {
        channel: channel_address,
        creator,
        amount,
    });

    Ok(())
}
