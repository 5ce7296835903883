use anchor_lang::prelude::*;

/// Prepaid balance a depositor holds against one channel's message fees
/// PDA seeds: ["escrow", channel, depositor]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct EscrowAccount {
    pub channel: Pubkey,
    /// Depositor wallet
    pub depositor: Pubkey,
    /// deposits - withdrawals - fees paid
    pub balance: u64,
    pub created_at: i64,
    pub last_updated: i64,
    pub bump: u8,
}

impl EscrowAccount {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;
}
