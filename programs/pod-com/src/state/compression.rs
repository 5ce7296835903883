use anchor_lang::prelude::*;

/// Commitment record for one batching scope (a channel or an agent).
/// Holds only the latest root; earlier roots live in the event log.
/// PDA seeds: ["compression", scope]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct CompressionState {
    /// Channel or agent address the batches belong to
    pub scope: Pubkey,
    /// Wallet allowed to commit for this scope
    pub authority: Pubkey,
    pub latest_root: [u8; 32],
    pub batch_count: u64,
    pub total_leaves: u64,
    pub last_flush_at: i64,
    pub bump: u8,
}

impl CompressionState {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;
}
