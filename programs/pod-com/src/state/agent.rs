use anchor_lang::prelude::*;

use crate::constants::{INVITE_WINDOW_SECONDS, MAX_INVITES_PER_WINDOW};
use crate::errors::PodComError;

/// Agent identity account, one per owning wallet
/// PDA seeds: ["agent", owner]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct AgentAccount {
    /// Wallet that registered and controls this agent
    pub owner: Pubkey,

    /// Capability bitmask (see `constants::capabilities`)
    pub capabilities: u8,

    /// Reputation score, credited as recipients read this agent's messages
    pub reputation: u64,

    pub created_at: i64,

    pub last_updated: i64,

    /// Invites issued inside the current rate-limit window
    pub invites_sent: u16,

    /// Start of the current invite window, meaningful while `invites_sent > 0`
    pub last_invite_window_start: i64,

    /// Off-ledger profile location
    #[max_len(200)]
    pub metadata_uri: String,

    /// PDA bump seed
    pub bump: u8,
}

impl AgentAccount {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    /// True when every bit of `mask` is set on this agent
    pub fn has_capabilities(&self, mask: u8) -> bool {
        self.capabilities & mask == mask
    }

    /// Count one invite against the rolling window, opening a new window
    /// once the previous one has elapsed.
    pub fn record_invite(&mut self, now: i64) -> Result<()> {
        let window_open = self.invites_sent > 0
            && now - self.last_invite_window_start < INVITE_WINDOW_SECONDS;

        if window_open {
            require!(
                self.invites_sent < MAX_INVITES_PER_WINDOW,
                PodComError::RateLimited
            );
            self.invites_sent += 1;
        } else {
            self.last_invite_window_start = now;
            self.invites_sent = 1;
        }
        Ok(())
    }
}
