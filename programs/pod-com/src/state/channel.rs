use anchor_lang::prelude::*;
use sha3::{Digest, Keccak256};

use crate::constants::{RATE_LIMIT_MESSAGES_PER_WINDOW, RATE_LIMIT_WINDOW_SECONDS};
use crate::errors::PodComError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum ChannelVisibility {
    /// Any registered agent may join
    Public,
    /// Joining requires an open invitation
    Private,
}

/// Group channel owned by the creating wallet
/// PDA seeds: ["channel", creator, name]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct ChannelAccount {
    /// Creator wallet (controls settings and collected fees)
    pub creator: Pubkey,

    #[max_len(32)]
    pub name: String,

    #[max_len(200)]
    pub description: String,

    pub visibility: ChannelVisibility,

    pub max_participants: u32,

    /// Live participant records, the creator is not counted
    pub participant_count: u32,

    /// Lamports debited from the sender's escrow per broadcast
    pub fee_per_message: u64,

    /// Sum of all depositor escrow balances for this channel
    pub escrow_balance: u64,

    /// Fees taken from escrows and not yet claimed by the creator
    pub fees_collected: u64,

    pub is_active: bool,

    pub created_at: i64,

    pub bump: u8,
}

impl ChannelAccount {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn is_full(&self) -> bool {
        self.participant_count >= self.max_participants
    }

    pub fn is_private(&self) -> bool {
        self.visibility == ChannelVisibility::Private
    }
}

/// Membership record for one agent in one channel. Leaving deactivates the
/// record; the rate window carries over to a rejoin.
/// PDA seeds: ["participant", channel, agent]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct ChannelParticipant {
    pub channel: Pubkey,

    /// Participant agent address
    pub participant: Pubkey,

    /// Cleared on leave, set again on rejoin
    pub is_active: bool,

    /// Most recent join
    pub joined_at: i64,

    pub messages_sent: u64,

    pub last_message_at: i64,

    /// Start of the current broadcast rate window
    pub window_start: i64,

    /// Broadcasts counted inside the current window
    pub window_messages: u32,

    pub bump: u8,
}

impl ChannelParticipant {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    /// Count one broadcast against the fixed rate window.
    pub fn record_message(&mut self, now: i64) -> Result<()> {
        if now - self.window_start >= RATE_LIMIT_WINDOW_SECONDS {
            self.window_start = now;
            self.window_messages = 0;
        }
        require!(
            self.window_messages < RATE_LIMIT_MESSAGES_PER_WINDOW,
            PodComError::RateLimited
        );

        self.window_messages += 1;
        self.messages_sent = self.messages_sent.saturating_add(1);
        self.last_message_at = now;
        Ok(())
    }
}

/// Invitation for a wallet to join a private channel. Single use.
/// PDA seeds: ["invitation", channel, invitee]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct ChannelInvitation {
    pub channel: Pubkey,
    /// Inviting wallet
    pub inviter: Pubkey,
    /// Invited wallet
    pub invitee: Pubkey,
    /// keccak256(channel || inviter || invitee || nonce || created_at)
    pub invitation_hash: [u8; 32],
    pub nonce: u64,
    pub created_at: i64,
    pub expires_at: i64,
    pub is_used: bool,
    pub bump: u8,
}

impl ChannelInvitation {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn compute_hash(
        channel: &Pubkey,
        inviter: &Pubkey,
        invitee: &Pubkey,
        nonce: u64,
        created_at: i64,
    ) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(channel.as_ref());
        hasher.update(inviter.as_ref());
        hasher.update(invitee.as_ref());
        hasher.update(nonce.to_le_bytes());
        hasher.update(created_at.to_le_bytes());
        hasher.finalize().into()
    }

    /// Unused and unexpired
    pub fn is_open(&self, now: i64) -> bool {
        !self.is_used && now <= self.expires_at
    }

    /// True when the stored hash matches the stored fields
    pub fn hash_matches(&self) -> bool {
        self.invitation_hash
            == Self::compute_hash(
                &self.channel,
                &self.inviter,
                &self.invitee,
                self.nonce,
                self.created_at,
            )
    }
}
