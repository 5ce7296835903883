use anchor_lang::prelude::*;

/// Protocol configuration account
/// PDA seeds: ["config"]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct ProtocolConfig {
    /// Authority that can update protocol settings
    /// Set to Pubkey::default() to make immutable
    pub authority: Pubkey,

    /// Relay allowed to mark messages Delivered or Failed on behalf of recipients
    pub relay_authority: Option<Pubkey>,

    /// PDA bump seed
    pub bump: u8,
}

impl ProtocolConfig {
    /// discriminator (8) + authority (32) + relay (1 + 32) + bump (1)
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    /// Check if config is immutable (authority renounced)
    pub fn is_immutable(&self) -> bool {
        self.authority == Pubkey::default()
    }

    pub fn is_relay(&self, key: &Pubkey) -> bool {
        self.relay_authority.as_ref() == Some(key)
    }
}
