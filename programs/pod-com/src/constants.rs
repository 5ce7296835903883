use solana_program::native_token::LAMPORTS_PER_SOL;

// ============================================================================
// Seed Tags
// ============================================================================

pub const AGENT_SEED: &[u8] = b"agent";
pub const MESSAGE_SEED: &[u8] = b"message";
pub const CHANNEL_SEED: &[u8] = b"channel";
pub const PARTICIPANT_SEED: &[u8] = b"participant";
pub const ESCROW_SEED: &[u8] = b"escrow";
pub const INVITATION_SEED: &[u8] = b"invitation";
pub const CHANNEL_MESSAGE_SEED: &[u8] = b"channel_message";
pub const COMPRESSION_SEED: &[u8] = b"compression";
pub const CONFIG_SEED: &[u8] = b"config";

/// Per-seed length limit enforced by program address derivation
pub const MAX_SEED_LENGTH: usize = 32;

// ============================================================================
// Agent Constants
// ============================================================================

/// Maximum length for agent metadata URI (bytes)
pub const MAX_METADATA_URI_LENGTH: usize = 200;

/// Reputation credited to a sender when a recipient marks its message Read
pub const REPUTATION_READ_REWARD: u64 = 1;

/// Agent capability flags (one bit each, packed into a u8)
pub mod capabilities {
    pub const TRADING: u8 = 1 << 0;
    pub const ANALYSIS: u8 = 1 << 1;
    pub const DATA_PROCESSING: u8 = 1 << 2;
    pub const CONTENT_GENERATION: u8 = 1 << 3;
    pub const CUSTOM_1: u8 = 1 << 4;
    pub const CUSTOM_2: u8 = 1 << 5;
    pub const CUSTOM_3: u8 = 1 << 6;
    pub const CUSTOM_4: u8 = 1 << 7;
}

// ============================================================================
// Message Constants
// ============================================================================

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Default message time-to-live (days)
pub const DEFAULT_MESSAGE_TTL_DAYS: u16 = 7;

/// Upper bound on a caller-supplied TTL (days)
pub const MAX_MESSAGE_TTL_DAYS: u16 = 30;

/// Maximum size of a direct message payload or channel message content (bytes).
/// Larger content belongs in IPFS with a compressed broadcast.
pub const MAX_MESSAGE_CONTENT_LENGTH: usize = 1000;

/// Maximum length of an IPFS content identifier carried by a compressed broadcast
pub const MAX_IPFS_HASH_LENGTH: usize = 100;

// ============================================================================
// Channel Constants
// ============================================================================

/// Channel names are used verbatim as a derivation seed
pub const MAX_CHANNEL_NAME_LENGTH: usize = MAX_SEED_LENGTH;

pub const MAX_CHANNEL_DESCRIPTION_LENGTH: usize = 200;

pub const MAX_PARTICIPANTS_PER_CHANNEL: u32 = 1000;

/// Max 1 SOL per message
pub const MAX_FEE_PER_MESSAGE: u64 = LAMPORTS_PER_SOL;

/// Broadcast rate limit: messages per participant per window
pub const RATE_LIMIT_MESSAGES_PER_WINDOW: u32 = 60;

pub const RATE_LIMIT_WINDOW_SECONDS: i64 = 60;

/// Invite rate limit carried on the inviter's agent account
pub const MAX_INVITES_PER_WINDOW: u16 = 10;

pub const INVITE_WINDOW_SECONDS: i64 = 60 * 60;

pub const INVITATION_TTL_SECONDS: i64 = 7 * SECONDS_PER_DAY;

// ============================================================================
// Escrow Constants
// ============================================================================

/// Max 10 SOL per deposit
pub const MAX_DEPOSIT_LAMPORTS: u64 = 10 * LAMPORTS_PER_SOL;

// ============================================================================
// Compression Constants
// ============================================================================

/// Default leaf capacity of an open batch before it auto-flushes
pub const DEFAULT_MAX_BATCH_LEAVES: usize = 100;

/// Hard ceiling on leaves committed under one root
pub const MAX_BATCH_LEAVES: usize = 1024;

/// Domain prefix for Merkle leaf hashes
pub const MERKLE_LEAF_PREFIX: u8 = 0x00;

/// Domain prefix for Merkle interior node hashes
pub const MERKLE_NODE_PREFIX: u8 = 0x01;
