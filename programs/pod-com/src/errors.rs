use anchor_lang::prelude::*;

#[error_code]
pub enum PodComError {
    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[msg("Signer does not hold the required authority")]
    Unauthorized,

    #[msg("Transaction has no signer")]
    MissingSigner,

    #[msg("Protocol config already initialized")]
    ProtocolAlreadyInitialized,

    #[msg("Authority is immutable (renounced)")]
    ImmutableAuthority,

    // ========================================================================
    // Agent Errors
    // ========================================================================
    #[msg("Agent already registered for this owner")]
    AgentAlreadyRegistered,

    #[msg("Agent not registered")]
    AgentNotFound,

    #[msg("Metadata URI too long (max 200 bytes)")]
    MetadataUriTooLong,

    #[msg("Metadata URI must not be empty")]
    InvalidMetadataUri,

    #[msg("Update must supply at least one field")]
    EmptyUpdate,

    // ========================================================================
    // Message Errors
    // ========================================================================
    #[msg("Message with identical parties, content and type already exists")]
    DuplicateMessage,

    #[msg("Message expired")]
    MessageExpired,

    #[msg("Invalid message status transition")]
    InvalidStatusTransition,

    #[msg("Message TTL must be between 1 and 30 days")]
    InvalidMessageTtl,

    #[msg("Message payload too large (max 1000 bytes)")]
    PayloadTooLarge,

    #[msg("Message can only be closed once Read, Failed or expired")]
    MessageNotClosable,

    #[msg("IPFS hash must be 1-100 alphanumeric characters")]
    InvalidIpfsHash,

    // ========================================================================
    // Channel Errors
    // ========================================================================
    #[msg("Channel with this name already exists for this creator")]
    ChannelExists,

    #[msg("Channel name too long (max 32 bytes)")]
    ChannelNameTooLong,

    #[msg("Channel name must be non-empty without surrounding whitespace")]
    InvalidChannelName,

    #[msg("Channel description too long (max 200 bytes)")]
    ChannelDescriptionTooLong,

    #[msg("Participant limit must be between current count and 1000")]
    InvalidParticipantLimit,

    #[msg("Fee per message exceeds maximum (1 SOL)")]
    FeeTooHigh,

    #[msg("Channel is inactive")]
    ChannelInactive,

    #[msg("Channel is full")]
    ChannelFull,

    #[msg("Already in channel")]
    AlreadyJoined,

    #[msg("Not in channel")]
    NotInChannel,

    #[msg("Private channel requires invitation")]
    PrivateChannelRequiresInvitation,

    #[msg("Invitation is used, expired, forged or its inviter lost access")]
    InvalidInvitation,

    #[msg("Invitee already holds an open invitation")]
    AlreadyInvited,

    #[msg("Rate limit exceeded")]
    RateLimited,

    // ========================================================================
    // Escrow Errors
    // ========================================================================
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Deposit exceeds maximum (10 SOL)")]
    DepositTooLarge,

    #[msg("Escrow balance does not cover the message fee")]
    InsufficientEscrow,

    #[msg("Insufficient funds")]
    InsufficientFunds,

    #[msg("Payer cannot cover the rent-exempt minimum")]
    InsufficientLamports,

    #[msg("Arithmetic overflow")]
    Overflow,

    // ========================================================================
    // Compression Errors
    // ========================================================================
    #[msg("Batch has no leaves")]
    BatchEmpty,

    #[msg("Batch exceeds maximum leaf count (1024)")]
    BatchTooLarge,

    #[msg("Batch scope must be a channel or an agent")]
    InvalidBatchScope,

    #[msg("Batch capacity must be between 1 and 1024")]
    InvalidBatchConfig,

    #[msg("Leaf index out of range for this batch")]
    InvalidProof,

    // ========================================================================
    // Derivation Errors
    // ========================================================================
    #[msg("No viable bump seed for program address")]
    BumpSeedExhausted,
}
