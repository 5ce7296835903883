//! Program address derivation.
//!
//! Every record lives at an address derived from a seed tag and its
//! identifying keys. These seeds are a public contract: clients derive the
//! same addresses off-ledger to look records up.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PodComError;
use crate::state::MessageType;

/// Find the program address and canonical bump for `seed_tag` + `components`.
pub fn derive(seed_tag: &[u8], components: &[&[u8]]) -> Result<(Pubkey, u8)> {
    let mut seeds: Vec<&[u8]> = Vec::with_capacity(components.len() + 1);
    seeds.push(seed_tag);
    seeds.extend_from_slice(components);

    Pubkey::try_find_program_address(&seeds, &crate::ID)
        .ok_or_else(|| error!(PodComError::BumpSeedExhausted))
}

pub fn config_address() -> Result<(Pubkey, u8)> {
    derive(CONFIG_SEED, &[])
}

pub fn agent_address(owner: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(AGENT_SEED, &[owner.as_ref()])
}

pub fn message_address(
    sender_agent: &Pubkey,
    recipient_agent: &Pubkey,
    content_hash: &[u8; 32],
    message_type: MessageType,
) -> Result<(Pubkey, u8)> {
    let type_seed = message_type.seed();
    derive(
        MESSAGE_SEED,
        &[
            sender_agent.as_ref(),
            recipient_agent.as_ref(),
            content_hash,
            &type_seed,
        ],
    )
}

pub fn channel_address(creator: &Pubkey, name: &str) -> Result<(Pubkey, u8)> {
    require!(
        name.len() <= MAX_CHANNEL_NAME_LENGTH,
        PodComError::ChannelNameTooLong
    );
    derive(CHANNEL_SEED, &[creator.as_ref(), name.as_bytes()])
}

pub fn participant_address(channel: &Pubkey, agent: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(PARTICIPANT_SEED, &[channel.as_ref(), agent.as_ref()])
}

pub fn escrow_address(channel: &Pubkey, depositor: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(ESCROW_SEED, &[channel.as_ref(), depositor.as_ref()])
}

pub fn invitation_address(channel: &Pubkey, invitee: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(INVITATION_SEED, &[channel.as_ref(), invitee.as_ref()])
}

pub fn channel_message_address(
    channel: &Pubkey,
    sender_agent: &Pubkey,
    nonce: u64,
) -> Result<(Pubkey, u8)> {
    derive(
        CHANNEL_MESSAGE_SEED,
        &[channel.as_ref(), sender_agent.as_ref(), &nonce.to_le_bytes()],
    )
}

pub fn compression_address(scope: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(COMPRESSION_SEED, &[scope.as_ref()])
}
