//! Account setup and typed fetch helpers

use pod_com::compression::keccak256;
use pod_com::constants::capabilities;
use pod_com::pda;
use pod_com::state::*;
use pod_com::Ledger;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};

use super::instructions::*;
use super::setup::funded;

pub const TEST_URI: &str = "https://agents.example/profile.json";

/// Register an agent for `owner` and return its address
pub fn register_agent(ledger: &mut Ledger, owner: &Keypair) -> Pubkey {
    ledger
        .submit(
            build_register_agent_ix(capabilities::TRADING | capabilities::ANALYSIS, TEST_URI),
            &[owner.pubkey()],
        )
        .expect("register agent");
    agent_pda(&owner.pubkey())
}

/// Funded wallet with a registered agent
pub fn create_agent(ledger: &mut Ledger) -> (Keypair, Pubkey) {
    let owner = funded(ledger);
    let agent = register_agent(ledger, &owner);
    (owner, agent)
}

pub fn create_channel(
    ledger: &mut Ledger,
    creator: &Keypair,
    name: &str,
    visibility: ChannelVisibility,
    max_participants: u32,
    fee_per_message: u64,
) -> Pubkey {
    ledger
        .submit(
            build_create_channel_ix(name, visibility, max_participants, fee_per_message),
            &[creator.pubkey()],
        )
        .expect("create channel");
    channel_pda(&creator.pubkey(), name)
}

pub fn join(ledger: &mut Ledger, wallet: &Keypair, channel: Pubkey) {
    ledger
        .submit(build_join_ix(channel), &[wallet.pubkey()])
        .expect("join channel");
}

pub fn deposit(ledger: &mut Ledger, wallet: &Keypair, channel: Pubkey, amount: u64) {
    ledger
        .submit(build_deposit_ix(channel, amount), &[wallet.pubkey()])
        .expect("deposit escrow");
}

/// Send `payload` and return the message address
pub fn send_message(
    ledger: &mut Ledger,
    sender: &Keypair,
    recipient: &Keypair,
    payload: &[u8],
) -> Pubkey {
    ledger
        .submit(
            build_send_message_ix(recipient.pubkey(), payload, MessageType::Text, None),
            &[sender.pubkey()],
        )
        .expect("send message");
    message_pda(
        &agent_pda(&sender.pubkey()),
        &agent_pda(&recipient.pubkey()),
        payload,
        MessageType::Text,
    )
}

// ============================================================================
// Addresses
// ============================================================================

pub fn agent_pda(owner: &Pubkey) -> Pubkey {
    pda::agent_address(owner).unwrap().0
}

pub fn channel_pda(creator: &Pubkey, name: &str) -> Pubkey {
    pda::channel_address(creator, name).unwrap().0
}

pub fn participant_pda(channel: &Pubkey, agent: &Pubkey) -> Pubkey {
    pda::participant_address(channel, agent).unwrap().0
}

pub fn escrow_pda(channel: &Pubkey, depositor: &Pubkey) -> Pubkey {
    pda::escrow_address(channel, depositor).unwrap().0
}

pub fn invitation_pda(channel: &Pubkey, invitee: &Pubkey) -> Pubkey {
    pda::invitation_address(channel, invitee).unwrap().0
}

pub fn message_pda(
    sender_agent: &Pubkey,
    recipient_agent: &Pubkey,
    payload: &[u8],
    message_type: MessageType,
) -> Pubkey {
    pda::message_address(sender_agent, recipient_agent, &keccak256(payload), message_type)
        .unwrap()
        .0
}

// ============================================================================
// Typed Fetch
// ============================================================================

pub fn get_agent(ledger: &Ledger, address: &Pubkey) -> AgentAccount {
    ledger.fetch_as(address).expect("agent account")
}

pub fn get_message(ledger: &Ledger, address: &Pubkey) -> MessageAccount {
    ledger.fetch_as(address).expect("message account")
}

pub fn get_channel(ledger: &Ledger, address: &Pubkey) -> ChannelAccount {
    ledger.fetch_as(address).expect("channel account")
}

pub fn get_escrow(ledger: &Ledger, address: &Pubkey) -> EscrowAccount {
    ledger.fetch_as(address).expect("escrow account")
}

pub fn get_invitation(ledger: &Ledger, address: &Pubkey) -> ChannelInvitation {
    ledger.fetch_as(address).expect("invitation account")
}
