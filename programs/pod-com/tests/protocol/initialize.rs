//! Tests for the initialize instruction

use pod_com::events::PodEvent;
use pod_com::pda;
use pod_com::state::ProtocolConfig;
use solana_sdk::{pubkey::Pubkey, signer::Signer};

use crate::common::*;

/// Test successful initialization with a relay
#[test]
fn test_initialize_success() {
    let mut ledger = setup_ledger();
    let authority = funded(&mut ledger);
    let relay = Pubkey::new_unique();

    let receipt = ledger
        .submit(build_initialize_ix(Some(relay)), &[authority.pubkey()])
        .expect("initialize should succeed");

    let (config_address, bump) = pda::config_address().unwrap();
    let config: ProtocolConfig = ledger.fetch_as(&config_address).unwrap();
    assert_eq!(config.authority, authority.pubkey());
    assert_eq!(config.relay_authority, Some(relay));
    assert_eq!(config.bump, bump);
    assert!(matches!(receipt.events[0], PodEvent::ProtocolInitialized(_)));
}

/// Test that initialize cannot run twice
#[test]
fn test_initialize_twice_fails() {
    let mut ledger = setup_ledger();
    let authority = funded(&mut ledger);
    let other = funded(&mut ledger);

    ledger
        .submit(build_initialize_ix(None), &[authority.pubkey()])
        .unwrap();
    let result = ledger.submit(build_initialize_ix(None), &[other.pubkey()]);
    assert_pod_error(result, PodComError::ProtocolAlreadyInitialized);
}

/// Test that a transaction without signers is rejected
#[test]
fn test_missing_signer() {
    let mut ledger = setup_ledger();
    let result = ledger.submit(build_initialize_ix(None), &[]);
    assert_pod_error(result, PodComError::MissingSigner);
}

/// Test that creating an account charges rent to the payer
#[test]
fn test_initialize_charges_rent() {
    let mut ledger = setup_ledger();
    let authority = funded(&mut ledger);
    let before = ledger.lamports(&authority.pubkey());

    ledger
        .submit(build_initialize_ix(None), &[authority.pubkey()])
        .unwrap();

    let rent = ledger.rent().minimum_balance(ProtocolConfig::SPACE);
    let (config_address, _) = pda::config_address().unwrap();
    assert_eq!(ledger.lamports(&authority.pubkey()), before - rent);
    assert_eq!(ledger.lamports(&config_address), rent);
}

/// Test that an underfunded payer cannot create accounts
#[test]
fn test_initialize_insufficient_lamports() {
    let mut ledger = setup_ledger();
    let poor = create_funded_keypair(&mut ledger, 1);
    let result = ledger.submit(build_initialize_ix(None), &[poor.pubkey()]);
    assert_pod_error(result, PodComError::InsufficientLamports);
}

/// Test the Borsh wire path
#[test]
fn test_submit_bytes_round_trip() {
    let mut ledger = setup_ledger();
    let authority = funded(&mut ledger);

    let data = build_initialize_ix(None).data().unwrap();
    ledger
        .submit_bytes(&data, &[authority.pubkey()])
        .expect("encoded initialize should succeed");

    let result = ledger.submit_bytes(&[0xff, 0x00], &[authority.pubkey()]);
    assert_anchor_error(
        result,
        anchor_lang::error::ErrorCode::InstructionDidNotDeserialize,
    );
}
