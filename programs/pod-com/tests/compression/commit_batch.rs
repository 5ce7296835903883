//! Tests for commit_batch authority and bookkeeping

use pod_com::constants::MAX_BATCH_LEAVES;
use pod_com::events::PodEvent;
use pod_com::pda;
use pod_com::state::{ChannelVisibility, CompressionState};
use pod_com::Ledger;
use solana_sdk::{pubkey::Pubkey, signer::Signer};

use crate::common::*;

fn get_compression(ledger: &Ledger, scope: &Pubkey) -> CompressionState {
    let (address, _) = pda::compression_address(scope).unwrap();
    ledger.fetch_as(&address).expect("compression state")
}

/// Test the first commit creates state and later commits accumulate
#[test]
fn test_commit_batch_accumulates() {
    let mut ledger = setup_ledger();
    let creator = funded(&mut ledger);
    let channel = create_channel(&mut ledger, &creator, "archive", ChannelVisibility::Public, 10, 0);

    let receipt = ledger
        .submit(build_commit_batch_ix(channel, [1; 32], 5), &[creator.pubkey()])
        .expect("first commit");
    assert!(matches!(
        &receipt.events[..],
        [PodEvent::BatchCommitted(e)] if e.batch_index == 0 && e.total_leaves == 5
    ));

    ledger.warp_to_timestamp(GENESIS_TIMESTAMP + 30);
    ledger
        .submit(build_commit_batch_ix(channel, [2; 32], 7), &[creator.pubkey()])
        .expect("second commit");

    let state = get_compression(&ledger, &channel);
    assert_eq!(state.scope, channel);
    assert_eq!(state.authority, creator.pubkey());
    assert_eq!(state.latest_root, [2; 32]);
    assert_eq!(state.batch_count, 2);
    assert_eq!(state.total_leaves, 12);
    assert_eq!(state.last_flush_at, GENESIS_TIMESTAMP + 30);
}

/// Test leaf count bounds
#[test]
fn test_commit_batch_leaf_bounds() {
    let mut ledger = setup_ledger();
    let creator = funded(&mut ledger);
    let channel = create_channel(&mut ledger, &creator, "archive", ChannelVisibility::Public, 10, 0);

    assert_pod_error(
        ledger.submit(build_commit_batch_ix(channel, [1; 32], 0), &[creator.pubkey()]),
        PodComError::BatchEmpty,
    );
    assert_pod_error(
        ledger.submit(
            build_commit_batch_ix(channel, [1; 32], MAX_BATCH_LEAVES as u32 + 1),
            &[creator.pubkey()],
        ),
        PodComError::BatchTooLarge,
    );
    ledger
        .submit(
            build_commit_batch_ix(channel, [1; 32], MAX_BATCH_LEAVES as u32),
            &[creator.pubkey()],
        )
        .expect("full batch");
}

/// Test only the scope authority may commit, and only for known scopes
#[test]
fn test_commit_batch_authority() {
    let mut ledger = setup_ledger();
    let (creator, creator_agent) = create_agent(&mut ledger);
    let channel = create_channel(&mut ledger, &creator, "archive", ChannelVisibility::Public, 10, 0);
    let (other, _) = create_agent(&mut ledger);
    let message = send_message(&mut ledger, &creator, &other, b"not a scope");

    assert_pod_error(
        ledger.submit(build_commit_batch_ix(channel, [1; 32], 1), &[other.pubkey()]),
        PodComError::Unauthorized,
    );
    assert_pod_error(
        ledger.submit(build_commit_batch_ix(creator_agent, [1; 32], 1), &[other.pubkey()]),
        PodComError::Unauthorized,
    );
    assert_pod_error(
        ledger.submit(
            build_commit_batch_ix(Pubkey::new_unique(), [1; 32], 1),
            &[creator.pubkey()],
        ),
        PodComError::InvalidBatchScope,
    );
    assert_pod_error(
        ledger.submit(build_commit_batch_ix(message, [1; 32], 1), &[creator.pubkey()]),
        PodComError::InvalidBatchScope,
    );

    // An agent owner commits for its own agent scope
    ledger
        .submit(build_commit_batch_ix(creator_agent, [9; 32], 3), &[creator.pubkey()])
        .expect("agent scope commit");
    assert_eq!(get_compression(&ledger, &creator_agent).total_leaves, 3);
}
