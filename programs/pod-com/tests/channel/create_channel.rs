//! Tests for create_channel and update_channel

use pod_com::constants::{MAX_CHANNEL_NAME_LENGTH, MAX_FEE_PER_MESSAGE, MAX_PARTICIPANTS_PER_CHANNEL};
use pod_com::state::ChannelVisibility;
use pod_com::PodInstruction;
use solana_sdk::signer::Signer;

use crate::common::*;

/// Test channel creation and its initial state
#[test]
fn test_create_channel_success() {
    let mut ledger = setup_ledger();
    let creator = funded(&mut ledger);

    let channel = create_channel(
        &mut ledger,
        &creator,
        "general",
        ChannelVisibility::Public,
        50,
        1_000,
    );

    let account = get_channel(&ledger, &channel);
    assert_eq!(account.creator, creator.pubkey());
    assert_eq!(account.name, "general");
    assert_eq!(account.participant_count, 0);
    assert_eq!(account.escrow_balance, 0);
    assert_eq!(account.fees_collected, 0);
    assert!(account.is_active);
}

/// Test that a creator cannot reuse a name, but others can
#[test]
fn test_duplicate_channel_name() {
    let mut ledger = setup_ledger();
    let creator = funded(&mut ledger);
    let other = funded(&mut ledger);

    create_channel(&mut ledger, &creator, "dup", ChannelVisibility::Public, 10, 0);
    let result = ledger.submit(
        build_create_channel_ix("dup", ChannelVisibility::Private, 10, 0),
        &[creator.pubkey()],
    );
    assert_pod_error(result, PodComError::ChannelExists);

    create_channel(&mut ledger, &other, "dup", ChannelVisibility::Public, 10, 0);
}

/// Test input bounds
#[test]
fn test_create_channel_validation() {
    let mut ledger = setup_ledger();
    let creator = funded(&mut ledger);
    let submit = |ledger: &mut pod_com::Ledger, ix| ledger.submit(ix, &[creator.pubkey()]);

    let long = "n".repeat(MAX_CHANNEL_NAME_LENGTH + 1);
    assert_pod_error(
        submit(&mut ledger, build_create_channel_ix(&long, ChannelVisibility::Public, 10, 0)),
        PodComError::ChannelNameTooLong,
    );
    assert_pod_error(
        submit(&mut ledger, build_create_channel_ix("", ChannelVisibility::Public, 10, 0)),
        PodComError::InvalidChannelName,
    );
    assert_pod_error(
        submit(&mut ledger, build_create_channel_ix(" pad", ChannelVisibility::Public, 10, 0)),
        PodComError::InvalidChannelName,
    );
    assert_pod_error(
        submit(&mut ledger, build_create_channel_ix("zero", ChannelVisibility::Public, 0, 0)),
        PodComError::InvalidParticipantLimit,
    );
    assert_pod_error(
        submit(
            &mut ledger,
            build_create_channel_ix(
                "huge",
                ChannelVisibility::Public,
                MAX_PARTICIPANTS_PER_CHANNEL + 1,
                0,
            ),
        ),
        PodComError::InvalidParticipantLimit,
    );
    assert_pod_error(
        submit(
            &mut ledger,
            build_create_channel_ix("pricey", ChannelVisibility::Public, 10, MAX_FEE_PER_MESSAGE + 1),
        ),
        PodComError::FeeTooHigh,
    );

    let exact = "n".repeat(MAX_CHANNEL_NAME_LENGTH);
    submit(&mut ledger, build_create_channel_ix(&exact, ChannelVisibility::Public, 10, 0))
        .expect("32-byte name fits the seed limit");
}

/// Test creator updates and their bounds
#[test]
fn test_update_channel() {
    let mut ledger = setup_ledger();
    let creator = funded(&mut ledger);
    let channel = create_channel(&mut ledger, &creator, "ops", ChannelVisibility::Public, 5, 0);
    let (member, _) = create_agent(&mut ledger);
    let (member2, _) = create_agent(&mut ledger);
    join(&mut ledger, &member, channel);
    join(&mut ledger, &member2, channel);

    let update = |max: Option<u32>, active: Option<bool>| PodInstruction::UpdateChannel {
        channel,
        description: Some("ops room".to_string()),
        max_participants: max,
        fee_per_message: Some(500),
        is_active: active,
    };

    let result = ledger.submit(update(Some(1), None), &[creator.pubkey()]);
    assert_pod_error(result, PodComError::InvalidParticipantLimit);

    let result = ledger.submit(update(Some(2), None), &[member.pubkey()]);
    assert_pod_error(result, PodComError::Unauthorized);

    ledger
        .submit(update(Some(2), Some(false)), &[creator.pubkey()])
        .expect("creator update");
    let account = get_channel(&ledger, &channel);
    assert_eq!(account.max_participants, 2);
    assert_eq!(account.fee_per_message, 500);
    assert_eq!(account.description, "ops room");
    assert!(!account.is_active);
}
