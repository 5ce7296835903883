//! Tests for broadcast_message and broadcast_message_compressed

use pod_com::compression::keccak256;
use pod_com::constants::{RATE_LIMIT_MESSAGES_PER_WINDOW, RATE_LIMIT_WINDOW_SECONDS};
use pod_com::events::PodEvent;
use pod_com::pda;
use pod_com::state::{ChannelAccount, ChannelMessage, ChannelVisibility, EscrowAccount};
use pod_com::Ledger;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};

use crate::common::*;

struct Room {
    ledger: Ledger,
    creator: Keypair,
    member: Keypair,
    member_agent: Pubkey,
    channel: Pubkey,
}

fn room(fee_per_message: u64) -> Room {
    let mut ledger = setup_ledger();
    let (creator, _) = create_agent(&mut ledger);
    let channel = create_channel(
        &mut ledger,
        &creator,
        "room",
        ChannelVisibility::Public,
        10,
        fee_per_message,
    );
    let (member, member_agent) = create_agent(&mut ledger);
    join(&mut ledger, &member, channel);
    Room {
        ledger,
        creator,
        member,
        member_agent,
        channel,
    }
}

/// Test a plain broadcast stores the message
#[test]
fn test_broadcast_success() {
    let mut r = room(0);

    let receipt = r
        .ledger
        .submit(build_broadcast_ix(r.channel, "hello room", 1), &[r.member.pubkey()])
        .expect("member broadcast");

    let address = pda::channel_message_address(&r.channel, &r.member_agent, 1)
        .unwrap()
        .0;
    let message: ChannelMessage = r.ledger.fetch_as(&address).unwrap();
    assert_eq!(message.content, "hello room");
    assert_eq!(message.content_hash, keccak256(b"hello room"));
    assert_eq!(message.sender, r.member_agent);
    assert!(matches!(
        &receipt.events[..],
        [PodEvent::ChannelMessageBroadcast(e)] if e.message == address && e.fee_paid == 0
    ));

    let result = r
        .ledger
        .submit(build_broadcast_ix(r.channel, "again", 1), &[r.member.pubkey()]);
    assert_pod_error(result, PodComError::DuplicateMessage);
}

/// Test that only members and the creator can post
#[test]
fn test_broadcast_membership() {
    let mut r = room(0);
    let (outsider, _) = create_agent(&mut r.ledger);

    let result = r
        .ledger
        .submit(build_broadcast_ix(r.channel, "let me in", 1), &[outsider.pubkey()]);
    assert_pod_error(result, PodComError::NotInChannel);

    r.ledger
        .submit(build_broadcast_ix(r.channel, "welcome", 1), &[r.creator.pubkey()])
        .expect("creator posts without joining");
}

/// Test the fixed-window rate limit
#[test]
fn test_broadcast_rate_limit() {
    let mut r = room(0);
    let member = r.member.pubkey();

    for nonce in 0..u64::from(RATE_LIMIT_MESSAGES_PER_WINDOW) {
        r.ledger
            .submit(build_broadcast_ix(r.channel, "spam", nonce), &[member])
            .expect("within limit");
    }
    let result = r
        .ledger
        .submit(build_broadcast_ix(r.channel, "spam", 1_000), &[member]);
    assert_pod_error(result, PodComError::RateLimited);

    r.ledger.advance_seconds(RATE_LIMIT_WINDOW_SECONDS);
    r.ledger
        .submit(build_broadcast_ix(r.channel, "spam", 1_001), &[member])
        .expect("new window");
}

/// Test fees are debited from escrow and credited to the channel
#[test]
fn test_broadcast_fee_from_escrow() {
    let fee = 1_000;
    let mut r = room(fee);
    let member = r.member.pubkey();

    let result = r
        .ledger
        .submit(build_broadcast_ix(r.channel, "free?", 1), &[member]);
    assert_pod_error(result, PodComError::InsufficientEscrow);

    deposit(&mut r.ledger, &r.member, r.channel, 2_500);
    let escrow_address = escrow_pda(&r.channel, &member);
    let channel_lamports = r.ledger.lamports(&r.channel);
    let escrow_lamports = r.ledger.lamports(&escrow_address);

    for nonce in 1..=2 {
        r.ledger
            .submit(build_broadcast_ix(r.channel, "paid", nonce), &[member])
            .expect("funded broadcast");
    }
    let result = r
        .ledger
        .submit(build_broadcast_ix(r.channel, "paid", 3), &[member]);
    assert_pod_error(result, PodComError::InsufficientEscrow);

    let channel: ChannelAccount = r.ledger.fetch_as(&r.channel).unwrap();
    let escrow: EscrowAccount = r.ledger.fetch_as(&escrow_address).unwrap();
    assert_eq!(escrow.balance, 500);
    assert_eq!(channel.escrow_balance, 500);
    assert_eq!(channel.fees_collected, 2 * fee);
    assert_eq!(r.ledger.lamports(&r.channel), channel_lamports + 2 * fee);
    assert_eq!(r.ledger.lamports(&escrow_address), escrow_lamports - 2 * fee);
}

/// Test the creator is not charged in its own channel
#[test]
fn test_creator_posts_free() {
    let mut r = room(1_000);
    r.ledger
        .submit(build_broadcast_ix(r.channel, "announcement", 1), &[r.creator.pubkey()])
        .expect("creator is not charged");
    assert_eq!(get_channel(&r.ledger, &r.channel).fees_collected, 0);
}

/// Test inactive channels refuse broadcasts
#[test]
fn test_broadcast_inactive_channel() {
    let mut r = room(0);
    r.ledger
        .submit(
            pod_com::PodInstruction::UpdateChannel {
                channel: r.channel,
                description: None,
                max_participants: None,
                fee_per_message: None,
                is_active: Some(false),
            },
            &[r.creator.pubkey()],
        )
        .unwrap();

    let result = r
        .ledger
        .submit(build_broadcast_ix(r.channel, "hello?", 1), &[r.member.pubkey()]);
    assert_pod_error(result, PodComError::ChannelInactive);
}

/// Test the compressed path emits a leaf and creates no message account
#[test]
fn test_compressed_broadcast() {
    let mut r = room(100);
    let member = r.member.pubkey();
    deposit(&mut r.ledger, &r.member, r.channel, 1_000);

    let too_long = "Q".repeat(101);
    for bad in ["", "Qm-has-dash", too_long.as_str()] {
        let result = r.ledger.submit(
            build_compressed_broadcast_ix(r.channel, "big content", bad),
            &[member],
        );
        assert_pod_error(result, PodComError::InvalidIpfsHash);
    }

    let accounts_before = r.ledger.program_accounts().count();
    let receipt = r
        .ledger
        .submit(
            build_compressed_broadcast_ix(r.channel, "big content", "QmYwAPJzv5CZsnA"),
            &[member],
        )
        .expect("compressed broadcast");

    match &receipt.events[..] {
        [PodEvent::CompressedMessageBroadcast(e)] => {
            assert_eq!(e.leaf.channel, r.channel);
            assert_eq!(e.leaf.sender, r.member_agent);
            assert_eq!(e.leaf.content_hash, keccak256(b"big content"));
            assert_eq!(e.leaf.ipfs_hash, "QmYwAPJzv5CZsnA");
            assert_eq!(e.fee_paid, 100);
        }
        other => panic!("unexpected events: {other:?}"),
    }
    assert_eq!(r.ledger.program_accounts().count(), accounts_before);
    assert_eq!(get_escrow(&r.ledger, &escrow_pda(&r.channel, &member)).balance, 900);
}
