//! Tests for filtered account queries

use pod_com::constants::capabilities;
use pod_com::indexer::{query, AccountFilter};
use pod_com::state::{ChannelVisibility, MessageStatus, ProgramAccount};
use pod_com::PodInstruction;
use solana_sdk::signer::Signer;

use crate::common::*;

/// Test agent queries by capability mask and reputation
#[test]
fn test_query_agents() {
    let mut ledger = setup_ledger();
    let (trader, trader_agent) = create_agent(&mut ledger);
    let processor = funded(&mut ledger);
    ledger
        .submit(
            build_register_agent_ix(capabilities::DATA_PROCESSING, TEST_URI),
            &[processor.pubkey()],
        )
        .unwrap();
    let processor_agent = agent_pda(&processor.pubkey());

    // A read message earns the trader one reputation point
    let message = send_message(&mut ledger, &trader, &processor, b"report");
    for status in [MessageStatus::Delivered, MessageStatus::Read] {
        ledger
            .submit(build_update_status_ix(message, status), &[processor.pubkey()])
            .unwrap();
    }

    let traders = query(
        &ledger,
        &AccountFilter::Agents {
            capabilities: Some(capabilities::TRADING),
            min_reputation: None,
            max_reputation: None,
        },
        10,
        0,
    );
    assert_eq!(traders.len(), 1);
    assert_eq!(traders[0].0, trader_agent);

    let reputable = query(
        &ledger,
        &AccountFilter::Agents {
            capabilities: None,
            min_reputation: Some(1),
            max_reputation: None,
        },
        10,
        0,
    );
    assert_eq!(reputable.len(), 1);
    assert!(matches!(&reputable[0].1, ProgramAccount::Agent(a) if a.reputation == 1));

    let newcomers = query(
        &ledger,
        &AccountFilter::Agents {
            capabilities: None,
            min_reputation: None,
            max_reputation: Some(0),
        },
        10,
        0,
    );
    assert_eq!(newcomers.len(), 1);
    assert_eq!(newcomers[0].0, processor_agent);
}

/// Test message queries by recipient and status
#[test]
fn test_query_messages() {
    let mut ledger = setup_ledger();
    let (alice, alice_agent) = create_agent(&mut ledger);
    let (bob, bob_agent) = create_agent(&mut ledger);
    let (carol, _) = create_agent(&mut ledger);

    let to_bob = send_message(&mut ledger, &alice, &bob, b"one");
    send_message(&mut ledger, &carol, &bob, b"two");
    send_message(&mut ledger, &bob, &alice, b"three");
    ledger
        .submit(
            build_update_status_ix(to_bob, MessageStatus::Delivered),
            &[bob.pubkey()],
        )
        .unwrap();

    let inbox = query(
        &ledger,
        &AccountFilter::Messages {
            sender: None,
            recipient: Some(bob_agent),
            status: None,
        },
        10,
        0,
    );
    assert_eq!(inbox.len(), 2);

    let delivered = query(
        &ledger,
        &AccountFilter::Messages {
            sender: Some(alice_agent),
            recipient: Some(bob_agent),
            status: Some(MessageStatus::Delivered),
        },
        10,
        0,
    );
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, to_bob);

    let pending_for_alice = query(
        &ledger,
        &AccountFilter::Messages {
            sender: None,
            recipient: Some(alice_agent),
            status: Some(MessageStatus::Pending),
        },
        10,
        0,
    );
    assert_eq!(pending_for_alice.len(), 1);
}

/// Test channel filters and paging
#[test]
fn test_query_channels_and_pages() {
    let mut ledger = setup_ledger();
    let creator = funded(&mut ledger);
    let other = funded(&mut ledger);
    for name in ["alpha", "beta", "gamma", "delta"] {
        create_channel(&mut ledger, &creator, name, ChannelVisibility::Public, 10, 0);
    }
    let private = create_channel(&mut ledger, &creator, "vault", ChannelVisibility::Private, 10, 0);
    create_channel(&mut ledger, &other, "elsewhere", ChannelVisibility::Public, 10, 0);

    let closed = channel_pda(&creator.pubkey(), "delta");
    ledger
        .submit(
            PodInstruction::UpdateChannel {
                channel: closed,
                description: None,
                max_participants: None,
                fee_per_message: None,
                is_active: Some(false),
            },
            &[creator.pubkey()],
        )
        .unwrap();

    let filter = AccountFilter::Channels {
        creator: Some(creator.pubkey()),
        visibility: None,
        active_only: true,
    };
    let all = query(&ledger, &filter, 100, 0);
    assert_eq!(all.len(), 4);
    assert!(all.iter().all(|(address, _)| *address != closed));
    assert!(all.windows(2).all(|pair| pair[0].0 < pair[1].0));

    let first = query(&ledger, &filter, 3, 0);
    let rest = query(&ledger, &filter, 3, 3);
    assert_eq!(first.len(), 3);
    assert_eq!(rest.len(), 1);
    assert_eq!([first, rest].concat(), all);
    assert!(query(&ledger, &filter, 3, 10).is_empty());

    let private_only = query(
        &ledger,
        &AccountFilter::Channels {
            creator: None,
            visibility: Some(ChannelVisibility::Private),
            active_only: false,
        },
        10,
        0,
    );
    assert_eq!(private_only.len(), 1);
    assert_eq!(private_only[0].0, private);
}

/// Test participant and escrow queries scoped to a channel; departed agents are not listed
#[test]
fn test_query_participants_and_escrows() {
    let mut ledger = setup_ledger();
    let creator = funded(&mut ledger);
    let channel = create_channel(&mut ledger, &creator, "lobby", ChannelVisibility::Public, 10, 0);
    let other = create_channel(&mut ledger, &creator, "annex", ChannelVisibility::Public, 10, 0);
    let (first, _) = create_agent(&mut ledger);
    let (second, _) = create_agent(&mut ledger);
    join(&mut ledger, &first, channel);
    join(&mut ledger, &second, channel);
    join(&mut ledger, &second, other);
    let (departed, _) = create_agent(&mut ledger);
    join(&mut ledger, &departed, channel);
    ledger
        .submit(build_leave_ix(channel), &[departed.pubkey()])
        .unwrap();
    deposit(&mut ledger, &first, channel, 1_000);
    deposit(&mut ledger, &second, other, 1_000);

    let members = query(&ledger, &AccountFilter::Participants { channel }, 10, 0);
    assert_eq!(members.len(), 2);

    let escrows = query(
        &ledger,
        &AccountFilter::Escrows {
            channel: None,
            depositor: Some(second.pubkey()),
        },
        10,
        0,
    );
    assert_eq!(escrows.len(), 1);
    assert_eq!(escrows[0].0, escrow_pda(&other, &second.pubkey()));
}
