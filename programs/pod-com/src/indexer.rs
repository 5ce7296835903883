//! Read-side queries over program accounts.
//!
//! Filters mirror the memcmp-style lookups clients run against an RPC node:
//! every result is a decoded record paired with its address, in ascending
//! address order.

use anchor_lang::prelude::*;
use tracing::debug;

use crate::ledger::Ledger;
use crate::state::{ChannelVisibility, MessageStatus, ProgramAccount};

#[derive(Clone, Debug, PartialEq)]
pub enum AccountFilter {
    Agents {
        /// Every bit must be present on the agent
        capabilities: Option<u8>,
        min_reputation: Option<u64>,
        max_reputation: Option<u64>,
    },
    Messages {
        /// Sender agent
        sender: Option<Pubkey>,
        /// Recipient agent
        recipient: Option<Pubkey>,
        status: Option<MessageStatus>,
    },
    Channels {
        creator: Option<Pubkey>,
        visibility: Option<ChannelVisibility>,
        active_only: bool,
    },
    /// Active members of a channel
    Participants {
        channel: Pubkey,
    },
    Escrows {
        channel: Option<Pubkey>,
        depositor: Option<Pubkey>,
    },
}

fn field_matches<T: PartialEq>(want: &Option<T>, have: &T) -> bool {
    want.as_ref().map_or(true, |want| want == have)
}

impl AccountFilter {
    pub fn matches(&self, account: &ProgramAccount) -> bool {
        match (self, account) {
            (
                AccountFilter::Agents {
                    capabilities,
                    min_reputation,
                    max_reputation,
                },
                ProgramAccount::Agent(agent),
            ) => {
                capabilities.map_or(true, |mask| agent.has_capabilities(mask))
                    && min_reputation.map_or(true, |min| agent.reputation >= min)
                    && max_reputation.map_or(true, |max| agent.reputation <= max)
            }
            (
                AccountFilter::Messages {
                    sender,
                    recipient,
                    status,
                },
                ProgramAccount::Message(message),
            ) => {
                field_matches(sender, &message.sender)
                    && field_matches(recipient, &message.recipient)
                    && field_matches(status, &message.status)
            }
            (
                AccountFilter::Channels {
                    creator,
                    visibility,
                    active_only,
                },
                ProgramAccount::Channel(channel),
            ) => {
                field_matches(creator, &channel.creator)
                    && field_matches(visibility, &channel.visibility)
                    && (!active_only || channel.is_active)
            }
            (AccountFilter::Participants { channel }, ProgramAccount::Participant(participant)) => {
                participant.channel == *channel && participant.is_active
            }
            (AccountFilter::Escrows { channel, depositor }, ProgramAccount::Escrow(escrow)) => {
                field_matches(channel, &escrow.channel) && field_matches(depositor, &escrow.depositor)
            }
            _ => false,
        }
    }
}

/// Page through matching records.
pub fn query(
    ledger: &Ledger,
    filter: &AccountFilter,
    limit: usize,
    offset: usize,
) -> Vec<(Pubkey, ProgramAccount)> {
    let results: Vec<_> = ledger
        .program_accounts()
        .filter(|(_, account)| filter.matches(account))
        .skip(offset)
        .take(limit)
        .collect();

    debug!(?filter, limit, offset, found = results.len(), "indexer query");
    results
}
