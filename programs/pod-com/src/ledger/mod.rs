//! In-process execution substrate.
//!
//! The ledger keeps every account the program owns (plus plain wallet
//! balances) keyed by address, together with the cluster clock and rent
//! parameters. Each submitted instruction runs against an [`InvokeContext`]
//! overlay and its writes are applied only when the handler succeeds, so a
//! failed transaction leaves the ledger untouched.

mod context;

pub use context::InvokeContext;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anchor_lang::error::ErrorCode;
use anchor_lang::prelude::*;
use tracing::{debug, warn};

use crate::errors::PodComError;
use crate::events::PodEvent;
use crate::instruction::{process_instruction, PodInstruction};
use crate::state::ProgramAccount;

/// Raw account as stored by the ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerAccount {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct LedgerConfig {
    pub rent: Rent,
    pub genesis_unix_timestamp: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rent: Rent::default(),
            genesis_unix_timestamp: 0,
        }
    }
}

/// Event tagged with the slot of the transaction that emitted it
#[derive(Clone, Debug, PartialEq)]
pub struct EventRecord {
    pub slot: u64,
    pub event: PodEvent,
}

/// Outcome of a committed transaction
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionReceipt {
    pub slot: u64,
    pub instruction: &'static str,
    pub events: Vec<PodEvent>,
}

pub struct Ledger {
    accounts: BTreeMap<Pubkey, LedgerAccount>,
    clock: Clock,
    rent: Rent,
    event_log: Vec<EventRecord>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            accounts: BTreeMap::new(),
            clock: Clock {
                unix_timestamp: config.genesis_unix_timestamp,
                epoch_start_timestamp: config.genesis_unix_timestamp,
                ..Clock::default()
            },
            rent: config.rent,
            event_log: Vec::new(),
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Execute one instruction atomically. `signers[0]` pays and authorizes.
    pub fn submit(
        &mut self,
        instruction: PodInstruction,
        signers: &[Pubkey],
    ) -> Result<TransactionReceipt> {
        let name = instruction.name();
        require!(!signers.is_empty(), PodComError::MissingSigner);

        let outcome = {
            let mut ctx = InvokeContext::new(self, signers);
            process_instruction(&mut ctx, instruction).map(|()| ctx.into_parts())
        };

        let (writes, events) = match outcome {
            Ok(parts) => parts,
            Err(err) => {
                warn!(instruction = name, signer = %signers[0], error = %err, "transaction rejected");
                return Err(err);
            }
        };

        for (address, entry) in writes {
            match entry {
                Some(account) => {
                    self.accounts.insert(address, account);
                }
                None => {
                    self.accounts.remove(&address);
                }
            }
        }

        let slot = self.clock.slot;
        self.event_log
            .extend(events.iter().cloned().map(|event| EventRecord { slot, event }));
        self.clock.slot += 1;

        debug!(instruction = name, slot, events = events.len(), "transaction committed");

        Ok(TransactionReceipt {
            slot,
            instruction: name,
            events,
        })
    }

    /// Decode a Borsh-encoded [`PodInstruction`] and submit it.
    pub fn submit_bytes(&mut self, data: &[u8], signers: &[Pubkey]) -> Result<TransactionReceipt> {
        let instruction = PodInstruction::try_from_slice(data)
            .map_err(|_| error!(ErrorCode::InstructionDidNotDeserialize))?;
        self.submit(instruction, signers)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn account(&self, address: &Pubkey) -> Option<&LedgerAccount> {
        self.accounts.get(address)
    }

    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.accounts.get(address).map_or(0, |account| account.lamports)
    }

    /// Typed view of a program record, `None` if absent or not a program record
    pub fn fetch(&self, address: &Pubkey) -> Option<ProgramAccount> {
        self.accounts
            .get(address)
            .filter(|account| account.owner == crate::ID)
            .and_then(|account| ProgramAccount::decode(&account.data).ok())
    }

    pub fn fetch_as<T: AccountDeserialize>(&self, address: &Pubkey) -> Result<T> {
        let account = self
            .accounts
            .get(address)
            .filter(|account| account.owner == crate::ID)
            .ok_or_else(|| error!(ErrorCode::AccountNotInitialized))?;
        let mut data: &[u8] = &account.data;
        T::try_deserialize(&mut data)
    }

    /// Every program record in ascending address order
    pub fn program_accounts(&self) -> impl Iterator<Item = (Pubkey, ProgramAccount)> + '_ {
        self.accounts
            .iter()
            .filter(|(_, account)| account.owner == crate::ID)
            .filter_map(|(address, account)| {
                ProgramAccount::decode(&account.data)
                    .ok()
                    .map(|decoded| (*address, decoded))
            })
    }

    pub fn event_log(&self) -> &[EventRecord] {
        &self.event_log
    }

    /// Sum of lamports across every account on the ledger
    pub fn total_lamports(&self) -> u128 {
        self.accounts
            .values()
            .map(|account| account.lamports as u128)
            .sum()
    }

    // ========================================================================
    // Cluster State
    // ========================================================================

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    pub fn airdrop(&mut self, wallet: &Pubkey, lamports: u64) {
        let account = self
            .accounts
            .entry(*wallet)
            .or_insert_with(LedgerAccount::wallet);
        account.lamports = account.lamports.saturating_add(lamports);
    }

    pub fn warp_to_timestamp(&mut self, unix_timestamp: i64) {
        self.clock.unix_timestamp = unix_timestamp;
    }

    pub fn advance_seconds(&mut self, seconds: i64) {
        self.clock.unix_timestamp = self.clock.unix_timestamp.saturating_add(seconds);
    }
}

// ============================================================================
// Shared Handle
// ============================================================================

/// Thread-safe ledger handle. The lock serializes transactions, so racing
/// submitters observe one total order.
#[derive(Clone, Default)]
pub struct SharedLedger(Arc<Mutex<Ledger>>);

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self(Arc::new(Mutex::new(ledger)))
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(
        &self,
        instruction: PodInstruction,
        signers: &[Pubkey],
    ) -> Result<TransactionReceipt> {
        self.lock().submit(instruction, signers)
    }

    /// Run `f` with exclusive access to the ledger
    pub fn with<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        f(&mut self.lock())
    }
}
