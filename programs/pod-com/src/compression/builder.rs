use std::sync::{Mutex, MutexGuard, PoisonError};

use anchor_lang::prelude::*;
use tracing::{debug, info, warn};

use super::batch::BatchItem;
use super::merkle::{verify_inclusion, Hash, MerkleProof, MerkleTree};
use crate::constants::{DEFAULT_MAX_BATCH_LEAVES, MAX_BATCH_LEAVES};
use crate::errors::PodComError;
use crate::events::PodEvent;
use crate::instruction::PodInstruction;
use crate::ledger::SharedLedger;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Leaves an open batch holds before the next append flushes it
    pub max_leaves: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_leaves: DEFAULT_MAX_BATCH_LEAVES,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        require!(
            (1..=MAX_BATCH_LEAVES).contains(&self.max_leaves),
            PodComError::InvalidBatchConfig
        );
        Ok(())
    }
}

// ============================================================================
// Sink
// ============================================================================

/// Destination for batch roots
pub trait BatchSink {
    fn commit(&self, scope: &Pubkey, root: Hash, leaf_count: u32) -> Result<()>;
}

/// Commits roots by submitting `commit_batch` to a shared ledger.
#[derive(Clone)]
pub struct LedgerSink {
    ledger: SharedLedger,
    /// Channel creator or agent owner wallet
    authority: Pubkey,
}

impl LedgerSink {
    pub fn new(ledger: SharedLedger, authority: Pubkey) -> Self {
        Self { ledger, authority }
    }
}

impl BatchSink for LedgerSink {
    fn commit(&self, scope: &Pubkey, root: Hash, leaf_count: u32) -> Result<()> {
        self.ledger
            .submit(
                PodInstruction::CommitBatch {
                    scope: *scope,
                    root,
                    leaf_count,
                },
                &[self.authority],
            )
            .map(|_| ())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// A committed batch with everything needed to prove its members
#[derive(Clone, Debug, PartialEq)]
pub struct FlushedBatch {
    pub scope: Pubkey,
    pub batch_index: u64,
    pub root: Hash,
    pub leaves: Vec<BatchItem>,
    pub proofs: Vec<MerkleProof>,
}

impl FlushedBatch {
    /// Recompute the leaf hash at `index` and check it against the root
    pub fn verify(&self, index: usize) -> bool {
        match (self.leaves.get(index), self.proofs.get(index)) {
            (Some(item), Some(proof)) => item
                .leaf_hash()
                .map(|leaf| verify_inclusion(&self.root, &leaf, proof))
                .unwrap_or(false),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppendReceipt {
    pub batch_index: u64,
    pub leaf_index: u32,
    pub leaf_hash: Hash,
    /// Set when this append first flushed a full batch
    pub flushed: Option<FlushedBatch>,
}

struct OpenBatch {
    batch_index: u64,
    items: Vec<BatchItem>,
    hashes: Vec<Hash>,
}

/// Accumulates leaves for one scope. The open batch is guarded for the whole
/// of every append and flush, so leaf indices are unique within a batch.
pub struct BatchBuilder<S: BatchSink> {
    scope: Pubkey,
    config: BatchConfig,
    sink: S,
    open: Mutex<OpenBatch>,
}

impl<S: BatchSink> BatchBuilder<S> {
    pub fn new(scope: Pubkey, config: BatchConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scope,
            config,
            sink,
            open: Mutex::new(OpenBatch {
                batch_index: 0,
                items: Vec::with_capacity(config.max_leaves),
                hashes: Vec::with_capacity(config.max_leaves),
            }),
        })
    }

    /// Continue numbering after batches already committed for this scope.
    pub fn starting_at(self, batch_index: u64) -> Self {
        self.lock().batch_index = batch_index;
        self
    }

    fn lock(&self) -> MutexGuard<'_, OpenBatch> {
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn scope(&self) -> Pubkey {
        self.scope
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Leaves in the open batch
    pub fn pending(&self) -> usize {
        self.lock().items.len()
    }

    pub fn next_batch_index(&self) -> u64 {
        self.lock().batch_index
    }

    pub fn append(&self, item: BatchItem) -> Result<AppendReceipt> {
        require_keys_eq!(item.scope(), self.scope, PodComError::InvalidBatchScope);
        let leaf_hash = item.leaf_hash()?;

        let mut open = self.lock();
        let flushed = if open.items.len() >= self.config.max_leaves {
            Some(self.flush_locked(&mut open)?)
        } else {
            None
        };

        let leaf_index = open.items.len() as u32;
        open.items.push(item);
        open.hashes.push(leaf_hash);

        debug!(scope = %self.scope, batch = open.batch_index, leaf_index, "leaf appended");

        Ok(AppendReceipt {
            batch_index: open.batch_index,
            leaf_index,
            leaf_hash,
            flushed,
        })
    }

    /// Append every compressed broadcast for this scope found in `events`.
    pub fn ingest(&self, events: &[PodEvent]) -> Result<Vec<AppendReceipt>> {
        events
            .iter()
            .filter_map(|event| match event {
                PodEvent::CompressedMessageBroadcast(e) if e.leaf.channel == self.scope => {
                    Some(BatchItem::Channel(e.leaf.clone()))
                }
                _ => None,
            })
            .map(|item| self.append(item))
            .collect()
    }

    pub fn flush(&self) -> Result<FlushedBatch> {
        let mut open = self.lock();
        self.flush_locked(&mut open)
    }

    fn flush_locked(&self, open: &mut OpenBatch) -> Result<FlushedBatch> {
        require!(!open.items.is_empty(), PodComError::BatchEmpty);

        let tree = MerkleTree::new(&open.hashes)?;
        let root = tree.root();
        let proofs = (0..tree.leaf_count())
            .map(|i| tree.proof(i))
            .collect::<Result<Vec<_>>>()?;
        let leaf_count = open.items.len() as u32;

        if let Err(err) = self.sink.commit(&self.scope, root, leaf_count) {
            warn!(scope = %self.scope, batch = open.batch_index, error = %err, "batch commit failed");
            return Err(err);
        }

        let batch_index = open.batch_index;
        open.batch_index += 1;
        open.hashes.clear();
        let leaves = std::mem::take(&mut open.items);

        info!(
            scope = %self.scope,
            batch = batch_index,
            leaves = leaf_count,
            root = %bs58::encode(root).into_string(),
            "batch flushed"
        );

        Ok(FlushedBatch {
            scope: self.scope,
            batch_index,
            root,
            leaves,
            proofs,
        })
    }
}
