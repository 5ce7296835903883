//! Compressed message batching.
//!
//! Messages that skip per-message accounts become leaves of a keccak Merkle
//! tree. An off-ledger [`BatchBuilder`] accumulates leaves per scope and
//! commits each batch root on-ledger through a [`BatchSink`]; the leaves and
//! their inclusion proofs stay with the caller.

pub mod batch;
pub mod builder;
pub mod merkle;

pub use batch::*;
pub use builder::*;
pub use merkle::{hash_leaf, hash_node, keccak256, verify_inclusion, Hash, MerkleProof, MerkleTree};
