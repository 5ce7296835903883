use anchor_lang::prelude::*;
use sha3::{Digest, Keccak256};

use crate::constants::{MERKLE_LEAF_PREFIX, MERKLE_NODE_PREFIX};
use crate::errors::PodComError;

pub type Hash = [u8; 32];

/// Keccak-256 of the input bytes.
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Domain-separated leaf hash: keccak256(0x00 || bytes)
pub fn hash_leaf(bytes: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update([MERKLE_LEAF_PREFIX]);
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Domain-separated interior hash: keccak256(0x01 || left || right)
pub fn hash_node(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update([MERKLE_NODE_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Sibling path from a leaf up to the root
#[derive(Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct MerkleProof {
    pub leaf_index: u32,
    pub siblings: Vec<Hash>,
}

/// Binary Merkle tree over already-hashed leaves.
///
/// - Non-power-of-2 counts are padded on the right with zero hashes.
/// - A single leaf is its own root.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    leaf_count: usize,
    /// layers[0] is the padded leaf layer, the last layer holds the root
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    pub fn new(leaves: &[Hash]) -> Result<Self> {
        require!(!leaves.is_empty(), PodComError::BatchEmpty);

        let width = leaves.len().next_power_of_two();
        let mut layer = Vec::with_capacity(width);
        layer.extend_from_slice(leaves);
        layer.resize(width, [0u8; 32]);

        let mut layers = vec![layer];
        while let Some(current) = layers.last().filter(|l| l.len() > 1) {
            let next: Vec<Hash> = current
                .chunks_exact(2)
                .map(|pair| hash_node(&pair[0], &pair[1]))
                .collect();
            layers.push(next);
        }

        Ok(Self {
            leaf_count: leaves.len(),
            layers,
        })
    }

    pub fn root(&self) -> Hash {
        self.layers
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or([0u8; 32])
    }

    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn proof(&self, index: usize) -> Result<MerkleProof> {
        require!(index < self.leaf_count, PodComError::InvalidProof);

        let mut siblings = Vec::with_capacity(self.depth());
        let mut idx = index;
        for layer in &self.layers[..self.depth()] {
            siblings.push(layer[idx ^ 1]);
            idx /= 2;
        }

        Ok(MerkleProof {
            leaf_index: index as u32,
            siblings,
        })
    }
}

/// Check that `leaf_hash` sits at `proof.leaf_index` under `root`.
/// Padding slots hold the zero hash and never verify.
pub fn verify_inclusion(root: &Hash, leaf_hash: &Hash, proof: &MerkleProof) -> bool {
    if *leaf_hash == [0u8; 32] {
        return false;
    }
    let depth = proof.siblings.len();
    if depth < 32 && (proof.leaf_index as u64) >= (1u64 << depth) {
        return false;
    }

    let mut current = *leaf_hash;
    let mut idx = proof.leaf_index;
    for sibling in &proof.siblings {
        current = if idx % 2 == 0 {
            hash_node(&current, sibling)
        } else {
            hash_node(sibling, &current)
        };
        idx /= 2;
    }

    current == *root
}
