use epm_crypto::{sha256d, Hash256};

/// Merkle root over transaction ids.
///
/// Odd levels pair their last node with itself. A single-transaction tree's
/// root is that transaction's id; an empty tree yields the null hash.
pub fn merkle_root(txids: &[Hash256]) -> Hash256 {
    if txids.is_empty() {
        return Hash256::ZERO;
    }

    let mut level: Vec<Hash256> = txids.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(left.as_bytes());
                buf[32..].copy_from_slice(right.as_bytes());
                sha256d(&buf)
            })
            .collect();
    }
    level[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_leaf_is_root() {
        let leaf = sha256d(b"coinbase");
        assert_eq!(merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(merkle_root(&[]), Hash256::ZERO);
    }

    #[test]
    fn test_odd_level_duplicates_last() {
        let a = sha256d(b"a");
        let b = sha256d(b"b");
        let c = sha256d(b"c");
        assert_eq!(merkle_root(&[a, b, c]), merkle_root(&[a, b, c, c]));
    }
}
