//! Display projections: text filter, toggle sort, recent transactions.
//!
//! Projections are always recomputed from the authoritative collection; the
//! previous projected list is never used as input.

use crate::types::{Block, Transaction, WalletBalance};
use std::collections::HashSet;

/// Blocks scanned for the recent-transactions panel.
pub const RECENT_SCAN_BLOCKS: usize = 6;
/// Cap on the recent-transactions panel.
pub const RECENT_TX_CAP: usize = 10;

/// Fields a free-text search term is matched against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Block {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.hash]
    }
}

impl Searchable for WalletBalance {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.address]
    }
}

/// Normalized search term; `None` means "no filter".
pub fn normalize_term(term: &str) -> Option<String> {
    let t = term.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_lowercase())
    }
}

pub fn matches<T: Searchable>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Case-insensitive substring filter. Blank terms return the full collection in order.
pub fn text_filter<T: Searchable + Clone>(all: &[T], term: &str) -> Vec<T> {
    match normalize_term(term) {
        None => all.to_vec(),
        Some(needle) => all
            .iter()
            .filter(|item| matches(*item, &needle))
            .cloned()
            .collect(),
    }
}

/// Direction of the next [`ToggleSort::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort that flips direction on every invocation. Starts ascending.
#[derive(Clone, Debug)]
pub struct ToggleSort {
    next: SortDirection,
    last: Option<SortDirection>,
}

impl Default for ToggleSort {
    fn default() -> Self {
        Self {
            next: SortDirection::Ascending,
            last: None,
        }
    }
}

impl ToggleSort {
    /// Direction used by the most recent sort, if any.
    pub fn last(&self) -> Option<SortDirection> {
        self.last
    }

    /// Stable in-place sort by `key`, then flip.
    pub fn apply<T, K, F>(&mut self, items: &mut [T], key: F)
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        match self.next {
            SortDirection::Ascending => items.sort_by(|a, b| key(a).cmp(&key(b))),
            SortDirection::Descending => items.sort_by(|a, b| key(b).cmp(&key(a))),
        }
        self.last = Some(self.next);
        self.next = match self.next {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
    }
}

/// Up to [`RECENT_TX_CAP`] distinct transactions from the first
/// [`RECENT_SCAN_BLOCKS`] displayed blocks, in block order.
pub fn recent_transactions(blocks: &[Block]) -> Vec<Transaction> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    'scan: for block in blocks.iter().take(RECENT_SCAN_BLOCKS) {
        for tx in &block.transactions {
            if out.len() >= RECENT_TX_CAP {
                break 'scan;
            }
            if tx.transaction_id.is_empty() || !seen.insert(tx.transaction_id.as_str()) {
                continue;
            }
            out.push(tx.clone());
        }
    }
    out
}

/// Block in `blocks` that contains `tx_id`.
pub fn containing_block<'a>(blocks: &'a [Block], tx_id: &str) -> Option<&'a Block> {
    blocks
        .iter()
        .find(|b| b.transactions.iter().any(|t| t.transaction_id == tx_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(height: u64, hash: &str, txs: &[&str]) -> Block {
        Block {
            height,
            hash: hash.to_string(),
            transactions: txs.iter().map(|id| Transaction::new(*id, "T")).collect(),
            previous_hash: None,
            timestamp: None,
        }
    }

    #[test]
    fn blank_term_is_identity() {
        let all = vec![block(2, "AAA", &[]), block(1, "bbb", &[])];
        assert_eq!(text_filter(&all, ""), all);
        assert_eq!(text_filter(&all, "   "), all);
    }

    #[test]
    fn filter_is_case_insensitive_and_stable() {
        let all = vec![
            block(3, "DeadBeef", &[]),
            block(2, "cafe", &[]),
            block(1, "xxdeadyy", &[]),
        ];
        let once = text_filter(&all, " DEAD ");
        let twice = text_filter(&all, " DEAD ");
        assert_eq!(once, twice);
        assert_eq!(
            once.iter().map(|b| b.height).collect::<Vec<_>>(),
            vec![3, 1]
        );
    }

    #[test]
    fn toggle_sort_flips_each_call() {
        let mut sort = ToggleSort::default();
        let mut v = vec![3, 1, 2];
        sort.apply(&mut v, |x| *x);
        assert_eq!(v, vec![1, 2, 3]);
        assert_eq!(sort.last(), Some(SortDirection::Ascending));
        sort.apply(&mut v, |x| *x);
        assert_eq!(v, vec![3, 2, 1]);
        assert_eq!(sort.last(), Some(SortDirection::Descending));
    }

    #[test]
    fn toggle_sort_is_stable_for_equal_keys() {
        let mut sort = ToggleSort::default();
        let original = vec![(1, 'a'), (1, 'b'), (1, 'c')];
        let mut v = original.clone();
        sort.apply(&mut v, |x| x.0);
        sort.apply(&mut v, |x| x.0);
        assert_eq!(v, original);
    }

    #[test]
    fn recent_transactions_respects_cap_and_uniqueness() {
        let blocks: Vec<Block> = (0..8)
            .map(|i| {
                let ids: Vec<String> = (0..3).map(|j| format!("tx{}", i * 3 + j)).collect();
                let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
                block(100 - i, "h", &refs)
            })
            .collect();
        let recent = recent_transactions(&blocks);
        assert_eq!(recent.len(), RECENT_TX_CAP);
        assert_eq!(recent[0].transaction_id, "tx0");
        assert_eq!(recent[9].transaction_id, "tx9");
    }

    #[test]
    fn recent_transactions_scans_at_most_six_blocks() {
        let mut blocks: Vec<Block> = (0..6)
            .map(|i| block(50 - i, "h", &["dup"]))
            .collect();
        blocks.push(block(10, "h", &["late"]));
        let recent = recent_transactions(&blocks);
        let ids: Vec<&str> = recent.iter().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["dup"]);
    }

    #[test]
    fn recent_transactions_skips_empty_ids() {
        let blocks = vec![block(1, "h", &["", "a", "a", "b"])];
        let ids: Vec<String> = recent_transactions(&blocks)
            .into_iter()
            .map(|t| t.transaction_id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
