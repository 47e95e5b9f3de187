//! The locally held block collection behind the explorer's block strip.
//!
//! Invariant: blocks are sorted by strictly descending height, so there are no
//! duplicate heights. Newer blocks only ever enter at the front
//! ([`BlockCollection::merge_latest`]), older ones only at the tail
//! ([`BlockCollection::append_older`]).

use crate::types::Block;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockCollection {
    blocks: Vec<Block>,
}

/// Heights inserted by one merge, in final (descending) order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub inserted: Vec<u64>,
}

impl MergeOutcome {
    pub fn any(&self) -> bool {
        !self.inserted.is_empty()
    }
}

impl BlockCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an initial page of blocks in any order.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        blocks.sort_by(|a, b| b.height.cmp(&a.height));
        blocks.dedup_by_key(|b| b.height);
        Self { blocks }
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn latest_height(&self) -> Option<u64> {
        self.blocks.first().map(|b| b.height)
    }

    pub fn oldest_height(&self) -> Option<u64> {
        self.blocks.last().map(|b| b.height)
    }

    /// Height the load-older path should ask for next, if any remain.
    pub fn next_older_height(&self) -> Option<u64> {
        self.oldest_height().and_then(|h| h.checked_sub(1))
    }

    pub fn get(&self, height: u64) -> Option<&Block> {
        self.blocks.iter().find(|b| b.height == height)
    }

    /// Merge a freshly polled batch. Only blocks above the current front are taken.
    pub fn merge_latest(&mut self, mut batch: Vec<Block>) -> MergeOutcome {
        batch.sort_by_key(|b| b.height);

        let mut inserted = Vec::new();
        for block in batch {
            // Compare with the running front so repeats inside the batch are skipped too
            let newer = self.latest_height().map_or(true, |front| block.height > front);
            if newer {
                inserted.push(block.height);
                self.blocks.insert(0, block);
            }
        }
        inserted.reverse();
        MergeOutcome { inserted }
    }

    /// Append a block fetched by the load-older path. Rejected unless it directly
    /// extends the tail, which keeps ordering intact if a poll merged in between.
    pub fn append_older(&mut self, block: Block) -> bool {
        if self.next_older_height() == Some(block.height) {
            self.blocks.push(block);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(height: u64) -> Block {
        Block {
            height,
            hash: format!("hash{height}"),
            transactions: vec![],
            previous_hash: None,
            timestamp: None,
        }
    }

    fn heights(c: &BlockCollection) -> Vec<u64> {
        c.as_slice().iter().map(|b| b.height).collect()
    }

    #[test]
    fn merge_inserts_only_newer_blocks() {
        let mut c = BlockCollection::from_blocks(vec![block(98), block(100), block(99)]);
        assert_eq!(heights(&c), vec![100, 99, 98]);

        let out = c.merge_latest(vec![block(99), block(100), block(101)]);
        assert_eq!(out.inserted, vec![101]);
        assert_eq!(heights(&c), vec![101, 100, 99, 98]);
    }

    #[test]
    fn merge_keeps_descending_order_for_multi_block_batches() {
        let mut c = BlockCollection::from_blocks(vec![block(10)]);
        let out = c.merge_latest(vec![block(13), block(11), block(12)]);
        assert_eq!(out.inserted, vec![13, 12, 11]);
        assert_eq!(heights(&c), vec![13, 12, 11, 10]);
    }

    #[test]
    fn merge_into_empty_takes_everything() {
        let mut c = BlockCollection::new();
        let out = c.merge_latest(vec![block(0), block(2), block(1)]);
        assert!(out.any());
        assert_eq!(heights(&c), vec![2, 1, 0]);
    }

    #[test]
    fn merge_skips_duplicates_within_batch() {
        let mut c = BlockCollection::from_blocks(vec![block(5)]);
        c.merge_latest(vec![block(6), block(6), block(7)]);
        assert_eq!(heights(&c), vec![7, 6, 5]);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut c = BlockCollection::from_blocks(vec![block(3), block(2)]);
        let before = c.clone();
        let out = c.merge_latest(vec![]);
        assert!(!out.any());
        assert_eq!(c, before);
    }

    #[test]
    fn append_older_only_extends_the_tail() {
        let mut c = BlockCollection::from_blocks(vec![block(10), block(9)]);
        assert_eq!(c.next_older_height(), Some(8));
        assert!(!c.append_older(block(7)));
        assert!(!c.append_older(block(11)));
        assert!(c.append_older(block(8)));
        assert_eq!(heights(&c), vec![10, 9, 8]);
    }

    #[test]
    fn genesis_has_nothing_older() {
        let c = BlockCollection::from_blocks(vec![block(1), block(0)]);
        assert_eq!(c.next_older_height(), None);
        assert_eq!(BlockCollection::new().next_older_height(), None);
    }
}
