use core::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::huffman::tree::TreeNode;

/// Min-priority queue of tree nodes ordered by frequency.
///
/// Nodes of equal frequency come out in the order they went in, which keeps tree construction
/// deterministic between the encoder and the decoder.
#[derive(Debug, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry {
    freq: u64,
    seq: u64,
    node: TreeNode,
}

impl Entry {
    fn key(&self) -> (u64, u64) {
        (self.freq, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: TreeNode) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { freq: node.freq(), seq, node }));
    }

    /// Removes the node with the smallest frequency, the earliest inserted among equals.
    pub fn remove_min(&mut self) -> Option<TreeNode> {
        self.heap.pop().map(|Reverse(entry)| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8, freq: u64) -> TreeNode {
        TreeNode::Leaf { symbol, freq }
    }

    fn drain(queue: &mut PriorityQueue) -> Vec<(Option<u8>, u64)> {
        let mut out = vec![];
        while let Some(node) = queue.remove_min() {
            out.push((node.symbol(), node.freq()));
        }
        out
    }

    #[test]
    fn removes_in_ascending_frequency() {
        let mut queue = PriorityQueue::new();
        for (symbol, freq) in [(b'a', 5), (b'b', 1), (b'c', 9), (b'd', 3)] {
            queue.insert(leaf(symbol, freq));
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(
            drain(&mut queue),
            vec![(Some(b'b'), 1), (Some(b'd'), 3), (Some(b'a'), 5), (Some(b'c'), 9)]
        );
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut queue = PriorityQueue::new();
        for symbol in [b'q', b'a', b'z', b'm'] {
            queue.insert(leaf(symbol, 2));
        }
        let order: Vec<_> = drain(&mut queue).into_iter().map(|(s, _)| s.unwrap()).collect();
        assert_eq!(order, vec![b'q', b'a', b'z', b'm']);
    }

    #[test]
    fn reinserted_node_goes_after_equal_weights() {
        let mut queue = PriorityQueue::new();
        queue.insert(leaf(b'a', 1));
        queue.insert(leaf(b'b', 1));
        queue.insert(leaf(b'c', 2));
        let zero = queue.remove_min().unwrap();
        let one = queue.remove_min().unwrap();
        queue.insert(TreeNode::merge(zero, one));
        // 'c' was inserted before the merged node of equal weight
        assert_eq!(queue.remove_min().unwrap().symbol(), Some(b'c'));
        assert_eq!(queue.remove_min().unwrap().symbol(), None);
    }

    #[test]
    fn empty_queue_returns_none() {
        let mut queue = PriorityQueue::new();
        assert!(queue.is_empty());
        assert!(queue.remove_min().is_none());
    }
}
