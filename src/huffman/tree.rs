use crate::{
    error::{CodecError, Result},
    huffman::{code::CodeTable, frequency::FrequencyTable, queue::PriorityQueue},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        /// Reached on a `0` bit.
        zero: Box<TreeNode>,
        /// Reached on a `1` bit.
        one: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Joins two nodes under a new internal node. `zero` becomes the 0-branch.
    pub fn merge(zero: TreeNode, one: TreeNode) -> Self {
        TreeNode::Internal {
            freq: zero.freq() + one.freq(),
            zero: Box::new(zero),
            one: Box::new(one),
        }
    }

    pub const fn freq(&self) -> u64 {
        match self {
            TreeNode::Leaf { freq, .. } | TreeNode::Internal { freq, .. } => *freq,
        }
    }

    pub const fn symbol(&self) -> Option<u8> {
        match self {
            TreeNode::Leaf { symbol, .. } => Some(*symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// The child selected by `bit`, or `None` on a leaf.
    pub fn child(&self, bit: bool) -> Option<&TreeNode> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { zero, one, .. } => Some(if bit { one } else { zero }),
        }
    }
}

/// A Huffman tree rebuilt from a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
}

impl HuffmanTree {
    /// Builds the tree for `table`, or `None` when the table has no symbols.
    ///
    /// Leaves enter the queue in ascending symbol order and equal weights leave it in insertion
    /// order, so the same table always yields the same tree.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedHeader`] if the counts sum past `u64::MAX`.
    pub fn build(table: &FrequencyTable) -> Result<Option<Self>> {
        if table.total().is_none() {
            return Err(CodecError::malformed("symbol frequencies overflow a 64-bit total"));
        }

        let mut queue = PriorityQueue::new();
        for (symbol, freq) in table.symbols() {
            queue.insert(TreeNode::Leaf { symbol, freq });
        }

        if_tracing! {
            tracing::trace!(target = "huffman", distinct = table.distinct(), "building tree");
        }

        loop {
            let Some(zero) = queue.remove_min() else {
                return Ok(None);
            };
            let Some(one) = queue.remove_min() else {
                return Ok(Some(Self { root: zero }));
            };
            queue.insert(TreeNode::merge(zero, one));
        }
    }

    pub const fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Derives the code of every symbol in the tree.
    pub fn codes(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn walk(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Internal { zero, one, .. } => 1 + walk(zero).max(walk(one)),
            }
        }
        walk(&self.root)
    }
}
