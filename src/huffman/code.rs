use std::collections::BTreeMap;

use crate::huffman::{
    frequency::FrequencyTable,
    tree::{HuffmanTree, TreeNode},
};

/// Bits of one symbol's code, first bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<&[bool]> for Code {
    fn from(bits: &[bool]) -> Self {
        Self { bits: bits.to_vec() }
    }
}

impl core::fmt::Display for Code {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from one tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Walks the tree root to leaf, `0` for the 0-branch and `1` for the 1-branch.
    ///
    /// A tree that is a single leaf has no branches; its symbol gets the one-bit code `0` so every
    /// occurrence still costs a bit in the payload.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            TreeNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, Code { bits: vec![false] });
            }
            root => {
                let mut path = Vec::new();
                collect(root, &mut path, &mut codes);
            }
        }
        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Payload length in bits for `table`: the sum of count times code length.
    ///
    /// Returns `None` if a symbol of `table` has no code or the sum overflows.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> Option<u64> {
        table.symbols().try_fold(0u64, |acc, (symbol, count)| {
            let len = self.get(symbol)?.len() as u64;
            acc.checked_add(count.checked_mul(len)?)
        })
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

fn collect(node: &TreeNode, path: &mut Vec<bool>, codes: &mut BTreeMap<u8, Code>) {
    match node {
        TreeNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, Code::from(path.as_slice()));
        }
        TreeNode::Internal { zero, one, .. } => {
            path.push(false);
            collect(zero, path, codes);
            path.pop();
            path.push(true);
            collect(one, path, codes);
            path.pop();
        }
    }
}
