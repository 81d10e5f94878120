//! Fan-out trees built from boundary levels.
//!
//! Every chunk ends at a boundary of some level. Reading the descriptors in
//! order, a boundary of level L closes one group at each level below L, so
//! coarse groups are unions of finer ones and the whole stream becomes a tree
//! whose shape depends only on content. Large inputs that differ in one spot
//! then share every subtree away from the edit.
//!
//! The builder keeps one stack of pending nodes per level:
//!
//! - each descriptor is pushed onto stack 0 as a leaf;
//! - a level-L descriptor then closes stacks `0..L` bottom-up, turning each
//!   non-empty stack into one branch on the stack above (a stack holding a
//!   single node passes that node up unchanged);
//! - [`FanoutBuilder::finish`] closes every stack and returns the root.
//!
//! # Example
//!
//! ```
//! use hashsplit::{ChunkDescriptor, FanoutBuilder, FanoutNode};
//!
//! let desc = |offset, len, level| ChunkDescriptor { offset, len, level, is_final: false };
//!
//! let mut builder = FanoutBuilder::new();
//! builder.push(desc(0, 10, 0));
//! builder.push(desc(10, 10, 1)); // closes the first group
//! builder.push(desc(20, 10, 0));
//!
//! let root = builder.finish().unwrap();
//! assert_eq!(root.len(), 30);
//! assert_eq!(root.children().len(), 2);
//! assert_eq!(root.children()[0].children().len(), 2);
//! assert!(matches!(root.children()[1], FanoutNode::Leaf(_)));
//! ```

use std::ops::Range;

use crate::chunk::ChunkDescriptor;

/// A node of a fan-out tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FanoutNode {
    /// A single chunk.
    Leaf(ChunkDescriptor),
    /// A group of consecutive nodes closed by a boundary of `level` or higher.
    Branch {
        /// Stack height this branch was closed at (1 for groups of leaves).
        level: u32,
        /// Stream offset of the first byte covered.
        offset: u64,
        /// Number of bytes covered.
        len: u64,
        /// Child nodes in stream order.
        children: Vec<FanoutNode>,
    },
}

impl FanoutNode {
    /// Returns the stream offset of the first byte under this node.
    pub fn offset(&self) -> u64 {
        match self {
            FanoutNode::Leaf(desc) => desc.offset,
            FanoutNode::Branch { offset, .. } => *offset,
        }
    }

    /// Returns the number of bytes under this node.
    pub fn len(&self) -> u64 {
        match self {
            FanoutNode::Leaf(desc) => desc.len as u64,
            FanoutNode::Branch { len, .. } => *len,
        }
    }

    /// Returns true if no bytes are covered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the covered stream range.
    pub fn range(&self) -> Range<u64> {
        self.offset()..self.offset() + self.len()
    }

    /// Returns the children of a branch; empty for a leaf.
    pub fn children(&self) -> &[FanoutNode] {
        match self {
            FanoutNode::Leaf(_) => &[],
            FanoutNode::Branch { children, .. } => children,
        }
    }

    /// Returns the leaves under this node in stream order.
    pub fn leaves(&self) -> Vec<&ChunkDescriptor> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    /// Returns the number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ChunkDescriptor>) {
        match self {
            FanoutNode::Leaf(desc) => out.push(desc),
            FanoutNode::Branch { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// Assembles chunk descriptors into a fan-out tree as they are emitted.
#[derive(Debug, Default)]
pub struct FanoutBuilder {
    stacks: Vec<Vec<FanoutNode>>,
}

impl FanoutBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the next descriptor of the stream.
    pub fn push(&mut self, desc: ChunkDescriptor) {
        self.stack_mut(0).push(FanoutNode::Leaf(desc));
        self.close(desc.level as usize);
    }

    /// Closes every open group and returns the root, or `None` if nothing
    /// was pushed.
    pub fn finish(mut self) -> Option<FanoutNode> {
        let top = self.stacks.len();
        self.close(top);
        let mut roots = self.stacks.pop()?;
        match roots.len() {
            0 => None,
            1 => roots.pop(),
            _ => Some(branch(top as u32 + 1, roots)),
        }
    }

    /// Closes stacks `0..levels`, each onto the one above it.
    fn close(&mut self, levels: usize) {
        for i in 0..levels {
            let nodes = std::mem::take(self.stack_mut(i));
            let above = self.stack_mut(i + 1);
            match nodes.len() {
                0 => {}
                1 => above.extend(nodes),
                _ => above.push(branch(i as u32 + 1, nodes)),
            }
        }
    }

    fn stack_mut(&mut self, level: usize) -> &mut Vec<FanoutNode> {
        if self.stacks.len() <= level {
            self.stacks.resize_with(level + 1, Vec::new);
        }
        &mut self.stacks[level]
    }
}

fn branch(level: u32, children: Vec<FanoutNode>) -> FanoutNode {
    let offset = children.first().map_or(0, FanoutNode::offset);
    let len = children.iter().map(FanoutNode::len).sum();
    FanoutNode::Branch {
        level,
        offset,
        len,
        children,
    }
}
