// SPDX-License-Identifier: GPL-3.0-only
//! Indented-text tree parser for ddcutil output
//!
//! `ddcutil detect` reports each display as a block of `key: value` lines
//! where nesting is expressed purely through leading whitespace. This module
//! turns such text into a tree of [`Node`]s addressable by key.

use std::collections::HashMap;

use crate::error::{BackendError, Result};

/// One `key: value` line and the more-indented lines below it.
///
/// The root node returned by [`Node::parse`] carries an empty key and value;
/// its children are the top-level entries. Nodes are immutable once parsing
/// returns.
#[derive(Debug, Default, PartialEq)]
pub struct Node {
    pub key: String,
    pub value: String,
    /// Child nodes in source line order
    pub children: Vec<Node>,
    /// Key lookup into `children`; the last sibling wins on duplicate keys
    index: HashMap<String, usize>,
}

impl Node {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
            ..Self::default()
        }
    }

    /// Parse a sequence of raw lines into a tree.
    ///
    /// A line's depth is its count of leading whitespace characters; no fixed
    /// indent width is assumed. A node's children are exactly the following
    /// lines with strictly greater indentation, up to the next line at or
    /// below its own. Blank lines are skipped, and a line without a colon
    /// yields an empty value.
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>) -> Node {
        // Ancestry of the most recently read line as (indentation, node)
        // pairs. The synthetic root sits below any real indentation, so it is
        // never popped.
        let mut stack: Vec<(isize, Node)> = vec![(-1, Node::default())];

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let indent = line.chars().take_while(|c| c.is_whitespace()).count() as isize;
            let (key, value) = match line.split_once(':') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (line.trim(), ""),
            };
            while stack.last().is_some_and(|(depth, _)| *depth >= indent) {
                collapse(&mut stack);
            }
            stack.push((indent, Node::new(key, value)));
        }

        while stack.len() > 1 {
            collapse(&mut stack);
        }
        match stack.pop() {
            Some((_, root)) => root,
            None => Node::default(),
        }
    }

    /// Look up a direct child by key.
    ///
    /// Returns `None` when the key is absent so the caller decides whether
    /// absence is tolerable.
    pub fn child(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&slot| &self.children[slot])
    }

    /// Look up a direct child the caller considers mandatory.
    pub fn require(&self, key: &str) -> Result<&Node> {
        self.child(key).ok_or_else(|| BackendError::MissingField {
            key: key.to_owned(),
        })
    }

    fn attach(&mut self, child: Node) {
        self.index.insert(child.key.clone(), self.children.len());
        self.children.push(child);
    }
}

/// Finish the top-of-stack node and hand it to its parent.
fn collapse(stack: &mut Vec<(isize, Node)>) {
    if let Some((_, done)) = stack.pop() {
        if let Some((_, parent)) = stack.last_mut() {
            parent.attach(done);
        }
    }
}
