//! Nodes of the nested map of an observation table.
use crate::TabularError;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};
use xxhash_rust::xxh3::Xxh3Builder;

/// One level of the nested map, keyed by a coordinate of the discrete key.
pub(super) type NodeMap = HashMap<i64, Node, Xxh3Builder>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) enum Node {
    /// Maps the next key coordinate to a deeper node.
    Branch(NodeMap),

    /// Action values of a key.
    Leaf(Vec<f64>),
}

impl Node {
    pub(super) fn branch() -> Self {
        Self::Branch(NodeMap::default())
    }
}

/// Number of leaves below `map`.
pub(super) fn count_leaves(map: &NodeMap) -> usize {
    map.values()
        .map(|node| match node {
            Node::Branch(m) => count_leaves(m),
            Node::Leaf(_) => 1,
        })
        .sum()
}

/// Number of nodes below `map`, leaves included.
pub(super) fn count_nodes(map: &NodeMap) -> usize {
    map.values()
        .map(|node| match node {
            Node::Branch(m) => 1 + count_nodes(m),
            Node::Leaf(_) => 1,
        })
        .sum()
}

/// Deepest nesting level below `map`; 0 for an empty map.
pub(super) fn max_depth(map: &NodeMap) -> usize {
    map.values()
        .map(|node| match node {
            Node::Branch(m) => 1 + max_depth(m),
            Node::Leaf(_) => 1,
        })
        .max()
        .unwrap_or(0)
}

/// Length of the keys stored below `map`, or `None` if it is empty.
///
/// Every leaf must hold `n_actions` values and sit at the same depth, and no
/// nested map may be empty.
pub(super) fn key_len(map: &NodeMap, n_actions: usize) -> Result<Option<usize>, TabularError> {
    let mut key_len = None;
    check_level(map, n_actions, 1, &mut key_len)?;
    Ok(key_len)
}

fn check_level(
    map: &NodeMap,
    n_actions: usize,
    depth: usize,
    key_len: &mut Option<usize>,
) -> Result<(), TabularError> {
    for node in map.values() {
        match node {
            Node::Branch(m) if m.is_empty() => return Err(TabularError::EmptyBranch),
            Node::Branch(m) => check_level(m, n_actions, depth + 1, key_len)?,
            Node::Leaf(values) => {
                if values.len() != n_actions {
                    return Err(TabularError::LeafLengthMismatch {
                        expected: n_actions,
                        actual: values.len(),
                    });
                }
                match *key_len {
                    None => *key_len = Some(depth),
                    Some(first) if first != depth => {
                        return Err(TabularError::UnevenKeyLengths {
                            first,
                            other: depth,
                        })
                    }
                    Some(_) => {}
                }
            }
        }
    }
    Ok(())
}

/// Pushes `(key, leaf)` for every leaf below `map`.
pub(super) fn collect_leaves<'a>(
    map: &'a NodeMap,
    prefix: &mut Vec<i64>,
    out: &mut Vec<(Vec<i64>, &'a [f64])>,
) {
    for (k, node) in map {
        prefix.push(*k);
        match node {
            Node::Branch(m) => collect_leaves(m, prefix, out),
            Node::Leaf(values) => out.push((prefix.clone(), values.as_slice())),
        }
        prefix.pop();
    }
}

/// Writes `map` as `{k: {k: [v, v]}}` with keys in ascending order.
pub(super) fn fmt_map(map: &NodeMap, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut keys = map.keys().collect::<Vec<_>>();
    keys.sort();

    write!(f, "{{")?;
    for (i, k) in keys.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: ", k)?;
        match &map[k] {
            Node::Branch(m) => fmt_map(m, f)?,
            Node::Leaf(values) => write!(f, "{:?}", values)?,
        }
    }
    write!(f, "}}")
}
