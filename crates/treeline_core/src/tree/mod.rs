//! Block tree operations for one page.
//!
//! # Responsibility
//! - Locate blocks and apply structure mutations (insert-after, indent,
//!   outdent, reorder) over a page's root sibling sequence.
//! - Keep the persisted model free of parent back-pointers: ancestry is
//!   recomputed by search instead of maintained as mutable state.
//!
//! # Invariants
//! - Every mutation is a splice within exactly one sibling sequence.
//! - Unknown ids and boundary moves leave the tree untouched and report
//!   `false`.
//! - Lookups are depth-first pre-order; ids are unique per document, so
//!   each resolves to exactly one location.

use crate::model::{Block, BlockId};

/// Resolved position of one block inside a page tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Owning parent block id. `None` when the block sits at page root.
    pub parent: Option<BlockId>,
    /// Position inside the owning sibling sequence.
    pub index: usize,
}

/// Resolves a block id to its parent and sibling index.
///
/// Depth-first pre-order search over the whole tree; total over in-tree
/// ids, `None` for unknown ones.
pub fn locate(root: &[Block], block_id: &str) -> Option<Location> {
    locate_under(root, block_id, None)
}

fn locate_under(sequence: &[Block], block_id: &str, parent: Option<&Block>) -> Option<Location> {
    for (index, block) in sequence.iter().enumerate() {
        if block.id == block_id {
            return Some(Location {
                parent: parent.map(|owner| owner.id.clone()),
                index,
            });
        }
        if let Some(found) = locate_under(&block.children, block_id, Some(block)) {
            return Some(found);
        }
    }
    None
}

/// Finds one block anywhere in the tree.
pub fn get<'tree>(root: &'tree [Block], block_id: &str) -> Option<&'tree Block> {
    for block in root {
        if block.id == block_id {
            return Some(block);
        }
        if let Some(found) = get(&block.children, block_id) {
            return Some(found);
        }
    }
    None
}

/// Finds one block anywhere in the tree for mutation.
pub fn get_mut<'tree>(root: &'tree mut [Block], block_id: &str) -> Option<&'tree mut Block> {
    for block in root.iter_mut() {
        if block.id == block_id {
            return Some(block);
        }
        if let Some(found) = get_mut(&mut block.children, block_id) {
            return Some(found);
        }
    }
    None
}

/// Inserts `block` as the sibling immediately following the anchor, in the
/// anchor's own sequence; a new entry keeps the anchor's depth, it does
/// not become a child.
///
/// Returns `false` (tree untouched, `block` dropped) when the anchor id is
/// not found.
pub fn insert_after(root: &mut Vec<Block>, anchor_id: &str, block: Block) -> bool {
    let Some(path) = path_to(root, anchor_id) else {
        return false;
    };
    let Some((&index, prefix)) = path.split_last() else {
        return false;
    };
    sequence_mut(root, prefix).insert(index + 1, block);
    true
}

/// Moves a block into the children of its immediately preceding sibling,
/// appended as that sibling's last child.
///
/// A block that is first in its sequence has no preceding sibling; that is
/// a deliberate no-op policy, not an error.
pub fn indent(root: &mut Vec<Block>, block_id: &str) -> bool {
    let Some(path) = path_to(root, block_id) else {
        return false;
    };
    let Some((&index, prefix)) = path.split_last() else {
        return false;
    };
    if index == 0 {
        return false;
    }
    let sequence = sequence_mut(root, prefix);
    let block = sequence.remove(index);
    sequence[index - 1].children.push(block);
    true
}

/// Moves a block out of its parent's children, re-inserted immediately
/// after the former parent in the parent's own sequence.
///
/// No-op for blocks already at page root.
pub fn outdent(root: &mut Vec<Block>, block_id: &str) -> bool {
    let Some(path) = path_to(root, block_id) else {
        return false;
    };
    if path.len() < 2 {
        return false;
    }
    let Some((&index, parent_path)) = path.split_last() else {
        return false;
    };
    let Some((&parent_index, grandparent_path)) = parent_path.split_last() else {
        return false;
    };
    let block = sequence_mut(root, parent_path).remove(index);
    sequence_mut(root, grandparent_path).insert(parent_index + 1, block);
    true
}

/// Reorders a block by `delta` positions within its own sequence.
///
/// No-op when the target index would fall outside `[0, len)`.
pub fn move_by(root: &mut Vec<Block>, block_id: &str, delta: isize) -> bool {
    let Some(path) = path_to(root, block_id) else {
        return false;
    };
    let Some((&index, prefix)) = path.split_last() else {
        return false;
    };
    let sequence = sequence_mut(root, prefix);
    let target = index as isize + delta;
    if target < 0 || target >= sequence.len() as isize {
        return false;
    }
    let block = sequence.remove(index);
    sequence.insert(target as usize, block);
    true
}

/// Index path from the root sequence down to the block, pre-order.
fn path_to(sequence: &[Block], block_id: &str) -> Option<Vec<usize>> {
    for (index, block) in sequence.iter().enumerate() {
        if block.id == block_id {
            return Some(vec![index]);
        }
        if let Some(rest) = path_to(&block.children, block_id) {
            let mut path = Vec::with_capacity(rest.len() + 1);
            path.push(index);
            path.extend(rest);
            return Some(path);
        }
    }
    None
}

/// Walks an index path down to the sibling sequence it addresses.
///
/// `prefix` must come fresh from `path_to` on the same tree.
fn sequence_mut<'tree>(root: &'tree mut Vec<Block>, prefix: &[usize]) -> &'tree mut Vec<Block> {
    let mut sequence = root;
    for &index in prefix {
        sequence = &mut sequence[index].children;
    }
    sequence
}

#[cfg(test)]
mod tests {
    use super::{path_to, sequence_mut};
    use crate::model::Block;

    fn sample_forest() -> Vec<Block> {
        let mut first = Block::with_text("first");
        first.children.push(Block::with_text("nested"));
        vec![first, Block::with_text("second")]
    }

    #[test]
    fn path_to_resolves_nested_blocks() {
        let forest = sample_forest();
        let nested_id = forest[0].children[0].id.clone();

        assert_eq!(path_to(&forest, &forest[1].id), Some(vec![1]));
        assert_eq!(path_to(&forest, &nested_id), Some(vec![0, 0]));
        assert_eq!(path_to(&forest, "missing"), None);
    }

    #[test]
    fn sequence_mut_walks_to_owning_sequence() {
        let mut forest = sample_forest();

        let root = sequence_mut(&mut forest, &[]);
        assert_eq!(root.len(), 2);

        let children = sequence_mut(&mut forest, &[0]);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text, "nested");
    }
}
