//! Memoized ordered tree edit distance with kind-weighted rename costs.
//!
//! The distance between two trees is the minimum cost of turning one into the
//! other under rename/delete/insert operations. Renames between different
//! kinds pay a surcharge proportional to the distance of their syntactic
//! categories, so swapping a `+` for a `*` is cheap while swapping a loop for
//! a literal is not. Children sequences are aligned with a two-row dynamic
//! program whose rows live in a stack-discipline arena.

pub mod arena;
pub mod pool;

use crate::core::kinds::kind_distance;
use crate::core::tree::TreeNode;
use arena::RowArena;
use pool::MemoTable;
use serde::{Deserialize, Serialize};

/// Edit operation costs. `kind_distance_weight` scales the category-distance
/// surcharge on renames between different kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AptedCosts {
    #[serde(default = "default_rename_cost")]
    pub rename_cost: f64,
    #[serde(default = "default_unit_cost")]
    pub delete_cost: f64,
    #[serde(default = "default_unit_cost")]
    pub insert_cost: f64,
    #[serde(default = "default_kind_distance_weight")]
    pub kind_distance_weight: f64,
}

fn default_rename_cost() -> f64 {
    0.3
}

fn default_unit_cost() -> f64 {
    1.0
}

fn default_kind_distance_weight() -> f64 {
    0.5
}

impl Default for AptedCosts {
    fn default() -> Self {
        Self {
            rename_cost: default_rename_cost(),
            delete_cost: default_unit_cost(),
            insert_cost: default_unit_cost(),
            kind_distance_weight: default_kind_distance_weight(),
        }
    }
}

/// One pair computation. The memo table is keyed by node-id pairs and is
/// valid only for the lifetime of the trees it was filled from, so it must be
/// cleared before reuse; `MemoPool::release` does that.
pub struct AptedEngine {
    costs: AptedCosts,
    memo: MemoTable,
    rows: RowArena,
}

impl AptedEngine {
    pub fn new(costs: AptedCosts) -> Self {
        Self::with_memo(costs, MemoTable::default())
    }

    /// Reuse a pooled memo table instead of allocating a fresh one.
    pub fn with_memo(costs: AptedCosts, memo: MemoTable) -> Self {
        Self {
            costs,
            memo,
            rows: RowArena::new(),
        }
    }

    /// Hand the memo table back for pooling.
    pub fn into_memo(self) -> MemoTable {
        self.memo
    }

    pub fn distance(&mut self, a: &TreeNode, b: &TreeNode) -> f64 {
        self.tree_distance(a, b)
    }

    /// Cost of matching two nodes: a kind mismatch pays one unit plus the
    /// weighted category distance; a value mismatch under the same kind pays
    /// the rename cost (free when renames are free).
    fn node_cost(&self, a: &TreeNode, b: &TreeNode) -> f64 {
        if a.kind() != b.kind() {
            1.0 + self.costs.kind_distance_weight * kind_distance(a.kind(), b.kind())
        } else if self.costs.rename_cost > 0.0 && a.value() != b.value() {
            self.costs.rename_cost
        } else {
            0.0
        }
    }

    fn tree_distance(&mut self, a: &TreeNode, b: &TreeNode) -> f64 {
        let key = (a.id(), b.id());
        if let Some(&cached) = self.memo.get(&key) {
            return cached;
        }
        let rho = self.node_cost(a, b);
        let distance = match (a.is_leaf(), b.is_leaf()) {
            (true, true) => rho,
            (true, false) => self.costs.delete_cost * b.size() as f64 - self.costs.delete_cost + rho,
            (false, true) => self.costs.insert_cost * a.size() as f64 - self.costs.insert_cost + rho,
            (false, false) => rho + self.children_distance(a.children(), b.children()),
        };
        self.memo.insert(key, distance);
        distance
    }

    /// Two-row DP over the children sequences. The shorter sequence indexes
    /// the columns; when the operands are swapped to arrange that, the
    /// delete/insert costs swap with them.
    fn children_distance(&mut self, a: &[TreeNode], b: &[TreeNode]) -> f64 {
        let (rows_seq, cols_seq, delete, insert) = if b.len() > a.len() {
            (b, a, self.costs.insert_cost, self.costs.delete_cost)
        } else {
            (a, b, self.costs.delete_cost, self.costs.insert_cost)
        };
        let m = rows_seq.len();
        let n = cols_seq.len();

        let base = self.rows.allocate(2 * (n + 1));
        let mut prev = base;
        let mut curr = base + n + 1;

        for j in 0..=n {
            self.rows.set(prev + j, j as f64 * insert);
        }
        for (i, row_node) in rows_seq.iter().enumerate() {
            self.rows.set(curr, (i + 1) as f64 * delete);
            for (j, col_node) in cols_seq.iter().enumerate() {
                let del = self.rows.get(prev + j + 1) + delete * row_node.size() as f64;
                let ins = self.rows.get(curr + j) + insert * col_node.size() as f64;
                let rep = self.rows.get(prev + j) + self.tree_distance(row_node, col_node);
                self.rows.set(curr + j + 1, del.min(ins).min(rep));
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        let result = self.rows.get(prev + n);
        self.rows.deallocate(2 * (n + 1));
        result
    }
}
