//! Free-list of memoization tables shared across scoring tasks.
//!
//! Each pair computation checks a table out, uses it exclusively, and returns
//! it cleared. The pool is the only structure shared between parallel scoring
//! tasks.

use std::collections::HashMap;
use std::sync::Mutex;

pub type MemoTable = HashMap<(u64, u64), f64>;

#[derive(Debug, Default)]
pub struct MemoPool {
    tables: Mutex<Vec<MemoTable>>,
}

impl MemoPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> MemoTable {
        self.tables
            .lock()
            .expect("memo pool poisoned")
            .pop()
            .unwrap_or_default()
    }

    pub fn release(&self, mut table: MemoTable) {
        table.clear();
        self.tables.lock().expect("memo pool poisoned").push(table);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tables.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_tables_come_back_cleared() {
        let pool = MemoPool::new();
        let mut table = pool.acquire();
        table.insert((1, 2), 0.5);
        pool.release(table);
        assert_eq!(pool.len(), 1);

        let table = pool.acquire();
        assert!(table.is_empty());
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn acquire_on_empty_pool_allocates() {
        let pool = MemoPool::new();
        let table = pool.acquire();
        assert!(table.is_empty());
    }
}
