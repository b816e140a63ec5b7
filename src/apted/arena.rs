//! Grow-on-demand row storage for the children alignment DP.
//!
//! Rows are carved out of one contiguous buffer with a strict stack
//! discipline: the most recent allocation must be freed first. Nested DP
//! calls triggered by the recursive tree distance allocate above the current
//! top and restore it on the way out, so one buffer serves an entire pair
//! computation without per-call allocation.

#[derive(Debug, Default)]
pub struct RowArena {
    buf: Vec<f64>,
    top: usize,
}

impl RowArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            top: 0,
        }
    }

    /// Reserve `n` slots and return the base offset of the region. Slots are
    /// not zeroed; callers initialize what they read.
    pub fn allocate(&mut self, n: usize) -> usize {
        let base = self.top;
        self.top += n;
        if self.buf.len() < self.top {
            self.buf.resize(self.top, 0.0);
        }
        base
    }

    /// Release the most recent `n` slots. Freeing more than was allocated is
    /// an internal invariant violation.
    pub fn deallocate(&mut self, n: usize) {
        assert!(n <= self.top, "arena underflow: freeing {n} of {}", self.top);
        self.top -= n;
    }

    pub fn get(&self, index: usize) -> f64 {
        self.buf[index]
    }

    pub fn set(&mut self, index: usize, value: f64) {
        self.buf[index] = value;
    }

    #[cfg(test)]
    fn top(&self) -> usize {
        self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_returns_consecutive_bases() {
        let mut arena = RowArena::new();
        assert_eq!(arena.allocate(4), 0);
        assert_eq!(arena.allocate(8), 4);
        assert_eq!(arena.top(), 12);
    }

    #[test]
    fn deallocate_restores_top_for_reuse() {
        let mut arena = RowArena::new();
        let a = arena.allocate(4);
        arena.set(a, 1.5);
        arena.deallocate(4);
        let b = arena.allocate(4);
        assert_eq!(a, b);
    }

    #[test]
    fn grows_on_demand() {
        let mut arena = RowArena::with_capacity(2);
        let base = arena.allocate(64);
        arena.set(base + 63, 7.0);
        assert_eq!(arena.get(base + 63), 7.0);
    }

    #[test]
    #[should_panic(expected = "arena underflow")]
    fn underflow_panics() {
        let mut arena = RowArena::new();
        arena.allocate(2);
        arena.deallocate(3);
    }

    #[test]
    fn nested_stack_discipline() {
        let mut arena = RowArena::new();
        let outer = arena.allocate(6);
        arena.set(outer + 2, 2.0);
        let inner = arena.allocate(3);
        arena.set(inner, 9.0);
        arena.deallocate(3);
        // Outer region is untouched by the nested allocation's lifetime.
        assert_eq!(arena.get(outer + 2), 2.0);
        arena.deallocate(6);
        assert_eq!(arena.top(), 0);
    }
}
