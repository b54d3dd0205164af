//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has not been accessed for the longest time.
//! It maintains a usage stack for each set. When a line is accessed, it is moved
//! to the top (Most Recently Used position). The bottom of the stack is the
//! Least Recently Used line.

/// Trait for cache replacement policies.
pub trait ReplacementPolicy {
    /// Records an access to `way` in `set`.
    fn update(&mut self, set: usize, way: usize);

    /// Returns the way in `set` to evict next.
    fn victim(&self, set: usize) -> usize;
}

/// LRU policy state.
#[derive(Clone, Debug)]
pub struct LruPolicy {
    /// One usage stack per set. Index 0 is MRU, the last index is LRU.
    usage: Vec<Vec<usize>>,
}

impl LruPolicy {
    /// Creates a policy for `sets` sets of `ways` ways each.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
        }
    }
}

impl ReplacementPolicy for LruPolicy {
    fn update(&mut self, set: usize, way: usize) {
        let Some(stack) = self.usage.get_mut(set) else {
            return;
        };
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            let _ = stack.remove(pos);
        }
        stack.insert(0, way);
    }

    fn victim(&self, set: usize) -> usize {
        self.usage
            .get(set)
            .and_then(|stack| stack.last().copied())
            .unwrap_or(0)
    }
}
