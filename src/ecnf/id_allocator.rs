use super::Variable;

/// The source of fresh variables for an ECNF theory.
///
/// Identifiers start at 1 and strictly increase; they are never reused.
/// Named variables and auxiliary ("one-shot") variables share this source.
#[derive(Debug, Default)]
pub struct IdAllocator {
    n_allocated: usize,
}

impl IdAllocator {
    /// Returns a new, never used variable.
    pub fn fresh_id(&mut self) -> Variable {
        self.n_allocated += 1;
        Variable::from(self.n_allocated)
    }

    /// Returns `n` consecutive fresh variables.
    pub fn fresh_ids(&mut self, n: usize) -> Vec<Variable> {
        (0..n).map(|_| self.fresh_id()).collect()
    }

    /// Returns the number of variables allocated so far.
    pub fn n_allocated(&self) -> usize {
        self.n_allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_one() {
        let mut ids = IdAllocator::default();
        assert_eq!(0, ids.n_allocated());
        assert_eq!(Variable::from(1usize), ids.fresh_id());
        assert_eq!(1, ids.n_allocated());
    }

    #[test]
    fn test_strictly_increasing() {
        let mut ids = IdAllocator::default();
        let mut all = vec![ids.fresh_id()];
        all.append(&mut ids.fresh_ids(5));
        all.push(ids.fresh_id());
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(7, ids.n_allocated());
    }
}
