/// The domain of an integer variable.
///
/// A domain is either a contiguous range of values or an explicit set of values.
/// Explicit sets are kept sorted and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntDomain {
    /// The values between the two bounds, both included.
    Range(i64, i64),
    /// An explicit set of values.
    Values(Vec<i64>),
}

impl IntDomain {
    /// Builds a range domain.
    pub fn new_range(low: i64, high: i64) -> Self {
        IntDomain::Range(low, high)
    }

    /// Builds an explicit domain from a list of values, sorting them and removing duplicates.
    pub fn new_values(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        values.dedup();
        IntDomain::Values(values)
    }

    /// Builds the domain containing a single value.
    pub fn singleton(value: i64) -> Self {
        IntDomain::Range(value, value)
    }

    /// Returns `true` iff this domain is given by its bounds.
    pub fn is_range(&self) -> bool {
        matches!(self, IntDomain::Range(_, _))
    }

    /// Returns the values of the domain in ascending order.
    pub fn values(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        match self {
            IntDomain::Range(low, high) => Box::new(*low..=*high),
            IntDomain::Values(values) => Box::new(values.iter().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_values() {
        let d = IntDomain::new_range(-1, 2);
        assert!(d.is_range());
        assert_eq!(vec![-1, 0, 1, 2], d.values().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(0, IntDomain::new_range(3, 2).values().count());
    }

    #[test]
    fn test_explicit_values_are_sorted() {
        let d = IntDomain::new_values(vec![5, 1, 3, 1]);
        assert!(!d.is_range());
        assert_eq!(IntDomain::Values(vec![1, 3, 5]), d);
    }

    #[test]
    fn test_singleton() {
        assert_eq!(IntDomain::Range(4, 4), IntDomain::singleton(4));
    }
}
