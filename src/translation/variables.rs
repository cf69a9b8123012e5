use crate::ecnf::{IntDomain, Variable};

/// The binding of a Boolean variable.
///
/// A variable is either free, an alias of another one, or fixed to a value; never two of them at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolBinding {
    /// No binding.
    Free,
    /// The variable has the same value as the one with this id.
    Alias(Variable),
    /// The variable is fixed.
    Value(bool),
}

/// The binding of an integer variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntBinding {
    /// No binding.
    Free,
    /// The variable has the same value as the one with this id.
    Alias(Variable),
    /// The variable is fixed.
    Value(i64),
}

/// A Boolean variable of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolVar {
    id: Variable,
    binding: BoolBinding,
}

impl BoolVar {
    pub(crate) fn new(id: Variable) -> Self {
        Self {
            id,
            binding: BoolBinding::Free,
        }
    }

    pub(crate) fn bind(&mut self, binding: BoolBinding) {
        self.binding = binding;
    }

    /// Returns the id of the variable.
    pub fn id(&self) -> Variable {
        self.id
    }

    /// Returns the binding of the variable.
    pub fn binding(&self) -> BoolBinding {
        self.binding
    }

    /// Returns `true` iff this variable is an alias of another one.
    pub fn has_alias(&self) -> bool {
        matches!(self.binding, BoolBinding::Alias(_))
    }

    /// Returns `true` iff this variable is fixed.
    pub fn has_value(&self) -> bool {
        matches!(self.binding, BoolBinding::Value(_))
    }

    /// Returns the id of the aliased variable, if any.
    pub fn alias_id(&self) -> Option<Variable> {
        match self.binding {
            BoolBinding::Alias(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value of the variable, if fixed.
    pub fn fixed_value(&self) -> Option<bool> {
        match self.binding {
            BoolBinding::Value(b) => Some(b),
            _ => None,
        }
    }
}

/// An integer variable of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntVar {
    id: Variable,
    binding: IntBinding,
    domain: IntDomain,
}

impl IntVar {
    pub(crate) fn new(id: Variable, domain: IntDomain) -> Self {
        Self {
            id,
            binding: IntBinding::Free,
            domain,
        }
    }

    pub(crate) fn bind(&mut self, binding: IntBinding) {
        self.binding = binding;
    }

    /// Returns the id of the variable.
    pub fn id(&self) -> Variable {
        self.id
    }

    /// Returns the binding of the variable.
    pub fn binding(&self) -> IntBinding {
        self.binding
    }

    /// Returns the domain of the variable.
    pub fn domain(&self) -> &IntDomain {
        &self.domain
    }

    /// Returns `true` iff this variable is an alias of another one.
    pub fn has_alias(&self) -> bool {
        matches!(self.binding, IntBinding::Alias(_))
    }

    /// Returns `true` iff this variable is fixed.
    pub fn has_value(&self) -> bool {
        matches!(self.binding, IntBinding::Value(_))
    }

    /// Returns the id of the aliased variable, if any.
    pub fn alias_id(&self) -> Option<Variable> {
        match self.binding {
            IntBinding::Alias(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value of the variable, if fixed.
    pub fn fixed_value(&self) -> Option<i64> {
        match self.binding {
            IntBinding::Value(i) => Some(i),
            _ => None,
        }
    }

    /// Returns `true` iff the domain is given by its bounds.
    pub fn is_range(&self) -> bool {
        self.domain.is_range()
    }
}

/// An array of variables, indexed from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarArray<T> {
    elements: Vec<T>,
}

impl<T> VarArray<T> {
    pub(crate) fn new(elements: Vec<T>) -> Self {
        Self { elements }
    }

    /// Returns the element at the given index, starting at 1.
    ///
    /// Returns `None` if the index is 0 or greater than the array length.
    pub fn get(&self, index: i64) -> Option<&T> {
        if index < 1 {
            return None;
        }
        self.elements.get((index - 1) as usize)
    }

    pub(crate) fn get_mut(&mut self, index: i64) -> Option<&mut T> {
        if index < 1 {
            return None;
        }
        self.elements.get_mut((index - 1) as usize)
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` iff the array has no element.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_bindings() {
        let mut b = BoolVar::new(Variable::from(3usize));
        assert_eq!(BoolBinding::Free, b.binding());
        assert!(!b.has_alias() && !b.has_value());
        b.bind(BoolBinding::Alias(Variable::from(1usize)));
        assert!(b.has_alias() && !b.has_value());
        assert_eq!(Some(Variable::from(1usize)), b.alias_id());
        b.bind(BoolBinding::Value(false));
        assert!(!b.has_alias() && b.has_value());
        assert_eq!(Some(false), b.fixed_value());
        assert_eq!(None, b.alias_id());
    }

    #[test]
    fn test_int_bindings() {
        let mut x = IntVar::new(Variable::from(2usize), IntDomain::new_values(vec![4, 1]));
        assert!(!x.is_range());
        x.bind(IntBinding::Value(4));
        assert_eq!(Some(4), x.fixed_value());
        assert!(!x.has_alias());
        assert_eq!(&IntDomain::Values(vec![1, 4]), x.domain());
    }

    #[test]
    fn test_array_indexes() {
        let a = VarArray::new(vec!['a', 'b', 'c']);
        assert_eq!(None, a.get(0));
        assert_eq!(Some(&'a'), a.get(1));
        assert_eq!(Some(&'c'), a.get(3));
        assert_eq!(None, a.get(4));
        assert_eq!(None, a.get(-1));
        assert_eq!(3, a.len());
    }
}
