use std::{
    fmt::Display,
    num::{NonZeroIsize, NonZeroUsize},
};

/// A variable of an ECNF theory.
///
/// A variable is represented by a non-null positive integer.
/// Integer variables and Boolean variables share the same identifier space.
/// It can be obtained through the [From] trait from an unsigned integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(NonZeroUsize);

macro_rules! impl_var_from {
    ($t: ty) => {
        impl From<$t> for Variable {
            fn from(v: $t) -> Self {
                Self(NonZeroUsize::try_from(v as usize).unwrap())
            }
        }
    };
}
impl_var_from!(usize);
impl_var_from!(u64);
impl_var_from!(u32);

impl From<Variable> for usize {
    fn from(v: Variable) -> Self {
        v.0.into()
    }
}

impl Variable {
    /// Returns the positive literal associated with this variable.
    pub fn positive(self) -> Literal {
        Literal::from(usize::from(self) as isize)
    }

    /// Returns the negative literal associated with this variable.
    pub fn negative(self) -> Literal {
        self.positive().negate()
    }

    /// Returns the identifier of this variable used as an integer parameter.
    pub fn as_parameter(self) -> i64 {
        usize::from(self) as i64
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal of an ECNF theory.
///
/// A literal is represented by a non-null integer.
/// It can be obtained through the [From] trait from a signed integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(NonZeroIsize);

impl Literal {
    /// Returns the opposite literal.
    pub fn negate(self) -> Self {
        Self::from(-self.0.get())
    }

    /// Returns the variable of this literal.
    pub fn var(&self) -> Variable {
        Variable(self.0.unsigned_abs())
    }

    /// Returns `true` iff this literal is the positive one of its variable.
    pub fn is_positive(&self) -> bool {
        self.0.get() > 0
    }
}

macro_rules! impl_lit_from {
    ($t: ty) => {
        impl From<$t> for Literal {
            fn from(l: $t) -> Self {
                Self(NonZeroIsize::try_from(l as isize).unwrap())
            }
        }
    };
}
impl_lit_from!(isize);
impl_lit_from!(i64);
impl_lit_from!(i32);

impl From<Variable> for Literal {
    fn from(v: Variable) -> Self {
        v.positive()
    }
}

impl From<Literal> for isize {
    fn from(l: Literal) -> Self {
        l.0.into()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a list of literals from a list of integers.
#[macro_export]
macro_rules! lits {
    () => (
        vec![] as Vec<$crate::ecnf::Literal>
    );
    ($($x:expr),+ $(,)?) => (
        [$($x),+].into_iter().map($crate::ecnf::Literal::from).collect::<Vec<$crate::ecnf::Literal>>()
    );
}
