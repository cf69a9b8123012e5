use crate::ecnf::IntDomain;
use std::fmt::Display;

/// A name applied to a list of arguments.
///
/// Identifiers are used for constraint calls and annotations.
/// An identifier without arguments is a plain reference to a declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The name.
    pub name: String,
    /// The arguments, empty for plain references.
    pub arguments: Vec<Expression>,
}

impl Identifier {
    /// Builds an identifier without arguments.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            arguments: vec![],
        }
    }

    /// Builds an identifier applied to some arguments.
    pub fn new_call(name: &str, arguments: Vec<Expression>) -> Self {
        Self {
            name: name.to_string(),
            arguments,
        }
    }
}

/// A literal set of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetLiteral {
    /// The integers between two bounds, both included.
    Range(i64, i64),
    /// An explicit list of integers.
    Values(Vec<i64>),
}

impl From<&SetLiteral> for IntDomain {
    fn from(s: &SetLiteral) -> Self {
        match s {
            SetLiteral::Range(low, high) => IntDomain::new_range(*low, *high),
            SetLiteral::Values(values) => IntDomain::new_values(values.clone()),
        }
    }
}

/// An expression of a FlatZinc model.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A Boolean literal.
    Bool(bool),
    /// An integer literal.
    Int(i64),
    /// A float literal.
    Float(f64),
    /// A string literal (annotations only).
    Str(String),
    /// A set literal.
    Set(SetLiteral),
    /// An array literal.
    Array(Vec<Expression>),
    /// An access to an array element; indexes start at 1.
    ArrayAccess(String, i64),
    /// A reference to a name, or a call in annotations.
    Ident(Identifier),
}

impl Expression {
    /// Returns a short description of the kind of this expression, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Bool(_) => "Boolean literal",
            Expression::Int(_) => "integer literal",
            Expression::Float(_) => "float literal",
            Expression::Str(_) => "string literal",
            Expression::Set(_) => "set literal",
            Expression::Array(_) => "array literal",
            Expression::ArrayAccess(_, _) => "array access",
            Expression::Ident(i) if i.arguments.is_empty() => "identifier",
            Expression::Ident(_) => "call",
        }
    }

    /// Builds a plain reference to a name.
    pub fn ident(name: &str) -> Self {
        Expression::Ident(Identifier::new(name))
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_list(f: &mut std::fmt::Formatter<'_>, exprs: &[Expression]) -> std::fmt::Result {
            for (i, e) in exprs.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", e)?;
            }
            Ok(())
        }
        match self {
            Expression::Bool(b) => write!(f, "{}", b),
            Expression::Int(i) => write!(f, "{}", i),
            Expression::Float(x) => write!(f, "{}", x),
            Expression::Str(s) => write!(f, "{:?}", s),
            Expression::Set(SetLiteral::Range(low, high)) => write!(f, "{}..{}", low, high),
            Expression::Set(SetLiteral::Values(values)) => write!(
                f,
                "{{{}}}",
                values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Expression::Array(exprs) => {
                write!(f, "[")?;
                write_list(f, exprs)?;
                write!(f, "]")
            }
            Expression::ArrayAccess(name, index) => write!(f, "{}[{}]", name, index),
            Expression::Ident(ident) if ident.arguments.is_empty() => write!(f, "{}", ident.name),
            Expression::Ident(ident) => {
                write!(f, "{}(", ident.name)?;
                write_list(f, &ident.arguments)?;
                write!(f, ")")
            }
        }
    }
}

/// The type of a scalar, or of the elements of an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    /// Booleans.
    Bool,
    /// Integers, with an optional domain.
    Int(Option<SetLiteral>),
    /// Floats.
    Float,
    /// Sets of integers.
    Set,
}

/// The shape of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclShape {
    /// A single value.
    Scalar(BaseType),
    /// An array indexed by `lower..upper`.
    Array {
        /// The lower index.
        lower: i64,
        /// The upper index.
        upper: i64,
        /// The type of the elements.
        element: BaseType,
    },
}

/// A parameter or a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// The declared name.
    pub name: String,
    /// `true` for decision variables, `false` for parameters.
    pub is_var: bool,
    /// The type of the declaration.
    pub shape: DeclShape,
    /// The annotations attached to the declaration.
    pub annotations: Vec<Expression>,
    /// The value the declaration is bound to, if any.
    pub value: Option<Expression>,
}

/// A constraint item.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// The predicate and its arguments.
    pub call: Identifier,
    /// The annotations attached to the constraint.
    pub annotations: Vec<Expression>,
}

impl Constraint {
    /// Builds a constraint without annotations.
    pub fn new(name: &str, arguments: Vec<Expression>) -> Self {
        Self {
            call: Identifier::new_call(name, arguments),
            annotations: vec![],
        }
    }
}

/// The goal of a solve item.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveGoal {
    /// Find any solution.
    Satisfy,
    /// Find a solution minimizing the expression.
    Minimize(Expression),
    /// Find a solution maximizing the expression.
    Maximize(Expression),
}

/// A solve item.
#[derive(Debug, Clone, PartialEq)]
pub struct Solve {
    /// The goal.
    pub goal: SolveGoal,
    /// The search annotations.
    pub annotations: Vec<Expression>,
}

/// A whole FlatZinc model.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// The declarations, in source order.
    pub declarations: Vec<VarDecl>,
    /// The constraints, in source order.
    pub constraints: Vec<Constraint>,
    /// The solve item.
    pub solve: Solve,
}
