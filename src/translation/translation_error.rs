use thiserror::Error;

/// The errors raised while translating a FlatZinc model into an ECNF theory.
///
/// Each of these errors aborts the translation; no theory should be written after one of them was raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// A name (or an array element, written `name[index]`) was used before being declared.
    #[error("undeclared variable: {0}")]
    UndeclaredVariable(String),
    /// A predicate has no encoding.
    #[error("unsupported constraint: {0}")]
    UnsupportedConstraint(String),
    /// A call or an array got a wrong number of arguments or elements.
    #[error("{context}: expected {expected} argument(s), found {found}")]
    ArgumentCountMismatch {
        /// What was being translated.
        context: String,
        /// The expected count.
        expected: usize,
        /// The actual count.
        found: usize,
    },
    /// An expression of an unexpected kind was met.
    #[error("expected {expected}, found {found}")]
    UnexpectedExpressionType {
        /// The kind of expression that was expected.
        expected: &'static str,
        /// The expression that was found.
        found: String,
    },
    /// A declaration cannot be translated.
    #[error("invalid declaration of {name}: {reason}")]
    InvalidDeclaration {
        /// The declared name.
        name: String,
        /// The cause.
        reason: String,
    },
}

/// A shortcut for results of translation functions.
pub type TranslationResult<T> = std::result::Result<T, TranslationError>;
