//! The translation engine, from a FlatZinc model to an ECNF theory.

mod constraint_encodings;

mod constraint_kind;
pub use constraint_kind::ArgType;
pub use constraint_kind::ConstraintKind;

mod expression_resolver;

mod symbol_table;
pub use symbol_table::RedeclarationPolicy;
pub use symbol_table::SymbolTable;

mod translation_error;
pub use translation_error::TranslationError;
pub use translation_error::TranslationResult;

mod translator;
pub use translator::TranslationOptions;
pub use translator::Translator;

mod variables;
pub use variables::BoolBinding;
pub use variables::BoolVar;
pub use variables::IntBinding;
pub use variables::IntVar;
pub use variables::VarArray;
