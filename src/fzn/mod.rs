//! The FlatZinc side of the translation: the model structures and the reader.

mod ast;
pub use ast::BaseType;
pub use ast::Constraint;
pub use ast::DeclShape;
pub use ast::Expression;
pub use ast::Identifier;
pub use ast::Model;
pub use ast::SetLiteral;
pub use ast::Solve;
pub use ast::SolveGoal;
pub use ast::VarDecl;

mod flatzinc_reader;
pub use flatzinc_reader::FlatZincReader;

mod specs;
pub use specs::ModelReader;
pub use specs::WarningHandler;
