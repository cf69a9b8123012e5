//! The ECNF side of the translation: variables, literals and the theory writer.

mod domain;
pub use domain::IntDomain;

mod ecnf_theory;
pub use ecnf_theory::BodyKind;
pub use ecnf_theory::ComparisonOperand;
pub use ecnf_theory::ComparisonOperator;
pub use ecnf_theory::EcnfTheory;

mod id_allocator;
pub use id_allocator::IdAllocator;

mod literals;
pub use literals::Literal;
pub use literals::Variable;
