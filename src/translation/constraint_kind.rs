use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The type expected for an argument of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A Boolean variable or constant.
    Bool,
    /// An integer variable or constant.
    Int,
    /// An integer constant (or a variable standing for it).
    ParInt,
    /// An array of Booleans.
    BoolArray,
    /// An array of integers.
    IntArray,
    /// An array of integer constants.
    ParIntArray,
}

/// The FlatZinc predicates known by the translator.
///
/// Predicate names are matched exactly.
/// Some known predicates have no encoding yet; see [`is_supported`](Self::is_supported).
///
/// ```
/// # use fzn2ecnf::translation::ConstraintKind;
/// # use std::str::FromStr;
/// assert_eq!(ConstraintKind::IntLinLe, ConstraintKind::from_str("int_lin_le").unwrap());
/// assert!(ConstraintKind::from_str("int_lin_ge").is_err());
/// assert!(!ConstraintKind::IntTimes.is_supported());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[allow(missing_docs)]
pub enum ConstraintKind {
    #[strum(serialize = "array_bool_and")]
    ArrayBoolAnd,
    #[strum(serialize = "array_bool_or")]
    ArrayBoolOr,
    #[strum(serialize = "bool2int")]
    Bool2Int,
    #[strum(serialize = "bool_and")]
    BoolAnd,
    #[strum(serialize = "bool_clause")]
    BoolClause,
    #[strum(serialize = "bool_eq")]
    BoolEq,
    #[strum(serialize = "bool_eq_reif")]
    BoolEqReif,
    #[strum(serialize = "bool_le")]
    BoolLe,
    #[strum(serialize = "bool_le_reif")]
    BoolLeReif,
    #[strum(serialize = "bool_lt")]
    BoolLt,
    #[strum(serialize = "bool_lt_reif")]
    BoolLtReif,
    #[strum(serialize = "bool_not")]
    BoolNot,
    #[strum(serialize = "bool_or")]
    BoolOr,
    #[strum(serialize = "bool_xor")]
    BoolXor,
    #[strum(serialize = "int_abs")]
    IntAbs,
    #[strum(serialize = "int_div")]
    IntDiv,
    #[strum(serialize = "int_eq")]
    IntEq,
    #[strum(serialize = "int_eq_reif")]
    IntEqReif,
    #[strum(serialize = "int_le")]
    IntLe,
    #[strum(serialize = "int_le_reif")]
    IntLeReif,
    #[strum(serialize = "int_lin_eq")]
    IntLinEq,
    #[strum(serialize = "int_lin_eq_reif")]
    IntLinEqReif,
    #[strum(serialize = "int_lin_le")]
    IntLinLe,
    #[strum(serialize = "int_lin_le_reif")]
    IntLinLeReif,
    #[strum(serialize = "int_lin_ne")]
    IntLinNe,
    #[strum(serialize = "int_lin_ne_reif")]
    IntLinNeReif,
    #[strum(serialize = "int_lt")]
    IntLt,
    #[strum(serialize = "int_lt_reif")]
    IntLtReif,
    #[strum(serialize = "int_max")]
    IntMax,
    #[strum(serialize = "int_min")]
    IntMin,
    #[strum(serialize = "int_mod")]
    IntMod,
    #[strum(serialize = "int_ne")]
    IntNe,
    #[strum(serialize = "int_ne_reif")]
    IntNeReif,
    #[strum(serialize = "int_plus")]
    IntPlus,
    #[strum(serialize = "int_times")]
    IntTimes,
}

impl ConstraintKind {
    /// Returns `true` iff the predicate has an encoding.
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            ConstraintKind::IntAbs
                | ConstraintKind::IntDiv
                | ConstraintKind::IntMax
                | ConstraintKind::IntMin
                | ConstraintKind::IntMod
                | ConstraintKind::IntTimes
        )
    }

    /// Returns the types of the arguments, in the order they appear in the FlatZinc call.
    pub fn signature(&self) -> &'static [ArgType] {
        use ArgType::*;
        match self {
            ConstraintKind::ArrayBoolAnd | ConstraintKind::ArrayBoolOr => &[BoolArray, Bool],
            ConstraintKind::Bool2Int => &[Bool, Int],
            ConstraintKind::BoolClause => &[BoolArray, BoolArray],
            ConstraintKind::BoolEq
            | ConstraintKind::BoolLe
            | ConstraintKind::BoolLt
            | ConstraintKind::BoolNot => &[Bool, Bool],
            ConstraintKind::BoolAnd
            | ConstraintKind::BoolEqReif
            | ConstraintKind::BoolLeReif
            | ConstraintKind::BoolLtReif
            | ConstraintKind::BoolOr
            | ConstraintKind::BoolXor => &[Bool, Bool, Bool],
            ConstraintKind::IntAbs
            | ConstraintKind::IntEq
            | ConstraintKind::IntLe
            | ConstraintKind::IntLt
            | ConstraintKind::IntNe => &[Int, Int],
            ConstraintKind::IntEqReif
            | ConstraintKind::IntLeReif
            | ConstraintKind::IntLtReif
            | ConstraintKind::IntNeReif => &[Int, Int, Bool],
            ConstraintKind::IntLinEq | ConstraintKind::IntLinLe | ConstraintKind::IntLinNe => {
                &[ParIntArray, IntArray, ParInt]
            }
            ConstraintKind::IntLinEqReif
            | ConstraintKind::IntLinLeReif
            | ConstraintKind::IntLinNeReif => &[ParIntArray, IntArray, ParInt, Bool],
            ConstraintKind::IntDiv
            | ConstraintKind::IntMax
            | ConstraintKind::IntMin
            | ConstraintKind::IntMod
            | ConstraintKind::IntPlus
            | ConstraintKind::IntTimes => &[Int, Int, Int],
        }
    }

    /// Returns `true` iff the encoding ends with an equivalence whose head may be turned into a definitional rule.
    pub fn has_definable_head(&self) -> bool {
        matches!(
            self,
            ConstraintKind::ArrayBoolAnd
                | ConstraintKind::ArrayBoolOr
                | ConstraintKind::BoolAnd
                | ConstraintKind::BoolEq
                | ConstraintKind::BoolEqReif
                | ConstraintKind::BoolLeReif
                | ConstraintKind::BoolLtReif
                | ConstraintKind::BoolNot
                | ConstraintKind::BoolOr
                | ConstraintKind::BoolXor
        )
    }

    /// Iterates over the predicates having an encoding, in alphabetical order.
    pub fn iter_supported() -> impl Iterator<Item = ConstraintKind> {
        ConstraintKind::iter().filter(|k| k.is_supported())
    }
}
