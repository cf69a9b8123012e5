use super::{
    translator::unexpected, ArgType, ConstraintKind, TranslationError, TranslationResult,
    Translator,
};
use crate::{
    ecnf::{BodyKind, ComparisonOperand, ComparisonOperator, Literal, Variable},
    fzn::{Constraint, Expression},
};
use log::debug;
use std::{str::FromStr, vec::IntoIter};

const DEFINITION_ANNOTATION: &str = "inductivelydefined";

/// A constraint argument, resolved according to its [`ArgType`].
#[derive(Debug, Clone, PartialEq)]
enum Argument {
    Bool(Literal),
    Int(Variable),
    ParInt(i64),
    BoolArray(Vec<Literal>),
    IntArray(Vec<Variable>),
    ParIntArray(Vec<i64>),
}

impl Argument {
    fn type_name(&self) -> &'static str {
        match self {
            Argument::Bool(_) => "Boolean",
            Argument::Int(_) => "integer",
            Argument::ParInt(_) => "integer parameter",
            Argument::BoolArray(_) => "array of Booleans",
            Argument::IntArray(_) => "array of integers",
            Argument::ParIntArray(_) => "array of integer parameters",
        }
    }
}

/// The resolved arguments of a call, consumed in call order by the encodings.
struct Arguments<'a> {
    predicate: &'a str,
    total: usize,
    values: IntoIter<Argument>,
}

macro_rules! take_argument {
    ($fn_name: ident, $variant: ident, $t: ty, $expected: expr) => {
        fn $fn_name(&mut self) -> TranslationResult<$t> {
            match self.values.next() {
                Some(Argument::$variant(v)) => Ok(v),
                Some(other) => Err(TranslationError::UnexpectedExpressionType {
                    expected: $expected,
                    found: format!("{} argument of {}", other.type_name(), self.predicate),
                }),
                None => Err(TranslationError::ArgumentCountMismatch {
                    context: self.predicate.to_string(),
                    expected: self.total + 1,
                    found: self.total,
                }),
            }
        }
    };
}

impl<'a> Arguments<'a> {
    fn new(predicate: &'a str, values: Vec<Argument>) -> Self {
        Self {
            predicate,
            total: values.len(),
            values: values.into_iter(),
        }
    }

    take_argument!(bool, Bool, Literal, "Boolean argument");
    take_argument!(int, Int, Variable, "integer argument");
    take_argument!(par_int, ParInt, i64, "integer parameter argument");
    take_argument!(bool_array, BoolArray, Vec<Literal>, "array of Booleans argument");
    take_argument!(int_array, IntArray, Vec<Variable>, "array of integers argument");
    take_argument!(
        par_int_array,
        ParIntArray,
        Vec<i64>,
        "array of integer parameters argument"
    );

    fn optional_bool(&mut self) -> TranslationResult<Option<Literal>> {
        if self.values.len() == 0 {
            return Ok(None);
        }
        self.bool().map(Some)
    }
}

impl Translator {
    /// Translates a constraint.
    ///
    /// The predicate name must be one of the supported [`ConstraintKind`]s,
    /// and the arguments must match its [signature](ConstraintKind::signature):
    /// each argument is resolved according to its [`ArgType`], in the order they appear in the call.
    ///
    /// If the constraint carries the `inductivelydefined` annotation and its encoding ends with an equivalence,
    /// this equivalence is written as a rule of an inductive definition instead.
    /// When the annotation is repeated, the last one gives the definition id.
    pub fn add_constraint(&mut self, constraint: &Constraint) -> TranslationResult<()> {
        let name = constraint.call.name.as_str();
        debug!("adding constraint {}", name);
        let kind = ConstraintKind::from_str(name)
            .map_err(|_| TranslationError::UnsupportedConstraint(name.to_string()))?;
        if !kind.is_supported() {
            return Err(TranslationError::UnsupportedConstraint(name.to_string()));
        }
        let signature = kind.signature();
        let call_args = &constraint.call.arguments;
        if call_args.len() != signature.len() {
            return Err(TranslationError::ArgumentCountMismatch {
                context: name.to_string(),
                expected: signature.len(),
                found: call_args.len(),
            });
        }
        let definition = if kind.has_definable_head() {
            self.definition_id(&constraint.annotations)?
        } else {
            None
        };
        let resolved = signature
            .iter()
            .zip(call_args.iter())
            .map(|(arg_type, expr)| self.resolve_argument(*arg_type, expr))
            .collect::<TranslationResult<Vec<_>>>()?;
        let mut args = Arguments::new(name, resolved);
        match kind {
            ConstraintKind::ArrayBoolAnd | ConstraintKind::ArrayBoolOr => {
                let body = args.bool_array()?;
                let r = args.bool()?;
                let body_kind = if kind == ConstraintKind::ArrayBoolAnd {
                    BodyKind::Conjunction
                } else {
                    BodyKind::Disjunction
                };
                self.add_head(r, &body, body_kind, definition);
            }
            ConstraintKind::Bool2Int => {
                let a = args.bool()?;
                let i = args.int()?;
                self.theory.add_binary_comparison(
                    a,
                    i,
                    ComparisonOperator::Eq,
                    ComparisonOperand::Constant(1),
                );
            }
            ConstraintKind::BoolAnd => {
                let (a, b, r) = (args.bool()?, args.bool()?, args.bool()?);
                self.add_head(r, &[a, b], BodyKind::Conjunction, definition);
            }
            ConstraintKind::BoolClause => {
                let mut literals = args.bool_array()?;
                let negatives = args.bool_array()?;
                literals.extend(negatives.into_iter().map(Literal::negate));
                self.theory.add_clause(&literals);
            }
            ConstraintKind::BoolEq => {
                let (a, b) = (args.bool()?, args.bool()?);
                self.add_head(a, &[b], BodyKind::Conjunction, definition);
            }
            ConstraintKind::BoolEqReif => {
                let (a, b, r) = (args.bool()?, args.bool()?, args.bool()?);
                let both = self.ids.fresh_id().positive();
                self.theory
                    .add_equivalence(both, &[a, b], BodyKind::Conjunction);
                let none = self.ids.fresh_id().positive();
                self.theory
                    .add_equivalence(none, &[a.negate(), b.negate()], BodyKind::Conjunction);
                self.add_head(r, &[both, none], BodyKind::Disjunction, definition);
            }
            ConstraintKind::BoolLe => {
                let (a, b) = (args.bool()?, args.bool()?);
                self.theory.add_clause(&[a.negate(), b]);
            }
            ConstraintKind::BoolLeReif => {
                let (a, b, r) = (args.bool()?, args.bool()?, args.bool()?);
                self.add_head(r, &[a.negate(), b], BodyKind::Disjunction, definition);
            }
            ConstraintKind::BoolLt => {
                let (a, b) = (args.bool()?, args.bool()?);
                self.theory.add_clause(&[a.negate()]);
                self.theory.add_clause(&[b]);
            }
            ConstraintKind::BoolLtReif => {
                let (a, b, r) = (args.bool()?, args.bool()?, args.bool()?);
                self.add_head(r, &[a.negate(), b], BodyKind::Conjunction, definition);
            }
            ConstraintKind::BoolNot => {
                let (a, b) = (args.bool()?, args.bool()?);
                self.add_head(b, &[a.negate()], BodyKind::Conjunction, definition);
            }
            ConstraintKind::BoolOr => {
                let (a, b, r) = (args.bool()?, args.bool()?, args.bool()?);
                self.add_head(r, &[a, b], BodyKind::Disjunction, definition);
            }
            ConstraintKind::BoolXor => {
                let (a, b, r) = (args.bool()?, args.bool()?, args.bool()?);
                let only_b = self.ids.fresh_id().positive();
                self.theory
                    .add_equivalence(only_b, &[a.negate(), b], BodyKind::Conjunction);
                let only_a = self.ids.fresh_id().positive();
                self.theory
                    .add_equivalence(only_a, &[a, b.negate()], BodyKind::Conjunction);
                self.add_head(r, &[only_b, only_a], BodyKind::Disjunction, definition);
            }
            ConstraintKind::IntEq | ConstraintKind::IntEqReif => {
                self.add_int_comparison(&mut args, ComparisonOperator::Eq)?
            }
            ConstraintKind::IntLe | ConstraintKind::IntLeReif => {
                self.add_int_comparison(&mut args, ComparisonOperator::Le)?
            }
            ConstraintKind::IntLt | ConstraintKind::IntLtReif => {
                self.add_int_comparison(&mut args, ComparisonOperator::Lt)?
            }
            ConstraintKind::IntNe | ConstraintKind::IntNeReif => {
                self.add_int_comparison(&mut args, ComparisonOperator::Ne)?
            }
            ConstraintKind::IntLinEq | ConstraintKind::IntLinEqReif => {
                self.add_linear(&mut args, ComparisonOperator::Eq)?
            }
            ConstraintKind::IntLinLe | ConstraintKind::IntLinLeReif => {
                self.add_linear(&mut args, ComparisonOperator::Le)?
            }
            ConstraintKind::IntLinNe | ConstraintKind::IntLinNeReif => {
                self.add_linear(&mut args, ComparisonOperator::Ne)?
            }
            ConstraintKind::IntPlus => {
                let (a, b, c) = (args.int()?, args.int()?, args.int()?);
                let t = self.theory.unit_true(&mut self.ids);
                self.theory
                    .add_weighted_sum(t, &[a, b, c], &[1, 1, -1], ComparisonOperator::Eq, 0);
            }
            ConstraintKind::IntAbs
            | ConstraintKind::IntDiv
            | ConstraintKind::IntMax
            | ConstraintKind::IntMin
            | ConstraintKind::IntMod
            | ConstraintKind::IntTimes => {
                return Err(TranslationError::UnsupportedConstraint(name.to_string()))
            }
        }
        Ok(())
    }

    fn resolve_argument(
        &mut self,
        arg_type: ArgType,
        expr: &Expression,
    ) -> TranslationResult<Argument> {
        Ok(match arg_type {
            ArgType::Bool => Argument::Bool(self.resolve_bool(expr)?),
            ArgType::Int => Argument::Int(self.resolve_int(expr)?),
            ArgType::ParInt => Argument::ParInt(self.resolve_int_parameter(expr)?),
            ArgType::BoolArray => Argument::BoolArray(self.resolve_bool_array(expr)?),
            ArgType::IntArray => Argument::IntArray(self.resolve_int_array(expr)?),
            ArgType::ParIntArray => Argument::ParIntArray(self.resolve_int_parameter_array(expr)?),
        })
    }

    fn definition_id(&self, annotations: &[Expression]) -> TranslationResult<Option<i64>> {
        let annotation = annotations.iter().rev().find_map(|a| match a {
            Expression::Ident(ident) if ident.name == DEFINITION_ANNOTATION => Some(ident),
            _ => None,
        });
        match annotation.map(|ident| ident.arguments.as_slice()) {
            None => Ok(None),
            Some([]) => Ok(Some(self.options.default_definition_id)),
            Some([Expression::Int(i)]) => Ok(Some(*i)),
            Some([e]) => Err(unexpected("definition id", e)),
            Some(args) => Err(TranslationError::ArgumentCountMismatch {
                context: DEFINITION_ANNOTATION.to_string(),
                expected: 1,
                found: args.len(),
            }),
        }
    }

    fn add_head(
        &mut self,
        head: Literal,
        body: &[Literal],
        kind: BodyKind,
        definition: Option<i64>,
    ) {
        match definition {
            Some(id) => self.theory.add_rule(head, body, kind, id),
            None => self.theory.add_equivalence(head, body, kind),
        }
    }

    fn add_int_comparison(
        &mut self,
        args: &mut Arguments,
        operator: ComparisonOperator,
    ) -> TranslationResult<()> {
        let a = args.int()?;
        let b = args.int()?;
        let control = match args.optional_bool()? {
            Some(r) => r,
            None => self.theory.unit_true(&mut self.ids),
        };
        self.theory
            .add_binary_comparison(control, a, operator, ComparisonOperand::Variable(b));
        Ok(())
    }

    fn add_linear(
        &mut self,
        args: &mut Arguments,
        operator: ComparisonOperator,
    ) -> TranslationResult<()> {
        let weights = args.par_int_array()?;
        let variables = args.int_array()?;
        if weights.len() != variables.len() {
            return Err(TranslationError::ArgumentCountMismatch {
                context: format!("{} variables", args.predicate),
                expected: weights.len(),
                found: variables.len(),
            });
        }
        let constant = args.par_int()?;
        let control = match args.optional_bool()? {
            Some(r) => r,
            None => self.theory.unit_true(&mut self.ids),
        };
        self.theory
            .add_weighted_sum(control, &variables, &weights, operator, constant);
        Ok(())
    }
}
