use super::{
    BoolBinding, IntBinding, IntVar, RedeclarationPolicy, SymbolTable, TranslationError,
    TranslationResult,
};
use crate::{
    ecnf::{
        BodyKind, ComparisonOperand, ComparisonOperator, EcnfTheory, IdAllocator, IntDomain,
        Literal, Variable,
    },
    fzn::{BaseType, DeclShape, Expression, Model, Solve, SolveGoal, VarDecl},
};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::Write;

/// The options of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationOptions {
    /// The behavior to adopt when a name is declared twice.
    pub redeclaration: RedeclarationPolicy,
    /// The definition group of rules coming from an `inductivelydefined` annotation without argument.
    pub default_definition_id: i64,
    /// Whether a comment line is written before the theory header.
    pub with_comment: bool,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            redeclaration: RedeclarationPolicy::default(),
            default_definition_id: 0,
            with_comment: true,
        }
    }
}

/// The translation engine from FlatZinc to ECNF.
///
/// The model is given item by item, in source order: declarations first, then constraints, then the solve goal.
/// Each item is translated as soon as it is given; the theory is written at the end by [`write`](Self::write).
///
/// # Example
///
/// ```
/// # use fzn2ecnf::fzn::{FlatZincReader, ModelReader};
/// # use fzn2ecnf::translation::{TranslationOptions, Translator};
/// let model = FlatZincReader::default()
///     .read(&mut "var bool: a;\nvar bool: b;\nconstraint bool_eq(a, b);\nsolve satisfy;\n".as_bytes())
///     .unwrap();
/// let mut translator = Translator::new(TranslationOptions {
///     with_comment: false,
///     ..Default::default()
/// });
/// translator.translate_model(&model).unwrap();
/// let mut out = Vec::new();
/// translator.write(&mut out).unwrap();
/// assert_eq!("p ecnf\nEQUIV C 1 2 0\n", String::from_utf8(out).unwrap());
/// ```
pub struct Translator {
    pub(super) ids: IdAllocator,
    pub(super) symbols: SymbolTable,
    pub(super) theory: EcnfTheory,
    pub(super) options: TranslationOptions,
    solve_seen: bool,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslationOptions::default())
    }
}

fn unsupported_type(name: &str, type_name: &str) -> TranslationError {
    TranslationError::InvalidDeclaration {
        name: name.to_string(),
        reason: format!("{} variables are not supported", type_name),
    }
}

// Binding to a fixed record copies its value.
fn bound_to(var: &IntVar) -> (IntBinding, IntDomain) {
    let binding = match var.fixed_value() {
        Some(v) => IntBinding::Value(v),
        None => IntBinding::Alias(var.id()),
    };
    (binding, var.domain().clone())
}

impl Translator {
    /// Builds a new translator.
    pub fn new(options: TranslationOptions) -> Self {
        Self {
            ids: IdAllocator::default(),
            symbols: SymbolTable::new(options.redeclaration),
            theory: EcnfTheory::default(),
            options,
            solve_seen: false,
        }
    }

    /// Returns the symbol table filled by the declarations.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Returns the theory built so far.
    pub fn theory(&self) -> &EcnfTheory {
        &self.theory
    }

    /// Returns the number of ids allocated so far.
    pub fn n_ids(&self) -> usize {
        self.ids.n_allocated()
    }

    /// Translates a whole model: the declarations, the constraints, then the solve item.
    pub fn translate_model(&mut self, model: &Model) -> Result<()> {
        for decl in model.declarations.iter() {
            self.declare_variable(decl)
                .with_context(|| format!(r#"while translating the declaration of "{}""#, decl.name))?;
        }
        for constraint in model.constraints.iter() {
            self.add_constraint(constraint).with_context(|| {
                format!(
                    r#"while translating the constraint "{}""#,
                    Expression::Ident(constraint.call.clone())
                )
            })?;
        }
        self.set_solve_goal(&model.solve)
            .context("while translating the solve item")?;
        info!(
            "translated {} declarations and {} constraints into {} ids, {} declaration lines and {} theory lines",
            model.declarations.len(),
            model.constraints.len(),
            self.ids.n_allocated(),
            self.theory.n_declarations(),
            self.theory.n_body_lines()
        );
        Ok(())
    }

    /// Writes the theory.
    pub fn write(&self, writer: &mut dyn Write) -> Result<()> {
        self.theory.write(writer, self.options.with_comment)
    }

    /// Translates a parameter or a variable declaration.
    ///
    /// Boolean and integer scalars and arrays are supported.
    /// Arrays must be indexed by `1..n`.
    /// Float and set parameters are ignored, while float and set variables are errors.
    pub fn declare_variable(&mut self, decl: &VarDecl) -> TranslationResult<()> {
        debug!("declaring {}", decl.name);
        match &decl.shape {
            DeclShape::Scalar(BaseType::Bool) => self.declare_bool(decl),
            DeclShape::Scalar(BaseType::Int(domain)) => {
                self.declare_int(decl, domain.as_ref().map(IntDomain::from))
            }
            DeclShape::Array {
                lower,
                upper,
                element,
            } => {
                if *lower != 1 || *upper < 0 {
                    return Err(TranslationError::InvalidDeclaration {
                        name: decl.name.clone(),
                        reason: format!("array index set must be 1..n, got {}..{}", lower, upper),
                    });
                }
                match element {
                    BaseType::Bool => self.declare_bool_array(decl, *upper as usize),
                    BaseType::Int(domain) => self.declare_int_array(
                        decl,
                        *upper as usize,
                        domain.as_ref().map(IntDomain::from),
                    ),
                    BaseType::Float => self.ignore_parameter(decl, "float"),
                    BaseType::Set => self.ignore_parameter(decl, "set"),
                }
            }
            DeclShape::Scalar(BaseType::Float) => self.ignore_parameter(decl, "float"),
            DeclShape::Scalar(BaseType::Set) => self.ignore_parameter(decl, "set"),
        }
    }

    fn ignore_parameter(&self, decl: &VarDecl, type_name: &str) -> TranslationResult<()> {
        if decl.is_var {
            return Err(unsupported_type(&decl.name, type_name));
        }
        warn!("ignoring {} parameter {}", type_name, decl.name);
        Ok(())
    }

    fn bool_binding(&self, expr: &Expression) -> TranslationResult<BoolBinding> {
        match expr {
            Expression::Bool(b) => Ok(BoolBinding::Value(*b)),
            Expression::ArrayAccess(name, index) => Ok(BoolBinding::Alias(
                self.symbols.lookup_bool_at(name, *index)?.id(),
            )),
            Expression::Ident(ident) if ident.arguments.is_empty() => Ok(BoolBinding::Alias(
                self.symbols.lookup_bool(&ident.name)?.id(),
            )),
            _ => Err(unexpected("Boolean value", expr)),
        }
    }

    fn int_binding(&self, expr: &Expression) -> TranslationResult<(IntBinding, IntDomain)> {
        match expr {
            Expression::Int(i) => Ok((IntBinding::Value(*i), IntDomain::singleton(*i))),
            Expression::ArrayAccess(name, index) => {
                Ok(bound_to(self.symbols.lookup_int_at(name, *index)?))
            }
            Expression::Ident(ident) if ident.arguments.is_empty() => {
                Ok(bound_to(self.symbols.lookup_int(&ident.name)?))
            }
            _ => Err(unexpected("integer value", expr)),
        }
    }

    fn array_initializer(
        &self,
        decl: &VarDecl,
        n: usize,
    ) -> TranslationResult<Option<Vec<Expression>>> {
        let elements = match &decl.value {
            None => return Ok(None),
            Some(Expression::Array(elements)) => elements.clone(),
            Some(Expression::Ident(ident)) if ident.arguments.is_empty() => {
                let len = match &decl.shape {
                    DeclShape::Array {
                        element: BaseType::Bool,
                        ..
                    } => self.symbols.lookup_bool_array(&ident.name)?.len(),
                    _ => self.symbols.lookup_int_array(&ident.name)?.len(),
                };
                (1..=len as i64)
                    .map(|i| Expression::ArrayAccess(ident.name.clone(), i))
                    .collect()
            }
            Some(e) => return Err(unexpected("array", e)),
        };
        if elements.len() != n {
            return Err(TranslationError::InvalidDeclaration {
                name: decl.name.clone(),
                reason: format!("expected {} initial value(s), found {}", n, elements.len()),
            });
        }
        Ok(Some(elements))
    }

    fn write_bool_binding(&mut self, var: Variable, binding: BoolBinding) {
        match binding {
            BoolBinding::Free => {}
            BoolBinding::Value(true) => self.theory.add_clause(&[var.positive()]),
            BoolBinding::Value(false) => self.theory.add_clause(&[var.negative()]),
            BoolBinding::Alias(other) => self.theory.add_equivalence(
                var.positive(),
                &[other.positive()],
                BodyKind::Conjunction,
            ),
        }
    }

    fn write_int_binding(&mut self, var: Variable, binding: IntBinding) {
        let right = match binding {
            IntBinding::Free => return,
            IntBinding::Value(i) => ComparisonOperand::Constant(i),
            IntBinding::Alias(other) => ComparisonOperand::Variable(other),
        };
        let t = self.theory.unit_true(&mut self.ids);
        self.theory
            .add_binary_comparison(t, var, ComparisonOperator::Eq, right);
    }

    fn declare_bool(&mut self, decl: &VarDecl) -> TranslationResult<()> {
        let binding = match &decl.value {
            Some(e) => self.bool_binding(e)?,
            None => BoolBinding::Free,
        };
        let var = self.symbols.declare_bool(&decl.name, &mut self.ids)?;
        var.bind(binding);
        let id = var.id();
        self.write_bool_binding(id, binding);
        Ok(())
    }

    fn declare_int(&mut self, decl: &VarDecl, domain: Option<IntDomain>) -> TranslationResult<()> {
        let (binding, domain) = match (&decl.value, domain) {
            (Some(e), d) => {
                let (binding, bound_domain) = self.int_binding(e)?;
                (binding, d.unwrap_or(bound_domain))
            }
            (None, Some(d)) => (IntBinding::Free, d),
            (None, None) => {
                return Err(TranslationError::InvalidDeclaration {
                    name: decl.name.clone(),
                    reason: "integer variable without domain nor initializer".to_string(),
                })
            }
        };
        let var = self
            .symbols
            .declare_int(&decl.name, domain.clone(), &mut self.ids)?;
        var.bind(binding);
        let id = var.id();
        self.theory.declare_int_var(id, &domain);
        self.write_int_binding(id, binding);
        Ok(())
    }

    fn declare_bool_array(&mut self, decl: &VarDecl, n: usize) -> TranslationResult<()> {
        let bindings = match self.array_initializer(decl, n)? {
            Some(elements) => elements
                .iter()
                .map(|e| self.bool_binding(e))
                .collect::<TranslationResult<Vec<_>>>()?,
            None => vec![BoolBinding::Free; n],
        };
        let array = self
            .symbols
            .declare_bool_array(&decl.name, n, &mut self.ids)?;
        let mut ids = Vec::with_capacity(n);
        for (i, binding) in bindings.iter().enumerate() {
            if let Some(var) = array.get_mut(i as i64 + 1) {
                var.bind(*binding);
                ids.push(var.id());
            }
        }
        for (id, binding) in ids.into_iter().zip(bindings) {
            self.write_bool_binding(id, binding);
        }
        Ok(())
    }

    fn declare_int_array(
        &mut self,
        decl: &VarDecl,
        n: usize,
        domain: Option<IntDomain>,
    ) -> TranslationResult<()> {
        let (bindings, domains) = match (self.array_initializer(decl, n)?, domain) {
            (Some(elements), d) => {
                let mut bindings = Vec::with_capacity(n);
                let mut domains = Vec::with_capacity(n);
                for e in elements.iter() {
                    let (binding, bound_domain) = self.int_binding(e)?;
                    bindings.push(binding);
                    domains.push(d.clone().unwrap_or(bound_domain));
                }
                (bindings, domains)
            }
            (None, Some(d)) => (vec![IntBinding::Free; n], vec![d; n]),
            (None, None) => {
                return Err(TranslationError::InvalidDeclaration {
                    name: decl.name.clone(),
                    reason: "integer array without domain nor initializer".to_string(),
                })
            }
        };
        let array = self
            .symbols
            .declare_int_array(&decl.name, domains.clone(), &mut self.ids)?;
        let mut ids = Vec::with_capacity(n);
        for (i, binding) in bindings.iter().enumerate() {
            if let Some(var) = array.get_mut(i as i64 + 1) {
                var.bind(*binding);
                ids.push(var.id());
            }
        }
        for ((id, binding), domain) in ids.into_iter().zip(bindings).zip(domains.iter()) {
            self.theory.declare_int_var(id, domain);
            self.write_int_binding(id, binding);
        }
        Ok(())
    }

    /// Translates the solve item.
    ///
    /// Satisfaction problems produce no output.
    /// For optimization problems, the domain of the objective variable is order-encoded (one literal per value `v`, equivalent to `obj =< v`),
    /// and the list of these literals is given to the solver, in ascending order for minimization and in descending order for maximization.
    pub fn set_solve_goal(&mut self, solve: &Solve) -> TranslationResult<()> {
        if self.solve_seen {
            return Err(TranslationError::InvalidDeclaration {
                name: "solve".to_string(),
                reason: "multiple solve items".to_string(),
            });
        }
        self.solve_seen = true;
        let (objective, maximize) = match &solve.goal {
            SolveGoal::Satisfy => {
                debug!("satisfaction problem");
                return Ok(());
            }
            SolveGoal::Minimize(e) => (e, false),
            SolveGoal::Maximize(e) => (e, true),
        };
        debug!(
            "{} {}",
            if maximize { "maximizing" } else { "minimizing" },
            objective
        );
        let var = match objective {
            Expression::ArrayAccess(name, index) => self.symbols.lookup_int_at(name, *index)?,
            Expression::Ident(ident) if ident.arguments.is_empty() => {
                self.symbols.lookup_int(&ident.name)?
            }
            _ => return Err(unexpected("integer variable", objective)),
        };
        let (obj, domain) = (var.id(), var.domain().clone());
        let mut controls: Vec<Literal> = Vec::new();
        for v in domain.values() {
            let control = self.ids.fresh_id().positive();
            self.theory.add_binary_comparison(
                control,
                obj,
                ComparisonOperator::Le,
                ComparisonOperand::Constant(v),
            );
            controls.push(control);
        }
        if maximize {
            controls.reverse();
        }
        self.theory.add_optimization_list(&controls);
        Ok(())
    }
}

pub(super) fn unexpected(expected: &'static str, found: &Expression) -> TranslationError {
    TranslationError::UnexpectedExpressionType {
        expected,
        found: format!(r#"{} "{}""#, found.kind_name(), found),
    }
}
