use super::{IdAllocator, IntDomain, Literal, Variable};
use anyhow::{Context, Result};
use std::{fmt, io::Write};
use strum_macros::Display;

const HEADER: &str = "p ecnf";

const COMMENT: &str = "c Automated transformation from a flatzinc model into ECNF.";

const DEFAULT_BUFFER_CAP: usize = 1 << 16;

/// The way the body of an equivalence or a rule is combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BodyKind {
    /// The body is the conjunction of its literals.
    #[strum(serialize = "C")]
    Conjunction,
    /// The body is the disjunction of its literals.
    #[strum(serialize = "D")]
    Disjunction,
}

/// The comparison operators available in binary comparisons and weighted sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ComparisonOperator {
    /// Equality.
    #[strum(serialize = "=")]
    Eq,
    /// Lower or equal.
    #[strum(serialize = "=<")]
    Le,
    /// Strictly lower.
    #[strum(serialize = "<")]
    Lt,
    /// Difference.
    #[strum(serialize = "~=")]
    Ne,
}

/// The right-hand side of a binary comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperand {
    /// An integer variable (`BINTRT` lines).
    Variable(Variable),
    /// An integer constant (`BINTRI` lines).
    Constant(i64),
}

/// An ECNF theory under construction.
///
/// The theory is made of two buffers.
/// The first one receives the variable declarations (and the unit clauses fixing the auxiliary constants),
/// while the second one receives the clauses, equivalences, rules and other constraints.
/// When the theory is written, the header comes first, followed by the declarations and then the theory body,
/// so that every variable is declared before its first use.
///
/// # Example
///
/// ```
/// # use fzn2ecnf::ecnf::{BodyKind, EcnfTheory, IdAllocator};
/// let mut ids = IdAllocator::default();
/// let mut theory = EcnfTheory::default();
/// let a = ids.fresh_id();
/// let b = ids.fresh_id();
/// let t = theory.unit_true(&mut ids);
/// theory.add_equivalence(t, &[a.positive(), b.negative()], BodyKind::Conjunction);
/// let mut out = Vec::new();
/// theory.write(&mut out, false).unwrap();
/// assert_eq!("p ecnf\n3 0\nEQUIV C 3 1 -2 0\n", String::from_utf8(out).unwrap());
/// ```
pub struct EcnfTheory {
    declarations: String,
    n_declarations: usize,
    body: String,
    n_body_lines: usize,
}

impl Default for EcnfTheory {
    fn default() -> Self {
        Self {
            declarations: String::with_capacity(DEFAULT_BUFFER_CAP),
            n_declarations: 0,
            body: String::with_capacity(DEFAULT_BUFFER_CAP),
            n_body_lines: 0,
        }
    }
}

fn spaced<T>(items: &[T]) -> String
where
    T: fmt::Display,
{
    items.iter().fold(String::new(), |mut acc, i| {
        acc.push_str(&i.to_string());
        acc.push(' ');
        acc
    })
}

impl EcnfTheory {
    fn push_declaration(&mut self, line: String) {
        self.declarations.push_str(&line);
        self.n_declarations += 1;
    }

    fn push_body_line(&mut self, line: String) {
        self.body.push_str(&line);
        self.n_body_lines += 1;
    }

    /// Allocates a fresh variable and forces it to true.
    ///
    /// The returned literal can be used anywhere the constant "true" is needed.
    pub fn unit_true(&mut self, ids: &mut IdAllocator) -> Literal {
        let var = ids.fresh_id();
        self.push_declaration(format!("{} 0\n", var.positive()));
        var.positive()
    }

    /// Allocates a fresh variable and forces it to false.
    ///
    /// The returned literal is the positive literal of the variable, which is false in every model.
    pub fn unit_false(&mut self, ids: &mut IdAllocator) -> Literal {
        let var = ids.fresh_id();
        self.push_declaration(format!("{} 0\n", var.negative()));
        var.positive()
    }

    /// Declares an integer variable and its domain.
    pub fn declare_int_var(&mut self, var: Variable, domain: &IntDomain) {
        let line = match domain {
            IntDomain::Range(low, high) => format!("INTVAR {} {} {} 0\n", var, low, high),
            IntDomain::Values(values) => format!("INTVARDOM {} {}0\n", var, spaced(values)),
        };
        self.push_declaration(line);
    }

    /// Adds a clause (a disjunction of literals).
    pub fn add_clause(&mut self, literals: &[Literal]) {
        self.push_body_line(format!("{}0\n", spaced(literals)));
    }

    /// Adds an equivalence between a literal and the conjunction or the disjunction of other literals.
    pub fn add_equivalence(&mut self, head: Literal, body: &[Literal], kind: BodyKind) {
        self.push_body_line(format!("EQUIV {} {} {}0\n", kind, head, spaced(body)));
    }

    /// Adds a rule of an inductive definition.
    ///
    /// The rule belongs to the definition identified by `definition_id`.
    pub fn add_rule(&mut self, head: Literal, body: &[Literal], kind: BodyKind, definition_id: i64) {
        self.push_body_line(format!(
            "{} | {} {} {}0\n",
            kind,
            definition_id,
            head,
            spaced(body)
        ));
    }

    /// Adds a comparison between an integer variable and another variable or a constant.
    ///
    /// The control literal is equivalent to the satisfaction of the comparison.
    pub fn add_binary_comparison(
        &mut self,
        control: Literal,
        left: Variable,
        operator: ComparisonOperator,
        right: ComparisonOperand,
    ) {
        let line = match right {
            ComparisonOperand::Variable(v) => {
                format!("BINTRT {} {} {} {} 0\n", control, left, operator, v)
            }
            ComparisonOperand::Constant(c) => {
                format!("BINTRI {} {} {} {} 0\n", control, left, operator, c)
            }
        };
        self.push_body_line(line);
    }

    /// Adds a comparison between a weighted sum of integer variables and a constant.
    ///
    /// The control literal is equivalent to the satisfaction of the comparison.
    /// The slices of variables and weights are expected to have the same length.
    pub fn add_weighted_sum(
        &mut self,
        control: Literal,
        variables: &[Variable],
        weights: &[i64],
        operator: ComparisonOperator,
        constant: i64,
    ) {
        debug_assert_eq!(variables.len(), weights.len());
        self.push_body_line(format!(
            "SUMSTSIRI {} {}| {}{} {} 0\n",
            control,
            spaced(variables),
            spaced(weights),
            operator,
            constant
        ));
    }

    /// Adds the ordered list of literals the solver must optimize over.
    pub fn add_optimization_list(&mut self, literals: &[Literal]) {
        self.push_body_line(format!("Mnmlist {}0\n", spaced(literals)));
    }

    /// Returns the number of lines in the declaration part.
    pub fn n_declarations(&self) -> usize {
        self.n_declarations
    }

    /// Returns the number of lines in the theory body.
    pub fn n_body_lines(&self) -> usize {
        self.n_body_lines
    }

    /// Writes the theory: header, declarations, then the body.
    ///
    /// If `with_comment` is set, a comment line is written before the header.
    pub fn write(&self, writer: &mut dyn Write, with_comment: bool) -> Result<()> {
        let context = "while writing the ECNF theory";
        if with_comment {
            writeln!(writer, "{}", COMMENT).context(context)?;
        }
        writeln!(writer, "{}", HEADER).context(context)?;
        writer
            .write_all(self.declarations.as_bytes())
            .context(context)?;
        writer.write_all(self.body.as_bytes()).context(context)?;
        writer.flush().context(context)
    }
}
