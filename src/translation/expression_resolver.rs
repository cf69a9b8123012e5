use super::{translator::unexpected, TranslationError, TranslationResult, Translator};
use crate::{
    ecnf::{IntDomain, Literal, Variable},
    fzn::Expression,
};

impl Translator {
    /// Resolves an expression standing for a Boolean.
    ///
    /// Constants are replaced by fresh literals forced to their value.
    pub fn resolve_bool(&mut self, expr: &Expression) -> TranslationResult<Literal> {
        match expr {
            Expression::Bool(true) => Ok(self.theory.unit_true(&mut self.ids)),
            Expression::Bool(false) => Ok(self.theory.unit_false(&mut self.ids)),
            Expression::ArrayAccess(name, index) => {
                Ok(self.symbols.lookup_bool_at(name, *index)?.id().positive())
            }
            Expression::Ident(ident) if ident.arguments.is_empty() => {
                Ok(self.symbols.lookup_bool(&ident.name)?.id().positive())
            }
            _ => Err(unexpected("Boolean expression", expr)),
        }
    }

    /// Resolves an expression standing for an integer variable.
    ///
    /// Constants are replaced by fresh variables with a single value in their domain.
    pub fn resolve_int(&mut self, expr: &Expression) -> TranslationResult<Variable> {
        match expr {
            Expression::Int(i) => {
                let var = self.ids.fresh_id();
                self.theory.declare_int_var(var, &IntDomain::singleton(*i));
                Ok(var)
            }
            Expression::ArrayAccess(name, index) => {
                Ok(self.symbols.lookup_int_at(name, *index)?.id())
            }
            Expression::Ident(ident) if ident.arguments.is_empty() => {
                Ok(self.symbols.lookup_int(&ident.name)?.id())
            }
            _ => Err(unexpected("integer expression", expr)),
        }
    }

    /// Resolves an expression standing for an integer parameter.
    ///
    /// Integer constants and references to fixed integers give their value.
    /// References to other integers give the id of the variable, to be interpreted by the solver.
    pub fn resolve_int_parameter(&self, expr: &Expression) -> TranslationResult<i64> {
        let var = match expr {
            Expression::Int(i) => return Ok(*i),
            Expression::ArrayAccess(name, index) => self.symbols.lookup_int_at(name, *index)?,
            Expression::Ident(ident) if ident.arguments.is_empty() => {
                self.symbols.lookup_int(&ident.name)?
            }
            _ => return Err(unexpected("integer parameter", expr)),
        };
        Ok(var
            .fixed_value()
            .unwrap_or_else(|| var.id().as_parameter()))
    }

    /// Resolves an array of Booleans, given as an array literal or by the name of a declared array.
    pub fn resolve_bool_array(&mut self, expr: &Expression) -> TranslationResult<Vec<Literal>> {
        match expr {
            Expression::Array(elements) => elements.iter().map(|e| self.resolve_bool(e)).collect(),
            Expression::Ident(ident) if ident.arguments.is_empty() => Ok(self
                .symbols
                .lookup_bool_array(&ident.name)?
                .iter()
                .map(|v| v.id().positive())
                .collect()),
            _ => Err(unexpected("array of Booleans", expr)),
        }
    }

    /// Resolves an array of integer variables, given as an array literal or by the name of a declared array.
    pub fn resolve_int_array(&mut self, expr: &Expression) -> TranslationResult<Vec<Variable>> {
        match expr {
            Expression::Array(elements) => elements.iter().map(|e| self.resolve_int(e)).collect(),
            Expression::Ident(ident) if ident.arguments.is_empty() => Ok(self
                .symbols
                .lookup_int_array(&ident.name)?
                .iter()
                .map(|v| v.id())
                .collect()),
            _ => Err(unexpected("array of integers", expr)),
        }
    }

    /// Resolves an array of integer parameters, given as an array literal or by the name of a declared array.
    ///
    /// Named arrays must only contain fixed integers.
    pub fn resolve_int_parameter_array(&self, expr: &Expression) -> TranslationResult<Vec<i64>> {
        match expr {
            Expression::Array(elements) => elements
                .iter()
                .map(|e| self.resolve_int_parameter(e))
                .collect(),
            Expression::Ident(ident) if ident.arguments.is_empty() => self
                .symbols
                .lookup_int_array(&ident.name)?
                .iter()
                .map(|v| {
                    v.fixed_value()
                        .ok_or_else(|| TranslationError::UnexpectedExpressionType {
                            expected: "array of fixed integers",
                            found: format!(r#"identifier "{}""#, ident.name),
                        })
                })
                .collect(),
            _ => Err(unexpected("array of integer parameters", expr)),
        }
    }
}
