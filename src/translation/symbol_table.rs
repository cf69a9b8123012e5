use super::{BoolVar, IntVar, TranslationError, TranslationResult, VarArray};
use crate::ecnf::{IdAllocator, IntDomain};
use std::{
    collections::{hash_map::Entry, HashMap},
    str::FromStr,
};

/// The behavior to adopt when a name is declared twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedeclarationPolicy {
    /// Redeclarations are errors.
    #[default]
    Strict,
    /// The last declaration replaces the previous ones.
    Lenient,
}

impl FromStr for RedeclarationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(RedeclarationPolicy::Strict),
            "lenient" => Ok(RedeclarationPolicy::Lenient),
            _ => Err(anyhow::anyhow!(r#"unknown redeclaration policy "{}""#, s)),
        }
    }
}

/// The declared variables, by name.
///
/// Scalar Booleans, scalar integers, arrays of Booleans and arrays of integers live in four different maps.
/// Each declaration allocates fresh ids for the declared variables.
///
/// # Example
///
/// ```
/// # use fzn2ecnf::ecnf::IdAllocator;
/// # use fzn2ecnf::translation::{RedeclarationPolicy, SymbolTable};
/// let mut ids = IdAllocator::default();
/// let mut symbols = SymbolTable::new(RedeclarationPolicy::Strict);
/// symbols.declare_bool("b", &mut ids).unwrap();
/// symbols.declare_bool_array("bs", 2, &mut ids).unwrap();
/// assert_eq!(3, usize::from(symbols.lookup_bool_at("bs", 2).unwrap().id()));
/// assert!(symbols.lookup_bool_at("bs", 3).is_err());
/// ```
#[derive(Debug, Default)]
pub struct SymbolTable {
    policy: RedeclarationPolicy,
    bools: HashMap<String, BoolVar>,
    ints: HashMap<String, IntVar>,
    bool_arrays: HashMap<String, VarArray<BoolVar>>,
    int_arrays: HashMap<String, VarArray<IntVar>>,
}

fn insert<'a, T>(map: &'a mut HashMap<String, T>, name: &str, value: T) -> &'a mut T {
    match map.entry(name.to_string()) {
        Entry::Occupied(mut e) => {
            e.insert(value);
            e.into_mut()
        }
        Entry::Vacant(e) => e.insert(value),
    }
}

fn undeclared_element(name: &str, index: i64) -> TranslationError {
    TranslationError::UndeclaredVariable(format!("{}[{}]", name, index))
}

impl SymbolTable {
    /// Builds an empty table.
    pub fn new(policy: RedeclarationPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Returns `true` iff the name is declared, whatever its type.
    pub fn contains(&self, name: &str) -> bool {
        self.bools.contains_key(name)
            || self.ints.contains_key(name)
            || self.bool_arrays.contains_key(name)
            || self.int_arrays.contains_key(name)
    }

    fn check_redeclaration(&self, name: &str) -> TranslationResult<()> {
        if self.policy == RedeclarationPolicy::Strict && self.contains(name) {
            return Err(TranslationError::InvalidDeclaration {
                name: name.to_string(),
                reason: "name already declared".to_string(),
            });
        }
        Ok(())
    }

    /// Declares a Boolean variable.
    pub fn declare_bool(
        &mut self,
        name: &str,
        ids: &mut IdAllocator,
    ) -> TranslationResult<&mut BoolVar> {
        self.check_redeclaration(name)?;
        let var = BoolVar::new(ids.fresh_id());
        Ok(insert(&mut self.bools, name, var))
    }

    /// Declares an integer variable.
    pub fn declare_int(
        &mut self,
        name: &str,
        domain: IntDomain,
        ids: &mut IdAllocator,
    ) -> TranslationResult<&mut IntVar> {
        self.check_redeclaration(name)?;
        let var = IntVar::new(ids.fresh_id(), domain);
        Ok(insert(&mut self.ints, name, var))
    }

    /// Declares an array of `n` Boolean variables.
    pub fn declare_bool_array(
        &mut self,
        name: &str,
        n: usize,
        ids: &mut IdAllocator,
    ) -> TranslationResult<&mut VarArray<BoolVar>> {
        self.check_redeclaration(name)?;
        let elements = ids.fresh_ids(n).into_iter().map(BoolVar::new).collect();
        Ok(insert(&mut self.bool_arrays, name, VarArray::new(elements)))
    }

    /// Declares an array of integer variables, one per domain.
    pub fn declare_int_array(
        &mut self,
        name: &str,
        domains: Vec<IntDomain>,
        ids: &mut IdAllocator,
    ) -> TranslationResult<&mut VarArray<IntVar>> {
        self.check_redeclaration(name)?;
        let elements = domains
            .into_iter()
            .map(|d| IntVar::new(ids.fresh_id(), d))
            .collect();
        Ok(insert(&mut self.int_arrays, name, VarArray::new(elements)))
    }

    /// Returns the Boolean variable with the given name.
    pub fn lookup_bool(&self, name: &str) -> TranslationResult<&BoolVar> {
        self.bools
            .get(name)
            .ok_or_else(|| TranslationError::UndeclaredVariable(name.to_string()))
    }

    /// Returns the integer variable with the given name.
    pub fn lookup_int(&self, name: &str) -> TranslationResult<&IntVar> {
        self.ints
            .get(name)
            .ok_or_else(|| TranslationError::UndeclaredVariable(name.to_string()))
    }

    /// Returns the element of a Boolean array; indexes start at 1.
    pub fn lookup_bool_at(&self, name: &str, index: i64) -> TranslationResult<&BoolVar> {
        self.bool_arrays
            .get(name)
            .and_then(|a| a.get(index))
            .ok_or_else(|| undeclared_element(name, index))
    }

    /// Returns the element of an integer array; indexes start at 1.
    pub fn lookup_int_at(&self, name: &str, index: i64) -> TranslationResult<&IntVar> {
        self.int_arrays
            .get(name)
            .and_then(|a| a.get(index))
            .ok_or_else(|| undeclared_element(name, index))
    }

    /// Returns the Boolean array with the given name.
    pub fn lookup_bool_array(&self, name: &str) -> TranslationResult<&VarArray<BoolVar>> {
        self.bool_arrays
            .get(name)
            .ok_or_else(|| TranslationError::UndeclaredVariable(name.to_string()))
    }

    /// Returns the integer array with the given name.
    pub fn lookup_int_array(&self, name: &str) -> TranslationResult<&VarArray<IntVar>> {
        self.int_arrays
            .get(name)
            .ok_or_else(|| TranslationError::UndeclaredVariable(name.to_string()))
    }

    /// Returns the number of declared names.
    pub fn len(&self) -> usize {
        self.bools.len() + self.ints.len() + self.bool_arrays.len() + self.int_arrays.len()
    }

    /// Returns `true` iff no name is declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
