use super::{
    BaseType, Constraint, DeclShape, Expression, Identifier, Model, ModelReader, SetLiteral,
    Solve, SolveGoal, VarDecl, WarningHandler,
};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

lazy_static! {
    static ref TOKEN_PATTERN: Regex = Regex::new(concat!(
        r#"^(?:(?P<float>-?\d+\.\d+(?:[eE][-+]?\d+)?)"#,
        r#"|(?P<int>-?\d+)"#,
        r#"|(?P<word>[_[:alpha:]][_[:alnum:]]*)"#,
        r#"|(?P<string>"(?:[^"\\]|\\.)*")"#,
        r#"|(?P<symbol>::|\.\.|[:;,()\[\]{}=]))"#
    ))
    .unwrap();
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Float(f64),
    Word(String),
    Str(String),
    Symbol(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Int(i) => write!(f, "{}", i),
            Token::Float(x) => write!(f, "{}", x),
            Token::Word(w) | Token::Symbol(w) => write!(f, "{}", w),
            Token::Str(s) => write!(f, "{:?}", s),
        }
    }
}

fn tokenize_line(line: &str, line_number: usize) -> Result<Vec<(Token, usize)>> {
    let content = match line.find('%') {
        Some(n) => &line[..n],
        None => line,
    };
    let mut tokens = Vec::new();
    let mut rest = content.trim_start();
    while !rest.is_empty() {
        let captures = TOKEN_PATTERN
            .captures(rest)
            .ok_or_else(|| anyhow!(r#"unexpected character in "{}""#, rest.trim_end()))?;
        let token = if let Some(m) = captures.name("float") {
            Token::Float(
                m.as_str()
                    .parse()
                    .with_context(|| format!(r#"invalid float "{}""#, m.as_str()))?,
            )
        } else if let Some(m) = captures.name("int") {
            Token::Int(
                m.as_str()
                    .parse()
                    .with_context(|| format!(r#"invalid integer "{}""#, m.as_str()))?,
            )
        } else if let Some(m) = captures.name("word") {
            Token::Word(m.as_str().to_string())
        } else if let Some(m) = captures.name("string") {
            let quoted = m.as_str();
            Token::Str(quoted[1..quoted.len() - 1].to_string())
        } else {
            Token::Symbol(captures["symbol"].to_string())
        };
        tokens.push((token, line_number));
        rest = rest[captures[0].len()..].trim_start();
    }
    Ok(tokens)
}

struct ItemParser {
    tokens: Vec<(Token, usize)>,
    next: usize,
    warnings: Vec<(usize, String)>,
}

impl ItemParser {
    fn new(tokens: Vec<(Token, usize)>) -> Self {
        Self {
            tokens,
            next: 0,
            warnings: vec![],
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.next).map(|(t, _)| t)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.next + n).map(|(t, _)| t)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.next)
            .or_else(|| self.tokens.last())
            .map(|(_, l)| *l)
            .unwrap_or(1)
    }

    fn next_token(&mut self) -> Result<Token> {
        match self.tokens.get(self.next) {
            Some((t, _)) => {
                self.next += 1;
                Ok(t.clone())
            }
            None => Err(anyhow!("unexpected end of input")),
        }
    }

    fn is_symbol(&self, s: &str) -> bool {
        matches!(self.peek(), Some(Token::Symbol(t)) if t == s)
    }

    fn is_word(&self, w: &str) -> bool {
        matches!(self.peek(), Some(Token::Word(t)) if t == w)
    }

    fn expect_symbol(&mut self, s: &str) -> Result<()> {
        match self.next_token()? {
            Token::Symbol(t) if t == s => Ok(()),
            t => Err(anyhow!(r#"expected "{}", got "{}""#, s, t)),
        }
    }

    fn expect_word(&mut self, w: &str) -> Result<()> {
        match self.next_token()? {
            Token::Word(t) if t == w => Ok(()),
            t => Err(anyhow!(r#"expected "{}", got "{}""#, w, t)),
        }
    }

    fn expect_name(&mut self) -> Result<String> {
        match self.next_token()? {
            Token::Word(w) => Ok(w),
            t => Err(anyhow!(r#"expected a name, got "{}""#, t)),
        }
    }

    fn expect_int(&mut self) -> Result<i64> {
        match self.next_token()? {
            Token::Int(i) => Ok(i),
            t => Err(anyhow!(r#"expected an integer, got "{}""#, t)),
        }
    }

    fn parse_model(&mut self) -> Result<Model> {
        let mut declarations = Vec::new();
        let mut constraints = Vec::new();
        let mut solve = None;
        while self.peek().is_some() {
            let line = self.line();
            let context = || format!("while reading the item starting at line {}", line);
            if self.is_word("predicate") {
                self.skip_item().with_context(context)?;
                self.warnings
                    .push((line, "ignoring predicate declaration".to_string()));
            } else if self.is_word("constraint") {
                constraints.push(self.parse_constraint().with_context(context)?);
            } else if self.is_word("solve") {
                if solve.is_some() {
                    return Err(anyhow!("multiple solve items")).with_context(context);
                }
                solve = Some(self.parse_solve().with_context(context)?);
            } else {
                if solve.is_some() {
                    return Err(anyhow!("found a declaration after the solve item"))
                        .with_context(context);
                }
                declarations.push(self.parse_declaration().with_context(context)?);
            }
        }
        match solve {
            Some(s) => Ok(Model {
                declarations,
                constraints,
                solve: s,
            }),
            None => Err(anyhow!("missing solve item")),
        }
    }

    fn skip_item(&mut self) -> Result<()> {
        let mut depth = 0;
        loop {
            match self.next_token()? {
                Token::Symbol(s) if s == "(" || s == "[" || s == "{" => depth += 1,
                Token::Symbol(s) if s == ")" || s == "]" || s == "}" => depth -= 1,
                Token::Symbol(s) if s == ";" && depth == 0 => return Ok(()),
                _ => {}
            }
        }
    }

    fn parse_declaration(&mut self) -> Result<VarDecl> {
        let array_bounds = if self.is_word("array") {
            self.next_token()?;
            self.expect_symbol("[")?;
            let lower = self.expect_int()?;
            self.expect_symbol("..")?;
            let upper = self.expect_int()?;
            self.expect_symbol("]")?;
            self.expect_word("of")?;
            Some((lower, upper))
        } else {
            None
        };
        let is_var = if self.is_word("var") {
            self.next_token()?;
            true
        } else {
            false
        };
        let base_type = self.parse_base_type()?;
        self.expect_symbol(":")?;
        let name = self.expect_name()?;
        let annotations = self.parse_annotations()?;
        let value = if self.is_symbol("=") {
            self.next_token()?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_symbol(";")?;
        let shape = match array_bounds {
            Some((lower, upper)) => DeclShape::Array {
                lower,
                upper,
                element: base_type,
            },
            None => DeclShape::Scalar(base_type),
        };
        Ok(VarDecl {
            name,
            is_var,
            shape,
            annotations,
            value,
        })
    }

    fn parse_base_type(&mut self) -> Result<BaseType> {
        match self.next_token()? {
            Token::Word(w) if w == "bool" => Ok(BaseType::Bool),
            Token::Word(w) if w == "int" => Ok(BaseType::Int(None)),
            Token::Word(w) if w == "float" => Ok(BaseType::Float),
            Token::Word(w) if w == "set" => {
                self.expect_word("of")?;
                if self.is_word("int") {
                    self.next_token()?;
                } else {
                    self.parse_int_set()?;
                }
                Ok(BaseType::Set)
            }
            Token::Float(_) => {
                self.expect_symbol("..")?;
                match self.next_token()? {
                    Token::Float(_) => Ok(BaseType::Float),
                    t => Err(anyhow!(r#"expected a float, got "{}""#, t)),
                }
            }
            t @ (Token::Int(_) | Token::Symbol(_)) => {
                self.next -= 1;
                self.parse_int_set()
                    .with_context(|| format!(r#"unexpected type starting with "{}""#, t))
                    .map(|s| BaseType::Int(Some(s)))
            }
            t => Err(anyhow!(r#"expected a type, got "{}""#, t)),
        }
    }

    fn parse_int_set(&mut self) -> Result<SetLiteral> {
        match self.next_token()? {
            Token::Int(low) => {
                self.expect_symbol("..")?;
                let high = self.expect_int()?;
                Ok(SetLiteral::Range(low, high))
            }
            Token::Symbol(s) if s == "{" => {
                let mut values = Vec::new();
                if self.is_symbol("}") {
                    self.next_token()?;
                    return Ok(SetLiteral::Values(values));
                }
                loop {
                    values.push(self.expect_int()?);
                    match self.next_token()? {
                        Token::Symbol(s) if s == "," => continue,
                        Token::Symbol(s) if s == "}" => break,
                        t => return Err(anyhow!(r#"expected "," or "}}", got "{}""#, t)),
                    }
                }
                Ok(SetLiteral::Values(values))
            }
            t => Err(anyhow!(r#"expected a set of integers, got "{}""#, t)),
        }
    }

    fn parse_constraint(&mut self) -> Result<Constraint> {
        self.expect_word("constraint")?;
        let name = self.expect_name()?;
        self.expect_symbol("(")?;
        let arguments = self.parse_expr_list(")")?;
        let annotations = self.parse_annotations()?;
        self.expect_symbol(";")?;
        Ok(Constraint {
            call: Identifier::new_call(&name, arguments),
            annotations,
        })
    }

    fn parse_solve(&mut self) -> Result<Solve> {
        self.expect_word("solve")?;
        let annotations = self.parse_annotations()?;
        let goal = match self.next_token()? {
            Token::Word(w) if w == "satisfy" => SolveGoal::Satisfy,
            Token::Word(w) if w == "minimize" => SolveGoal::Minimize(self.parse_expr()?),
            Token::Word(w) if w == "maximize" => SolveGoal::Maximize(self.parse_expr()?),
            t => return Err(anyhow!(r#"unexpected solve goal "{}""#, t)),
        };
        self.expect_symbol(";")?;
        Ok(Solve { goal, annotations })
    }

    fn parse_annotations(&mut self) -> Result<Vec<Expression>> {
        let mut annotations = Vec::new();
        while self.is_symbol("::") {
            self.next_token()?;
            match self.parse_expr()? {
                e @ Expression::Ident(_) => annotations.push(e),
                e => return Err(anyhow!(r#"invalid annotation "{}""#, e)),
            }
        }
        Ok(annotations)
    }

    fn parse_expr_list(&mut self, closing: &str) -> Result<Vec<Expression>> {
        let mut exprs = Vec::new();
        if self.is_symbol(closing) {
            self.next_token()?;
            return Ok(exprs);
        }
        loop {
            exprs.push(self.parse_expr()?);
            match self.next_token()? {
                Token::Symbol(s) if s == "," => {
                    if self.is_symbol(closing) {
                        self.next_token()?;
                        return Ok(exprs);
                    }
                }
                Token::Symbol(s) if s == closing => return Ok(exprs),
                t => return Err(anyhow!(r#"expected "," or "{}", got "{}""#, closing, t)),
            }
        }
    }

    fn parse_expr(&mut self) -> Result<Expression> {
        match self.peek().cloned() {
            Some(Token::Word(w)) if w == "true" || w == "false" => {
                self.next_token()?;
                Ok(Expression::Bool(w == "true"))
            }
            Some(Token::Int(i)) => {
                if matches!(self.peek_nth(1), Some(Token::Symbol(s)) if s == "..") {
                    self.parse_int_set().map(Expression::Set)
                } else {
                    self.next_token()?;
                    Ok(Expression::Int(i))
                }
            }
            Some(Token::Float(x)) => {
                self.next_token()?;
                Ok(Expression::Float(x))
            }
            Some(Token::Str(s)) => {
                self.next_token()?;
                Ok(Expression::Str(s))
            }
            Some(Token::Symbol(s)) if s == "{" => self.parse_int_set().map(Expression::Set),
            Some(Token::Symbol(s)) if s == "[" => {
                self.next_token()?;
                self.parse_expr_list("]").map(Expression::Array)
            }
            Some(Token::Word(name)) => {
                self.next_token()?;
                if self.is_symbol("[") {
                    self.next_token()?;
                    let index = self.expect_int()?;
                    self.expect_symbol("]")?;
                    Ok(Expression::ArrayAccess(name, index))
                } else if self.is_symbol("(") {
                    self.next_token()?;
                    let arguments = self.parse_expr_list(")")?;
                    Ok(Expression::Ident(Identifier::new_call(&name, arguments)))
                } else {
                    Ok(Expression::ident(&name))
                }
            }
            Some(t) => Err(anyhow!(r#"unexpected "{}" in expression"#, t)),
            None => Err(anyhow!("unexpected end of input")),
        }
    }
}

/// A reader for FlatZinc models.
///
/// This object reads the flat subset of the FlatZinc language the translator deals with:
/// parameter and variable declarations, constraints and a single solve item, all of them possibly annotated.
/// Predicate declarations are skipped (a warning is raised).
/// Comments start with `%` and end with the line.
///
/// # Example
///
/// The following content declares two integer variables, constrains the first to be lower than the second and maximizes the first one.
///
/// ```text
/// var 1..3: x :: output_var;
/// var {1, 3, 5}: y :: output_var;
/// constraint int_lt(x, y);
/// solve maximize x;
/// ```
///
/// ```
/// # use fzn2ecnf::fzn::{FlatZincReader, ModelReader, SolveGoal, Expression};
/// let content = "var 1..3: x;\nvar {1, 3, 5}: y;\nconstraint int_lt(x, y);\nsolve maximize x;\n";
/// let model = FlatZincReader::default().read(&mut content.as_bytes()).unwrap();
/// assert_eq!(2, model.declarations.len());
/// assert_eq!(1, model.constraints.len());
/// assert_eq!(SolveGoal::Maximize(Expression::ident("x")), model.solve.goal);
/// ```
#[derive(Default)]
pub struct FlatZincReader {
    warning_handlers: Vec<WarningHandler>,
}

impl ModelReader for FlatZincReader {
    fn read(&self, reader: &mut dyn Read) -> Result<Model> {
        let br = BufReader::new(reader);
        let mut tokens = Vec::new();
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line {}", i + 1);
            let l = line.with_context(context)?;
            tokens.append(&mut tokenize_line(&l, i + 1).with_context(context)?);
        }
        let mut parser = ItemParser::new(tokens);
        let model = parser.parse_model()?;
        for (line, w) in parser.warnings.iter() {
            self.warning_handlers
                .iter()
                .for_each(|h| (h)(*line, w.to_string()));
        }
        Ok(model)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    fn read(content: &str) -> Result<Model> {
        FlatZincReader::default().read(&mut content.as_bytes())
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize_line("array [1..2] of var -3..3: x :: output; % comment", 1)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t.to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                "array", "[", "1", "..", "2", "]", "of", "var", "-3", "..", "3", ":", "x", "::",
                "output", ";"
            ],
            tokens
        );
    }

    #[test]
    fn test_tokenize_float_and_string() {
        let tokens = tokenize_line(r#"1.5e3 "a b" 2.0"#, 1).unwrap();
        assert_eq!(
            vec![
                (Token::Float(1500.), 1),
                (Token::Str("a b".to_string()), 1),
                (Token::Float(2.), 1)
            ],
            tokens
        );
    }

    #[test]
    fn test_tokenize_unexpected_char() {
        assert!(tokenize_line("var bool: x$;", 1).is_err());
    }

    #[test]
    fn test_read_scalar_declarations() {
        let model = read(concat!(
            "var bool: b :: output_var;\n",
            "var 1..10: x;\n",
            "var {1, 5, 3}: y = x;\n",
            "int: n = 3;\n",
            "var float: f;\n",
            "solve satisfy;\n"
        ))
        .unwrap();
        assert_eq!(5, model.declarations.len());
        assert_eq!(
            VarDecl {
                name: "b".to_string(),
                is_var: true,
                shape: DeclShape::Scalar(BaseType::Bool),
                annotations: vec![Expression::ident("output_var")],
                value: None,
            },
            model.declarations[0]
        );
        assert_eq!(
            DeclShape::Scalar(BaseType::Int(Some(SetLiteral::Range(1, 10)))),
            model.declarations[1].shape
        );
        assert_eq!(
            DeclShape::Scalar(BaseType::Int(Some(SetLiteral::Values(vec![1, 5, 3])))),
            model.declarations[2].shape
        );
        assert_eq!(Some(Expression::ident("x")), model.declarations[2].value);
        assert!(!model.declarations[3].is_var);
        assert_eq!(Some(Expression::Int(3)), model.declarations[3].value);
        assert_eq!(
            DeclShape::Scalar(BaseType::Float),
            model.declarations[4].shape
        );
        assert_eq!(SolveGoal::Satisfy, model.solve.goal);
    }

    #[test]
    fn test_read_array_declaration() {
        let model = read(concat!(
            "var bool: a;\n",
            "array [1..2] of var bool: bs :: output_array([1..2]) = [a, true];\n",
            "array [1..3] of int: ws = [1, -2, 3];\n",
            "solve satisfy;\n"
        ))
        .unwrap();
        assert_eq!(
            VarDecl {
                name: "bs".to_string(),
                is_var: true,
                shape: DeclShape::Array {
                    lower: 1,
                    upper: 2,
                    element: BaseType::Bool
                },
                annotations: vec![Expression::Ident(Identifier::new_call(
                    "output_array",
                    vec![Expression::Array(vec![Expression::Set(SetLiteral::Range(
                        1, 2
                    ))])]
                ))],
                value: Some(Expression::Array(vec![
                    Expression::ident("a"),
                    Expression::Bool(true)
                ])),
            },
            model.declarations[1]
        );
        assert_eq!(
            DeclShape::Array {
                lower: 1,
                upper: 3,
                element: BaseType::Int(None)
            },
            model.declarations[2].shape
        );
    }

    #[test]
    fn test_read_set_declaration() {
        let model = read("set of int: s = {1, 2};\nvar set of 1..3: t;\nsolve satisfy;\n").unwrap();
        assert_eq!(DeclShape::Scalar(BaseType::Set), model.declarations[0].shape);
        assert_eq!(
            Some(Expression::Set(SetLiteral::Values(vec![1, 2]))),
            model.declarations[0].value
        );
        assert_eq!(DeclShape::Scalar(BaseType::Set), model.declarations[1].shape);
    }

    #[test]
    fn test_read_constraints() {
        let model = read(concat!(
            "var bool: a;\n",
            "array [1..2] of var 0..3: xs;\n",
            "constraint bool_clause([a], []);\n",
            "constraint int_lin_le([2, 3], [xs[1], xs[2]], 10) :: domain;\n",
            "solve satisfy;\n"
        ))
        .unwrap();
        assert_eq!(
            Constraint {
                call: Identifier::new_call(
                    "bool_clause",
                    vec![
                        Expression::Array(vec![Expression::ident("a")]),
                        Expression::Array(vec![])
                    ]
                ),
                annotations: vec![],
            },
            model.constraints[0]
        );
        assert_eq!(
            Constraint {
                call: Identifier::new_call(
                    "int_lin_le",
                    vec![
                        Expression::Array(vec![Expression::Int(2), Expression::Int(3)]),
                        Expression::Array(vec![
                            Expression::ArrayAccess("xs".to_string(), 1),
                            Expression::ArrayAccess("xs".to_string(), 2)
                        ]),
                        Expression::Int(10)
                    ]
                ),
                annotations: vec![Expression::ident("domain")],
            },
            model.constraints[1]
        );
    }

    #[test]
    fn test_read_solve_goals() {
        let model = read("var 0..2: x;\nsolve :: int_search([x], input_order, indomain_min, complete) minimize x;\n").unwrap();
        assert_eq!(SolveGoal::Minimize(Expression::ident("x")), model.solve.goal);
        assert_eq!(1, model.solve.annotations.len());
        let model = read("array [1..1] of var 0..2: x;\nsolve maximize x[1];\n").unwrap();
        assert_eq!(
            SolveGoal::Maximize(Expression::ArrayAccess("x".to_string(), 1)),
            model.solve.goal
        );
    }

    #[test]
    fn test_read_multiline_item() {
        let model = read("constraint bool_eq(\n  true,\n  false);\nsolve satisfy;\n").unwrap();
        assert_eq!(
            vec![Expression::Bool(true), Expression::Bool(false)],
            model.constraints[0].call.arguments
        );
    }

    #[test]
    fn test_read_missing_solve() {
        assert!(read("var bool: x;\n").is_err());
    }

    #[test]
    fn test_read_multiple_solve() {
        assert!(read("solve satisfy;\nsolve satisfy;\n").is_err());
    }

    #[test]
    fn test_read_declaration_after_solve() {
        assert!(read("solve satisfy;\nvar bool: x;\n").is_err());
    }

    #[test]
    fn test_read_syntax_error() {
        assert!(read("var bool x;\nsolve satisfy;\n").is_err());
        assert!(read("constraint bool_eq(a b);\nsolve satisfy;\n").is_err());
        assert!(read("constraint bool_eq(a, b)\nsolve satisfy;\n").is_err());
    }

    #[test]
    fn test_read_error_message_has_line() {
        let err = read("var bool: x;\n\nvar bool y;\nsolve satisfy;\n").unwrap_err();
        assert_eq!(
            "while reading the item starting at line 3",
            format!("{}", err)
        );
    }

    #[test]
    fn test_read_warn_predicate() {
        let content = "predicate my_pred(array [int] of var int: x, var int: y);\nsolve satisfy;\n";
        let warnings = Rc::new(RefCell::new(vec![]));
        let warnings_clone = Rc::clone(&warnings);
        let closure = Box::new(move |i, w| warnings_clone.borrow_mut().push((i, w)));
        let mut reader = FlatZincReader::default();
        reader.add_warning_handler(closure);
        let model = reader.read(&mut content.as_bytes()).unwrap();
        assert!(model.declarations.is_empty());
        assert_eq!(
            warnings.borrow().clone(),
            vec![(1, "ignoring predicate declaration".to_string())]
        );
    }
}
