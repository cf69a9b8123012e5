use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::{predicate, PredicateBooleanExt};

const MODEL: &str = r#"% a small optimization problem
var bool: a :: output_var;
var bool: b :: output_var;
array [1..2] of var 0..3: xs :: output_array([1..2]);
var 0..2: obj :: output_var;
constraint bool_clause([a, b], []);
constraint int_lin_le([2, 3], [xs[1], xs[2]], 10);
constraint int_le_reif(xs[1], obj, a);
solve minimize obj;
"#;

const THEORY: &str = r#"p ecnf
INTVAR 3 0 3 0
INTVAR 4 0 3 0
INTVAR 5 0 2 0
6 0
1 2 0
SUMSTSIRI 6 3 4 | 2 3 =< 10 0
BINTRT 1 3 =< 5 0
BINTRI 7 5 =< 0 0
BINTRI 8 5 =< 1 0
BINTRI 9 5 =< 2 0
Mnmlist 7 8 9 0
"#;

const COMMENT: &str = "c Automated transformation from a flatzinc model into ECNF.\n";

fn model_file(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new("model.fzn").unwrap();
    file.write_str(content).unwrap();
    file
}

#[test]
fn test_translate_to_stdout() {
    let file = model_file(MODEL);
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate")
        .arg("-f")
        .arg(file.path())
        .arg("--logging-level")
        .arg("off");
    cmd.assert()
        .success()
        .stdout(predicate::eq(format!("{}{}", COMMENT, THEORY)));
    file.close().unwrap();
}

#[test]
fn test_translate_without_comment() {
    let file = model_file(MODEL);
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate")
        .arg("-f")
        .arg(file.path())
        .arg("--no-comment");
    cmd.assert().success().stdout(predicate::eq(THEORY));
    file.close().unwrap();
}

#[test]
fn test_translate_to_file() {
    let file = model_file(MODEL);
    let output = NamedTempFile::new("model.ecnf").unwrap();
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate")
        .arg("-f")
        .arg(file.path())
        .arg("-o")
        .arg(output.path())
        .arg("--no-comment");
    cmd.assert().success().stdout(predicate::str::is_empty());
    assert_eq!(THEORY, std::fs::read_to_string(output.path()).unwrap());
    file.close().unwrap();
    output.close().unwrap();
}

#[test]
fn test_translate_logs_to_stderr() {
    let file = model_file(MODEL);
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate").arg("-f").arg(file.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("the model has 4 declaration(s) and 3 constraint(s)"))
        .stdout(predicate::str::starts_with(COMMENT));
    file.close().unwrap();
}

#[test]
fn test_translate_inductive_definition() {
    let file = model_file(concat!(
        "var bool: a;\nvar bool: b;\nvar bool: r;\n",
        "constraint bool_or(a, b, r) :: inductivelydefined;\n",
        "constraint bool_and(a, b, r) :: inductivelydefined(4);\n",
        "solve satisfy;\n"
    ));
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate")
        .arg("-f")
        .arg(file.path())
        .arg("--no-comment")
        .arg("--definition-id")
        .arg("2");
    cmd.assert()
        .success()
        .stdout(predicate::eq("p ecnf\nD | 2 3 1 2 0\nC | 4 3 1 2 0\n"));
    file.close().unwrap();
}

#[test]
fn test_translate_redeclaration() {
    let content = "var bool: a;\nvar bool: a;\nsolve satisfy;\n";
    let file = model_file(content);
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate").arg("-f").arg(file.path());
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid declaration of a"));
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate")
        .arg("-f")
        .arg(file.path())
        .arg("--redeclaration")
        .arg("lenient");
    cmd.assert().success();
    file.close().unwrap();
}

#[test]
fn test_translate_unsupported_constraint() {
    let file = model_file("var 0..2: x;\nvar 0..2: y;\nconstraint int_times(x, y, y);\nsolve satisfy;\n");
    let output = NamedTempFile::new("model.ecnf").unwrap();
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate")
        .arg("-f")
        .arg(file.path())
        .arg("-o")
        .arg(output.path());
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unsupported constraint: int_times"));
    assert!(!output.path().exists());
    file.close().unwrap();
}

#[test]
fn test_translate_syntax_error() {
    let file = model_file("var bool: a;\nvar bool b;\nsolve satisfy;\n");
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate").arg("-f").arg(file.path());
    cmd.assert().failure().stderr(
        predicate::str::contains("while reading the item starting at line 2")
            .and(predicate::str::contains(r#"expected ":", got "b""#)),
    );
    file.close().unwrap();
}

#[test]
fn test_translate_missing_file() {
    let mut cmd = Command::cargo_bin("fzn2ecnf").unwrap();
    cmd.arg("translate").arg("-f").arg("/this/file/does/not/exist.fzn");
    cmd.assert().failure().code(1);
}
