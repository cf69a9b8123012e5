use super::{
    app_helper::AppHelper, cli_manager::Command, AuthorsCommand, CheckCommand,
    ConstraintsCommand, TranslateCommand,
};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches};
use fzn2ecnf::{
    fzn::{FlatZincReader, Model, ModelReader},
    translation::{RedeclarationPolicy, TranslationOptions},
};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::PathBuf,
    str::FromStr,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "fzn2ecnf, a translator from FlatZinc models to ECNF theories.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(ConstraintsCommand::new()),
        Box::new(TranslateCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the FlatZinc model")
        .required(true)
}

const ARG_REDECLARATION: &str = "REDECLARATION";
const ARG_DEFINITION_ID: &str = "DEFINITION_ID";
const ARG_NO_COMMENT: &str = "NO_COMMENT";

pub(crate) fn translation_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name(ARG_REDECLARATION)
            .long("redeclaration")
            .empty_values(false)
            .multiple(false)
            .possible_values(&["strict", "lenient"])
            .default_value("strict")
            .help("the behavior when a name is declared twice")
            .required(false),
        Arg::with_name(ARG_DEFINITION_ID)
            .long("definition-id")
            .empty_values(false)
            .multiple(false)
            .allow_hyphen_values(true)
            .default_value("0")
            .help("the definition group of rules annotated by a bare inductivelydefined")
            .required(false),
        Arg::with_name(ARG_NO_COMMENT)
            .long("no-comment")
            .takes_value(false)
            .help("do not write the comment line before the theory header")
            .required(false),
    ]
}

pub(crate) fn translation_options(arg_matches: &ArgMatches<'_>) -> Result<TranslationOptions> {
    let mut options = TranslationOptions::default();
    if let Some(s) = arg_matches.value_of(ARG_REDECLARATION) {
        options.redeclaration = RedeclarationPolicy::from_str(s)?;
    }
    if let Some(s) = arg_matches.value_of(ARG_DEFINITION_ID) {
        options.default_definition_id = s
            .parse()
            .with_context(|| format!(r#"invalid definition id "{}""#, s))?;
    }
    options.with_comment = !arg_matches.is_present(ARG_NO_COMMENT);
    Ok(options)
}

pub(crate) fn read_model_file(file_path: &str) -> Result<Model> {
    let mut reader = FlatZincReader::default();
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let model = read_file_path_with(file_path, &|r| reader.read(r))?;
    info!(
        "the model has {} declaration(s) and {} constraint(s)",
        model.declarations.len(),
        model.constraints.len(),
    );
    Ok(model)
}

pub(crate) fn read_file_path_with<F, R>(file_path: &str, reader: &F) -> Result<R>
where
    F: Fn(&mut dyn Read) -> Result<R>,
{
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!(r#"while opening file "{}""#, file_path))?,
    );
    (reader)(&mut file_reader).with_context(|| format!(r#"while reading file "{}""#, file_path))
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{App, SubCommand};

    fn options_from(args: &[&str]) -> Result<TranslationOptions> {
        let app = App::new("app").subcommand(SubCommand::with_name("cmd").args(&translation_args()));
        let matches = app
            .get_matches_from_safe(["app", "cmd"].iter().chain(args.iter()))
            .unwrap();
        translation_options(matches.subcommand_matches("cmd").unwrap())
    }

    #[test]
    fn test_default_options() {
        assert_eq!(TranslationOptions::default(), options_from(&[]).unwrap());
    }

    #[test]
    fn test_options() {
        assert_eq!(
            TranslationOptions {
                redeclaration: RedeclarationPolicy::Lenient,
                default_definition_id: -3,
                with_comment: false,
            },
            options_from(&["--redeclaration", "lenient", "--definition-id", "-3", "--no-comment"])
                .unwrap()
        );
    }

    #[test]
    fn test_invalid_definition_id() {
        assert!(options_from(&["--definition-id", "a"]).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(read_model_file("/this/file/does/not/exist.fzn").is_err());
    }
}
