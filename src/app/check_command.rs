use super::{
    cli_manager::{self, Command},
    common,
};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use fzn2ecnf::translation::Translator;
use log::info;

const CMD_NAME: &str = "check";

pub(crate) struct CheckCommand;

impl CheckCommand {
    pub(crate) fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks that a FlatZinc model can be translated, without writing the theory")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .args(&common::translation_args())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches.value_of(common::ARG_INPUT).unwrap();
        let options = common::translation_options(arg_matches)?;
        let model = common::read_model_file(file)?;
        let mut translator = Translator::new(options);
        translator.translate_model(&model)?;
        info!(
            "the theory has {} variable(s) and {} line(s)",
            translator.n_ids(),
            translator.theory().n_declarations() + translator.theory().n_body_lines()
        );
        Ok(())
    }
}
