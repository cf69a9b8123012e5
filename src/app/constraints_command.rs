use super::cli_manager::{self, Command};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use fzn2ecnf::translation::ConstraintKind;

const CMD_NAME: &str = "constraints";

pub(crate) struct ConstraintsCommand;

impl ConstraintsCommand {
    pub(crate) fn new() -> Self {
        ConstraintsCommand
    }
}

impl<'a> Command<'a> for ConstraintsCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Displays the FlatZinc predicates handled by the translator")
            .setting(AppSettings::DisableVersion)
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, _arg_matches: &ArgMatches<'_>) -> Result<()> {
        let constraints = ConstraintKind::iter_supported().fold(String::new(), |mut acc, k| {
            if !acc.is_empty() {
                acc.push(',')
            };
            let name: &'static str = k.into();
            acc.push_str(name);
            acc
        });
        println!("[{}]", constraints);
        Ok(())
    }
}
