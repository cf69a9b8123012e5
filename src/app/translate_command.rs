use super::{
    cli_manager::{self, Command},
    common,
};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use fzn2ecnf::translation::Translator;
use log::info;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

const CMD_NAME: &str = "translate";

const ARG_OUT: &str = "ARG_OUT";

pub(crate) struct TranslateCommand;

impl TranslateCommand {
    pub(crate) fn new() -> Self {
        TranslateCommand
    }
}

impl<'a> Command<'a> for TranslateCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Translates a FlatZinc model into an ECNF theory")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(
                Arg::with_name(ARG_OUT)
                    .short("o")
                    .long("output")
                    .empty_values(false)
                    .multiple(false)
                    .help("the output file for the theory (default is the standard output)")
                    .required(false),
            )
            .args(&common::translation_args())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches.value_of(common::ARG_INPUT).unwrap();
        let options = common::translation_options(arg_matches)?;
        let model = common::read_model_file(file)?;
        let mut translator = Translator::new(options);
        translator.translate_model(&model)?;
        match arg_matches.value_of(ARG_OUT) {
            Some(output_file) => {
                let context = || format!(r#"while writing the theory to "{}""#, output_file);
                let mut writer = BufWriter::new(File::create(output_file).with_context(context)?);
                translator.write(&mut writer).with_context(context)?;
                info!("theory written to {}", output_file);
            }
            None => {
                let stdout = io::stdout();
                let mut writer = BufWriter::new(stdout.lock());
                translator.write(&mut writer)?;
                writer.flush().context("while flushing the standard output")?;
            }
        }
        Ok(())
    }
}
