use super::app_helper::{init_logger, init_logger_with_level};
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg, ArgMatches};
use log::info;
use std::{ffi::OsString, str::FromStr};
use sysinfo::System;

/// A subcommand of the application.
///
/// Commands provide their own CLI arguments (using clap) and execute themselves given the parsed arguments.
/// Each command must have a unique name.
pub(crate) trait Command<'a> {
    /// Returns the name of the command.
    fn name(&self) -> &str;

    /// Returns the clap subcommand describing the CLI arguments of this command.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Executes the command given its arguments.
    ///
    /// The app exits with a success status code iff `Ok(())` is returned.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}

pub(crate) struct CliManager<'a> {
    app_name: &'a str,
    version: &'a str,
    author: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

const LOGGING_LEVEL_ARG: &str = "LOGGING_LEVEL";

pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(LOGGING_LEVEL_ARG)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

const HELP_STRINGS: [&str; 3] = ["help", "-h", "--help"];

impl<'a> CliManager<'a> {
    pub(crate) fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        CliManager {
            app_name,
            version,
            author,
            about,
            commands: vec![],
        }
    }

    pub(crate) fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    pub(crate) fn parse_cli<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.into()).collect();
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::NeedsSubcommandHelp)
            .setting(AppSettings::SubcommandRequired)
            .version(self.version)
            .author(self.author)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        match app.clone().get_matches_from_safe(args.iter()) {
            Ok(matches) => {
                let (name, sub_matches) = matches.subcommand();
                let command = self
                    .commands
                    .iter()
                    .find(|c| c.name() == name)
                    .ok_or_else(|| anyhow!(r#"unknown command "{}""#, name))?;
                let sub_matches = sub_matches.ok_or_else(|| anyhow!("missing subcommand"))?;
                let log_level = sub_matches
                    .value_of(LOGGING_LEVEL_ARG)
                    .and_then(|l| log::LevelFilter::from_str(l).ok())
                    .unwrap_or(log::LevelFilter::Info);
                init_logger_with_level(log_level);
                info!("{} {}", self.app_name, self.version);
                sys_info();
                command.execute(sub_matches)
            }
            Err(clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                ..
            }) => {
                init_logger();
                self.print_help(&mut app, &args);
                Ok(())
            }
            Err(e) => {
                init_logger();
                info!("{} {}", self.app_name, self.version);
                Err(anyhow!("{}", e))
            }
        }
    }

    fn print_help(&self, app: &mut App, args: &[OsString]) {
        let arg_str = |i: usize| args.get(i).and_then(|a| a.to_str());
        let subcommand_name = match (arg_str(1), arg_str(2)) {
            (Some(a), Some(b)) if HELP_STRINGS.contains(&a) => Some(b),
            (Some(a), _) if !HELP_STRINGS.contains(&a) => Some(a),
            _ => None,
        };
        let mut message = Vec::new();
        let written = match subcommand_name
            .and_then(|n| self.commands.iter().find(|c| c.name() == n))
        {
            Some(c) => c.clap_subcommand().write_long_help(&mut message),
            None => app.write_long_help(&mut message),
        };
        if written.is_ok() {
            String::from_utf8_lossy(&message)
                .split('\n')
                .for_each(|s| info!("{}", s));
            info!("");
        }
    }
}

fn sys_info() {
    info!("----------------------------------------");
    let sys = System::new_all();
    let unknown = || "[unknown]".to_string();
    info!("running on {}", System::host_name().unwrap_or_else(unknown));
    info!(
        "OS is {} {} with kernel {}",
        System::name().unwrap_or_else(unknown),
        System::os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown)
    );
    let mut cpu_kinds: Vec<&str> = sys.cpus().iter().map(|p| p.brand()).collect();
    cpu_kinds.sort_unstable();
    cpu_kinds.dedup();
    info!(
        "physical core count: {} {:?}",
        sys.physical_core_count()
            .map(|n| n.to_string())
            .unwrap_or_else(unknown),
        cpu_kinds
    );
    info!("total memory: {} KB", sys.total_memory() / 1024);
    info!("----------------------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::SubCommand;
    use std::{cell::RefCell, rc::Rc};

    struct RecordingTranslateCommand {
        translated: Rc<RefCell<bool>>,
        no_comment: Rc<RefCell<bool>>,
    }

    impl<'a> Command<'a> for RecordingTranslateCommand {
        fn name(&self) -> &str {
            "translate"
        }

        fn clap_subcommand(&self) -> App<'a, 'a> {
            SubCommand::with_name("translate")
                .about("records the translation requests")
                .arg(Arg::with_name("NO_COMMENT").long("no-comment"))
                .arg(logging_level_cli_arg())
                .setting(AppSettings::DisableVersion)
        }

        fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
            (*self.translated.borrow_mut()) = true;
            if arg_matches.is_present("NO_COMMENT") {
                (*self.no_comment.borrow_mut()) = true;
            }
            Ok(())
        }
    }

    fn run_translate_command(args: Vec<&'static str>) -> Result<(bool, bool)> {
        let mut manager = CliManager::new("fzn2ecnf", "0.1.0", "author", "about");
        let translated = Rc::new(RefCell::new(false));
        let no_comment = Rc::new(RefCell::new(false));
        manager.add_command(Box::new(RecordingTranslateCommand {
            translated: Rc::clone(&translated),
            no_comment: Rc::clone(&no_comment),
        }));
        manager.parse_cli(args)?;
        let result = (*translated.borrow(), *no_comment.borrow());
        Ok(result)
    }

    #[test]
    fn test_translate_requested() {
        assert_eq!(
            (true, false),
            run_translate_command(vec!["fzn2ecnf", "translate"]).unwrap()
        );
    }

    #[test]
    fn test_translate_without_comment() {
        assert_eq!(
            (true, true),
            run_translate_command(vec!["fzn2ecnf", "translate", "--no-comment"]).unwrap()
        );
    }

    #[test]
    fn test_logging_level() {
        assert_eq!(
            (true, false),
            run_translate_command(vec![
                "fzn2ecnf",
                "translate",
                "--logging-level",
                "off"
            ])
            .unwrap()
        );
        assert!(run_translate_command(vec![
            "fzn2ecnf",
            "translate",
            "--logging-level",
            "verbose"
        ])
        .is_err());
    }

    #[test]
    fn test_no_subcommand() {
        assert!(run_translate_command(vec!["fzn2ecnf"]).is_err());
    }

    #[test]
    fn test_wrong_subcommand() {
        assert!(run_translate_command(vec!["fzn2ecnf", "solve"]).is_err());
    }

    #[test]
    fn test_wrong_arg() {
        assert!(run_translate_command(vec!["fzn2ecnf", "translate", "-o"]).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!(
            (false, false),
            run_translate_command(vec!["fzn2ecnf", "-h"]).unwrap()
        );
    }

    #[test]
    fn test_help_subcommand() {
        run_translate_command(vec!["fzn2ecnf", "help"]).unwrap();
    }

    #[test]
    fn test_help_for_subcommand() {
        run_translate_command(vec!["fzn2ecnf", "help", "translate"]).unwrap();
    }

    #[test]
    fn test_subcommand_help() {
        run_translate_command(vec!["fzn2ecnf", "translate", "-h"]).unwrap();
    }
}
