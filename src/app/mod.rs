pub(crate) mod app_helper;

mod authors_command;
pub(crate) use authors_command::AuthorsCommand;

mod check_command;
pub(crate) use check_command::CheckCommand;

pub(crate) mod cli_manager;

pub(crate) mod common;

mod constraints_command;
pub(crate) use constraints_command::ConstraintsCommand;

mod translate_command;
pub(crate) use translate_command::TranslateCommand;
