use super::Model;
use anyhow::Result;
use std::io::Read;

/// The type of callback functions to call when warnings are raised while reading a model.
///
/// The first parameter is the line number (starting at 1), the second one the warning message.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read FlatZinc models.
pub trait ModelReader {
    /// Reads a [`Model`].
    ///
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use fzn2ecnf::fzn::{FlatZincReader, Model, ModelReader};
    /// fn read_model_from_str(s: &str) -> Model {
    ///     let reader = FlatZincReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("invalid FlatZinc model")
    /// }
    /// # read_model_from_str("var bool: x;\nsolve satisfy;\n");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<Model>;

    /// Adds a callback function to call when warnings are raised while reading a model.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
