use std::ffi::OsString;

use crate::{Error, Result};

/// Walks the raw argument list front to back.
pub(crate) struct Parser {
    after_double_dash: bool,
    rargs: Vec<OsString>,
}

impl Parser {
    pub(crate) fn new(mut args: Vec<OsString>) -> Self {
        args.reverse();
        Self { after_double_dash: false, rargs: args }
    }

    pub(crate) fn new_from_env() -> Self {
        let args = std::env::args_os().collect::<Vec<_>>();
        let mut res = Parser::new(args);
        let _progn = res.next();
        res
    }

    /// `Ok` for something that looks like a flag, `Err` for a positional.
    pub(crate) fn pop_flag(&mut self) -> Option<Result<String, OsString>> {
        if self.after_double_dash {
            self.next().map(Err)
        } else {
            let arg = self.next()?;
            let arg_str = arg.to_str().unwrap_or_default();
            if arg_str.starts_with('-') && arg_str != "-" {
                if arg_str == "--" {
                    self.after_double_dash = true;
                    return self.next().map(Err);
                }
                Some(arg.into_string())
            } else {
                Some(Err(arg))
            }
        }
    }

    fn next(&mut self) -> Option<OsString> {
        self.rargs.pop()
    }

    pub(crate) fn next_value(&mut self, flag: &str) -> Result<String> {
        let value =
            self.next().ok_or_else(|| Error::MissingValue { flag: flag.to_string() })?;
        value.into_string().map_err(|value| Error::InvalidUtf8 { flag: flag.to_string(), value })
    }

    pub(crate) fn unexpected_flag(&self, flag: &str) -> Error {
        Error::UnknownFlag { flag: flag.to_string() }
    }

    pub(crate) fn help(&self, help: String) -> Error {
        Error::Help(help)
    }
}

/// Splits `--name=value` and `-n=value` into the bare name and the inline
/// value, if any.
pub(crate) fn split_flag(flag: &str) -> (&str, Option<&str>) {
    let bare = flag.strip_prefix("--").or_else(|| flag.strip_prefix('-')).unwrap_or(flag);
    match bare.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (bare, None),
    }
}
