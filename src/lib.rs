//! Typed values for command line flags.
//!
//! The engine in this crate only knows how to feed raw argument text into
//! registered value objects and how to find them again by name. Everything
//! type specific lives behind two traits:
//!
//! * [`Value`] (and its typed refinement [`TypedValue`]) is what the engine
//!   calls `set` on for every occurrence of a flag.
//! * [`ValueCreator`] builds a value object from a default, a
//!   [`Destination`] cell and a per-kind configuration struct.
//!
//! [`FlagBase`] ties a semantic type, a configuration type and a creator
//! together into a declarable flag kind. Timestamps are provided out of the
//! box as [`TimestampFlag`]:
//!
//! ```
//! use flagval::{Command, TimestampConfig, TimestampFlag};
//!
//! let mut cmd = Command::new("report")
//!     .add_flag(TimestampFlag::new("start").config(TimestampConfig::new("%Y-%m-%d")))
//!     .unwrap();
//! cmd.parse(["--start=2023-06-15"]).unwrap();
//!
//! let start = cmd.timestamp("start").unwrap();
//! assert_eq!(start.to_string(), "2023-06-15 00:00:00 +00:00");
//! ```
//!
//! Lookups never fail loudly: a flag that is not declared in any scope of the
//! invoked command chain, or that is declared with a different kind, reads as
//! `None`. Misses are reported as `tracing` events at the `TRACE` level.

use std::ffi::OsString;

mod command;
mod flag;
mod flag_set;
mod help;
mod rt;
mod value;

pub mod timestamp;

pub use crate::{
    command::Command,
    flag::{Flag, FlagBase, ValueCreator},
    flag_set::FlagSet,
    timestamp::{Location, Timestamp, TimestampConfig, TimestampFlag, TimestampValue},
    value::{BoxError, Destination, Handle, TypedValue, Value},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error produced while declaring flags or parsing arguments.
///
/// `Help` is not really an error: it carries the rendered help text when the
/// user asked for it with `-h` or `--help`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown flag: `{flag}`. Use `--help` for more information")]
    UnknownFlag { flag: String },
    #[error("expected a value for `{flag}`")]
    MissingValue { flag: String },
    #[error("Can't parse `{flag}`, invalid utf8: {value:?}")]
    InvalidUtf8 { flag: String, value: OsString },
    #[error("Can't parse `{flag}`, {source}")]
    InvalidValue {
        flag: String,
        #[source]
        source: BoxError,
    },
    #[error("Flag is required: `{flag}`. Use `--help` for more information")]
    Required { flag: String },
    #[error("Flag redefined: `{flag}`")]
    Redefined { flag: String },
    #[error("Can't parse `{value}` from `${var}` for `{flag}`, {source}")]
    InvalidEnv {
        flag: String,
        var: String,
        value: String,
        #[source]
        source: BoxError,
    },
    #[error("{0}")]
    Help(String),
}

impl Error {
    /// Does this error represent a request for help?
    pub fn is_help(&self) -> bool {
        matches!(self, Error::Help(_))
    }

    /// Prints the error and exits the process.
    ///
    /// Help goes to stdout with a zero exit code, everything else to stderr.
    pub fn exit(self) -> ! {
        if self.is_help() {
            println!("{self}");
            std::process::exit(0)
        } else {
            eprintln!("{self}");
            std::process::exit(2)
        }
    }
}

/// Renders a flag name the way it is spelled on the command line.
pub(crate) fn dashed(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}
