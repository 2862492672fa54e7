use std::{fmt, marker::PhantomData};

use crate::{
    flag_set::{FlagSet, FlagSpec},
    value::{Destination, TypedValue, Value},
    Error, Result,
};

/// Builds value objects of one kind.
///
/// `T` is the semantic type the flag produces and `C` the configuration
/// struct supplied when the flag is declared.
pub trait ValueCreator<T, C>: TypedValue<Output = T> + Sized {
    /// Stores `default` in `destination` and wraps it into a value object.
    ///
    /// The cell must be readable as soon as this returns, before any
    /// argument is parsed.
    fn create(default: T, destination: Destination<T>, config: &C) -> Self;

    /// Renders `value` for help output.
    ///
    /// A zero value renders as an empty string.
    fn display(value: &T) -> String;
}

/// Anything that can be declared on a [`FlagSet`].
pub trait Flag {
    fn name(&self) -> &str;

    /// Creates the value object for this flag and registers it in `set`.
    fn apply(self, set: &mut FlagSet) -> Result<()>;
}

/// A flag kind parameterized by its semantic type `T`, configuration `C`
/// and value creator `VC`.
///
/// ```
/// use flagval::{FlagBase, Location, Timestamp, TimestampConfig, TimestampValue};
///
/// type Deadline = FlagBase<Timestamp, TimestampConfig, TimestampValue>;
///
/// let flag = Deadline::new("deadline")
///     .alias("d")
///     .usage("Hard stop for the run")
///     .config(TimestampConfig::new("%Y-%m-%d %H:%M").timezone(Location::Utc))
///     .env("DEADLINE");
/// # let _ = flag;
/// ```
pub struct FlagBase<T, C, VC> {
    name: String,
    aliases: Vec<String>,
    usage: String,
    value: T,
    config: C,
    destination: Option<Destination<T>>,
    env_vars: Vec<String>,
    required: bool,
    hidden: bool,
    default_text: Option<String>,
    creator: PhantomData<fn() -> VC>,
}

impl<T: Default, C: Default, VC> FlagBase<T, C, VC> {
    pub fn new(name: impl Into<String>) -> FlagBase<T, C, VC> {
        FlagBase {
            name: name.into(),
            aliases: Vec::new(),
            usage: String::new(),
            value: T::default(),
            config: C::default(),
            destination: None,
            env_vars: Vec::new(),
            required: false,
            hidden: false,
            default_text: None,
            creator: PhantomData,
        }
    }
}

impl<T, C, VC> FlagBase<T, C, VC> {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Value stored in the destination until the flag is set.
    pub fn value(mut self, value: T) -> Self {
        self.value = value;
        self
    }

    pub fn config(mut self, config: C) -> Self {
        self.config = config;
        self
    }

    /// Parse into a caller-provided cell instead of a private one.
    ///
    /// Take a [`Handle`](crate::Handle) from the cell first to read the value
    /// after parsing.
    pub fn destination(mut self, destination: Destination<T>) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Environment variable consulted when the flag is declared.
    ///
    /// Variables are tried in the order they were added and the first
    /// non-empty one is used. The command line still overrides it.
    pub fn env(mut self, var: impl Into<String>) -> Self {
        self.env_vars.push(var.into());
        self
    }

    pub fn required(mut self, yes: bool) -> Self {
        self.required = yes;
        self
    }

    pub fn hidden(mut self, yes: bool) -> Self {
        self.hidden = yes;
        self
    }

    /// Overrides the `[default: ..]` text shown in help.
    pub fn default_text(mut self, text: impl Into<String>) -> Self {
        self.default_text = Some(text.into());
        self
    }
}

impl<T, C, VC> Flag for FlagBase<T, C, VC>
where
    VC: ValueCreator<T, C> + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(self, set: &mut FlagSet) -> Result<()> {
        let default_text = match self.default_text {
            Some(text) => text,
            None => VC::display(&self.value),
        };
        let destination = self.destination.unwrap_or_default();
        let mut value = VC::create(self.value, destination, &self.config);

        let mut from_env = None;
        for var in &self.env_vars {
            let raw = match std::env::var(var) {
                Ok(raw) if !raw.is_empty() => raw,
                _ => continue,
            };
            value.set(&raw).map_err(|source| Error::InvalidEnv {
                flag: crate::dashed(&self.name),
                var: var.clone(),
                value: raw.clone(),
                source,
            })?;
            tracing::trace!("flag {:?} set from ${}", self.name, var);
            from_env = Some(var.clone());
            break;
        }

        let mut names = vec![self.name];
        names.extend(self.aliases);
        let spec = FlagSpec {
            names,
            usage: self.usage,
            env_vars: self.env_vars,
            from_env,
            required: self.required,
            hidden: self.hidden,
            default_text,
        };
        set.register(spec, Box::new(value))
    }
}

impl<T: fmt::Debug, C: fmt::Debug, VC> fmt::Debug for FlagBase<T, C, VC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagBase")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("usage", &self.usage)
            .field("value", &self.value)
            .field("config", &self.config)
            .field("env_vars", &self.env_vars)
            .field("required", &self.required)
            .field("hidden", &self.hidden)
            .finish()
    }
}
