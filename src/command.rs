use std::ffi::OsString;

use crate::{
    flag::Flag,
    flag_set::FlagSet,
    rt::{self, Parser},
    value::TypedValue,
    Result,
};

/// A command with its own flag scope and optional subcommands.
///
/// After [`Command::parse`], the command and the chain of subcommands picked
/// on the command line form the scope hierarchy that lookups resolve against,
/// innermost scope first.
#[derive(Debug)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) about: String,
    pub(crate) flags: FlagSet,
    pub(crate) subcommands: Vec<Command>,
    args: Vec<OsString>,
    selected: Option<usize>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Command {
        let name = name.into();
        Command {
            flags: FlagSet::new(name.clone()),
            name,
            about: String::new(),
            subcommands: Vec::new(),
            args: Vec::new(),
            selected: None,
        }
    }

    pub fn set_about(mut self, about: impl Into<String>) -> Command {
        self.about = about.into();
        self
    }

    /// Declares `flag` in this command's scope.
    pub fn add_flag<F: Flag>(mut self, flag: F) -> Result<Command> {
        flag.apply(&mut self.flags)?;
        Ok(self)
    }

    pub fn add_subcommand(mut self, cmd: Command) -> Command {
        self.subcommands.push(cmd);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Positional arguments left over after flags and subcommand selection.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// The subcommand chosen on the command line, if any.
    pub fn subcommand(&self) -> Option<&Command> {
        self.selected.map(|idx| &self.subcommands[idx])
    }

    /// Parses `args` into this command's flags and subcommands.
    ///
    /// Parsing again starts from a clean positional list and subcommand
    /// selection. Flag values carry over from the previous call unless the
    /// new arguments set them.
    pub fn parse<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let mut p = Parser::new(args.into_iter().map(Into::into).collect());
        self.parse_(&mut p, "")
    }

    pub fn parse_from_env(&mut self) -> Result<()> {
        let mut p = Parser::new_from_env();
        self.parse_(&mut p, "")
    }

    fn parse_(&mut self, p: &mut Parser, prefix: &str) -> Result<()> {
        self.args.clear();
        self.selected = None;
        while let Some(arg) = p.pop_flag() {
            match arg {
                Ok(flag) => {
                    if flag == "-h" || flag == "--help" {
                        return Err(p.help(self.help_with_prefix(prefix)));
                    }
                    let (name, inline) = rt::split_flag(&flag);
                    if !self.flags.contains(name) {
                        return Err(p.unexpected_flag(&flag));
                    }
                    let raw = match inline {
                        Some(value) => value.to_string(),
                        None => p.next_value(&flag)?,
                    };
                    self.flags.set(name, &raw)?;
                }
                Err(arg) => {
                    let sub = if self.args.is_empty() {
                        self.subcommands.iter().position(|it| arg == it.name.as_str())
                    } else {
                        None
                    };
                    match sub {
                        Some(idx) => {
                            self.selected = Some(idx);
                            let prefix = format!("{prefix}{} ", self.name);
                            self.subcommands[idx].parse_(p, &prefix)?;
                            break;
                        }
                        None => self.args.push(arg),
                    }
                }
            }
        }
        self.flags.check_required()
    }

    /// This command followed by the invoked subcommands, outermost first.
    fn lineage(&self) -> Vec<&Command> {
        let mut res = vec![self];
        let mut cmd = self;
        while let Some(sub) = cmd.subcommand() {
            res.push(sub);
            cmd = sub;
        }
        res
    }

    /// Finds the innermost invoked scope that declares `name`.
    pub fn lookup_flag_set(&self, name: &str) -> Option<&FlagSet> {
        self.lineage().into_iter().rev().map(|it| &it.flags).find(|it| it.contains(name))
    }

    /// Looks up the flag `name` and returns its value if it is of kind `V`.
    ///
    /// A flag that is not declared in any invoked scope, or that is declared
    /// with another kind, reads as `None`.
    pub fn value<V: TypedValue>(&self, name: &str) -> Option<V::Output> {
        let set = match self.lookup_flag_set(name) {
            Some(set) => set,
            None => {
                tracing::trace!(
                    "{} NOT available for flag name {name:?}, no scope declares it (cmd={:?})",
                    V::KIND,
                    self.name
                );
                return None;
            }
        };
        match set.lookup_as::<V>(name) {
            Some(value) => {
                let value = value.get();
                tracing::trace!(
                    "{} available for flag name {name:?} with value={value:?} (cmd={:?})",
                    V::KIND,
                    set.name()
                );
                Some(value)
            }
            None => {
                tracing::trace!(
                    "{} NOT available for flag name {name:?} (cmd={:?})",
                    V::KIND,
                    set.name()
                );
                None
            }
        }
    }

    /// Was `name` set on the command line or from the environment?
    pub fn is_set(&self, name: &str) -> bool {
        self.lookup_flag_set(name).map_or(false, |it| it.is_set(name))
    }
}
