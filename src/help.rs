use std::fmt::Write;

use crate::{command::Command, dashed, flag_set::Entry};

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

impl Command {
    /// Renders the help text for this command and its subcommands.
    pub fn help(&self) -> String {
        self.help_with_prefix("")
    }

    /// Help for a subcommand, headed by the names of its parents.
    pub(crate) fn help_with_prefix(&self, prefix: &str) -> String {
        let mut buf = String::new();
        help_rec(&mut buf, prefix, self, false);
        buf
    }
}

fn help_rec(buf: &mut String, prefix: &str, cmd: &Command, nested: bool) {
    w!(buf, "{prefix}{}\n", cmd.name);
    if !cmd.about.is_empty() {
        write_lines_indented(buf, &cmd.about, 2);
    }
    let indent = if nested { "  " } else { "" };

    blank_line(buf);
    w!(buf, "{indent}OPTIONS:\n");
    for entry in cmd.flags.entries().filter(|it| !it.spec.hidden) {
        emit_flag(buf, entry);
        blank_line(buf);
    }
    w!(buf, "    -h, --help\n");
    write_lines_indented(buf, "Prints help information.", 6);

    if !cmd.subcommands.is_empty() {
        if !nested {
            blank_line(buf);
            w!(buf, "SUBCOMMANDS:\n");
        }

        let prefix = format!("{prefix}{} ", cmd.name);
        for sub in &cmd.subcommands {
            blank_line(buf);
            help_rec(buf, &prefix, sub, true);
        }
    }
}

fn emit_flag(buf: &mut String, entry: &Entry) {
    let spec = &entry.spec;
    let mut names = spec.names.iter().map(|it| dashed(it)).collect::<Vec<_>>();
    names.sort_by_key(|it| it.starts_with("--"));
    let required = if spec.required { " (required)" } else { "" };
    w!(buf, "    {} <value>{required}\n", names.join(", "));

    if !spec.usage.is_empty() {
        write_lines_indented(buf, &spec.usage, 6);
    }
    if !spec.default_text.is_empty() {
        w!(buf, "      default: {}\n", spec.default_text);
    }
    if !spec.env_vars.is_empty() {
        let vars = spec.env_vars.iter().map(|it| format!("${it}")).collect::<Vec<_>>();
        w!(buf, "      env: {}", vars.join(", "));
        if let Some(var) = &spec.from_env {
            w!(buf, " (set from ${var})");
        }
        w!(buf, "\n");
    }
}

fn write_lines_indented(buf: &mut String, multiline_str: &str, indent: usize) {
    for line in multiline_str.split('\n').map(str::trim_end) {
        if line.is_empty() {
            w!(buf, "\n")
        } else {
            w!(buf, "{blank:indent$}{line}\n", blank = "");
        }
    }
}

fn blank_line(buf: &mut String) {
    w!(buf, "\n");
}
