// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Minimal, unaligned help and version text.
//!
//! spec.md §1 draws a hard boundary: the help/version *contract* (what
//! triggers them, what must be present) is in scope; tab-stop alignment and
//! colour are explicitly a collaborator's job, not this crate's
//! (`argh_shared::help::HelpInfo::help` does both column alignment and line
//! wrapping — this rendering keeps the section structure but drops both).

use crate::command::Command;

const INDENT: &str = "  ";

/// Render the plain help text for `command`, given the full `path` of
/// command names from the root to `command` (used for the usage line).
pub fn render_help(command: &Command, path: &[&str]) -> String {
    let mut out = String::new();

    out.push_str("Usage: ");
    out.push_str(&path.join(" "));
    for flag in command.flags() {
        out.push(' ');
        out.push('[');
        push_flag_usage(&mut out, flag);
        out.push(']');
    }
    for arg in command.positionals() {
        out.push(' ');
        if arg.is_required() {
            out.push('<');
            out.push_str(arg.name());
            out.push('>');
        } else {
            out.push('[');
            out.push('<');
            out.push_str(arg.name());
            out.push('>');
            out.push(']');
        }
    }
    if !command.subcommands().is_empty() {
        out.push_str(" <command> [<args>]");
    }
    out.push('\n');

    if !command.description().is_empty() {
        out.push('\n');
        out.push_str(command.description());
        out.push('\n');
    }

    if !command.positionals().is_empty() {
        out.push('\n');
        out.push_str("Arguments:\n");
        for arg in command.positionals() {
            out.push_str(INDENT);
            out.push_str(arg.name());
            if !arg.usage().is_empty() {
                out.push_str("  ");
                out.push_str(arg.usage());
            }
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str("Options:\n");
    for flag in command.flags() {
        out.push_str(INDENT);
        push_flag_name(&mut out, flag);
        if !flag.usage().is_empty() {
            out.push_str("  ");
            out.push_str(flag.usage());
        }
        out.push('\n');
    }

    if !command.subcommands().is_empty() {
        out.push('\n');
        out.push_str("Commands:\n");
        for child in command.subcommands() {
            out.push_str(INDENT);
            out.push_str(child.name());
            if !child.description().is_empty() {
                out.push_str("  ");
                out.push_str(child.description());
            }
            out.push('\n');
        }
    }

    if !command.examples().is_empty() {
        out.push('\n');
        out.push_str("Examples:\n");
        for example in command.examples() {
            out.push_str(INDENT);
            out.push_str(example);
            out.push('\n');
        }
    }

    out
}

/// Render the plain version text for `command`.
pub fn render_version(command: &Command) -> String {
    if command.version().is_empty() {
        format!("{}\n", command.name())
    } else {
        format!("{} {}\n", command.name(), command.version())
    }
}

fn push_flag_name(out: &mut String, flag: &crate::flag::Flag) {
    if flag.shorthand() != crate::ident::NO_SHORTHAND {
        out.push('-');
        out.push(flag.shorthand());
        out.push_str(", ");
    }
    out.push_str("--");
    out.push_str(flag.name());
}

fn push_flag_usage(out: &mut String, flag: &crate::flag::Flag) {
    if flag.shorthand() != crate::ident::NO_SHORTHAND {
        out.push('-');
        out.push(flag.shorthand());
    } else {
        out.push_str("--");
        out.push_str(flag.name());
    }
    if flag.no_arg_value().is_empty() {
        out.push_str(" <");
        out.push_str(flag.name());
        out.push('>');
    }
}
