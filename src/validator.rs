// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The closed set of positional-argument validators.
//!
//! A validator is a pure predicate over a command's resolved positional
//! token list; generalized here from the teacher's `MissingRequirements`
//! error-message builder (`argh/src/lib.rs`), which accumulates missing
//! requirements rather than checking a fixed count, into a small closed enum
//! a `Command` can hold directly.

use crate::error::Error;

/// A positional-argument validator (spec.md §4.6).
#[derive(Clone)]
pub enum Validator {
    /// Always succeeds.
    Any,
    /// Fails if any positionals remain.
    None,
    /// Fails unless at least `n` positionals are present.
    Min(usize),
    /// Fails if more than `n` positionals are present.
    Max(usize),
    /// Fails unless exactly `n` positionals are present.
    Exact(usize),
    /// Fails unless the positional count is within `[lo, hi]` inclusive.
    Between(usize, usize),
    /// Fails unless every positional is a member of the given set.
    OneOf(Vec<String>),
    /// Fail-fast composition: the first failing validator wins.
    Combine(Vec<Validator>),
}

impl Validator {
    /// Run this validator against a command's name, its children's names
    /// (used by [`Validator::None`] to build the "unknown subcommand"
    /// message), and the resolved positional token list.
    pub fn validate(
        &self,
        command_name: &str,
        child_names: &[String],
        positionals: &[String],
    ) -> Result<(), Error> {
        match self {
            Validator::Any => Ok(()),
            Validator::None => {
                if positionals.is_empty() {
                    return Ok(());
                }
                if !child_names.is_empty() {
                    Err(Error::validation(format!(
                        "unknown subcommand \"{}\" for command \"{}\", available subcommands: [{}]",
                        positionals[0],
                        command_name,
                        child_names.join(", ")
                    )))
                } else {
                    Err(Error::validation(format!(
                        "command {} accepts no arguments but got [{}]",
                        command_name,
                        positionals.join(" ")
                    )))
                }
            }
            Validator::Min(n) => {
                if positionals.len() >= *n {
                    Ok(())
                } else {
                    Err(Error::validation(format!(
                        "command {} requires at least {} argument(s) but got {}",
                        command_name,
                        n,
                        positionals.len()
                    )))
                }
            }
            Validator::Max(n) => {
                if positionals.len() <= *n {
                    Ok(())
                } else {
                    Err(Error::validation(format!(
                        "command {} accepts at most {} argument(s) but got {}",
                        command_name,
                        n,
                        positionals.len()
                    )))
                }
            }
            Validator::Exact(n) => {
                if positionals.len() == *n {
                    Ok(())
                } else {
                    Err(Error::validation(format!(
                        "command {} requires exactly {} argument(s) but got {}",
                        command_name,
                        n,
                        positionals.len()
                    )))
                }
            }
            Validator::Between(lo, hi) => {
                if positionals.len() >= *lo && positionals.len() <= *hi {
                    Ok(())
                } else {
                    Err(Error::validation(format!(
                        "command {} requires between {} and {} argument(s) but got {}",
                        command_name,
                        lo,
                        hi,
                        positionals.len()
                    )))
                }
            }
            Validator::OneOf(allowed) => {
                for p in positionals {
                    if !allowed.contains(p) {
                        return Err(Error::validation(format!(
                            "command {} received unexpected argument \"{}\", expected one of: [{}]",
                            command_name,
                            p,
                            allowed.join(", ")
                        )));
                    }
                }
                Ok(())
            }
            Validator::Combine(validators) => {
                for v in validators {
                    v.validate(command_name, child_names, positionals)?;
                }
                Ok(())
            }
        }
    }
}
