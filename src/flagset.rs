// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The flag table and token-stream parser for a single command node.
//!
//! Generalized from the teacher's `parse_struct_args`/`ParseStructOptions`
//! state machine (`argh/src/lib.rs`), which walks a `&[&str]` slot by slot
//! dispatching into codegen'd per-field setters, into a runtime map keyed by
//! name and shorthand that drives [`crate::value::Value`] cells directly.

use std::collections::HashMap;

use log::trace;

use crate::error::Error;
use crate::flag::Flag;

/// The long name or shorthand a [`FlagSet::add`] collision was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenShape<'a> {
    /// The literal `--` terminator.
    Terminator,
    /// `--NAME=VALUE`.
    LongWithValue { name: &'a str, value: &'a str },
    /// `--NAME`.
    LongBare { name: &'a str },
    /// `-` alone: an empty shorthand, always an error.
    EmptyShort,
    /// `-CHARS`, where `CHARS` may itself contain an `=`.
    ShortCluster { chars: &'a str },
    /// Anything else: a bare positional token.
    Positional,
}

fn classify(token: &str) -> TokenShape<'_> {
    if token == "--" {
        return TokenShape::Terminator;
    }
    if let Some(rest) = token.strip_prefix("--") {
        return match rest.split_once('=') {
            Some((name, value)) => TokenShape::LongWithValue { name, value },
            None => TokenShape::LongBare { name: rest },
        };
    }
    if token == "-" {
        return TokenShape::EmptyShort;
    }
    if let Some(chars) = token.strip_prefix('-') {
        return TokenShape::ShortCluster { chars };
    }
    TokenShape::Positional
}

/// A cluster beginning with this prefix is injected by a test harness (Go's
/// `testing` package forwards `-test.*` flags onto `os.Args`) and must be
/// swallowed whole rather than treated as unknown.
fn is_test_harness_noise(chars: &str) -> bool {
    chars.starts_with("test.")
}

/// A command's flag table: the declared [`Flag`]s, keyed for lookup by long
/// name and by shorthand, plus the positional and tail tokens accumulated by
/// the most recent [`FlagSet::parse`].
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: Vec<Flag>,
    by_name: HashMap<String, usize>,
    by_shorthand: HashMap<char, usize>,
    args: Vec<String>,
    tail: Vec<String>,
}

impl FlagSet {
    /// An empty flag table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag, rejecting a name or shorthand already in use.
    pub fn add(&mut self, flag: Flag) -> Result<(), Error> {
        if let Some(&existing) = self.by_name.get(flag.name()) {
            return Err(Error::configuration(format!(
                "flag \"{}\" collides with existing flag \"{}\"",
                flag.name(),
                self.flags[existing].name()
            )));
        }
        if flag.shorthand() != crate::ident::NO_SHORTHAND {
            if let Some(&existing) = self.by_shorthand.get(&flag.shorthand()) {
                return Err(Error::configuration(format!(
                    "flag \"{}\" shorthand '{}' collides with existing flag \"{}\"",
                    flag.name(),
                    flag.shorthand(),
                    self.flags[existing].name()
                )));
            }
        }
        let index = self.flags.len();
        self.by_name.insert(flag.name().to_string(), index);
        if flag.shorthand() != crate::ident::NO_SHORTHAND {
            self.by_shorthand.insert(flag.shorthand(), index);
        }
        self.flags.push(flag);
        Ok(())
    }

    /// All declared flags, in registration order.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Look up a flag by long name.
    pub fn get(&self, name: &str) -> Option<&Flag> {
        self.by_name.get(name).map(|&i| &self.flags[i])
    }

    /// Look up a flag by shorthand.
    pub fn get_short(&self, shorthand: char) -> Option<&Flag> {
        self.by_shorthand.get(&shorthand).map(|&i| &self.flags[i])
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Flag> {
        self.by_name.get(name).copied().map(move |i| &mut self.flags[i])
    }

    fn get_short_mut(&mut self, shorthand: char) -> Option<&mut Flag> {
        self.by_shorthand.get(&shorthand).copied().map(move |i| &mut self.flags[i])
    }

    /// The positional tokens collected by the most recent [`FlagSet::parse`].
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The tokens after a `--` terminator from the most recent
    /// [`FlagSet::parse`], or empty if none was seen.
    pub fn tail(&self) -> &[String] {
        &self.tail
    }

    /// Whether `--help`/`-h` was present among the positional-stripped
    /// tokens most recently parsed.
    pub fn help_requested(&self) -> bool {
        self.get("help").map(|f| f.stringify() == "true").unwrap_or(false)
    }

    /// Whether `--version`/`-V` was present among the tokens most recently
    /// parsed.
    pub fn version_requested(&self) -> bool {
        self.get("version").map(|f| f.stringify() == "true").unwrap_or(false)
    }

    /// Parse `tokens` against the declared flags, binding matched flags'
    /// `Value` cells in place and collecting everything else into
    /// [`FlagSet::args`] and [`FlagSet::tail`].
    pub fn parse(&mut self, tokens: &[String]) -> Result<(), Error> {
        self.args.clear();
        self.tail.clear();

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i].as_str();
            match classify(token) {
                TokenShape::Terminator => {
                    self.tail.extend(tokens[i + 1..].iter().cloned());
                    return Ok(());
                }
                TokenShape::LongWithValue { name, value } => {
                    trace!("long flag --{name}={value}");
                    validate_flag_name(name)?;
                    let value = value.to_string();
                    match self.get_mut(name) {
                        Some(flag) => flag.parse(&value)?,
                        None => return Err(unknown_long(name)),
                    }
                    i += 1;
                }
                TokenShape::LongBare { name } => {
                    trace!("long flag --{name}");
                    validate_flag_name(name)?;
                    let implied = self.get(name).map(|f| f.no_arg_value().to_string());
                    match implied {
                        Some(implied) if !implied.is_empty() => {
                            self.get_mut(name).unwrap().parse(&implied)?;
                            i += 1;
                        }
                        Some(_) => {
                            let value = tokens.get(i + 1).ok_or_else(|| missing_value(name))?;
                            self.get_mut(name).unwrap().parse(value)?;
                            i += 2;
                        }
                        None => return Err(unknown_long(name)),
                    }
                }
                TokenShape::EmptyShort => {
                    return Err(Error::flag("invalid flag \"-\": empty identifier".to_string()));
                }
                TokenShape::ShortCluster { chars } => {
                    if is_test_harness_noise(chars) {
                        trace!("swallowing test-harness flag -{chars}");
                        i += 1;
                        continue;
                    }
                    i += self.parse_short_cluster(token, chars, tokens, i)?;
                }
                TokenShape::Positional => {
                    self.args.push(token.to_string());
                    i += 1;
                }
            }
        }
        Ok(())
    }

    /// Parse a `-CHARS` cluster starting at `tokens[index]`. Returns the
    /// number of tokens consumed (at least 1, at most 2: the cluster token
    /// itself and, if the last flag in the cluster needs a separate value,
    /// the following token).
    fn parse_short_cluster(
        &mut self,
        whole_token: &str,
        chars: &str,
        tokens: &[String],
        index: usize,
    ) -> Result<usize, Error> {
        let mut rest = chars;
        loop {
            let mut it = rest.char_indices();
            let (_, c) = match it.next() {
                Some(pair) => pair,
                None => return Ok(1),
            };
            let after = &rest[c.len_utf8()..];
            crate::ident::validate_shorthand(c)
                .map_err(|_| unknown_short(whole_token, c))?;
            if self.get_short(c).is_none() {
                return Err(unknown_short(whole_token, c));
            }

            if let Some(inline_value) = after.strip_prefix('=') {
                let inline_value = inline_value.to_string();
                self.get_short_mut(c).unwrap().parse(&inline_value)?;
                return Ok(1);
            }

            let implied = self.get_short(c).unwrap().no_arg_value().to_string();
            if !implied.is_empty() {
                self.get_short_mut(c).unwrap().parse(&implied)?;
                if after.is_empty() {
                    return Ok(1);
                }
                rest = after;
                continue;
            }

            if !after.is_empty() {
                let suffix_value = after.to_string();
                self.get_short_mut(c).unwrap().parse(&suffix_value)?;
                return Ok(1);
            }

            let value = tokens
                .get(index + 1)
                .ok_or_else(|| missing_value(&self.get_short(c).unwrap().name().to_string()))?
                .clone();
            self.get_short_mut(c).unwrap().parse(&value)?;
            return Ok(2);
        }
    }
}

/// Validate a long flag name encountered mid-parse, mapping a failure to
/// `Error::Flag` rather than the blanket `Error::Configuration` that
/// `From<InvalidIdentifier>` gives build-time callers (`Flag::builder`,
/// `Arg::builder`). A malformed identifier typed at the command line is a
/// parse error (spec.md §7 kind 3), not a configuration mistake.
fn validate_flag_name(name: &str) -> Result<(), Error> {
    crate::ident::validate_name(name).map_err(|e| Error::flag(e.to_string()))
}

fn unknown_long(name: &str) -> Error {
    Error::flag(format!("unknown flag \"--{name}\""))
}

fn unknown_short(whole_token: &str, c: char) -> Error {
    Error::flag(format!("unknown flag \"{whole_token}\": unrecognized shorthand '{c}'"))
}

fn missing_value(name: &str) -> Error {
    Error::flag(format!("flag \"{name}\" requires a value"))
}

/// Walk `tokens` against `flagset` without binding any value, yielding the
/// index of the first token that resolution should treat as a bare
/// positional candidate (a potential child command name). Unlike
/// [`FlagSet::parse`], this never errors: an unrecognized flag is assumed to
/// take no value and is simply skipped, since the authoritative parse runs
/// later against the command actually selected by resolution.
pub(crate) fn first_bare_candidate_index(flagset: &FlagSet, tokens: &[String]) -> Option<usize> {
    let mut i = 0;
    while i < tokens.len() {
        match classify(tokens[i].as_str()) {
            TokenShape::Terminator => return None,
            TokenShape::LongWithValue { .. } => i += 1,
            TokenShape::LongBare { name } => {
                i += 1;
                if flagset.get(name).map(|f| f.no_arg_value().is_empty()).unwrap_or(false)
                    && i < tokens.len()
                {
                    i += 1;
                }
            }
            TokenShape::EmptyShort => i += 1,
            TokenShape::ShortCluster { chars } => {
                i += 1;
                if is_test_harness_noise(chars) {
                    continue;
                }
                if cluster_expects_trailing_value(flagset, chars) && i < tokens.len() {
                    i += 1;
                }
            }
            TokenShape::Positional => return Some(i),
        }
    }
    None
}

fn cluster_expects_trailing_value(flagset: &FlagSet, chars: &str) -> bool {
    let mut rest = chars;
    loop {
        let mut it = rest.char_indices();
        let (_, c) = match it.next() {
            Some(pair) => pair,
            None => return false,
        };
        let after = &rest[c.len_utf8()..];
        let flag = match flagset.get_short(c) {
            Some(flag) => flag,
            None => return false,
        };
        if after.starts_with('=') {
            return false;
        }
        if !flag.no_arg_value().is_empty() {
            if after.is_empty() {
                return false;
            }
            rest = after;
            continue;
        }
        if !after.is_empty() {
            return false;
        }
        return true;
    }
}
