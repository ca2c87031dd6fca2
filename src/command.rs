// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The command tree: nodes, the builder that freezes them, and the
//! resolver/dispatcher that walks argv down the tree to a leaf and runs it.
//!
//! Generalized from the teacher's `ParseStructSubCommand`/
//! `parse_struct_args` recursion (`argh/src/lib.rs`), which walks a
//! compile-time-generated enum of subcommand variants, into a runtime
//! `Vec<Command>` a caller builds by hand.

use log::{debug, trace};

use crate::arg::Arg;
use crate::error::Error;
use crate::flag::Flag;
use crate::flagset::{self, FlagSet};
use crate::help;
use crate::validator::Validator;

/// The data handed to a command's action: the resolved command, its full
/// positional token list, and the tail of tokens following `--` (see
/// spec.md §5 and SPEC_FULL.md §4.9). Deliberately inert — no cancellation
/// token is threaded through by the core; an embedder wanting one captures
/// it in the action closure instead.
pub struct ActionContext<'a> {
    /// The command that was resolved and dispatched to.
    pub command: &'a Command,
    /// The full positional token list (surplus tokens included).
    pub args: &'a [String],
    /// Tokens following a `--` terminator, verbatim.
    pub tail: &'a [String],
}

/// A command's runnable behaviour.
pub type Action = Box<dyn Fn(&ActionContext<'_>) -> Result<(), Error>>;

/// A node in the command tree: identity, metadata, its [`FlagSet`],
/// declared positional [`Arg`]s, a pluggable [`Validator`], an optional
/// [`Action`], and child commands.
///
/// There is no literal parent back-reference field: in this design the tree
/// is a plain owned `Vec<Command>` of children, so resolution and dispatch
/// only ever walk downward from the root and never need to look upward.
/// spec.md's "parent back-reference" invariant — lookup-only, cycle-free —
/// falls out for free from Rust ownership here: a child cannot be aliased
/// under two parents because it is moved into exactly one `children` vector.
pub struct Command {
    name: String,
    description: String,
    long_description: String,
    version: String,
    examples: Vec<String>,
    flag_set: FlagSet,
    positionals: Vec<Arg>,
    validator: Validator,
    action: Option<Action>,
    children: Vec<Command>,
}

impl Command {
    /// Start building a command named `name`.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            description: String::new(),
            long_description: String::new(),
            version: String::new(),
            examples: Vec::new(),
            flag_set: FlagSet::new(),
            positionals: Vec::new(),
            validator: Validator::Any,
            action: None,
            children: Vec::new(),
        }
    }

    /// The command's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short description shown in a parent's subcommand list.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The long description, if any, shown in the command's own help.
    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    /// The version string (empty if none was configured).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Usage examples attached to this command.
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// This command's flag table.
    pub fn flag_set(&self) -> &FlagSet {
        &self.flag_set
    }

    /// This command's declared positional arguments, in declared order.
    pub fn positionals(&self) -> &[Arg] {
        &self.positionals
    }

    /// This command's declared flags, in registration order.
    pub fn flags(&self) -> &[Flag] {
        self.flag_set.flags()
    }

    /// This command's children, in declared order.
    pub fn subcommands(&self) -> &[Command] {
        &self.children
    }

    /// Whether this command carries a runnable action.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Minimal, unaligned, uncoloured help text (spec.md §1: the help
    /// *contract* is in scope, pretty-printing is not). Uses this command's
    /// own name as the usage path since no parent back-reference is stored;
    /// [`Command::run`] renders the full root-to-leaf path internally when
    /// `--help`/`-h` short-circuits dispatch.
    pub fn help_text(&self) -> String {
        help::render_help(self, &[self.name.as_str()])
    }

    /// Minimal version text.
    pub fn version_text(&self) -> String {
        help::render_version(self)
    }

    /// Resolve `argv` against this tree and dispatch to the selected
    /// command (spec.md §4.5 Resolution and Dispatch).
    pub fn run(&mut self, argv: &[String]) -> Result<(), Error> {
        let tokens = argv.to_vec();
        let path = vec![self.name.clone()];
        self.resolve_and_dispatch(tokens, path)
    }

    /// Convenience wrapper over `std::env::args()`, mirroring the teacher's
    /// `from_env`/`cargo_from_env`. Unlike the teacher, this never calls
    /// `std::process::exit` — process exit is left to the embedder's `main`
    /// (spec.md §7: "no automatic process exit is performed by the core").
    pub fn run_from_env(&mut self) -> Result<(), Error> {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        self.run(&argv)
    }

    fn resolve_and_dispatch(
        &mut self,
        tokens: Vec<String>,
        mut path: Vec<String>,
    ) -> Result<(), Error> {
        match flagset::first_bare_candidate_index(&self.flag_set, &tokens) {
            Some(idx) => {
                let candidate = tokens[idx].clone();
                if let Some(pos) = self.children.iter().position(|c| c.name == candidate) {
                    trace!("resolving into child \"{candidate}\"");
                    let mut tokens = tokens;
                    tokens.remove(idx);
                    path.push(candidate);
                    return self.children[pos].resolve_and_dispatch(tokens, path);
                }
                self.dispatch(tokens, &path)
            }
            None => self.dispatch(tokens, &path),
        }
    }

    fn dispatch(&mut self, tokens: Vec<String>, path: &[String]) -> Result<(), Error> {
        debug!("dispatching to command \"{}\"", self.name);
        self.flag_set.parse(&tokens)?;

        if self.flag_set.help_requested() {
            let path_refs: Vec<&str> = path.iter().map(String::as_str).collect();
            print!("{}", help::render_help(self, &path_refs));
            return Ok(());
        }
        if self.flag_set.version_requested() {
            print!("{}", help::render_version(self));
            return Ok(());
        }

        let positionals = self.flag_set.args().to_vec();

        if self.action.is_some() {
            self.bind_positionals(&positionals)?;
        }

        let child_names: Vec<String> = self.children.iter().map(|c| c.name.clone()).collect();
        self.validator.validate(&self.name, &child_names, &positionals)?;

        if let Some(action) = &self.action {
            let tail = self.flag_set.tail().to_vec();
            let ctx = ActionContext { command: self, args: &positionals, tail: &tail };
            return action(&ctx);
        }

        if self.children.is_empty() {
            return Err(Error::configuration(format!(
                "command \"{}\" has neither an action nor children and cannot be dispatched",
                self.name
            )));
        }

        Ok(())
    }

    fn bind_positionals(&mut self, positionals: &[String]) -> Result<(), Error> {
        let mut idx = 0;
        for arg in self.positionals.iter_mut() {
            if arg.is_required() {
                match positionals.get(idx) {
                    Some(token) => {
                        arg.parse(token)?;
                        idx += 1;
                    }
                    None => {
                        return Err(Error::validation(format!(
                            "command {} missing required argument \"{}\"",
                            self.name,
                            arg.name()
                        )));
                    }
                }
            } else {
                match positionals.get(idx) {
                    Some(token) => {
                        arg.parse(token)?;
                        idx += 1;
                    }
                    None => arg.apply_default()?,
                }
            }
        }
        Ok(())
    }
}

/// Builder for a [`Command`]; collects options in any order and validates
/// at [`CommandBuilder::build`] (spec.md §3 "built once in a configuration
/// phase ... and then frozen").
pub struct CommandBuilder {
    name: String,
    description: String,
    long_description: String,
    version: String,
    examples: Vec<String>,
    flag_set: FlagSet,
    positionals: Vec<Arg>,
    validator: Validator,
    action: Option<Action>,
    children: Vec<Command>,
}

impl CommandBuilder {
    /// Set the short description shown in a parent's subcommand list.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the long description shown in this command's own help.
    pub fn long_description(mut self, long_description: impl Into<String>) -> Self {
        self.long_description = long_description.into();
        self
    }

    /// Set the version string reported by `--version`/`-V`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Attach a usage example.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Register a flag, returning a configuration error if its long name or
    /// shorthand collides with one already registered.
    pub fn flag(mut self, flag: Flag) -> Result<Self, Error> {
        self.flag_set.add(flag)?;
        Ok(self)
    }

    /// Register a declared positional argument. Ordering (required before
    /// optional) and name uniqueness are checked at [`CommandBuilder::build`].
    pub fn positional(mut self, arg: Arg) -> Self {
        self.positionals.push(arg);
        self
    }

    /// Set the positional validator (default: [`Validator::Any`]).
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Set this command's action, making it runnable.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&ActionContext<'_>) -> Result<(), Error> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Attach an already-built child command.
    pub fn subcommand(mut self, child: Command) -> Self {
        self.children.push(child);
        self
    }

    /// Validate identifiers and ordering, install the built-in
    /// `--help`/`-h` and `--version`/`-V` flags (skipped if the caller
    /// already declared a flag under that name, so they remain overridable
    /// per spec.md §9's help/version probe design), and freeze the
    /// [`Command`].
    pub fn build(mut self) -> Result<Command, Error> {
        let mut seen = std::collections::HashSet::new();
        for child in &self.children {
            if !seen.insert(child.name.clone()) {
                return Err(Error::configuration(format!(
                    "command \"{}\" has duplicate child name \"{}\"",
                    self.name, child.name
                )));
            }
        }

        let mut seen_args = std::collections::HashSet::new();
        let mut seen_optional = false;
        for arg in &self.positionals {
            if !seen_args.insert(arg.name().to_string()) {
                return Err(Error::configuration(format!(
                    "command \"{}\" has duplicate positional argument name \"{}\"",
                    self.name,
                    arg.name()
                )));
            }
            if arg.is_required() {
                if seen_optional {
                    return Err(Error::configuration(format!(
                        "command \"{}\": required argument \"{}\" declared after an optional argument",
                        self.name,
                        arg.name()
                    )));
                }
            } else {
                seen_optional = true;
            }
        }

        if self.flag_set.get("help").is_none() {
            self.flag_set.add(
                Flag::builder("help", crate::value::ValueKind::Bool)
                    .shorthand('h')
                    .usage("display usage information")
                    .build()?,
            )?;
        }
        if self.flag_set.get("version").is_none() {
            self.flag_set.add(
                Flag::builder("version", crate::value::ValueKind::Bool)
                    .shorthand('V')
                    .usage("display version information")
                    .build()?,
            )?;
        }

        if self.action.is_none() && self.children.is_empty() {
            return Err(Error::configuration(format!(
                "command \"{}\" must have either an action or at least one child",
                self.name
            )));
        }

        Ok(Command {
            name: self.name,
            description: self.description,
            long_description: self.long_description,
            version: self.version,
            examples: self.examples,
            flag_set: self.flag_set,
            positionals: self.positionals,
            validator: self.validator,
            action: self.action,
            children: self.children,
        })
    }
}
