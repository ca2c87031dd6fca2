// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A declarative, type-safe builder for nested, subcommand-oriented
//! command-line interfaces.
//!
//! A program is built as a tree of [`Command`]s, each carrying typed
//! [`Flag`]s and positional [`Arg`]s backed by a closed set of
//! [`Value`] types, a pluggable positional [`Validator`], and an
//! [`Action`]. [`Command::run`] resolves a raw argument vector down the
//! tree to a target command, parses its flags, validates its positionals,
//! and dispatches to its action.
//!
//! ```
//! use cmdtree::{Arg, Command, Flag, Validator, ValueKind};
//!
//! let say = Command::builder("say")
//!     .description("say a greeting")
//!     .flag(Flag::builder("shout", ValueKind::Bool).shorthand('s').build().unwrap())
//!     .unwrap()
//!     .positional(Arg::required("name", ValueKind::StringScalar).build().unwrap())
//!     .validator(Validator::Exact(1))
//!     .action(|ctx| {
//!         let shout = ctx.command.flag_set().get("shout").unwrap().stringify() == "true";
//!         let greeting = format!("hello, {}", ctx.args[0]);
//!         println!("{}", if shout { greeting.to_uppercase() } else { greeting });
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut root = Command::builder("greeter").subcommand(say).build().unwrap();
//! root.run(&["say".to_string(), "world".to_string(), "--shout".to_string()]).unwrap();
//! ```

#![deny(missing_docs)]

/// Positional (non-flag) command-line arguments.
pub mod arg;
/// The command tree, builder, resolver, and dispatcher.
pub mod command;
/// The unified error type returned by configuration, parsing, validation,
/// and dispatch.
pub mod error;
/// Named, typed command-line switches.
pub mod flag;
/// The per-command flag table and argument-parsing state machine.
pub mod flagset;
mod help;
/// Flag and positional-argument identifier validation.
pub mod ident;
/// The closed set of positional-argument validators.
pub mod validator;
/// The polymorphic typed value cell shared by [`Flag`] and [`Arg`].
pub mod value;

pub use arg::{Arg, ArgBuilder, Requiredness};
pub use command::{ActionContext, Action, Command, CommandBuilder};
pub use error::{Error, ParseError, ParseErrorKind};
pub use flag::{Flag, FlagBuilder};
pub use flagset::FlagSet;
pub use ident::NO_SHORTHAND;
pub use validator::Validator;
pub use value::{Value, ValueKind};
