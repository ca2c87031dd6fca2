// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A unified error type for configuration, parsing, validation, and action
//! failures.

use std::fmt;

use crate::ident::InvalidIdentifier;

/// The kind of identifier (or token) a [`ParseError`] was raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The offending input came from a flag.
    Flag,
    /// The offending input came from a positional argument.
    Argument,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Flag => write!(f, "flag"),
            ParseErrorKind::Argument => write!(f, "argument"),
        }
    }
}

/// A single `Value` parse failure, bearing everything spec.md §6 requires:
/// kind, identifier, input, target type, and underlying cause.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub(crate) kind: ParseErrorKind,
    pub(crate) name: String,
    pub(crate) input: String,
    pub(crate) type_name: &'static str,
    pub(crate) cause: String,
    pub(crate) appending: bool,
}

impl ParseError {
    /// The kind of identifier the failing value belonged to.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The flag or argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw input string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The canonical type tag name (see [`crate::value::Value::type_name`]).
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The underlying parse failure description.
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.appending {
            write!(
                f,
                "parse error: {} \"{}\" (type {}) cannot append element \"{}\": {}",
                self.kind, self.name, self.type_name, self.input, self.cause
            )
        } else {
            write!(
                f,
                "parse error: {} \"{}\" received invalid value \"{}\" (expected {}): {}",
                self.kind, self.name, self.input, self.type_name, self.cause
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// The top-level error type returned by configuration, parsing, validation,
/// and dispatch.
#[derive(Debug)]
pub enum Error {
    /// A build-time configuration mistake: invalid identifier, duplicate
    /// flag/shorthand/child/argument name, mis-ordered positional args, or a
    /// command with neither an action nor children.
    Configuration(String),
    /// A token failed to parse: unknown flag, missing value, bad shape, or a
    /// `Value::parse` failure.
    Parse(ParseError),
    /// A flag token was malformed, named an unknown flag or shorthand, or
    /// omitted a value its flag requires. Distinct from [`Error::Parse`]
    /// because these failures have no associated `Value` type to report.
    Flag(String),
    /// A positional validator rejected the resolved positional list.
    Validation(String),
    /// The user's action returned an error.
    Action(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// True if this is a [`Error::Parse`] variant, matching the `Value`
    /// parse-failure predicate spec.md §7 calls `is_parse_error`.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::Flag(_))
    }

    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn flag(msg: impl Into<String>) -> Self {
        Error::Flag(msg.into())
    }
}

impl From<InvalidIdentifier> for Error {
    fn from(err: InvalidIdentifier) -> Self {
        Error::Configuration(err.to_string())
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Error::Parse(err) => write!(f, "{err}"),
            Error::Flag(msg) => write!(f, "{msg}"),
            Error::Validation(msg) => write!(f, "{msg}"),
            Error::Action(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Action(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
