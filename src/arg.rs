// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A named, typed, order-sensitive positional argument.

use crate::error::{Error, ParseError, ParseErrorKind};
use crate::ident;
use crate::value::{Value, ValueKind};

/// Whether a positional argument must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requiredness {
    /// Exactly one positional token must satisfy this argument.
    Required,
    /// A positional token may be absent; the cell falls back to its default.
    Optional,
}

/// A single positional argument: name, usage text, the [`Value`] cell it
/// drives, and whether it is required.
#[derive(Debug, Clone)]
pub struct Arg {
    pub(crate) name: String,
    pub(crate) usage: String,
    pub(crate) default: String,
    pub(crate) requiredness: Requiredness,
    pub(crate) kind: ValueKind,
    pub(crate) value: Value,
}

impl Arg {
    /// Start building a required positional argument.
    pub fn required(name: impl Into<String>, kind: ValueKind) -> ArgBuilder {
        ArgBuilder {
            name: name.into(),
            kind,
            usage: String::new(),
            default: String::new(),
            requiredness: Requiredness::Required,
        }
    }

    /// Start building an optional positional argument with the given
    /// default (given as its textual form).
    pub fn optional(name: impl Into<String>, kind: ValueKind, default: impl Into<String>) -> ArgBuilder {
        ArgBuilder {
            name: name.into(),
            kind,
            usage: String::new(),
            default: default.into(),
            requiredness: Requiredness::Optional,
        }
    }

    /// The argument's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument's usage text.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Whether this argument is required.
    pub fn is_required(&self) -> bool {
        self.requiredness == Requiredness::Required
    }

    /// The canonical type tag name.
    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    /// The current value cell.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The current value's canonical textual form.
    pub fn stringify(&self) -> String {
        self.value.stringify()
    }

    /// The user-provided default, or empty if required (spec.md §4.1
    /// `DefaultString`).
    pub fn default_string(&self) -> &str {
        if self.is_required() {
            ""
        } else {
            &self.default
        }
    }

    /// Bind this argument from a positional token.
    pub fn parse(&mut self, input: &str) -> Result<(), Error> {
        self.value.parse(input).map_err(|failure| {
            Error::Parse(ParseError {
                kind: ParseErrorKind::Argument,
                name: self.name.clone(),
                input: input.to_string(),
                type_name: self.value.type_name(),
                cause: failure.cause,
                appending: failure.appending,
            })
        })
    }

    /// Reset this argument's cell to its configured default (used when no
    /// positional token is present at its declared index).
    pub fn apply_default(&mut self) -> Result<(), Error> {
        self.value = Value::with_default(self.kind, &self.default).map_err(|failure| {
            Error::Configuration(format!(
                "arg \"{}\": invalid default \"{}\": {}",
                self.name, self.default, failure.cause
            ))
        })?;
        Ok(())
    }
}

/// Builder for an [`Arg`]; validates the name at [`ArgBuilder::build`].
pub struct ArgBuilder {
    name: String,
    kind: ValueKind,
    usage: String,
    default: String,
    requiredness: Requiredness,
}

impl ArgBuilder {
    /// Set the argument's usage text.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Validate the name and construct the [`Arg`].
    pub fn build(self) -> Result<Arg, Error> {
        ident::validate_name(&self.name)?;
        let value = Value::with_default(self.kind, &self.default).map_err(|failure| {
            Error::Configuration(format!(
                "arg \"{}\": invalid default \"{}\": {}",
                self.name, self.default, failure.cause
            ))
        })?;
        Ok(Arg {
            name: self.name,
            usage: self.usage,
            default: self.default,
            requiredness: self.requiredness,
            kind: self.kind,
            value,
        })
    }
}
