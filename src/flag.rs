// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A named, typed switch: a [`crate::value::Value`] plus identifier
//! metadata.

use crate::error::{Error, ParseError, ParseErrorKind};
use crate::ident::{self, NO_SHORTHAND};
use crate::value::{Value, ValueKind};

/// A single flag: long name, optional shorthand, usage text, and the
/// [`Value`] cell it drives.
#[derive(Debug, Clone)]
pub struct Flag {
    pub(crate) name: String,
    pub(crate) shorthand: char,
    pub(crate) usage: String,
    pub(crate) default: String,
    pub(crate) value: Value,
}

impl Flag {
    /// Start building a flag of the given type, named `name`.
    pub fn builder(name: impl Into<String>, kind: ValueKind) -> FlagBuilder {
        FlagBuilder {
            name: name.into(),
            kind,
            shorthand: NO_SHORTHAND,
            usage: String::new(),
            default: String::new(),
        }
    }

    /// The flag's long name, e.g. `"verbose"` for `--verbose`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The flag's shorthand rune, or [`NO_SHORTHAND`] if it has none.
    pub fn shorthand(&self) -> char {
        self.shorthand
    }

    /// The flag's usage text.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The canonical type tag name.
    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    /// The current value's canonical textual form.
    pub fn stringify(&self) -> String {
        self.value.stringify()
    }

    /// The default string supplied at construction (for help rendering).
    pub fn default_string(&self) -> &str {
        &self.default
    }

    /// The string implied when this flag appears with no explicit value.
    pub fn no_arg_value(&self) -> &'static str {
        self.value.no_arg_value()
    }

    /// The current value cell.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replace or append this flag's value from a textual input, wrapping
    /// any failure into the public [`Error::Parse`] shape.
    pub fn parse(&mut self, input: &str) -> Result<(), Error> {
        self.value.parse(input).map_err(|failure| {
            Error::Parse(ParseError {
                kind: ParseErrorKind::Flag,
                name: self.name.clone(),
                input: input.to_string(),
                type_name: self.value.type_name(),
                cause: failure.cause,
                appending: failure.appending,
            })
        })
    }
}

/// Builder for a [`Flag`]; validates identifiers at [`FlagBuilder::build`].
pub struct FlagBuilder {
    name: String,
    kind: ValueKind,
    shorthand: char,
    usage: String,
    default: String,
}

impl FlagBuilder {
    /// Set the flag's shorthand rune.
    pub fn shorthand(mut self, shorthand: char) -> Self {
        self.shorthand = shorthand;
        self
    }

    /// Set the flag's usage text.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Set the flag's default value, given as its textual form.
    pub fn default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Validate the name and shorthand and construct the [`Flag`].
    pub fn build(self) -> Result<Flag, Error> {
        ident::validate_name(&self.name)?;
        ident::validate_shorthand(self.shorthand)?;
        let value = Value::with_default(self.kind, &self.default).map_err(|failure| {
            Error::Configuration(format!(
                "flag \"{}\": invalid default \"{}\": {}",
                self.name, self.default, failure.cause
            ))
        })?;
        Ok(Flag {
            name: self.name,
            shorthand: self.shorthand,
            usage: self.usage,
            default: self.default,
            value,
        })
    }
}
