// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Identifier validation shared by flag long names and positional argument
//! names.

use std::fmt;

/// The shorthand rune meaning "this flag has no shorthand".
pub const NO_SHORTHAND: char = '\0';

/// An invalid long name or shorthand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdentifier {
    kind: IdentifierKind,
    input: String,
    reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentifierKind {
    Name,
    Shorthand,
}

impl fmt::Display for InvalidIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            IdentifierKind::Name => "name",
            IdentifierKind::Shorthand => "shorthand",
        };
        write!(f, "invalid {what} \"{}\": {}", self.input, self.reason)
    }
}

impl std::error::Error for InvalidIdentifier {}

/// Validate a flag long name or positional argument name.
///
/// Rules: non-empty; ASCII letters and interior single hyphens only; no
/// leading or trailing hyphen; no whitespace; all lowercase.
pub fn validate_name(name: &str) -> Result<(), InvalidIdentifier> {
    let err = |reason: &'static str| {
        Err(InvalidIdentifier { kind: IdentifierKind::Name, input: name.to_string(), reason })
    };

    if name.is_empty() {
        return err("must not be empty");
    }
    if name.starts_with('-') || name.ends_with('-') {
        return err("must not start or end with a hyphen");
    }
    if name.contains("--") {
        return err("must not contain consecutive hyphens");
    }

    let mut prev_was_hyphen = false;
    for c in name.chars() {
        if c == '-' {
            prev_was_hyphen = true;
            continue;
        }
        prev_was_hyphen = false;
        if c.is_ascii_uppercase() {
            return err("must be all lowercase");
        }
        if !c.is_ascii_lowercase() {
            return err("must contain only ASCII letters and interior hyphens");
        }
    }
    let _ = prev_was_hyphen;

    Ok(())
}

/// Validate a shorthand rune: either [`NO_SHORTHAND`] or a single ASCII
/// letter.
pub fn validate_shorthand(shorthand: char) -> Result<(), InvalidIdentifier> {
    if shorthand == NO_SHORTHAND {
        return Ok(());
    }
    if shorthand.is_ascii_alphabetic() {
        return Ok(());
    }
    Err(InvalidIdentifier {
        kind: IdentifierKind::Shorthand,
        input: shorthand.to_string(),
        reason: "must be a single ASCII letter",
    })
}
