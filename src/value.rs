// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The polymorphic typed cell shared by [`crate::flag::Flag`] and
//! [`crate::arg::Arg`].
//!
//! `Value` is a tagged union over the closed set of supported types. Unlike
//! the reflection-based cell this design is modelled on, a `Value` always
//! holds a concrete, representable instance of its type (the zero value,
//! until parsed or defaulted) — there is no "unbound, about to be
//! dereferenced" state to guard against, so the "unbound cell" failure mode
//! spec.md describes is structurally unreachable here rather than a runtime
//! check.

use std::fmt::Write as _;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

/// A raw parse failure: just the textual cause, and whether this was an
/// append (sequence) rather than a replace (scalar). The caller (`Flag` or
/// `Arg`) attaches identity (kind + name + input) to build the public
/// [`crate::error::ParseError`].
#[derive(Debug, Clone)]
pub struct ValueFailure {
    pub(crate) cause: String,
    pub(crate) appending: bool,
}

macro_rules! numeric_scalars {
    ($($variant:ident, $seq_variant:ident, $ty:ty, $name:literal, $quote:expr;)*) => {
        /// A polymorphic typed cell. See the module docs and spec.md §4.1.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Value {
            $(
                #[doc = concat!("A `", $name, "` scalar cell.")]
                $variant($ty),
                #[doc = concat!("A `[]", $name, "` sequence cell.")]
                $seq_variant(Vec<$ty>),
            )*
            /// A `bool` scalar cell.
            Bool(bool),
            /// A hex-encoded byte sequence.
            BytesHex(Vec<u8>),
            /// An RFC3339 timestamp.
            Time(jiff::Timestamp),
            /// A duration, parsed with the conventional `1h30m`-style grammar.
            Duration(Duration),
            /// An IPv4 or IPv6 address.
            Ip(IpAddr),
            /// A flag that increments each time it is supplied.
            Count(u64),
        }

        impl Value {
            /// The canonical type tag name (spec.md §4.1 `TypeName`).
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(
                        Value::$variant(_) => $name,
                        Value::$seq_variant(_) => concat!("[]", $name),
                    )*
                    Value::Bool(_) => "bool",
                    Value::BytesHex(_) => "bytesHex",
                    Value::Time(_) => "time",
                    Value::Duration(_) => "duration",
                    Value::Ip(_) => "ip",
                    Value::Count(_) => "count",
                }
            }

            /// True if this cell appends rather than replaces on `parse`.
            pub fn is_sequence(&self) -> bool {
                match self {
                    $(Value::$seq_variant(_) => true,)*
                    _ => false,
                }
            }

            /// The zero-valued cell for a given type tag.
            pub fn zero(kind: ValueKind) -> Value {
                match kind {
                    $(
                        ValueKind::$variant => Value::$variant(Default::default()),
                        ValueKind::$seq_variant => Value::$seq_variant(Vec::new()),
                    )*
                    ValueKind::Bool => Value::Bool(false),
                    ValueKind::BytesHex => Value::BytesHex(Vec::new()),
                    ValueKind::Time => Value::Time(jiff::Timestamp::UNIX_EPOCH),
                    ValueKind::Duration => Value::Duration(Duration::ZERO),
                    ValueKind::Ip => Value::Ip(IpAddr::from([0, 0, 0, 0])),
                    ValueKind::Count => Value::Count(0),
                }
            }

            /// The string implied when a flag of this type appears with no
            /// explicit value (spec.md §4.1 `NoArgValue`).
            pub fn no_arg_value(&self) -> &'static str {
                match self {
                    Value::Bool(_) => "true",
                    Value::Count(_) => "1",
                    _ => "",
                }
            }

            /// Replace (scalar) or append (sequence) from a textual input.
            pub fn parse(&mut self, input: &str) -> Result<(), ValueFailure> {
                match self {
                    $(
                        Value::$variant(slot) => {
                            *slot = parse_scalar::<$ty>(input)?;
                        }
                        Value::$seq_variant(slot) => {
                            let parsed = parse_scalar::<$ty>(input)
                                .map_err(|mut f| { f.appending = true; f })?;
                            slot.push(parsed);
                        }
                    )*
                    Value::Bool(slot) => {
                        *slot = bool::from_str(input).map_err(|e| ValueFailure {
                            cause: e.to_string(),
                            appending: false,
                        })?;
                    }
                    Value::BytesHex(slot) => {
                        let trimmed = input.trim();
                        *slot = hex::decode(trimmed)
                            .map_err(|e| ValueFailure { cause: e.to_string(), appending: false })?;
                    }
                    Value::Time(slot) => {
                        *slot = jiff::Timestamp::from_str(input)
                            .map_err(|e| ValueFailure { cause: e.to_string(), appending: false })?;
                    }
                    Value::Duration(slot) => {
                        *slot = humantime::parse_duration(input)
                            .map_err(|e| ValueFailure { cause: e.to_string(), appending: false })?;
                    }
                    Value::Ip(slot) => {
                        *slot = IpAddr::from_str(input)
                            .map_err(|e| ValueFailure { cause: e.to_string(), appending: false })?;
                    }
                    Value::Count(slot) => {
                        let delta = u64::from_str(input)
                            .map_err(|e| ValueFailure { cause: e.to_string(), appending: false })?;
                        *slot += delta;
                    }
                }
                Ok(())
            }

            /// Canonical textual form of the current value (spec.md §4.1
            /// `Stringify`).
            pub fn stringify(&self) -> String {
                match self {
                    $(
                        Value::$variant(v) => stringify_scalar(v, $quote),
                        Value::$seq_variant(items) => stringify_seq(items, $quote),
                    )*
                    Value::Bool(v) => v.to_string(),
                    Value::BytesHex(bytes) => hex::encode(bytes),
                    Value::Time(t) => t.to_string(),
                    Value::Duration(d) => humantime::format_duration(*d).to_string(),
                    Value::Ip(ip) => ip.to_string(),
                    Value::Count(c) => c.to_string(),
                }
            }
        }

        /// The type tag, independent of any currently-held value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum ValueKind {
            $(
                #[doc = concat!($name, " scalar.")]
                $variant,
                #[doc = concat!("[]", $name, " sequence.")]
                $seq_variant,
            )*
            /// `bool`.
            Bool,
            /// `bytesHex`.
            BytesHex,
            /// `time` (RFC3339).
            Time,
            /// `duration`.
            Duration,
            /// `ip`.
            Ip,
            /// `count`.
            Count,
        }

        impl ValueKind {
            /// Look up the scalar kind for a sequence kind's element type.
            pub fn element_kind(self) -> Option<ValueKind> {
                match self {
                    $(ValueKind::$seq_variant => Some(ValueKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

numeric_scalars! {
    Int, SeqInt, i64, "int", false;
    Int8, SeqInt8, i8, "int8", false;
    Int16, SeqInt16, i16, "int16", false;
    Int32, SeqInt32, i32, "int32", false;
    Int64, SeqInt64, i64, "int64", false;
    Uint, SeqUint, u64, "uint", false;
    Uint8, SeqUint8, u8, "uint8", false;
    Uint16, SeqUint16, u16, "uint16", false;
    Uint32, SeqUint32, u32, "uint32", false;
    Uint64, SeqUint64, u64, "uint64", false;
    UintPtr, SeqUintPtr, usize, "uintptr", false;
    Float32, SeqFloat32, f32, "float32", false;
    Float64, SeqFloat64, f64, "float64", false;
    StringScalar, SeqString, String, "string", true;
}

fn parse_scalar<T>(input: &str) -> Result<T, ValueFailure>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(input).map_err(|e| ValueFailure { cause: e.to_string(), appending: false })
}

fn stringify_scalar<T: ToString>(value: &T, quote: bool) -> String {
    if quote {
        format!("{:?}", value.to_string())
    } else {
        value.to_string()
    }
}

fn stringify_seq<T: ToString>(items: &[T], quote: bool) -> String {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if quote {
            let _ = write!(out, "{:?}", item.to_string());
        } else {
            out.push_str(&item.to_string());
        }
    }
    out.push(']');
    out
}

impl Value {
    /// Build a cell seeded from a textual default, e.g. a `Flag`'s or
    /// optional `Arg`'s configured default string. An empty default leaves
    /// the cell at its zero value.
    pub fn with_default(kind: ValueKind, default: &str) -> Result<Value, ValueFailure> {
        let mut v = Value::zero(kind);
        if !default.is_empty() {
            v.parse(default)?;
        }
        Ok(v)
    }

    /// Construct a `string` scalar cell directly (the macro names the
    /// variant `StringScalar` to avoid colliding with `std::string::String`
    /// as an identifier position; this constructor keeps call sites
    /// readable).
    pub fn new_string(s: impl Into<String>) -> Value {
        Value::StringScalar(s.into())
    }
}
