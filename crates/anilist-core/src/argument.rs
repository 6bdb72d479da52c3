//! GraphQL argument values.

use std::fmt::{self, Write as _};

use chrono::{Datelike, NaiveDate};

/// A literal or variable reference passed as a field argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Null,
    Int(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    /// An unquoted enum token such as `ANIME`.
    Enum(String),
    /// A `$name` reference to an operation variable.
    Variable(String),
    List(Vec<ArgValue>),
    /// An input object literal; field order is preserved.
    Object(Vec<Argument>),
}

impl ArgValue {
    /// Build an input object literal from name/value pairs.
    pub fn object<I, N, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<ArgValue>,
    {
        ArgValue::Object(
            fields
                .into_iter()
                .map(|(name, value)| Argument::new(name, value))
                .collect(),
        )
    }

    /// Build an enum literal.
    pub fn enum_literal(token: impl Into<String>) -> Self {
        ArgValue::Enum(token.into())
    }

    /// Build a variable reference; a leading `$` is optional.
    pub fn variable(name: impl AsRef<str>) -> Self {
        ArgValue::Variable(name.as_ref().trim_start_matches('$').to_owned())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Null => f.write_str("null"),
            ArgValue::Int(n) => write!(f, "{n}"),
            ArgValue::Float(n) if n.is_finite() => write!(f, "{n:?}"),
            ArgValue::Float(_) => f.write_str("null"),
            ArgValue::Boolean(b) => write!(f, "{b}"),
            ArgValue::String(s) => write_string(f, s),
            ArgValue::Enum(token) => f.write_str(token),
            ArgValue::Variable(name) => write!(f, "${name}"),
            ArgValue::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            ArgValue::Object(fields) => {
                f.write_char('{')?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

macro_rules! int_arg {
    ($($ty:ty),*) => {$(
        impl From<$ty> for ArgValue {
            fn from(value: $ty) -> Self {
                ArgValue::Int(i64::from(value))
            }
        }
    )*};
}

int_arg!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for ArgValue {
    fn from(value: f32) -> Self {
        ArgValue::Float(f64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Boolean(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_owned())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        ArgValue::String(value.clone())
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(values: Vec<T>) -> Self {
        ArgValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ArgValue::Null, Into::into)
    }
}

/// Dates are sent as `{year: Y, month: M, day: D}` input objects.
impl From<NaiveDate> for ArgValue {
    fn from(date: NaiveDate) -> Self {
        ArgValue::object([
            ("year", date.year()),
            ("month", date.month() as i32),
            ("day", date.day() as i32),
        ])
    }
}

/// A named argument, rendered as `name: value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: ArgValue,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
