use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

impl Rational {
    pub fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    pub fn to_f64(self) -> Option<f64> {
        if self.den == 0 {
            None
        } else {
            Some(f64::from(self.num) / f64::from(self.den))
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SignedRational {
    pub num: i32,
    pub den: i32,
}

impl SignedRational {
    pub fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }
}

impl fmt::Display for SignedRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Rational(Rational),
    SignedRational(SignedRational),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Signed(v) => write!(f, "{v}"),
            // Debug keeps the fractional part ("3.0", not "3").
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Rational(v) => write!(f, "{v}"),
            Self::SignedRational(v) => write!(f, "{v}"),
        }
    }
}

/// A value as it comes out of an extraction source, before normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Bytes(Vec<u8>),
    Sequence(Vec<RawValue>),
    Mapping(BTreeMap<String, RawValue>),
    Scalar(Scalar),
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    pub fn unsigned(value: impl Into<u64>) -> Self {
        Self::Scalar(Scalar::Unsigned(value.into()))
    }

    pub fn signed(value: impl Into<i64>) -> Self {
        Self::Scalar(Scalar::Signed(value.into()))
    }

    pub fn float(value: impl Into<f64>) -> Self {
        Self::Scalar(Scalar::Float(value.into()))
    }

    pub fn rational(num: u32, den: u32) -> Self {
        Self::Scalar(Scalar::Rational(Rational::new(num, den)))
    }

    pub fn signed_rational(num: i32, den: i32) -> Self {
        Self::Scalar(Scalar::SignedRational(SignedRational::new(num, den)))
    }

    /// Collapses single-element lists to the element itself, the way EXIF
    /// readers present count-1 fields.
    pub fn from_items(mut items: Vec<RawValue>) -> Self {
        if items.len() == 1 {
            items.remove(0)
        } else {
            Self::Sequence(items)
        }
    }

    pub fn dms(degrees: (u32, u32), minutes: (u32, u32), seconds: (u32, u32)) -> Self {
        Self::Sequence(vec![
            Self::rational(degrees.0, degrees.1),
            Self::rational(minutes.0, minutes.1),
            Self::rational(seconds.0, seconds.1),
        ])
    }

    /// Text view of a scalar or byte string, with trailing NULs and
    /// whitespace removed. Sequences and mappings have none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Scalar(Scalar::Text(s)) => Some(s.trim_end_matches('\0').trim().to_string()),
            Self::Bytes(bytes) => Some(
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .trim()
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// A normalized, displayable value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CleanValue {
    Text(String),
    Mapping(BTreeMap<String, CleanValue>),
}

impl CleanValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            Self::Mapping(_) => None,
        }
    }

    /// Flattens nested mappings into `parent.child` keys.
    pub fn flatten_into(&self, key: &str, out: &mut BTreeMap<String, String>) {
        match self {
            Self::Text(v) => {
                out.insert(key.to_string(), v.clone());
            }
            Self::Mapping(children) => {
                for (child_key, child) in children {
                    child.flatten_into(&format!("{key}.{child_key}"), out);
                }
            }
        }
    }
}

impl fmt::Display for CleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v}"),
            Self::Mapping(children) => {
                write!(f, "{{")?;
                for (index, (key, value)) in children.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
