//! Shape metadata: what kind of value a field holds and how it is addressed.
//!
//! A [`FieldDescriptor`] is the static description of one field of a
//! [`Record`](crate::Record): its declared name, its [`Kind`], and the
//! optional annotations that change how input keys reach it.
//!
//! # Effective names
//!
//! Every source (environment variables and `KEY=VALUE` arguments alike) is
//! matched against the same effective name, computed as:
//!
//! ```text
//! declared name
//!        ↑ replaced by
//! env alias           (env = "PORT")
//!        ↑ replaced by
//! flag alias          (flag = "p")
//! ```
//!
//! Empty aliases count as absent. Matching is exact and case-sensitive.

use std::fmt;

/// Separator used to split list values when a field has no `vsep` override.
pub const DEFAULT_SEPARATOR: &str = ":";

/// A primitive type with a coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl ScalarKind {
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize
        )
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// The Rust type name, used in error messages.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Text => "String",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// The declared shape of a field.
///
/// Only [`Scalar`](Kind::Scalar) kinds and lists of scalar kinds can be bound
/// from text. The rest exist so that a record can describe every field it
/// has, and so that binding a key onto one of them fails with
/// [`UnsupportedKind`](crate::BindError::UnsupportedKind) instead of being
/// silently skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Scalar(ScalarKind),
    /// A `Vec<T>`; the box holds the element kind.
    List(Box<Kind>),
    /// A `HashMap` or `BTreeMap`.
    Map,
    /// A nested record.
    Record,
    /// An `Option<T>`.
    Optional(Box<Kind>),
}

impl Kind {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The scalar kind, if this kind has a direct coercion rule.
    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<ScalarKind> for Kind {
    fn from(kind: ScalarKind) -> Self {
        Kind::Scalar(kind)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::List(element) => write!(f, "Vec<{element}>"),
            Self::Map => f.write_str("map"),
            Self::Record => f.write_str("nested record"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

/// Static metadata for one field of a record.
///
/// Built with chained setters, which is also what the per-field options of
/// [`impl_record!`](crate::impl_record) expand to:
///
/// ```
/// use bindfig::{FieldDescriptor, Kind, ScalarKind};
///
/// let port = FieldDescriptor::new("port", Kind::Scalar(ScalarKind::U16)).env("PORT");
/// assert_eq!(port.effective_name(), "PORT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub name: &'static str,
    pub kind: Kind,
    /// Alias used in place of the declared name.
    pub env_alias: Option<&'static str>,
    /// Alias that takes precedence over both the declared name and `env_alias`.
    pub flag_alias: Option<&'static str>,
    /// List separator override.
    pub separator: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            env_alias: None,
            flag_alias: None,
            separator: None,
        }
    }

    /// Set the environment alias.
    pub fn env(mut self, alias: &'static str) -> Self {
        self.env_alias = Some(alias);
        self
    }

    /// Set the flag alias.
    pub fn flag(mut self, alias: &'static str) -> Self {
        self.flag_alias = Some(alias);
        self
    }

    /// Override the list separator.
    pub fn vsep(mut self, separator: &'static str) -> Self {
        self.separator = Some(separator);
        self
    }

    /// The name input keys are matched against.
    pub fn effective_name(&self) -> &'static str {
        let mut name = self.name;
        if let Some(alias) = self.env_alias.filter(|a| !a.is_empty()) {
            name = alias;
        }
        if let Some(alias) = self.flag_alias.filter(|a| !a.is_empty()) {
            name = alias;
        }
        name
    }

    /// The separator for list values, falling back to [`DEFAULT_SEPARATOR`].
    pub fn effective_separator(&self) -> &'static str {
        self.separator
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SEPARATOR)
    }
}
