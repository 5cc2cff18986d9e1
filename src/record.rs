//! The capability a type needs to be bound: describe its fields and hand out
//! a writable [`Slot`] for each one.
//!
//! Most records never implement [`Record`] by hand. The [`impl_record!`]
//! macro generates both halves from a field list:
//!
//! ```
//! use bindfig::impl_record;
//!
//! #[derive(Debug, Default)]
//! struct ServerConfig {
//!     port: i64,
//!     hosts: Vec<String>,
//!     verbose: bool,
//! }
//!
//! impl_record!(ServerConfig {
//!     port(flag = "p", env = "PORT"),
//!     hosts(vsep = ","),
//!     verbose,
//! });
//!
//! let mut config = ServerConfig::default();
//! bindfig::bind(&mut config, "p", "8080").unwrap();
//! bindfig::bind(&mut config, "hosts", "a,b").unwrap();
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.hosts, ["a", "b"]);
//! ```
//!
//! Field kinds are inferred from the field types through [`Bindable`], so the
//! descriptor table cannot drift from the struct definition.

use std::collections::{BTreeMap, HashMap};

use crate::error::CoerceError;
use crate::scalar::Scalar;
use crate::types::{FieldDescriptor, Kind, ScalarKind};

/// A fixed-shape value whose fields can be populated from text.
pub trait Record {
    /// Describe every field, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;

    /// Writable handle to the field with the given declared name.
    ///
    /// Return [`Slot::ReadOnly`] for fields that exist but must not be
    /// written, and for names the record does not know.
    fn slot(&mut self, field: &str) -> Slot<'_>;
}

/// A type that can appear as a field of a [`Record`].
///
/// Implemented for every primitive with a coercion rule, for `Vec<T>`, and
/// for the container types that have no rule (maps and `Option<T>`) so that
/// records holding them still describe themselves and fail clearly when a key
/// targets them.
pub trait Bindable {
    fn kind() -> Kind;

    fn as_slot(&mut self) -> Slot<'_>;
}

/// A mutable handle to a coercion target.
pub enum Slot<'a> {
    Scalar(&'a mut dyn ScalarTarget),
    List(&'a mut dyn ListTarget),
    /// A field whose kind has no coercion rule.
    Opaque(Kind),
    /// A field that cannot be written.
    ReadOnly,
}

impl Slot<'_> {
    /// The kind of value behind this slot, if it is addressable.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Slot::Scalar(target) => Some(Kind::Scalar(target.kind())),
            Slot::List(target) => Some(Kind::List(Box::new(target.element_kind()))),
            Slot::Opaque(kind) => Some(kind.clone()),
            Slot::ReadOnly => None,
        }
    }
}

impl std::fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::ReadOnly => f.write_str("ReadOnly"),
            other => match other.kind() {
                Some(kind) => write!(f, "Slot({kind})"),
                None => f.write_str("Slot(?)"),
            },
        }
    }
}

/// Object-safe view of a scalar field.
pub trait ScalarTarget {
    fn kind(&self) -> ScalarKind;

    /// Parse `raw` and overwrite the value. Leaves it untouched on error.
    fn assign(&mut self, raw: &str) -> Result<(), CoerceError>;
}

impl<T: Scalar> ScalarTarget for T {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn assign(&mut self, raw: &str) -> Result<(), CoerceError> {
        *self = T::parse_text(raw)?;
        Ok(())
    }
}

/// Object-safe view of a list field.
pub trait ListTarget {
    fn element_kind(&self) -> Kind;

    /// Build a new element from `raw` and append it. Nothing is appended on error.
    fn push_text(&mut self, raw: &str) -> Result<(), CoerceError>;
}

impl<T: Bindable + Default> ListTarget for Vec<T> {
    fn element_kind(&self) -> Kind {
        T::kind()
    }

    fn push_text(&mut self, raw: &str) -> Result<(), CoerceError> {
        let mut element = T::default();
        match element.as_slot() {
            Slot::Scalar(target) => target.assign(raw)?,
            _ => {
                return Err(CoerceError::UnsupportedKind { kind: T::kind() });
            }
        }
        self.push(element);
        Ok(())
    }
}

impl<T: Bindable + Default> Bindable for Vec<T> {
    fn kind() -> Kind {
        Kind::List(Box::new(T::kind()))
    }

    fn as_slot(&mut self) -> Slot<'_> {
        Slot::List(self)
    }
}

impl<T: Bindable> Bindable for Option<T> {
    fn kind() -> Kind {
        Kind::Optional(Box::new(T::kind()))
    }

    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Opaque(<Self as Bindable>::kind())
    }
}

impl<K, V, S> Bindable for HashMap<K, V, S> {
    fn kind() -> Kind {
        Kind::Map
    }

    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Opaque(Kind::Map)
    }
}

impl<K, V> Bindable for BTreeMap<K, V> {
    fn kind() -> Kind {
        Kind::Map
    }

    fn as_slot(&mut self) -> Slot<'_> {
        Slot::Opaque(Kind::Map)
    }
}

/// Kind of the field selected by `_field`. Used by [`impl_record!`] to infer
/// kinds from field types without an instance.
#[doc(hidden)]
pub fn kind_of<R, T, F>(_field: F) -> Kind
where
    T: Bindable,
    F: Fn(&R) -> &T,
{
    T::kind()
}

/// Implement [`Record`] (and [`Bindable`], as a nested record) for a struct.
///
/// Each field may carry options, which map onto [`FieldDescriptor`] setters:
///
/// - `env = "NAME"`: match input key `NAME` instead of the field name.
/// - `flag = "NAME"`: match input key `NAME`; wins over `env`.
/// - `vsep = ","`: split list values on `,` instead of `:`.
///
/// Fields left out of the list are invisible to binding.
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $( $field:ident $( ( $( $opt:ident = $val:expr ),* $(,)? ) )? ),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields() -> ::std::vec::Vec<$crate::FieldDescriptor> {
                ::std::vec![
                    $(
                        $crate::FieldDescriptor::new(
                            ::std::stringify!($field),
                            $crate::record::kind_of(|record: &$ty| &record.$field),
                        )
                        $( $( .$opt($val) )* )?
                    ),*
                ]
            }

            fn slot(&mut self, field: &str) -> $crate::Slot<'_> {
                match field {
                    $( ::std::stringify!($field) => $crate::Bindable::as_slot(&mut self.$field), )*
                    _ => $crate::Slot::ReadOnly,
                }
            }
        }

        impl $crate::Bindable for $ty {
            fn kind() -> $crate::Kind {
                $crate::Kind::Record
            }

            fn as_slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Opaque($crate::Kind::Record)
            }
        }
    };
}
