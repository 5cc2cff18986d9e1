//! Scalar coercion: one text value into one primitive.
//!
//! | Family | Accepts | Fails with |
//! |--------|---------|------------|
//! | `String` | anything | never |
//! | `i8`..`i64`, `isize` | base-10, optional sign | `InvalidFormat`, `OutOfRange` |
//! | `u8`..`u64`, `usize` | base-10, no sign | `InvalidFormat`, `OutOfRange` |
//! | `bool` | `1 t T TRUE true True` / `0 f F FALSE false False` | `InvalidFormat` |
//! | `f32`, `f64` | base-10 floats, `inf`, `infinity`, `nan` | `InvalidFormat`, `OutOfRange` |
//!
//! A float literal that is finite but too large for the declared width is
//! reported as `OutOfRange` rather than silently becoming infinity.

use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::CoerceError;
use crate::record::{Bindable, Slot};
use crate::types::{Kind, ScalarKind};

/// A primitive that can be parsed from a single text value.
pub trait Scalar: Sized {
    const KIND: ScalarKind;

    fn parse_text(raw: &str) -> Result<Self, CoerceError>;
}

/// Coerce `raw` into the value behind `slot`.
///
/// The destination is written only on success.
pub fn coerce_scalar(slot: Slot<'_>, raw: &str) -> Result<(), CoerceError> {
    match slot {
        Slot::Scalar(target) => target.assign(raw),
        Slot::List(target) => Err(CoerceError::UnsupportedKind {
            kind: Kind::List(Box::new(target.element_kind())),
        }),
        Slot::Opaque(kind) => Err(CoerceError::UnsupportedKind { kind }),
        Slot::ReadOnly => Err(CoerceError::Unsettable),
    }
}

fn invalid(raw: &str, kind: ScalarKind) -> CoerceError {
    CoerceError::InvalidFormat {
        value: raw.to_string(),
        kind: Kind::Scalar(kind),
    }
}

fn out_of_range(raw: &str, kind: ScalarKind) -> CoerceError {
    CoerceError::OutOfRange {
        value: raw.to_string(),
        kind: Kind::Scalar(kind),
    }
}

fn parse_int<T>(raw: &str, kind: ScalarKind) -> Result<T, CoerceError>
where
    T: FromStr<Err = ParseIntError>,
{
    if kind.is_unsigned() && raw.starts_with('+') {
        return Err(invalid(raw, kind));
    }
    raw.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(raw, kind),
        _ => invalid(raw, kind),
    })
}

/// True when the literal spells infinity, as opposed to overflowing into it.
fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(invalid(raw, ScalarKind::Bool)),
    }
}

macro_rules! scalar {
    ($ty:ty, $kind:expr, $parse:expr) => {
        impl Scalar for $ty {
            const KIND: ScalarKind = $kind;

            fn parse_text(raw: &str) -> Result<Self, CoerceError> {
                $parse(raw)
            }
        }

        impl Bindable for $ty {
            fn kind() -> Kind {
                Kind::Scalar(<$ty as Scalar>::KIND)
            }

            fn as_slot(&mut self) -> Slot<'_> {
                Slot::Scalar(self)
            }
        }
    };
}

macro_rules! integer {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $( scalar!($ty, ScalarKind::$kind, |raw: &str| parse_int::<$ty>(raw, ScalarKind::$kind)); )*
    };
}

macro_rules! float {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            scalar!($ty, ScalarKind::$kind, |raw: &str| -> Result<$ty, CoerceError> {
                let value = raw
                    .parse::<$ty>()
                    .map_err(|_| invalid(raw, ScalarKind::$kind))?;
                if value.is_infinite() && !spells_infinity(raw) {
                    return Err(out_of_range(raw, ScalarKind::$kind));
                }
                Ok(value)
            });
        )*
    };
}

scalar!(String, ScalarKind::Text, |raw: &str| Ok(raw.to_string()));
scalar!(bool, ScalarKind::Bool, parse_bool);

integer! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

float! {
    f32 => F32,
    f64 => F64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce<T: Scalar + Bindable + Default>(raw: &str) -> Result<T, CoerceError> {
        let mut value = T::default();
        coerce_scalar(value.as_slot(), raw)?;
        Ok(value)
    }

    #[test]
    fn text_is_identity() {
        assert_eq!(coerce::<String>("a b:c").unwrap(), "a b:c");
        assert_eq!(coerce::<String>("").unwrap(), "");
    }

    #[test]
    fn signed_integers_match_native_parse() {
        assert_eq!(coerce::<i8>("-128").unwrap(), i8::MIN);
        assert_eq!(coerce::<i16>("+300").unwrap(), 300);
        assert_eq!(coerce::<i32>("-70000").unwrap(), -70000);
        assert_eq!(coerce::<i64>(&i64::MAX.to_string()).unwrap(), i64::MAX);
        assert_eq!(coerce::<isize>("42").unwrap(), 42);
    }

    #[test]
    fn unsigned_integers_match_native_parse() {
        assert_eq!(coerce::<u8>("255").unwrap(), u8::MAX);
        assert_eq!(coerce::<u16>("8080").unwrap(), 8080);
        assert_eq!(coerce::<u32>("0").unwrap(), 0);
        assert_eq!(coerce::<u64>(&u64::MAX.to_string()).unwrap(), u64::MAX);
        assert_eq!(coerce::<usize>("7").unwrap(), 7);
    }

    #[test]
    fn integer_overflow_is_out_of_range() {
        assert_eq!(
            coerce::<u8>("300").unwrap_err(),
            CoerceError::OutOfRange {
                value: "300".into(),
                kind: Kind::Scalar(ScalarKind::U8),
            }
        );
        assert!(matches!(
            coerce::<i8>("-129"),
            Err(CoerceError::OutOfRange { .. })
        ));
        assert!(matches!(
            coerce::<i64>("9223372036854775808"),
            Err(CoerceError::OutOfRange { .. })
        ));
    }

    #[test]
    fn integer_garbage_is_invalid_format() {
        for raw in ["notanumber", "", "1.5", "0x10", "1_000", " 1", "+"] {
            assert!(
                matches!(coerce::<i32>(raw), Err(CoerceError::InvalidFormat { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn unsigned_rejects_signs() {
        assert!(matches!(
            coerce::<u32>("-1"),
            Err(CoerceError::InvalidFormat { .. })
        ));
        assert!(matches!(
            coerce::<u32>("+1"),
            Err(CoerceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn bool_accepts_all_spellings() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(coerce::<bool>(raw).unwrap(), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!coerce::<bool>(raw).unwrap(), "{raw}");
        }
    }

    #[test]
    fn bool_rejects_other_spellings() {
        for raw in ["yes", "tRUE", "2", ""] {
            assert_eq!(
                coerce::<bool>(raw).unwrap_err(),
                CoerceError::InvalidFormat {
                    value: raw.into(),
                    kind: Kind::Scalar(ScalarKind::Bool),
                }
            );
        }
    }

    #[test]
    fn floats_match_native_parse() {
        assert_eq!(coerce::<f64>("1.5").unwrap(), 1.5);
        assert_eq!(coerce::<f64>("-2e3").unwrap(), -2000.0);
        assert_eq!(coerce::<f32>("0.1").unwrap(), "0.1".parse::<f32>().unwrap());
        assert!(coerce::<f64>("NaN").unwrap().is_nan());
        assert_eq!(coerce::<f64>("-inf").unwrap(), f64::NEG_INFINITY);
        assert_eq!(coerce::<f32>("Infinity").unwrap(), f32::INFINITY);
    }

    macro_rules! assert_bounds_parse_back {
        ($($ty:ty),* $(,)?) => {
            $(
                for bound in [<$ty>::MIN, <$ty>::MAX] {
                    assert_eq!(
                        coerce::<$ty>(&bound.to_string()).unwrap(),
                        bound,
                        "{}",
                        stringify!($ty)
                    );
                }
            )*
        };
    }

    #[test]
    fn formatted_bounds_parse_back_for_every_kind() {
        assert_bounds_parse_back!(
            i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
        );
        for value in [f32::MIN_POSITIVE, f32::EPSILON, -0.1] {
            assert_eq!(coerce::<f32>(&value.to_string()).unwrap(), value);
        }
        for value in [f64::MIN_POSITIVE, f64::EPSILON, -0.1] {
            assert_eq!(coerce::<f64>(&value.to_string()).unwrap(), value);
        }
        for value in [true, false] {
            assert_eq!(coerce::<bool>(&value.to_string()).unwrap(), value);
        }
        assert_eq!(coerce::<String>("any text").unwrap(), "any text");
    }

    #[test]
    fn float_overflow_depends_on_width() {
        assert!(matches!(
            coerce::<f32>("1e39"),
            Err(CoerceError::OutOfRange { .. })
        ));
        assert_eq!(coerce::<f64>("1e39").unwrap(), 1e39);
    }

    #[test]
    fn float_garbage_is_invalid_format() {
        assert!(matches!(
            coerce::<f64>("fast"),
            Err(CoerceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn failure_leaves_destination_untouched() {
        let mut level: u8 = 7;
        assert!(coerce_scalar(level.as_slot(), "300").is_err());
        assert_eq!(level, 7);
    }

    #[test]
    fn opaque_slot_is_unsupported() {
        let err = coerce_scalar(Slot::Opaque(Kind::Map), "a=b").unwrap_err();
        assert_eq!(err, CoerceError::UnsupportedKind { kind: Kind::Map });
    }

    #[test]
    fn list_slot_is_unsupported_on_scalar_path() {
        let mut words: Vec<String> = vec![];
        let err = coerce_scalar(words.as_slot(), "a").unwrap_err();
        assert!(matches!(err, CoerceError::UnsupportedKind { .. }));
        assert!(words.is_empty());
    }

    #[test]
    fn read_only_slot_is_unsettable() {
        assert_eq!(
            coerce_scalar(Slot::ReadOnly, "1").unwrap_err(),
            CoerceError::Unsettable
        );
    }
}
