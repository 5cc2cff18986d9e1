//! List coercion: split one text value and append each token as an element.

use crate::error::CoerceError;
use crate::record::Slot;
use crate::types::Kind;

/// Split `raw` on `separator` and append one element per token, in order.
///
/// Empty tokens are kept: `"a::b"` on `":"` yields `a`, an empty element, and
/// `b`. Existing elements are kept too; binding appends.
///
/// Stops at the first token that fails to coerce. Elements appended before
/// the failing token stay in the list.
pub fn coerce_list(slot: Slot<'_>, raw: &str, separator: &str) -> Result<(), CoerceError> {
    let list = match slot {
        Slot::List(list) => list,
        Slot::Scalar(target) => {
            return Err(CoerceError::UnsupportedKind {
                kind: Kind::Scalar(target.kind()),
            });
        }
        Slot::Opaque(kind) => return Err(CoerceError::UnsupportedKind { kind }),
        Slot::ReadOnly => return Err(CoerceError::Unsettable),
    };

    for token in raw.split(separator) {
        list.push_text(token)?;
    }
    Ok(())
}
