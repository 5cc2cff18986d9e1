//! The binder: apply one key/value pair to one record.

use crate::error::BindError;
use crate::list::coerce_list;
use crate::record::Record;
use crate::resolve::resolve;
use crate::scalar::coerce_scalar;

/// Apply `value` to every field of `record` that `key` resolves to.
///
/// List fields are split on their separator and appended to; every other
/// field is overwritten. A key that matches no field is ignored and returns
/// `Ok(())`.
///
/// Fields are bound in declaration order and the first failure is returned.
/// Fields bound before the failure keep their new values.
pub fn bind<R: Record>(record: &mut R, key: &str, value: &str) -> Result<(), BindError> {
    let targets = resolve::<R>(key);
    if targets.is_empty() {
        tracing::trace!(key, "no field matches key, ignoring");
        return Ok(());
    }

    for field in targets {
        let slot = record.slot(field.name);
        let result = if field.kind.is_list() {
            coerce_list(slot, value, field.effective_separator())
        } else {
            coerce_scalar(slot, value)
        };
        result.map_err(|e| e.into_bind_error(key, field.name))?;
        tracing::debug!(key, field = field.name, kind = %field.kind, "bound field");
    }
    Ok(())
}
