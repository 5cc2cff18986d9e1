use crate::bind::bind;
use crate::error::BindError;
use crate::record::Record;

/// Bind every environment variable onto `record`.
///
/// Each `(name, value)` pair is handed to [`bind`] unchanged: names are
/// matched against field names and aliases exactly, with no prefix stripping
/// or case folding. Variables with an empty name or an empty value are
/// skipped, as are variables that match no field.
///
/// Stops at the first binding error.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn load_from_environment<R: Record>(
    record: &mut R,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<(), BindError> {
    for (name, value) in vars {
        if name.is_empty() || value.is_empty() {
            continue;
        }
        bind(record, &name, &value)?;
    }
    Ok(())
}

/// The current process environment, minus entries that are not valid UTF-8.
pub fn process_vars() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) => Some((name, value)),
            (name, _) => {
                tracing::trace!(name = ?name, "skipping environment variable that is not UTF-8");
                None
            }
        })
        .collect()
}
