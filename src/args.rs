//! `KEY=VALUE` command-line arguments.
//!
//! Arguments are split at the first `=`, so values may themselves contain
//! `=`. Anything without an `=` (subcommands, `--flags`, positional values)
//! is not a setting and is skipped.

use crate::bind::bind;
use crate::error::BindError;
use crate::record::Record;

/// Split `KEY=VALUE` at the first `=`.
///
/// Returns `None` for arguments without `=`, and for empty keys or values.
pub fn split_setting(arg: &str) -> Option<(&str, &str)> {
    let (key, value) = arg.split_once('=')?;
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Bind every `KEY=VALUE` argument onto `record`, in order.
///
/// `args` must not include the program name. Later arguments override earlier
/// ones for scalar fields and append for list fields.
///
/// Stops at the first binding error.
pub fn load_from_arguments<R, I>(record: &mut R, args: I) -> Result<(), BindError>
where
    R: Record,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for arg in args {
        let arg = arg.as_ref();
        let Some((key, value)) = split_setting(arg) else {
            tracing::trace!(arg, "skipping argument that is not KEY=VALUE");
            continue;
        };
        bind(record, key, value)?;
    }
    Ok(())
}

/// The current process arguments without the program name, minus arguments
/// that are not valid UTF-8.
pub fn process_args() -> Vec<String> {
    std::env::args_os()
        .skip(1)
        .filter_map(|arg| arg.into_string().ok())
        .collect()
}
