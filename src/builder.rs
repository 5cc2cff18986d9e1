use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::args;
use crate::document;
use crate::env;
use crate::error::BindError;
use crate::record::Record;

/// Entry point for layering every source onto one record.
pub struct Bindfig;

impl Bindfig {
    pub fn builder<R: Record>() -> BindfigBuilder<R> {
        BindfigBuilder::new()
    }
}

/// Builder for loading a record from a document, the environment, and
/// `KEY=VALUE` arguments.
///
/// Layers are applied lowest first, each one writing over the last:
///
/// ```text
/// Record's starting value   R::default() or whatever load_into() is given
///        ↑ overridden by
/// JSON document             .document(path)
///        ↑ overridden by
/// Environment variables     process environment, or .env_vars(...)
///        ↑ overridden by
/// Arguments                 process arguments, or .args(...)
/// ```
///
/// List fields append rather than override, so a list named in both the
/// environment and the arguments collects the elements of both.
///
/// Loading stops at the first error from any layer.
pub struct BindfigBuilder<R: Record> {
    document: Option<PathBuf>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
    args_enabled: bool,
    args: Option<Vec<String>>,
    _phantom: PhantomData<R>,
}

/// Everything a load needs, gathered up front. No I/O happens after this
/// except reading the document.
struct LoadInput {
    document: Option<PathBuf>,
    env_vars: Vec<(String, String)>,
    args: Vec<String>,
}

impl<R: Record> BindfigBuilder<R> {
    fn new() -> Self {
        Self {
            document: None,
            env_enabled: true,
            env_vars: None,
            args_enabled: true,
            args: None,
            _phantom: PhantomData,
        }
    }

    /// Load a JSON document as the lowest layer. A missing file is an error.
    pub fn document(mut self, path: impl AsRef<Path>) -> Self {
        self.document = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use these variables instead of the process environment.
    pub fn env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Disable the environment layer entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use these arguments instead of the process arguments.
    ///
    /// The program name must not be included.
    pub fn args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Disable the argument layer entirely.
    pub fn no_args(mut self) -> Self {
        self.args_enabled = false;
        self
    }

    /// Gather the inputs, reading the process environment and arguments only
    /// for layers that are enabled and were not given explicitly.
    fn build_input(self) -> LoadInput {
        let env_vars = match (self.env_enabled, self.env_vars) {
            (false, _) => Vec::new(),
            (true, Some(vars)) => vars,
            (true, None) => env::process_vars(),
        };
        let args = match (self.args_enabled, self.args) {
            (false, _) => Vec::new(),
            (true, Some(args)) => args,
            (true, None) => args::process_args(),
        };
        LoadInput {
            document: self.document,
            env_vars,
            args,
        }
    }

    /// Apply every layer onto an existing record.
    pub fn load_into(self, record: &mut R) -> Result<(), BindError>
    where
        R: Serialize + DeserializeOwned,
    {
        apply(self.build_input(), record)
    }

    /// Apply every layer onto `R::default()` and return the result.
    pub fn load(self) -> Result<R, BindError>
    where
        R: Serialize + DeserializeOwned + Default,
    {
        let mut record = R::default();
        self.load_into(&mut record)?;
        Ok(record)
    }
}

fn apply<R>(input: LoadInput, record: &mut R) -> Result<(), BindError>
where
    R: Record + Serialize + DeserializeOwned,
{
    if let Some(path) = &input.document {
        document::load_from_document(Some(&mut *record), path)?;
    }

    let env_count = input.env_vars.len();
    env::load_from_environment(record, input.env_vars)?;
    tracing::debug!(vars = env_count, "applied environment layer");

    let arg_count = input.args.len();
    args::load_from_arguments(record, &input.args)?;
    tracing::debug!(args = arg_count, "applied argument layer");

    Ok(())
}
