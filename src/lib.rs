//! Bind flat `KEY=VALUE` configuration onto typed Rust structs.
//!
//! Bindfig populates a struct's fields from environment variables,
//! `KEY=VALUE` command-line arguments, and JSON documents. Keys are matched
//! to fields by name or by a per-field alias, and each text value is coerced
//! into the field's declared type.
//!
//! ```ignore
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct ServerConfig {
//!     port: u16,
//!     hosts: Vec<String>,
//! }
//!
//! bindfig::impl_record!(ServerConfig {
//!     port(env = "PORT", flag = "p"),
//!     hosts(vsep = ","),
//! });
//!
//! let config: ServerConfig = Bindfig::builder().document("server.json").load()?;
//! ```
//!
//! With `PORT=8080` in the environment or `p=8080 hosts=a,b` on the command
//! line, `config.port` is `8080` and `config.hosts` is `["a", "b"]`.
//!
//! # Design: struct as source of truth
//!
//! There is no schema file and no runtime reflection. A struct opts in by
//! implementing [`Record`], which answers two questions: which fields exist
//! (as [`FieldDescriptor`]s, in declaration order) and where each one lives
//! (as a writable [`Slot`]). [`impl_record!`] writes that implementation from
//! a field list, inferring every field's [`Kind`] from its Rust type.
//!
//! # Matching keys to fields
//!
//! Each field answers to exactly one effective name:
//!
//! | Annotation | Effective name |
//! |------------|----------------|
//! | none | the field name |
//! | `env = "PORT"` | `PORT` |
//! | `flag = "p"` | `p` |
//! | both | `p` (the flag alias wins) |
//!
//! The same effective name is used for every source. Matching is exact and
//! case-sensitive. Keys that match no field are ignored, so a record can be
//! bound against the whole process environment without tripping over
//! unrelated variables.
//!
//! # Coercion
//!
//! | Field type | Accepted text |
//! |------------|---------------|
//! | `String` | anything |
//! | `i8` .. `i64`, `isize` | base-10 integers within the type's range |
//! | `u8` .. `u64`, `usize` | unsigned base-10 integers within the type's range |
//! | `bool` | `1 t T TRUE true True`, `0 f F FALSE false False` |
//! | `f32`, `f64` | base-10 floats |
//! | `Vec<T>` of any of the above | text split on `:` (or the `vsep` separator) |
//!
//! List values append to the list. Empty tokens are kept, so `a::b` is three
//! elements. Maps, `Option<T>`, nested records, and lists of lists have no
//! coercion rule: binding a key onto one fails with
//! [`BindError::UnsupportedKind`] and leaves the field alone.
//!
//! # Sources
//!
//! - [`load_from_environment`] binds `(name, value)` pairs.
//! - [`load_from_arguments`] binds `KEY=VALUE` strings, skipping anything
//!   without an `=`.
//! - [`load_from_document`] decodes a JSON document with serde, on top of the
//!   record's current values. [`read_document`] returns the raw bytes.
//!
//! Every source takes its input explicitly, so nothing needs to touch the real
//! process environment in tests. [`Bindfig::builder()`] layers all three
//! (document, then environment, then arguments) and reads the process
//! environment and arguments unless told otherwise.
//!
//! # Error handling
//!
//! All fallible operations return [`BindError`]. Loading stops at the first
//! error. Coercion errors name the key, the attempted value, and the target
//! type:
//!
//! ```text
//! Invalid value for 'PORT' (field 'port'): 'notanumber' is not a valid u16
//! ```
//!
//! # Clap adapter
//!
//! With the `clap` feature (on by default), [`BindArgs`] collects positional
//! `KEY=VALUE` settings inside an application's own clap parser.

pub mod error;
pub mod record;
pub mod types;

mod args;
mod bind;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod document;
mod env;
mod list;
pub(crate) mod merge;
mod resolve;
mod scalar;
mod snapshot;

#[cfg(test)]
mod fixtures;

pub use args::{load_from_arguments, split_setting};
pub use bind::bind;
pub use builder::{Bindfig, BindfigBuilder};
#[cfg(feature = "clap")]
pub use cli::BindArgs;
pub use document::{load_from_document, read_document};
pub use env::load_from_environment;
pub use error::{BindError, CoerceError};
pub use list::coerce_list;
pub use record::{Bindable, ListTarget, Record, ScalarTarget, Slot};
pub use resolve::resolve;
pub use scalar::{Scalar, coerce_scalar};
pub use types::{DEFAULT_SEPARATOR, FieldDescriptor, Kind, ScalarKind};
