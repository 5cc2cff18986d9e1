//! Configuration struct for the bindfig demo application.
//!
//! [`DemoConfig`] is bound from three sources. Field names are snake_case for
//! arguments, aliases give the environment its usual SCREAMING_CASE names,
//! and serde renames give the JSON document PascalCase keys:
//!
//! | Field              | Argument key  | Env var            | Document key     |
//! |--------------------|---------------|--------------------|------------------|
//! | `name`             | `name`        | `name`             | `Name`           |
//! | `verbose`          | `v`           | `v`                | `Verbose`        |
//! | `port`             | `port`        | `DEMO_PORT`        | `Port`           |
//! | `hosts`            | `hosts`       | `hosts`            | `Hosts`          |
//! | `ratio`            | `ratio`       | `DEMO_RATIO`       | `Ratio`          |
//! | `retries`          | `retries`     | `retries`          | `Retries`        |
//!
//! `verbose` carries a flag alias, which wins over the field name for every
//! source, so `v=true` works both on the command line and in the environment.

use serde::{Deserialize, Serialize};

use bindfig::impl_record;

/// Root configuration for the demo application.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct DemoConfig {
    /// Application name shown in the banner.
    pub name: String,

    /// Enable verbose output.
    pub verbose: bool,

    /// Port number.
    pub port: u16,

    /// Hosts to bind to, comma-separated in text form.
    pub hosts: Vec<String>,

    /// Sampling ratio.
    pub ratio: f64,

    /// Retry delays in seconds, colon-separated in text form.
    pub retries: Vec<u32>,
}

impl_record!(DemoConfig {
    name,
    verbose(flag = "v"),
    port(env = "DEMO_PORT"),
    hosts(vsep = ","),
    ratio(env = "DEMO_RATIO"),
    retries,
});
