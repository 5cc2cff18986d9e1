//! Clap adapter for bindfig.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It provides
//! [`BindArgs`], a clap derive struct that collects trailing `KEY=VALUE`
//! settings so an application can accept them next to its own flags:
//!
//! ```ignore
//! #[derive(Parser)]
//! struct Cli {
//!     #[arg(long)]
//!     verbose: bool,
//!
//!     #[command(flatten)]
//!     settings: BindArgs,
//! }
//!
//! let cli = Cli::parse();
//! let config: AppConfig = Bindfig::builder().args(cli.settings.into_args()).load()?;
//! ```
//!
//! Clap only gathers the strings. Splitting and binding happen in the core,
//! with the same rules as raw process arguments.

use clap::Args;

/// Clap-derived positional `KEY=VALUE` settings.
#[derive(Debug, Clone, Default, Args)]
pub struct BindArgs {
    /// Configuration settings, e.g. `port=8080 hosts=a:b`.
    #[arg(value_name = "KEY=VALUE", value_parser = parse_setting)]
    pub settings: Vec<String>,
}

impl BindArgs {
    /// The collected settings, ready for [`BindfigBuilder::args`](crate::BindfigBuilder::args).
    pub fn into_args(self) -> Vec<String> {
        self.settings
    }
}

/// Reject positional values that cannot be settings, so typos surface as
/// clap usage errors instead of being skipped.
fn parse_setting(raw: &str) -> Result<String, String> {
    match crate::args::split_setting(raw) {
        Some(_) => Ok(raw.to_string()),
        None => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
