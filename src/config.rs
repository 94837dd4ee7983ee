// ⚙️ Walkthrough configuration
//
// Sources, highest precedence first:
// 1. First positional CLI argument → catalog path
// 2. ACADMIX_CATALOG / ACADMIX_LOG / ACADMIX_LOAN_SEED (a `.env` file is honoured)
// 3. Defaults (built-in sample catalog, `acadmix=info`, random loan ids)

use crate::error::{RecordsError, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment prefix; `ACADMIX_LOAN_SEED` maps to the `loan_seed` key
pub const ENV_PREFIX: &str = "ACADMIX";

fn default_log_filter() -> String {
    "acadmix=info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    /// Catalog file; `None` uses the built-in sample catalog
    #[serde(default, rename = "catalog")]
    pub catalog_path: Option<PathBuf>,

    /// tracing-subscriber filter directive
    #[serde(default = "default_log_filter", rename = "log")]
    pub log_filter: String,

    /// Fixed seed for loan ids; `None` draws from the thread RNG
    #[serde(default)]
    pub loan_seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            catalog_path: None,
            log_filter: default_log_filter(),
            loan_seed: None,
        }
    }
}

impl DemoConfig {
    /// Resolve from the process arguments, `.env` and environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load(std::env::args().skip(1), None)
    }

    /// Resolve from explicit sources. `args` excludes the program name;
    /// `vars` replaces the process environment when given.
    pub fn load<I>(args: I, vars: Option<config::Map<String, String>>) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .ignore_empty(true)
            .source(vars);

        let mut demo: DemoConfig = config::Config::builder()
            .add_source(environment)
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|err| RecordsError::Config(err.to_string()))?;

        if let Some(path) = args.into_iter().find(|arg| !arg.starts_with('-')) {
            demo.catalog_path = Some(PathBuf::from(path));
        }

        Ok(demo)
    }
}
