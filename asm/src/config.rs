use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use crate::error::Error;

pub const DEFAULT_ERROR_LIMIT: usize = 5;

/// Assembler settings, loadable from YAML:
///
/// ```yaml
/// error-limit: 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Pass 1 gives up once more errors than this have been seen.
    pub error_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            error_limit: DEFAULT_ERROR_LIMIT,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(path.to_string(), e))
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
