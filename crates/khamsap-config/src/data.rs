use std::env;

use serde::{Deserialize, Serialize};

fn default_source() -> String {
    "data/data.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// File path or http(s) URL of the entry list
    pub source: String,
}

impl DataConfig {
    pub fn new() -> Self {
        let source = env::var("KHAMSAP_DATA").unwrap_or_else(|_| default_source());

        Self { source }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new()
    }
}
