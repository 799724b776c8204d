use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

/// Options a client may pass in `initializationOptions`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializationOptions {
    /// Descriptor JSON files to load in addition to those given on the command line
    #[serde(default)]
    pub descriptor_files: Vec<PathBuf>,
}

impl InitializationOptions {
    /// Parse the raw options, treating anything unreadable as "no options"
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
                tracing::warn!("ignoring malformed initializationOptions: {}", err);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
