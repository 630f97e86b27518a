pub mod cave;
pub mod maze;

use crate::error::Result;

use serde::de::DeserializeOwned;

/// Parses a map spec written in RON.
pub fn from_ron_str<S: DeserializeOwned>(text: &str) -> Result<S> {
    Ok(ron::de::from_str(text)?)
}
