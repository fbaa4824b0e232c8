//! Decoded provider response.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{FetchError, xml};
use crate::platform::ResponseFormat;

const BOM: char = '\u{feff}';

/// A decoded response body.
///
/// Wrapping the value lets array-shaped and object-shaped top levels go
/// through the same code path.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub data: Value,
}

impl Payload {
    /// Decode a raw body.
    pub fn parse(body: &str, format: ResponseFormat) -> Result<Self, FetchError> {
        let body = body.strip_prefix(BOM).unwrap_or(body);

        let data = match format {
            ResponseFormat::Json => {
                serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?
            }
            ResponseFormat::Xml => xml::to_value(body)?,
        };

        Ok(Self { data })
    }

    /// Deserialize the payload into a provider DTO.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        T::deserialize(&self.data).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
