//! Body encoding and the headers derived from it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, TemplateError};

pub const ACCEPT: &str = "accept";
pub const CONTENT_TYPE: &str = "content-type";

/// Encodes resources into request bodies and decodes response bodies.
///
/// `media_type` drives the `Accept` and `Content-Type` headers the template
/// sends, so a marshaller and the headers it implies never disagree.
pub trait Marshaller: Send + Sync {
    fn media_type(&self) -> &str;

    fn encode<T: Serialize>(&self, resource: &T) -> Result<String>;

    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T>;

    fn decode_list<T: DeserializeOwned>(&self, body: &str) -> Result<Vec<T>>;
}

/// JSON marshaller backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl Marshaller for JsonMarshaller {
    fn media_type(&self) -> &str {
        "application/json"
    }

    fn encode<T: Serialize>(&self, resource: &T) -> Result<String> {
        serde_json::to_string(resource).map_err(|e| TemplateError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| TemplateError::Deserialization(e.to_string()))
    }

    fn decode_list<T: DeserializeOwned>(&self, body: &str) -> Result<Vec<T>> {
        serde_json::from_str(body).map_err(|e| TemplateError::Deserialization(e.to_string()))
    }
}

/// Headers for read requests: the marshaller's format is the only one accepted.
pub fn accept_headers(media_type: &str) -> Vec<(String, String)> {
    vec![(ACCEPT.to_string(), media_type.to_string())]
}

/// Headers for write requests: the body is in the marshaller's format.
pub fn content_type_headers(media_type: &str) -> Vec<(String, String)> {
    vec![(CONTENT_TYPE.to_string(), media_type.to_string())]
}
