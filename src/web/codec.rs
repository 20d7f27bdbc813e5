use http::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::transport::{Request, ResponseWriter};

/// Errors raised while decoding a request or encoding a response
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Malformed JSON, or JSON that does not fit the target type
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing the response failed
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    /// Several targets were requested but the body is not an array
    #[error("expected a JSON array of {expected} values")]
    ExpectedArray { expected: usize },
    /// The body array length does not match the number of targets
    #[error("expected {expected} values, found {found}")]
    Arity { expected: usize, found: usize },
}

/// A value the codec can write. Implemented for every `Serialize` type.
pub trait Encode {
    fn encode_value(&self) -> serde_json::Result<Value>;
}

impl<T: Serialize + ?Sized> Encode for T {
    fn encode_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// A slot the codec can fill. Implemented for every `DeserializeOwned` type.
pub trait Decode {
    fn decode_value(&mut self, value: Value) -> serde_json::Result<()>;
}

impl<T: DeserializeOwned> Decode for T {
    fn decode_value(&mut self, value: Value) -> serde_json::Result<()> {
        *self = serde_json::from_value(value)?;
        Ok(())
    }
}

/// Message codec shared by every generated handler.
///
/// A single value is decoded from / encoded as the whole message; several
/// values form a sequence matched by position.
pub trait Codec: Send + Sync {
    /// Write `values` to `sink`
    fn encode(&self, sink: &mut dyn ResponseWriter, values: &[&dyn Encode])
        -> Result<(), CodecError>;

    /// Fill `values` from the body of `source`
    fn decode(&self, source: &Request, values: &mut [&mut dyn Decode]) -> Result<(), CodecError>;
}

/// JSON body codec
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(
        &self,
        sink: &mut dyn ResponseWriter,
        values: &[&dyn Encode],
    ) -> Result<(), CodecError> {
        let body = match values {
            [] => return Ok(()),
            [single] => single.encode_value()?,
            many => Value::Array(
                many.iter()
                    .map(|v| v.encode_value())
                    .collect::<serde_json::Result<Vec<_>>>()?,
            ),
        };
        sink.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        serde_json::to_writer(&mut *sink, &body)?;
        Ok(())
    }

    fn decode(&self, source: &Request, values: &mut [&mut dyn Decode]) -> Result<(), CodecError> {
        match values {
            [] => Ok(()),
            [single] => {
                let value: Value = serde_json::from_slice(&source.body)?;
                single.decode_value(value)?;
                Ok(())
            }
            many => {
                let value: Value = serde_json::from_slice(&source.body)?;
                let Value::Array(items) = value else {
                    return Err(CodecError::ExpectedArray {
                        expected: many.len(),
                    });
                };
                if items.len() != many.len() {
                    return Err(CodecError::Arity {
                        expected: many.len(),
                        found: items.len(),
                    });
                }
                for (slot, item) in many.iter_mut().zip(items) {
                    slot.decode_value(item)?;
                }
                Ok(())
            }
        }
    }
}
