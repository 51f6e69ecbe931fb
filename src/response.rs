//! Response interpretation modes and the settled transfer result

use crate::blob::Blob;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResponseType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "blob")]
    Blob,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "arraybuffer")]
    ArrayBuffer,
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseType::Text => write!(f, "text"),
            ResponseType::Blob => write!(f, "blob"),
            ResponseType::Json => write!(f, "json"),
            ResponseType::ArrayBuffer => write!(f, "arraybuffer"),
        }
    }
}

impl ResponseType {
    /// Interpret a raw response body. Unparseable JSON becomes `null`.
    pub fn interpret(self, body: Vec<u8>, content_type: Option<&str>) -> ResponseBody {
        match self {
            ResponseType::Text => ResponseBody::Text(String::from_utf8_lossy(&body).into_owned()),
            ResponseType::Blob => ResponseBody::Blob(Blob::new(body, content_type.unwrap_or(""))),
            ResponseType::Json => ResponseBody::Json(
                serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
            ),
            ResponseType::ArrayBuffer => ResponseBody::ArrayBuffer(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    Blob(Blob),
    Json(serde_json::Value),
    ArrayBuffer(Vec<u8>),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            ResponseBody::Blob(blob) => Some(blob),
            _ => None,
        }
    }

    /// Convert any body into a blob. JSON is re-serialized.
    pub fn into_blob(self) -> Blob {
        match self {
            ResponseBody::Blob(blob) => blob,
            ResponseBody::Text(text) => Blob::new(text.into_bytes(), "text/plain;charset=utf-8"),
            ResponseBody::Json(value) => Blob::new(value.to_string().into_bytes(), "application/json"),
            ResponseBody::ArrayBuffer(bytes) => Blob::from(bytes),
        }
    }
}

/// Settled outcome of a transfer that reached completion, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferResult {
    pub body: ResponseBody,
    pub status: u16,
    pub ok: bool,
}

impl TransferResult {
    pub fn new(body: ResponseBody, status: u16) -> Self {
        Self {
            body,
            status,
            ok: (200..300).contains(&status),
        }
    }
}
