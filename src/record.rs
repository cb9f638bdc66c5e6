//! File records exchanged with the surrounding form and their data-URI content.
//!
//! A record is the whole wire contract between the editor and its host: the
//! image travels as a `data:` URI and the annotations as a JSON array.

use crate::draw::Annotation;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading or writing file records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Content is not a data URI")]
    NotADataUri,

    #[error("Data URI uses unsupported encoding '{0}' (only base64 is supported)")]
    UnsupportedEncoding(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine image type of {0}")]
    UnknownImageType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Parses a base64 data URI.
    ///
    /// A missing mime type defaults to `text/plain` per RFC 2397.
    pub fn parse(uri: &str) -> Result<Self, RecordError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(RecordError::NotADataUri)?;
        let (meta, payload) = rest.split_once(',').ok_or(RecordError::NotADataUri)?;

        let mut params = meta.split(';');
        let mime_type = match params.next() {
            Some(mime) if !mime.is_empty() => mime.to_ascii_lowercase(),
            _ => "text/plain".to_string(),
        };

        let encoding = params.last().unwrap_or("");
        if !encoding.eq_ignore_ascii_case("base64") {
            return Err(RecordError::UnsupportedEncoding(encoding.to_string()));
        }

        let bytes = STANDARD.decode(payload.trim())?;
        Ok(Self { mime_type, bytes })
    }

    /// Encodes bytes as a base64 data URI.
    pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
    }
}

/// An uploaded file as the form stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Original file name
    pub name: String,
    /// Mime type of `content`
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Image bytes as a data URI
    pub content: String,
    /// Annotations placed on the image, in paint order
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl FileRecord {
    /// Creates a record for freshly uploaded content with no annotations.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let mime_type = mime_type.into();
        Self {
            name: name.into(),
            content: DataUri::encode(&mime_type, bytes),
            mime_type,
            annotations: Vec::new(),
        }
    }

    /// Builds a record from an image file on disk, guessing its type from the bytes.
    pub fn from_image_file(path: &Path) -> Result<Self, RecordError> {
        let bytes = fs::read(path)?;
        let format = image::guess_format(&bytes)
            .map_err(|_| RecordError::UnknownImageType(path.display().to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, format.to_mime_type(), &bytes))
    }

    /// Replaces content and annotations with the editor's saved result.
    pub fn apply_edit(&mut self, content: String, annotations: Vec<Annotation>) {
        self.content = content;
        self.annotations = annotations;
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes `content`.
    pub fn decode_content(&self) -> Result<DataUri, RecordError> {
        DataUri::parse(&self.content)
    }
}
