use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose};
use gangsheet::entities::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// Encoded image content, kept as a data URL (`data:<mime>;base64,<payload>`)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// Mime type of the file the image was loaded from
    pub mime_type: String,
    pub data: String,
}

impl ImageSource {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        ImageSource {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Wraps raw file content in a base64 data URL
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let payload = general_purpose::STANDARD.encode(bytes);
        ImageSource::new(mime_type, format!("data:{mime_type};base64,{payload}"))
    }

    /// The base64 payload without the data URL prefix.
    /// Data without a prefix is returned as is.
    pub fn payload(&self) -> &str {
        match self.data.split(',').nth(1) {
            Some(payload) if !payload.is_empty() => payload,
            _ => &self.data,
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        general_purpose::STANDARD
            .decode(self.payload())
            .context("image data is not valid base64")
    }
}

/// An image in the editing session: the packable [`Item`] plus what is needed to draw it
#[derive(Clone, Debug, PartialEq)]
pub struct SheetImage {
    pub item: Item,
    pub source: ImageSource,
    /// Stacking order, higher is drawn on top
    pub z_index: u64,
}

impl SheetImage {
    pub fn id(&self) -> ItemId {
        self.item.id
    }
}
