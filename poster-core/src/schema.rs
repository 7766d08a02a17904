//! Canonical serialized representation of a poster document.
//!
//! The runtime [`Document`] is an arena; on disk and across the WASM
//! boundary it is a flat, ordered list of components.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentId};
use crate::document::Document;
use crate::error::{PosterError, PosterResult};

/// Serialized poster document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Canvas background color.
    #[serde(default = "DocumentFile::default_background")]
    pub background_color: String,
    /// Components in document order.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Selection, verbatim.
    #[serde(default)]
    pub selected_ids: Vec<ComponentId>,
}

impl DocumentFile {
    fn default_background() -> String {
        "#ffffff".to_string()
    }

    /// Convert to a runtime document.
    ///
    /// # Errors
    ///
    /// Returns [`PosterError::DuplicateId`] if two components share an id.
    pub fn into_document(self) -> PosterResult<Document> {
        let mut seen = HashSet::with_capacity(self.components.len());
        for component in &self.components {
            if !seen.insert(&component.id) {
                return Err(PosterError::DuplicateId(component.id.to_string()));
            }
        }

        let mut document = Document::new(self.width, self.height);
        document.background_color = self.background_color;
        for component in self.components {
            document.insert(component);
        }
        document.set_selection(self.selected_ids);
        Ok(document)
    }
}

impl From<&Document> for DocumentFile {
    fn from(document: &Document) -> Self {
        Self {
            width: document.width,
            height: document.height,
            background_color: document.background_color.clone(),
            components: document.components().cloned().collect(),
            selected_ids: document.selected_ids().to_vec(),
        }
    }
}

impl Document {
    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PosterResult<String> {
        Ok(serde_json::to_string_pretty(&DocumentFile::from(self))?)
    }

    /// Parse a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate ids.
    pub fn from_json(json: &str) -> PosterResult<Self> {
        let file: DocumentFile = serde_json::from_str(json)?;
        file.into_document()
    }
}
