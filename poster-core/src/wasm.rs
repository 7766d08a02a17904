//! WebAssembly bindings for poster-core.
//!
//! The browser shell talks to the store through JSON strings: documents as
//! [`DocumentFile`], actions as [`Action`], gestures as [`InteractionEvent`].

use wasm_bindgen::prelude::*;

use crate::{
    editor_registry, Action, ComponentId, Document, DocumentFile, DocumentStore, EditorConfig,
    InteractionEvent, PropertyEditor, Registry,
};

/// Initialize the poster WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    store: DocumentStore,
    editors: Registry<dyn PropertyEditor>,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor holding an empty document.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(DocumentStore::new())
    }

    /// Create an editor from an `EditorConfig` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if JSON parsing fails or a limit is unusable.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<WasmEditor, String> {
        let config: EditorConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(Self::with_store(DocumentStore::with_config(config)))
    }

    /// Get the current document as JSON.
    #[wasm_bindgen(js_name = getDocumentJson)]
    #[must_use]
    pub fn get_document_json(&self) -> String {
        serde_json::to_string(&DocumentFile::from(self.store.document())).unwrap_or_default()
    }

    /// Replace the document with one serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if parsing fails or ids repeat.
    #[wasm_bindgen(js_name = loadDocumentJson)]
    pub fn load_document_json(&mut self, json: &str) -> Result<(), String> {
        let document = Document::from_json(json).map_err(|e| e.to_string())?;
        self.store.replace_document(document);
        Ok(())
    }

    /// Dispatch one action serialized as JSON. Returns whether it changed the document.
    ///
    /// # Errors
    ///
    /// Returns an error string if the action does not parse.
    #[wasm_bindgen(js_name = dispatchJson)]
    pub fn dispatch_json(&mut self, json: &str) -> Result<bool, String> {
        let action: Action = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(self.store.dispatch(action).changed())
    }

    /// Apply a gesture reported by the surface.
    ///
    /// # Errors
    ///
    /// Returns an error string if the event does not parse.
    #[wasm_bindgen(js_name = handleInteractionJson)]
    pub fn handle_interaction_json(&mut self, json: &str) -> Result<bool, String> {
        let event: InteractionEvent = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(self.store.handle_interaction(&event))
    }

    /// Property fields of a component as JSON, or `null` if it does not exist.
    #[wasm_bindgen(js_name = getFieldsJson)]
    #[must_use]
    pub fn get_fields_json(&self, id: &str) -> String {
        let id = ComponentId::from(id);
        let fields = self.store.document().get(&id).and_then(|component| {
            self.editors
                .lookup(component.component_type())
                .map(|editor| editor.fields(component))
        });
        serde_json::to_string(&fields).unwrap_or_default()
    }

    /// Edit one property; `value` is JSON.
    ///
    /// # Errors
    ///
    /// Returns an error string if the value does not parse or the edit is rejected.
    #[wasm_bindgen(js_name = editProperty)]
    pub fn edit_property(&mut self, id: &str, name: &str, value: &str) -> Result<bool, String> {
        let value: serde_json::Value = serde_json::from_str(value).map_err(|e| e.to_string())?;
        self.store
            .edit_property(&self.editors, &ComponentId::from(id), name, &value)
            .map_err(|e| e.to_string())
    }

    /// Combine the current selection. Returns the new container id, if any.
    #[wasm_bindgen(js_name = combineSelected)]
    pub fn combine_selected(&mut self) -> Option<String> {
        self.store.combine_selected().map(|id| id.to_string())
    }

    /// Separate a composite. Returns whether it was separated.
    pub fn separate(&mut self, id: &str) -> bool {
        self.store.separate(&ComponentId::from(id)).is_some()
    }

    /// Undo the last change.
    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    /// Monotonic change counter, for cheap dirty checks.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }
}

impl WasmEditor {
    fn with_store(store: DocumentStore) -> Self {
        Self {
            store,
            editors: editor_registry(),
        }
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SHAPES: &str = r##"{
        "width": 800.0,
        "height": 1200.0,
        "components": [
            {"id": "a", "geometry": {"x": 0.0, "y": 0.0, "width": 100.0, "height": 50.0},
             "opacity": 1.0, "z_index": 1,
             "payload": {"type": "rectangle", "data": {"fill": "#ff0000", "stroke": null}}},
            {"id": "b", "geometry": {"x": 200.0, "y": 10.0, "width": 60.0, "height": 60.0},
             "opacity": 1.0, "z_index": 2,
             "payload": {"type": "circle", "data": {"fill": "#00ff00", "stroke": null}}}
        ]
    }"##;

    #[test]
    fn new_editor_is_empty() {
        let editor = WasmEditor::new();
        let json: serde_json::Value =
            serde_json::from_str(&editor.get_document_json()).expect("valid json");
        assert_eq!(json["components"], serde_json::json!([]));
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn load_and_dispatch() {
        let mut editor = WasmEditor::new();
        editor.load_document_json(TWO_SHAPES).expect("load");
        let changed = editor
            .dispatch_json(r#"{"action":"select_multiple","ids":["a","b"]}"#)
            .expect("dispatch");
        assert!(changed);
        let group = editor.combine_selected().expect("combined");
        assert!(editor.get_document_json().contains(&group));
        assert!(editor.separate(&group));
        assert!(editor.undo());
        assert!(editor.redo());
    }

    #[test]
    fn invalid_input_is_reported() {
        let mut editor = WasmEditor::new();
        assert!(editor.load_document_json("{ not json }").is_err());
        assert!(editor.dispatch_json(r#"{"action":"explode"}"#).is_err());
        assert!(editor.handle_interaction_json("[]").is_err());
    }

    #[test]
    fn gestures_and_property_edits() {
        let mut editor = WasmEditor::new();
        editor.load_document_json(TWO_SHAPES).expect("load");
        let moved = editor
            .handle_interaction_json(
                r#"{"target":{"id":"a","container":null},"gesture":{"gesture":"drag_end","dx":5.0,"dy":5.0}}"#,
            )
            .expect("gesture");
        assert!(moved);

        assert!(editor
            .edit_property("b", "fill", r##""#0000ff""##)
            .expect("edit"));
        assert!(editor.edit_property("b", "fill", r#""blue""#).is_err());
        assert!(editor.get_fields_json("b").contains("#0000ff"));
        assert_eq!(editor.get_fields_json("ghost"), "null");
    }

    #[test]
    fn config_json_is_applied() {
        let editor = WasmEditor::with_config(r#"{"canvas_width": 400.0}"#).expect("config");
        assert!(editor.get_document_json().contains("400"));
        assert!(WasmEditor::with_config("nope").is_err());
        assert!(WasmEditor::with_config(r#"{"max_canvas_width": 0.5}"#).is_err());
        assert!(WasmEditor::with_config(r#"{"min_component_size": 5000.0}"#).is_err());
    }
}
