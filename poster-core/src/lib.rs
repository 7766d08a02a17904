//! # Poster Core
//!
//! Document model and editing engine for the poster editor.
//! Compiles to WASM for the browser shell and to a native library for tools.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              poster-core.wasm               │
//! ├─────────────────────────────────────────────┤
//! │  Component Model │  Registries              │
//! │  - Type tags     │  - Tag → property editor │
//! │  - Payloads      │  - Tag → renderer        │
//! │  - Geometry      │    (poster-renderer)     │
//! ├─────────────────────────────────────────────┤
//! │  Document Store  │  Composition             │
//! │  - Actions       │  - Combine / separate    │
//! │  - Selection     │  - Relative coordinates  │
//! │  - Undo / redo   │  - Gesture translation   │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod component;
pub mod compose;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod registry;
pub mod schema;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use action::{Action, Outcome};
pub use component::{
    Component, ComponentData, ComponentId, ComponentPatch, ComponentType, ContainerData, Geometry,
};
pub use compose::{check_combine, Bounds, CombineRejection};
pub use config::EditorConfig;
pub use document::Document;
pub use editor::{editor_registry, FieldKind, PropertyEditor, PropertyField};
pub use error::{PosterError, PosterResult};
pub use interaction::{actions_for, Gesture, GestureTarget, Handlers, InteractionEvent};
pub use registry::{Registry, RegistryBuilder};
pub use schema::DocumentFile;
pub use store::DocumentStore;

/// Poster core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
