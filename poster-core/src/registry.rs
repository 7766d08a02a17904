//! Static tag → handler tables.
//!
//! A [`Registry`] is built once and then only read. The render registry and
//! the property-editor registry are both instances of it, keyed by the same
//! [`ComponentType`] domain; several tags may share one handler.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::component::ComponentType;

/// Immutable mapping from type tag to handler.
pub struct Registry<H: ?Sized> {
    entries: BTreeMap<ComponentType, Arc<H>>,
}

impl<H: ?Sized> Registry<H> {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder<H> {
        RegistryBuilder {
            entries: BTreeMap::new(),
        }
    }

    /// Handler for a tag.
    #[must_use]
    pub fn lookup(&self, tag: ComponentType) -> Option<&H> {
        self.entries.get(&tag).map(|handler| &**handler)
    }

    /// Handler for a tag given as a string. Unknown strings return `None`.
    #[must_use]
    pub fn lookup_str(&self, tag: &str) -> Option<&H> {
        tag.parse::<ComponentType>()
            .ok()
            .and_then(|t| self.lookup(t))
    }

    /// Registered tags, in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = ComponentType> + '_ {
        self.entries.keys().copied()
    }

    /// Tags with no handler.
    #[must_use]
    pub fn missing(&self) -> Vec<ComponentType> {
        ComponentType::ALL
            .into_iter()
            .filter(|t| !self.entries.contains_key(t))
            .collect()
    }

    /// Whether every tag has a handler.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: ?Sized> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("tags", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for a [`Registry`].
pub struct RegistryBuilder<H: ?Sized> {
    entries: BTreeMap<ComponentType, Arc<H>>,
}

impl<H: ?Sized> RegistryBuilder<H> {
    /// Register a handler for one tag, replacing any earlier entry.
    #[must_use]
    pub fn register(mut self, tag: ComponentType, handler: Arc<H>) -> Self {
        if self.entries.insert(tag, handler).is_some() {
            tracing::warn!("Handler for {tag} registered twice; keeping the last one");
        }
        self
    }

    /// Register one shared handler for several tags.
    #[must_use]
    pub fn register_all(mut self, tags: &[ComponentType], handler: &Arc<H>) -> Self {
        for &tag in tags {
            self = self.register(tag, Arc::clone(handler));
        }
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Registry<H> {
        let registry = Registry {
            entries: self.entries,
        };
        let missing = registry.missing();
        if !missing.is_empty() {
            tracing::debug!("Registry built without handlers for {missing:?}");
        }
        registry
    }
}

impl<H: ?Sized> fmt::Debug for RegistryBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("tags", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
