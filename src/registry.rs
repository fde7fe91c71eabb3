//! # Type Registry
//!
//! Maps a type tag to the handler that turns nodes of that type into code.
//! The table is keyed by exact tag only; [`Registry::resolve`] walks the
//! vocabulary's parent chain at lookup time and returns the first registered
//! ancestor. A `Treble8vbClef` with no handler of its own is therefore handled
//! by whatever is registered for `GClef`, `PitchClef` or `Clef`.
//!
//! Handlers are registered once when the registry is built, never per
//! document.

use crate::handlers::Handler;
use crate::vocabulary::Vocabulary;
use std::collections::HashMap;

pub struct Registry {
    vocabulary: Vocabulary,
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl Registry {
    /// A registry with no handlers over the given vocabulary
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            handlers: HashMap::new(),
        }
    }

    /// Associate `tag` with `handler`, replacing any earlier handler.
    pub fn register(&mut self, tag: &str, handler: impl Handler + 'static) {
        self.handlers.insert(tag.to_string(), Box::new(handler));
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Handler for `tag` or its nearest registered ancestor
    pub fn resolve(&self, tag: &str) -> Option<&dyn Handler> {
        self.resolve_with_origin(tag).map(|(_, handler)| handler)
    }

    /// Like [`Registry::resolve`], also returning the tag that matched
    pub fn resolve_with_origin(&self, tag: &str) -> Option<(&str, &dyn Handler)> {
        let handlers = &self.handlers;
        self.vocabulary.ancestors(tag).find_map(move |t| {
            handlers
                .get_key_value(t)
                .map(|(matched, handler)| (matched.as_str(), &**handler))
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("Registry").field("handlers", &tags).finish()
    }
}
