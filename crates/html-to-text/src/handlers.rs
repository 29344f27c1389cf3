//! Per-tag text transformers.
//!
//! Each recognized [`Tag`] owns exactly one handler. A fresh registry maps every tag to
//! [`identity_handler`]; registering a handler replaces the entry and marks it as
//! user-defined. Today only the `<a>` handler is consulted, to rewrite a link's href
//! before it is emitted.
//!
//! The registry is read-only during conversion. Populate it before sharing the
//! converter across threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::dom::Tag;
use crate::error::HandlerError;

/// A text transformer registered for a tag.
pub type Handler = Arc<dyn Fn(&str) -> Result<String, HandlerError> + Send + Sync>;

/// The default handler: returns its input unchanged.
pub fn identity_handler() -> Handler {
    Arc::new(|text: &str| -> Result<String, HandlerError> { Ok(text.to_string()) })
}

#[derive(Clone)]
struct Entry {
    handler: Handler,
    user_defined: bool,
}

/// Mapping from tag to its active handler.
#[derive(Clone)]
pub struct HandlerRegistry {
    entries: HashMap<Tag, Entry>,
}

impl HandlerRegistry {
    /// Registry with the identity handler installed for every recognized tag.
    pub fn new() -> Self {
        let identity = identity_handler();
        let entries = Tag::ALL
            .into_iter()
            .map(|tag| {
                (
                    tag,
                    Entry {
                        handler: Arc::clone(&identity),
                        user_defined: false,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Replace the handler for `tag` and mark it as user-defined.
    pub fn register<F>(&mut self, tag: Tag, handler: F) -> &mut Self
    where
        F: Fn(&str) -> Result<String, HandlerError> + Send + Sync + 'static,
    {
        self.register_arc(tag, Arc::new(handler))
    }

    /// Replace the handler for `tag` with an already shared handler.
    pub fn register_arc(&mut self, tag: Tag, handler: Handler) -> &mut Self {
        self.entries.insert(
            tag,
            Entry {
                handler,
                user_defined: true,
            },
        );
        self
    }

    /// Apply several replacements at once.
    pub fn register_all<I>(&mut self, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = (Tag, Handler)>,
    {
        for (tag, handler) in handlers {
            self.register_arc(tag, handler);
        }
        self
    }

    /// Active handler for `tag` and whether the user installed it.
    pub fn lookup(&self, tag: Tag) -> (Handler, bool) {
        self.entries.get(&tag).map_or_else(
            || (identity_handler(), false),
            |entry| (Arc::clone(&entry.handler), entry.user_defined),
        )
    }

    /// The user-installed handler for `tag`, if any.
    pub(crate) fn user_handler(&self, tag: Tag) -> Option<&Handler> {
        self.entries
            .get(&tag)
            .filter(|entry| entry.user_defined)
            .map(|entry| &entry.handler)
    }

    /// Whether `tag` has a user-installed handler.
    pub fn is_user_defined(&self, tag: Tag) -> bool {
        self.user_handler(tag).is_some()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut user_defined: Vec<Tag> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.user_defined)
            .map(|(tag, _)| *tag)
            .collect();
        user_defined.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("tags", &self.entries.len())
            .field("user_defined", &user_defined)
            .finish()
    }
}
