// src/document/document.rs
//! Document system: [`Document`] and [`DocumentId`].
//!
use std::fmt::Display;

use crate::config::DocumentConfig;
use crate::cookies::CookieStore;
use crate::document::ambient::AmbientJarHandle;
use crate::document::builder::DocumentBuilder;
use crate::document::page_jar::AmbientJar;
use crate::errors::DocumentError;
use crate::greet::Greeter;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A unique identifier for a document, represented as a UUID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for DocumentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(Uuid::parse_str(s).unwrap_or_else(|_| Uuid::new_v4()))
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// A document is the script-visible context of one loaded page. It binds a URL, the
// configuration for the scripting utilities, and the ambient jar the hosting environment
// provides. Everything a script can observe or mutate goes through the handle.
pub struct Document {
    /// ID of the document
    pub id: DocumentId,
    /// Parsed document URL; its path decides which cookie records are visible
    url: Url,
    /// Configuration for the scripting utilities
    config: DocumentConfig,

    pub jar: AmbientJarHandle, // Ambient cookie jar for this document
}

impl Document {
    /// Creates a document with the default configuration and a fresh
    /// in-memory jar.
    pub fn new(url: &str) -> Result<Self, DocumentError> {
        Self::builder().url(url).create()
    }

    /// Entry point to start building a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    pub(crate) fn assemble(
        id: DocumentId,
        url: Url,
        config: DocumentConfig,
        jar: AmbientJarHandle,
    ) -> Self {
        Self {
            id,
            url,
            config,
            jar,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// The raw cookie string this document observes, as semicolon-delimited
    /// `name=value` pairs. Empty when nothing is visible.
    pub fn cookie_string(&self) -> String {
        self.jar.read().unwrap().visible_cookies(self.url.path())
    }

    /// Returns the script-facing cookie API bound to this document's jar.
    pub fn cookies(&self) -> CookieStore {
        CookieStore::new(
            self.jar.clone(),
            self.url.path().to_string(),
            self.config.cookie.clone(),
        )
    }

    /// Returns a greeter writing to the default console sink.
    pub fn greeter(&self) -> Greeter {
        Greeter::new(&self.config.greeting)
    }
}
