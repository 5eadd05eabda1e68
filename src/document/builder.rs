use crate::config::DocumentConfig;
use crate::document::ambient::{AmbientJarHandle, JarStoreHandle};
use crate::document::page_jar::PageJar;
use crate::document::{Document, DocumentId};
use crate::errors::DocumentError;
use url::Url;

pub struct DocumentBuilder {
    id: Option<DocumentId>,
    url: Option<String>,
    config: Option<DocumentConfig>,
    jar_store: Option<JarStoreHandle>,
}

impl DocumentBuilder {
    pub(crate) fn new() -> Self {
        DocumentBuilder {
            id: None,
            url: None,
            config: None,
            jar_store: None,
        }
    }

    pub fn id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn config(mut self, cfg: DocumentConfig) -> Self {
        self.config = Some(cfg);
        self
    }

    /// Mint this document's jar from `store` instead of a fresh in-memory one.
    pub fn jar_store(mut self, store: JarStoreHandle) -> Self {
        self.jar_store = Some(store);
        self
    }

    pub fn create(self) -> Result<Document, DocumentError> {
        let raw_url = self
            .url
            .ok_or_else(|| DocumentError::InvalidUrl("no URL given".to_string()))?;
        let url = Url::parse(&raw_url).map_err(|e| DocumentError::InvalidUrl(e.to_string()))?;

        let id = self.id.unwrap_or_else(DocumentId::new);
        let config = self.config.unwrap_or_default();

        let jar: AmbientJarHandle = match self.jar_store {
            Some(store) => store.jar_for(id).ok_or(DocumentError::StoreRefused)?,
            None => PageJar::new().into(),
        };

        Ok(Document::assemble(id, url, config, jar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::store::InMemoryJarStore;
    use std::sync::Arc;

    #[test]
    fn builder_requires_a_url() {
        assert!(matches!(
            Document::builder().create(),
            Err(DocumentError::InvalidUrl(_))
        ));
    }

    #[test]
    fn store_built_documents_share_the_stored_jar() {
        let store = Arc::new(InMemoryJarStore::new());
        let id = DocumentId::new();

        let first = Document::builder()
            .id(id)
            .url("https://example.com/")
            .jar_store(store.clone())
            .create()
            .unwrap();
        first.cookies().set_session_cookie("shared", "yes", None);

        let second = Document::builder()
            .id(id)
            .url("https://example.com/about")
            .jar_store(store)
            .create()
            .unwrap();
        assert_eq!(second.cookies().get_cookie("shared"), "yes");
    }

    #[test]
    fn explicit_config_overrides_defaults() {
        let mut cfg = DocumentConfig::default();
        cfg.greeting.default_name = "Mona".to_string();

        let doc = Document::builder()
            .url("https://example.com/")
            .config(cfg)
            .create()
            .unwrap();
        assert_eq!(doc.config().greeting.default_name, "Mona");
    }
}
