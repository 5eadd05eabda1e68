use std::collections::HashMap;
use std::sync::RwLock;

use crate::document::ambient::AmbientJarHandle;
use crate::document::page_jar::PageJar;
use crate::document::store::JarStore;
use crate::document::DocumentId;

pub struct InMemoryJarStore {
    /// Ambient jars per document
    jars: RwLock<HashMap<DocumentId, AmbientJarHandle>>,
}

impl InMemoryJarStore {
    pub fn new() -> Self {
        Self {
            jars: RwLock::new(HashMap::new()),
        }
    }
}

impl JarStore for InMemoryJarStore {
    fn jar_for(&self, document_id: DocumentId) -> Option<AmbientJarHandle> {
        use std::collections::hash_map::Entry;

        let mut jars = self.jars.write().unwrap();
        let handle = match jars.entry(document_id) {
            Entry::Occupied(o) => o.get().clone(),
            Entry::Vacant(v) => {
                let jar_handle: AmbientJarHandle = PageJar::new().into();
                v.insert(jar_handle.clone());
                jar_handle
            }
        };
        Some(handle)
    }

    fn persist_document_from_snapshot(&self, _document_id: DocumentId, _snapshot: &PageJar) {}

    fn remove_document(&self, document_id: DocumentId) {
        self.jars.write().unwrap().remove(&document_id);
    }

    fn persist_all(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::page_jar::AmbientJar;

    #[test]
    fn same_document_returns_same_handle() {
        let store = InMemoryJarStore::new();
        let d = DocumentId::new();

        let a = store.jar_for(d).unwrap();
        let b = store.jar_for(d).unwrap();

        // Same Arc target
        assert!(AmbientJarHandle::ptr_eq(&a, &b));

        // A write through one handle is observable through the other
        a.write().unwrap().write_cookie("shared=1; path=/;");
        assert_eq!(b.read().unwrap().visible_cookies("/"), "shared=1");
    }

    #[test]
    fn different_documents_get_different_handles() {
        let store = InMemoryJarStore::new();
        let d1 = DocumentId::new();
        let d2 = DocumentId::new();

        let a = store.jar_for(d1).unwrap();
        let b = store.jar_for(d2).unwrap();

        assert!(!AmbientJarHandle::ptr_eq(&a, &b));
    }

    #[test]
    fn remove_document_drops_only_that_document() {
        let store = InMemoryJarStore::new();
        let d1 = DocumentId::new();
        let d2 = DocumentId::new();

        let a = store.jar_for(d1).unwrap();
        let _b = store.jar_for(d2).unwrap();

        store.remove_document(d1);

        // d1 should allocate a fresh jar now
        let a2 = store.jar_for(d1).unwrap();
        assert!(!AmbientJarHandle::ptr_eq(&a, &a2));
    }
}
