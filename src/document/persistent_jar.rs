use crate::document::ambient::{AmbientJarHandle, Cookie, JarStoreHandle};
use crate::document::page_jar::{AmbientJar, PageJar};
use crate::document::DocumentId;

/// An `AmbientJar` decorator that persists changes after each mutation.
///
/// This type is *transparent* for reads but *eagerly* persists after writes.
pub struct PersistentJar {
    /// Document ID associated with this jar (used to address the store).
    document_id: DocumentId,
    /// Inner jar that holds the actual cookie state.
    pub inner: AmbientJarHandle,
    /// Handle to the jar store responsible for persistence.
    store_handle: JarStoreHandle,
}

impl PersistentJar {
    /// Creates a new persistence-enabled wrapper around an existing jar.
    ///
    /// The store will be used to persist snapshots after each mutation.
    pub fn new(document_id: DocumentId, jar: AmbientJarHandle, store_handle: JarStoreHandle) -> Self {
        Self {
            document_id,
            inner: jar,
            store_handle,
        }
    }

    /// Snapshots the inner jar and persists it to the backing store.
    ///
    /// Only a [`PageJar`] can be snapshotted; any other inner implementation
    /// is skipped, keeping persistence best-effort.
    fn persist(&self) {
        let snapshot = {
            let inner = self.inner.read().unwrap();
            match inner.as_any().downcast_ref::<PageJar>() {
                Some(jar) => jar.clone(),
                None => return,
            }
        };

        self.store_handle
            .persist_document_from_snapshot(self.document_id, &snapshot);
    }
}

impl AmbientJar for PersistentJar {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    /// Returns the visible cookie string without persisting.
    fn visible_cookies(&self, document_path: &str) -> String {
        self.inner.read().unwrap().visible_cookies(document_path)
    }

    /// Applies an assignment, then persists the updated state.
    fn write_cookie(&mut self, assignment: &str) {
        self.inner.write().unwrap().write_cookie(assignment);
        self.persist();
    }

    /// Clears all records in the jar, then persists the updated state.
    fn clear(&mut self) {
        self.inner.write().unwrap().clear();
        self.persist();
    }

    /// Returns all records (for debugging/inspection) without persisting.
    fn all_cookies(&self) -> Vec<Cookie> {
        self.inner.read().unwrap().all_cookies()
    }
}
