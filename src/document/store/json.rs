//! JSON-backed jar store.
//!
//! `JsonJarStore` persists **all documents'** ambient jars in a single JSON
//! file on disk. It implements the [`JarStore`] trait and returns per-document
//! jars wrapped in [`PersistentJar`], so that **every mutation** to a jar
//! triggers a snapshot write back to this store.
//!
//! ### Design
//! - One file for all documents (`JarStoreFile { documents: HashMap<DocumentId, PageJar> }`).
//! - In-memory cache: `jars: RwLock<HashMap<DocumentId, AmbientJarHandle>>` for quick reuse.
//! - The store keeps a self handle (`store_self`) so the persistent jars can
//!   call back into `persist_document_from_snapshot`.
//! - **Session records are dropped when a jar is loaded from disk.** A jar
//!   read back by a later store instance represents a new browsing session,
//!   and session cookies do not survive one.
//!
//! ### Concurrency
//! - This type is internally synchronized via `RwLock`s and is `Send + Sync`
//!   behind a `JarStoreHandle = Arc<dyn JarStore + Send + Sync>`.
//! - Returned jars are `Arc<RwLock<_>>` and safe to share across threads.
//!
//! ### I/O characteristics & caveats
//! - `persist_document_from_snapshot` and `remove_document` **read then
//!   rewrite** the entire JSON file.
//! - File writes are not atomic.
//! - All I/O is best-effort: failures are logged and leave the previous
//!   on-disk state in place.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::document::ambient::{AmbientJarHandle, JarStoreHandle};
use crate::document::page_jar::{AmbientJar, PageJar};
use crate::document::persistent_jar::PersistentJar;
use crate::document::store::JarStore;
use crate::document::DocumentId;
use serde::{Deserialize, Serialize};

/// On-disk representation of all documents' jars.
///
/// This is the JSON payload stored at `JsonJarStore::path`.
#[derive(Debug, Serialize, Deserialize)]
struct JarStoreFile {
    documents: HashMap<DocumentId, PageJar>,
}

/// A JSON-based jar store that persists cookies across sessions.
///
/// The store caches per-document jars in memory and loads/saves them to a
/// single JSON file. Jars returned by this store are wrapped in
/// [`PersistentJar`], so that writes automatically trigger persistence to
/// disk.
pub struct JsonJarStore {
    /// Path to the JSON file where cookies are stored.
    path: PathBuf,

    /// Actual list of ambient jars per document
    jars: RwLock<HashMap<DocumentId, AmbientJarHandle>>,

    /// Self handle, so `PersistentJar` can call back into this store.
    ///
    /// This is initialized in [`new`](Self::new) and then read-only thereafter.
    store_self: RwLock<Option<JarStoreHandle>>,
}

impl JsonJarStore {
    /// Creates (or opens) a JSON jar store at `path`.
    ///
    /// If the file does not exist, an empty structure is written to disk.
    pub fn new(path: PathBuf) -> Arc<Self> {
        if !path.exists() {
            let empty = JarStoreFile {
                documents: HashMap::new(),
            };
            if let Ok(contents) = serde_json::to_vec(&empty) {
                if let Err(e) = fs::write(&path, contents) {
                    log::warn!("cannot initialize jar store file {:?}: {}", path, e);
                }
            }
        }

        let store = Arc::new(Self {
            path,
            jars: RwLock::new(HashMap::new()),
            store_self: RwLock::new(None),
        });

        {
            let mut self_ref = store.store_self.write().unwrap();
            *self_ref = Some(store.clone() as JarStoreHandle);
        }

        store
    }

    /// Loads and deserializes the full jar store file.
    ///
    /// Returns an empty structure if the file cannot be read or parsed.
    fn load_file(&self) -> JarStoreFile {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("cannot read jar store file {:?}: {}", self.path, e);
                return JarStoreFile {
                    documents: HashMap::new(),
                };
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("cannot parse jar store file {:?}: {}", self.path, e);
            JarStoreFile {
                documents: HashMap::new(),
            }
        })
    }

    /// Serializes and writes the full jar store file (pretty-printed).
    fn save_file(&self, store_file: &JarStoreFile) {
        let contents = match serde_json::to_string_pretty(store_file) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("cannot serialize jar store: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, contents) {
            log::warn!("cannot write jar store file {:?}: {}", self.path, e);
        }
    }
}

impl JarStore for JsonJarStore {
    /// Returns the jar handle for `document_id`, creating it if needed.
    ///
    /// Behavior:
    /// - If a jar for `document_id` exists in the in-memory cache, it is
    ///   returned.
    /// - Otherwise, a serialized jar is loaded from disk (if present) or an
    ///   empty [`PageJar`] is created. Session records in the loaded jar are
    ///   discarded.
    /// - That jar is wrapped in a [`PersistentJar`] bound to this store
    ///   (via `store_self`) so that subsequent mutations persist
    ///   automatically.
    fn jar_for(&self, document_id: DocumentId) -> Option<AmbientJarHandle> {
        {
            // Fast path: already in memory
            let jars = self.jars.read().unwrap();
            if let Some(jar) = jars.get(&document_id) {
                return Some(jar.clone());
            }
        }

        // Load from disk
        let mut file = self.load_file();
        let mut jar = file
            .documents
            .remove(&document_id)
            .unwrap_or_else(PageJar::new);

        // Session records end with the session that wrote them
        jar.entries.retain(|cookie| !cookie.is_session());

        let arc_jar: AmbientJarHandle = jar.into();

        let store_ref = self.store_self.read().unwrap();
        let store = store_ref.as_ref().expect("store_self not initialized").clone();

        // Wrap in PersistentJar
        let persistent: AmbientJarHandle = Arc::new(RwLock::new(PersistentJar::new(
            document_id,
            arc_jar.clone(),
            store,
        )));

        self.jars
            .write()
            .unwrap()
            .insert(document_id, persistent.clone());

        Some(persistent)
    }

    /// Persists a snapshot of `document_id`'s jar to disk.
    ///
    /// Called by [`PersistentJar`] after each mutation. This method reads the
    /// current file, updates/replaces the document entry, and writes the file
    /// back.
    fn persist_document_from_snapshot(&self, document_id: DocumentId, snapshot: &PageJar) {
        let mut store_file = self.load_file();
        store_file.documents.insert(document_id, snapshot.clone());
        self.save_file(&store_file);
    }

    /// Removes `document_id` from both the in-memory cache and the on-disk
    /// file.
    fn remove_document(&self, document_id: DocumentId) {
        self.jars.write().unwrap().remove(&document_id);

        let mut file = self.load_file();
        file.documents.remove(&document_id);
        self.save_file(&file);
    }

    /// Persists **all** in-memory jars to disk by snapshotting them.
    ///
    /// Only jars of type [`PersistentJar`] that wrap a [`PageJar`] are
    /// snapshotted here. This avoids double-wrapping and keeps the format
    /// stable.
    fn persist_all(&self) {
        let jars = self.jars.read().unwrap();

        let mut file = self.load_file();
        for (document_id, jar) in jars.iter() {
            if let Ok(jar) = jar.read() {
                if let Some(persist) = jar.as_any().downcast_ref::<PersistentJar>() {
                    if let Ok(inner) = persist.inner.read() {
                        if let Some(page) = inner.as_any().downcast_ref::<PageJar>() {
                            file.documents.insert(*document_id, page.clone());
                        }
                    }
                }
            }
        }

        self.save_file(&file);
    }
}
