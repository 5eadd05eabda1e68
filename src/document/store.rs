//! Jar store infrastructure.
//!
//! A **jar store** is a provisioner and persistence layer for per-document
//! ambient jars.
//! - A **Document** only *holds an [`AmbientJarHandle`]*, never a store.
//! - A **JarStore** can *mint* a jar for a given [`DocumentId`] and optionally
//!   persist/flush all document jars in one place (e.g., a single JSON file).
//!
//! Typical usage patterns:
//! - During document building, pass a store so it mints that document's jar.
//! - For ephemeral/private documents, skip the store and use an in-memory jar.
//!
//! ## Design notes
//! - Stores are **not** kept in documents; they are *only used at build time*
//!   to obtain a jar.
//! - Implementations should be `Send + Sync` and safe for concurrent access.
//! - `JarStore::jar_for(document_id)` should return the *same logical jar
//!   instance* for a document for the lifetime of the store, so all handles
//!   observe consistent state.

mod in_memory;
mod json;

use crate::document::ambient::AmbientJarHandle;
use crate::document::page_jar::PageJar;
use crate::document::DocumentId;

pub use in_memory::InMemoryJarStore;
/// File-backed JSON jar store (one file for all documents).
pub use json::JsonJarStore;

/// A jar **store** mints per-document ambient **jars** and (optionally)
/// persists them.
///
/// Documents never store a `JarStore`; they only hold an [`AmbientJarHandle`].
/// The store exists to:
/// 1) provide the jar for a given [`DocumentId`], and
/// 2) write/read cookie state to/from durable storage.
///
/// Implementations must be `Send + Sync` and safe for concurrent use.
pub trait JarStore: Send + Sync {
    /// Returns (or creates and returns) the jar handle for `document_id`.
    ///
    /// ### Expectations
    /// - Should return the *same logical jar instance* for a given
    ///   `document_id` across calls, so all holders observe consistent state.
    /// - May create the jar lazily on first request.
    /// - Return `None` if the store no longer manages this document or if
    ///   provisioning fails irrecoverably.
    fn jar_for(&self, document_id: DocumentId) -> Option<AmbientJarHandle>;

    /// Persists the cookie state for `document_id` from a provided snapshot.
    ///
    /// This allows a jar wrapper to push the current in-memory state
    /// (captured in a [`PageJar`] snapshot) into the store without requiring
    /// the store to hold a direct reference to the live jar.
    ///
    /// This should be **best-effort** and must not panic.
    fn persist_document_from_snapshot(&self, document_id: DocumentId, snapshot: &PageJar);

    /// Removes all persisted cookie data for `document_id` from the store.
    ///
    /// Implementations should also drop any internal cache for this document
    /// so that subsequent calls to [`JarStore::jar_for`] can recreate a
    /// fresh, empty jar (or return `None`).
    ///
    /// This operation should be **idempotent** and must not panic.
    fn remove_document(&self, document_id: DocumentId);

    /// Persists all known document jars to durable storage.
    ///
    /// Called during graceful shutdown or at explicit flush points.
    /// Implementations should make a **best-effort** to write all dirty
    /// state and avoid panicking.
    fn persist_all(&self);
}
