//! Ambient jar core types.
//!
//! This module defines the **type-erased handles** used throughout the crate
//! and the serializable [`Cookie`] record.
//!
//! # Concurrency model
//! - [`AmbientJarHandle`] is `Arc<RwLock<dyn AmbientJar + Send + Sync>>`.
//!   - Callers take a **read lock** for non-mutating operations and a **write lock**
//!     for mutating operations on the underlying jar.
//! - [`JarStoreHandle`] is `Arc<dyn JarStore + Send + Sync>`.
//!   - Stores are expected to manage their **own internal synchronization**; the
//!     trait methods take `&self`.
//!
//! # Typical usage
//! ```ignore
//! // What the document observes
//! let jar = document.jar.clone(); // -> AmbientJarHandle
//! let visible = {
//!     let guard = jar.read().unwrap();
//!     guard.visible_cookies(document.url().path())
//! };
//!
//! // Apply a cookie assignment
//! {
//!     let mut guard = jar.write().unwrap();
//!     guard.write_cookie("theme=dark; path=/;");
//! }
//! ```
//!
//! The [`Cookie`] record is used for persistence/inspection and can be
//! (de)serialized via `serde` to JSON or other formats.

use crate::document::page_jar::AmbientJar;
use crate::document::store::JarStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// A handle to an ambient jar trait.
///
/// This is a reference-counted, read/write-locked pointer to a type-erased
/// [`AmbientJar`]. Obtain a **read lock** for queries and a **write lock** for
/// mutations.
pub type AmbientJarHandle = Arc<RwLock<dyn AmbientJar + Send + Sync>>;

/// A handle to a jar store trait.
///
/// This is a reference-counted pointer to a type-erased [`JarStore`].
/// Store implementations must be **`Send + Sync` and internally synchronized**,
/// since callers hold only `&self` when invoking trait methods.
///
/// Typical use is at **build time** to mint a per-document jar.
pub type JarStoreHandle = Arc<dyn JarStore + Send + Sync>;

/// A cookie record as held by the ambient jar.
///
/// The record captures exactly what an assignment string can express: a
/// name/value pair, a path, and an optional expiration timestamp. The
/// `expires` text is kept verbatim and only interpreted when expiry is
/// checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value, stored exactly as written.
    pub value: String,

    /// Path scoping (e.g. `"/"`). A record is visible to documents whose
    /// URL path starts with this prefix.
    pub path: String,

    /// Expiration timestamp in the cookie-date wire format, if any.
    /// Session cookies have `None` and do not survive the session.
    pub expires: Option<String>,
}

impl Cookie {
    /// Whether this record is a session cookie (no expiration attribute).
    pub fn is_session(&self) -> bool {
        self.expires.is_none()
    }
}
