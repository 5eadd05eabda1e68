//! Ambient jar abstraction and a reference in-memory implementation.
//!
//! An **ambient jar** holds every cookie record belonging to one document
//! context. Scripts never touch records directly: reads observe a single
//! semicolon-delimited string and writes pass one assignment string at a
//! time, mirroring how a hosting environment exposes its jar.
//!
//! This module defines the [`AmbientJar`] trait and a reference
//! implementation, [`PageJar`], which stores records **in memory only**
//! (no persistence) and parses the `name=value; [expires=...;] [path=...;]`
//! assignment shape.
//!
//! ## Notes & limitations
//! - Parsing is intentionally **minimal**: only the `Expires` and `Path`
//!   attributes are interpreted; anything else after the value is ignored.
//! - Names containing `=` or `;` are not validated and produce garbled
//!   records, matching the behavior inherited from the assignment format.
//! - Expired records are evicted on write and filtered on read.
//! - This module is **not** internally synchronized. Use it via an
//!   `AmbientJarHandle = Arc<RwLock<dyn AmbientJar + Send + Sync>>`.

use std::any::Any;
use std::sync::{Arc, RwLock};

use crate::cookies::date::parse_cookie_date;
use crate::document::ambient::{AmbientJarHandle, Cookie};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An ambient jar keeps the cookie records for one document context.
///
/// Types implementing this trait encapsulate storage, expiry, and path
/// scoping of records according to the assignment strings they receive.
///
/// ### Type erasure
/// `as_any` / `as_any_mut` enable downcasting when callers need access to
/// concrete implementations (e.g., for snapshotting/persistence).
pub trait AmbientJar: Send + Sync {
    /// Returns a type-erased reference to the jar.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable type-erased reference to the jar.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the cookie string a document at `document_path` observes,
    /// as semicolon-delimited `name=value` pairs.
    ///
    /// Implementations must exclude expired records and records whose path
    /// does not prefix `document_path`. The empty string means no records
    /// are visible.
    fn visible_cookies(&self, document_path: &str) -> String;

    /// Applies a single cookie-assignment string.
    ///
    /// Implementations parse `name=value` followed by optional `expires`
    /// and `path` attributes, updating existing records with
    /// "last write wins" semantics when `(name, path)` collide. An
    /// assignment whose expiry lies in the past evicts the record.
    fn write_cookie(&mut self, assignment: &str);

    /// Removes all records from the jar.
    fn clear(&mut self);

    /// Retrieves all records, including ones not currently visible.
    ///
    /// This is primarily intended for diagnostics/inspection.
    fn all_cookies(&self) -> Vec<Cookie>;
}

/// Reference jar which holds the records for a single document context.
///
/// This implementation is **in-memory only** and performs **no persistence**.
/// Records keep their insertion order; an assignment for an existing
/// `(name, path)` pair replaces the record in place.
///
/// ### Parsing behavior
/// - `name` is everything before the first `=`, trimmed.
/// - The first `;`-separated segment after the `=` is the raw value.
/// - Attributes handled: `Path` (defaults to `/` when absent), `Expires`
///   (stored as the raw string). Attribute keys are case-insensitive.
/// - An `Expires` value that does not parse is dropped, leaving a session
///   record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageJar {
    /// Cookie records in insertion order.
    pub entries: Vec<Cookie>,
}

impl PageJar {
    /// Creates an empty in-memory jar.
    pub fn new() -> Self {
        PageJar {
            entries: Vec::new(),
        }
    }

    fn is_expired(cookie: &Cookie, now: OffsetDateTime) -> bool {
        match &cookie.expires {
            Some(raw) => match parse_cookie_date(raw) {
                Some(when) => when <= now,
                None => false,
            },
            None => false,
        }
    }
}

impl From<PageJar> for AmbientJarHandle {
    fn from(jar: PageJar) -> Self {
        Arc::new(RwLock::new(jar))
    }
}

impl AmbientJar for PageJar {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn visible_cookies(&self, document_path: &str) -> String {
        let now = OffsetDateTime::now_utc();

        self.entries
            .iter()
            .filter(|cookie| !Self::is_expired(cookie, now))
            .filter(|cookie| document_path.starts_with(&cookie.path))
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write_cookie(&mut self, assignment: &str) {
        let Some((name, rest)) = assignment.split_once('=') else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let mut value: Option<String> = None;
        let mut path: Option<String> = None;
        let mut expires = None;

        for part in rest.split(';') {
            let part = part.trim();
            if value.is_none() {
                value = Some(part.to_string());
                continue;
            }

            if let Some((k, v)) = part.split_once('=') {
                match k.trim().to_ascii_lowercase().as_str() {
                    "path" => path = Some(v.trim().to_string()),
                    "expires" => expires = Some(v.trim().to_string()),
                    _ => {}
                }
            }
        }

        let expires = match expires {
            Some(raw) => match parse_cookie_date(&raw) {
                Some(when) if when <= OffsetDateTime::now_utc() => {
                    // Past-dated assignment evicts the record
                    let path = path.as_deref().unwrap_or("/");
                    self.entries
                        .retain(|c| !(c.name == name && c.path == path));
                    return;
                }
                Some(_) => Some(raw),
                None => {
                    log::debug!("ignoring unparseable expires attribute {:?}", raw);
                    None
                }
            },
            None => None,
        };

        let cookie = Cookie {
            name: name.to_string(),
            value: value.unwrap_or_default(),
            path: path.unwrap_or_else(|| "/".to_string()),
            expires,
        };

        // Replace existing record with same name and path
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|c| c.name == cookie.name && c.path == cookie.path)
        {
            *existing = cookie;
        } else {
            self.entries.push(cookie);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn all_cookies(&self) -> Vec<Cookie> {
        self.entries.clone()
    }
}
