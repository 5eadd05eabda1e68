//! Script-facing cookie operations.
//!
//! [`CookieStore`] is the minimal key/value abstraction a script sees on top
//! of the ambient jar: read a value by name, write a persistent or session
//! cookie, delete by writing an already-expired assignment. It holds a
//! handle to the jar, the owning document's URL path, and the configured
//! defaults; it keeps no cookie state of its own. Every read re-parses the
//! visible jar string and every write issues a single assignment.
//!
//! ## Behavior notes
//! - `get_cookie` cannot distinguish an absent cookie from one whose value
//!   is empty: both return `""`.
//! - Values are written raw and percent-decoded on read.
//! - When the jar holds several records with the same name, the first one
//!   in jar order wins.

use crate::config::CookieConfig;
use crate::cookies::date::{
    expiry_from_days, format_cookie_date, EPOCH_COOKIE_DATE,
};
use crate::document::{AmbientJar, AmbientJarHandle};
use time::OffsetDateTime;

/// Cookie read/write/delete operations bound to one document's jar.
pub struct CookieStore {
    /// Ambient jar shared with the owning document.
    jar: AmbientJarHandle,
    /// URL path of the owning document, used for visibility.
    document_path: String,
    /// Defaults applied when the caller passes `None`.
    config: CookieConfig,
}

impl CookieStore {
    pub fn new(jar: AmbientJarHandle, document_path: String, config: CookieConfig) -> Self {
        Self {
            jar,
            document_path,
            config,
        }
    }

    /// Gets the value of a cookie.
    ///
    /// Reads the visible jar string, percent-decodes it, and returns the
    /// value of the first `;`-separated record whose decoded text begins
    /// with `"{name}="`. Returns the empty string when no record matches.
    pub fn get_cookie(&self, name: &str) -> String {
        let raw = {
            let guard = self.jar.read().unwrap();
            guard.visible_cookies(&self.document_path)
        };

        // Fall back to the raw text when a stored escape is not valid UTF-8
        let decoded = match urlencoding::decode(&raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw,
        };

        let needle = format!("{}=", name);
        for record in decoded.split(';') {
            let record = record.trim();
            if let Some(value) = record.strip_prefix(&needle) {
                return value.to_string();
            }
        }

        String::new()
    }

    /// Sets a cookie with the given name, value, days to expire and path.
    ///
    /// `expiry_days` and `path` default to the configured values
    /// (42 days and `/`). `expiry_days` may be negative.
    pub fn set_cookie(
        &self,
        name: &str,
        value: &str,
        expiry_days: Option<i64>,
        path: Option<&str>,
    ) {
        let days = expiry_days.unwrap_or(self.config.expiry_days);
        let expires = format_cookie_date(expiry_from_days(OffsetDateTime::now_utc(), days));
        let path = path.unwrap_or(&self.config.path);

        self.write(&format!("{name}={value}; expires={expires}; path={path};"));
    }

    /// Sets a cookie with the given name, value and path.
    ///
    /// The assignment carries no `expires` directive, so the record ends
    /// with the session instead of at a fixed time.
    pub fn set_session_cookie(&self, name: &str, value: &str, path: Option<&str>) {
        let path = path.unwrap_or(&self.config.path);

        self.write(&format!("{name}={value}; path={path};"));
    }

    /// Deletes a given cookie.
    ///
    /// Writes the name with an empty value and an epoch expiration
    /// timestamp, which makes the jar evict the record immediately.
    pub fn delete_cookie(&self, name: &str, path: Option<&str>) {
        let path = path.unwrap_or(&self.config.path);

        self.write(&format!("{name}=; expires={EPOCH_COOKIE_DATE}; path={path};"));
    }

    fn write(&self, assignment: &str) {
        self.jar.write().unwrap().write_cookie(assignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageJar;

    fn store() -> CookieStore {
        CookieStore::new(
            PageJar::new().into(),
            "/".to_string(),
            CookieConfig::default(),
        )
    }

    #[test]
    fn missing_cookie_reads_as_empty_string() {
        assert_eq!(store().get_cookie("nope"), "");
    }

    #[test]
    fn write_then_read_round_trips() {
        let cookies = store();
        cookies.set_cookie("theme", "dark", None, None);
        assert_eq!(cookies.get_cookie("theme"), "dark");
    }

    #[test]
    fn empty_value_is_indistinguishable_from_absent() {
        let cookies = store();
        cookies.set_cookie("blank", "", None, None);
        assert_eq!(cookies.get_cookie("blank"), "");
        assert_eq!(cookies.get_cookie("never-written"), "");
    }

    #[test]
    fn delete_then_read_yields_empty_string() {
        let cookies = store();
        cookies.set_cookie("gone", "soon", None, None);
        cookies.delete_cookie("gone", None);
        assert_eq!(cookies.get_cookie("gone"), "");
    }

    #[test]
    fn session_assignment_carries_no_expires_directive() {
        let cookies = store();
        cookies.set_session_cookie("csrf", "token", None);
        cookies.set_cookie("theme", "dark", None, None);

        let records = cookies.jar.read().unwrap().all_cookies();
        let csrf = records.iter().find(|c| c.name == "csrf").unwrap();
        let theme = records.iter().find(|c| c.name == "theme").unwrap();
        assert!(csrf.is_session());
        assert!(!theme.is_session());
    }

    #[test]
    fn percent_escaped_values_decode_on_read() {
        let cookies = store();
        cookies.set_cookie("greeting", "hello%20world", None, None);
        assert_eq!(cookies.get_cookie("greeting"), "hello world");
    }

    #[test]
    fn values_with_spaces_survive_the_decoding_read() {
        let cookies = store();
        cookies.set_cookie("motto", "carpe diem", None, None);
        assert_eq!(cookies.get_cookie("motto"), "carpe diem");
    }

    #[test]
    fn first_matching_record_wins() {
        // Two records with the same name can coexist under different paths;
        // the reader takes the first one in jar order.
        let cookies = CookieStore::new(
            PageJar::new().into(),
            "/app/index".to_string(),
            CookieConfig::default(),
        );
        cookies.set_session_cookie("a", "root", Some("/"));
        cookies.set_session_cookie("a", "app", Some("/app"));

        assert_eq!(cookies.get_cookie("a"), "root");
    }

    #[test]
    fn name_prefix_does_not_match() {
        let cookies = store();
        cookies.set_cookie("session_id", "123", None, None);
        assert_eq!(cookies.get_cookie("session"), "");
        assert_eq!(cookies.get_cookie("session_id"), "123");
    }

    #[test]
    fn explicit_path_scopes_the_write() {
        let cookies = CookieStore::new(
            PageJar::new().into(),
            "/".to_string(),
            CookieConfig::default(),
        );
        cookies.set_cookie("admin", "1", None, Some("/admin"));

        // the document at "/" never sees it
        assert_eq!(cookies.get_cookie("admin"), "");
    }

    #[test]
    fn negative_expiry_expires_immediately() {
        let cookies = store();
        cookies.set_cookie("old", "1", Some(-7), None);
        assert_eq!(cookies.get_cookie("old"), "");
    }

    #[test]
    fn persistent_assignment_wire_shape() {
        let cookies = store();
        cookies.set_cookie("theme", "dark", None, None);

        let records = cookies.jar.read().unwrap().all_cookies();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "theme");
        assert_eq!(records[0].value, "dark");
        assert_eq!(records[0].path, "/");
        let expires = records[0].expires.as_deref().unwrap();
        assert!(expires.ends_with("GMT"), "unexpected expires: {expires}");
    }
}
