#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Days until a cookie written without an explicit expiry expires.
    pub expiry_days: i64,
    /// Path attribute used when the caller does not pass one.
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            expiry_days: 42,        // 6 weeks
            path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GreetingConfig {
    /// Name used when the caller does not pass one.
    pub default_name: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            default_name: "Jose".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentConfig {
    pub cookie: CookieConfig,
    pub greeting: GreetingConfig,
}
