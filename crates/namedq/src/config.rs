use crate::bind_style::BindStyle;
use std::time::Duration;

/// Configuration for [`crate::CatalogClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Dialect override. `None` resolves from the store's driver name.
    pub bind_style: Option<BindStyle>,
    /// Compiled-statement cache capacity; `0` disables caching.
    pub statement_cache: usize,
    /// Statements slower than this are logged at `warn`.
    pub slow_query_threshold: Option<Duration>,
    /// Whether to emit `tracing` events for executed statements.
    pub logging_enabled: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bind_style: None,
            statement_cache: 0,
            slow_query_threshold: None,
            logging_enabled: true,
            max_sql_length: Some(200),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a dialect instead of resolving it from the driver name.
    pub fn bind_style(mut self, style: BindStyle) -> Self {
        self.bind_style = Some(style);
        self
    }

    /// Keep up to `cap` compiled statements.
    pub fn statement_cache(mut self, cap: usize) -> Self {
        self.statement_cache = cap;
        self
    }

    /// Disable compiled-statement caching.
    pub fn no_statement_cache(mut self) -> Self {
        self.statement_cache = 0;
        self
    }

    /// Set slow query threshold.
    pub fn slow_threshold(mut self, duration: Duration) -> Self {
        self.slow_query_threshold = Some(duration);
        self
    }

    /// Disable statement logging.
    pub fn no_logging(mut self) -> Self {
        self.logging_enabled = false;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
