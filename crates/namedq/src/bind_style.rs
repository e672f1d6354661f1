//! Placeholder dialects and the driver → dialect table.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The placeholder syntax a driver expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindStyle {
    /// Driver not in the table. Rendered like [`BindStyle::Question`].
    #[default]
    Unknown,
    /// `?`
    Question,
    /// `$1, $2, ...`
    Dollar,
    /// `:name` re-emitted as written
    Named,
    /// `@p1, @p2, ...`
    At,
}

const DRIVERS: &[(&str, BindStyle)] = &[
    ("postgres", BindStyle::Dollar),
    ("pgx", BindStyle::Dollar),
    ("pq-timeouts", BindStyle::Dollar),
    ("cloudsqlpostgres", BindStyle::Dollar),
    ("ql", BindStyle::Dollar),
    ("nrpostgres", BindStyle::Dollar),
    ("cockroach", BindStyle::Dollar),
    ("mysql", BindStyle::Question),
    ("sqlite3", BindStyle::Question),
    ("rqlite", BindStyle::Question),
    ("nrmysql", BindStyle::Question),
    ("nrsqlite3", BindStyle::Question),
    ("oci8", BindStyle::Named),
    ("ora", BindStyle::Named),
    ("goracle", BindStyle::Named),
    ("godror", BindStyle::Named),
    ("sqlserver", BindStyle::At),
];

impl BindStyle {
    /// Resolve the dialect for a driver name.
    ///
    /// Unrecognized drivers resolve to [`BindStyle::Unknown`].
    pub fn for_driver(driver: &str) -> Self {
        DRIVERS
            .iter()
            .find(|(name, _)| *name == driver)
            .map(|(_, style)| *style)
            .unwrap_or(BindStyle::Unknown)
    }

    /// Lowercase name, as accepted by `FromStr` and catalog files.
    pub fn as_str(self) -> &'static str {
        match self {
            BindStyle::Unknown => "unknown",
            BindStyle::Question => "question",
            BindStyle::Dollar => "dollar",
            BindStyle::Named => "named",
            BindStyle::At => "at",
        }
    }

    /// All dialects, in declaration order.
    pub fn all() -> [BindStyle; 5] {
        [
            BindStyle::Unknown,
            BindStyle::Question,
            BindStyle::Dollar,
            BindStyle::Named,
            BindStyle::At,
        ]
    }
}

/// Shorthand for [`BindStyle::for_driver`].
pub fn bind_style(driver: &str) -> BindStyle {
    BindStyle::for_driver(driver)
}

/// Every `(driver, dialect)` pair the resolver knows about.
pub fn known_drivers() -> impl Iterator<Item = (&'static str, BindStyle)> {
    DRIVERS.iter().copied()
}

impl fmt::Display for BindStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unknown" => Ok(BindStyle::Unknown),
            "question" => Ok(BindStyle::Question),
            "dollar" => Ok(BindStyle::Dollar),
            "named" => Ok(BindStyle::Named),
            "at" => Ok(BindStyle::At),
            other => Err(format!("unknown bind style: {other}")),
        }
    }
}
