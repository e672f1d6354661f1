//! Statement catalogs: logical statement id → `:name` template.
//!
//! A catalog is built in code or loaded from a TOML file:
//!
//! ```toml
//! driver = "sqlite3"        # optional
//! bind_style = "question"   # optional, overrides the driver's dialect
//!
//! [statements]
//! "basic-query" = "SELECT content FROM records WHERE type=:qtype and name=:qname"
//! ```

use crate::bind_style::BindStyle;
use crate::error::{DbError, DbResult};
use crate::named::{CompiledQuery, compile};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Read-only mapping from statement id to template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementCatalog {
    statements: BTreeMap<String, String>,
}

impl StatementCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a statement, builder style.
    pub fn with(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(id, template);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, template: impl Into<String>) -> Option<String> {
        self.statements.insert(id.into(), template.into())
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.statements.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.statements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.statements
            .iter()
            .map(|(id, sql)| (id.as_str(), sql.as_str()))
    }

    /// Compile one statement.
    pub fn compile(&self, id: &str, style: BindStyle) -> DbResult<CompiledQuery> {
        let template = self
            .get(id)
            .ok_or_else(|| DbError::unknown_statement(id))?;
        compile(template, style)
    }

    /// Compile every statement, failing on the first malformed template.
    ///
    /// Returns the id of the offending statement alongside the error.
    pub fn validate(&self, style: BindStyle) -> Result<(), (String, DbError)> {
        for (id, template) in self.iter() {
            compile(template, style).map_err(|e| (id.to_string(), e))?;
        }
        Ok(())
    }

    pub fn from_toml_str(raw: &str) -> DbResult<Self> {
        Ok(CatalogFile::from_toml_str(raw)?.into_catalog())
    }

    pub fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(CatalogFile::load(path)?.into_catalog())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StatementCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            statements: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// On-disk catalog format.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    /// Driver the catalog was written for (informational for tools).
    pub driver: Option<String>,
    /// Explicit dialect; wins over `driver`.
    pub bind_style: Option<BindStyle>,
    #[serde(default)]
    pub statements: BTreeMap<String, String>,
}

impl CatalogFile {
    pub fn from_toml_str(raw: &str) -> DbResult<Self> {
        toml::from_str(raw).map_err(|e| DbError::Config(format!("invalid catalog: {e}")))
    }

    pub fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DbError::Config(format!("failed to read catalog {}: {e}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|e| {
            DbError::Config(format!("failed to parse catalog {}: {e}", path.display()))
        })
    }

    /// Dialect declared by the file, if any: `bind_style`, else `driver`.
    pub fn declared_style(&self) -> Option<BindStyle> {
        self.bind_style
            .or_else(|| self.driver.as_deref().map(BindStyle::for_driver))
    }

    pub fn into_catalog(self) -> StatementCatalog {
        StatementCatalog {
            statements: self.statements,
        }
    }
}
