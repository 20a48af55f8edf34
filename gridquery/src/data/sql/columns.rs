//! Column whitelists and name mapping
//!
//! Grid column ids are client-controlled, so they are resolved here before
//! reaching SQL. A configured map restricts ids to known columns and can
//! rename them; without one, any plain identifier is accepted as-is.

use std::collections::BTreeMap;

use crate::data::error::DataError;
use crate::utils::sql::is_plain_identifier;

/// Physical column behind a grid column id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub filterable: bool,
    pub sortable: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filterable: true,
            sortable: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: Option<BTreeMap<String, ColumnDef>>,
}

impl ColumnMap {
    /// Accept every plain identifier as its own column
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Only accept the given grid column ids.
    ///
    /// Fails if a physical column name is not a plain identifier.
    pub fn restricted<I>(defs: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (String, ColumnDef)>,
    {
        let mut columns = BTreeMap::new();
        for (id, def) in defs {
            if !is_plain_identifier(&def.name) {
                return Err(DataError::unknown_column(def.name));
            }
            columns.insert(id, def);
        }
        Ok(Self {
            columns: Some(columns),
        })
    }

    pub fn is_restricted(&self) -> bool {
        self.columns.is_some()
    }

    /// Whitelisted grid column ids, or `None` when unrestricted
    pub fn ids(&self) -> Option<impl Iterator<Item = &str>> {
        self.columns
            .as_ref()
            .map(|columns| columns.keys().map(String::as_str))
    }

    /// Physical column for filtering by `id`
    pub fn filter_column<'a>(&'a self, id: &'a str) -> Result<&'a str, DataError> {
        self.resolve(id, |def| def.filterable, "filterable")
    }

    /// Physical column for sorting by `id`
    pub fn sort_column<'a>(&'a self, id: &'a str) -> Result<&'a str, DataError> {
        self.resolve(id, |def| def.sortable, "sortable")
    }

    fn resolve<'a, F>(
        &'a self,
        id: &'a str,
        allowed: F,
        purpose: &'static str,
    ) -> Result<&'a str, DataError>
    where
        F: Fn(&ColumnDef) -> bool,
    {
        match &self.columns {
            Some(columns) => {
                let def = columns.get(id).ok_or_else(|| DataError::unknown_column(id))?;
                if !allowed(def) {
                    return Err(DataError::ColumnNotAllowed {
                        column: id.to_string(),
                        purpose,
                    });
                }
                Ok(def.name.as_str())
            }
            None if is_plain_identifier(id) => Ok(id),
            None => Err(DataError::unknown_column(id)),
        }
    }
}
