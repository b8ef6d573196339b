// src/index.rs
//! Bidirectional mapping between template ids and root-relative paths.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::types::TemplateId;

/// Id <-> path bijection produced by enumeration.
///
/// Paths are root-relative and always use `/` separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateIndex {
    by_id: BTreeMap<TemplateId, String>,
    by_path: HashMap<String, TemplateId>,
}

impl TemplateIndex {
    /// Assigns ids 1.. to `paths` in the order given.
    ///
    /// # Errors
    /// Returns `InvalidIndex` if a path appears twice.
    pub fn from_paths<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for (n, path) in (1u32..).zip(paths) {
            index.insert(TemplateId(n), path.into())?;
        }
        Ok(index)
    }

    fn insert(&mut self, id: TemplateId, path: String) -> Result<()> {
        if id.get() == 0 {
            return Err(Error::InvalidIndex("template ids start at 1".into()));
        }
        if self.by_path.contains_key(&path) {
            return Err(Error::InvalidIndex(format!("duplicate path '{path}'")));
        }
        if self.by_id.contains_key(&id) {
            return Err(Error::InvalidIndex(format!("duplicate id {id}")));
        }
        self.by_path.insert(path.clone(), id);
        self.by_id.insert(id, path);
        Ok(())
    }

    #[must_use]
    pub fn get_path(&self, id: TemplateId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn get_id(&self, path: &str) -> Option<TemplateId> {
        self.by_path.get(path).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TemplateId> + '_ {
        self.by_id.keys().copied()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (TemplateId, &str)> + '_ {
        self.by_id.iter().map(|(id, p)| (*id, p.as_str()))
    }

    /// Encodes the id map as `{"1": "layouts/app.blade.php", ...}`.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let map: BTreeMap<u32, &str> = self.iter().map(|(id, p)| (id.get(), p)).collect();
        Ok(serde_json::to_string_pretty(&map)?)
    }

    /// Decodes an id map previously written by [`TemplateIndex::to_json`].
    ///
    /// # Errors
    /// Returns error on malformed JSON or when the map is not a bijection.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: BTreeMap<u32, String> = serde_json::from_str(json)?;
        let mut index = Self::default();
        for (id, path) in map {
            index.insert(TemplateId(id), path)?;
        }
        Ok(index)
    }
}
