use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contents of `mods_info.json`: installed mod name -> upstream identifier.
///
/// `mods_count` mirrors `mods.len()`. Every mutator below keeps the two in
/// step, and [`super::load_manifest`] normalises files that disagree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ModManifest {
    #[serde(default)]
    pub(crate) mods_count: usize,
    #[serde(default)]
    pub(crate) mods: BTreeMap<String, String>,
}

impl ModManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mod, replacing any identifier it had before
    pub fn insert(&mut self, mod_name: impl Into<String>, identifier: impl Into<String>) {
        self.mods.insert(mod_name.into(), identifier.into());
        self.sync_count();
    }

    /// Record a mod only if it is not already present
    pub fn insert_if_absent(&mut self, mod_name: &str) -> bool {
        if self.mods.contains_key(mod_name) {
            return false;
        }
        self.mods.insert(mod_name.to_string(), String::new());
        self.sync_count();
        true
    }

    pub fn remove(&mut self, mod_name: &str) -> Option<String> {
        let removed = self.mods.remove(mod_name);
        self.sync_count();
        removed
    }

    pub fn retain(&mut self, keep: impl FnMut(&String, &mut String) -> bool) {
        self.mods.retain(keep);
        self.sync_count();
    }

    pub fn get(&self, mod_name: &str) -> Option<&str> {
        self.mods.get(mod_name).map(String::as_str)
    }

    pub fn contains(&self, mod_name: &str) -> bool {
        self.mods.contains_key(mod_name)
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    /// The stored `mods_count`, always equal to [`Self::len`]
    pub fn count(&self) -> usize {
        self.mods_count
    }

    /// (mod name, identifier) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.mods.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn mod_names(&self) -> impl Iterator<Item = &str> {
        self.mods.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    pub(crate) fn sync_count(&mut self) {
        self.mods_count = self.mods.len();
    }
}

impl FromIterator<(String, String)> for ModManifest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut manifest = Self {
            mods_count: 0,
            mods: iter.into_iter().collect(),
        };
        manifest.sync_count();
        manifest
    }
}
