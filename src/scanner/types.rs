use std::collections::{BTreeMap, HashSet};

/// A mod name found under more than one workshop folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierCollision {
    pub mod_name: String,
    /// Identifier that ended up in the index
    pub kept: String,
    /// Identifier that was overwritten
    pub discarded: String,
}

/// Mod name -> identifier of the workshop folder it was found under.
///
/// Rebuilt on every scan and passed by value to the operations that need it.
/// Alongside the deduplicated name map it keeps every identifier folder's own
/// mod list, so a folder whose mods were all shadowed by a later identifier is
/// still reachable by its identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanIndex {
    entries: BTreeMap<String, String>,
    by_identifier: BTreeMap<String, Vec<String>>,
    collisions: Vec<IdentifierCollision>,
}

impl ScanIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mod. Last write wins; a changed identifier is recorded
    /// as a collision.
    pub fn register(&mut self, mod_name: &str, identifier: &str) {
        let folder = self.by_identifier.entry(identifier.to_string()).or_default();
        if !folder.iter().any(|name| name == mod_name) {
            folder.push(mod_name.to_string());
        }

        if let Some(previous) = self
            .entries
            .insert(mod_name.to_string(), identifier.to_string())
        {
            if previous != identifier {
                self.collisions.push(IdentifierCollision {
                    mod_name: mod_name.to_string(),
                    kept: identifier.to_string(),
                    discarded: previous,
                });
            }
        }
    }

    pub fn get(&self, mod_name: &str) -> Option<&str> {
        self.entries.get(mod_name).map(String::as_str)
    }

    pub fn contains(&self, mod_name: &str) -> bool {
        self.entries.contains_key(mod_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (mod name, identifier) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn mod_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every mod found under the `identifier` folder, including mods whose
    /// name now points at another identifier
    pub fn mods_under(&self, identifier: &str) -> &[String] {
        self.by_identifier
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn collisions(&self) -> &[IdentifierCollision] {
        &self.collisions
    }

    pub fn collision_for(&self, mod_name: &str) -> Option<&IdentifierCollision> {
        self.collisions.iter().rev().find(|c| c.mod_name == mod_name)
    }

    /// Identifiers of the given mods, in order and without duplicates.
    /// Names that are not indexed are skipped.
    pub fn identifiers_for<S: AsRef<str>>(&self, mod_names: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        mod_names
            .iter()
            .filter_map(|name| self.get(name.as_ref()))
            .filter(|id| seen.insert(*id))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_last_write_wins_and_records_collision() {
        let mut index = ScanIndex::new();
        index.register("ModA", "100");
        index.register("ModA", "200");

        assert_eq!(index.get("ModA"), Some("200"));
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.collisions(),
            &[IdentifierCollision {
                mod_name: "ModA".to_string(),
                kept: "200".to_string(),
                discarded: "100".to_string(),
            }]
        );
    }

    #[test]
    fn test_mods_under_keeps_shadowed_folders() {
        let mut index = ScanIndex::new();
        index.register("Shared", "100");
        index.register("Shared", "200");
        index.register("Other", "200");

        // The name map forgets 100, the folder list does not
        assert_eq!(index.get("Shared"), Some("200"));
        assert_eq!(index.mods_under("100"), ["Shared".to_string()]);
        assert_eq!(
            index.mods_under("200"),
            ["Shared".to_string(), "Other".to_string()]
        );
        assert!(index.mods_under("300").is_empty());
    }

    #[test]
    fn test_register_same_identifier_is_not_a_collision() {
        let mut index = ScanIndex::new();
        index.register("ModA", "100");
        index.register("ModA", "100");
        assert!(index.collisions().is_empty());
    }

    #[test]
    fn test_identifiers_for_dedupes_and_skips_unknown() {
        let mut index = ScanIndex::new();
        index.register("ModA", "100");
        index.register("ModA2", "100");
        index.register("ModB", "200");

        let ids = index.identifiers_for(&["ModB", "ModA", "Ghost", "ModA2"]);
        assert_eq!(ids, vec!["200".to_string(), "100".to_string()]);
    }
}
