//! The persisted favorites set.

use serde::{Deserialize, Serialize};

/// An ordered set of favorited image paths.
///
/// Insertion order is preserved for display; membership is unique and
/// mutated only by explicit toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

impl Favorites {
    /// Creates an empty favorites set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from stored paths, dropping duplicates while keeping
    /// the first occurrence of each.
    #[must_use]
    pub fn from_paths(paths: Vec<String>) -> Self {
        let mut unique = Vec::with_capacity(paths.len());
        for path in paths {
            if !unique.contains(&path) {
                unique.push(path);
            }
        }
        Self(unique)
    }

    /// Returns true when the path is favorited.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|p| p == path)
    }

    /// Flips membership for a path, returning true when the path is now
    /// favorited.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.contains(path) {
            self.0.retain(|p| p != path);
            false
        } else {
            self.0.push(path.to_string());
            true
        }
    }

    /// Favorited paths in insertion order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.0
    }

    /// Number of favorited paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when nothing is favorited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut favorites = Favorites::from_paths(vec![
            "images/a.jpg".to_string(),
            "images/b.jpg".to_string(),
        ]);
        let before = favorites.clone();

        assert!(favorites.toggle("images/c.jpg"));
        assert!(!favorites.toggle("images/c.jpg"));
        assert_eq!(favorites, before);

        assert!(!favorites.toggle("images/a.jpg"));
        assert!(favorites.toggle("images/a.jpg"));
        assert!(favorites.contains("images/a.jpg"));
        assert_eq!(favorites.len(), before.len());
    }

    #[test]
    fn test_from_paths_deduplicates_keeping_first() {
        let favorites = Favorites::from_paths(vec![
            "images/a.jpg".to_string(),
            "images/b.jpg".to_string(),
            "images/a.jpg".to_string(),
        ]);
        assert_eq!(favorites.paths(), ["images/a.jpg", "images/b.jpg"]);
    }
}
