//! Archive catalog entities: manifest and period descriptions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::image::ImageDescriptor;

/// The archive manifest, mapping period name to image title to image path.
///
/// Ordered maps keep period and title iteration deterministic across runs,
/// so `all` and period listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchiveManifest(BTreeMap<String, BTreeMap<String, String>>);

impl ArchiveManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one image entry under a period.
    pub fn insert(
        &mut self,
        period: impl Into<String>,
        title: impl Into<String>,
        path: impl Into<String>,
    ) {
        self.0
            .entry(period.into())
            .or_default()
            .insert(title.into(), path.into());
    }

    /// Period names in sorted order.
    pub fn periods(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of periods.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of images across all periods.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    /// Returns true when no period holds any image.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image_count() == 0
    }

    /// Returns true when the named period exists in the manifest.
    #[must_use]
    pub fn contains_period(&self, period: &str) -> bool {
        self.0.contains_key(period)
    }

    /// Descriptors for one period, in title order. Empty for an unknown
    /// period name.
    #[must_use]
    pub fn period_images(&self, period: &str) -> Vec<ImageDescriptor> {
        self.0.get(period).map_or_else(Vec::new, |images| {
            images
                .iter()
                .map(|(title, path)| ImageDescriptor::new(title, path, period))
                .collect()
        })
    }

    /// Every descriptor in the archive, grouped by period in sorted order.
    #[must_use]
    pub fn all_images(&self) -> Vec<ImageDescriptor> {
        self.0
            .iter()
            .flat_map(|(period, images)| {
                images
                    .iter()
                    .map(move |(title, path)| ImageDescriptor::new(title, path, period))
            })
            .collect()
    }

    /// Looks up the descriptor owning a path.
    #[must_use]
    pub fn descriptor_for_path(&self, path: &str) -> Option<ImageDescriptor> {
        self.0.iter().find_map(|(period, images)| {
            images
                .iter()
                .find(|(_, p)| p.as_str() == path)
                .map(|(title, p)| ImageDescriptor::new(title, p, period))
        })
    }
}

/// Free-text description per period, shown when that period is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodDescriptions(BTreeMap<String, String>);

impl PeriodDescriptions {
    /// Creates an empty description table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description for a period.
    pub fn insert(&mut self, period: impl Into<String>, description: impl Into<String>) {
        self.0.insert(period.into(), description.into());
    }

    /// Description for a period, if one exists.
    #[must_use]
    pub fn for_period(&self, period: &str) -> Option<&str> {
        self.0.get(period).map(String::as_str)
    }
}
