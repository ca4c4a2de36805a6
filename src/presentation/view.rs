//! Plain-text rendering of gallery results.

use std::fmt::Write;

use crate::application::services::resolver::ResolveProgress;
use crate::domain::entities::{
    ArchiveManifest, Favorites, GalleryLayout, PeriodDescriptions, ResolvedImage,
};

/// Formats one resolution progress update.
#[must_use]
pub fn progress_line(progress: &ResolveProgress) -> String {
    let source = if progress.cache_hit { "cache" } else { "network" };
    format!(
        "resolved {}/{} ({source})",
        progress.completed, progress.total
    )
}

/// Formats the period listing, one line per period.
#[must_use]
pub fn render_periods(manifest: &ArchiveManifest, descriptions: &PeriodDescriptions) -> String {
    let mut out = String::new();
    for period in manifest.periods() {
        let count = manifest.period_images(period).len();
        match descriptions.for_period(period) {
            Some(description) => {
                let _ = writeln!(out, "{period} ({count} images): {description}");
            }
            None => {
                let _ = writeln!(out, "{period} ({count} images)");
            }
        }
    }
    out
}

/// Formats a resolved batch and its layout as an aligned table.
///
/// Tiles are flagged `!` when resolution fell through to the placeholder
/// and `*` when the path is favorited.
#[must_use]
pub fn render_layout(
    images: &[ResolvedImage],
    layout: &GalleryLayout,
    columns: usize,
    favorites: &Favorites,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} tiles in {columns} columns, container height {:.1}",
        images.len(),
        layout.container_height
    );

    for (index, (resolved, position)) in images.iter().zip(&layout.positions).enumerate() {
        let mut flags = String::new();
        if resolved.failed {
            flags.push('!');
        }
        if favorites.contains(&resolved.descriptor.path) {
            flags.push('*');
        }
        let source = resolved.source.to_string();
        let _ = writeln!(
            out,
            "{:>4}  {:>8.1},{:>8.1}  {:>7.1}x{:<7.1}  {source:<11}  {flags:<2} {}",
            index + 1,
            position.x,
            position.y,
            position.width,
            position.height,
            resolved.descriptor.title,
        );
    }
    out
}

/// Formats the favorites list, one path per line.
///
/// Paths no longer present in the manifest stay listed but are marked, so
/// a shrunken archive never silently loses a favorite.
#[must_use]
pub fn render_favorites(favorites: &Favorites, manifest: &ArchiveManifest) -> String {
    if favorites.is_empty() {
        return "no favorites\n".to_string();
    }

    let mut out = String::new();
    for path in favorites.paths() {
        match manifest.descriptor_for_path(path) {
            Some(descriptor) => {
                let _ = writeln!(out, "{path}  ({})", descriptor.title);
            }
            None => {
                let _ = writeln!(out, "{path}  (not in archive)");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        Extent, ImageDescriptor, LayoutPosition, ResolveSource, ResolvedImage,
    };
    use bytes::Bytes;

    fn manifest() -> ArchiveManifest {
        let mut manifest = ArchiveManifest::new();
        manifest.insert("april", "Flowers", "img/april/flowers.png");
        manifest.insert("april", "Rain", "img/april/rain.png");
        manifest.insert("may", "Sun", "img/may/sun.png");
        manifest
    }

    #[test]
    fn test_progress_line_names_the_source() {
        let line = progress_line(&ResolveProgress {
            completed: 3,
            total: 12,
            cache_hit: true,
        });
        assert_eq!(line, "resolved 3/12 (cache)");

        let line = progress_line(&ResolveProgress {
            completed: 4,
            total: 12,
            cache_hit: false,
        });
        assert_eq!(line, "resolved 4/12 (network)");
    }

    #[test]
    fn test_render_periods_lists_counts_and_descriptions() {
        let mut descriptions = PeriodDescriptions::new();
        descriptions.insert("april", "Early spring sketches");

        let rendered = render_periods(&manifest(), &descriptions);

        assert!(rendered.contains("april (2 images): Early spring sketches"));
        assert!(rendered.contains("may (1 images)"));
    }

    #[test]
    fn test_render_layout_flags_placeholders_and_favorites() {
        let images = vec![
            ResolvedImage::resolved(
                ImageDescriptor::new("Flowers", "img/april/flowers.png", "april"),
                Extent::new(800, 600),
                Bytes::from_static(b"data"),
                ResolveSource::Cache,
            ),
            ResolvedImage::placeholder(ImageDescriptor::new("Rain", "img/april/rain.png", "april")),
        ];
        let layout = GalleryLayout {
            positions: vec![
                LayoutPosition {
                    x: 0.0,
                    y: 0.0,
                    width: 392.0,
                    height: 294.0,
                },
                LayoutPosition {
                    x: 408.0,
                    y: 0.0,
                    width: 392.0,
                    height: 392.0,
                },
            ],
            container_height: 408.0,
        };
        let favorites = Favorites::from_paths(vec!["img/april/flowers.png".to_string()]);

        let rendered = render_layout(&images, &layout, 2, &favorites);

        assert!(rendered.contains("2 tiles in 2 columns, container height 408.0"));
        assert!(rendered.contains("* "));
        assert!(rendered.contains("! "));
        assert!(rendered.contains("Flowers"));
        assert!(rendered.contains("placeholder"));
    }

    #[test]
    fn test_render_favorites_marks_stale_paths() {
        let favorites = Favorites::from_paths(vec![
            "img/april/flowers.png".to_string(),
            "img/gone/lost.png".to_string(),
        ]);

        let rendered = render_favorites(&favorites, &manifest());

        assert!(rendered.contains("img/april/flowers.png  (Flowers)"));
        assert!(rendered.contains("img/gone/lost.png  (not in archive)"));
    }

    #[test]
    fn test_render_favorites_empty_set() {
        let rendered = render_favorites(&Favorites::new(), &manifest());
        assert_eq!(rendered, "no favorites\n");
    }
}
