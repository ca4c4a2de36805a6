//! View filters exposed to the presentation layer.

/// Number of images the random filter samples by default.
pub const DEFAULT_RANDOM_COUNT: usize = 40;

/// Which slice of the archive a view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryFilter {
    /// Every image in the archive.
    All,
    /// A uniform sample of `count` images without replacement.
    Random {
        /// Sample size; clamped to the archive size at selection time.
        count: usize,
    },
    /// The favorites set intersected with the manifest.
    Favorites,
    /// One named period, exactly as listed in the manifest.
    Period(String),
}

impl GalleryFilter {
    /// The random filter at its default sample size.
    #[must_use]
    pub const fn random() -> Self {
        Self::Random {
            count: DEFAULT_RANDOM_COUNT,
        }
    }

    /// Parses a filter name; anything that is not a reserved word is
    /// treated as a period name.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "all" => Self::All,
            "random" => Self::random(),
            "favorites" | "favorite" => Self::Favorites,
            period => Self::Period(period.to_string()),
        }
    }
}

impl std::fmt::Display for GalleryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Random { count } => write!(f, "random-{count}"),
            Self::Favorites => write!(f, "favorites"),
            Self::Period(period) => write!(f, "{period}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reserved_names() {
        assert_eq!(GalleryFilter::parse("all"), GalleryFilter::All);
        assert_eq!(GalleryFilter::parse("random"), GalleryFilter::random());
        assert_eq!(GalleryFilter::parse("favorites"), GalleryFilter::Favorites);
        assert_eq!(GalleryFilter::parse("favorite"), GalleryFilter::Favorites);
    }

    #[test]
    fn test_parse_falls_back_to_period() {
        assert_eq!(
            GalleryFilter::parse("2001"),
            GalleryFilter::Period("2001".to_string())
        );
    }

    #[test]
    fn test_default_random_count() {
        assert_eq!(GalleryFilter::random(), GalleryFilter::Random { count: 40 });
    }
}
