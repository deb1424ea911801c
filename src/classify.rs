/// Magnitude band used to color markers and legend swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeBand {
    Minor,
    Light,
    Moderate,
    Strong,
    Major,
    Great,
}

impl MagnitudeBand {
    pub fn hex(self) -> &'static str {
        match self {
            MagnitudeBand::Minor => "#33cc33",
            MagnitudeBand::Light => "#99ff33",
            MagnitudeBand::Moderate => "#ffff00",
            MagnitudeBand::Strong => "#ff9933",
            MagnitudeBand::Major => "#ff6600",
            MagnitudeBand::Great => "#ff0000",
        }
    }
}

/// Classifies a magnitude into its display band.
///
/// Bands are half-open `[n, n + 1)` up to 5, then `> 5`. A magnitude of exactly
/// 5.0 matches no band and returns `None`, as does NaN. Markers without a band
/// are drawn with the map library's default stroke.
pub fn color_for(magnitude: f64) -> Option<MagnitudeBand> {
    if magnitude < 1.0 {
        Some(MagnitudeBand::Minor)
    } else if (1.0..2.0).contains(&magnitude) {
        Some(MagnitudeBand::Light)
    } else if (2.0..3.0).contains(&magnitude) {
        Some(MagnitudeBand::Moderate)
    } else if (3.0..4.0).contains(&magnitude) {
        Some(MagnitudeBand::Strong)
    } else if (4.0..5.0).contains(&magnitude) {
        Some(MagnitudeBand::Major)
    } else if magnitude > 5.0 {
        Some(MagnitudeBand::Great)
    } else {
        None
    }
}

/// Hex color for a magnitude, `None` for the unclassified gap.
pub fn hex_for(magnitude: f64) -> Option<&'static str> {
    color_for(magnitude).map(MagnitudeBand::hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(color_for(0.0), Some(MagnitudeBand::Minor));
        assert_eq!(color_for(0.99), Some(MagnitudeBand::Minor));
        assert_eq!(color_for(1.0), Some(MagnitudeBand::Light));
        assert_eq!(color_for(1.99), Some(MagnitudeBand::Light));
        assert_eq!(color_for(2.0), Some(MagnitudeBand::Moderate));
        assert_eq!(color_for(3.0), Some(MagnitudeBand::Strong));
        assert_eq!(color_for(4.0), Some(MagnitudeBand::Major));
        assert_eq!(color_for(4.999), Some(MagnitudeBand::Major));
        assert_eq!(color_for(5.001), Some(MagnitudeBand::Great));
        assert_eq!(color_for(9.5), Some(MagnitudeBand::Great));
    }

    #[test]
    fn negative_magnitudes_are_minor() {
        assert_eq!(color_for(-1.2), Some(MagnitudeBand::Minor));
        assert_eq!(hex_for(-0.3), Some("#33cc33"));
    }

    #[test]
    fn exactly_five_falls_into_the_gap() {
        assert_eq!(color_for(5.0), None);
        assert_eq!(hex_for(5.0), None);
    }

    #[test]
    fn nan_is_unclassified() {
        assert_eq!(color_for(f64::NAN), None);
    }

    #[test]
    fn every_band_has_a_distinct_color() {
        let samples = [0.5, 1.5, 2.5, 3.5, 4.5, 5.5];
        let mut colors: Vec<&str> = samples.iter().filter_map(|m| hex_for(*m)).collect();
        assert_eq!(colors.len(), 6);
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), 6);
    }
}
