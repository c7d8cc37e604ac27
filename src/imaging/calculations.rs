//! Pure calculation functions for variant geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Height of a cover-crop variant derived from an aspect ratio.
///
/// ```text
/// crop_height(1920, (16, 9)) == 1080
/// crop_height(1200, (16, 9)) == 675
/// ```
pub fn crop_height(width: u32, aspect: (u32, u32)) -> u32 {
    let (aspect_w, aspect_h) = aspect;
    (width as f64 * aspect_h as f64 / aspect_w as f64).round() as u32
}

/// Dimensions of a source scaled down to fit inside a box, never enlarged.
///
/// `max_height` of `None` leaves the height unbounded, so only the width
/// constrains the result. A source already inside the box keeps its size.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `max_width` - Box width
/// * `max_height` - Optional box height
pub fn fit_inside_dimensions(
    source: (u32, u32),
    max_width: u32,
    max_height: Option<u32>,
) -> (u32, u32) {
    let (src_w, src_h) = source;
    let scale_w = max_width as f64 / src_w as f64;
    let scale = match max_height {
        Some(h) => scale_w.min(h as f64 / src_h as f64),
        None => scale_w,
    };

    if scale >= 1.0 {
        return source;
    }

    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_width);
    let h = ((src_h as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while keeping
/// the source aspect ratio. One dimension matches exactly, the other may exceed.
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(tgt_w), h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(tgt_h))
    }
}

/// Orientation label and aspect ratio of a source, for progress output.
pub fn describe_orientation(dims: (u32, u32)) -> (&'static str, f64) {
    let (w, h) = dims;
    let ratio = w as f64 / h as f64;
    let label = match w.cmp(&h) {
        std::cmp::Ordering::Greater => "landscape",
        std::cmp::Ordering::Less => "portrait",
        std::cmp::Ordering::Equal => "square",
    };
    (label, ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // crop_height
    // =========================================================================

    #[test]
    fn crop_height_sixteen_nine_hero_widths() {
        assert_eq!(crop_height(1920, (16, 9)), 1080);
        assert_eq!(crop_height(1200, (16, 9)), 675);
        assert_eq!(crop_height(768, (16, 9)), 432);
        assert_eq!(crop_height(480, (16, 9)), 270);
    }

    #[test]
    fn crop_height_rounds() {
        // 1000 * 9 / 16 = 562.5
        assert_eq!(crop_height(1000, (16, 9)), 563);
    }

    #[test]
    fn crop_height_square() {
        assert_eq!(crop_height(600, (1, 1)), 600);
    }

    // =========================================================================
    // fit_inside_dimensions
    // =========================================================================

    #[test]
    fn fit_inside_landscape_width_only() {
        assert_eq!(fit_inside_dimensions((4000, 3000), 800, None), (800, 600));
    }

    #[test]
    fn fit_inside_portrait_width_only() {
        // Width governs even for tall sources when height is unbounded
        assert_eq!(fit_inside_dimensions((3000, 4000), 600, None), (600, 800));
    }

    #[test]
    fn fit_inside_never_enlarges() {
        assert_eq!(fit_inside_dimensions((500, 400), 1200, None), (500, 400));
    }

    #[test]
    fn fit_inside_exact_width_is_unchanged() {
        assert_eq!(fit_inside_dimensions((800, 533), 800, None), (800, 533));
    }

    #[test]
    fn fit_inside_with_height_bound() {
        // Height is the tighter constraint: 3000x4000 into 800x800 → 600x800
        assert_eq!(
            fit_inside_dimensions((3000, 4000), 800, Some(800)),
            (600, 800)
        );
    }

    #[test]
    fn fit_inside_never_exceeds_width() {
        for src_w in [801, 999, 1201, 3333, 6000] {
            let (w, _) = fit_inside_dimensions((src_w, 1234), 800, None);
            assert!(w <= 800, "{src_w} → {w}");
        }
    }

    #[test]
    fn fit_inside_extreme_panorama_keeps_one_pixel() {
        let (w, h) = fit_inside_dimensions((10000, 10), 400, None);
        assert_eq!(w, 400);
        assert_eq!(h, 1);
    }

    // =========================================================================
    // calculate_fill_dimensions
    // =========================================================================

    #[test]
    fn fill_wider_source() {
        // 2000x1000 filling 1920x1080 → height matches
        assert_eq!(
            calculate_fill_dimensions((2000, 1000), (1920, 1080)),
            (2160, 1080)
        );
    }

    #[test]
    fn fill_taller_source() {
        // 1000x1500 filling 480x270 → width matches
        assert_eq!(
            calculate_fill_dimensions((1000, 1500), (480, 270)),
            (480, 720)
        );
    }

    #[test]
    fn fill_always_covers_target() {
        for src in [(100, 100), (1920, 1080), (300, 2000), (5000, 200)] {
            let (w, h) = calculate_fill_dimensions(src, (768, 432));
            assert!(w >= 768 && h >= 432, "{src:?} → {w}x{h}");
        }
    }

    // =========================================================================
    // describe_orientation
    // =========================================================================

    #[test]
    fn orientation_labels() {
        assert_eq!(describe_orientation((1600, 900)).0, "landscape");
        assert_eq!(describe_orientation((900, 1600)).0, "portrait");
        assert_eq!(describe_orientation((500, 500)).0, "square");
    }

    #[test]
    fn orientation_ratio() {
        let (_, ratio) = describe_orientation((1600, 1200));
        assert!((ratio - 1.3333).abs() < 0.001);
    }
}
