//! Outlined text labels stamped onto a canvas.

use crate::{
    canvas::Canvas,
    color::Color,
    font::{FontHandle, SkipReason, TextMask},
};

/// Result of a best-effort stamp. A skipped label leaves the canvas untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum StampOutcome {
    Stamped,
    Skipped(SkipReason),
}

impl StampOutcome {
    pub fn is_stamped(&self) -> bool {
        matches!(self, StampOutcome::Stamped)
    }
}

/// Everything needed for one stamp.
#[derive(Debug, Clone)]
pub struct LabelSpec {
    pub text: String,
    pub font: FontHandle,
    pub position: (i32, i32),
    pub fill: Color,
    pub outline: Color,
    pub outline_width: u32,
}

impl LabelSpec {
    pub fn stamp(&self, canvas: &mut Canvas) -> StampOutcome {
        stamp_label(
            canvas,
            self.position,
            &self.text,
            &self.font,
            self.fill,
            self.outline,
            self.outline_width,
        )
    }
}

/// Every offset of the `(2w+1)^2` square around the origin, except the origin.
pub fn outline_offsets(width: u32) -> impl Iterator<Item = (i32, i32)> {
    let w = i32::try_from(width).unwrap_or(i32::MAX);
    (-w..=w)
        .flat_map(move |dx| (-w..=w).map(move |dy| (dx, dy)))
        .filter(|&offset| offset != (0, 0))
}

/// Draws `text` at `position` with a filled-square halo of `outline_width`
/// pixels, then the text itself in `fill` on top.
///
/// `position` is the top-left of the text's line box; centering is up to the
/// caller. If the font can't render the text nothing is drawn.
pub fn stamp_label(
    canvas: &mut Canvas,
    position: (i32, i32),
    text: &str,
    font: &FontHandle,
    fill: Color,
    outline: Color,
    outline_width: u32,
) -> StampOutcome {
    match font.rasterize(text) {
        Ok(mask) => {
            stamp_mask(canvas, position, &mask, fill, outline, outline_width);
            StampOutcome::Stamped
        }
        Err(reason) => StampOutcome::Skipped(reason),
    }
}

/// [`stamp_label`] for text that is already rasterized.
pub fn stamp_mask(
    canvas: &mut Canvas,
    position: (i32, i32),
    mask: &TextMask,
    fill: Color,
    outline: Color,
    outline_width: u32,
) {
    let x = i64::from(position.0);
    let y = i64::from(position.1);
    for (dx, dy) in outline_offsets(outline_width) {
        draw_mask(canvas, mask, x + i64::from(dx), y + i64::from(dy), outline);
    }
    draw_mask(canvas, mask, x, y, fill);
}

fn draw_mask(canvas: &mut Canvas, mask: &TextMask, x: i64, y: i64, color: Color) {
    for pixel in mask.pixels() {
        canvas.blend(
            x + i64::from(pixel.x),
            y + i64::from(pixel.y),
            color,
            pixel.coverage,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::render_gradient;

    const BLACK: Color = Color::rgb(0, 0, 0);
    const WHITE: Color = Color::rgb(255, 255, 255);
    const DARK_BLUE: Color = Color::rgb(0x1E, 0x5B, 0xB8);

    fn black_canvas() -> Canvas {
        Canvas::solid(20, 20, BLACK).unwrap()
    }

    #[test]
    fn test_outline_offsets_fill_the_square() {
        for w in 0..5u32 {
            let offsets: Vec<_> = outline_offsets(w).collect();
            let side = 2 * w as usize + 1;
            assert_eq!(offsets.len(), side * side - 1);
            assert!(!offsets.contains(&(0, 0)));
            assert!(offsets
                .iter()
                .all(|&(dx, dy)| dx.unsigned_abs() <= w && dy.unsigned_abs() <= w));
        }
        assert!(outline_offsets(1).any(|o| o == (1, 1)));
    }

    #[test]
    fn test_zero_width_draws_only_fill() {
        let mut canvas = black_canvas();
        let font = FontHandle::builtin(8.0);
        let outcome = stamp_label(&mut canvas, (10, 10), ".", &font, WHITE, DARK_BLUE, 0);
        assert_eq!(outcome, StampOutcome::Stamped);

        for y in 0..20 {
            for x in 0..20 {
                let expected = if (x, y) == (12, 16) { WHITE } else { BLACK };
                assert_eq!(canvas.pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_halo_is_a_filled_square() {
        let mut canvas = black_canvas();
        let font = FontHandle::builtin(8.0);
        let outcome = stamp_label(&mut canvas, (10, 10), ".", &font, WHITE, DARK_BLUE, 2);
        assert!(outcome.is_stamped());

        let mut halo = 0;
        for y in 0..20 {
            for x in 0..20 {
                let in_square = (10..=14).contains(&x) && (14..=18).contains(&y);
                let expected = match (x, y) {
                    (12, 16) => WHITE,
                    _ if in_square => DARK_BLUE,
                    _ => BLACK,
                };
                assert_eq!(canvas.pixel(x, y), expected, "pixel ({x}, {y})");
                if expected == DARK_BLUE {
                    halo += 1;
                }
            }
        }
        assert_eq!(halo, 5 * 5 - 1);
    }

    #[test]
    fn test_fill_wins_over_halo() {
        let mut canvas = Canvas::solid(64, 32, BLACK).unwrap();
        let font = FontHandle::builtin(8.0);
        let mask = font.rasterize("Rx").unwrap();
        let outcome = stamp_label(&mut canvas, (5, 5), "Rx", &font, WHITE, DARK_BLUE, 3);
        assert!(outcome.is_stamped());

        for p in mask.pixels() {
            assert_eq!(canvas.pixel((5 + p.x) as u32, (5 + p.y) as u32), WHITE);
        }
        // Left of 'R' is only reached by the halo.
        assert_eq!(canvas.pixel(4, 5), DARK_BLUE);
        assert_eq!(canvas.pixel(1, 5), BLACK);
    }

    #[test]
    fn test_skipped_label_leaves_canvas_unchanged() {
        let mut canvas = render_gradient(40, 40, WHITE, DARK_BLUE).unwrap();
        let before = canvas.clone();
        let font = FontHandle::builtin(16.0);

        let outcome = stamp_label(&mut canvas, (2, 2), "Rx☤", &font, WHITE, DARK_BLUE, 2);
        assert_eq!(outcome, StampOutcome::Skipped(SkipReason::MissingGlyph('☤')));
        assert_eq!(canvas, before);

        let outcome = stamp_label(&mut canvas, (2, 2), "", &font, WHITE, DARK_BLUE, 2);
        assert_eq!(outcome, StampOutcome::Skipped(SkipReason::EmptyText));
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        let mut canvas = Canvas::solid(6, 6, BLACK).unwrap();
        let font = FontHandle::builtin(8.0);
        let outcome = stamp_label(&mut canvas, (-3, -4), "H", &font, WHITE, DARK_BLUE, 1);
        assert!(outcome.is_stamped());
        assert_eq!((canvas.width(), canvas.height()), (6, 6));
        // 'H' row 3 is solid; it lands on y = -1 and is clipped, row 4 is at y = 0.
        assert_eq!(canvas.pixel(1, 0), WHITE);
    }

    #[test]
    fn test_label_spec_matches_direct_call() {
        let font = FontHandle::builtin(16.0);
        let spec = LabelSpec {
            text: "UWtopia".to_string(),
            font: font.clone(),
            position: (3, 4),
            fill: WHITE,
            outline: DARK_BLUE,
            outline_width: 2,
        };

        let mut via_spec = render_gradient(120, 30, WHITE, DARK_BLUE).unwrap();
        let mut direct = via_spec.clone();
        assert!(spec.stamp(&mut via_spec).is_stamped());
        assert!(stamp_label(&mut direct, (3, 4), "UWtopia", &font, WHITE, DARK_BLUE, 2).is_stamped());
        assert_eq!(via_spec, direct);
    }

    #[test]
    fn test_extreme_anchor_is_clipped() {
        let font = FontHandle::builtin(8.0);
        for anchor in [(i32::MAX, 0), (i32::MIN, 0), (0, i32::MAX), (i32::MIN, i32::MIN)] {
            let mut canvas = black_canvas();
            let outcome = stamp_label(&mut canvas, anchor, "H", &font, WHITE, DARK_BLUE, 1);
            assert!(outcome.is_stamped());
            assert_eq!(canvas, black_canvas(), "anchor {anchor:?} should draw nothing");
        }
    }

    #[test]
    fn test_huge_outline_width_is_clamped() {
        let first = outline_offsets(u32::MAX).next();
        assert_eq!(first, Some((-i32::MAX, -i32::MAX)));
    }

    #[test]
    fn test_stamp_mask_matches_stamp_label() {
        let font = FontHandle::builtin(16.0);
        let mask = font.rasterize("Rx").unwrap();

        let mut via_mask = render_gradient(40, 30, WHITE, DARK_BLUE).unwrap();
        let mut via_text = via_mask.clone();
        stamp_mask(&mut via_mask, (4, 3), &mask, WHITE, DARK_BLUE, 2);
        assert!(stamp_label(&mut via_text, (4, 3), "Rx", &font, WHITE, DARK_BLUE, 2).is_stamped());
        assert_eq!(via_mask, via_text);
    }

    #[test]
    fn test_truetype_zero_width_has_no_outline_color() {
        let font = crate::font::resolve_font(&crate::font::font_candidates(true), 48.0);
        if font.is_builtin() {
            return;
        }
        let red = Color::rgb(255, 0, 0);

        let mut canvas = Canvas::solid(200, 80, BLACK).unwrap();
        assert!(stamp_label(&mut canvas, (10, 5), "Rx", &font, WHITE, red, 0).is_stamped());
        let mut lit = 0;
        for y in 0..80 {
            for x in 0..200 {
                let p = canvas.pixel(x, y);
                assert!(p.r == p.g && p.g == p.b, "outline color at ({x}, {y}): {p}");
                if p == WHITE {
                    lit += 1;
                }
            }
        }
        assert!(lit > 0, "fill should cover some pixels fully");

        let mut haloed = Canvas::solid(200, 80, BLACK).unwrap();
        assert!(stamp_label(&mut haloed, (10, 5), "Rx", &font, WHITE, red, 2).is_stamped());
        let reddish = (0..80)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .any(|(x, y)| haloed.pixel(x, y) == red);
        assert!(reddish, "a 2px halo should show the outline color");
    }
}
