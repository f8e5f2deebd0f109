use crate::config::{Color, Icon};
use crate::error::GaugeError;
use crate::geometry::{ArcPath, Rect};
use rusttype::{point, Font, Scale};
use std::f64::consts::TAU;
use std::ops::Range;

// ============================================================================
// CORE DATA TYPES
// ============================================================================

/// RGBA8 frame buffer, as handed out by `pixels`.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let height = height.min(frame.len() / (width * 4).max(1));
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        let (r, g, b) = color.as_tuple();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    /// Blends `color` over the pixel, scaled by `coverage` and the color's alpha.
    pub fn blend(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let a = (coverage * color.a).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let (r, g, b) = color.as_tuple();
        let src = [r as f32, g as f32, b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

fn span(lo: f64, hi: f64, limit: usize) -> Range<usize> {
    let start = lo.floor().max(0.0) as usize;
    let end = (hi.ceil().max(0.0) as usize).min(limit);
    start..end
}

/// Coverage of a pixel whose center lies `distance` inside an edge.
fn edge(distance: f64, feather: f64) -> f64 {
    (distance / (2.0 * feather) + 0.5).clamp(0.0, 1.0)
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

/// Strokes `arc` with butt caps and a `[on, off]` dash pattern measured along
/// the arc from its start. `feather` softens every edge, so a wide feather
/// doubles as a blur.
pub fn draw_dashed_arc(
    canvas: &mut Canvas,
    arc: &ArcPath,
    line_width: f64,
    dash: [f64; 2],
    color: Color,
    feather: f64,
) {
    if arc.first_point().is_none() || !(line_width > 0.0) {
        return;
    }
    let feather = feather.max(0.25);
    let length = arc.length();
    let sweep = arc.sweep();
    let period = dash[0] + dash[1];
    let dashed = dash[0] >= 0.0 && dash[1] > 0.0;

    let half = line_width / 2.0;
    let outer = arc.radius + half;
    let inner = (arc.radius - half).max(0.0);
    let reach = outer + feather + 1.0;
    let (cx, cy) = (arc.center.x, arc.center.y);

    for y in span(cy - reach, cy + reach, canvas.height()) {
        for x in span(cx - reach, cx + reach, canvas.width()) {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let dist = dx.hypot(dy);
            let radial = edge(outer - dist, feather).min(edge(dist - inner, feather));
            if radial <= 0.0 {
                continue;
            }

            let rel = (dy.atan2(dx) - arc.start_angle).rem_euclid(TAU);
            let s = if rel <= sweep {
                rel * arc.radius
            } else {
                // Outside the sweep: measure from whichever end is closer.
                let before = (TAU - rel) * arc.radius;
                let after = (rel - sweep) * arc.radius;
                if before < after {
                    -before
                } else {
                    rel * arc.radius
                }
            };
            let ends = edge(s.min(length - s), feather);
            if ends <= 0.0 {
                continue;
            }

            let along = if dashed {
                let phase = s.rem_euclid(period);
                let inside = if phase <= dash[0] {
                    phase.min(dash[0] - phase)
                } else {
                    -(phase - dash[0]).min(period - phase)
                };
                edge(inside, feather)
            } else {
                1.0
            };

            let coverage = (radial * ends * along) as f32;
            if coverage > 0.003 {
                canvas.blend(x, y, color, coverage);
            }
        }
    }
}

/// Draws a single line of text with the top-left of its line box at the
/// rect origin.
pub fn draw_text(
    canvas: &mut Canvas,
    rect: &Rect,
    text: &str,
    font: &Font<'static>,
    size: f32,
    color: Color,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let origin = point(rect.x as f32, rect.y as f32 + v_metrics.ascent);
    for glyph in font.layout(text, scale, origin) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px >= 0 && py >= 0 {
                    canvas.blend(px as usize, py as usize, color, v);
                }
            });
        }
    }
}

pub fn fill_rounded_rect(canvas: &mut Canvas, rect: &Rect, radius: f64, color: Color) {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return;
    }
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let radius = radius.clamp(0.0, half_w.min(half_h));
    let center = rect.center();

    for y in span(rect.y - 1.0, rect.max_y() + 1.0, canvas.height()) {
        for x in span(rect.x - 1.0, rect.max_x() + 1.0, canvas.width()) {
            let qx = (x as f64 + 0.5 - center.x).abs() - (half_w - radius);
            let qy = (y as f64 + 0.5 - center.y).abs() - (half_h - radius);
            let outside = qx.max(0.0).hypot(qy.max(0.0)) + qx.max(qy).min(0.0) - radius;
            let coverage = edge(-outside, 0.5) as f32;
            if coverage > 0.0 {
                canvas.blend(x, y, color, coverage);
            }
        }
    }
}

/// Scales the icon to fit inside `rect`, keeping its aspect ratio.
pub fn draw_icon(canvas: &mut Canvas, rect: &Rect, icon: &Icon) {
    let scale = (rect.width / icon.width() as f64).min(rect.height / icon.height() as f64);
    if !(scale > 0.0) {
        return;
    }
    let w = icon.width() as f64 * scale;
    let h = icon.height() as f64 * scale;
    let ox = rect.x + (rect.width - w) / 2.0;
    let oy = rect.y + (rect.height - h) / 2.0;

    for y in span(oy, oy + h, canvas.height()) {
        let v = ((y as f64 + 0.5 - oy) / scale).floor();
        if v < 0.0 || v >= icon.height() as f64 {
            continue;
        }
        for x in span(ox, ox + w, canvas.width()) {
            let u = ((x as f64 + 0.5 - ox) / scale).floor();
            if u < 0.0 || u >= icon.width() as f64 {
                continue;
            }
            if let Some(texel) = icon.texel(u as usize, v as usize) {
                canvas.blend(x, y, texel, 1.0);
            }
        }
    }
}

// ============================================================================
// FONTS
// ============================================================================

pub fn parse_font(data: &'static [u8]) -> Result<Font<'static>, GaugeError> {
    Font::try_from_bytes(data).ok_or(GaugeError::InvalidFont)
}

/// Parses configured font data. Text is skipped when this returns `None`.
pub fn load_font(data: Option<&'static [u8]>) -> Option<Font<'static>> {
    match parse_font(data?) {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("{err}, text will not be drawn");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use std::f64::consts::PI;

    fn buffer(width: usize, height: usize) -> Vec<u8> {
        vec![0; width * height * 4]
    }

    fn brightness(canvas: &Canvas) -> u64 {
        let mut total = 0;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                total += canvas.pixel(x, y).map(|p| p[0] as u64).unwrap_or(0);
            }
        }
        total
    }

    fn top_half(radius: f64) -> ArcPath {
        ArcPath {
            center: Point::new(50.0, 50.0),
            radius,
            start_angle: -PI,
            end_angle: 0.0,
        }
    }

    #[test]
    fn clear_fills_opaque() {
        let mut frame = buffer(2, 2);
        let mut canvas = Canvas::new(&mut frame, 2, 2);
        canvas.clear(Color::new(1, 2, 3));
        assert_eq!(canvas.pixel(1, 1), Some([1, 2, 3, 255]));
        assert_eq!(canvas.pixel(2, 0), None);
    }

    #[test]
    fn blend_mixes_with_background() {
        let mut frame = buffer(1, 1);
        let mut canvas = Canvas::new(&mut frame, 1, 1);
        canvas.clear(Color::BLACK);
        canvas.blend(0, 0, Color::WHITE.with_alpha(0.5), 1.0);
        assert_eq!(canvas.pixel(0, 0), Some([128, 128, 128, 255]));
        canvas.blend(5, 5, Color::WHITE, 1.0);
    }

    #[test]
    fn solid_arc_covers_only_its_sweep() {
        let mut frame = buffer(100, 100);
        let mut canvas = Canvas::new(&mut frame, 100, 100);
        canvas.clear(Color::BLACK);
        draw_dashed_arc(&mut canvas, &top_half(30.0), 6.0, [100.0, 0.0], Color::WHITE, 0.5);
        assert_eq!(canvas.pixel(50, 20), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(50, 80), Some([0, 0, 0, 255]));
        assert_eq!(canvas.pixel(50, 50), Some([0, 0, 0, 255]));
    }

    #[test]
    fn dashes_leave_gaps() {
        let mut solid_frame = buffer(100, 100);
        let mut solid = Canvas::new(&mut solid_frame, 100, 100);
        draw_dashed_arc(&mut solid, &top_half(30.0), 6.0, [1.0, 0.0], Color::WHITE, 0.5);

        let mut dashed_frame = buffer(100, 100);
        let mut dashed = Canvas::new(&mut dashed_frame, 100, 100);
        draw_dashed_arc(&mut dashed, &top_half(30.0), 6.0, [2.0, 10.0], Color::WHITE, 0.5);

        assert!(brightness(&dashed) * 2 < brightness(&solid));
        assert!(brightness(&dashed) > 0);
    }

    #[test]
    fn degenerate_arc_draws_nothing() {
        let mut frame = buffer(10, 10);
        let mut canvas = Canvas::new(&mut frame, 10, 10);
        let arc = ArcPath {
            radius: f64::NAN,
            ..top_half(3.0)
        };
        draw_dashed_arc(&mut canvas, &arc, 2.0, [1.0, 1.0], Color::WHITE, 0.5);
        assert_eq!(brightness(&canvas), 0);
    }

    #[test]
    fn rounded_rect_skips_corners() {
        let mut frame = buffer(40, 40);
        let mut canvas = Canvas::new(&mut frame, 40, 40);
        fill_rounded_rect(&mut canvas, &Rect::new(0.0, 0.0, 40.0, 20.0), 10.0, Color::WHITE);
        assert_eq!(canvas.pixel(20, 10), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(20, 30), Some([0, 0, 0, 0]));
    }

    #[test]
    fn icon_is_scaled_to_fit() {
        let icon = Icon::from_rgba(1, 1, vec![200, 0, 0, 255]).unwrap();
        let mut frame = buffer(8, 8);
        let mut canvas = Canvas::new(&mut frame, 8, 8);
        draw_icon(&mut canvas, &Rect::new(2.0, 2.0, 4.0, 4.0), &icon);
        assert_eq!(canvas.pixel(3, 3), Some([200, 0, 0, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(6, 6), Some([0, 0, 0, 0]));
    }

    #[test]
    fn garbage_font_data_is_rejected() {
        static DATA: [u8; 4] = [0, 1, 2, 3];
        assert!(matches!(parse_font(&DATA), Err(GaugeError::InvalidFont)));
        assert!(load_font(Some(&DATA)).is_none());
        assert!(load_font(None).is_none());
    }
}
