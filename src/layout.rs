//! Placement of the labels, icons and custom-control button around the track.

use crate::config::GaugeConfig;
use crate::geometry::{GeometryCache, Point, Rect};
use rusttype::{point, Font, Scale};

pub const ICON_SIZE: f64 = 24.0;
pub const LABEL_INSET_FACTOR: f64 = 2.4;
pub const PLACEHOLDER_SPACING: f64 = 4.0;
pub const ICON_OFFSET_DIVISOR: f64 = 2.5;
pub const ICON_DROP: f64 = 4.0;
pub const CONTROL_HEIGHT: f64 = 28.0;
pub const CONTROL_MARGIN: f64 = 48.0;
pub const CONTROL_CORNER_RADIUS: f64 = 16.0;

/// Size of a single line of text.
///
/// Without a font the size is estimated from the point size.
pub fn measure_text(font: Option<&Font<'static>>, text: &str, size: f32) -> (f64, f64) {
    let Some(font) = font else {
        let width = text.chars().count() as f64 * size as f64 * 0.6;
        return (width, size as f64 * 1.2);
    };
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let width = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    let height = v_metrics.ascent - v_metrics.descent + v_metrics.line_gap;
    (width.ceil() as f64, height.ceil() as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub rect: Rect,
    pub font_size: f32,
}

impl Label {
    fn sized(font: Option<&Font<'static>>, text: String, font_size: f32) -> Self {
        let (width, height) = measure_text(font, &text, font_size);
        Self {
            text,
            rect: Rect::new(0.0, 0.0, width, height),
            font_size,
        }
    }

    fn at(mut self, x: f64, y: f64) -> Self {
        self.rect.x = x;
        self.rect.y = y;
        self
    }
}

/// Frames in gauge-local coordinates. Icons and the custom control hang off
/// the track end point, so they are absent until geometry is available.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub unit_label: Label,
    pub placeholder_label: Label,
    pub unit_indicator_labels: [Label; 3],
    pub left_icon: Option<Rect>,
    pub right_icon: Option<Rect>,
    pub custom_control: Option<Rect>,
    pub custom_control_title: Option<Label>,
}

impl Layout {
    pub fn compute(
        config: &GaugeConfig,
        bounds: &Rect,
        progress: f64,
        geometry: Option<&GeometryCache>,
        font: Option<&Font<'static>>,
    ) -> Self {
        let width = bounds.width;
        let height = bounds.height;
        let inset = config.track_width * LABEL_INSET_FACTOR;

        let unit_text = format!(
            "{}{}",
            config.value_for_percent(progress) as i64,
            config.unit
        );
        let unit = Label::sized(font, unit_text, config.unit_font_size);
        let unit = {
            let (w, h) = (unit.rect.width, unit.rect.height);
            unit.at((width - w) / 2.0, (height - h) / 2.0)
        };

        let placeholder = Label::sized(font, config.placeholder.clone(), config.placeholder_font_size);
        let placeholder = {
            let w = placeholder.rect.width;
            placeholder.at(
                (width - w) / 2.0,
                unit.rect.max_y() + PLACEHOLDER_SPACING,
            )
        };

        let [left_text, top_text, right_text] = config.unit_indicator_texts();
        let size = config.unit_indicator_font_size;
        let left = Label::sized(font, left_text, size);
        let left = {
            let h = left.rect.height;
            left.at(inset, (height - h) / 2.0)
        };
        let top = Label::sized(font, top_text, size);
        let top = {
            let w = top.rect.width;
            top.at((width - w) / 2.0, inset)
        };
        let right = Label::sized(font, right_text, size);
        let right = {
            let w = right.rect.width;
            let y = left.rect.y;
            right.at(width - inset - w, y)
        };

        let icons = geometry.map(|cache| {
            let end = cache.end_point();
            Self::icon_frames(width, config.track_width, end)
        });
        let custom_control = icons.map(|(left_icon, _)| Rect {
            x: left_icon.x + CONTROL_MARGIN,
            y: left_icon.y,
            width: width - left_icon.x * 2.0 - CONTROL_MARGIN * 2.0,
            height: CONTROL_HEIGHT,
        });

        let custom_control_title = custom_control.map(|rect| {
            let title = Label::sized(
                font,
                config.custom_control_button_title.clone(),
                config.custom_control_font_size,
            );
            let (w, h) = (title.rect.width, title.rect.height);
            title.at(rect.mid_x() - w / 2.0, rect.mid_y() - h / 2.0)
        });

        Self {
            unit_label: unit,
            placeholder_label: placeholder,
            unit_indicator_labels: [left, top, right],
            left_icon: icons.map(|(left, _)| left),
            right_icon: icons.map(|(_, right)| right),
            custom_control,
            custom_control_title,
        }
    }

    fn icon_frames(width: f64, track_width: f64, end: Point) -> (Rect, Rect) {
        let offset = track_width / ICON_OFFSET_DIVISOR;
        let y = end.y + ICON_DROP;
        let left = Rect::new(width - end.x - ICON_SIZE - offset, y, ICON_SIZE, ICON_SIZE);
        let right = Rect::new(end.x + offset, y, ICON_SIZE, ICON_SIZE);
        (left, right)
    }
}
