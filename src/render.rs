// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::config::{Color, GaugeConfig, Icon};
use crate::geometry::{angle_for_progress, track_arc, ArcPath, GeometryCache, Point, Rect};
use crate::layout::{Label, Layout, CONTROL_CORNER_RADIUS};
use crate::raster::{self, Canvas};
use rusttype::Font;
use std::f64::consts::PI;

pub const METER_LINE_WIDTH: f64 = 4.0;
pub const METER_DASH: [f64; 2] = [1.0, 8.0];
pub const METER_INDICATOR_WIDTH: f64 = 12.0;
pub const INDICATOR_SHADOW: Shadow = Shadow {
    dx: 0.0,
    dy: 6.0,
    blur: 10.0,
    color: Color::BLACK.with_alpha(1.0 / 3.0),
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub dx: f64,
    pub dy: f64,
    pub blur: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    DashedArc {
        arc: ArcPath,
        line_width: f64,
        dash: [f64; 2],
        color: Color,
        shadow: Option<Shadow>,
    },
    Text {
        rect: Rect,
        text: String,
        font_size: f32,
        color: Color,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        color: Color,
    },
    Icon {
        rect: Rect,
        icon: Icon,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas, font: Option<&Font<'static>>) {
        for command in &self.commands {
            match command {
                DrawCommand::DashedArc {
                    arc,
                    line_width,
                    dash,
                    color,
                    shadow,
                } => {
                    if let Some(shadow) = shadow {
                        let offset = ArcPath {
                            center: Point::new(
                                arc.center.x + shadow.dx,
                                arc.center.y + shadow.dy,
                            ),
                            ..*arc
                        };
                        raster::draw_dashed_arc(
                            canvas,
                            &offset,
                            *line_width,
                            *dash,
                            shadow.color,
                            shadow.blur / 2.0,
                        );
                    }
                    raster::draw_dashed_arc(canvas, arc, *line_width, *dash, *color, 0.5);
                }
                DrawCommand::Text {
                    rect,
                    text,
                    font_size,
                    color,
                } => match font {
                    Some(font) => raster::draw_text(canvas, rect, text, font, *font_size, *color),
                    None => log::trace!("no font configured, skipping text {text:?}"),
                },
                DrawCommand::RoundedRect {
                    rect,
                    radius,
                    color,
                } => raster::fill_rounded_rect(canvas, rect, *radius, *color),
                DrawCommand::Icon { rect, icon } => raster::draw_icon(canvas, rect, icon),
            }
        }
    }
}

// ============================================================================
// GAUGE SCENE
// ============================================================================

/// Everything a draw pass reads from the gauge.
#[derive(Debug, Clone, Copy)]
pub struct GaugeFrame<'a> {
    pub config: &'a GaugeConfig,
    pub bounds: Rect,
    pub progress: f64,
    pub geometry: Option<&'a GeometryCache>,
    pub layout: &'a Layout,
}

impl Scene {
    pub fn for_gauge(frame: GaugeFrame<'_>) -> Self {
        let mut scene = Scene::new();
        let GaugeFrame {
            config,
            bounds,
            progress,
            geometry,
            layout,
        } = frame;
        let constants = &config.geometry;
        let track_width = config.track_width;
        let period = constants.dash_period;

        // Blank track
        scene.add_command(DrawCommand::DashedArc {
            arc: track_arc(
                &bounds,
                track_width,
                track_width,
                PI * constants.angle_min,
                PI * constants.angle_max,
            ),
            line_width: track_width,
            dash: [constants.blank_stripe, period - constants.blank_stripe],
            color: config.blank_path_color,
            shadow: None,
        });

        // Meter segments
        let center = bounds.center();
        let anchors = constants.meter_anchors();
        let meter_radius = bounds.width / 2.0 - track_width * 2.0 + 2.0;
        for (i, (start_gap, end_gap)) in constants.meter_gaps.iter().enumerate() {
            scene.add_command(DrawCommand::DashedArc {
                arc: ArcPath {
                    center,
                    radius: meter_radius,
                    start_angle: anchors[i] + start_gap,
                    end_angle: anchors[i + 1] + end_gap,
                },
                line_width: METER_LINE_WIDTH,
                dash: METER_DASH,
                color: config.blank_path_color,
                shadow: None,
            });
        }

        // Meter indicators at the left, top and right
        let indicator_radius = bounds.width / 2.0 - track_width * 2.0 - 1.5;
        let indicator_gap = geometry
            .map(|cache| cache.total_arc_distance() / 16.0)
            .unwrap_or(METER_DASH[1]);
        for angle in &anchors[1..4] {
            scene.add_command(DrawCommand::DashedArc {
                arc: ArcPath {
                    center,
                    radius: indicator_radius,
                    start_angle: angle - constants.indicator_span,
                    end_angle: *angle,
                },
                line_width: METER_INDICATOR_WIDTH,
                dash: [1.0, indicator_gap],
                color: config.blank_path_color,
                shadow: None,
            });
        }

        // Filled track and moving indicator
        let current = angle_for_progress(constants, progress);
        let fill_dash = [constants.fill_stripe, period - constants.fill_stripe];
        if progress > 0.0 {
            scene.add_command(DrawCommand::DashedArc {
                arc: track_arc(
                    &bounds,
                    track_width,
                    track_width,
                    PI * constants.angle_min,
                    current,
                ),
                line_width: track_width,
                dash: fill_dash,
                color: config.fill_path_color,
                shadow: None,
            });
        }
        let indicator_width = track_width * constants.indicator_width_factor;
        scene.add_command(DrawCommand::DashedArc {
            arc: track_arc(
                &bounds,
                track_width,
                indicator_width,
                current - constants.indicator_span,
                current,
            ),
            line_width: indicator_width,
            dash: fill_dash,
            color: config.indicator_color,
            shadow: Some(INDICATOR_SHADOW),
        });

        scene.add_labels(config, layout);
        scene.add_icons(config, layout);
        scene.add_custom_control(config, layout);
        scene
    }

    fn add_label(&mut self, label: &Label, color: Color) {
        self.add_command(DrawCommand::Text {
            rect: label.rect,
            text: label.text.clone(),
            font_size: label.font_size,
            color,
        });
    }

    fn add_labels(&mut self, config: &GaugeConfig, layout: &Layout) {
        self.add_label(&layout.unit_label, config.unit_color);
        self.add_label(&layout.placeholder_label, config.placeholder_color);
        for label in &layout.unit_indicator_labels {
            self.add_label(label, config.unit_indicator_color);
        }
    }

    fn add_icons(&mut self, config: &GaugeConfig, layout: &Layout) {
        let slots = [
            (layout.left_icon, &config.left_icon),
            (layout.right_icon, &config.right_icon),
        ];
        for (rect, icon) in slots {
            if let (Some(rect), Some(icon)) = (rect, icon) {
                self.add_command(DrawCommand::Icon {
                    rect,
                    icon: icon.clone(),
                });
            }
        }
    }

    fn add_custom_control(&mut self, config: &GaugeConfig, layout: &Layout) {
        if !config.custom_control_button_visible {
            return;
        }
        let Some(rect) = layout.custom_control else {
            return;
        };
        let (background, title_color) = if config.is_custom_control_active {
            (config.custom_control_color.with_alpha(0.6), Color::WHITE)
        } else {
            (config.custom_control_color.with_alpha(0.1), config.custom_control_color)
        };
        self.add_command(DrawCommand::RoundedRect {
            rect,
            radius: CONTROL_CORNER_RADIUS,
            color: background,
        });

        if let Some(title) = &layout.custom_control_title {
            self.add_label(title, title_color);
        }
    }
}
