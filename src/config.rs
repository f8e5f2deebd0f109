use bon::Builder;
use std::sync::Arc;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const LIGHT_GRAY: Color = Color::new(0xaa, 0xaa, 0xaa);
    pub const DARK_GRAY: Color = Color::new(0x55, 0x55, 0x55);
    pub const GREEN: Color = Color::new(0x00, 0xff, 0x00);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

// ============================================================================
// BEHAVIOUR ENUMS
// ============================================================================

/// Easing curve used when progress is animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountingMethod {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

/// When the progress-changed callback fires.
///
/// `Singular` emits a single event once a gesture or animation finishes,
/// `Immediate` emits while progress moves, at least `interval` percent apart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DelegationMode {
    Immediate { interval: f64 },
    #[default]
    Singular,
}

// ============================================================================
// ICONS
// ============================================================================

/// RGBA8 image drawn next to the ends of the track
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    width: usize,
    height: usize,
    pixels: Arc<[u8]>,
}

impl Icon {
    /// Returns `None` when `pixels` does not hold `width * height` RGBA texels.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `None` outside the image.
    pub fn texel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some(Color::new(px[0], px[1], px[2]).with_alpha(px[3] as f32 / 255.0))
    }
}

// ============================================================================
// GEOMETRY CONSTANTS
// ============================================================================

/// Angle-domain constants and hand-tuned stroke offsets of the gauge shape.
///
/// `angle_*` are multiples of π in screen space (y grows downward, angles grow
/// clockwise). They are unrelated to the value range of [`GaugeConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConstants {
    pub angle_min: f64,
    pub angle_mid: f64,
    pub angle_max: f64,
    /// Degrees; the track spans `360 + 2 * starting_angle` degrees.
    pub starting_angle: f64,
    /// End point is pulled inwards by `track_width * end_point_inset`.
    pub end_point_inset: f64,
    /// Offsets (radians) applied to the start and end of each meter segment.
    pub meter_gaps: [(f64, f64); 4],
    pub dash_period: f64,
    pub blank_stripe: f64,
    pub fill_stripe: f64,
    pub indicator_width_factor: f64,
    pub indicator_span: f64,
}

impl Default for GeometryConstants {
    fn default() -> Self {
        Self {
            angle_min: -1.20,
            angle_mid: -0.5,
            angle_max: 0.20,
            starting_angle: -45.0,
            end_point_inset: 1.5,
            meter_gaps: [(-0.02, -0.04), (0.05, -0.05), (0.04, -0.04), (0.06, 0.03)],
            dash_period: 12.5,
            blank_stripe: 1.5,
            fill_stripe: 2.5,
            indicator_width_factor: 1.6,
            indicator_span: 0.01,
        }
    }
}

impl GeometryConstants {
    /// Span of the track in degrees as seen by touch mapping.
    pub fn max_angle(&self) -> f64 {
        360.0 + self.starting_angle * 2.0
    }

    /// Boundaries of the meter segments: start, left, top, right, end.
    pub fn meter_anchors(&self) -> [f64; 5] {
        use std::f64::consts::PI;
        [
            PI * self.angle_min,
            -PI,
            PI * self.angle_mid,
            0.0,
            PI * self.angle_max,
        ]
    }
}

// ============================================================================
// GAUGE CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    // Value range
    #[builder(default = 5.0)]
    pub min_value: f64,
    #[builder(default = 25.0)]
    pub max_value: f64,

    // Track
    #[builder(default = 32.0)]
    pub track_width: f64,

    // Texts
    #[builder(default = "°".to_string())]
    pub unit: String,
    #[builder(default = "Warming".to_string())]
    pub placeholder: String,
    #[builder(default = "• Auto".to_string())]
    pub custom_control_button_title: String,
    #[builder(default = true)]
    pub custom_control_button_visible: bool,
    #[builder(default)]
    pub is_custom_control_active: bool,

    // Colors
    #[builder(default = Color::LIGHT_GRAY)]
    pub blank_path_color: Color,
    #[builder(default = Color::GREEN)]
    pub fill_path_color: Color,
    #[builder(default = Color::RED)]
    pub indicator_color: Color,
    #[builder(default = Color::DARK_GRAY)]
    pub unit_color: Color,
    #[builder(default = Color::LIGHT_GRAY)]
    pub unit_indicator_color: Color,
    #[builder(default = Color::LIGHT_GRAY)]
    pub placeholder_color: Color,
    #[builder(default = Color::GREEN)]
    pub custom_control_color: Color,

    // Fonts
    pub font_data: Option<&'static [u8]>,
    #[builder(default = 67.0)]
    pub unit_font_size: f32,
    #[builder(default = 17.0)]
    pub placeholder_font_size: f32,
    #[builder(default = 16.0)]
    pub unit_indicator_font_size: f32,
    #[builder(default = 13.0)]
    pub custom_control_font_size: f32,

    // Icons
    pub left_icon: Option<Icon>,
    pub right_icon: Option<Icon>,

    // Behaviour
    #[builder(default)]
    pub counting_method: CountingMethod,
    #[builder(default)]
    pub delegation_mode: DelegationMode,
    /// Seconds
    #[builder(default = 0.5)]
    pub animation_duration: f64,
    /// Preferred host tick rate while animating
    #[builder(default = 30.0)]
    pub frame_rate: f64,

    #[builder(default)]
    pub geometry: GeometryConstants,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GaugeConfig {
    pub fn value_range(&self) -> f64 {
        self.max_value - self.min_value
    }

    /// Converts a value into a progress percent, `None` outside the range.
    pub fn percent_for_value(&self, value: f64) -> Option<f64> {
        if !(self.min_value..=self.max_value).contains(&value) {
            return None;
        }
        let amplitude = self.value_range();
        if amplitude <= 0.0 {
            return Some(0.0);
        }
        Some((value - self.min_value) / amplitude * 100.0)
    }

    /// Truncated value shown for a progress percent.
    pub fn value_for_percent(&self, percent: f64) -> f64 {
        (self.min_value + self.value_range() * (percent / 100.0)).trunc()
    }

    pub fn unit_indicator_texts(&self) -> [String; 3] {
        let range = self.value_range();
        [
            format!("{}", (range / 7.0).trunc() as i64),
            format!("{}", (range / 2.0).trunc() as i64),
            format!("{}", (self.max_value - range / 7.0).trunc() as i64),
        ]
    }
}
