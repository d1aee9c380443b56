//! Caption Style Resolution
//!
//! Maps the loosely-typed style block of a project file onto typed render
//! settings. Unrecognized names never fail a render; they fall back to
//! medium size, lower-third position, and no background decoration.

use crate::project::CaptionStyle;

/// Output frame width in pixels (vertical video).
pub const FRAME_WIDTH: u32 = 1080;
/// Output frame height in pixels (vertical video).
pub const FRAME_HEIGHT: u32 = 1920;

const BOTTOM_PADDING: u32 = 20;
const LOWER_THIRD_LIFT: u32 = 40;

/// Caption font size presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    fn from_name(name: &str) -> Self {
        match name {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            _ => Self::default(),
        }
    }

    /// Pixel size for drawtext.
    pub fn px(self) -> u32 {
        match self {
            Self::Small => 28,
            Self::Medium => 36,
            Self::Large => 48,
        }
    }
}

/// Vertical caption placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CaptionPosition {
    Bottom,
    #[default]
    LowerThird,
    Center,
}

impl CaptionPosition {
    fn from_name(name: &str) -> Self {
        match name {
            "bottom" => Self::Bottom,
            "lower_third" => Self::LowerThird,
            "center" => Self::Center,
            _ => Self::default(),
        }
    }

    /// Base drawtext `y` expression for the first caption line.
    ///
    /// Bottom and lower-third anchor a text box (font size plus padding)
    /// above the frame's bottom edge; center lets the engine measure the
    /// rendered text height.
    pub fn y_expr(self, font_size_px: u32) -> String {
        let box_height = font_size_px + 20;
        match self {
            Self::Bottom => format!("{}", FRAME_HEIGHT - BOTTOM_PADDING - box_height),
            Self::LowerThird => {
                format!(
                    "{}",
                    FRAME_HEIGHT - BOTTOM_PADDING - box_height - LOWER_THIRD_LIFT
                )
            }
            Self::Center => format!("({}-text_h)/2", FRAME_HEIGHT),
        }
    }
}

/// Background decoration behind caption text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BackgroundStyle {
    DarkBox,
    Outline,
    #[default]
    None,
}

impl BackgroundStyle {
    fn from_name(name: &str) -> Self {
        match name {
            "dark_box" => Self::DarkBox,
            "outline" => Self::Outline,
            "none" => Self::None,
            _ => Self::default(),
        }
    }
}

/// Fully resolved caption style for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    pub font_size: FontSize,
    pub position: CaptionPosition,
    pub background: BackgroundStyle,
    pub default_color: String,
}

impl ResolvedStyle {
    pub fn from_project(style: &CaptionStyle) -> Self {
        Self {
            font_size: FontSize::from_name(&style.font_size),
            position: CaptionPosition::from_name(&style.position),
            background: BackgroundStyle::from_name(&style.background),
            default_color: style.default_color.clone(),
        }
    }

    /// Estimated average glyph width for the word-wrap budget.
    pub fn glyph_width(&self) -> f64 {
        f64::from(self.font_size.px()) * 0.5
    }
}
