//! Configuration for a diagram session

use std::fmt;
use std::str::FromStr;

/// Layout direction handed to the layout engine as `rankdir`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Top to bottom (rankdir TB)
    #[default]
    TopToBottom,
    /// Bottom to top (rankdir BT)
    BottomToTop,
    /// Left to right (rankdir LR)
    LeftToRight,
    /// Right to left (rankdir RL)
    RightToLeft,
}

impl Direction {
    /// The DOT rankdir attribute value
    pub fn as_rankdir(self) -> &'static str {
        match self {
            Direction::TopToBottom => "TB",
            Direction::BottomToTop => "BT",
            Direction::LeftToRight => "LR",
            Direction::RightToLeft => "RL",
        }
    }
}

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    Jpg,
}

impl OutputFormat {
    /// File extension, also the layout engine's `-T` format name
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Jpg => "jpg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            other => Err(format!(
                "unsupported output format '{}' (expected png, svg, pdf, or jpg)",
                other
            )),
        }
    }
}

/// Configuration options for a diagram session
#[derive(Debug, Clone)]
pub struct DiagramConfig {
    /// Output file stem; derived from the title when not set
    pub filename: Option<String>,

    /// Layout direction
    pub direction: Direction,

    /// Output image format
    pub format: OutputFormat,

    /// Title font size in points
    pub font_size: u32,

    /// Background color (raw DOT color value)
    pub background: String,

    /// Padding around the drawing, in inches
    pub pad: f64,

    /// Minimum space between nodes of the same rank, in inches
    pub nodesep: f64,

    /// Minimum space between ranks, in inches
    pub ranksep: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            filename: None,
            direction: Direction::TopToBottom,
            format: OutputFormat::Png,
            font_size: 15,
            background: "white".to_string(),
            pad: 0.5,
            nodesep: 0.6,
            ranksep: 0.75,
        }
    }
}

impl DiagramConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output file stem
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the layout direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the title font size
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    /// Set the padding around the drawing
    pub fn with_pad(mut self, pad: f64) -> Self {
        self.pad = pad;
        self
    }

    /// Set the same-rank node spacing
    pub fn with_nodesep(mut self, nodesep: f64) -> Self {
        self.nodesep = nodesep;
        self
    }

    /// Set the rank spacing
    pub fn with_ranksep(mut self, ranksep: f64) -> Self {
        self.ranksep = ranksep;
        self
    }
}
