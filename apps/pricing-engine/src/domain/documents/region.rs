//! Where the order identifier is printed on an invoice PDF.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in PDF user space (origin bottom-left, points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Placement of the order identifier on the first page of an invoice.
///
/// The invoice template prints `Order ID: <id>` at a fixed position; the
/// rewriter paints over a box around it and prints the new label there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierRegion {
    /// Text baseline origin, x.
    pub text_x: f32,
    /// Text baseline origin, y.
    pub text_y: f32,
    /// Redaction box starts this far left of the text.
    pub pad_left: f32,
    /// Redaction box starts this far below the baseline.
    pub pad_below: f32,
    /// Redaction box width.
    pub width: f32,
    /// Redaction box height.
    pub height: f32,
    /// Font size in points.
    pub font_size: f32,
    /// Text printed before the identifier.
    pub label: String,
}

impl Default for IdentifierRegion {
    fn default() -> Self {
        Self {
            text_x: 482.0,
            text_y: 710.0,
            pad_left: 10.0,
            pad_below: 4.0,
            width: 200.0,
            height: 16.0,
            font_size: 10.0,
            label: "Order ID: ".to_string(),
        }
    }
}

impl IdentifierRegion {
    /// Box to paint over.
    #[must_use]
    pub fn redaction_rect(&self) -> Rect {
        Rect {
            x: self.text_x - self.pad_left,
            y: self.text_y - self.pad_below,
            width: self.width,
            height: self.height,
        }
    }

    /// Text to print for `identifier`.
    #[must_use]
    pub fn label_for(&self, identifier: &str) -> String {
        format!("{}{identifier}", self.label)
    }
}
