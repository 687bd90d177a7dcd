//! Render-free style vocabulary for grid rows and cells.
//!
//! Trellis does not draw anything, so "style" here means the geometry a
//! host needs to place wrappers: widths, offsets, paddings and margins.
//! [`generate_styles`] turns one [`GridLayout`] into a [`RowTemplate`]
//! shared by every row of a render pass; the original's flexbox style
//! objects become explicit per-cell offsets.

use derive_setters::Setters;
use trellis_foundation::Dp;

use crate::dimension::{GridLayout, sanitize_spacing};

/// Insets applied to the four edges of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Setters)]
pub struct EdgeInsets {
    /// Leading-edge inset.
    pub start: Dp,
    /// Top inset.
    pub top: Dp,
    /// Trailing-edge inset.
    pub end: Dp,
    /// Bottom inset.
    pub bottom: Dp,
}

impl EdgeInsets {
    /// The same inset on all four edges.
    pub fn all(value: Dp) -> Self {
        Self {
            start: value,
            top: value,
            end: value,
            bottom: value,
        }
    }

    /// Horizontal and vertical insets.
    pub fn symmetric(horizontal: Dp, vertical: Dp) -> Self {
        Self {
            start: horizontal,
            top: vertical,
            end: horizontal,
            bottom: vertical,
        }
    }
}

/// Caller-supplied wrapper style.
///
/// Used for `item_container_style` (merged into every cell wrapper) and
/// for the pass-through style of the outer list. A `width` here
/// overrides the computed cell width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Setters)]
pub struct Style {
    /// Explicit width override.
    pub width: Option<Dp>,
    /// Inner padding.
    pub padding: EdgeInsets,
    /// Outer margin.
    pub margin: EdgeInsets,
}

/// Resolved wrapper style for one row of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    /// Extra leading space above the row. Non-zero only for the first
    /// row of a section, separating it from the externally rendered
    /// header.
    pub margin_top: Dp,
    /// Gap below the row.
    pub padding_bottom: Dp,
}

/// Resolved wrapper style for one cell of a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    /// Leading-edge offset of the cell within its row.
    pub offset: Dp,
    /// Final cell width.
    pub width: Dp,
    /// Padding carried over from the caller's container style.
    pub padding: EdgeInsets,
    /// Margin carried over from the caller's container style.
    pub margin: EdgeInsets,
}

/// Precomputed strip geometry shared by every row of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTemplate {
    /// Computed cell width.
    pub cell_width: Dp,
    /// Leading-edge offset of every cell slot.
    pub offsets: Vec<Dp>,
    /// Leading margin applied to the first row of each section.
    pub first_row_margin: Dp,
    /// Gap below every row.
    pub row_gap: Dp,
}

impl RowTemplate {
    /// Style for a row wrapper.
    pub fn row_style(&self, is_first: bool) -> RowStyle {
        RowStyle {
            margin_top: if is_first {
                self.first_row_margin
            } else {
                Dp::ZERO
            },
            padding_bottom: self.row_gap,
        }
    }

    /// Style for the cell in slot `slot`, merged with the caller's
    /// container style. An out-of-range slot falls back to offset zero.
    pub fn cell_style(&self, slot: usize, user: Option<&Style>) -> CellStyle {
        let offset = self.offsets.get(slot).copied().unwrap_or(Dp::ZERO);
        CellStyle {
            offset,
            width: user
                .and_then(|style| style.width)
                .unwrap_or(self.cell_width),
            padding: user.map(|style| style.padding).unwrap_or_default(),
            margin: user.map(|style| style.margin).unwrap_or_default(),
        }
    }
}

/// Builds the row template for one computed layout.
///
/// The in-row gap comes from `layout` (already redistributed in fixed
/// mode); the vertical gap and the first-row margin always use the
/// configured spacing.
pub fn generate_styles(layout: &GridLayout, configured_spacing: Dp) -> RowTemplate {
    let configured_spacing = sanitize_spacing(configured_spacing);
    RowTemplate {
        cell_width: layout.item_width,
        offsets: layout.cell_offsets(),
        first_row_margin: configured_spacing,
        row_gap: configured_spacing,
    }
}
