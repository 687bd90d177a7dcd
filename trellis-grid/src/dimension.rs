//! Grid dimension arithmetic.
//!
//! ## Usage
//!
//! Given an available container width, compute how many columns fit, how
//! wide each cell is and which gap separates them. The calculation is a
//! pure function of its inputs; the shell re-runs it whenever the
//! measured width or the configuration changes.

use trellis_foundation::Dp;

/// Layout derived from one available container width.
///
/// Invariant: `columns >= 1`, and
/// `columns * item_width + (columns + 1) * spacing` reproduces the
/// available width up to float rounding. Gaps sit before, between and
/// after the cells of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Number of columns that fit the available width.
    pub columns: usize,
    /// Width of each cell.
    pub item_width: Dp,
    /// Gap applied before, between and after cells.
    pub spacing: Dp,
}

impl GridLayout {
    /// Leading-edge offset of every cell within a row.
    ///
    /// Cell `i` starts at `(i + 1) * spacing + i * item_width`, so the
    /// first gap sits before the first cell.
    pub fn cell_offsets(&self) -> Vec<Dp> {
        (0..self.columns)
            .map(|slot| {
                let slot = slot as f32;
                self.spacing * (slot + 1.0) + self.item_width * slot
            })
            .collect()
    }

    /// Total width spanned by the cells and all surrounding gaps.
    pub fn content_width(&self) -> Dp {
        let columns = self.columns as f32;
        self.item_width * columns + self.spacing * (columns + 1.0)
    }
}

/// Clamps a gap to a usable value: negative or non-finite gaps become
/// zero.
pub(crate) fn sanitize_spacing(spacing: Dp) -> Dp {
    if !spacing.is_finite() || spacing < Dp::ZERO {
        Dp::ZERO
    } else {
        spacing
    }
}

/// Clamps a target dimension to a usable value: non-positive or
/// non-finite dimensions become one unit.
fn ensure_positive(dimension: Dp) -> Dp {
    if !dimension.is_finite() || dimension <= Dp::ZERO {
        Dp(1.0)
    } else {
        dimension
    }
}

/// Computes the grid layout for one available width.
///
/// `static_dimension`, when present, overrides `total_dimension`. The
/// column count is how many `item_dimension + spacing` runs fit the
/// available width, never less than one. Leftover width is then
/// redistributed: into the gaps when `fixed` is set (item size is
/// authoritative), into the cells otherwise (gap is authoritative).
///
/// Degenerate inputs never fail: negative spacing and non-finite values
/// are clamped, and a zero or negative width degrades to a single column
/// with non-negative dimensions.
///
/// # Examples
///
/// ```
/// use trellis_foundation::Dp;
/// use trellis_grid::dimension::calculate_dimensions;
///
/// let layout = calculate_dimensions(Dp(100.0), None, Dp(330.0), Dp(10.0), false);
/// assert_eq!(layout.columns, 3);
/// assert_eq!(layout.spacing, Dp(10.0));
/// // 3 cells and 4 gaps fill the row exactly.
/// assert!((layout.content_width().raw() - 330.0).abs() < 1e-3);
/// ```
pub fn calculate_dimensions(
    item_dimension: Dp,
    static_dimension: Option<Dp>,
    total_dimension: Dp,
    spacing: Dp,
    fixed: bool,
) -> GridLayout {
    let spacing = sanitize_spacing(spacing);
    let item_dimension = ensure_positive(item_dimension);
    let total = static_dimension.unwrap_or(total_dimension);
    let total = if total.is_finite() {
        total.positive()
    } else {
        Dp::ZERO
    };

    let per_item = item_dimension + spacing;
    let columns = ((total.raw() / per_item.raw()).floor() as usize).max(1);
    let gaps = columns as f32 + 1.0;

    if fixed {
        let leftover = total - item_dimension * columns as f32;
        GridLayout {
            columns,
            item_width: item_dimension,
            spacing: (leftover / gaps).positive(),
        }
    } else {
        let usable = total - spacing * gaps;
        GridLayout {
            columns,
            item_width: (usable / columns as f32).positive(),
            spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Dp, b: f32) -> bool {
        (a.raw() - b).abs() < 1e-3
    }

    #[test]
    fn test_columns_fill_available_width() {
        let layout = calculate_dimensions(Dp(100.0), None, Dp(330.0), Dp(10.0), false);
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.spacing, Dp(10.0));
        // 330 minus four gaps of 10, split across three cells.
        assert!(close(layout.item_width, (330.0 - 40.0) / 3.0));
        assert!(close(layout.content_width(), 330.0));
    }

    #[test]
    fn test_fixed_mode_pins_item_width() {
        let layout = calculate_dimensions(Dp(100.0), None, Dp(330.0), Dp(10.0), true);
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.item_width, Dp(100.0));
        assert!(close(layout.spacing, 7.5));
        assert!(close(layout.content_width(), 330.0));
    }

    #[test]
    fn test_default_mode_preserves_spacing() {
        for total in [120.0, 250.0, 1024.0] {
            let layout = calculate_dimensions(Dp(80.0), None, Dp(total), Dp(12.0), false);
            assert_eq!(layout.spacing, Dp(12.0));
            assert!(layout.columns >= 1);
        }
    }

    #[test]
    fn test_static_dimension_overrides_total() {
        let layout = calculate_dimensions(Dp(100.0), Some(Dp(330.0)), Dp(1000.0), Dp(10.0), false);
        assert_eq!(layout.columns, 3);
    }

    #[test]
    fn test_narrow_container_degrades_to_single_column() {
        let layout = calculate_dimensions(Dp(200.0), None, Dp(90.0), Dp(10.0), false);
        assert_eq!(layout.columns, 1);
        assert!(layout.item_width >= Dp::ZERO);
    }

    #[test]
    fn test_degenerate_width_keeps_dimensions_non_negative() {
        for total in [0.0, -50.0, f32::NAN] {
            let layout = calculate_dimensions(Dp(100.0), None, Dp(total), Dp(10.0), false);
            assert_eq!(layout.columns, 1);
            assert!(layout.item_width >= Dp::ZERO);
            assert!(layout.spacing >= Dp::ZERO);

            let fixed = calculate_dimensions(Dp(100.0), None, Dp(total), Dp(10.0), true);
            assert_eq!(fixed.columns, 1);
            assert_eq!(fixed.item_width, Dp(100.0));
            assert_eq!(fixed.spacing, Dp::ZERO);
        }
    }

    #[test]
    fn test_invalid_spacing_and_item_are_clamped() {
        let layout = calculate_dimensions(Dp(0.0), None, Dp(100.0), Dp(-4.0), false);
        assert!(layout.columns >= 1);
        assert_eq!(layout.spacing, Dp::ZERO);

        let layout = calculate_dimensions(Dp(f32::NAN), None, Dp(100.0), Dp(f32::INFINITY), false);
        assert!(layout.columns >= 1);
        assert_eq!(layout.spacing, Dp::ZERO);
    }

    #[test]
    fn test_cell_offsets_include_leading_gap() {
        let layout = calculate_dimensions(Dp(100.0), None, Dp(330.0), Dp(10.0), true);
        let offsets = layout.cell_offsets();
        assert_eq!(offsets.len(), 3);
        assert!(close(offsets[0], 7.5));
        assert!(close(offsets[1], 7.5 * 2.0 + 100.0));
        assert!(close(offsets[2], 7.5 * 3.0 + 200.0));
    }
}
