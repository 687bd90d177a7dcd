//! Responsive sectioned grid layout for an external list-rendering
//! component.
//!
//! `trellis-grid` turns a sectioned list of items into a multi-column
//! grid: it computes how many columns fit the measured container width,
//! chunks each section's items into rows of that many cells, and hands
//! the transformed sections to whatever section-list component the host
//! already uses. Scrolling, virtualization, recycling and section
//! headers stay with that component; this crate only does the layout
//! arithmetic and the row transform.
//!
//! # Example
//!
//! ```
//! use trellis_foundation::Dp;
//! use trellis_grid::section_grid::{CellContext, Section, SectionGrid, SectionGridArgs};
//!
//! fn render(cell: CellContext<'_, u32>) -> String {
//!     format!("tile {}", cell.item)
//! }
//!
//! let args = SectionGridArgs::default()
//!     .sections(vec![
//!         Section::new("recent", vec![1, 2, 3, 4, 5]),
//!         Section::new("older", vec![6, 7, 8]),
//!     ])
//!     .item_dimension(Dp(100.0))
//!     .static_dimension(Some(Dp(330.0)))
//!     .render_item(render);
//!
//! let grid = SectionGrid::new(args).expect("valid grid");
//! assert_eq!(grid.layout().columns, 3);
//!
//! let sections = grid.sections();
//! assert_eq!(sections[0].row_count(), 2);
//! assert_eq!(sections[1].row_count(), 1);
//! ```

#![deny(missing_docs, clippy::unwrap_used)]

pub mod chunk;
pub mod dimension;
pub mod section_grid;
pub mod style;

pub use chunk::{chunk, chunk_ranges, row_count};
pub use dimension::{GridLayout, calculate_dimensions};
pub use section_grid::{
    CellContext, CellVec, DEFAULT_ITEM_DIMENSION, DEFAULT_SPACING, GridCell, GridConfig,
    GridSection, GridSpec, KeyExtractorSlot, LayoutEvent, RenderItemSlot, RowGroup, RowStrip,
    Section, SectionGrid, SectionGridArgs, SectionGridError, SectionListHost,
};
pub use style::{CellStyle, EdgeInsets, RowStyle, RowTemplate, Style, generate_styles};
