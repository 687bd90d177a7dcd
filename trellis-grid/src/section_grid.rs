//! Sectioned responsive grid built atop an external section-list
//! component.
//!
//! ## Usage
//!
//! Build a [`SectionGrid`] from [`SectionGridArgs`], feed it container
//! measurements through [`SectionGrid::handle_layout`], and hand the
//! transformed sections to the list component that owns scrolling,
//! virtualization and header rendering, either via
//! [`SectionGrid::spec`] or through the [`SectionListHost`] seam.
//!
//! Each transformed section's data is the chunked row sequence; the
//! per-row renderer lays one row out as a horizontal strip of cells and
//! calls the per-item renderer once per cell.
//!
//! ## Examples
//!
//! ```
//! use trellis_foundation::Dp;
//! use trellis_grid::section_grid::{CellContext, Section, SectionGrid, SectionGridArgs};
//!
//! fn render(cell: CellContext<'_, &str>) -> String {
//!     format!("{}:{}", cell.index, cell.item)
//! }
//!
//! let args = SectionGridArgs::default()
//!     .sections(vec![Section::new("letters", vec!["a", "b", "c", "d", "e"])])
//!     .item_dimension(Dp(100.0))
//!     .static_dimension(Some(Dp(330.0)))
//!     .render_item(render);
//! let grid = SectionGrid::new(args).expect("sections and renderer supplied");
//!
//! let sections = grid.sections();
//! assert_eq!(sections[0].row_count(), 2);
//! let strip = sections[0].render_row(0).expect("row exists");
//! assert_eq!(strip.cells.len(), 3);
//! assert_eq!(strip.cells[0].content, "0:a");
//! ```

use std::{ops::Range, sync::Arc};

use derive_setters::Setters;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};
use trellis_foundation::{CallbackWith, Dp, Slot, State};

use crate::{
    chunk::chunk_ranges,
    dimension::{GridLayout, calculate_dimensions},
    style::{CellStyle, RowStyle, RowTemplate, Style, generate_styles},
};

/// Default target item dimension.
pub const DEFAULT_ITEM_DIMENSION: Dp = Dp(120.0);
/// Default gap between items and rows.
pub const DEFAULT_SPACING: Dp = Dp(10.0);

/// Measurement notification for the grid container.
///
/// Hosts deliver one of these whenever the container is laid out; the
/// shell only reads `width` (the measured axis) but forwards the whole
/// event to the caller's listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEvent {
    /// Measured container width.
    pub width: Dp,
    /// Measured container height.
    pub height: Dp,
}

/// Context handed to the per-item renderer for one cell.
pub struct CellContext<'a, T> {
    /// The item being rendered.
    pub item: &'a T,
    /// Flattened position of the item within its section's original
    /// data.
    pub index: usize,
    /// Key of the owning section.
    pub section_key: &'a str,
    /// Title of the owning section, if any.
    pub section_title: Option<&'a str>,
    /// Index of the row this cell belongs to.
    pub row_index: usize,
}

/// Shared handle to a per-item render function.
pub struct RenderItemSlot<T, R> {
    slot: Slot<dyn for<'a> Fn(CellContext<'a, T>) -> R + Send + Sync>,
}

impl<T, R> RenderItemSlot<T, R> {
    /// Wraps a render function in a shared, identity-comparable handle.
    pub fn new<F>(render: F) -> Self
    where
        F: for<'a> Fn(CellContext<'a, T>) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(render)),
        }
    }

    /// Renders one cell.
    pub fn call(&self, context: CellContext<'_, T>) -> R {
        let render = self.slot.shared();
        render(context)
    }
}

impl<T, R> Clone for RenderItemSlot<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for RenderItemSlot<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R, F> From<F> for RenderItemSlot<T, R>
where
    F: for<'a> Fn(CellContext<'a, T>) -> R + Send + Sync + 'static,
{
    fn from(render: F) -> Self {
        Self::new(render)
    }
}

/// Shared handle to an item keying function.
///
/// Called with the item and its index *within the row*, matching the
/// underlying list component's per-entry contract. Uniqueness across
/// the whole list is the caller's responsibility.
pub struct KeyExtractorSlot<T> {
    slot: Slot<dyn for<'a> Fn(&'a T, usize) -> String + Send + Sync>,
}

impl<T> KeyExtractorSlot<T> {
    /// Wraps a keying function in a shared, identity-comparable handle.
    pub fn new<F>(extractor: F) -> Self
    where
        F: for<'a> Fn(&'a T, usize) -> String + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(extractor)),
        }
    }

    /// Produces the key for one item.
    pub fn call(&self, item: &T, index: usize) -> String {
        let extract = self.slot.shared();
        extract(item, index)
    }
}

impl<T> Clone for KeyExtractorSlot<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> PartialEq for KeyExtractorSlot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, F> From<F> for KeyExtractorSlot<T>
where
    F: for<'a> Fn(&'a T, usize) -> String + Send + Sync + 'static,
{
    fn from(extractor: F) -> Self {
        Self::new(extractor)
    }
}

/// A named group of items laid out together.
///
/// Owned by the caller and read-only to the grid; the optional
/// `render_item` overrides the instance-level renderer for this section
/// only.
pub struct Section<T, R> {
    /// Stable identifier for the section.
    pub key: String,
    /// Optional title, passed through for the externally rendered
    /// header.
    pub title: Option<String>,
    /// The section's items, in render order.
    pub items: Arc<[T]>,
    /// Per-section renderer override.
    pub render_item: Option<RenderItemSlot<T, R>>,
}

impl<T, R> Section<T, R> {
    /// Creates a section from a key and its items.
    pub fn new(key: impl Into<String>, items: impl Into<Arc<[T]>>) -> Self {
        Self {
            key: key.into(),
            title: None,
            items: items.into(),
            render_item: None,
        }
    }

    /// Sets the section title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a renderer used for this section's items instead of the
    /// instance default.
    pub fn render_item<F>(mut self, render: F) -> Self
    where
        F: for<'a> Fn(CellContext<'a, T>) -> R + Send + Sync + 'static,
    {
        self.render_item = Some(RenderItemSlot::new(render));
        self
    }
}

impl<T, R> Clone for Section<T, R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            items: Arc::clone(&self.items),
            render_item: self.render_item.clone(),
        }
    }
}

/// One horizontal run of up to `columns` items.
///
/// Rows share their section's item storage; nothing is cloned when a
/// section is chunked.
pub struct RowGroup<T> {
    items: Arc<[T]>,
    range: Range<usize>,
    /// Position of this row within its section.
    pub row_index: usize,
    /// Whether this is the first row of its section.
    pub is_first: bool,
}

impl<T> RowGroup<T> {
    /// The row's items, in order.
    pub fn items(&self) -> &[T] {
        &self.items[self.range.clone()]
    }

    /// Number of items in the row.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the row holds no items.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Maps a slot within the row back to the item's flattened position
    /// in the section's original data.
    pub fn flat_index(&self, slot: usize) -> usize {
        self.range.start + slot
    }
}

impl<T> Clone for RowGroup<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            range: self.range.clone(),
            row_index: self.row_index,
            is_first: self.is_first,
        }
    }
}

/// Inline-capacity vector for the cells of one row.
pub type CellVec<R> = SmallVec<[GridCell<R>; 4]>;

/// One rendered cell of a row strip.
pub struct GridCell<R> {
    /// Key for the cell wrapper.
    pub key: String,
    /// Resolved wrapper style.
    pub style: CellStyle,
    /// Caller-produced cell content.
    pub content: R,
}

/// One row of the grid rendered as a horizontal strip of cells.
pub struct RowStrip<R> {
    /// Style of the row wrapper.
    pub style: RowStyle,
    /// The row's cells, in order.
    pub cells: CellVec<R>,
}

/// A section transformed for the external list component.
///
/// The section's data is the chunked [`RowGroup`] sequence; rendering
/// happens per row through [`GridSection::render_row`]. The original
/// flat items remain available through [`GridSection::items`].
pub struct GridSection<T, R> {
    key: String,
    title: Option<String>,
    items: Arc<[T]>,
    rows: Vec<RowGroup<T>>,
    template: RowTemplate,
    renderer: RenderItemSlot<T, R>,
    key_extractor: Option<KeyExtractorSlot<T>>,
    item_container_style: Option<Style>,
}

impl<T, R> GridSection<T, R> {
    /// Key of the source section.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Title of the source section, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The original flat items of the section, untouched by chunking.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The chunked rows, which are the data the list component iterates.
    pub fn rows(&self) -> &[RowGroup<T>] {
        &self.rows
    }

    /// Number of rows in the section.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Lays out one row as a horizontal strip of cells, invoking the
    /// resolved per-item renderer once per cell.
    ///
    /// Returns `None` for an out-of-range row index.
    pub fn render_row(&self, row_index: usize) -> Option<RowStrip<R>> {
        let row = self.rows.get(row_index)?;
        let mut cells = CellVec::new();
        for (slot, item) in row.items().iter().enumerate() {
            let flat = row.flat_index(slot);
            let content = self.renderer.call(CellContext {
                item,
                index: flat,
                section_key: &self.key,
                section_title: self.title.as_deref(),
                row_index,
            });
            let key = match &self.key_extractor {
                Some(extractor) => extractor.call(item, slot),
                None => format!("item_{flat}"),
            };
            cells.push(GridCell {
                key,
                style: self
                    .template
                    .cell_style(slot, self.item_container_style.as_ref()),
                content,
            });
        }
        Some(RowStrip {
            style: self.template.row_style(row.is_first),
            cells,
        })
    }

    /// Key for one row of the section.
    ///
    /// With a key extractor the per-item keys are joined with `_`;
    /// otherwise the key is positional.
    pub fn row_key(&self, row_index: usize) -> String {
        match (&self.key_extractor, self.rows.get(row_index)) {
            (Some(extractor), Some(row)) => row
                .items()
                .iter()
                .enumerate()
                .map(|(slot, item)| extractor.call(item, slot))
                .collect::<Vec<_>>()
                .join("_"),
            _ => format!("row_{row_index}"),
        }
    }
}

/// Layout configuration for the grid, immutable per render pass.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct GridConfig {
    /// Target item size along the measured axis.
    pub item_dimension: Dp,
    /// Static container width. Disables live measurement when present.
    pub static_dimension: Option<Dp>,
    /// Gap between items and rows.
    pub spacing: Dp,
    /// Pins item size and redistributes leftover width into the gaps,
    /// instead of stretching items.
    pub fixed: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            item_dimension: DEFAULT_ITEM_DIMENSION,
            static_dimension: None,
            spacing: DEFAULT_SPACING,
            fixed: false,
        }
    }
}

/// Arguments for [`SectionGrid`].
pub struct SectionGridArgs<T, R> {
    /// Layout configuration.
    pub config: GridConfig,
    /// The sections to lay out. Required.
    pub sections: Option<Vec<Section<T, R>>>,
    /// Instance-level default per-item renderer.
    pub render_item: Option<RenderItemSlot<T, R>>,
    /// Item keying function used to build row and cell keys.
    pub key_extractor: Option<KeyExtractorSlot<T>>,
    /// Style merged into each cell wrapper.
    pub item_container_style: Option<Style>,
    /// Called after internal measurement handling.
    pub on_layout: Option<CallbackWith<LayoutEvent>>,
    /// Style passed through to the external list component.
    pub list_style: Option<Style>,
}

impl<T, R> Default for SectionGridArgs<T, R> {
    fn default() -> Self {
        Self {
            config: GridConfig::default(),
            sections: None,
            render_item: None,
            key_extractor: None,
            item_container_style: None,
            on_layout: None,
            list_style: None,
        }
    }
}

impl<T, R> Clone for SectionGridArgs<T, R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            sections: self.sections.clone(),
            render_item: self.render_item.clone(),
            key_extractor: self.key_extractor.clone(),
            item_container_style: self.item_container_style,
            on_layout: self.on_layout.clone(),
            list_style: self.list_style,
        }
    }
}

impl<T, R> SectionGridArgs<T, R> {
    /// Sets the sections to lay out.
    pub fn sections(mut self, sections: Vec<Section<T, R>>) -> Self {
        self.sections = Some(sections);
        self
    }

    /// Sets the whole layout configuration at once.
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the target item dimension.
    pub fn item_dimension(mut self, item_dimension: Dp) -> Self {
        self.config.item_dimension = item_dimension;
        self
    }

    /// Sets a static container width, disabling live measurement.
    pub fn static_dimension(mut self, static_dimension: Option<Dp>) -> Self {
        self.config.static_dimension = static_dimension;
        self
    }

    /// Sets the gap between items and rows.
    pub fn spacing(mut self, spacing: Dp) -> Self {
        self.config.spacing = spacing;
        self
    }

    /// Pins item size instead of spacing.
    pub fn fixed(mut self, fixed: bool) -> Self {
        self.config.fixed = fixed;
        self
    }

    /// Sets the instance-level default per-item renderer.
    pub fn render_item<F>(mut self, render: F) -> Self
    where
        F: for<'a> Fn(CellContext<'a, T>) -> R + Send + Sync + 'static,
    {
        self.render_item = Some(RenderItemSlot::new(render));
        self
    }

    /// Sets the item keying function.
    pub fn key_extractor<F>(mut self, extractor: F) -> Self
    where
        F: for<'a> Fn(&'a T, usize) -> String + Send + Sync + 'static,
    {
        self.key_extractor = Some(KeyExtractorSlot::new(extractor));
        self
    }

    /// Sets the style merged into each cell wrapper.
    pub fn item_container_style(mut self, style: Style) -> Self {
        self.item_container_style = Some(style);
        self
    }

    /// Sets the layout listener, called after internal measurement
    /// handling.
    pub fn on_layout<F>(mut self, listener: F) -> Self
    where
        F: Fn(LayoutEvent) + Send + Sync + 'static,
    {
        self.on_layout = Some(CallbackWith::new(listener));
        self
    }

    /// Sets the style passed through to the external list component.
    pub fn list_style(mut self, style: Style) -> Self {
        self.list_style = Some(style);
        self
    }
}

/// Construction-time contract violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionGridError {
    /// `sections` was never supplied.
    #[error("`sections` is required")]
    MissingSections,
    /// A section has no renderer and no instance default exists.
    #[error("section `{section}` has no renderer and no default `render_item` was supplied")]
    MissingRenderer {
        /// Key of the offending section.
        section: String,
    },
}

/// Everything the external list component needs for one render pass.
pub struct GridSpec<T, R> {
    /// Transformed sections; each section's data is its chunked rows.
    pub sections: Vec<GridSection<T, R>>,
    /// Style for the outer list, passed through untouched.
    pub list_style: Option<Style>,
}

/// The external list-rendering collaborator seam.
///
/// Implementors own virtualization, scrolling, recycling and section
/// header rendering; the grid only ever hands them a fresh
/// [`GridSpec`].
pub trait SectionListHost<T, R> {
    /// Accepts a freshly computed grid spec for rendering.
    fn set_sections(&mut self, spec: GridSpec<T, R>);
}

struct ResolvedSection<T, R> {
    section: Section<T, R>,
    renderer: RenderItemSlot<T, R>,
}

/// The grid shell.
///
/// Observes the container width (falling back to a caller-supplied
/// static width), recomputes the layout and row grouping when inputs
/// change, and delegates actual list rendering to the external
/// collaborator. Stateless apart from the measured width.
pub struct SectionGrid<T, R> {
    config: GridConfig,
    sections: Vec<ResolvedSection<T, R>>,
    key_extractor: Option<KeyExtractorSlot<T>>,
    item_container_style: Option<Style>,
    on_layout: Option<CallbackWith<LayoutEvent>>,
    list_style: Option<Style>,
    measured: State<Option<Dp>>,
}

impl<T, R> SectionGrid<T, R> {
    /// Builds the shell, validating the construction contract.
    ///
    /// Fails with [`SectionGridError::MissingSections`] when no sections
    /// were supplied, and with [`SectionGridError::MissingRenderer`]
    /// when a section has neither its own renderer nor an instance
    /// default to fall back to. Everything else is clamped rather than
    /// rejected.
    pub fn new(args: SectionGridArgs<T, R>) -> Result<Self, SectionGridError> {
        let sections = args.sections.ok_or(SectionGridError::MissingSections)?;
        let sections = sections
            .into_iter()
            .map(|section| {
                let renderer = section
                    .render_item
                    .clone()
                    .or_else(|| args.render_item.clone())
                    .ok_or_else(|| SectionGridError::MissingRenderer {
                        section: section.key.clone(),
                    })?;
                Ok(ResolvedSection { section, renderer })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config: args.config,
            sections,
            key_extractor: args.key_extractor,
            item_container_style: args.item_container_style,
            on_layout: args.on_layout,
            list_style: args.list_style,
            measured: State::new(None),
        })
    }

    /// The grid's layout configuration.
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// The width the next render pass will lay out against: the static
    /// width when configured, else the last measured width.
    pub fn total_dimension(&self) -> Option<Dp> {
        self.config.static_dimension.or(self.measured.get())
    }

    /// Handles a container measurement.
    ///
    /// The measured width is stored only when it actually changed, and
    /// never when a static width is configured. The event is then
    /// forwarded to the caller's `on_layout` listener regardless.
    pub fn handle_layout(&self, event: LayoutEvent) {
        if self.config.static_dimension.is_none() {
            self.measured.with_mut(|measured| {
                if *measured != Some(event.width) {
                    trace!(width = f64::from(event.width.raw()), "measured grid width changed");
                    *measured = Some(event.width);
                }
            });
        }
        if let Some(on_layout) = &self.on_layout {
            on_layout.call(event);
        }
    }

    /// Computes the grid layout for the current width.
    ///
    /// An unmeasured grid without a static width degrades to a single
    /// column until the first [`handle_layout`](Self::handle_layout).
    pub fn layout(&self) -> GridLayout {
        let measured = self.measured.get().unwrap_or(Dp::ZERO);
        calculate_dimensions(
            self.config.item_dimension,
            self.config.static_dimension,
            measured,
            self.config.spacing,
            self.config.fixed,
        )
    }

    /// Transforms every input section for the external list component.
    ///
    /// Recomputed deterministically from the current inputs on every
    /// call; nothing is cached.
    pub fn sections(&self) -> Vec<GridSection<T, R>> {
        let layout = self.layout();
        debug!(
            columns = layout.columns,
            item_width = f64::from(layout.item_width.raw()),
            "computed grid layout"
        );
        let template = generate_styles(&layout, self.config.spacing);

        self.sections
            .iter()
            .map(|resolved| {
                let section = &resolved.section;
                let rows = chunk_ranges(section.items.len(), layout.columns)
                    .enumerate()
                    .map(|(row_index, range)| RowGroup {
                        items: Arc::clone(&section.items),
                        range,
                        row_index,
                        is_first: row_index == 0,
                    })
                    .collect();
                GridSection {
                    key: section.key.clone(),
                    title: section.title.clone(),
                    items: Arc::clone(&section.items),
                    rows,
                    template: template.clone(),
                    renderer: resolved.renderer.clone(),
                    key_extractor: self.key_extractor.clone(),
                    item_container_style: self.item_container_style,
                }
            })
            .collect()
    }

    /// Builds the full collaborator contract for one render pass.
    pub fn spec(&self) -> GridSpec<T, R> {
        GridSpec {
            sections: self.sections(),
            list_style: self.list_style,
        }
    }

    /// Hands a freshly computed spec to the external list component.
    pub fn sync<L: SectionListHost<T, R>>(&self, host: &mut L) {
        host.set_sections(self.spec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::EdgeInsets;

    fn render(cell: CellContext<'_, i32>) -> String {
        format!("cell-{}", cell.item)
    }

    fn render_indexed(cell: CellContext<'_, i32>) -> String {
        format!("{}:{}:{}", cell.section_key, cell.index, cell.item)
    }

    fn render_override(cell: CellContext<'_, i32>) -> String {
        format!("override-{}", cell.item)
    }

    fn sample_sections() -> Vec<Section<i32, String>> {
        vec![
            Section::new("a", (0..5).collect::<Vec<_>>()).title("First"),
            Section::new("b", vec![10, 11, 12]),
        ]
    }

    fn grid_args() -> SectionGridArgs<i32, String> {
        SectionGridArgs::default()
            .sections(sample_sections())
            .item_dimension(Dp(100.0))
            .static_dimension(Some(Dp(330.0)))
            .spacing(Dp(10.0))
            .render_item(render)
    }

    #[test]
    fn test_missing_sections_is_an_error() {
        let args: SectionGridArgs<i32, String> = SectionGridArgs::default().render_item(render);
        assert_eq!(
            SectionGrid::new(args).err(),
            Some(SectionGridError::MissingSections)
        );
    }

    #[test]
    fn test_missing_renderer_is_an_error() {
        let args: SectionGridArgs<i32, String> =
            SectionGridArgs::default().sections(sample_sections());
        assert_eq!(
            SectionGrid::new(args).err(),
            Some(SectionGridError::MissingRenderer {
                section: String::from("a")
            })
        );
    }

    #[test]
    fn test_section_renderers_alone_satisfy_the_contract() {
        let sections = vec![
            Section::new("a", vec![1, 2]).render_item(render_override),
            Section::new("b", vec![3]).render_item(render_override),
        ];
        let args = SectionGridArgs::default()
            .sections(sections)
            .static_dimension(Some(Dp(330.0)));
        assert!(SectionGrid::<i32, String>::new(args).is_ok());
    }

    #[test]
    fn test_section_renderer_overrides_instance_default() {
        let mut sections = sample_sections();
        sections[1] = Section::new("b", vec![10, 11, 12]).render_item(render_override);
        let args = grid_args().sections(sections);
        let grid = SectionGrid::new(args).expect("grid");

        let transformed = grid.sections();
        let default_strip = transformed[0].render_row(0).expect("row");
        let override_strip = transformed[1].render_row(0).expect("row");
        assert_eq!(default_strip.cells[0].content, "cell-0");
        assert_eq!(override_strip.cells[0].content, "override-10");
    }

    #[test]
    fn test_row_counts_per_section() {
        let grid = SectionGrid::new(grid_args()).expect("grid");
        let sections = grid.sections();

        assert_eq!(grid.layout().columns, 3);
        assert_eq!(sections[0].row_count(), 2);
        assert_eq!(sections[1].row_count(), 1);
        assert_eq!(sections[0].rows()[0].len(), 3);
        assert_eq!(sections[0].rows()[1].len(), 2);
    }

    #[test]
    fn test_only_first_rows_carry_the_header_margin() {
        let grid = SectionGrid::new(grid_args()).expect("grid");
        let sections = grid.sections();

        for section in &sections {
            for row_index in 0..section.row_count() {
                let strip = section.render_row(row_index).expect("row");
                let expected = if row_index == 0 { Dp(10.0) } else { Dp::ZERO };
                assert_eq!(strip.style.margin_top, expected);
            }
        }
    }

    #[test]
    fn test_cell_contexts_use_flattened_indices() {
        let args = grid_args().render_item(render_indexed);
        let grid = SectionGrid::new(args).expect("grid");
        let sections = grid.sections();

        let second_row = sections[0].render_row(1).expect("row");
        let contents: Vec<&str> = second_row
            .cells
            .iter()
            .map(|cell| cell.content.as_str())
            .collect();
        assert_eq!(contents, vec!["a:3:3", "a:4:4"]);
    }

    #[test]
    fn test_positional_keys_without_extractor() {
        let grid = SectionGrid::new(grid_args()).expect("grid");
        let sections = grid.sections();

        assert_eq!(sections[0].row_key(0), "row_0");
        assert_eq!(sections[0].row_key(1), "row_1");
        let second_row = sections[0].render_row(1).expect("row");
        assert_eq!(second_row.cells[0].key, "item_3");
        assert_eq!(second_row.cells[1].key, "item_4");
    }

    #[test]
    fn test_extracted_keys_are_joined_per_row() {
        let args = grid_args().key_extractor(|item: &i32, _slot| format!("k{item}"));
        let grid = SectionGrid::new(args).expect("grid");
        let sections = grid.sections();

        assert_eq!(sections[0].row_key(0), "k0_k1_k2");
        assert_eq!(sections[0].row_key(1), "k3_k4");
        assert_eq!(sections[1].row_key(0), "k10_k11_k12");
        let strip = sections[1].render_row(0).expect("row");
        assert_eq!(strip.cells[0].key, "k10");
    }

    #[test]
    fn test_measurement_drives_layout_until_static() {
        let args = grid_args().static_dimension(None);
        let grid = SectionGrid::new(args).expect("grid");

        // Unmeasured grids degrade to a single column.
        assert_eq!(grid.layout().columns, 1);
        assert_eq!(grid.total_dimension(), None);

        grid.handle_layout(LayoutEvent {
            width: Dp(330.0),
            height: Dp(600.0),
        });
        assert_eq!(grid.layout().columns, 3);
        assert_eq!(grid.total_dimension(), Some(Dp(330.0)));

        grid.handle_layout(LayoutEvent {
            width: Dp(440.0),
            height: Dp(600.0),
        });
        assert_eq!(grid.layout().columns, 4);
    }

    #[test]
    fn test_static_dimension_suppresses_measurement() {
        let grid = SectionGrid::new(grid_args()).expect("grid");

        grid.handle_layout(LayoutEvent {
            width: Dp(1000.0),
            height: Dp(600.0),
        });
        assert_eq!(grid.total_dimension(), Some(Dp(330.0)));
        assert_eq!(grid.layout().columns, 3);
    }

    #[test]
    fn test_on_layout_is_always_forwarded() {
        let calls = State::new(0usize);
        let listener = calls.clone();
        let args = grid_args().on_layout(move |_event| listener.with_mut(|c| *c += 1));
        let grid = SectionGrid::new(args).expect("grid");

        let event = LayoutEvent {
            width: Dp(500.0),
            height: Dp(600.0),
        };
        grid.handle_layout(event);
        grid.handle_layout(event);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_empty_section_has_no_rows() {
        let args = grid_args().sections(vec![Section::new("empty", Vec::<i32>::new())]);
        let grid = SectionGrid::new(args).expect("grid");
        let sections = grid.sections();

        assert_eq!(sections[0].row_count(), 0);
        assert!(sections[0].render_row(0).is_none());
        assert_eq!(sections[0].row_key(0), "row_0");
    }

    #[test]
    fn test_slots_compare_by_identity() {
        let slot = RenderItemSlot::from(render);
        assert!(slot == slot.clone());
        assert!(slot != RenderItemSlot::new(render));

        let keys = KeyExtractorSlot::<i32>::from(|item: &i32, _slot: usize| item.to_string());
        assert_eq!(keys.call(&7, 0), "7");
        assert!(keys == keys.clone());
    }

    #[test]
    fn test_fixed_mode_pins_cell_width() {
        let config = GridConfig::default()
            .item_dimension(Dp(100.0))
            .static_dimension(Some(Dp(330.0)))
            .spacing(Dp(10.0))
            .fixed(true);
        let args = grid_args().config(config);
        let grid = SectionGrid::new(args).expect("grid");
        let sections = grid.sections();

        let strip = sections[0].render_row(0).expect("row");
        assert_eq!(strip.cells[0].style.width, Dp(100.0));
        assert!((strip.cells[0].style.offset.raw() - 7.5).abs() < 1e-3);
        // The vertical gap still uses the configured spacing.
        assert_eq!(strip.style.padding_bottom, Dp(10.0));
    }

    #[test]
    fn test_item_container_style_reaches_cells() {
        let style = Style::default().width(Some(Dp(64.0)));
        let args = grid_args().item_container_style(style);
        let grid = SectionGrid::new(args).expect("grid");
        let sections = grid.sections();

        let strip = sections[0].render_row(0).expect("row");
        assert_eq!(strip.cells[0].style.width, Dp(64.0));
    }

    #[test]
    fn test_sections_carry_metadata_and_original_data() {
        let grid = SectionGrid::new(grid_args()).expect("grid");
        let sections = grid.sections();

        assert_eq!(sections[0].key(), "a");
        assert_eq!(sections[0].title(), Some("First"));
        assert_eq!(sections[0].items(), &[0, 1, 2, 3, 4]);
        assert_eq!(sections[1].title(), None);
    }

    #[derive(Default)]
    struct RecordingHost {
        section_count: usize,
        row_counts: Vec<usize>,
        list_style: Option<Style>,
    }

    impl SectionListHost<i32, String> for RecordingHost {
        fn set_sections(&mut self, spec: GridSpec<i32, String>) {
            self.section_count = spec.sections.len();
            self.row_counts = spec.sections.iter().map(GridSection::row_count).collect();
            self.list_style = spec.list_style;
        }
    }

    #[test]
    fn test_sync_hands_the_spec_to_the_host() {
        let list_style = Style::default().padding(EdgeInsets::all(Dp(8.0)));
        let args = grid_args().list_style(list_style);
        let grid = SectionGrid::new(args).expect("grid");

        let mut host = RecordingHost::default();
        grid.sync(&mut host);

        assert_eq!(host.section_count, 2);
        assert_eq!(host.row_counts, vec![2, 1]);
        assert_eq!(host.list_style, Some(list_style));
    }
}
