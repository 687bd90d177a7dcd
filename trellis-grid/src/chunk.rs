//! Row grouping for section data.
//!
//! A section's flat item sequence becomes `ceil(len / size)` rows of
//! `size` items each, the last row holding the remainder. Grouping is
//! order-preserving and pure; a `size` below one is clamped to one,
//! matching the dimension calculator's minimum-columns guarantee.

use std::ops::Range;

/// Number of rows needed to hold `len` items at `size` items per row.
pub fn row_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}

/// Index ranges of the rows covering `0..len`.
///
/// The shell chunks by range so rows can share the section's item
/// storage instead of cloning items.
pub fn chunk_ranges(len: usize, size: usize) -> impl Iterator<Item = Range<usize>> {
    let size = size.max(1);
    (0..row_count(len, size)).map(move |row| {
        let start = row * size;
        start..(start + size).min(len)
    })
}

/// Partitions a slice into ordered groups of `size` elements.
///
/// # Examples
///
/// ```
/// use trellis_grid::chunk::chunk;
///
/// let rows = chunk(&[1, 2, 3, 4, 5], 2);
/// assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn chunk<T>(items: &[T], size: usize) -> Vec<&[T]> {
    items.chunks(size.max(1)).collect()
}
