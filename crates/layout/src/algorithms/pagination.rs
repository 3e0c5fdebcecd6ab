use std::num::NonZeroUsize;
use std::ops::Range;

/// Tolerance for floating point inaccuracies in height comparisons.
pub const EPSILON: f32 = 0.01;

/// Number of rows of `row_height` that fit in `available` after a header of `header_height`.
///
/// Returns 0 when not even one row fits.
pub fn row_capacity(available: f32, header_height: f32, row_height: f32) -> usize {
    if row_height <= 0.0 {
        return 0;
    }
    let space = available - header_height + EPSILON;
    if space < row_height {
        return 0;
    }
    (space / row_height).floor() as usize
}

/// Splits `total` rows into consecutive page-sized chunks.
///
/// The first chunk holds up to `first` rows (what is left on the current page),
/// every later chunk up to `rest` rows (a fresh page). The chunks cover
/// `0..total` exactly once and in order; a total that exactly fills the last
/// chunk produces no trailing empty chunk.
pub fn plan_chunks(total: usize, first: NonZeroUsize, rest: NonZeroUsize) -> Vec<Range<usize>> {
    let mut chunks = Vec::new();
    if total == 0 {
        return chunks;
    }
    let mut start = 0;
    let mut capacity = first.get();
    while start < total {
        let end = (start + capacity).min(total);
        chunks.push(start..end);
        start = end;
        capacity = rest.get();
    }
    chunks
}
