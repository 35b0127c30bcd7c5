/// Index of the bucket `value` falls into, given ascending `boundaries`.
///
/// `boundaries[i]` is the lower bound of bucket `i`. A value equal to a
/// boundary belongs to the bucket starting there. Values below the first
/// boundary clamp to 0, and values at or past the last boundary map to
/// `len - 2`, the bucket whose upper bound is the last boundary (0 for a
/// single-boundary list).
///
/// Linear scan; the lists this is used with are a handful of layout
/// breakpoints.
pub fn find_start_index<T: PartialOrd>(value: T, boundaries: &[T]) -> usize {
    let index = match boundaries.iter().position(|b| value < *b) {
        Some(i) => i.saturating_sub(1),
        None => boundaries.len().saturating_sub(2),
    };
    log::trace!("find_start_index -> {index} of {} boundaries", boundaries.len());
    index
}
