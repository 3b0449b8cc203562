//! Trial offsets tried below an anchor, in order.

/// `(d_column, d_row)` relative to the anchor.
pub type Offset = (i32, i32);

/// Straight down first, then alternating right/left at growing distance:
/// `(0,1) (1,1) (-1,1) (2,1) (-2,1) ..`, at most `max_fan_out` entries.
///
/// Lazy, so callers that stop at the first free cell never pay for the full limit. Which sibling
/// ends up under its parent depends on this order, so it must stay stable.
pub fn trial_offsets(max_fan_out: usize) -> impl Iterator<Item = Offset> {
    (0..max_fan_out).map_while(|i| {
        let distance = i32::try_from(i.div_ceil(2)).ok()?;
        let d_column = if i % 2 == 1 { distance } else { -distance };
        Some((d_column, 1))
    })
}
