use crate::geometry::{ContentSize, Rectangle};

/// Upper bound on the replica count a host may request.
pub const DEFAULT_MAX_REPLICA_COUNT: u32 = 10;

/// Tiles up to `n - 1` copies of `primary` to its right.
///
/// Copy `i` sits `i * primary.width` to the right of the primary and is kept
/// only if it ends inside the content. Each `i` is checked on its own, so a
/// rejected copy does not stop the loop.
pub fn generate(primary: Rectangle, content: ContentSize, n: u32) -> Vec<Rectangle> {
    if n <= 1 {
        return Vec::new();
    }

    let width = i64::from(primary.width);
    let limit = i64::from(content.width);
    (1..n)
        .filter_map(|i| {
            let x = i64::from(primary.x) + i64::from(i) * width;
            if x + width > limit {
                return None;
            }
            let x = i32::try_from(x).ok()?;
            Some(Rectangle::new(x, primary.y, primary.width, primary.height))
        })
        .collect()
}
