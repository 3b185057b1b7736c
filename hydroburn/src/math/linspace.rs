use num_traits::{Float, FromPrimitive};

/// Returns `n` evenly spaced values from `y_start` to `y_end`, both
/// inclusive. The last value is exactly `y_end`.
pub fn linspace<T>(y_start: T, y_end: T, n: usize) -> impl Iterator<Item = T>
where
    T: Float + FromPrimitive,
{
    debug_assert!(n >= 2);
    let dy = (y_end - y_start) / T::from_usize(n - 1).unwrap_or_else(T::one);
    (0..n).map(move |i| {
        if i + 1 == n {
            y_end
        } else {
            y_start + T::from_usize(i).unwrap_or_else(T::zero) * dy
        }
    })
}
