/// The least `e` such that `2^e >= x`. Returns 0 for `x <= 1`.
#[inline]
pub fn ceil_log2(x: u32) -> u32 {
    if x <= 1 {
        0
    } else {
        32 - (x - 1).leading_zeros()
    }
}

/// The jump lengths `1, 2, 4, ...` strictly less than `resolution`, in the order they are applied.
///
/// ```
/// use shoal_core::int_math::jump_lengths;
///
/// assert_eq!(jump_lengths(5).collect::<Vec<_>>(), vec![1, 2, 4]);
/// assert_eq!(jump_lengths(1).count(), 0);
/// ```
#[inline]
pub fn jump_lengths(resolution: u32) -> impl Iterator<Item = u32> {
    (0..ceil_log2(resolution)).map(|e| 1 << e)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
