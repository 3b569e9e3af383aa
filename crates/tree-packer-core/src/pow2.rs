/// Rounds `x` up to a power of two, leaving it unchanged when it already is one.
///
/// `0` maps to `1`. Returns `None` when the result does not fit in a `u32`
/// (any `x` above `2^31`).
///
/// ```
/// use tree_packer_core::pad_to_pow2;
/// assert_eq!(pad_to_pow2(999), Some(1024));
/// assert_eq!(pad_to_pow2(512), Some(512));
/// ```
pub fn pad_to_pow2(x: u32) -> Option<u32> {
    x.checked_next_power_of_two()
}

pub fn is_pow2(v: u32) -> bool {
    v.is_power_of_two()
}
