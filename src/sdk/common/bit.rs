pub const ONES_32: u32 = 0xffff_ffff;

#[macro_export]
macro_rules! BIT {
    ( $x:expr ) => {
        1 << $x
    };
}

#[macro_export]
macro_rules! BIT_MASK_LEN {
    ( $x:expr ) => {
        $crate::BIT!($x) - 1
    };
}

// bits range: BIT_RNG(7, 9)  0b0000001110000000, from bit 7 to bit 9 inclusive
#[macro_export]
macro_rules! BIT_RNG {
    ( $s:expr, $e:expr ) => {
        $crate::BIT_MASK_LEN!($e - $s + 1) << $s
    };
}

/// Places `value` into the field described by `mask`.
///
/// Bits of `value` that do not fit in the field are dropped.
pub const fn mask_val(mask: u32, value: u32) -> u32 {
    (value << mask.trailing_zeros()) & mask
}

/// Extracts the field described by `mask` from `reg`.
pub const fn mask_get(mask: u32, reg: u32) -> u32 {
    (reg & mask) >> mask.trailing_zeros()
}

/// Replaces the field described by `mask` in `reg` with `value`.
pub const fn mask_set(reg: u32, mask: u32, value: u32) -> u32 {
    (reg & !mask) | mask_val(mask, value)
}
