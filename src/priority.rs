//! Numeric priority types.

use std::cmp::Ordering;
use std::fmt::Debug;

/// A numeric priority with a total order.
///
/// Integers compare with `Ord`. Floats compare with `total_cmp`, so a
/// NaN priority sorts after positive infinity instead of breaking the
/// heap invariant.
pub trait Priority: Copy + Debug + PartialEq + 'static {
    /// Total order between two priorities, smallest first.
    fn cmp_priority(&self, other: &Self) -> Ordering;
}

macro_rules! impl_priority_int {
    ($($t:ty),*) => {
        $(
            impl Priority for $t {
                #[inline]
                fn cmp_priority(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

macro_rules! impl_priority_float {
    ($($t:ty),*) => {
        $(
            impl Priority for $t {
                #[inline]
                fn cmp_priority(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }
            }
        )*
    };
}

impl_priority_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_priority_float!(f32, f64);
