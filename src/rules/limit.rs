//! Purchase limits
//!
//! A promotional limit caps how much of a purchase may be discounted. Anything
//! over the cap is moved to full price.

use std::ops::{Add, Sub};

/// Split a purchase into `(discounted, full_price)` under an optional limit.
///
/// A missing or zero limit leaves the split unchanged, as does a discounted
/// amount that has not yet reached the limit. Otherwise the discounted amount
/// is capped at `limit` and the excess is added to the full-price amount.
pub fn allocate<T>(limit: Option<T>, discounted: T, full: T) -> (T, T)
where
    T: Copy + Default + PartialOrd + Add<Output = T> + Sub<Output = T>,
{
    match limit {
        Some(limit) if limit != T::default() && discounted > limit => {
            (limit, discounted + full - limit)
        }
        _ => (discounted, full),
    }
}
