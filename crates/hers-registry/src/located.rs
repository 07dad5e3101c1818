//! The `Located` trait — anything that can be ranked by position.

use hers_core::GeoPoint;

/// A candidate with an (optional) position on the map.
///
/// # Contract
///
/// - `None` means "position unknown"; rankers skip such candidates rather
///   than failing the whole query.
/// - The position may change between calls (resources move); callers take
///   one reading per ranking pass.
pub trait Located {
    fn position(&self) -> Option<GeoPoint>;
}

impl<T: Located + ?Sized> Located for &T {
    #[inline]
    fn position(&self) -> Option<GeoPoint> {
        (**self).position()
    }
}
