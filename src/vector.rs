use glam::DVec2;

/// Arbitrary 2D vectors that can be converted from and into an array of two `f64`.
///
/// [`orbital`](crate) stores every position, velocity and force as a [`DVec2`]. This trait lets
/// callers hand in and read back whatever vector type they already use, as long as it converts
/// to and from `[f64; 2]`. Arrays, tuples and [`DVec2`] itself all qualify.
///
/// ```
/// # use orbital::vector::Vector;
/// # use glam::DVec2;
/// assert_eq!([3.0, 4.0].into_internal(), DVec2::new(3.0, 4.0));
/// assert_eq!((3.0, 4.0).into_internal(), DVec2::new(3.0, 4.0));
///
/// let tuple: (f64, f64) = Vector::from_internal(DVec2::new(1.0, -1.0));
/// assert_eq!(tuple, (1.0, -1.0));
/// ```
pub trait Vector: Into<[f64; 2]> + From<[f64; 2]> {
    /// Convert the arbitrary vector into its internal representation.
    fn into_internal(self) -> DVec2;

    /// Convert the internal representation back into the arbitrary vector.
    fn from_internal(vector: DVec2) -> Self;
}

impl<V> Vector for V
where
    V: Into<[f64; 2]> + From<[f64; 2]>,
{
    #[inline]
    fn into_internal(self) -> DVec2 {
        DVec2::from_array(self.into())
    }

    #[inline]
    fn from_internal(vector: DVec2) -> Self {
        Self::from(vector.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glam_vectors_are_unchanged() {
        let vector = DVec2::new(0.4055e9, -970.0);

        assert_eq!(vector.into_internal(), vector);
        assert_eq!(DVec2::from_internal(vector), vector);
    }

    #[test]
    fn arrays_keep_component_order() {
        let internal = [1.5, -2.5].into_internal();

        assert_eq!(internal.x, 1.5);
        assert_eq!(internal.y, -2.5);
        assert_eq!(<[f64; 2]>::from_internal(internal), [1.5, -2.5]);
    }
}
