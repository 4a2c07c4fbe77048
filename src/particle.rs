use glam::DVec2;

/// Trait to describe a point-mass which consists of a [position](Particle::position) and a
/// [mass](Particle::mass).
///
/// The force model in [`gravity`](crate::gravity) and every
/// [`ComputeMethod`](crate::compute_method::ComputeMethod) work on this trait, so they can be used
/// with [`Body`](crate::Body) as well as with lightweight stand-ins.
///
/// It is implemented for tuples of a [`DVec2`] position and an `f64` mass, which is handy when a
/// dedicated type is not needed.
///
/// ```
/// # use orbital::prelude::*;
/// # use glam::DVec2;
/// let particle = (DVec2::new(1.0, 2.0), 5.0);
///
/// assert_eq!(particle.position(), DVec2::new(1.0, 2.0));
/// assert_eq!(particle.mass(), 5.0);
/// ```
pub trait Particle {
    /// The position of the particle in space, in meters.
    fn position(&self) -> DVec2;

    /// The mass of the particle, in kilograms.
    fn mass(&self) -> f64;
}

impl Particle for (DVec2, f64) {
    #[inline]
    fn position(&self) -> DVec2 {
        self.0
    }

    #[inline]
    fn mass(&self) -> f64 {
        self.1
    }
}

impl<P> Particle for &P
where
    P: Particle + ?Sized,
{
    #[inline]
    fn position(&self) -> DVec2 {
        (**self).position()
    }

    #[inline]
    fn mass(&self) -> f64 {
        (**self).mass()
    }
}

impl<P> Particle for &mut P
where
    P: Particle + ?Sized,
{
    #[inline]
    fn position(&self) -> DVec2 {
        (**self).position()
    }

    #[inline]
    fn mass(&self) -> f64 {
        (**self).mass()
    }
}
