use glam::DVec2;

use crate::{compute_method::InteractionPair, particle::Particle, Between, Interaction};

/// Newtonian constant of gravitation in SI units (m³ kg⁻¹ s⁻²).
///
/// This is only the default value of
/// [`SimulationConfig::gravitational_constant`](crate::SimulationConfig::gravitational_constant);
/// the force models always use the constant they were built with.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11;

/// [`Interaction`] computing the force a particle exerts on another using Newton's law of
/// universal gravitation.
///
/// The force on the affected particle `A` from the affecting particle `B` is
/// `G · m_A · m_B / r² · d / r` with `d = position(B) - position(A)`, so it points from `A`
/// towards `B`.
///
/// The computation is antisymmetric bit for bit: swapping the particles negates the result
/// exactly.
///
/// Particles sharing a position are not special-cased: the result is then made of NaN values.
/// Use [`SoftenedForce`] when coincident particles must be tolerated.
///
/// ```
/// # use orbital::prelude::*;
/// # use glam::DVec2;
/// let a = (DVec2::new(0.0, 0.0), 2.0);
/// let b = (DVec2::new(0.0, 2.0), 3.0);
///
/// let force = NewtonianForce::new(1.0).compute(Between(&a, &b));
/// assert_eq!(force, DVec2::new(0.0, 1.5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonianForce {
    /// Gravitational constant.
    pub g: f64,
}

impl Default for NewtonianForce {
    #[inline]
    fn default() -> Self {
        Self::new(GRAVITATIONAL_CONSTANT)
    }
}

impl NewtonianForce {
    /// Creates a new [`NewtonianForce`] with the given gravitational constant.
    #[inline]
    pub const fn new(g: f64) -> Self {
        Self { g }
    }

    /// Gravitational potential energy of the pair, in joules.
    #[inline]
    pub fn potential<P1, P2>(&self, Between(p1, p2): Between<&P1, &P2>) -> f64
    where
        P1: Particle + ?Sized,
        P2: Particle + ?Sized,
    {
        let r = p2.position().distance(p1.position());
        -self.g * (p1.mass() * p2.mass()) / r
    }
}

impl<P1, P2> Interaction<Between<&P1, &P2>> for NewtonianForce
where
    P1: Particle + ?Sized,
    P2: Particle + ?Sized,
{
    type Output = DVec2;

    #[inline]
    fn compute(&mut self, Between(affected, affecting): Between<&P1, &P2>) -> DVec2 {
        let dir = affecting.position() - affected.position();
        let mag_2 = dir.length_squared();

        // The mass product is computed first so that swapping the particles gives the exact
        // opposite force.
        let f = self.g * (affected.mass() * affecting.mass()) / mag_2;

        dir * (f / mag_2.sqrt())
    }
}

impl<P> InteractionPair<&P> for NewtonianForce
where
    P: Particle + ?Sized,
{
    type Output = DVec2;

    #[inline]
    fn compute_pair(&mut self, pair: Between<&P, &P>) -> (DVec2, DVec2) {
        let force = self.compute(pair);
        (force, -force)
    }
}

/// [`Interaction`] computing a softened Newtonian force.
///
/// The squared distance is replaced by `r² + ε²`, which bounds the force between close
/// particles and makes it zero between coincident ones. This is an explicit policy: it is only
/// used when a non-zero [`softening`](crate::SimulationConfig::softening) is configured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoftenedForce {
    /// Gravitational constant.
    pub g: f64,
    /// Softening length `ε`, in meters.
    pub epsilon: f64,
}

impl SoftenedForce {
    /// Creates a new [`SoftenedForce`] with the given gravitational constant and softening
    /// length.
    #[inline]
    pub const fn new(g: f64, epsilon: f64) -> Self {
        Self { g, epsilon }
    }

    /// Softened gravitational potential energy of the pair, in joules.
    #[inline]
    pub fn potential<P1, P2>(&self, Between(p1, p2): Between<&P1, &P2>) -> f64
    where
        P1: Particle + ?Sized,
        P2: Particle + ?Sized,
    {
        let mag_2 = p2.position().distance_squared(p1.position()) + self.epsilon * self.epsilon;
        -self.g * (p1.mass() * p2.mass()) / mag_2.sqrt()
    }
}

impl<P1, P2> Interaction<Between<&P1, &P2>> for SoftenedForce
where
    P1: Particle + ?Sized,
    P2: Particle + ?Sized,
{
    type Output = DVec2;

    #[inline]
    fn compute(&mut self, Between(affected, affecting): Between<&P1, &P2>) -> DVec2 {
        let dir = affecting.position() - affected.position();
        let mag_2 = dir.length_squared() + self.epsilon * self.epsilon;

        if mag_2 == 0.0 {
            return DVec2::ZERO;
        }

        let f = self.g * (affected.mass() * affecting.mass()) / mag_2;

        dir * (f / mag_2.sqrt())
    }
}

impl<P> InteractionPair<&P> for SoftenedForce
where
    P: Particle + ?Sized,
{
    type Output = DVec2;

    #[inline]
    fn compute_pair(&mut self, pair: Between<&P, &P>) -> (DVec2, DVec2) {
        let force = self.compute(pair);
        (force, -force)
    }
}

/// The force law a simulation runs with, chosen from its configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForceModel {
    /// Exact law, see [`NewtonianForce`].
    Newtonian {
        /// Gravitational constant.
        g: f64,
    },
    /// Softened law, see [`SoftenedForce`].
    Softened {
        /// Gravitational constant.
        g: f64,
        /// Softening length, in meters.
        epsilon: f64,
    },
}

impl ForceModel {
    /// Returns the exact law when `softening` is zero and the softened one otherwise.
    #[inline]
    pub fn new(g: f64, softening: f64) -> Self {
        if softening == 0.0 {
            Self::Newtonian { g }
        } else {
            Self::Softened {
                g,
                epsilon: softening,
            }
        }
    }

    /// Gravitational potential energy of the pair under this law, in joules.
    #[inline]
    pub fn potential<P1, P2>(&self, pair: Between<&P1, &P2>) -> f64
    where
        P1: Particle + ?Sized,
        P2: Particle + ?Sized,
    {
        match *self {
            Self::Newtonian { g } => NewtonianForce::new(g).potential(pair),
            Self::Softened { g, epsilon } => SoftenedForce::new(g, epsilon).potential(pair),
        }
    }
}

impl<P1, P2> Interaction<Between<&P1, &P2>> for ForceModel
where
    P1: Particle + ?Sized,
    P2: Particle + ?Sized,
{
    type Output = DVec2;

    #[inline]
    fn compute(&mut self, pair: Between<&P1, &P2>) -> DVec2 {
        match *self {
            Self::Newtonian { g } => NewtonianForce::new(g).compute(pair),
            Self::Softened { g, epsilon } => SoftenedForce::new(g, epsilon).compute(pair),
        }
    }
}

impl<P> InteractionPair<&P> for ForceModel
where
    P: Particle + ?Sized,
{
    type Output = DVec2;

    #[inline]
    fn compute_pair(&mut self, pair: Between<&P, &P>) -> (DVec2, DVec2) {
        let force = self.compute(pair);
        (force, -force)
    }
}
