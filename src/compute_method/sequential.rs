use glam::DVec2;

use super::{ComputeMethod, InteractionPair};
use crate::{Between, Interaction};

/// Trait to accumulate forces over a slice of particles using the sequential algorithms.
pub trait SequentialCompute<P> {
    /// Returns the net force on each particle using a brute-force algorithm.
    ///
    /// Refer to [`BruteForce`] for more information.
    fn brute_force<T>(self, interaction: T) -> Vec<DVec2>
    where
        BruteForce<T>: ComputeMethod<P>;

    /// Returns the net force on each particle using a brute-force algorithm, only performing the
    /// computation over the combination of pairs.
    ///
    /// Refer to [`BruteForcePairs`] for more information.
    fn brute_force_pairs<T>(self, interaction: T) -> Vec<DVec2>
    where
        BruteForcePairs<T>: ComputeMethod<P>;
}

impl<P> SequentialCompute<P> for &[P] {
    #[inline]
    fn brute_force<T>(self, interaction: T) -> Vec<DVec2>
    where
        BruteForce<T>: ComputeMethod<P>,
    {
        BruteForce(interaction).compute(self)
    }

    #[inline]
    fn brute_force_pairs<T>(self, interaction: T) -> Vec<DVec2>
    where
        BruteForcePairs<T>: ComputeMethod<P>,
    {
        BruteForcePairs(interaction).compute(self)
    }
}

/// Brute-force algorithm using one CPU thread.
///
/// Every ordered pair `(i, j)` with `i != j` is evaluated, so the interaction runs `n · (n - 1)`
/// times. The force on particle `i` is summed over `j` in slice order.
///
/// ```
/// # use orbital::prelude::*;
/// # use glam::DVec2;
/// let particles = [(DVec2::Y, 1.0), (DVec2::ZERO, 1.0)];
/// let forces = particles.as_slice().brute_force(NewtonianForce::new(1.0));
///
/// assert_eq!(forces, vec![DVec2::NEG_Y, DVec2::Y]);
/// ```
#[derive(Clone, Copy, Default, Debug)]
pub struct BruteForce<T>(pub T);

impl<P, T> ComputeMethod<P> for BruteForce<T>
where
    T: for<'a> Interaction<Between<&'a P, &'a P>, Output = DVec2>,
{
    #[inline]
    fn compute(&mut self, particles: &[P]) -> Vec<DVec2> {
        particles
            .iter()
            .enumerate()
            .map(|(i, affected)| {
                particles
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(DVec2::ZERO, |force, (_, affecting)| {
                        force + self.0.compute(Between(affected, affecting))
                    })
            })
            .collect()
    }
}

/// Brute-force algorithm using one CPU thread that evaluates each unordered pair once.
///
/// The interaction is computed for every pair `(i, j)` with `i < j` and its two results are
/// applied to both particles, which halves the work compared to [`BruteForce`]. The net forces
/// match those of [`BruteForce`] up to floating-point summation order.
///
/// To use particles `P` with this algorithm, the interaction `T` should implement
/// [`InteractionPair<&P>`].
#[derive(Clone, Copy, Default, Debug)]
pub struct BruteForcePairs<T>(pub T);

impl<P, T> ComputeMethod<P> for BruteForcePairs<T>
where
    T: for<'a> InteractionPair<&'a P, Output = DVec2>,
{
    #[inline]
    fn compute(&mut self, particles: &[P]) -> Vec<DVec2> {
        let len = particles.len();
        let mut forces = vec![DVec2::ZERO; len];

        for i in 0..len {
            let mut force_i = DVec2::ZERO;

            for j in (i + 1)..len {
                let (on_i, on_j) = self.0.compute_pair(Between(&particles[i], &particles[j]));

                force_i += on_i;
                forces[j] += on_j;
            }

            forces[i] += force_i;
        }

        forces
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests;
    use super::*;
    use crate::gravity::NewtonianForce;

    #[test]
    fn brute_force() {
        tests::force_computation(BruteForce(NewtonianForce::default()));
        tests::single_particle(BruteForce(NewtonianForce::default()));
        tests::coincident_particles(BruteForce(NewtonianForce::default()));
    }

    #[test]
    fn brute_force_pairs() {
        tests::force_computation(BruteForcePairs(NewtonianForce::default()));
        tests::single_particle(BruteForcePairs(NewtonianForce::default()));
        tests::coincident_particles(BruteForcePairs(NewtonianForce::default()));
    }

    #[test]
    fn empty_set() {
        let particles: [(DVec2, f64); 0] = [];

        assert!(particles.as_slice().brute_force(NewtonianForce::default()).is_empty());
        assert!(particles
            .as_slice()
            .brute_force_pairs(NewtonianForce::default())
            .is_empty());
    }

    #[test]
    fn two_body_forces_cancel() {
        let particles = tests::random_particles(2, 11);

        let forces = particles.as_slice().brute_force(NewtonianForce::default());
        assert_eq!(forces[0], -forces[1]);

        let forces = particles.as_slice().brute_force_pairs(NewtonianForce::default());
        assert_eq!(forces[0], -forces[1]);
    }
}
