use glam::DVec2;
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use super::ComputeMethod;
use crate::{Between, Interaction};

/// Trait to accumulate forces over a slice of particles using the parallel algorithms.
pub trait ParallelCompute<P> {
    /// Returns the net force on each particle using a parallel brute-force algorithm.
    ///
    /// Refer to [`BruteForce`] for more information.
    fn par_brute_force<T>(self, interaction: T) -> Vec<DVec2>
    where
        BruteForce<T>: ComputeMethod<P>;
}

impl<P> ParallelCompute<P> for &[P] {
    #[inline]
    fn par_brute_force<T>(self, interaction: T) -> Vec<DVec2>
    where
        BruteForce<T>: ComputeMethod<P>,
    {
        BruteForce(interaction).compute(self)
    }
}

/// Brute-force algorithm using multiple CPU threads with
/// [rayon](https://github.com/rayon-rs/rayon).
///
/// The net force of each particle only depends on the positions of the others, which are not
/// modified during the computation, so particles are distributed over threads and each thread
/// sums over every other particle in slice order. The result is identical to that of
/// [`sequential::BruteForce`](super::sequential::BruteForce).
#[derive(Clone, Copy, Default, Debug)]
pub struct BruteForce<T>(pub T);

impl<P, T> ComputeMethod<P> for BruteForce<T>
where
    P: Sync,
    T: for<'a> Interaction<Between<&'a P, &'a P>, Output = DVec2> + Clone + Send + Sync,
{
    #[inline]
    fn compute(&mut self, particles: &[P]) -> Vec<DVec2> {
        particles
            .par_iter()
            .enumerate()
            .map_with(self.0.clone(), |interaction, (i, affected)| {
                particles
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .fold(DVec2::ZERO, |force, (_, affecting)| {
                        force + interaction.compute(Between(affected, affecting))
                    })
            })
            .collect()
    }
}
