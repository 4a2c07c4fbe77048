use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{particle::Particle, Between, Interaction};

/// Algorithms accumulating forces using multiple CPU threads.
#[cfg(feature = "parallel")]
pub mod parallel;

/// Algorithms accumulating forces using one CPU thread.
pub mod sequential;

/// Trait for algorithms accumulating the net force every particle of a set receives from all the
/// others.
///
/// Implementations read the particles through an immutable slice and return a freshly allocated
/// vector with one net force per particle, in input order. A particle never acts on itself: the
/// pair made of a particle and itself is skipped based on its index in the slice, not on its
/// position.
///
/// # Example
///
/// ```
/// # use orbital::prelude::*;
/// # use glam::DVec2;
/// struct NoForce;
///
/// impl<P> ComputeMethod<P> for NoForce {
///     fn compute(&mut self, particles: &[P]) -> Vec<DVec2> {
///         vec![DVec2::ZERO; particles.len()]
///     }
/// }
/// ```
pub trait ComputeMethod<P> {
    /// Returns the net force exerted on each particle by all the other particles.
    fn compute(&mut self, particles: &[P]) -> Vec<DVec2>;
}

/// Trait to implement optimised pair computation of an interaction. Such implementations are
/// used by the [`BruteForcePairs`](sequential::BruteForcePairs) algorithm.
pub trait InteractionPair<P> {
    /// The computed interaction.
    type Output;

    /// Returns the computed interactions between two distinct particles, the first one being the
    /// interaction on the first particle.
    fn compute_pair(&mut self, pair: Between<P, P>) -> (Self::Output, Self::Output);
}

/// Force accumulation algorithm selected by a [`SimulationConfig`](crate::SimulationConfig).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Every ordered pair is evaluated, see [`sequential::BruteForce`].
    #[default]
    BruteForce,
    /// Every unordered pair is evaluated once, see [`sequential::BruteForcePairs`].
    BruteForcePairs,
    /// Every ordered pair is evaluated using multiple threads, see [`parallel::BruteForce`].
    #[cfg(feature = "parallel")]
    ParallelBruteForce,
}

impl Algorithm {
    /// Accumulates the forces between the particles with this algorithm and the given
    /// interaction.
    pub fn accumulate<P, T>(self, particles: &[P], interaction: T) -> Vec<DVec2>
    where
        P: Particle + Sync,
        T: for<'a> Interaction<Between<&'a P, &'a P>, Output = DVec2>
            + for<'a> InteractionPair<&'a P, Output = DVec2>
            + Clone
            + Send
            + Sync,
    {
        match self {
            Self::BruteForce => sequential::BruteForce(interaction).compute(particles),
            Self::BruteForcePairs => sequential::BruteForcePairs(interaction).compute(particles),
            #[cfg(feature = "parallel")]
            Self::ParallelBruteForce => parallel::BruteForce(interaction).compute(particles),
        }
    }
}
