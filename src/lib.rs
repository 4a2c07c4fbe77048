#![warn(missing_docs)]
//! # Orbital
//!
//! Orbital is a crate providing an exact N-body gravitational simulation of point-masses in two
//! dimensions.
//!
//! ## Goals
//!
//! The main goal of this crate is to advance a small set of celestial bodies, such as the Earth and
//! the Moon, with every pairwise Newtonian force computed exactly at each tick. Nothing is
//! approximated: every body interacts with every other body, so a tick costs `O(n²)` force
//! evaluations. Rendering and windowing are left to the caller, which reads back positions,
//! radii, colors and trails between ticks.
//!
//! ### Ticks
//!
//! A [`Simulation`] advances its bodies in two phases. The net force on every body is first
//! accumulated from the positions all bodies had at the start of the tick, then every body is
//! integrated with the force it received. No position changes while forces are being computed,
//! which makes the result independent of the order in which bodies are stored or updated.
//!
//! The force accumulation algorithm and the integration scheme are both selected by the
//! [`SimulationConfig`]. Orbital uses [rayon](https://github.com/rayon-rs/rayon) for
//! parallelization. Enable the `parallel` feature to access the relevant algorithm.
//!
//! ## Using Orbital
//!
//! ### Getting started
//!
//! Bodies are described by their initial state in SI units, then handed over to a
//! [`Simulation`] that owns them.
//!
//! ```
//! use orbital::prelude::*;
//!
//! let earth = BodyDescriptor::new("Earth", [0.0, 0.0], 5.974e24, 6378.1e3)
//!     .with_color(Color::BLUE);
//! let moon = BodyDescriptor::new("Moon", [0.4055e9, 0.0], 7.346e22, 1738.1e3)
//!     .with_velocity([0.0, -970.0]);
//!
//! let config = SimulationConfig::default()
//!     .with_integrator(IntegratorKind::Euler)
//!     .with_trail(TrailConfig::every(100));
//!
//! let mut simulation = Simulation::from_descriptors([earth, moon], config)?;
//! simulation.run(1000);
//!
//! for body in simulation.snapshots() {
//!     println!("{} at {:?}", body.name, body.position);
//! }
//!
//! assert_eq!(simulation.elapsed(), 1000.0);
//! assert_eq!(simulation.bodies()[0].trail().map(Trail::len), Some(10));
//! # Ok::<(), orbital::Error>(())
//! ```
//!
//! ### Computing forces without a simulation
//!
//! The [`Particle`](particle::Particle) trait provides the position and mass of a particle.
//! Implementing it for a type allows it to be used with all available algorithms for
//! accumulating forces. It is already implemented for [`Body`] and for tuples of a position and a
//! mass.
//!
//! ```
//! use orbital::prelude::*;
//! use glam::DVec2;
//!
//! let particles = [
//!     (DVec2::new(0.0, 0.0), 2.0),
//!     (DVec2::new(1.0, 0.0), 1.0),
//!     (DVec2::new(0.0, 3.0), 4.0),
//! ];
//!
//! let forces = particles.as_slice().brute_force(NewtonianForce::new(1.0));
//!
//! let mut gravity = NewtonianForce::new(1.0);
//! let a_b = gravity.compute(Between(&particles[0], &particles[1]));
//! let a_c = gravity.compute(Between(&particles[0], &particles[2]));
//! let b_c = gravity.compute(Between(&particles[1], &particles[2]));
//!
//! assert_eq!(forces[0], a_b + a_c);
//! assert_eq!(forces[1], -a_b + b_c);
//! assert_eq!(forces[2], -a_c - b_c);
//! ```

/// Descriptions and kinematic state of the simulated bodies.
pub mod body;
/// Algorithms accumulating the net force on every particle of a set.
pub mod compute_method;
/// Configuration of a simulation.
pub mod config;
/// Errors returned when setting up or driving a simulation.
pub mod error;
/// Gravitational force laws.
pub mod gravity;
/// Numerical integration schemes.
pub mod integrator;
/// Trait for the position and mass of a particle.
pub mod particle;
/// Simulation orchestration.
pub mod simulation;
/// Sampled display history of bodies.
pub mod trail;
/// Conversion between vector types and the internal representation.
pub mod vector;

pub use body::{Body, BodyDescriptor, Color};
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use simulation::{BodySnapshot, Simulation};

/// Represents a pair of particles between which an interaction is computed.
///
/// The first particle is the one being affected by the second particle.
#[derive(Clone, Copy, Debug)]
pub struct Between<S1, S2>(pub S1, pub S2);

/// Trait to compute an interaction between particles.
///
/// This is how force laws are defined. Implementing
/// [`Interaction<Between<&YourParticle, &YourParticle>>`] with a [`DVec2`](glam::DVec2) output
/// for `YourInteraction` allows it to be used with the brute-force algorithms of
/// [`compute_method`].
///
/// # Example
///
/// ```
/// # use orbital::prelude::*;
/// use glam::DVec2;
///
/// #[derive(Clone)]
/// struct Spring(pub f64);
///
/// impl Interaction<Between<&(DVec2, f64), &(DVec2, f64)>> for Spring {
///     type Output = DVec2;
///
///     fn compute(
///         &mut self,
///         Between(affected, affecting): Between<&(DVec2, f64), &(DVec2, f64)>,
///     ) -> DVec2 {
///         (affecting.position() - affected.position()) * self.0
///     }
/// }
///
/// let particles = [(DVec2::ZERO, 1.0), (DVec2::new(2.0, 0.0), 1.0)];
/// let forces = particles.as_slice().brute_force(Spring(0.5));
///
/// assert_eq!(forces, vec![DVec2::new(1.0, 0.0), DVec2::new(-1.0, 0.0)]);
/// ```
pub trait Interaction<Storage> {
    /// The computed interaction.
    type Output;

    /// Returns the interaction between the particles in the storage.
    fn compute(&mut self, storage: Storage) -> Self::Output;
}

/// Most commonly used items.
pub mod prelude {
    pub use crate::{
        body::{Body, BodyDescriptor, Color},
        compute_method::{
            sequential::{self, SequentialCompute},
            Algorithm, ComputeMethod, InteractionPair,
        },
        config::SimulationConfig,
        gravity::{ForceModel, NewtonianForce, SoftenedForce, GRAVITATIONAL_CONSTANT},
        integrator::{Integrator, IntegratorKind, RestrictedRk4, SemiImplicitEuler},
        particle::Particle,
        simulation::{BodySnapshot, Simulation},
        trail::{Projection, Trail, TrailConfig},
        vector::Vector,
        Between, Interaction,
    };

    #[cfg(feature = "parallel")]
    pub use crate::compute_method::parallel::{self, ParallelCompute};
}
