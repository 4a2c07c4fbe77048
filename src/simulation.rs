use glam::DVec2;
use tracing::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};

use crate::{
    body::{Body, BodyDescriptor, Color},
    config::{validate_time_step, SimulationConfig},
    gravity::ForceModel,
    integrator::advance_body,
    trail::Trail,
    Between, Error, Result,
};

/// Display readback of a body between two ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot<'a> {
    /// Display name.
    pub name: &'a str,
    /// Display color.
    pub color: Color,
    /// Position, in meters.
    pub position: DVec2,
    /// Radius, in meters.
    pub radius: f64,
    /// Sampled display positions, oldest first.
    pub trail: Option<&'a Trail>,
}

/// An N-body gravitational simulation advancing a fixed set of bodies tick by tick.
///
/// Each tick runs in two phases:
/// 1. the net force on every body is accumulated from the positions of all bodies as they were
///    at the start of the tick, then stored on the bodies;
/// 2. every body is integrated with its own force.
///
/// The second phase never starts before the first one is complete for the whole set, so the
/// result does not depend on the order in which bodies are updated.
///
/// ```
/// # use orbital::prelude::*;
/// let earth = BodyDescriptor::new("Earth", [0.0, 0.0], 5.974e24, 6378.1e3);
/// let moon = BodyDescriptor::new("Moon", [0.4055e9, 0.0], 7.346e22, 1738.1e3)
///     .with_velocity([0.0, -970.0]);
///
/// let mut simulation = Simulation::from_descriptors([earth, moon], SimulationConfig::default())?;
/// simulation.run(3600);
///
/// assert_eq!(simulation.tick(), 3600);
/// assert!(simulation.bodies()[1].position().y < 0.0);
/// # Ok::<(), orbital::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    config: SimulationConfig,
    force_model: ForceModel,
    tick: u64,
    elapsed: f64,
    diverged: Vec<bool>,
}

impl Simulation {
    /// Creates a new [`Simulation`] owning the given bodies.
    ///
    /// When the configuration enables trails, bodies that do not already record one get an
    /// empty [`Trail`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or if there is no body.
    pub fn new(bodies: impl IntoIterator<Item = Body>, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut bodies: Vec<_> = bodies.into_iter().collect();
        if bodies.is_empty() {
            return Err(Error::EmptyBodySet);
        }

        if let Some(trail) = &config.trail {
            for body in bodies.iter_mut().filter(|body| body.trail().is_none()) {
                body.attach_trail(Trail::new(trail.capacity));
            }
        }

        let force_model = ForceModel::new(config.gravitational_constant, config.softening);

        debug!(
            bodies = bodies.len(),
            integrator = ?config.integrator,
            algorithm = ?config.algorithm,
            time_step = config.time_step,
            g = config.gravitational_constant,
            softening = config.softening,
            "created simulation"
        );

        Ok(Self {
            diverged: vec![false; bodies.len()],
            bodies,
            config,
            force_model,
            tick: 0,
            elapsed: 0.0,
        })
    }

    /// Creates a new [`Simulation`] from the initial states of its bodies.
    ///
    /// # Errors
    ///
    /// Returns an error if a descriptor describes an invalid body, if the configuration is
    /// invalid or if there is no descriptor.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = BodyDescriptor>,
        config: SimulationConfig,
    ) -> Result<Self> {
        let bodies = descriptors
            .into_iter()
            .map(Body::try_from)
            .collect::<Result<Vec<_>>>()?;

        Self::new(bodies, config)
    }

    /// Advances every body by one tick of the configured time step.
    #[inline]
    pub fn step(&mut self) {
        self.advance(self.config.time_step);
    }

    /// Advances every body by one tick of `dt` instead of the configured time step.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the simulation untouched, if `dt` is not positive and finite.
    pub fn step_by(&mut self, dt: f64) -> Result<()> {
        validate_time_step(dt)?;
        self.advance(dt);

        Ok(())
    }

    /// Runs `ticks` ticks of the configured time step.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }

        debug!(ticks, tick = self.tick, elapsed = self.elapsed, "run complete");
    }

    /// Runs as many whole ticks as fit in `duration` seconds of simulated time and returns how
    /// many were run.
    pub fn run_for(&mut self, duration: f64) -> u64 {
        let ticks = (duration / self.config.time_step).floor();
        let ticks = if ticks.is_finite() && ticks > 0.0 {
            ticks as u64
        } else {
            0
        };

        self.run(ticks);
        ticks
    }

    fn advance(&mut self, dt: f64) {
        let forces = self
            .config
            .algorithm
            .accumulate(&self.bodies, self.force_model);

        for (body, force) in self.bodies.iter_mut().zip(forces) {
            body.reset_force();
            body.add_force(force);
        }

        self.integrate(dt);

        self.tick += 1;
        self.elapsed += dt;

        self.sample_trails();
        self.check_divergence();

        trace!(tick = self.tick, elapsed = self.elapsed, "tick");
    }

    #[cfg(not(feature = "parallel"))]
    fn integrate(&mut self, dt: f64) {
        let integrator = self.config.integrator;
        for body in self.bodies.iter_mut() {
            advance_body(&integrator, body, dt);
        }
    }

    #[cfg(feature = "parallel")]
    fn integrate(&mut self, dt: f64) {
        use crate::compute_method::Algorithm;

        let integrator = self.config.integrator;
        match self.config.algorithm {
            Algorithm::ParallelBruteForce => self
                .bodies
                .par_iter_mut()
                .for_each(|body| advance_body(&integrator, body, dt)),
            _ => {
                for body in self.bodies.iter_mut() {
                    advance_body(&integrator, body, dt);
                }
            }
        }
    }

    fn sample_trails(&mut self) {
        let config = self.config.trail.unwrap_or_default();

        if !config.samples(self.tick) {
            return;
        }

        for body in self.bodies.iter_mut() {
            let point = config.projection.project(body.position());
            if let Some(trail) = body.trail_mut() {
                trail.push(point);
            }
        }
    }

    fn check_divergence(&mut self) {
        for (body, diverged) in self.bodies.iter().zip(self.diverged.iter_mut()) {
            if !*diverged && !body.is_finite() {
                *diverged = true;
                warn!(
                    body = body.name(),
                    tick = self.tick,
                    "body state is no longer finite, bodies may be coincident"
                );
            }
        }
    }

    /// The bodies, in the order they were given.
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// The body at `index`, if any.
    #[inline]
    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Number of bodies.
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always `false`: a simulation cannot be created without bodies.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// What a renderer needs to draw each body, in body order.
    pub fn snapshots(&self) -> impl ExactSizeIterator<Item = BodySnapshot<'_>> {
        self.bodies.iter().map(|body| BodySnapshot {
            name: body.name(),
            color: body.color(),
            position: body.position(),
            radius: body.radius(),
            trail: body.trail(),
        })
    }

    /// Removes every recorded trail point.
    pub fn clear_trails(&mut self) {
        for trail in self.bodies.iter_mut().filter_map(Body::trail_mut) {
            trail.clear();
        }
    }

    /// The configuration this simulation runs with.
    #[inline]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The force law derived from the configuration.
    #[inline]
    pub const fn force_model(&self) -> ForceModel {
        self.force_model
    }

    /// Number of ticks run so far.
    #[inline]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated time elapsed so far, in seconds.
    #[inline]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Sum of the masses of the bodies.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    /// Mass-weighted mean position of the bodies.
    pub fn centre_of_mass(&self) -> DVec2 {
        let weighted = self
            .bodies
            .iter()
            .fold(DVec2::ZERO, |sum, body| sum + body.position() * body.mass());

        weighted / self.total_mass()
    }

    /// Total linear momentum of the system.
    pub fn total_momentum(&self) -> DVec2 {
        self.bodies
            .iter()
            .fold(DVec2::ZERO, |sum, body| sum + body.momentum())
    }

    /// Total kinetic energy of the system, in joules.
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Total gravitational potential energy of the system under its force law, in joules.
    pub fn potential_energy(&self) -> f64 {
        let mut potential = 0.0;

        for (i, p1) in self.bodies.iter().enumerate() {
            for p2 in &self.bodies[i + 1..] {
                potential += self.force_model.potential(Between(p1, p2));
            }
        }

        potential
    }

    /// Kinetic plus potential energy, in joules.
    #[inline]
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}
