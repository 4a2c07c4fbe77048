use serde::{Deserialize, Serialize};

use crate::{
    compute_method::Algorithm, gravity::GRAVITATIONAL_CONSTANT, integrator::IntegratorKind,
    trail::TrailConfig, Error, Result,
};

/// Parameters of a [`Simulation`](crate::Simulation).
///
/// Physical constants are part of the configuration rather than process-wide values, so
/// simulations using different unit conventions can run side by side. Every field has a default,
/// which makes the configuration convenient to load from a partial file.
///
/// ```
/// # use orbital::prelude::*;
/// let config = SimulationConfig::default()
///     .with_time_step(60.0)
///     .with_integrator(IntegratorKind::Rk4)
///     .with_trail(TrailConfig::every(60).with_capacity(1000));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.gravitational_constant, 6.67408e-11);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational constant, in the unit system of the bodies.
    pub gravitational_constant: f64,
    /// Simulated time per tick.
    pub time_step: f64,
    /// Integration scheme used for every body.
    pub integrator: IntegratorKind,
    /// Force accumulation algorithm.
    pub algorithm: Algorithm,
    /// Softening length. Zero selects the exact force law.
    pub softening: f64,
    /// Trail sampling. `None` disables it.
    pub trail: Option<TrailConfig>,
}

impl Default for SimulationConfig {
    #[inline]
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            time_step: 1.0,
            integrator: IntegratorKind::default(),
            algorithm: Algorithm::default(),
            softening: 0.0,
            trail: None,
        }
    }
}

impl SimulationConfig {
    /// Returns the same configuration with the given gravitational constant.
    #[inline]
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Returns the same configuration with the given time step.
    #[inline]
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Returns the same configuration with the given integration scheme.
    #[inline]
    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    /// Returns the same configuration with the given force accumulation algorithm.
    #[inline]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Returns the same configuration with the given softening length.
    #[inline]
    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening = softening;
        self
    }

    /// Returns the same configuration with trail sampling enabled.
    #[inline]
    pub fn with_trail(mut self, trail: TrailConfig) -> Self {
        self.trail = Some(trail);
        self
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the time step or the gravitational constant are not positive and
    /// finite, if the softening is negative or not finite, or if the trail configuration is
    /// invalid.
    pub fn validate(&self) -> Result<()> {
        validate_time_step(self.time_step)?;

        let g = self.gravitational_constant;
        if !(g.is_finite() && g > 0.0) {
            return Err(Error::InvalidGravitationalConstant(g));
        }

        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(Error::InvalidSoftening(self.softening));
        }

        match &self.trail {
            Some(trail) => trail.validate(),
            None => Ok(()),
        }
    }
}

#[inline]
pub(crate) fn validate_time_step(dt: f64) -> Result<()> {
    match dt.is_finite() && dt > 0.0 {
        true => Ok(()),
        false => Err(Error::InvalidTimeStep(dt)),
    }
}
