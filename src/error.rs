use thiserror::Error;

/// Errors reported when a body, a configuration or a simulation is built from invalid input.
///
/// Degenerate runtime states, such as two bodies sharing a position under the exact force law,
/// are not errors: they produce non-finite values which the [`Simulation`](crate::Simulation)
/// reports through `tracing` instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A body was given a mass that is zero or negative.
    #[error("body `{name}` has a non-positive mass ({mass} kg)")]
    NonPositiveMass {
        /// Name of the offending body.
        name: String,
        /// The rejected mass.
        mass: f64,
    },

    /// A body was given a negative radius.
    #[error("body `{name}` has a negative radius ({radius} m)")]
    NegativeRadius {
        /// Name of the offending body.
        name: String,
        /// The rejected radius.
        radius: f64,
    },

    /// A physical quantity of a body is NaN or infinite.
    #[error("body `{name}` has a non-finite {quantity}")]
    NonFinite {
        /// Name of the offending body.
        name: String,
        /// The quantity that is not finite.
        quantity: &'static str,
    },

    /// A simulation was created without any body.
    #[error("a simulation needs at least one body")]
    EmptyBodySet,

    /// The time step is zero, negative or not finite.
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    /// The gravitational constant is zero, negative or not finite.
    #[error("gravitational constant must be positive and finite, got {0}")]
    InvalidGravitationalConstant(f64),

    /// The softening length is negative or not finite.
    #[error("softening length must be non-negative and finite, got {0}")]
    InvalidSoftening(f64),

    /// Trail sampling was configured to happen every zero ticks.
    #[error("trail cadence must be at least one tick")]
    ZeroTrailCadence,

    /// The display projection scale is zero, negative or not finite.
    #[error("projection scale must be positive and finite, got {0}")]
    InvalidProjectionScale(f64),
}

/// Result type used throughout [`orbital`](crate).
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_body() {
        let error = Error::NonPositiveMass {
            name: "moon".to_string(),
            mass: 0.0,
        };

        assert_eq!(error.to_string(), "body `moon` has a non-positive mass (0 kg)");
    }

    #[test]
    fn time_step_message() {
        assert_eq!(
            Error::InvalidTimeStep(-1.0).to_string(),
            "time step must be positive and finite, got -1"
        );
    }
}
