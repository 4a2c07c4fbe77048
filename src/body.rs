use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{particle::Particle, trail::Trail, vector::Vector, Error, Result};

/// RGBA color of a body, only used for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "Color::opaque")]
    pub a: u8,
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    #[allow(missing_docs)]
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    #[allow(missing_docs)]
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    #[allow(missing_docs)]
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    #[allow(missing_docs)]
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Creates a new opaque [`Color`].
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a new [`Color`] with the given alpha channel.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    const fn opaque() -> u8 {
        255
    }
}

/// Initial state of a body, as supplied by whatever loads a scenario.
///
/// All quantities are in SI units. A descriptor is not validated until it is turned into a
/// [`Body`].
///
/// ```
/// # use orbital::prelude::*;
/// let moon = BodyDescriptor::new("Moon", [0.4055e9, 0.0], 7.346e22, 1738.1e3)
///     .with_velocity([0.0, -970.0])
///     .with_color(Color::WHITE);
///
/// let body = Body::try_from(moon).unwrap();
/// assert_eq!(body.name(), "Moon");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Display name.
    pub name: String,
    /// Display color.
    #[serde(default)]
    pub color: Color,
    /// Position on the x axis, in meters.
    pub x: f64,
    /// Position on the y axis, in meters.
    pub y: f64,
    /// Mass, in kilograms.
    pub mass: f64,
    /// Radius, in meters.
    #[serde(default)]
    pub radius: f64,
    /// Velocity along the x axis, in meters per second.
    #[serde(default)]
    pub vx: f64,
    /// Velocity along the y axis, in meters per second.
    #[serde(default)]
    pub vy: f64,
}

impl BodyDescriptor {
    /// Creates a new [`BodyDescriptor`] at rest with a white color.
    #[inline]
    pub fn new(name: impl Into<String>, position: impl Vector, mass: f64, radius: f64) -> Self {
        let position = position.into_internal();

        Self {
            name: name.into(),
            color: Color::default(),
            x: position.x,
            y: position.y,
            mass,
            radius,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Returns the same descriptor with the given initial velocity.
    #[inline]
    pub fn with_velocity(mut self, velocity: impl Vector) -> Self {
        let velocity = velocity.into_internal();
        self.vx = velocity.x;
        self.vy = velocity.y;
        self
    }

    /// Returns the same descriptor with the given color.
    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A point-mass with its kinematic state.
///
/// A [`Body`] can only be created through [`Body::new`] or from a [`BodyDescriptor`], both of
/// which reject a non-positive mass, a negative radius and non-finite values. Its position and
/// velocity are then only changed by integration, and its force only by accumulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    name: String,
    color: Color,
    position: DVec2,
    velocity: DVec2,
    mass: f64,
    radius: f64,
    force: DVec2,
    trail: Option<Trail>,
}

impl Body {
    /// Creates a new [`Body`] at rest.
    ///
    /// # Errors
    ///
    /// Returns an error if `mass` is not strictly positive, if `radius` is negative or if any of
    /// the values is not finite.
    pub fn new(
        name: impl Into<String>,
        position: impl Vector,
        mass: f64,
        radius: f64,
    ) -> Result<Self> {
        let name = name.into();
        let position = position.into_internal();

        let finite = |quantity, valid: bool| match valid {
            true => Ok(()),
            false => Err(Error::NonFinite {
                name: name.clone(),
                quantity,
            }),
        };
        finite("position", position.is_finite())?;
        finite("mass", mass.is_finite())?;
        finite("radius", radius.is_finite())?;

        if mass <= 0.0 {
            return Err(Error::NonPositiveMass { name, mass });
        }

        if radius < 0.0 {
            return Err(Error::NegativeRadius { name, radius });
        }

        Ok(Self {
            name,
            color: Color::default(),
            position,
            velocity: DVec2::ZERO,
            mass,
            radius,
            force: DVec2::ZERO,
            trail: None,
        })
    }

    /// Returns the same body with the given initial velocity.
    ///
    /// # Errors
    ///
    /// Returns an error if the velocity is not finite.
    pub fn with_velocity(mut self, velocity: impl Vector) -> Result<Self> {
        let velocity = velocity.into_internal();
        if !velocity.is_finite() {
            return Err(Error::NonFinite {
                name: self.name,
                quantity: "velocity",
            });
        }

        self.velocity = velocity;
        Ok(self)
    }

    /// Returns the same body with the given color.
    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Returns the same body recording its display positions in the given [`Trail`].
    ///
    /// Inside a [`Simulation`](crate::Simulation), the trail is sampled with the configured
    /// [`TrailConfig`](crate::trail::TrailConfig), or on every tick without projection when the
    /// configuration has none.
    #[inline]
    pub fn with_trail(mut self, trail: Trail) -> Self {
        self.attach_trail(trail);
        self
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display color.
    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Position, in meters.
    #[inline]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Position converted to an arbitrary [`Vector`] type.
    #[inline]
    pub fn position_as<V: Vector>(&self) -> V {
        V::from_internal(self.position)
    }

    /// Velocity, in meters per second.
    #[inline]
    pub const fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Mass, in kilograms.
    #[inline]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Radius, in meters.
    #[inline]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius in display units for the given scale.
    #[inline]
    pub fn display_radius(&self, scale: f64) -> f64 {
        self.radius * scale
    }

    /// Net force accumulated during the last tick, in newtons.
    #[inline]
    pub const fn force(&self) -> DVec2 {
        self.force
    }

    /// Display history, if this body records one.
    #[inline]
    pub const fn trail(&self) -> Option<&Trail> {
        self.trail.as_ref()
    }

    /// Linear momentum, in kilogram meters per second.
    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    /// Kinetic energy, in joules.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Returns `true` if both the position and the velocity are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Sets the accumulated force back to zero.
    #[inline]
    pub fn reset_force(&mut self) {
        self.force = DVec2::ZERO;
    }

    /// Adds a contribution to the accumulated force.
    #[inline]
    pub(crate) fn add_force(&mut self, force: DVec2) {
        self.force += force;
    }

    /// Changes the velocity by `delta_v` then moves the body with its updated velocity for `dt`
    /// seconds.
    #[inline]
    pub(crate) fn advance(&mut self, delta_v: DVec2, dt: f64) {
        self.velocity += delta_v;
        self.position += self.velocity * dt;
    }

    #[inline]
    pub(crate) fn attach_trail(&mut self, trail: Trail) {
        self.trail = Some(trail);
    }

    #[inline]
    pub(crate) fn trail_mut(&mut self) -> Option<&mut Trail> {
        self.trail.as_mut()
    }
}

impl TryFrom<BodyDescriptor> for Body {
    type Error = Error;

    #[inline]
    fn try_from(descriptor: BodyDescriptor) -> Result<Self> {
        Ok(Body::new(
            descriptor.name,
            [descriptor.x, descriptor.y],
            descriptor.mass,
            descriptor.radius,
        )?
        .with_velocity([descriptor.vx, descriptor.vy])?
        .with_color(descriptor.color))
    }
}

impl Particle for Body {
    #[inline]
    fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    fn mass(&self) -> f64 {
        self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> Body {
        Body::new("Earth", [0.0, 0.0], 5.974e24, 6378.1e3).unwrap()
    }

    #[test]
    fn rejects_non_positive_mass() {
        assert_eq!(
            Body::new("dust", [0.0, 0.0], 0.0, 1.0),
            Err(Error::NonPositiveMass {
                name: "dust".to_string(),
                mass: 0.0
            })
        );
        assert!(Body::new("dust", [0.0, 0.0], -1.0, 1.0).is_err());
    }

    #[test]
    fn rejects_negative_radius() {
        assert_eq!(
            Body::new("dust", [0.0, 0.0], 1.0, -1.0),
            Err(Error::NegativeRadius {
                name: "dust".to_string(),
                radius: -1.0
            })
        );
        assert!(Body::new("point", [0.0, 0.0], 1.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(matches!(
            Body::new("nan", [f64::NAN, 0.0], 1.0, 0.0),
            Err(Error::NonFinite { quantity: "position", .. })
        ));
        assert!(matches!(
            Body::new("inf", [0.0, 0.0], f64::INFINITY, 0.0),
            Err(Error::NonFinite { quantity: "mass", .. })
        ));
        assert!(matches!(
            earth().with_velocity([0.0, f64::INFINITY]),
            Err(Error::NonFinite { quantity: "velocity", .. })
        ));
    }

    #[test]
    fn descriptor_conversion() {
        let descriptor = BodyDescriptor::new("Moon", (0.4055e9, 0.0), 7.346e22, 1738.1e3)
            .with_velocity(DVec2::new(0.0, -970.0))
            .with_color(Color::rgba(200, 200, 200, 128));

        let moon = Body::try_from(descriptor).unwrap();

        assert_eq!(moon.name(), "Moon");
        assert_eq!(moon.position(), DVec2::new(0.4055e9, 0.0));
        assert_eq!(moon.velocity(), DVec2::new(0.0, -970.0));
        assert_eq!(moon.color(), Color::rgba(200, 200, 200, 128));
        assert_eq!(moon.force(), DVec2::ZERO);
        assert!(moon.trail().is_none());
        assert_eq!(moon.position_as::<[f64; 2]>(), [0.4055e9, 0.0]);
    }

    #[test]
    fn invalid_descriptor_is_rejected() {
        let descriptor = BodyDescriptor::new("ghost", [0.0, 0.0], 0.0, 0.0);

        assert!(Body::try_from(descriptor).is_err());
    }

    #[test]
    fn reset_force_is_idempotent() {
        let contribution = DVec2::new(1.0e20, -3.0e19);

        let mut fresh = earth();
        fresh.add_force(contribution);

        let mut reset_twice = earth();
        reset_twice.add_force(DVec2::new(5.0, 5.0));
        reset_twice.reset_force();
        reset_twice.reset_force();
        reset_twice.add_force(contribution);

        assert_eq!(fresh.force(), reset_twice.force());
    }

    #[test]
    fn advance_uses_updated_velocity() {
        let mut body = earth().with_velocity([1.0, 0.0]).unwrap();
        body.advance(DVec2::new(1.0, 2.0), 2.0);

        assert_eq!(body.velocity(), DVec2::new(2.0, 2.0));
        assert_eq!(body.position(), DVec2::new(4.0, 4.0));
    }

    #[test]
    fn momentum_and_energy() {
        let body = Body::new("probe", [0.0, 0.0], 2.0, 0.0)
            .unwrap()
            .with_velocity([3.0, 4.0])
            .unwrap();

        assert_eq!(body.momentum(), DVec2::new(6.0, 8.0));
        assert_eq!(body.kinetic_energy(), 25.0);
        assert_eq!(body.display_radius(0.5), 0.0);
    }
}
