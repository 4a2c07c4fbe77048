use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Mapping from simulation space (meters, y up) to display space.
///
/// A point is scaled, optionally mirrored on the y axis (screens usually grow downwards) and
/// then translated by `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Display units per meter.
    pub scale: f64,
    /// Translation applied after scaling, in display units.
    pub offset: DVec2,
    /// Whether the y axis is mirrored.
    pub flip_y: bool,
}

impl Default for Projection {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Projection {
    /// Projection leaving points unchanged.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: DVec2::ZERO,
        flip_y: false,
    };

    /// Creates a new [`Projection`] scaling points by `scale`.
    #[inline]
    pub const fn scaled(scale: f64) -> Self {
        Self {
            scale,
            offset: DVec2::ZERO,
            flip_y: false,
        }
    }

    /// Returns the same projection with the y axis mirrored.
    #[inline]
    pub const fn flipped(mut self) -> Self {
        self.flip_y = true;
        self
    }

    /// Returns the same projection translated by `offset` display units.
    #[inline]
    pub const fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    /// Checks that the scale is positive and finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::InvalidProjectionScale(self.scale));
        }

        Ok(())
    }

    /// Maps a position in meters to display space.
    #[inline]
    pub fn project(&self, position: DVec2) -> DVec2 {
        let mut projected = position * self.scale;
        if self.flip_y {
            projected.y = -projected.y;
        }

        projected + self.offset
    }
}

/// How often and where the positions of bodies are recorded for display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// A point is recorded every `cadence` ticks.
    pub cadence: u64,
    /// Maximum number of points kept per body. `None` keeps every point.
    pub capacity: Option<usize>,
    /// Projection applied to positions before they are recorded.
    pub projection: Projection,
}

impl Default for TrailConfig {
    #[inline]
    fn default() -> Self {
        Self {
            cadence: 1,
            capacity: None,
            projection: Projection::IDENTITY,
        }
    }
}

impl TrailConfig {
    /// Creates a new [`TrailConfig`] recording every `cadence` ticks.
    #[inline]
    pub fn every(cadence: u64) -> Self {
        Self {
            cadence,
            ..Default::default()
        }
    }

    /// Returns the same configuration keeping at most `capacity` points per body.
    #[inline]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Returns the same configuration using the given projection.
    #[inline]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Checks that the cadence is non-zero and that the projection is valid.
    pub fn validate(&self) -> Result<()> {
        if self.cadence == 0 {
            return Err(Error::ZeroTrailCadence);
        }

        self.projection.validate()
    }

    /// Returns `true` if a point should be recorded after the given tick.
    ///
    /// Ticks are counted from one, so the first point is recorded after `cadence` ticks.
    #[inline]
    pub fn samples(&self, tick: u64) -> bool {
        self.cadence != 0 && tick % self.cadence == 0
    }
}

/// Ordered history of the display positions of a body, oldest first.
///
/// When the trail has a capacity, recording a point past it drops the oldest one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: Option<usize>,
}

impl Trail {
    /// Creates an empty [`Trail`] keeping at most `capacity` points.
    #[inline]
    pub fn new(capacity: Option<usize>) -> Self {
        let points = match capacity {
            Some(capacity) => VecDeque::with_capacity(capacity),
            None => VecDeque::new(),
        };

        Self { points, capacity }
    }

    /// Records a new point.
    pub fn push(&mut self, point: DVec2) {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }

            while self.points.len() >= capacity {
                self.points.pop_front();
            }
        }

        self.points.push_back(point);
    }

    /// Iterates over the recorded points, oldest first.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DVec2> + ExactSizeIterator {
        self.points.iter()
    }

    /// Returns the most recent point.
    #[inline]
    pub fn last(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    /// Number of recorded points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no point has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points kept, if bounded.
    #[inline]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Removes every recorded point.
    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<'a> IntoIterator for &'a Trail {
    type Item = &'a DVec2;
    type IntoIter = std::collections::vec_deque::Iter<'a, DVec2>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_matches_screen_convention() {
        let projection = Projection::scaled(1e-6)
            .flipped()
            .with_offset(DVec2::new(540.0, 540.0));

        let projected = projection.project(DVec2::new(0.4055e9, 1e8));

        assert!((projected.x - 945.5).abs() < 1e-9);
        assert!((projected.y - 440.0).abs() < 1e-9);
    }

    #[test]
    fn projection_rejects_bad_scale() {
        assert_eq!(
            Projection::scaled(0.0).validate(),
            Err(Error::InvalidProjectionScale(0.0))
        );
        assert!(Projection::scaled(f64::NAN).validate().is_err());
        assert!(Projection::IDENTITY.validate().is_ok());
    }

    #[test]
    fn cadence() {
        let config = TrailConfig::every(3);

        let sampled: Vec<_> = (1..=10).filter(|&tick| config.samples(tick)).collect();
        assert_eq!(sampled, vec![3, 6, 9]);
        assert_eq!(TrailConfig::every(0).validate(), Err(Error::ZeroTrailCadence));
    }

    #[test]
    fn bounded_trail_drops_oldest() {
        let mut trail = Trail::new(Some(2));

        for i in 0..4 {
            trail.push(DVec2::splat(i as f64));
        }

        let points: Vec<_> = trail.iter().copied().collect();
        assert_eq!(points, vec![DVec2::splat(2.0), DVec2::splat(3.0)]);
        assert_eq!(trail.last(), Some(DVec2::splat(3.0)));
    }

    #[test]
    fn unbounded_trail_keeps_everything() {
        let mut trail = Trail::new(None);

        for i in 0..100 {
            trail.push(DVec2::new(i as f64, 0.0));
        }

        assert_eq!(trail.len(), 100);
        assert_eq!(trail.iter().next(), Some(&DVec2::ZERO));

        trail.clear();
        assert!(trail.is_empty());
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut trail = Trail::new(Some(0));
        trail.push(DVec2::ONE);

        assert!(trail.is_empty());
    }
}
