use glam::Vec3;
use thiserror::Error;

use crate::{kinematics::position_at, oracle::CollisionOracle};

/// Relative slack, in f32 epsilons, taken off `max_duration / step_duration` so exact multiples
/// do not gain a step from representation error.
const STEP_COUNT_EPSILONS: f32 = 4.;

/// Largest number of segments a validated config may sample.
pub const MAX_STEPS: usize = 1 << 20;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("step duration must be positive and finite, got {0}")]
    NonPositiveStep(f32),
    #[error("prediction horizon must be non-negative and finite, got {0}")]
    NegativeHorizon(f32),
    #[error("sphere radius must be non-negative and finite, got {0}")]
    NegativeRadius(f32),
    #[error("acceleration must be finite, got {0}")]
    NonFiniteAcceleration(Vec3),
    #[error("horizon over step duration needs {0} steps, at most {max} are allowed", max = MAX_STEPS)]
    TooManySteps(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryConfig {
    /// Constant acceleration applied for the whole flight, usually gravity
    pub acceleration: Vec3,
    /// Radius of the swept sphere used for collision queries
    pub sphere_radius: f32,
    /// Simulated time between two samples
    pub step_duration: f32,
    /// Prediction horizon, sampling stops here if nothing was hit
    pub max_duration: f32,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        TrajectoryConfig {
            acceleration: Vec3::new(0., -9.81, 0.),
            sphere_radius: 0.1,
            step_duration: 1. / 64.,
            max_duration: 3.,
        }
    }
}

impl TrajectoryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_duration.is_finite() && self.step_duration > 0.) {
            return Err(ConfigError::NonPositiveStep(self.step_duration));
        }
        if !(self.max_duration.is_finite() && self.max_duration >= 0.) {
            return Err(ConfigError::NegativeHorizon(self.max_duration));
        }
        if !(self.sphere_radius.is_finite() && self.sphere_radius >= 0.) {
            return Err(ConfigError::NegativeRadius(self.sphere_radius));
        }
        if !self.acceleration.is_finite() {
            return Err(ConfigError::NonFiniteAcceleration(self.acceleration));
        }
        let steps = steps_exact(self.step_duration, self.max_duration);
        if !(steps <= MAX_STEPS as f32) {
            return Err(ConfigError::TooManySteps(steps));
        }
        Ok(())
    }

    /// Number of segments sampled when nothing is hit
    pub fn step_count(&self) -> usize {
        step_count(self.step_duration, self.max_duration)
    }
}

#[inline]
fn steps_exact(step: f32, max_time: f32) -> f32 {
    let quotient = max_time / step;
    (quotient - quotient * f32::EPSILON * STEP_COUNT_EPSILONS)
        .ceil()
        .max(0.)
}

#[inline]
fn step_count(step: f32, max_time: f32) -> usize {
    steps_exact(step, max_time) as usize
}

/// Samples the parabola starting at `origin` into `out` until the first collision or until
/// `max_time` is reached.
///
/// `out` is cleared first. On a hit the last point is the contact point pushed out of the surface
/// by `radius` and `true` is returned. Without a hit the sampled points are kept and `false` is
/// returned. `step` must be positive.
#[allow(clippy::too_many_arguments)]
pub fn predict<O>(
    origin: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    step: f32,
    max_time: f32,
    radius: f32,
    oracle: &O,
    out: &mut Vec<Vec3>,
) -> bool
where
    O: CollisionOracle + ?Sized,
{
    debug_assert!(step > 0., "step must be positive, got {step}");
    out.clear();

    let steps = step_count(step, max_time);
    out.reserve(steps.min(MAX_STEPS));

    let mut current = origin;
    for i in 0..steps {
        let next = position_at(origin, velocity, acceleration, (i + 1) as f32 * step);
        let delta = next - current;
        let length = delta.length();

        if length > 0. && length.is_finite() {
            if let Some(hit) = oracle
                .sweep_sphere(current, delta / length, length, radius)
                .filter(|hit| hit.distance <= length)
            {
                out.push(hit.point + hit.normal * radius);
                return true;
            }
        }

        out.push(current);
        current = next;
    }
    false
}

/// Result of the latest [`TrajectorySampler::tick`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction<'a> {
    pub points: &'a [Vec3],
    pub hit: bool,
}

impl Prediction<'_> {
    /// The collision point, only present when something was hit.
    pub fn impact(&self) -> Option<Vec3> {
        if self.hit {
            self.points.last().copied()
        } else {
            None
        }
    }
}

/// Validated configuration plus a point buffer that is reused between frames.
#[derive(Clone, Debug)]
pub struct TrajectorySampler {
    config: TrajectoryConfig,
    points: Vec<Vec3>,
    hit: bool,
}

impl TrajectorySampler {
    pub fn new(config: TrajectoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(TrajectorySampler {
            points: Vec::with_capacity(config.step_count().min(MAX_STEPS)),
            config,
            hit: false,
        })
    }

    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    /// Replaces the configuration. The old one is kept if the new one is invalid.
    pub fn set_config(&mut self, config: TrajectoryConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Runs one prediction, replacing the previous result.
    pub fn tick<O>(&mut self, origin: Vec3, velocity: Vec3, oracle: &O) -> Prediction<'_>
    where
        O: CollisionOracle + ?Sized,
    {
        let TrajectoryConfig {
            acceleration,
            sphere_radius,
            step_duration,
            max_duration,
        } = self.config;
        self.hit = predict(
            origin,
            velocity,
            acceleration,
            step_duration,
            max_duration,
            sphere_radius,
            oracle,
            &mut self.points,
        );
        self.prediction()
    }

    pub fn prediction(&self) -> Prediction<'_> {
        Prediction {
            points: &self.points,
            hit: self.hit,
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn hit(&self) -> bool {
        self.hit
    }

    /// Drops the last result, for frames where no prediction is made.
    pub fn clear(&mut self) {
        self.points.clear();
        self.hit = false;
    }
}
