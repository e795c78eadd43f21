pub mod collider;
pub mod kinematics;
pub mod oracle;
pub mod sampler;
pub mod scene;

pub use collider::Collider;
pub use oracle::{CollisionOracle, NoCollision, SweepHit};
pub use sampler::{ConfigError, Prediction, TrajectoryConfig, TrajectorySampler, predict};
pub use scene::Scene;
