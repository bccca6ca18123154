pub mod body_set;
pub mod scene;

pub use body_set::{BodyId, BodySet};
pub use scene::Scene;
