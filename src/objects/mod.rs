pub mod body;
pub mod info;

pub use body::Body;
pub use info::BodyInfo;
