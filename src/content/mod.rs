//! Typed view models and content shaping

pub mod feed;
pub mod post;
pub mod reading_time;

pub use feed::PostFeed;
pub use post::{AdjacentPostRef, Block, BlockKind, PostDetail, PostSummary, ProjectionError, Section};
pub use reading_time::estimate_minutes;
