//! Page pre-render pipelines
//!
//! Each pipeline runs once per page render: it queries the content store,
//! projects the raw documents into view models, and hands the result to
//! the template layer. A store failure here propagates and fails the
//! render for that path.

pub mod detail;
pub mod listing;

pub use detail::PostView;
