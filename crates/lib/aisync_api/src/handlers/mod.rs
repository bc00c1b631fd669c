//! Request handlers.

pub mod applications;
pub mod employees;
pub mod job_posts;
pub mod status;
