//! Services — request-level flows behind the HTTP routes.

pub mod catalog;
pub mod prompt;
pub mod rewrite;
pub mod search;
pub mod web_search;
