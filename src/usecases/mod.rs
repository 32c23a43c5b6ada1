//! Application use cases. Orchestrate domain logic via ports.

pub mod post_query_service;

pub use post_query_service::PostQueryService;
