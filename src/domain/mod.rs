//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the visibility rules and errors live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod visibility;

pub use entities::{Category, CategoryFeed, Location, Post, User, MAX_TITLE_LEN};
pub use errors::DomainError;
pub use visibility::{PostFilter, Visibility};
