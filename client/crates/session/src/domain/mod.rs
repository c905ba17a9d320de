//! Domain Layer
//!
//! Identity model, value objects, and the backend API trait.

pub mod api;
pub mod entity;
pub mod value_object;
