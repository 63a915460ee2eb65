//! Row structs mapping database tables to core entities.
//!
//! Each submodule contains a `FromRow` struct matching the table shape plus
//! a conversion into the corresponding `matinee_core::store` entity.

pub mod booking;
pub mod show;
