// Project domain module

#![allow(clippy::module_inception)]

pub mod project;
pub mod value_objects;

pub use project::Project;
pub use value_objects::ProjectStatus;
