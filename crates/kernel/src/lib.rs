//! Core building blocks for the Bookstall platform: layered settings, the
//! module lifecycle trait, and the registry the application boots from.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Migration, Module};
pub use registry::ModuleRegistry;
