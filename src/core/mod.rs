//! Core registry types.

mod builder;
mod registry;

pub use builder::ConfigRegistryBuilder;
pub use registry::ConfigRegistry;
