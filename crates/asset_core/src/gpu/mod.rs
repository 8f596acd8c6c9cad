//! Derived GPU resource caching
//!
//! A derived resource is a backend-resident object built from a
//! deserialized payload: a compiled shader, a linked program, an uploaded
//! texture. The asset database never touches the graphics backend
//! directly; it talks to the caches in this module, and the caches talk
//! to per-kind [`ResourceBuilder`]s supplied by the backend.
//!
//! The cache discipline is at-most-one resource per asset identity, with
//! [`DerivedResourceCache::try_allocate`] as the idempotent
//! materialize-on-demand entry point.

mod bridge;
mod cache;
mod messages;

pub use bridge::{DerivedResources, GpuBackend, ResourceBridge};
pub use cache::{BuildOutput, DerivedResourceCache, ResourceBuilder};
pub use messages::{BuildMessage, ShaderCompilerMessage, ShaderLinkerMessage};
