//! # Asset Core
//!
//! The asset-management core of a game-engine authoring environment:
//! a file-backed asset database with per-kind codecs and derived GPU
//! resource caching.
//!
//! ## Features
//!
//! - **File tree**: a mirrored project directory with stable node keys
//! - **Asset database**: import, lazy deserialization, serialization,
//!   move and delete with full cascade
//! - **Per-kind codecs**: scenes, component definitions, shaders,
//!   shader programs, textures, materials, samplers, frame buffers
//! - **Diagnostics as data**: failed deserialization leaves a message
//!   log on the record instead of tearing anything down
//! - **Derived resources**: backend-agnostic caches that build GPU
//!   objects from deserialized payloads on demand
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use asset_core::{AssetDatabase, AssetError};
//! use asset_core::payload::Scene;
//!
//! fn main() -> Result<(), AssetError> {
//!     let mut assets = AssetDatabase::open("project")?;
//!     assets.ensure_deserialization();
//!
//!     for &id in assets.scene_asset_ids() {
//!         if let Some(scene) = assets.payload_as::<Scene>(id) {
//!             println!("scene {:?} has {} entities", scene.name, scene.entities.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod codecs;
pub mod database;
pub mod file_tree;
pub mod gpu;
pub mod id;
pub mod kind;
pub mod message;
pub mod payload;
pub mod record;

pub use database::{AssetDatabase, AssetError};
pub use file_tree::{FileKey, FileNode, FileTree, FileTreeError};
pub use id::AssetId;
pub use kind::{AssetKind, ShaderStage};
pub use message::{Message, MessageLog, Severity};
pub use record::AssetRecord;
