//! Scene domain type

use serde::{Deserialize, Serialize};

use crate::id::AssetId;

/// One entity in a scene: a name plus the component definitions it uses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneEntity {
    /// Display name of the entity.
    pub name: String,
    /// Identities of the component-definition assets attached to it.
    pub components: Vec<AssetId>,
}

/// A scene: a named, flat list of entities.
///
/// The entity-component store and scene graph live outside this crate;
/// the scene asset only records what the editor authored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Display name of the scene.
    pub name: String,
    /// Entities in authoring order.
    pub entities: Vec<SceneEntity>,
}

impl Scene {
    /// Create an empty scene with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
        }
    }
}
