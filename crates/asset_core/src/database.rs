//! The asset database
//!
//! [`AssetDatabase`] owns the project's file tree and every asset record,
//! and orchestrates the import / deserialize / serialize / move / delete
//! lifecycle. It is single-owner, single-thread state: no internal
//! synchronization, mutation through `&mut self` only.
//!
//! Deserialization failures are never fatal here — a record that fails to
//! deserialize stays Empty with diagnostics attached and the database
//! keeps operating on everything else. `Result` is reserved for
//! file-system failures and caller mistakes (unknown identities,
//! unrecognized files).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;

use crate::codecs::{self, CodecError};
use crate::file_tree::{FileKey, FileTree, FileTreeError};
use crate::gpu::DerivedResources;
use crate::id::AssetId;
use crate::kind::AssetKind;
use crate::message::MessageLog;
use crate::payload::{AssetData, AssetPayload};
use crate::record::AssetRecord;

/// Asset database errors.
#[derive(Error, Debug)]
pub enum AssetError {
    /// File tree or file-system failure.
    #[error("File tree error: {0}")]
    Tree(#[from] FileTreeError),

    /// The identity names no asset in this database.
    #[error("Unknown asset: {0}")]
    UnknownAsset(AssetId),

    /// The file's extension is not a recognized, importable asset kind.
    #[error("Not recognized as an asset: {0}")]
    UnrecognizedFile(String),

    /// Serializing a payload failed.
    #[error("Serialization failed: {0}")]
    Codec(#[from] CodecError),
}

/// Owns every imported asset of one project.
///
/// Indexes records by identity and by file, and maintains one identity
/// list per payload kind for enumeration. See the module docs for the
/// failure philosophy.
pub struct AssetDatabase {
    tree: FileTree,
    records: HashMap<AssetId, AssetRecord>,
    file_index: HashMap<FileKey, AssetId>,
    // Identities are never reused after deletion within this process.
    retired: HashSet<AssetId>,
    all: Vec<AssetId>,
    scenes: Vec<AssetId>,
    component_definitions: Vec<AssetId>,
    samplers: Vec<AssetId>,
    textures: Vec<AssetId>,
    shaders: Vec<AssetId>,
    shader_programs: Vec<AssetId>,
    materials: Vec<AssetId>,
    frame_buffers: Vec<AssetId>,
}

impl AssetDatabase {
    /// Scan `root` and import every recognized file underneath it.
    ///
    /// Nothing is deserialized eagerly; call
    /// [`ensure_deserialization`](Self::ensure_deserialization) when the
    /// payloads are actually needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, AssetError> {
        let tree = FileTree::scan(root)?;
        let mut database = Self {
            tree,
            records: HashMap::new(),
            file_index: HashMap::new(),
            retired: HashSet::new(),
            all: Vec::new(),
            scenes: Vec::new(),
            component_definitions: Vec::new(),
            samplers: Vec::new(),
            textures: Vec::new(),
            shaders: Vec::new(),
            shader_programs: Vec::new(),
            materials: Vec::new(),
            frame_buffers: Vec::new(),
        };
        database.import_all();
        log::info!(
            "Opened asset database with {} assets under {:?}",
            database.all.len(),
            database.tree.node(database.tree.root()).path()
        );
        Ok(database)
    }

    fn import_all(&mut self) {
        let keys: Vec<FileKey> = self.tree.keys().collect();
        for key in keys {
            self.import(key);
        }
    }

    /// Import one file, classifying it by extension.
    ///
    /// Idempotent: importing an already-indexed file returns its existing
    /// identity. Returns `None` for directories, unrecognized extensions,
    /// and recognized-but-unimportable kinds (projects, identity
    /// markers). Does not deserialize.
    pub fn import(&mut self, file: FileKey) -> Option<AssetId> {
        if let Some(&existing) = self.file_index.get(&file) {
            return Some(existing);
        }
        let node = self.tree.get(file)?;
        if node.is_directory() {
            return None;
        }
        let kind = AssetKind::classify(node.extension())?;
        if !kind.is_importable() {
            return None;
        }

        let id = self.fresh_id();
        log::debug!("Imported {kind} asset {id} from {:?}", node.path());
        self.records.insert(id, AssetRecord::new(id, file, kind));
        self.file_index.insert(file, id);
        self.all.push(id);
        Some(id)
    }

    /// Allocate an identity unused by any live or retired asset.
    fn fresh_id(&self) -> AssetId {
        loop {
            let id = AssetId::random();
            if !self.records.contains_key(&id) && !self.retired.contains(&id) {
                return id;
            }
        }
    }

    /// Create a folder under `parent`.
    pub fn create_folder(&mut self, parent: FileKey, name: &str) -> Result<FileKey, AssetError> {
        Ok(self.tree.create_child_folder(parent, name)?)
    }

    /// Create a new asset file with the given content, import it, and
    /// force-deserialize it so it is usable right away.
    pub fn create_asset_at(
        &mut self,
        folder: FileKey,
        file_name: &str,
        content: &[u8],
        derived: &mut dyn DerivedResources,
    ) -> Result<AssetId, AssetError> {
        let file = self.tree.create_child_file(folder, file_name, content)?;
        let Some(id) = self.import(file) else {
            return Err(AssetError::UnrecognizedFile(file_name.to_string()));
        };
        self.force_deserialize_asset(id, derived);
        Ok(id)
    }

    /// Move an asset's file into another folder.
    ///
    /// The identity, the record, and all derived resources are
    /// unaffected: identities are random, never path-derived.
    pub fn move_asset(&mut self, id: AssetId, target_folder: FileKey) -> Result<(), AssetError> {
        let record = self.records.get(&id).ok_or(AssetError::UnknownAsset(id))?;
        self.tree.move_node(record.file, target_folder)?;
        Ok(())
    }

    /// Move a folder (and everything under it) into another folder.
    /// Asset identities and records are unaffected.
    pub fn move_folder(&mut self, folder: FileKey, target_folder: FileKey) -> Result<(), AssetError> {
        self.tree.move_node(folder, target_folder)?;
        Ok(())
    }

    /// Delete an asset: its file on disk, its record, every index entry,
    /// and any derived resource in every cache.
    pub fn delete_asset(
        &mut self,
        id: AssetId,
        derived: &mut dyn DerivedResources,
    ) -> Result<(), AssetError> {
        let record = self.records.get(&id).ok_or(AssetError::UnknownAsset(id))?;
        let file = record.file;
        self.tree.delete(file)?;
        self.remove_record(id, file, derived);
        Ok(())
    }

    /// Delete a folder and every asset underneath it, with the same
    /// cascade as [`delete_asset`](Self::delete_asset) per asset.
    pub fn delete_folder(
        &mut self,
        folder: FileKey,
        derived: &mut dyn DerivedResources,
    ) -> Result<(), AssetError> {
        let removed = self.tree.delete(folder)?;
        for key in removed {
            if let Some(id) = self.file_index.get(&key).copied() {
                self.remove_record(id, key, derived);
            }
        }
        Ok(())
    }

    fn remove_record(&mut self, id: AssetId, file: FileKey, derived: &mut dyn DerivedResources) {
        self.records.remove(&id);
        self.file_index.remove(&file);
        self.all.retain(|&other| other != id);
        self.detach_from_kind_lists(id);
        derived.deallocate(id);
        self.retired.insert(id);
        log::info!("Deleted asset {id}");
    }

    /// Write the asset's payload back through its file.
    ///
    /// A silent no-op when the payload is Empty. Does not change the
    /// version counter.
    pub fn serialize_asset(&mut self, id: AssetId) -> Result<(), AssetError> {
        let record = self.records.get(&id).ok_or(AssetError::UnknownAsset(id))?;
        match codecs::serialize_data(&record.data) {
            None => {
                log::debug!("Asset {id} has no deserialized data, nothing to serialize");
                Ok(())
            }
            Some(Err(err)) => Err(err.into()),
            Some(Ok(bytes)) => {
                let file = record.file;
                self.tree.modify_content(file, &bytes)?;
                Ok(())
            }
        }
    }

    /// Deserialize the asset if (and only if) its payload is Empty.
    ///
    /// Idempotent. Failures are recorded on the record's error log, not
    /// returned; an unknown identity is a logged no-op.
    pub fn deserialize_asset(&mut self, id: AssetId) {
        let Some(record) = self.records.get(&id) else {
            log::warn!("Cannot deserialize unknown asset {id}");
            return;
        };
        if !record.data.is_empty() {
            return;
        }
        let file = record.file;
        let kind = record.kind;
        if !codecs::kind_has_codec(kind) {
            log::debug!("No codec for {kind} asset {id}, record stays empty");
            return;
        }

        let bytes = match self.tree.read_content(file) {
            Ok(bytes) => bytes.to_vec(),
            Err(err) => {
                let mut log = MessageLog::new();
                log.error(format!("failed to read source file: {err}"));
                if let Some(record) = self.records.get_mut(&id) {
                    record.apply_outcome(AssetData::Empty, log);
                }
                return;
            }
        };
        self.tree.dispose_content(file);

        let Some((data, log)) = codecs::deserialize_kind(kind, &bytes) else {
            return;
        };
        let succeeded = !data.is_empty();
        if let Some(record) = self.records.get_mut(&id) {
            record.apply_outcome(data, log);
        }
        if succeeded {
            self.attach_to_kind_list(id);
            log::debug!("Deserialized {kind} asset {id}");
        } else {
            log::warn!("Deserializing {kind} asset {id} failed");
        }
    }

    /// Unconditionally discard the payload and every derived resource for
    /// this identity, then deserialize from the current file bytes.
    ///
    /// This is the path for picking up external edits: any reference to
    /// the old payload or old derived resource is invalid afterwards.
    pub fn force_deserialize_asset(&mut self, id: AssetId, derived: &mut dyn DerivedResources) {
        let Some(record) = self.records.get_mut(&id) else {
            log::warn!("Cannot force-deserialize unknown asset {id}");
            return;
        };
        record.data = AssetData::Empty;
        self.detach_from_kind_lists(id);
        derived.deallocate(id);
        self.deserialize_asset(id);
    }

    /// Clear the payload and deallocate derived resources, leaving the
    /// file bytes and the message logs of the last attempt untouched.
    pub fn delete_deserialized_data(&mut self, id: AssetId, derived: &mut dyn DerivedResources) {
        let Some(record) = self.records.get_mut(&id) else {
            log::warn!("Cannot delete deserialized data of unknown asset {id}");
            return;
        };
        record.data = AssetData::Empty;
        self.detach_from_kind_lists(id);
        derived.deallocate(id);
    }

    /// Replace the asset's payload with an edited domain object.
    ///
    /// Bumps the version counter and clears the logs of the last
    /// deserialization attempt (they described the previous payload).
    /// The file is untouched until
    /// [`serialize_asset`](Self::serialize_asset).
    pub fn update_payload<T: AssetPayload>(
        &mut self,
        id: AssetId,
        value: T,
    ) -> Result<(), AssetError> {
        if !self.records.contains_key(&id) {
            return Err(AssetError::UnknownAsset(id));
        }
        self.detach_from_kind_lists(id);
        if let Some(record) = self.records.get_mut(&id) {
            record.data = value.into_data();
            record.version += 1;
            record.info_log = MessageLog::new();
            record.warning_log = MessageLog::new();
            record.error_log = MessageLog::new();
        }
        self.attach_to_kind_list(id);
        Ok(())
    }

    /// Whether this identity holds usable deserialized data.
    pub fn has_deserialized_data(&self, id: AssetId) -> bool {
        self.records
            .get(&id)
            .is_some_and(AssetRecord::has_deserialized_data)
    }

    /// Look up an asset by identity. Unknown identities yield `None`,
    /// never an error.
    pub fn find_asset(&self, id: AssetId) -> Option<&AssetRecord> {
        self.records.get(&id)
    }

    /// Look up the asset imported from a file.
    pub fn find_asset_at(&self, file: FileKey) -> Option<&AssetRecord> {
        self.file_index.get(&file).and_then(|id| self.records.get(id))
    }

    /// Whether a file has been imported as an asset.
    pub fn has_asset_at(&self, file: FileKey) -> bool {
        self.file_index.contains_key(&file)
    }

    /// Version counter of an asset.
    pub fn version_of(&self, id: AssetId) -> Option<u64> {
        self.records.get(&id).map(AssetRecord::version)
    }

    /// File node of an asset.
    pub fn file_of(&self, id: AssetId) -> Option<FileKey> {
        self.records.get(&id).map(AssetRecord::file)
    }

    /// The asset's payload slot.
    pub fn payload(&self, id: AssetId) -> Option<&AssetData> {
        self.records.get(&id).map(AssetRecord::data)
    }

    /// Checked access to an asset's payload as a concrete domain type.
    pub fn payload_as<T: AssetPayload>(&self, id: AssetId) -> Option<&T> {
        self.records.get(&id).and_then(|record| T::from_data(&record.data))
    }

    /// Re-walk the file tree, import anything not yet indexed, and
    /// deserialize every record that is still Empty. Idempotent; safe to
    /// call after external file-system changes.
    pub fn reimport_all(&mut self) -> Result<(), AssetError> {
        let discovered = self.tree.rescan()?;
        for key in discovered {
            self.import(key);
        }
        self.ensure_deserialization();
        Ok(())
    }

    /// Deserialize every record whose payload is still Empty. Idempotent.
    pub fn ensure_deserialization(&mut self) {
        let pending: Vec<AssetId> = self
            .records
            .iter()
            .filter(|(_, record)| record.data.is_empty())
            .map(|(&id, _)| id)
            .collect();
        for id in pending {
            self.deserialize_asset(id);
        }
    }

    /// The underlying file tree (read-only).
    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// Key of the project root folder.
    pub fn root(&self) -> FileKey {
        self.tree.root()
    }

    /// Identities of all imported assets.
    pub fn all_asset_ids(&self) -> &[AssetId] {
        &self.all
    }

    /// Identities of deserialized scene assets.
    pub fn scene_asset_ids(&self) -> &[AssetId] {
        &self.scenes
    }

    /// Identities of deserialized component-definition assets.
    pub fn component_definition_asset_ids(&self) -> &[AssetId] {
        &self.component_definitions
    }

    /// Identities of deserialized sampler assets.
    pub fn sampler_asset_ids(&self) -> &[AssetId] {
        &self.samplers
    }

    /// Identities of deserialized texture assets.
    pub fn texture_asset_ids(&self) -> &[AssetId] {
        &self.textures
    }

    /// Identities of deserialized shader assets.
    pub fn shader_asset_ids(&self) -> &[AssetId] {
        &self.shaders
    }

    /// Identities of deserialized shader-program assets.
    pub fn shader_program_asset_ids(&self) -> &[AssetId] {
        &self.shader_programs
    }

    /// Identities of deserialized material assets.
    pub fn material_asset_ids(&self) -> &[AssetId] {
        &self.materials
    }

    /// Identities of deserialized frame-buffer assets.
    pub fn frame_buffer_asset_ids(&self) -> &[AssetId] {
        &self.frame_buffers
    }

    /// Add the asset to the list matching its payload's active tag.
    fn attach_to_kind_list(&mut self, id: AssetId) {
        let Some(record) = self.records.get(&id) else {
            return;
        };
        let list = match record.data {
            AssetData::Empty => return,
            AssetData::Scene(_) => &mut self.scenes,
            AssetData::ComponentDefinition(_) => &mut self.component_definitions,
            AssetData::Sampler(_) => &mut self.samplers,
            AssetData::Texture(_) => &mut self.textures,
            AssetData::Shader(_) => &mut self.shaders,
            AssetData::ShaderProgram(_) => &mut self.shader_programs,
            AssetData::Material(_) => &mut self.materials,
            AssetData::FrameBuffer(_) => &mut self.frame_buffers,
        };
        if !list.contains(&id) {
            list.push(id);
        }
    }

    fn detach_from_kind_lists(&mut self, id: AssetId) {
        for list in [
            &mut self.scenes,
            &mut self.component_definitions,
            &mut self.samplers,
            &mut self.textures,
            &mut self.shaders,
            &mut self.shader_programs,
            &mut self.materials,
            &mut self.frame_buffers,
        ] {
            list.retain(|&other| other != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::codecs::{deserialize_scene, serialize_component_definition, serialize_scene};
    use crate::payload::{ComponentDefinition, Scene, SceneEntity};

    const FRAG_SOURCE: &str = "#version 460 core\n\
        out vec4 color;\n\
        void main() {\n\
            color = vec4(1.0);\n\
        }\n";

    const VERT_SOURCE: &str = "#version 460 core\n\
        layout(location = 0) in vec3 position;\n\
        void main() {\n\
            gl_Position = vec4(position, 1.0);\n\
        }\n";

    /// One extra closing brace.
    const BROKEN_FRAG_SOURCE: &str = "#version 460 core\n\
        void main() {\n\
        }}\n";

    #[derive(Default)]
    struct RecordingDerived {
        deallocated: Vec<AssetId>,
    }

    impl DerivedResources for RecordingDerived {
        fn deallocate(&mut self, asset: AssetId) {
            self.deallocated.push(asset);
        }
    }

    /// A project with one scene, two shaders, one component definition,
    /// a project file, and one file that is not an asset at all.
    fn sandbox() -> (TempDir, AssetDatabase) {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("project.doa"), b"").expect("write");
        fs::write(dir.path().join("notes.txt"), b"todo list").expect("write");

        let scene = Scene {
            name: "main".to_string(),
            entities: vec![SceneEntity {
                name: "camera".to_string(),
                components: Vec::new(),
            }],
        };
        fs::write(
            dir.path().join("main.scn"),
            serialize_scene(&scene).expect("encode scene"),
        )
        .expect("write");

        fs::create_dir(dir.path().join("shaders")).expect("mkdir");
        fs::write(dir.path().join("shaders/lit.frag"), FRAG_SOURCE).expect("write");
        fs::write(dir.path().join("shaders/lit.vert"), VERT_SOURCE).expect("write");

        fs::create_dir(dir.path().join("comps")).expect("mkdir");
        let health = ComponentDefinition {
            name: "Health".to_string(),
            fields: Vec::new(),
        };
        fs::write(
            dir.path().join("comps/health.ncd"),
            serialize_component_definition(&health).expect("encode definition"),
        )
        .expect("write");

        let database = AssetDatabase::open(dir.path()).expect("open");
        (dir, database)
    }

    fn key_at(database: &AssetDatabase, dir: &TempDir, relative: &str) -> FileKey {
        database
            .tree()
            .find(dir.path().join(relative))
            .unwrap_or_else(|| panic!("no node at {relative}"))
    }

    fn id_at(database: &AssetDatabase, dir: &TempDir, relative: &str) -> AssetId {
        let key = key_at(database, dir, relative);
        database
            .find_asset_at(key)
            .unwrap_or_else(|| panic!("no asset at {relative}"))
            .id()
    }

    #[test]
    fn test_open_imports_recognized_files_only() {
        let (dir, database) = sandbox();
        // main.scn, lit.frag, lit.vert, health.ncd; project.doa is
        // recognized but unimportable and notes.txt is unrecognized.
        assert_eq!(database.all_asset_ids().len(), 4);

        let scene = id_at(&database, &dir, "main.scn");
        let record = database.find_asset(scene).expect("scene record");
        assert_eq!(record.kind(), AssetKind::Scene);
        assert_eq!(record.version(), 0);
        assert!(record.data().is_empty());

        let notes = key_at(&database, &dir, "notes.txt");
        assert!(!database.has_asset_at(notes));
        let project = key_at(&database, &dir, "project.doa");
        assert!(!database.has_asset_at(project));
    }

    #[test]
    fn test_import_is_idempotent() {
        let (dir, mut database) = sandbox();
        let file = key_at(&database, &dir, "main.scn");
        let first = database.import(file).expect("import");
        let second = database.import(file).expect("reimport");
        assert_eq!(first, second);
        assert_eq!(database.all_asset_ids().len(), 4);
    }

    #[test]
    fn test_ensure_deserialization_populates_kind_lists() {
        let (dir, mut database) = sandbox();
        database.ensure_deserialization();

        assert_eq!(database.scene_asset_ids().len(), 1);
        assert_eq!(database.shader_asset_ids().len(), 2);
        assert_eq!(database.component_definition_asset_ids().len(), 1);
        assert!(database.texture_asset_ids().is_empty());

        let scene_id = id_at(&database, &dir, "main.scn");
        assert!(database.has_deserialized_data(scene_id));
        assert_eq!(database.version_of(scene_id), Some(1));
        let scene = database.payload_as::<Scene>(scene_id).expect("payload");
        assert_eq!(scene.name, "main");
        assert_eq!(scene.entities.len(), 1);
    }

    #[test]
    fn test_deserialize_is_lazy_and_idempotent() {
        let (dir, mut database) = sandbox();
        let id = id_at(&database, &dir, "shaders/lit.frag");
        assert!(!database.has_deserialized_data(id));

        database.deserialize_asset(id);
        assert!(database.has_deserialized_data(id));
        assert_eq!(database.version_of(id), Some(1));

        // Second call must not re-read or bump anything.
        database.deserialize_asset(id);
        assert_eq!(database.version_of(id), Some(1));

        // Raw content was disposed after the decode.
        let file = database.file_of(id).expect("file");
        assert!(!database.tree().node(file).has_cached_content());
    }

    #[test]
    fn test_failed_deserialization_records_errors() {
        let (dir, mut database) = sandbox();
        fs::write(dir.path().join("shaders/lit.frag"), BROKEN_FRAG_SOURCE).expect("write");

        let id = id_at(&database, &dir, "shaders/lit.frag");
        database.deserialize_asset(id);

        let record = database.find_asset(id).expect("record");
        assert!(!record.has_deserialized_data());
        assert!(record.has_error_messages());
        assert_eq!(record.version(), 0);
        assert!(!database.shader_asset_ids().contains(&id));
    }

    #[test]
    fn test_force_deserialize_picks_up_external_edits() {
        let (dir, mut database) = sandbox();
        fs::write(dir.path().join("shaders/lit.frag"), BROKEN_FRAG_SOURCE).expect("write");

        let id = id_at(&database, &dir, "shaders/lit.frag");
        database.deserialize_asset(id);
        assert!(!database.has_deserialized_data(id));

        // Fix the file on disk, then force a fresh attempt.
        fs::write(dir.path().join("shaders/lit.frag"), FRAG_SOURCE).expect("write");
        let mut derived = RecordingDerived::default();
        database.force_deserialize_asset(id, &mut derived);

        assert_eq!(derived.deallocated, vec![id]);
        assert!(database.has_deserialized_data(id));
        assert!(!database
            .find_asset(id)
            .expect("record")
            .has_error_messages());
        assert!(database.shader_asset_ids().contains(&id));
    }

    #[test]
    fn test_delete_deserialized_data_keeps_logs_and_file() {
        let (dir, mut database) = sandbox();
        let id = id_at(&database, &dir, "main.scn");
        database.deserialize_asset(id);
        assert!(database.has_deserialized_data(id));

        let mut derived = RecordingDerived::default();
        database.delete_deserialized_data(id, &mut derived);

        assert_eq!(derived.deallocated, vec![id]);
        assert!(!database.has_deserialized_data(id));
        assert!(database.find_asset(id).is_some());
        assert!(database.scene_asset_ids().is_empty());
        assert!(dir.path().join("main.scn").exists());
    }

    #[test]
    fn test_delete_asset_cascades_and_retires_identity() {
        let (dir, mut database) = sandbox();
        database.ensure_deserialization();
        let id = id_at(&database, &dir, "main.scn");
        let file = database.file_of(id).expect("file");

        let mut derived = RecordingDerived::default();
        database.delete_asset(id, &mut derived).expect("delete");

        assert_eq!(derived.deallocated, vec![id]);
        assert!(database.find_asset(id).is_none());
        assert!(!database.tree().contains(file));
        assert!(!dir.path().join("main.scn").exists());
        assert!(database.scene_asset_ids().is_empty());
        assert_eq!(database.all_asset_ids().len(), 3);

        // A file reappearing at the same path is a new asset.
        fs::write(
            dir.path().join("main.scn"),
            serialize_scene(&Scene::named("main")).expect("encode"),
        )
        .expect("write");
        database.reimport_all().expect("reimport");
        let reborn = id_at(&database, &dir, "main.scn");
        assert_ne!(reborn, id);
    }

    #[test]
    fn test_delete_folder_cascades_over_contained_assets() {
        let (dir, mut database) = sandbox();
        database.ensure_deserialization();
        let frag = id_at(&database, &dir, "shaders/lit.frag");
        let vert = id_at(&database, &dir, "shaders/lit.vert");
        let folder = key_at(&database, &dir, "shaders");

        let mut derived = RecordingDerived::default();
        database.delete_folder(folder, &mut derived).expect("delete");

        assert_eq!(derived.deallocated.len(), 2);
        assert!(derived.deallocated.contains(&frag));
        assert!(derived.deallocated.contains(&vert));
        assert!(database.find_asset(frag).is_none());
        assert!(database.find_asset(vert).is_none());
        assert!(database.shader_asset_ids().is_empty());
        assert!(!dir.path().join("shaders").exists());
    }

    #[test]
    fn test_move_preserves_identity_and_payload() {
        let (dir, mut database) = sandbox();
        database.ensure_deserialization();
        let id = id_at(&database, &dir, "shaders/lit.frag");
        let version = database.version_of(id);

        let target = database
            .create_folder(database.root(), "gpu")
            .expect("folder");
        database.move_asset(id, target).expect("move");

        assert_eq!(database.version_of(id), version);
        assert!(database.has_deserialized_data(id));
        assert!(dir.path().join("gpu/lit.frag").exists());
        let file = database.file_of(id).expect("file");
        assert!(database.tree().node(file).path().ends_with("gpu/lit.frag"));
    }

    #[test]
    fn test_create_asset_at_deserializes_immediately() {
        let (_dir, mut database) = sandbox();
        let mut derived = RecordingDerived::default();
        let root = database.root();

        let id = database
            .create_asset_at(root, "second.scn", b"(name: \"second\", entities: [])", &mut derived)
            .expect("create");
        assert!(database.has_deserialized_data(id));
        assert_eq!(database.scene_asset_ids(), [id]);

        let err = database
            .create_asset_at(root, "readme.md", b"# readme", &mut derived)
            .expect_err("unrecognized extension");
        assert!(matches!(err, AssetError::UnrecognizedFile(_)));
    }

    #[test]
    fn test_update_payload_and_serialize_round_trip() {
        let (dir, mut database) = sandbox();
        database.ensure_deserialization();
        let id = id_at(&database, &dir, "main.scn");
        assert_eq!(database.version_of(id), Some(1));

        let mut edited = database.payload_as::<Scene>(id).expect("payload").clone();
        edited.name = "renamed".to_string();
        edited.entities.push(SceneEntity {
            name: "light".to_string(),
            components: Vec::new(),
        });
        database.update_payload(id, edited).expect("update");
        assert_eq!(database.version_of(id), Some(2));
        assert!(!database.find_asset(id).expect("record").has_info_messages());

        database.serialize_asset(id).expect("serialize");
        let bytes = fs::read(dir.path().join("main.scn")).expect("read back");
        let reparsed = deserialize_scene(&bytes);
        let scene = reparsed.value.expect("round trip");
        assert_eq!(scene.name, "renamed");
        assert_eq!(scene.entities.len(), 2);
    }

    #[test]
    fn test_serialize_empty_payload_is_a_no_op() {
        let (dir, mut database) = sandbox();
        let id = id_at(&database, &dir, "main.scn");
        let before = fs::read(dir.path().join("main.scn")).expect("read");
        database.serialize_asset(id).expect("serialize");
        let after = fs::read(dir.path().join("main.scn")).expect("read");
        assert_eq!(before, after);
    }

    #[test]
    fn test_reimport_all_picks_up_new_files() {
        let (dir, mut database) = sandbox();
        database.ensure_deserialization();
        fs::write(dir.path().join("shaders/unlit.vert"), VERT_SOURCE).expect("write");
        fs::write(dir.path().join("scratch.txt"), b"ignored").expect("write");

        database.reimport_all().expect("reimport");

        assert_eq!(database.all_asset_ids().len(), 5);
        assert_eq!(database.shader_asset_ids().len(), 3);
        let id = id_at(&database, &dir, "shaders/unlit.vert");
        assert!(database.has_deserialized_data(id));
        assert!(database
            .tree()
            .find(Path::new(dir.path()).join("scratch.txt"))
            .is_some());
    }

    #[test]
    fn test_script_assets_import_without_a_codec() {
        let (dir, mut database) = sandbox();
        fs::write(dir.path().join("spin.scrpt"), b"rotate me").expect("write");
        database.reimport_all().expect("reimport");

        let id = id_at(&database, &dir, "spin.scrpt");
        let record = database.find_asset(id).expect("record");
        assert_eq!(record.kind(), AssetKind::Script);
        // No codec: the record stays empty with clean logs.
        assert!(!database.has_deserialized_data(id));
        assert!(!record.has_error_messages());
        assert_eq!(record.version(), 0);
    }

    #[test]
    fn test_unknown_identity_is_an_error_or_none() {
        let (_dir, mut database) = sandbox();
        let bogus = AssetId::from_raw(0xdead_beef);
        assert!(database.find_asset(bogus).is_none());
        assert!(!database.has_deserialized_data(bogus));
        assert!(matches!(
            database.serialize_asset(bogus),
            Err(AssetError::UnknownAsset(_))
        ));
        assert!(matches!(
            database.update_payload(bogus, Scene::named("x")),
            Err(AssetError::UnknownAsset(_))
        ));
    }
}
