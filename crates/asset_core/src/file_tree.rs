//! File-system tree underneath an asset database
//!
//! The database owns one [`FileTree`] rooted at the project directory.
//! Nodes live in a slot map, so the database and asset records hold
//! non-owning [`FileKey`] back-references that stay valid across moves
//! and unrelated insertions or removals. Node identity is the path.
//!
//! Raw file content is cached per node on first read and can be disposed
//! explicitly once a deserializer has consumed it.

use std::fs;
use std::path::{Path, PathBuf};

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

new_key_type! {
    /// Stable, non-owning reference to a node in a [`FileTree`].
    pub struct FileKey;
}

/// File tree errors.
#[derive(Error, Debug)]
pub enum FileTreeError {
    /// Underlying file-system failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory was required.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A regular file was required.
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// A sibling with the same name already exists.
    #[error("Name already taken in {parent}: {name}")]
    NameTaken {
        /// Directory in which the clash occurred.
        parent: PathBuf,
        /// The clashing child name.
        name: String,
    },

    /// Child names must be plain (non-empty, no path separators).
    #[error("Invalid child name: {0:?}")]
    InvalidName(String),

    /// The tree root cannot be moved or deleted.
    #[error("Operation not permitted on the tree root")]
    RootNode,
}

/// One node of the file tree: a regular file or a directory.
#[derive(Debug)]
pub struct FileNode {
    path: PathBuf,
    name: String,
    extension: String,
    parent: Option<FileKey>,
    children: Vec<FileKey>,
    is_directory: bool,
    content: Option<Vec<u8>>,
}

impl FileNode {
    /// Full path of this node. The path is the node's identity.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File or directory name, including any extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased extension with leading dot, or `""` if there is none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Parent directory, `None` for the root.
    pub fn parent(&self) -> Option<FileKey> {
        self.parent
    }

    /// Child nodes (empty for regular files).
    pub fn children(&self) -> &[FileKey] {
        &self.children
    }

    /// Whether this node is a directory.
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Whether raw content is currently cached for this node.
    pub fn has_cached_content(&self) -> bool {
        self.content.is_some()
    }
}

/// Extract the lowercased `.ext` suffix from a plain file name.
///
/// Dotfiles such as `.gitignore` have no extension.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(index) if index > 0 => name[index..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// A directory tree mirrored from disk.
pub struct FileTree {
    nodes: SlotMap<FileKey, FileNode>,
    root: FileKey,
}

impl FileTree {
    /// Build a tree by recursively walking `root`.
    ///
    /// Children are visited in name order so scans are deterministic.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self, FileTreeError> {
        let root_path = root.as_ref().to_path_buf();
        let metadata = fs::metadata(&root_path)?;
        if !metadata.is_dir() {
            return Err(FileTreeError::NotADirectory(root_path));
        }

        let mut nodes = SlotMap::with_key();
        let name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let root_key = nodes.insert(FileNode {
            path: root_path,
            name,
            extension: String::new(),
            parent: None,
            children: Vec::new(),
            is_directory: true,
            content: None,
        });

        let mut tree = Self {
            nodes,
            root: root_key,
        };
        tree.scan_children(root_key)?;
        log::debug!(
            "Scanned {} nodes under {:?}",
            tree.nodes.len(),
            tree.node(tree.root).path()
        );
        Ok(tree)
    }

    fn scan_children(&mut self, directory: FileKey) -> Result<(), FileTreeError> {
        let mut entries: Vec<(PathBuf, bool)> = Vec::new();
        for entry in fs::read_dir(self.node(directory).path())? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            // Symlinks and other special entries are skipped outright.
            if file_type.is_file() || file_type.is_dir() {
                entries.push((entry.path(), file_type.is_dir()));
            }
        }
        entries.sort();

        for (path, is_dir) in entries {
            let key = self.insert_node(directory, &path, is_dir);
            if is_dir {
                self.scan_children(key)?;
            }
        }
        Ok(())
    }

    fn insert_node(&mut self, parent: FileKey, path: &Path, is_directory: bool) -> FileKey {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = if is_directory {
            String::new()
        } else {
            extension_of(&name)
        };
        let key = self.nodes.insert(FileNode {
            path: path.to_path_buf(),
            name,
            extension,
            parent: Some(parent),
            children: Vec::new(),
            is_directory,
            content: None,
        });
        self.nodes[parent].children.push(key);
        key
    }

    /// Key of the root directory.
    pub fn root(&self) -> FileKey {
        self.root
    }

    /// Borrow a node.
    ///
    /// Panics if `key` is stale (the node was deleted).
    pub fn node(&self, key: FileKey) -> &FileNode {
        &self.nodes[key]
    }

    /// Borrow a node, returning `None` for stale keys.
    pub fn get(&self, key: FileKey) -> Option<&FileNode> {
        self.nodes.get(key)
    }

    /// Whether `key` still names a live node.
    pub fn contains(&self, key: FileKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Find a node by its full path.
    pub fn find(&self, path: impl AsRef<Path>) -> Option<FileKey> {
        let path = path.as_ref();
        self.nodes
            .iter()
            .find(|(_, node)| node.path == path)
            .map(|(key, _)| key)
    }

    /// Iterate over all live node keys.
    pub fn keys(&self) -> impl Iterator<Item = FileKey> + '_ {
        self.nodes.keys()
    }

    /// Read the raw content of a file node, caching it on the node.
    ///
    /// Subsequent calls return the cached bytes until
    /// [`dispose_content`](Self::dispose_content) is called.
    pub fn read_content(&mut self, key: FileKey) -> Result<&[u8], FileTreeError> {
        let node = &mut self.nodes[key];
        if node.is_directory {
            return Err(FileTreeError::NotAFile(node.path.clone()));
        }
        if node.content.is_none() {
            let bytes = fs::read(&node.path)?;
            log::debug!("Read {} bytes from {:?}", bytes.len(), node.path);
            node.content = Some(bytes);
        }
        Ok(self.nodes[key].content.as_deref().unwrap_or_default())
    }

    /// Drop any cached content for a node. No-op if nothing is cached.
    pub fn dispose_content(&mut self, key: FileKey) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.content = None;
        }
    }

    /// Replace the content of a file node, writing through to disk.
    pub fn modify_content(&mut self, key: FileKey, bytes: &[u8]) -> Result<(), FileTreeError> {
        let node = &mut self.nodes[key];
        if node.is_directory {
            return Err(FileTreeError::NotAFile(node.path.clone()));
        }
        fs::write(&node.path, bytes)?;
        node.content = Some(bytes.to_vec());
        log::debug!("Wrote {} bytes to {:?}", bytes.len(), node.path);
        Ok(())
    }

    fn check_child_name(&self, parent: FileKey, name: &str) -> Result<PathBuf, FileTreeError> {
        let parent_node = &self.nodes[parent];
        if !parent_node.is_directory {
            return Err(FileTreeError::NotADirectory(parent_node.path.clone()));
        }
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(FileTreeError::InvalidName(name.to_string()));
        }
        let clash = parent_node
            .children
            .iter()
            .any(|&child| self.nodes[child].name == name);
        if clash {
            return Err(FileTreeError::NameTaken {
                parent: parent_node.path.clone(),
                name: name.to_string(),
            });
        }
        Ok(parent_node.path.join(name))
    }

    /// Create a regular file under `parent` with the given content.
    pub fn create_child_file(
        &mut self,
        parent: FileKey,
        name: &str,
        content: &[u8],
    ) -> Result<FileKey, FileTreeError> {
        let path = self.check_child_name(parent, name)?;
        fs::write(&path, content)?;
        let key = self.insert_node(parent, &path, false);
        self.nodes[key].content = Some(content.to_vec());
        log::info!("Created file {path:?}");
        Ok(key)
    }

    /// Create a directory under `parent`.
    pub fn create_child_folder(
        &mut self,
        parent: FileKey,
        name: &str,
    ) -> Result<FileKey, FileTreeError> {
        let path = self.check_child_name(parent, name)?;
        fs::create_dir(&path)?;
        let key = self.insert_node(parent, &path, true);
        log::info!("Created folder {path:?}");
        Ok(key)
    }

    /// Move a node (file or whole subtree) under a new parent directory.
    ///
    /// Keys are untouched; only paths and parent/child links change.
    pub fn move_node(&mut self, key: FileKey, new_parent: FileKey) -> Result<(), FileTreeError> {
        if key == self.root {
            return Err(FileTreeError::RootNode);
        }
        let name = self.nodes[key].name.clone();
        let new_path = self.check_child_name(new_parent, &name)?;
        let old_path = self.nodes[key].path.clone();
        fs::rename(&old_path, &new_path)?;

        if let Some(old_parent) = self.nodes[key].parent {
            let siblings = &mut self.nodes[old_parent].children;
            siblings.retain(|&sibling| sibling != key);
        }
        self.nodes[key].parent = Some(new_parent);
        self.nodes[new_parent].children.push(key);
        self.repath(key, &new_path);
        log::info!("Moved {old_path:?} to {new_path:?}");
        Ok(())
    }

    /// Recursively rewrite paths after a move.
    fn repath(&mut self, key: FileKey, new_path: &Path) {
        self.nodes[key].path = new_path.to_path_buf();
        let children = self.nodes[key].children.clone();
        for child in children {
            let child_path = new_path.join(&self.nodes[child].name);
            self.repath(child, &child_path);
        }
    }

    /// Delete a node from disk and from the tree.
    ///
    /// For directories the whole subtree goes. Returns every removed key
    /// so the caller can purge indexes that reference them.
    pub fn delete(&mut self, key: FileKey) -> Result<Vec<FileKey>, FileTreeError> {
        if key == self.root {
            return Err(FileTreeError::RootNode);
        }
        let path = self.nodes[key].path.clone();
        if self.nodes[key].is_directory {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }

        if let Some(parent) = self.nodes[key].parent {
            self.nodes[parent].children.retain(|&child| child != key);
        }
        let mut removed = Vec::new();
        self.collect_subtree(key, &mut removed);
        for &dead in &removed {
            self.nodes.remove(dead);
        }
        log::info!("Deleted {path:?} ({} nodes)", removed.len());
        Ok(removed)
    }

    fn collect_subtree(&self, key: FileKey, out: &mut Vec<FileKey>) {
        out.push(key);
        for &child in &self.nodes[key].children {
            self.collect_subtree(child, out);
        }
    }

    /// Re-walk the disk and add any files or directories discovered since
    /// the last scan. Existing nodes keep their keys; nothing is pruned.
    ///
    /// Returns the newly discovered keys.
    pub fn rescan(&mut self) -> Result<Vec<FileKey>, FileTreeError> {
        let mut discovered = Vec::new();
        self.rescan_directory(self.root, &mut discovered)?;
        if !discovered.is_empty() {
            log::info!("Rescan discovered {} new nodes", discovered.len());
        }
        Ok(discovered)
    }

    fn rescan_directory(
        &mut self,
        directory: FileKey,
        discovered: &mut Vec<FileKey>,
    ) -> Result<(), FileTreeError> {
        let mut entries: Vec<(PathBuf, bool)> = Vec::new();
        for entry in fs::read_dir(self.node(directory).path())? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_file() || file_type.is_dir() {
                entries.push((entry.path(), file_type.is_dir()));
            }
        }
        entries.sort();

        for (path, is_dir) in entries {
            let existing = self.node(directory).children.iter().copied().find(|&child| {
                self.nodes[child].name
                    == path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default()
            });
            let key = match existing {
                Some(key) => key,
                None => {
                    let key = self.insert_node(directory, &path, is_dir);
                    discovered.push(key);
                    key
                }
            };
            if is_dir {
                self.rescan_directory(key, discovered)?;
            }
        }
        Ok(())
    }
}
