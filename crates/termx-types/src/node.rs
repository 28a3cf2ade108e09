//! Filesystem tree nodes.
//!
//! A session owns exactly one [`FileTree`], whose root is always a directory.
//! Children keep insertion order so listings come back in creation order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Child mapping of a directory, in insertion order.
pub type Children = IndexMap<String, FsNode>;

/// A node in the synthetic filesystem.
///
/// Serialized with a `type` tag (`"directory"` / `"file"`), matching what the
/// remote backend reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FsNode {
    Directory {
        #[serde(default)]
        children: Children,
    },
    File {
        #[serde(default)]
        content: String,
    },
}

impl FsNode {
    /// An empty directory.
    pub fn directory() -> Self {
        FsNode::Directory {
            children: Children::new(),
        }
    }

    /// A file with the given content.
    pub fn file(content: impl Into<String>) -> Self {
        FsNode::File {
            content: content.into(),
        }
    }

    /// Returns true if this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FsNode::Directory { .. })
    }

    /// Returns true if this node is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, FsNode::File { .. })
    }

    /// Children of a directory, `None` for files.
    pub fn children(&self) -> Option<&Children> {
        match self {
            FsNode::Directory { children } => Some(children),
            FsNode::File { .. } => None,
        }
    }

    /// Mutable children of a directory, `None` for files.
    pub fn children_mut(&mut self) -> Option<&mut Children> {
        match self {
            FsNode::Directory { children } => Some(children),
            FsNode::File { .. } => None,
        }
    }

    /// Builder helper: add a child to a directory. No-op on files.
    pub fn with_child(mut self, name: impl Into<String>, node: FsNode) -> Self {
        if let Some(children) = self.children_mut() {
            children.insert(name.into(), node);
        }
        self
    }
}

/// Kind of directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A directory entry returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    /// Kind of entry.
    pub kind: EntryKind,
}

impl DirEntry {
    /// Returns true if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// The whole filesystem: a tree whose root is always a directory.
///
/// On the wire the root is written as a bare child mapping
/// (`{"home": {"type": "directory", ...}}`). Reading accepts that form and
/// also a tagged root directory.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTree {
    root: FsNode,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            root: FsNode::directory(),
        }
    }

    /// A tree whose root holds the given children.
    pub fn from_children(children: Children) -> Self {
        Self {
            root: FsNode::Directory { children },
        }
    }

    /// The root directory node.
    pub fn root(&self) -> &FsNode {
        &self.root
    }

    /// Children of the root directory.
    pub fn entries(&self) -> &Children {
        match &self.root {
            FsNode::Directory { children } => children,
            // Constructors only ever build a directory root.
            FsNode::File { .. } => unreachable!("file tree root is always a directory"),
        }
    }

    /// Children of the root directory, mutably.
    pub fn entries_mut(&mut self) -> &mut Children {
        match &mut self.root {
            FsNode::Directory { children } => children,
            FsNode::File { .. } => unreachable!("file tree root is always a directory"),
        }
    }
}

impl Serialize for FileTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RootRepr {
    Tagged(FsNode),
    Bare(Children),
}

impl<'de> Deserialize<'de> for FileTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RootRepr::deserialize(deserializer)? {
            RootRepr::Tagged(FsNode::Directory { children }) | RootRepr::Bare(children) => {
                Ok(FileTree::from_children(children))
            }
            RootRepr::Tagged(FsNode::File { .. }) => Err(serde::de::Error::custom(
                "file tree root must be a directory",
            )),
        }
    }
}
