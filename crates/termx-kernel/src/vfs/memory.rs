//! In-memory filesystem with snapshot-and-swap mutation.
//!
//! The tree lives behind an `Arc`. Every mutation clones the whole tree,
//! applies the change to the clone and installs it only on success, so a
//! snapshot taken before a mutation never observes a half-applied change.

use std::sync::Arc;

use termx_types::{Children, DirEntry, EntryKind, FileTree, FsNode};

use super::{VfsError, VfsPath, VfsResult};

/// Outcome of `create_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touched {
    /// A new empty file was created.
    Created,
    /// Something with that name already existed; nothing changed.
    Existing,
}

/// The session's filesystem.
#[derive(Debug, Clone, Default)]
pub struct VirtualFs {
    tree: Arc<FileTree>,
}

impl VirtualFs {
    /// Wrap an existing tree.
    pub fn new(tree: FileTree) -> Self {
        Self {
            tree: Arc::new(tree),
        }
    }

    /// A consistent snapshot of the current tree.
    pub fn snapshot(&self) -> Arc<FileTree> {
        Arc::clone(&self.tree)
    }

    /// Replace the whole tree (used when the backend is authoritative).
    pub fn replace(&mut self, tree: FileTree) {
        self.tree = Arc::new(tree);
    }

    /// Walk `path` from the root.
    ///
    /// Fails on the first missing segment or the first segment that is not
    /// a directory; never returns a partial result.
    pub fn resolve(&self, path: &VfsPath) -> VfsResult<&FsNode> {
        let mut node = self.tree.root();
        for seg in path.segments() {
            node = node
                .children()
                .and_then(|children| children.get(seg))
                .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        }
        Ok(node)
    }

    /// Turn user input into the absolute path of an existing node.
    ///
    /// A leading `/` starts at the root, a leading `~` at `home`, anything
    /// else at `base`. `.` is skipped and `..` steps up, stopping at the root.
    /// Every named segment must exist and every intermediate segment must be
    /// a directory.
    pub fn locate(&self, base: &VfsPath, input: &str, home: &VfsPath) -> VfsResult<VfsPath> {
        let root = VfsPath::root();
        let (start, rest) = if input.starts_with('/') {
            (&root, input)
        } else if input == "~" || input.starts_with("~/") {
            (home, &input[1..])
        } else {
            (base, input)
        };

        let steps = start
            .segments()
            .iter()
            .map(String::as_str)
            .chain(rest.split('/').filter(|s| !s.is_empty()));

        // `nodes[i + 1]` is the node named by `segments[i]`.
        let mut nodes: Vec<&FsNode> = vec![self.tree.root()];
        let mut segments: Vec<&str> = Vec::new();
        for seg in steps {
            match seg {
                "." => {}
                ".." => {
                    if segments.pop().is_some() {
                        nodes.pop();
                    }
                }
                name => {
                    let next = nodes
                        .last()
                        .copied()
                        .and_then(FsNode::children)
                        .and_then(|children| children.get(name))
                        .ok_or_else(|| VfsError::NotFound(input.to_string()))?;
                    nodes.push(next);
                    segments.push(name);
                }
            }
        }
        Ok(VfsPath::from_segments(segments))
    }

    /// Split `input` into an existing parent directory and a final name.
    ///
    /// `projects/notes` gives (`<base>/projects`, `notes`); a bare name gives
    /// (`base`, name).
    pub fn split_target(
        &self,
        base: &VfsPath,
        input: &str,
        home: &VfsPath,
    ) -> VfsResult<(VfsPath, String)> {
        let trimmed = input.trim_end_matches('/');
        let (parent, name) = match trimmed.rsplit_once('/') {
            Some(("", name)) => (VfsPath::root(), name),
            Some((parent, name)) => (self.locate(base, parent, home)?, name),
            None => (base.clone(), trimmed),
        };
        validate_name(name)?;
        Ok((parent, name.to_string()))
    }

    /// Create an empty directory `name` under `parent`.
    ///
    /// Fails with `AlreadyExists` if anything named `name` is already there;
    /// the tree is left untouched on every failure.
    pub fn create_directory(&mut self, parent: &VfsPath, name: &str) -> VfsResult<()> {
        validate_name(name)?;
        self.swap(|tree| {
            let children = dir_mut(tree, parent)?;
            if children.contains_key(name) {
                return Err(VfsError::AlreadyExists(name.to_string()));
            }
            children.insert(name.to_string(), FsNode::directory());
            Ok(())
        })
    }

    /// Create an empty file `name` under `parent`. An existing entry of
    /// either kind makes this a no-op.
    pub fn create_file(&mut self, parent: &VfsPath, name: &str) -> VfsResult<Touched> {
        validate_name(name)?;
        let dir = self.resolve(parent)?;
        match dir.children() {
            None => Err(VfsError::NotADirectory(parent.to_string())),
            Some(children) if children.contains_key(name) => Ok(Touched::Existing),
            Some(_) => self.swap(|tree| {
                dir_mut(tree, parent)?.insert(name.to_string(), FsNode::file(""));
                Ok(Touched::Created)
            }),
        }
    }

    /// Content of the file at `path`.
    pub fn read_file(&self, path: &VfsPath) -> VfsResult<&str> {
        match self.resolve(path)? {
            FsNode::File { content } => Ok(content),
            FsNode::Directory { .. } => Err(VfsError::IsDirectory(path.to_string())),
        }
    }

    /// Entries of the directory at `path`, in insertion order.
    pub fn list_directory(&self, path: &VfsPath) -> VfsResult<Vec<DirEntry>> {
        let children = self
            .resolve(path)?
            .children()
            .ok_or_else(|| VfsError::NotADirectory(path.to_string()))?;
        Ok(children
            .iter()
            .map(|(name, node)| DirEntry {
                name: name.clone(),
                kind: if node.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
            })
            .collect())
    }

    /// Remove `name` (file or whole directory) from `parent`.
    pub fn remove(&mut self, parent: &VfsPath, name: &str) -> VfsResult<()> {
        self.swap(|tree| {
            dir_mut(tree, parent)?
                .shift_remove(name)
                .map(|_| ())
                .ok_or_else(|| VfsError::NotFound(parent.join(name).to_string()))
        })
    }

    /// Apply `f` to a private copy and install the copy only if `f` succeeds.
    fn swap<T>(&mut self, f: impl FnOnce(&mut FileTree) -> VfsResult<T>) -> VfsResult<T> {
        let mut next = FileTree::clone(&self.tree);
        let out = f(&mut next)?;
        self.tree = Arc::new(next);
        Ok(out)
    }
}

fn dir_mut<'a>(tree: &'a mut FileTree, path: &VfsPath) -> VfsResult<&'a mut Children> {
    let mut children = tree.entries_mut();
    for seg in path.segments() {
        children = match children.get_mut(seg) {
            Some(FsNode::Directory { children }) => children,
            Some(FsNode::File { .. }) => return Err(VfsError::NotADirectory(path.to_string())),
            None => return Err(VfsError::NotFound(path.to_string())),
        };
    }
    Ok(children)
}

fn validate_name(name: &str) -> VfsResult<()> {
    // A bare `~` always means home, never an entry name.
    if matches!(name, "" | "." | ".." | "~") || name.contains('/') {
        return Err(VfsError::InvalidName(name.to_string()));
    }
    Ok(())
}
