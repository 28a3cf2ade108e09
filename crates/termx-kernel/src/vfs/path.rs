//! Absolute paths inside the virtual filesystem.

use std::fmt;

/// An absolute path, stored as its segments from the root.
///
/// The wire form used by the backend has no leading slash (`home/user`);
/// the display form does (`/home/user`, or `/` for the root).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VfsPath {
    segments: Vec<String>,
}

impl VfsPath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a slash-separated path. Empty segments are dropped, so
    /// `home/user`, `/home/user/` and `home//user` are all the same path.
    ///
    /// No `.`/`..` handling happens here; use `VirtualFs::locate` for user input.
    pub fn parse(s: &str) -> Self {
        Self {
            segments: s
                .split('/')
                .filter(|seg| !seg.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build a path from segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True if `ancestor` is this path or one of its parents.
    pub fn starts_with(&self, ancestor: &VfsPath) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }

    /// This path with one more segment appended.
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// The parent path; the root is its own parent.
    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// Last segment, `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Wire form: segments joined by `/` with no leading slash.
    pub fn to_wire(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}
