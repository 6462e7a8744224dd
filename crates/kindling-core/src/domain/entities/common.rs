use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A project-relative output path.
///
/// Invariant: never absolute and never escapes the project root. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));

        if path.is_absolute() || escapes {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash rendering, stable across platforms.
    pub fn as_str(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Resolve against a project root.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_paths() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
    }

    #[test]
    fn rejects_parent_traversal() {
        assert!(RelativePath::try_new("apis/../../outside.go").is_err());
    }

    #[test]
    fn renders_with_forward_slashes() {
        let path = RelativePath::try_new("apis/compute/v1alpha1/doc.go").unwrap();
        assert_eq!(path.as_str(), "apis/compute/v1alpha1/doc.go");
        assert_eq!(path.under(Path::new("out")), PathBuf::from("out/apis/compute/v1alpha1/doc.go"));
    }
}
