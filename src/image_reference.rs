use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque handle to a user-selected image. Passed by value between screens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts plain paths and `file://` URIs. URIs are percent-decoded.
    pub fn to_path(&self) -> PathBuf {
        if !self.0.starts_with("file://") {
            return PathBuf::from(&self.0);
        }
        match url::Url::parse(&self.0).map(|uri| uri.to_file_path()) {
            Ok(Ok(path)) => path,
            _ => PathBuf::from(self.0.trim_start_matches("file://")),
        }
    }

    pub fn file_name(&self) -> String {
        self.to_path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.clone())
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
