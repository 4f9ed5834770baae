use docflow_core::DocflowError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Shared content: tag name to the URL of a document fragment to inline.
///
/// ```
/// use docflow_site::registry::SharedContent;
///
/// let shared = SharedContent::new().with("NeedHelp", "shared-content/need-help");
/// assert_eq!(shared.get("NeedHelp"), Some("shared-content/need-help"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedContent(BTreeMap<String, String>);

impl SharedContent {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry (builder style).
    pub fn with(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.insert(name, url);
        self
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.0.insert(name.into(), url.into());
    }

    /// URL registered for a tag name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterates entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads the map from a JSON object (`{"NeedHelp": "shared-content/need-help"}`).
    pub fn from_json(json: &str) -> Result<Self, DocflowError> {
        serde_json::from_str(json).map_err(|err| DocflowError::Props(err.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SharedContent {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Loads the document source behind a shared-content URL.
pub trait IncludeSource: Send + Sync {
    /// Returns the markdown/MDX text for `url`.
    fn load(&self, url: &str) -> Result<String, DocflowError>;
}

/// Include source for renderers that have no shared content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncludes;

impl IncludeSource for NoIncludes {
    fn load(&self, url: &str) -> Result<String, DocflowError> {
        Err(DocflowError::include(url, "no include source configured"))
    }
}

/// In-memory sources keyed by URL.
impl IncludeSource for HashMap<String, String> {
    fn load(&self, url: &str) -> Result<String, DocflowError> {
        self.get(url)
            .cloned()
            .ok_or_else(|| DocflowError::include(url, "not found"))
    }
}

/// Reads shared content from a content directory.
///
/// `shared-content/need-help` resolves to the first existing file of
/// `<root>/shared-content/need-help.md`, `.mdx`, or the path as given.
#[derive(Debug, Clone)]
pub struct FsIncludeSource {
    root: PathBuf,
}

impl FsIncludeSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, url: &str) -> Result<Vec<PathBuf>, DocflowError> {
        let relative = Path::new(url.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(DocflowError::include(url, "path escapes the content root"));
        }

        let base = self.root.join(relative);
        let mut candidates = Vec::with_capacity(3);
        for ext in ["md", "mdx"] {
            let mut name = base.clone().into_os_string();
            name.push(".");
            name.push(ext);
            candidates.push(PathBuf::from(name));
        }
        candidates.push(base);
        Ok(candidates)
    }
}

impl IncludeSource for FsIncludeSource {
    fn load(&self, url: &str) -> Result<String, DocflowError> {
        for path in self.candidates(url)? {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    log::debug!("Loaded shared content {} from {}", url, path.display());
                    return Ok(text);
                }
                Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
                    continue;
                }
                Err(err) => return Err(DocflowError::include(url, err.to_string())),
            }
        }
        Err(DocflowError::include(
            url,
            format!("not found under {}", self.root.display()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_content_from_json() {
        let shared =
            SharedContent::from_json(r#"{"NeedHelp":"shared-content/need-help","Lr":"lr"}"#)
                .unwrap();
        assert_eq!(shared.len(), 2);
        let names: Vec<_> = shared.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Lr", "NeedHelp"]);
    }

    #[test]
    fn test_shared_content_from_iter() {
        let shared: SharedContent = [("A", "a")].into_iter().collect();
        assert_eq!(shared.get("A"), Some("a"));
        assert!(shared.get("B").is_none());
    }

    #[test]
    fn test_fs_source_prefers_md() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("shared-content")).unwrap();
        std::fs::write(dir.path().join("shared-content/need-help.md"), "md body").unwrap();
        std::fs::write(dir.path().join("shared-content/need-help.mdx"), "mdx body").unwrap();

        let source = FsIncludeSource::new(dir.path());
        assert_eq!(source.load("shared-content/need-help").unwrap(), "md body");
        assert_eq!(source.load("/shared-content/need-help").unwrap(), "md body");
    }

    #[test]
    fn test_fs_source_exact_path_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "plain").unwrap();
        let source = FsIncludeSource::new(dir.path());
        assert_eq!(source.load("notes.txt").unwrap(), "plain");
    }

    #[test]
    fn test_fs_source_missing_and_escaping() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsIncludeSource::new(dir.path());
        assert!(matches!(
            source.load("missing"),
            Err(DocflowError::Include { .. })
        ));
        let err = source.load("../secrets").unwrap_err();
        assert!(err.to_string().contains("escapes"), "{err}");
    }

    #[test]
    fn test_memory_and_empty_sources() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), "A".to_string());
        assert_eq!(map.load("a").unwrap(), "A");
        assert!(map.load("b").is_err());
        assert!(NoIncludes.load("a").is_err());
    }
}
