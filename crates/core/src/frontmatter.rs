use markdown::mdast::Node;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Errors emitted while reading frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Reads the YAML frontmatter node of a parsed document.
///
/// markdown-rs places frontmatter as the first child of the root when the
/// `frontmatter` construct is enabled. Documents without one yield an empty
/// object.
pub fn frontmatter_from_tree(root: &Node) -> Result<Map<String, JsonValue>, FrontmatterError> {
    let yaml = root
        .children()
        .and_then(|children| children.first())
        .and_then(|first| match first {
            Node::Yaml(yaml) => Some(yaml.value.as_str()),
            _ => None,
        });

    match yaml {
        Some(block) => parse_yaml_block(block),
        None => Ok(Map::new()),
    }
}

fn parse_yaml_block(block: &str) -> Result<Map<String, JsonValue>, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    match serde_json::to_value(value).map_err(|err| FrontmatterError::Parse(err.to_string()))? {
        JsonValue::Null => Ok(Map::new()),
        JsonValue::Object(map) => Ok(map),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseOptions, parse_mdast};

    fn read(input: &str) -> Result<Map<String, JsonValue>, FrontmatterError> {
        let tree = parse_mdast(input, &ParseOptions::docs()).expect("document should parse");
        frontmatter_from_tree(&tree)
    }

    #[test]
    fn returns_empty_without_frontmatter() {
        assert!(read("# Title\n\nBody").unwrap().is_empty());
    }

    #[test]
    fn parses_mapping() {
        let map = read("---\ntitle: Branching\nredirectFrom:\n  - /docs/a\n---\n\n# Body").unwrap();
        assert_eq!(map.get("title").and_then(JsonValue::as_str), Some("Branching"));
        assert_eq!(
            map.get("redirectFrom")
                .and_then(JsonValue::as_array)
                .map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn rejects_scalar_root() {
        let err = read("---\njust a string\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidRootType), "{err:?}");
    }

    #[test]
    fn reports_invalid_yaml() {
        let err = read("---\ntitle: [unterminated\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Parse(_)), "{err:?}");
    }
}
