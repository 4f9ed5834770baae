//! Turns a code fence's language and meta string into component props.
//!
//! ````text
//! ```js title="index.js" showLineNumbers {1,3-5}
//! ````
//!
//! yields `language=js`, `title=index.js`, `showLineNumbers=true` and
//! `highlight=1,3-5`.

use std::collections::BTreeMap;

/// Props extracted from a fenced code block, ordered by key.
pub type CodeProps = BTreeMap<String, String>;

/// Parses fence language and meta into props.
pub fn parse_code_meta(lang: Option<&str>, meta: Option<&str>) -> CodeProps {
    let mut props = CodeProps::new();
    if let Some(lang) = lang.filter(|l| !l.is_empty()) {
        props.insert("language".to_string(), lang.to_string());
    }

    let Some(meta) = meta else {
        return props;
    };

    let mut rest = meta.trim();
    while !rest.is_empty() {
        let (token, remaining) = next_token(rest);
        rest = remaining.trim_start();

        if let Some(ranges) = token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
            props.insert("highlight".to_string(), ranges.replace(' ', ""));
            continue;
        }

        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                props.insert(key.to_string(), unquote(value).to_string());
            }
            Some(_) => log::debug!("Ignoring code meta token without key: {}", token),
            None => {
                props.insert(token.to_string(), "true".to_string());
            }
        }
    }

    props
}

/// Splits the next whitespace-delimited token, keeping quoted values and
/// `{...}` ranges whole.
fn next_token(input: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut braces = 0usize;

    for (idx, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '{') => braces += 1,
            (None, '}') => braces = braces.saturating_sub(1),
            (None, c) if c.is_whitespace() && braces == 0 => {
                return (&input[..idx], &input[idx..]);
            }
            _ => {}
        }
    }

    (input, "")
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(q).and_then(|v| v.strip_suffix(q)) {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_only() {
        let props = parse_code_meta(Some("sql"), None);
        assert_eq!(props.len(), 1);
        assert_eq!(props["language"], "sql");
    }

    #[test]
    fn mixed_meta() {
        let props = parse_code_meta(
            Some("js"),
            Some(r#"title="db connect.js" showLineNumbers {1, 3-5}"#),
        );
        assert_eq!(props["language"], "js");
        assert_eq!(props["title"], "db connect.js");
        assert_eq!(props["showLineNumbers"], "true");
        assert_eq!(props["highlight"], "1,3-5");
    }

    #[test]
    fn single_quoted_values() {
        let props = parse_code_meta(None, Some("shouldWrap label='psql output'"));
        assert!(!props.contains_key("language"));
        assert_eq!(props["shouldWrap"], "true");
        assert_eq!(props["label"], "psql output");
    }

    #[test]
    fn empty_key_is_ignored() {
        let props = parse_code_meta(None, Some("=oops"));
        assert!(props.is_empty());
    }
}
