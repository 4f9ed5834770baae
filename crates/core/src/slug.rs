use std::collections::HashMap;

/// Splits a trailing `{#custom-id}` off heading text.
///
/// The id may only contain ASCII alphanumerics, `-` and `_`.
///
/// ```
/// use docflow_core::slug::extract_custom_id;
///
/// assert_eq!(extract_custom_id("Setup {#setup-guide}"), ("Setup", Some("setup-guide")));
/// assert_eq!(extract_custom_id("Setup"), ("Setup", None));
/// ```
pub fn extract_custom_id(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    let Some(without_close) = trimmed.strip_suffix('}') else {
        return (text, None);
    };
    let Some(open) = without_close.rfind("{#") else {
        return (text, None);
    };

    let id = &without_close[open + 2..];
    if is_valid_custom_id(id) {
        (without_close[..open].trim_end(), Some(id))
    } else {
        (text, None)
    }
}

/// Reads a custom id from an MDX expression body (`#setup-guide`).
///
/// With MDX expressions enabled, `## Setup {#setup-guide}` parses the
/// braces as an expression node; this is its text form.
pub fn custom_id_from_expression(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix('#')
        .filter(|id| is_valid_custom_id(id))
}

fn is_valid_custom_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Lowercases text and keeps only characters valid in a github-style anchor.
///
/// Whitespace becomes `-`; other punctuation is dropped.
pub fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Generates unique heading slugs within one document.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slug for `text`, suffixing `-1`, `-2`, ... on repeats.
    pub fn next_slug(&mut self, text: &str) -> String {
        self.unique(&slugify(text))
    }

    /// Claims a custom id as written.
    ///
    /// An id that is already taken gets the next free `-N` suffix, so no two
    /// headings share an anchor.
    pub fn claim(&mut self, id: &str) -> String {
        if self.seen.contains_key(id) {
            log::warn!("Custom heading id '{}' is already in use", id);
        }
        self.unique(id)
    }

    fn unique(&mut self, base: &str) -> String {
        if !self.seen.contains_key(base) {
            self.seen.insert(base.to_string(), 0);
            return base.to_string();
        }
        loop {
            let count = self.seen.entry(base.to_string()).or_insert(0);
            *count += 1;
            let candidate = format!("{}-{}", base, count);
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(candidate.clone(), 0);
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_drops_punctuation() {
        assert_eq!(slugify("Connect from Node.js!"), "connect-from-nodejs");
        assert_eq!(slugify("  Branch_reset  "), "branch_reset");
        assert_eq!(slugify("Größe"), "größe");
    }

    #[test]
    fn slugger_deduplicates() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Example"), "example");
        assert_eq!(slugger.next_slug("Example"), "example-1");
        assert_eq!(slugger.next_slug("Example"), "example-2");
        assert_eq!(slugger.next_slug("Example 1"), "example-1-1");
    }

    #[test]
    fn claimed_ids_are_skipped() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.claim("setup"), "setup");
        assert_eq!(slugger.next_slug("Setup"), "setup-1");
    }

    #[test]
    fn claim_suffixes_taken_ids() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Setup"), "setup");
        assert_eq!(slugger.claim("setup"), "setup-1");
        assert_eq!(slugger.claim("setup"), "setup-2");
        assert_eq!(slugger.next_slug("Setup"), "setup-3");
    }

    #[test]
    fn custom_id_from_expression_body() {
        assert_eq!(custom_id_from_expression("#setup-guide"), Some("setup-guide"));
        assert_eq!(custom_id_from_expression(" #a_b "), Some("a_b"));
        assert_eq!(custom_id_from_expression("/* note */"), None);
        assert_eq!(custom_id_from_expression("#bad id"), None);
    }

    #[test]
    fn custom_id_requires_valid_chars() {
        assert_eq!(extract_custom_id("Title {#bad id}"), ("Title {#bad id}", None));
        assert_eq!(extract_custom_id("Title {#}"), ("Title {#}", None));
    }
}
