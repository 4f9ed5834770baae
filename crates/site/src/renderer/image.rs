//! Image sizing, float hints, and zoom selection.

use crate::options::ContentOptions;

const NO_BORDER: &str = "no-border";
const FLOAT_RIGHT: &str = "float-right clear-left p-4 grayscale filter";
const FLOAT_LEFT: &str = "float-left clear-right p-4 grayscale filter";

/// Attributes handed to the image collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProps {
    /// Image URL (query string removed for float hints).
    pub src: String,
    /// Alt text.
    pub alt: String,
    /// Title, unless it was the `no-border` marker.
    pub title: Option<String>,
    /// Space-separated classes, if any.
    pub class_name: Option<String>,
    /// Intrinsic width.
    pub width: u32,
    /// Intrinsic height.
    pub height: u32,
    /// Inline style.
    pub style: &'static str,
    /// Wrap in the click-to-zoom collaborator.
    pub zoom: bool,
}

impl ImageProps {
    /// Resolves the image attributes for a markdown image under `options`.
    ///
    /// PostgreSQL tutorial images never zoom; a query string on their URL
    /// carries `alignleft` / `alignright` float hints. Every other image is
    /// zoomable and sized for the docs or release-note column.
    pub fn resolve(src: &str, alt: &str, title: Option<&str>, options: &ContentOptions) -> Self {
        let no_border_title = title == Some(NO_BORDER);
        let title = title.filter(|t| *t != NO_BORDER).map(str::to_string);

        if !options.is_postgres {
            let (width, height) = if options.is_release_note {
                (762, 428)
            } else {
                (796, 447)
            };
            return Self {
                src: src.to_string(),
                alt: alt.to_string(),
                title,
                class_name: class_list(&[(NO_BORDER, no_border_title)]),
                width,
                height,
                style: "width:100%;height:100%",
                zoom: true,
            };
        }

        match src.split_once('?') {
            Some((path, _query)) => {
                let align_left = src.contains("alignleft");
                let align_right = src.contains("alignright");
                Self {
                    src: path.to_string(),
                    alt: alt.to_string(),
                    title,
                    class_name: class_list(&[
                        (NO_BORDER, no_border_title || align_left || align_right),
                        (FLOAT_RIGHT, align_right),
                        (FLOAT_LEFT, align_left),
                    ]),
                    width: 100,
                    height: 100,
                    style: "width:auto;height:auto;max-width:128px;max-height:128px",
                    zoom: false,
                }
            }
            None => Self {
                src: src.to_string(),
                alt: alt.to_string(),
                title,
                class_name: class_list(&[(NO_BORDER, no_border_title)]),
                width: 200,
                height: 100,
                style: "width:auto;height:auto",
                zoom: false,
            },
        }
    }
}

fn class_list(entries: &[(&str, bool)]) -> Option<String> {
    let classes: Vec<&str> = entries
        .iter()
        .filter(|(_, on)| *on)
        .map(|(class, _)| *class)
        .collect();
    (!classes.is_empty()).then(|| classes.join(" "))
}
