//! Two-column row: an illustration beside a titled list of items.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// One entry of a row. `text` is trusted inline markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentItem {
    /// Icon asset path.
    pub icon: &'static str,
    /// Plain-text title.
    pub title: &'static str,
    /// Trusted inline markup, inserted verbatim.
    pub text: &'static str,
}

/// Which side of the row holds the illustration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImagePosition {
    /// Illustration first.
    #[default]
    Left,
    /// Illustration last.
    Right,
}

/// Inputs for [`Row`].
#[derive(Debug, Clone, Copy)]
pub struct RowProps {
    /// Row title.
    pub title: &'static str,
    /// Items, in display order.
    pub items: &'static [ContentItem],
    /// Illustration asset path.
    pub image: &'static str,
    /// Illustration side.
    pub image_position: ImagePosition,
}

/// Row layout.
#[derive(Debug, Clone, Copy)]
pub struct Row {
    props: RowProps,
}

impl Row {
    /// Creates a row from its props.
    pub fn new(props: RowProps) -> Self {
        Self { props }
    }

    /// Writes the row markup into `out`.
    pub fn render_into(&self, out: &mut String) {
        let RowProps {
            title,
            items,
            image,
            image_position,
        } = self.props;

        out.push_str("<div class=\"grid grid-cols-10 items-center gap-x-10 xl:gap-x-6 md:grid-cols-1 md:gap-y-8\">");
        if image_position == ImagePosition::Left {
            push_illustration(out, image, title, "col-span-5 md:order-first");
        }

        out.push_str("<div class=\"col-span-5\"><h3 class=\"text-4xl font-medium tracking-tight text-white lg:text-3xl\">");
        out.push_str(&encode_text(title));
        out.push_str("</h3><ul class=\"mt-8 flex flex-col gap-y-7\">");
        for item in items {
            push_item(out, item);
        }
        out.push_str("</ul></div>");

        if image_position == ImagePosition::Right {
            push_illustration(out, image, title, "col-span-5 md:order-first");
        }
        out.push_str("</div>");
    }

    /// Returns the row markup.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

fn push_illustration(out: &mut String, image: &str, title: &str, class: &str) {
    out.push_str("<div class=\"");
    out.push_str(class);
    out.push_str("\"><img class=\"rounded-lg\" src=\"");
    out.push_str(&encode_double_quoted_attribute(image));
    out.push_str("\" alt=\"");
    out.push_str(&encode_double_quoted_attribute(title));
    out.push_str("\" width=\"590\" height=\"400\" loading=\"lazy\" /></div>");
}

fn push_item(out: &mut String, item: &ContentItem) {
    out.push_str("<li class=\"flex gap-x-3\"><img class=\"mt-1 h-6 w-6 shrink-0\" src=\"");
    out.push_str(&encode_double_quoted_attribute(item.icon));
    out.push_str("\" alt=\"\" width=\"24\" height=\"24\" aria-hidden=\"true\" /><div><h4 class=\"text-lg font-medium leading-snug text-white\">");
    out.push_str(&encode_text(item.title));
    out.push_str("</h4><p class=\"mt-1.5 font-light leading-snug text-gray-new-70\">");
    out.push_str(item.text);
    out.push_str("</p></div></li>");
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &[ContentItem] = &[ContentItem {
        icon: "/icons/a.svg",
        title: "A <b>",
        text: "Uses <em>markup</em>",
    }];

    fn row(image_position: ImagePosition) -> String {
        Row::new(RowProps {
            title: "Storage & more",
            items: ITEMS,
            image: "/images/storage.jpg",
            image_position,
        })
        .render()
    }

    #[test]
    fn test_title_escaped_text_verbatim() {
        let html = row(ImagePosition::Left);
        assert!(html.contains("Storage &amp; more</h3>"));
        assert!(html.contains("A &lt;b&gt;</h4>"));
        assert!(html.contains("Uses <em>markup</em>"));
    }

    #[test]
    fn test_image_position() {
        let left = row(ImagePosition::Left);
        let right = row(ImagePosition::Right);
        let image_at = |html: &str| html.find("/images/storage.jpg").unwrap();
        let title_at = |html: &str| html.find("<h3").unwrap();
        assert!(image_at(&left) < title_at(&left));
        assert!(image_at(&right) > title_at(&right));
    }
}
