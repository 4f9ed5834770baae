//! Default HTML markup for rendered blocks and presentational collaborators.
//!
//! Hosts that bring their own components consume [`RenderBlock`]s directly;
//! everything here is the static fallback used by [`RenderedContent::to_html`].

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::registry::ComponentKind;
use crate::registry::components::kebab_case;
use crate::renderer::image::ImageProps;
use crate::renderer::{ContentBody, Props, RenderBlock, RenderedContent};
use docflow_core::CodeProps;

/// Renders the wrapper container and its body.
pub fn render_content(content: &RenderedContent) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"");
    out.push_str(&encode_double_quoted_attribute(&content.wrapper_class));
    out.push_str("\">");
    match &content.body {
        ContentBody::Blocks { blocks } => render_blocks_into(&mut out, blocks),
        // Trust boundary: the caller vouched for this markup.
        ContentBody::TrustedHtml { html } => {
            out.push_str("<div>");
            out.push_str(html);
            out.push_str("</div>");
        }
    }
    out.push_str("</div>");
    out
}

/// Renders blocks to an HTML string.
pub fn render_blocks(blocks: &[RenderBlock]) -> String {
    let mut out = String::new();
    render_blocks_into(&mut out, blocks);
    out
}

pub(crate) fn render_blocks_into(out: &mut String, blocks: &[RenderBlock]) {
    for block in blocks {
        match block {
            RenderBlock::Html { content } => out.push_str(content),
            RenderBlock::Code { code, props } => render_code(out, code, props),
            RenderBlock::Component {
                kind,
                props,
                children,
            } => render_component(out, *kind, props, children),
            RenderBlock::Include { name, url, children } => {
                out.push_str("<div class=\"include-block\" data-include=\"");
                out.push_str(&encode_double_quoted_attribute(name));
                out.push_str("\" data-url=\"");
                out.push_str(&encode_double_quoted_attribute(url));
                out.push_str("\">");
                render_blocks_into(out, children);
                out.push_str("</div>");
            }
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}

fn push_data_attrs<'a>(out: &mut String, props: impl IntoIterator<Item = (&'a String, &'a str)>) {
    for (key, value) in props {
        push_attr(out, &format!("data-{}", kebab_case(key)), value);
    }
}

/// Code-block collaborator: `<pre>` carrying the code props.
fn render_code(out: &mut String, code: &str, props: &CodeProps) {
    out.push_str("<pre class=\"code-block\"");
    push_data_attrs(out, props.iter().map(|(k, v)| (k, v.as_str())));
    out.push_str("><code");
    if let Some(lang) = props.get("language") {
        push_attr(out, "class", &format!("language-{}", lang));
    }
    out.push('>');
    out.push_str(&encode_text(code));
    out.push_str("</code></pre>");
}

fn render_component(out: &mut String, kind: ComponentKind, props: &Props, children: &[RenderBlock]) {
    match kind {
        ComponentKind::YoutubeIframe => render_youtube(out, props),
        ComponentKind::Admonition => render_admonition(out, props, children),
        _ => {
            out.push_str("<div");
            push_attr(out, "class", &kind.class_name());
            push_attr(out, "data-component", kind.name());
            push_data_attrs(out, props.iter().map(|(k, v)| (k, v.value())));
            out.push('>');
            render_blocks_into(out, children);
            out.push_str("</div>");
        }
    }
}

fn render_youtube(out: &mut String, props: &Props) {
    let embed_id = props
        .get("embedId")
        .or_else(|| props.get("id"))
        .map(|v| v.value())
        .unwrap_or_default();
    out.push_str("<div class=\"youtube-iframe\"><iframe");
    push_attr(
        out,
        "src",
        &format!("https://www.youtube.com/embed/{}", embed_id),
    );
    out.push_str(" title=\"YouTube video player\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen loading=\"lazy\"></iframe></div>");
}

fn render_admonition(out: &mut String, props: &Props, children: &[RenderBlock]) {
    let kind = props.get("type").map(|v| v.value()).unwrap_or("note");
    let title = match props.get("title") {
        Some(title) => title.value().to_string(),
        None => capitalize(kind),
    };
    out.push_str("<div");
    push_attr(out, "class", &format!("admonition admonition-{}", kind));
    out.push_str("><h4 class=\"admonition-title\">");
    out.push_str(&encode_text(&title));
    out.push_str("</h4><div class=\"admonition-content\">");
    render_blocks_into(out, children);
    out.push_str("</div></div>");
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Link collaborator: forwards the target, title, and children.
pub(crate) fn link(href: &str, title: Option<&str>, children_html: &str) -> String {
    let mut out = String::from("<a");
    push_attr(&mut out, "href", href);
    if let Some(title) = title {
        push_attr(&mut out, "title", title);
    }
    out.push('>');
    out.push_str(children_html);
    out.push_str("</a>");
    out
}

/// Empty anchor target for `[#id](#target)` links.
pub(crate) fn id_anchor(href: &str) -> String {
    match href.strip_prefix('#') {
        Some(id) => {
            let mut out = String::from("<span");
            push_attr(&mut out, "id", id);
            out.push_str("></span>");
            out
        }
        None => "<span></span>".to_string(),
    }
}

/// Anchor-heading decorator: slug id plus a trailing self link.
pub(crate) fn anchor_heading(depth: u8, slug: &str, children_html: &str) -> String {
    let mut out = format!("<h{}", depth);
    push_attr(&mut out, "id", slug);
    out.push_str(" class=\"anchor-heading\">");
    out.push_str(children_html);
    out.push_str("<a class=\"anchor\"");
    push_attr(&mut out, "href", &format!("#{}", slug));
    out.push_str(" aria-label=\"Link to this heading\">#</a>");
    out.push_str(&format!("</h{}>", depth));
    out
}

/// Image collaborator, wrapped in the zoom collaborator when requested.
pub(crate) fn image(props: &ImageProps) -> String {
    let mut out = String::new();
    if props.zoom {
        out.push_str("<span class=\"image-zoom\"");
        push_attr(&mut out, "data-zoom-src", &props.src);
        out.push('>');
    }

    out.push_str("<img");
    push_attr(&mut out, "src", &props.src);
    push_attr(&mut out, "alt", &props.alt);
    push_attr(&mut out, "width", &props.width.to_string());
    push_attr(&mut out, "height", &props.height.to_string());
    if let Some(class) = &props.class_name {
        push_attr(&mut out, "class", class);
    }
    push_attr(&mut out, "style", props.style);
    if let Some(title) = &props.title {
        push_attr(&mut out, "title", title);
    }
    out.push_str(" loading=\"lazy\" decoding=\"async\" />");

    if props.zoom {
        out.push_str("</span>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::PropValue;

    #[test]
    fn test_trusted_html_wrapper() {
        let content = RenderedContent {
            wrapper_class: "prose".to_string(),
            body: ContentBody::TrustedHtml {
                html: "<p onclick=\"x\">hi</p>".to_string(),
            },
            headings: Vec::new(),
            frontmatter: Default::default(),
        };
        insta::assert_snapshot!(
            render_content(&content),
            @r#"<div class="prose"><div><p onclick="x">hi</p></div></div>"#
        );
    }

    #[test]
    fn test_id_anchor() {
        assert_eq!(id_anchor("#branching"), r#"<span id="branching"></span>"#);
        assert_eq!(id_anchor("branching"), "<span></span>");
    }

    #[test]
    fn test_admonition_default_title() {
        let mut props = Props::new();
        props.insert("type".to_string(), PropValue::literal("warning"));
        let html = render_blocks(&[RenderBlock::Component {
            kind: ComponentKind::Admonition,
            props,
            children: vec![RenderBlock::Html {
                content: "<p>Careful</p>".to_string(),
            }],
        }]);
        insta::assert_snapshot!(
            html,
            @r#"<div class="admonition admonition-warning"><h4 class="admonition-title">Warning</h4><div class="admonition-content"><p>Careful</p></div></div>"#
        );
    }

    #[test]
    fn test_generic_component_data_attrs() {
        let mut props = Props::new();
        props.insert("labels".to_string(), PropValue::expression(r#"["SQL","psql"]"#));
        let html = render_blocks(&[RenderBlock::Component {
            kind: ComponentKind::CodeTabs,
            props,
            children: Vec::new(),
        }]);
        assert_eq!(
            html,
            r#"<div class="code-tabs" data-component="CodeTabs" data-labels="[&quot;SQL&quot;,&quot;psql&quot;]"></div>"#
        );
    }

    #[test]
    fn test_code_block_escapes() {
        let mut props = CodeProps::new();
        props.insert("language".to_string(), "html".to_string());
        let html = render_blocks(&[RenderBlock::Code {
            code: "<b>&</b>".to_string(),
            props,
        }]);
        assert_eq!(
            html,
            r#"<pre class="code-block" data-language="html"><code class="language-html">&lt;b&gt;&amp;&lt;/b&gt;</code></pre>"#
        );
    }

    #[test]
    fn test_youtube_embed() {
        let mut props = Props::new();
        props.insert("embedId".to_string(), PropValue::literal("abc123"));
        let html = render_blocks(&[RenderBlock::Component {
            kind: ComponentKind::YoutubeIframe,
            props,
            children: Vec::new(),
        }]);
        assert!(html.contains(r#"src="https://www.youtube.com/embed/abc123""#));
    }

    #[test]
    fn test_zoom_wraps_image() {
        let props = ImageProps {
            src: "/a.png".to_string(),
            alt: "A".to_string(),
            title: None,
            class_name: None,
            width: 796,
            height: 447,
            style: "width:100%;height:100%",
            zoom: true,
        };
        let html = image(&props);
        assert!(html.starts_with(r#"<span class="image-zoom" data-zoom-src="/a.png"><img"#));
        assert!(html.ends_with("</span>"));
    }
}
