//! Rendering functions for the content renderer.

use docflow_core::{
    DocflowError, SourceLocation, custom_id_from_expression, extract_custom_id, node_location,
    parse_code_meta, parse_mdast,
};
use markdown::mdast::{self, AttributeContent, AttributeValue, Node};

use super::MAX_INCLUDE_DEPTH;
use super::context::Context;
use super::image::ImageProps;
use super::types::{HeadingEntry, PropValue, Props, RenderBlock, Scope};
use crate::html;
use crate::registry::TagTarget;

type RenderResult = Result<(), DocflowError>;

/// Placeholder link text that turns a link into an empty id target.
const ID_PLACEHOLDER: &str = "#id";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Extracts plain text from a list of AST nodes (for heading text).
pub fn extract_text_from_nodes(nodes: &[Node]) -> String {
    let mut text = String::new();
    for node in nodes {
        extract_text_from_node(node, &mut text);
    }
    text.trim().to_string()
}

fn extract_text_from_node(node: &Node, buffer: &mut String) {
    match node {
        Node::Text(t) => buffer.push_str(&t.value),
        Node::InlineCode(code) => buffer.push_str(&code.value),
        Node::Strong(_)
        | Node::Emphasis(_)
        | Node::Link(_)
        | Node::LinkReference(_)
        | Node::Delete(_)
        | Node::MdxJsxTextElement(_) => {
            for child in node.children().into_iter().flatten() {
                extract_text_from_node(child, buffer);
            }
        }
        _ => {}
    }
}

/// Renders a list node as `<ul>` or `<ol>`.
fn render_list(list: &mdast::List, ctx: &mut Context) -> RenderResult {
    let tag = if list.ordered { "ol" } else { "ul" };
    match list.start.filter(|start| list.ordered && *start != 1) {
        Some(start) => ctx.push_raw(&format!("<ol start=\"{}\">", start)),
        None => ctx.push_raw(&format!("<{}>", tag)),
    }
    ctx.enter(Scope::List {
        spread: list.spread,
    });

    for child in &list.children {
        render_node(child, ctx)?;
    }

    ctx.exit();
    ctx.push_raw(&format!("</{}>", tag));
    Ok(())
}

/// Renders a list item, with a disabled checkbox for GFM task items.
fn render_list_item(item: &mdast::ListItem, ctx: &mut Context) -> RenderResult {
    match item.checked {
        Some(checked) => {
            ctx.push_raw("<li class=\"task-list-item\"><input type=\"checkbox\" disabled");
            if checked {
                ctx.push_raw(" checked");
            }
            ctx.push_raw(" /> ");
        }
        None => ctx.push_raw("<li>"),
    }

    for child in &item.children {
        render_node(child, ctx)?;
    }

    ctx.push_raw("</li>");
    Ok(())
}

/// Renders a paragraph node, suppressing `<p>` wrappers in tight lists.
fn render_paragraph(para: &mdast::Paragraph, ctx: &mut Context) -> RenderResult {
    let in_tight_list = ctx.is_in_tight_list();
    if !in_tight_list {
        ctx.push_raw("<p>");
    }
    ctx.enter(Scope::Paragraph);

    for child in &para.children {
        render_node(child, ctx)?;
    }

    ctx.exit();
    if !in_tight_list {
        ctx.push_raw("</p>");
    }
    Ok(())
}

fn is_id_placeholder(children: &[Node]) -> bool {
    matches!(children, [Node::Text(text)] if text.value == ID_PLACEHOLDER)
}

/// Renders a link: `[#id](#target)` becomes an empty id target, anything
/// else goes to the link collaborator.
fn render_link(url: &str, title: Option<&str>, children: &[Node], ctx: &mut Context) -> RenderResult {
    if is_id_placeholder(children) {
        ctx.push_raw(&html::id_anchor(url));
        return Ok(());
    }

    let inner = ctx.render_children_to_html(children)?;
    ctx.push_raw(&html::link(url, title, &inner));
    Ok(())
}

fn render_link_reference(link: &mdast::LinkReference, ctx: &mut Context) -> RenderResult {
    match ctx.definition(&link.identifier) {
        Some(def) => render_link(&def.url, def.title.as_deref(), &link.children, ctx),
        None => {
            ctx.push_text("[");
            for child in &link.children {
                render_node(child, ctx)?;
            }
            ctx.push_text("]");
            Ok(())
        }
    }
}

/// Renders an image through the image (and zoom) collaborators.
fn render_image(url: &str, alt: &str, title: Option<&str>, ctx: &mut Context) {
    let props = ImageProps::resolve(url, alt, title, ctx.options());
    ctx.push_raw(&html::image(&props));
}

/// Returns the `{#custom-id}` of the last text descendant, if any.
///
/// Only the trailing Text or expression node counts, so inline code such as
/// `` `{#x}` `` stays literal.
fn find_custom_id_in_last_text_node(nodes: &[Node]) -> Option<&str> {
    match nodes.last()? {
        Node::Text(t) => extract_custom_id(&t.value).1,
        Node::MdxTextExpression(e) => custom_id_from_expression(&e.value),
        Node::Strong(s) => find_custom_id_in_last_text_node(&s.children),
        Node::Emphasis(e) => find_custom_id_in_last_text_node(&e.children),
        Node::Link(l) => find_custom_id_in_last_text_node(&l.children),
        Node::Delete(d) => find_custom_id_in_last_text_node(&d.children),
        _ => None,
    }
}

fn strip_custom_id(nodes: &mut Vec<Node>) {
    if matches!(nodes.last(), Some(Node::MdxTextExpression(_))) {
        nodes.pop();
        if let Some(Node::Text(t)) = nodes.last_mut() {
            let kept = t.value.trim_end().len();
            t.value.truncate(kept);
        }
        return;
    }
    match nodes.last_mut() {
        Some(Node::Text(t)) => {
            if let Some(pos) = t.value.rfind("{#") {
                let kept = t.value[..pos].trim_end().len();
                t.value.truncate(kept);
            }
        }
        Some(Node::Strong(s)) => strip_custom_id(&mut s.children),
        Some(Node::Emphasis(e)) => strip_custom_id(&mut e.children),
        Some(Node::Link(l)) => strip_custom_id(&mut l.children),
        Some(Node::Delete(d)) => strip_custom_id(&mut d.children),
        _ => {}
    }
}

/// Renders a heading.
///
/// `h2`-`h4` get the anchor decorator (slug id plus self link) unless
/// anchors are disabled; all other levels render plain.
fn render_heading(heading: &mdast::Heading, ctx: &mut Context) -> RenderResult {
    let anchored = matches!(heading.depth, 2..=4) && !ctx.options().without_anchor_heading;
    if !anchored {
        ctx.push_raw(&format!("<h{}>", heading.depth));
        ctx.enter(Scope::Paragraph);
        for child in &heading.children {
            render_node(child, ctx)?;
        }
        ctx.exit();
        ctx.push_raw(&format!("</h{}>", heading.depth));
        return Ok(());
    }

    let raw_text = extract_text_from_nodes(&heading.children);
    let custom_id = find_custom_id_in_last_text_node(&heading.children).map(str::to_string);

    let (text, slug, children_html) = match custom_id {
        Some(id) => {
            let id = ctx.claim_slug(&id);
            let mut children = heading.children.clone();
            strip_custom_id(&mut children);
            let html = ctx.render_children_to_html(&children)?;
            (extract_custom_id(&raw_text).0.to_string(), id, html)
        }
        None => {
            let slug = ctx.generate_slug(&raw_text);
            let html = ctx.render_children_to_html(&heading.children)?;
            (raw_text, slug, html)
        }
    };

    ctx.push_raw(&html::anchor_heading(heading.depth, &slug, &children_html));
    ctx.add_heading(HeadingEntry {
        depth: heading.depth,
        slug,
        text,
    });
    Ok(())
}

/// Renders a fenced code block through the code-block collaborator.
fn render_code(code: &mdast::Code, ctx: &mut Context) {
    let props = parse_code_meta(code.lang.as_deref(), code.meta.as_deref());
    ctx.push_block(RenderBlock::Code {
        code: code.value.clone(),
        props,
    });
}

fn render_table_row(
    row: &mdast::TableRow,
    ctx: &mut Context,
    is_header: bool,
    aligns: &[mdast::AlignKind],
) -> RenderResult {
    ctx.push_raw("<tr>");
    ctx.enter(Scope::TableRow);

    for (i, cell) in row.children.iter().enumerate() {
        if let Node::TableCell(c) = cell {
            let tag = if is_header { "th" } else { "td" };
            let align_attr = match aligns.get(i) {
                Some(mdast::AlignKind::Left) => " align=\"left\"",
                Some(mdast::AlignKind::Right) => " align=\"right\"",
                Some(mdast::AlignKind::Center) => " align=\"center\"",
                _ => "",
            };

            ctx.push_raw(&format!("<{}{}>", tag, align_attr));
            ctx.enter(Scope::TableCell);
            for child in &c.children {
                render_node(child, ctx)?;
            }
            ctx.exit();
            ctx.push_raw(&format!("</{}>", tag));
        }
    }

    ctx.exit();
    ctx.push_raw("</tr>");
    Ok(())
}

/// Renders a table inside its horizontally scrollable wrapper.
fn render_table(table: &mdast::Table, ctx: &mut Context) -> RenderResult {
    ctx.push_raw("<div class=\"table-wrapper\"><table>");
    ctx.enter(Scope::Table);

    ctx.push_raw("<thead>");
    if let Some(Node::TableRow(row)) = table.children.first() {
        render_table_row(row, ctx, true, &table.align)?;
    }
    ctx.push_raw("</thead>");

    if table.children.len() > 1 {
        ctx.push_raw("<tbody>");
        for row in table.children.iter().skip(1) {
            if let Node::TableRow(r) = row {
                render_table_row(r, ctx, false, &table.align)?;
            }
        }
        ctx.push_raw("</tbody>");
    }

    ctx.exit();
    ctx.push_raw("</table></div>");
    Ok(())
}

/// Renders raw HTML, passed through only when the parser was configured
/// to produce HTML nodes.
fn render_html(node: &mdast::Html, ctx: &mut Context) {
    if ctx.session().parse_options.raw_html {
        ctx.push_raw(&node.value);
    } else {
        log::debug!("Escaping raw HTML in content: {}", node.value);
        ctx.push_text(&node.value);
    }
}

fn render_footnote_reference(fnref: &mdast::FootnoteReference, ctx: &mut Context) {
    let ordinal = ctx.footnote_ordinal(&fnref.identifier);
    let id = html_escape::encode_double_quoted_attribute(&fnref.identifier).into_owned();
    ctx.push_raw(&format!(
        "<sup><a href=\"#user-content-fn-{id}\" id=\"user-content-fnref-{id}\" data-footnote-ref aria-describedby=\"footnote-label\">{ordinal}</a></sup>"
    ));
}

fn render_footnote_definition(fndef: &mdast::FootnoteDefinition, ctx: &mut Context) -> RenderResult {
    let content = ctx.render_children_to_html(&fndef.children)?;
    ctx.push_footnote(fndef.identifier.clone(), content);
    Ok(())
}

/// Returns true if an expression body holds nothing but JS comments.
fn is_comment_only(value: &str) -> bool {
    let mut rest = value.trim();
    while !rest.is_empty() {
        if let Some(body) = rest.strip_prefix("/*") {
            let Some(end) = body.find("*/") else {
                return false;
            };
            rest = body[end + 2..].trim_start();
        } else if let Some(body) = rest.strip_prefix("//") {
            rest = body.split_once('\n').map_or("", |(_, tail)| tail).trim_start();
        } else {
            return false;
        }
    }
    true
}

/// MDX expressions are never evaluated: comments vanish, anything else is
/// dropped with a debug note.
fn render_expression(value: &str) {
    if !is_comment_only(value) {
        log::debug!("Dropping MDX expression {{{}}}", value);
    }
}

/// Copies JSX attributes into component props.
fn collect_props(attributes: &[AttributeContent]) -> Props {
    let mut props = Props::new();
    for attr in attributes {
        match attr {
            AttributeContent::Property(prop) => {
                let value = match &prop.value {
                    Some(AttributeValue::Literal(s)) => PropValue::literal(s.clone()),
                    Some(AttributeValue::Expression(expr)) => PropValue::expression(expr.value.clone()),
                    None => PropValue::expression("true"),
                };
                props.insert(prop.name.clone(), value);
            }
            AttributeContent::Expression(expr) => {
                log::debug!("Ignoring spread attribute {{{}}}", expr.value);
            }
        }
    }
    props
}

/// MDX treats lowercase names as HTML elements and everything else as
/// components.
fn is_intrinsic(tag: &str) -> bool {
    tag.starts_with(|c: char| c.is_ascii_lowercase()) && !tag.contains('.')
}

/// Renders a lowercase JSX tag as a plain HTML element.
fn render_intrinsic(
    tag: &str,
    attributes: &[AttributeContent],
    children: &[Node],
    ctx: &mut Context,
) -> RenderResult {
    let mut open = format!("<{}", tag);
    for (name, value) in collect_props(attributes) {
        let name = match name.as_str() {
            "className" => "class",
            "htmlFor" => "for",
            other => other,
        };
        match value {
            PropValue::Literal { value } => {
                open.push_str(&format!(
                    " {}=\"{}\"",
                    name,
                    html_escape::encode_double_quoted_attribute(&value)
                ));
            }
            PropValue::Expression { value } if value == "true" => {
                open.push(' ');
                open.push_str(name);
            }
            PropValue::Expression { value } => {
                log::debug!("Dropping expression attribute {}={{{}}} on <{}>", name, value, tag);
            }
        }
    }

    if VOID_ELEMENTS.contains(&tag) {
        open.push_str(" />");
        ctx.push_raw(&open);
        return Ok(());
    }

    open.push('>');
    let inner = ctx.render_children_to_html(children)?;
    ctx.push_raw(&open);
    ctx.push_raw(&inner);
    ctx.push_raw(&format!("</{}>", tag));
    Ok(())
}

/// Loads, parses, and renders shared content in place of its tag.
fn render_include<'a>(name: &str, url: &'a str, ctx: &mut Context<'a>) -> RenderResult {
    let depth = ctx.include_depth() + 1;
    if depth > MAX_INCLUDE_DEPTH {
        return Err(DocflowError::IncludeDepth {
            url: url.to_string(),
            limit: MAX_INCLUDE_DEPTH,
        });
    }

    let session = ctx.session();
    let text = session.includes.load(url)?;
    let tree = parse_mdast(&text, session.parse_options).map_err(|err| err.in_file(url))?;
    let children = ctx
        .render_in_child(depth, |child| {
            child.collect_definitions(&tree);
            render_node(&tree, child)
        })
        .map_err(|err| err.in_file(url))?;

    ctx.push_block(RenderBlock::Include {
        name: name.to_string(),
        url: url.to_string(),
        children,
    });
    Ok(())
}

/// Dispatches a JSX element through the dispatch table.
fn render_jsx<'a>(
    name: Option<&str>,
    attributes: &[AttributeContent],
    children: &[Node],
    location: SourceLocation,
    ctx: &mut Context<'a>,
) -> RenderResult {
    let Some(tag) = name else {
        for child in children {
            render_node(child, ctx)?;
        }
        return Ok(());
    };

    match ctx.session().table.resolve(tag) {
        Some(TagTarget::Component(kind)) => {
            let props = collect_props(attributes);
            let slot = ctx.render_children_to_blocks(children)?;
            ctx.push_component(*kind, props, slot);
            Ok(())
        }
        Some(TagTarget::Include(url)) => {
            if !children.is_empty() {
                log::debug!("Children of shared content tag <{}> are ignored", tag);
            }
            render_include(tag, url, ctx)
        }
        None if is_intrinsic(tag) => render_intrinsic(tag, attributes, children, ctx),
        None => Err(DocflowError::unknown_component(tag, location)),
    }
}

/// Recursively renders an AST node, updating the context state.
pub fn render_node<'a>(node: &Node, ctx: &mut Context<'a>) -> RenderResult {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                render_node(child, ctx)?;
            }
        }
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Paragraph(para) => render_paragraph(para, ctx)?,
        Node::Link(link) => render_link(&link.url, link.title.as_deref(), &link.children, ctx)?,
        Node::LinkReference(link) => render_link_reference(link, ctx)?,
        Node::Strong(strong) => {
            ctx.push_raw("<strong>");
            for child in &strong.children {
                render_node(child, ctx)?;
            }
            ctx.push_raw("</strong>");
        }
        Node::Emphasis(emphasis) => {
            ctx.push_raw("<em>");
            for child in &emphasis.children {
                render_node(child, ctx)?;
            }
            ctx.push_raw("</em>");
        }
        Node::Delete(delete) => {
            ctx.push_raw("<del>");
            for child in &delete.children {
                render_node(child, ctx)?;
            }
            ctx.push_raw("</del>");
        }
        Node::InlineCode(code) => {
            ctx.push_raw("<code>");
            ctx.push_text(&code.value);
            ctx.push_raw("</code>");
        }
        Node::Break(_) => ctx.push_raw("<br />"),
        Node::Heading(heading) => render_heading(heading, ctx)?,
        Node::List(list) => render_list(list, ctx)?,
        Node::ListItem(item) => render_list_item(item, ctx)?,
        Node::Code(code) => render_code(code, ctx),
        Node::Blockquote(quote) => {
            ctx.push_raw("<blockquote>");
            ctx.enter(Scope::Blockquote);
            for child in &quote.children {
                render_node(child, ctx)?;
            }
            ctx.exit();
            ctx.push_raw("</blockquote>");
        }
        Node::Image(img) => render_image(&img.url, &img.alt, img.title.as_deref(), ctx),
        Node::ImageReference(img) => match ctx.definition(&img.identifier) {
            Some(def) => render_image(&def.url, &img.alt, def.title.as_deref(), ctx),
            None => ctx.push_text(&img.alt),
        },
        Node::ThematicBreak(_) => ctx.push_raw("<hr />"),
        Node::Html(raw) => render_html(raw, ctx),
        Node::Table(table) => render_table(table, ctx)?,
        Node::TableRow(_) | Node::TableCell(_) => {}
        Node::FootnoteReference(fnref) => render_footnote_reference(fnref, ctx),
        Node::FootnoteDefinition(fndef) => render_footnote_definition(fndef, ctx)?,
        Node::MdxJsxFlowElement(elem) => render_jsx(
            elem.name.as_deref(),
            &elem.attributes,
            &elem.children,
            node_location(node),
            ctx,
        )?,
        Node::MdxJsxTextElement(elem) => render_jsx(
            elem.name.as_deref(),
            &elem.attributes,
            &elem.children,
            node_location(node),
            ctx,
        )?,
        Node::MdxjsEsm(esm) => log::debug!("Dropping MDX import/export: {}", esm.value),
        Node::MdxFlowExpression(expr) => render_expression(&expr.value),
        Node::MdxTextExpression(expr) => render_expression(&expr.value),
        // Frontmatter is returned separately; definitions are collected up front.
        Node::Yaml(_) | Node::Toml(_) | Node::Definition(_) => {}
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
    Ok(())
}
