//! Rich-content rendering
//!
//! Bodies are rendered to HTML through a dispatch table keyed by block type.
//! Types without an entry fall through to a no-op, so block types introduced
//! upstream render as nothing until a handler is registered for them.

use std::collections::HashMap;

use crate::config::RenderConfig;
use crate::models::{ContentBlock, ContentDocument, Span};
use crate::utils::StringUtils;

/// Render handler for one block type
pub type RenderFn = fn(&BlockRenderer, &ContentBlock, &mut String);

/// Block renderer with its dispatch table
pub struct BlockRenderer {
    image_base_url: String,
    handlers: HashMap<&'static str, RenderFn>,
}

impl BlockRenderer {
    /// Create a renderer with handlers for every built-in block type
    pub fn new(config: &RenderConfig) -> Self {
        let mut handlers: HashMap<&'static str, RenderFn> = HashMap::new();
        handlers.insert("paragraph", render_paragraph);
        handlers.insert("heading", render_heading);
        handlers.insert("image", render_image);
        handlers.insert("list", render_list);
        handlers.insert("quote", render_quote);

        Self {
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
            handlers,
        }
    }

    /// Register or replace the handler of a block type
    pub fn register(&mut self, block_type: &'static str, handler: RenderFn) {
        self.handlers.insert(block_type, handler);
    }

    /// Render a sequence of blocks
    pub fn render_blocks(&self, blocks: &[ContentBlock]) -> String {
        let mut html = String::new();
        for block in blocks {
            self.render_block(block, &mut html);
        }
        html
    }

    /// Render a whole document as an article
    pub fn render_document(&self, document: &ContentDocument) -> String {
        let mut html = String::from("<article>");
        html.push_str("<h1>");
        html.push_str(&StringUtils::escape_html(&document.title.plain_text()));
        html.push_str("</h1>");
        if let Some(image) = &document.main_image {
            if let Some(asset) = &image.asset {
                html.push_str(&format!(
                    "<img class=\"main-image\" src=\"{}\" alt=\"{}\">",
                    StringUtils::escape_html(&self.asset_url(&asset.reference)),
                    StringUtils::escape_html(image.alt.as_deref().unwrap_or(""))
                ));
            }
        }
        if let Some(author) = &document.author {
            html.push_str(&format!(
                "<p class=\"author\">{}</p>",
                StringUtils::escape_html(&author.name)
            ));
        }
        html.push_str(&self.render_blocks(&document.body));
        html.push_str("</article>");
        html
    }

    fn render_block(&self, block: &ContentBlock, out: &mut String) {
        if let Some(handler) = self.handlers.get(block.block_type()) {
            handler(self, block, out);
        }
    }

    /// Public URL of an image asset reference
    ///
    /// References of the form `image-<id>-<w>x<h>-<ext>` map to
    /// `<base>/<id>-<w>x<h>.<ext>`; anything else is appended verbatim.
    pub fn asset_url(&self, reference: &str) -> String {
        let file = match reference.strip_prefix("image-").and_then(|rest| rest.rsplit_once('-')) {
            Some((stem, extension)) => format!("{}.{}", stem, extension),
            None => reference.to_string(),
        };
        format!("{}/{}", self.image_base_url, file)
    }
}

fn render_spans(spans: &[Span], out: &mut String) {
    for span in spans {
        let marks: Vec<&str> = span
            .marks
            .iter()
            .filter_map(|mark| mark_tag(mark))
            .collect();
        for tag in &marks {
            out.push_str(&format!("<{}>", tag));
        }
        out.push_str(&StringUtils::escape_html(&span.text));
        for tag in marks.iter().rev() {
            out.push_str(&format!("</{}>", tag));
        }
    }
}

fn mark_tag(mark: &str) -> Option<&'static str> {
    match mark {
        "strong" => Some("strong"),
        "em" => Some("em"),
        "code" => Some("code"),
        "underline" => Some("u"),
        _ => None,
    }
}

fn render_paragraph(_: &BlockRenderer, block: &ContentBlock, out: &mut String) {
    if let ContentBlock::Paragraph { children } = block {
        out.push_str("<p>");
        render_spans(children, out);
        out.push_str("</p>");
    }
}

fn render_heading(_: &BlockRenderer, block: &ContentBlock, out: &mut String) {
    if let ContentBlock::Heading { level, children } = block {
        let level = (*level).clamp(1, 6);
        out.push_str(&format!("<h{}>", level));
        render_spans(children, out);
        out.push_str(&format!("</h{}>", level));
    }
}

fn render_image(renderer: &BlockRenderer, block: &ContentBlock, out: &mut String) {
    // Images still being uploaded have no asset yet
    if let ContentBlock::Image {
        asset: Some(asset),
        alt,
        caption,
    } = block
    {
        out.push_str("<figure>");
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            StringUtils::escape_html(&renderer.asset_url(&asset.reference)),
            StringUtils::escape_html(alt.as_deref().unwrap_or(""))
        ));
        if let Some(caption) = caption.as_deref().filter(|c| !c.is_empty()) {
            out.push_str(&format!("<figcaption>{}</figcaption>", StringUtils::escape_html(caption)));
        }
        out.push_str("</figure>");
    }
}

fn render_list(_: &BlockRenderer, block: &ContentBlock, out: &mut String) {
    if let ContentBlock::List { ordered, items } = block {
        let tag = if *ordered { "ol" } else { "ul" };
        out.push_str(&format!("<{}>", tag));
        for item in items {
            out.push_str("<li>");
            render_spans(item, out);
            out.push_str("</li>");
        }
        out.push_str(&format!("</{}>", tag));
    }
}

fn render_quote(_: &BlockRenderer, block: &ContentBlock, out: &mut String) {
    if let ContentBlock::Quote { children, attribution } = block {
        out.push_str("<blockquote><p>");
        render_spans(children, out);
        out.push_str("</p>");
        if let Some(attribution) = attribution {
            out.push_str(&format!("<cite>{}</cite>", StringUtils::escape_html(attribution)));
        }
        out.push_str("</blockquote>");
    }
}
