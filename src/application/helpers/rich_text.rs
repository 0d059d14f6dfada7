//! Plain-text and HTML rendering of CMS rich-text fields.
//!
//! The HTML output follows the CMS's default serializer so that previews render
//! the same markup the full post page does.

use crate::domain::entities::cms_post::{BlockKind, RichTextBlock, Span, SpanKind};

/// Joins the text of every textual block with a single space.
pub fn as_text(blocks: &[RichTextBlock]) -> String {
    blocks
        .iter()
        .filter(|b| b.is_textual())
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders blocks to HTML. Consecutive list items share one `<ul>`/`<ol>`.
pub fn as_html(blocks: &[RichTextBlock]) -> String {
    let mut out = String::new();
    let mut open_list: Option<BlockKind> = None;

    for block in blocks {
        let list = match block.kind {
            BlockKind::ListItem | BlockKind::OrderedListItem => Some(block.kind),
            _ => None,
        };

        if open_list != list {
            if let Some(kind) = open_list.take() {
                out.push_str(list_tags(kind).1);
            }
            if let Some(kind) = list {
                out.push_str(list_tags(kind).0);
                open_list = Some(kind);
            }
        }

        render_block(block, &mut out);
    }

    if let Some(kind) = open_list {
        out.push_str(list_tags(kind).1);
    }

    out
}

fn list_tags(kind: BlockKind) -> (&'static str, &'static str) {
    match kind {
        BlockKind::OrderedListItem => ("<ol>", "</ol>"),
        _ => ("<ul>", "</ul>"),
    }
}

fn render_block(block: &RichTextBlock, out: &mut String) {
    let tag = match block.kind {
        BlockKind::Heading1 => "h1",
        BlockKind::Heading2 => "h2",
        BlockKind::Heading3 => "h3",
        BlockKind::Heading4 => "h4",
        BlockKind::Heading5 => "h5",
        BlockKind::Heading6 => "h6",
        BlockKind::Paragraph => "p",
        BlockKind::Preformatted => "pre",
        BlockKind::ListItem | BlockKind::OrderedListItem => "li",
        BlockKind::Image => {
            render_image(block, out);
            return;
        }
        BlockKind::Embed => {
            render_embed(block, out);
            return;
        }
        BlockKind::Unknown => return,
    };

    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&render_inline(&block.text, &block.spans));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_image(block: &RichTextBlock, out: &mut String) {
    let Some(url) = block.url.as_deref() else {
        return;
    };
    out.push_str(&format!(
        r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
        escape_html(url),
        escape_html(block.alt.as_deref().unwrap_or_default()),
    ));
}

fn render_embed(block: &RichTextBlock, out: &mut String) {
    let Some(oembed) = block.oembed.as_ref() else {
        return;
    };
    out.push_str(&format!(
        r#"<div data-oembed="{}" data-oembed-type="{}" data-oembed-provider="{}">{}</div>"#,
        escape_html(oembed.embed_url.as_deref().unwrap_or_default()),
        escape_html(oembed.kind.as_deref().unwrap_or_default()),
        escape_html(oembed.provider_name.as_deref().unwrap_or_default()),
        // Provider markup (iframes) is trusted CMS content.
        oembed.html.as_deref().unwrap_or_default(),
    ));
}

/// Applies spans to `text`. The text is cut at every span boundary and each
/// piece is wrapped in the tags of the spans covering it, so overlapping spans
/// still produce well-nested markup.
fn render_inline(text: &str, spans: &[Span]) -> String {
    // (utf-16 offset, char) pairs; span offsets count UTF-16 code units.
    let mut units = Vec::with_capacity(text.len());
    let mut offset = 0usize;
    for c in text.chars() {
        units.push((offset, c));
        offset += c.len_utf16();
    }
    let len = offset;

    let mut ordered: Vec<&Span> = spans
        .iter()
        .filter(|s| s.start < s.end && s.start < len && span_tags(s).is_some())
        .collect();
    ordered.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut bounds = vec![0, len];
    for span in &ordered {
        bounds.push(span.start);
        bounds.push(span.end.min(len));
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut out = String::with_capacity(text.len());
    for window in bounds.windows(2) {
        let (from, to) = (window[0], window[1]);
        let piece: String = units
            .iter()
            .filter(|(o, _)| *o >= from && *o < to)
            .map(|(_, c)| *c)
            .collect();

        let active: Vec<(String, &'static str)> = ordered
            .iter()
            .filter(|s| s.start <= from && s.end >= to)
            .filter_map(|s| span_tags(s))
            .collect();

        for (open, _) in &active {
            out.push_str(open);
        }
        out.push_str(&escape_html(&piece).replace('\n', "<br />"));
        for (_, close) in active.iter().rev() {
            out.push_str(close);
        }
    }
    out
}

fn span_tags(span: &Span) -> Option<(String, &'static str)> {
    let data_str = |key: &str| {
        span.data
            .as_ref()
            .and_then(|d| d.get(key))
            .and_then(|v| v.as_str())
    };

    match span.kind {
        SpanKind::Strong => Some(("<strong>".to_string(), "</strong>")),
        SpanKind::Em => Some(("<em>".to_string(), "</em>")),
        SpanKind::Hyperlink => {
            let url = data_str("url")?;
            let open = match data_str("target") {
                Some(target) => format!(
                    r#"<a href="{}" target="{}" rel="noopener noreferrer">"#,
                    escape_html(url),
                    escape_html(target)
                ),
                None => format!(r#"<a href="{}">"#, escape_html(url)),
            };
            Some((open, "</a>"))
        }
        SpanKind::Label => {
            let label = data_str("label")?;
            Some((format!(r#"<span class="{}">"#, escape_html(label)), "</span>"))
        }
        SpanKind::Unknown => None,
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
