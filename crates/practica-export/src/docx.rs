use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, RunFonts, Style, StyleType,
};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

const TWIPS_PER_INCH: f64 = 1440.0;

/// A run of text inside a line, bold or plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

/// One line of the markdown subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Bullet(Vec<Span>),
    Paragraph(Vec<Span>),
    PageBreak,
    Blank,
}

/// Parse the markdown subset the export templates produce:
/// `#`/`##`/`###` headings, `- ` bullets, `---` or `***` page breaks, and
/// `**bold**` inside text. A line starting with `\` is taken literally as
/// one plain paragraph. Anything else is a paragraph with inline bold.
pub fn parse_markdown(rendered: &str) -> Vec<Block> {
    rendered
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                Block::Blank
            } else if let Some(text) = trimmed.strip_prefix('\\') {
                Block::Paragraph(vec![Span {
                    text: text.to_string(),
                    bold: false,
                }])
            } else if let Some(text) = trimmed.strip_prefix("### ") {
                heading(3, text)
            } else if let Some(text) = trimmed.strip_prefix("## ") {
                heading(2, text)
            } else if let Some(text) = trimmed.strip_prefix("# ") {
                heading(1, text)
            } else if let Some(text) = trimmed.strip_prefix("- ") {
                Block::Bullet(parse_inline(text))
            } else if trimmed == "---" || trimmed == "***" {
                Block::PageBreak
            } else {
                Block::Paragraph(parse_inline(trimmed))
            }
        })
        .collect()
}

fn heading(level: u8, text: &str) -> Block {
    let text = tokenize(text.trim())
        .into_iter()
        .map(|piece| match piece {
            Piece::Char(c) => c.to_string(),
            Piece::Marker => "**".to_string(),
        })
        .collect();
    Block::Heading { level, text }
}

enum Piece {
    Char(char),
    Marker,
}

/// `\x` is always the literal `x`; an unescaped `**` is a bold marker.
fn tokenize(text: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => pieces.push(Piece::Char(chars.next().unwrap_or('\\'))),
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                pieces.push(Piece::Marker);
            }
            _ => pieces.push(Piece::Char(c)),
        }
    }
    pieces
}

/// Split `**bold**` segments out of a line. An unclosed `**` is literal, and
/// `\*` or `\\` stand for the character itself.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let pieces = tokenize(text);
    let markers = pieces.iter().filter(|p| matches!(p, Piece::Marker)).count();
    let paired = markers - markers % 2;

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut bold = false;
    let mut seen = 0;
    for piece in pieces {
        match piece {
            Piece::Char(c) => current.push(c),
            Piece::Marker if seen < paired => {
                seen += 1;
                push_span(&mut spans, &current, bold);
                current.clear();
                bold = !bold;
            }
            Piece::Marker => current.push_str("**"),
        }
    }
    push_span(&mut spans, &current, bold);
    spans
}

fn push_span(spans: &mut Vec<Span>, text: &str, bold: bool) {
    if !text.is_empty() {
        spans.push(Span {
            text: text.to_string(),
            bold,
        });
    }
}

/// Generate a DOCX document from rendered template output.
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let margin = (styles.margin_inches * TWIPS_PER_INCH).round() as i32;

    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    let blocks = parse_markdown(rendered);
    let block_count = blocks.len();
    for block in blocks {
        let paragraph = match block {
            Block::Blank => Paragraph::new(),
            Block::Heading { level, text } => heading_paragraph(&text, level, styles),
            Block::Bullet(spans) => {
                let bullet = body_run("\u{2022} ", false, styles);
                spans_paragraph(Some(bullet), &spans, styles)
            }
            Block::Paragraph(spans) => spans_paragraph(None, &spans, styles),
            Block::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    let bytes = buf.into_inner();
    tracing::debug!(blocks = block_count, bytes = bytes.len(), "generated DOCX");
    Ok(bytes)
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

fn heading_paragraph(text: &str, level: u8, styles: &DocumentStyles) -> Paragraph {
    let size_pt = match level {
        1 => styles.heading1_size,
        2 => styles.heading2_size,
        _ => styles.heading3_size,
    };

    Paragraph::new().style(&format!("Heading{level}")).add_run(
        Run::new()
            .add_text(text)
            .bold()
            .size(size_pt * 2)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn spans_paragraph(prefix: Option<Run>, spans: &[Span], styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    if let Some(run) = prefix {
        para = para.add_run(run);
    }
    spans.iter().fold(para, |para, span| {
        para.add_run(body_run(&span.text, span.bold, styles))
    })
}

fn body_run(text: &str, bold: bool, styles: &DocumentStyles) -> Run {
    let run = Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font));
    if bold { run.bold() } else { run }
}
