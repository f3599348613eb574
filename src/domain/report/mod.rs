//! Markdown report node tree
//!
//! Upstream analysis text is parsed into a small tree of typed nodes before it
//! is displayed, so renderers never write upstream content verbatim. Only the
//! subset of markdown the analysis prompt asks for is recognised: ATX headings,
//! bullet and numbered lists, horizontal rules, fenced code blocks, paragraphs,
//! and the inline spans strong, emphasis and code. Anything else is kept as
//! plain text. Lines inside a fence are never interpreted as markdown.

/// Inline span within a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
    Code(String),
}

/// Block-level node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, inlines: Vec<Inline> },
    Bullet { depth: usize, inlines: Vec<Inline> },
    Numbered { number: u32, depth: usize, inlines: Vec<Inline> },
    Paragraph(Vec<Inline>),
    Code { language: Option<String>, lines: Vec<String> },
    Rule,
}

/// An open fenced code block
struct Fence {
    marker: String,
    language: Option<String>,
    lines: Vec<String>,
}

impl Fence {
    /// Opening fence: three or more backticks or tildes, then an optional info string
    fn open(trimmed: &str) -> Option<Self> {
        let ch = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let count = trimmed.chars().take_while(|c| *c == ch).count();
        if count < 3 {
            return None;
        }
        let info = trimmed[count..].trim();
        if ch == '`' && info.contains('`') {
            return None;
        }
        Some(Self {
            marker: trimmed[..count].to_string(),
            language: info.split_whitespace().next().map(str::to_string),
            lines: Vec::new(),
        })
    }

    /// Closing fence: at least as long as the opener, same character, nothing after it
    fn closes(&self, trimmed: &str) -> bool {
        trimmed.starts_with(&self.marker)
            && trimmed.chars().all(|c| Some(c) == self.marker.chars().next())
    }

    fn into_block(self) -> Block {
        Block::Code {
            language: self.language,
            lines: self.lines,
        }
    }
}

/// A parsed analysis report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    blocks: Vec<Block>,
}

impl Report {
    /// Parse markdown text into blocks
    pub fn parse(markdown: &str) -> Self {
        let mut blocks = Vec::new();
        let mut paragraph: Vec<String> = Vec::new();
        let mut fence: Option<Fence> = None;

        for raw_line in markdown.lines() {
            let line = sanitize(raw_line);
            let trimmed = line.trim();

            if let Some(mut open) = fence.take() {
                if open.closes(trimmed) {
                    blocks.push(open.into_block());
                } else {
                    open.lines.push(line.trim_end().to_string());
                    fence = Some(open);
                }
                continue;
            }

            if let Some(opened) = Fence::open(trimmed) {
                flush_paragraph(&mut paragraph, &mut blocks);
                fence = Some(opened);
                continue;
            }

            if trimmed.is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
                continue;
            }

            if let Some(block) = parse_block_line(&line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(block);
            } else {
                paragraph.push(trimmed.to_string());
            }
        }
        flush_paragraph(&mut paragraph, &mut blocks);
        // An unclosed fence runs to the end of the text
        if let Some(open) = fence {
            blocks.push(open.into_block());
        }

        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Plain text of every heading, in document order
    pub fn headings(&self) -> Vec<(u8, String)> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level, inlines } => Some((*level, plain_text(inlines))),
                _ => None,
            })
            .collect()
    }
}

/// Concatenate the text of inline spans, dropping markup
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|i| match i {
            Inline::Text(s) | Inline::Strong(s) | Inline::Emphasis(s) | Inline::Code(s) => {
                s.as_str()
            }
        })
        .collect()
}

/// Remove terminal control characters (ESC and other C0/C1 controls except tab)
fn sanitize(line: &str) -> String {
    line.chars()
        .filter(|c| *c == '\t' || !c.is_control())
        .collect()
}

fn flush_paragraph(lines: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }
    let text = lines.join(" ");
    lines.clear();
    blocks.push(Block::Paragraph(parse_inlines(&text)));
}

fn parse_block_line(line: &str) -> Option<Block> {
    let indent = line.len() - line.trim_start().len();
    let depth = indent / 2;
    let trimmed = line.trim();

    // Heading: 1-6 '#' followed by a space
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        if let Some(rest) = trimmed[hashes..].strip_prefix(' ') {
            let text = rest.trim().trim_end_matches('#').trim_end();
            return Some(Block::Heading {
                level: hashes as u8,
                inlines: parse_inlines(text),
            });
        }
    }

    if is_rule(trimmed) {
        return Some(Block::Rule);
    }

    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some(Block::Bullet {
                depth,
                inlines: parse_inlines(rest.trim()),
            });
        }
    }

    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        let rest = &trimmed[digits.len()..];
        let body = rest.strip_prefix(". ").or_else(|| rest.strip_prefix(") "));
        if let (Some(body), Ok(number)) = (body, digits.parse::<u32>()) {
            return Some(Block::Numbered {
                number,
                depth,
                inlines: parse_inlines(body.trim()),
            });
        }
    }

    None
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|m| compact.chars().all(|c| c == *m))
}

/// Parse inline spans. Unclosed markers are kept as literal text.
fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        let matched = [("**", 0u8), ("__", 0), ("`", 1), ("*", 2), ("_", 2)]
            .iter()
            .find_map(|&(marker, kind)| {
                let body = rest.strip_prefix(marker)?;
                let end = body.find(marker)?;
                let inner = &body[..end];
                if inner.is_empty()
                    || inner.starts_with(char::is_whitespace)
                    || inner.ends_with(char::is_whitespace)
                {
                    return None;
                }
                // Intra-word underscores (snake_case) are not emphasis
                if marker == "_" && plain.chars().last().is_some_and(|c| c.is_alphanumeric()) {
                    return None;
                }
                let inner = inner.to_string();
                let span = match kind {
                    0 => Inline::Strong(inner),
                    1 => Inline::Code(inner),
                    _ => Inline::Emphasis(inner),
                };
                Some((span, marker.len() * 2 + end))
            });

        match matched {
            Some((span, consumed)) => {
                if !plain.is_empty() {
                    spans.push(Inline::Text(std::mem::take(&mut plain)));
                }
                spans.push(span);
                rest = &rest[consumed..];
            }
            None => {
                let ch = rest.chars().next().unwrap_or_default();
                plain.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    if !plain.is_empty() {
        spans.push(Inline::Text(plain));
    }
    spans
}
