//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::fragment::{Block, Fragment, Tone};
use crate::core::model::{Kind, ResultItem, ResultSet, Severity};
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" | "text" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            pretty,
            ..Self::new(format)
        }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(result_set);
        writer.write_all(output.as_bytes())
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        // Group by kind
        let mut errors = Vec::new();
        let mut notices = Vec::new();
        let mut categories = Vec::new();
        let mut articles = Vec::new();
        let mut sections = Vec::new();
        let mut statuses = Vec::new();
        let mut issues = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Error => errors.push(item),
                Kind::Notice => notices.push(item),
                Kind::Category => categories.push(item),
                Kind::Article => articles.push(item),
                Kind::Section => sections.push(item),
                Kind::Status => statuses.push(item),
                Kind::Issue => issues.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!("- **{}**: {}", error.code, error.message));
                    if let Some(source) = &item.source {
                        output.push_str(&format!(" (`{}`)", source));
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        for item in notices {
            self.render_item_md(&mut output, item);
        }

        if !categories.is_empty() {
            output.push_str("## Categories\n\n");
            for item in categories {
                output.push_str("- ");
                if let Some(key) = &item.key {
                    output.push_str(&format!("{}. ", key));
                }
                if let Some(icon) = &item.icon {
                    output.push_str(&format!("{} ", icon));
                }
                output.push_str(item.title.as_deref().unwrap_or_default());
                if let Some(count) = item.data.as_ref().and_then(|d| d["articles"].as_u64()) {
                    output.push_str(&format!(" ({} articles)", count));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        if !articles.is_empty() {
            output.push_str("## Results\n\n");
            for item in articles {
                self.render_item_md(&mut output, item);
            }
        }

        if !sections.is_empty() {
            output.push_str("## Guide\n\n");
            for item in sections {
                self.render_item_md(&mut output, item);
            }
        }

        if !statuses.is_empty() {
            output.push_str("## Status\n\n");
            for item in statuses {
                output.push_str(&format!(
                    "- **{}**: {}",
                    item.key.as_deref().unwrap_or_default(),
                    item.excerpt.as_deref().unwrap_or_default()
                ));
                if let Some(size) = item.meta.size {
                    output.push_str(&format!(" ({} bytes)", size));
                }
                if let Some(hash) = &item.meta.hash {
                    output.push_str(&format!(" `{}`", hash));
                }
                output.push('\n');
            }
            output.push('\n');
        }

        if !issues.is_empty() {
            output.push_str("## Issues\n\n");
            for item in issues {
                let severity = match item.severity {
                    Some(Severity::Error) => "error",
                    _ => "warning",
                };
                for error in &item.errors {
                    output.push_str(&format!("- [{}] **{}**: {}", severity, error.code, error.message));
                    if let Some(source) = &item.source {
                        output.push_str(&format!(" (`{}`)", source));
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        output
    }

    fn render_item_md(&self, output: &mut String, item: &ResultItem) {
        if let Some(fragment) = &item.fragment {
            output.push_str(&format!("### {}", fragment.heading()));
            if let Some(score) = item.score {
                output.push_str(&format!(" ({})", score));
            }
            output.push('\n');
            if let Some(subtitle) = &fragment.subtitle {
                output.push_str(&format!("*{}*\n", subtitle));
            }
            output.push('\n');
            for block in &fragment.blocks {
                block_md(output, block, "");
            }
        } else if let Some(excerpt) = &item.excerpt {
            output.push_str(excerpt);
            output.push('\n');
        }

        if item.meta.truncated {
            output.push_str("\n> ⚠️ More results were omitted\n");
        }

        output.push('\n');
    }

    /// Render as plain text
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| match &item.fragment {
                Some(fragment) => Some(fragment_text(fragment)),
                None => item
                    .excerpt
                    .clone()
                    .or_else(|| item.title.clone().map(|title| raw_title(item, title))),
            })
            .collect::<Vec<_>>()
            .join("\n---\n")
    }
}

fn raw_title(item: &ResultItem, title: String) -> String {
    match &item.icon {
        Some(icon) => format!("{} {}", icon, title),
        None => title,
    }
}

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Danger => "❗ ",
        Tone::Warning => "⚠ ",
        _ => "",
    }
}

/// Append one block as Markdown, each line prefixed with `quote`
fn block_md(output: &mut String, block: &Block, quote: &str) {
    match block {
        Block::Heading { icon, text } => {
            let heading = match icon {
                Some(icon) => format!("{} {}", icon, text),
                None => text.clone(),
            };
            output.push_str(&format!("{}#### {}\n{}\n", quote, heading, quote));
        }
        Block::Banner { tone, text } => {
            output.push_str(&format!("{}> {}**{}**\n{}\n", quote, tone_marker(*tone), text, quote));
        }
        Block::Badge { text, .. } => {
            output.push_str(&format!("{}`{}`\n{}\n", quote, text, quote));
        }
        Block::Field { label, value } => {
            output.push_str(&format!("{}**{}:** {}  \n", quote, label, value));
        }
        Block::Note { tone, text } => match tone {
            Tone::Muted => output.push_str(&format!("{}_{}_\n{}\n", quote, text, quote)),
            _ => output.push_str(&format!("{}{}{}\n{}\n", quote, tone_marker(*tone), text, quote)),
        },
        Block::List { title, items } => {
            if let Some(title) = title {
                output.push_str(&format!("{}**{}:**\n", quote, title));
            }
            for entry in items {
                output.push_str(&format!("{}- {}\n", quote, entry));
            }
            output.push_str(&format!("{}\n", quote));
        }
        Block::Card { title, blocks, .. } => {
            let inner = format!("{}> ", quote);
            if let Some(title) = title {
                output.push_str(&format!("{}**{}**\n{}\n", inner, title, inner));
            }
            for block in blocks {
                block_md(output, block, &inner);
            }
            output.push_str(&format!("{}\n", quote));
        }
        Block::Columns { columns } => {
            for column in columns.iter().filter(|c| !c.items.is_empty()) {
                output.push_str(&format!("{}**{}:**\n", quote, column.title));
                for entry in &column.items {
                    output.push_str(&format!("{}- {}\n", quote, entry));
                }
                output.push_str(&format!("{}\n", quote));
            }
        }
        Block::Grid { cells } => {
            for cell in cells {
                output.push_str(quote);
                output.push_str("- ");
                if let Some(icon) = &cell.icon {
                    output.push_str(&format!("{} ", icon));
                }
                match &cell.value {
                    Some(value) => output.push_str(&format!("{}: **{}**\n", cell.label, value)),
                    None => output.push_str(&format!("{}\n", cell.label)),
                }
            }
            output.push_str(&format!("{}\n", quote));
        }
        Block::Link { label, href } => {
            output.push_str(&format!("{}[{}]({})\n{}\n", quote, label, href, quote));
        }
    }
}

/// Plain-text rendering of a fragment, nested cards indented
pub fn fragment_text(fragment: &Fragment) -> String {
    let mut output = fragment.heading();
    if let Some(subtitle) = &fragment.subtitle {
        output.push_str(&format!("\n{}", subtitle));
    }
    for block in &fragment.blocks {
        block_text(&mut output, block, "");
    }
    output
}

fn push_line(output: &mut String, indent: &str, text: &str) {
    output.push('\n');
    output.push_str(indent);
    output.push_str(text);
}

fn block_text(output: &mut String, block: &Block, indent: &str) {
    match block {
        Block::Heading { icon, text } => match icon {
            Some(icon) => push_line(output, indent, &format!("{} {}", icon, text)),
            None => push_line(output, indent, text),
        },
        Block::Banner { text, .. } | Block::Badge { text, .. } | Block::Note { text, .. } => {
            push_line(output, indent, text)
        }
        Block::Field { label, value } => push_line(output, indent, &format!("{}: {}", label, value)),
        Block::List { title, items } => {
            if let Some(title) = title {
                push_line(output, indent, &format!("{}:", title));
            }
            for entry in items {
                push_line(output, indent, &format!("  - {}", entry));
            }
        }
        Block::Columns { columns } => {
            for column in columns.iter().filter(|c| !c.items.is_empty()) {
                push_line(output, indent, &format!("{}:", column.title));
                for entry in &column.items {
                    push_line(output, indent, &format!("  - {}", entry));
                }
            }
        }
        Block::Grid { cells } => {
            for cell in cells {
                let mut line = match &cell.icon {
                    Some(icon) => format!("{} {}", icon, cell.label),
                    None => cell.label.clone(),
                };
                if let Some(value) = &cell.value {
                    line.push_str(&format!(": {}", value));
                }
                push_line(output, indent, line.trim_start());
            }
        }
        Block::Link { label, href } => push_line(output, indent, &format!("{} <{}>", label, href)),
        Block::Card { title, blocks, .. } => {
            if let Some(title) = title {
                push_line(output, indent, &format!("[{}]", title));
            }
            let nested = format!("{}    ", indent);
            for block in blocks {
                block_text(output, block, &nested);
            }
        }
    }
}
