//! Display fragments
//!
//! Formatters never emit markup. They produce a `Fragment`: a title, an icon
//! and an ordered list of `Block`s. The output renderer decides how each block
//! looks in Markdown or plain text.
//!
//! The `Blocks` builder takes optional inputs and silently drops anything that
//! is absent or blank, so formatters can pass data through without checking
//! every field twice.

use serde::{Deserialize, Serialize};

/// Visual emphasis of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Muted,
    Info,
    Success,
    Warning,
    Danger,
}

/// One column of a side-by-side list split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    pub tone: Tone,
    pub items: Vec<String>,
}

impl Column {
    pub fn new<T: AsRef<str>>(title: impl Into<String>, tone: Tone, items: &[T]) -> Self {
        Self {
            title: title.into(),
            tone,
            items: non_blank(items),
        }
    }
}

/// One cell of an icon/label/value grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A display block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        text: String,
    },
    Banner {
        tone: Tone,
        text: String,
    },
    Badge {
        tone: Tone,
        text: String,
    },
    Field {
        label: String,
        value: String,
    },
    Note {
        tone: Tone,
        text: String,
    },
    List {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        items: Vec<String>,
    },
    Card {
        tone: Tone,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        blocks: Vec<Block>,
    },
    Columns {
        columns: Vec<Column>,
    },
    Grid {
        cells: Vec<GridCell>,
    },
    Link {
        label: String,
        href: String,
    },
}

/// A display-ready document fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    pub blocks: Vec<Block>,
}

impl Fragment {
    pub fn new(title: impl Into<String>, icon: Option<&str>, blocks: Blocks) -> Self {
        Self {
            title: title.into(),
            icon: present(icon).map(str::to_string),
            subtitle: None,
            blocks: blocks.into_vec(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Icon and title joined the way headers show them
    pub fn heading(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{} {}", icon, self.title),
            None => self.title.clone(),
        }
    }

    /// Depth-first iterator over every block, including card contents
    #[cfg(test)]
    pub fn walk(&self) -> Vec<&Block> {
        fn visit<'a>(blocks: &'a [Block], out: &mut Vec<&'a Block>) {
            for block in blocks {
                out.push(block);
                if let Block::Card { blocks, .. } = block {
                    visit(blocks, out);
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.blocks, &mut out);
        out
    }
}

/// Treat blank strings the same as missing ones
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_blank<T: AsRef<str>>(items: &[T]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.as_ref())
        .filter(|item| !item.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn owned<S: Into<String>>(value: Option<S>) -> Option<String> {
    value.map(Into::into).filter(|v| !v.trim().is_empty())
}

/// Ordered block builder that skips absent content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blocks(Vec<Block>);

impl Blocks {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.0.push(block);
        self
    }

    pub fn heading(&mut self, icon: Option<&str>, text: impl Into<String>) -> &mut Self {
        self.push(Block::Heading {
            icon: present(icon).map(str::to_string),
            text: text.into(),
        })
    }

    pub fn banner<S: Into<String>>(&mut self, tone: Tone, text: Option<S>) -> &mut Self {
        if let Some(text) = owned(text) {
            self.push(Block::Banner { tone, text });
        }
        self
    }

    pub fn badge(&mut self, tone: Tone, text: impl Into<String>) -> &mut Self {
        self.push(Block::Badge {
            tone,
            text: text.into(),
        })
    }

    pub fn field<S: Into<String>>(&mut self, label: &str, value: Option<S>) -> &mut Self {
        if let Some(value) = owned(value) {
            self.push(Block::Field {
                label: label.to_string(),
                value,
            });
        }
        self
    }

    pub fn note<S: Into<String>>(&mut self, tone: Tone, text: Option<S>) -> &mut Self {
        if let Some(text) = owned(text) {
            self.push(Block::Note { tone, text });
        }
        self
    }

    /// A bullet list; omitted when no item has content
    pub fn list<T: AsRef<str>>(&mut self, title: Option<&str>, items: &[T]) -> &mut Self {
        let items = non_blank(items);
        if !items.is_empty() {
            self.push(Block::List {
                title: present(title).map(str::to_string),
                items,
            });
        }
        self
    }

    /// A heading followed by a bullet list, both omitted when the list is empty
    pub fn titled_list<T: AsRef<str>>(
        &mut self,
        icon: Option<&str>,
        heading: &str,
        items: &[T],
    ) -> &mut Self {
        if items.iter().any(|item| !item.as_ref().trim().is_empty()) {
            self.heading(icon, heading);
            self.list(None, items);
        }
        self
    }

    /// A boxed group of blocks. Kept when it has a title or any content.
    pub fn card<S: Into<String>>(&mut self, tone: Tone, title: Option<S>, body: Blocks) -> &mut Self {
        let title = owned(title);
        if title.is_some() || !body.is_empty() {
            self.push(Block::Card {
                tone,
                title,
                blocks: body.into_vec(),
            });
        }
        self
    }

    /// A boxed group with a fixed caption. Omitted when the body is empty.
    pub fn panel(&mut self, tone: Tone, caption: &str, body: Blocks) -> &mut Self {
        if !body.is_empty() {
            self.push(Block::Card {
                tone,
                title: Some(caption.to_string()),
                blocks: body.into_vec(),
            });
        }
        self
    }

    pub fn columns(&mut self, columns: Vec<Column>) -> &mut Self {
        if columns.iter().any(|c| !c.items.is_empty()) {
            self.push(Block::Columns { columns });
        }
        self
    }

    pub fn grid(&mut self, cells: Vec<GridCell>) -> &mut Self {
        if !cells.is_empty() {
            self.push(Block::Grid { cells });
        }
        self
    }

    pub fn link<S: Into<String>>(&mut self, label: impl Into<String>, href: Option<S>) -> &mut Self {
        if let Some(href) = owned(href) {
            self.push(Block::Link {
                label: label.into(),
                href,
            });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_vec(self) -> Vec<Block> {
        self.0
    }
}
