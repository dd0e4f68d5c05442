//! Document tree produced by the layouts and consumed by the writer
//!
//! Sizes follow WordprocessingML units: run sizes in half-points,
//! spacing and tab positions in twentieths of a point (twips).

/// Usable width of a US Letter page with one-inch margins, in twips
pub const CONTENT_WIDTH: u32 = 9360;

/// Default left + right cell padding of a table cell, in twips
pub const CELL_PADDING: u32 = 216;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
    /// Font of the Normal style
    pub font: &'static str,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Horizontal rule drawn under a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub color: &'static str,
    /// Line width in eighths of a point
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    pub heading: bool,
    pub bullet: bool,
    pub right_tab: Option<u32>,
    pub rule_below: Option<Rule>,
    pub shading: Option<&'static str>,
    pub space_before: u32,
    pub space_after: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<&'static str>,
    pub size: Option<u32>,
    /// Emit a tab character before the text
    pub after_tab: bool,
}

/// Layout table, written without borders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    /// Share of the table width in percent
    pub width_pct: u32,
    pub blocks: Vec<Block>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain body paragraph holding a single run
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().run(Run::new(text))
    }

    /// Bulleted paragraph, one per list item
    pub fn bullet(text: impl Into<String>) -> Self {
        Self {
            bullet: true,
            ..Self::text(text)
        }
    }

    pub fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn heading(mut self) -> Self {
        self.heading = true;
        self
    }

    pub fn right_tab(mut self, position: u32) -> Self {
        self.right_tab = Some(position);
        self
    }

    pub fn rule_below(mut self, color: &'static str, size: u32) -> Self {
        self.rule_below = Some(Rule { color, size });
        self
    }

    pub fn shading(mut self, fill: &'static str) -> Self {
        self.shading = Some(fill);
        self
    }

    pub fn spacing(mut self, before: u32, after: u32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    /// Concatenated run text, tabs rendered as `\t`
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for run in &self.runs {
            if run.after_tab {
                text.push('\t');
            }
            text.push_str(&run.text);
        }
        text
    }
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn after_tab(mut self) -> Self {
        self.after_tab = true;
        self
    }
}

impl Table {
    /// Single-row table, the only shape the layouts need
    pub fn single_row(cells: Vec<TableCell>) -> Self {
        Self {
            rows: vec![TableRow { cells }],
        }
    }
}

impl TableCell {
    pub fn new(width_pct: u32, blocks: Vec<Block>) -> Self {
        Self { width_pct, blocks }
    }

    /// Width of the cell in twips, for the table grid
    pub fn width_twips(&self) -> u32 {
        CONTENT_WIDTH * self.width_pct / 100
    }

    /// Right edge available to tab stops inside the cell
    pub fn tab_limit(width_pct: u32) -> u32 {
        (CONTENT_WIDTH * width_pct / 100).saturating_sub(CELL_PADDING)
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}
