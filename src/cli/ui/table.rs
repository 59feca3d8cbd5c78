/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Specifies the configuration for a single column in the rendered table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
            alignment: Alignment::Left,
        }
    }

    pub fn right(mut self) -> Self {
        self.alignment = Alignment::Right;
        self
    }
}

/// Column metadata plus rows of data to render.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub padding: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            padding: 1,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Content widths for each column; a column never narrows below its
    /// longest cell.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = column.header.chars().count().max(column.min_width);
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(cell.chars().count());
                    }
                }
                width
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, widths[idx], column.alignment, self.padding)
            })
            .collect();
        cells.join(" ").trim_end().to_string()
    }

    /// Header, `=` rule, rows, and a closing rule.
    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let rule = horizontal_rule(&widths, self.padding);

        let mut lines = vec![self.render_row(&header, &widths), rule.clone()];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.push(rule);
        lines.join("\n")
    }
}

/// Renders a single cell with padding and alignment applied.
pub fn render_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let remaining = width.saturating_sub(text.chars().count());
    let pad = " ".repeat(padding);
    match alignment {
        Alignment::Left => format!("{pad}{text}{}{pad}", " ".repeat(remaining)),
        Alignment::Right => format!("{pad}{}{text}{pad}", " ".repeat(remaining)),
    }
}

/// Builds a horizontal rule that spans the width of the table.
pub fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    let total: usize =
        widths.iter().map(|w| w + padding * 2).sum::<usize>() + widths.len().saturating_sub(1);
    "=".repeat(total)
}
