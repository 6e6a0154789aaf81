/// Plain-text column table for terminal output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            col_widths: headers.iter().map(|h| h.chars().count()).collect(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; cells past the header count are dropped, missing cells render empty
    pub fn add_row(&mut self, row: Vec<String>) {
        let mut row: Vec<String> = row.into_iter().take(self.headers.len()).collect();
        row.resize(self.headers.len(), String::new());

        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }

        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut output = self.render_row(&self.headers);
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    fn render_row(&self, row: &[String]) -> String {
        let cells: Vec<String> = row
            .iter()
            .zip(&self.col_widths)
            .map(|(cell, &width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}
