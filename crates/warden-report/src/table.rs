//! Plain-text table rendering.
//!
//! Cells are lists of lines; a row is as tall as its tallest cell and a
//! column as wide as its widest line. Used by the permission tables, but
//! generic over any string content.

/// One table cell: zero or more lines of text.
pub type Cell = Vec<String>;

/// Separator and alignment settings for a rendered table.
#[derive(Debug, Clone)]
pub struct TableSettings {
    /// Printed before the first column of every line.
    pub first_vertical_separator: String,
    /// Printed between columns.
    pub vertical_separator: String,
    /// Printed after the last column of every line.
    pub last_vertical_separator: String,
    /// Rule character printed above, between, and below rows; `None`
    /// renders no rules at all.
    pub horizontal_separator: Option<char>,
    /// Left-align cell content (right-align otherwise).
    pub align_left: bool,
    /// Character used to pad cells to the column width.
    pub padding_char: char,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            first_vertical_separator: "| ".to_string(),
            vertical_separator: " | ".to_string(),
            last_vertical_separator: " |".to_string(),
            horizontal_separator: Some('-'),
            align_left: true,
            padding_char: ' ',
        }
    }
}

impl TableSettings {
    /// Bare columns separated by whitespace, no rules or borders.
    pub fn borderless() -> Self {
        Self {
            first_vertical_separator: String::new(),
            vertical_separator: "   ".to_string(),
            last_vertical_separator: String::new(),
            horizontal_separator: None,
            align_left: true,
            padding_char: ' ',
        }
    }
}

fn display_width(line: &str) -> usize {
    line.chars().count()
}

fn pad(line: &str, width: usize, settings: &TableSettings) -> String {
    let fill = width.saturating_sub(display_width(line));
    let padding: String = std::iter::repeat_n(settings.padding_char, fill).collect();
    if settings.align_left {
        format!("{line}{padding}")
    } else {
        format!("{padding}{line}")
    }
}

/// Render rows of cells as an aligned text table.
///
/// Every row must have the same number of columns.
pub fn render_table(rows: &[Vec<Cell>], settings: &TableSettings) -> String {
    let Some(first_row) = rows.first() else {
        return String::new();
    };
    let columns = first_row.len();

    let mut column_widths = vec![0usize; columns];
    let mut row_heights = vec![0usize; rows.len()];
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            row_heights[r] = row_heights[r].max(cell.len());
            for line in cell {
                column_widths[c] = column_widths[c].max(display_width(line));
            }
        }
    }

    let rule_width = column_widths.iter().sum::<usize>()
        + display_width(&settings.first_vertical_separator)
        + display_width(&settings.vertical_separator) * columns.saturating_sub(1)
        + display_width(&settings.last_vertical_separator);
    let rule = settings
        .horizontal_separator
        .map(|sep| std::iter::repeat_n(sep, rule_width).collect::<String>());

    let mut rendered_rows = Vec::with_capacity(rows.len());
    for (r, row) in rows.iter().enumerate() {
        let mut lines = Vec::with_capacity(row_heights[r]);
        for l in 0..row_heights[r] {
            let content = row
                .iter()
                .enumerate()
                .map(|(c, cell)| {
                    let line = cell.get(l).map_or("", String::as_str);
                    pad(line, column_widths[c], settings)
                })
                .collect::<Vec<_>>()
                .join(&settings.vertical_separator);
            lines.push(format!(
                "{}{content}{}",
                settings.first_vertical_separator, settings.last_vertical_separator
            ));
        }
        rendered_rows.push(lines.join("\n"));
    }

    match rule {
        Some(rule) => {
            let body = rendered_rows.join(&format!("\n{rule}\n"));
            format!("{rule}\n{body}\n{rule}")
        }
        None => rendered_rows.join("\n"),
    }
}
