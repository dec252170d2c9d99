use unicode_width::UnicodeWidthChar;

use super::markup::{Emphasis, Line, Span};

/// One rendered terminal row
pub type Row = Vec<Span>;

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    emphasis: Emphasis,
}

fn cell_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display width of a row in terminal columns
pub fn row_width(row: &Row) -> usize {
    row.iter()
        .flat_map(|span| span.text.chars())
        .map(cell_width)
        .sum()
}

/// Word-wrap parsed lines to `width` columns. Each source line yields at
/// least one row; words wider than a row are broken mid-word.
pub fn wrap(lines: &[Line], width: usize) -> Vec<Row> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in lines {
        wrap_line(line, width, &mut rows);
    }
    rows
}

fn wrap_line(line: &Line, width: usize, rows: &mut Vec<Row>) {
    let cells: Vec<Cell> = line
        .iter()
        .flat_map(|span| {
            span.text.chars().map(|ch| Cell {
                ch,
                emphasis: span.emphasis,
            })
        })
        .collect();

    let mut current: Vec<Cell> = Vec::new();
    let mut current_width = 0;

    for token in tokens(&cells) {
        let token_width: usize = token.iter().map(|c| cell_width(c.ch)).sum();
        let is_space = token[0].ch.is_whitespace();

        if current_width + token_width <= width {
            current.extend_from_slice(token);
            current_width += token_width;
            continue;
        }

        if is_space {
            // Whitespace at a break point is dropped
            rows.push(to_row(trim_end(&current)));
            current.clear();
            current_width = 0;
            continue;
        }

        if !current.is_empty() && token_width <= width {
            rows.push(to_row(trim_end(&current)));
            current.clear();
            current_width = 0;
            current.extend_from_slice(token);
            current_width += token_width;
            continue;
        }

        for cell in token {
            let w = cell_width(cell.ch);
            if current_width + w > width && !current.is_empty() {
                rows.push(to_row(&current));
                current.clear();
                current_width = 0;
            }
            current.push(*cell);
            current_width += w;
        }
    }

    rows.push(to_row(trim_end(&current)));
}

/// Split into alternating runs of whitespace and non-whitespace
fn tokens(cells: &[Cell]) -> Vec<&[Cell]> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for i in 1..=cells.len() {
        if i == cells.len() || cells[i].ch.is_whitespace() != cells[start].ch.is_whitespace() {
            tokens.push(&cells[start..i]);
            start = i;
        }
    }
    tokens
}

fn trim_end(cells: &[Cell]) -> &[Cell] {
    let end = cells
        .iter()
        .rposition(|c| !c.ch.is_whitespace())
        .map_or(0, |i| i + 1);
    &cells[..end]
}

fn to_row(cells: &[Cell]) -> Row {
    let mut row: Row = Vec::new();
    for cell in cells {
        match row.last_mut() {
            Some(span) if span.emphasis == cell.emphasis => span.text.push(cell.ch),
            _ => row.push(Span::new(cell.ch.to_string(), cell.emphasis)),
        }
    }
    row
}

/// Flip a row horizontally within `width` columns, as seen in a mirror
pub fn mirror(row: &Row, width: usize) -> Row {
    let pad = width.saturating_sub(row_width(row));
    let mut cells: Vec<Cell> = row
        .iter()
        .flat_map(|span| {
            span.text.chars().map(|ch| Cell {
                ch,
                emphasis: span.emphasis,
            })
        })
        .collect();
    cells.extend(std::iter::repeat_n(
        Cell {
            ch: ' ',
            emphasis: Emphasis::None,
        },
        pad,
    ));
    cells.reverse();
    to_row(&cells)
}
