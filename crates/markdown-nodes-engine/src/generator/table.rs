//! GFM pipe tables, translated row-major in and column-major out.

use markdown_nodes_syntax::{Node, children};

use super::NodeGenerator;
use super::blocks::trim_blank;
use crate::error::GenerateError;
use crate::model::{Alignment, Column, Paragraph, Table};
use crate::options::TableAlignment;

impl<'t> NodeGenerator<'t> {
    pub(super) fn table(&mut self, node: Node<'t>) -> Result<Table, GenerateError> {
        let mut columns: Vec<Column> = Vec::new();
        let mut alignments = Vec::new();

        for part in children(node) {
            match part.kind() {
                "pipe_table_header" => {
                    for cell in cells(part, "pipe_table_cell") {
                        columns.push(Column {
                            header: self.cell_paragraph(cell)?,
                            alignment: Alignment::Left,
                            cells: Vec::new(),
                        });
                    }
                }
                "pipe_table_delimiter_row" => {
                    alignments = cells(part, "pipe_table_delimiter_cell")
                        .into_iter()
                        .map(|cell| alignment_of(self.tree.text(cell)))
                        .collect();
                }
                "pipe_table_row" => {
                    let mut row = cells(part, "pipe_table_cell").into_iter();
                    // Cells beyond the header are dropped, missing ones backfilled
                    for column in &mut columns {
                        let cell = match row.next() {
                            Some(cell) => self.cell_paragraph(cell)?,
                            None => Paragraph::whitespace(),
                        };
                        column.cells.push(cell);
                    }
                }
                _ => {}
            }
        }

        if self.options.table_alignment == TableAlignment::Parsed {
            for (column, alignment) in columns.iter_mut().zip(alignments) {
                column.alignment = alignment;
            }
        }
        Ok(Table { columns })
    }

    /// An empty cell gets the same whitespace placeholder as a missing one.
    fn cell_paragraph(&mut self, cell: Node<'t>) -> Result<Paragraph, GenerateError> {
        let spans = trim_blank(self.inline_spans(cell)?);
        if spans.is_empty() {
            return Ok(Paragraph::whitespace());
        }
        Ok(Paragraph::new(spans))
    }
}

fn cells<'t>(row: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    children(row)
        .into_iter()
        .filter(|cell| cell.kind() == kind)
        .collect()
}

/// Alignment from a delimiter cell such as `:---:`.
fn alignment_of(delimiter: &str) -> Alignment {
    let delimiter = delimiter.trim();
    match (delimiter.starts_with(':'), delimiter.ends_with(':')) {
        (true, true) if delimiter.len() > 1 => Alignment::Center,
        (_, true) => Alignment::Right,
        _ => Alignment::Left,
    }
}
