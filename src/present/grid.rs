//! Grid Module
//! Shapes one page of the table into styled header and body cells.

use super::style::{
    default_data_rules, default_header_rules, resolve_cell_style, resolve_header_style, CellContext,
    Style, StyleRule,
};
use crate::data::{ColumnId, Table};
use serde::{Deserialize, Serialize};

/// Conditional styling of the table: data-cell rules, header rules and
/// whether columns are editable (header rules can test for it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyles {
    pub data: Vec<StyleRule>,
    pub header: Vec<StyleRule>,
    pub editable: bool,
}

impl Default for GridStyles {
    fn default() -> Self {
        Self {
            data: default_data_rules(),
            header: default_header_rules(),
            editable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub column: ColumnId,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// Index of the record within the whole table.
    pub record_index: usize,
    pub cells: Vec<GridCell>,
}

/// One displayed page of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    /// Zero-based page index.
    pub page: usize,
    pub page_count: usize,
    pub total_rows: usize,
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<GridRow>,
}

impl GridPage {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }
}

/// Number of pages needed for `rows` rows. An empty table still has one page.
pub fn page_count(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size.max(1)).max(1)
}

/// Build page `page` of the table. Out-of-range pages clamp to the last page.
pub fn build_page(table: &Table, styles: &GridStyles, page: usize, page_size: usize) -> GridPage {
    let page_size = page_size.max(1);
    let page_count = page_count(table.len(), page_size);
    let page = page.min(page_count - 1);
    let columns = table.columns();

    let headers = columns
        .iter()
        .map(|column| HeaderCell {
            column: column.clone(),
            style: resolve_header_style(&styles.header, column, styles.editable),
        })
        .collect();

    let start = page * page_size;
    let rows = table
        .records()
        .iter()
        .enumerate()
        .skip(start)
        .take(page_size)
        .enumerate()
        .map(|(row_index, (record_index, record))| {
            let cells = columns
                .iter()
                .zip(record.cells())
                .map(|(column, value)| {
                    let ctx = CellContext {
                        row_index,
                        column,
                        editable: styles.editable,
                        columns,
                        cells: record.cells(),
                    };
                    GridCell {
                        text: value.to_string(),
                        style: resolve_cell_style(&styles.data, &ctx),
                    }
                })
                .collect();
            GridRow {
                record_index,
                cells,
            }
        })
        .collect();

    GridPage {
        page,
        page_count,
        total_rows: table.len(),
        headers,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::color::Color;

    fn table(rows: usize) -> Table {
        let headers: Vec<String> = ["experience_level", "salary_in_usd", "remote_ratio", "Column 1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = (0..rows)
            .map(|i| {
                vec![
                    Some("SE".to_string()),
                    Some(format!("{}", 1000 * (i + 1))),
                    Some("0".to_string()),
                    Some(format!("{}", i % 6)),
                ]
            })
            .collect();
        Table::from_rows(&headers, rows).unwrap()
    }

    #[test]
    fn paginates_ten_rows_per_page() {
        let t = table(23);
        let styles = GridStyles::default();

        let first = build_page(&t, &styles, 0, 10);
        assert_eq!(first.page_count, 3);
        assert_eq!(first.rows.len(), 10);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = build_page(&t, &styles, 2, 10);
        assert_eq!(last.rows.len(), 3);
        assert_eq!(last.rows[0].record_index, 20);
        assert_eq!(last.rows[0].cells[1].text, "21000");
        assert!(!last.has_next());

        let clamped = build_page(&t, &styles, 99, 10);
        assert_eq!(clamped.page, 2);
    }

    #[test]
    fn empty_table_has_one_empty_page() {
        let t = table(0);
        let page = build_page(&t, &GridStyles::default(), 0, 10);
        assert_eq!(page.page_count, 1);
        assert!(page.rows.is_empty());
        assert_eq!(page.headers.len(), 4);
    }

    #[test]
    fn cells_carry_resolved_styles() {
        let t = table(6);
        let page = build_page(&t, &GridStyles::default(), 0, 10);

        // Row 0: Column 1 = 0, even row.
        assert_eq!(page.rows[0].cells[0].style.background, Some(Color::WHITE));
        assert_eq!(page.rows[0].cells[3].style.foreground, Some(Color::RED));
        // Row 1: odd row, Column 1 = 1.
        assert_eq!(page.rows[1].cells[0].style.background, Some(Color::LIGHT_GRAY));
        // Row 5: odd row, Column 1 = 5 > 3, whole row turns green.
        for cell in &page.rows[5].cells {
            assert_eq!(cell.style.background, Some(Color::GREEN));
            assert_eq!(cell.style.foreground, Some(Color::WHITE));
        }

        assert_eq!(page.headers[0].style.background, Some(Color::LIGHT_GRAY));
        assert_eq!(page.headers[3].style.foreground, Some(Color::RED));
    }

    #[test]
    fn row_parity_restarts_on_each_page() {
        let t = table(15);
        let styles = GridStyles {
            data: default_data_rules().into_iter().take(2).collect(),
            ..GridStyles::default()
        };
        let second = build_page(&t, &styles, 1, 5);
        assert_eq!(second.rows[0].record_index, 5);
        assert_eq!(second.rows[0].cells[0].style.background, Some(Color::WHITE));
    }
}
