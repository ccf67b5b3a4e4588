//! Presentation module - shapes the table and statistics for the renderers
//!
//! Nothing here draws; the GUI and the static chart renderer consume these
//! structures.

mod bar;
mod color;
mod grid;
mod style;
mod summary;

pub use bar::{Bar, BarChartSpec, BarMode, BarSeries, ChartConfig};
pub use color::{palette_color, plasma, Color, ParseColorError};
pub use grid::{build_page, page_count, GridCell, GridPage, GridRow, GridStyles, HeaderCell};
pub use style::{
    default_data_rules, default_header_rules, resolve_cell_style, resolve_header_style,
    CellContext, CompareOp, Condition, FilterParseError, FilterQuery, Parity, Style, StyleRule,
};
pub use summary::{format_currency, SummaryBlock, SummaryLine};
