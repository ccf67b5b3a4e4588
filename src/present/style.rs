//! Conditional Styling Module
//! Ordered (condition, style) rules for grid cells and headers.
//!
//! Rules are resolved in two passes: structural rules (row parity, column
//! identity, column editability) in list order, then filter rules in list
//! order. Each matching rule overrides only the attributes it sets, so the
//! last applicable rule wins per attribute.

use super::color::Color;
use crate::data::{CellValue, ColumnId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Visual attributes of a cell. `None` means "not set by this rule".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
}

impl Style {
    pub fn background(color: Color) -> Self {
        Self {
            background: Some(color),
            foreground: None,
        }
    }

    pub fn foreground(color: Color) -> Self {
        Self {
            background: None,
            foreground: Some(color),
        }
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Apply `other` on top of `self`.
    pub fn overlay(&mut self, other: &Style) {
        if let Some(bg) = other.background {
            self.background = Some(bg);
        }
        if let Some(fg) = other.foreground {
            self.foreground = Some(fg);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn of(index: usize) -> Self {
        if index % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
    Contains,
}

impl CompareOp {
    fn parse(token: &str) -> Option<Self> {
        Some(match token {
            ">" | "gt" => CompareOp::Gt,
            ">=" | "ge" => CompareOp::Ge,
            "<" | "lt" => CompareOp::Lt,
            "<=" | "le" => CompareOp::Le,
            "=" | "eq" => CompareOp::Eq,
            "!=" | "ne" => CompareOp::Ne,
            "contains" => CompareOp::Contains,
            _ => return None,
        })
    }

    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Contains => "contains",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("filter query must start with '{{column}}': {0:?}")]
    MissingColumn(String),
    #[error("unknown operator '{op}' in filter query {query:?}")]
    UnknownOperator { op: String, query: String },
    #[error("filter query has no operand: {0:?}")]
    MissingOperand(String),
}

/// A value predicate over one column of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilterQuery {
    pub column: ColumnId,
    pub op: CompareOp,
    pub operand: CellValue,
}

impl FilterQuery {
    /// Evaluate against the row's value for `self.column`. Absent or empty
    /// cells never match.
    pub fn matches(&self, cell: Option<&CellValue>) -> bool {
        let Some(cell) = cell.filter(|c| !c.is_null()) else {
            return false;
        };

        if self.op == CompareOp::Contains {
            return cell.to_string().contains(&self.operand.to_string());
        }

        let ordering = match (cell.as_f64(), self.operand.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => Some(cell.to_string().cmp(&self.operand.to_string())),
        };
        let Some(ordering) = ordering else {
            return false;
        };

        match self.op {
            CompareOp::Gt => ordering.is_gt(),
            CompareOp::Ge => ordering.is_ge(),
            CompareOp::Lt => ordering.is_lt(),
            CompareOp::Le => ordering.is_le(),
            CompareOp::Eq => ordering.is_eq(),
            CompareOp::Ne => ordering.is_ne(),
            CompareOp::Contains => false,
        }
    }
}

impl FromStr for FilterQuery {
    type Err = FilterParseError;

    fn from_str(query: &str) -> Result<Self, Self::Err> {
        let trimmed = query.trim();
        let (column, rest) = trimmed
            .strip_prefix('{')
            .and_then(|s| s.split_once('}'))
            .filter(|(col, _)| !col.trim().is_empty())
            .ok_or_else(|| FilterParseError::MissingColumn(query.to_string()))?;

        let rest = rest.trim_start();
        let op_len = rest
            .find(|c: char| c.is_whitespace() || c.is_ascii_digit() || c == '"' || c == '\'' || c == '-')
            .unwrap_or(rest.len());
        let (op_token, operand) = rest.split_at(op_len);
        let op = CompareOp::parse(op_token).ok_or_else(|| FilterParseError::UnknownOperator {
            op: op_token.to_string(),
            query: query.to_string(),
        })?;

        let operand = operand.trim();
        if operand.is_empty() {
            return Err(FilterParseError::MissingOperand(query.to_string()));
        }
        let unquoted = operand
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .or_else(|| operand.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')));
        let operand = match unquoted {
            Some(text) => CellValue::Text(text.to_string()),
            None => CellValue::infer(Some(operand)),
        };

        Ok(FilterQuery {
            column: ColumnId::from_header(column.trim()),
            op,
            operand,
        })
    }
}

impl TryFrom<String> for FilterQuery {
    type Error = FilterParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FilterQuery> for String {
    fn from(q: FilterQuery) -> Self {
        q.to_string()
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            CellValue::Text(t) => write!(f, "{{{}}} {} \"{}\"", self.column, self.op.symbol(), t),
            other => write!(f, "{{{}}} {} {}", self.column, self.op.symbol(), other),
        }
    }
}

/// When a rule applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    RowParity(Parity),
    Column(ColumnId),
    ColumnEditable(bool),
    Filter(FilterQuery),
}

impl Condition {
    pub fn is_filter(&self) -> bool {
        matches!(self, Condition::Filter(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    #[serde(rename = "if")]
    pub condition: Condition,
    #[serde(flatten)]
    pub style: Style,
}

impl StyleRule {
    pub fn new(condition: Condition, style: Style) -> Self {
        Self { condition, style }
    }
}

/// Everything a rule may inspect about one data cell.
pub struct CellContext<'a> {
    /// Row index within the displayed page.
    pub row_index: usize,
    pub column: &'a ColumnId,
    pub editable: bool,
    /// Schema of the row, parallel to `cells`.
    pub columns: &'a [ColumnId],
    pub cells: &'a [CellValue],
}

impl CellContext<'_> {
    fn value(&self, column: &ColumnId) -> Option<&CellValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.cells.get(idx)
    }

    fn matches(&self, condition: &Condition) -> bool {
        match condition {
            Condition::RowParity(p) => Parity::of(self.row_index) == *p,
            Condition::Column(c) => c == self.column,
            Condition::ColumnEditable(e) => *e == self.editable,
            Condition::Filter(q) => q.matches(self.value(&q.column)),
        }
    }
}

/// Resolve the style of a data cell.
pub fn resolve_cell_style(rules: &[StyleRule], ctx: &CellContext<'_>) -> Style {
    let mut style = Style::default();
    let structural = rules.iter().filter(|r| !r.condition.is_filter());
    let filters = rules.iter().filter(|r| r.condition.is_filter());
    for rule in structural.chain(filters) {
        if ctx.matches(&rule.condition) {
            style.overlay(&rule.style);
        }
    }
    style
}

/// Resolve the style of a column header. Row and value conditions never
/// apply to headers.
pub fn resolve_header_style(rules: &[StyleRule], column: &ColumnId, editable: bool) -> Style {
    let mut style = Style::default();
    for rule in rules {
        let applies = match &rule.condition {
            Condition::Column(c) => c == column,
            Condition::ColumnEditable(e) => *e == editable,
            Condition::RowParity(_) | Condition::Filter(_) => false,
        };
        if applies {
            style.overlay(&rule.style);
        }
    }
    style
}

/// Default data-cell rules of the dashboard table.
pub fn default_data_rules() -> Vec<StyleRule> {
    let column_1 = ColumnId::Other("Column 1".to_string());
    vec![
        StyleRule::new(Condition::RowParity(Parity::Odd), Style::background(Color::LIGHT_GRAY)),
        StyleRule::new(Condition::RowParity(Parity::Even), Style::background(Color::WHITE)),
        StyleRule::new(Condition::Column(column_1.clone()), Style::foreground(Color::RED)),
        StyleRule::new(
            Condition::Column(ColumnId::Other("Column 2".to_string())),
            Style::foreground(Color::BLUE),
        ),
        StyleRule::new(
            Condition::Filter(FilterQuery {
                column: column_1,
                op: CompareOp::Gt,
                operand: CellValue::Integer(3),
            }),
            Style::background(Color::GREEN).with_foreground(Color::WHITE),
        ),
    ]
}

/// Default header rules of the dashboard table.
pub fn default_header_rules() -> Vec<StyleRule> {
    vec![
        StyleRule::new(Condition::ColumnEditable(true), Style::background(Color::LIGHT_BLUE)),
        StyleRule::new(Condition::ColumnEditable(false), Style::background(Color::LIGHT_GRAY)),
        StyleRule::new(
            Condition::Column(ColumnId::Other("Column 1".to_string())),
            Style::foreground(Color::RED),
        ),
        StyleRule::new(
            Condition::Column(ColumnId::Other("Column 2".to_string())),
            Style::foreground(Color::BLUE),
        ),
    ]
}
