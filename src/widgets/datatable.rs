use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::dataset;
use crate::store::SortIndicator;

const MAX_COLUMN_WIDTH: u16 = 30;
const COLUMN_SPACING: u16 = 2;

/// Selection and scroll position of the data table.
///
/// `selected_row` indexes the rows passed to [`DataTable`] (the query result),
/// not the underlying dataset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DataTableState {
    pub selected_row: usize,
    pub selected_column: usize,
    pub start_row: usize,
    pub start_column: usize,
    pub visible_rows: usize,
    pub row_numbers: bool,
}

impl DataTableState {
    pub fn new(row_numbers: bool) -> Self {
        Self {
            row_numbers,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.row_numbers);
    }

    /// Keep the selection inside a table of `num_rows` × `num_columns`.
    pub fn clamp(&mut self, num_rows: usize, num_columns: usize) {
        self.selected_row = self.selected_row.min(num_rows.saturating_sub(1));
        self.selected_column = self.selected_column.min(num_columns.saturating_sub(1));
        self.start_column = self.start_column.min(self.selected_column);
        self.scroll_to_selection();
    }

    pub fn select_next(&mut self, num_rows: usize) {
        if self.selected_row + 1 < num_rows {
            self.selected_row += 1;
        }
        self.scroll_to_selection();
    }

    pub fn select_previous(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
        self.scroll_to_selection();
    }

    pub fn page_down(&mut self, num_rows: usize, page: usize) {
        self.selected_row = (self.selected_row + page.max(1)).min(num_rows.saturating_sub(1));
        self.scroll_to_selection();
    }

    pub fn page_up(&mut self, page: usize) {
        self.selected_row = self.selected_row.saturating_sub(page.max(1));
        self.scroll_to_selection();
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
        self.scroll_to_selection();
    }

    pub fn select_last(&mut self, num_rows: usize) {
        self.selected_row = num_rows.saturating_sub(1);
        self.scroll_to_selection();
    }

    pub fn next_column(&mut self, num_columns: usize) {
        if self.selected_column + 1 < num_columns {
            self.selected_column += 1;
        }
    }

    pub fn previous_column(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
        self.start_column = self.start_column.min(self.selected_column);
    }

    fn scroll_to_selection(&mut self) {
        if self.selected_row < self.start_row {
            self.start_row = self.selected_row;
        } else if self.visible_rows > 0 && self.selected_row >= self.start_row + self.visible_rows {
            self.start_row = self.selected_row + 1 - self.visible_rows;
        }
    }
}

/// Table view over query results with sort glyphs in the header.
pub struct DataTable<'a> {
    columns: &'a [String],
    rows: &'a [dataset::Row],
    indicators: Vec<SortIndicator>,
    title: String,
    header_color: Color,
    border_color: Color,
    selected_color: Color,
}

impl<'a> DataTable<'a> {
    pub fn new(columns: &'a [String], rows: &'a [dataset::Row]) -> Self {
        Self {
            columns,
            rows,
            indicators: vec![SortIndicator::None; columns.len()],
            title: String::new(),
            header_color: Color::White,
            border_color: Color::Cyan,
            selected_color: Color::Yellow,
        }
    }

    /// Sort glyph per column, in column order.
    pub fn with_indicators(mut self, indicators: Vec<SortIndicator>) -> Self {
        self.indicators = indicators;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_colors(mut self, header: Color, border: Color, selected: Color) -> Self {
        self.header_color = header;
        self.border_color = border;
        self.selected_color = selected;
        self
    }

    fn header_label(&self, index: usize) -> String {
        let glyph = self
            .indicators
            .get(index)
            .copied()
            .unwrap_or(SortIndicator::None)
            .glyph();
        format!("{} {}", self.columns[index], glyph)
    }

    /// Width of each column over the header and the visible rows.
    fn column_widths(&self, start_row: usize, visible_rows: usize) -> Vec<u16> {
        let window = self.rows.iter().skip(start_row).take(visible_rows);
        let mut widths: Vec<u16> = (0..self.columns.len())
            .map(|i| clamp_width(self.header_label(i).chars().count()))
            .collect();
        for row in window {
            for (i, column) in self.columns.iter().enumerate() {
                let len = clamp_width(row.get(column).map(|v| v.chars().count()).unwrap_or(0));
                widths[i] = widths[i].max(len);
            }
        }
        widths
    }
}

fn clamp_width(chars: usize) -> u16 {
    chars.min(MAX_COLUMN_WIDTH as usize) as u16
}

/// Columns from `start` that fit in `available` cells; always at least one.
fn visible_columns(widths: &[u16], start: usize, available: u16) -> usize {
    let mut used = 0u16;
    let mut count = 0;
    for width in widths.iter().skip(start) {
        let needed = if count == 0 { *width } else { width + COLUMN_SPACING };
        if count > 0 && used.saturating_add(needed) > available {
            break;
        }
        used = used.saturating_add(needed);
        count += 1;
    }
    count
}

impl StatefulWidget for DataTable<'_> {
    type State = DataTableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(self.title.as_str());
        let inner = block.inner(area);
        block.render(area, buf);

        state.visible_rows = inner.height.saturating_sub(1) as usize;
        state.clamp(self.rows.len(), self.columns.len());

        if self.rows.is_empty() || self.columns.is_empty() {
            Paragraph::new("No matching rows")
                .style(Style::default().fg(Color::DarkGray))
                .centered()
                .render(inner, buf);
            return;
        }

        let row_num_width = if state.row_numbers {
            (state.start_row + state.visible_rows).max(1).to_string().len() as u16
        } else {
            0
        };
        let available = inner
            .width
            .saturating_sub(row_num_width + if state.row_numbers { COLUMN_SPACING } else { 0 });

        let widths = self.column_widths(state.start_row, state.visible_rows);
        let mut shown = visible_columns(&widths, state.start_column, available);
        while state.selected_column >= state.start_column + shown {
            state.start_column += 1;
            shown = visible_columns(&widths, state.start_column, available);
        }
        let column_range = state.start_column..state.start_column + shown;

        let mut constraints = Vec::with_capacity(shown + 1);
        if state.row_numbers {
            constraints.push(Constraint::Length(row_num_width));
        }
        constraints.extend(widths[column_range.clone()].iter().map(|w| Constraint::Length(*w)));

        let mut header_cells = Vec::with_capacity(shown + 1);
        if state.row_numbers {
            header_cells.push(Cell::from("#"));
        }
        for i in column_range.clone() {
            let style = if i == state.selected_column {
                Style::default()
                    .fg(self.selected_color)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(self.header_color).add_modifier(Modifier::BOLD)
            };
            header_cells.push(Cell::from(Line::from(Span::styled(self.header_label(i), style))));
        }

        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .skip(state.start_row)
            .take(state.visible_rows)
            .map(|(index, row)| {
                let mut cells = Vec::with_capacity(shown + 1);
                if state.row_numbers {
                    cells.push(
                        Cell::from(format!("{:>width$}", index + 1, width = row_num_width as usize))
                            .style(Style::default().fg(Color::DarkGray)),
                    );
                }
                for column in &self.columns[column_range.clone()] {
                    cells.push(Cell::from(row.get(column).map(String::as_str).unwrap_or("")));
                }
                Row::new(cells)
            })
            .collect();

        let mut table_state = TableState::default();
        table_state.select(Some(state.selected_row - state.start_row));

        StatefulWidget::render(
            Table::new(rows, constraints)
                .column_spacing(COLUMN_SPACING)
                .header(Row::new(header_cells))
                .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            inner,
            buf,
            &mut table_state,
        );
    }
}
