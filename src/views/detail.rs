use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, Widget},
};

use super::{card, RenderContext};
use crate::dataset;
use crate::metrics::parse_finite;

/// Every column and value of one row of the unfiltered dataset.
pub struct DetailView<'a> {
    pub index: usize,
    pub total: usize,
    pub row: &'a dataset::Row,
    pub ctx: &'a RenderContext,
}

impl Widget for DetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = self
            .row
            .keys()
            .map(|k| k.chars().count() + 1)
            .max()
            .unwrap_or(0)
            .min(40) as u16;

        let rows: Vec<Row> = self
            .row
            .iter()
            .map(|(column, value)| {
                let value_style = if parse_finite(value).is_some() {
                    Style::default().fg(self.ctx.info)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(format!("{column}:"))
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(value.as_str()).style(value_style),
                ])
            })
            .collect();

        let title = format!("Row {} of {}", self.index + 1, self.total);
        Table::new(rows, [Constraint::Length(label_width), Constraint::Fill(1)])
            .column_spacing(2)
            .block(card(&title, self.ctx.primary))
            .render(area, buf);
    }
}
