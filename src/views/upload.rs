use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{card, field, RenderContext};
use crate::dataset::SourceInfo;
use crate::import::{ImportOptions, ImportSummary};

/// Upload instructions, the limits in force and the currently loaded workbook.
pub struct UploadView<'a> {
    pub options: &'a ImportOptions,
    pub source: Option<&'a SourceInfo>,
    pub summary: Option<&'a ImportSummary>,
    pub ctx: &'a RenderContext,
}

/// `.xlsx or .xls`
pub fn allowed_list(options: &ImportOptions) -> String {
    options.allowed_extensions.join(" or ")
}

/// Ceiling in whole megabytes.
pub fn max_size_label(options: &ImportOptions) -> String {
    format!("{}MB", options.max_size_bytes / (1024 * 1024))
}

impl Widget for UploadView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Fill(1)])
            .split(area);

        Paragraph::new(vec![
            Line::from(format!(
                "Open an Excel file ({}) to begin analyzing your data.",
                allowed_list(self.options)
            )),
            field("Maximum file size", max_size_label(self.options)),
            Line::from(""),
            Line::from(Span::styled(
                "📤 Press o, type a path and press Enter",
                Style::default().fg(ctx.primary).add_modifier(Modifier::BOLD),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(card("Upload Excel File", ctx.primary))
        .render(rows[0], buf);

        let mut lines = Vec::new();
        match (self.source, self.summary) {
            (Some(source), summary) => {
                lines.push(field("File", source.file_name.clone()));
                if let Some(summary) = summary {
                    lines.push(Line::from(Span::styled(
                        summary.message(),
                        Style::default().fg(ctx.success),
                    )));
                    lines.push(field(
                        "Columns",
                        format!(
                            "{} ({} numeric)",
                            summary.column_count, summary.numeric_columns
                        ),
                    ));
                }
                if !source.sheet_names.is_empty() {
                    lines.push(Line::from(""));
                    lines.push(Line::from("Sheets ([ and ] to switch):"));
                    for (i, name) in source.sheet_names.iter().enumerate() {
                        let line = if i == source.sheet_index {
                            Line::from(Span::styled(
                                format!("  ▶ {name}"),
                                Style::default().fg(ctx.primary).add_modifier(Modifier::BOLD),
                            ))
                        } else {
                            Line::from(format!("    {name}"))
                        };
                        lines.push(line);
                    }
                }
            }
            (None, _) => lines.push(Line::from(Span::styled(
                "No file loaded",
                Style::default().fg(ctx.text_secondary),
            ))),
        }
        Paragraph::new(lines)
            .block(card("Current Workbook", ctx.secondary))
            .render(rows[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_labels() {
        let options = ImportOptions::default();
        assert_eq!(allowed_list(&options), ".xlsx or .xls");
        assert_eq!(max_size_label(&options), "10MB");
    }

    #[test]
    fn test_render_marks_active_sheet() {
        let options = ImportOptions::default();
        let source = SourceInfo::new("book.xlsx")
            .with_sheets(vec!["Q1".to_string(), "Q2".to_string()], 1);
        let ctx = RenderContext::default();
        let area = Rect::new(0, 0, 80, 16);
        let mut buf = Buffer::empty(area);
        UploadView {
            options: &options,
            source: Some(&source),
            summary: None,
            ctx: &ctx,
        }
        .render(area, &mut buf);
        let text = crate::views::buffer_text(&buf);
        assert!(text.contains("Maximum file size: 10MB"));
        assert!(text.contains("▶ Q2"));
        assert!(text.contains("    Q1"));
    }
}
