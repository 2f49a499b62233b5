use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};

use super::RenderContext;
use crate::dataset::Row;
use crate::store::TableStore;
use crate::widgets::datatable::{DataTable, DataTableState};

/// Table title: visible row count, active filters and sort.
pub fn table_title(store: &TableStore, shown: usize) -> String {
    let total = store.dataset().map(|d| d.len()).unwrap_or(0);
    let mut title = format!(" Data ({shown} of {total} rows)");
    if !store.filters().is_empty() {
        let filters: Vec<String> = store
            .filters()
            .iter()
            .map(|(column, query)| format!("{column}~\"{query}\""))
            .collect();
        title.push_str(&format!(" | filter: {}", filters.join(", ")));
    }
    if let Some(sort) = store.sort() {
        title.push_str(&format!(
            " | sort: {} {}",
            sort.column,
            sort.direction.as_str()
        ));
    }
    title.push(' ');
    title
}

/// Render `rows` (the store's current query result) as a table.
pub fn render(
    store: &TableStore,
    rows: &[Row],
    state: &mut DataTableState,
    ctx: &RenderContext,
    area: Rect,
    buf: &mut Buffer,
) {
    let Some(dataset) = store.dataset() else {
        return;
    };
    let columns = dataset.columns();
    let indicators = columns.iter().map(|c| store.sort_direction(c)).collect();

    DataTable::new(columns, rows)
        .with_indicators(indicators)
        .with_title(table_title(store, rows.len()))
        .with_colors(ctx.table_header, ctx.table_border, ctx.primary)
        .render(area, buf, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{row_from_pairs, Dataset, SourceInfo};

    #[test]
    fn test_table_title() {
        let mut store = TableStore::new();
        store.ingest(Dataset::new(
            vec![
                row_from_pairs([("Name", "Ann"), ("City", "NYC")]),
                row_from_pairs([("Name", "Bob"), ("City", "LA")]),
            ],
            SourceInfo::new("people.xlsx"),
        ));
        assert_eq!(table_title(&store, 2), " Data (2 of 2 rows) ");

        store.set_filter("City", "ny");
        store.toggle_sort("Name");
        store.toggle_sort("Name");
        assert_eq!(
            table_title(&store, 1),
            " Data (1 of 2 rows) | filter: City~\"ny\" | sort: Name descending "
        );
    }
}
