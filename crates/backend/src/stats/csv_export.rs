use contracts::stats::{StatsGroup, StatsTable};

use crate::shared::format::format_amount;
use crate::shared::i18n::{Labels, Language};

/// Flattens the table snapshot into CSV rows.
///
/// The header row leaves the group-level columns blank and then lists
/// the bucket columns. Each tree node becomes one row in depth-first
/// order, its title indented to its level; every top-level group is
/// followed by a blank separator row.
pub fn table_rows(table: &StatsTable, labels: &Labels, language: Language) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    let mut header: Vec<String> = vec![String::new(); table.max_group_level];
    for column in &table.column_names {
        header.push(column.clone());
        if table.show_diff_column {
            header.push(labels.delta.to_string());
        }
    }
    rows.push(header);

    for group in &table.groups {
        push_group_rows(&mut rows, group, 1, table, labels, language);
        rows.push(Vec::new());
    }

    rows
}

fn push_group_rows(
    rows: &mut Vec<Vec<String>>,
    group: &StatsGroup,
    level: usize,
    table: &StatsTable,
    labels: &Labels,
    language: Language,
) {
    let mut row: Vec<String> = Vec::new();
    for _ in 1..level {
        row.push(String::new());
    }
    row.push(group.title.clone());
    // Nodes above the deepest level pad the remaining group columns
    for _ in level..table.max_group_level {
        row.push(labels.total.to_string());
    }

    let mut previous = 0.0;
    for column in &table.column_names {
        let value = group.total(column);
        row.push(format_amount(value, language));
        if table.show_diff_column {
            row.push(format_amount(value - previous, language));
        }
        previous = value;
    }
    rows.push(row);

    for child in group.children.values() {
        push_group_rows(rows, child, level + 1, table, labels, language);
    }
}

/// Serializes the prepared rows as CSV bytes. Separator rows are empty
/// and bypass the writer: csv renders a zero-field record as a single
/// quoted empty field, not as a blank line.
pub fn write_csv(rows: &[Vec<String>]) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for row in rows {
        if row.is_empty() {
            buffer.push(b'\n');
            continue;
        }
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(row)?;
        writer.flush()?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en_labels() -> Labels {
        Labels::for_language(Language::En)
    }

    fn sample_table(show_diff: bool) -> StatsTable {
        let mut orders = StatsGroup::new("Orders");
        orders.add_row(&[], "2024-01", 100.0);
        let mut refunds = StatsGroup::new("Refunds");
        refunds.add_row(&["North".to_string()], "2024-01", 20.0);
        StatsTable::from_groups(vec![orders, refunds], show_diff)
    }

    #[test]
    fn header_spans_group_levels_then_columns() {
        let rows = table_rows(&sample_table(false), &en_labels(), Language::En);
        assert_eq!(rows[0], vec!["", "", "2024-01"]);
    }

    #[test]
    fn diff_mode_adds_a_delta_header_per_column() {
        let mut group = StatsGroup::new("Orders");
        group.add_row(&[], "2024-01", 1.0);
        group.add_row(&[], "2024-02", 1.0);
        let table = StatsTable::from_groups(vec![group], true);

        let rows = table_rows(&table, &en_labels(), Language::En);
        assert_eq!(rows[0], vec!["", "2024-01", "delta", "2024-02", "delta"]);
    }

    #[test]
    fn emits_one_row_per_node_plus_separators() {
        let table = sample_table(false);
        let rows = table_rows(&table, &en_labels(), Language::En);

        let node_count: usize = table.groups.iter().map(|g| g.node_count()).sum();
        assert_eq!(rows.len(), 1 + node_count + table.groups.len());

        assert_eq!(rows[1], vec!["Orders", "total", "100.00"]);
        assert_eq!(rows[2], Vec::<String>::new());
        assert_eq!(rows[3], vec!["Refunds", "total", "20.00"]);
        assert_eq!(rows[4], vec!["", "North", "20.00"]);
        assert_eq!(rows[5], Vec::<String>::new());
    }

    #[test]
    fn diff_cells_subtract_the_previous_column() {
        let mut group = StatsGroup::new("Orders");
        group.add_row(&[], "2024-01", 10.0);
        group.add_row(&[], "2024-02", 15.0);
        group.add_row(&[], "2024-03", 12.0);
        let table = StatsTable::from_groups(vec![group], true);

        let rows = table_rows(&table, &en_labels(), Language::En);
        assert_eq!(
            rows[1],
            vec!["Orders", "10.00", "10.00", "15.00", "5.00", "12.00", "-3.00"]
        );
    }

    #[test]
    fn cells_follow_the_configured_language() {
        let mut group = StatsGroup::new("Umsatz");
        group.add_row(&[], "2024-01", 1234.5);
        let table = StatsTable::from_groups(vec![group], false);

        let labels = Labels::for_language(Language::De);
        let rows = table_rows(&table, &labels, Language::De);
        assert_eq!(rows[1], vec!["Umsatz", "1.234,50"]);
    }

    #[test]
    fn separator_rows_become_bare_newlines() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            Vec::new(),
            vec!["c".to_string(), "d".to_string()],
        ];
        let bytes = write_csv(&rows).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a,b\n\nc,d\n");
    }

    #[test]
    fn csv_bytes_keep_blank_separator_lines() {
        let rows = table_rows(&sample_table(false), &en_labels(), Language::En);
        let bytes = write_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("Orders,total,100.00\n"));
        assert!(text.contains("\n\n"));
        assert!(text.ends_with("\n"));
    }
}
