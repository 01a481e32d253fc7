// Raw cell grid -> header + rows

use std::collections::HashSet;

use sheetaudit_audit::{Cell, Table};

/// Turn a raw grid into a table. The first row with any value is the header;
/// rows above it and fully blank rows below it are dropped. Rows are padded
/// with absent cells to the header width.
pub fn table_from_grid(grid: Vec<Vec<Cell>>) -> Table {
    let mut rows = grid.into_iter().filter(|row| row.iter().any(|c| !c.is_absent()));

    let Some(header_row) = rows.next() else {
        return Table::default();
    };

    let body: Vec<Vec<Cell>> = rows.collect();
    let width = body.iter().map(Vec::len).chain([header_row.len()]).max().unwrap_or(0);

    let columns = header_names(&header_row, width);
    let body = body
        .into_iter()
        .map(|mut row| {
            row.resize(width, Cell::Absent);
            row
        })
        .collect();

    Table::new(columns, body)
}

/// Header names for `width` columns. Blank headers become `Unnamed: <idx>`,
/// repeated headers get `.1`, `.2`, ... suffixes.
pub fn header_names(header_row: &[Cell], width: usize) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(width);

    for idx in 0..width {
        let raw = header_row.get(idx).map(|c| c.to_string()).unwrap_or_default();
        let base = if raw.trim().is_empty() { format!("Unnamed: {idx}") } else { raw };

        let mut name = base.clone();
        let mut n = 1;
        while used.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        used.insert(name.clone());
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Cell {
        Cell::text(s)
    }

    #[test]
    fn first_non_blank_row_is_header() {
        let grid = vec![
            vec![Cell::Absent, Cell::Absent],
            vec![t("PartNo"), t("Action")],
            vec![t("x1"), t("add")],
            vec![Cell::Absent, Cell::Absent],
            vec![t("x2")],
        ];
        let table = table_from_grid(grid);
        assert_eq!(table.columns, vec!["PartNo", "Action"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec![t("x2"), Cell::Absent]);
    }

    #[test]
    fn blank_and_duplicate_headers() {
        let names = header_names(&[t("A"), Cell::Absent, t("A"), t("A")], 5);
        assert_eq!(names, vec!["A", "Unnamed: 1", "A.1", "A.2", "Unnamed: 4"]);
    }

    #[test]
    fn empty_grid_is_empty_table() {
        let table = table_from_grid(vec![vec![Cell::Absent]]);
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn numeric_header_renders_as_text() {
        let table = table_from_grid(vec![vec![Cell::Number(2024.0), t("Action")]]);
        assert_eq!(table.columns, vec!["2024", "Action"]);
    }
}
