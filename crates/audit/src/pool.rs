use std::collections::HashSet;

use crate::model::Table;
use crate::normalize::Normalizer;
use crate::schema::KeyColumn;

/// Normalized projection of a whole target sheet onto the comparison columns.
///
/// Built once per sheet; every instruction row of that sheet is looked up in
/// the same pool, so row order on either side never matters.
#[derive(Debug)]
pub struct SearchPool {
    rows: Vec<Vec<String>>,
    index: Option<HashSet<Vec<String>>>,
    rejects: usize,
}

impl SearchPool {
    pub fn build(target: &Table, keys: &[KeyColumn], normalizer: &Normalizer, indexed: bool) -> Self {
        let columns: Vec<(usize, &str)> =
            keys.iter().map(|k| (k.target_index, k.name.as_str())).collect();

        let mut rows = Vec::with_capacity(target.rows.len());
        let mut rejects = 0;
        for (i, projected) in normalizer.project_table(target, &columns).into_iter().enumerate() {
            match projected {
                Ok(row) => rows.push(row),
                Err(e) => {
                    log::warn!("target row {} left out of search pool: {e}", i + 1);
                    rejects += 1;
                }
            }
        }

        let index = indexed.then(|| rows.iter().cloned().collect());

        Self { rows, index, rejects }
    }

    /// True if some pool row equals `row` in every comparison column.
    pub fn contains(&self, row: &[String]) -> bool {
        match &self.index {
            Some(index) => index.contains(row),
            None => self.rows.iter().any(|r| r.as_slice() == row),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Target rows that could not be projected and are not in the pool.
    pub fn rejects(&self) -> usize {
        self.rejects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn keys() -> Vec<KeyColumn> {
        vec![
            KeyColumn { name: "PartNo".into(), target_index: 0, instruction_index: 0 },
            KeyColumn { name: "Plant".into(), target_index: 1, instruction_index: 1 },
        ]
    }

    fn target() -> Table {
        Table::new(
            vec!["PartNo".into(), "Plant".into(), "Desc".into()],
            vec![
                vec![Cell::text("x1"), Cell::text("p01"), Cell::text("bolt")],
                vec![Cell::text("X2 "), Cell::Number(7.0), Cell::Absent],
                vec![Cell::text("short")],
            ],
        )
    }

    #[test]
    fn indexed_and_linear_agree() {
        let n = Normalizer::default();
        let indexed = SearchPool::build(&target(), &keys(), &n, true);
        let linear = SearchPool::build(&target(), &keys(), &n, false);

        for probe in [
            vec!["X1".to_string(), "P01".to_string()],
            vec!["X2".to_string(), "7".to_string()],
            vec!["X1".to_string(), "7".to_string()],
        ] {
            assert_eq!(indexed.contains(&probe), linear.contains(&probe), "probe = {probe:?}");
        }
        assert!(indexed.contains(&["X1".to_string(), "P01".to_string()]));
        assert!(!indexed.contains(&["X1".to_string(), "7".to_string()]));
    }

    #[test]
    fn ragged_target_rows_are_rejected() {
        let n = Normalizer::default();
        let pool = SearchPool::build(&target(), &keys(), &n, true);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.rejects(), 1);
    }

    #[test]
    fn partial_match_is_not_membership() {
        let n = Normalizer::default();
        let pool = SearchPool::build(&target(), &keys(), &n, false);
        // PartNo matches row 1, Plant matches nothing with it.
        assert!(!pool.contains(&["X1".to_string(), "P02".to_string()]));
    }
}
