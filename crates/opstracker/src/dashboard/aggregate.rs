//! Group-by counts, means, crosstabs and pivot tables.
//!
//! All helpers take an already-filtered selection. Empty input yields empty
//! output; no helper divides by a zero count.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use serde::Serialize;

/// A two-dimensional table keyed by row and column labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid<R, C, V> {
    /// Row keys, ascending.
    pub rows: Vec<R>,
    /// Column keys, ascending.
    pub columns: Vec<C>,
    /// `cells[row][column]`.
    pub cells: Vec<Vec<V>>,
}

impl<R, C, V> Grid<R, C, V> {
    /// Whether the grid has no rows or no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }
}

/// Arithmetic mean, or `None` for no values.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Occurrences of each key, in order of first appearance.
#[must_use]
pub fn count_by<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        if let Some(&i) = index.get(&key) {
            counts[i].1 += 1;
        } else {
            index.insert(key.clone(), counts.len());
            counts.push((key, 1));
        }
    }
    counts
}

/// Mean value per key, keys ascending.
#[must_use]
pub fn mean_by<K, I>(pairs: I) -> Vec<(K, f64)>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_default().push(value);
    }
    groups
        .into_iter()
        .filter_map(|(key, values)| mean(values).map(|m| (key, m)))
        .collect()
}

/// Count of each `(row, column)` combination. Absent combinations are zero.
#[must_use]
pub fn crosstab<R, C, I>(pairs: I) -> Grid<R, C, usize>
where
    R: Ord + Clone,
    C: Ord + Clone,
    I: IntoIterator<Item = (R, C)>,
{
    let mut counts: BTreeMap<(R, C), usize> = BTreeMap::new();
    for key in pairs {
        *counts.entry(key).or_default() += 1;
    }
    build_grid(counts, 0, |count| count)
}

/// Mean of the values at each `(row, column)` combination. Absent
/// combinations are `None`.
#[must_use]
pub fn pivot_mean<R, C, I>(triples: I) -> Grid<R, C, Option<f64>>
where
    R: Ord + Clone,
    C: Ord + Clone,
    I: IntoIterator<Item = (R, C, f64)>,
{
    let mut groups: BTreeMap<(R, C), Vec<f64>> = BTreeMap::new();
    for (row, column, value) in triples {
        groups.entry((row, column)).or_default().push(value);
    }
    build_grid(groups, None, mean)
}

fn build_grid<R, C, A, V, F>(cells: BTreeMap<(R, C), A>, empty: V, finish: F) -> Grid<R, C, V>
where
    R: Ord + Clone,
    C: Ord + Clone,
    V: Clone,
    F: Fn(A) -> V,
{
    let rows: Vec<R> = cells
        .keys()
        .map(|(r, _)| r.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let columns: Vec<C> = cells
        .keys()
        .map(|(_, c)| c.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut grid = vec![vec![empty; columns.len()]; rows.len()];
    for ((row, column), acc) in cells {
        // Both keys were collected from this map, so the searches succeed.
        if let (Ok(r), Ok(c)) = (rows.binary_search(&row), columns.binary_search(&column)) {
            grid[r][c] = finish(acc);
        }
    }

    Grid {
        rows,
        columns,
        cells: grid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean([2.0, 4.0, 9.0]), Some(5.0));
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn test_count_by_first_appearance() {
        let counts = count_by(["b", "a", "b", "c", "b"]);
        assert_eq!(counts, vec![("b", 3), ("a", 1), ("c", 1)]);
    }

    #[test]
    fn test_count_by_empty() {
        let counts: Vec<(&str, usize)> = count_by(Vec::new());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_mean_by_sorted_keys() {
        let means = mean_by([("z", 10.0), ("a", 50.0), ("z", 20.0)]);
        assert_eq!(means, vec![("a", 50.0), ("z", 15.0)]);
    }

    #[test]
    fn test_crosstab_zero_fills() {
        let grid = crosstab([("p2", 1), ("p1", 2), ("p1", 2), ("p1", 1)]);
        assert_eq!(grid.rows, vec!["p1", "p2"]);
        assert_eq!(grid.columns, vec![1, 2]);
        assert_eq!(grid.cells, vec![vec![1, 2], vec![1, 0]]);
    }

    #[test]
    fn test_crosstab_empty() {
        let grid: Grid<String, String, usize> = crosstab(Vec::new());
        assert!(grid.is_empty());
        assert!(grid.cells.is_empty());
    }

    #[test]
    fn test_pivot_mean_averages_duplicates() {
        let grid = pivot_mean([
            ("ws-a", 2, 40.0),
            ("ws-a", 2, 60.0),
            ("ws-b", 1, 70.0),
        ]);
        assert_eq!(grid.rows, vec!["ws-a", "ws-b"]);
        assert_eq!(grid.columns, vec![1, 2]);
        assert_eq!(grid.cells, vec![vec![None, Some(50.0)], vec![Some(70.0), None]]);
    }
}
