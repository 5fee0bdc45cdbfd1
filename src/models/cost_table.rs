//! Cost table model.
//!
//! A cost table holds, for every resource, the cumulative cost of
//! assigning it `0..=max_tasks` tasks. Rows are stored contiguously
//! (row-major) so a whole table is a single allocation.
//!
//! # Reference
//! Pilla (2021), "Optimal Task Assignment for Heterogeneous Federated
//! Learning Devices", Sec. III (cost functions C_i)

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Dense per-resource cost functions indexed by task count.
///
/// `get(r, t)` is the cost of resource `r` receiving exactly `t` tasks.
/// Allocators only read from a table; nothing in this crate mutates a
/// table while an allocation is running.
///
/// Serialized as a list of rows and deserialized through
/// [`CostTable::from_rows`], so empty or ragged input is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CostTable {
    resources: usize,
    columns: usize,
    values: Vec<f64>,
}

impl CostTable {
    /// Creates a zero-filled table for `resources` resources and
    /// task counts `0..=max_tasks`.
    pub fn new(resources: usize, max_tasks: usize) -> Self {
        let columns = max_tasks + 1;
        Self {
            resources,
            columns,
            values: vec![0.0; resources * columns],
        }
    }

    /// Builds a table from explicit rows.
    ///
    /// All rows must have the same, non-zero length.
    ///
    /// # Example
    /// ```
    /// use u_allocate::models::CostTable;
    ///
    /// let costs = CostTable::from_rows(vec![vec![0.0, 1.0], vec![0.0, 2.0]]).unwrap();
    /// assert_eq!(costs.resources(), 2);
    /// assert_eq!(costs.max_tasks(), 1);
    /// assert_eq!(costs.get(1, 1), 2.0);
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        let columns = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(ModelError::Empty),
        };

        let mut values = Vec::with_capacity(rows.len() * columns);
        for (row, costs) in rows.iter().enumerate() {
            if costs.len() != columns {
                return Err(ModelError::RaggedRows {
                    row,
                    expected: columns,
                    found: costs.len(),
                });
            }
            values.extend_from_slice(costs);
        }

        Ok(Self {
            resources: rows.len(),
            columns,
            values,
        })
    }

    /// Number of resources (rows).
    #[inline]
    pub fn resources(&self) -> usize {
        self.resources
    }

    /// Largest task count covered by every row.
    #[inline]
    pub fn max_tasks(&self) -> usize {
        self.columns - 1
    }

    /// Cost of assigning `tasks` tasks to `resource`.
    ///
    /// # Panics
    /// If either index is outside the table.
    #[inline]
    pub fn get(&self, resource: usize, tasks: usize) -> f64 {
        self.row(resource)[tasks]
    }

    /// Overwrites a single entry.
    #[inline]
    pub fn set(&mut self, resource: usize, tasks: usize, cost: f64) {
        self.row_mut(resource)[tasks] = cost;
    }

    /// Cost difference of moving `resource` from `from` to `to` tasks.
    #[inline]
    pub fn delta(&self, resource: usize, from: usize, to: usize) -> f64 {
        let row = self.row(resource);
        row[to] - row[from]
    }

    /// Costs of one resource, indexed by task count.
    #[inline]
    pub fn row(&self, resource: usize) -> &[f64] {
        let start = resource * self.columns;
        &self.values[start..start + self.columns]
    }

    /// Mutable costs of one resource.
    #[inline]
    pub fn row_mut(&mut self, resource: usize) -> &mut [f64] {
        let start = resource * self.columns;
        &mut self.values[start..start + self.columns]
    }

    /// Iterates over all rows in resource order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.columns)
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostTable {
    type Error = ModelError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<CostTable> for Vec<Vec<f64>> {
    fn from(table: CostTable) -> Self {
        table.rows().map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let t = CostTable::new(3, 4);
        assert_eq!(t.resources(), 3);
        assert_eq!(t.max_tasks(), 4);
        assert!(t.rows().all(|r| r.len() == 5 && r.iter().all(|&c| c == 0.0)));
    }

    #[test]
    fn test_from_rows_layout() {
        let t = CostTable::from_rows(vec![vec![0.0, 3.0, 2.0], vec![0.0, 1.0, 5.0]]).unwrap();
        assert_eq!(t.get(0, 1), 3.0);
        assert_eq!(t.get(1, 2), 5.0);
        assert_eq!(t.row(1), &[0.0, 1.0, 5.0]);
        assert_eq!(t.rows().count(), 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = CostTable::from_rows(vec![vec![0.0, 1.0], vec![0.0]]).unwrap_err();
        assert_eq!(
            err,
            ModelError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(CostTable::from_rows(vec![]).unwrap_err(), ModelError::Empty);
        assert_eq!(
            CostTable::from_rows(vec![vec![]]).unwrap_err(),
            ModelError::Empty
        );
    }

    #[test]
    fn test_set_and_delta() {
        let mut t = CostTable::new(2, 3);
        t.set(1, 3, 9.5);
        t.set(1, 1, 2.0);
        assert!((t.delta(1, 1, 3) - 7.5).abs() < 1e-10);
        assert_eq!(t.get(0, 3), 0.0);

        t.row_mut(0).copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert!((t.delta(0, 0, 3) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = CostTable::from_rows(vec![vec![0.5, 1.5], vec![0.0, 0.4]]).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "[[0.5,1.5],[0.0,0.4]]");
        let back: CostTable = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let flat = r#"{"resources":2,"columns":3,"values":[0.0]}"#;
        assert!(serde_json::from_str::<CostTable>(flat).is_err());

        let ragged = serde_json::from_str::<CostTable>("[[0.0,1.0],[0.0]]").unwrap_err();
        assert!(ragged.to_string().contains("cost row 1 has 1 entries"));
        assert!(serde_json::from_str::<CostTable>("[]").is_err());
        assert!(serde_json::from_str::<CostTable>("[[]]").is_err());
    }
}
