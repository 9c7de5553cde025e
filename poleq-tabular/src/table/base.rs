//! Observation table.
use super::{
    config::ObservationTableConfig,
    node::{self, Node, NodeMap},
};
use crate::{Discretizer, MultiBucketer, TabularError};
use log::trace;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Lazily populated table mapping discrete observations to action values.
///
/// Every key is a sequence of `i64` coordinates. The first access to a key creates
/// its path, one nested level per coordinate, and a leaf of `n_actions` values set
/// to `init_value`. Nodes are never removed.
///
/// If a [`Discretizer`] is configured, [`ObservationTable::get`] buckets raw
/// observations into keys. [`ObservationTable::get_key`] takes keys directly.
///
/// The slice returned by `get` and `get_key` is the storage of the table, so
/// writing to it updates the table:
///
/// ```rust
/// use poleq_tabular::{Bucketer, ObservationTable};
///
/// let mut table = ObservationTable::new(0.5, 3, Some(Bucketer::new(0.0, 1.0, 4).unwrap().into())).unwrap();
/// assert!(table.is_empty());
///
/// let values = table.get(&[0.3]).unwrap();
/// assert_eq!(values, &[0.5, 0.5, 0.5]);
/// values[2] = 1.0;
///
/// assert_eq!(table.get(&[0.26]).unwrap(), &[0.5, 0.5, 1.0]);
/// assert_eq!(table.n_leaves(), 1);
/// ```
///
/// A deserialized table is checked like a freshly built one, and its key length
/// is recovered from the stored keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObservationTable")]
pub struct ObservationTable {
    init_value: f64,
    n_actions: usize,
    discretizer: Option<Discretizer>,

    /// Length of the keys stored in the table, fixed by the first key.
    key_len: Option<usize>,

    root: NodeMap,
}

/// Unchecked form of [`ObservationTable`], validated on deserialization.
#[derive(Deserialize)]
struct RawObservationTable {
    init_value: f64,
    n_actions: usize,
    discretizer: Option<Discretizer>,
    #[serde(default)]
    key_len: Option<usize>,
    #[serde(default)]
    root: NodeMap,
}

impl TryFrom<RawObservationTable> for ObservationTable {
    type Error = TabularError;

    fn try_from(raw: RawObservationTable) -> Result<Self, Self::Error> {
        let mut table = Self::new(raw.init_value, raw.n_actions, raw.discretizer)?;
        let key_len = node::key_len(&raw.root, raw.n_actions)?;

        if let Some(stored) = raw.key_len {
            if key_len != Some(stored) {
                return Err(TabularError::DimensionMismatch {
                    expected: stored,
                    actual: key_len.unwrap_or(0),
                });
            }
        }
        if let (Some(d), Some(k)) = (&table.discretizer, key_len) {
            if d.dim() != k {
                return Err(TabularError::DimensionMismatch {
                    expected: d.dim(),
                    actual: k,
                });
            }
        }

        table.key_len = key_len;
        table.root = raw.root;
        Ok(table)
    }
}

impl ObservationTable {
    /// Creates an empty table.
    ///
    /// * `init_value` - The value of every action in a newly created leaf.
    /// * `n_actions` - The number of actions, i.e., the length of a leaf.
    /// * `discretizer` - If given, [`ObservationTable::get`] buckets observations with it.
    pub fn new(
        init_value: f64,
        n_actions: usize,
        discretizer: Option<Discretizer>,
    ) -> Result<Self, TabularError> {
        if n_actions == 0 {
            return Err(TabularError::ZeroActions);
        }

        Ok(Self {
            init_value,
            n_actions,
            discretizer,
            key_len: None,
            root: NodeMap::default(),
        })
    }

    /// Builds an empty table from a configuration.
    pub fn build(config: &ObservationTableConfig) -> Result<Self, TabularError> {
        let discretizer: Option<Discretizer> = match &config.bucketing {
            Some(b) => Some(
                MultiBucketer::new(&b.lower_bounds, &b.upper_bounds, b.n_buckets)?.into(),
            ),
            None => None,
        };
        Self::new(config.init_value, config.n_actions, discretizer)
    }

    /// The value of every action in a newly created leaf.
    pub fn init_value(&self) -> f64 {
        self.init_value
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// The discretizer applied by [`ObservationTable::get`], if any.
    pub fn discretizer(&self) -> Option<&Discretizer> {
        self.discretizer.as_ref()
    }

    /// Converts an observation into the key it is stored under.
    ///
    /// Without a discretizer, every value must be an integer, e.g., an already
    /// bucketed observation.
    pub fn key_of(&self, observation: &[f64]) -> Result<Vec<i64>, TabularError> {
        match &self.discretizer {
            Some(d) => d.bucket(observation),
            None => observation.iter().map(|&v| discrete_value(v)).collect(),
        }
    }

    /// Returns the action values of `observation`, creating them if absent.
    pub fn get(&mut self, observation: &[f64]) -> Result<&mut [f64], TabularError> {
        let key = self.key_of(observation)?;
        self.get_key(&key)
    }

    /// Returns the action values of a discrete key, creating them if absent.
    ///
    /// Fails on an empty key, or on a key whose length differs from the keys
    /// already stored in the table. A failed call does not modify the table.
    pub fn get_key(&mut self, key: &[i64]) -> Result<&mut [f64], TabularError> {
        let (last, prefix) = key.split_last().ok_or(TabularError::EmptyKey)?;
        self.check_key_len(key)?;
        let n_actions = self.n_actions;
        let init_value = self.init_value;

        let mut level = &mut self.root;
        for (depth, k) in prefix.iter().enumerate() {
            level = match level.entry(*k).or_insert_with(Node::branch) {
                Node::Branch(map) => map,
                Node::Leaf(_) => {
                    return Err(TabularError::DimensionMismatch {
                        expected: depth + 1,
                        actual: key.len(),
                    })
                }
            };
        }

        let node = level.entry(*last).or_insert_with(|| {
            trace!("Create action values for key {:?}", key);
            Node::Leaf(vec![init_value; n_actions])
        });
        match node {
            Node::Leaf(values) => {
                self.key_len = Some(key.len());
                Ok(values.as_mut_slice())
            }
            Node::Branch(_) => Err(TabularError::DimensionMismatch {
                expected: key.len() + 1,
                actual: key.len(),
            }),
        }
    }

    /// Returns the action values of a key without creating them.
    pub fn peek(&self, key: &[i64]) -> Option<&[f64]> {
        let (last, prefix) = key.split_last()?;
        let mut level = &self.root;
        for k in prefix {
            level = match level.get(k)? {
                Node::Branch(map) => map,
                Node::Leaf(_) => return None,
            };
        }
        match level.get(last)? {
            Node::Leaf(values) => Some(values.as_slice()),
            Node::Branch(_) => None,
        }
    }

    /// Returns `true` if action values of `key` have been created.
    pub fn contains(&self, key: &[i64]) -> bool {
        self.peek(key).is_some()
    }

    /// Number of keys with action values.
    pub fn n_leaves(&self) -> usize {
        node::count_leaves(&self.root)
    }

    /// Returns `true` if no action values have been created.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of nodes in the table, i.e., nested maps plus leaves.
    pub fn n_nodes(&self) -> usize {
        node::count_nodes(&self.root)
    }

    /// Nesting depth of the table; 0 if it is empty.
    pub fn depth(&self) -> usize {
        node::max_depth(&self.root)
    }

    /// Returns all keys with their action values, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<i64>, &[f64])> + '_ {
        let mut out = Vec::new();
        node::collect_leaves(&self.root, &mut Vec::new(), &mut out);
        out.into_iter()
    }

    fn check_key_len(&self, key: &[i64]) -> Result<(), TabularError> {
        match self.key_len {
            Some(expected) if expected != key.len() => Err(TabularError::DimensionMismatch {
                expected,
                actual: key.len(),
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ObservationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        node::fmt_map(&self.root, f)
    }
}

fn discrete_value(v: f64) -> Result<i64, TabularError> {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Ok(v as i64)
    } else {
        Err(TabularError::NonDiscreteObservation(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bucketer;

    fn table() -> ObservationTable {
        let bucketer = MultiBucketer::new(&[0.0, -5.0], &[10.0, 5.0], 5).unwrap();
        ObservationTable::new(0.0, 2, Some(bucketer.into())).unwrap()
    }

    #[test]
    fn test_empty_key() {
        let mut table = ObservationTable::new(0.0, 2, None).unwrap();
        assert_eq!(table.get_key(&[]), Err(TabularError::EmptyKey));
        assert_eq!(table.get(&[]), Err(TabularError::EmptyKey));
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_actions() {
        assert_eq!(
            ObservationTable::new(0.0, 0, None),
            Err(TabularError::ZeroActions)
        );
    }

    #[test]
    fn test_key_length_is_fixed_by_first_key() -> Result<(), TabularError> {
        let mut table = ObservationTable::new(1.0, 2, None)?;
        table.get_key(&[1, 2, 3])?;

        assert_eq!(
            table.get_key(&[1, 2]),
            Err(TabularError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            table.get_key(&[1, 2, 3, 4]),
            Err(TabularError::DimensionMismatch {
                expected: 3,
                actual: 4
            })
        );
        assert_eq!(table.n_nodes(), 3);
        assert_eq!(table.n_leaves(), 1);
        Ok(())
    }

    #[test]
    fn test_observation_dimension_mismatch() {
        let mut table = table();
        assert_eq!(
            table.get(&[1.0, 2.0, 3.0]),
            Err(TabularError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_raw_observations_must_be_discrete() -> Result<(), TabularError> {
        let mut table = ObservationTable::new(0.0, 2, None)?;
        table.get(&[3.0, -1.0])?[0] = 2.0;

        assert_eq!(table.peek(&[3, -1]), Some(&[2.0, 0.0][..]));
        assert_eq!(
            table.get(&[0.5, 1.0]),
            Err(TabularError::NonDiscreteObservation(0.5))
        );
        assert!(table.get(&[f64::NAN, 1.0]).is_err());
        assert!(table.get(&[1.0, f64::INFINITY]).is_err());
        Ok(())
    }

    #[test]
    fn test_out_of_range_coordinates_are_keys() -> Result<(), TabularError> {
        let mut table = table();
        table.get(&[11.0, 0.0])?;
        assert!(table.contains(&[-1, 2]));
        Ok(())
    }

    #[test]
    fn test_scalar_discretizer() -> Result<(), TabularError> {
        let mut table = ObservationTable::new(0.0, 1, Some(Bucketer::new(0.0, 10.0, 5)?.into()))?;
        table.get(&[2.5])?[0] += 1.0;
        table.get(&[3.5])?[0] += 1.0;
        table.get(&[4.5])?[0] += 1.0;

        assert_eq!(table.n_leaves(), 2);
        assert_eq!(table.depth(), 1);
        assert_eq!(table.peek(&[1]), Some(&[2.0][..]));
        assert_eq!(table.peek(&[2]), Some(&[1.0][..]));
        Ok(())
    }

    #[test]
    fn test_peek_does_not_create() -> Result<(), TabularError> {
        let mut table = table();
        assert_eq!(table.peek(&[1, 2]), None);
        assert!(!table.contains(&[1, 2]));
        assert!(table.is_empty());

        table.get(&[2.0, 0.0])?;
        assert!(table.contains(&[1, 2]));
        assert!(!table.contains(&[1]));
        assert!(!table.contains(&[1, 2, 0]));
        assert!(!table.contains(&[]));
        Ok(())
    }

    fn yaml(table: &ObservationTable) -> String {
        serde_yaml::to_string(table).unwrap()
    }

    fn load(yaml: &str) -> Result<ObservationTable, String> {
        serde_yaml::from_str(yaml).map_err(|e| e.to_string())
    }

    #[test]
    fn test_stored_table_is_validated() -> Result<(), TabularError> {
        let mut stored = ObservationTable::new(0.0, 3, None)?;
        stored.get_key(&[1, 2])?;
        assert_eq!(load(&yaml(&stored)), Ok(stored.clone()));

        let mut short_leaf = stored.clone();
        short_leaf.root = NodeMap::default();
        short_leaf.root.insert(1, Node::Leaf(vec![1.0]));
        short_leaf.key_len = Some(1);
        let err = load(&yaml(&short_leaf)).unwrap_err();
        assert!(err.contains("Leaf length mismatch"), "{}", err);

        let mut zero_actions = ObservationTable::new(0.0, 1, None)?;
        zero_actions.n_actions = 0;
        let err = load(&yaml(&zero_actions)).unwrap_err();
        assert!(err.contains("number of actions"), "{}", err);

        let mut uneven = stored.clone();
        uneven.root.insert(7, Node::Leaf(vec![0.0; 3]));
        let err = load(&yaml(&uneven)).unwrap_err();
        assert!(err.contains("different lengths"), "{}", err);

        let mut empty_branch = stored.clone();
        empty_branch.root.insert(7, Node::branch());
        let err = load(&yaml(&empty_branch)).unwrap_err();
        assert!(err.contains("Empty branch"), "{}", err);

        let mut wrong_key_len = stored.clone();
        wrong_key_len.key_len = Some(1);
        let err = load(&yaml(&wrong_key_len)).unwrap_err();
        assert!(err.contains("Dimension mismatch"), "{}", err);
        Ok(())
    }

    #[test]
    fn test_stored_key_len_is_recovered() -> Result<(), TabularError> {
        let mut stored = ObservationTable::new(0.0, 2, None)?;
        stored.get_key(&[1, 2])?[0] = 4.0;
        stored.key_len = None;

        let mut table = load(&yaml(&stored)).unwrap();
        assert_eq!(
            table.get_key(&[1]),
            Err(TabularError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(table.get_key(&[1, 2])?, &[4.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_stored_discretizer_must_match_keys() -> Result<(), TabularError> {
        let mut stored = table();
        stored.get(&[2.0, 0.0])?;
        stored.discretizer = Some(Bucketer::new(0.0, 10.0, 5)?.into());

        let err = load(&yaml(&stored)).unwrap_err();
        assert!(err.contains("Dimension mismatch"), "{}", err);
        Ok(())
    }

    #[test]
    fn test_failed_lookup_keeps_key_len() -> Result<(), TabularError> {
        let mut table = ObservationTable::new(0.0, 2, None)?;
        table.get_key(&[1, 2])?;
        table.key_len = None;

        assert!(table.get_key(&[1]).is_err());
        assert_eq!(table.key_len, None);
        assert_eq!(table.get_key(&[1, 2])?, &[0.0, 0.0]);
        assert_eq!(table.key_len, Some(2));
        assert_eq!(table.n_nodes(), 2);
        Ok(())
    }

    #[test]
    fn test_iter_and_display() -> Result<(), TabularError> {
        let mut table = table();
        table.get_key(&[1, 2])?[1] = 5.0;
        table.get_key(&[1, 0])?;
        table.get_key(&[0, 4])?;

        let mut entries = table
            .iter()
            .map(|(k, v)| (k, v.to_vec()))
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            entries,
            vec![
                (vec![0, 4], vec![0.0, 0.0]),
                (vec![1, 0], vec![0.0, 0.0]),
                (vec![1, 2], vec![0.0, 5.0]),
            ]
        );

        assert_eq!(
            table.to_string(),
            "{0: {4: [0.0, 0.0]}, 1: {0: [0.0, 0.0], 2: [0.0, 5.0]}}"
        );
        Ok(())
    }
}
