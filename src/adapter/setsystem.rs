//! The accepted raw input shapes and their normalization
//!
//! Every shape converges on the same ordered sequence of incidence
//! triples; the graph layer never learns which shape the caller had.

use super::config::{CellProperties, HypergraphConfig};
use super::table::Table;
use crate::graph::{Label, Properties, PropertyValue};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Errors that abort a build. No partial model is ever returned.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("structural columns must differ: '{0}' selects both edges and nodes")]
    AmbiguousColumns(String),

    #[error("column not found in records input: {0}")]
    ColumnNotFound(String),

    #[error("edge/node label is missing or not text/integer ({0})")]
    MalformedLabel(String),

    #[error("coordinate {index} out of range for {axis} labels (len {len})")]
    CoordinateOutOfRange {
        axis: &'static str,
        index: usize,
        len: usize,
    },

    #[error("ragged row {row}: expected {expected} cells, got {got}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("cell weight for ({edge}, {node}) is not numeric")]
    NonNumericWeight { edge: Label, node: Label },

    #[error("conflicting values for duplicate cell ({edge}, {node})")]
    ConflictingCell { edge: Label, node: Label },
}

/// Result type for construction
pub type BuildResult<T> = Result<T, BuildError>;

/// Inline attributes carried by one raw incidence record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    pub weight: Option<f64>,
    pub properties: Properties,
}

/// One normalized incidence: edge label, node label, inline cell data.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidenceTriple {
    pub edge: Label,
    pub node: Label,
    pub cell: Option<CellData>,
}

/// The closed set of accepted raw input shapes.
#[derive(Debug, Clone)]
pub enum SetSystem {
    /// Edge label -> member node labels. No inline attributes; every
    /// membership becomes one incidence at the default weight.
    EdgeSets(IndexMap<Label, Vec<Label>>),
    /// Edge label -> (node label -> cell properties). An inner key equal to
    /// the configured cell weight key supplies the cell weight and is not
    /// stored as a plain property.
    EdgeCellMappings(IndexMap<Label, IndexMap<Label, Properties>>),
    /// (row, col) index pairs resolved positionally against two label
    /// sequences: rows are edges, columns are nodes.
    Coordinates {
        pairs: Vec<(usize, usize)>,
        edge_labels: Vec<Label>,
        node_labels: Vec<Label>,
    },
    /// One record per incidence; structural columns named by the config.
    Records(Table),
}

impl SetSystem {
    pub fn from_edge_sets<E, S, N>(sets: impl IntoIterator<Item = (E, S)>) -> Self
    where
        E: Into<Label>,
        S: IntoIterator<Item = N>,
        N: Into<Label>,
    {
        Self::EdgeSets(
            sets.into_iter()
                .map(|(edge, nodes)| {
                    (edge.into(), nodes.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }

    pub fn from_cell_mappings<E, N, M, I>(mappings: I) -> Self
    where
        E: Into<Label>,
        N: Into<Label>,
        M: IntoIterator<Item = (N, Properties)>,
        I: IntoIterator<Item = (E, M)>,
    {
        Self::EdgeCellMappings(
            mappings
                .into_iter()
                .map(|(edge, cells)| {
                    (
                        edge.into(),
                        cells
                            .into_iter()
                            .map(|(node, properties)| (node.into(), properties))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    pub fn from_coordinates<E, N>(
        pairs: Vec<(usize, usize)>,
        edge_labels: impl IntoIterator<Item = E>,
        node_labels: impl IntoIterator<Item = N>,
    ) -> Self
    where
        E: Into<Label>,
        N: Into<Label>,
    {
        Self::Coordinates {
            pairs,
            edge_labels: edge_labels.into_iter().map(Into::into).collect(),
            node_labels: node_labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Dense presentation of the coordinate shape: one row per edge, one
    /// column per node, every non-zero entry is an incidence.
    pub fn from_incidence_matrix<E, N>(
        matrix: Vec<Vec<u8>>,
        edge_labels: impl IntoIterator<Item = E>,
        node_labels: impl IntoIterator<Item = N>,
    ) -> Self
    where
        E: Into<Label>,
        N: Into<Label>,
    {
        let pairs = matrix
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| **value != 0)
                    .map(move |(col, _)| (row, col))
            })
            .collect();
        Self::Coordinates {
            pairs,
            edge_labels: edge_labels.into_iter().map(Into::into).collect(),
            node_labels: node_labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Normalize this shape into the ordered incidence-triple sequence.
    ///
    /// Ordering follows the input: outer mapping order, then inner order
    /// (or row order for coordinates/records). Duplicate pairs are NOT
    /// collapsed here; the store merges them under the configured policy.
    pub fn normalize(&self, config: &HypergraphConfig) -> BuildResult<Vec<IncidenceTriple>> {
        let mut triples = match self {
            SetSystem::EdgeSets(sets) => sets
                .iter()
                .flat_map(|(edge, nodes)| {
                    nodes.iter().map(move |node| IncidenceTriple {
                        edge: edge.clone(),
                        node: node.clone(),
                        cell: None,
                    })
                })
                .collect(),

            SetSystem::EdgeCellMappings(mappings) => {
                let weight_key = config.cell_weight_key();
                let mut triples = Vec::new();
                for (edge, cells) in mappings {
                    for (node, properties) in cells {
                        let cell =
                            split_cell_weight(properties.clone(), weight_key, edge, node)?;
                        triples.push(IncidenceTriple {
                            edge: edge.clone(),
                            node: node.clone(),
                            cell: Some(cell),
                        });
                    }
                }
                triples
            }

            SetSystem::Coordinates {
                pairs,
                edge_labels,
                node_labels,
            } => {
                let mut triples = Vec::with_capacity(pairs.len());
                for (row, col) in pairs {
                    let edge = edge_labels.get(*row).ok_or(BuildError::CoordinateOutOfRange {
                        axis: "edge",
                        index: *row,
                        len: edge_labels.len(),
                    })?;
                    let node = node_labels.get(*col).ok_or(BuildError::CoordinateOutOfRange {
                        axis: "node",
                        index: *col,
                        len: node_labels.len(),
                    })?;
                    triples.push(IncidenceTriple {
                        edge: edge.clone(),
                        node: node.clone(),
                        cell: None,
                    });
                }
                triples
            }

            SetSystem::Records(table) => normalize_records(table, config)?,
        };

        if let Some(CellProperties::Mapping(mapping)) = &config.cell_properties {
            overlay_cell_mapping(&mut triples, mapping, config)?;
        }

        debug!(count = triples.len(), "normalized set system");
        Ok(triples)
    }
}

/// Pull the weight entry out of an inner property map.
fn split_cell_weight(
    mut properties: Properties,
    weight_key: &str,
    edge: &Label,
    node: &Label,
) -> BuildResult<CellData> {
    let weight = match properties.remove(weight_key) {
        Some(value) => Some(value.as_f64().ok_or_else(|| BuildError::NonNumericWeight {
            edge: edge.clone(),
            node: node.clone(),
        })?),
        None => None,
    };
    Ok(CellData { weight, properties })
}

/// Merge a precomputed per-pair property mapping into normalized triples.
/// Mapping values are defaults: inline values from the shape win key-wise.
fn overlay_cell_mapping(
    triples: &mut [IncidenceTriple],
    mapping: &IndexMap<Label, IndexMap<Label, Properties>>,
    config: &HypergraphConfig,
) -> BuildResult<()> {
    let weight_key = config.cell_weight_key();
    for triple in triples.iter_mut() {
        let Some(properties) = mapping
            .get(&triple.edge)
            .and_then(|cells| cells.get(&triple.node))
        else {
            continue;
        };
        let supplied = split_cell_weight(
            properties.clone(),
            weight_key,
            &triple.edge,
            &triple.node,
        )?;
        let cell = triple.cell.get_or_insert_with(CellData::default);
        for (name, value) in supplied.properties {
            cell.properties.entry(name).or_insert(value);
        }
        if cell.weight.is_none() {
            cell.weight = supplied.weight;
        }
    }
    Ok(())
}

fn normalize_records(table: &Table, config: &HypergraphConfig) -> BuildResult<Vec<IncidenceTriple>> {
    if config.edge_col == config.node_col {
        return Err(BuildError::AmbiguousColumns(config.edge_col.clone()));
    }
    let edge_idx = table
        .column_index(&config.edge_col)
        .ok_or_else(|| BuildError::ColumnNotFound(config.edge_col.clone()))?;
    let node_idx = table
        .column_index(&config.node_col)
        .ok_or_else(|| BuildError::ColumnNotFound(config.node_col.clone()))?;
    let weight_idx = match &config.cell_weight_col {
        Some(name) => Some(
            table
                .column_index(name)
                .ok_or_else(|| BuildError::ColumnNotFound(name.clone()))?,
        ),
        None => None,
    };
    let property_columns: Vec<(String, usize)> = match &config.cell_properties {
        Some(CellProperties::Columns(names)) => names
            .iter()
            .map(|name| {
                table
                    .column_index(name)
                    .map(|idx| (name.clone(), idx))
                    .ok_or_else(|| BuildError::ColumnNotFound(name.clone()))
            })
            .collect::<BuildResult<_>>()?,
        _ => Vec::new(),
    };

    let width = table.columns().len();
    let mut triples = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows().enumerate() {
        if row.len() != width {
            return Err(BuildError::RaggedRow {
                row: row_idx,
                expected: width,
                got: row.len(),
            });
        }
        let edge = label_cell(row, edge_idx, row_idx)?;
        let node = label_cell(row, node_idx, row_idx)?;

        let mut cell = CellData::default();
        if let Some(weight_idx) = weight_idx {
            if let Some(value) = row[weight_idx].as_ref() {
                cell.weight = Some(value.as_f64().ok_or_else(|| BuildError::NonNumericWeight {
                    edge: edge.clone(),
                    node: node.clone(),
                })?);
            }
        }
        for (name, idx) in &property_columns {
            if let Some(value) = row[*idx].as_ref() {
                cell.properties.insert(name.clone(), value.clone());
            }
        }

        let cell = (cell.weight.is_some() || !cell.properties.is_empty()).then_some(cell);
        triples.push(IncidenceTriple { edge, node, cell });
    }
    Ok(triples)
}

fn label_cell(
    row: &[Option<PropertyValue>],
    idx: usize,
    row_idx: usize,
) -> BuildResult<Label> {
    match row.get(idx).and_then(|cell| cell.as_ref()) {
        Some(PropertyValue::String(s)) => Ok(Label::Text(s.clone())),
        Some(PropertyValue::Int(i)) => Ok(Label::Int(*i)),
        Some(other) => Err(BuildError::MalformedLabel(format!(
            "row {}: {:?}",
            row_idx, other
        ))),
        None => Err(BuildError::MalformedLabel(format!(
            "row {}: missing value",
            row_idx
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple_pairs(triples: &[IncidenceTriple]) -> Vec<(Label, Label)> {
        triples
            .iter()
            .map(|t| (t.edge.clone(), t.node.clone()))
            .collect()
    }

    #[test]
    fn edge_sets_normalize_in_mapping_order() {
        let system = SetSystem::from_edge_sets(vec![
            ("P", vec!["A", "C", "K"]),
            ("R", vec!["A", "E"]),
        ]);
        let triples = system.normalize(&HypergraphConfig::default()).unwrap();

        assert_eq!(triples.len(), 5);
        assert_eq!(
            triple_pairs(&triples)[0],
            (Label::from("P"), Label::from("A"))
        );
        assert!(triples.iter().all(|t| t.cell.is_none()));
    }

    #[test]
    fn cell_mappings_extract_the_weight_key() {
        let cells = Properties::from([
            ("color".to_string(), "red".into()),
            ("cell_weight".to_string(), 0.5.into()),
        ]);
        let system = SetSystem::from_cell_mappings(vec![("P", vec![("A", cells)])]);
        let triples = system.normalize(&HypergraphConfig::default()).unwrap();

        let cell = triples[0].cell.as_ref().unwrap();
        assert_eq!(cell.weight, Some(0.5));
        assert_eq!(cell.properties.len(), 1);
        assert_eq!(cell.properties.get("color"), Some(&"red".into()));
    }

    #[test]
    fn cell_mappings_reject_non_numeric_weight() {
        let cells = Properties::from([("cell_weight".to_string(), "heavy".into())]);
        let system = SetSystem::from_cell_mappings(vec![("P", vec![("A", cells)])]);
        let err = system.normalize(&HypergraphConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::NonNumericWeight { .. }));
    }

    #[test]
    fn coordinates_resolve_positionally() {
        let system = SetSystem::from_coordinates(
            vec![(0, 0), (0, 1), (1, 1)],
            vec!["P", "R"],
            vec!["A", "C"],
        );
        let triples = system.normalize(&HypergraphConfig::default()).unwrap();
        assert_eq!(
            triple_pairs(&triples),
            vec![
                (Label::from("P"), Label::from("A")),
                (Label::from("P"), Label::from("C")),
                (Label::from("R"), Label::from("C")),
            ]
        );
    }

    #[test]
    fn incidence_matrix_lists_non_zero_entries() {
        let system = SetSystem::from_incidence_matrix(
            vec![vec![1, 1, 0], vec![0, 1, 1]],
            vec!["P", "R"],
            vec!["A", "C", "E"],
        );
        let triples = system.normalize(&HypergraphConfig::default()).unwrap();
        assert_eq!(
            triple_pairs(&triples),
            vec![
                (Label::from("P"), Label::from("A")),
                (Label::from("P"), Label::from("C")),
                (Label::from("R"), Label::from("C")),
                (Label::from("R"), Label::from("E")),
            ]
        );
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let system = SetSystem::from_coordinates(vec![(0, 7)], vec!["P"], vec!["A"]);
        let err = system.normalize(&HypergraphConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::CoordinateOutOfRange { axis: "node", index: 7, len: 1 }
        ));
    }

    #[test]
    fn records_pull_structural_weight_and_property_columns() {
        let mut table = Table::new(["Scenes", "Characters", "color", "heaviness"]);
        table.push_values(vec!["0".into(), "FN".into(), "red".into(), 0.25.into()]);
        table.push_values(vec!["0".into(), "TH".into(), "green".into(), 0.75.into()]);

        let config = HypergraphConfig::new()
            .with_edge_col("Scenes")
            .with_node_col("Characters")
            .with_cell_weight_col("heaviness")
            .with_cell_properties(CellProperties::Columns(vec!["color".to_string()]));
        let triples = SetSystem::Records(table).normalize(&config).unwrap();

        assert_eq!(triples.len(), 2);
        let cell = triples[0].cell.as_ref().unwrap();
        assert_eq!(cell.weight, Some(0.25));
        assert_eq!(cell.properties.get("color"), Some(&"red".into()));
    }

    #[test]
    fn missing_structural_column_is_a_schema_error() {
        let table = Table::new(["Scenes", "Characters"]);
        let config = HypergraphConfig::new()
            .with_edge_col("Acts")
            .with_node_col("Characters");
        let err = SetSystem::Records(table).normalize(&config).unwrap_err();
        assert!(matches!(err, BuildError::ColumnNotFound(name) if name == "Acts"));
    }

    #[test]
    fn identical_structural_columns_are_rejected() {
        let table = Table::new(["who"]);
        let config = HypergraphConfig::new().with_edge_col("who").with_node_col("who");
        let err = SetSystem::Records(table).normalize(&config).unwrap_err();
        assert!(matches!(err, BuildError::AmbiguousColumns(_)));
    }

    #[test]
    fn non_label_cell_is_malformed() {
        let mut table = Table::new(["edges", "nodes"]);
        table.push_values(vec!["P".into(), true.into()]);
        let err = SetSystem::Records(table)
            .normalize(&HypergraphConfig::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::MalformedLabel(_)));
    }

    #[test]
    fn missing_label_cell_is_malformed() {
        let mut table = Table::new(["edges", "nodes"]);
        table.push_row(vec![Some("P".into()), None]);
        let err = SetSystem::Records(table)
            .normalize(&HypergraphConfig::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::MalformedLabel(_)));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let mut table = Table::new(["edges", "nodes"]);
        table.push_values(vec!["P".into()]);
        let err = SetSystem::Records(table)
            .normalize(&HypergraphConfig::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::RaggedRow { row: 0, .. }));
    }

    #[test]
    fn mapping_overlay_supplies_defaults_but_inline_wins() {
        let inline = Properties::from([("color".to_string(), "red".into())]);
        let system = SetSystem::from_cell_mappings(vec![("P", vec![("A", inline)])]);

        let mut overlay = IndexMap::new();
        overlay.insert(
            Label::from("P"),
            IndexMap::from([(
                Label::from("A"),
                Properties::from([
                    ("color".to_string(), "green".into()),
                    ("kind".to_string(), "solid".into()),
                ]),
            )]),
        );
        let config =
            HypergraphConfig::new().with_cell_properties(CellProperties::Mapping(overlay));

        let triples = system.normalize(&config).unwrap();
        let cell = triples[0].cell.as_ref().unwrap();
        assert_eq!(cell.properties.get("color"), Some(&"red".into()));
        assert_eq!(cell.properties.get("kind"), Some(&"solid".into()));
    }
}
