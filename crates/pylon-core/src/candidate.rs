// Candidate records and the static datasets they are loaded from.
//
// Both lists are addressed positionally: a candidate's id is its dataset
// index plus the list's id offset (1 for returning players, the configured
// rookie offset for rookies). Loading checks that the files honour this.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::sort::SortColumn;

const BUNDLED_PLAYERS: &str = include_str!("../../../data/players.json");
const BUNDLED_ROOKIES: &str = include_str!("../../../data/rookies.json");

/// Which of the two candidate lists an id or action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    Returning,
    Rookie,
}

impl ListKind {
    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Returning => "Returning Players",
            ListKind::Rookie => "Rookies",
        }
    }
}

/// One draftable player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub team: String,
    /// Prior-season touchdowns. Absent for rookies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub td: Option<u32>,
}

impl Candidate {
    /// "First Last", as submitted to the remote form.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn touchdowns(&self) -> u32 {
        self.td.unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// ListSpec
// ---------------------------------------------------------------------------

const RETURNING_COLUMNS: &[SortColumn] = &[
    SortColumn::FirstName,
    SortColumn::LastName,
    SortColumn::Position,
    SortColumn::Team,
    SortColumn::Touchdowns,
];

const ROOKIE_COLUMNS: &[SortColumn] = &[
    SortColumn::FirstName,
    SortColumn::LastName,
    SortColumn::Position,
    SortColumn::Team,
];

/// What distinguishes the two lists: their columns, how many picks an entry
/// needs, and where their id space starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpec {
    pub kind: ListKind,
    pub columns: &'static [SortColumn],
    pub target_size: usize,
    pub id_offset: u32,
}

impl ListSpec {
    pub fn returning(target_size: usize) -> Self {
        ListSpec {
            kind: ListKind::Returning,
            columns: RETURNING_COLUMNS,
            target_size,
            id_offset: 1,
        }
    }

    pub fn rookies(target_size: usize, id_offset: u32) -> Self {
        ListSpec {
            kind: ListKind::Rookie,
            columns: ROOKIE_COLUMNS,
            target_size,
            id_offset,
        }
    }

    pub fn supports(&self, column: SortColumn) -> bool {
        self.columns.contains(&column)
    }

    /// Dataset index addressed by `id`, if `id` is in this list's space.
    pub fn index_of(&self, id: u32) -> Option<usize> {
        id.checked_sub(self.id_offset).map(|i| i as usize)
    }

    pub fn id_at(&self, index: usize) -> u32 {
        self.id_offset + index as u32
    }
}

// ---------------------------------------------------------------------------
// Dataset loading
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse dataset {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },

    #[error("{list} dataset is empty")]
    Empty { list: &'static str },

    #[error("{list} record #{index} has id {found}, expected {expected}")]
    IdMismatch {
        list: &'static str,
        index: usize,
        expected: u32,
        found: u32,
    },

    #[error("returning player {id} has no touchdown count")]
    MissingTouchdowns { id: u32 },

    #[error("returning player id {last_id} reaches the rookie id space starting at {rookie_offset}")]
    IdSpaceOverlap { last_id: u32, rookie_offset: u32 },
}

/// Both candidate lists, in dataset order.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub returning: Vec<Candidate>,
    pub rookies: Vec<Candidate>,
}

impl Datasets {
    /// The datasets compiled into the binary.
    pub fn bundled(rookie_id_offset: u32) -> Result<Datasets, DatasetError> {
        let returning = parse_dataset(
            BUNDLED_PLAYERS,
            "bundled players.json",
            &ListSpec::returning(0),
        )?;
        let rookies = parse_dataset(
            BUNDLED_ROOKIES,
            "bundled rookies.json",
            &ListSpec::rookies(0, rookie_id_offset),
        )?;
        check_id_spaces(&returning, rookie_id_offset)?;
        Ok(Datasets { returning, rookies })
    }
}

/// Load the datasets named in `config`, or the bundled ones when the config
/// has no `[data]` section.
pub fn load_datasets(config: &Config) -> Result<Datasets, DatasetError> {
    let offset = config.rules.rookie_id_offset;
    let datasets = match &config.data_paths {
        None => Datasets::bundled(offset)?,
        Some(paths) => {
            let returning = load_file(&paths.players, &ListSpec::returning(0))?;
            let rookies = load_file(&paths.rookies, &ListSpec::rookies(0, offset))?;
            check_id_spaces(&returning, offset)?;
            Datasets { returning, rookies }
        }
    };
    info!(
        "Loaded {} returning players, {} rookies",
        datasets.returning.len(),
        datasets.rookies.len()
    );
    Ok(datasets)
}

fn load_file(path: &Path, spec: &ListSpec) -> Result<Vec<Candidate>, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|e| DatasetError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_dataset(&text, &path.display().to_string(), spec)
}

/// Parse one JSON dataset and check it against the list's id scheme.
pub fn parse_dataset(
    text: &str,
    origin: &str,
    spec: &ListSpec,
) -> Result<Vec<Candidate>, DatasetError> {
    let candidates: Vec<Candidate> =
        serde_json::from_str(text).map_err(|e| DatasetError::Parse {
            origin: origin.to_string(),
            source: e,
        })?;

    let list = spec.kind.label();
    if candidates.is_empty() {
        return Err(DatasetError::Empty { list });
    }

    for (index, candidate) in candidates.iter().enumerate() {
        let expected = spec.id_at(index);
        if candidate.id != expected {
            return Err(DatasetError::IdMismatch {
                list,
                index,
                expected,
                found: candidate.id,
            });
        }
        if spec.kind == ListKind::Returning && candidate.td.is_none() {
            return Err(DatasetError::MissingTouchdowns { id: candidate.id });
        }
    }

    Ok(candidates)
}

fn check_id_spaces(returning: &[Candidate], rookie_offset: u32) -> Result<(), DatasetError> {
    match returning.last() {
        Some(last) if last.id >= rookie_offset => Err(DatasetError::IdSpaceOverlap {
            last_id: last.id,
            rookie_offset,
        }),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
