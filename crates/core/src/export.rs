//! Serialization of map sets into the configuration files loaded by the
//! experiment front end.
//!
//! A map set becomes a JSON object keyed by trial index, each value a
//! one-element array holding the trial's record. Script output wraps the
//! document as `const <variable> = <json>;` so a page can load it with a plain
//! `<script>` tag.

use std::fs;
use std::io;
use std::path::Path;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer as JsonSerializer};
use thiserror::Error;

use crate::mapgen::{MapSet, Trial};
use crate::types::{GridCoordinate, Role};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("trial {trial_index} has no {role} position to export")]
    MissingRole { trial_index: usize, role: Role },

    #[error("failed to encode map set as JSON")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Front-end view of one trial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRecord {
    pub map_index: usize,
    pub init_player_grid: GridCoordinate,
    #[serde(rename = "initAIGrid", default, skip_serializing_if = "Option::is_none")]
    pub init_ai_grid: Option<GridCoordinate>,
    pub target1: GridCoordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target2: Option<GridCoordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obstacles: Option<Vec<GridCoordinate>>,
    pub map_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_step: Option<Vec<u32>>,
}

impl MapRecord {
    /// The front end reads the participant's start from `initPlayerGrid`, so
    /// a lone agent is written there whichever role produced it.
    pub fn from_trial(trial: &Trial) -> Result<Self, ExportError> {
        let layout = &trial.layout;
        let missing = |role| ExportError::MissingRole { trial_index: trial.index, role };

        let (init_player_grid, init_ai_grid) =
            match (layout.get(Role::InitPlayer), layout.get(Role::InitAi)) {
                (Some(player), ai) => (player, ai),
                (None, Some(ai)) => (ai, None),
                (None, None) => return Err(missing(Role::InitPlayer)),
            };

        Ok(Self {
            map_index: trial.index,
            init_player_grid,
            init_ai_grid,
            target1: layout.get(Role::Target1).ok_or_else(|| missing(Role::Target1))?,
            target2: layout.get(Role::Target2),
            // Random maps are obstacle-free but the front end expects the key.
            obstacles: trial.noise_steps.as_ref().map(|_| Vec::new()),
            map_type: layout.map_type().to_string(),
            noise_step: trial.noise_steps.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `const <variable> = <json>;`
    Script { variable: String },
    /// Bare JSON document.
    Json,
}

struct MapSetDocument(Vec<(String, [MapRecord; 1])>);

impl Serialize for MapSetDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, records) in &self.0 {
            map.serialize_entry(key, records)?;
        }
        map.end()
    }
}

fn document(map_set: &MapSet) -> Result<MapSetDocument, ExportError> {
    map_set
        .trials()
        .iter()
        .map(|trial| Ok((trial.index.to_string(), [MapRecord::from_trial(trial)?])))
        .collect::<Result<Vec<_>, ExportError>>()
        .map(MapSetDocument)
}

/// Pretty-printed JSON with a four-space indent, trials in map-set order.
pub fn to_json(map_set: &MapSet) -> Result<String, ExportError> {
    let document = document(map_set)?;
    let mut buffer = Vec::new();
    let mut serializer =
        JsonSerializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn render(map_set: &MapSet, format: &OutputFormat) -> Result<String, ExportError> {
    let json = to_json(map_set)?;
    Ok(match format {
        OutputFormat::Script { variable } => format!("const {variable} = {json};"),
        OutputFormat::Json => json,
    })
}

/// Writes through a sibling temp file and renames it into place.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn write_map_set(
    path: &Path,
    map_set: &MapSet,
    format: &OutputFormat,
) -> Result<(), ExportError> {
    let contents = render(map_set, format)?;
    write_atomic(path, &contents)
        .map_err(|source| ExportError::Io { path: path.display().to_string(), source })
}

/// Parses a document produced by [`to_json`] back into `(trial index, record)` pairs.
pub fn parse_json(json: &str) -> Result<Vec<(usize, MapRecord)>, ExportError> {
    let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut records = Vec::with_capacity(document.len());
    for value in document.into_values() {
        let [record]: [MapRecord; 1] = serde_json::from_value(value)?;
        records.push((record.map_index, record));
    }
    records.sort_by_key(|(index, _)| *index);
    Ok(records)
}
