//! Определение диалекта по маркерным ключам.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use crate::{
    error::{DossioError, Result},
    keys::{LEGACY_MARKERS, REST_MARKERS},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Legacy,
    Rest,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Legacy => "legacy",
            Dialect::Rest => "rest",
        })
    }
}

/// Запись старого бэкенда: плоские сокращённые ключи.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyRecord(pub Map<String, Value>);

/// Запись REST-бэкенда: вложенный camelCase.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRecord(pub Map<String, Value>);

/// Сырая запись, помеченная своим диалектом.
#[derive(Debug, Clone, PartialEq)]
pub enum WireDossier {
    Legacy(LegacyRecord),
    Rest(RestRecord),
}

impl WireDossier {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(DossioError::UnexpectedShape("an object for the dossier record")),
        }
    }

    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        Ok(match classify_map(&map)? {
            Dialect::Legacy => WireDossier::Legacy(LegacyRecord(map)),
            Dialect::Rest => WireDossier::Rest(RestRecord(map)),
        })
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            WireDossier::Legacy(_) => Dialect::Legacy,
            WireDossier::Rest(_) => Dialect::Rest,
        }
    }
}

/// LEGACY, если есть `IdDossier` или `NumDossier`; REST, если есть REST-маркер; иначе ошибка.
pub fn classify(record: &Value) -> Result<Dialect> {
    match record {
        Value::Object(map) => classify_map(map),
        _ => Err(DossioError::UnexpectedShape("an object for the dossier record")),
    }
}

pub fn classify_map(map: &Map<String, Value>) -> Result<Dialect> {
    let dialect = if LEGACY_MARKERS.iter().any(|k| map.contains_key(*k)) {
        Dialect::Legacy
    } else if REST_MARKERS.iter().any(|k| map.contains_key(*k)) {
        Dialect::Rest
    } else {
        return Err(DossioError::UnknownDialect);
    };
    debug!(%dialect, keys = map.len(), "classified dossier record");
    Ok(dialect)
}
