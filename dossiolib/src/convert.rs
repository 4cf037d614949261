//! Точка входа чтения: классификация и делегирование нужному декодеру.

use serde_json::Value;

use crate::{
    classify::WireDossier,
    dialects::{legacy::Legacy, rest::Rest},
    error::{DossioError, Result},
    model::Dossier,
    traits::DecodeDialect,
};

impl WireDossier {
    pub fn decode(&self) -> Dossier {
        match self {
            WireDossier::Legacy(r) => Legacy::decode(r),
            WireDossier::Rest(r) => Rest::decode(r),
        }
    }
}

pub fn decode(record: &Value) -> Result<Dossier> {
    Ok(WireDossier::from_value(record.clone())?.decode())
}

/// Список досье (например, `data` ответа `GET /dossiers`). Первая нераспознанная запись — ошибка.
pub fn decode_list(records: &Value) -> Result<Vec<Dossier>> {
    records
        .as_array()
        .ok_or(DossioError::UnexpectedShape("an array of dossier records"))?
        .iter()
        .map(decode)
        .collect()
}
