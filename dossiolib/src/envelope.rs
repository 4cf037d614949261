//! Конверт ответа API `{ success, data, message?, errors?, pagination? }`.
//!
//! Декодер конверт не разбирает: его снимают здесь и только потом классифицируют `data`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{
    convert::{decode, decode_list},
    error::{DossioError, Result},
    model::Dossier,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    #[serde(alias = "currentPage")]
    pub current_page: u64,
    #[serde(alias = "perPage")]
    pub per_page: u64,
    pub total: u64,
    #[serde(alias = "lastPage")]
    pub last_page: u64,
}

/// Страница списка досье.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub dossiers: Vec<Dossier>,
    pub pagination: Option<Pagination>,
}

impl ApiEnvelope {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// `data`, если `success == true`; иначе ошибка с сообщением и ошибками полей сервера.
    pub fn into_data(self) -> Result<Value> {
        match self.success {
            None => Err(DossioError::envelope("missing success flag")),
            Some(false) => Err(DossioError::Envelope {
                message: self.message.unwrap_or_else(|| "request failed".into()),
                errors: self.errors.unwrap_or_default(),
            }),
            Some(true) => self
                .data
                .filter(|d| !d.is_null())
                .ok_or_else(|| DossioError::envelope("missing data")),
        }
    }
}

/// Ответ `GET /dossiers/{id}`, `POST`, `PUT`.
pub fn decode_envelope(value: Value) -> Result<Dossier> {
    let data = ApiEnvelope::from_value(value)?.into_data()?;
    decode(&data)
}

/// Ответ `GET /dossiers`.
pub fn decode_page(value: Value) -> Result<Page> {
    let envelope = ApiEnvelope::from_value(value)?;
    let pagination = envelope.pagination.clone();
    let data = envelope.into_data()?;
    Ok(Page {
        dossiers: decode_list(&data)?,
        pagination,
    })
}
