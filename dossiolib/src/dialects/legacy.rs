//! Декодер старого бэкенда: плоские сокращённые ключи (`IdDossier`, `NumDossier`, `MontBSC`, ...).
//!
//! Старый бэкенд пишет `0` в первичный ключ несохранённых строк, такие id считаются пустыми.

use tracing::debug;

use super::{decode_header, Resolver};
use crate::{
    classify::{Dialect, LegacyRecord},
    keys,
    model::Dossier,
    traits::DecodeDialect,
};

pub struct Legacy;

impl DecodeDialect for Legacy {
    const DIALECT: Dialect = Dialect::Legacy;
    type Record = LegacyRecord;

    fn decode(record: &LegacyRecord) -> Dossier {
        let r = Resolver::new(&record.0, Self::DIALECT);

        let mut d = decode_header(&r);
        d.id = legacy_key(r.string(&keys::DOSSIER_ID)).unwrap_or_default();
        d.items = r.collection(row_id);
        d.prix_reviens = r.collection(row_id);
        d.reglements = r.collection(row_id);
        d.teus = r.collection(row_id);

        debug!(
            id = %d.id,
            items = d.items.len(),
            prix_reviens = d.prix_reviens.len(),
            reglements = d.reglements.len(),
            teus = d.teus.len(),
            "decoded legacy dossier"
        );
        d
    }
}

fn legacy_key(raw: String) -> Option<String> {
    Some(raw).filter(|s| !s.is_empty() && s != "0")
}

fn row_id(raw: String, kind: &'static str, index: usize) -> String {
    legacy_key(raw).unwrap_or_else(|| format!("legacy-{kind}-{index}"))
}
