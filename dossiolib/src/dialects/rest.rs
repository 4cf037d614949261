//! Декодер REST-бэкенда: вложенный camelCase (`numeroDossier`, `items`, `transport: {..}`).

use tracing::debug;

use super::{decode_header, Resolver};
use crate::{
    classify::{Dialect, RestRecord},
    keys,
    model::Dossier,
    traits::DecodeDialect,
};

pub struct Rest;

impl DecodeDialect for Rest {
    const DIALECT: Dialect = Dialect::Rest;
    type Record = RestRecord;

    fn decode(record: &RestRecord) -> Dossier {
        let r = Resolver::new(&record.0, Self::DIALECT);

        let mut d = decode_header(&r);
        d.id = r.string(&keys::DOSSIER_ID);
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
            "decoded rest dossier"
        );
        d
    }
}

fn row_id(raw: String, kind: &'static str, index: usize) -> String {
    if raw.is_empty() {
        format!("new-{kind}-{index}")
    } else {
        raw
    }
}
