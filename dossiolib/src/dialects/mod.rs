//! Общая часть декодеров: поиск значений по таблицам ключей с приоритетом диалекта.

pub mod legacy;
pub mod rest;

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    classify::Dialect,
    coerce::{coerce_number, first_present, normalize_date, value_to_string},
    keys::{self, DetailField, DetailKeys, Field, ReferenceKeys},
    model::{AdministrativeDetail, Dossier, Reference},
    traits::SubEntity,
};

/// Чтение одной JSON-записи: свой диалект в приоритете, чужой — запасной вариант.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    record: &'a Map<String, Value>,
    dialect: Dialect,
}

impl<'a> Resolver<'a> {
    pub fn new(record: &'a Map<String, Value>, dialect: Dialect) -> Self {
        Resolver { record, dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn value(&self, field: &Field) -> Option<&'a Value> {
        first_present(self.record, field.lookup_order(self.dialect))
    }

    pub fn string(&self, field: &Field) -> String {
        self.value(field).map(value_to_string).unwrap_or_default()
    }

    pub fn number(&self, field: &Field) -> Decimal {
        coerce_number(self.value(field))
    }

    pub fn date(&self, field: &Field) -> String {
        normalize_date(&self.string(field))
    }

    /// Объект в приоритете над строкой; метка + плоский id собираются в объект, чтобы id не потерялся.
    pub fn reference(&self, keys: &ReferenceKeys) -> Reference {
        let labels: Vec<&'static str> = keys.label.lookup_order(self.dialect).collect();
        if let Some(obj) = labels
            .iter()
            .find_map(|k| self.record.get(*k).and_then(Value::as_object))
        {
            return Reference::Object(obj.clone());
        }

        let label = first_present(self.record, labels.iter().copied());
        match (label, self.value(&keys.id)) {
            (Some(label), Some(id)) => {
                let mut obj = Map::new();
                obj.insert("id".into(), id.clone());
                obj.insert("label".into(), Value::String(value_to_string(label)));
                Reference::Object(obj)
            }
            (Some(label), None) => Reference::Label(value_to_string(label)),
            (None, Some(id)) => {
                let mut obj = Map::new();
                obj.insert("id".into(), id.clone());
                Reference::Object(obj)
            }
            (None, None) => Reference::default(),
        }
    }

    /// Блок деталей: legacy читает плоские ключи, затем вложенный объект; REST — наоборот.
    pub fn detail(&self, block: &DetailKeys) -> AdministrativeDetail {
        let nested = block
            .rest_blocks
            .iter()
            .find_map(|k| self.record.get(*k).and_then(Value::as_object));

        let get = |field: &DetailField| -> Option<&'a Value> {
            let flat_keys = field.flat_keys(block);
            let flat = || first_present(self.record, flat_keys.iter().map(String::as_str));
            let inner = || nested.and_then(|m| first_present(m, field.rest.iter().copied()));
            match self.dialect {
                Dialect::Legacy => flat().or_else(inner),
                Dialect::Rest => inner().or_else(flat),
            }
        };
        let string = |field: &DetailField| get(field).map(value_to_string).unwrap_or_default();

        AdministrativeDetail {
            nom: string(&keys::DETAIL_NOM),
            numero_facture: string(&keys::DETAIL_NUMERO_FACTURE),
            date: normalize_date(&string(&keys::DETAIL_DATE)),
            code: string(&keys::DETAIL_CODE),
            montant: coerce_number(get(&keys::DETAIL_MONTANT)),
            montant_ht: coerce_number(get(&keys::DETAIL_MONTANT_HT)),
            tva: coerce_number(get(&keys::DETAIL_TVA)),
        }
    }

    /// Коллекция по таблице `T::KEYS`. Не-объекты пропускаются, не-массив читается как пустой список.
    ///
    /// `assign_id` получает строковый первичный ключ строки (возможно пустой) и её индекс.
    pub fn collection<T, F>(&self, assign_id: F) -> Vec<T>
    where
        T: SubEntity,
        F: Fn(String, &'static str, usize) -> String,
    {
        let keys = T::KEYS;
        let Some(list) = self.value(&keys.list) else {
            return Vec::new();
        };
        let Some(rows) = list.as_array() else {
            debug!(kind = keys.kind, "collection is not an array, reading as empty");
            return Vec::new();
        };

        rows.iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let Some(row) = row.as_object() else {
                    warn!(kind = keys.kind, index, "skipping non-object collection row");
                    return None;
                };
                let row = Resolver::new(row, self.dialect);
                let id = assign_id(row.string(&keys.id), keys.kind, index);
                Some(T::decode_row(&row, id))
            })
            .collect()
    }
}

/// Скаляры, ссылки и блоки деталей; id и коллекции заполняет декодер диалекта.
pub(crate) fn decode_header(r: &Resolver<'_>) -> Dossier {
    Dossier {
        id: String::new(),
        numero_dossier: r.string(&keys::NUMERO_DOSSIER),
        date_dossier: r.date(&keys::DATE_DOSSIER),
        origine: r.reference(&keys::ORIGINE),
        type_dossier: r.reference(&keys::TYPE_DOSSIER),

        numero_bl: r.string(&keys::NUMERO_BL),
        numero_fri: r.string(&keys::NUMERO_FRI),
        numero_bsc: r.string(&keys::NUMERO_BSC),

        montant_bsc: r.number(&keys::MONTANT_BSC),
        montant_fri: r.number(&keys::MONTANT_FRI),
        fob: r.number(&keys::FOB),
        assurance: r.number(&keys::ASSURANCE),
        valeur_douane: r.number(&keys::VALEUR_DOUANE),

        armateur: r.string(&keys::ARMATEUR),
        navire: r.string(&keys::NAVIRE),
        nombre_colis: r.number(&keys::NOMBRE_COLIS),
        poids: r.number(&keys::POIDS),

        vendeur: r.string(&keys::VENDEUR),
        transitaire: r.string(&keys::TRANSITAIRE),
        observations: r.string(&keys::OBSERVATIONS),

        acconier: r.detail(&keys::ACCONIER),
        fret: r.detail(&keys::FRET),
        transport: r.detail(&keys::TRANSPORT),
        change: r.detail(&keys::CHANGE),
        surestaries: r.detail(&keys::SURESTARIES),
        magasinage: r.detail(&keys::MAGASINAGE),

        items: Vec::new(),
        prix_reviens: Vec::new(),
        reglements: Vec::new(),
        teus: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn detail_priority_follows_dialect() {
        let rec = obj(json!({
            "NomTransp": "flat",
            "transport": {"nom": "nested", "montant": "10"}
        }));
        let legacy = Resolver::new(&rec, Dialect::Legacy).detail(&keys::TRANSPORT);
        let rest = Resolver::new(&rec, Dialect::Rest).detail(&keys::TRANSPORT);
        assert_eq!(legacy.nom, "flat");
        assert_eq!(rest.nom, "nested");
        // поле, которого нет в своём месте, добирается из чужого
        assert_eq!(legacy.montant, Decimal::from(10));
    }

    #[test]
    fn reference_shapes() {
        let rec = obj(json!({"origine": {"id": 3, "label": "Chine"}, "Origine": "ignored"}));
        let r = Resolver::new(&rec, Dialect::Legacy).reference(&keys::ORIGINE);
        assert_eq!(r.display(), "Chine");
        assert_eq!(r.id(), Some(3));

        let rec = obj(json!({"Origine": "Chine", "IdOrigine": 3}));
        let r = Resolver::new(&rec, Dialect::Legacy).reference(&keys::ORIGINE);
        assert_eq!(r.display(), "Chine");
        assert_eq!(r.id(), Some(3));

        let rec = obj(json!({"type": "Import"}));
        let r = Resolver::new(&rec, Dialect::Rest).reference(&keys::TYPE_DOSSIER);
        assert_eq!(r, Reference::Label("Import".into()));

        let rec = obj(json!({}));
        assert_eq!(Resolver::new(&rec, Dialect::Rest).reference(&keys::ORIGINE), Reference::default());
    }
}
