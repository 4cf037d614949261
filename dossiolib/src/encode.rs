//! Запись канонического досье в провод: каждое поле пишется под всеми именами обоих диалектов,
//! так что один и тот же JSON принимают и старый, и REST-бэкенд.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    coerce::{as_existing_id, decimal_to_json},
    keys::{self, DetailField, DetailKeys, Field, ReferenceKeys},
    model::{AdministrativeDetail, Dossier, DossierPatch, Reference},
    traits::SubEntity,
};

const DETAIL_FIELDS: [DetailField; 7] = [
    keys::DETAIL_NOM,
    keys::DETAIL_NUMERO_FACTURE,
    keys::DETAIL_DATE,
    keys::DETAIL_CODE,
    keys::DETAIL_MONTANT,
    keys::DETAIL_MONTANT_HT,
    keys::DETAIL_TVA,
];

/// Что известно о родительском досье при записи строк коллекций.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentIdentity {
    /// Досье уже сохранено на сервере (режим обновления).
    pub persisted: bool,
    /// Числовой id досье для внешних ключей; только при `persisted`.
    pub id: Option<u64>,
}

impl ParentIdentity {
    pub fn new(persisted: bool, id: Option<&str>) -> Self {
        ParentIdentity {
            persisted,
            id: id.and_then(as_existing_id).filter(|_| persisted),
        }
    }
}

/// Построитель провода. `None` — поле не пишется вовсе (частичное обновление).
#[derive(Debug, Clone, Default)]
pub struct WireRecordBuilder {
    out: Map<String, Value>,
}

impl WireRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, field: &Field, value: Value) {
        for key in field.all() {
            self.out.insert(key.to_string(), value.clone());
        }
    }

    pub fn string(&mut self, field: &Field, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.put(field, Value::String(v.to_string()));
        }
        self
    }

    pub fn number(&mut self, field: &Field, value: Option<Decimal>) -> &mut Self {
        if let Some(v) = value {
            self.put(field, decimal_to_json(v));
        }
        self
    }

    pub fn identifier(&mut self, field: &Field, id: Option<u64>) -> &mut Self {
        if let Some(id) = id {
            self.put(field, Value::from(id));
        }
        self
    }

    /// Метка пишется под всеми ключами метки. Объект: сам объект под REST-ключами,
    /// отображаемая строка под legacy-ключами и плоский числовой id.
    pub fn reference(&mut self, table: &ReferenceKeys, value: Option<&Reference>) -> &mut Self {
        let Some(reference) = value else {
            return self;
        };
        match reference {
            Reference::Label(s) => self.put(&table.label, Value::String(s.clone())),
            Reference::Object(obj) => {
                let display = Value::String(reference.display());
                for key in table.label.legacy {
                    self.out.insert(key.to_string(), display.clone());
                }
                for key in table.label.rest {
                    self.out.insert(key.to_string(), Value::Object(obj.clone()));
                }
                self.identifier(&table.id, reference.id());
            }
        }
        self
    }

    /// Плоские legacy-ключи и вложенный объект под каждым REST-именем блока.
    pub fn detail(&mut self, block: &DetailKeys, value: Option<&AdministrativeDetail>) -> &mut Self {
        let Some(detail) = value else {
            return self;
        };
        let values = [
            Value::String(detail.nom.clone()),
            Value::String(detail.numero_facture.clone()),
            Value::String(detail.date.clone()),
            Value::String(detail.code.clone()),
            decimal_to_json(detail.montant),
            decimal_to_json(detail.montant_ht),
            decimal_to_json(detail.tva),
        ];

        let mut nested = Map::new();
        for (field, value) in DETAIL_FIELDS.iter().zip(values) {
            for key in field.flat_keys(block) {
                self.out.insert(key, value.clone());
            }
            for key in field.rest {
                nested.insert(key.to_string(), value.clone());
            }
        }
        for key in block.rest_blocks {
            self.out.insert(key.to_string(), Value::Object(nested.clone()));
        }
        self
    }

    /// Коллекция под обоими именами списка. Id строки пишется только при сохранённом
    /// родителе и только если он похож на серверный (целое > 0).
    pub fn collection<T: SubEntity>(&mut self, rows: Option<&[T]>, parent: ParentIdentity) -> &mut Self {
        let Some(rows) = rows else {
            return self;
        };
        let table = T::KEYS;
        let encoded: Vec<Value> = rows
            .iter()
            .map(|row| {
                let mut b = WireRecordBuilder::new();
                if parent.persisted {
                    b.identifier(&table.id, as_existing_id(row.id()));
                }
                b.identifier(&keys::PARENT_ID, parent.id);
                row.encode_row(&mut b);
                Value::Object(b.finish())
            })
            .collect();
        self.put(&table.list, Value::Array(encoded));
        self
    }

    pub fn finish(self) -> Map<String, Value> {
        self.out
    }
}

/// Кодирует (частичное) досье. `parent_has_persisted_id` — режим обновления существующего досье.
pub fn encode(patch: &DossierPatch, parent_has_persisted_id: bool) -> Map<String, Value> {
    let parent = ParentIdentity::new(parent_has_persisted_id, patch.id.as_deref());
    let mut b = WireRecordBuilder::new();

    b.identifier(&keys::DOSSIER_ID, parent.id)
        .string(&keys::NUMERO_DOSSIER, patch.numero_dossier.as_deref())
        .string(&keys::DATE_DOSSIER, patch.date_dossier.as_deref())
        .reference(&keys::ORIGINE, patch.origine.as_ref())
        .reference(&keys::TYPE_DOSSIER, patch.type_dossier.as_ref())
        .string(&keys::NUMERO_BL, patch.numero_bl.as_deref())
        .string(&keys::NUMERO_FRI, patch.numero_fri.as_deref())
        .string(&keys::NUMERO_BSC, patch.numero_bsc.as_deref())
        .number(&keys::MONTANT_BSC, patch.montant_bsc)
        .number(&keys::MONTANT_FRI, patch.montant_fri)
        .number(&keys::FOB, patch.fob)
        .number(&keys::ASSURANCE, patch.assurance)
        .number(&keys::VALEUR_DOUANE, patch.valeur_douane)
        .string(&keys::ARMATEUR, patch.armateur.as_deref())
        .string(&keys::NAVIRE, patch.navire.as_deref())
        .number(&keys::NOMBRE_COLIS, patch.nombre_colis)
        .number(&keys::POIDS, patch.poids)
        .string(&keys::VENDEUR, patch.vendeur.as_deref())
        .string(&keys::TRANSITAIRE, patch.transitaire.as_deref())
        .string(&keys::OBSERVATIONS, patch.observations.as_deref())
        .detail(&keys::ACCONIER, patch.acconier.as_ref())
        .detail(&keys::FRET, patch.fret.as_ref())
        .detail(&keys::TRANSPORT, patch.transport.as_ref())
        .detail(&keys::CHANGE, patch.change.as_ref())
        .detail(&keys::SURESTARIES, patch.surestaries.as_ref())
        .detail(&keys::MAGASINAGE, patch.magasinage.as_ref())
        .collection(patch.items.as_deref(), parent)
        .collection(patch.prix_reviens.as_deref(), parent)
        .collection(patch.reglements.as_deref(), parent)
        .collection(patch.teus.as_deref(), parent);

    let out = b.finish();
    debug!(
        persisted = parent.persisted,
        parent_id = ?parent.id,
        keys = out.len(),
        "encoded dossier"
    );
    out
}

/// Полное досье целиком.
pub fn encode_dossier(dossier: &Dossier, parent_has_persisted_id: bool) -> Map<String, Value> {
    encode(&DossierPatch::from(dossier), parent_has_persisted_id)
}
