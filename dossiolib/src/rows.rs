//! Элементы вложенных коллекций: чтение строки и запись её полей в обоих написаниях.

use crate::{
    dialects::Resolver,
    encode::WireRecordBuilder,
    keys::{self, CollectionKeys},
    model::{Container, LineItem, PriceLine, Settlement},
    traits::SubEntity,
};

impl SubEntity for LineItem {
    const KEYS: CollectionKeys = keys::ITEMS;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_row(row: &Resolver<'_>, id: String) -> Self {
        LineItem {
            id,
            quantite: row.number(&keys::ITEM_QUANTITE),
            designation: row.string(&keys::ITEM_DESIGNATION),
            fob: row.number(&keys::ITEM_FOB),
        }
    }

    fn encode_row(&self, out: &mut WireRecordBuilder) {
        out.number(&keys::ITEM_QUANTITE, Some(self.quantite))
            .string(&keys::ITEM_DESIGNATION, Some(self.designation.as_str()))
            .number(&keys::ITEM_FOB, Some(self.fob));
    }
}

impl SubEntity for PriceLine {
    const KEYS: CollectionKeys = keys::PRIX_REVIENS;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_row(row: &Resolver<'_>, id: String) -> Self {
        PriceLine {
            id,
            designation: row.string(&keys::PRIX_DESIGNATION),
            quantite: row.number(&keys::PRIX_QUANTITE),
            fob: row.number(&keys::PRIX_FOB),
            valeur_locale: row.number(&keys::PRIX_VALEUR_LOCALE),
            pourcentage: row.number(&keys::PRIX_POURCENTAGE),
            cout_revient: row.number(&keys::PRIX_COUT_REVIENT),
        }
    }

    fn encode_row(&self, out: &mut WireRecordBuilder) {
        out.string(&keys::PRIX_DESIGNATION, Some(self.designation.as_str()))
            .number(&keys::PRIX_QUANTITE, Some(self.quantite))
            .number(&keys::PRIX_FOB, Some(self.fob))
            .number(&keys::PRIX_VALEUR_LOCALE, Some(self.valeur_locale))
            .number(&keys::PRIX_POURCENTAGE, Some(self.pourcentage))
            .number(&keys::PRIX_COUT_REVIENT, Some(self.cout_revient));
    }
}

impl SubEntity for Settlement {
    const KEYS: CollectionKeys = keys::REGLEMENTS;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_row(row: &Resolver<'_>, id: String) -> Self {
        Settlement {
            id,
            date: row.date(&keys::REG_DATE),
            reference: row.string(&keys::REG_REFERENCE),
            mode_paiement: row.string(&keys::REG_MODE),
            banque: row.string(&keys::REG_BANQUE),
            montant_devise: row.number(&keys::REG_MONTANT_DEVISE),
            devise: row.string(&keys::REG_DEVISE),
            taux_change: row.number(&keys::REG_TAUX),
            montant_local: row.number(&keys::REG_MONTANT_LOCAL),
            taxe: row.number(&keys::REG_TAXE),
            frais_bancaires: row.number(&keys::REG_FRAIS),
        }
    }

    fn encode_row(&self, out: &mut WireRecordBuilder) {
        out.string(&keys::REG_DATE, Some(self.date.as_str()))
            .string(&keys::REG_REFERENCE, Some(self.reference.as_str()))
            .string(&keys::REG_MODE, Some(self.mode_paiement.as_str()))
            .string(&keys::REG_BANQUE, Some(self.banque.as_str()))
            .number(&keys::REG_MONTANT_DEVISE, Some(self.montant_devise))
            .string(&keys::REG_DEVISE, Some(self.devise.as_str()))
            .number(&keys::REG_TAUX, Some(self.taux_change))
            .number(&keys::REG_MONTANT_LOCAL, Some(self.montant_local))
            .number(&keys::REG_TAXE, Some(self.taxe))
            .number(&keys::REG_FRAIS, Some(self.frais_bancaires));
    }
}

impl SubEntity for Container {
    const KEYS: CollectionKeys = keys::TEUS;

    fn id(&self) -> &str {
        &self.id
    }

    fn decode_row(row: &Resolver<'_>, id: String) -> Self {
        Container {
            id,
            numero: row.string(&keys::TEU_NUMERO),
        }
    }

    fn encode_row(&self, out: &mut WireRecordBuilder) {
        out.string(&keys::TEU_NUMERO, Some(self.numero.as_str()));
    }
}
