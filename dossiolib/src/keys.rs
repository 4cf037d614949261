//! Таблицы ключей обоих диалектов. Декодеры и кодировщик берут имена только отсюда.

use crate::classify::Dialect;

/// Скалярное поле: имена в legacy-диалекте и в REST-диалекте, по убыванию приоритета.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub legacy: &'static [&'static str],
    pub rest: &'static [&'static str],
}

impl Field {
    pub const fn new(legacy: &'static [&'static str], rest: &'static [&'static str]) -> Self {
        Field { legacy, rest }
    }

    /// Порядок поиска: сначала свой диалект, затем чужой.
    pub fn lookup_order(&self, dialect: Dialect) -> impl Iterator<Item = &'static str> {
        let (own, other) = match dialect {
            Dialect::Legacy => (self.legacy, self.rest),
            Dialect::Rest => (self.rest, self.legacy),
        };
        own.iter().chain(other.iter()).copied()
    }

    /// Все имена, под которыми поле пишется.
    pub fn all(&self) -> impl Iterator<Item = &'static str> {
        self.lookup_order(Dialect::Legacy)
    }
}

/// Ссылочное поле: метка (строка или объект) и плоский числовой id.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceKeys {
    pub label: Field,
    pub id: Field,
}

/// Блок деталей: legacy пишет его плоско как `<префикс><суффикс>`, REST — вложенным объектом.
#[derive(Debug, Clone, Copy)]
pub struct DetailKeys {
    pub legacy_suffix: &'static str,
    pub rest_blocks: &'static [&'static str],
}

/// Поле внутри блока деталей.
#[derive(Debug, Clone, Copy)]
pub struct DetailField {
    pub legacy_prefixes: &'static [&'static str],
    pub rest: &'static [&'static str],
}

impl DetailField {
    pub fn flat_keys(&self, block: &DetailKeys) -> Vec<String> {
        self.legacy_prefixes
            .iter()
            .map(|p| format!("{p}{}", block.legacy_suffix))
            .collect()
    }
}

/// Вложенная коллекция: имя списка и имена полей элемента.
#[derive(Debug, Clone, Copy)]
pub struct CollectionKeys {
    pub list: Field,
    pub id: Field,
    /// Короткое имя для fallback-идентификаторов и логов.
    pub kind: &'static str,
}

pub const LEGACY_MARKERS: [&str; 2] = ["IdDossier", "NumDossier"];
pub const REST_MARKERS: [&str; 6] = ["id", "numeroDossier", "items", "prixReviens", "reglements", "teus"];

/* ------------------------------- DOSSIER -------------------------------- */

pub const DOSSIER_ID: Field = Field::new(&["IdDossier"], &["id"]);
/// Внешний ключ на досье внутри элементов коллекций.
pub const PARENT_ID: Field = Field::new(&["IdDossier"], &["dossierId"]);

pub const NUMERO_DOSSIER: Field = Field::new(&["NumDossier", "numDossier"], &["numeroDossier"]);
pub const DATE_DOSSIER: Field = Field::new(&["DateDossier", "DateOuv"], &["dateDossier", "dateOuverture"]);
pub const NUMERO_BL: Field = Field::new(&["NumBL", "NumBl"], &["numeroBL", "numBL"]);
pub const NUMERO_FRI: Field = Field::new(&["NumFRI", "NumFri"], &["numFRI", "numeroFRI"]);
pub const NUMERO_BSC: Field = Field::new(&["NumBSC", "NumBsc"], &["numBSC", "numeroBSC"]);
pub const MONTANT_BSC: Field = Field::new(&["MontBSC", "MontantBSC"], &["montantBSC"]);
pub const MONTANT_FRI: Field = Field::new(&["MontFRI", "MontantFRI"], &["montantFRI"]);
pub const FOB: Field = Field::new(&["FOBDossier", "FOB"], &["fob", "valeurFob"]);
pub const ASSURANCE: Field = Field::new(&["MontAssur", "Assurance"], &["assurance"]);
pub const VALEUR_DOUANE: Field = Field::new(&["ValDouane"], &["valeurDouane"]);
pub const ARMATEUR: Field = Field::new(&["Armateur", "armateur_nom"], &["armateur", "compagnie"]);
pub const NAVIRE: Field = Field::new(&["Navire", "NomNavire"], &["navire"]);
pub const NOMBRE_COLIS: Field = Field::new(&["NbColis", "NbrColis"], &["nombreColis", "nbColis"]);
pub const POIDS: Field = Field::new(&["PoidsBrut", "Poids"], &["poids", "poidsBrut"]);
pub const VENDEUR: Field = Field::new(&["Vendeur", "NomVendeur"], &["vendeur"]);
pub const TRANSITAIRE: Field = Field::new(&["Transitaire", "NomTransit"], &["transitaire"]);
pub const OBSERVATIONS: Field = Field::new(&["Obs", "Observations"], &["observations", "commentaire"]);

pub const ORIGINE: ReferenceKeys = ReferenceKeys {
    label: Field::new(&["Origine", "PaysOrigine"], &["origine", "origin"]),
    id: Field::new(&["IdOrigine", "IdPays"], &["origineId"]),
};
pub const TYPE_DOSSIER: ReferenceKeys = ReferenceKeys {
    label: Field::new(&["TypeDossier", "Type"], &["type", "typeDossier"]),
    id: Field::new(&["IdTypeDossier", "IdType"], &["typeId"]),
};

/* --------------------------- DETAIL BLOCKS ------------------------------ */

pub const ACCONIER: DetailKeys = DetailKeys { legacy_suffix: "Acc", rest_blocks: &["acconier", "acconage"] };
pub const FRET: DetailKeys = DetailKeys { legacy_suffix: "Fret", rest_blocks: &["fret"] };
pub const TRANSPORT: DetailKeys = DetailKeys { legacy_suffix: "Transp", rest_blocks: &["transport", "transp"] };
pub const CHANGE: DetailKeys = DetailKeys { legacy_suffix: "Chg", rest_blocks: &["change"] };
pub const SURESTARIES: DetailKeys = DetailKeys { legacy_suffix: "Sur", rest_blocks: &["surestaries"] };
pub const MAGASINAGE: DetailKeys = DetailKeys { legacy_suffix: "Mag", rest_blocks: &["magasinage"] };

pub const DETAIL_NOM: DetailField = DetailField { legacy_prefixes: &["Nom"], rest: &["nom", "fournisseur"] };
pub const DETAIL_NUMERO_FACTURE: DetailField =
    DetailField { legacy_prefixes: &["NumFact"], rest: &["numeroFacture", "numFacture"] };
pub const DETAIL_DATE: DetailField = DetailField { legacy_prefixes: &["Date"], rest: &["date"] };
pub const DETAIL_CODE: DetailField = DetailField { legacy_prefixes: &["Code"], rest: &["code"] };
pub const DETAIL_MONTANT: DetailField = DetailField { legacy_prefixes: &["Mont"], rest: &["montant"] };
pub const DETAIL_MONTANT_HT: DetailField =
    DetailField { legacy_prefixes: &["MontHT", "BaseHT"], rest: &["montantHT", "montantHt"] };
pub const DETAIL_TVA: DetailField = DetailField { legacy_prefixes: &["TVA"], rest: &["tva", "montantTVA"] };

/* ----------------------------- COLLECTIONS ------------------------------ */

pub const ITEMS: CollectionKeys = CollectionKeys {
    list: Field::new(&["designations"], &["items"]),
    id: Field::new(&["IdDesig"], &["id"]),
    kind: "item",
};
pub const ITEM_QUANTITE: Field = Field::new(&["QteDesig"], &["quantite", "qte"]);
pub const ITEM_DESIGNATION: Field = Field::new(&["LibelleDesig", "Designation"], &["designation", "libelle"]);
pub const ITEM_FOB: Field = Field::new(&["FOBDesig"], &["fob"]);

pub const PRIX_REVIENS: CollectionKeys = CollectionKeys {
    list: Field::new(&["prix_unitaires"], &["prixReviens"]),
    id: Field::new(&["IdPrix"], &["id"]),
    kind: "prix",
};
pub const PRIX_DESIGNATION: Field = Field::new(&["LibellePrix"], &["designation"]);
pub const PRIX_QUANTITE: Field = Field::new(&["QtePrix"], &["quantite"]);
pub const PRIX_FOB: Field = Field::new(&["FOBPrix"], &["fob"]);
pub const PRIX_VALEUR_LOCALE: Field = Field::new(&["MontLocPrix", "CFAPrix"], &["valeurLocale"]);
pub const PRIX_POURCENTAGE: Field = Field::new(&["PctPrix", "TauxPrix"], &["pourcentage"]);
pub const PRIX_COUT_REVIENT: Field = Field::new(&["CoutRevPrix"], &["coutRevient", "prixRevient"]);

pub const REGLEMENTS: CollectionKeys = CollectionKeys {
    list: Field::new(&["paiements"], &["reglements"]),
    id: Field::new(&["IdReg"], &["id"]),
    kind: "reglement",
};
pub const REG_DATE: Field = Field::new(&["DateReg"], &["date"]);
pub const REG_REFERENCE: Field = Field::new(&["RefReg"], &["reference"]);
pub const REG_MODE: Field = Field::new(&["ModeReg"], &["modePaiement"]);
pub const REG_BANQUE: Field = Field::new(&["BanqueReg"], &["banque"]);
pub const REG_MONTANT_DEVISE: Field = Field::new(&["MontDevReg"], &["montantDevise"]);
pub const REG_DEVISE: Field = Field::new(&["DeviseReg"], &["devise"]);
pub const REG_TAUX: Field = Field::new(&["TauxReg"], &["tauxChange"]);
pub const REG_MONTANT_LOCAL: Field = Field::new(&["MontLocReg"], &["montantLocal"]);
pub const REG_TAXE: Field = Field::new(&["TaxeReg"], &["taxe"]);
pub const REG_FRAIS: Field = Field::new(&["FraisReg"], &["fraisBancaires"]);

pub const TEUS: CollectionKeys = CollectionKeys {
    list: Field::new(&["conteneurs"], &["teus"]),
    id: Field::new(&["IdTeu", "IdConteneur"], &["id"]),
    kind: "teu",
};
pub const TEU_NUMERO: Field = Field::new(&["NumTeu", "NumConteneur"], &["numero", "numeroTeu"]);
