//! Доменные модели — единый «канонический» слой между диалектами.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coerce::{as_existing_id, as_existing_id_value, first_present, value_to_string};

/// Ссылочное поле (`origine`, `type`): голая строка или объект `{id, label, ...}`.
///
/// Объект хранится целиком, чтобы при обратной записи не потерять `label`/`name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Label(String),
    Object(Map<String, Value>),
}

impl Default for Reference {
    fn default() -> Self {
        Reference::Label(String::new())
    }
}

impl Reference {
    const LABEL_KEYS: [&'static str; 4] = ["label", "name", "libelle", "nom"];

    /// Строка для отображения.
    pub fn display(&self) -> String {
        match self {
            Reference::Label(s) => s.clone(),
            Reference::Object(m) => first_present(m, Self::LABEL_KEYS)
                .or_else(|| first_present(m, ["id"]))
                .map(value_to_string)
                .unwrap_or_default(),
        }
    }

    /// Числовой id объектной ссылки, если он указывает на сохранённую запись.
    pub fn id(&self) -> Option<u64> {
        match self {
            Reference::Label(_) => None,
            Reference::Object(m) => m.get("id").and_then(as_existing_id_value),
        }
    }
}

impl From<&str> for Reference {
    fn from(s: &str) -> Self {
        Reference::Label(s.to_string())
    }
}

/// Блок административных расходов (акконаж, фрахт, транспорт, обмен, простой, хранение).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdministrativeDetail {
    pub nom: String,
    pub numero_facture: String,
    pub date: String,
    pub code: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub montant: Decimal,
    #[serde(rename = "montantHT", with = "rust_decimal::serde::arbitrary_precision")]
    pub montant_ht: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tva: Decimal,
}

/// Строка декларации товара.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub quantite: Decimal,
    pub designation: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub fob: Decimal,
}

/// Строка расчёта себестоимости.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceLine {
    pub id: String,
    pub designation: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub quantite: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub fob: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub valeur_locale: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub pourcentage: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub cout_revient: Decimal,
}

/// Платёж по досье.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settlement {
    pub id: String,
    pub date: String,
    pub reference: String,
    pub mode_paiement: String,
    pub banque: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub montant_devise: Decimal,
    pub devise: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub taux_change: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub montant_local: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub taxe: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub frais_bancaires: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    pub id: String,
    pub numero: String,
}

/// Каноническое досье. Строки никогда не `null` (по умолчанию `""`), числа — `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dossier {
    pub id: String,
    pub numero_dossier: String,
    pub date_dossier: String,
    pub origine: Reference,
    #[serde(rename = "type")]
    pub type_dossier: Reference,

    #[serde(rename = "numeroBL")]
    pub numero_bl: String,
    #[serde(rename = "numeroFRI")]
    pub numero_fri: String,
    #[serde(rename = "numeroBSC")]
    pub numero_bsc: String,

    #[serde(rename = "montantBSC", with = "rust_decimal::serde::arbitrary_precision")]
    pub montant_bsc: Decimal,
    #[serde(rename = "montantFRI", with = "rust_decimal::serde::arbitrary_precision")]
    pub montant_fri: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub fob: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub assurance: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub valeur_douane: Decimal,

    pub armateur: String,
    pub navire: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub nombre_colis: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub poids: Decimal,

    pub vendeur: String,
    pub transitaire: String,
    pub observations: String,

    pub acconier: AdministrativeDetail,
    pub fret: AdministrativeDetail,
    pub transport: AdministrativeDetail,
    pub change: AdministrativeDetail,
    pub surestaries: AdministrativeDetail,
    pub magasinage: AdministrativeDetail,

    pub items: Vec<LineItem>,
    pub prix_reviens: Vec<PriceLine>,
    pub reglements: Vec<Settlement>,
    pub teus: Vec<Container>,
}

impl Dossier {
    /// Досье уже существует на сервере (id — положительное целое).
    pub fn is_persisted(&self) -> bool {
        as_existing_id(&self.id).is_some()
    }
}

/// Частичное досье для записи: `None` означает «не менять», поле не попадает в запрос.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DossierPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_dossier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_dossier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origine: Option<Reference>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_dossier: Option<Reference>,

    #[serde(rename = "numeroBL", skip_serializing_if = "Option::is_none")]
    pub numero_bl: Option<String>,
    #[serde(rename = "numeroFRI", skip_serializing_if = "Option::is_none")]
    pub numero_fri: Option<String>,
    #[serde(rename = "numeroBSC", skip_serializing_if = "Option::is_none")]
    pub numero_bsc: Option<String>,

    #[serde(
        rename = "montantBSC",
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub montant_bsc: Option<Decimal>,
    #[serde(
        rename = "montantFRI",
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub montant_fri: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", skip_serializing_if = "Option::is_none")]
    pub fob: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", skip_serializing_if = "Option::is_none")]
    pub assurance: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", skip_serializing_if = "Option::is_none")]
    pub valeur_douane: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub armateur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navire: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", skip_serializing_if = "Option::is_none")]
    pub nombre_colis: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", skip_serializing_if = "Option::is_none")]
    pub poids: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendeur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitaire: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub acconier: Option<AdministrativeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fret: Option<AdministrativeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<AdministrativeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<AdministrativeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surestaries: Option<AdministrativeDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magasinage: Option<AdministrativeDetail>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prix_reviens: Option<Vec<PriceLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reglements: Option<Vec<Settlement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teus: Option<Vec<Container>>,
}

impl From<&Dossier> for DossierPatch {
    fn from(d: &Dossier) -> Self {
        DossierPatch {
            id: Some(d.id.clone()).filter(|id| !id.is_empty()),
            numero_dossier: Some(d.numero_dossier.clone()),
            date_dossier: Some(d.date_dossier.clone()),
            origine: Some(d.origine.clone()),
            type_dossier: Some(d.type_dossier.clone()),
            numero_bl: Some(d.numero_bl.clone()),
            numero_fri: Some(d.numero_fri.clone()),
            numero_bsc: Some(d.numero_bsc.clone()),
            montant_bsc: Some(d.montant_bsc),
            montant_fri: Some(d.montant_fri),
            fob: Some(d.fob),
            assurance: Some(d.assurance),
            valeur_douane: Some(d.valeur_douane),
            armateur: Some(d.armateur.clone()),
            navire: Some(d.navire.clone()),
            nombre_colis: Some(d.nombre_colis),
            poids: Some(d.poids),
            vendeur: Some(d.vendeur.clone()),
            transitaire: Some(d.transitaire.clone()),
            observations: Some(d.observations.clone()),
            acconier: Some(d.acconier.clone()),
            fret: Some(d.fret.clone()),
            transport: Some(d.transport.clone()),
            change: Some(d.change.clone()),
            surestaries: Some(d.surestaries.clone()),
            magasinage: Some(d.magasinage.clone()),
            items: Some(d.items.clone()),
            prix_reviens: Some(d.prix_reviens.clone()),
            reglements: Some(d.reglements.clone()),
            teus: Some(d.teus.clone()),
        }
    }
}

impl From<Dossier> for DossierPatch {
    fn from(d: Dossier) -> Self {
        DossierPatch::from(&d)
    }
}
