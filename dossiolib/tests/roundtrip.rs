use dossiolib::{
    decode, encode_dossier,
    model::{AdministrativeDetail, Container, Dossier, LineItem, PriceLine, Reference, Settlement},
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::str::FromStr;

fn detail(nom: &str, montant: i64) -> AdministrativeDetail {
    AdministrativeDetail {
        nom: nom.into(),
        numero_facture: format!("F-{nom}"),
        date: "2024-02-10".into(),
        code: "C1".into(),
        montant: Decimal::from(montant),
        montant_ht: Decimal::new(montant * 100 / 118, 0),
        tva: Decimal::new(1234, 2),
    }
}

fn persisted_dossier() -> Dossier {
    let Value::Object(origine) = json!({"id": 4, "label": "Chine", "name": "China"}) else {
        unreachable!()
    };
    Dossier {
        id: "3878".into(),
        numero_dossier: "DOS-TEST-003".into(),
        date_dossier: "2024-01-15".into(),
        origine: Reference::Object(origine),
        type_dossier: Reference::Label("Import".into()),
        numero_bl: "MEDU123".into(),
        numero_fri: "FRI-9".into(),
        numero_bsc: "BSC-3".into(),
        montant_bsc: Decimal::from(2500),
        montant_fri: Decimal::new(7525, 2),
        fob: Decimal::new(125075, 2),
        assurance: Decimal::from(1200),
        valeur_douane: Decimal::from(987654),
        armateur: "MSC".into(),
        navire: "MSC Anna".into(),
        nombre_colis: Decimal::from(12),
        poids: Decimal::new(3455, 1),
        vendeur: "Shenzhen Ltd".into(),
        transitaire: "Bolloré".into(),
        observations: "RAS".into(),
        acconier: detail("SETV", 150000),
        fret: detail("MSC CI", 500000),
        transport: detail("X", 95000),
        change: detail("SGBCI", 1000),
        surestaries: detail("PAA", 0),
        magasinage: detail("Magasin Nord", 42000),
        items: vec![LineItem {
            id: "1914".into(),
            quantite: Decimal::ZERO,
            designation: "Laptop".into(),
            fob: Decimal::from(255525),
        }],
        prix_reviens: vec![PriceLine {
            id: "7".into(),
            designation: "Laptop".into(),
            quantite: Decimal::from(10),
            fob: Decimal::from(250),
            valeur_locale: Decimal::from(164000),
            pourcentage: Decimal::new(125, 1),
            cout_revient: Decimal::from(184500),
        }],
        reglements: vec![Settlement {
            id: "36".into(),
            date: "2024-05-02".into(),
            reference: "VIR-1".into(),
            mode_paiement: "Virement".into(),
            banque: "SGBCI".into(),
            montant_devise: Decimal::from(1000),
            devise: "EUR".into(),
            taux_change: Decimal::new(655957, 3),
            montant_local: Decimal::from(655957),
            taxe: Decimal::ZERO,
            frais_bancaires: Decimal::from(2500),
        }],
        teus: vec![Container {
            id: "3".into(),
            numero: "MSCU1234567".into(),
        }],
    }
}

#[test]
fn decode_of_encode_reproduces_persisted_dossier() {
    let d = persisted_dossier();
    let wire = Value::Object(encode_dossier(&d, true));
    let back = decode(&wire).expect("decode encoded dossier");
    assert_eq!(back, d);
}

#[test]
fn label_reference_stays_a_label() {
    let mut d = persisted_dossier();
    d.origine = Reference::Label("Turquie".into());
    d.type_dossier = Reference::default();
    let back = decode(&Value::Object(encode_dossier(&d, true))).expect("decode");
    assert_eq!(back.origine, Reference::Label("Turquie".into()));
    assert_eq!(back.type_dossier, Reference::default());
}

#[test]
fn create_payload_decodes_without_ids() {
    let mut d = persisted_dossier();
    d.id.clear();
    let back = decode(&Value::Object(encode_dossier(&d, false))).expect("decode");
    assert_eq!(back.id, "");
    assert_eq!(back.numero_dossier, d.numero_dossier);
    assert_eq!(back.items[0].id, "legacy-item-0");
    assert_eq!(back.items[0].designation, "Laptop");
    assert_eq!(back.teus[0].id, "legacy-teu-0");
}

#[test]
fn long_decimals_survive_the_wire() {
    let mut d = persisted_dossier();
    d.montant_bsc = Decimal::new(12345678901234567, 4);
    d.items[0].fob = Decimal::from_str("0.12345678901234567891").expect("decimal literal");
    d.poids = Decimal::MAX;
    d.assurance = Decimal::MIN;
    let back = decode(&Value::Object(encode_dossier(&d, true))).expect("decode");
    assert_eq!(back, d);
}

/* --------------------------- generated dossiers --------------------------- */

const MANTISSA_LIMIT: i128 = 1 << 96;

fn decimal() -> impl Strategy<Value = Decimal> {
    (-(MANTISSA_LIMIT - 1)..MANTISSA_LIMIT, 0u32..=28).prop_map(|(m, s)| Decimal::from_i128_with_scale(m, s))
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .,'-]{0,16}"
}

fn date() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (2000i32..2031, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")),
    ]
}

fn server_id() -> impl Strategy<Value = String> {
    (1u64..=u64::from(u32::MAX)).prop_map(|n| n.to_string())
}

fn reference() -> impl Strategy<Value = Reference> {
    prop_oneof![
        text().prop_map(Reference::Label),
        (1u32.., "[A-Za-z]{1,12}").prop_map(|(id, label)| {
            let mut m = Map::new();
            m.insert("id".into(), json!(id));
            m.insert("label".into(), json!(label));
            Reference::Object(m)
        }),
    ]
}

fn admin_detail() -> impl Strategy<Value = AdministrativeDetail> {
    (text(), text(), date(), text(), decimal(), decimal(), decimal()).prop_map(
        |(nom, numero_facture, date, code, montant, montant_ht, tva)| AdministrativeDetail {
            nom,
            numero_facture,
            date,
            code,
            montant,
            montant_ht,
            tva,
        },
    )
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (server_id(), decimal(), text(), decimal())
        .prop_map(|(id, quantite, designation, fob)| LineItem { id, quantite, designation, fob })
}

fn price_line() -> impl Strategy<Value = PriceLine> {
    (server_id(), text(), decimal(), decimal(), decimal(), decimal(), decimal()).prop_map(
        |(id, designation, quantite, fob, valeur_locale, pourcentage, cout_revient)| PriceLine {
            id,
            designation,
            quantite,
            fob,
            valeur_locale,
            pourcentage,
            cout_revient,
        },
    )
}

fn settlement() -> impl Strategy<Value = Settlement> {
    (
        (server_id(), date(), text(), text(), text()),
        (decimal(), text(), decimal(), decimal(), decimal(), decimal()),
    )
        .prop_map(
            |(
                (id, date, reference, mode_paiement, banque),
                (montant_devise, devise, taux_change, montant_local, taxe, frais_bancaires),
            )| Settlement {
                id,
                date,
                reference,
                mode_paiement,
                banque,
                montant_devise,
                devise,
                taux_change,
                montant_local,
                taxe,
                frais_bancaires,
            },
        )
}

fn container() -> impl Strategy<Value = Container> {
    (server_id(), "[A-Z]{4}[0-9]{7}").prop_map(|(id, numero)| Container { id, numero })
}

fn persisted() -> impl Strategy<Value = Dossier> {
    let header = (server_id(), text(), date(), reference(), reference(), text(), text(), text());
    let amounts = (decimal(), decimal(), decimal(), decimal(), decimal(), decimal(), decimal());
    let parties = (text(), text(), text(), text(), text());
    let details = (
        admin_detail(),
        admin_detail(),
        admin_detail(),
        admin_detail(),
        admin_detail(),
        admin_detail(),
    );
    let rows = (
        proptest::collection::vec(line_item(), 0..3),
        proptest::collection::vec(price_line(), 0..3),
        proptest::collection::vec(settlement(), 0..3),
        proptest::collection::vec(container(), 0..3),
    );
    (header, amounts, parties, details, rows).prop_map(
        |(
            (id, numero_dossier, date_dossier, origine, type_dossier, numero_bl, numero_fri, numero_bsc),
            (montant_bsc, montant_fri, fob, assurance, valeur_douane, nombre_colis, poids),
            (armateur, navire, vendeur, transitaire, observations),
            (acconier, fret, transport, change, surestaries, magasinage),
            (items, prix_reviens, reglements, teus),
        )| Dossier {
            id,
            numero_dossier,
            date_dossier,
            origine,
            type_dossier,
            numero_bl,
            numero_fri,
            numero_bsc,
            montant_bsc,
            montant_fri,
            fob,
            assurance,
            valeur_douane,
            armateur,
            navire,
            nombre_colis,
            poids,
            vendeur,
            transitaire,
            observations,
            acconier,
            fret,
            transport,
            change,
            surestaries,
            magasinage,
            items,
            prix_reviens,
            reglements,
            teus,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn decimals_round_trip_exactly(d in decimal()) {
        let mut dossier = persisted_dossier();
        dossier.valeur_douane = d;
        dossier.teus.clear();
        let back = decode(&Value::Object(encode_dossier(&dossier, true))).unwrap();
        prop_assert_eq!(back.valeur_douane, d);
    }

    #[test]
    fn generated_persisted_dossiers_round_trip(d in persisted()) {
        let back = decode(&Value::Object(encode_dossier(&d, true))).unwrap();
        prop_assert_eq!(back, d);
    }
}
