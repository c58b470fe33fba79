//! Tests poignée + classement : cycle de vie du moteur et départage des réponses.

use std::sync::mpsc;

use super::*;

struct Echo;

impl Moteur for Echo {
    fn resoudre(&self, equation: &str) -> String {
        format!("echo:{equation}")
    }
}

/* ------------------------ Cycle de vie ------------------------ */

#[test]
fn absent_au_demarrage() {
    let p = PoigneeMoteur::default();
    assert!(!p.est_pret());
    assert!(matches!(
        p.invoquer("x = 1"),
        Err(ErreurSolveur::MoteurIndisponible)
    ));
}

#[test]
fn chargeur_absent_mode_degrade() {
    let mut p = PoigneeMoteur::default();
    p.charger(None);
    p.sonder();
    assert!(!p.est_pret());
    assert!(!p.en_chargement());
}

#[test]
fn chargement_asynchrone_puis_pret() {
    let (tx, rx) = mpsc::channel::<MoteurBoite>();

    let mut p = PoigneeMoteur::default();
    p.charger(Some(Box::new(move || rx)));

    // pas encore livré : la saisie continue, invoquer refuse
    assert!(p.en_chargement());
    assert!(p.invoquer("x = 1").is_err());

    tx.send(Box::new(Echo)).unwrap();
    p.sonder();
    assert!(p.est_pret());
    assert_eq!(p.invoquer("2 = x").unwrap(), "echo:2 = x");
}

#[test]
fn chargeur_interrompu_retombe_absent() {
    let mut p = PoigneeMoteur::default();
    p.charger(Some(Box::new(|| {
        let (_tx, rx) = mpsc::channel::<MoteurBoite>();
        rx
    })));
    assert!(!p.est_pret());
    assert!(!p.en_chargement());
}

#[test]
fn une_seule_tentative() {
    let mut p = PoigneeMoteur::default();
    p.charger(None);
    // la deuxième fabrique n’est jamais appelée
    p.charger(Some(Box::new(|| -> mpsc::Receiver<MoteurBoite> {
        panic!("fabrique appelée deux fois")
    })));
    assert!(!p.est_pret());
}

#[test]
fn moteur_integre_livre() {
    let mut p = PoigneeMoteur::default();
    p.charger(Some(fabrique_integree()));

    let debut = std::time::Instant::now();
    while !p.est_pret() {
        assert!(debut.elapsed() < std::time::Duration::from_secs(5), "moteur jamais livré");
        std::thread::sleep(std::time::Duration::from_millis(5));
        p.sonder();
    }

    let brute = p.invoquer("2 * (x + 5) = 20").unwrap();
    match classer(&brute).unwrap() {
        Issue::Succes { resultat, arbre } => {
            assert_eq!(resultat, "x = 5");
            assert_eq!(arbre.nom, "=");
            assert_eq!(arbre.enfants.len(), 2);
        }
        autre => panic!("succès attendu, obtenu {autre:?}"),
    }
}

/* ------------------------ Classement ------------------------ */

#[test]
fn classe_succes() {
    let brute = r#"{"result":"5","ast":{"name":"=","children":[{"name":"2*(x+5)"},{"name":"20"}]}}"#;
    let attendu = Issue::Succes {
        resultat: "5".into(),
        arbre: NoeudAst::noeud(
            "=",
            vec![NoeudAst::feuille("2*(x+5)"), NoeudAst::feuille("20")],
        ),
    };
    assert_eq!(classer(brute).unwrap(), attendu);
}

#[test]
fn classe_echec_domaine() {
    let issue = classer(r#"{"error":"Unbalanced parentheses"}"#).unwrap();
    assert_eq!(
        issue,
        Issue::Echec {
            message: "Unbalanced parentheses".into(),
            nature: NatureEchec::Domaine,
        }
    );
}

#[test]
fn erreur_l_emporte_sur_resultat() {
    let brute = r#"{"error":"boom","result":"5","ast":{"name":"x"}}"#;
    assert!(matches!(
        classer(brute).unwrap(),
        Issue::Echec { ref message, nature: NatureEchec::Domaine } if message == "boom"
    ));
}

#[test]
fn erreur_vide_ignoree() {
    let brute = r#"{"error":"","result":"7","ast":{"name":"7"}}"#;
    assert!(matches!(classer(brute).unwrap(), Issue::Succes { .. }));
}

#[test]
fn reponses_malformees() {
    for brute in [
        "not json",
        "",
        "null",
        "{}",
        r#"{"result":"5"}"#,
        r#"{"ast":{"name":"="}}"#,
        r#"{"result":5,"ast":{"name":"="}}"#,
        r#"{"error":42}"#,
    ] {
        assert!(
            matches!(classer(brute), Err(ErreurSolveur::ReponseMalformee(_))),
            "devrait être malformée: {brute:?}"
        );
    }
}

#[test]
fn noms_de_champs_preserves() {
    let arbre = NoeudAst::noeud("+", vec![NoeudAst::feuille("x"), NoeudAst::feuille("1")]);
    let txt = serde_json::to_string(&arbre).unwrap();
    assert_eq!(
        txt,
        r#"{"name":"+","children":[{"name":"x"},{"name":"1"}]}"#
    );
    assert_eq!(arbre.taille(), 3);
}
