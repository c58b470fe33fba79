//! Tests de résolution : résultats attendus + forme exacte de l’arbre JSON.
//!
//! Noms de nœuds attendus : //! ("=", opérateurs, littéraux normalisés), feuilles sans "children".

use serde_json::{json, Value};

use super::{repondre_json, resoudre_equation};

fn resultat_ok(equation: &str) -> String {
    resoudre_equation(equation)
        .unwrap_or_else(|e| panic!("equation={equation:?} err={e}"))
        .resultat
}

fn erreur(equation: &str) -> String {
    match resoudre_equation(equation) {
        Ok(r) => panic!("equation={equation:?} aurait dû échouer, résultat={}", r.resultat),
        Err(e) => e,
    }
}

fn reponse(equation: &str) -> Value {
    serde_json::from_str(&repondre_json(equation)).expect("JSON valide")
}

/* ------------------------ Degré 1 ------------------------ */

#[test]
fn exemple_par_defaut() {
    assert_eq!(resultat_ok("2 * (x + 5) = 20"), "x = 5");
}

#[test]
fn racine_fractionnaire() {
    assert_eq!(resultat_ok("2*x = 5"), "x = 5/2 (≈ 2.500000)");
    assert_eq!(resultat_ok("3*y + 1 = 0"), "y = -1/3 (≈ -0.333333)");
}

#[test]
fn decimaux_et_division_par_constante() {
    assert_eq!(resultat_ok("x / 4 = 2.5"), "x = 10");
    assert_eq!(resultat_ok("0.5*x = 1.25"), "x = 5/2 (≈ 2.500000)");
}

#[test]
fn cas_degeneres() {
    assert_eq!(resultat_ok("x + 1 = 1 + x"), "0 = 0 : infinité de solutions");
    assert_eq!(resultat_ok("x = x + 1"), "-1 = 0 : aucune solution");
    assert_eq!(resultat_ok("2 = 2"), "0 = 0 : infinité de solutions");
}

/* ------------------------ Degré 2 et plus ------------------------ */

#[test]
fn quadratiques() {
    assert_eq!(resultat_ok("x^2 = 4"), "x1 = 2, x2 = -2");
    assert_eq!(resultat_ok("(x - 3)^2 = 0"), "x = 3");
    assert_eq!(resultat_ok("x^2 + 1 = 0"), "racines complexes (aucune solution réelle)");
    assert_eq!(resultat_ok("x^2 = 2"), "x1 ≈ 1.414213, x2 ≈ -1.414213");
}

#[test]
fn degre_superieur() {
    let r = resultat_ok("x^3 = 8");
    assert!(r.starts_with("équation de degré 3"), "{r}");
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn erreurs_de_syntaxe() {
    assert_eq!(erreur(""), "Entrée vide");
    assert_eq!(erreur("2 * (x + 5"), "il manque le signe '='");
    assert_eq!(erreur("2 * (x + 5 = 20"), "parenthèses déséquilibrées");
    assert_eq!(erreur("x = 1 = 2"), "un seul signe '=' est attendu");
    assert_eq!(erreur("= 3"), "membre vide");
    assert!(erreur("x = 2 $").contains("caractère inattendu"));
    // pas de multiplication implicite
    assert!(erreur("2x = 5").contains("opérateur manquant"));
}

#[test]
fn erreurs_de_domaine() {
    assert_eq!(erreur("x / 0 = 1"), "division par zéro");
    assert!(erreur("1 / x = 1").contains("non supportée"));
    assert!(erreur("2 ^ x = 8").contains("exposant"));
    assert!(erreur("x + y = 1").contains("une seule inconnue"));
}

/* ------------------------ Contrat JSON ------------------------ */

#[test]
fn arbre_json_exact() {
    let v = reponse("2 * (x + 5) = 20");
    assert_eq!(v["result"], "x = 5");
    assert_eq!(
        v["ast"],
        json!({
            "name": "=",
            "children": [
                {
                    "name": "*",
                    "children": [
                        { "name": "2" },
                        { "name": "+", "children": [{ "name": "x" }, { "name": "5" }] }
                    ]
                },
                { "name": "20" }
            ]
        })
    );
    assert!(v.get("error").is_none());
}

#[test]
fn litteraux_normalises_dans_l_arbre() {
    let v = reponse("2.50 * x = 10.0");
    assert_eq!(v["ast"]["children"][0]["children"][0]["name"], "2.5");
    assert_eq!(v["ast"]["children"][1]["name"], "10");
}

#[test]
fn erreur_json_echappee() {
    // le message contient des guillemets simples ; le JSON reste valide
    let v = reponse("x = 1 = 2");
    assert_eq!(v["error"], "un seul signe '=' est attendu");
    assert!(v.get("result").is_none());
    assert!(v.get("ast").is_none());

    let v = reponse("x = \"1\"");
    assert!(v["error"].as_str().is_some_and(|e| e.contains('"')));
}
