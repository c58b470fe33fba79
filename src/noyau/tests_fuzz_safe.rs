//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le moteur sans brûler la machine.
//! - générateurs proptest (profondeur bornée)
//! - budget temps global sur les cas lourds
//! - on accepte certaines erreurs attendues (division par zéro, degré trop élevé, etc.)
//! - invariant clé : toute réponse est un JSON avec SOIT "error" SOIT "result" + "ast"

use std::time::{Duration, Instant};

use proptest::prelude::*;
use serde_json::Value;

use super::repondre_json;
use super::rpn::PROFONDEUR_MAX;

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(msg: &str) -> bool {
    // Liste blanche : erreurs *normales* pour un fuzz,
    // parce que le domaine est volontairement limité.
    msg.contains("division par zéro")
        || msg.contains("non supportée")
        || msg.contains("exposant")
        || msg.contains("degré trop élevé")
        || msg.contains("trop profonde")
        || msg.contains("trop grands")
}

fn check_invariant_reponse(equation: &str, brute: &str) -> Value {
    let v: Value = serde_json::from_str(brute)
        .unwrap_or_else(|e| panic!("JSON invalide pour {equation:?}: {e} ({brute})"));

    match v.get("error") {
        Some(err) => {
            assert!(err.is_string(), "error non textuel: {brute}");
            assert!(v.get("result").is_none() && v.get("ast").is_none());
        }
        None => {
            assert!(v["result"].is_string(), "result manquant: {brute}");
            assert_eq!(v["ast"]["name"], "=", "racine != '=': {brute}");
            assert_eq!(v["ast"]["children"].as_array().map(Vec::len), Some(2));
        }
    }
    v
}

/* ------------------------ Génération d’équations (bornée) ------------------------ */

fn atome() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..12).prop_map(|n| n.to_string()),
        (0u32..10, 1u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
        Just("x".to_string()),
    ]
}

fn membre() -> impl Strategy<Value = String> {
    atome().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}+{b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}-{b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}*{b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}/{b})")),
            (inner.clone(), 0u32..4).prop_map(|(a, n)| format!("({a})^{n}")),
            inner.prop_map(|a| format!("-{a}")),
        ]
    })
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/// a op b op c ... sans parenthèses : la forme réellement tapée (peigne à gauche).
fn chaine_plate() -> impl Strategy<Value = String> {
    (
        atome(),
        prop::collection::vec((prop_oneof![Just('+'), Just('-'), Just('*')], atome()), 0..120),
    )
        .prop_map(|(tete, suite)| {
            let mut s = tete;
            for (op, a) in suite {
                s.push(op);
                s.push_str(&a);
            }
            s
        })
}

/* ------------------------ Tests ------------------------ */

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn fuzz_safe_reponse_toujours_bien_formee(g in membre(), d in membre()) {
        let equation = format!("{g} = {d}");
        let brute = repondre_json(&equation);
        let v = check_invariant_reponse(&equation, &brute);

        if let Some(err) = v.get("error").and_then(Value::as_str) {
            prop_assert!(
                is_erreur_attendue(err),
                "erreur non attendue: equation={equation:?} err={err}"
            );
        }
    }

    #[test]
    fn fuzz_safe_determinisme(g in membre(), d in membre()) {
        let equation = format!("{g}={d}");
        prop_assert_eq!(repondre_json(&equation), repondre_json(&equation));
    }

    #[test]
    fn fuzz_safe_chaine_plate(g in chaine_plate(), d in atome()) {
        let equation = format!("{g} = {d}");
        let brute = repondre_json(&equation);
        let v = check_invariant_reponse(&equation, &brute);

        if let Some(err) = v.get("error").and_then(Value::as_str) {
            prop_assert!(is_erreur_attendue(err), "equation={equation:?} err={err}");
        }
    }

    #[test]
    fn fuzz_safe_texte_arbitraire_sans_panique(s in "\\PC{0,40}") {
        let brute = repondre_json(&s);
        check_invariant_reponse(&s, &brute);
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let equation = format!("{} = x", somme_balancee("1/2", 800));
    let brute = repondre_json(&equation);
    budget(t0, max);

    let v = check_invariant_reponse(&equation, &brute);
    // 800*(1/2) = 400
    assert_eq!(v["result"], "x = 400");
}

#[test]
fn fuzz_safe_somme_plate_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // juste sous le seuil : résolue
    let equation = format!("x{} = 0", "+1".repeat(PROFONDEUR_MAX - 1));
    let v = check_invariant_reponse(&equation, &repondre_json(&equation));
    assert_eq!(v["result"], format!("x = -{}", PROFONDEUR_MAX - 1));

    // au-delà (jusqu’au collage géant) : erreur de domaine, jamais d’abandon
    for n in [PROFONDEUR_MAX, 70, 1_000, 20_000] {
        let equation = format!("x{} = 0", "+1".repeat(n));
        let v = check_invariant_reponse(&equation, &repondre_json(&equation));
        let err = v["error"].as_str().unwrap_or_default();
        assert!(err.contains("trop profonde"), "n={n}: {err}");
        budget(t0, max);
    }
}

#[test]
fn fuzz_safe_puissances_en_chaine() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    for k in 0..6 {
        let equation = format!("2^64{} = x", "^64".repeat(k));
        let v = check_invariant_reponse(&equation, &repondre_json(&equation));
        match k {
            0 => assert_eq!(v["result"], "x = 18446744073709551616"),
            _ => {
                let err = v["error"].as_str().unwrap_or_default();
                assert!(err.contains("trop grands"), "k={k}: {err}");
            }
        }
        budget(t0, max);
    }
}

#[test]
fn fuzz_safe_litteral_geant() {
    let equation = format!("x = 1{}", "0".repeat(5_000));
    let v = check_invariant_reponse(&equation, &repondre_json(&equation));
    assert!(v["error"].as_str().unwrap_or_default().contains("trop grands"));
}
