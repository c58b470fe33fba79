//! Noyau — résolution (pipeline réel)
//!
//! tokenize -> découpe sur '=' -> RPN (par membre) -> Expr -> JSON de l’arbre
//!          -> polynômes -> G - D -> degré -> texte du résultat
//!
//! Réponse (contrat client) :
//! - succès : {"ast": {...}, "result": "..."}
//! - échec  : {"error": "..."}

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use serde_json::{json, Value};
use tracing::debug;

use super::expr::Expr;
use super::jetons::{format_tokens, tokenize, Tok};
use super::lecture::{
    lecture_approchee, lecture_exacte, rational_sqrt_exact, rational_sqrt_scaled,
};
use super::poly::Poly;
use super::rpn::{from_rpn, to_rpn};

/// Chiffres internes pour √(discriminant) avant la lecture tronquée.
const DIGITS_RACINE: usize = 12;

#[derive(Clone, Debug)]
pub struct Resolution {
    pub gauche: Expr,
    pub droite: Expr,
    pub resultat: String,
}

impl Resolution {
    /// Arbre complet : racine "=" et les deux membres.
    pub fn arbre_json(&self) -> Value {
        json!({
            "name": "=",
            "children": [self.gauche.vers_json(), self.droite.vers_json()],
        })
    }
}

/// API publique : réponse JSON brute, telle que le client l’attend.
pub fn repondre_json(equation: &str) -> String {
    let reponse = match resoudre_equation(equation) {
        Ok(r) => json!({ "ast": r.arbre_json(), "result": r.resultat }),
        Err(msg) => json!({ "error": msg }),
    };
    reponse.to_string()
}

/// Résout une équation polynomiale à une inconnue (degré <= 2 résolu exactement).
pub fn resoudre_equation(equation: &str) -> Result<Resolution, String> {
    let s = equation.trim();
    if s.is_empty() {
        return Err("Entrée vide".into());
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    debug!(jetons = %format_tokens(&jetons), "équation tokenisée");

    // 2) Membres : exactement un '='
    let (g, d) = decouper_membres(&jetons)?;

    // 3) RPN -> Expr
    let gauche = from_rpn(&to_rpn(g)?)?;
    let droite = from_rpn(&to_rpn(d)?)?;
    debug!(%gauche, %droite, "membres analysés");

    // 4) Polynômes (une seule inconnue pour les deux membres)
    let mut inconnue = None;
    let pg = gauche.evaluer(&mut inconnue)?;
    let pd = droite.evaluer(&mut inconnue)?;
    let nom = inconnue.unwrap_or('x');

    // 5) G - D = 0
    let eq = pg.moins(&pd);
    let resultat = texte_resultat(&eq, nom);

    Ok(Resolution {
        gauche,
        droite,
        resultat,
    })
}

fn decouper_membres(jetons: &[Tok]) -> Result<(&[Tok], &[Tok]), String> {
    let mut positions = jetons
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t, Tok::Egal))
        .map(|(i, _)| i);

    let i = positions.next().ok_or("il manque le signe '='")?;
    if positions.next().is_some() {
        return Err("un seul signe '=' est attendu".into());
    }
    Ok((&jetons[..i], &jetons[i + 1..]))
}

fn texte_resultat(eq: &Poly, nom: char) -> String {
    if eq.est_nul() {
        return "0 = 0 : infinité de solutions".into();
    }

    match eq.degre() {
        0 => format!("{} = 0 : aucune solution", lecture_exacte(&eq.coeff(0))),

        1 => {
            let a = eq.coeff(1);
            let c = eq.coeff(0);
            format!("{nom} = {}", lecture_exacte(&(-c / a)))
        }

        2 => {
            let a = eq.coeff(2);
            let b = eq.coeff(1);
            let c = eq.coeff(0);
            let deux_a = &a + &a;
            let disc = &b * &b - BigRational::from_integer(BigInt::from(4)) * &a * &c;

            if disc.is_negative() {
                return "racines complexes (aucune solution réelle)".into();
            }
            if disc.is_zero() {
                return format!("{nom} = {}", lecture_exacte(&(-b / deux_a)));
            }

            match rational_sqrt_exact(&disc) {
                Some(r) => {
                    let x1 = (-&b + &r) / &deux_a;
                    let x2 = (-&b - &r) / &deux_a;
                    format!(
                        "{nom}1 = {}, {nom}2 = {}",
                        lecture_exacte(&x1),
                        lecture_exacte(&x2)
                    )
                }
                None => {
                    let echelle = BigRational::from_integer(
                        BigInt::from(10).pow(DIGITS_RACINE as u32),
                    );
                    let r = BigRational::from_integer(rational_sqrt_scaled(&disc, DIGITS_RACINE))
                        / echelle;
                    let x1 = (-&b + &r) / &deux_a;
                    let x2 = (-&b - &r) / &deux_a;
                    format!(
                        "{nom}1 {}, {nom}2 {}",
                        lecture_approchee(&x1),
                        lecture_approchee(&x2)
                    )
                }
            }
        }

        n => format!(
            "équation de degré {n} : solution algébrique exacte omise, méthodes numériques requises"
        ),
    }
}
