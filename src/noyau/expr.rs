// src/noyau/expr.rs
//
// AST d’un membre d’équation (sans flottants).
// - Nombre   : rationnel exact + littéral normalisé (étiquette affichée)
// - Inconnue : une lettre
// - Binaire  : opérateur + deux opérandes
//
// Deux sorties :
// - evaluer()  : polynôme exact (pour la résolution)
// - vers_json(): nœud {"name", "children"} (pour l’arbre côté client)

use num_rational::BigRational;
use serde_json::{json, Value};

use std::fmt;

use super::poly::Poly;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Div,
    Puiss,
}

impl Op {
    pub fn symbole(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Moins => "-",
            Op::Fois => "*",
            Op::Div => "/",
            Op::Puiss => "^",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre { valeur: BigRational, texte: String },
    Inconnue(char),
    Binaire(Op, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évalue en polynôme.
    ///
    /// `inconnue` retient la première lettre rencontrée : une deuxième lettre
    /// différente est refusée (une seule inconnue par équation).
    pub fn evaluer(&self, inconnue: &mut Option<char>) -> Result<Poly, String> {
        match self {
            // littéral géant refusé comme un résultat géant
            Expr::Nombre { valeur, .. } => Poly::constante(valeur.clone()).borner(),

            Expr::Inconnue(c) => match *inconnue {
                Some(deja) if deja != *c => Err(format!(
                    "une seule inconnue est supportée ('{deja}' et '{c}')"
                )),
                _ => {
                    *inconnue = Some(*c);
                    Ok(Poly::inconnue())
                }
            },

            Expr::Binaire(op, a, b) => {
                let pa = a.evaluer(inconnue)?;
                let pb = b.evaluer(inconnue)?;
                match op {
                    Op::Plus => pa.plus(&pb).borner(),
                    Op::Moins => pa.moins(&pb).borner(),
                    Op::Fois => pa.fois(&pb),
                    Op::Div => pa.divise(&pb),
                    Op::Puiss => pa.puissance(&pb),
                }
            }
        }
    }

    /// Étiquette du nœud dans l’arbre affiché.
    pub fn etiquette(&self) -> String {
        match self {
            Expr::Nombre { texte, .. } => texte.clone(),
            Expr::Inconnue(c) => c.to_string(),
            Expr::Binaire(op, _, _) => op.symbole().to_string(),
        }
    }

    /// Nœud JSON : feuilles sans "children" (forme attendue par le client).
    pub fn vers_json(&self) -> Value {
        match self {
            Expr::Binaire(_, a, b) => json!({
                "name": self.etiquette(),
                "children": [a.vers_json(), b.vers_json()],
            }),
            _ => json!({ "name": self.etiquette() }),
        }
    }
}

/* ------------------------ Affichage debug ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre { texte, .. } => write!(f, "{texte}"),
            Expr::Inconnue(c) => write!(f, "{c}"),
            Expr::Binaire(op, a, b) => write!(f, "({a}{}{b})", op.symbole()),
        }
    }
}
