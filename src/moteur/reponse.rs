//! Classement d’une réponse brute du moteur.
//!
//! Contrat JSON (noms de champs imposés par l’arbre côté client) :
//!   {"error"?: string, "result": string, "ast": {"name": string, "children": [...]}}
//!
//! Règle de départage : un champ "error" non vide l’emporte toujours,
//! même si "result"/"ast" sont aussi présents.

use serde::{Deserialize, Serialize};

use super::ErreurSolveur;

/// Nœud de l’arbre tel que produit par le moteur. Le client ne l’interprète pas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoeudAst {
    #[serde(rename = "name")]
    pub nom: String,

    #[serde(rename = "children", default, skip_serializing_if = "Vec::is_empty")]
    pub enfants: Vec<NoeudAst>,
}

impl NoeudAst {
    #[cfg(test)]
    pub fn feuille(nom: impl Into<String>) -> Self {
        Self {
            nom: nom.into(),
            enfants: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn noeud(nom: impl Into<String>, enfants: Vec<NoeudAst>) -> Self {
        Self {
            nom: nom.into(),
            enfants,
        }
    }

    /// Nombre total de nœuds (racine comprise).
    pub fn taille(&self) -> usize {
        1 + self.enfants.iter().map(NoeudAst::taille).sum::<usize>()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NatureEchec {
    /// Champ "error" bien formé : faute de l’utilisateur (syntaxe, domaine).
    Domaine,
    /// Réponse illisible : défaut du moteur ou du contrat.
    ReponseInattendue,
}

/// Issue courante d’une résolution. Une seule à la fois, remplacée en bloc.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Issue {
    #[default]
    Vide,
    Succes {
        resultat: String,
        arbre: NoeudAst,
    },
    Echec {
        message: String,
        nature: NatureEchec,
    },
}

/// Forme brute : tout est optionnel, la validation se fait dans `classer`.
#[derive(Debug, Deserialize)]
struct ReponseBrute {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    ast: Option<NoeudAst>,
}

/// Réponse brute -> Issue (Succes / Echec de domaine).
///
/// Erreur `ReponseMalformee` si le JSON est illisible, ou s’il n’y a ni erreur
/// ni couple result + ast utilisable.
pub fn classer(brute: &str) -> Result<Issue, ErreurSolveur> {
    let r: ReponseBrute =
        serde_json::from_str(brute).map_err(|e| ErreurSolveur::ReponseMalformee(e.to_string()))?;

    if let Some(message) = r.error.filter(|m| !m.is_empty()) {
        return Ok(Issue::Echec {
            message,
            nature: NatureEchec::Domaine,
        });
    }

    match (r.result, r.ast) {
        (Some(resultat), Some(arbre)) => Ok(Issue::Succes { resultat, arbre }),
        (None, _) => Err(ErreurSolveur::ReponseMalformee(
            "champ \"result\" absent".into(),
        )),
        (_, None) => Err(ErreurSolveur::ReponseMalformee("champ \"ast\" absent".into())),
    }
}
