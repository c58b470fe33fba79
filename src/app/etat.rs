//! src/app/etat.rs
//!
//! État UI + cycle de résolution (sans vue).
//!
//! Rôle : contenir l’équation saisie, la poignée du moteur et l’issue courante,
//! et appliquer une résolution complète en une seule transition.
//!
//! Contrats :
//! - Aucune analyse d’équation ici (c’est le travail du moteur).
//! - Une seule `Issue` fait foi : résultat, erreur et arbre affichés en sont dérivés,
//!   donc un échec ne peut jamais laisser un ancien arbre visible.
//! - `soumettre` avant que le moteur soit prêt : aucun effet.

use tracing::{debug, error, info};

use crate::moteur::{classer, Fabrique, Issue, NatureEchec, NoeudAst, PoigneeMoteur};

use super::disposition::AdaptateurDisposition;

/// Équation proposée au lancement.
pub const EQUATION_DEFAUT: &str = "2 * (x + 5) = 20";

/// Message générique pour une réponse illisible du moteur.
pub const MESSAGE_REPONSE_INATTENDUE: &str = "Réponse inattendue du moteur";

pub struct AppArbre {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- moteur ---
    pub moteur: PoigneeMoteur,

    // --- sortie (une seule issue courante) ---
    issue: Issue,

    // incrémenté à chaque changement d’issue (détection “nouvel arbre”)
    generation: u64,

    // --- disposition de l’arbre (origine, zoom, déplacement) ---
    pub disposition: AdaptateurDisposition,

    // --- UX ---
    pub focus_entree: bool,
}

impl Default for AppArbre {
    fn default() -> Self {
        Self::avec_moteur(PoigneeMoteur::default())
    }
}

impl AppArbre {
    pub fn avec_moteur(moteur: PoigneeMoteur) -> Self {
        Self {
            entree: EQUATION_DEFAUT.to_string(),
            moteur,
            issue: Issue::Vide,
            generation: 0,
            disposition: AdaptateurDisposition::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }

    /// Application dont le moteur arrive par la fabrique de l’hôte (ou jamais).
    pub fn new(fabrique: Option<Fabrique>) -> Self {
        let mut app = Self::default();
        app.moteur.charger(fabrique);
        app
    }

    /* ------------------------ Lecture (vue) ------------------------ */

    pub fn issue(&self) -> &Issue {
        &self.issue
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Texte du résultat affiché ("" hors succès).
    pub fn resultat_affiche(&self) -> &str {
        match &self.issue {
            Issue::Succes { resultat, .. } => resultat,
            _ => "",
        }
    }

    /// Texte d’erreur affiché ("" hors échec).
    pub fn erreur_affichee(&self) -> &str {
        match &self.issue {
            Issue::Echec { message, .. } => message,
            _ => "",
        }
    }

    /// Arbre affiché (seulement en cas de succès).
    #[cfg(test)]
    pub fn arbre_affiche(&self) -> Option<&NoeudAst> {
        match &self.issue {
            Issue::Succes { arbre, .. } => Some(arbre),
            _ => None,
        }
    }

    /// Arbre affiché + disposition modifiable, empruntés ensemble (dessin sans copie).
    pub fn arbre_et_disposition(&mut self) -> (Option<&NoeudAst>, &mut AdaptateurDisposition) {
        let arbre = match &self.issue {
            Issue::Succes { arbre, .. } => Some(arbre),
            _ => None,
        };
        (arbre, &mut self.disposition)
    }

    /* ------------------------ Résolution ------------------------ */

    /// Soumet l’entrée courante.
    pub fn soumettre_entree(&mut self) {
        let equation = self.entree.clone();
        self.soumettre(&equation);
    }

    /// Cycle complet : prêt ? -> efface l’erreur -> invoque -> classe -> applique.
    pub fn soumettre(&mut self, equation: &str) {
        if !self.moteur.est_pret() {
            debug!("soumission ignorée : moteur pas encore prêt");
            return;
        }

        // une erreur précédente ne doit pas rester affichée pendant la requête
        if matches!(self.issue, Issue::Echec { .. }) {
            self.remplacer_issue(Issue::Vide);
        }

        let brute = match self.moteur.invoquer(equation) {
            Ok(b) => b,
            Err(e) => {
                debug!(%e, "soumission ignorée");
                return;
            }
        };

        let issue = classer(&brute).unwrap_or_else(|e| {
            error!(%e, equation, "réponse du moteur illisible");
            Issue::Echec {
                message: MESSAGE_REPONSE_INATTENDUE.to_string(),
                nature: NatureEchec::ReponseInattendue,
            }
        });

        match &issue {
            Issue::Succes { resultat, arbre } => {
                info!(equation, resultat = resultat.as_str(), noeuds = arbre.taille(), "résolue");
            }
            Issue::Echec { message, .. } => {
                info!(equation, message = message.as_str(), "échec");
            }
            Issue::Vide => {}
        }

        self.remplacer_issue(issue);
        self.focus_entree = true;
    }

    fn remplacer_issue(&mut self, issue: Issue) {
        self.issue = issue;
        self.generation = self.generation.wrapping_add(1);
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// AC : entrée vidée + issue effacée.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        if self.issue != Issue::Vide {
            self.remplacer_issue(Issue::Vide);
        }
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher au résultat).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }
}
