//! Poignée du moteur de résolution
//!
//! Cycle de vie : Absent -> Chargement -> Pret (une seule fois par session).
//! - `charger()` : une seule tentative ; fabrique absente => mode dégradé silencieux
//! - `sonder()`  : appelé à chaque frame, ne bloque jamais la saisie
//! - `invoquer()`: refuse tant que le moteur n’est pas prêt
//!
//! Le moteur est injecté (trait `Moteur`) : les tests remplacent le moteur intégré
//! par des moteurs simulés.

use std::sync::mpsc::{self, Receiver, TryRecvError};

use thiserror::Error;
use tracing::{debug, info, warn};

pub mod reponse;

#[cfg(test)]
mod tests_poignee;

pub use reponse::{classer, Issue, NatureEchec, NoeudAst};

/// Une seule opération : équation -> réponse JSON brute.
pub trait Moteur {
    fn resoudre(&self, equation: &str) -> String;
}

pub type MoteurBoite = Box<dyn Moteur + Send>;

/// Chargeur fourni par l’hôte : livre le moteur plus tard sur un canal à usage unique.
pub type Fabrique = Box<dyn FnOnce() -> Receiver<MoteurBoite>>;

#[derive(Debug, Error)]
pub enum ErreurSolveur {
    #[error("moteur indisponible (pas encore chargé ou chargeur absent)")]
    MoteurIndisponible,

    #[error("réponse du moteur malformée: {0}")]
    ReponseMalformee(String),
}

pub enum EtatMoteur {
    Absent,
    Chargement(Receiver<MoteurBoite>),
    Pret(MoteurBoite),
}

pub struct PoigneeMoteur {
    etat: EtatMoteur,
    tentee: bool,
}

impl Default for PoigneeMoteur {
    fn default() -> Self {
        Self {
            etat: EtatMoteur::Absent,
            tentee: false,
        }
    }
}

impl PoigneeMoteur {
    /// Poignée déjà prête (moteurs simulés).
    #[cfg(test)]
    pub fn pret(moteur: MoteurBoite) -> Self {
        Self {
            etat: EtatMoteur::Pret(moteur),
            tentee: true,
        }
    }

    /// Lance le chargement (une seule tentative par session).
    pub fn charger(&mut self, fabrique: Option<Fabrique>) {
        if self.tentee {
            debug!("chargement du moteur déjà tenté, appel ignoré");
            return;
        }
        self.tentee = true;

        match fabrique {
            Some(f) => {
                info!("chargement du moteur...");
                self.etat = EtatMoteur::Chargement(f());
                self.sonder();
            }
            None => warn!("aucun chargeur de moteur exposé par l’hôte : mode dégradé"),
        }
    }

    /// Fait progresser le chargement sans bloquer.
    pub fn sonder(&mut self) {
        let EtatMoteur::Chargement(rx) = &self.etat else {
            return;
        };

        match rx.try_recv() {
            Ok(moteur) => {
                info!("moteur prêt");
                self.etat = EtatMoteur::Pret(moteur);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                warn!("le chargeur s’est arrêté sans livrer de moteur : mode dégradé");
                self.etat = EtatMoteur::Absent;
            }
        }
    }

    pub fn est_pret(&self) -> bool {
        matches!(self.etat, EtatMoteur::Pret(_))
    }

    pub fn en_chargement(&self) -> bool {
        matches!(self.etat, EtatMoteur::Chargement(_))
    }

    /// Réponse brute du moteur, non modifiée.
    pub fn invoquer(&self, equation: &str) -> Result<String, ErreurSolveur> {
        match &self.etat {
            EtatMoteur::Pret(m) => Ok(m.resoudre(equation)),
            _ => Err(ErreurSolveur::MoteurIndisponible),
        }
    }
}

/* ------------------------ Moteur intégré (noyau) ------------------------ */

pub struct MoteurIntegre;

impl Moteur for MoteurIntegre {
    fn resoudre(&self, equation: &str) -> String {
        crate::noyau::repondre_json(equation)
    }
}

/// Fabrique du moteur intégré : livraison asynchrone, comme un module chargé à part.
pub fn fabrique_integree() -> Fabrique {
    Box::new(|| {
        let (tx, rx) = mpsc::channel::<MoteurBoite>();
        livrer(move || {
            // récepteur parti = application fermée entre-temps
            let _ = tx.send(Box::new(MoteurIntegre));
        });
        rx
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn livrer(f: impl FnOnce() + Send + 'static) {
    std::thread::spawn(f);
}

#[cfg(target_arch = "wasm32")]
fn livrer(f: impl FnOnce() + Send + 'static) {
    wasm_bindgen_futures::spawn_local(async move { f() });
}
