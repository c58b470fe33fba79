// src/app.rs
//
// Arbre d’équation — module App (racine)
// --------------------------------------
//
// Rôle:
// - Déclarer les sous-modules (état, disposition, nœuds, dessin, vue)
// - Ré-exporter AppArbre (pour main.rs: use crate::app::AppArbre;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter est géré dans vue.rs (quand le champ a le focus).
// - Le moteur est sondé ici, une fois par frame, sans jamais bloquer.

pub mod dessin;
pub mod disposition;
pub mod etat;
pub mod noeud;
pub mod vue;


pub use etat::AppArbre;

use std::time::Duration;

use eframe::egui;

/// Cadence de sondage tant que le moteur se charge.
const SONDAGE_CHARGEMENT: Duration = Duration::from_millis(50);

impl eframe::App for AppArbre {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement l’entrée (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entree();
        }

        self.moteur.sonder();
        if self.moteur.en_chargement() {
            // egui ne redessine que sur événement : on force la prochaine frame
            ctx.request_repaint_after(SONDAGE_CHARGEMENT);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
