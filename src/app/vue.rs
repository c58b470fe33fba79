// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppArbre (etat.rs) pour natif + wasm
// - Clavier : Enter résout (quand le champ est focus), Escape efface (app.rs)
// - Résultat / erreur / arbre lus depuis l’issue courante, jamais stockés ici
// - Arbre : zoom molette/pincement + déplacement au glisser
//
// Note :
// - La vue ne parse rien : elle transmet le texte tel quel à etat.rs

use eframe::egui;

use crate::moteur::{Issue, NatureEchec};

use super::dessin::{disposer, Dessin};
use super::disposition::{AdaptateurDisposition, Geometrie, Orientation, Origine, StyleLien};
use super::etat::AppArbre;
use super::noeud::visuel_noeud;

/// Hauteur minimale de la zone de l’arbre (px).
const HAUTEUR_MIN_ARBRE: f32 = 320.0;

/// Place réservée aux boutons à droite du champ.
const LARGEUR_BOUTONS: f32 = 200.0;

/// Sensibilité de la molette pour le zoom.
const ZOOM_PAR_PIXEL: f32 = 0.002;

const COULEUR_LIEN: egui::Color32 = egui::Color32::from_rgb(0x94, 0xa3, 0xb8);

impl AppArbre {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.heading("Arbre d’équation");
        ui.add_space(6.0);

        self.ui_entree(ui);
        self.ui_etat_moteur(ui);

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        self.ui_issue(ui);

        ui.add_space(8.0);

        self.ui_arbre(ui);
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Équation :");

        ui.horizontal(|ui| {
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.entree)
                    .desired_width((ui.available_width() - LARGEUR_BOUTONS).max(120.0))
                    .hint_text("Ex: 2 * (x + 5) = 20")
                    .id_salt("entree_equation")
                    .code_editor(),
            );

            if self.focus_entree {
                resp.request_focus();
                self.focus_entree = false;
            }

            // Enter : seulement si le champ avait le focus (TextEdit le perd sur Enter)
            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            if resp.lost_focus() && enter {
                self.soumettre_entree();
            }

            let pret = self.moteur.est_pret();
            let resoudre = ui
                .add_enabled(pret, egui::Button::new("Résoudre").min_size(egui::vec2(64.0, 30.0)))
                .on_disabled_hover_text("Moteur pas encore disponible");
            if resoudre.clicked() {
                self.soumettre_entree();
            }

            // Contrat: C = entrée seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
        });
    }

    fn ui_etat_moteur(&self, ui: &mut egui::Ui) {
        if self.moteur.en_chargement() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Chargement du moteur…");
            });
        } else if !self.moteur.est_pret() {
            ui.weak("Moteur indisponible : la résolution est désactivée.");
        }
    }

    fn ui_issue(&self, ui: &mut egui::Ui) {
        let resultat = self.resultat_affiche();
        if !resultat.is_empty() {
            ui.horizontal(|ui| {
                ui.strong("Résultat :");
                ui.monospace(resultat);
            });
        }

        let erreur = self.erreur_affichee();
        if !erreur.is_empty() {
            let couleur = match self.issue() {
                Issue::Echec { nature: NatureEchec::ReponseInattendue, .. } => {
                    ui.visuals().warn_fg_color
                }
                _ => ui.visuals().error_fg_color,
            };
            ui.colored_label(couleur, erreur);
        }
    }

    fn ui_arbre(&mut self, ui: &mut egui::Ui) {
        let generation = self.generation();
        let (Some(arbre), disposition) = self.arbre_et_disposition() else {
            return;
        };

        Self::ui_options_arbre(ui, disposition);

        let taille = egui::vec2(
            ui.available_width(),
            ui.available_height().max(HAUTEUR_MIN_ARBRE),
        );
        let (resp, painter) = ui.allocate_painter(taille, egui::Sense::click_and_drag());
        let cadre = resp.rect;

        painter.rect_filled(cadre, 4.0, ui.visuals().extreme_bg_color);

        let geometrie = Geometrie {
            largeur: cadre.width(),
            hauteur: cadre.height(),
        };
        disposition.actualiser(Some(geometrie), generation);

        // --- interactions (zoom + déplacement) ---
        if resp.hovered() {
            let (pincement, molette) = ui.input(|i| (i.zoom_delta(), i.smooth_scroll_delta.y));
            let facteur = pincement * (molette * ZOOM_PAR_PIXEL).exp();
            if facteur != 1.0 {
                disposition.zoomer(facteur);
            }
        }
        if resp.dragged() {
            let d = resp.drag_delta();
            disposition.deplacer(d.x, d.y);
        }
        if resp.double_clicked() {
            disposition.recentrer();
        }

        // --- dessin ---
        let locale = disposition.origine_effective();
        let origine = Origine {
            x: cadre.min.x + locale.x,
            y: cadre.min.y + locale.y,
        };
        let zoom = disposition.zoom();
        let dessin = disposer(arbre, &disposition.parametres, origine, zoom);

        Self::peindre(&painter, &dessin, zoom);
    }

    /// Sens de l’arbre + forme des liens.
    fn ui_options_arbre(ui: &mut egui::Ui, disposition: &mut AdaptateurDisposition) {
        let p = &mut disposition.parametres;
        ui.horizontal(|ui| {
            ui.label("Sens :");
            ui.selectable_value(&mut p.orientation, Orientation::Verticale, "Vertical");
            ui.selectable_value(&mut p.orientation, Orientation::Horizontale, "Horizontal");

            ui.separator();

            ui.label("Liens :");
            ui.selectable_value(&mut p.style_lien, StyleLien::Marche, "En marche");
            ui.selectable_value(&mut p.style_lien, StyleLien::Droit, "Droits");

            ui.separator();
            ui.weak("molette : zoom · glisser : déplacer · double-clic : recentrer");
        });
    }

    fn peindre(painter: &egui::Painter, dessin: &Dessin<'_>, zoom: f32) {
        let trait_lien = egui::Stroke::new(1.5, COULEUR_LIEN);
        for lien in &dessin.liens {
            for segment in lien.points.windows(2) {
                painter.line_segment([segment[0], segment[1]], trait_lien);
            }
        }

        // nœuds après les liens : les boîtes recouvrent les extrémités
        for place in &dessin.noeuds {
            let v = visuel_noeud(place.noeud);
            let boite =
                egui::Rect::from_center_size(place.centre, egui::vec2(v.largeur, v.hauteur) * zoom);
            let arrondi = (f32::from(v.arrondi) * zoom).round() as u8;

            painter.rect(
                boite,
                arrondi,
                v.fond,
                egui::Stroke::new(v.epaisseur_bord * zoom, v.bord),
                egui::StrokeKind::Inside,
            );
            painter.text(
                place.centre,
                egui::Align2::CENTER_CENTER,
                &v.libelle,
                egui::FontId::proportional(v.taille_texte * zoom),
                v.couleur_texte,
            );
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
            }
            self.focus_entree = true;
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
}
