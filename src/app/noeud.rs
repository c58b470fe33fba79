//! src/app/noeud.rs
//!
//! Apparence d’un nœud : une étiquette dans une boîte arrondie.
//! Pur : ne lit que le nœud, jamais l’état de résolution.

use eframe::egui::Color32;

use crate::moteur::NoeudAst;

/// Boîte de base (px) : 60 x 40, coins arrondis 8.
const LARGEUR_MIN: f32 = 60.0;
const HAUTEUR: f32 = 40.0;
const ARRONDI: u8 = 8;

/// Largeur approximative d’un caractère à 16 px + marge intérieure.
const LARGEUR_CAR: f32 = 10.0;
const MARGE_INTERIEURE: f32 = 20.0;

const TAILLE_TEXTE: f32 = 16.0;

const FOND: Color32 = Color32::WHITE;
const BORD: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const TEXTE: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
const EPAISSEUR_BORD: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct VisuelNoeud {
    pub libelle: String,
    pub largeur: f32,
    pub hauteur: f32,
    pub arrondi: u8,
    pub fond: Color32,
    pub bord: Color32,
    pub epaisseur_bord: f32,
    pub couleur_texte: Color32,
    pub taille_texte: f32,
}

/// Nœud -> visuel. Les longues étiquettes élargissent la boîte.
pub fn visuel_noeud(noeud: &NoeudAst) -> VisuelNoeud {
    let n = noeud.nom.chars().count() as f32;
    let largeur = (n * LARGEUR_CAR + MARGE_INTERIEURE).max(LARGEUR_MIN);

    VisuelNoeud {
        libelle: noeud.nom.clone(),
        largeur,
        hauteur: HAUTEUR,
        arrondi: ARRONDI,
        fond: FOND,
        bord: BORD,
        epaisseur_bord: EPAISSEUR_BORD,
        couleur_texte: TEXTE,
        taille_texte: TAILLE_TEXTE,
    }
}
