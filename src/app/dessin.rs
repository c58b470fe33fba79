//! src/app/dessin.rs
//!
//! Placement des nœuds et tracé des liens (sans egui::Painter : testable).
//!
//! Principe :
//! - feuilles posées de gauche à droite, écart = taille du nœud × séparation
//!   (frères si même parent, cousins sinon)
//! - taille du nœud élargie à la plus grande boîte (longs littéraux)
//! - parent centré entre son premier et son dernier enfant
//! - profondeur × taille du nœud dans l’autre axe
//! - racine posée sur l’origine, puis zoom autour de l’origine
//!
//! Parcours itératif : un arbre très profond ne doit pas faire déborder la pile.

use eframe::egui::{pos2, Pos2};

use crate::moteur::NoeudAst;

use super::disposition::{Orientation, Origine, ParametresArbre, StyleLien};
use super::noeud::visuel_noeud;

/// Espace minimal entre deux niveaux, en plus de la boîte (place du lien).
const MARGE_NIVEAU: f32 = 40.0;

#[derive(Clone, Debug)]
pub struct NoeudPlace<'a> {
    pub noeud: &'a NoeudAst,
    pub centre: Pos2,
    #[cfg(test)]
    pub profondeur: usize,
}

/// Polyligne parent -> enfant (coordonnées écran).
#[derive(Clone, Debug, PartialEq)]
pub struct Lien {
    pub points: Vec<Pos2>,
}

#[derive(Clone, Debug, Default)]
pub struct Dessin<'a> {
    pub noeuds: Vec<NoeudPlace<'a>>,
    pub liens: Vec<Lien>,
}

struct Entree<'a> {
    noeud: &'a NoeudAst,
    parent: Option<usize>,
    profondeur: usize,
    enfants: Vec<usize>,
    travers: f32,
}

/// Dispose tout l’arbre ; la racine tombe exactement sur `origine`.
pub fn disposer<'a>(
    arbre: &'a NoeudAst,
    parametres: &ParametresArbre,
    origine: Origine,
    zoom: f32,
) -> Dessin<'a> {
    let mut entrees = aplatir(arbre);

    let (pas_x, pas_y) = pas_effectifs(&entrees, parametres);

    // 1) feuilles : ordre préfixe = ordre gauche -> droite
    let mut curseur: Option<(f32, Option<usize>)> = None;
    for e in entrees.iter_mut().filter(|e| e.enfants.is_empty()) {
        e.travers = match curseur {
            None => 0.0,
            Some((pos, parent_prec)) => {
                let facteur = if parent_prec.is_some() && parent_prec == e.parent {
                    parametres.separation_freres
                } else {
                    parametres.separation_cousins
                };
                pos + pas_x * facteur
            }
        };
        curseur = Some((e.travers, e.parent));
    }

    // 2) parents : ordre préfixe inverse => enfants déjà placés
    for i in (0..entrees.len()).rev() {
        if let (Some(&premier), Some(&dernier)) =
            (entrees[i].enfants.first(), entrees[i].enfants.last())
        {
            entrees[i].travers = (entrees[premier].travers + entrees[dernier].travers) / 2.0;
        }
    }

    // 3) coordonnées écran
    let decalage = entrees.first().map_or(0.0, |racine| racine.travers);
    let vers_ecran = |travers: f32, profondeur: usize| -> Pos2 {
        let t = (travers - decalage) * zoom;
        let p = profondeur as f32 * pas_y * zoom;
        match parametres.orientation {
            Orientation::Verticale => pos2(origine.x + t, origine.y + p),
            Orientation::Horizontale => pos2(origine.x + p, origine.y + t),
        }
    };

    let noeuds: Vec<NoeudPlace<'a>> = entrees
        .iter()
        .map(|e| NoeudPlace {
            noeud: e.noeud,
            centre: vers_ecran(e.travers, e.profondeur),
            #[cfg(test)]
            profondeur: e.profondeur,
        })
        .collect();

    let liens = entrees
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.parent.map(|p| (p, i)))
        .map(|(p, i)| tracer_lien(noeuds[p].centre, noeuds[i].centre, parametres))
        .collect();

    Dessin { noeuds, liens }
}

/// Pas (travers, profondeur) : au moins `taille_noeud`, jamais moins que la plus
/// grande boîte dans chaque axe.
fn pas_effectifs(entrees: &[Entree<'_>], parametres: &ParametresArbre) -> (f32, f32) {
    let (largeur_max, hauteur_max) = entrees
        .iter()
        .map(|e| visuel_noeud(e.noeud))
        .fold((0.0f32, 0.0f32), |(l, h), v| (l.max(v.largeur), h.max(v.hauteur)));

    let (travers, profondeur) = match parametres.orientation {
        Orientation::Verticale => (largeur_max, hauteur_max),
        Orientation::Horizontale => (hauteur_max, largeur_max),
    };

    let (pas_x, pas_y) = parametres.taille_noeud;
    (pas_x.max(travers), pas_y.max(profondeur + MARGE_NIVEAU))
}

/// Parcours préfixe itératif (racine en 0).
fn aplatir(arbre: &NoeudAst) -> Vec<Entree<'_>> {
    let mut entrees: Vec<Entree<'_>> = Vec::new();
    let mut pile: Vec<(&NoeudAst, Option<usize>, usize)> = vec![(arbre, None, 0)];

    while let Some((noeud, parent, profondeur)) = pile.pop() {
        let i = entrees.len();
        if let Some(p) = parent {
            entrees[p].enfants.push(i);
        }
        entrees.push(Entree {
            noeud,
            parent,
            profondeur,
            enfants: Vec::new(),
            travers: 0.0,
        });

        // enfants empilés à l’envers : le premier sort en premier
        for enfant in noeud.enfants.iter().rev() {
            pile.push((enfant, Some(i), profondeur + 1));
        }
    }

    entrees
}

fn tracer_lien(source: Pos2, cible: Pos2, parametres: &ParametresArbre) -> Lien {
    let points = match (parametres.style_lien, parametres.orientation) {
        (StyleLien::Droit, _) => vec![source, cible],
        (StyleLien::Marche, Orientation::Verticale) => {
            let mi = (source.y + cible.y) / 2.0;
            vec![source, pos2(source.x, mi), pos2(cible.x, mi), cible]
        }
        (StyleLien::Marche, Orientation::Horizontale) => {
            let mi = (source.x + cible.x) / 2.0;
            vec![source, pos2(mi, source.y), pos2(mi, cible.y), cible]
        }
    };
    Lien { points }
}
