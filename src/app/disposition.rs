//! src/app/disposition.rs
//!
//! Disposition adaptative de l’arbre : où poser la racine dans un conteneur
//! dont la taille n’est connue qu’au moment du dessin.
//!
//! Règles :
//! - x = moitié de la largeur mesurée (centrage indépendant de la forme de l’arbre)
//! - y = marge fixe en haut (l’arbre pousse vers le bas)
//! - géométrie absente ou inutilisable (largeur <= 0, valeur non finie) => origine de repli
//! - recalcul à chaque redimensionnement ET à chaque nouvel arbre

use tracing::trace;

/// Marge haute de la racine (px).
pub const MARGE_HAUT: f32 = 50.0;

/// Origine de repli tant que le conteneur n’est pas mesurable.
pub const ORIGINE_REPLI: Origine = Origine { x: 480.0, y: 50.0 };

/// Taille mesurée de la surface de dessin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometrie {
    pub largeur: f32,
    pub hauteur: f32,
}

/// Point d’ancrage de la racine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origine {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Racine en haut, enfants dessous.
    Verticale,
    /// Racine à gauche, enfants à droite.
    Horizontale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleLien {
    /// Coudes à angle droit (parent -> mi-hauteur -> colonne de l’enfant -> enfant).
    Marche,
    /// Segment direct.
    Droit,
}

/// Paramètres passés au dessin de l’arbre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParametresArbre {
    pub orientation: Orientation,
    pub style_lien: StyleLien,
    /// Espace réservé à un nœud (largeur, profondeur), avant séparation.
    pub taille_noeud: (f32, f32),
    /// Facteur d’écart entre deux feuilles voisines de même parent.
    pub separation_freres: f32,
    /// Facteur d’écart entre deux feuilles voisines de parents différents.
    pub separation_cousins: f32,
    pub zoom_actif: bool,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_initial: f32,
}

impl Default for ParametresArbre {
    fn default() -> Self {
        Self {
            orientation: Orientation::Verticale,
            style_lien: StyleLien::Marche,
            taille_noeud: (140.0, 140.0),
            separation_freres: 1.5,
            separation_cousins: 2.0,
            zoom_actif: true,
            zoom_min: 0.1,
            zoom_max: 1.0,
            zoom_initial: 1.0,
        }
    }
}

/// Origine pour une géométrie donnée (fonction pure).
pub fn calculer_origine(geometrie: Option<Geometrie>) -> Origine {
    match geometrie {
        Some(g) if g.largeur.is_finite() && g.largeur > 0.0 && g.hauteur.is_finite() => Origine {
            x: g.largeur / 2.0,
            y: MARGE_HAUT,
        },
        _ => ORIGINE_REPLI,
    }
}

/// Suit la géométrie et l’arbre courant ; garde zoom + déplacement de l’utilisateur.
#[derive(Clone, Debug)]
pub struct AdaptateurDisposition {
    pub parametres: ParametresArbre,
    derniere: Option<(Option<Geometrie>, u64)>,
    origine: Origine,
    zoom: f32,
    decalage: (f32, f32),
}

impl Default for AdaptateurDisposition {
    fn default() -> Self {
        Self::new(ParametresArbre::default())
    }
}

impl AdaptateurDisposition {
    pub fn new(parametres: ParametresArbre) -> Self {
        Self {
            parametres,
            derniere: None,
            origine: ORIGINE_REPLI,
            zoom: parametres.zoom_initial,
            decalage: (0.0, 0.0),
        }
    }

    /// Recalcule si la géométrie ou l’arbre (génération) a changé.
    /// Un nouvel arbre remet zoom et déplacement à leur valeur initiale.
    pub fn actualiser(&mut self, geometrie: Option<Geometrie>, generation: u64) -> Origine {
        let cle = (geometrie, generation);
        if self.derniere == Some(cle) {
            return self.origine;
        }

        let arbre_change = self.derniere.is_none_or(|(_, g)| g != generation);
        if arbre_change {
            self.recentrer();
        }

        self.origine = calculer_origine(geometrie);
        self.derniere = Some(cle);
        trace!(x = self.origine.x, y = self.origine.y, generation, "origine recalculée");
        self.origine
    }

    #[cfg(test)]
    pub fn origine(&self) -> Origine {
        self.origine
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[cfg(test)]
    pub fn decalage(&self) -> (f32, f32) {
        self.decalage
    }

    /// Multiplie le zoom (molette / pincement), borné ; sans effet si désactivé.
    pub fn zoomer(&mut self, facteur: f32) {
        if !self.parametres.zoom_actif || !facteur.is_finite() || facteur <= 0.0 {
            return;
        }
        self.zoom = (self.zoom * facteur).clamp(self.parametres.zoom_min, self.parametres.zoom_max);
    }

    /// Glisser-déposer du fond.
    pub fn deplacer(&mut self, dx: f32, dy: f32) {
        self.decalage.0 += dx;
        self.decalage.1 += dy;
    }

    /// Retour à la vue d’origine (double-clic).
    pub fn recentrer(&mut self) {
        self.zoom = self.parametres.zoom_initial;
        self.decalage = (0.0, 0.0);
    }

    /// Origine effective (origine calculée + déplacement utilisateur).
    pub fn origine_effective(&self) -> Origine {
        Origine {
            x: self.origine.x + self.decalage.0,
            y: self.origine.y + self.decalage.1,
        }
    }
}
