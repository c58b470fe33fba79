// src/noyau/poly.rs
//
// Polynôme à une inconnue, coefficients rationnels exacts.
// - termes : degré -> coefficient (jamais de coefficient nul après nettoyer())
// - pas de flottants : les racines approchées sont calculées plus tard (lecture.rs)

use std::collections::BTreeMap;

use num_rational::BigRational;
use num_traits::{One, Zero};

/// Garde-fou : degré maximal accepté (anti-explosion sur x^64^64).
pub const DEGRE_MAX: u32 = 64;

/// Garde-fou : taille maximale d’un numérateur / dénominateur (2^64^64^64 = x).
pub const BITS_MAX: u64 = 4096;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Poly {
    pub termes: BTreeMap<u32, BigRational>,
}

impl Poly {
    /// Refuse un polynôme dont un coefficient dépasse `BITS_MAX` bits.
    pub fn borner(self) -> Result<Poly, String> {
        let trop_grand = self
            .termes
            .values()
            .any(|c| c.numer().bits() > BITS_MAX || c.denom().bits() > BITS_MAX);
        if trop_grand {
            return Err(format!("nombres trop grands (max {BITS_MAX} bits)"));
        }
        Ok(self)
    }

    pub fn constante(c: BigRational) -> Poly {
        let mut p = Poly::default();
        p.termes.insert(0, c);
        p.nettoyer();
        p
    }

    /// x
    pub fn inconnue() -> Poly {
        let mut p = Poly::default();
        p.termes.insert(1, BigRational::one());
        p
    }

    /// Retire les coefficients nuls.
    pub fn nettoyer(&mut self) {
        self.termes.retain(|_, c| !c.is_zero());
    }

    pub fn est_nul(&self) -> bool {
        self.termes.is_empty()
    }

    /// Degré (0 pour le polynôme nul).
    pub fn degre(&self) -> u32 {
        self.termes.keys().next_back().copied().unwrap_or(0)
    }

    pub fn coeff(&self, degre: u32) -> BigRational {
        self.termes.get(&degre).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Valeur si le polynôme est constant (nul compris).
    pub fn comme_constante(&self) -> Option<BigRational> {
        if self.degre() == 0 {
            Some(self.coeff(0))
        } else {
            None
        }
    }

    pub fn plus(&self, autre: &Poly) -> Poly {
        let mut r = self.clone();
        for (d, c) in &autre.termes {
            *r.termes.entry(*d).or_insert_with(BigRational::zero) += c;
        }
        r.nettoyer();
        r
    }

    pub fn moins(&self, autre: &Poly) -> Poly {
        let mut r = self.clone();
        for (d, c) in &autre.termes {
            *r.termes.entry(*d).or_insert_with(BigRational::zero) -= c;
        }
        r.nettoyer();
        r
    }

    pub fn fois(&self, autre: &Poly) -> Result<Poly, String> {
        if !self.est_nul() && !autre.est_nul() && self.degre() + autre.degre() > DEGRE_MAX {
            return Err(format!("degré trop élevé (max {DEGRE_MAX})"));
        }

        let mut r = Poly::default();
        for (da, ca) in &self.termes {
            for (db, cb) in &autre.termes {
                *r.termes.entry(da + db).or_insert_with(BigRational::zero) += ca * cb;
            }
        }
        r.nettoyer();
        r.borner()
    }

    /// Division par un polynôme constant non nul seulement.
    pub fn divise(&self, autre: &Poly) -> Result<Poly, String> {
        let d = autre
            .comme_constante()
            .ok_or("division par une expression contenant l’inconnue non supportée")?;
        if d.is_zero() {
            return Err("division par zéro".into());
        }

        let mut r = self.clone();
        for c in r.termes.values_mut() {
            *c /= d.clone();
        }
        r.borner()
    }

    /// Puissance entière (exposant constant, entier, >= 0).
    pub fn puissance(&self, exposant: &Poly) -> Result<Poly, String> {
        let e = exposant
            .comme_constante()
            .ok_or("l’exposant doit être un nombre constant")?;
        if !e.denom().is_one() || e < BigRational::zero() {
            return Err("l’exposant doit être un entier positif".into());
        }
        let n = e
            .numer()
            .to_string()
            .parse::<u32>()
            .ok()
            .filter(|n| *n <= DEGRE_MAX)
            .ok_or_else(|| format!("exposant trop grand (max {DEGRE_MAX})"))?;

        let mut acc = Poly::constante(BigRational::one());
        for _ in 0..n {
            acc = acc.fois(self)?;
        }
        Ok(acc)
    }
}
