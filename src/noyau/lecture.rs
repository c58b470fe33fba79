// src/noyau/lecture.rs
//
// Lecture des racines : texte exact (p/q) ou décimal tronqué.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Chiffres après la virgule pour les lectures approchées (comme std::to_string(double)).
pub const DIGITS_LECTURE: usize = 6;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” = trunc(r * 10^digits)
pub fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    let scale = pow10(digits);
    (r.numer() * scale) / r.denom()
}

/* ------------------------ √ (exacte ou approchée) ------------------------ */

/// sqrt(r) en entier scalé : floor( sqrt(r) * 10^digits ), r >= 0
pub fn rational_sqrt_scaled(r: &BigRational, digits: usize) -> BigInt {
    let n = r.numer().clone();
    let d = r.denom().clone();

    if n.is_zero() || n.is_negative() {
        return BigInt::zero();
    }

    // On veut y ≈ sqrt(n/d) * 10^digits
    // => y^2 ≈ (n * 10^(2*digits)) / d
    let target = n * pow10(2 * digits);

    let mut y = pow10(digits);
    if y.is_zero() {
        y = BigInt::one();
    }

    // Newton sur y pour sqrt(target/d)
    loop {
        let denom = &d * &y;
        if denom.is_zero() {
            break;
        }

        let q = &target / denom;
        let y_next = (&y + q) >> 1;

        if y_next == y || y_next == (&y - 1u32) {
            // ajustement final (floor)
            let mut y_adj = y_next;

            while (&y_adj + 1u32) * (&y_adj + 1u32) * &d <= target {
                y_adj += 1u32;
            }
            while &y_adj * &y_adj * &d > target {
                y_adj -= 1u32;
            }
            return y_adj;
        }

        y = y_next;
    }

    y
}

/// √r exacte si r est le carré d’un rationnel.
pub fn rational_sqrt_exact(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let sn = int_sqrt_exact(r.numer())?;
    let sd = int_sqrt_exact(r.denom())?;
    Some(BigRational::new(sn, sd))
}

fn int_sqrt_exact(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    let s = x.sqrt();
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}

/* ------------------------ Texte ------------------------ */

/// 5 -> "5" ; 7/3 -> "7/3"
pub fn format_rat(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

/// Lecture d’une racine exacte : "5", "5/2 (≈ 2.500000)".
pub fn lecture_exacte(r: &BigRational) -> String {
    if r.denom().is_one() {
        return format_rat(r);
    }
    let approx = scaled_to_decimal(rational_scaled(r, DIGITS_LECTURE), DIGITS_LECTURE);
    format!("{} (≈ {approx})", format_rat(r))
}

/// Lecture d’une valeur approchée : "≈ 1.414213".
pub fn lecture_approchee(r: &BigRational) -> String {
    let txt = scaled_to_decimal(rational_scaled(r, DIGITS_LECTURE), DIGITS_LECTURE);
    format!("≈ {txt}")
}
