// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    // valeur exacte + littéral normalisé (sert d’étiquette dans l’arbre)
    Num(BigRational, String),

    // Inconnue : une seule lettre (x, y, t...)
    Var(char),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Egal,  // =

    LPar,
    RPar,
}

/// Tokenize une équation en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 2.5, .5)
/// - inconnue : une lettre ASCII (x, y...) ; les lettres collées sont des jetons distincts
/// - opérateurs + - * / ^ =
/// - parenthèses ( )
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '=' => Some(Tok::Egal),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            out.push(Tok::Var(c.to_ascii_lowercase()));
            i += 1;
            continue;
        }

        // Nombre décimal : chiffres [ '.' chiffres ]
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let brut: String = chars[start..i].iter().collect();
            let (valeur, texte) = lire_decimal(&brut)?;
            out.push(Tok::Num(valeur, texte));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// "2.50" -> (5/2, "2.5") ; "007" -> (7, "7")
fn lire_decimal(brut: &str) -> Result<(BigRational, String), String> {
    let mut morceaux = brut.splitn(2, '.');
    let ent = morceaux.next().unwrap_or("");
    let frac = morceaux.next();

    if let Some(f) = frac {
        if f.contains('.') {
            return Err(format!("nombre invalide: '{brut}'"));
        }
    }
    if ent.is_empty() && frac.is_none_or(str::is_empty) {
        return Err(format!("nombre invalide: '{brut}'"));
    }

    let ent = if ent.is_empty() { "0" } else { ent };
    let n = BigInt::parse_bytes(ent.as_bytes(), 10).ok_or("nombre invalide")?;

    // partie fractionnaire : zéros finaux retirés (2.50 == 2.5)
    let frac = frac.unwrap_or("").trim_end_matches('0');
    let valeur = if frac.is_empty() {
        BigRational::from_integer(n.clone())
    } else {
        let f = BigInt::parse_bytes(frac.as_bytes(), 10).ok_or("nombre invalide")?;
        let echelle = BigInt::from(10).pow(frac.len() as u32);
        BigRational::new(n.clone() * &echelle + f, echelle)
    };

    let ent_txt = n.to_string();
    let texte = if frac.is_empty() {
        ent_txt
    } else {
        format!("{ent_txt}.{frac}")
    };

    Ok((valeur, texte))
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(_, texte) => texte.clone(),
            Tok::Var(c) => c.to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Egal => "=".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

/// Zéro exact (moins unaire injecté par la RPN).
pub(crate) fn tok_zero() -> Tok {
    Tok::Num(BigRational::zero(), "0".to_string())
}
