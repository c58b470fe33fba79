// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir un membre d’équation (suite de Tok, sans '=') en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Var(c) => inconnue (Expr::Inconnue)
// - '^' associatif à gauche : 2^3^2 == (2^3)^2
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, on injecte 0 : "-x" => "0 x -"
// - Profondeur bornée (PROFONDEUR_MAX) : refus AVANT toute récursion sur l’arbre
//   (évaluation, JSON, affichage, libération)

use super::expr::{Expr, Op};
use super::jetons::{tok_zero, Tok};

/// Profondeur maximale d’un membre (nœuds de la racine à la feuille la plus basse).
///
/// L’arbre JSON d’une équation coûte 2 niveaux par nœud interne : 2 * 48 + 2 reste
/// sous la limite de récursion de serde_json côté client (128).
pub const PROFONDEUR_MAX: usize = 48;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Star, LPar, Var(x), Plus, Num(5), RPar]
///   rpn:    [Num(2), Var(x), Num(5), Plus, Star]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(..) | Tok::Var(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '(' ; pile vide avant => ')' orpheline
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err("parenthèses déséquilibrées".into());
                }
                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                // moins unaire : 0 injecté, et on ne dépile rien (il lie son seul opérande)
                let unaire = matches!(tok, Tok::Minus) && !prev_was_value;
                if unaire {
                    out.push(tok_zero());
                }

                while let Some(top) = ops.last() {
                    if unaire {
                        break;
                    }
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    if precedence(top) >= precedence(&tok) {
                        if let Some(op) = ops.pop() {
                            out.push(op);
                        }
                    } else {
                        break;
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Egal => return Err("signe '=' inattendu dans un membre".into()),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses déséquilibrées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// Chaque entrée de pile garde sa profondeur : un membre trop profond est refusé
/// dès que le seuil est franchi.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(valeur, texte) => st.push((Expr::Nombre { valeur, texte }, 1)),
            Tok::Var(c) => st.push((Expr::Inconnue(c), 1)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or("erreur de syntaxe : opérande manquant")?;
                let (a, pa) = st.pop().ok_or("erreur de syntaxe : opérande manquant")?;

                let profondeur = 1 + pa.max(pb);
                if profondeur > PROFONDEUR_MAX {
                    return Err(format!(
                        "expression trop profonde (max {PROFONDEUR_MAX} niveaux)"
                    ));
                }

                let op = match tok {
                    Tok::Plus => Op::Plus,
                    Tok::Minus => Op::Moins,
                    Tok::Star => Op::Fois,
                    Tok::Slash => Op::Div,
                    _ => Op::Puiss,
                };
                st.push((Expr::Binaire(op, Box::new(a), Box::new(b)), profondeur));
            }

            Tok::LPar | Tok::RPar | Tok::Egal => {
                return Err("jeton inattendu en RPN".into());
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        (None, _) => Err("membre vide".into()),
        (Some(_), false) => Err("erreur de syntaxe : opérateur manquant".into()),
    }
}
