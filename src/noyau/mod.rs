//! Moteur de résolution intégré
//!
//! Organisation interne :
//! - jetons.rs     : tokenisation (nombres décimaux, inconnue, opérateurs, '=')
//! - rpn.rs        : shunting-yard + construction Expr (un membre)
//! - expr.rs       : AST d’un membre + export JSON {"name", "children"}
//! - poly.rs       : polynômes à coefficients rationnels exacts
//! - lecture.rs    : lecture des racines (exacte ou décimale tronquée)
//! - resolution.rs : pipeline complet + réponse JSON

pub mod expr;
pub mod jetons;
pub mod lecture;
pub mod poly;
pub mod resolution;
pub mod rpn;

#[cfg(test)]
mod tests_resolution;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use resolution::{repondre_json, resoudre_equation};
