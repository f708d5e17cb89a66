//! Noyau de la calculatrice (f64)
//!
//! Organisation interne :
//! - erreurs.rs    : erreurs de syntaxe (indices), d’analyse, d’évaluation
//! - jetons.rs     : tokenisation + contrôle de syntaxe
//! - rpn.rs        : shunting-yard + construction de l’arbre
//! - arbre.rs      : Jeton / Noeud
//! - primitives.rs : opérations arithmétiques
//! - eval.rs       : pipeline complet + interprétation
//! - format.rs     : affichage résultat / arbre
//! - stats.rs      : écart type d’échantillon

pub mod arbre;
pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod primitives;
pub mod rpn;
pub mod stats;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use arbre::{Jeton, Noeud};
pub use erreurs::{ErreurAnalyse, ErreurCalcul, ErreurEval, ErreurSyntaxe};
pub use eval::{eval_expression, evaluate, interpret, parse, Demarche};
