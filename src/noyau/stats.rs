// src/noyau/stats.rs
//
// Écart type d’échantillon, construit uniquement sur les primitives du noyau
// (c’est aussi le banc d’essai du binaire `ecart_type`).
//
//   s = √( (Σx² − n·x̄²) / (n − 1) )

use super::erreurs::ErreurEval;
use super::primitives::{add, divide, multiply, root, subtract};

/// Écart type d’échantillon (diviseur n − 1).
///
/// Moins de deux valeurs => `DivideByZero` (n − 1 = 0).
pub fn ecart_type(valeurs: &[f64]) -> Result<f64, ErreurEval> {
    if valeurs.len() < 2 {
        return Err(ErreurEval::DivideByZero);
    }
    let n = valeurs.len() as f64;

    let (somme, somme_carres) = valeurs.iter().fold((0.0, 0.0), |(s, s2), &x| {
        (add(s, x), add(s2, multiply(x, x)))
    });

    let moyenne = divide(somme, n)?;
    let ecarts = subtract(somme_carres, multiply(n, multiply(moyenne, moyenne)));

    // l’annulation numérique peut rendre la variance très légèrement négative
    let variance = divide(ecarts, subtract(n, 1.0))?.max(0.0);
    tracing::trace!(n = valeurs.len(), moyenne, variance, "écart type");

    root(variance, 2.0)
}
