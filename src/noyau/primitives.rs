// src/noyau/primitives.rs
//
// Primitives arithmétiques (feuilles de l’évaluation).
// Fonctions pures sur f64, échecs explicites via ErreurEval.
//
// Troncatures flottant -> entier : num_traits::ToPrimitive
// (NaN / hors plage => None => erreur nommée, jamais de saturation silencieuse).

use num_traits::ToPrimitive;

use super::erreurs::{court, ErreurEval};

/// Écart maximal entre deux itérés de Newton pour considérer la racine trouvée.
pub const EPSILON_NEWTON: f64 = 1e-10;

/// Garde-fou anti-gel : au-delà, la racine est déclarée non convergente.
pub const ITERATIONS_MAX_NEWTON: usize = 100_000;

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

pub fn divide(a: f64, b: f64) -> Result<f64, ErreurEval> {
    if b == 0.0 {
        return Err(ErreurEval::DivideByZero);
    }
    Ok(a / b)
}

pub fn absolute_value(a: f64) -> f64 {
    if a < 0.0 {
        -a
    } else {
        a
    }
}

/// Reste dont le signe suit le diviseur (pas le reste tronqué).
///
/// r = a - trunc(a/b)*b, puis r += b si a et b sont de signes opposés et r ≠ 0.
pub fn modulo(a: f64, b: f64) -> Result<f64, ErreurEval> {
    if b == 0.0 {
        return Err(ErreurEval::DivideByZero);
    }
    let quotient = (a / b).trunc();
    let mut reste = a - quotient * b;
    if ((a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)) && reste != 0.0 {
        reste += b;
    }
    Ok(reste)
}

/// Produit 1·2·…·floor(a), accumulé en u64.
pub fn factorial(a: f64) -> Result<f64, ErreurEval> {
    if a.is_nan() {
        return Err(ErreurEval::NotANumber("la factorielle".into()));
    }
    if a < 0.0 {
        return Err(ErreurEval::NegativeFactorial);
    }
    let n = a.to_u64().ok_or(ErreurEval::FactorialTooBig)?;

    let mut produit: u64 = 1;
    for i in 1..=n {
        produit = produit
            .checked_mul(i)
            .ok_or(ErreurEval::FactorialTooBig)?;
    }
    Ok(produit as f64)
}

/// base^exposant, exposant tronqué en entier naturel (0 compris).
///
/// Multiplications répétées : le produit courant est vérifié à chaque tour.
pub fn power(base: f64, exposant: f64) -> Result<f64, ErreurEval> {
    if base.is_nan() {
        return Err(ErreurEval::NotANumber("la base".into()));
    }
    let Some(exp) = exposant.to_i64() else {
        return puissance_hors_plage(base, exposant);
    };
    if exp < 0 {
        return Err(ErreurEval::InvalidExponent(exp.to_string()));
    }
    if exp == 0 && base == 0.0 {
        return Err(ErreurEval::UndefinedResult);
    }

    // |base| = 1 : le produit ne bouge plus que par le signe
    if absolute_value(base) == 1.0 {
        return Ok(if base < 0.0 && exp % 2 == 1 { -1.0 } else { 1.0 });
    }

    let mut res = 1.0;
    for _ in 0..exp {
        res *= base;
        if res.is_infinite() {
            return Err(ErreurEval::ResultTooLarge {
                base: court(base),
                exposant: exp.to_string(),
            });
        }
        if res == 0.0 {
            break;
        }
    }
    Ok(res)
}

/// Exposant NaN ou hors de i64 : pas de boucle, le résultat ne dépend que de |base|.
fn puissance_hors_plage(base: f64, exposant: f64) -> Result<f64, ErreurEval> {
    if exposant.is_nan() {
        return Err(ErreurEval::NotANumber("l’exposant".into()));
    }
    if exposant < 0.0 {
        return Err(ErreurEval::InvalidExponent(court(exposant)));
    }

    // au-delà de 2^63 tout flottant fini est un entier pair : le signe disparaît
    let b = absolute_value(base);
    if b < 1.0 {
        Ok(0.0)
    } else if b == 1.0 {
        Ok(1.0)
    } else {
        Err(ErreurEval::ResultTooLarge {
            base: court(base),
            exposant: court(exposant),
        })
    }
}

/// Racine `degre`-ième réelle de x (méthode de Newton).
///
/// Le degré est tronqué en entier. Cas triviaux : x ∈ {0, 1} ou degré 1.
pub fn root(x: f64, degre: f64) -> Result<f64, ErreurEval> {
    let n = match degre.to_i64() {
        Some(n) => n,
        None if degre.is_nan() => return Err(ErreurEval::NotANumber("le degré".into())),
        None => return Err(ErreurEval::DegreeOutOfRange(court(degre))),
    };

    if n == 0 {
        return Err(ErreurEval::ZerothRoot);
    }
    if n < 0 {
        return Err(ErreurEval::NegativeDegree(n));
    }
    if x.is_nan() {
        return Err(ErreurEval::NotANumber("le radicande".into()));
    }
    if x < 0.0 && n % 2 == 0 {
        return Err(ErreurEval::NegativeRadicand {
            degre: n,
            radicande: court(x),
        });
    }
    if x == 0.0 || x == 1.0 || n == 1 {
        return Ok(x);
    }

    let deg = n as f64;
    let un_sur_deg = 1.0 / deg;
    let deg_moins_un = deg - 1.0;

    let mut res = 1.0_f64;
    for iteration in 0..ITERATIONS_MAX_NEWTON {
        let ancien = res;
        res = un_sur_deg * (deg_moins_un * res + x / res.powf(deg_moins_un));

        if !res.is_finite() {
            break;
        }
        if absolute_value(ancien - res) <= EPSILON_NEWTON {
            tracing::trace!(iteration, degre = n, "newton: convergence");
            return Ok(res);
        }
    }

    tracing::warn!(degre = n, x, "newton: pas de convergence");
    Err(ErreurEval::ConvergenceFailed {
        degre: n,
        radicande: court(x),
    })
}
