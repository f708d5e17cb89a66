//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN -> arbre -> interpret
//!
//! - `parse`     : chaîne -> arbre (ou indices fautifs)
//! - `interpret` : arbre -> f64 (ou première erreur numérique, gauche avant droite)
//! - `evaluate`  : composition des deux, côté utilisateur
//! - `eval_expression` : idem + démarche (jetons, RPN, arbre) pour l’UI

use super::arbre::{Jeton, Noeud};
use super::erreurs::{ErreurAnalyse, ErreurCalcul, ErreurEval};
use super::format::format_arbre;
use super::jetons::{format_tokens, tokenize};
use super::primitives::{
    absolute_value, add, divide, factorial, modulo, multiply, power, root, subtract,
};
use super::rpn::{from_rpn, to_rpn};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// Chaîne -> arbre.
///
/// `Ok(None)` : rien à analyser (entrée vide ou seulement des espaces).
pub fn parse(input: &str) -> Result<Option<Noeud>, ErreurAnalyse> {
    Ok(analyse(input)?.map(|a| a.arbre))
}

/// Sorties intermédiaires de l’analyse, gardées pour la démarche.
struct Analyse {
    jetons: Vec<String>,
    rpn: Vec<String>,
    arbre: Noeud,
}

impl Analyse {
    fn demarche(&self) -> Demarche {
        Demarche {
            jetons: format_tokens(&self.jetons),
            rpn: format_tokens(&self.rpn),
            arbre: format_arbre(&self.arbre),
        }
    }
}

fn analyse(input: &str) -> Result<Option<Analyse>, ErreurAnalyse> {
    let jetons = tokenize(input)?;
    if jetons.is_empty() {
        return Ok(None);
    }
    tracing::debug!(jetons = %format_tokens(&jetons), "analyse lexicale");

    let rpn = to_rpn(&jetons);
    tracing::debug!(rpn = %format_tokens(&rpn), "postfix");

    let arbre = from_rpn(&rpn).inspect_err(|e| {
        tracing::warn!(erreur = %e, "invariant lexer/rpn rompu");
    })?;

    Ok(Some(Analyse { jetons, rpn, arbre }))
}

/// Étapes du parcours postfixe de `interpret`.
enum Etape<'a> {
    /// Sous-arbre à évaluer (absent => `EmptyExpression`).
    Visiter(Option<&'a Noeud>),
    /// Gauche évaluée : unaire terminé, ou droite à visiter.
    ApresGauche(&'a Noeud, &'a str),
    /// Les deux opérandes sont sur la pile de valeurs.
    Appliquer(&'a str),
}

/// Calcule la valeur de l’arbre.
///
/// Nœud absent => `EmptyExpression`. Gauche d’abord, avec arrêt à la première
/// erreur ; la droite des unaires abs/fac n’est jamais visitée.
/// Parcours avec une pile explicite : aucune limite de profondeur hors mémoire.
pub fn interpret(arbre: Option<&Noeud>) -> Result<f64, ErreurEval> {
    let mut etapes = vec![Etape::Visiter(arbre)];
    let mut valeurs: Vec<f64> = Vec::new();

    while let Some(etape) = etapes.pop() {
        match etape {
            Etape::Visiter(None) => return Err(ErreurEval::EmptyExpression),
            Etape::Visiter(Some(noeud)) => match &noeud.jeton {
                Jeton::Nombre { valeur, texte } => {
                    if !noeud.est_feuille() {
                        // un nombre n’a pas d’opérandes
                        return Err(ErreurEval::InvalidTokenType(format!(
                            "nombre '{texte}' avec enfants"
                        )));
                    }
                    valeurs.push(*valeur);
                }
                Jeton::Operateur(nom) => {
                    etapes.push(Etape::ApresGauche(noeud, nom));
                    etapes.push(Etape::Visiter(noeud.gauche.as_deref()));
                }
            },
            Etape::ApresGauche(noeud, nom) => match nom {
                "abs" => {
                    let g = depiler(&mut valeurs)?;
                    valeurs.push(absolute_value(g));
                }
                "fac" => {
                    let g = depiler(&mut valeurs)?;
                    valeurs.push(factorial(g)?);
                }
                _ => {
                    etapes.push(Etape::Appliquer(nom));
                    etapes.push(Etape::Visiter(noeud.droite.as_deref()));
                }
            },
            Etape::Appliquer(nom) => {
                let droite = depiler(&mut valeurs)?;
                let gauche = depiler(&mut valeurs)?;
                valeurs.push(appliquer(nom, gauche, droite)?);
            }
        }
    }

    depiler(&mut valeurs)
}

// Chaque Visiter réussi empile exactement une valeur : la pile ne peut pas manquer.
fn depiler(valeurs: &mut Vec<f64>) -> Result<f64, ErreurEval> {
    valeurs.pop().ok_or(ErreurEval::EmptyExpression)
}

fn appliquer(nom: &str, gauche: f64, droite: f64) -> Result<f64, ErreurEval> {
    match nom {
        "+" => Ok(add(gauche, droite)),
        "*" => Ok(multiply(gauche, droite)),
        "-" => Ok(subtract(gauche, droite)),
        "/" => divide(gauche, droite),
        "mod" => modulo(gauche, droite),
        "pow" => power(gauche, droite),
        // gauche = radicande, droite = degré (voir rpn::to_tree_oper)
        "root" => root(gauche, droite),
        _ => Err(ErreurEval::InvalidOperator(nom.to_string())),
    }
}

/// API publique : évalue une expression tapée.
///
/// `Ok(None)` : entrée vide, aucun jeton, aucune erreur.
#[tracing::instrument(level = "debug", skip_all, fields(longueur = input.len()))]
pub fn evaluate(input: &str) -> Result<Option<f64>, ErreurCalcul> {
    let Some(arbre) = parse(input)? else {
        return Ok(None);
    };
    let valeur = interpret(Some(&arbre))?;
    tracing::debug!(valeur, "résultat");
    Ok(Some(valeur))
}

/// Comme `evaluate`, mais retourne aussi la démarche (pour le panneau de l’UI).
/// La démarche est disponible même si l’évaluation numérique échoue.
pub fn eval_expression(
    input: &str,
) -> Result<(Option<f64>, Demarche), (ErreurCalcul, Option<Demarche>)> {
    let analysee = match analyse(input) {
        Ok(Some(a)) => a,
        Ok(None) => return Ok((None, Demarche::default())),
        Err(e) => return Err((e.into(), None)),
    };
    let demarche = analysee.demarche();

    match interpret(Some(&analysee.arbre)) {
        Ok(v) => Ok((Some(v), demarche)),
        Err(e) => Err((e.into(), Some(demarche))),
    }
}
