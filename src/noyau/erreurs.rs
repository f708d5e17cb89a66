// src/noyau/erreurs.rs
//
// Deux familles d’erreurs, disjointes :
// - syntaxe (lexer) : TOUS les indices fautifs en une passe, pour surligner d’un coup
// - évaluation (arbre + primitives) : une seule erreur, la première rencontrée
//   (gauche avant droite)
//
// Rien ici n’est fatal pour le processus : l’appelant affiche et redemande.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// Ensemble ordonné des indices (en caractères, base 0) refusés par le lexer.
/// Non vide => aucune étape suivante n’est lancée.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErreurSyntaxe {
    pub indices: BTreeSet<usize>,
}

impl ErreurSyntaxe {
    pub fn new(indices: BTreeSet<usize>) -> Self {
        Self { indices }
    }

    pub fn contient(&self, indice: usize) -> bool {
        self.indices.contains(&indice)
    }
}

impl fmt::Display for ErreurSyntaxe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let liste: Vec<String> = self.indices.iter().map(|i| i.to_string()).collect();
        write!(f, "syntaxe invalide aux positions : {}", liste.join(", "))
    }
}

impl std::error::Error for ErreurSyntaxe {}

/// Échec de l’analyse (lexer -> RPN -> arbre).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurAnalyse {
    #[error(transparent)]
    Syntaxe(#[from] ErreurSyntaxe),

    /// Invariant interne violé : la RPN reçue est mal formée.
    /// N’arrive que si le contrat lexer/convertisseur est rompu.
    #[error("RPN mal formée ({0})")]
    Postfixe(String),
}

impl ErreurAnalyse {
    /// Indices à surligner, si l’erreur vient du lexer.
    pub fn indices(&self) -> Option<&BTreeSet<usize>> {
        match self {
            Self::Syntaxe(e) => Some(&e.indices),
            Self::Postfixe(_) => None,
        }
    }
}

/// Erreurs numériques (primitives) et structurelles (arbre) de l’évaluation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurEval {
    #[error("division par zéro impossible")]
    DivideByZero,

    #[error("factorielle d’un nombre négatif impossible")]
    NegativeFactorial,

    #[error("factorielle trop grande")]
    FactorialTooBig,

    #[error("exposant invalide : {0}, doit être >= 0")]
    InvalidExponent(String),

    #[error("0^0 est indéfini")]
    UndefinedResult,

    #[error("résultat de {base}^{exposant} trop grand")]
    ResultTooLarge { base: String, exposant: String },

    #[error("racine 0-ième impossible")]
    ZerothRoot,

    #[error("racine de degré négatif impossible : {0}")]
    NegativeDegree(i64),

    /// Degré qui ne tient pas dans un entier 64 bits (±inf compris).
    #[error("degré de racine hors limites : {0}")]
    DegreeOutOfRange(String),

    #[error("racine {degre}-ième d’un nombre négatif impossible : {radicande}")]
    NegativeRadicand { degre: i64, radicande: String },

    #[error("la méthode de Newton ne converge pas (racine {degre}-ième de {radicande})")]
    ConvergenceFailed { degre: i64, radicande: String },

    /// Opérande NaN (ex: inf - inf) là où un entier ou un réel ordonné est attendu.
    #[error("valeur non numérique (NaN) pour {0}")]
    NotANumber(String),

    #[error("impossible d’interpréter un nœud vide")]
    EmptyExpression,

    #[error("type de jeton invalide : {0}")]
    InvalidTokenType(String),

    #[error("opérateur invalide : '{0}'")]
    InvalidOperator(String),
}

/// Erreur de bout en bout (`evaluate`).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErreurCalcul {
    #[error(transparent)]
    Syntaxe(ErreurSyntaxe),

    #[error("erreur interne : {0}")]
    Postfixe(String),

    #[error(transparent)]
    Evaluation(#[from] ErreurEval),
}

impl ErreurCalcul {
    pub fn indices(&self) -> Option<&BTreeSet<usize>> {
        match self {
            Self::Syntaxe(e) => Some(&e.indices),
            _ => None,
        }
    }
}

impl From<ErreurAnalyse> for ErreurCalcul {
    fn from(e: ErreurAnalyse) -> Self {
        match e {
            ErreurAnalyse::Syntaxe(s) => Self::Syntaxe(s),
            ErreurAnalyse::Postfixe(m) => Self::Postfixe(m),
        }
    }
}

/// Texte court d’un flottant pour les messages (3 décimales, comme l’affichage d’erreur).
pub(crate) fn court(x: f64) -> String {
    format!("{x:.3}")
}
