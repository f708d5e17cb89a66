//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, historique, erreur, démarche)
//! et offrir des opérations simples (touches du pavé, C, ESC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing) : vue.rs appelle le noyau
//!   puis dépose le résultat via `set_resultat` / `set_erreur_*`.
//! - Actions déterministes, sans effet de bord caché.
//! - Historique borné.

use std::collections::{BTreeSet, VecDeque};

/// Garde-fou : au-delà, les plus vieilles lignes sortent de l’historique.
pub const HISTORIQUE_MAX: usize = 200;

/// Pavé 5×5 (même disposition que la calculatrice d’origine).
pub const PAVE: [[&str; 5]; 5] = [
    ["POW", "(", ")", "C", "/"],
    ["ROOT", "7", "8", "9", "*"],
    ["FACT", "4", "5", "6", "-"],
    ["MOD", "1", "2", "3", "+"],
    ["ABS", "0", "?", ",", "="],
];

/// Effet d’une touche du pavé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    /// Texte ajouté en fin d’entrée.
    Inserer(&'static str),
    /// C : efface l’entrée.
    Effacer,
    /// ? : ouvre l’aide.
    Aide,
    /// = : évalue.
    Egal,
}

impl Touche {
    /// Étiquette du pavé -> effet. `None` pour une étiquette inconnue.
    pub fn depuis_etiquette(etiquette: &str) -> Option<Self> {
        let t = match etiquette {
            "POW" => Self::Inserer("^"),
            "ROOT" => Self::Inserer("√"),
            "FACT" => Self::Inserer("!"),
            "MOD" => Self::Inserer("%"),
            "ABS" => Self::Inserer("|"),
            "C" => Self::Effacer,
            "?" => Self::Aide,
            "=" => Self::Egal,
            "(" => Self::Inserer("("),
            ")" => Self::Inserer(")"),
            "+" => Self::Inserer("+"),
            "-" => Self::Inserer("-"),
            "*" => Self::Inserer("*"),
            "/" => Self::Inserer("/"),
            "," => Self::Inserer(","),
            "0" => Self::Inserer("0"),
            "1" => Self::Inserer("1"),
            "2" => Self::Inserer("2"),
            "3" => Self::Inserer("3"),
            "4" => Self::Inserer("4"),
            "5" => Self::Inserer("5"),
            "6" => Self::Inserer("6"),
            "7" => Self::Inserer("7"),
            "8" => Self::Inserer("8"),
            "9" => Self::Inserer("9"),
            _ => return None,
        };
        Some(t)
    }
}

/// Copie UI de la démarche du noyau (jetons, RPN, arbre).
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Sortie {
    Valeur(String),
    Erreur(String),
}

/// Une ligne de l’historique : l’expression tapée et ce qu’elle a donné.
#[derive(Clone, Debug, PartialEq)]
pub struct Ligne {
    pub expression: String,
    pub sortie: Sortie,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub historique: VecDeque<Ligne>,
    pub erreur: String, // message d’erreur de syntaxe (entrée gardée pour correction)
    pub indices_erreur: BTreeSet<usize>, // caractères fautifs de `entree` (surlignage)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
    pub aide_ouverte: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            historique: VecDeque::new(),
            erreur: String::new(),
            indices_erreur: BTreeSet::new(),
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            aide_ouverte: false,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// Remise à zéro totale (entrée + historique + démarche).
    pub fn reset_total(&mut self) {
        self.clear_entree();
        self.historique.clear();
        self.demarche = Demarche::default();
    }

    /// C / ESC : effacer l’entrée et son erreur (l’historique reste).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.clear_erreur();
        self.focus_entree = true;
    }

    fn clear_erreur(&mut self) {
        self.erreur.clear();
        self.indices_erreur.clear();
    }

    /// Ajoute du texte en fin d’entrée. Toute modification invalide le surlignage.
    pub fn inserer(&mut self, texte: &str) {
        self.entree.push_str(texte);
        self.clear_erreur();
        self.focus_entree = true;
    }

    /// Applique une touche du pavé. Renvoie true si l’entrée doit être évaluée (=).
    pub fn appui(&mut self, touche: Touche) -> bool {
        match touche {
            Touche::Inserer(t) => self.inserer(t),
            Touche::Effacer => self.clear_entree(),
            Touche::Aide => self.aide_ouverte = true,
            Touche::Egal => return true,
        }
        false
    }

    /* ------------------------ Dépôt des sorties (appelé par la vue) ------------------------ */

    fn pousser(&mut self, ligne: Ligne) {
        if self.historique.len() >= HISTORIQUE_MAX {
            self.historique.pop_front();
        }
        self.historique.push_back(ligne);
    }

    /// Calcul réussi : l’entrée passe dans l’historique, une nouvelle entrée vide commence.
    pub fn set_resultat(&mut self, valeur: impl Into<String>, demarche: Demarche) {
        let expression = std::mem::take(&mut self.entree);
        self.pousser(Ligne {
            expression,
            sortie: Sortie::Valeur(valeur.into()),
        });
        self.demarche = demarche;
        self.clear_erreur();
        self.focus_entree = true;
    }

    /// Erreur de calcul (expression bien formée) : elle va dans l’historique comme un résultat.
    pub fn set_erreur_calcul(&mut self, msg: impl Into<String>, demarche: Option<Demarche>) {
        let expression = std::mem::take(&mut self.entree);
        self.pousser(Ligne {
            expression,
            sortie: Sortie::Erreur(msg.into()),
        });
        self.demarche = demarche.unwrap_or_default();
        self.clear_erreur();
        self.focus_entree = true;
    }

    /// Erreur de syntaxe : l’entrée reste en place, les caractères fautifs sont surlignés.
    pub fn set_erreur_syntaxe(&mut self, msg: impl Into<String>, indices: BTreeSet<usize>) {
        self.erreur = msg.into();
        self.indices_erreur = indices;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }
}
