// src/noyau/jetons.rs
//
// Lexer : chaîne brute -> suite de jetons texte ("12", "+", "(", "√", ...).
//
// Un seul passage, caractère par caractère. On ne s’arrête PAS à la première faute :
// tous les indices fautifs (en caractères, base 0) sont collectés pour le surlignage.
// Si au moins un indice est fautif, la suite de jetons est jetée.
//
// Règles de voisinage (pas de multiplication implicite) :
// - une valeur (nombre, '(', '|' ouvrante) ne démarre pas juste après une valeur
//   (nombre, ')', '|' fermante, '!')
// - '*' '/' '%' '!' ne s’empilent pas derrière '*' '/' '%' '!' '+' '-', ni en tête, ni après '(' / '|' ouvrante
// - '^' exige un entier littéral juste avant, et un chiffre juste après
// - '+' '-' consécutifs se replient en un seul signe (--5 => +5, +-5 => -5)
// - '√' sans degré devant reçoit le degré implicite "2"
// - '(' et '|' partagent une pile de délimiteurs : ce qui reste ouvert à la fin est fautif

use std::collections::BTreeSet;

use super::erreurs::ErreurSyntaxe;

/// Opérateurs reconnus (un caractère chacun).
pub const OPERATEURS: [char; 11] = ['(', ')', '+', '-', '*', '/', '!', '^', '√', '|', '%'];

/// Degré inséré devant un '√' qui n’en a pas.
const DEGRE_IMPLICITE: &str = "2";

pub fn est_operateur(c: char) -> bool {
    OPERATEURS.contains(&c)
}

/// Nature du dernier jeton émis : c’est tout le contexte dont les règles ont besoin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Precedent {
    Debut,
    Nombre,
    /// '(' ou '|' ouvrante
    Ouvrante,
    /// ')' ou '|' fermante
    Fermante,
    Factorielle,
    /// '+' ou '-'
    Signe,
    /// '*' '/' '%' '^' '√'
    Operateur,
}

impl Precedent {
    fn est_valeur(self) -> bool {
        matches!(self, Self::Nombre | Self::Fermante | Self::Factorielle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delimiteur {
    Parenthese,
    Barre,
}

struct Lecteur {
    sortie: Vec<String>,
    erreurs: BTreeSet<usize>,

    // nombre en cours
    tampon: String,
    debut_nombre: usize,
    a_virgule: bool,

    precedent: Precedent,
    indice_precedent: usize,

    /// Indice du '^' dont on attend encore le premier chiffre d’exposant.
    attend_exposant: Option<usize>,

    /// Délimiteurs ouverts, du plus ancien au plus récent.
    ouverts: Vec<(Delimiteur, usize)>,
}

impl Lecteur {
    fn new() -> Self {
        Self {
            sortie: Vec::new(),
            erreurs: BTreeSet::new(),
            tampon: String::new(),
            debut_nombre: 0,
            a_virgule: false,
            precedent: Precedent::Debut,
            indice_precedent: 0,
            attend_exposant: None,
            ouverts: Vec::new(),
        }
    }

    fn erreur(&mut self, i: usize) {
        self.erreurs.insert(i);
    }

    fn emet(&mut self, jeton: &str, nature: Precedent, i: usize) {
        self.sortie.push(jeton.to_string());
        self.precedent = nature;
        self.indice_precedent = i;
    }

    /// Vide le nombre en cours dans la sortie.
    fn flush(&mut self) {
        if self.tampon.is_empty() {
            return;
        }
        let texte = std::mem::take(&mut self.tampon);
        self.sortie.push(texte);
        self.precedent = Precedent::Nombre;
        self.indice_precedent = self.debut_nombre;
        self.a_virgule = false;
    }

    fn chiffre(&mut self, i: usize, c: char) {
        if self.tampon.is_empty() {
            if self.precedent.est_valeur() {
                self.erreur(i);
            }
            self.debut_nombre = i;
        }
        self.tampon.push(c);
    }

    fn virgule(&mut self, i: usize) {
        if self.tampon.is_empty() || self.a_virgule {
            self.erreur(i);
            return;
        }
        self.a_virgule = true;
        self.tampon.push('.');
    }

    fn operateur(&mut self, i: usize, c: char) {
        self.flush();

        match c {
            '(' => {
                if self.precedent.est_valeur() {
                    self.erreur(i);
                }
                self.ouverts.push((Delimiteur::Parenthese, i));
                self.emet("(", Precedent::Ouvrante, i);
            }

            ')' => {
                if !self.precedent.est_valeur() {
                    self.erreur(i);
                }
                match self.ouverts.last() {
                    Some((Delimiteur::Parenthese, _)) => {
                        self.ouverts.pop();
                    }
                    _ => self.erreur(i),
                }
                self.emet(")", Precedent::Fermante, i);
            }

            '*' | '/' | '%' | '!' => {
                if matches!(
                    self.precedent,
                    Precedent::Debut
                        | Precedent::Ouvrante
                        | Precedent::Signe
                        | Precedent::Operateur
                        | Precedent::Factorielle
                ) {
                    self.erreur(i);
                }
                let nature = if c == '!' {
                    Precedent::Factorielle
                } else {
                    Precedent::Operateur
                };
                self.emet(&c.to_string(), nature, i);
            }

            '^' => {
                // la base doit être un entier littéral déjà émis
                let base_entiere = self.precedent == Precedent::Nombre
                    && self
                        .sortie
                        .last()
                        .is_some_and(|t| t.parse::<i64>().is_ok());
                if !base_entiere {
                    self.erreur(i);
                }
                self.emet("^", Precedent::Operateur, i);
                self.attend_exposant = Some(i);
            }

            '√' => {
                if !self.precedent.est_valeur() {
                    self.emet(DEGRE_IMPLICITE, Precedent::Nombre, i);
                }
                self.emet("√", Precedent::Operateur, i);
            }

            '+' | '-' => {
                if self.precedent == Precedent::Signe {
                    // repli des signes, sur place
                    if let Some(dernier) = self.sortie.last_mut() {
                        let negatif = (dernier.as_str() == "-") != (c == '-');
                        *dernier = if negatif { "-" } else { "+" }.to_string();
                    }
                    self.indice_precedent = i;
                } else {
                    self.emet(&c.to_string(), Precedent::Signe, i);
                }
            }

            '|' => {
                let ferme = self.precedent.est_valeur()
                    && matches!(self.ouverts.last(), Some((Delimiteur::Barre, _)));
                if ferme {
                    self.ouverts.pop();
                    self.emet("|", Precedent::Fermante, i);
                } else {
                    if self.precedent.est_valeur() {
                        self.erreur(i);
                    }
                    self.ouverts.push((Delimiteur::Barre, i));
                    self.emet("|", Precedent::Ouvrante, i);
                }
            }

            _ => self.erreur(i),
        }
    }

    fn fin(mut self) -> Result<Vec<String>, ErreurSyntaxe> {
        self.flush();

        if let Some(i) = self.attend_exposant {
            self.erreur(i);
        }
        if matches!(self.precedent, Precedent::Signe | Precedent::Operateur) {
            let i = self.indice_precedent;
            self.erreur(i);
        }
        for (_, i) in std::mem::take(&mut self.ouverts) {
            self.erreur(i);
        }

        if self.erreurs.is_empty() {
            Ok(self.sortie)
        } else {
            Err(ErreurSyntaxe::new(self.erreurs))
        }
    }
}

/// Découpe `s` en jetons texte.
///
/// - `Ok(vec![])` : entrée vide (ou seulement des espaces), rien à analyser
/// - `Err(..)` : ensemble ordonné de TOUS les indices fautifs
pub fn tokenize(s: &str) -> Result<Vec<String>, ErreurSyntaxe> {
    let mut lecteur = Lecteur::new();

    for (i, c) in s.chars().enumerate() {
        if let Some(i_exp) = lecteur.attend_exposant {
            if c.is_ascii_digit() {
                lecteur.attend_exposant = None;
            } else if !c.is_whitespace() {
                // '^' suivi d’autre chose qu’un chiffre
                lecteur.erreur(i);
                lecteur.erreur(i_exp);
                lecteur.attend_exposant = None;
            }
        }

        if c.is_ascii_digit() {
            lecteur.chiffre(i, c);
        } else if c == '.' || c == ',' {
            lecteur.virgule(i);
        } else if c.is_whitespace() {
            lecteur.flush();
        } else if est_operateur(c) {
            lecteur.operateur(i, c);
        } else {
            lecteur.erreur(i);
        }
    }

    lecteur.fin()
}

/// Format utilitaire (debug/“démarche”) : jetons séparés par des espaces.
pub fn format_tokens<S: AsRef<str>>(jetons: &[S]) -> String {
    jetons
        .iter()
        .map(|j| j.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
