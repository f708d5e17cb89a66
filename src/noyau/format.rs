// src/noyau/format.rs

use super::arbre::{Jeton, Noeud};

/// Décimales gardées à l’affichage d’un résultat (le bruit de Newton disparaît).
pub const DECIMALES_AFFICHAGE: usize = 10;

/* ------------------------ Résultat ------------------------ */

/// f64 -> texte court : pas de ".0" inutile, pas de "-0", zéros de fin retirés.
pub fn format_resultat(x: f64) -> String {
    if !x.is_finite() {
        return format!("{x}");
    }

    let s = format!("{x:.prec$}", prec = DECIMALES_AFFICHAGE);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/* ------------------------ Arbre ------------------------ */

fn symbole(nom: &str) -> &str {
    match nom {
        "pow" => "^",
        "mod" => "%",
        _ => nom,
    }
}

/// Morceaux à écrire, dépilés dans l’ordre de lecture.
enum Morceau<'a> {
    Texte(&'a str),
    Noeud(&'a Noeud),
    /// Sous-arbre entre parenthèses, sauf s’il est déjà atomique (nombre, |x|).
    Operande(&'a Noeud),
}

fn est_atomique(n: &Noeud) -> bool {
    match &n.jeton {
        Jeton::Nombre { .. } => true,
        Jeton::Operateur(nom) => nom == "abs",
    }
}

/// Arbre -> infixe lisible (panneau “démarche”).
///
/// "2 4 5 m abs + *" -> "2 * (4 + |5 * -1|)"
///
/// Écrit dans un seul tampon avec une pile explicite : linéaire en taille, sans récursion.
pub fn format_arbre(racine: &Noeud) -> String {
    let mut sortie = String::new();
    let mut pile = vec![Morceau::Noeud(racine)];

    while let Some(morceau) = pile.pop() {
        let n = match morceau {
            Morceau::Texte(t) => {
                sortie.push_str(t);
                continue;
            }
            Morceau::Operande(n) if est_atomique(n) => n,
            Morceau::Operande(n) => {
                pile.extend([Morceau::Texte(")"), Morceau::Noeud(n)]);
                sortie.push('(');
                continue;
            }
            Morceau::Noeud(n) => n,
        };

        let nom = match &n.jeton {
            Jeton::Nombre { texte, .. } => {
                sortie.push_str(texte);
                continue;
            }
            Jeton::Operateur(nom) => nom.as_str(),
        };

        // empilé à l’envers : le dernier poussé sort en premier
        match (nom, n.gauche.as_deref(), n.droite.as_deref()) {
            ("abs", Some(g), None) => {
                pile.extend([Morceau::Texte("|"), Morceau::Noeud(g), Morceau::Texte("|")]);
            }
            ("fac", Some(g), None) => {
                pile.extend([Morceau::Texte("!"), Morceau::Operande(g)]);
            }
            // gauche = radicande, droite = degré
            ("root", Some(g), Some(d)) => {
                pile.extend([Morceau::Operande(g), Morceau::Texte("√"), Morceau::Operande(d)]);
            }
            (_, Some(g), Some(d)) => {
                pile.extend([
                    Morceau::Operande(d),
                    Morceau::Texte(" "),
                    Morceau::Texte(symbole(nom)),
                    Morceau::Texte(" "),
                    Morceau::Operande(g),
                ]);
            }
            // forme inattendue : on montre ce qu’on a
            (_, g, d) => {
                pile.push(Morceau::Texte("]"));
                pile.extend(d.map(Morceau::Operande));
                pile.push(Morceau::Texte("; "));
                pile.extend(g.map(Morceau::Operande));
                pile.extend([Morceau::Texte("["), Morceau::Texte(nom)]);
            }
        }
    }

    sortie
}
