// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> arbre
// Objectif:
// - Convertir la suite de jetons du lexer en RPN (postfix)
// - Puis reconstruire l’arbre binaire (Noeud)
//
// Règles:
// - '+' / '-' unaire (en tête, ou quand aucune valeur ne précède) => marqueurs "m" / "p",
//   priorité maximale, associatifs à droite
// - '|' ... '|' : la première barre pose un marqueur sur la pile, la seconde dépile
//   jusqu’au marqueur puis sort "abs"
// - '!' postfixé : son opérande est déjà sortie, le résultat compte comme une valeur
//
// NOTE:
// - La conversion suppose une entrée validée par le lexer : pas d’erreur ici.
// - La construction, elle, refuse une RPN mal formée (invariant interne).

use super::arbre::Noeud;
use super::erreurs::ErreurAnalyse;

pub const MOINS_UNAIRE: &str = "m";
pub const PLUS_UNAIRE: &str = "p";
pub const ABS: &str = "abs";

/// (priorité, associatif à droite)
fn operateur_meta(op: &str) -> Option<(u8, bool)> {
    match op {
        "+" | "-" => Some((1, false)),
        "*" | "/" | "%" => Some((2, false)),
        "√" => Some((3, true)),
        "^" => Some((4, true)),
        "!" => Some((5, true)),
        MOINS_UNAIRE | PLUS_UNAIRE => Some((6, true)),
        _ => None,
    }
}

/// Dépile vers la sortie tant que l’opérateur du haut doit passer avant `op`.
/// '(' et '|' bloquent.
fn depile_pour(op: &str, ops: &mut Vec<String>, out: &mut Vec<String>) {
    let Some((p_op, droite)) = operateur_meta(op) else {
        return;
    };

    while let Some(top) = ops.last() {
        let Some((p_top, _)) = operateur_meta(top) else {
            break;
        };
        let doit_pop = if droite { p_top > p_op } else { p_top >= p_op };
        if !doit_pop {
            break;
        }
        if let Some(t) = ops.pop() {
            out.push(t);
        }
    }
}

/// Convertit une suite de jetons (infix) en RPN.
///
/// Exemple:
///   jetons: ["2", "*", "(", "4", "+", "|", "-", "5", "|", ")"]
///   rpn:    ["2", "4", "5", "m", "abs", "+", "*"]
pub fn to_rpn<S: AsRef<str>>(jetons: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut ops: Vec<String> = Vec::new();

    // “valeur” = nombre, ')' , '|' fermante, ou '!' (son résultat reste une valeur).
    // Sert à reconnaître les signes unaires et la barre fermante.
    let mut prev_was_value = false;
    let mut barres_ouvertes = 0usize;

    for jeton in jetons {
        let t = jeton.as_ref();

        match t {
            "(" => {
                ops.push(t.to_string());
                prev_was_value = false;
            }

            ")" => {
                while let Some(top) = ops.pop() {
                    if top == "(" {
                        break;
                    }
                    out.push(top);
                }
                prev_was_value = true;
            }

            "|" if prev_was_value && barres_ouvertes > 0 => {
                while let Some(top) = ops.pop() {
                    if top == "|" {
                        break;
                    }
                    out.push(top);
                }
                out.push(ABS.to_string());
                barres_ouvertes -= 1;
                prev_was_value = true;
            }

            "|" => {
                ops.push(t.to_string());
                barres_ouvertes += 1;
                prev_was_value = false;
            }

            "+" | "-" if !prev_was_value => {
                let marqueur = if t == "-" { MOINS_UNAIRE } else { PLUS_UNAIRE };
                depile_pour(marqueur, &mut ops, &mut out);
                ops.push(marqueur.to_string());
            }

            "!" => {
                depile_pour(t, &mut ops, &mut out);
                ops.push(t.to_string());
                // prev_was_value reste vrai
            }

            _ if operateur_meta(t).is_some() => {
                depile_pour(t, &mut ops, &mut out);
                ops.push(t.to_string());
                prev_was_value = false;
            }

            // nombre (ou jeton inconnu : laissé tel quel, from_rpn le refusera)
            _ => {
                out.push(t.to_string());
                prev_was_value = true;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op != "(" && op != "|" {
            out.push(op);
        }
    }

    out
}

fn depile(st: &mut Vec<Noeud>, op: &str) -> Result<Noeud, ErreurAnalyse> {
    st.pop()
        .ok_or_else(|| ErreurAnalyse::Postfixe(format!("opérande manquant pour '{op}'")))
}

/// Applique un opérateur RPN à la pile d’opérandes.
///
/// - binaires + - * / ^ % : droite = sommet, gauche = dessous ; ^ -> "pow", % -> "mod"
/// - '√' : sommet = radicande (gauche), dessous = degré (droite) -> "root"
/// - '!' -> "fac", "abs" : un seul enfant (gauche)
/// - "m" / "p" : x * (-1) / x * (+1), la constante à droite
pub fn to_tree_oper(st: &mut Vec<Noeud>, op: &str) -> Result<(), ErreurAnalyse> {
    let noeud = match op {
        "+" | "-" | "*" | "/" | "^" | "%" => {
            let droite = depile(st, op)?;
            let gauche = depile(st, op)?;
            let nom = match op {
                "^" => "pow",
                "%" => "mod",
                _ => op,
            };
            Noeud::binaire(nom, gauche, droite)
        }

        "√" => {
            let radicande = depile(st, op)?;
            let degre = depile(st, op)?;
            Noeud::binaire("root", radicande, degre)
        }

        "!" => Noeud::unaire("fac", depile(st, op)?),
        ABS => Noeud::unaire(ABS, depile(st, op)?),

        MOINS_UNAIRE | PLUS_UNAIRE => {
            let x = depile(st, op)?;
            let signe = if op == MOINS_UNAIRE {
                Noeud::feuille_texte(-1.0, "-1")
            } else {
                Noeud::feuille_texte(1.0, "1")
            };
            Noeud::binaire("*", x, signe)
        }

        _ => {
            return Err(ErreurAnalyse::Postfixe(format!(
                "jeton inattendu en RPN: '{op}'"
            )))
        }
    };

    st.push(noeud);
    Ok(())
}

/// Construit l’arbre à partir d’une RPN.
pub fn from_rpn<S: AsRef<str>>(rpn: &[S]) -> Result<Noeud, ErreurAnalyse> {
    let mut st: Vec<Noeud> = Vec::new();

    for jeton in rpn {
        let t = jeton.as_ref();
        match t.parse::<f64>() {
            Ok(valeur) => st.push(Noeud::feuille_texte(valeur, t)),
            Err(_) => to_tree_oper(&mut st, t)?,
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(racine), true) => Ok(racine),
        (None, _) => Err(ErreurAnalyse::Postfixe("RPN vide".into())),
        (Some(_), false) => Err(ErreurAnalyse::Postfixe(format!(
            "{} opérandes sans opérateur",
            st.len() + 1
        ))),
    }
}
