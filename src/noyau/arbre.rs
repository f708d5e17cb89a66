// src/noyau/arbre.rs
//
// Arbre d’expression binaire.
// - Jeton : somme {Operateur(nom), Nombre(valeur, texte)}, pas de champ “inutilisé selon le tag”
// - Noeud : enfants possédés exclusivement par le parent (Box), jamais partagés, jamais cycliques
//
// L’arbre est construit une fois (rpn::from_rpn), lu une fois (eval::interpret), puis jeté.
// Évaluation et affichage parcourent l’arbre avec une pile explicite, Drop aussi :
// la profondeur n’est bornée que par la mémoire.

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Operateur(String),
    Nombre { valeur: f64, texte: String },
}

impl Jeton {
    pub fn operateur(nom: &str) -> Self {
        Self::Operateur(nom.to_string())
    }

    pub fn nombre(valeur: f64) -> Self {
        Self::Nombre {
            valeur,
            texte: valeur.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Noeud {
    pub jeton: Jeton,
    pub gauche: Option<Box<Noeud>>,
    pub droite: Option<Box<Noeud>>,
}

impl Noeud {
    pub fn feuille(valeur: f64) -> Self {
        Self {
            jeton: Jeton::nombre(valeur),
            gauche: None,
            droite: None,
        }
    }

    /// Feuille qui garde le texte tapé (ex: "5.50").
    pub fn feuille_texte(valeur: f64, texte: &str) -> Self {
        Self {
            jeton: Jeton::Nombre {
                valeur,
                texte: texte.to_string(),
            },
            gauche: None,
            droite: None,
        }
    }

    /// Opérateur à un seul opérande (gauche), droite absente : fac, abs.
    pub fn unaire(nom: &str, operande: Noeud) -> Self {
        Self {
            jeton: Jeton::operateur(nom),
            gauche: Some(Box::new(operande)),
            droite: None,
        }
    }

    pub fn binaire(nom: &str, gauche: Noeud, droite: Noeud) -> Self {
        Self {
            jeton: Jeton::operateur(nom),
            gauche: Some(Box::new(gauche)),
            droite: Some(Box::new(droite)),
        }
    }

    pub fn est_feuille(&self) -> bool {
        self.gauche.is_none() && self.droite.is_none()
    }

    /// Nombre de nœuds (itératif : pas de récursion sur un arbre profond).
    pub fn taille(&self) -> usize {
        let mut pile: Vec<&Noeud> = vec![self];
        let mut n = 0;
        while let Some(noeud) = pile.pop() {
            n += 1;
            pile.extend(noeud.gauche.as_deref());
            pile.extend(noeud.droite.as_deref());
        }
        n
    }
}

/// Libération itérative (arbres très profonds).
impl Drop for Noeud {
    fn drop(&mut self) {
        let mut pile: Vec<Box<Noeud>> = Vec::new();
        pile.extend(self.gauche.take());
        pile.extend(self.droite.take());
        while let Some(mut noeud) = pile.pop() {
            pile.extend(noeud.gauche.take());
            pile.extend(noeud.droite.take());
            // `noeud` n’a plus d’enfants : son drop s’arrête là
        }
    }
}
