// src/app/aide.rs
//
// Texte de la fenêtre d’aide (touche "?"). Paragraphes séparés par une ligne vide.

pub const TEXTE_AIDE: &str = "\
Tapez une expression puis Enter (ou =). Le résultat part dans l’historique.

Opérations : + - * / (division), % (modulo, signe du diviseur), ^ (puissance entière), \
√ (racine), ! (factorielle), |x| (valeur absolue).

Touches : POW = ^, ROOT = √, FACT = !, MOD = %, ABS = |, C efface l’entrée, ? ouvre cette aide.

Racines : √16 est la racine carrée, 3√27 la racine cubique (le nombre devant √ est le degré).

Puissance : la base doit être un entier tapé tel quel (2^10). L’exposant commence par un chiffre.

Signes : -3, --3, 2*-3 sont acceptés. Le signe s’applique au nombre qui suit : -2^2 vaut 4. \
Devant √ sans degré, il s’applique au degré 2 implicite : -√4 est refusé, écrire -(√4).

Décimales : 2.5 ou 2,5.

Pas de multiplication implicite : écrire 2*(3+4), pas 2(3+4).

Erreur de syntaxe : les caractères fautifs sont soulignés en rouge sous l’entrée.";
