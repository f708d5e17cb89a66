//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes (aligné avec l’état actuel du noyau) :
//! - '^' n’accepte qu’un entier littéral à gauche : "(2+3)^2" est refusé.
//! - le moins unaire lie plus fort que tout : "-2^2" vaut 4, "-3!" est une factorielle négative.
//! - le signe placé devant un '√' sans degré lie le degré implicite : "-√4" échoue.
//! - aucun parcours d’arbre n’utilise la pile d’appels : la profondeur n’est bornée
//!   que par la mémoire (voir les tests `sci_stress_*`).

use std::time::{Duration, Instant};

use super::{eval_expression, evaluate, interpret, parse, ErreurCalcul, ErreurEval};

fn eval_ok(expr: &str) -> f64 {
    evaluate(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .unwrap_or_else(|| panic!("expr={expr:?} : résultat vide"))
}

fn eval_err(expr: &str) -> ErreurEval {
    match evaluate(expr) {
        Err(ErreurCalcul::Evaluation(e)) => e,
        autre => panic!("expr={expr:?} : erreur d’évaluation attendue, obtenu {autre:?}"),
    }
}

fn indices(expr: &str) -> Vec<usize> {
    match evaluate(expr) {
        Err(e) => e
            .indices()
            .map(|i| i.iter().copied().collect())
            .unwrap_or_else(|| panic!("expr={expr:?} : pas d’indices dans {e}")),
        Ok(v) => panic!("expr={expr:?} : erreur de syntaxe attendue, obtenu {v:?}"),
    }
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    let tol = 1e-9 * attendu.abs().max(1.0);
    assert!((v - attendu).abs() <= tol, "expr={expr:?} v={v} attendu={attendu}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Priorités et associativité ------------------------ */

#[test]
fn sci_priorites() {
    assert_eq!(eval_ok("2+3*4"), 14.0);
    assert_eq!(eval_ok("2*3+4"), 10.0);
    assert_eq!(eval_ok("2+12/4*3"), 11.0);
    assert_eq!(eval_ok("1+7%4"), 4.0);

    // '^' au-dessus de '*', '√' entre les deux
    assert_eq!(eval_ok("3*2^3"), 24.0);
    assert_proche("2*√16", 8.0);
    assert_proche("3√2^3", 2.0);
}

#[test]
fn sci_associativite() {
    // gauche
    assert_eq!(eval_ok("10-2-3"), 5.0);
    assert_eq!(eval_ok("100/10/5"), 2.0);
    assert_eq!(eval_ok("100%7%4"), 2.0);

    // droite
    assert_eq!(eval_ok("2^3^2"), 512.0);
    assert_proche("√√√√65536", 2.0);
}

#[test]
fn sci_signes_unaires() {
    assert_eq!(eval_ok("-3+5"), 2.0);
    assert_eq!(eval_ok("+3"), 3.0);
    assert_eq!(eval_ok("---3"), -3.0);
    assert_eq!(eval_ok("2*-(1+2)"), -6.0);
    // le signe lie plus fort que '^'
    assert_eq!(eval_ok("-2^2"), 4.0);
    assert_eq!(eval_err("-3!"), ErreurEval::NegativeFactorial);
}

#[test]
fn sci_signe_devant_racine_implicite() {
    // le signe lie le degré implicite "2" : (-2)√4
    assert_eq!(eval_err("-√4"), ErreurEval::NegativeDegree(-2));
    assert_eq!(eval_err("2*-√4"), ErreurEval::NegativeDegree(-2));
    assert_eq!(eval_ok("+√4"), 2.0);

    // pour l’opposé de la racine : parenthèses, ou moins binaire
    assert_eq!(eval_ok("-(√4)"), -2.0);
    assert_eq!(eval_ok("0-√4"), -2.0);
    assert_eq!(eval_ok("1-√4"), -1.0);
}

/* ------------------------ Valeur absolue ------------------------ */

#[test]
fn sci_valeur_absolue() {
    assert_eq!(eval_ok("|-3|*|-4|"), 12.0);
    assert_eq!(eval_ok("||5|+1|"), 6.0);
    assert_eq!(eval_ok("|2-7|!"), 120.0);
    assert_eq!(eval_ok("|(1-4)*2|"), 6.0);
}

/* ------------------------ Domaines des primitives ------------------------ */

#[test]
fn sci_modulo_signe_du_diviseur() {
    assert_eq!(eval_ok("7%3"), 1.0);
    assert_eq!(eval_ok("-7%3"), 2.0);
    assert_eq!(eval_ok("7%-3"), -2.0);
    assert_eq!(eval_ok("-7%-3"), -1.0);
    assert_eq!(eval_err("7%0"), ErreurEval::DivideByZero);
}

#[test]
fn sci_factorielle_bornes() {
    assert_eq!(eval_ok("0!"), 1.0);
    assert_eq!(eval_ok("20!"), 2_432_902_008_176_640_000.0);
    assert_eq!(eval_err("21!"), ErreurEval::FactorialTooBig);
    // partie entière
    assert_eq!(eval_ok("4,5!"), 24.0);
}

#[test]
fn sci_puissance_bornes() {
    assert_eq!(eval_ok("0^3"), 0.0);
    assert_eq!(eval_ok("7^0"), 1.0);
    assert_eq!(eval_err("0^0"), ErreurEval::UndefinedResult);
    assert!(matches!(
        eval_err("10^400"),
        ErreurEval::ResultTooLarge { exposant, .. } if exposant == "400"
    ));
}

#[test]
fn sci_operandes_hors_entiers_64_bits() {
    // 99999999999999999999 s’arrondit à 1e20, hors de i64
    assert_eq!(
        eval_err("99999999999999999999√8"),
        ErreurEval::DegreeOutOfRange("100000000000000000000.000".into())
    );
    assert!(matches!(
        eval_err("2^99999999999999999999"),
        ErreurEval::ResultTooLarge { exposant, .. } if exposant == "100000000000000000000.000"
    ));
    assert_eq!(eval_ok("1^99999999999999999999"), 1.0);
    assert_eq!(eval_ok("0^99999999999999999999"), 0.0);

    // littéral au-delà de f64::MAX => inf, et inf - inf => NaN
    let inf = format!("1{}", "0".repeat(400));
    assert_eq!(
        eval_err(&format!("({inf}-{inf})√8")),
        ErreurEval::NotANumber("le degré".into())
    );
    assert_eq!(
        eval_err(&format!("√({inf}-{inf})")),
        ErreurEval::NotANumber("le radicande".into())
    );
    assert_eq!(
        eval_err(&format!("({inf}-{inf})!")),
        ErreurEval::NotANumber("la factorielle".into())
    );
}

#[test]
fn sci_racine_inverse_de_la_puissance() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    for degre in 2..=6 {
        for x in [2, 3, 5, 10] {
            budget(t0, max);
            assert_proche(&format!("{degre}√{x}^{degre}"), f64::from(x));
        }
    }
}

#[test]
fn sci_racine_domaines() {
    assert_proche("3√(0-8)", -2.0);
    assert!(matches!(
        eval_err("√(0-4)"),
        ErreurEval::NegativeRadicand { degre: 2, .. }
    ));
    assert_eq!(eval_err("0√4"), ErreurEval::ZerothRoot);
    assert_eq!(eval_err("(0-2)√4"), ErreurEval::NegativeDegree(-2));
}

#[test]
fn sci_premiere_erreur_a_gauche() {
    // gauche avant droite : la factorielle échoue avant la division
    assert_eq!(eval_err("(0-1)!+1/0"), ErreurEval::NegativeFactorial);
    assert_eq!(eval_err("1/0+(0-1)!"), ErreurEval::DivideByZero);
}

/* ------------------------ Positions d’erreur ------------------------ */

#[test]
fn sci_positions_erreur() {
    assert_eq!(indices(")"), vec![0]);
    assert_eq!(indices("(1+2"), vec![0]);
    assert_eq!(indices("1+2)"), vec![3]);
    assert_eq!(indices("2+*3"), vec![2]);
    assert_eq!(indices("2(3)"), vec![1]);
    // indices en caractères, pas en octets
    assert_eq!(indices("√a√4"), vec![1]);
}

#[test]
fn sci_vide() {
    assert_eq!(evaluate(""), Ok(None));
    assert_eq!(evaluate(" \t "), Ok(None));
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["1"; 400].join("+");
    budget(t0, max);

    assert_eq!(eval_ok(&expr), 400.0);
    budget(t0, max);
}

#[test]
fn sci_stress_somme_tres_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // arbre penché à gauche, profondeur 100 000
    let expr = "1+".repeat(100_000) + "1";

    let arbre = parse(&expr)
        .unwrap_or_else(|e| panic!("parse: {e}"))
        .unwrap_or_else(|| panic!("parse: arbre vide"));
    assert_eq!(arbre.taille(), 200_001);
    assert_eq!(interpret(Some(&arbre)), Ok(100_001.0));
    drop(arbre);
    budget(t0, max);

    assert_eq!(eval_ok(&expr), 100_001.0);
    budget(t0, max);

    let (v, d) = eval_expression(&expr).unwrap_or_else(|(e, _)| panic!("eval_expression: {e}"));
    assert_eq!(v, Some(100_001.0));
    assert!(d.arbre.ends_with("1 + 1) + 1"));
    budget(t0, max);
}

#[test]
fn sci_stress_erreur_au_fond_d_un_arbre_profond() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // penché à gauche, la division par zéro tout au fond
    let expr = format!("1/0+{}", "2-".repeat(50_000) + "2");
    assert_eq!(eval_err(&expr), ErreurEval::DivideByZero);
    budget(t0, max);

    let profond = format!("{}1+1{}", "(".repeat(50_000), ")".repeat(50_000));
    assert_eq!(eval_ok(&profond), 2.0);
    budget(t0, max);
}

#[test]
fn sci_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let n = 200;
    let expr = format!("{}1+1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(eval_ok(&expr), 2.0);
    budget(t0, max);
}

#[test]
fn sci_stress_gros_nombres() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let gros = "9".repeat(100);
    let v = eval_ok(&format!("{gros}/{gros}"));
    assert_eq!(v, 1.0);
    budget(t0, max);
}
