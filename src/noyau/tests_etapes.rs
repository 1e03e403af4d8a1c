//! Tests de scénario : réduction pas à pas sur des expressions types.
//!
//! Chaque test vérifie la suite exacte des éléments après chaque appel à eval_once,
//! puis le signal Termine une fois l'expression réduite.

use num_bigint::BigInt;
use num_rational::BigRational;
use pretty_assertions::assert_eq;

use super::Operateur::*;
use super::{Decimal, Element, ErreurCalcul, Expression, Nombre, Pas};
use crate::expression;

fn init_journal() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap_or_else(|e| panic!("{s:?}: {e}"))
}

/// Un pas, puis comparaison structurelle avec `attendu`.
fn pas(e: &mut Expression, attendu: Expression) {
    assert_eq!(e.eval_once(), Ok(Pas::Reduit), "depuis {e}");
    assert_eq!(*e, attendu);
}

fn assert_termine(e: &mut Expression) {
    assert!(e.is_done());
    assert_eq!(e.eval_once(), Ok(Pas::Termine));
}

fn exemple_complet() -> Expression {
    expression![
        -63,
        Divise,
        expression![2, Puissance, 3, Plus, 1],
        Fois,
        expression![2, Moins, 3, Divise, 4]
    ]
}

#[test]
fn addition_simple() {
    init_journal();
    let mut e = expression![1, Plus, 2];
    pas(&mut e, expression![3]);
    assert_termine(&mut e);
}

#[test]
fn egalite_structurelle() {
    assert_eq!(Expression::feuille(3), Expression::feuille(3));
    assert_eq!(expression![3], Expression::feuille(3));
    assert_ne!(Expression::feuille(3), Expression::feuille(4));
    // longueurs différentes
    assert_ne!(expression![3], expression![3, Plus, 0]);
    assert_ne!(expression![1, Plus, 2], expression![1, Moins, 2]);
    // imbrication comparée par la même règle
    assert_eq!(
        expression![2, Fois, expression![-6]],
        expression![2, Fois, expression![-6]]
    );
    assert_ne!(expression![2, Fois, expression![-6]], expression![2, Fois, -6]);
}

#[test]
fn rendu_priorites() {
    let e = expression![1, Plus, -2, Fois, expression![-4, Plus, 2], Puissance, 3];
    assert_eq!(e.to_string(), "1+(-2)*((-4)+2)^3");
}

#[test]
fn rendu_sous_expressions_terminees() {
    assert_eq!(expression![2, Fois, expression![-6]].to_string(), "2*(-6)");
    assert_eq!(expression![2, Fois, expression![6]].to_string(), "2*6");
    assert_eq!(expression![rat(-35, 4)].to_string(), "-35/4");
    assert_eq!(expression![1, Plus, rat(-1, 3)].to_string(), "1+(-1/3)");
}

#[test]
fn addition_et_multiplication() {
    let mut e = expression![1, Plus, -2, Fois, 4];
    pas(&mut e, expression![1, Plus, -8]);
    pas(&mut e, expression![-7]);
    assert_termine(&mut e);
}

#[test]
fn fractions() {
    let mut e = expression![2, Moins, rat(11, 4), Divise, rat(-7, 3)];
    pas(&mut e, expression![2, Moins, rat(-33, 28)]);
    assert_eq!(e.to_string(), "2-(-33/28)");
    pas(&mut e, expression![rat(89, 28)]);
    assert_eq!(e.to_string(), "89/28");
}

#[test]
fn decimaux() {
    let mut e = expression![dec("0.8"), Puissance, 4, Divise, dec("-3.1")];
    pas(&mut e, expression![dec("0.4096"), Divise, dec("-3.1")]);
    assert_eq!(e.eval_once(), Ok(Pas::Reduit));
    assert_eq!(e.to_string(), "-0.1321290322580645161290322581");
}

#[test]
fn vers_fractions() {
    let mut e = expression![dec("0.8"), Puissance, 4, Plus, dec("-3.1")];
    e.to_fraction_expression();
    assert_eq!(e, expression![rat(4, 5), Puissance, 4, Plus, rat(-31, 10)]);
    assert!(matches!(e.get_elements()[0], Element::Nombre(Nombre::Rationnel(_))));
    assert!(matches!(e.get_elements()[2], Element::Nombre(Nombre::Entier(_))));
}

#[test]
fn vers_decimaux() {
    let mut e = expression![rat(4, 5), Puissance, 4, Plus, rat(-31, 10)];
    e.to_decimal_expression();
    assert_eq!(e, expression![dec("0.8"), Puissance, 4, Plus, dec("-3.1")]);
    assert_eq!(e.to_string(), "0.8^4+(-3.1)");
}

#[test]
fn conversions_recursives_aller_retour() {
    let origine = expression![dec("0.8"), Fois, expression![dec("-3.1"), Plus, 1]];
    let mut e = origine.clone();
    e.to_fraction_expression();
    assert_eq!(e.to_string(), "4/5*((-31/10)+1)");
    e.to_decimal_expression();
    assert_eq!(e.to_string(), origine.to_string());
    assert_eq!(e, origine);
}

#[test]
fn quatre_operations_melangees() {
    let mut e = expression![2, Moins, -2, Fois, 4, Plus, 3, Divise, 6];
    pas(&mut e, expression![2, Moins, -8, Plus, 3, Divise, 6]);
    // 3/6 entier non exact => rationnel 1/2 (égal à 0.5)
    pas(&mut e, expression![2, Moins, -8, Plus, rat(1, 2)]);
    assert_eq!(e, expression![2, Moins, -8, Plus, 0.5]);
    pas(&mut e, expression![10, Plus, rat(1, 2)]);
    pas(&mut e, expression![rat(21, 2)]);
    assert_eq!(e, expression![10.5]);
}

#[test]
fn exposant() {
    let mut e = expression![2, Moins, -2, Fois, 4, Puissance, 3];
    pas(&mut e, expression![2, Moins, -2, Fois, 64]);
    pas(&mut e, expression![2, Moins, -128]);
    pas(&mut e, expression![130]);
}

#[test]
fn exposant_associatif_a_gauche() {
    // (2^3)^2 = 64, et non 2^(3^2) = 512
    let mut e = expression![2, Puissance, 3, Puissance, 2];
    assert_eq!(e.eval_full(), Ok(Nombre::from(64)));
}

#[test]
fn parentheses_simples() {
    let mut e = expression![2, Fois, expression![1, Moins, 7]];
    pas(&mut e, expression![2, Fois, expression![-6]]);
    // repli + multiplication dans le même appel
    pas(&mut e, expression![-12]);
}

#[test]
fn parentheses_imbriquees() {
    let mut e = expression![72, Divise, expression![2, Puissance, 3, Plus, 1]];
    pas(&mut e, expression![72, Divise, expression![8, Plus, 1]]);
    assert_eq!(e.to_string(), "72/(8+1)");
    pas(&mut e, expression![72, Divise, expression![9]]);
    assert_eq!(e.to_string(), "72/9");
    pas(&mut e, expression![8]);
    assert_termine(&mut e);
}

#[test]
fn evaluation_complete() {
    init_journal();
    let mut e = exemple_complet();
    let v = e.eval_full().unwrap();
    assert_eq!(v, Nombre::Flottant(-8.75));
    assert_eq!(v.to_string(), "-35/4");
    assert!(e.is_done());
}

#[test]
fn demarche_six_lignes() {
    let mut e = exemple_complet();
    let mut sortie: Vec<u8> = Vec::new();
    e.ecrire_etapes(&mut sortie).unwrap();
    let texte = String::from_utf8(sortie).unwrap();

    assert_eq!(texte.matches('=').count(), 6);
    assert_eq!(
        texte.lines().collect::<Vec<_>>(),
        vec![
            "(-63)/(2^3+1)*(2-3/4)",
            "=(-63)/(8+1)*(2-3/4)",
            "=(-63)/9*(2-3/4)",
            "=(-63)/9*(2-3/4)",
            "=(-63)/9*5/4",
            "=(-7)*5/4",
            "=-35/4",
        ]
    );
    assert!(texte.trim_end().ends_with("-35/4"));
}

#[test]
fn melange_non_supporte() {
    let mut e = expression![rat(1, 2), Plus, dec("0.5")];
    assert!(matches!(
        e.eval_once(),
        Err(ErreurCalcul::RepresentationsIncompatibles { .. })
    ));
    // conversion préalable : ok
    e.to_fraction_expression();
    assert_eq!(e.eval_full(), Ok(Nombre::from(1)));
}

#[test]
fn elements_consommes() {
    let e = expression![1, Plus, 2];
    let elements = e.into_elements();
    assert_eq!(elements.len(), 3);
    assert_eq!(Expression::from(elements), expression![1, Plus, 2]);
}

#[test]
fn tailles_demesurees_refusees_sans_panique() {
    // 0.1^(2^32-1) : mantisse 1 mais échelle hors borne
    let mut e = expression![dec("0.1"), Puissance, 4_294_967_295i64, Fois, dec("0.1")];
    assert_eq!(
        e.eval_full(),
        Err(ErreurCalcul::EchelleTropGrande(4_294_967_295))
    );

    let mut e = expression![2, Puissance, 4_294_967_295i64];
    assert!(matches!(e.eval_full(), Err(ErreurCalcul::ExposantNonSupporte(_))));
}
