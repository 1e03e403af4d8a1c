// src/main.rs
//
// Calculatrice pas à pas — démonstration en terminal
// --------------------------------------------------
// Affiche la démarche de quelques expressions types (une ligne par réduction).
// RUST_LOG=debug pour voir chaque opération appliquée.

use calculatrice_etapes::expression;
use calculatrice_etapes::noyau::Operateur::*;
use calculatrice_etapes::{Decimal, ErreurCalcul, Expression};

use log::info;

fn exemples() -> Result<Vec<(&'static str, Expression)>, ErreurCalcul> {
    let d = |s: &str| s.parse::<Decimal>();

    Ok(vec![
        (
            "priorités",
            expression![1, Plus, -2, Fois, expression![-4, Plus, 2], Puissance, 3],
        ),
        (
            "parenthèses",
            expression![72, Divise, expression![2, Puissance, 3, Plus, 1]],
        ),
        (
            "division exacte",
            expression![
                -63,
                Divise,
                expression![2, Puissance, 3, Plus, 1],
                Fois,
                expression![2, Moins, 3, Divise, 4]
            ],
        ),
        (
            "décimaux",
            expression![d("0.8")?, Puissance, 4, Divise, d("-3.1")?],
        ),
    ])
}

fn main() -> Result<(), ErreurCalcul> {
    env_logger::init();

    for (titre, mut expr) in exemples()? {
        info!("exemple : {titre}");
        println!("# {titre}");
        expr.print_full_steps()?;
        println!();
    }
    Ok(())
}
