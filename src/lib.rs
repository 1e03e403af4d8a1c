//! Calculatrice pas à pas
//!
//! Une expression déjà découpée (nombres, opérateurs, sous-expressions) est réduite
//! une opération à la fois, en respectant les priorités, et chaque étape peut être
//! affichée (`1+(-2)*((-4)+2)^3`, puis `=…` à chaque pas).
//!
//! ```
//! use calculatrice_etapes::expression;
//! use calculatrice_etapes::noyau::Operateur::*;
//!
//! let mut e = expression![72, Divise, expression![2, Puissance, 3, Plus, 1]];
//! assert_eq!(e.to_string(), "72/(2^3+1)");
//! assert_eq!(e.eval_full().unwrap().to_string(), "8");
//! ```

pub mod noyau;

pub use noyau::{Decimal, Element, ErreurCalcul, Expression, Nombre, Operateur, Pas, Reglages};
