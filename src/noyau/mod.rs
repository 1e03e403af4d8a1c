//! Noyau : évaluation pas à pas
//!
//! Organisation interne :
//! - nombre.rs     : feuilles numériques (entier, rationnel, décimal, flottant) + arithmétique
//! - decimal.rs    : décimal à virgule fixe (entier scalé)
//! - operateur.rs  : + - * / ^ et niveaux de priorité
//! - expression.rs : suite d'éléments + réduction d'un pas + rendu
//! - demarche.rs   : trace complète ("=" à chaque pas)
//! - reglages.rs   : bornes (évaluations, précision décimale)
//! - erreurs.rs    : ErreurCalcul

pub mod decimal;
pub mod demarche;
pub mod erreurs;
pub mod expression;
pub mod nombre;
pub mod operateur;
pub mod reglages;

#[cfg(test)]
mod tests_etapes;


// API publique
pub use decimal::Decimal;
pub use demarche::Demarche;
pub use erreurs::ErreurCalcul;
pub use expression::{Element, Expression, Pas};
pub use nombre::Nombre;
pub use operateur::Operateur;
pub use reglages::Reglages;
