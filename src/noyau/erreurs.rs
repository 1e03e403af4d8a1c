// src/noyau/erreurs.rs
//
// Erreurs du noyau.
// - LimiteEvaluations : garde-fou anti-boucle (entrée malformée / cyclique)
// - les autres : entrées hors domaine (division par zéro, mélange de représentations…)
//
// NOTE: "plus rien à réduire" n'est PAS une erreur (voir expression::Pas).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("nombre maximal d'évaluations atteint ({0})")]
    LimiteEvaluations(usize),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("représentations incompatibles : {gauche} {op} {droite}")]
    RepresentationsIncompatibles {
        gauche: &'static str,
        op: char,
        droite: &'static str,
    },

    #[error("exposant non supporté : {0}")]
    ExposantNonSupporte(String),

    #[error("échelle décimale trop grande ({0} chiffres après la virgule)")]
    EchelleTropGrande(u64),

    #[error("expression invalide : {0}")]
    ExpressionInvalide(String),

    #[error("décimal invalide : {0:?}")]
    DecimalInvalide(String),

    #[error("écriture de la démarche impossible : {0}")]
    Ecriture(String),
}

impl From<std::io::Error> for ErreurCalcul {
    fn from(e: std::io::Error) -> Self {
        ErreurCalcul::Ecriture(e.to_string())
    }
}
