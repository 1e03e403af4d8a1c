//! src/noyau/reglages.rs
//!
//! Réglages du noyau (sans évaluation).
//!
//! Rôle : porter les deux paramètres qui bornent le travail du moteur :
//! - nombre maximal de réductions (garde-fou anti-boucle)
//! - précision des divisions décimales (chiffres significatifs)
//!
//! Défense en profondeur : les setters bornent les valeurs (anti-abus / anti-gel).

/// Nombre de réductions par défaut avant abandon.
pub const MAX_EVALUATIONS: usize = 50_000;

/// Garde-fou : plafond absolu du nombre de réductions.
pub const MAX_EVALUATIONS_PLAFOND: usize = 10_000_000;

/// Chiffres significatifs par défaut d'une division décimale.
pub const PRECISION_DEFAUT: usize = 28;

/// Garde-fou : on borne la précision.
pub const PRECISION_MAX: usize = 1_000;

/// Garde-fou : chiffres après la virgule d'un décimal (rendu et alignement restent bornés).
pub const ECHELLE_MAX: u32 = 100_000;

/// Garde-fou : taille (en bits) estimée du résultat d'une puissance entière.
pub const BITS_PUISSANCE_MAX: u64 = 1 << 22;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub max_evaluations: usize,
    pub precision_decimale: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            max_evaluations: MAX_EVALUATIONS,
            precision_decimale: PRECISION_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn avec_max_evaluations(mut self, n: usize) -> Self {
        self.set_max_evaluations(n);
        self
    }

    pub fn avec_precision(mut self, chiffres: usize) -> Self {
        self.set_precision(chiffres);
        self
    }

    /// Au moins une réduction, jamais au-delà du plafond.
    pub fn set_max_evaluations(&mut self, n: usize) {
        self.max_evaluations = n.clamp(1, MAX_EVALUATIONS_PLAFOND);
    }

    pub fn set_precision(&mut self, chiffres: usize) {
        self.precision_decimale = chiffres.clamp(1, PRECISION_MAX);
    }
}
