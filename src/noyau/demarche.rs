// src/noyau/demarche.rs
//
// Démarche : trace ligne par ligne d'une réduction complète.
// - 1re ligne : rendu initial
// - puis une ligne "=<rendu>" après chaque réduction
//
// Même borne et même déballage d'une sous-expression seule que eval_full :
// les deux aboutissent à la même valeur.

use log::warn;

use std::fmt;
use std::io::{self, Write};

use super::erreurs::ErreurCalcul;
use super::expression::Expression;
use super::reglages::Reglages;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Demarche {
    pub lignes: Vec<String>,
}

impl Demarche {
    /// Nombre de lignes "=…" (réductions effectuées).
    pub fn nb_reductions(&self) -> usize {
        self.lignes.len().saturating_sub(1)
    }

    /// Dernier rendu, sans le "=" de tête.
    pub fn resultat(&self) -> Option<&str> {
        self.lignes
            .last()
            .map(|l| l.strip_prefix('=').unwrap_or(l))
    }
}

impl fmt::Display for Demarche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for l in &self.lignes {
            writeln!(f, "{l}")?;
        }
        Ok(())
    }
}

impl Expression {
    /// Déroule la réduction et passe chaque ligne à `emettre`.
    /// Retourne le nombre de réductions.
    fn derouler<F>(&mut self, reglages: &Reglages, mut emettre: F) -> Result<usize, ErreurCalcul>
    where
        F: FnMut(String) -> Result<(), ErreurCalcul>,
    {
        emettre(self.to_string())?;
        let mut nb = 0;
        // le déballage ne change pas le rendu : pas de ligne
        while !self.termine_et_deballe() {
            if nb == reglages.max_evaluations {
                warn!(
                    "démarche interrompue après {} évaluations",
                    reglages.max_evaluations
                );
                return Err(ErreurCalcul::LimiteEvaluations(reglages.max_evaluations));
            }
            self.eval_once_avec(reglages)?;
            nb += 1;
            emettre(format!("={}", self))?;
        }
        Ok(nb)
    }

    pub fn demarche(&mut self) -> Result<Demarche, ErreurCalcul> {
        self.demarche_avec(&Reglages::default())
    }

    pub fn demarche_avec(&mut self, reglages: &Reglages) -> Result<Demarche, ErreurCalcul> {
        let mut d = Demarche::default();
        self.derouler(reglages, |l| {
            d.lignes.push(l);
            Ok(())
        })?;
        Ok(d)
    }

    pub fn ecrire_etapes<W: Write>(&mut self, sortie: &mut W) -> Result<usize, ErreurCalcul> {
        self.ecrire_etapes_avec(sortie, &Reglages::default())
    }

    /// Écrit chaque ligne dès qu'elle est produite.
    pub fn ecrire_etapes_avec<W: Write>(
        &mut self,
        sortie: &mut W,
        reglages: &Reglages,
    ) -> Result<usize, ErreurCalcul> {
        let n = self.derouler(reglages, |l| {
            writeln!(sortie, "{l}")?;
            Ok(())
        })?;
        sortie.flush()?;
        Ok(n)
    }

    /// Démarche complète sur la sortie standard.
    pub fn print_full_steps(&mut self) -> Result<(), ErreurCalcul> {
        let stdout = io::stdout();
        let mut verrou = stdout.lock();
        self.ecrire_etapes(&mut verrou)?;
        Ok(())
    }
}
