// src/noyau/operateur.rs
//
// Opérateurs binaires + niveaux de priorité.
//
// Règle: le niveau le plus prioritaire gagne, puis le plus à gauche dans ce niveau
// (y compris pour ^ : a^b^c = (a^b)^c, comportement conservé tel quel).

use std::fmt;

use super::erreurs::ErreurCalcul;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance, // ^
}

impl Operateur {
    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
            Operateur::Puissance => '^',
        }
    }

    /// Niveau de priorité (0 = le plus prioritaire).
    pub fn priorite(self) -> usize {
        match self {
            Operateur::Puissance => 0,
            Operateur::Fois | Operateur::Divise => 1,
            Operateur::Plus | Operateur::Moins => 2,
        }
    }
}

impl TryFrom<char> for Operateur {
    type Error = ErreurCalcul;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Operateur::Plus),
            '-' => Ok(Operateur::Moins),
            '*' => Ok(Operateur::Fois),
            '/' => Ok(Operateur::Divise),
            '^' => Ok(Operateur::Puissance),
            _ => Err(ErreurCalcul::ExpressionInvalide(format!(
                "opérateur inconnu {c:?}"
            ))),
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbole())
    }
}
