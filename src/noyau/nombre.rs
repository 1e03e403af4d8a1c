// src/noyau/nombre.rs
//
// Feuilles numériques : union fermée de représentations.
// - Entier    : BigInt
// - Rationnel : BigRational (exact, normalisé)
// - Decimal   : virgule fixe (voir decimal.rs)
// - Flottant  : f64 (approximation)
//
// Arithmétique : même représentation seulement, après promotion explicite :
//   Entier -> Rationnel | Decimal | Flottant, Rationnel -> Flottant.
// Rationnel/Decimal et Decimal/Flottant ne se mélangent PAS (erreur).
// Cas spécial : Entier / Entier non exact => Rationnel (jamais de flottant).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;

use super::decimal::Decimal;
use super::erreurs::ErreurCalcul;
use super::operateur::Operateur;
use super::reglages::BITS_PUISSANCE_MAX;

#[derive(Clone, Debug)]
pub enum Nombre {
    Entier(BigInt),
    Rationnel(BigRational),
    Decimal(Decimal),
    Flottant(f64),
}

/// Deux opérandes ramenés à la même représentation.
enum Paire {
    Entiers(BigInt, BigInt),
    Rationnels(BigRational, BigRational),
    Decimaux(Decimal, Decimal),
    Flottants(f64, f64),
}

impl Nombre {
    pub fn nom(&self) -> &'static str {
        match self {
            Nombre::Entier(_) => "entier",
            Nombre::Rationnel(_) => "rationnel",
            Nombre::Decimal(_) => "décimal",
            Nombre::Flottant(_) => "flottant",
        }
    }

    /// Signe : None si indéterminable (NaN).
    pub fn est_negatif(&self) -> Option<bool> {
        match self {
            Nombre::Entier(i) => Some(i.is_negative()),
            Nombre::Rationnel(r) => Some(r.is_negative()),
            Nombre::Decimal(d) => Some(d.est_negatif()),
            Nombre::Flottant(x) if x.is_nan() => None,
            Nombre::Flottant(x) => Some(*x < 0.0),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Nombre::Entier(i) => i.is_zero(),
            Nombre::Rationnel(r) => r.is_zero(),
            Nombre::Decimal(d) => d.is_zero(),
            Nombre::Flottant(x) => *x == 0.0,
        }
    }

    /// Valeur exacte (None pour NaN / infini).
    pub fn to_exact(&self) -> Option<BigRational> {
        match self {
            Nombre::Entier(i) => Some(BigRational::from_integer(i.clone())),
            Nombre::Rationnel(r) => Some(r.clone()),
            Nombre::Decimal(d) => Some(d.to_rationnel()),
            Nombre::Flottant(x) => BigRational::from_float(*x),
        }
    }

    /// Approximation flottante (NaN si hors de portée).
    pub fn to_f64(&self) -> f64 {
        match self {
            Nombre::Entier(i) => i.to_f64().unwrap_or(f64::NAN),
            Nombre::Rationnel(r) => rationnel_to_f64(r),
            Nombre::Decimal(d) => rationnel_to_f64(&d.to_rationnel()),
            Nombre::Flottant(x) => *x,
        }
    }

    /// Decimal -> Rationnel ; les autres représentations restent telles quelles.
    pub fn vers_rationnel(self) -> Nombre {
        match self {
            Nombre::Decimal(d) => Nombre::Rationnel(d.to_rationnel()),
            autre => autre,
        }
    }

    /// Rationnel -> Decimal ; les autres représentations restent telles quelles.
    pub fn vers_decimal(self, precision: usize) -> Nombre {
        match self {
            Nombre::Rationnel(r) => Nombre::Decimal(Decimal::from_rationnel(&r, precision)),
            autre => autre,
        }
    }

    /// Applique `a op b`.
    pub fn applique(
        &self,
        op: Operateur,
        autre: &Nombre,
        precision: usize,
    ) -> Result<Nombre, ErreurCalcul> {
        if op == Operateur::Puissance {
            return self.puissance(autre, precision);
        }

        let paire = promeut(self, autre, op)?;

        if op == Operateur::Divise && autre.is_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }

        let res = match paire {
            Paire::Entiers(a, b) => match op {
                Operateur::Plus => Nombre::Entier(a + b),
                Operateur::Moins => Nombre::Entier(a - b),
                Operateur::Fois => Nombre::Entier(a * b),
                // exact => entier, sinon rationnel exact
                _ => {
                    if (&a % &b).is_zero() {
                        Nombre::Entier(a / b)
                    } else {
                        Nombre::Rationnel(BigRational::new(a, b))
                    }
                }
            },
            Paire::Rationnels(a, b) => Nombre::Rationnel(match op {
                Operateur::Plus => a + b,
                Operateur::Moins => a - b,
                Operateur::Fois => a * b,
                _ => a / b,
            }),
            Paire::Decimaux(a, b) => Nombre::Decimal(match op {
                Operateur::Plus => a.plus(&b)?,
                Operateur::Moins => a.moins(&b)?,
                Operateur::Fois => a.fois(&b)?,
                _ => a.divise(&b, precision)?,
            }),
            Paire::Flottants(a, b) => Nombre::Flottant(match op {
                Operateur::Plus => a + b,
                Operateur::Moins => a - b,
                Operateur::Fois => a * b,
                _ => a / b,
            }),
        };
        Ok(res)
    }

    fn puissance(&self, exposant: &Nombre, precision: usize) -> Result<Nombre, ErreurCalcul> {
        let incompatible = || ErreurCalcul::RepresentationsIncompatibles {
            gauche: self.nom(),
            op: '^',
            droite: exposant.nom(),
        };

        match (self, exposant) {
            // décimal : seulement avec des entiers / décimaux, exposant entier
            (Nombre::Decimal(_), Nombre::Rationnel(_) | Nombre::Flottant(_))
            | (Nombre::Rationnel(_) | Nombre::Flottant(_), Nombre::Decimal(_)) => Err(incompatible()),
            (Nombre::Decimal(_), _) | (_, Nombre::Decimal(_)) => {
                let base = match self {
                    Nombre::Entier(i) => Decimal::from_entier(i.clone()),
                    Nombre::Decimal(d) => d.clone(),
                    _ => return Err(incompatible()),
                };
                let n = exposant_entier(exposant).ok_or_else(|| {
                    ErreurCalcul::ExposantNonSupporte(format!("{exposant} (décimal non entier)"))
                })?;
                Ok(Nombre::Decimal(base.puissance(&n, precision)?))
            }

            (Nombre::Flottant(_), _) | (_, Nombre::Flottant(_)) => {
                Ok(Nombre::Flottant(self.to_f64().powf(exposant.to_f64())))
            }

            (Nombre::Entier(a), _) => match exposant_entier(exposant) {
                Some(n) => {
                    let e = exposant_u32(&n)?;
                    verifie_taille_puissance(a.bits(), e)?;
                    // exposant négatif : rationnel exact plutôt que flottant (DESIGN.md, décision 7)
                    if n.is_negative() {
                        if a.is_zero() {
                            return Err(ErreurCalcul::DivisionParZero);
                        }
                        Ok(Nombre::Rationnel(BigRational::new(BigInt::one(), a.pow(e))))
                    } else {
                        Ok(Nombre::Entier(a.pow(e)))
                    }
                }
                None => Ok(Nombre::Flottant(self.to_f64().powf(exposant.to_f64()))),
            },

            (Nombre::Rationnel(r), _) => match exposant_entier(exposant) {
                Some(n) => {
                    if n.is_negative() && r.is_zero() {
                        return Err(ErreurCalcul::DivisionParZero);
                    }
                    Ok(Nombre::Rationnel(rational_pow_int(r, &n)?))
                }
                None => Ok(Nombre::Flottant(self.to_f64().powf(exposant.to_f64()))),
            },
        }
    }
}

/// Promotion vers une représentation commune (hors ^).
fn promeut(a: &Nombre, b: &Nombre, op: Operateur) -> Result<Paire, ErreurCalcul> {
    let paire = match (a, b) {
        (Nombre::Entier(x), Nombre::Entier(y)) => Paire::Entiers(x.clone(), y.clone()),

        (Nombre::Entier(x), Nombre::Rationnel(y)) => {
            Paire::Rationnels(BigRational::from_integer(x.clone()), y.clone())
        }
        (Nombre::Rationnel(x), Nombre::Entier(y)) => {
            Paire::Rationnels(x.clone(), BigRational::from_integer(y.clone()))
        }
        (Nombre::Rationnel(x), Nombre::Rationnel(y)) => Paire::Rationnels(x.clone(), y.clone()),

        (Nombre::Entier(x), Nombre::Decimal(y)) => {
            Paire::Decimaux(Decimal::from_entier(x.clone()), y.clone())
        }
        (Nombre::Decimal(x), Nombre::Entier(y)) => {
            Paire::Decimaux(x.clone(), Decimal::from_entier(y.clone()))
        }
        (Nombre::Decimal(x), Nombre::Decimal(y)) => Paire::Decimaux(x.clone(), y.clone()),

        (Nombre::Flottant(_), Nombre::Entier(_) | Nombre::Rationnel(_) | Nombre::Flottant(_))
        | (Nombre::Entier(_) | Nombre::Rationnel(_), Nombre::Flottant(_)) => {
            Paire::Flottants(a.to_f64(), b.to_f64())
        }

        (Nombre::Rationnel(_) | Nombre::Flottant(_), Nombre::Decimal(_))
        | (Nombre::Decimal(_), Nombre::Rationnel(_) | Nombre::Flottant(_)) => {
            return Err(ErreurCalcul::RepresentationsIncompatibles {
                gauche: a.nom(),
                op: op.symbole(),
                droite: b.nom(),
            })
        }
    };
    Ok(paire)
}

/// Exposant entier exact, si la représentation le permet (jamais pour un flottant).
fn exposant_entier(n: &Nombre) -> Option<BigInt> {
    match n {
        Nombre::Entier(i) => Some(i.clone()),
        Nombre::Rationnel(r) if r.denom().is_one() => Some(r.numer().clone()),
        Nombre::Decimal(d) => d.as_entier(),
        _ => None,
    }
}

/// |n| doit rentrer dans u32, sinon on refuse.
fn exposant_u32(n: &BigInt) -> Result<u32, ErreurCalcul> {
    n.abs()
        .to_u32()
        .ok_or_else(|| ErreurCalcul::ExposantNonSupporte(format!("{n} (trop grand)")))
}

/// Refuse une puissance dont le résultat dépasserait BITS_PUISSANCE_MAX
/// (estimation : (bits(base) - 1) * e ; une base ±1 ou 0 ne grossit pas).
pub(crate) fn verifie_taille_puissance(bits_base: u64, e: u32) -> Result<(), ErreurCalcul> {
    let estimation = bits_base.saturating_sub(1).saturating_mul(u64::from(e));
    if estimation > BITS_PUISSANCE_MAX {
        return Err(ErreurCalcul::ExposantNonSupporte(format!(
            "{e} (résultat trop grand, ~{estimation} bits)"
        )));
    }
    Ok(())
}

fn rational_pow_int(base: &BigRational, exp: &BigInt) -> Result<BigRational, ErreurCalcul> {
    let e = exposant_u32(exp)?;
    verifie_taille_puissance(base.numer().bits().max(base.denom().bits()), e)?;
    let pos = BigRational::new(base.numer().pow(e), base.denom().pow(e));
    if exp.is_negative() {
        Ok(pos.recip())
    } else {
        Ok(pos)
    }
}

/// Partie entière d'abord (évite inf/inf quand numérateur et dénominateur sont très longs).
fn rationnel_to_f64(r: &BigRational) -> f64 {
    let ent = r.trunc().to_integer().to_f64().unwrap_or(f64::NAN);
    let frac = r.fract();
    let n = frac.numer().to_f64().unwrap_or(f64::NAN);
    let d = frac.denom().to_f64().unwrap_or(f64::NAN);
    ent + n / d
}

/* ------------------------ Égalité numérique ------------------------ */

impl PartialEq for Nombre {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Nombre::Entier(a), Nombre::Entier(b)) => a == b,
            (Nombre::Flottant(a), Nombre::Flottant(b)) => a == b,
            _ => match (self.to_exact(), other.to_exact()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

/* ------------------------ Forme canonique ------------------------ */

impl fmt::Display for Nombre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nombre::Entier(i) => write!(f, "{i}"),
            Nombre::Rationnel(r) => {
                // négatif : '-' + forme de la valeur absolue
                let signe = if r.is_negative() { "-" } else { "" };
                let n = r.numer().abs();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{signe}{n}")
                } else {
                    write!(f, "{signe}{n}/{d}")
                }
            }
            Nombre::Decimal(d) => write!(f, "{d}"),
            // Debug : 2.0 garde son ".0", 0.5 reste 0.5
            Nombre::Flottant(x) => write!(f, "{x:?}"),
        }
    }
}

/* ------------------------ Conversions ------------------------ */

impl From<i64> for Nombre {
    fn from(i: i64) -> Self {
        Nombre::Entier(BigInt::from(i))
    }
}

impl From<BigInt> for Nombre {
    fn from(i: BigInt) -> Self {
        Nombre::Entier(i)
    }
}

impl From<BigRational> for Nombre {
    fn from(r: BigRational) -> Self {
        Nombre::Rationnel(r)
    }
}

impl From<Decimal> for Nombre {
    fn from(d: Decimal) -> Self {
        Nombre::Decimal(d)
    }
}

impl From<f64> for Nombre {
    fn from(x: f64) -> Self {
        Nombre::Flottant(x)
    }
}
