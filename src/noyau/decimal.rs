// src/noyau/decimal.rs
//
// Décimal à virgule fixe : entier “scalé” (mantisse × 10^-echelle).
// - addition / soustraction : échelle = max des deux
// - multiplication          : échelle = somme des deux
// - division                : `precision` chiffres significatifs, arrondi au pair
//                             (si le quotient est exact, on retire les zéros
//                              jusqu'à l'échelle idéale max(0, ea - eb))
//
// Égalité NUMÉRIQUE : 0.8 == 0.80.
// Échelle bornée par ECHELLE_MAX (sinon EchelleTropGrande).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use std::fmt;
use std::str::FromStr;

use super::erreurs::ErreurCalcul;
use super::nombre::verifie_taille_puissance;
use super::reglages::ECHELLE_MAX;

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

fn echelle_bornee(e: u64) -> Result<u32, ErreurCalcul> {
    u32::try_from(e)
        .ok()
        .filter(|&e| e <= ECHELLE_MAX)
        .ok_or(ErreurCalcul::EchelleTropGrande(e))
}

/// Nombre de chiffres décimaux de |x| (0 n'a aucun chiffre significatif).
fn nb_chiffres(x: &BigInt) -> usize {
    if x.is_zero() {
        return 0;
    }
    x.abs().to_str_radix(10).len()
}

#[derive(Clone, Debug)]
pub struct Decimal {
    mantisse: BigInt,
    echelle: u32,
}

impl Decimal {
    pub fn new(mantisse: BigInt, echelle: u32) -> Self {
        Self { mantisse, echelle }
    }

    pub fn from_entier(n: BigInt) -> Self {
        Self::new(n, 0)
    }

    pub fn is_zero(&self) -> bool {
        self.mantisse.is_zero()
    }

    pub fn est_negatif(&self) -> bool {
        self.mantisse.is_negative()
    }

    /// Valeur exacte : mantisse / 10^echelle.
    pub fn to_rationnel(&self) -> BigRational {
        BigRational::new(self.mantisse.clone(), pow10(self.echelle))
    }

    /// n/d -> décimal (division à `precision` chiffres significatifs).
    pub fn from_rationnel(r: &BigRational, precision: usize) -> Self {
        // denom > 0 (num_rational normalise)
        quotient(r.numer(), r.denom(), 0, precision)
    }

    /// Entier exact si la partie fractionnaire est nulle.
    pub fn as_entier(&self) -> Option<BigInt> {
        let scale = pow10(self.echelle);
        if (&self.mantisse % &scale).is_zero() {
            Some(&self.mantisse / scale)
        } else {
            None
        }
    }

    /// Ramène deux mantisses sur la même échelle.
    fn aligne(&self, autre: &Decimal) -> (BigInt, BigInt, u32) {
        let e = self.echelle.max(autre.echelle);
        let a = &self.mantisse * pow10(e - self.echelle);
        let b = &autre.mantisse * pow10(e - autre.echelle);
        (a, b, e)
    }

    pub fn plus(&self, autre: &Decimal) -> Result<Decimal, ErreurCalcul> {
        echelle_bornee(u64::from(self.echelle.max(autre.echelle)))?;
        let (a, b, e) = self.aligne(autre);
        Ok(Decimal::new(a + b, e))
    }

    pub fn moins(&self, autre: &Decimal) -> Result<Decimal, ErreurCalcul> {
        echelle_bornee(u64::from(self.echelle.max(autre.echelle)))?;
        let (a, b, e) = self.aligne(autre);
        Ok(Decimal::new(a - b, e))
    }

    pub fn fois(&self, autre: &Decimal) -> Result<Decimal, ErreurCalcul> {
        let e = echelle_bornee(u64::from(self.echelle) + u64::from(autre.echelle))?;
        Ok(Decimal::new(&self.mantisse * &autre.mantisse, e))
    }

    pub fn divise(&self, autre: &Decimal, precision: usize) -> Result<Decimal, ErreurCalcul> {
        if autre.is_zero() {
            return Err(ErreurCalcul::DivisionParZero);
        }
        echelle_bornee(u64::from(self.echelle.max(autre.echelle)))?;
        // (ma / 10^ea) / (mb / 10^eb) = (ma * 10^eb) / (mb * 10^ea)
        let n = &self.mantisse * pow10(autre.echelle);
        let d = &autre.mantisse * pow10(self.echelle);
        let ideal = self.echelle.saturating_sub(autre.echelle);
        let q = quotient(&n, &d, ideal, precision);
        echelle_bornee(u64::from(q.echelle))?;
        Ok(q)
    }

    /// x^n (n entier). Exposant négatif => 1 / x^|n| (division décimale).
    pub fn puissance(&self, n: &BigInt, precision: usize) -> Result<Decimal, ErreurCalcul> {
        let e = n
            .abs()
            .to_u32()
            .ok_or_else(|| ErreurCalcul::ExposantNonSupporte(format!("{n} (trop grand)")))?;
        let echelle = echelle_bornee(u64::from(self.echelle) * u64::from(e))?;
        verifie_taille_puissance(self.mantisse.bits(), e)?;

        let pos = Decimal::new(self.mantisse.pow(e), echelle);
        if n.is_negative() {
            Decimal::from_entier(BigInt::from(1)).divise(&pos, precision)
        } else {
            Ok(pos)
        }
    }
}

/// Quotient n/d (d ≠ 0) arrondi à `precision` chiffres significatifs (au pair).
fn quotient(n: &BigInt, d: &BigInt, ideal: u32, precision: usize) -> Decimal {
    let precision = precision.max(1);
    let neg = n.is_negative() != d.is_negative();
    let n = n.abs();
    let d = d.abs();

    if n.is_zero() {
        return Decimal::new(BigInt::zero(), ideal);
    }

    // floor(n * 10^s / d) avec s possiblement négatif ; renvoie (t, reste, diviseur)
    let tronque = |s: i64| -> (BigInt, BigInt, BigInt) {
        let (num, den) = if s >= 0 {
            (&n * pow10(s as u32), d.clone())
        } else {
            (n.clone(), &d * pow10((-s) as u32))
        };
        (&num / &den, &num % &den, den)
    };

    // estimation : log10(n/d) ∈ {k-1, k}
    let k = nb_chiffres(&n) as i64 - nb_chiffres(&d) as i64;
    let mut s = precision as i64 - 1 - k;

    let (mut t, r, den) = loop {
        let (t, r, den) = tronque(s);
        let c = nb_chiffres(&t);
        if c < precision {
            s += 1;
        } else if c > precision {
            s -= 1;
        } else {
            break (t, r, den);
        }
    };

    let exact = r.is_zero();
    if !exact {
        let double = &r * 2u32;
        let impair = !(&t % 2u32).is_zero();
        if double > den || (double == den && impair) {
            t += 1u32;
            // 9.99… -> 10.0… : un chiffre de trop, le dernier est un zéro
            if nb_chiffres(&t) > precision {
                t /= 10u32;
                s -= 1;
            }
        }
    } else {
        let dix = BigInt::from(10);
        while s > ideal as i64 && (&t % &dix).is_zero() {
            t /= 10u32;
            s -= 1;
        }
    }

    if s < 0 {
        t *= pow10((-s) as u32);
        s = 0;
    }

    if neg {
        t = -t;
    }
    Decimal::new(t, s as u32)
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (a, b, _) = self.aligne(other);
        a == b
    }
}

impl Eq for Decimal {}

/* ------------------------ Texte ------------------------ */

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signe = if self.est_negatif() { "-" } else { "" };
        let mut chiffres = self.mantisse.abs().to_str_radix(10);

        if self.echelle == 0 {
            return write!(f, "{signe}{chiffres}");
        }

        let echelle = self.echelle as usize;
        if chiffres.len() <= echelle {
            chiffres = format!("{}{chiffres}", "0".repeat(echelle + 1 - chiffres.len()));
        }
        let (ent, frac) = chiffres.split_at(chiffres.len() - echelle);
        write!(f, "{signe}{ent}.{frac}")
    }
}

/// Lecture d'un littéral décimal simple : `12`, `-3.1`, `.5`, `+0.80`.
/// Pas d'exposant (`1e5` refusé).
impl FromStr for Decimal {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalide = || ErreurCalcul::DecimalInvalide(s.to_string());

        let t = s.trim();
        let (neg, corps) = match t.as_bytes().first() {
            Some(b'-') => (true, &t[1..]),
            Some(b'+') => (false, &t[1..]),
            _ => (false, t),
        };

        let (ent, frac) = match corps.split_once('.') {
            Some((a, b)) => (a, b),
            None => (corps, ""),
        };

        if ent.is_empty() && frac.is_empty() {
            return Err(invalide());
        }
        if !ent.bytes().chain(frac.bytes()).all(|c| c.is_ascii_digit()) {
            return Err(invalide());
        }

        let echelle = echelle_bornee(frac.len() as u64)?;
        let chiffres = format!("{ent}{frac}");
        let mut mantisse = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
        if neg {
            mantisse = -mantisse;
        }
        Ok(Decimal::new(mantisse, echelle))
    }
}
