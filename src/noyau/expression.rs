// src/noyau/expression.rs
//
// Expression à plat : opérande, opérateur, opérande, … (positions impaires = opérateurs).
// Un opérande est une feuille numérique OU une sous-expression (entre parenthèses).
//
// Réduction pas à pas (eval_once) :
// 1) sous-expressions d'abord, de gauche à droite :
//    - une sous-expression terminée est repliée sur sa valeur, et on continue le parcours
//    - la première qui se réduit effectivement termine l'appel
// 2) sinon : opérateur le plus prioritaire (^, puis * /, puis + -), le plus à gauche
//    dans son niveau, appliqué à [gauche, op, droite] -> la suite rétrécit de 2.
//
// IMPORTANT:
// - "plus rien à réduire" = Pas::Termine (une valeur, pas une erreur).
// - ^ est associatif à gauche ici (a^b^c = (a^b)^c), volontairement conservé.

use log::{debug, trace, warn};
use num_bigint::BigInt;
use num_rational::BigRational;

use std::fmt;

use super::decimal::Decimal;
use super::erreurs::ErreurCalcul;
use super::nombre::Nombre;
use super::operateur::Operateur;
use super::reglages::Reglages;

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Nombre(Nombre),
    Operateur(Operateur),
    SousExpression(Expression),
}

/// Issue d'un appel à eval_once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pas {
    Reduit,
    Termine,
}

/// Égalité structurelle : même longueur, mêmes éléments dans l'ordre
/// (les feuilles se comparent numériquement, voir Nombre).
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    elements: Vec<Element>,
}

impl Expression {
    /// Aucune validation ici : une forme invalide échoue à la réduction.
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Expression déjà réduite à une seule valeur.
    pub fn feuille(n: impl Into<Nombre>) -> Self {
        Self::new(vec![Element::Nombre(n.into())])
    }

    pub fn get_elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn is_done(&self) -> bool {
        self.elements.len() == 1
    }

    /// Valeur si l'expression est terminée (sous-expressions terminées déballées).
    pub fn valeur(&self) -> Option<&Nombre> {
        if !self.is_done() {
            return None;
        }
        match &self.elements[0] {
            Element::Nombre(n) => Some(n),
            Element::SousExpression(s) => s.valeur(),
            Element::Operateur(_) => None,
        }
    }

    /* ------------------------ Réduction ------------------------ */

    pub fn eval_once(&mut self) -> Result<Pas, ErreurCalcul> {
        self.eval_once_avec(&Reglages::default())
    }

    pub fn eval_once_avec(&mut self, reglages: &Reglages) -> Result<Pas, ErreurCalcul> {
        if self.is_done() {
            return Ok(Pas::Termine);
        }

        // 1) sous-expressions
        let mut i = 0;
        while i < self.elements.len() {
            if let Element::SousExpression(sous) = &mut self.elements[i] {
                match sous.eval_once_avec(reglages)? {
                    Pas::Reduit => {
                        debug!("réduction dans la sous-expression en position {i}");
                        return Ok(Pas::Reduit);
                    }
                    Pas::Termine => {
                        let Some(seul) = sous.elements.pop() else {
                            return Err(invalide("sous-expression vide"));
                        };
                        trace!("repli de la sous-expression en position {i} : {seul}");
                        // on ré-examine la même position (la valeur peut être elle-même une sous-expression)
                        self.elements[i] = seul;
                        continue;
                    }
                }
            }
            i += 1;
        }

        // 2) opérateur prioritaire
        let i = self
            .find_top_priority_operator_pos()
            .ok_or_else(|| invalide("aucun opérateur à appliquer"))?;
        if i == 0 || i + 1 >= self.elements.len() {
            return Err(invalide(format!("opérateur sans opérande en position {i}")));
        }

        let res = {
            let gauche = operande(&self.elements[i - 1])?;
            let droite = operande(&self.elements[i + 1])?;
            let Element::Operateur(op) = self.elements[i] else {
                return Err(invalide(format!("position {i} : opérateur attendu")));
            };
            let res = gauche.applique(op, droite, reglages.precision_decimale)?;
            debug!("{gauche} {op} {droite} = {res}");
            res
        };

        self.elements[i - 1] = Element::Nombre(res);
        self.elements.drain(i..i + 2);
        Ok(Pas::Reduit)
    }

    pub fn eval_full(&mut self) -> Result<Nombre, ErreurCalcul> {
        self.eval_full_avec(&Reglages::default())
    }

    /// Réduit jusqu'au bout, au plus `max_evaluations` réductions.
    pub fn eval_full_avec(&mut self, reglages: &Reglages) -> Result<Nombre, ErreurCalcul> {
        let mut nb = 0;
        while !self.termine_et_deballe() {
            if nb == reglages.max_evaluations {
                warn!(
                    "abandon après {} évaluations : {}",
                    reglages.max_evaluations, self
                );
                return Err(ErreurCalcul::LimiteEvaluations(reglages.max_evaluations));
            }
            self.eval_once_avec(reglages)?;
            nb += 1;
        }
        match &self.elements[0] {
            Element::Nombre(n) => Ok(n.clone()),
            autre => Err(invalide(format!("valeur attendue, trouvé {autre}"))),
        }
    }

    /// Vrai si plus rien n'est à réduire.
    /// Un seul élément qui est une sous-expression prend sa place (`[(1+2)]` -> `[1+2]`) :
    /// la suite se réduit alors normalement, sans compter de pas.
    pub(crate) fn termine_et_deballe(&mut self) -> bool {
        while self.is_done() {
            match self.elements.pop() {
                Some(Element::SousExpression(s)) => {
                    trace!("déballage de la sous-expression seule : {s}");
                    *self = s;
                }
                Some(seul) => {
                    self.elements.push(seul);
                    return true;
                }
                None => return true,
            }
        }
        false
    }

    /// Position de l'opérateur à appliquer : niveau le plus prioritaire,
    /// puis le plus à gauche dans ce niveau.
    pub fn find_top_priority_operator_pos(&self) -> Option<usize> {
        // min_by_key garde le premier minimum : le plus à gauche
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| match e {
                Element::Operateur(op) => Some((i, op.priorite())),
                _ => None,
            })
            .min_by_key(|&(_, p)| p)
            .map(|(i, _)| i)
    }

    /* ------------------------ Conversions de représentation ------------------------ */

    /// Décimaux -> rationnels exacts, récursivement.
    pub fn to_fraction_expression(&mut self) {
        for e in self.elements.iter_mut() {
            match e {
                Element::SousExpression(s) => s.to_fraction_expression(),
                Element::Nombre(n) => {
                    let ancien = std::mem::replace(n, Nombre::from(0));
                    *n = ancien.vers_rationnel();
                }
                Element::Operateur(_) => {}
            }
        }
    }

    pub fn to_decimal_expression(&mut self) {
        self.to_decimal_expression_avec(&Reglages::default());
    }

    /// Rationnels -> décimaux (précision des réglages), récursivement.
    pub fn to_decimal_expression_avec(&mut self, reglages: &Reglages) {
        for e in self.elements.iter_mut() {
            match e {
                Element::SousExpression(s) => s.to_decimal_expression_avec(reglages),
                Element::Nombre(n) => {
                    let ancien = std::mem::replace(n, Nombre::from(0));
                    *n = ancien.vers_decimal(reglages.precision_decimale);
                }
                Element::Operateur(_) => {}
            }
        }
    }
}

fn invalide(msg: impl Into<String>) -> ErreurCalcul {
    ErreurCalcul::ExpressionInvalide(msg.into())
}

fn operande(e: &Element) -> Result<&Nombre, ErreurCalcul> {
    match e {
        Element::Nombre(n) => Ok(n),
        autre => Err(invalide(format!("opérande attendu, trouvé {autre}"))),
    }
}

/* ------------------------ Rendu ------------------------ */

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Nombre(n) => write!(f, "{n}"),
            Element::Operateur(op) => write!(f, "{op}"),
            Element::SousExpression(s) => write!(f, "({s})"),
        }
    }
}

/// Rendu collé (sans espaces) :
/// - feuille négative => (x)
/// - sous-expression terminée et positive => valeur nue, sinon (…)
/// - sous-expression en cours => toujours (…)
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_done() {
            return match &self.elements[0] {
                Element::SousExpression(s) => write!(f, "{s}"),
                seul => write!(f, "{seul}"),
            };
        }

        for e in &self.elements {
            match e {
                Element::Nombre(n) if n.est_negatif() == Some(true) => write!(f, "({n})")?,
                Element::Nombre(n) => write!(f, "{n}")?,
                Element::Operateur(op) => write!(f, "{op}")?,
                Element::SousExpression(s) => {
                    let positive = s.valeur().and_then(Nombre::est_negatif) == Some(false);
                    if positive {
                        write!(f, "{s}")?
                    } else {
                        write!(f, "({s})")?
                    }
                }
            }
        }
        Ok(())
    }
}

/* ------------------------ Construction ------------------------ */

impl From<Nombre> for Element {
    fn from(n: Nombre) -> Self {
        Element::Nombre(n)
    }
}

impl From<Operateur> for Element {
    fn from(op: Operateur) -> Self {
        Element::Operateur(op)
    }
}

impl From<Expression> for Element {
    fn from(e: Expression) -> Self {
        Element::SousExpression(e)
    }
}

impl From<i64> for Element {
    fn from(i: i64) -> Self {
        Element::Nombre(i.into())
    }
}

impl From<BigInt> for Element {
    fn from(i: BigInt) -> Self {
        Element::Nombre(i.into())
    }
}

impl From<BigRational> for Element {
    fn from(r: BigRational) -> Self {
        Element::Nombre(r.into())
    }
}

impl From<Decimal> for Element {
    fn from(d: Decimal) -> Self {
        Element::Nombre(d.into())
    }
}

impl From<f64> for Element {
    fn from(x: f64) -> Self {
        Element::Nombre(x.into())
    }
}

impl From<Vec<Element>> for Expression {
    fn from(elements: Vec<Element>) -> Self {
        Expression::new(elements)
    }
}

/// Construit une expression : `expression![1, Plus, expression![2, Fois, 3]]`.
/// Chaque terme passe par `Element::from`.
#[macro_export]
macro_rules! expression {
    ($($e:expr),* $(,)?) => {
        $crate::noyau::Expression::new(vec![$($crate::noyau::Element::from($e)),*])
    };
}
