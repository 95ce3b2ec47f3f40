//! # Laurent Polynomials
//!
//! Exact integer Laurent polynomials in the two HOMFLY variables `l` and `m`.
//!
//! A polynomial is a sparse map from monomial to non-zero coefficient. Terms
//! are kept in `BTreeMap` order (by power of `m`, then of `l`), so equality is
//! structural and rendering is stable.

use crate::primitives::{L_SYMBOL, M_SYMBOL};
use crate::SkeinError;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// =============================================================================
// MONOMIAL
// =============================================================================

/// `l^l * m^m`. Ordered by the power of `m` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Monomial {
    pub m: i32,
    pub l: i32,
}

impl Monomial {
    #[must_use]
    pub const fn new(l: i32, m: i32) -> Self {
        Self { m, l }
    }

    #[must_use]
    pub const fn is_constant(self) -> bool {
        self.l == 0 && self.m == 0
    }

    /// Product, or `None` when an exponent leaves `i32`.
    #[must_use]
    pub fn checked_mul(self, rhs: Monomial) -> Option<Monomial> {
        Some(Monomial::new(
            self.l.checked_add(rhs.l)?,
            self.m.checked_add(rhs.m)?,
        ))
    }

    /// Variable factors paired with their exponents, skipping zero powers.
    fn factors(self) -> impl Iterator<Item = (&'static str, i32)> {
        [(L_SYMBOL, self.l), (M_SYMBOL, self.m)]
            .into_iter()
            .filter(|(_, e)| *e != 0)
    }
}

impl Mul for Monomial {
    type Output = Monomial;

    fn mul(self, rhs: Monomial) -> Monomial {
        Monomial::new(self.l + rhs.l, self.m + rhs.m)
    }
}

// =============================================================================
// POLYNOMIAL
// =============================================================================

/// Integer Laurent polynomial in `l` and `m`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LaurentPoly {
    terms: BTreeMap<Monomial, i64>,
}

impl LaurentPoly {
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn one() -> Self {
        Self::monomial(1, 0, 0)
    }

    /// `coefficient * l^l * m^m`.
    #[must_use]
    pub fn monomial(coefficient: i64, l: i32, m: i32) -> Self {
        let mut poly = Self::zero();
        poly.add_term(Monomial::new(l, m), coefficient);
        poly
    }

    /// The variable `l`.
    #[must_use]
    pub fn l() -> Self {
        Self::monomial(1, 1, 0)
    }

    /// The variable `m`.
    #[must_use]
    pub fn m() -> Self {
        Self::monomial(1, 0, 1)
    }

    /// HOMFLY polynomial of the `n`-component unlink: `(-m^-1)^(n-1) (l + l^-1)^(n-1)`.
    ///
    /// `n = 0` asks for the inverse of `l + l^-1` and fails.
    pub fn unlink(n: usize) -> Result<Self, SkeinError> {
        let power = i32::try_from(n)
            .map_err(|_| SkeinError::InvalidDiagram(format!("{} components", n)))?
            - 1;
        let neg_m_inv = Self::monomial(-1, 0, -1);
        let l_plus_inv = Self::l() + Self::monomial(1, -1, 0);
        neg_m_inv.pow(power)?.checked_mul(&l_plus_inv.pow(power)?)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of non-zero terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `l^l * m^m`.
    #[must_use]
    pub fn coefficient(&self, l: i32, m: i32) -> i64 {
        self.terms.get(&Monomial::new(l, m)).copied().unwrap_or(0)
    }

    /// Non-zero terms in ascending monomial order.
    pub fn terms(&self) -> impl Iterator<Item = (Monomial, i64)> + '_ {
        self.terms.iter().map(|(k, v)| (*k, *v))
    }

    /// Raise to an integer power. Negative powers need a unit monomial.
    pub fn pow(&self, exponent: i32) -> Result<Self, SkeinError> {
        let base = if exponent < 0 {
            self.inverse()?
        } else {
            self.clone()
        };
        let mut result = Self::one();
        let mut square = base;
        let mut remaining = exponent.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(&square)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                square = square.checked_mul(&square)?;
            }
        }
        Ok(result)
    }

    /// Substitute `l -> l^-1`.
    #[must_use]
    pub fn invert_l(&self) -> Self {
        let mut out = Self::zero();
        for (mono, c) in self.terms() {
            out.add_term(Monomial::new(-mono.l, mono.m), c);
        }
        out
    }

    /// Sum, failing with `ArithmeticOverflow` when a coefficient leaves `i64`.
    pub fn checked_add(&self, rhs: &LaurentPoly) -> Result<Self, SkeinError> {
        let mut out = self.clone();
        for (mono, c) in rhs.terms() {
            out.try_add_term(mono, c)?;
        }
        Ok(out)
    }

    /// Product, failing with `ArithmeticOverflow` instead of wrapping.
    ///
    /// The skein solver multiplies through this; the operator impls are for
    /// values of known size.
    pub fn checked_mul(&self, rhs: &LaurentPoly) -> Result<Self, SkeinError> {
        let mut out = Self::zero();
        for (a, ca) in self.terms() {
            for (b, cb) in rhs.terms() {
                let mono = a.checked_mul(b).ok_or_else(|| {
                    SkeinError::ArithmeticOverflow(format!("exponent of {:?} * {:?}", a, b))
                })?;
                let c = ca.checked_mul(cb).ok_or_else(|| {
                    SkeinError::ArithmeticOverflow(format!("coefficient {} * {}", ca, cb))
                })?;
                out.try_add_term(mono, c)?;
            }
        }
        Ok(out)
    }

    /// Typeset form, e.g. `- l^{-4} - 2 l^{-2} + l^{-2} m^{2}`.
    #[must_use]
    pub fn to_latex(&self) -> String {
        Latex(self).to_string()
    }

    fn render(&self, style: Style, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        for (n, (mono, c)) in self.terms().enumerate() {
            f.write_str(match (n, c < 0) {
                (0, true) => style.leading_minus(),
                (0, false) => "",
                (_, true) => " - ",
                (_, false) => " + ",
            })?;
            let mut parts = Vec::new();
            if c.unsigned_abs() != 1 || mono.is_constant() {
                parts.push(c.unsigned_abs().to_string());
            }
            for (symbol, e) in mono.factors() {
                parts.push(match (e, style) {
                    (1, _) => symbol.to_string(),
                    (_, Style::Plain) => format!("{}^{}", symbol, e),
                    (_, Style::Latex) => format!("{}^{{{}}}", symbol, e),
                });
            }
            f.write_str(&parts.join(style.joiner()))?;
        }
        Ok(())
    }

    fn inverse(&self) -> Result<Self, SkeinError> {
        match self.terms.iter().next() {
            Some((mono, c)) if self.terms.len() == 1 && c.unsigned_abs() == 1 => {
                Ok(Self::monomial(*c, -mono.l, -mono.m))
            }
            _ => Err(SkeinError::NonInvertible(self.to_string())),
        }
    }

    fn try_add_term(&mut self, mono: Monomial, coefficient: i64) -> Result<(), SkeinError> {
        if coefficient == 0 {
            return Ok(());
        }
        let current = self.coefficient(mono.l, mono.m);
        let sum = current.checked_add(coefficient).ok_or_else(|| {
            SkeinError::ArithmeticOverflow(format!("coefficient {} + {}", current, coefficient))
        })?;
        if sum == 0 {
            self.terms.remove(&mono);
        } else {
            self.terms.insert(mono, sum);
        }
        Ok(())
    }

    fn add_term(&mut self, mono: Monomial, coefficient: i64) {
        if coefficient == 0 {
            return;
        }
        let entry = self.terms.entry(mono).or_insert(0);
        *entry += coefficient;
        if *entry == 0 {
            self.terms.remove(&mono);
        }
    }
}

// =============================================================================
// ARITHMETIC
// =============================================================================
//
// Operators use plain integer arithmetic. `checked_add` and `checked_mul`
// report overflow as an error instead.

impl Add<&LaurentPoly> for &LaurentPoly {
    type Output = LaurentPoly;

    fn add(self, rhs: &LaurentPoly) -> LaurentPoly {
        let mut out = self.clone();
        for (mono, c) in rhs.terms() {
            out.add_term(mono, c);
        }
        out
    }
}

impl Add for LaurentPoly {
    type Output = LaurentPoly;

    fn add(self, rhs: LaurentPoly) -> LaurentPoly {
        &self + &rhs
    }
}

impl Neg for &LaurentPoly {
    type Output = LaurentPoly;

    fn neg(self) -> LaurentPoly {
        LaurentPoly {
            terms: self.terms.iter().map(|(k, v)| (*k, -v)).collect(),
        }
    }
}

impl Neg for LaurentPoly {
    type Output = LaurentPoly;

    fn neg(self) -> LaurentPoly {
        -&self
    }
}

impl Sub<&LaurentPoly> for &LaurentPoly {
    type Output = LaurentPoly;

    fn sub(self, rhs: &LaurentPoly) -> LaurentPoly {
        self + &(-rhs)
    }
}

impl Sub for LaurentPoly {
    type Output = LaurentPoly;

    fn sub(self, rhs: LaurentPoly) -> LaurentPoly {
        &self - &rhs
    }
}

impl Mul<&LaurentPoly> for &LaurentPoly {
    type Output = LaurentPoly;

    fn mul(self, rhs: &LaurentPoly) -> LaurentPoly {
        let mut out = LaurentPoly::zero();
        for (a, ca) in self.terms() {
            for (b, cb) in rhs.terms() {
                out.add_term(a * b, ca * cb);
            }
        }
        out
    }
}

impl Mul for LaurentPoly {
    type Output = LaurentPoly;

    fn mul(self, rhs: LaurentPoly) -> LaurentPoly {
        &self * &rhs
    }
}

// =============================================================================
// RENDERING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Latex,
}

impl Style {
    const fn leading_minus(self) -> &'static str {
        match self {
            Style::Plain => "-",
            Style::Latex => "- ",
        }
    }

    const fn joiner(self) -> &'static str {
        match self {
            Style::Plain => "*",
            Style::Latex => " ",
        }
    }
}

struct Latex<'a>(&'a LaurentPoly);

impl fmt::Display for Latex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.render(Style::Latex, f)
    }
}

impl fmt::Display for LaurentPoly {
    /// Plain text, e.g. `-l^-4 - 2*l^-2 + l^-2*m^2`. Never contains a comma.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(Style::Plain, f)
    }
}

// =============================================================================
// TESTS
// =============================================================================
