//! Weighing sheet for solid-state synthesis.
//!
//! Given a formula, one element and the mass of that element the user has
//! on the balance, work out how much of every other element to weigh in so
//! the batch has the formula's stoichiometry.
//!
//! ```text
//!   "Fe2MoGe" ──parse_formula──▶ Composition { Fe: 2, Mo: 1, Ge: 1 }
//!   target "ge", 1 g ──normalize_symbol──▶ Ge
//!                     scale = 1 g / (72.63 · 1)
//!   mass(el) = scale · n(el) · M(el)   ──▶ MassCalculation
//! ```

pub mod elements;
pub mod formula;

use serde::Serialize;
use thiserror::Error;

pub use elements::{lookup, normalize_symbol, Element, ELEMENTS};
pub use formula::{parse_formula, Composition};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChemError {
    #[error("Formula cannot be empty.")]
    EmptyFormula,
    #[error("Unexpected character {ch:?} at position {at} in formula.")]
    UnexpectedCharacter { ch: char, at: usize },
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    #[error("Invalid stoichiometry for {symbol}: \"{amount}\"")]
    InvalidStoichiometry { symbol: String, amount: String },
    #[error("Please enter a valid target mass (got \"{0}\").")]
    InvalidTargetMass(String),
    #[error("Target element \"{0}\" is not recognized. Use a symbol like \"In\" (indium).")]
    UnknownTarget(String),
    #[error("Target element {symbol} not found in formula {formula}.")]
    TargetNotInFormula { symbol: String, formula: String },
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Mass of one element to weigh in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementMass {
    pub symbol: &'static str,
    pub stoichiometry: f64,
    pub atomic_mass: f64,
    /// Grams.
    pub mass: f64,
}

/// Result of [`calculate`]: one row per element, in formula order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassCalculation {
    /// Sample label, the formula unless the user named it.
    pub name: String,
    pub formula: String,
    pub target: String,
    /// Grams of `target`.
    pub target_mass: f64,
    pub elements: Vec<ElementMass>,
    /// Sum of all element masses, grams.
    pub total: f64,
}

impl MassCalculation {
    /// Share of `row` in the total batch mass, in percent.
    pub fn weight_percent(&self, row: &ElementMass) -> f64 {
        if self.total > 0.0 {
            row.mass / self.total * 100.0
        } else {
            0.0
        }
    }

    /// Plain-text summary for the clipboard.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} Stoichiometric Calculation\nTarget: {} g {}\n\n",
            self.formula, self.target_mass, self.target
        );
        for row in &self.elements {
            text.push_str(&format!(
                "{}: {:.6} g ({:.2}%)\n",
                row.symbol,
                row.mass,
                self.weight_percent(row)
            ));
        }
        text.push_str(&format!("\nTotal: {:.6} g", self.total));
        text
    }
}

/// Parse a user-typed mass in grams; it must be a positive number.
pub fn parse_mass(text: &str) -> Result<f64, ChemError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite() && *m > 0.0)
        .ok_or_else(|| ChemError::InvalidTargetMass(text.trim().to_string()))
}

/// Masses to weigh in so that `target_mass` grams of `target` end up in a
/// batch of `formula`.
///
/// `target` may be a symbol in any case or a full element name.
pub fn calculate(formula: &str, target: &str, target_mass: f64) -> Result<MassCalculation, ChemError> {
    if !(target_mass.is_finite() && target_mass > 0.0) {
        return Err(ChemError::InvalidTargetMass(target_mass.to_string()));
    }

    let formula = formula.trim();
    let composition = parse_formula(formula)?;

    let symbol = normalize_symbol(target);
    let element = lookup(&symbol).ok_or_else(|| ChemError::UnknownTarget(target.trim().to_string()))?;
    let target_amount = composition
        .get(element.symbol)
        .ok_or_else(|| ChemError::TargetNotInFormula {
            symbol: element.symbol.to_string(),
            formula: formula.to_string(),
        })?;

    let scale = target_mass / (element.atomic_mass * target_amount);

    let elements: Vec<ElementMass> = composition
        .iter()
        .filter_map(|(symbol, stoichiometry)| {
            // parse_formula only admits symbols from the table
            let element = lookup(symbol)?;
            Some(ElementMass {
                symbol: element.symbol,
                stoichiometry,
                atomic_mass: element.atomic_mass,
                mass: scale * stoichiometry * element.atomic_mass,
            })
        })
        .collect();
    let total = elements.iter().map(|e| e.mass).sum();

    log::debug!("{formula}: {target_mass} g {} → {total:.6} g batch", element.symbol);

    Ok(MassCalculation {
        name: formula.to_string(),
        formula: formula.to_string(),
        target: element.symbol.to_string(),
        target_mass,
        elements,
        total,
    })
}
