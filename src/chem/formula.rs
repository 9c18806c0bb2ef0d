use std::iter::Peekable;
use std::str::CharIndices;

use serde::{Deserialize, Serialize};

use super::elements::lookup;
use super::ChemError;

/// Element amounts of a formula unit, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    parts: Vec<(String, f64)>,
}

impl Composition {
    /// Amount of `symbol` per formula unit, if present.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.parts.iter().find(|(s, _)| s == symbol).map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.parts.iter().map(|(s, n)| (s.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Repeated symbols accumulate (`FeOFe` has two Fe).
    fn add(&mut self, symbol: &str, amount: f64) {
        match self.parts.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, n)) => *n += amount,
            None => self.parts.push((symbol.to_string(), amount)),
        }
    }
}

/// Parse a flat formula such as `Fe2MoGe` or `Mn1.5In0.5Sb`.
///
/// Each element is a capital letter plus an optional lowercase letter,
/// followed by an optional amount (`2`, `1.5` or `.5`, default 1).
/// Whitespace between elements is ignored; groups in parentheses and
/// hydrates are not supported.
pub fn parse_formula(formula: &str) -> Result<Composition, ChemError> {
    if formula.trim().is_empty() {
        return Err(ChemError::EmptyFormula);
    }

    let mut composition = Composition::default();
    let mut chars = formula.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if !c.is_ascii_uppercase() {
            return Err(ChemError::UnexpectedCharacter { ch: c, at });
        }

        let mut end = at + c.len_utf8();
        if let Some(&(_, next)) = chars.peek() {
            if next.is_ascii_lowercase() {
                chars.next();
                end += next.len_utf8();
            }
        }
        let symbol = &formula[at..end];
        if lookup(symbol).is_none() {
            return Err(ChemError::UnknownElement(symbol.to_string()));
        }

        let amount = match take_amount(formula, &mut chars) {
            Some(text) => parse_amount(symbol, text)?,
            None => 1.0,
        };
        composition.add(symbol, amount);
    }

    if composition.is_empty() {
        return Err(ChemError::EmptyFormula);
    }
    Ok(composition)
}

/// Consume a run of digits and at most one `.` at the cursor.
fn take_amount<'a>(formula: &'a str, chars: &mut Peekable<CharIndices<'a>>) -> Option<&'a str> {
    let start = chars.peek().map(|&(i, _)| i)?;
    let mut end = start;
    let mut seen_dot = false;

    while let Some(&(i, c)) = chars.peek() {
        if c == '.' && !seen_dot {
            seen_dot = true;
        } else if !c.is_ascii_digit() {
            break;
        }
        chars.next();
        end = i + 1;
    }

    (end > start).then(|| &formula[start..end])
}

/// Amounts look like `2`, `1.5` or `.5` and must be positive.
fn parse_amount(symbol: &str, text: &str) -> Result<f64, ChemError> {
    text.parse::<f64>()
        .ok()
        .filter(|n| !text.ends_with('.') && n.is_finite() && *n > 0.0)
        .ok_or_else(|| ChemError::InvalidStoichiometry {
            symbol: symbol.to_string(),
            amount: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(formula: &str) -> Vec<(String, f64)> {
        parse_formula(formula)
            .unwrap()
            .iter()
            .map(|(s, n)| (s.to_string(), n))
            .collect()
    }

    #[test]
    fn integer_amounts_default_to_one() {
        assert_eq!(
            parts("Fe2MoGe"),
            vec![("Fe".into(), 2.0), ("Mo".into(), 1.0), ("Ge".into(), 1.0)]
        );
    }

    #[test]
    fn decimal_amounts() {
        assert_eq!(
            parts("Mn1.5In0.5Sb"),
            vec![("Mn".into(), 1.5), ("In".into(), 0.5), ("Sb".into(), 1.0)]
        );
        assert_eq!(parts("Fe.5Co"), vec![("Fe".into(), 0.5), ("Co".into(), 1.0)]);
    }

    #[test]
    fn repeated_elements_accumulate() {
        assert_eq!(parts("FeOFe2"), vec![("Fe".into(), 3.0), ("O".into(), 1.0)]);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(parts(" Ni2 Mn Ga "), parts("Ni2MnGa"));
    }

    #[test]
    fn two_capitals_are_two_elements() {
        assert_eq!(parts("CO"), vec![("C".into(), 1.0), ("O".into(), 1.0)]);
        assert_eq!(parts("Co"), vec![("Co".into(), 1.0)]);
    }

    #[test]
    fn errors() {
        assert_eq!(parse_formula("  "), Err(ChemError::EmptyFormula));
        assert_eq!(parse_formula("Xy2"), Err(ChemError::UnknownElement("Xy".into())));
        assert_eq!(
            parse_formula("Fe0Ge"),
            Err(ChemError::InvalidStoichiometry {
                symbol: "Fe".into(),
                amount: "0".into()
            })
        );
        assert_eq!(
            parse_formula("Fe2."),
            Err(ChemError::InvalidStoichiometry {
                symbol: "Fe".into(),
                amount: "2.".into()
            })
        );
        assert_eq!(
            parse_formula("Ca(OH)2"),
            Err(ChemError::UnexpectedCharacter { ch: '(', at: 2 })
        );
        assert_eq!(
            parse_formula("fe2"),
            Err(ChemError::UnexpectedCharacter { ch: 'f', at: 0 })
        );
    }
}
