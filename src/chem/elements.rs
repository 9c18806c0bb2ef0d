// ---------------------------------------------------------------------------
// Periodic table (H to Rn), standard atomic weights in g/mol
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_mass: f64,
}

const fn el(symbol: &'static str, name: &'static str, atomic_mass: f64) -> Element {
    Element {
        symbol,
        name,
        atomic_mass,
    }
}

pub static ELEMENTS: &[Element] = &[
    el("H", "hydrogen", 1.008),
    el("He", "helium", 4.003),
    el("Li", "lithium", 6.941),
    el("Be", "beryllium", 9.012),
    el("B", "boron", 10.81),
    el("C", "carbon", 12.01),
    el("N", "nitrogen", 14.01),
    el("O", "oxygen", 16.00),
    el("F", "fluorine", 19.00),
    el("Ne", "neon", 20.18),
    el("Na", "sodium", 22.99),
    el("Mg", "magnesium", 24.31),
    el("Al", "aluminium", 26.98),
    el("Si", "silicon", 28.09),
    el("P", "phosphorus", 30.97),
    el("S", "sulfur", 32.07),
    el("Cl", "chlorine", 35.45),
    el("Ar", "argon", 39.95),
    el("K", "potassium", 39.10),
    el("Ca", "calcium", 40.08),
    el("Sc", "scandium", 44.96),
    el("Ti", "titanium", 47.87),
    el("V", "vanadium", 50.94),
    el("Cr", "chromium", 52.00),
    el("Mn", "manganese", 54.94),
    el("Fe", "iron", 55.845),
    el("Co", "cobalt", 58.933),
    el("Ni", "nickel", 58.693),
    el("Cu", "copper", 63.546),
    el("Zn", "zinc", 65.38),
    el("Ga", "gallium", 69.72),
    el("Ge", "germanium", 72.630),
    el("As", "arsenic", 74.92),
    el("Se", "selenium", 78.96),
    el("Br", "bromine", 79.90),
    el("Kr", "krypton", 83.80),
    el("Rb", "rubidium", 85.47),
    el("Sr", "strontium", 87.62),
    el("Y", "yttrium", 88.91),
    el("Zr", "zirconium", 91.22),
    el("Nb", "niobium", 92.91),
    el("Mo", "molybdenum", 95.95),
    el("Tc", "technetium", 98.00),
    el("Ru", "ruthenium", 101.07),
    el("Rh", "rhodium", 102.91),
    el("Pd", "palladium", 106.42),
    el("Ag", "silver", 107.87),
    el("Cd", "cadmium", 112.41),
    el("In", "indium", 114.82),
    el("Sn", "tin", 118.71),
    el("Sb", "antimony", 121.76),
    el("Te", "tellurium", 127.60),
    el("I", "iodine", 126.90),
    el("Xe", "xenon", 131.29),
    el("Cs", "caesium", 132.91),
    el("Ba", "barium", 137.33),
    el("La", "lanthanum", 138.91),
    el("Ce", "cerium", 140.12),
    el("Pr", "praseodymium", 140.91),
    el("Nd", "neodymium", 144.24),
    el("Pm", "promethium", 145.00),
    el("Sm", "samarium", 150.36),
    el("Eu", "europium", 151.96),
    el("Gd", "gadolinium", 157.25),
    el("Tb", "terbium", 158.93),
    el("Dy", "dysprosium", 162.50),
    el("Ho", "holmium", 164.93),
    el("Er", "erbium", 167.26),
    el("Tm", "thulium", 168.93),
    el("Yb", "ytterbium", 173.05),
    el("Lu", "lutetium", 174.97),
    el("Hf", "hafnium", 178.49),
    el("Ta", "tantalum", 180.95),
    el("W", "tungsten", 183.84),
    el("Re", "rhenium", 186.21),
    el("Os", "osmium", 190.23),
    el("Ir", "iridium", 192.22),
    el("Pt", "platinum", 195.08),
    el("Au", "gold", 196.97),
    el("Hg", "mercury", 200.59),
    el("Tl", "thallium", 204.38),
    el("Pb", "lead", 207.2),
    el("Bi", "bismuth", 208.98),
    el("Po", "polonium", 209.00),
    el("At", "astatine", 210.00),
    el("Rn", "radon", 222.00),
];

/// Spellings accepted besides the table names.
static NAME_ALIASES: &[(&str, &str)] = &[
    ("aluminum", "Al"),
    ("sulphur", "S"),
    ("cesium", "Cs"),
    ("indeium", "In"),
];

/// Look up an element by its exact, case-sensitive symbol.
pub fn lookup(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Turn what a user typed for an element into a symbol.
///
/// Full names (any case) map to their symbol; one- and two-letter inputs
/// are re-cased (`"in"`, `"IN"` → `"In"`). Anything else is returned trimmed
/// and unchanged, so callers still have to [`lookup`] the result.
pub fn normalize_symbol(input: &str) -> String {
    let raw = input.trim();
    let lowered = raw.to_lowercase();

    if let Some(e) = ELEMENTS.iter().find(|e| e.name == lowered) {
        return e.symbol.to_string();
    }
    if let Some((_, symbol)) = NAME_ALIASES.iter().find(|(name, _)| *name == lowered) {
        return symbol.to_string();
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), None, _) => a.to_uppercase().collect(),
        (Some(a), Some(b), None) => a.to_uppercase().chain(b.to_lowercase()).collect(),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_unique_symbols() {
        assert_eq!(ELEMENTS.len(), 86);
        for (i, e) in ELEMENTS.iter().enumerate() {
            assert!(ELEMENTS[i + 1..].iter().all(|o| o.symbol != e.symbol), "{}", e.symbol);
            assert!(e.atomic_mass > 0.0);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup("Ge").map(|e| e.atomic_mass), Some(72.630));
        assert!(lookup("ge").is_none());
        assert!(lookup("Xx").is_none());
    }

    #[test]
    fn normalize_fixes_case_and_names() {
        assert_eq!(normalize_symbol("in"), "In");
        assert_eq!(normalize_symbol(" IN "), "In");
        assert_eq!(normalize_symbol("o"), "O");
        assert_eq!(normalize_symbol("Indium"), "In");
        assert_eq!(normalize_symbol("indeium"), "In");
        assert_eq!(normalize_symbol("Aluminum"), "Al");
        assert_eq!(normalize_symbol("unobtainium"), "unobtainium");
        assert_eq!(normalize_symbol("   "), "");
    }
}
