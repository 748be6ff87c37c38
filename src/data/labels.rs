//! Display labels for product-type codes.
//!
//! Unmapped codes pass through unchanged; records are never dropped because
//! a label is missing.

/// Canonical product code → Portuguese display label.
const PRODUCT_LABELS: &[(&str, &str)] = &[
    ("Acrylic", "Acrílico"),
    ("Bamboo Fabric", "Tecido de Bambu"),
    ("Cashmere", "Caxemira"),
    ("Cotton", "Algodão"),
    ("Denim", "Jeans"),
    ("Hemp", "Cânhamo"),
    ("Leather", "Couro"),
    ("Linen", "Linho"),
    ("Modal", "Modal"),
    ("Nylon", "Náilon"),
    ("Polyester", "Poliéster"),
    ("Rayon", "Raiom"),
    ("Recycled Polyester", "Poliéster Reciclado"),
    ("Silk", "Seda"),
    ("Spandex", "Elastano"),
    ("Tencel", "Tencel"),
    ("Viscose", "Viscose"),
    ("Wool", "Lã"),
];

/// Label for `code`, if the table has one.
pub fn lookup(code: &str) -> Option<&'static str> {
    PRODUCT_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Label for `code`, or `code` itself when unmapped.
pub fn translate(code: &str) -> &str {
    lookup(code).unwrap_or(code)
}

/// Display text for a product type, honouring the translation toggle.
pub fn display(code: &str, translated: bool) -> &str {
    if translated { translate(code) } else { code }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cotton_is_algodao() {
        assert_eq!(translate("Cotton"), "Algodão");
        assert_eq!(lookup("Wool"), Some("Lã"));
    }

    #[test]
    fn unmapped_code_passes_through() {
        assert_eq!(lookup("Kevlar"), None);
        assert_eq!(translate("Kevlar"), "Kevlar");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(translate("cotton"), "cotton");
    }

    #[test]
    fn display_respects_toggle() {
        assert_eq!(display("Silk", false), "Silk");
        assert_eq!(display("Silk", true), "Seda");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<&str> = PRODUCT_LABELS.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), PRODUCT_LABELS.len());
    }
}
