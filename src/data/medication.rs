//! Reference catalog of commonly tracked GLP-1 and peptide medications
//!
//! Half-lives here are the values copied onto new protocols and doses when the
//! caller does not supply one. Existing records keep whatever half-life they were
//! created with.

use serde::Serialize;

/// A medication with its reference elimination half-life
///
/// Entries only come from the built-in catalog, so the type serializes but is
/// never read back.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Medication {
    pub name: &'static str,
    pub half_life_hours: f64,
}

const CATALOG: &[Medication] = &[
    Medication {
        name: "semaglutide",
        half_life_hours: 168.0,
    },
    Medication {
        name: "tirzepatide",
        half_life_hours: 120.0,
    },
    Medication {
        name: "dulaglutide",
        half_life_hours: 120.0,
    },
    Medication {
        name: "liraglutide",
        half_life_hours: 13.0,
    },
    Medication {
        name: "retatrutide",
        half_life_hours: 144.0,
    },
];

impl Medication {
    /// Look up a medication by name, ignoring case and surrounding whitespace
    pub fn lookup(name: &str) -> Option<Medication> {
        let needle = name.trim();
        CATALOG
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(needle))
            .copied()
    }

    /// All catalog entries
    pub fn catalog() -> &'static [Medication] {
        CATALOG
    }

    /// Half-life in days, as usually quoted on labels
    pub fn half_life_days(&self) -> f64 {
        self.half_life_hours / 24.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let med = Medication::lookup(" Semaglutide ").unwrap();
        assert_eq!(med.name, "semaglutide");
        assert_eq!(med.half_life_hours, 168.0);
        assert_eq!(med.half_life_days(), 7.0);
    }

    #[test]
    fn test_unknown_medication() {
        assert!(Medication::lookup("bpc-157").is_none());
    }

    #[test]
    fn test_catalog_half_lives_are_positive() {
        assert!(Medication::catalog().iter().all(|m| m.half_life_hours > 0.0));
    }

    #[test]
    fn test_serializes_catalog_entry() {
        let med = Medication::lookup("liraglutide").unwrap();
        let json = serde_json::to_string(&med).unwrap();
        assert_eq!(json, r#"{"name":"liraglutide","half_life_hours":13.0}"#);
    }
}
