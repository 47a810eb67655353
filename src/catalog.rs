//! Hardware catalog: spine and leaf switch profiles plus oversubscription ratios.
//!
//! A [`Catalog`] is built once, either from the built-in reference tables
//! ([`Catalog::reference`]) or from a YAML file through
//! [`crate::config_loader`], and is never mutated afterwards. Declaration
//! order of every list is preserved because it drives the report row order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A modular spine switch chassis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpineProfile {
    pub name: String,
    pub line_cards: u32,
    pub ports_per_card: u32,
    pub port_speed_gbps: u64,
}

impl SpineProfile {
    pub fn new(name: &str, line_cards: u32, ports_per_card: u32, port_speed_gbps: u64) -> Self {
        Self {
            name: name.to_string(),
            line_cards,
            ports_per_card,
            port_speed_gbps,
        }
    }

    /// Total front-panel ports across all line cards, `None` on overflow
    pub fn total_ports(&self) -> Option<u32> {
        self.line_cards.checked_mul(self.ports_per_card)
    }
}

/// A fixed-configuration leaf switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafProfile {
    pub name: String,
    pub port_count: u32,
    pub port_speed_gbps: u64,
    pub total_bandwidth_gbps: u64,
}

impl LeafProfile {
    pub fn new(name: &str, port_count: u32, port_speed_gbps: u64, total_bandwidth_gbps: u64) -> Self {
        Self {
            name: name.to_string(),
            port_count,
            port_speed_gbps,
            total_bandwidth_gbps,
        }
    }
}

/// Oversubscription ratio applied to a leaf's uplink ports
///
/// The divisor controls how many of the base uplink ports are actually cabled
/// to the spine: `uplinks = base_uplink_ports / divisor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OversubscriptionRatio {
    pub label: String,
    pub divisor: u32,
}

impl OversubscriptionRatio {
    pub fn new(label: &str, divisor: u32) -> Self {
        Self {
            label: label.to_string(),
            divisor,
        }
    }
}

/// Catalog validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid catalog entry: {kind} '{name}' must have a positive {field}")]
    InvalidEntry {
        kind: &'static str,
        name: String,
        field: &'static str,
    },

    #[error("Invalid catalog entry: {kind} '{name}' {field} is too large")]
    Overflow {
        kind: &'static str,
        name: String,
        field: &'static str,
    },

    #[error("Invalid catalog entry: {kind} with an empty name")]
    EmptyName { kind: &'static str },

    #[error("Duplicate {kind} '{name}' in catalog")]
    DuplicateName { kind: &'static str, name: String },
}

/// The full set of hardware profiles and ratios to evaluate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub spines: Vec<SpineProfile>,
    pub leaves: Vec<LeafProfile>,
    #[serde(default = "reference_ratios")]
    pub oversubscription: Vec<OversubscriptionRatio>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

impl Catalog {
    /// Arista 7800R-series spines and 7060X-series leaves
    pub fn reference() -> Self {
        Self {
            spines: vec![
                SpineProfile::new("7804", 4, 36, 800),
                SpineProfile::new("7808", 8, 36, 800),
                SpineProfile::new("7812", 12, 36, 800),
                SpineProfile::new("7816", 16, 36, 800),
            ],
            leaves: vec![
                LeafProfile::new("7060X5", 64, 400, 25600),
                LeafProfile::new("7060X6", 64, 800, 51200),
            ],
            oversubscription: reference_ratios(),
        }
    }

    /// Number of (spine, leaf, ratio) combinations the catalog yields
    pub fn combination_count(&self) -> usize {
        self.spines.len() * self.leaves.len() * self.oversubscription.len()
    }

    /// Validate every profile and ratio
    ///
    /// Checks for:
    /// - Non-empty names and labels
    /// - Positive port counts, line cards, speeds, bandwidths and divisors
    /// - Spine port totals that fit in a `u32`
    /// - Unique names within each list
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for spine in &self.spines {
            check_name("spine", &spine.name, &mut seen)?;
            check_positive("spine", &spine.name, "line_cards", spine.line_cards as u64)?;
            check_positive("spine", &spine.name, "ports_per_card", spine.ports_per_card as u64)?;
            check_positive("spine", &spine.name, "port_speed_gbps", spine.port_speed_gbps)?;
            if spine.total_ports().is_none() {
                return Err(CatalogError::Overflow {
                    kind: "spine",
                    name: spine.name.clone(),
                    field: "total_ports",
                });
            }
        }

        seen.clear();
        for leaf in &self.leaves {
            check_name("leaf", &leaf.name, &mut seen)?;
            check_positive("leaf", &leaf.name, "port_count", leaf.port_count as u64)?;
            check_positive("leaf", &leaf.name, "port_speed_gbps", leaf.port_speed_gbps)?;
            check_positive("leaf", &leaf.name, "total_bandwidth_gbps", leaf.total_bandwidth_gbps)?;
        }

        seen.clear();
        for ratio in &self.oversubscription {
            check_name("oversubscription ratio", &ratio.label, &mut seen)?;
            check_positive("oversubscription ratio", &ratio.label, "divisor", ratio.divisor as u64)?;
        }

        if self.combination_count() == 0 {
            log::warn!(
                "Catalog is empty ({} spines, {} leaves, {} ratios); the report will have no rows",
                self.spines.len(),
                self.leaves.len(),
                self.oversubscription.len()
            );
        }

        Ok(())
    }
}

/// The 1:1, 2:1 and 4:1 ratios, in report order
pub fn reference_ratios() -> Vec<OversubscriptionRatio> {
    vec![
        OversubscriptionRatio::new("1:1", 1),
        OversubscriptionRatio::new("2:1", 2),
        OversubscriptionRatio::new("4:1", 4),
    ]
}

fn check_name<'a>(kind: &'static str, name: &'a str, seen: &mut HashSet<&'a str>) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName { kind });
    }
    if !seen.insert(name) {
        return Err(CatalogError::DuplicateName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_positive(kind: &'static str, name: &str, field: &'static str, value: u64) -> Result<(), CatalogError> {
    if value == 0 {
        return Err(CatalogError::InvalidEntry {
            kind,
            name: name.to_string(),
            field,
        });
    }
    Ok(())
}
