//! Configuration enumeration.
//!
//! Walks the cross-product of spine profiles, leaf profiles and
//! oversubscription ratios and evaluates the fabric formulas for each
//! combination. Output order is exactly the nested iteration order: spines
//! outermost, then leaves, then ratios, each in catalog declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Catalog, LeafProfile, OversubscriptionRatio, SpineProfile};
use crate::config_loader::FabricSettings;
use crate::formula::{self, FormulaError};

/// Node capacity of a leaf for one combination
///
/// Serializes as a plain number, or `null` when infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeCapacity {
    Nodes(u64),
    /// Uplink bandwidth alone exceeds the leaf's switching capacity
    Infeasible,
}

impl NodeCapacity {
    pub fn nodes(&self) -> Option<u64> {
        match self {
            NodeCapacity::Nodes(n) => Some(*n),
            NodeCapacity::Infeasible => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, NodeCapacity::Nodes(_))
    }
}

impl fmt::Display for NodeCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeCapacity::Nodes(n) => write!(f, "{}", n),
            NodeCapacity::Infeasible => write!(f, "infeasible"),
        }
    }
}

/// One evaluated (spine, leaf, ratio) combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub leaf_name: String,
    pub spine_name: String,
    pub uplinks: u32,
    pub workload_ports: u32,
    pub oversubscription_label: String,
    pub uplink_bandwidth_gbps: u64,
    pub max_radix: u32,
    pub nodes_per_leaf: NodeCapacity,
}

/// Errors that abort enumeration
///
/// Every variant names the combination that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumerationError {
    #[error("spine '{spine}', leaf '{leaf}', ratio '{ratio}': oversubscription divisor is zero")]
    ZeroDivisor {
        spine: String,
        leaf: String,
        ratio: String,
    },

    #[error(
        "spine '{spine}', leaf '{leaf}', ratio '{ratio}': divisor {divisor} exceeds {base_uplink_ports} base uplink ports, leaving no uplinks"
    )]
    ZeroUplinks {
        spine: String,
        leaf: String,
        ratio: String,
        divisor: u32,
        base_uplink_ports: u32,
    },

    #[error(
        "spine '{spine}', leaf '{leaf}', ratio '{ratio}': {uplinks} uplinks exceed the leaf's {port_count} ports"
    )]
    NegativeWorkloadPorts {
        spine: String,
        leaf: String,
        ratio: String,
        uplinks: u32,
        port_count: u32,
    },

    #[error("spine '{spine}', leaf '{leaf}', ratio '{ratio}': {quantity} overflows")]
    Overflow {
        spine: String,
        leaf: String,
        ratio: String,
        quantity: &'static str,
    },

    #[error("spine '{spine}', leaf '{leaf}', ratio '{ratio}': {source}")]
    Formula {
        spine: String,
        leaf: String,
        ratio: String,
        #[source]
        source: FormulaError,
    },
}

/// Evaluate every combination in the catalog
///
/// # Arguments
/// * `catalog` - Spine, leaf and ratio definitions
/// * `settings` - Base uplink port count and node NIC bandwidth
///
/// # Returns
/// * `Ok(Vec<ResultRow>)` - One row per combination, in nested declaration order
/// * `Err(EnumerationError)` - The first combination that cannot be evaluated
///
/// Combinations whose uplinks exceed the leaf bandwidth are not errors; they
/// are emitted with [`NodeCapacity::Infeasible`].
pub fn enumerate(catalog: &Catalog, settings: &FabricSettings) -> Result<Vec<ResultRow>, EnumerationError> {
    let mut rows = Vec::with_capacity(catalog.combination_count());

    for spine in &catalog.spines {
        for leaf in &catalog.leaves {
            for ratio in &catalog.oversubscription {
                rows.push(evaluate(spine, leaf, ratio, settings)?);
            }
        }
    }

    log::info!(
        "Evaluated {} combinations ({} spines x {} leaves x {} ratios)",
        rows.len(),
        catalog.spines.len(),
        catalog.leaves.len(),
        catalog.oversubscription.len()
    );

    Ok(rows)
}

/// Evaluate a single (spine, leaf, ratio) combination
pub fn evaluate(
    spine: &SpineProfile,
    leaf: &LeafProfile,
    ratio: &OversubscriptionRatio,
    settings: &FabricSettings,
) -> Result<ResultRow, EnumerationError> {
    let uplinks = settings
        .base_uplink_ports
        .checked_div(ratio.divisor)
        .ok_or_else(|| EnumerationError::ZeroDivisor {
            spine: spine.name.clone(),
            leaf: leaf.name.clone(),
            ratio: ratio.label.clone(),
        })?;

    if uplinks == 0 {
        return Err(EnumerationError::ZeroUplinks {
            spine: spine.name.clone(),
            leaf: leaf.name.clone(),
            ratio: ratio.label.clone(),
            divisor: ratio.divisor,
            base_uplink_ports: settings.base_uplink_ports,
        });
    }

    let formula_err = |source: FormulaError| EnumerationError::Formula {
        spine: spine.name.clone(),
        leaf: leaf.name.clone(),
        ratio: ratio.label.clone(),
        source,
    };

    let overflow = |quantity: &'static str| EnumerationError::Overflow {
        spine: spine.name.clone(),
        leaf: leaf.name.clone(),
        ratio: ratio.label.clone(),
        quantity,
    };

    let spine_total_ports = spine.total_ports().ok_or_else(|| overflow("spine total ports"))?;
    let uplink_bandwidth_gbps = (uplinks as u64)
        .checked_mul(spine.port_speed_gbps)
        .ok_or_else(|| overflow("uplink bandwidth"))?;
    let max_radix = formula::max_radix(spine_total_ports, uplinks).map_err(formula_err)?;

    let nodes_per_leaf = match formula::nodes_per_leaf(
        leaf.total_bandwidth_gbps,
        settings.node_bandwidth_gbps,
        uplink_bandwidth_gbps,
    ) {
        Ok(nodes) => NodeCapacity::Nodes(nodes),
        Err(FormulaError::NegativeAvailableBandwidth { leaf_gbps, uplink_gbps }) => {
            log::warn!(
                "Infeasible combination: spine '{}', leaf '{}', ratio '{}' needs {} Gbps of uplinks but the leaf switches only {} Gbps",
                spine.name,
                leaf.name,
                ratio.label,
                uplink_gbps,
                leaf_gbps
            );
            NodeCapacity::Infeasible
        }
        Err(e) => return Err(formula_err(e)),
    };

    let workload_ports = leaf
        .port_count
        .checked_sub(uplinks)
        .ok_or_else(|| EnumerationError::NegativeWorkloadPorts {
            spine: spine.name.clone(),
            leaf: leaf.name.clone(),
            ratio: ratio.label.clone(),
            uplinks,
            port_count: leaf.port_count,
        })?;

    log::debug!(
        "{} / {} / {}: uplinks={} radix={} nodes={}",
        spine.name,
        leaf.name,
        ratio.label,
        uplinks,
        max_radix,
        nodes_per_leaf
    );

    Ok(ResultRow {
        leaf_name: leaf.name.clone(),
        spine_name: spine.name.clone(),
        uplinks,
        workload_ports,
        oversubscription_label: ratio.label.clone(),
        uplink_bandwidth_gbps,
        max_radix,
        nodes_per_leaf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_rows() -> Vec<ResultRow> {
        enumerate(&Catalog::reference(), &FabricSettings::default()).unwrap()
    }

    #[test]
    fn test_reference_row_count() {
        assert_eq!(reference_rows().len(), 24);
    }

    #[test]
    fn test_nested_iteration_order() {
        let catalog = Catalog::reference();
        let rows = reference_rows();

        let mut expected = Vec::new();
        for spine in &catalog.spines {
            for leaf in &catalog.leaves {
                for ratio in &catalog.oversubscription {
                    expected.push((spine.name.clone(), leaf.name.clone(), ratio.label.clone()));
                }
            }
        }

        let actual: Vec<(String, String, String)> = rows
            .iter()
            .map(|r| (r.spine_name.clone(), r.leaf_name.clone(), r.oversubscription_label.clone()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_reference_first_row() {
        let row = &reference_rows()[0];
        assert_eq!(row.spine_name, "7804");
        assert_eq!(row.leaf_name, "7060X5");
        assert_eq!(row.oversubscription_label, "1:1");
        assert_eq!(row.uplinks, 8);
        assert_eq!(row.uplink_bandwidth_gbps, 6400);
        assert_eq!(row.max_radix, 18);
        assert_eq!(row.workload_ports, 56);
        assert_eq!(row.nodes_per_leaf, NodeCapacity::Nodes(96));
    }

    #[test]
    fn test_reference_ratios_for_largest_spine() {
        let rows = reference_rows();
        // 7816 / 7060X6 is the final block of three rows
        let tail = &rows[21..];
        let summary: Vec<(u32, u32, u32, Option<u64>)> = tail
            .iter()
            .map(|r| (r.uplinks, r.workload_ports, r.max_radix, r.nodes_per_leaf.nodes()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (8, 56, 72, Some(224)),
                (4, 60, 144, Some(240)),
                (2, 62, 288, Some(248)),
            ]
        );
    }

    #[test]
    fn test_uplinks_never_exceed_base() {
        let settings = FabricSettings::default();
        for row in reference_rows() {
            assert!(row.uplinks <= settings.base_uplink_ports);
            assert!(row.nodes_per_leaf.is_feasible());
        }
    }

    #[test]
    fn test_zero_uplinks_aborts_with_combination() {
        let mut catalog = Catalog::reference();
        catalog.oversubscription.push(OversubscriptionRatio::new("16:1", 16));

        let err = enumerate(&catalog, &FabricSettings::default()).unwrap_err();
        assert_eq!(
            err,
            EnumerationError::ZeroUplinks {
                spine: "7804".to_string(),
                leaf: "7060X5".to_string(),
                ratio: "16:1".to_string(),
                divisor: 16,
                base_uplink_ports: 8,
            }
        );
        assert!(err.to_string().contains("spine '7804', leaf '7060X5', ratio '16:1'"));
    }

    #[test]
    fn test_zero_divisor_is_an_error_not_a_panic() {
        let spine = SpineProfile::new("s", 1, 8, 100);
        let leaf = LeafProfile::new("l", 16, 100, 1600);
        let ratio = OversubscriptionRatio::new("bad", 0);

        let result = evaluate(&spine, &leaf, &ratio, &FabricSettings::default());
        assert!(matches!(result, Err(EnumerationError::ZeroDivisor { .. })));
    }

    #[test]
    fn test_infeasible_bandwidth_marks_row() {
        let spine = SpineProfile::new("fat", 4, 36, 3600);
        let leaf = LeafProfile::new("thin", 64, 400, 25600);
        let ratio = OversubscriptionRatio::new("1:1", 1);

        // 8 x 3600 = 28800 Gbps of uplinks against 25600 Gbps of switching
        let row = evaluate(&spine, &leaf, &ratio, &FabricSettings::default()).unwrap();
        assert_eq!(row.uplink_bandwidth_gbps, 28800);
        assert_eq!(row.nodes_per_leaf, NodeCapacity::Infeasible);
        assert_eq!(row.max_radix, 18);
        assert_eq!(row.nodes_per_leaf.to_string(), "infeasible");
    }

    #[test]
    fn test_negative_workload_ports() {
        let spine = SpineProfile::new("s", 4, 36, 100);
        let leaf = LeafProfile::new("tiny", 4, 100, 6400);
        let ratio = OversubscriptionRatio::new("1:1", 1);

        let err = evaluate(&spine, &leaf, &ratio, &FabricSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            EnumerationError::NegativeWorkloadPorts { uplinks: 8, port_count: 4, .. }
        ));
    }

    #[test]
    fn test_zero_node_bandwidth_reports_formula_error() {
        let settings = FabricSettings {
            node_bandwidth_gbps: 0,
            ..FabricSettings::default()
        };
        let err = enumerate(&Catalog::reference(), &settings).unwrap_err();
        assert!(matches!(
            err,
            EnumerationError::Formula { source: FormulaError::ZeroNodeBandwidth, .. }
        ));
    }

    #[test]
    fn test_spine_port_overflow_is_an_error() {
        let spine = SpineProfile::new("huge", 100_000, 100_000, 800);
        let leaf = LeafProfile::new("7060X5", 64, 400, 25600);
        let ratio = OversubscriptionRatio::new("1:1", 1);

        let err = evaluate(&spine, &leaf, &ratio, &FabricSettings::default()).unwrap_err();
        assert_eq!(
            err,
            EnumerationError::Overflow {
                spine: "huge".to_string(),
                leaf: "7060X5".to_string(),
                ratio: "1:1".to_string(),
                quantity: "spine total ports",
            }
        );
    }

    #[test]
    fn test_uplink_bandwidth_overflow_is_an_error() {
        let mut catalog = Catalog::reference();
        catalog.spines = vec![SpineProfile::new("fast", 4, 36, u64::MAX / 4)];
        assert!(catalog.validate().is_ok());

        let err = enumerate(&catalog, &FabricSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            EnumerationError::Overflow { quantity: "uplink bandwidth", .. }
        ));
        assert!(err.to_string().contains("spine 'fast', leaf '7060X5', ratio '1:1'"));
    }

    #[test]
    fn test_enumeration_is_idempotent() {
        assert_eq!(reference_rows(), reference_rows());
    }

    #[test]
    fn test_empty_catalog_yields_no_rows() {
        let catalog = Catalog {
            spines: Vec::new(),
            ..Catalog::reference()
        };
        assert!(enumerate(&catalog, &FabricSettings::default()).unwrap().is_empty());
    }

    #[test]
    fn test_node_capacity_serialization() {
        assert_eq!(serde_json::to_string(&NodeCapacity::Nodes(96)).unwrap(), "96");
        assert_eq!(serde_json::to_string(&NodeCapacity::Infeasible).unwrap(), "null");
    }
}
