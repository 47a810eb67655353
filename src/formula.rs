//! Closed-form fabric formulas.
//!
//! Both functions are pure: they take primitive quantities and return either
//! the computed value or a [`FormulaError`] describing why the inputs have no
//! meaningful answer.

/// Errors produced by the fabric formulas
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("uplink ports per leaf must be greater than zero")]
    ZeroUplinks,

    #[error("node bandwidth must be greater than zero")]
    ZeroNodeBandwidth,

    #[error("uplink bandwidth {uplink_gbps} Gbps exceeds leaf bandwidth {leaf_gbps} Gbps")]
    NegativeAvailableBandwidth { leaf_gbps: u64, uplink_gbps: u64 },
}

/// Calculate the theoretical maximum radix of a leaf-spine fabric
///
/// The radix is the number of leaf switches a single spine can attach when
/// every leaf consumes `uplink_ports_per_leaf` spine ports.
///
/// # Arguments
/// * `spine_total_ports` - Total ports available on the spine switch
/// * `uplink_ports_per_leaf` - Spine ports consumed by each leaf
///
/// # Returns
/// * `Ok(u32)` - `spine_total_ports / uplink_ports_per_leaf`, rounded down
/// * `Err(FormulaError::ZeroUplinks)` - if `uplink_ports_per_leaf` is zero
///
/// # Examples
/// ```
/// use radixcalc::formula::max_radix;
///
/// assert_eq!(max_radix(144, 8), Ok(18));
/// assert_eq!(max_radix(144, 5), Ok(28));
/// assert!(max_radix(144, 0).is_err());
/// ```
pub fn max_radix(spine_total_ports: u32, uplink_ports_per_leaf: u32) -> Result<u32, FormulaError> {
    spine_total_ports
        .checked_div(uplink_ports_per_leaf)
        .ok_or(FormulaError::ZeroUplinks)
}

/// Calculate how many compute nodes a leaf switch can serve
///
/// The bandwidth left after uplinks is split evenly across node NICs. When the
/// uplinks alone consume more than the leaf can switch, the configuration is
/// infeasible and no node count is returned.
///
/// # Arguments
/// * `leaf_bandwidth_gbps` - Total switching bandwidth of the leaf
/// * `node_bandwidth_gbps` - Bandwidth of a single compute node NIC
/// * `uplink_bandwidth_gbps` - Bandwidth consumed by the leaf's uplinks
///
/// # Examples
/// ```
/// use radixcalc::formula::nodes_per_leaf;
///
/// assert_eq!(nodes_per_leaf(25600, 200, 800), Ok(124));
/// assert!(nodes_per_leaf(25600, 200, 28800).is_err());
/// ```
pub fn nodes_per_leaf(
    leaf_bandwidth_gbps: u64,
    node_bandwidth_gbps: u64,
    uplink_bandwidth_gbps: u64,
) -> Result<u64, FormulaError> {
    if node_bandwidth_gbps == 0 {
        return Err(FormulaError::ZeroNodeBandwidth);
    }

    let available = leaf_bandwidth_gbps
        .checked_sub(uplink_bandwidth_gbps)
        .ok_or(FormulaError::NegativeAvailableBandwidth {
            leaf_gbps: leaf_bandwidth_gbps,
            uplink_gbps: uplink_bandwidth_gbps,
        })?;

    Ok(available / node_bandwidth_gbps)
}
