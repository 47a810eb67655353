//! # Radixcalc - Leaf-spine fabric radix calculator
//!
//! Computes the theoretical maximum radix (leaf switches per spine) and the
//! number of compute nodes each leaf can serve for every combination of spine
//! model, leaf model and oversubscription ratio in a hardware catalog.
//!
//! ## Architecture
//!
//! - `catalog`: Spine/leaf profiles, oversubscription ratios, the reference catalog
//! - `formula`: The radix and nodes-per-leaf formulas
//! - `enumerator`: Cross-product evaluation into result rows
//! - `config_loader`: Fabric settings, YAML catalog loading and CLI overrides
//! - `report`: Table, notes, preview and JSON/YAML rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use radixcalc::catalog::Catalog;
//! use radixcalc::config_loader::FabricSettings;
//! use radixcalc::enumerator::enumerate;
//! use radixcalc::report::{render_table, REPORT_COLUMNS};
//!
//! let rows = enumerate(&Catalog::reference(), &FabricSettings::default())?;
//! assert_eq!(rows.len(), 24);
//! assert_eq!(rows[0].max_radix, 18);
//!
//! let table = render_table(&rows, &REPORT_COLUMNS);
//! assert!(table.contains("Max Radix"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Catalog Format
//!
//! ```yaml
//! fabric:
//!   base_uplink_ports: 8
//!   node_bandwidth_gbps: 200
//! spines:
//!   - name: "7804"
//!     line_cards: 4
//!     ports_per_card: 36
//!     port_speed_gbps: 800
//! leaves:
//!   - name: "7060X5"
//!     port_count: 64
//!     port_speed_gbps: 400
//!     total_bandwidth_gbps: 25600
//! oversubscription:
//!   - label: "1:1"
//!     divisor: 1
//! ```
//!
//! ## Error Handling
//!
//! Library modules return typed `thiserror` errors. Combinations whose uplinks
//! leave no usable uplink ports abort enumeration; combinations whose uplinks
//! exceed the leaf bandwidth are reported as infeasible rows.

pub mod catalog;
pub mod config_loader;
pub mod enumerator;
pub mod formula;
pub mod report;
