//! Report rendering for enumerated fabric combinations.
//!
//! Produces the grid table, the advisory notes and the raw preview shown by
//! the CLI, plus JSON and YAML renditions of the row sequence. Rendering never
//! reorders or modifies the rows it is given.

use clap::ValueEnum;
use color_eyre::eyre::{Context, Result};
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, Table};

use crate::config_loader::FabricSettings;
use crate::enumerator::ResultRow;

/// Number of rows shown in the raw preview
pub const PREVIEW_ROWS: usize = 5;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Grid table with notes and preview
    #[default]
    Table,
    /// JSON array of rows
    Json,
    /// YAML sequence of rows
    Yaml,
}

/// A report column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Leaf,
    Spine,
    Uplinks,
    WorkloadPorts,
    Oversubscription,
    MaxRadix,
    NodesPerLeaf,
}

/// The report columns, in display order
pub const REPORT_COLUMNS: [Column; 7] = [
    Column::Leaf,
    Column::Spine,
    Column::Uplinks,
    Column::WorkloadPorts,
    Column::Oversubscription,
    Column::MaxRadix,
    Column::NodesPerLeaf,
];

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Leaf => "Leaf",
            Column::Spine => "Spine",
            Column::Uplinks => "Uplinks",
            Column::WorkloadPorts => "Workload Ports",
            Column::Oversubscription => "Oversubscription",
            Column::MaxRadix => "Max Radix",
            Column::NodesPerLeaf => "Nodes per Leaf",
        }
    }

    pub fn value(&self, row: &ResultRow) -> String {
        match self {
            Column::Leaf => row.leaf_name.clone(),
            Column::Spine => row.spine_name.clone(),
            Column::Uplinks => row.uplinks.to_string(),
            Column::WorkloadPorts => row.workload_ports.to_string(),
            Column::Oversubscription => row.oversubscription_label.clone(),
            Column::MaxRadix => row.max_radix.to_string(),
            Column::NodesPerLeaf => row.nodes_per_leaf.to_string(),
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            Column::Uplinks | Column::WorkloadPorts | Column::MaxRadix | Column::NodesPerLeaf
        )
    }
}

fn cells(row: &ResultRow, columns: &[Column]) -> Vec<Cell> {
    columns
        .iter()
        .map(|column| {
            let cell = Cell::new(column.value(row));
            if column.is_numeric() {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            }
        })
        .collect()
}

/// Render rows as a grid table with the given columns
pub fn render_table(rows: &[ResultRow], columns: &[Column]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(columns.iter().map(|c| c.header()).collect::<Vec<_>>());

    for row in rows {
        table.add_row(cells(row, columns));
    }

    table.to_string()
}

/// Advisory notes printed after the table
pub fn render_considerations(settings: &FabricSettings) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Considerations:".to_string());
    lines.push(format!(
        "  - Adjust the base uplink port count (currently {}) to match your design and oversubscription requirements.",
        settings.base_uplink_ports
    ));
    lines.push("  - Ensure the spine switch has enough bandwidth for the aggregated traffic.".to_string());
    lines.push(format!(
        "  - Nodes per leaf assumes {} Gbps per compute node NIC; \"infeasible\" means the uplinks alone exceed the leaf's switching bandwidth.",
        settings.node_bandwidth_gbps
    ));

    lines.join("\n")
}

/// Borderless, indexed view of the first `limit` rows
pub fn render_preview(rows: &[ResultRow], limit: usize) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    let mut header = vec![String::new()];
    header.extend(REPORT_COLUMNS.iter().map(|c| c.header().to_string()));
    table.set_header(header);

    for (index, row) in rows.iter().take(limit).enumerate() {
        let mut line = vec![Cell::new(index)];
        line.extend(cells(row, &REPORT_COLUMNS));
        table.add_row(line);
    }

    table.to_string()
}

/// The full human-readable report: table, considerations and preview
pub fn render_report(rows: &[ResultRow], settings: &FabricSettings) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(render_table(rows, &REPORT_COLUMNS));
    sections.push(String::new());
    sections.push(render_considerations(settings));
    sections.push(String::new());
    sections.push("Radix preview:".to_string());
    sections.push(render_preview(rows, PREVIEW_ROWS));

    sections.join("\n")
}

/// Render the rows in the requested output format
pub fn render(rows: &[ResultRow], settings: &FabricSettings, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_report(rows, settings)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(rows).context("Failed to serialize rows to JSON")
        }
        OutputFormat::Yaml => serde_yaml::to_string(rows).context("Failed to serialize rows to YAML"),
    }
}
