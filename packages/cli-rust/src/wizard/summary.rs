//! Summary display
//!
//! Renders the record about to be written so the progress message shows what
//! is being applied.

use crate::output::source_style;
use comfy_table::{Cell, Table};
use ifaces_wizard_core::{AdapterRecord, AddressConfig};

/// Render a record as a borderless two-column table
pub fn render_record(record: &AdapterRecord) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::NOTHING);

    table.add_row(vec![Cell::new("Interface:"), Cell::new(&record.name)]);
    table.add_row(vec![
        Cell::new("Address source:"),
        Cell::new(source_style(record.source().as_str())),
    ]);
    if let AddressConfig::Static(params) = &record.config {
        table.add_row(vec![Cell::new("IP Address:"), Cell::new(&params.address)]);
        table.add_row(vec![Cell::new("Netmask:"), Cell::new(&params.netmask)]);
        table.add_row(vec![Cell::new("Gateway:"), Cell::new(&params.gateway)]);
    }

    table.to_string()
}
