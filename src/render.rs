use crate::types::{Report, SelectionStatus};

pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    let sel = &report.selection;

    out.push_str(&format!("Compatible products: {}\n", report.admitted));
    out.push_str(&format!("Incompatible products: {}\n", report.rejected));
    out.push_str(&format!("Tote capacity: {}\n\n", report.capacity));

    match sel.status {
        SelectionStatus::EmptyCatalog => {
            out.push_str("No compatible products in catalog, nothing to pack.\n");
            return out;
        }
        SelectionStatus::Infeasible => {
            out.push_str("No product fits within the tote volume.\n");
            return out;
        }
        SelectionStatus::Unprofitable => {
            out.push_str("No product adds value, selection is empty.\n");
            return out;
        }
        SelectionStatus::Selected => {}
    }

    let ids: Vec<String> = sel.ids.iter().map(u32::to_string).collect();
    out.push_str(&format!("Selected product IDs ({}):\n", ids.len()));
    out.push_str(&ids.join(" "));
    out.push_str("\n\n");
    out.push_str(&format!("Total price: {}\n", sel.total_price));
    out.push_str(&format!("Total weight: {}\n", sel.total_weight));
    out.push_str(&format!(
        "Total volume: {} ({:.1}% of tote)\n",
        sel.total_volume,
        fill_percent(sel.total_volume, report.capacity)
    ));
    out.push_str(&format!("Sum of IDs: {}\n", sel.id_sum));
    out
}

fn fill_percent(used: u64, capacity: u64) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    used as f64 / capacity as f64 * 100.0
}
