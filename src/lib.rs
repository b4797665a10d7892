pub mod admission;
pub mod error;
pub mod render;
pub mod solver;
pub mod types;

use admission::Tote;
use error::Error;
use solver::Solver;
use types::{ProductRecord, Report};

/// Filters `records` against the tote and picks the most valuable, lightest
/// subset that fits its volume.
pub fn pack(records: &[ProductRecord], tote: &Tote) -> Result<Report, Error> {
    let admission = admission::admit(records, tote);
    let solver = Solver::new(tote.capacity(), admission.items)?;
    let selection = solver.solve();

    tracing::info!(
        status = ?selection.status,
        chosen = selection.ids.len(),
        total_price = selection.total_price,
        total_weight = selection.total_weight,
        "packing done"
    );

    Ok(Report {
        admitted: admission.admitted,
        rejected: admission.rejected,
        capacity: tote.capacity(),
        selection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dims, SelectionStatus};

    #[test]
    fn test_pack_filters_then_solves() {
        let feed = "1,60,10,1,1,5\n2,100,1,1,20,3\n3,40,2,2,2,1\n";
        let records = admission::parse_records(feed.as_bytes()).unwrap();
        let tote = Tote::new(Dims::new(10, 1, 1)).unwrap();
        let report = pack(&records, &tote).unwrap();
        assert_eq!(report.admitted, 1);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.capacity, 10);
        assert_eq!(report.selection.ids, vec![1]);
        assert_eq!(report.selection.total_price, 60);
    }

    #[test]
    fn test_pack_largest_ids() {
        let feed = "4294967295,5,1,1,1,1\n4294967295,5,1,1,1,1\n";
        let records = admission::parse_records(feed.as_bytes()).unwrap();
        let report = pack(&records, &Tote::default()).unwrap();
        assert_eq!(report.selection.ids, vec![u32::MAX, u32::MAX]);
        assert_eq!(report.selection.id_sum, 2 * u64::from(u32::MAX));
        assert_eq!(report.selection.total_price, 10);

        let feed = "18446744073709551615,5,1,1,1,1\n";
        assert!(admission::parse_records(feed.as_bytes()).is_err());
    }

    #[test]
    fn test_pack_nothing_admitted_is_empty_catalog() {
        let records = admission::parse_records("1,5,50,50,50,1".as_bytes()).unwrap();
        let report = pack(&records, &Tote::default()).unwrap();
        assert_eq!(report.rejected, 1);
        assert_eq!(report.selection.status, SelectionStatus::EmptyCatalog);
    }
}
