use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ConfigError, IngestError};
use crate::types::{Dims, Item, ProductRecord};

/// Largest capacity the solver will allocate a DP row for.
pub const MAX_CAPACITY: u64 = 200_000_000;

const FIELDS: [&str; 6] = ["id", "price", "length", "width", "height", "weight"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tote {
    dims: Dims,
    capacity: u64,
}

impl Tote {
    pub fn new(dims: Dims) -> Result<Self, ConfigError> {
        if dims.has_zero_side() {
            return Err(ConfigError::ZeroDimension { dims });
        }
        let capacity = dims
            .volume()
            .ok_or(ConfigError::CapacityOverflow { dims })?;
        if capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity,
                limit: MAX_CAPACITY,
            });
        }
        Ok(Self { dims, capacity })
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn admits(&self, dims: &Dims) -> bool {
        !dims.has_zero_side() && dims.fits_in(&self.dims)
    }
}

impl Default for Tote {
    fn default() -> Self {
        Self {
            dims: Dims::new(30, 35, 45),
            capacity: 30 * 35 * 45,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Admission {
    pub items: Vec<Item>,
    pub admitted: usize,
    pub rejected: usize,
}

pub fn load_records(path: &Path) -> Result<Vec<ProductRecord>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(BufReader::new(file))?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded product feed");
    Ok(records)
}

/// Parses `id,price,length,width,height,weight` rows. The first bad row fails
/// the whole feed.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<ProductRecord>, IngestError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::Read { source })?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(line, idx + 1)?);
    }
    Ok(records)
}

fn parse_line(line: &str, line_no: usize) -> Result<ProductRecord, IngestError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != FIELDS.len() {
        return Err(IngestError::FieldCount {
            line: line_no,
            found: parts.len(),
        });
    }
    Ok(ProductRecord {
        id: parse_field(parts[0], 0, line_no)?,
        price: parse_field(parts[1], 1, line_no)?,
        length: parse_field(parts[2], 2, line_no)?,
        width: parse_field(parts[3], 3, line_no)?,
        height: parse_field(parts[4], 4, line_no)?,
        weight: parse_field(parts[5], 5, line_no)?,
    })
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    idx: usize,
    line_no: usize,
) -> Result<T, IngestError> {
    raw.parse::<T>().map_err(|_| IngestError::MalformedField {
        line: line_no,
        field: FIELDS[idx],
        value: raw.to_string(),
    })
}

/// Keeps the records that fit the tote, in feed order, with their volume
/// pre-multiplied.
pub fn admit(records: &[ProductRecord], tote: &Tote) -> Admission {
    let mut admission = Admission::default();
    for record in records {
        let dims = record.dims();
        if !tote.admits(&dims) {
            tracing::debug!(id = record.id, dims = %dims, tote = %tote.dims(), "rejected product");
            admission.rejected += 1;
            continue;
        }
        // Each side is bounded by the tote's, so this cannot exceed the capacity.
        let volume = dims.volume().unwrap_or(u64::MAX);
        admission
            .items
            .push(Item::new(record.id, record.price, volume, record.weight));
        admission.admitted += 1;
    }
    tracing::info!(
        admitted = admission.admitted,
        rejected = admission.rejected,
        "admission filter done"
    );
    admission
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, l: u32, w: u32, h: u32) -> ProductRecord {
        ProductRecord {
            id,
            price: 10,
            length: l,
            width: w,
            height: h,
            weight: 1,
        }
    }

    #[test]
    fn test_parse_feed() {
        let feed = "1,100,10,20,30,5\r\n\n2, 7, 1, 2, 3, 9\n";
        let records = parse_records(feed.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], ProductRecord {
            id: 1,
            price: 100,
            length: 10,
            width: 20,
            height: 30,
            weight: 5,
        });
        assert_eq!(records[1].weight, 9);
    }

    #[test]
    fn test_malformed_field_fails_whole_feed() {
        let feed = "1,100,10,20,30,5\n2,abc,1,2,3,4\n";
        let err = parse_records(feed.as_bytes()).unwrap_err();
        match err {
            IngestError::MalformedField { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "price");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_number_is_malformed() {
        let err = parse_records("1,-5,1,1,1,1".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MalformedField { field: "price", .. }));
    }

    #[test]
    fn test_values_beyond_32_bits_are_malformed() {
        let records = parse_records("4294967295,4294967295,1,1,1,4294967295".as_bytes()).unwrap();
        assert_eq!(records[0].id, u32::MAX);
        assert_eq!(records[0].price, u32::MAX);
        assert_eq!(records[0].weight, u32::MAX);

        let err = parse_records("18446744073709551615,5,1,1,1,1".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MalformedField { field: "id", .. }));
        let err = parse_records("1,4294967296,1,1,1,1".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MalformedField { field: "price", .. }));
        let err = parse_records("1,5,1,1,1,4294967296".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MalformedField { field: "weight", .. }));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_records("1,2,3,4,5".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::FieldCount { line: 1, found: 5 }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_records(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Unreadable { .. }));
    }

    #[test]
    fn test_admit_uses_sorted_dimensions() {
        let tote = Tote::default();
        let records = [
            record(1, 45, 30, 35),
            record(2, 46, 1, 1),
            record(3, 36, 36, 1),
            record(4, 10, 10, 10),
            record(5, 0, 10, 10),
        ];
        let admission = admit(&records, &tote);
        assert_eq!(admission.admitted, 2);
        assert_eq!(admission.rejected, 3);
        let ids: Vec<u32> = admission.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(admission.items[0].volume, 47_250);
        assert_eq!(admission.items[1].volume, 1_000);
    }

    #[test]
    fn test_tote_validation() {
        assert!(matches!(
            Tote::new(Dims::new(0, 10, 10)),
            Err(ConfigError::ZeroDimension { .. })
        ));
        assert!(matches!(
            Tote::new(Dims::new(u32::MAX, u32::MAX, u32::MAX)),
            Err(ConfigError::CapacityOverflow { .. })
        ));
        assert!(matches!(
            Tote::new(Dims::new(1000, 1000, 1000)),
            Err(ConfigError::CapacityTooLarge { .. })
        ));
        let tote = Tote::new(Dims::new(45, 30, 35)).unwrap();
        assert_eq!(tote.capacity(), Tote::default().capacity());
    }
}
