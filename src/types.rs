use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub length: u32,
    pub width: u32,
    pub height: u32,
}

impl Dims {
    pub fn new(length: u32, width: u32, height: u32) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Product of the three sides, `None` if it does not fit in a `u64`.
    pub fn volume(&self) -> Option<u64> {
        (self.length as u64)
            .checked_mul(self.width as u64)?
            .checked_mul(self.height as u64)
    }

    pub fn sorted(&self) -> [u32; 3] {
        let mut sides = [self.length, self.width, self.height];
        sides.sort_unstable();
        sides
    }

    pub fn has_zero_side(&self) -> bool {
        self.length == 0 || self.width == 0 || self.height == 0
    }

    /// Whether this box fits in `other` in some axis-aligned orientation.
    pub fn fits_in(&self, other: &Dims) -> bool {
        let outer = other.sorted();
        self.sorted().iter().zip(&outer).all(|(a, b)| a <= b)
    }
}

impl std::fmt::Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.length, self.width, self.height)
    }
}

/// One raw catalog row as it arrives from the product feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u32,
    pub price: u32,
    pub length: u32,
    pub width: u32,
    pub height: u32,
    pub weight: u32,
}

impl ProductRecord {
    pub fn dims(&self) -> Dims {
        Dims::new(self.length, self.width, self.height)
    }
}

/// An admitted product, reduced to the scalars the solver needs.
///
/// Price, weight and id stay 32-bit so that any sum over a catalog fits in a
/// `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub price: u32,
    pub volume: u64,
    pub weight: u32,
}

impl Item {
    pub fn new(id: u32, price: u32, volume: u64, weight: u32) -> Self {
        Self {
            id,
            price,
            volume,
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    /// At least one item was chosen.
    Selected,
    /// The solver received no items at all.
    EmptyCatalog,
    /// Items exist but every one of them is larger than the capacity.
    Infeasible,
    /// Items fit, but none beats the empty selection (all fitting items are free).
    Unprofitable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub status: SelectionStatus,
    /// Chosen identifiers, earliest-chosen first.
    pub ids: Vec<u32>,
    pub total_price: u64,
    pub total_weight: u64,
    pub total_volume: u64,
    pub id_sum: u64,
}

impl Selection {
    pub fn empty(status: SelectionStatus) -> Self {
        Self {
            status,
            ids: vec![],
            total_price: 0,
            total_weight: 0,
            total_volume: 0,
            id_sum: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub admitted: usize,
    pub rejected: usize,
    pub capacity: u64,
    pub selection: Selection,
}
