use crate::admission::MAX_CAPACITY;
use crate::error::ConfigError;
use crate::types::{Item, Selection, SelectionStatus};

/// 0/1 knapsack over volume that maximizes total price and, among
/// price-optimal selections, minimizes total weight.
///
/// Keeps one rolling DP row of `capacity + 1` states plus a sparse choice
/// graph instead of a full items x volume table. Nothing outlives `solve`.
pub struct Solver {
    capacity: usize,
    items: Vec<Item>,
}

/// Rolling DP row. Index is the volume budget.
struct DpRow {
    price: Vec<u64>,
    weight: Vec<u64>,
    last: Vec<Option<usize>>,
}

impl DpRow {
    fn new(capacity: usize) -> Self {
        Self {
            price: vec![0; capacity + 1],
            weight: vec![0; capacity + 1],
            last: vec![None; capacity + 1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    prev_volume: usize,
    prev_item: usize,
}

/// Per-item edges recording which state each DP improvement was built on.
struct ChoiceGraph {
    edges: Vec<Vec<Edge>>,
}

impl ChoiceGraph {
    fn new(items: usize) -> Self {
        Self {
            edges: vec![Vec::new(); items],
        }
    }

    fn record(&mut self, item: usize, prev_volume: usize, prev_item: Option<usize>) {
        // No edge when the chain bottoms out at the empty selection.
        if let Some(prev_item) = prev_item {
            self.edges[item].push(Edge {
                prev_volume,
                prev_item,
            });
        }
    }

    /// Must run once an item's pass is complete; `predecessor` binary searches.
    fn seal(&mut self, item: usize) {
        self.edges[item].sort_unstable_by_key(|e| e.prev_volume);
    }

    fn predecessor(&self, item: usize, volume: usize) -> Option<usize> {
        let edges = &self.edges[item];
        let pos = edges.partition_point(|e| e.prev_volume < volume);
        match edges.get(pos) {
            Some(edge) if edge.prev_volume == volume => Some(edge.prev_item),
            _ => None,
        }
    }

    fn has_edges(&self, item: usize) -> bool {
        !self.edges[item].is_empty()
    }

    fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Update {
    /// Same price, strictly lighter.
    Lighter,
    /// Strictly higher price.
    Pricier,
}

/// Equal-price check comes first; swapping the order changes which item wins ties.
fn decide(cur_price: u64, cur_weight: u64, new_price: u64, new_weight: u64) -> Option<Update> {
    if new_price == cur_price && new_weight < cur_weight {
        Some(Update::Lighter)
    } else if new_price > cur_price {
        Some(Update::Pricier)
    } else {
        None
    }
}

impl Solver {
    pub fn new(capacity: u64, items: Vec<Item>) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity,
                limit: MAX_CAPACITY,
            });
        }
        let capacity = usize::try_from(capacity).map_err(|_| ConfigError::CapacityTooLarge {
            capacity,
            limit: MAX_CAPACITY,
        })?;
        if let Some(item) = items.iter().find(|i| i.volume == 0) {
            return Err(ConfigError::ZeroVolumeItem { id: item.id });
        }
        Ok(Self { capacity, items })
    }

    pub fn solve(&self) -> Selection {
        if self.items.is_empty() {
            return Selection::empty(SelectionStatus::EmptyCatalog);
        }
        if !self.items.iter().any(|i| i.volume <= self.capacity as u64) {
            tracing::warn!(
                items = self.items.len(),
                capacity = self.capacity,
                "no item fits the capacity"
            );
            return Selection::empty(SelectionStatus::Infeasible);
        }

        let (row, graph) = self.fill();
        tracing::debug!(
            edges = graph.edge_count(),
            best_price = row.price[self.capacity],
            best_weight = row.weight[self.capacity],
            "dp fill complete"
        );

        let Some(chosen) = self.reconstruct(&row, &graph) else {
            return Selection::empty(SelectionStatus::Unprofitable);
        };

        let mut selection = Selection::empty(SelectionStatus::Selected);
        for &idx in &chosen {
            let item = &self.items[idx];
            selection.ids.push(item.id);
            selection.total_volume += item.volume;
            selection.id_sum += u64::from(item.id);
        }
        selection.total_price = row.price[self.capacity];
        selection.total_weight = row.weight[self.capacity];
        debug_assert_eq!(
            selection.total_price,
            chosen.iter().map(|&i| u64::from(self.items[i].price)).sum::<u64>()
        );
        debug_assert_eq!(
            selection.total_weight,
            chosen.iter().map(|&i| u64::from(self.items[i].weight)).sum::<u64>()
        );
        selection
    }

    fn fill(&self) -> (DpRow, ChoiceGraph) {
        let mut row = DpRow::new(self.capacity);
        let mut graph = ChoiceGraph::new(self.items.len());

        for (i, item) in self.items.iter().enumerate() {
            if item.volume > self.capacity as u64 {
                continue;
            }
            let volume = item.volume as usize;
            // Descending, so every state reads the row as it was before item `i`.
            for v in (volume..=self.capacity).rev() {
                let prev = v - volume;
                let new_price = row.price[prev] + u64::from(item.price);
                let new_weight = row.weight[prev] + u64::from(item.weight);
                match decide(row.price[v], row.weight[v], new_price, new_weight) {
                    Some(Update::Lighter) => {
                        row.weight[v] = new_weight;
                    }
                    Some(Update::Pricier) => {
                        row.price[v] = new_price;
                        row.weight[v] = new_weight;
                    }
                    None => continue,
                }
                graph.record(i, prev, row.last[prev]);
                row.last[v] = Some(i);
            }
            graph.seal(i);
        }

        (row, graph)
    }

    /// Walks the choice graph back from the full-capacity state. Returns item
    /// indices earliest-chosen first, or `None` if no item was ever taken there.
    fn reconstruct(&self, row: &DpRow, graph: &ChoiceGraph) -> Option<Vec<usize>> {
        let mut cur_idx = row.last[self.capacity]?;
        let mut cur_volume = self.capacity - self.items[cur_idx].volume as usize;
        let mut chosen = vec![cur_idx];

        while graph.has_edges(cur_idx) && cur_volume > 0 {
            let Some(prev) = graph.predecessor(cur_idx, cur_volume) else {
                break;
            };
            cur_idx = prev;
            chosen.push(cur_idx);
            cur_volume -= self.items[cur_idx].volume as usize;
        }

        tracing::debug!(chosen = chosen.len(), leftover = cur_volume, "reconstructed selection");
        chosen.reverse();
        Some(chosen)
    }
}
