//! Top-K neighbour selection over one row of the global similarity matrix.
//!
//! ## Algorithm
//! Picks are made one at a time. Each pick scans the row left to right and
//! keeps the last index whose value is at least the running best (which
//! starts at zero), so among exact ties the later index wins.
//!
//! After the first pick a candidate must also satisfy:
//! - its value is not greater than the previous pick's value
//! - its index differs from the previous pick's index
//!
//! Only the immediately preceding pick is excluded. With three or more equal
//! values an earlier pick can therefore come back; repeats are collapsed, so
//! fewer than K neighbours may be returned. Selection also stops early when
//! no index qualifies. The target itself is never a candidate.

use data_loader::UserIndex;
use similarity::Neighbor;

/// How many neighbours to select for each target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborCount {
    /// ⌊userCount / 4⌋
    #[default]
    QuarterOfUsers,
    /// A fixed K regardless of population
    Fixed(usize),
}

impl NeighborCount {
    pub fn resolve(self, user_count: usize) -> usize {
        match self {
            NeighborCount::QuarterOfUsers => user_count / 4,
            NeighborCount::Fixed(k) => k,
        }
    }
}

/// Select up to `k` neighbours for `target` from its similarity `row`
pub fn select_neighbors(row: &[f64], target: UserIndex, k: usize) -> Vec<Neighbor> {
    // No more picks than there are other users
    let picks = k.min(row.len().saturating_sub(1));
    let mut selected: Vec<Neighbor> = Vec::with_capacity(picks);
    let mut previous: Option<Neighbor> = None;

    for _ in 0..picks {
        let mut best = 0.0;
        let mut pick: Option<Neighbor> = None;

        for (j, &value) in row.iter().enumerate() {
            if j == target {
                continue;
            }
            let eligible = match previous {
                None => true,
                Some(prev) => value <= prev.value && j != prev.index,
            };
            if eligible && value >= best {
                best = value;
                pick = Some(Neighbor::new(j, value));
            }
        }

        let Some(pick) = pick else {
            break;
        };
        if !selected.iter().any(|n| n.index == pick.index) {
            selected.push(pick);
        }
        previous = Some(pick);
    }

    selected
}
