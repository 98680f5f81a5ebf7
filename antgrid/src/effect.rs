//! Effect position calculation.
//!
//! Two antennas tuned to the same frequency affect the two cells lying on
//! the line through them, one step beyond each antenna:
//!
//! ```text
//! L1 = (2 * row1 - row2, 2 * col1 - col2)
//! L2 = (2 * row2 - row1, 2 * col2 - col1)
//! ```
//!
//! Positions are kept even when they fall off the map; use
//! [`EffectSet::within`] to restrict them to the map bounds.

use std::{collections::HashSet, path::Path};

use crate::{
    antenna::Antenna,
    coord::Coord,
    error::Result,
    grid::{self, EFFECT_MARK},
};

/// Insertion-ordered set of effect positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectSet {
    order: Vec<Coord>,
    seen: HashSet<Coord>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the effect positions of every equal-frequency pair.
    ///
    /// Pairs are visited in list order (`a` before `b`), inserting L1 then L2.
    pub fn compute<'a, I>(antennas: I) -> Self
    where
        I: IntoIterator<Item = &'a Antenna>,
    {
        let antennas: Vec<&Antenna> = antennas.into_iter().collect();
        let mut set = Self::new();

        for (i, a) in antennas.iter().enumerate() {
            for b in &antennas[i + 1..] {
                if a.frequency != b.frequency {
                    continue;
                }
                let (p, q) = (a.position, b.position);
                for pos in [reflect(p, q), reflect(q, p)] {
                    match pos {
                        Some(pos) => {
                            set.insert(pos);
                        }
                        None => warn!("effect of {p} and {q} does not fit a coordinate"),
                    }
                }
            }
        }
        debug!(
            "computed {} effect positions from {} antennas",
            set.len(),
            antennas.len()
        );
        set
    }

    /// Adds a position. Returns false if it was already present.
    pub fn insert(&mut self, pos: Coord) -> bool {
        if !self.seen.insert(pos) {
            return false;
        }
        self.order.push(pos);
        true
    }

    pub fn contains(&self, pos: Coord) -> bool {
        self.seen.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    /// Keeps only the positions inside a `rows` x `cols` map.
    pub fn within(&self, rows: i32, cols: i32) -> Self {
        let mut set = Self::new();
        for pos in self.order.iter().filter(|p| p.is_within(rows, cols)) {
            set.insert(*pos);
        }
        set
    }

    /// Table form, one `"<row> <col>"` line per position.
    pub fn to_table(&self) -> String {
        self.order
            .iter()
            .map(|p| format!("{} {}\n", p.row, p.col))
            .collect()
    }

    /// Dot-map form with every drawable position marked `#`.
    pub fn to_dot_map(&self) -> Result<String> {
        grid::render(self.order.iter().map(|p| (EFFECT_MARK, *p)))
    }

    pub fn save_table(&self, path: impl AsRef<Path>) -> Result<()> {
        grid::write_text(path, &self.to_table())
    }

    pub fn save_dot_map(&self, path: impl AsRef<Path>) -> Result<()> {
        grid::write_text(path, &self.to_dot_map()?)
    }
}

/// `2 * from - over`, or `None` on overflow.
fn reflect(from: Coord, over: Coord) -> Option<Coord> {
    let row = from.row.checked_mul(2)?.checked_sub(over.row)?;
    let col = from.col.checked_mul(2)?.checked_sub(over.col)?;
    Some(Coord::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::AntennaList;

    #[test]
    fn test_pair_formula() {
        let list = AntennaList::from_dot_map("....\n.a..\n..a.\n....\n");
        let set = EffectSet::compute(&list);
        let got: Vec<Coord> = set.iter().copied().collect();
        assert_eq!(got, vec![Coord::new(0, 0), Coord::new(3, 3)]);
    }

    #[test]
    fn test_different_frequencies_do_not_interact() {
        let list = AntennaList::from_dot_map("a.\n.b\n");
        assert!(EffectSet::compute(&list).is_empty());
    }

    #[test]
    fn test_duplicates_ignored_and_off_map_kept() {
        // a(0,0) a(0,1) a(0,2): (0,-1) (0,2) (0,-2) (0,4) (0,0) (0,3)
        let list = AntennaList::from_dot_map("aaa\n");
        let set = EffectSet::compute(&list);
        assert_eq!(set.len(), 6);
        assert!(set.contains(Coord::new(0, -1)));

        let inside = set.within(1, 3);
        let got: Vec<Coord> = inside.iter().copied().collect();
        assert_eq!(got, vec![Coord::new(0, 2), Coord::new(0, 0)]);
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut set = EffectSet::new();
        assert!(set.insert(Coord::new(1, 1)));
        assert!(!set.insert(Coord::new(1, 1)));
        assert_eq!(set.to_table(), "1 1\n");
    }

    #[test]
    fn test_dot_map_marks_positions() {
        let mut set = EffectSet::new();
        set.insert(Coord::new(0, 2));
        set.insert(Coord::new(-3, 0));
        set.insert(Coord::new(1, 0));
        assert_eq!(set.to_dot_map().unwrap(), "..#\n#..\n");
    }

    #[test]
    fn test_overflowing_effect_skipped() {
        let list: AntennaList = [
            Antenna {
                frequency: 'a',
                position: Coord::new(0, 0),
            },
            Antenna {
                frequency: 'a',
                position: Coord::new(i32::MAX, 0),
            },
        ]
        .into_iter()
        .collect();
        let set = EffectSet::compute(&list);
        let got: Vec<Coord> = set.iter().copied().collect();
        assert_eq!(got, vec![Coord::new(-i32::MAX, 0)]);
    }
}
