//! Antenna records and the ordered antenna list.
//!
//! [`AntennaList`] keeps antennas in insertion order. The order matters:
//! effect positions are derived pair by pair following it, and the table
//! export writes antennas in the same order they were loaded or inserted.

use std::{fmt, path::Path};

use crate::{
    coord::Coord,
    error::{GridError, Result},
    grid,
};

/// A single antenna on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Antenna {
    /// Frequency symbol, any printable character except `.`.
    pub frequency: char,
    /// Cell holding the antenna.
    pub position: Coord,
}

impl Antenna {
    /// Creates an antenna, validating the frequency symbol and keeping the
    /// position within `0..=MAX_COORD`.
    pub fn new(frequency: char, row: i32, col: i32) -> Result<Self> {
        if !grid::is_antenna(frequency) {
            return Err(GridError::InvalidFrequency(frequency));
        }
        if !(0..=grid::MAX_COORD).contains(&row) || !(0..=grid::MAX_COORD).contains(&col) {
            return Err(GridError::invalid(format!(
                "antenna position ({row},{col}) outside 0..={}",
                grid::MAX_COORD
            )));
        }
        Ok(Self {
            frequency,
            position: Coord::new(row, col),
        })
    }
}

impl fmt::Display for Antenna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.frequency, self.position)
    }
}

/// Insertion-ordered list of antennas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AntennaList {
    items: Vec<Antenna>,
}

impl AntennaList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the list from a dot map, row by row.
    pub fn from_dot_map(text: &str) -> Self {
        let items = grid::parse_cells(text)
            .into_iter()
            .map(|(frequency, position)| Antenna {
                frequency,
                position,
            })
            .collect();
        Self { items }
    }

    /// Loads a dot map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let list = Self::from_dot_map(&grid::read_map(path)?);
        debug!("loaded {} antennas", list.len());
        Ok(list)
    }

    /// Appends an antenna to the end of the list.
    pub fn insert(&mut self, frequency: char, row: i32, col: i32) -> Result<&Antenna> {
        let antenna = Antenna::new(frequency, row, col)?;
        self.items.push(antenna);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the first antenna matching frequency and position exactly.
    pub fn remove(&mut self, frequency: char, row: i32, col: i32) -> Result<Antenna> {
        let target = Coord::new(row, col);
        let idx = self
            .items
            .iter()
            .position(|a| a.frequency == frequency && a.position == target)
            .ok_or_else(|| GridError::NotFound(format!("antenna {frequency} at {target}")))?;
        Ok(self.items.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Antenna> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Antenna] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Table form, one `"<freq> <row> <col>"` line per antenna.
    pub fn to_table(&self) -> String {
        self.items
            .iter()
            .map(|a| format!("{} {} {}\n", a.frequency, a.position.row, a.position.col))
            .collect()
    }

    /// Dot-map form covering every antenna.
    pub fn to_dot_map(&self) -> Result<String> {
        grid::render(self.items.iter().map(|a| (a.frequency, a.position)))
    }

    pub fn save_table(&self, path: impl AsRef<Path>) -> Result<()> {
        grid::write_text(path, &self.to_table())
    }

    pub fn save_dot_map(&self, path: impl AsRef<Path>) -> Result<()> {
        grid::write_text(path, &self.to_dot_map()?)
    }
}

impl FromIterator<Antenna> for AntennaList {
    fn from_iter<T: IntoIterator<Item = Antenna>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AntennaList {
    type Item = &'a Antenna;
    type IntoIter = std::slice::Iter<'a, Antenna>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_appends() {
        let mut list = AntennaList::new();
        list.insert('A', 1, 2).unwrap();
        list.insert('B', 0, 0).unwrap();
        let freqs: Vec<char> = list.iter().map(|a| a.frequency).collect();
        assert_eq!(freqs, vec!['A', 'B']);
    }

    #[test]
    fn test_insert_rejects_bad_input() {
        let mut list = AntennaList::new();
        assert!(matches!(
            list.insert('.', 0, 0),
            Err(GridError::InvalidFrequency('.'))
        ));
        assert!(matches!(
            list.insert('A', -1, 0),
            Err(GridError::InvalidArgument(_))
        ));
        assert!(matches!(
            list.insert('A', 0, i32::MAX),
            Err(GridError::InvalidArgument(_))
        ));
        assert!(list.is_empty());

        list.insert('A', grid::MAX_COORD, grid::MAX_COORD).unwrap();
        assert!(list.to_dot_map().is_err());
    }

    #[test]
    fn test_remove_exact_match_only() {
        let mut list = AntennaList::from_dot_map("A.A\n.B.\n");
        assert!(matches!(list.remove('B', 0, 0), Err(GridError::NotFound(_))));

        let removed = list.remove('A', 0, 2).unwrap();
        assert_eq!(removed.position, Coord::new(0, 2));
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_table(), "A 0 0\nB 1 1\n");
    }

    #[test]
    fn test_dot_map_export() {
        let list = AntennaList::from_dot_map("....\n.a..\n...b\n");
        assert_eq!(list.to_dot_map().unwrap(), "....\n.a..\n...b\n");
    }
}
