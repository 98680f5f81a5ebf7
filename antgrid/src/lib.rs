//! # antgrid
//!
//! Domain model for antenna maps.
//!
//! An antenna map is a text grid where `.` marks an empty cell and any other
//! printable character is an antenna tuned to that frequency. This crate
//! parses such maps, computes the positions affected by pairs of antennas
//! sharing a frequency, and builds a graph linking equal-frequency antennas
//! for traversal and path queries.
//!
//! ## Quick Start
//!
//! ```rust
//! use antgrid::{EffectSet, Graph};
//!
//! let graph = Graph::from_dot_map("A..\n...\n..A\n");
//! assert_eq!(graph.vertex_count(), 2);
//!
//! let effects: EffectSet = graph.effect_positions();
//! assert!(effects.contains(antgrid::Coord::new(4, 4)));
//! ```
//!
//! ## Modules
//!
//! - [`antenna`] - Antenna records and the ordered antenna list
//! - [`coord`] - Grid coordinates
//! - [`effect`] - Effect position calculation
//! - [`error`] - Error types and result definitions
//! - [`graph`] - Equal-frequency graph, traversals and path queries
//! - [`grid`] - Dot-map text codec

#[macro_use]
extern crate log;

/// Antenna records and the ordered antenna list.
pub mod antenna;

/// Grid coordinates.
pub mod coord;

/// Effect position calculation.
pub mod effect;

/// Error types and result definitions.
pub mod error;

/// Equal-frequency antenna graph.
pub mod graph;

/// Dot-map text codec.
pub mod grid;

pub use antenna::{Antenna, AntennaList};
pub use coord::Coord;
pub use effect::EffectSet;
pub use error::{GridError, Result};
pub use graph::{Graph, Vertex};
