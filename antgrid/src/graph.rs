//! Equal-frequency antenna graph.
//!
//! Every antenna becomes a vertex. Two vertices are connected when they
//! share a frequency, so each frequency forms a clique and there are no
//! edges between different frequencies.
//!
//! Vertex indices are dense (`0..vertex_count()`) and follow load and
//! insertion order. Removing a vertex shifts every later index down by one.
//! Adjacency lists are kept sorted, which makes traversal order
//! deterministic: both DFS and BFS explore lower indices first.

use std::{collections::VecDeque, fmt, path::Path};

use crate::{
    antenna::{Antenna, AntennaList},
    coord::Coord,
    effect::EffectSet,
    error::{GridError, Result},
    grid,
};

/// A graph vertex: one antenna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub frequency: char,
    pub position: Coord,
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.position, self.frequency)
    }
}

impl From<Antenna> for Vertex {
    fn from(a: Antenna) -> Self {
        Self {
            frequency: a.frequency,
            position: a.position,
        }
    }
}

impl From<Vertex> for Antenna {
    fn from(v: Vertex) -> Self {
        Self {
            frequency: v.frequency,
            position: v.position,
        }
    }
}

/// Adjacency-list graph over antennas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    vertices: Vec<Vertex>,
    adj: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a dot map.
    pub fn from_dot_map(text: &str) -> Self {
        let mut g = Self::new();
        for (frequency, pos) in grid::parse_cells(text) {
            g.push_vertex(Vertex {
                frequency,
                position: pos,
            });
        }
        debug!(
            "graph built: {} vertices, {} edges",
            g.vertex_count(),
            g.edge_count()
        );
        g
    }

    /// Loads a dot map file into a graph.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_dot_map(&grid::read_map(path)?))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Neighbors of `index` in ascending order.
    pub fn neighbors(&self, index: usize) -> Result<&[usize]> {
        self.check_index(index)?;
        Ok(&self.adj[index])
    }

    /// Every undirected edge once, as `(a, b)` with `a < b`.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(a, list)| list.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
            .collect()
    }

    /// Inserts an antenna and links it to every vertex of the same frequency.
    ///
    /// Returns the index of the new vertex.
    pub fn insert_vertex(&mut self, frequency: char, row: i32, col: i32) -> Result<usize> {
        let vertex = Vertex::from(Antenna::new(frequency, row, col)?);
        Ok(self.push_vertex(vertex))
    }

    fn push_vertex(&mut self, vertex: Vertex) -> usize {
        let idx = self.vertices.len();
        let mut links = Vec::new();
        for (i, other) in self.vertices.iter().enumerate() {
            if other.frequency == vertex.frequency {
                self.adj[i].push(idx);
                links.push(i);
            }
        }
        self.vertices.push(vertex);
        self.adj.push(links);
        trace!("vertex {idx} = {vertex}");
        idx
    }

    /// Removes a vertex with all of its edges.
    ///
    /// Indices greater than `index` shift down by one.
    pub fn remove_vertex(&mut self, index: usize) -> Result<Vertex> {
        self.check_index(index)?;
        let removed = self.vertices.remove(index);
        self.adj.remove(index);
        for list in &mut self.adj {
            list.retain(|&n| n != index);
            for n in list.iter_mut() {
                if *n > index {
                    *n -= 1;
                }
            }
        }
        debug!("removed vertex {index} = {removed}");
        Ok(removed)
    }

    /// Drops every edge, keeping the vertices.
    pub fn clear_edges(&mut self) {
        for list in &mut self.adj {
            list.clear();
        }
    }

    /// Depth-first traversal from `start`.
    ///
    /// An error returned by `visit` stops the traversal and is passed on.
    pub fn dfs<F, E>(&self, start: usize, mut visit: F) -> std::result::Result<(), E>
    where
        F: FnMut(usize, &Vertex) -> std::result::Result<(), E>,
        E: From<GridError>,
    {
        self.check_index(start)?;
        let mut visited = vec![false; self.vertices.len()];
        let mut stack = vec![start];

        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            visit(v, &self.vertices[v])?;

            // 逆序压栈，保证小下标先出栈
            stack.extend(self.adj[v].iter().rev().filter(|&&n| !visited[n]));
        }
        Ok(())
    }

    /// Breadth-first traversal from `start`.
    pub fn bfs<F, E>(&self, start: usize, mut visit: F) -> std::result::Result<(), E>
    where
        F: FnMut(usize, &Vertex) -> std::result::Result<(), E>,
        E: From<GridError>,
    {
        self.check_index(start)?;
        let mut visited = vec![false; self.vertices.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(v) = queue.pop_front() {
            visit(v, &self.vertices[v])?;
            for &n in &self.adj[v] {
                if !visited[n] {
                    visited[n] = true;
                    queue.push_back(n);
                }
            }
        }
        Ok(())
    }

    /// Vertex indices in depth-first order.
    pub fn dfs_order(&self, start: usize) -> Result<Vec<usize>> {
        let mut order = Vec::new();
        self.dfs(start, |i, _| -> Result<()> {
            order.push(i);
            Ok(())
        })?;
        Ok(order)
    }

    /// Vertex indices in breadth-first order.
    pub fn bfs_order(&self, start: usize) -> Result<Vec<usize>> {
        let mut order = Vec::new();
        self.bfs(start, |i, _| -> Result<()> {
            order.push(i);
            Ok(())
        })?;
        Ok(order)
    }

    /// Every simple path from `src` to `dst`.
    ///
    /// Paths are produced depth-first with lower indices explored first.
    /// `limit` caps how many paths are collected; the search stops once it is
    /// reached.
    pub fn all_paths(&self, src: usize, dst: usize, limit: Option<usize>) -> Result<Vec<Vec<usize>>> {
        self.check_index(src)?;
        self.check_index(dst)?;

        let mut search = PathSearch {
            graph: self,
            dst,
            limit: limit.unwrap_or(usize::MAX),
            visited: vec![false; self.vertices.len()],
            path: Vec::new(),
            found: Vec::new(),
        };
        search.walk(src);
        debug!("{} paths from {src} to {dst}", search.found.len());
        Ok(search.found)
    }

    /// Positions hosting both a `freq_a` vertex and a different `freq_b` vertex.
    pub fn intersections(&self, freq_a: char, freq_b: char) -> Vec<Coord> {
        let mut out = Vec::new();
        for (i, a) in self.vertices.iter().enumerate() {
            if a.frequency != freq_a {
                continue;
            }
            let hit = self
                .vertices
                .iter()
                .enumerate()
                .any(|(j, b)| j != i && b.frequency == freq_b && b.position == a.position);
            if hit && !out.contains(&a.position) {
                out.push(a.position);
            }
        }
        out
    }

    /// Midpoints of same-frequency pairs two cells apart.
    ///
    /// A pair qualifies when it is aligned horizontally, vertically or
    /// diagonally at distance two; the cell between them is the danger point.
    pub fn danger_points(&self, frequency: char) -> Vec<Coord> {
        let mut out = Vec::new();
        let members: Vec<&Vertex> = self
            .vertices
            .iter()
            .filter(|v| v.frequency == frequency)
            .collect();

        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                let dr = b.position.row - a.position.row;
                let dc = b.position.col - a.position.col;
                let aligned = (dr == 0 && dc.abs() == 2)
                    || (dc == 0 && dr.abs() == 2)
                    || (dr.abs() == 2 && dc.abs() == 2);
                if !aligned {
                    continue;
                }
                let mid = Coord::new(a.position.row + dr / 2, a.position.col + dc / 2);
                if !out.contains(&mid) {
                    out.push(mid);
                }
            }
        }
        out
    }

    /// Danger points of `freq_a` that are also danger points of `freq_b`.
    pub fn danger_overlaps(&self, freq_a: char, freq_b: char) -> Vec<Coord> {
        let b = self.danger_points(freq_b);
        self.danger_points(freq_a)
            .into_iter()
            .filter(|p| b.contains(p))
            .collect()
    }

    /// Effect positions of the antennas currently in the graph.
    pub fn effect_positions(&self) -> EffectSet {
        EffectSet::compute(&self.antennas())
    }

    /// Vertices as an antenna list, in index order.
    pub fn antennas(&self) -> AntennaList {
        self.vertices.iter().map(|&v| Antenna::from(v)).collect()
    }

    pub fn to_dot_map(&self) -> Result<String> {
        grid::render(self.vertices.iter().map(|v| (v.frequency, v.position)))
    }

    pub fn save_dot_map(&self, path: impl AsRef<Path>) -> Result<()> {
        grid::write_text(path, &self.to_dot_map()?)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.vertices.len() {
            return Err(GridError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        Ok(())
    }
}

struct PathSearch<'a> {
    graph: &'a Graph,
    dst: usize,
    limit: usize,
    visited: Vec<bool>,
    path: Vec<usize>,
    found: Vec<Vec<usize>>,
}

impl PathSearch<'_> {
    fn walk(&mut self, current: usize) {
        if self.found.len() >= self.limit {
            return;
        }
        self.visited[current] = true;
        self.path.push(current);

        if current == self.dst {
            self.found.push(self.path.clone());
        } else {
            let graph = self.graph;
            for &next in &graph.adj[current] {
                if !self.visited[next] {
                    self.walk(next);
                }
            }
        }

        self.path.pop();
        self.visited[current] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0:a(0,0) 1:b(0,2) 2:a(1,1) 3:b(2,0) 4:a(2,2)
    const MAP: &str = "a.b\n.a.\nb.a\n";

    #[test]
    fn test_edges_connect_equal_frequencies() {
        let g = Graph::from_dot_map(MAP);
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.edges(), vec![(0, 2), (0, 4), (1, 3), (2, 4)]);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.neighbors(0).unwrap(), &[2, 4]);
    }

    #[test]
    fn test_traversals_stay_within_frequency() {
        let g = Graph::from_dot_map(MAP);
        assert_eq!(g.dfs_order(4).unwrap(), vec![4, 0, 2]);
        assert_eq!(g.bfs_order(2).unwrap(), vec![2, 0, 4]);
        assert_eq!(g.bfs_order(3).unwrap(), vec![3, 1]);
    }

    #[test]
    fn test_traversal_out_of_range() {
        let g = Graph::from_dot_map(MAP);
        assert!(matches!(
            g.dfs_order(5),
            Err(GridError::VertexOutOfRange { index: 5, len: 5 })
        ));
        assert!(Graph::new().bfs_order(0).is_err());
    }

    #[test]
    fn test_visitor_error_stops_traversal() {
        let g = Graph::from_dot_map(MAP);
        let mut seen = 0;
        let res = g.dfs(0, |_, _| {
            seen += 1;
            if seen == 2 {
                Err(GridError::Empty)
            } else {
                Ok(())
            }
        });
        assert!(matches!(res, Err(GridError::Empty)));
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_all_paths() {
        let g = Graph::from_dot_map(MAP);
        let paths = g.all_paths(0, 4, None).unwrap();
        assert_eq!(paths, vec![vec![0, 2, 4], vec![0, 4]]);

        assert_eq!(g.all_paths(1, 1, None).unwrap(), vec![vec![1]]);
        assert!(g.all_paths(0, 1, None).unwrap().is_empty());
        assert_eq!(g.all_paths(0, 4, Some(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_vertex_reindexes_edges() {
        let mut g = Graph::from_dot_map(MAP);
        let removed = g.remove_vertex(1).unwrap();
        assert_eq!(removed.frequency, 'b');
        // 0:a(0,0) 1:a(1,1) 2:b(2,0) 3:a(2,2)
        assert_eq!(g.edges(), vec![(0, 1), (0, 3), (1, 3)]);
        assert!(g.neighbors(2).unwrap().is_empty());
        assert!(g.remove_vertex(4).is_err());
    }

    #[test]
    fn test_insert_vertex_links_same_frequency() {
        let mut g = Graph::from_dot_map(MAP);
        let idx = g.insert_vertex('b', 1, 2).unwrap();
        assert_eq!(idx, 5);
        assert_eq!(g.neighbors(5).unwrap(), &[1, 3]);
        assert_eq!(g.neighbors(1).unwrap(), &[3, 5]);
        assert!(matches!(
            g.insert_vertex(' ', 0, 0),
            Err(GridError::InvalidFrequency(' '))
        ));
    }

    #[test]
    fn test_clear_edges_keeps_vertices() {
        let mut g = Graph::from_dot_map(MAP);
        g.clear_edges();
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.dfs_order(0).unwrap(), vec![0]);
    }

    #[test]
    fn test_intersections() {
        let mut g = Graph::from_dot_map(MAP);
        assert!(g.intersections('a', 'b').is_empty());
        g.insert_vertex('b', 1, 1).unwrap();
        assert_eq!(g.intersections('a', 'b'), vec![Coord::new(1, 1)]);
        assert_eq!(g.intersections('b', 'a'), vec![Coord::new(1, 1)]);
        assert!(g.intersections('a', 'a').is_empty());
    }

    #[test]
    fn test_danger_points_and_overlaps() {
        let g = Graph::from_dot_map(MAP);
        // a(0,0)-a(2,2) diagonal, b(0,2)-b(2,0) diagonal
        assert_eq!(g.danger_points('a'), vec![Coord::new(1, 1)]);
        assert_eq!(g.danger_points('b'), vec![Coord::new(1, 1)]);
        assert_eq!(g.danger_overlaps('a', 'b'), vec![Coord::new(1, 1)]);

        let h = Graph::from_dot_map("a.a.c\n.....\nc...c\n");
        assert_eq!(h.danger_points('a'), vec![Coord::new(0, 1)]);
        assert_eq!(h.danger_points('c'), vec![Coord::new(1, 4)]);
        assert!(h.danger_overlaps('a', 'c').is_empty());
        assert!(h.danger_points('z').is_empty());
    }

    #[test]
    fn test_effect_positions_and_dot_map() {
        let g = Graph::from_dot_map(MAP);
        let effects = g.effect_positions();
        assert!(effects.contains(Coord::new(-1, -1)));
        assert!(effects.contains(Coord::new(3, 3)));
        assert_eq!(g.to_dot_map().unwrap(), MAP);
    }

    #[test]
    fn test_insert_rejects_out_of_range_position() {
        let mut g = Graph::from_dot_map("a\n");
        assert!(matches!(
            g.insert_vertex('a', i32::MAX, 0),
            Err(GridError::InvalidArgument(_))
        ));
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.effect_positions().len(), 0);

        g.insert_vertex('a', grid::MAX_COORD, 0).unwrap();
        assert!(g.effect_positions().contains(Coord::new(2 * grid::MAX_COORD, 0)));
    }

    #[test]
    fn test_blank_lines_keep_row_numbers() {
        let g = Graph::from_dot_map("a\n\na\n");
        let rows: Vec<i32> = g.vertices().iter().map(|v| v.position.row).collect();
        assert_eq!(rows, vec![0, 2]);
        let effects: Vec<Coord> = g.effect_positions().iter().copied().collect();
        assert_eq!(effects, vec![Coord::new(-2, 0), Coord::new(4, 0)]);
        assert_eq!(g.to_dot_map().unwrap(), "a\n.\na\n");
    }
}
