use crate::game::error::SetupError;
use crate::game::square::{BOARD_SIZE, BoardSquare, BoardSquareExt, SQUARE_COUNT, is_position_valid};

/// King-step directions as (file, rank) deltas. Neighbour lists keep this
/// order, which in turn fixes the order of every generated ray.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),   // north
    (1, 1),   // north-east
    (1, 0),   // east
    (1, -1),  // south-east
    (0, -1),  // south
    (-1, -1), // south-west
    (-1, 0),  // west
    (-1, 1),  // north-west
];

/// Adjacency over the 64 squares: an edge joins two squares iff they are a
/// king step apart. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct BoardGraph {
    edges: Vec<Vec<BoardSquare>>,
}

impl BoardGraph {
    pub fn new() -> Result<Self, SetupError> {
        let mut graph = BoardGraph {
            edges: vec![Vec::with_capacity(8); SQUARE_COUNT],
        };

        for rank in 0..BOARD_SIZE {
            for file in 0..BOARD_SIZE {
                let square = BoardSquare::from_position(file, rank);

                for (d_file, d_rank) in DIRECTIONS {
                    let (n_file, n_rank) = (file as i8 + d_file, rank as i8 + d_rank);

                    if !is_position_valid(n_file, n_rank) {
                        continue;
                    }

                    let neighbor = square
                        .offset(d_file, d_rank)
                        .ok_or(SetupError::InvalidNeighbor(n_file, n_rank))?;

                    graph.add_edge(square, neighbor);
                }
            }
        }

        for (index, neighbors) in graph.edges.iter_mut().enumerate() {
            let square = index as BoardSquare;
            neighbors.sort_by_key(|n| direction_index(square, *n));
        }

        log::debug!("Board graph built with {} edges", graph.edge_count());

        Ok(graph)
    }

    /// Inserts both directions of an edge; self-loops and repeats are ignored.
    /// Returns whether anything was added.
    fn add_edge(&mut self, a: BoardSquare, b: BoardSquare) -> bool {
        if a == b || self.edges[a as usize].contains(&b) {
            return false;
        }

        self.edges[a as usize].push(b);
        if !self.edges[b as usize].contains(&a) {
            self.edges[b as usize].push(a);
        }

        true
    }

    pub fn neighbors(&self, square: BoardSquare) -> &[BoardSquare] {
        &self.edges[square as usize]
    }

    pub fn is_adjacent(&self, a: BoardSquare, b: BoardSquare) -> bool {
        self.edges[a as usize].contains(&b)
    }

    /// The neighbour in a given direction, if the board continues that way.
    pub fn step(&self, square: BoardSquare, d_file: i8, d_rank: i8) -> Option<BoardSquare> {
        self.neighbors(square).iter().copied().find(|n| {
            n.get_file() as i8 - square.get_file() as i8 == d_file
                && n.get_rank() as i8 - square.get_rank() as i8 == d_rank
        })
    }

    pub fn degree(&self, square: BoardSquare) -> usize {
        self.edges[square as usize].len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|e| e.len()).sum::<usize>() / 2
    }
}

/// Position of the `from -> to` step in [`DIRECTIONS`]; only meaningful for
/// adjacent squares.
fn direction_index(from: BoardSquare, to: BoardSquare) -> usize {
    let delta = (
        to.get_file() as i8 - from.get_file() as i8,
        to.get_rank() as i8 - from.get_rank() as i8,
    );

    DIRECTIONS
        .iter()
        .position(|d| *d == delta)
        .unwrap_or(DIRECTIONS.len())
}
