use crate::game::pieces::{Color, Piece};
use crate::game::square::BoardSquare;
use fxhash::{FxHashMap, FxHashSet};

/// Stable identity of a piece: its index in the game's piece arena.
pub type PieceId = usize;

/// Squares radiating from a piece in one direction, nearest first.
pub type Ray = Vec<BoardSquare>;

/// Mutable state of one of the 64 squares.
#[derive(Debug, Clone, Default)]
pub struct Tile {
    pub occupant: Option<PieceId>,

    // every piece whose raw reach passes through this square
    pub targeted_by: FxHashSet<PieceId>,
}

impl Tile {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct PieceRecord {
    pub id: PieceId,
    pub color: Color,
    pub kind: Piece,
    pub origin: BoardSquare,
    pub square: BoardSquare,
    pub has_moved: bool,
    pub captured: bool,

    /// Raw geometric reach from `square`, one ray per direction. Recomputed
    /// only when this piece moves.
    pub reach: Vec<Ray>,

    /// As an attacker: pieces standing between me and the enemy king on one
    /// of my rays. The value is whether that piece is the only one there.
    pub blocker_pieces: FxHashMap<PieceId, bool>,

    /// As a blocker: attackers whose line into a king runs through me, with
    /// the same sole-blocker flag.
    pub blocking: FxHashMap<PieceId, bool>,

    pub is_protecting_king: bool,
}

impl PieceRecord {
    pub fn new(id: PieceId, color: Color, kind: Piece, square: BoardSquare) -> Self {
        Self {
            id,
            color,
            kind,
            origin: square,
            square,
            has_moved: false,
            captured: false,
            reach: Vec::new(),
            blocker_pieces: FxHashMap::default(),
            blocking: FxHashMap::default(),
            is_protecting_king: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.captured
    }

    /// Index of the ray containing `square` and the position on it.
    pub fn locate_on_reach(&self, square: BoardSquare) -> Option<(usize, usize)> {
        self.reach.iter().enumerate().find_map(|(ray_index, ray)| {
            ray.iter()
                .position(|s| *s == square)
                .map(|position| (ray_index, position))
        })
    }

    /// Whether the given ray of this piece can capture along it. A pawn's
    /// straight ray moves but never attacks.
    pub fn ray_attacks(&self, ray_index: usize) -> bool {
        !(self.kind == Piece::Pawn && ray_index == 0)
    }

    /// Re-derives the pinned flag from the `blocking` links: pinned iff this
    /// piece is the sole blocker in front of its own king for some attacker.
    pub fn refresh_pin(&mut self) {
        self.is_protecting_king = self.blocking.values().any(|sole| *sole);
    }
}

/// A side and the pieces it still has in play.
#[derive(Debug, Clone)]
pub struct Player {
    pub color: Color,
    pub pieces: FxHashSet<PieceId>,
}

impl Player {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: FxHashSet::default(),
        }
    }

    /// Rebuilds membership from whatever is on the board.
    pub fn from_tiles(color: Color, tiles: &[Tile], pieces: &[PieceRecord]) -> Self {
        let mut player = Player::new(color);

        for id in tiles.iter().filter_map(|t| t.occupant) {
            if pieces[id].color == color && pieces[id].is_alive() {
                player.pieces.insert(id);
            }
        }

        player
    }

    pub fn remove(&mut self, id: PieceId) -> bool {
        self.pieces.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Piece ids in ascending order, so callers iterate deterministically.
    pub fn sorted_pieces(&self) -> Vec<PieceId> {
        let mut ids: Vec<_> = self.pieces.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
