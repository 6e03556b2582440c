use crate::game::pieces::{Color, Piece};
use crate::game::registry::Ray;
use crate::game::square::BoardSquare;

/// Whose turn it is and what the active player is looking at. This is the
/// only place a presentation layer needs to read to draw focus/highlights.
#[derive(Debug, Clone)]
pub struct GameState {
    pub turn: Color,
    pub king_locations: [BoardSquare; 2], // indexed by Color as usize
    pub focused: Option<BoardSquare>,
    pub highlighted: Vec<Ray>,
    pub focused_piece: Option<Piece>,
}

impl GameState {
    pub fn new(turn: Color, king_locations: [BoardSquare; 2]) -> Self {
        Self {
            turn,
            king_locations,
            focused: None,
            highlighted: Vec::new(),
            focused_piece: None,
        }
    }

    pub fn king_location(&self, color: Color) -> BoardSquare {
        self.king_locations[color as usize]
    }

    /// Replaces any previous focus; one square at most is focused.
    pub fn focus(&mut self, square: BoardSquare, legal: Vec<Ray>, piece: Piece) {
        self.focused = Some(square);
        self.highlighted = legal;
        self.focused_piece = Some(piece);
    }

    /// Drops focus and highlights, returning the squares that were lit.
    pub fn clear_focus(&mut self) -> Vec<BoardSquare> {
        self.focused = None;
        self.focused_piece = None;

        std::mem::take(&mut self.highlighted)
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn is_highlighted(&self, square: BoardSquare) -> bool {
        self.highlighted.iter().flatten().any(|s| *s == square)
    }
}
