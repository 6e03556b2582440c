use crate::game::pieces::{Color, Piece};
use crate::game::square::{BoardSquare, BoardSquareExt};

#[derive(Debug, Clone, PartialEq)]
pub struct MoveRecord {
    pub color: Color,
    pub piece: Piece,
    pub from: BoardSquare,
    pub to: BoardSquare,
    pub captured: Option<Piece>,
}

impl MoveRecord {
    /// `e2-e4` style label for the move.
    pub fn label(&self) -> String {
        format!("{}-{}", self.from.unparse(), self.to.unparse())
    }
}

/// Every executed move in play order.
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
    start_fullmove: u64, // fullmove number of the initial position
}

impl MoveHistory {
    pub fn new(start_fullmove: u64) -> Self {
        Self {
            moves: Vec::new(),
            start_fullmove: start_fullmove.max(1),
        }
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter()
    }

    pub fn labels_for(&self, color: Color) -> Vec<String> {
        self.moves
            .iter()
            .filter(|m| m.color == color)
            .map(|m| m.label())
            .collect()
    }

    /// Incremented after each black move, as in FEN.
    pub fn fullmove_number(&self) -> u64 {
        self.start_fullmove + self.moves.iter().filter(|m| m.color == Color::Black).count() as u64
    }

    /// Half-moves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u64 {
        self.moves
            .iter()
            .rev()
            .take_while(|m| m.piece != Piece::Pawn && m.captured.is_none())
            .count() as u64
    }
}
