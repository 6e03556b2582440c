use crate::game::board::{Game, Placement};
use crate::game::error::SetupError;
use crate::game::pieces::{Color, Piece};
use crate::game::square::{BOARD_SIZE, BoardSquare, BoardSquareExt};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotPiece {
    pub piece: Piece,
    pub color: Color,
    pub square: BoardSquare,
}

/// Everything an outside engine needs to know about the position: each live
/// piece and the side to move.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSnapshot {
    pub pieces: Vec<SnapshotPiece>,
    pub turn: Color,
    pub halfmove_clock: u64,
    pub fullmove_number: u64,
}

impl PositionSnapshot {
    pub fn piece_at(&self, square: BoardSquare) -> Option<&SnapshotPiece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    /// FEN with castling and en passant always `-`, since neither exists here.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..BOARD_SIZE).rev() {
            let mut empty = 0;

            for file in 0..BOARD_SIZE {
                match self.piece_at(BoardSquare::from_position(file, rank)) {
                    Some(p) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(p.piece.to_fen_char(p.color));
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push_str(&empty.to_string());
            }

            if rank > 0 {
                fen.push('/');
            }
        }

        let side = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };

        format!(
            "{} {} - - {} {}",
            fen, side, self.halfmove_clock, self.fullmove_number
        )
    }
}

impl Game {
    pub fn snapshot(&self) -> PositionSnapshot {
        let mut pieces: Vec<SnapshotPiece> = self
            .live_pieces()
            .map(|p| SnapshotPiece {
                piece: p.kind,
                color: p.color,
                square: p.square,
            })
            .collect();
        pieces.sort_by_key(|p| p.square);

        PositionSnapshot {
            pieces,
            turn: self.state.turn,
            halfmove_clock: self.history.halfmove_clock(),
            fullmove_number: self.history.fullmove_number(),
        }
    }

    pub fn get_fen(&self) -> String {
        self.snapshot().to_fen()
    }

    /// Reads piece placement, side to move and the fullmove number. Castling
    /// and en passant fields are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Game, SetupError> {
        let mut parts = fen.split_whitespace();

        let board = parts
            .next()
            .ok_or_else(|| SetupError::InvalidFen("empty string".to_string()))?;

        let ranks: Vec<&str> = board.split('/').collect();
        if ranks.len() != BOARD_SIZE as usize {
            return Err(SetupError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut placements = Vec::new();

        for (row, rank_text) in ranks.iter().enumerate() {
            let rank = BOARD_SIZE - 1 - row as u8;
            let mut file = 0u8;

            for c in rank_text.chars() {
                // Numbers encode empty spaces
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || file as u32 + skip > BOARD_SIZE as u32 {
                        return Err(SetupError::InvalidFen(format!(
                            "bad empty-square count '{}' on rank {}",
                            c,
                            rank + 1
                        )));
                    }

                    file += skip as u8;
                    continue;
                }

                let piece = Piece::from_char(c.to_ascii_lowercase())
                    .ok_or_else(|| SetupError::InvalidFen(format!("unknown piece '{}'", c)))?;

                if file >= BOARD_SIZE {
                    return Err(SetupError::InvalidFen(format!("rank {} is too long", rank + 1)));
                }

                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };

                placements.push(Placement {
                    piece,
                    color,
                    square: BoardSquare::from_position(file, rank),
                });

                file += 1;
            }

            if file != BOARD_SIZE {
                return Err(SetupError::InvalidFen(format!(
                    "rank {} covers {} files",
                    rank + 1,
                    file
                )));
            }
        }

        let turn = match parts.next() {
            Some("w") | None => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(SetupError::InvalidFen(format!("bad side to move '{}'", other)));
            }
        };

        // castling, en passant, halfmove clock
        let fullmove = parts
            .nth(3)
            .map(|n| n.parse::<u64>())
            .transpose()
            .map_err(|_| SetupError::InvalidFen("bad fullmove number".to_string()))?
            .unwrap_or(1);

        Game::from_placements(&placements, turn, fullmove)
    }
}
