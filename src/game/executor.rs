use crate::game::board::Game;
use crate::game::error::MoveError;
use crate::game::history::MoveRecord;
use crate::game::pieces::{Color, Piece};
use crate::game::registry::PieceId;
use crate::game::square::{BoardSquare, BoardSquareExt, SQUARE_COUNT};
use fxhash::FxHashSet;
use std::collections::BTreeSet;

/// What an executed move did, including every square a renderer must redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub color: Color,
    pub piece: Piece,
    pub from: BoardSquare,
    pub to: BoardSquare,
    pub captured: Option<Piece>,
    pub gives_check: bool,

    /// Sorted: source, destination, cleared highlights, squares whose set of
    /// targeting pieces changed, and squares of pieces pinned or released.
    pub changed: Vec<BoardSquare>,
}

impl Game {
    /// Plays `from -> to` for the side to move. The destination has to be in
    /// the legal set computed right now for the piece on `from`; on any error
    /// nothing changes.
    pub fn execute_move(&mut self, from: BoardSquare, to: BoardSquare) -> Result<MoveOutcome, MoveError> {
        if from as usize >= SQUARE_COUNT || to as usize >= SQUARE_COUNT {
            return Err(MoveError::InvalidSquare);
        }

        let id = self.piece_id_at(from).ok_or(MoveError::EmptySource(from))?;
        let color = self.pieces[id].color;

        if color != self.state.turn {
            return Err(MoveError::WrongTurn(self.state.turn));
        }

        if !self.is_legal(from, to) {
            return Err(MoveError::IllegalDestination(from, to));
        }

        let before = self.targeting_snapshot();
        let pinned_before: Vec<bool> = self.pieces.iter().map(|p| p.is_protecting_king).collect();

        let captured = self.piece_id_at(to);
        let stale = match captured {
            Some(victim) => self.detach_piece(victim),
            None => Vec::new(),
        };

        self.relocate(id, from, to);
        self.on_piece_moved(id, from, to, stale);

        let mut changed: BTreeSet<BoardSquare> = BTreeSet::from([from, to]);
        changed.extend(self.state.clear_focus());
        changed.extend(self.changed_targeting(&before));
        changed.extend(self.changed_pins(&pinned_before));

        let piece = self.pieces[id].kind;
        let captured = captured.map(|victim| self.pieces[victim].kind);

        self.history.push(MoveRecord {
            color,
            piece,
            from,
            to,
            captured,
        });

        self.state.turn = !color;
        let gives_check = self.is_in_check(!color);

        log::info!(
            "{} {} {}-{}{}{}",
            color,
            piece,
            from.unparse(),
            to.unparse(),
            captured.map(|c| format!(" takes {}", c)).unwrap_or_default(),
            if gives_check { ", check" } else { "" }
        );

        Ok(MoveOutcome {
            color,
            piece,
            from,
            to,
            captured,
            gives_check,
            changed: changed.into_iter().collect(),
        })
    }

    /// Moves the focused piece to `to`; the click-to-move path.
    pub fn move_focused(&mut self, to: BoardSquare) -> Result<MoveOutcome, MoveError> {
        let from = self.state.focused.ok_or(MoveError::NoPieceFocused)?;
        self.execute_move(from, to)
    }

    /// `execute_move` addressed by square labels.
    pub fn execute_labels(&mut self, from: &str, to: &str) -> Result<MoveOutcome, MoveError> {
        let from = BoardSquare::parse(from).ok_or(MoveError::InvalidSquare)?;
        let to = BoardSquare::parse(to).ok_or(MoveError::InvalidSquare)?;
        self.execute_move(from, to)
    }

    fn relocate(&mut self, id: PieceId, from: BoardSquare, to: BoardSquare) {
        if self.tiles[from as usize].occupant != Some(id) {
            log::error!("Piece {} expected on {} is missing", id, from.unparse());
            debug_assert!(false, "moving piece is not on its source tile");
            return;
        }

        self.tiles[from as usize].occupant = None;
        self.tiles[to as usize].occupant = Some(id);

        let record = &mut self.pieces[id];
        record.square = to;
        record.has_moved = true;
    }

    fn targeting_snapshot(&self) -> Vec<FxHashSet<PieceId>> {
        self.tiles.iter().map(|t| t.targeted_by.clone()).collect()
    }

    /// Squares of live pieces whose pinned flag flipped.
    fn changed_pins(&self, before: &[bool]) -> Vec<BoardSquare> {
        self.pieces
            .iter()
            .zip(before)
            .filter(|(piece, was_pinned)| {
                piece.is_alive() && piece.is_protecting_king != **was_pinned
            })
            .map(|(piece, _)| piece.square)
            .collect()
    }

    fn changed_targeting(&self, before: &[FxHashSet<PieceId>]) -> Vec<BoardSquare> {
        self.tiles
            .iter()
            .zip(before)
            .enumerate()
            .filter(|(_, (tile, old))| tile.targeted_by != **old)
            .map(|(square, _)| square as BoardSquare)
            .collect()
    }
}
