use crate::game::error::{MoveError, SetupError};
use crate::game::graph::BoardGraph;
use crate::game::history::MoveHistory;
use crate::game::movegen;
use crate::game::pieces::{BACK_RANK, Color, Piece};
use crate::game::registry::{PieceId, PieceRecord, Player, Ray, Tile};
use crate::game::square::{BOARD_SIZE, BoardSquare, BoardSquareExt, SQUARE_COUNT};
use crate::game::state::GameState;

/// A piece to put on the board when building a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub piece: Piece,
    pub color: Color,
    pub square: BoardSquare,
}

/// The whole game: graph, occupancy, piece arena, players and turn state.
/// Every component works on this one value; nothing is global.
#[derive(Debug, Clone)]
pub struct Game {
    pub graph: BoardGraph,
    pub tiles: Vec<Tile>,
    pub pieces: Vec<PieceRecord>,
    pub players: [Player; 2], // indexed by Color as usize
    pub state: GameState,
    pub history: MoveHistory,
}

impl Game {
    /// Standard starting position, white to move.
    pub fn setup() -> Result<Game, SetupError> {
        let mut placements = Vec::with_capacity(32);

        for color in [Color::White, Color::Black] {
            for file in 0..BOARD_SIZE {
                placements.push(Placement {
                    piece: BACK_RANK[file as usize],
                    color,
                    square: BoardSquare::from_position(file, color.back_rank()),
                });
                placements.push(Placement {
                    piece: Piece::Pawn,
                    color,
                    square: BoardSquare::from_position(file, color.pawn_rank()),
                });
            }
        }

        Game::from_placements(&placements, Color::White, 1)
    }

    /// Builds a position from an arbitrary piece list. Pawns off their start
    /// rank count as having moved; each side needs exactly one king.
    pub fn from_placements(
        placements: &[Placement],
        turn: Color,
        fullmove: u64,
    ) -> Result<Game, SetupError> {
        let graph = BoardGraph::new()?;
        let mut tiles = vec![Tile::default(); SQUARE_COUNT];
        let mut pieces: Vec<PieceRecord> = Vec::with_capacity(placements.len());
        let mut kings: [Option<BoardSquare>; 2] = [None, None];

        for placement in placements {
            let tile = &mut tiles[placement.square as usize];

            if tile.is_occupied() {
                return Err(SetupError::InvalidFen(format!(
                    "two pieces on {}",
                    placement.square.unparse()
                )));
            }

            if placement.piece == Piece::King {
                let slot = &mut kings[placement.color as usize];
                if slot.is_some() {
                    return Err(SetupError::DuplicateKing(placement.color));
                }
                *slot = Some(placement.square);
            }

            let id = pieces.len();
            let mut record = PieceRecord::new(id, placement.color, placement.piece, placement.square);
            record.has_moved = placement.piece == Piece::Pawn
                && placement.square.get_rank() != placement.color.pawn_rank();

            tile.occupant = Some(id);
            pieces.push(record);
        }

        let king_locations = [
            kings[Color::Black as usize].ok_or(SetupError::MissingKing(Color::Black))?,
            kings[Color::White as usize].ok_or(SetupError::MissingKing(Color::White))?,
        ];

        let players = [
            Player::from_tiles(Color::Black, &tiles, &pieces),
            Player::from_tiles(Color::White, &tiles, &pieces),
        ];

        let mut game = Game {
            graph,
            tiles,
            pieces,
            players,
            state: GameState::new(turn, king_locations),
            history: MoveHistory::new(fullmove),
        };

        for id in 0..game.pieces.len() {
            game.recompute_reach(id);
        }

        // every reach exists before any pin scan reads the board
        for id in 0..game.pieces.len() {
            game.register_threats(id);
        }

        if game.is_in_check(!turn) {
            return Err(SetupError::InvalidFen(format!(
                "{} is in check but it is {}'s turn",
                !turn, turn
            )));
        }

        log::debug!(
            "Position set up with {} pieces, {} to move",
            game.pieces.len(),
            turn
        );

        Ok(game)
    }

    pub fn current_turn(&self) -> Color {
        self.state.turn
    }

    pub fn piece_id_at(&self, square: BoardSquare) -> Option<PieceId> {
        self.tiles.get(square as usize).and_then(|t| t.occupant)
    }

    pub fn piece_at(&self, square: BoardSquare) -> Option<&PieceRecord> {
        self.piece_id_at(square).map(|id| &self.pieces[id])
    }

    /// Owner of whatever stands on `square`.
    pub fn owner_at(&self, square: BoardSquare) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    pub fn is_occupied(&self, square: BoardSquare) -> bool {
        self.piece_id_at(square).is_some()
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color as usize]
    }

    /// Live pieces of both sides in arena order.
    pub fn live_pieces(&self) -> impl Iterator<Item = &PieceRecord> {
        self.pieces.iter().filter(|p| p.is_alive())
    }

    /// Pieces currently reaching `square`, enemy or not, in id order.
    pub fn targeting(&self, square: BoardSquare) -> Vec<PieceId> {
        let mut ids: Vec<_> = self.tiles[square as usize].targeted_by.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Regenerates the cached reach of one piece from where it stands now.
    /// Callers must have unregistered the old reach first.
    pub(crate) fn recompute_reach(&mut self, id: PieceId) {
        let piece = &self.pieces[id];
        let reach = movegen::generate(piece.kind, piece.color, piece.has_moved, piece.square, &self.graph);
        self.pieces[id].reach = reach;
    }

    /// Focuses the mover's piece on `square` and returns its legal rays. An
    /// empty square or an opponent's piece yields nothing and keeps the
    /// current focus.
    pub fn select(&mut self, square: BoardSquare) -> Vec<Ray> {
        let Some(piece) = self.piece_at(square) else {
            return Vec::new();
        };

        if piece.color != self.state.turn {
            return Vec::new();
        }

        let kind = piece.kind;
        let legal = self.legal_moves(square);

        log::debug!(
            "Selected {} {} on {}: {} legal squares",
            self.state.turn,
            kind,
            square.unparse(),
            legal.iter().map(|r| r.len()).sum::<usize>()
        );

        self.state.focus(square, legal.clone(), kind);

        legal
    }

    /// Label-addressed variant of [`Game::select`].
    pub fn select_label(&mut self, label: &str) -> Result<Vec<Ray>, MoveError> {
        let square = BoardSquare::parse(label).ok_or(MoveError::InvalidSquare)?;
        Ok(self.select(square))
    }

    /// Every legal `(from, to)` pair for `color`, ordered by source square.
    pub fn all_legal_moves(&self, color: Color) -> Vec<(BoardSquare, BoardSquare)> {
        let mut sources: Vec<BoardSquare> = self
            .player(color)
            .pieces
            .iter()
            .map(|id| self.pieces[*id].square)
            .collect();
        sources.sort_unstable();

        sources
            .into_iter()
            .flat_map(|from| {
                self.legal_moves(from)
                    .into_iter()
                    .flatten()
                    .map(move |to| (from, to))
            })
            .collect()
    }
}
