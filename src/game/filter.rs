use crate::game::board::Game;
use crate::game::pieces::{Color, Piece};
use crate::game::registry::{PieceRecord, Ray};
use crate::game::square::{BoardSquare, BoardSquareExt};
use fxhash::FxHashSet;

impl Game {
    /// Legal destinations of whatever stands on `square`, one ray per raw
    /// ray of the piece (possibly empty), in generator order. Turn is not
    /// considered here; [`Game::select`] and the executor check it.
    pub fn legal_moves(&self, square: BoardSquare) -> Vec<Ray> {
        let Some(id) = self.piece_id_at(square) else {
            return Vec::new();
        };

        let piece = &self.pieces[id];

        let mut rays: Vec<Ray> = piece
            .reach
            .iter()
            .enumerate()
            .map(|(ray_index, ray)| self.filter_ray(piece, ray_index, ray))
            .collect();

        // kings are only ever limited by the safety check above
        if piece.kind == Piece::King {
            return rays;
        }

        if let Some(line) = self.pin_line(id) {
            restrict(&mut rays, &line);
        }

        let checkers = self.checkers(piece.color);

        match checkers.len() {
            0 => {}
            1 => {
                let line = self.line_to_king(checkers[0], self.state.king_location(piece.color));
                restrict(&mut rays, &line);
            }
            _ => rays.iter_mut().for_each(|ray| ray.clear()),
        }

        rays
    }

    fn filter_ray(&self, piece: &PieceRecord, ray_index: usize, ray: &[BoardSquare]) -> Ray {
        match piece.kind {
            Piece::Bishop | Piece::Rook | Piece::Queen => self.truncate_at_blocker(ray, piece.color),
            Piece::Knight => ray
                .iter()
                .copied()
                .filter(|s| self.owner_at(*s) != Some(piece.color))
                .collect(),
            Piece::King => ray
                .iter()
                .copied()
                .filter(|s| self.owner_at(*s) != Some(piece.color))
                .filter(|s| !self.is_attacked(*s, !piece.color, Some(piece.square)))
                .collect(),
            Piece::Pawn if ray_index == 0 => ray
                .iter()
                .copied()
                .take_while(|s| !self.is_occupied(*s))
                .collect(),
            Piece::Pawn => ray
                .iter()
                .copied()
                .filter(|s| self.owner_at(*s) == Some(!piece.color))
                .collect(),
        }
    }

    /// Empty squares up to the first occupied one, which is kept only if it
    /// can be captured.
    fn truncate_at_blocker(&self, ray: &[BoardSquare], color: Color) -> Ray {
        let mut legal = Vec::with_capacity(ray.len());

        for square in ray {
            match self.owner_at(*square) {
                None => legal.push(*square),
                Some(owner) => {
                    if owner != color {
                        legal.push(*square);
                    }
                    break;
                }
            }
        }

        legal
    }

    /// Whether `from -> to` is among the current legal moves.
    pub fn is_legal(&self, from: BoardSquare, to: BoardSquare) -> bool {
        self.legal_moves(from).iter().flatten().any(|s| *s == to)
    }

    pub fn legal_labels(&self, square: BoardSquare) -> Vec<String> {
        self.legal_moves(square)
            .iter()
            .flatten()
            .map(|s| s.unparse())
            .collect()
    }
}

fn restrict(rays: &mut [Ray], allowed: &FxHashSet<BoardSquare>) {
    for ray in rays.iter_mut() {
        ray.retain(|s| allowed.contains(s));
    }
}
