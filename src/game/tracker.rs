use crate::game::board::Game;
use crate::game::pieces::{Color, Piece};
use crate::game::registry::PieceId;
use crate::game::square::{BoardSquare, BoardSquareExt};
use fxhash::FxHashSet;
use std::collections::BTreeSet;

impl Game {
    /// Re-registers one piece from its cached reach: targeting entries on
    /// every square of every ray, and blocker/pin links towards the enemy king.
    pub fn update_threats(&mut self, id: PieceId) {
        self.clear_threats(id);
        self.register_threats(id);
    }

    /// Removes every trace of `id` from the targeting index and both sides of
    /// its blocker links. Must run against the reach that was registered.
    pub(crate) fn clear_threats(&mut self, id: PieceId) {
        for ray in &self.pieces[id].reach {
            for square in ray {
                self.tiles[*square as usize].targeted_by.remove(&id);
            }
        }

        let blockers = std::mem::take(&mut self.pieces[id].blocker_pieces);

        for blocker in blockers.into_keys() {
            let record = &mut self.pieces[blocker];
            record.blocking.remove(&id);
            record.refresh_pin();
        }
    }

    pub(crate) fn register_threats(&mut self, id: PieceId) {
        if self.pieces[id].captured {
            return;
        }

        let reach = std::mem::take(&mut self.pieces[id].reach);

        for square in reach.iter().flatten() {
            self.tiles[*square as usize].targeted_by.insert(id);
        }

        // knights jump and pawn/king rays are one square long: only sliders
        // can have something standing between them and the king
        if self.pieces[id].kind.is_slider() {
            let color = self.pieces[id].color;
            let king_square = self.state.king_location(!color);

            for ray in &reach {
                let blockers = self.blockers_before(ray, king_square);

                if blockers.is_empty() {
                    continue;
                }

                let sole = blockers.len() == 1 && self.pieces[blockers[0]].color != color;

                for blocker in blockers {
                    self.link_blocker(id, blocker, sole);
                }
            }
        }

        self.pieces[id].reach = reach;
    }

    /// Walks a ray from its far end back towards its owner. Once the king is
    /// seen, every occupied square between it and the owner is collected.
    /// Empty when the king is not on the ray.
    fn blockers_before(&self, ray: &[BoardSquare], king_square: BoardSquare) -> Vec<PieceId> {
        let mut king_found = false;
        let mut blockers = Vec::new();

        for square in ray.iter().rev() {
            if !king_found {
                king_found = *square == king_square;
                continue;
            }

            if let Some(occupant) = self.tiles[*square as usize].occupant {
                blockers.push(occupant);
            }
        }

        blockers
    }

    fn link_blocker(&mut self, attacker: PieceId, blocker: PieceId, sole: bool) {
        self.pieces[attacker].blocker_pieces.insert(blocker, sole);

        let record = &mut self.pieces[blocker];
        record.blocking.insert(attacker, sole);
        record.refresh_pin();

        if sole {
            let (pinned, by) = (&self.pieces[blocker], &self.pieces[attacker]);
            log::debug!(
                "{} {} on {} is pinned by the {} on {}",
                pinned.color,
                pinned.kind,
                pinned.square.unparse(),
                by.kind,
                by.square.unparse()
            );
        }
    }

    /// Takes a captured piece out of every registry. Returns the attackers it
    /// was standing in front of, whose lines have just opened.
    pub(crate) fn detach_piece(&mut self, id: PieceId) -> Vec<PieceId> {
        self.clear_threats(id);

        let attackers: Vec<PieceId> = std::mem::take(&mut self.pieces[id].blocking)
            .into_keys()
            .collect();

        for attacker in &attackers {
            self.pieces[*attacker].blocker_pieces.remove(&id);
        }

        let record = &mut self.pieces[id];
        record.is_protecting_king = false;
        record.captured = true;

        let color = record.color;
        if !self.players[color as usize].remove(id) {
            log::error!("Captured piece {} was not registered with {}", id, color);
            debug_assert!(false, "captured piece missing from its player");
        }

        attackers
    }

    /// Repairs derived state after `id` went from `from` to `to`. The board
    /// occupancy must already reflect the move; `stale` carries attackers that
    /// lost a blocker to a capture.
    pub(crate) fn on_piece_moved(
        &mut self,
        id: PieceId,
        from: BoardSquare,
        to: BoardSquare,
        stale: Vec<PieceId>,
    ) {
        let color = self.pieces[id].color;
        let mut stale: BTreeSet<PieceId> = stale.into_iter().collect();

        if self.pieces[id].kind == Piece::King {
            self.state.king_locations[color as usize] = to;
            stale.extend(self.players[!color as usize].pieces.iter().copied());
        }

        // lines the piece used to block, and lines it stepped into or out of
        stale.extend(self.pieces[id].blocking.keys().copied());
        stale.extend(self.tiles[from as usize].targeted_by.iter().copied());
        stale.extend(self.tiles[to as usize].targeted_by.iter().copied());
        stale.remove(&id);

        self.clear_threats(id);
        self.recompute_reach(id);
        self.register_threats(id);

        for attacker in stale {
            if self.pieces[attacker].captured {
                continue;
            }

            self.update_threats(attacker);
        }

        log::debug!(
            "Repaired threats after {}-{}",
            from.unparse(),
            to.unparse()
        );
    }

    /// Pieces of `by` that can capture on `square` right now. `ignoring` is
    /// treated as empty, so a king testing its escape squares does not hide
    /// behind itself.
    pub fn attackers_of(
        &self,
        square: BoardSquare,
        by: Color,
        ignoring: Option<BoardSquare>,
    ) -> Vec<PieceId> {
        let mut attackers: Vec<PieceId> = self.tiles[square as usize]
            .targeted_by
            .iter()
            .copied()
            .filter(|a| {
                let attacker = &self.pieces[*a];

                if attacker.color != by || attacker.captured {
                    return false;
                }

                let Some((ray_index, position)) = attacker.locate_on_reach(square) else {
                    log::error!(
                        "{} is registered on {} but does not reach it",
                        a,
                        square.unparse()
                    );
                    debug_assert!(false, "stale targeting entry");
                    return false;
                };

                attacker.ray_attacks(ray_index)
                    && attacker.reach[ray_index][..position]
                        .iter()
                        .all(|s| Some(*s) == ignoring || !self.tiles[*s as usize].is_occupied())
            })
            .collect();

        attackers.sort_unstable();
        attackers
    }

    pub fn is_attacked(&self, square: BoardSquare, by: Color, ignoring: Option<BoardSquare>) -> bool {
        !self.attackers_of(square, by, ignoring).is_empty()
    }

    /// Enemy pieces giving check to `color`'s king.
    pub fn checkers(&self, color: Color) -> Vec<PieceId> {
        self.attackers_of(self.state.king_location(color), !color, None)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        !self.checkers(color).is_empty()
    }

    /// Attacker square plus every square between it and the king it targets,
    /// i.e. where a piece may stand to capture or block. Empty if the
    /// attacker does not reach that king.
    pub fn line_to_king(&self, attacker: PieceId, king_square: BoardSquare) -> FxHashSet<BoardSquare> {
        let record = &self.pieces[attacker];
        let mut line = FxHashSet::default();

        if let Some((ray_index, position)) = record.locate_on_reach(king_square) {
            line.extend(record.reach[ray_index][..position].iter().copied());
            line.insert(record.square);
        }

        line
    }

    /// Squares a pinned piece may still use: the intersection of the lines
    /// of every attacker pinning it. `None` when it is not pinned.
    pub fn pin_line(&self, id: PieceId) -> Option<FxHashSet<BoardSquare>> {
        let record = &self.pieces[id];

        if !record.is_protecting_king {
            return None;
        }

        let king_square = self.state.king_location(record.color);

        record
            .blocking
            .iter()
            .filter(|(_, sole)| **sole)
            .map(|(attacker, _)| self.line_to_king(*attacker, king_square))
            .reduce(|a, b| a.intersection(&b).copied().collect())
    }

    /// Pieces of `color` currently pinned to their own king.
    pub fn pinned_pieces(&self, color: Color) -> Vec<PieceId> {
        self.player(color)
            .sorted_pieces()
            .into_iter()
            .filter(|id| self.pieces[*id].is_protecting_king)
            .collect()
    }
}
