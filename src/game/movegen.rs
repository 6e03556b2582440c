use crate::game::graph::BoardGraph;
use crate::game::pieces::{Color, Piece};
use crate::game::registry::Ray;
use crate::game::square::{BOARD_SIZE, BoardSquare, BoardSquareExt};

/// Raw geometric reach of a piece standing on `square`: one ordered ray per
/// direction, nearest square first. Occupancy is never consulted, so the
/// result can be cached until the piece itself moves.
pub fn generate(
    piece: Piece,
    color: Color,
    has_moved: bool,
    square: BoardSquare,
    graph: &BoardGraph,
) -> Vec<Ray> {
    match piece {
        Piece::Pawn => pawn_rays(color, has_moved, square, graph),
        Piece::Knight => knight_rays(square, graph),
        Piece::Bishop => bishop_rays(square, graph),
        Piece::Rook => rook_rays(square, graph),
        Piece::Queen => {
            let mut rays = bishop_rays(square, graph);
            rays.extend(rook_rays(square, graph));
            rays
        }
        Piece::King => king_rays(square, graph),
    }
}

/// Always three rays: straight, forward-left, forward-right (left and right
/// as seen by the mover). A diagonal that would leave the board is empty.
fn pawn_rays(color: Color, has_moved: bool, square: BoardSquare, graph: &BoardGraph) -> Vec<Ray> {
    let forward = color.forward();
    let mut rays: Vec<Ray> = vec![vec![], vec![], vec![]];

    if let Some(first) = graph.step(square, 0, forward) {
        rays[0].push(first);

        if !has_moved {
            if let Some(second) = graph.step(first, 0, forward) {
                rays[0].push(second);
            }
        }
    }

    // white's left is the a-file side, black's is the h-file side
    let left = -forward;

    rays[1].extend(graph.step(square, left, forward));
    rays[2].extend(graph.step(square, -left, forward));

    rays
}

/// Each landing square is reached by stepping to an orthogonal neighbour and
/// then to one of its diagonal neighbours that shares neither file nor rank
/// with the origin.
fn knight_rays(square: BoardSquare, graph: &BoardGraph) -> Vec<Ray> {
    let mut rays = Vec::with_capacity(8);

    for &orthogonal in graph.neighbors(square) {
        if !orthogonal.shares_line_with(square) {
            continue;
        }

        for &landing in graph.neighbors(orthogonal) {
            if landing.shares_line_with(orthogonal) || landing.shares_line_with(square) {
                continue;
            }

            rays.push(vec![landing]);
        }
    }

    rays
}

fn bishop_rays(square: BoardSquare, graph: &BoardGraph) -> Vec<Ray> {
    graph
        .neighbors(square)
        .iter()
        .filter(|n| !n.shares_line_with(square))
        .map(|&first| diagonal_walk(square, first, graph))
        .collect()
}

/// Extends a diagonal from `first` away from `origin` until the edge. The
/// continuation is the diagonal neighbour of the last square that shares
/// neither file nor rank with the square before it.
fn diagonal_walk(origin: BoardSquare, first: BoardSquare, graph: &BoardGraph) -> Ray {
    let mut ray = vec![first];
    let (mut previous, mut last) = (origin, first);

    while let Some(&next) = graph.neighbors(last).iter().find(|n| {
        !n.shares_line_with(last)
            && n.get_file() != previous.get_file()
            && n.get_rank() != previous.get_rank()
    }) {
        ray.push(next);
        previous = last;
        last = next;
    }

    ray
}

fn rook_rays(square: BoardSquare, graph: &BoardGraph) -> Vec<Ray> {
    graph
        .neighbors(square)
        .iter()
        .filter(|n| n.shares_line_with(square))
        .map(|&first| straight_walk(square, first))
        .collect()
}

/// Iterates the free coordinate (rank along a file, file along a rank) from
/// the neighbour to the board boundary, the other coordinate held fixed.
fn straight_walk(origin: BoardSquare, first: BoardSquare) -> Ray {
    let along_file = origin.get_file() == first.get_file();

    let (start, bound, seed) = if along_file {
        let seed = first.get_rank() as i8 - origin.get_rank() as i8;
        (first.get_rank() as i8, first.get_file(), seed)
    } else {
        let seed = first.get_file() as i8 - origin.get_file() as i8;
        (first.get_file() as i8, first.get_rank(), seed)
    };

    let mut ray = Vec::with_capacity(BOARD_SIZE as usize - 1);
    let mut index = start;

    while (0..BOARD_SIZE as i8).contains(&index) {
        ray.push(if along_file {
            BoardSquare::from_position(bound, index as u8)
        } else {
            BoardSquare::from_position(index as u8, bound)
        });

        index += seed;
    }

    ray
}

fn king_rays(square: BoardSquare, graph: &BoardGraph) -> Vec<Ray> {
    graph.neighbors(square).iter().map(|&n| vec![n]).collect()
}
