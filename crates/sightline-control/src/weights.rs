//! Per-square control metrics: who exerts pressure where, and how much.

use std::ops::Index;

use shakmaty::{Color, Role, Square, attacks};
use tracing::debug;

use sightline_core::Position;

/// A numeric weight for each of the 64 squares, indexed by [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareWeights([u32; 64]);

impl SquareWeights {
    /// A grid of all zeroes.
    pub const fn zeroed() -> SquareWeights {
        SquareWeights([0; 64])
    }

    /// The weight on `square`.
    pub fn get(&self, square: Square) -> u32 {
        self.0[usize::from(square)]
    }

    /// The largest weight anywhere on the grid.
    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    fn add(&mut self, square: Square, weight: u32) {
        self.0[usize::from(square)] += weight;
    }
}

impl Index<Square> for SquareWeights {
    type Output = u32;

    fn index(&self, square: Square) -> &u32 {
        &self.0[usize::from(square)]
    }
}

/// Knobs for the control computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlOptions {
    /// Weight attackers by expendability (pawn highest, queen lowest)
    /// instead of counting every attacker as 1.
    pub reverse_weights: bool,
}

/// Importance rings around the board center.
///
/// The four center squares (d4, d5, e4, e5) weigh 3, the ring around them 2,
/// the next ring 1, the rim 0.
pub fn central_importance() -> SquareWeights {
    let mut weights = SquareWeights::zeroed();
    for square in Square::ALL {
        let ring = ring_distance(square);
        weights.0[usize::from(square)] = 3u32.saturating_sub(ring);
    }
    weights
}

/// How many rings out from the four center squares `square` sits.
fn ring_distance(square: Square) -> u32 {
    let spread = |coordinate: u32| -> u32 {
        if coordinate < 3 {
            3 - coordinate
        } else if coordinate > 4 {
            coordinate - 4
        } else {
            0
        }
    };
    spread(u32::from(square.file())).max(spread(u32::from(square.rank())))
}

/// How much the side to move presses on each square.
///
/// Every piece adds its weight to every square in its attack set, occupied
/// squares included, so defended friendly pieces count. Pawns contribute
/// their capture squares only, never pushes.
pub fn attacking_control(position: &Position, options: ControlOptions) -> SquareWeights {
    control_for(position, position.turn(), options)
}

/// The same metric for the waiting player.
pub fn defending_control(position: &Position, options: ControlOptions) -> SquareWeights {
    control_for(position, position.turn().other(), options)
}

fn control_for(position: &Position, side: Color, options: ControlOptions) -> SquareWeights {
    let board = position.board();
    let occupied = board.occupied();
    let mut weights = SquareWeights::zeroed();
    for from in board.by_color(side) {
        let piece = board
            .piece_at(from)
            .expect("an occupied square holds a piece");
        let weight = piece_weight(piece.role, options);
        for target in attacks::attacks(from, piece, occupied) {
            weights.add(target, weight);
        }
    }
    debug!(side = ?side, max = weights.max(), "computed control weights");
    weights
}

/// Weight of one attacker. Kings always count as 1; with reverse weights on,
/// the cheaper the piece, the heavier its control.
fn piece_weight(role: Role, options: ControlOptions) -> u32 {
    if !options.reverse_weights {
        return 1;
    }
    match role {
        Role::Pawn => 9,
        Role::Knight | Role::Bishop => 7,
        Role::Rook => 5,
        Role::Queen | Role::King => 1,
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::Square;

    use sightline_core::Position;

    use super::{ControlOptions, attacking_control, central_importance, defending_control};

    #[test]
    fn central_importance_rings() {
        let weights = central_importance();
        assert_eq!(weights[Square::E4], 3);
        assert_eq!(weights[Square::D5], 3);
        assert_eq!(weights[Square::C3], 2);
        assert_eq!(weights[Square::F6], 2);
        assert_eq!(weights[Square::B2], 1);
        assert_eq!(weights[Square::G7], 1);
        assert_eq!(weights[Square::A1], 0);
        assert_eq!(weights[Square::H8], 0);
        assert_eq!(weights.max(), 3);
    }

    #[test]
    fn starting_position_attack_counts() {
        let weights = attacking_control(&Position::starting(), ControlOptions::default());
        // f3 is hit by the e2 and g2 pawns and the g1 knight.
        assert_eq!(weights[Square::F3], 3);
        // h3 by the g2 pawn and the g1 knight.
        assert_eq!(weights[Square::H3], 2);
        // Nothing white reaches e4 yet.
        assert_eq!(weights[Square::E4], 0);
        // Defended friendly squares count: d2 is covered by queen, king,
        // bishop and knight.
        assert_eq!(weights[Square::D2], 4);
    }

    #[test]
    fn reverse_weights_scale_by_expendability() {
        let options = ControlOptions {
            reverse_weights: true,
        };
        let weights = attacking_control(&Position::starting(), options);
        // Two pawns and a knight: 9 + 9 + 7.
        assert_eq!(weights[Square::F3], 25);
    }

    #[test]
    fn defending_mirrors_for_the_waiting_player() {
        let weights = defending_control(&Position::starting(), ControlOptions::default());
        // White is to move at the start, so black is the waiting player:
        // f6 is covered by the e7 and g7 pawns and the g8 knight.
        assert_eq!(weights[Square::F6], 3);
        assert_eq!(weights[Square::F3], 0);
    }

    #[test]
    fn control_follows_the_side_to_move() {
        let position = Position::starting().apply("e4").unwrap();
        // Black to move now, so attacking control is black's.
        let attacking = attacking_control(&position, ControlOptions::default());
        assert_eq!(attacking[Square::F6], 3);
        // The waiting player's pawn on e4 presses d5 and f5.
        let defending = defending_control(&position, ControlOptions::default());
        assert_eq!(defending[Square::D5], 1);
        assert_eq!(defending[Square::F5], 1);
    }
}
