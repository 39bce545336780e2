//! A chess position and the move-token operations the tree needs from it.

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::{Chess, Color, EnPassantMode, File, Move, Position as _, Rank, Square};
use tracing::trace;

use crate::error::MoveError;

/// A reachable chess position.
///
/// Wraps the rules engine behind the small surface the rest of the workspace
/// consumes: token interpretation, replay, and serialization. Applying a move
/// produces a new position; values are never mutated in place.
#[derive(Debug, Clone)]
pub struct Position {
    inner: Chess,
}

impl Position {
    /// The canonical starting position.
    pub fn starting() -> Position {
        Position {
            inner: Chess::default(),
        }
    }

    /// Replay a token sequence from the starting position.
    ///
    /// Fails on the first token that is invalid SAN or illegal at the point
    /// it is applied.
    pub fn replay<I, S>(tokens: I) -> Result<Position, MoveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut position = Position::starting();
        for token in tokens {
            position = position.apply(token.as_ref())?;
        }
        trace!(fen = %position.fen(), "replayed move sequence");
        Ok(position)
    }

    /// Apply a single SAN token, returning the resulting position.
    pub fn apply(&self, token: &str) -> Result<Position, MoveError> {
        let mv = self.resolve(token)?;
        let inner = self
            .inner
            .clone()
            .play(&mv)
            .expect("SAN resolution only yields legal moves");
        Ok(Position { inner })
    }

    /// Whether the token names a legal move here.
    pub fn is_legal(&self, token: &str) -> bool {
        self.resolve(token).is_ok()
    }

    /// Normalize a token to canonical SAN, including check/mate suffixes.
    ///
    /// `Qxf7` in a position where that move mates comes back as `Qxf7#`, so
    /// textual comparison of stored tokens is stable regardless of how the
    /// user spelled the move.
    pub fn canonical_san(&self, token: &str) -> Result<String, MoveError> {
        let mv = self.resolve(token)?;
        Ok(SanPlus::from_move(self.inner.clone(), &mv).to_string())
    }

    /// The position in FEN.
    pub fn fen(&self) -> String {
        Fen::from_position(self.inner.clone(), EnPassantMode::Legal).to_string()
    }

    /// Which side moves next.
    pub fn turn(&self) -> Color {
        self.inner.turn()
    }

    /// The piece placement.
    pub fn board(&self) -> &shakmaty::Board {
        self.inner.board()
    }

    /// Number of legal moves in this position.
    pub fn legal_move_count(&self) -> usize {
        self.inner.legal_moves().len()
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.inner.is_check()
    }

    /// Whether the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    /// Whether the position is a stalemate.
    pub fn is_stalemate(&self) -> bool {
        self.inner.is_stalemate()
    }

    /// Resolve a token to the legal move it names here.
    fn resolve(&self, token: &str) -> Result<Move, MoveError> {
        let san: San = token.parse().map_err(|source| MoveError::InvalidSan {
            token: token.to_string(),
            source,
        })?;
        san.to_move(&self.inner)
            .map_err(|source| MoveError::IllegalMove {
                token: token.to_string(),
                source,
            })
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.inner.board();
        for rank in Rank::ALL.iter().rev() {
            write!(f, "{}  ", rank.char())?;
            for file in File::ALL {
                let c = match board.piece_at(Square::from_coords(file, *rank)) {
                    Some(piece) => piece.char(),
                    None => '.',
                };
                if file == File::H {
                    write!(f, "{c}")?;
                } else {
                    write!(f, "{c} ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use shakmaty::Color;

    use super::Position;

    const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn starting_position_fen() {
        assert_eq!(Position::starting().fen(), STARTING_FEN);
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let position = Position::starting();
        assert_eq!(position.legal_move_count(), 20);
        assert_eq!(position.turn(), Color::White);
    }

    #[test]
    fn apply_advances_the_position() {
        let position = Position::starting().apply("e4").unwrap();
        assert_eq!(
            position.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
        assert_eq!(position.turn(), Color::Black);
    }

    #[test]
    fn apply_rejects_illegal_tokens_without_effect() {
        let position = Position::starting();
        assert!(position.apply("e5").is_err());
        assert!(position.apply("Qh5").is_err());
        assert_eq!(position.fen(), STARTING_FEN);
    }

    #[test]
    fn is_legal_matches_apply() {
        let position = Position::starting();
        assert!(position.is_legal("Nf3"));
        assert!(!position.is_legal("Nf6"));
        assert!(!position.is_legal("hello"));
    }

    #[test]
    fn replay_applies_every_token_in_order() {
        let position = Position::replay(["e4", "e5", "Nf3"]).unwrap();
        assert_eq!(
            position.fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn replay_fails_on_first_bad_token() {
        let err = Position::replay(["e4", "e4"]).unwrap_err();
        assert_eq!(format!("{err}"), "illegal move: \"e4\"");
    }

    #[test]
    fn canonical_san_adds_mate_suffix() {
        let position = Position::replay(["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6"]).unwrap();
        assert_eq!(position.canonical_san("Qxf7").unwrap(), "Qxf7#");
        let mated = position.apply("Qxf7").unwrap();
        assert!(mated.is_checkmate());
        assert_eq!(mated.legal_move_count(), 0);
    }

    #[test]
    fn display_renders_the_starting_grid() {
        let rendered = format!("{}", Position::starting());
        assert!(rendered.contains("r n b q k b n r"));
        assert!(rendered.contains("R N B Q K B N R"));
        assert!(rendered.contains("a b c d e f g h"));
    }
}
