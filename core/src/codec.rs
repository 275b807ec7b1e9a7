use alloc::string::String;
use alloc::vec::Vec;

use crate::{BoardError, BoardState, Coord, Result, Tile};

/// Zero point of the wire alphabet; the width header and every cell code
/// are offsets from this byte.
const BASE: u8 = b'A';

/// Standard 5x5 two-player opening: two workers per side on the center
/// cross, no buildings.
pub const DEFAULT_OPENING: &str = "CAAAAAAAIAAAQAQAAAIAAAAAAA";

/// Decode a state string into a [`BoardState`].
///
/// The first character carries the board width (`'A'` = 3). Every following
/// character packs one cell as `(team << 3) | height`; the cell at string
/// offset `i + 1` sits at row `i / width`, column `i % width`. External
/// tools producing state strings rely on this exact mapping.
pub fn decode(state: &str) -> Result<BoardState> {
    if let Some(bad) = state.chars().find(|c| !c.is_ascii()) {
        return Err(BoardError::BadCharacter(bad));
    }

    let (&first, cells) = state
        .as_bytes()
        .split_first()
        .ok_or(BoardError::TooShort)?;
    let width = decode_width(first)?;
    if cells.is_empty() {
        return Err(BoardError::TooShort);
    }
    if cells.len() % usize::from(width) != 0 {
        return Err(BoardError::RaggedLength);
    }
    let height = Coord::try_from(cells.len() / usize::from(width))
        .map_err(|_| BoardError::Dimensions)?;

    let mut tiles = Vec::with_capacity(cells.len());
    for &byte in cells {
        let code = byte
            .checked_sub(BASE)
            .ok_or(BoardError::BadCharacter(byte as char))?;
        tiles.push(Tile::from_code(code)?);
    }
    BoardState::from_rows(width, height, tiles)
}

/// Encode a board back into its state string.
///
/// Exact inverse of [`decode`]: `encode(&decode(s)?) == s` for every
/// well-formed `s`. Total, because [`BoardState`] enforces the encodable
/// dimension range at construction.
pub fn encode(board: &BoardState) -> String {
    let mut out = String::with_capacity(1 + usize::from(board.total_cells()));
    out.push(char::from(BASE + board.width() - BoardState::MIN_WIDTH));
    for (_, tile) in board.iter() {
        out.push(char::from(BASE + tile.code()));
    }
    out
}

pub(crate) const fn decode_width(byte: u8) -> Result<Coord> {
    if byte < BASE {
        return Err(BoardError::BadCharacter(byte as char));
    }
    let width = byte - BASE + BoardState::MIN_WIDTH;
    if width > BoardState::MAX_WIDTH {
        return Err(BoardError::Dimensions);
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use super::*;
    use crate::Team;

    #[test]
    fn width_header_is_offset_from_minimum() {
        assert_eq!(decode_width(b'A'), Ok(3));
        assert_eq!(decode_width(b'C'), Ok(5));
    }

    #[test]
    fn width_header_below_alphabet_is_rejected() {
        assert_eq!(decode_width(b'@'), Err(BoardError::BadCharacter('@')));
    }

    #[test]
    fn default_opening_decodes_to_standard_layout() {
        let board = decode(DEFAULT_OPENING).unwrap();

        assert_eq!(board.size(), (5, 5));
        assert_eq!(board.tile_at((2, 1)).worker(), Some(Team::A));
        assert_eq!(board.tile_at((2, 3)).worker(), Some(Team::A));
        assert_eq!(board.tile_at((1, 2)).worker(), Some(Team::B));
        assert_eq!(board.tile_at((3, 2)).worker(), Some(Team::B));
        assert_eq!(board.tile_at((0, 0)), Tile::default());
        assert!(board.iter().all(|(_, tile)| tile.height() == 0));
    }

    #[test]
    fn default_opening_round_trips() {
        let board = decode(DEFAULT_OPENING).unwrap();

        assert_eq!(encode(&board), DEFAULT_OPENING);
    }

    #[test]
    fn empty_and_header_only_strings_are_too_short() {
        assert_eq!(decode(""), Err(BoardError::TooShort));
        assert_eq!(decode("C"), Err(BoardError::TooShort));
    }

    #[test]
    fn truncated_body_is_rejected() {
        let short = &DEFAULT_OPENING[..DEFAULT_OPENING.len() - 1];

        assert_eq!(decode(short), Err(BoardError::RaggedLength));
    }

    #[test]
    fn cell_below_alphabet_is_rejected() {
        assert_eq!(decode("A@AA"), Err(BoardError::BadCharacter('@')));
    }

    #[test]
    fn non_ascii_input_is_rejected() {
        assert_eq!(decode("Ahöh"), Err(BoardError::BadCharacter('ö')));
    }

    #[test]
    fn invalid_team_code_is_rejected() {
        // 'Z' = 25 = (3 << 3) | 1, team 3 does not exist
        assert_eq!(decode("AZAA"), Err(BoardError::BadTeam(3)));
    }

    #[test]
    fn invalid_height_code_is_rejected() {
        // 'F' = 5, height 5 exceeds a capped tower
        assert_eq!(decode("AFAA"), Err(BoardError::BadHeight(5)));
    }

    #[test]
    fn non_square_boards_decode() {
        // width 3, six cells: two rows
        let board = decode("AAAAAAA").unwrap();

        assert_eq!(board.size(), (3, 2));
    }

    #[test]
    fn random_boards_round_trip() {
        let mut rng = SmallRng::seed_from_u64(0x7041);

        for _ in 0..200 {
            let width: Coord = rng.random_range(3..=8);
            let height: Coord = rng.random_range(1..=8);
            let mut state = String::from(char::from(b'A' + width - 3));
            for _ in 0..u16::from(width) * u16::from(height) {
                let team = rng.random_range(0..=2u8);
                let tile_height = rng.random_range(0..=4u8);
                state.push(char::from(b'A' + ((team << 3) | tile_height)));
            }

            let board = decode(&state).unwrap();
            assert_eq!(board.size(), (width, height));
            assert_eq!(encode(&board), state);
        }
    }
}
