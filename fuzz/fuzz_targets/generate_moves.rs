#![no_main]
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use rankfile::chess::game::Game;
use shakmaty::{CastlingMode, Chess, Position};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut game) = Game::from_fen(input) else {
        return;
    };
    let Ok(setup) = input.parse::<shakmaty::fen::Fen>() else {
        return;
    };
    let Ok(reference) = setup.into_position::<Chess>(CastlingMode::Standard) else {
        return;
    };
    let before = game.fen();
    assert_eq!(
        game.generate_legal_moves()
            .iter()
            .map(ToString::to_string)
            .sorted()
            .collect::<Vec<_>>(),
        reference
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .sorted()
            .collect::<Vec<_>>()
    );
    assert_eq!(game.fen(), before);
});
