#![no_main]
use libfuzzer_sys::fuzz_target;
use rankfile::chess::game::Game;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(game) = Game::try_from(input) {
            let fen = game.fen();
            assert_eq!(Game::from_fen(&fen).map(|game| game.fen()).ok(), Some(fen));
        }
    }
});
