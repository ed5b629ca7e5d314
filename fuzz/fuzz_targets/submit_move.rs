#![no_main]
use libfuzzer_sys::fuzz_target;
use rankfile::chess::game::Game;

// Arbitrary SAN against a position with every special move available must
// either be played or leave the game untouched.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut game) =
        Game::from_fen("r3k2r/1P4pp/8/3pP3/8/8/6PP/R3K2R w KQkq d6 0 1")
    else {
        return;
    };
    let before = game.fen();
    for san in input.split_whitespace() {
        let fen = game.fen();
        if game.submit_move(san).is_err() {
            assert_eq!(game.fen(), fen);
        }
    }
    if game.history().is_empty() {
        assert_eq!(game.fen(), before);
    }
});
