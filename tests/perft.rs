//! Reference counts from <https://www.chessprogramming.org/Perft_Results>.

use pretty_assertions::assert_eq;
use rankfile::chess::game::Game;
use rankfile::perft::TestResult;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn perft(fen: &str, depth: u8) -> u64 {
    let mut game = Game::from_fen(fen).unwrap();
    let before = game.fen();
    let nodes = game.perft(depth).unwrap();
    assert_eq!(game.fen(), before);
    nodes
}

#[test]
fn starting_position() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    assert_eq!(perft(fen, 1), 20);
    assert_eq!(perft(fen, 2), 400);
    assert_eq!(perft(fen, 3), 8_902);
}

#[test]
#[ignore]
fn starting_position_deep() {
    assert_eq!(Game::new().perft(4).unwrap(), 197_281);
}

#[test]
fn kiwipete() {
    let mut game = Game::from_fen(KIWIPETE).unwrap();
    assert_eq!(
        game.perft_with_stats(1).unwrap(),
        TestResult {
            nodes: 48,
            captures: 8,
            castles: 2,
            ..TestResult::default()
        }
    );
    assert_eq!(
        game.perft_with_stats(2).unwrap(),
        TestResult {
            nodes: 2_039,
            captures: 351,
            en_passant: 1,
            castles: 91,
            checks: 3,
            ..TestResult::default()
        }
    );
}

#[test]
fn position_3() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    assert_eq!(perft(fen, 1), 14);
    assert_eq!(perft(fen, 2), 191);
    assert_eq!(perft(fen, 3), 2_812);
}

#[test]
#[ignore]
fn position_3_deep() {
    assert_eq!(perft("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4), 43_238);
}

#[test]
fn position_4() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    assert_eq!(perft(fen, 1), 6);
    assert_eq!(perft(fen, 2), 264);
}

#[test]
#[ignore]
fn position_4_deep() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    assert_eq!(perft(fen, 3), 9_467);
}

#[test]
fn position_5() {
    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    assert_eq!(perft(fen, 1), 44);
    assert_eq!(perft(fen, 2), 1_486);
}

#[test]
fn position_6() {
    let fen = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";
    assert_eq!(perft(fen, 1), 46);
    assert_eq!(perft(fen, 2), 2_079);
}

#[test]
fn divide_matches_perft() {
    let mut game = Game::from_fen(KIWIPETE).unwrap();
    let split = game.divide(2).unwrap();
    assert_eq!(split.len(), 48);
    assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 2_039);
}
