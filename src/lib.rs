//! Chess rules engine: legality checking under full chess law, SAN and FEN
//! input, perft and a small fixed-depth search for automated play. For more
//! information, see [README].
//!
//! [`chess::game::Game`] is the entry point of the library: it keeps the
//! position, accepts moves and reports check, checkmate, stalemate and draws.
//! [`Engine`] wraps it into a line-oriented text protocol.
//!
//! [README]: https://github.com/kirillbobyrev/rankfile/blob/main/README.md

pub mod chess;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod perft;
pub mod search;

pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the one-line banner with the version on startup.
pub fn print_engine_info() {
    println!("rankfile {}", engine_version());
    if !shadow_rs::git_clean() {
        log::warn!("built with uncommitted changes");
    }
}
