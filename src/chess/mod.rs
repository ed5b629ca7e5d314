//! Chess rules: the board, the pieces and how they move, notation and the
//! game state that decides what is legal.

pub mod army;
pub mod board;
pub mod core;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod position;
