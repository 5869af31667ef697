//! Glide Snake - an arcade Snake with continuous movement
//!
//! This library provides:
//! - Core simulation (game module): chase-follow body, items, status effects,
//!   scoring, and the menu/play/pause/game-over state machine
//! - Best-score persistence (storage module)
//! - Audio cue sink (audio module)
//! - Terminal host: key mapping (input), drawing (render) and the play loop (modes)

pub mod audio;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod storage;
