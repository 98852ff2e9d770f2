pub mod config;
pub mod player;
pub mod script;
pub mod ui;

pub use player::{animate_move, Player};
pub use script::{Script, ScriptError, ScriptRunner, Step, StepOutcome};
