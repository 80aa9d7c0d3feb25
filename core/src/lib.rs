//! Emily Idle game core: deterministic idle simulation, progression,
//! nostalgia prestige and versioned saves.

pub mod types;
pub mod error;
pub mod config;
pub mod state;
pub mod rng;
pub mod clock;
pub mod command;
pub mod event;
pub mod format;
pub mod settings;
pub mod snapshot;
pub mod save_codec;
pub mod store;
pub mod engine;

// Subsystems
pub mod modifiers;
pub mod simulation_subsystem;
pub mod ledger_subsystem;
pub mod catalog_subsystem;
pub mod career_subsystem;
pub mod scheduler_subsystem;
pub mod achievement_subsystem;
pub mod prestige_subsystem;
