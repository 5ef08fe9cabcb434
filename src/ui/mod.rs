// UI module - terminal command handling
//
// This module contains:
// - Command: parsed form of one input line
// - run_command_loop: reads commands and drives the RunController
//
// Drawing lives in crate::render; this module only turns input into controller calls.

pub mod commands;

pub use commands::{Command, CommandError, HELP_TEXT, dispatch, run_command_loop};
