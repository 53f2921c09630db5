/// Generic embed builders shared across commands.
pub mod embed;
/// Shared formatting helpers (durations, progress bars, counters).
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Pure parser helpers.
pub mod parse;
/// Shared time helpers.
pub mod time;
