//! starsearch CLI library.
//!
//! Output formatting shared by the `starsearch` subcommands.

pub mod output;
