//! Goalhorn: watches today's NHL games and posts each goal highlight as it
//! becomes available, with follow-up replies when the league corrects a goal.

pub mod cli;
pub mod config;
pub mod logging;
