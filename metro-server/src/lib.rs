//! Metro route planner server.
//!
//! Answers "how do I get from here to there on the metro?", either by the
//! quickest route or by the one with the fewest changes of line, with the
//! wait for the first train, arrival time and fare.

pub mod config;
pub mod domain;
pub mod loader;
pub mod network;
pub mod planner;
pub mod service;
pub mod timetable;
pub mod web;
