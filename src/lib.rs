//! A seeded Monte Carlo model of a two-party contest. Converts American odds into fair
//! probabilities for each method of victory, samples the winner, method and round of a large
//! number of independent contests, and aggregates the outcomes into summary statistics.

pub mod csv;
pub mod file;
pub mod mc;
pub mod metrics;
pub mod model;
pub mod odds;
pub mod print;
pub mod probs;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
