//! A simulation session drives an engine in fixed-size ticks, feeding an aggregator, and tracks
//! how much of the accumulated output has been revealed to the viewer.

use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace};

use crate::mc::SamplingEngine;
use crate::metrics::ResultAggregator;
use crate::model::error::ModelError;
use crate::model::SimulationConfig;

#[cfg(test)]
mod tests;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("invalid session options: {0}")]
    InvalidOptions(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub sims_per_tick: usize,
    pub max_sims: usize,
    pub history_interval: u64,
}
impl SessionOptions {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.sims_per_tick == 0 {
            return Err(SessionError::InvalidOptions("sims per tick must be positive".into()));
        }
        if self.history_interval == 0 {
            return Err(SessionError::InvalidOptions("history interval must be positive".into()));
        }
        Ok(())
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            sims_per_tick: 100,
            max_sims: 50_000,
            history_interval: 10,
        }
    }
}

/// How far to advance the reveal cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Count(usize),
    All,
}

impl FromStr for Reveal {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Reveal::All);
        }
        s.parse()
            .map(Reveal::Count)
            .map_err(|_| SessionError::InvalidOptions(format!("cannot reveal '{s}'")))
    }
}

#[derive(Debug)]
pub struct SimulationSession {
    options: SessionOptions,
    engine: SamplingEngine,
    aggregator: ResultAggregator,
    next_id: u64,
    ticks: u64,
    revealed: usize,
}
impl SimulationSession {
    pub fn new(config: SimulationConfig, options: SessionOptions) -> Result<Self, SessionError> {
        options.validate()?;
        let engine = SamplingEngine::new(config)?;
        let aggregator = ResultAggregator::new(engine.model().total_rounds());
        debug!(
            "session created: seed: {}, draw: {}, options: {options:?}",
            engine.seed(),
            engine.enable_draw()
        );
        Ok(Self {
            options,
            engine,
            aggregator,
            next_id: 0,
            ticks: 0,
            revealed: 0,
        })
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn engine(&self) -> &SamplingEngine {
        &self.engine
    }

    pub fn aggregator(&self) -> &ResultAggregator {
        &self.aggregator
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.aggregator.len() >= self.options.max_sims
    }

    /// Runs one batch, unless the session has reached its cap. Returns the number of records
    /// produced.
    pub fn tick(&mut self) -> usize {
        let remaining = self.options.max_sims.saturating_sub(self.aggregator.len());
        if remaining == 0 {
            return 0;
        }
        let count = usize::min(self.options.sims_per_tick, remaining);
        let records = self.engine.simulate_batch(count, self.next_id);
        self.aggregator.add_results(records);
        self.next_id += count as u64;
        self.ticks += 1;
        if self.ticks % self.options.history_interval == 0 {
            self.aggregator.record_history(self.ticks);
        }
        trace!("tick {}: {count} sims, {} total", self.ticks, self.aggregator.len());
        count
    }

    /// Ticks until the cap is reached, returning the number of ticks run.
    pub fn run_to_completion(&mut self) -> u64 {
        let start = self.ticks;
        while self.tick() > 0 {}
        let ticks = self.ticks - start;
        debug!("ran {ticks} ticks, {} sims", self.aggregator.len());
        ticks
    }

    /// Advances the reveal cursor, never past the number of accumulated records. Returns the
    /// new cursor position.
    pub fn reveal(&mut self, reveal: Reveal) -> usize {
        let total = self.aggregator.len();
        self.revealed = match reveal {
            Reveal::Count(count) => usize::min(self.revealed.saturating_add(count), total),
            Reveal::All => total,
        };
        self.revealed
    }

    /// A separate aggregator over the revealed prefix. The convergence history is copied from
    /// the full run.
    pub fn revealed_view(&self) -> ResultAggregator {
        let revealed = usize::min(self.revealed, self.aggregator.len());
        let mut view = ResultAggregator::replay(
            self.aggregator.total_rounds(),
            &self.aggregator.records()[..revealed],
        );
        view.set_history(self.aggregator.history().to_vec());
        view
    }

    pub fn reseed(&mut self, seed: i64) {
        debug!("reseeding with {seed}");
        self.engine.reseed(seed);
    }

    /// Discards all results and counters. The engine keeps its current random state.
    pub fn reset(&mut self) {
        self.aggregator.reset();
        self.next_id = 0;
        self.ticks = 0;
        self.revealed = 0;
    }
}
