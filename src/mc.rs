//! Monte Carlo sampling of contest outcomes.
//!
//! Each trial draws a top-level outcome by inverse-CDF lookup against the cumulative fair
//! probabilities, then, for a finish, draws the round from the finishing party's cumulative
//! round weights. The random source is a seeded [`Wyrand`], so identical configurations and
//! identical sequences of batch sizes reproduce identical records.

use std::fmt::{Debug, Formatter};

use ordinalizer::Ordinal;
use tinyrand::{Rand, Seeded, Wyrand};

use crate::model::error::ModelError;
use crate::model::{Method, Outcome, OutcomeModel, Party, RoundWeights, SimulationConfig, Winner};
use crate::probs::{search_sorted, SliceExt};


/// A single simulated contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutcomeRecord {
    pub sim_id: u64,
    pub winner: Winner,
    pub method: Method,
    /// `1..=total_rounds` for a finish; `total_rounds + 1` when the contest goes the distance.
    pub round: usize,
}
impl OutcomeRecord {
    pub fn outcome(&self) -> Outcome {
        Outcome::classify(self.winner, self.method)
    }
}

pub struct SamplingEngine {
    model: OutcomeModel,
    seed: i64,
    enable_draw: bool,
    rand: Wyrand,
    outcomes: Vec<Outcome>,
    cumulative: Vec<f64>,
    round_cumulatives: [Vec<f64>; 2],
}
impl SamplingEngine {
    pub fn new(config: SimulationConfig) -> Result<Self, ModelError> {
        let SimulationConfig {
            prices,
            round_weights,
            seed,
            enable_draw,
        } = config;
        let model = OutcomeModel::new(prices, round_weights)?;
        let (outcomes, probs): (Vec<_>, Vec<_>) = model
            .top_level_probabilities(enable_draw)?
            .into_iter()
            .unzip();
        let cumulative = probs.cumulative();
        debug_assert!(
            cumulative.last().map_or(false, |&last| (last - 1.0).abs() < 1e-9),
            "cumulative table does not reach 1: {cumulative:?}"
        );
        let round_cumulatives = [
            model.round_weights_for(Party::A).cumulative(),
            model.round_weights_for(Party::B).cumulative(),
        ];
        Ok(Self {
            model,
            seed,
            enable_draw,
            rand: rand_from_seed(seed),
            outcomes,
            cumulative,
            round_cumulatives,
        })
    }

    pub fn model(&self) -> &OutcomeModel {
        &self.model
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn enable_draw(&self) -> bool {
        self.enable_draw
    }

    /// The configuration this engine currently runs with, round weights normalised.
    pub fn config(&self) -> SimulationConfig {
        SimulationConfig {
            prices: self.model.prices().clone(),
            round_weights: RoundWeights {
                party_a: self.model.round_weights_for(Party::A).to_vec(),
                party_b: self.model.round_weights_for(Party::B).to_vec(),
            },
            seed: self.seed,
            enable_draw: self.enable_draw,
        }
    }

    /// The top-level cumulative table, in canonical order.
    pub fn cumulative_table(&self) -> impl Iterator<Item = (Outcome, f64)> + '_ {
        self.outcomes.iter().copied().zip(self.cumulative.iter().copied())
    }

    /// Restarts the random source from `seed`. Probability tables are unaffected.
    pub fn reseed(&mut self, seed: i64) {
        self.rand = rand_from_seed(seed);
        self.seed = seed;
    }

    pub fn simulate_batch(&mut self, count: usize, start_id: u64) -> Vec<OutcomeRecord> {
        let mut records = Vec::with_capacity(count);
        for (sim_id, _) in (start_id..).zip(0..count) {
            records.push(self.simulate_once(sim_id));
        }
        records
    }

    fn simulate_once(&mut self, sim_id: u64) -> OutcomeRecord {
        let random = random_f64(&mut self.rand);
        let index = usize::min(search_sorted(&self.cumulative, random), self.outcomes.len() - 1);
        let outcome = self.outcomes[index];
        let round = match outcome.finisher() {
            Some(party) => self.sample_round(party),
            None => self.model.prices().decision_round(),
        };
        OutcomeRecord {
            sim_id,
            winner: outcome.winner(),
            method: outcome.method(),
            round,
        }
    }

    fn sample_round(&mut self, party: Party) -> usize {
        let random = random_f64(&mut self.rand);
        let cumulative = &self.round_cumulatives[party.ordinal()];
        let round = search_sorted(cumulative, random) + 1;
        round.clamp(1, self.model.total_rounds())
    }
}

impl Debug for SamplingEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplingEngine")
            .field("model", &self.model)
            .field("seed", &self.seed)
            .field("enable_draw", &self.enable_draw)
            .field("cumulative", &self.cumulative)
            .finish_non_exhaustive()
    }
}

fn rand_from_seed(seed: i64) -> Wyrand {
    Wyrand::seed(seed as u64)
}

/// Uniform value in `[0, 1)` built from the top 53 bits of the generator's output.
#[inline]
pub fn random_f64(rand: &mut impl Rand) -> f64 {
    const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
    (rand.next_u64() >> 11) as f64 * SCALE
}
