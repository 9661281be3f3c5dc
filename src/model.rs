//! The contest model: prices quoted for each top-level outcome, the conditional distribution of
//! the finishing round for each party, and the fair probabilities derived from them.

use ordinalizer::Ordinal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter};

use crate::model::error::{DomainError, ValidationError};
use crate::odds::{implied_probability, normalize, Market};
use crate::probs::SliceExt;

pub mod error;


pub const DEFAULT_ROUNDS: usize = 8;

/// Default finishing-round weights for party A (the favourite), front-loaded.
pub const PARTY_A_FINISH_ROUNDS: [f64; DEFAULT_ROUNDS] = [0.22, 0.20, 0.16, 0.12, 0.10, 0.08, 0.07, 0.05];

/// Default finishing-round weights for party B (the underdog), back-loaded.
pub const PARTY_B_FINISH_ROUNDS: [f64; DEFAULT_ROUNDS] = [0.06, 0.07, 0.10, 0.12, 0.16, 0.18, 0.17, 0.14];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize)]
pub enum Party {
    #[strum(to_string = "party A")]
    A,
    #[strum(to_string = "party B")]
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize)]
pub enum Winner {
    PartyA,
    PartyB,
    Draw,
}
impl From<Party> for Winner {
    fn from(party: Party) -> Self {
        match party {
            Party::A => Winner::PartyA,
            Party::B => Winner::PartyB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize)]
pub enum Method {
    Finish,
    Decision,
}

/// Mutually exclusive top-level outcomes of the contest. Declaration order is the canonical
/// order in which cumulative tables are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize)]
pub enum Outcome {
    #[strum(to_string = "party A finish")]
    PartyAFinish,
    #[strum(to_string = "party A decision")]
    PartyADecision,
    #[strum(to_string = "party B finish")]
    PartyBFinish,
    #[strum(to_string = "party B decision")]
    PartyBDecision,
    #[strum(to_string = "draw")]
    Draw,
}
impl Outcome {
    /// Outcomes in canonical order, optionally excluding the draw.
    pub fn canonical(enable_draw: bool) -> impl Iterator<Item = Outcome> {
        Outcome::iter().filter(move |outcome| enable_draw || *outcome != Outcome::Draw)
    }

    pub fn winner(&self) -> Winner {
        match self {
            Outcome::PartyAFinish | Outcome::PartyADecision => Winner::PartyA,
            Outcome::PartyBFinish | Outcome::PartyBDecision => Winner::PartyB,
            Outcome::Draw => Winner::Draw,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Outcome::PartyAFinish | Outcome::PartyBFinish => Method::Finish,
            _ => Method::Decision,
        }
    }

    /// The party that ends the contest early, if this is a finish.
    pub fn finisher(&self) -> Option<Party> {
        match self {
            Outcome::PartyAFinish => Some(Party::A),
            Outcome::PartyBFinish => Some(Party::B),
            _ => None,
        }
    }

    pub fn classify(winner: Winner, method: Method) -> Self {
        match (winner, method) {
            (Winner::PartyA, Method::Finish) => Outcome::PartyAFinish,
            (Winner::PartyA, Method::Decision) => Outcome::PartyADecision,
            (Winner::PartyB, Method::Finish) => Outcome::PartyBFinish,
            (Winner::PartyB, Method::Decision) => Outcome::PartyBDecision,
            (Winner::Draw, _) => Outcome::Draw,
        }
    }
}

/// American prices quoted for the contest. The moneylines are informational; only the method
/// prices (and the draw, when enabled) drive sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSet {
    pub party_a_moneyline: i64,
    pub party_b_moneyline: i64,
    pub party_a_finish: i64,
    pub party_a_decision: i64,
    pub party_b_finish: i64,
    pub party_b_decision: i64,
    pub draw: i64,
    pub total_rounds: usize,
}
impl PriceSet {
    pub fn price(&self, outcome: Outcome) -> i64 {
        match outcome {
            Outcome::PartyAFinish => self.party_a_finish,
            Outcome::PartyADecision => self.party_a_decision,
            Outcome::PartyBFinish => self.party_b_finish,
            Outcome::PartyBDecision => self.party_b_decision,
            Outcome::Draw => self.draw,
        }
    }

    /// The round recorded for any contest that goes the distance.
    pub fn decision_round(&self) -> usize {
        self.total_rounds + 1
    }
}

impl Default for PriceSet {
    fn default() -> Self {
        Self {
            party_a_moneyline: -1200,
            party_b_moneyline: 800,
            party_a_finish: -390,
            party_a_decision: 450,
            party_b_finish: 1200,
            party_b_decision: 1300,
            draw: 2500,
            total_rounds: DEFAULT_ROUNDS,
        }
    }
}

/// Relative likelihood of each round being the finishing round, given that the party wins by
/// finish. One weight per scheduled round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundWeights {
    pub party_a: Vec<f64>,
    pub party_b: Vec<f64>,
}
impl RoundWeights {
    pub fn uniform(total_rounds: usize) -> Self {
        let weights = vec![1.0 / total_rounds as f64; total_rounds];
        Self {
            party_a: weights.clone(),
            party_b: weights,
        }
    }

    /// The default weights for a contest of `total_rounds`: the front/back-loaded reference
    /// vectors for an eight-round contest, uniform otherwise.
    pub fn for_rounds(total_rounds: usize) -> Self {
        if total_rounds == DEFAULT_ROUNDS {
            Self {
                party_a: PARTY_A_FINISH_ROUNDS.to_vec(),
                party_b: PARTY_B_FINISH_ROUNDS.to_vec(),
            }
        } else {
            Self::uniform(total_rounds)
        }
    }

    pub fn for_party(&self, party: Party) -> &[f64] {
        match party {
            Party::A => &self.party_a,
            Party::B => &self.party_b,
        }
    }

    fn for_party_mut(&mut self, party: Party) -> &mut Vec<f64> {
        match party {
            Party::A => &mut self.party_a,
            Party::B => &mut self.party_b,
        }
    }

    /// Checks every vector against `total_rounds` and rescales each to unit sum.
    pub fn normalise(&mut self, total_rounds: usize) -> Result<(), ValidationError> {
        if total_rounds == 0 {
            return Err(ValidationError::NoRounds);
        }
        for party in Party::iter() {
            let weights = self.for_party_mut(party);
            if weights.len() != total_rounds {
                return Err(ValidationError::WrongLength {
                    party,
                    expected: total_rounds,
                    actual: weights.len(),
                });
            }
            if !weights.all_finite() {
                return Err(ValidationError::NonFiniteWeight { party });
            }
            if !weights.all_non_negative() {
                return Err(ValidationError::NegativeWeight { party });
            }
            let sum = weights.sum();
            if !sum.is_finite() {
                return Err(ValidationError::NonFiniteWeight { party });
            }
            if sum > 0.0 {
                weights.normalise(1.0);
            }
        }
        for party in Party::iter() {
            if self.for_party(party).sum() == 0.0 {
                return Err(ValidationError::ZeroWeights { party });
            }
        }
        Ok(())
    }
}

impl Default for RoundWeights {
    fn default() -> Self {
        Self::for_rounds(DEFAULT_ROUNDS)
    }
}

/// Everything needed to construct a sampling engine. Fields left out of a JSON config take their
/// defaults; absent round weights are sized to `prices.total_rounds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct SimulationConfig {
    pub prices: PriceSet,
    pub round_weights: RoundWeights,
    pub seed: i64,
    pub enable_draw: bool,
}

fn default_seed() -> i64 {
    42
}

/// The on-disk form of [`SimulationConfig`], before defaults that depend on other fields are
/// filled in.
#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    prices: PriceSet,
    #[serde(default)]
    round_weights: Option<RoundWeights>,
    #[serde(default = "default_seed")]
    seed: i64,
    #[serde(default)]
    enable_draw: bool,
}

impl From<ConfigFile> for SimulationConfig {
    fn from(file: ConfigFile) -> Self {
        let round_weights = file
            .round_weights
            .unwrap_or_else(|| RoundWeights::for_rounds(file.prices.total_rounds));
        Self {
            prices: file.prices,
            round_weights,
            seed: file.seed,
            enable_draw: file.enable_draw,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            prices: PriceSet::default(),
            round_weights: RoundWeights::default(),
            seed: default_seed(),
            enable_draw: false,
        }
    }
}

/// Validated prices and round weights.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeModel {
    prices: PriceSet,
    round_weights: RoundWeights,
}
impl OutcomeModel {
    pub fn new(prices: PriceSet, mut round_weights: RoundWeights) -> Result<Self, ValidationError> {
        round_weights.normalise(prices.total_rounds)?;
        Ok(Self {
            prices,
            round_weights,
        })
    }

    pub fn prices(&self) -> &PriceSet {
        &self.prices
    }

    pub fn total_rounds(&self) -> usize {
        self.prices.total_rounds
    }

    /// Fair probability of each top-level outcome, in canonical order. The margin is removed by
    /// dividing each implied probability by the booksum.
    pub fn top_level_probabilities(&self, enable_draw: bool) -> Result<Vec<(Outcome, f64)>, DomainError> {
        let implied: FxHashMap<_, _> = Outcome::canonical(enable_draw)
            .map(|outcome| (outcome, implied_probability(self.prices.price(outcome))))
            .collect();
        let fair = normalize(&implied)?;
        Ok(Outcome::canonical(enable_draw)
            .map(|outcome| (outcome, fair[&outcome]))
            .collect())
    }

    pub fn round_weights_for(&self, party: Party) -> &[f64] {
        self.round_weights.for_party(party)
    }

    /// The method-of-victory book, in canonical order, with its overround.
    pub fn method_market(&self, enable_draw: bool) -> Result<Market, DomainError> {
        Market::fit(
            Outcome::canonical(enable_draw)
                .map(|outcome| self.prices.price(outcome))
                .collect(),
        )
    }

    /// The two-way match-winner book (party A, party B).
    pub fn moneyline_market(&self) -> Result<Market, DomainError> {
        Market::fit(vec![self.prices.party_a_moneyline, self.prices.party_b_moneyline])
    }
}
