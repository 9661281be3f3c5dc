//! Aggregation of simulated outcomes into summary statistics.

use ordinalizer::Ordinal;
use strum::{EnumCount, IntoEnumIterator};

use crate::mc::OutcomeRecord;
use crate::model::{Method, Outcome, Party, Winner};


/// Percentages of all simulated contests, each in `[0, 100]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total_sims: usize,
    pub party_a_win_pct: f64,
    pub party_b_win_pct: f64,
    pub draw_pct: f64,
    pub party_a_finish_pct: f64,
    pub party_a_decision_pct: f64,
    pub party_b_finish_pct: f64,
    pub party_b_decision_pct: f64,
}
impl Summary {
    pub fn win_pct(&self, party: Party) -> f64 {
        match party {
            Party::A => self.party_a_win_pct,
            Party::B => self.party_b_win_pct,
        }
    }

    pub fn outcome_pct(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::PartyAFinish => self.party_a_finish_pct,
            Outcome::PartyADecision => self.party_a_decision_pct,
            Outcome::PartyBFinish => self.party_b_finish_pct,
            Outcome::PartyBDecision => self.party_b_decision_pct,
            Outcome::Draw => self.draw_pct,
        }
    }
}

/// Number of records for each top-level outcome, indexed by [`Outcome`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeDistribution {
    counts: [usize; Outcome::COUNT],
}
impl OutcomeDistribution {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts[outcome.ordinal()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Outcome, usize)> + '_ {
        Outcome::iter().map(|outcome| (outcome, self.count(outcome)))
    }
}

/// Count of finishes in each round, per party. Index 0 is round 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundHistogram {
    pub party_a: Vec<usize>,
    pub party_b: Vec<usize>,
}
impl RoundHistogram {
    fn empty(total_rounds: usize) -> Self {
        Self {
            party_a: vec![0; total_rounds],
            party_b: vec![0; total_rounds],
        }
    }

    pub fn for_party(&self, party: Party) -> &[usize] {
        match party {
            Party::A => &self.party_a,
            Party::B => &self.party_b,
        }
    }
}

/// Running statistics captured at a given tick, for inspecting convergence.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub tick: u64,
    pub total_sims: usize,
    pub party_a_win_pct: f64,
    pub party_a_finish_pct: f64,
}

#[derive(Debug, Clone)]
pub struct ResultAggregator {
    total_rounds: usize,
    records: Vec<OutcomeRecord>,
    history: Vec<HistorySnapshot>,
}
impl ResultAggregator {
    pub fn new(total_rounds: usize) -> Self {
        Self {
            total_rounds,
            records: vec![],
            history: vec![],
        }
    }

    /// A fresh aggregator holding copies of `records`. History is not carried.
    pub fn replay(total_rounds: usize, records: &[OutcomeRecord]) -> Self {
        let mut aggregator = Self::new(total_rounds);
        aggregator.add_results(records.iter().copied());
        aggregator
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    pub fn history(&self) -> &[HistorySnapshot] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add_results(&mut self, records: impl IntoIterator<Item = OutcomeRecord>) {
        self.records.extend(records);
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.history.clear();
    }

    pub(crate) fn set_history(&mut self, history: Vec<HistorySnapshot>) {
        self.history = history;
    }

    pub fn summary(&self) -> Summary {
        let total = self.records.len();
        if total == 0 {
            return Summary::default();
        }
        let distribution = self.outcome_distribution();
        let pct = |count: usize| count as f64 / total as f64 * 100.0;
        let party_a_finish = distribution.count(Outcome::PartyAFinish);
        let party_a_decision = distribution.count(Outcome::PartyADecision);
        let party_b_finish = distribution.count(Outcome::PartyBFinish);
        let party_b_decision = distribution.count(Outcome::PartyBDecision);
        Summary {
            total_sims: total,
            party_a_win_pct: pct(party_a_finish + party_a_decision),
            party_b_win_pct: pct(party_b_finish + party_b_decision),
            draw_pct: pct(distribution.count(Outcome::Draw)),
            party_a_finish_pct: pct(party_a_finish),
            party_a_decision_pct: pct(party_a_decision),
            party_b_finish_pct: pct(party_b_finish),
            party_b_decision_pct: pct(party_b_decision),
        }
    }

    pub fn outcome_distribution(&self) -> OutcomeDistribution {
        let mut distribution = OutcomeDistribution::default();
        for record in &self.records {
            distribution.counts[record.outcome().ordinal()] += 1;
        }
        distribution
    }

    pub fn ko_round_histogram(&self) -> RoundHistogram {
        let mut histogram = RoundHistogram::empty(self.total_rounds);
        let finishes = self
            .records
            .iter()
            .filter(|record| record.method == Method::Finish);
        for record in finishes {
            if !(1..=self.total_rounds).contains(&record.round) {
                continue;
            }
            let counts = match record.winner {
                Winner::PartyA => &mut histogram.party_a,
                Winner::PartyB => &mut histogram.party_b,
                Winner::Draw => continue,
            };
            counts[record.round - 1] += 1;
        }
        histogram
    }

    pub fn record_history(&mut self, tick: u64) {
        let summary = self.summary();
        self.history.push(HistorySnapshot {
            tick,
            total_sims: summary.total_sims,
            party_a_win_pct: summary.party_a_win_pct,
            party_a_finish_pct: summary.party_a_finish_pct,
        });
    }
}
