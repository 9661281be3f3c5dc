use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};
use strum::IntoEnumIterator;

use crate::mc::OutcomeRecord;
use crate::metrics::{HistorySnapshot, OutcomeDistribution, RoundHistogram, Summary};
use crate::model::{Outcome, OutcomeModel, Party};
use crate::odds::{Market, OverroundMethod};

/// Fair probability of each outcome against its simulated frequency.
pub fn tabulate_outcomes(
    fair_probs: &[(Outcome, f64)],
    summary: &Summary,
    distribution: &OutcomeDistribution,
) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Outcome".into(), "Fair %".into(), "Simulated %".into(), "Count".into()],
        ));
    for (outcome, prob) in fair_probs {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                outcome.to_string().into(),
                format!("{:.2}", prob * 100.0).into(),
                format!("{:.2}", summary.outcome_pct(*outcome)).into(),
                format!("{}", distribution.count(*outcome)).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Total".into(),
            "".into(),
            "".into(),
            format!("{}", distribution.total()).into(),
        ],
    ));
    table
}

pub fn tabulate_summary(summary: &Summary) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default(),
            vec!["Simulations".into(), format!("{}", summary.total_sims).into()],
        ));
    for party in Party::iter() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{party} win %").into(),
                format!("{:.2}", summary.win_pct(party)).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default(),
        vec!["draw %".into(), format!("{:.2}", summary.draw_pct).into()],
    ));
    table
}

pub fn tabulate_round_histogram(histogram: &RoundHistogram) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Centred)),
            Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(10))
                    .with(HAlign::Right),
            ),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Round".into(),
                Party::A.to_string().into(),
                Party::B.to_string().into(),
            ],
        ));
    for (index, (party_a, party_b)) in histogram
        .for_party(Party::A)
        .iter()
        .zip(histogram.for_party(Party::B))
        .enumerate()
    {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                format!("{party_a}").into(),
                format!("{party_b}").into(),
            ],
        ));
    }
    table
}

pub fn tabulate_history(history: &[HistorySnapshot]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Tick".into(),
                "Sims".into(),
                format!("{} win %", Party::A).into(),
                format!("{} finish %", Party::A).into(),
            ],
        ));
    for snapshot in history {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", snapshot.tick).into(),
                format!("{}", snapshot.total_sims).into(),
                format!("{:.2}", snapshot.party_a_win_pct).into(),
                format!("{:.2}", snapshot.party_a_finish_pct).into(),
            ],
        ));
    }
    table
}

/// Quoted prices alongside the fair probabilities recovered from them.
pub fn tabulate_market(labels: &[String], market: &Market) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["".into(), "Price".into(), "Fair prob".into(), "Fair price".into()],
        ));
    for (index, label) in labels.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                label.clone().into(),
                format!("{:+}", market.prices[index]).into(),
                format!("{:.6}", market.probs[index]).into(),
                format!("{:.3}", market.fair_price(index)).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Overround".into(),
            "".into(),
            format!("{:.6}", market.overround.value).into(),
            "".into(),
        ],
    ));
    table.push_row(Row::new(
        Styles::default(),
        vec![
            "Margin %".into(),
            "".into(),
            format!("{:.2}", market.overround.margin() * 100.0).into(),
            "".into(),
        ],
    ));
    table
}

/// The modelling assumptions: the normalised finishing-round weights of each party, the length of
/// the contest and how the margin is removed from the quoted prices.
pub fn tabulate_round_weights(model: &OutcomeModel, method: &OverroundMethod) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Centred)),
            Col::new(
                Styles::default()
                    .with(Separator(true))
                    .with(MinWidth(10))
                    .with(HAlign::Right),
            ),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Round".into(),
                Party::A.to_string().into(),
                Party::B.to_string().into(),
            ],
        ));
    for (index, (party_a, party_b)) in model
        .round_weights_for(Party::A)
        .iter()
        .zip(model.round_weights_for(Party::B))
        .enumerate()
    {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                format!("{party_a:.4}").into(),
                format!("{party_b:.4}").into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Separator(true)),
        vec![
            "Total rounds".into(),
            format!("{}", model.total_rounds()).into(),
            "".into(),
        ],
    ));
    table.push_row(Row::new(
        Styles::default(),
        vec!["Margin removal".into(), method.to_string().into(), "".into()],
    ));
    table
}

/// One row per record, in the order given.
pub fn tabulate_records(records: &[OutcomeRecord]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Sim".into(), "Winner".into(), "Method".into(), "Round".into()],
        ));
    for record in records {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", record.sim_id).into(),
                record.winner.to_string().into(),
                record.method.to_string().into(),
                format!("{}", record.round).into(),
            ],
        ));
    }
    table
}
