//! Report rendering for comparisons

use serde::{Deserialize, Serialize};

use crate::compare::Comparison;
use crate::stats::SimulationStats;

/// Rendered view of a fair vs tweaked comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub title: String,
    pub comparison: Comparison,
}

impl ComparisonReport {
    pub fn new(title: impl Into<String>, comparison: Comparison) -> Self {
        Self {
            title: title.into(),
            comparison,
        }
    }

    /// Which side leaves the house better off
    pub fn verdict(&self) -> &'static str {
        let gap = self.comparison.edge_gap();
        if gap > 0.0 {
            "Tweaked wheel favours the house"
        } else if gap < 0.0 {
            "Fair wheel favours the house"
        } else {
            "No difference in house edge"
        }
    }

    /// Generate text report
    pub fn to_text(&self) -> String {
        let c = &self.comparison;
        let mut output = String::new();

        output.push_str(&format!("{}\n", self.title));
        output.push_str(&format!("{}\n\n", "=".repeat(self.title.len())));

        output.push_str(&format!(
            "Runs: {}  Seed: {}  Bet: {} on slot {} (prize {})\n\n",
            c.fair.rounds,
            c.simulation.seed,
            c.simulation.stake,
            c.simulation.bet_slot,
            c.prizes.get(c.simulation.bet_slot).copied().unwrap_or(0)
        ));

        let (fair_p, tweaked_p) = c.expected_win_rates();
        output.push_str(&format!("{:<26}{:>16}{:>16}\n", "Metric", "Fair", "Tweaked"));
        output.push_str(&"-".repeat(58));
        output.push('\n');
        for (label, fair, tweaked) in metric_rows(&c.fair, &c.tweaked) {
            output.push_str(&format!("{label:<26}{fair:>16}{tweaked:>16}\n"));
        }
        output.push_str(&format!(
            "{:<26}{:>16}{:>16}\n",
            "Expected Win Rate:",
            percent(fair_p),
            percent(tweaked_p)
        ));
        output.push('\n');

        output.push_str("Profit distribution:\n");
        for (name, stats) in [("Fair", &c.fair), ("Tweaked", &c.tweaked)] {
            let [(loss, losses), (win, wins)] = stats.profit_distribution.buckets();
            output.push_str(&format!("  {name:<8} {loss}: {losses}  {win}: {wins}\n"));
        }
        output.push('\n');
        output.push_str(&format!("{}\n", self.verdict()));

        output
    }

    /// Generate markdown report
    pub fn to_markdown(&self) -> String {
        let c = &self.comparison;
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.title));
        output.push_str(&format!(
            "**Runs:** {} · **Seed:** {} · **Bet:** {} on slot {}\n\n",
            c.fair.rounds, c.simulation.seed, c.simulation.stake, c.simulation.bet_slot
        ));

        output.push_str("## Results\n\n");
        output.push_str("| Metric | Fair Game | Tweaked Game |\n");
        output.push_str("|--------|-----------|--------------|\n");
        for (label, fair, tweaked) in metric_rows(&c.fair, &c.tweaked) {
            output.push_str(&format!("| {} | {} | {} |\n", label.trim_end_matches(':'), fair, tweaked));
        }
        output.push('\n');

        output.push_str("## Profit Distribution\n\n");
        output.push_str("| Outcome | Fair Game | Tweaked Game |\n");
        output.push_str("|---------|-----------|--------------|\n");
        let fair = c.fair.profit_distribution.buckets();
        let tweaked = c.tweaked.profit_distribution.buckets();
        for ((outcome, fair_count), (_, tweaked_count)) in fair.iter().zip(tweaked.iter()) {
            output.push_str(&format!("| {outcome} | {fair_count} | {tweaked_count} |\n"));
        }
        output.push('\n');

        output.push_str("## Weights\n\n");
        output.push_str("| Slot | Prize | Fair | Tweaked |\n");
        output.push_str("|------|-------|------|---------|\n");
        for (slot, prize) in c.prizes.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.4} | {:.4} |\n",
                slot,
                prize,
                c.fair_weights.get(slot).copied().unwrap_or(0.0),
                c.tweaked_weights.get(slot).copied().unwrap_or(0.0)
            ));
        }
        output.push('\n');
        output.push_str(&format!("**{}**\n", self.verdict()));

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".into())
    }
}

fn metric_rows(fair: &SimulationStats, tweaked: &SimulationStats) -> Vec<(&'static str, String, String)> {
    vec![
        ("Win Rate:", percent(fair.win_rate), percent(tweaked.win_rate)),
        (
            "Total Profit:",
            money(fair.total_profit as f64),
            money(tweaked.total_profit as f64),
        ),
        (
            "Avg. Profit per Round:",
            money(fair.average_profit),
            money(tweaked.average_profit),
        ),
        (
            "House Edge:",
            format!("{:.2}%", fair.house_edge_percent),
            format!("{:.2}%", tweaked.house_edge_percent),
        ),
        (
            "Max Drawdown:",
            money(fair.max_drawdown as f64),
            money(tweaked.max_drawdown as f64),
        ),
        (
            "Final Bank:",
            money(fair.final_bank as f64),
            money(tweaked.final_bank as f64),
        ),
    ]
}

fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${amount:.2}")
    }
}
