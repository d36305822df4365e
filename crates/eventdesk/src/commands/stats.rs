//! Dashboard statistics command.

use tabled::Tabled;

use eventdesk_core::{DASHBOARD_FALLBACK, DashboardStats, Session, StatCard};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: u64,
}

impl From<StatCard> for StatRow {
    fn from(c: StatCard) -> Self {
        Self {
            label: c.label,
            value: c.value,
        }
    }
}

fn detail(stats: &DashboardStats) -> String {
    let rows: Vec<StatRow> = stats.stat_cards().into_iter().map(StatRow::from).collect();
    output::render_table(&rows)
}

fn plain(stats: &DashboardStats) -> String {
    stats
        .stat_cards()
        .iter()
        .map(|c| format!("{}\t{}", c.label, c.value))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, global: &GlobalOpts, profile: &str) -> Result<(), CliError> {
    let pb = output::spinner(global, "Loading dashboard statistics");
    let result = session.fetch_dashboard(session.token()).await;
    pb.finish_and_clear();

    let stats = result.map_err(|e| super::request_failed(e, DASHBOARD_FALLBACK, profile))?;
    let out = output::render_single(global.output(), &stats, detail, plain)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lists_every_card() {
        let stats = DashboardStats {
            total_events: 4,
            registered_users: 9,
            ..DashboardStats::default()
        };
        let text = plain(&stats);
        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("Total Events\t4"));
        assert!(text.ends_with("Registered Users\t9"));
    }
}
