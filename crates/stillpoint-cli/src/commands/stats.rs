use clap::Subcommand;
use stillpoint_core::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Aggregate totals over the session log
    Summary,
    /// List completed sessions, most recent first
    Sessions,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Summary => {
            let stats = db.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Sessions => {
            let sessions = db.sessions()?;
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }

    Ok(())
}
