//! Interactive menu shown when no subcommand is given.

use dialoguer::Select;
use outbreak_stats::StateStatsSource;

use crate::report;

/// Top-level actions offered by the menu.
enum Action {
    ListStates,
    ShowStats,
    Forecast,
    Server,
}

impl Action {
    const ALL: &[Self] = &[
        Self::ListStates,
        Self::ShowStats,
        Self::Forecast,
        Self::Server,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ListStates => "List states",
            Self::ShowStats => "Show state statistics",
            Self::Forecast => "Forecast a state",
            Self::Server => "Start server",
        }
    }
}

/// Prompts for an action and runs it against `source`.
///
/// # Errors
///
/// Returns an error if a prompt fails, the statistics table cannot be read,
/// a forecast fails, or the server cannot start.
pub async fn run(source: StateStatsSource) -> Result<(), Box<dyn std::error::Error>> {
    println!("Outbreak Toolchain");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::ListStates => {
            for state in outbreak_forecast::list_known_states(&source)? {
                println!("{state}");
            }
        }
        Action::ShowStats => {
            let aggregates = outbreak_stats::get_state_aggregates(&source)?;
            print!("{}", report::stats_table(&aggregates));
        }
        Action::Forecast => {
            let states = outbreak_forecast::list_known_states(&source)?;
            if states.is_empty() {
                println!("The statistics table has no states.");
                return Ok(());
            }

            let idx = Select::new()
                .with_prompt("State")
                .items(&states)
                .default(0)
                .interact()?;

            let result = outbreak_forecast::forecast_for_state(&source, &states[idx])?;
            print!("{}", report::forecast_table(&result));
        }
        Action::Server => {
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(outbreak_server::interactive::run())
            })
            .await??;
        }
    }

    Ok(())
}
