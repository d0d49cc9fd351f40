//! Live draw and contest history command handlers

use std::io::Write;
use std::time::Duration;
use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use crate::export::write_csv;
use crate::lottery::display::{
    active_names, render_draw_state, render_elimination_list, render_poll_state,
    render_snapshot, render_winner_cards, spinner_frame,
};
use crate::lottery::{winner_cards, DrawState, LotteryPoller, SpinController, SpinOutcome};
use crate::services::ServiceFactory;
use crate::utils::errors::{RetailChampionsError, Result};
use super::{bulk_delete, delete_record, export_records, list_records, require_admin, ListArgs};

const SPINNER_FRAME_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Subcommand, Debug, Clone)]
pub enum LotteryCommand {
    /// Create a draw for a package
    Create {
        #[arg(long)]
        event: String,
        #[arg(long)]
        package: String,
    },
    /// Show the currently running draw
    Active,
    /// Print one status snapshot
    Status { id: String },
    /// Follow a draw's status until it completes
    Watch {
        id: String,
        /// Stop after this many updates
        #[arg(long)]
        updates: Option<usize>,
    },
    /// Operate the live draw interactively
    Run { id: String },
    /// Show the winners of a draw
    Winners {
        id: String,
        /// Also write them to a CSV file
        #[arg(long)]
        export: bool,
    },
    /// List finished draws
    History(ListArgs),
    /// Export the draw history to CSV
    Export,
    /// Delete one draw from the history
    Delete { id: String },
    /// Delete the whole draw history
    ClearHistory {
        /// Must be exactly DELETE
        #[arg(long)]
        confirm: Option<String>,
    },
}

pub async fn handle(services: &ServiceFactory, command: LotteryCommand) -> Result<()> {
    require_admin(services)?;
    let lottery = services.lottery_service.clone();

    match command {
        LotteryCommand::Create { event, package } => {
            let created = lottery.create(&event, &package).await?;
            println!("Created draw {} ({})", created.event_name, created.id);
            Ok(())
        }
        LotteryCommand::Active => {
            match lottery.active().await? {
                Some(active) => println!(
                    "{} ({}) status={} round={} remaining={}/{}",
                    active.event_name,
                    active.id,
                    active.status.to_string(),
                    active.current_round,
                    active.remaining_count,
                    active.total_participants
                ),
                None => println!("No draw is running."),
            }
            Ok(())
        }
        LotteryCommand::Status { id } => {
            let snapshot = lottery.status(&id).await?;
            println!("{}", render_snapshot(&snapshot));
            if !snapshot.eliminated_users.is_empty() {
                print!("{}", render_elimination_list(&snapshot.eliminated_users));
            }
            Ok(())
        }
        LotteryCommand::Watch { id, updates } => handle_watch(services, &id, updates).await,
        LotteryCommand::Run { id } => handle_run(services, &id).await,
        LotteryCommand::Winners { id, export } => {
            let winners = lottery.winners(&id).await?;
            if winners.is_empty() {
                println!("No winners yet.");
                return Ok(());
            }
            print!("{}", render_winner_cards(&winner_cards(&winners)));
            if export {
                let path = write_csv(&services.settings.export.output_dir, "winners", &winners).await?;
                println!("Exported {} winner(s) to {}", winners.len(), path.display());
            }
            Ok(())
        }
        LotteryCommand::History(args) => list_records(lottery, &args).await,
        LotteryCommand::Export => export_records(lottery, &services.settings.export.output_dir).await,
        LotteryCommand::Delete { id } => delete_record(lottery, &id).await,
        LotteryCommand::ClearHistory { confirm } => bulk_delete(lottery, confirm).await,
    }
}

/// Print each poll update until the draw completes
async fn handle_watch(services: &ServiceFactory, lottery_id: &str, updates: Option<usize>) -> Result<()> {
    let lottery_id = lottery_id.trim();
    if lottery_id.is_empty() {
        return Err(RetailChampionsError::InvalidInput("Lottery id is required".to_string()));
    }

    let mut poller = LotteryPoller::new(
        services.lottery_service.clone(),
        services.settings.lottery.poll_interval(),
    );
    let mut rx = poller.subscribe();
    poller.set_lottery(lottery_id);

    let mut printed = 0usize;
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if state.loading {
            continue;
        }
        println!("{}", render_poll_state(&state));
        printed += 1;

        let completed = state.snapshot.as_ref().map_or(false, |s| s.is_completed());
        if completed || updates.map_or(false, |limit| printed >= limit) {
            break;
        }
    }
    poller.stop();
    Ok(())
}

fn print_help() {
    println!("Commands: spin | status | reset | winners | export | help | quit");
}

/// Interactive operator console for one draw
async fn handle_run(services: &ServiceFactory, lottery_id: &str) -> Result<()> {
    let settings = &services.settings;
    let mut controller = SpinController::new(
        services.lottery_service.clone(),
        settings.lottery.spin_duration(),
    );
    let mut poller = LotteryPoller::new(services.lottery_service.clone(), settings.lottery.poll_interval());
    poller.set_lottery(lottery_id);

    let state = controller.load(lottery_id).await?;
    println!("{}", render_draw_state(&state));
    if let DrawState::Complete { winners, .. } = &state {
        print!("{}", render_winner_cards(&winner_cards(winners)));
    }
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => {}
            "spin" => {
                if !controller.can_spin() {
                    println!("{}", render_draw_state(&controller.state()));
                    continue;
                }
                match spin_with_animation(&mut controller).await {
                    Ok(outcome) => print_outcome(&outcome),
                    Err(error) => println!("Spin failed: {}", error.user_message()),
                }
                println!("{}", render_draw_state(&controller.state()));
            }
            "status" => println!("{}", render_poll_state(&poller.state())),
            "reset" => match controller.reset() {
                Ok(()) => println!("{}", render_draw_state(&controller.state())),
                Err(error) => println!("{}", error.user_message()),
            },
            "winners" => match controller.state() {
                DrawState::Complete { winners, .. } => {
                    print!("{}", render_winner_cards(&winner_cards(&winners)))
                }
                _ => println!("No winners yet."),
            },
            "export" => match controller.state() {
                DrawState::Complete { winners, .. } => {
                    let path = write_csv(&settings.export.output_dir, "winners", &winners).await?;
                    println!("Exported {} winner(s) to {}", winners.len(), path.display());
                }
                _ => println!("Nothing to export until the draw is complete."),
            },
            "help" => print_help(),
            "quit" | "exit" => break,
            other => {
                debug!(input = other, "Unknown console command");
                print_help();
            }
        }
    }

    poller.stop();
    info!(lottery_id = lottery_id, "Draw console closed");
    Ok(())
}

/// Run a spin while cycling participant names on one terminal line
async fn spin_with_animation(controller: &mut SpinController) -> Result<SpinOutcome> {
    let names = active_names(controller.participants());
    let spin = controller.spin();
    tokio::pin!(spin);

    let mut ticker = tokio::time::interval(SPINNER_FRAME_INTERVAL);
    let mut tick = 0usize;
    let result = loop {
        tokio::select! {
            result = &mut spin => break result,
            _ = ticker.tick() => {
                print!("\r{:<72}", spinner_frame(&names, tick));
                let _ = std::io::stdout().flush();
                tick += 1;
            }
        }
    };
    println!();
    result
}

fn print_outcome(outcome: &SpinOutcome) {
    if !outcome.eliminated.is_empty() {
        let names: Vec<&str> = outcome.eliminated.iter().map(|p| p.name.as_str()).collect();
        println!("Round {}: eliminated {}", outcome.round, names.join(", "));
    }
    if outcome.is_complete() {
        print!("{}", render_winner_cards(&winner_cards(&outcome.winners)));
    } else {
        println!("{} participant(s) remaining", outcome.remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::config::Settings;
    use crate::storage::LocalStorage;

    #[tokio::test]
    async fn test_watch_rejects_blank_id() {
        let services = ServiceFactory::new(Settings::default(), LocalStorage::in_memory()).unwrap();
        for id in ["", "   "] {
            assert_matches!(
                handle_watch(&services, id, None).await,
                Err(RetailChampionsError::InvalidInput(_))
            );
        }
    }
}
