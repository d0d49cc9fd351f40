//! Live draw rendering
//!
//! Pure functions from snapshots and draw state to terminal text.

use std::collections::BTreeMap;
use crate::models::{Participant, ParticipantStatus, StatusSnapshot};
use crate::utils::helpers::truncate_text;
use super::controller::DrawState;
use super::poller::PollState;

/// One winner announcement card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerCard {
    pub name: String,
    pub image_url: Option<String>,
}

pub fn winner_cards(winners: &[Participant]) -> Vec<WinnerCard> {
    winners
        .iter()
        .map(|w| WinnerCard {
            name: w.name.clone(),
            image_url: w.selfie.clone(),
        })
        .collect()
}

pub fn render_winner_cards(cards: &[WinnerCard]) -> String {
    let mut out = String::new();
    for (index, card) in cards.iter().enumerate() {
        let title = format!("WINNER #{}", index + 1);
        let name = truncate_text(&card.name, 32);
        let image = card.image_url.as_deref().unwrap_or("(no photo)");
        let width = title.len().max(name.chars().count()).max(image.chars().count()) + 4;
        let border = format!("+{}+", "-".repeat(width - 2));
        out.push_str(&border);
        out.push('\n');
        for line in [title.as_str(), name.as_str(), image] {
            out.push_str(&format!("| {:<w$} |\n", line, w = width - 4));
        }
        out.push_str(&border);
        out.push('\n');
    }
    out
}

/// One frame of the spinner: a window of names centered on the highlighted one
pub fn spinner_frame(names: &[String], tick: usize) -> String {
    if names.is_empty() {
        return "[ spinning... ]".to_string();
    }
    let len = names.len();
    let current = tick % len;
    let previous = (current + len - 1) % len;
    let next = (current + 1) % len;
    if len == 1 {
        return format!(">> {} <<", names[current]);
    }
    format!(
        "  {}  >> {} <<  {}",
        truncate_text(&names[previous], 16),
        truncate_text(&names[current], 20),
        truncate_text(&names[next], 16)
    )
}

/// Names still in the draw, for the spinner wheel
pub fn active_names(participants: &[Participant]) -> Vec<String> {
    participants
        .iter()
        .filter(|p| p.status == ParticipantStatus::Active)
        .map(|p| p.name.clone())
        .collect()
}

/// Eliminated participants grouped by round
pub fn render_elimination_list(eliminated: &[Participant]) -> String {
    let mut by_round: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for participant in eliminated {
        by_round
            .entry(participant.eliminated_round.unwrap_or(0))
            .or_default()
            .push(participant.name.as_str());
    }

    let mut out = String::new();
    for (round, names) in by_round {
        let label = if round == 0 {
            "Eliminated".to_string()
        } else {
            format!("Round {}", round)
        };
        out.push_str(&format!("{} ({}): {}\n", label, names.len(), names.join(", ")));
    }
    out
}

pub fn render_snapshot(snapshot: &StatusSnapshot) -> String {
    format!(
        "Status: {} | Round: {} | Remaining: {}/{} | Winners: {}",
        snapshot.status.to_string(),
        snapshot.current_round,
        snapshot.remaining_count,
        snapshot.total_participants,
        snapshot.user_status.winner
    )
}

/// Status line for the poller view; a failed poll keeps the last snapshot
pub fn render_poll_state(state: &PollState) -> String {
    let mut line = match &state.snapshot {
        Some(snapshot) => render_snapshot(snapshot),
        None if state.loading => "Loading...".to_string(),
        None => "No data yet".to_string(),
    };
    if let Some(error) = &state.error {
        line.push_str(&format!("  [error: {}]", error));
    }
    line
}

pub fn render_draw_state(state: &DrawState) -> String {
    match state {
        DrawState::Idle => "No lottery selected".to_string(),
        DrawState::Ready { round, remaining, .. } => {
            format!("Ready for round {} ({} remaining). Type `spin` to execute.", round + 1, remaining)
        }
        DrawState::Spinning { round, .. } => format!("Spinning round {}...", round + 1),
        DrawState::Complete { winners, .. } => {
            format!("Draw complete with {} winner(s)", winners.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(name: &str, status: ParticipantStatus, round: Option<u32>) -> Participant {
        Participant {
            id: name.to_lowercase(),
            name: name.to_string(),
            selfie: Some(format!("https://cdn.example/{}.jpg", name.to_lowercase())),
            status,
            eliminated_round: round,
        }
    }

    #[test]
    fn test_winner_cards_match_winners() {
        let winners = vec![
            participant("Asha", ParticipantStatus::Winner, None),
            participant("Vikram", ParticipantStatus::Winner, None),
        ];
        let cards = winner_cards(&winners);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].name, "Vikram");
        assert_eq!(cards[1].image_url.as_deref(), Some("https://cdn.example/vikram.jpg"));

        let rendered = render_winner_cards(&cards);
        assert!(rendered.contains("WINNER #1"));
        assert!(rendered.contains("https://cdn.example/asha.jpg"));
    }

    #[test]
    fn test_elimination_list_groups_rounds() {
        let eliminated = vec![
            participant("A", ParticipantStatus::Eliminated, Some(2)),
            participant("B", ParticipantStatus::Eliminated, Some(1)),
            participant("C", ParticipantStatus::Eliminated, Some(1)),
        ];
        assert_eq!(
            render_elimination_list(&eliminated),
            "Round 1 (2): B, C\nRound 2 (1): A\n"
        );
    }

    #[test]
    fn test_spinner_frame_wraps() {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(spinner_frame(&names, 3), "  C  >> A <<  B");
        assert_eq!(spinner_frame(&[], 0), "[ spinning... ]");
    }

    #[test]
    fn test_poll_state_keeps_stale_snapshot_with_error() {
        let snapshot: StatusSnapshot =
            serde_json::from_str(r#"{"status": "active", "currentRound": 1, "totalParticipants": 8, "remainingCount": 4}"#)
                .unwrap();
        let state = PollState {
            snapshot: Some(snapshot),
            error: Some("Could not reach the server. Please try again.".to_string()),
            ..PollState::default()
        };
        let line = render_poll_state(&state);
        assert!(line.starts_with("Status: active | Round: 1"));
        assert!(line.contains("[error:"));
    }
}
