//! Lottery (contest draw) model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotteryStatus {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Active,
    Eliminated,
    Winner,
}

impl ToString for LotteryStatus {
    fn to_string(&self) -> String {
        match self {
            LotteryStatus::Pending => "pending".to_string(),
            LotteryStatus::Active => "active".to_string(),
            LotteryStatus::Completed => "completed".to_string(),
        }
    }
}

impl ToString for ParticipantStatus {
    fn to_string(&self) -> String {
        match self {
            ParticipantStatus::Active => "active".to_string(),
            ParticipantStatus::Eliminated => "eliminated".to_string(),
            ParticipantStatus::Winner => "winner".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "selfieUrl", alias = "image")]
    pub selfie: Option<String>,
    pub status: ParticipantStatus,
    #[serde(default, alias = "eliminatedInRound")]
    pub eliminated_round: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lottery {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub event_name: String,
    #[serde(default)]
    pub package: Option<String>,
    pub status: LotteryStatus,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub total_participants: u32,
    #[serde(default, alias = "remainingParticipants")]
    pub remaining_count: u32,
    #[serde(default)]
    pub eliminated_users: Vec<Participant>,
    #[serde(default)]
    pub winner: Option<Participant>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Participants eliminated in the most recent round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    #[serde(alias = "roundNumber")]
    pub round: u32,
    #[serde(default, alias = "eliminatedUsers")]
    pub eliminated: Vec<Participant>,
}

/// Per-status participant counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStatusCounts {
    pub active: u32,
    pub eliminated: u32,
    pub winner: u32,
}

/// Read-only status snapshot returned by the status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: LotteryStatus,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub total_participants: u32,
    #[serde(default, alias = "remainingParticipants")]
    pub remaining_count: u32,
    #[serde(default)]
    pub latest_round: Option<RoundSummary>,
    #[serde(default)]
    pub eliminated_users: Vec<Participant>,
    #[serde(default)]
    pub user_status: UserStatusCounts,
}

/// Result of one spin request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub eliminated_users: Vec<Participant>,
    #[serde(default)]
    pub remaining_count: u32,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub winners: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLotteryRequest {
    pub event_name: String,
    pub package: String,
}

impl StatusSnapshot {
    pub fn is_completed(&self) -> bool {
        self.status == LotteryStatus::Completed
    }
}

/// Participants currently holding the winner status
pub fn winners_of(participants: &[Participant]) -> Vec<Participant> {
    participants
        .iter()
        .filter(|p| p.status == ParticipantStatus::Winner)
        .cloned()
        .collect()
}
