//! JSON fixtures shaped like backend responses

use serde_json::{json, Value};

pub const LOTTERY_ID: &str = "lot1";

pub fn participant(id: &str, name: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "selfie": format!("https://cdn.example/{}.jpg", id),
        "status": status,
    })
}

pub fn eliminated(id: &str, name: &str, round: u32) -> Value {
    json!({
        "_id": id,
        "name": name,
        "status": "eliminated",
        "eliminatedRound": round,
    })
}

pub fn status_snapshot(status: &str, round: u32, total: u32, remaining: u32) -> Value {
    json!({
        "status": status,
        "currentRound": round,
        "totalParticipants": total,
        "remainingCount": remaining,
        "eliminatedUsers": [],
        "userStatus": {"active": remaining, "eliminated": total - remaining, "winner": 0},
    })
}

/// Four active participants
pub fn active_participants() -> Value {
    json!([
        participant("p1", "Asha", "active"),
        participant("p2", "Vikram", "active"),
        participant("p3", "Meera", "active"),
        participant("p4", "Arjun", "active"),
    ])
}

pub fn registrant(id: &str, name: &str, phone: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "phoneNumber": phone,
        "aadhaarNumber": "123412341234",
        "couponCode": format!("RC-{}", id.to_uppercase()),
        "package": {"_id": "pkg1", "name": "Gold"},
        "vipStatus": "regular",
        "createdAt": "2024-03-01T10:00:00Z",
    })
}

pub fn paged(key: &str, items: Value, total: u64) -> Value {
    json!({
        key: items,
        "pagination": {"page": 1, "limit": 20, "total": total, "pages": 1},
    })
}
