use serde::{Deserialize, Serialize};

/// Lead lifecycle state. `Unknown` is the sentinel used when the status
/// classifier fails outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    New,
    InProgress,
    FollowUp,
    Won,
    Lost,
    Unknown,
}

impl LeadStatus {
    /// Candidate labels offered to the zero-shot classifier.
    pub const CANDIDATES: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::InProgress,
        LeadStatus::FollowUp,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "NEW",
            LeadStatus::InProgress => "IN_PROGRESS",
            LeadStatus::FollowUp => "FOLLOW_UP",
            LeadStatus::Won => "WON",
            LeadStatus::Lost => "LOST",
            LeadStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_uppercase().replace([' ', '-'], "_");
        Self::CANDIDATES
            .into_iter()
            .chain(std::iter::once(LeadStatus::Unknown))
            .find(|s| s.as_str() == normalized)
    }
}

/// Channel a lead came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadSource {
    Instagram,
    Facebook,
    LinkedIn,
    Google,
    WhatsApp,
    Website,
    #[serde(rename = "Walk-in")]
    WalkIn,
    Referral,
    Call,
}

/// Outcome of one collaborator-backed extraction step.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldResult<T> {
    Found(T),
    Absent,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBag {
    pub name: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub visit_time: Option<String>,
    pub lead_id: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
}
