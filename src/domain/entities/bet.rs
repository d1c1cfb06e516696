use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
    Void,
    Refunded,
    Cancelled,
}

impl BetStatus {
    pub fn all() -> [BetStatus; 6] {
        [
            BetStatus::Pending,
            BetStatus::Won,
            BetStatus::Lost,
            BetStatus::Void,
            BetStatus::Refunded,
            BetStatus::Cancelled,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            BetStatus::Pending => "pending",
            BetStatus::Won => "won",
            BetStatus::Lost => "lost",
            BetStatus::Void => "void",
            BetStatus::Refunded => "refunded",
            BetStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<BetStatus> {
        BetStatus::all()
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(value.trim()))
    }

    pub fn allowed_transitions(self) -> &'static [BetStatus] {
        match self {
            BetStatus::Pending => &[
                BetStatus::Won,
                BetStatus::Lost,
                BetStatus::Void,
                BetStatus::Cancelled,
            ],
            BetStatus::Won | BetStatus::Lost => &[BetStatus::Void],
            BetStatus::Void => &[BetStatus::Refunded],
            BetStatus::Refunded | BetStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, target: BetStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRecord {
    pub bet_id: String,
    pub round_id: String,
    pub player_id: String,
    pub game_name: String,
    pub amount: f64,
    #[serde(default)]
    pub payout: f64,
    pub currency: String,
    pub status: BetStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetStatusChange {
    pub status: BetStatus,
    pub reason: String,
}
