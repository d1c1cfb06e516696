use std::sync::Arc;

use tracing::info;

use crate::domain::entities::bet::{BetRecord, BetStatus, BetStatusChange};
use crate::usecase::ports::api::{ApiError, BetGateway};

#[derive(Debug)]
pub enum BetError {
    EmptyBetId,
    EmptyReason,
    NotAllowed { from: BetStatus, to: BetStatus },
    Api(ApiError),
}

impl std::fmt::Display for BetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetError::EmptyBetId => write!(f, "enter a bet id"),
            BetError::EmptyReason => write!(f, "a reason is required to change a bet status"),
            BetError::NotAllowed { from, to } => write!(
                f,
                "a {} bet cannot become {}",
                from.label(),
                to.label()
            ),
            BetError::Api(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BetError {}

impl From<ApiError> for BetError {
    fn from(value: ApiError) -> Self {
        BetError::Api(value)
    }
}

pub struct BetService {
    gateway: Arc<dyn BetGateway>,
}

impl BetService {
    pub fn new(gateway: Arc<dyn BetGateway>) -> Self {
        Self { gateway }
    }

    pub async fn find(&self, bet_id: &str) -> Result<Option<BetRecord>, BetError> {
        let bet_id = bet_id.trim();
        if bet_id.is_empty() {
            return Err(BetError::EmptyBetId);
        }
        Ok(self.gateway.find_bet(bet_id.to_string()).await?)
    }

    pub async fn change_status(
        &self,
        bet: &BetRecord,
        target: BetStatus,
        reason: &str,
    ) -> Result<BetRecord, BetError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(BetError::EmptyReason);
        }
        if !bet.status.can_transition_to(target) {
            return Err(BetError::NotAllowed {
                from: bet.status,
                to: target,
            });
        }
        let updated = self
            .gateway
            .update_status(
                bet.bet_id.clone(),
                BetStatusChange {
                    status: target,
                    reason: reason.to_string(),
                },
            )
            .await?;
        info!(
            bet_id = %bet.bet_id,
            from = bet.status.label(),
            to = updated.status.label(),
            "bet status changed"
        );
        Ok(updated)
    }
}
