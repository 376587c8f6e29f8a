//! Show Quiz use case - read-only load of a stored aggregate.

use crate::ports::quiz_gateway::{GatewayError, QuizGateway};
use crate::use_cases::quiz_view::QuizView;
use quizpatch_domain::QuizId;
use std::sync::Arc;
use tracing::debug;

pub struct ShowQuizUseCase {
    gateway: Arc<dyn QuizGateway>,
}

impl ShowQuizUseCase {
    pub fn new(gateway: Arc<dyn QuizGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, quiz_id: &QuizId) -> Result<QuizView, GatewayError> {
        let stored = self.gateway.load(quiz_id).await?;
        debug!("Loaded quiz {} at version {}", quiz_id, stored.version);
        Ok(QuizView::persisted(stored))
    }
}
