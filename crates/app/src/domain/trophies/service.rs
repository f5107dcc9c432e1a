//! Trophy Progress Tracker

use std::sync::Arc;

use stepshop::trophies::{Trophy, TrophyBoard};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::{
    domain::trophies::errors::TrophiesError, gateway::TrophyGateway, session::Session,
};

/// Holds the signed in user's trophies as last reported by the backend.
pub struct TrophyTracker {
    gateway: Arc<dyn TrophyGateway>,
    session: Session,
    board: RwLock<TrophyBoard>,
}

impl TrophyTracker {
    #[must_use]
    pub fn new(gateway: Arc<dyn TrophyGateway>, session: Session) -> Self {
        Self {
            gateway,
            session,
            board: RwLock::new(TrophyBoard::default()),
        }
    }

    /// Fetch the user's trophies and replace the held list.
    ///
    /// # Errors
    ///
    /// Returns an error if the trophies cannot be fetched; the previous list
    /// is kept.
    #[instrument(skip(self), err)]
    pub async fn load_user_trophies(&self) -> Result<TrophyBoard, TrophiesError> {
        let trophies = self.session.observe(self.gateway.user_trophies().await)?;
        let board = TrophyBoard::new(trophies);

        info!(
            total = board.total(),
            completed = board.completed_count(),
            "trophies loaded"
        );

        *self.board.write().await = board.clone();

        Ok(board)
    }

    /// The held trophies.
    pub async fn board(&self) -> TrophyBoard {
        self.board.read().await.clone()
    }

    /// The held trophies, in backend order.
    pub async fn trophies(&self) -> Vec<Trophy> {
        self.board.read().await.trophies().to_vec()
    }
}
