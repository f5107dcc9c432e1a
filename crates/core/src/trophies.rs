//! Trophies

use serde::{Deserialize, Serialize};

use crate::ids::TrophyId;

/// An achievement definition joined with the user's progress towards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trophy {
    /// Trophy identifier
    pub id: TrophyId,

    /// Display title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Threshold the progress counter has to reach.
    pub target: u64,

    /// Progress counter, owned by the server.
    pub progress: u64,

    /// Completion flag as reported by the server.
    pub completed: bool,

    /// Optional icon
    pub icon_url: Option<String>,

    /// When the server marked the trophy completed.
    pub completed_at: Option<String>,
}

impl Trophy {
    /// Progress towards the target in `[0.0, 1.0]`.
    pub fn completion_ratio(&self) -> f64 {
        progress_ratio(self.progress, self.target)
    }

    /// Whether the server has marked this trophy completed.
    ///
    /// This is the server's flag, not `progress >= target`; completion timing
    /// belongs to the server and progress updates may lag behind it.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Ratio of `progress` to `target`, clamped to `1.0`.
///
/// A `target` of zero yields `1.0` when there is any progress and `0.0` otherwise.
#[expect(
    clippy::cast_precision_loss,
    reason = "ratios are for display; counters beyond 2^53 lose precision harmlessly"
)]
pub fn progress_ratio(progress: u64, target: u64) -> f64 {
    if target == 0 {
        return if progress > 0 { 1.0 } else { 0.0 };
    }

    (progress as f64 / target as f64).min(1.0)
}

/// Summary view over a user's trophies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrophyBoard {
    trophies: Vec<Trophy>,
}

impl TrophyBoard {
    /// Create a board from the server's list.
    pub fn new(trophies: Vec<Trophy>) -> Self {
        Self { trophies }
    }

    /// All trophies in server order.
    pub fn trophies(&self) -> &[Trophy] {
        &self.trophies
    }

    /// Number of trophies.
    pub fn total(&self) -> usize {
        self.trophies.len()
    }

    /// Number of trophies the server has marked completed.
    pub fn completed_count(&self) -> usize {
        self.trophies.iter().filter(|t| t.is_completed()).count()
    }

    /// Trophies that are not completed yet.
    pub fn in_progress(&self) -> impl Iterator<Item = &Trophy> {
        self.trophies.iter().filter(|t| !t.is_completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trophy(id: u64, progress: u64, target: u64, completed: bool) -> Trophy {
        Trophy {
            id: TrophyId::new(id),
            title: format!("Trophy {id}"),
            description: None,
            target,
            progress,
            completed,
            icon_url: None,
            completed_at: None,
        }
    }

    #[test]
    fn ratio_is_progress_over_target() {
        assert!((progress_ratio(30, 100) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_is_clamped_to_one() {
        assert!((progress_ratio(120, 100) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_target_does_not_divide() {
        assert!(progress_ratio(0, 0).abs() < f64::EPSILON);
        assert!((progress_ratio(5, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn completion_uses_server_flag() {
        let lagging = trophy(1, 80, 100, true);
        let not_yet = trophy(2, 100, 100, false);

        assert!(lagging.is_completed());
        assert!(!not_yet.is_completed());
        assert!((not_yet.completion_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn board_counts_completed_trophies() {
        let board = TrophyBoard::new(vec![
            trophy(1, 10, 10, true),
            trophy(2, 3, 10, false),
            trophy(3, 0, 5, false),
        ]);

        assert_eq!(board.total(), 3);
        assert_eq!(board.completed_count(), 1);
        assert_eq!(
            board.in_progress().map(|t| t.id.get()).collect::<Vec<_>>(),
            [2, 3]
        );
    }
}
