//! Badge catalog and achievement checking.
//!
//! The catalog is fixed; awards are derived from a stats snapshot and an
//! already-earned set, so re-running the check with unchanged stats never
//! awards the same badge twice.

use std::collections::HashSet;

/// Derived statistics the badge thresholds are checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudyStats {
    /// Completed quizzes.
    pub total_quizzes: i64,
    /// Quizzes scored exactly 100.
    pub perfect_scores: i64,
    /// Correctly solved reasoning challenges.
    pub reasoning_solved: i64,
    /// Current activity streak.
    pub current_streak: i64,
    /// Lifetime points.
    pub total_points: i64,
}

/// Threshold a badge is granted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    QuizzesCompleted(i64),
    PerfectScores(i64),
    ReasoningSolved(i64),
    Streak(i64),
    Points(i64),
}

impl Criterion {
    /// Whether the stats snapshot crosses this threshold.
    pub fn met(&self, stats: &StudyStats) -> bool {
        match *self {
            Criterion::QuizzesCompleted(n) => stats.total_quizzes >= n,
            Criterion::PerfectScores(n) => stats.perfect_scores >= n,
            Criterion::ReasoningSolved(n) => stats.reasoning_solved >= n,
            Criterion::Streak(n) => stats.current_streak >= n,
            Criterion::Points(n) => stats.total_points >= n,
        }
    }
}

/// A badge definition in the fixed catalog.
#[derive(Debug, Clone, Copy)]
pub struct BadgeSpec {
    /// Stable identifier stored in award rows.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display description.
    pub description: &'static str,
    /// Emoji shown by the client.
    pub icon: &'static str,
    /// Award threshold.
    pub criterion: Criterion,
}

/// The fixed badge catalog.
pub const CATALOG: &[BadgeSpec] = &[
    BadgeSpec {
        id: "first-quiz",
        name: "First Steps",
        description: "Complete your first quiz",
        icon: "🎯",
        criterion: Criterion::QuizzesCompleted(1),
    },
    BadgeSpec {
        id: "quiz-10",
        name: "Quiz Explorer",
        description: "Complete 10 quizzes",
        icon: "🧭",
        criterion: Criterion::QuizzesCompleted(10),
    },
    BadgeSpec {
        id: "perfect-score",
        name: "Perfectionist",
        description: "Score 100% on a quiz",
        icon: "💯",
        criterion: Criterion::PerfectScores(1),
    },
    BadgeSpec {
        id: "perfect-5",
        name: "Flawless Five",
        description: "Score 100% on 5 quizzes",
        icon: "🌟",
        criterion: Criterion::PerfectScores(5),
    },
    BadgeSpec {
        id: "reasoning-first",
        name: "Sharp Thinker",
        description: "Solve your first reasoning challenge",
        icon: "🧠",
        criterion: Criterion::ReasoningSolved(1),
    },
    BadgeSpec {
        id: "streak-3",
        name: "On a Roll",
        description: "Reach a 3-activity streak",
        icon: "🔥",
        criterion: Criterion::Streak(3),
    },
    BadgeSpec {
        id: "streak-7",
        name: "Unstoppable",
        description: "Reach a 7-activity streak",
        icon: "⚡",
        criterion: Criterion::Streak(7),
    },
    BadgeSpec {
        id: "points-100",
        name: "Century Club",
        description: "Earn 100 points",
        icon: "🏅",
        criterion: Criterion::Points(100),
    },
    BadgeSpec {
        id: "points-500",
        name: "Point Hoarder",
        description: "Earn 500 points",
        icon: "🏆",
        criterion: Criterion::Points(500),
    },
];

/// Badges newly qualified for: threshold met and not yet in the earned set.
pub fn newly_earned(stats: &StudyStats, earned: &HashSet<String>) -> Vec<&'static BadgeSpec> {
    CATALOG
        .iter()
        .filter(|spec| spec.criterion.met(stats) && !earned.contains(spec.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> StudyStats {
        StudyStats {
            total_quizzes: 1,
            perfect_scores: 1,
            reasoning_solved: 0,
            current_streak: 1,
            total_points: 10,
        }
    }

    #[test]
    fn test_thresholds_award_expected_badges() {
        let earned = HashSet::new();
        let new: Vec<&str> = newly_earned(&stats(), &earned).iter().map(|b| b.id).collect();
        assert_eq!(new, vec!["first-quiz", "perfect-score"]);
    }

    #[test]
    fn test_check_is_idempotent_for_unchanged_stats() {
        let stats = stats();
        let mut earned = HashSet::new();

        let first = newly_earned(&stats, &earned);
        assert!(!first.is_empty());
        for badge in &first {
            earned.insert(badge.id.to_string());
        }

        // Second pass with the same stats must award nothing.
        assert!(newly_earned(&stats, &earned).is_empty());
    }

    #[test]
    fn test_zeroed_stats_award_nothing() {
        assert!(newly_earned(&StudyStats::default(), &HashSet::new()).is_empty());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut seen = HashSet::new();
        for spec in CATALOG {
            assert!(seen.insert(spec.id), "duplicate badge id: {}", spec.id);
        }
    }
}
