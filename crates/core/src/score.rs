//! Data-completeness scoring for a trainer.
//!
//! Each category earns `min(count / target, 1) * 100 * weight` points. The
//! total decides the tier. Shortfalls are ranked by how much of the target is
//! missing, scaled by the category weight.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::DataCategory;
use crate::constants::{MAX_PRIORITIES, URGENT_PRIORITY_RANK};

/// Row counts per category for one trainer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<DataCategory, u64>);

impl CategoryCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, category: DataCategory, count: u64) {
        self.0.insert(category, count);
    }

    /// Count for `category`, 0 when it was never recorded.
    #[must_use]
    pub fn get(&self, category: DataCategory) -> u64 {
        self.0.get(&category).copied().unwrap_or(0)
    }
}

impl FromIterator<(DataCategory, u64)> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = (DataCategory, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Unranked,
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= Self::Gold.threshold() {
            Self::Gold
        } else if score >= Self::Silver.threshold() {
            Self::Silver
        } else if score >= Self::Bronze.threshold() {
            Self::Bronze
        } else {
            Self::Unranked
        }
    }

    /// Minimum total score for this tier.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::Gold => 85.0,
            Self::Silver => 75.0,
            Self::Bronze => 60.0,
            Self::Unranked => 0.0,
        }
    }

    /// Tier to aim for next. Gold stays the goal once reached.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Unranked => Self::Bronze,
            Self::Bronze => Self::Silver,
            Self::Silver | Self::Gold => Self::Gold,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
            Self::Unranked => "Unranked",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: DataCategory,
    pub current: u64,
    pub target: u64,
    /// Percentage of the target reached, capped at 100.
    pub achievement: f64,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Urgent,
    Important,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Priority {
    pub rank: usize,
    pub category: DataCategory,
    pub needed: u64,
    pub weight: f64,
    pub level: PriorityLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total_score: f64,
    pub tier: Tier,
    pub next_goal: Tier,
    pub total_current: u64,
    pub total_target: u64,
    pub details: Vec<CategoryScore>,
    pub priorities: Vec<Priority>,
}

/// Percentage of `target` reached by `current`, capped at 100.
fn achievement(current: u64, target: u64) -> f64 {
    if target == 0 {
        return 100.0;
    }
    #[expect(clippy::cast_precision_loss, reason = "row counts are far below 2^52")]
    let ratio = current as f64 / target as f64;
    (ratio * 100.0).min(100.0)
}

#[must_use]
pub fn calculate_score(counts: &CategoryCounts) -> ScoreReport {
    let details: Vec<CategoryScore> = DataCategory::ALL
        .into_iter()
        .map(|category| {
            let current = counts.get(category);
            let achievement = achievement(current, category.target());
            CategoryScore {
                category,
                current,
                target: category.target(),
                achievement,
                score: achievement * category.weight(),
                max_score: 100.0 * category.weight(),
            }
        })
        .collect();

    let total_score: f64 = details.iter().map(|d| d.score).sum();
    let tier = Tier::from_score(total_score);

    ScoreReport {
        total_score,
        tier,
        next_goal: tier.next(),
        total_current: details.iter().map(|d| d.current).sum(),
        total_target: details.iter().map(|d| d.target).sum(),
        priorities: rank_priorities(&details),
        details,
    }
}

/// Shortfall categories ordered by `needed / target * weight`, highest first.
fn rank_priorities(details: &[CategoryScore]) -> Vec<Priority> {
    let mut shortfalls: Vec<(f64, &CategoryScore)> = details
        .iter()
        .filter(|d| d.current < d.target)
        .map(|d| {
            #[expect(clippy::cast_precision_loss, reason = "row counts are far below 2^52")]
            let shortage = (d.target - d.current) as f64 / d.target as f64;
            (shortage * d.category.weight(), d)
        })
        .collect();

    // Stable sort keeps category order among equal priorities.
    shortfalls.sort_by(|a, b| b.0.total_cmp(&a.0));

    shortfalls
        .into_iter()
        .take(MAX_PRIORITIES)
        .enumerate()
        .map(|(i, (weight, d))| {
            let rank = i + 1;
            Priority {
                rank,
                category: d.category,
                needed: d.target - d.current,
                weight,
                level: if rank <= URGENT_PRIORITY_RANK {
                    PriorityLevel::Urgent
                } else {
                    PriorityLevel::Important
                },
            }
        })
        .collect()
}
