use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{USER_GOAL_MAX_LEN, USER_GOAL_SENTINEL};
use crate::error::TrainerError;

/// Goal label attached to a feedback row.
///
/// Labels written by other systems are kept verbatim in [`UserGoal::Other`],
/// surrounding whitespace included, so a filter matches the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UserGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    HealthMaintenance,
    Rehabilitation,
    PostureCorrection,
    /// Sentinel for rows that predate the column.
    General,
    Other(String),
}

impl UserGoal {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Endurance => "endurance",
            Self::HealthMaintenance => "health_maintenance",
            Self::Rehabilitation => "rehabilitation",
            Self::PostureCorrection => "posture_correction",
            Self::General => USER_GOAL_SENTINEL,
            Self::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for UserGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserGoal {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(TrainerError::InvalidInput("user goal must not be empty".to_owned()));
        }
        if s.chars().count() > USER_GOAL_MAX_LEN {
            return Err(TrainerError::InvalidInput(format!(
                "user goal exceeds {USER_GOAL_MAX_LEN} characters"
            )));
        }
        Ok(match s {
            "weight_loss" => Self::WeightLoss,
            "muscle_gain" => Self::MuscleGain,
            "endurance" => Self::Endurance,
            "health_maintenance" => Self::HealthMaintenance,
            "rehabilitation" => Self::Rehabilitation,
            "posture_correction" => Self::PostureCorrection,
            USER_GOAL_SENTINEL => Self::General,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl TryFrom<String> for UserGoal {
    type Error = TrainerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserGoal> for String {
    fn from(goal: UserGoal) -> Self {
        match goal {
            UserGoal::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}
