use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the nine kinds of trainer-authored content, each stored in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    Qna,
    WorkoutGuideline,
    DietGuideline,
    Philosophy,
    Injury,
    Feedback,
    MealExamples,
    WorkoutExamples,
    Tones,
}

impl DataCategory {
    pub const ALL: [Self; 9] = [
        Self::Qna,
        Self::WorkoutGuideline,
        Self::DietGuideline,
        Self::Philosophy,
        Self::Injury,
        Self::Feedback,
        Self::MealExamples,
        Self::WorkoutExamples,
        Self::Tones,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qna => "qna",
            Self::WorkoutGuideline => "workout_guideline",
            Self::DietGuideline => "diet_guideline",
            Self::Philosophy => "philosophy",
            Self::Injury => "injury",
            Self::Feedback => "feedback",
            Self::MealExamples => "meal_examples",
            Self::WorkoutExamples => "workout_examples",
            Self::Tones => "tones",
        }
    }

    /// Backing table. Every table carries a `trainer_id` column.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Qna => "data_trainer_qna",
            Self::WorkoutGuideline => "data_trainer_workout_guideline",
            Self::DietGuideline => "data_trainer_diet_guideline",
            Self::Philosophy => "data_trainer_philosophy",
            Self::Injury => "data_trainer_injury",
            Self::Feedback => "data_trainer_feedback",
            Self::MealExamples => "data_trainer_meal_examples",
            Self::WorkoutExamples => "data_trainer_workout_examples",
            Self::Tones => "data_trainer_tones_raw",
        }
    }

    /// Row count needed for full marks (the Gold target).
    #[must_use]
    pub const fn target(self) -> u64 {
        match self {
            Self::Qna => 60,
            Self::WorkoutGuideline => 30,
            Self::DietGuideline => 20,
            Self::Philosophy | Self::MealExamples => 15,
            Self::Injury => 12,
            Self::Feedback => 10,
            Self::WorkoutExamples => 20,
            Self::Tones => 8,
        }
    }

    /// Share of the 100-point total. Weights across all categories sum to 1.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Qna => 0.23,
            Self::WorkoutGuideline => 0.18,
            Self::DietGuideline => 0.13,
            Self::Philosophy | Self::Injury => 0.09,
            Self::Feedback | Self::MealExamples => 0.04,
            Self::WorkoutExamples | Self::Tones => 0.10,
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
