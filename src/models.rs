use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoachError;

/// Training experience of the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessLevel {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| CoachError::InvalidInput(format!("Unknown fitness level: {}", s)))
    }
}

/// Training goal, selects the cardio/strength/flexibility split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    #[default]
    Maintenance,
    Endurance,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Self::WeightLoss,
        Self::MuscleGain,
        Self::Maintenance,
        Self::Endurance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Maintenance => "maintenance",
            Self::Endurance => "endurance",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|goal| goal.as_str() == s)
            .ok_or_else(|| CoachError::InvalidInput(format!("Unknown goal: {}", s)))
    }
}

/// Day of the week, ordered Monday first
///
/// Serializes as the full English name. Parsing, from JSON or the command line,
/// is case-insensitive and also accepts three-letter abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = CoachError;

    /// Case-insensitive, accepts full names and three-letter abbreviations
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_ascii_lowercase();
                name == needle || name[..3] == needle
            })
            .ok_or_else(|| CoachError::InvalidInput(format!("Unknown weekday: {}", s)))
    }
}

impl TryFrom<String> for Weekday {
    type Error = CoachError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn default_available_days() -> u32 {
    3
}

fn default_time_per_session() -> u32 {
    60
}

/// User profile driving routine generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub fitness_level: FitnessLevel,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default = "default_available_days")]
    pub available_days: u32,
    /// Session length in minutes
    #[serde(default = "default_time_per_session")]
    pub time_per_session: u32,
    #[serde(default)]
    pub preferred_days: Vec<Weekday>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            fitness_level: FitnessLevel::default(),
            goal: Goal::default(),
            available_days: default_available_days(),
            time_per_session: default_time_per_session(),
            preferred_days: Vec::new(),
        }
    }
}

/// Cardio intensity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// A single prescribed exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Exercise {
    Cardio {
        name: String,
        /// Minutes
        duration: u32,
        intensity: Intensity,
    },
    Strength {
        name: String,
        sets: String,
        rest: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        focus: Option<String>,
    },
    Flexibility {
        name: String,
        /// Minutes
        duration: u32,
    },
}

impl Exercise {
    pub fn name(&self) -> &str {
        match self {
            Exercise::Cardio { name, .. }
            | Exercise::Strength { name, .. }
            | Exercise::Flexibility { name, .. } => name,
        }
    }

    pub fn is_strength(&self) -> bool {
        matches!(self, Exercise::Strength { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Rest,
    Workout,
}

/// Plan for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    /// Session minutes, absent on rest days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<u32>,
    pub exercises: Vec<Exercise>,
}

impl DailyPlan {
    pub fn rest() -> Self {
        Self {
            plan_type: PlanType::Rest,
            total_time: None,
            exercises: Vec::new(),
        }
    }

    pub fn is_rest(&self) -> bool {
        self.plan_type == PlanType::Rest
    }
}

/// All seven weekdays mapped to their plan
///
/// Workout days come first in the order they were scheduled, followed by the
/// rest days in week order.
pub type WeeklyRoutine = IndexMap<Weekday, DailyPlan>;

/// Routine generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutinePlan {
    pub user_profile: UserProfile,
    pub weekly_routine: WeeklyRoutine,
    pub recommendations: Vec<String>,
}

impl RoutinePlan {
    /// Workout days in scheduling order
    pub fn workout_days(&self) -> Vec<Weekday> {
        self.weekly_routine
            .iter()
            .filter(|(_, plan)| !plan.is_rest())
            .map(|(day, _)| *day)
            .collect()
    }
}

/// Body weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub date: NaiveDate,
    pub weight: f64,
}

/// Extrapolated weight for one future day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub predicted_weight: f64,
}

fn default_days_ahead() -> u32 {
    14
}

/// Weight prediction request
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictWeightRequest {
    pub weight_data: Vec<WeightRecord>,
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,
}

/// Weight prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictWeightResponse {
    pub predictions: Vec<PredictionPoint>,
    pub input_data_count: usize,
    pub prediction_days: u32,
}

/// Self-test section status
#[derive(Debug, Serialize, Deserialize)]
pub struct SelfTestSection<T> {
    pub status: String,
    #[serde(flatten)]
    pub payload: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SampleRoutine {
    pub sample_routine: RoutinePlan,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SamplePredictions {
    pub sample_predictions: Vec<PredictionPoint>,
}

/// Model self-test response
#[derive(Debug, Serialize, Deserialize)]
pub struct SelfTestResponse {
    pub routine_test: SelfTestSection<SampleRoutine>,
    pub weight_prediction_test: SelfTestSection<SamplePredictions>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
    pub timestamp: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
