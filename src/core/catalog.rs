//! Exercise catalog and lookup tables
//!
//! Every table is an exhaustive match over the closed enums in [`crate::models`],
//! so a new goal or level cannot be added without filling in each table.

use crate::models::{FitnessLevel, Goal, Intensity, Weekday};

/// Minutes of strength work per exercise for the general strength block
pub const MINUTES_PER_STRENGTH_EXERCISE: u32 = 15;
/// Minutes of strength work per exercise for the muscle-gain block
pub const MINUTES_PER_MUSCLE_GAIN_EXERCISE: u32 = 12;
/// Cap on general strength exercises per day
pub const MAX_STRENGTH_EXERCISES: usize = 3;
/// Floor on muscle-gain exercises per day (bounded by the candidate list)
pub const MIN_MUSCLE_GAIN_EXERCISES: usize = 3;

pub const STRENGTH_REST: &str = "60-90s";
pub const MUSCLE_GAIN_REST: &str = "90-120s";

/// Days that give a one-day recovery gap between sessions
pub const ALTERNATING_DAYS: [Weekday; 3] = [Weekday::Monday, Weekday::Wednesday, Weekday::Friday];

/// Share of a session spent on each training category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRatio {
    pub cardio: f64,
    pub strength: f64,
    pub flexibility: f64,
}

impl TimeRatio {
    /// Split a session into (cardio, strength, flexibility) minutes, flooring each part
    pub fn allocate(&self, session_minutes: u32) -> (u32, u32, u32) {
        let minutes = session_minutes as f64;
        (
            (minutes * self.cardio).floor() as u32,
            (minutes * self.strength).floor() as u32,
            (minutes * self.flexibility).floor() as u32,
        )
    }
}

pub fn time_ratio(goal: Goal) -> TimeRatio {
    match goal {
        Goal::WeightLoss => TimeRatio {
            cardio: 0.6,
            strength: 0.3,
            flexibility: 0.1,
        },
        Goal::MuscleGain => TimeRatio {
            cardio: 0.15,
            strength: 0.75,
            flexibility: 0.1,
        },
        Goal::Maintenance => TimeRatio {
            cardio: 0.4,
            strength: 0.4,
            flexibility: 0.2,
        },
        Goal::Endurance => TimeRatio {
            cardio: 0.7,
            strength: 0.2,
            flexibility: 0.1,
        },
    }
}

pub fn cardio_exercises(level: FitnessLevel) -> &'static [&'static str] {
    match level {
        FitnessLevel::Beginner => &["Walking", "Stationary Bike", "Swimming", "Yoga"],
        FitnessLevel::Intermediate => &["Jogging", "Cycling", "Dance", "Stair Climbing"],
        FitnessLevel::Advanced => &["Running", "HIIT", "CrossFit", "Boxing"],
    }
}

pub fn strength_exercises(level: FitnessLevel) -> &'static [&'static str] {
    match level {
        FitnessLevel::Beginner => &["Push-up", "Squat", "Plank", "Lunge"],
        FitnessLevel::Intermediate => &["Dumbbell Workout", "Barbell Workout", "Pull-up", "Dips"],
        FitnessLevel::Advanced => &["Deadlift", "Bench Press", "Barbell Squat", "Overhead Press"],
    }
}

/// Shared by every level
pub const FLEXIBILITY_EXERCISES: [&str; 4] = ["Stretching", "Yoga", "Pilates", "Foam Rolling"];

pub fn intensity(level: FitnessLevel) -> Intensity {
    match level {
        FitnessLevel::Beginner => Intensity::Low,
        FitnessLevel::Intermediate => Intensity::Medium,
        FitnessLevel::Advanced => Intensity::High,
    }
}

pub fn strength_sets(level: FitnessLevel) -> &'static str {
    match level {
        FitnessLevel::Beginner => "2 sets x 8-12 reps",
        FitnessLevel::Intermediate => "3 sets x 10-15 reps",
        FitnessLevel::Advanced => "4 sets x 12-20 reps",
    }
}

pub fn muscle_gain_sets(level: FitnessLevel) -> &'static str {
    match level {
        FitnessLevel::Beginner => "3 sets x 8-12 reps",
        FitnessLevel::Intermediate => "4 sets x 8-12 reps",
        FitnessLevel::Advanced => "4-5 sets x 6-10 reps",
    }
}

/// Body-focus rotation for muscle-gain days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuscleSplit {
    UpperBody,
    LowerBody,
    FullBody,
}

impl MuscleSplit {
    /// Rotation by position in the workout-day list
    pub fn for_day_index(index: usize) -> Self {
        match index % 3 {
            0 => Self::UpperBody,
            1 => Self::LowerBody,
            _ => Self::FullBody,
        }
    }

    pub fn focus(&self) -> &'static str {
        match self {
            Self::UpperBody => "upper body",
            Self::LowerBody => "lower body",
            Self::FullBody => "full body",
        }
    }

    pub fn exercises(&self) -> &'static [&'static str] {
        match self {
            Self::UpperBody => &["Push-up", "Bench Press", "Dumbbell Curl", "Shoulder Press"],
            Self::LowerBody => &["Squat", "Lunge", "Deadlift", "Calf Raise"],
            Self::FullBody => &["Deadlift", "Squat", "Pull-up", "Plank"],
        }
    }

    /// Split exercises the given level is cleared for, in catalog order
    pub fn candidates(&self, level: FitnessLevel) -> Vec<&'static str> {
        const BEGINNER_SAFE: [&str; 4] = ["Push-up", "Squat", "Lunge", "Plank"];
        const INTERMEDIATE_EXCLUDED: [&str; 2] = ["Deadlift", "Bench Press"];

        self.exercises()
            .iter()
            .copied()
            .filter(|name| match level {
                FitnessLevel::Beginner => BEGINNER_SAFE.contains(name),
                FitnessLevel::Intermediate => !INTERMEDIATE_EXCLUDED.contains(name),
                FitnessLevel::Advanced => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_sum_to_one() {
        for goal in Goal::ALL {
            let ratio = time_ratio(goal);
            let total = ratio.cardio + ratio.strength + ratio.flexibility;
            assert!((total - 1.0).abs() < 1e-9, "{} ratios sum to {}", goal, total);
        }
    }

    #[test]
    fn test_allocate_floors_each_category() {
        // 45 * 0.6 = 27, 45 * 0.3 = 13.5, 45 * 0.1 = 4.5
        let (cardio, strength, flexibility) = time_ratio(Goal::WeightLoss).allocate(45);
        assert_eq!((cardio, strength, flexibility), (27, 13, 4));
        assert!(cardio + strength + flexibility <= 45);

        assert_eq!(time_ratio(Goal::MuscleGain).allocate(0), (0, 0, 0));
    }

    #[test]
    fn test_catalog_sizes() {
        for level in FitnessLevel::ALL {
            assert_eq!(cardio_exercises(level).len(), 4);
            assert_eq!(strength_exercises(level).len(), 4);
        }
        assert_eq!(FLEXIBILITY_EXERCISES.len(), 4);
    }

    #[test]
    fn test_split_rotation() {
        assert_eq!(MuscleSplit::for_day_index(0), MuscleSplit::UpperBody);
        assert_eq!(MuscleSplit::for_day_index(1), MuscleSplit::LowerBody);
        assert_eq!(MuscleSplit::for_day_index(2), MuscleSplit::FullBody);
        assert_eq!(MuscleSplit::for_day_index(3), MuscleSplit::UpperBody);
    }

    #[test]
    fn test_split_candidates_by_level() {
        assert_eq!(
            MuscleSplit::UpperBody.candidates(FitnessLevel::Beginner),
            vec!["Push-up"]
        );
        assert_eq!(
            MuscleSplit::LowerBody.candidates(FitnessLevel::Beginner),
            vec!["Squat", "Lunge"]
        );
        assert_eq!(
            MuscleSplit::FullBody.candidates(FitnessLevel::Beginner),
            vec!["Squat", "Plank"]
        );
        assert_eq!(
            MuscleSplit::UpperBody.candidates(FitnessLevel::Intermediate),
            vec!["Push-up", "Dumbbell Curl", "Shoulder Press"]
        );
        assert_eq!(
            MuscleSplit::FullBody.candidates(FitnessLevel::Intermediate),
            vec!["Squat", "Pull-up", "Plank"]
        );
        assert_eq!(MuscleSplit::LowerBody.candidates(FitnessLevel::Advanced).len(), 4);
    }
}
