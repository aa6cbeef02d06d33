//! Weekly Routine Generation
//!
//! Builds a seven-day schedule from a [`UserProfile`]:
//!
//! 1. pick the workout days (preferred days first, then random fill)
//! 2. reorder three-day muscle-gain weeks onto Monday/Wednesday/Friday
//! 3. split each session between cardio, strength and flexibility by goal
//! 4. draw exercises from the level catalog
//! 5. fill every remaining weekday with a rest plan
//!
//! All randomness comes from the generator's RNG, so a seeded RNG gives a
//! reproducible routine.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::core::catalog::{self, MuscleSplit, TimeRatio};
use crate::models::{
    DailyPlan, Exercise, FitnessLevel, Goal, PlanType, RoutinePlan, UserProfile, Weekday,
    WeeklyRoutine,
};

/// Weekly routine generator with an injectable random source
pub struct RoutineGenerator<R = StdRng> {
    rng: R,
}

impl RoutineGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RoutineGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RoutineGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a weekly routine for the given profile
    pub fn generate_weekly_routine(&mut self, profile: &UserProfile) -> RoutinePlan {
        let ratio = catalog::time_ratio(profile.goal);
        let available_days = profile.available_days.min(7) as usize;

        let mut workout_days = self.select_workout_days(&profile.preferred_days, available_days);
        if profile.goal == Goal::MuscleGain {
            workout_days = optimize_muscle_gain_schedule(workout_days, available_days);
        }

        let mut weekly_routine = WeeklyRoutine::new();
        for (index, day) in workout_days.iter().enumerate() {
            let plan = self.generate_daily_plan(
                profile.fitness_level,
                profile.goal,
                ratio,
                profile.time_per_session,
                index,
            );
            weekly_routine.insert(*day, plan);
        }

        for day in Weekday::ALL {
            weekly_routine.entry(day).or_insert_with(DailyPlan::rest);
        }

        debug!(
            "Generated routine: goal={}, level={}, workout_days={:?}",
            profile.goal, profile.fitness_level, workout_days
        );

        RoutinePlan {
            user_profile: profile.clone(),
            weekly_routine,
            recommendations: generate_recommendations(profile),
        }
    }

    /// Choose the training days, honoring preferred days in the order given
    fn select_workout_days(&mut self, preferred: &[Weekday], available_days: usize) -> Vec<Weekday> {
        if preferred.is_empty() {
            return Weekday::ALL
                .choose_multiple(&mut self.rng, available_days)
                .copied()
                .collect();
        }

        if preferred.len() >= available_days {
            return preferred[..available_days].to_vec();
        }

        let remaining: Vec<Weekday> = Weekday::ALL
            .into_iter()
            .filter(|day| !preferred.contains(day))
            .collect();
        let needed = available_days - preferred.len();

        let mut days = preferred.to_vec();
        days.extend(remaining.choose_multiple(&mut self.rng, needed).copied());
        days
    }

    fn generate_daily_plan(
        &mut self,
        level: FitnessLevel,
        goal: Goal,
        ratio: TimeRatio,
        session_minutes: u32,
        day_index: usize,
    ) -> DailyPlan {
        let (cardio_time, strength_time, flexibility_time) = ratio.allocate(session_minutes);
        let mut exercises = Vec::new();

        if cardio_time > 0 {
            if let Some(name) = catalog::cardio_exercises(level).choose(&mut self.rng) {
                exercises.push(Exercise::Cardio {
                    name: name.to_string(),
                    duration: cardio_time,
                    intensity: catalog::intensity(level),
                });
            }
        }

        if strength_time > 0 {
            if goal == Goal::MuscleGain {
                exercises.extend(self.generate_muscle_gain_block(level, strength_time, day_index));
            } else {
                exercises.extend(self.generate_strength_block(level, strength_time));
            }
        }

        if flexibility_time > 0 {
            if let Some(name) = catalog::FLEXIBILITY_EXERCISES.choose(&mut self.rng) {
                exercises.push(Exercise::Flexibility {
                    name: name.to_string(),
                    duration: flexibility_time,
                });
            }
        }

        DailyPlan {
            plan_type: PlanType::Workout,
            total_time: Some(session_minutes),
            exercises,
        }
    }

    /// One exercise per 15 minutes, at most three
    fn generate_strength_block(&mut self, level: FitnessLevel, strength_time: u32) -> Vec<Exercise> {
        let pool = catalog::strength_exercises(level);
        let count = catalog::MAX_STRENGTH_EXERCISES
            .min((strength_time / catalog::MINUTES_PER_STRENGTH_EXERCISE) as usize)
            .min(pool.len());

        pool.choose_multiple(&mut self.rng, count)
            .map(|name| Exercise::Strength {
                name: name.to_string(),
                sets: catalog::strength_sets(level).to_string(),
                rest: catalog::STRENGTH_REST.to_string(),
                focus: None,
            })
            .collect()
    }

    /// Split-based hypertrophy block; the split rotates with the day index
    fn generate_muscle_gain_block(
        &mut self,
        level: FitnessLevel,
        strength_time: u32,
        day_index: usize,
    ) -> Vec<Exercise> {
        let split = MuscleSplit::for_day_index(day_index);
        let candidates = split.candidates(level);
        let by_time = (strength_time / catalog::MINUTES_PER_MUSCLE_GAIN_EXERCISE) as usize;
        let count = candidates
            .len()
            .min(by_time.max(catalog::MIN_MUSCLE_GAIN_EXERCISES));

        candidates
            .choose_multiple(&mut self.rng, count)
            .map(|name| Exercise::Strength {
                name: name.to_string(),
                sets: catalog::muscle_gain_sets(level).to_string(),
                rest: catalog::MUSCLE_GAIN_REST.to_string(),
                focus: Some(split.focus().to_string()),
            })
            .collect()
    }
}

/// Three-day muscle-gain weeks lead with Monday/Wednesday/Friday
///
/// Selected days among the alternating set come first in week order, followed by
/// the other selected days, three days total. Any other week is left unchanged.
pub fn optimize_muscle_gain_schedule(workout_days: Vec<Weekday>, available_days: usize) -> Vec<Weekday> {
    if available_days != 3 {
        return workout_days;
    }

    let alternating = catalog::ALTERNATING_DAYS
        .into_iter()
        .filter(|day| workout_days.contains(day));
    let others = workout_days
        .iter()
        .copied()
        .filter(|day| !catalog::ALTERNATING_DAYS.contains(day));

    alternating.chain(others).take(3).collect()
}

/// Static advice derived from goal, level and preferred days
pub fn generate_recommendations(profile: &UserProfile) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    match profile.goal {
        Goal::WeightLoss => recommendations.extend(
            [
                "Doing strength training after cardio burns fat more effectively",
                "Drink plenty of water before and after each workout",
                "Aim for at least 150 minutes of moderate-intensity cardio per week",
            ]
            .map(String::from),
        ),
        Goal::MuscleGain => {
            recommendations.extend(
                [
                    "Eat protein within 30 minutes after strength training (1.6-2.2g per kg of body weight)",
                    "Sleep and rest are essential for muscle growth (7-9 hours)",
                    "Give each muscle group 48-72 hours of rest before training it again",
                    "Apply progressive overload by gradually increasing weight or reps",
                ]
                .map(String::from),
            );
            if profile.available_days >= 4 {
                recommendations
                    .push("With 4 or more days, an upper/lower body split is recommended".to_string());
            }
        }
        Goal::Endurance => recommendations.extend(
            [
                "Monitor your heart rate and train within your target zone",
                "Replenish fluids and electrolytes during long sessions",
            ]
            .map(String::from),
        ),
        Goal::Maintenance => {}
    }

    match profile.fitness_level {
        FitnessLevel::Beginner => recommendations
            .push("Don't overdo it at first; increase intensity gradually".to_string()),
        FitnessLevel::Advanced => recommendations
            .push("Warm up thoroughly before high-intensity work to prevent injury".to_string()),
        FitnessLevel::Intermediate => {}
    }

    if profile.preferred_days.is_empty() {
        recommendations.push(
            "Set preferred workout days in your profile for a more personalized routine".to_string(),
        );
    } else {
        let days: Vec<&str> = profile.preferred_days.iter().map(|d| d.as_str()).collect();
        recommendations.push(format!(
            "Your plan follows your preferred days ({})",
            days.join(", ")
        ));
        if (profile.preferred_days.len() as u32) < profile.available_days {
            recommendations.push(
                "Additional days were scheduled because you have fewer preferred days than available days"
                    .to_string(),
            );
        }
    }

    recommendations
}
