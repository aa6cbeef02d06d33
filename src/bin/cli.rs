//! Fitcoach CLI - Command-line interface for routines and weight forecasts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use fitcoach::launcher::{LaunchConfig, LaunchOutcome, Launcher, ProcessSpec};
use fitcoach::models::Intensity;
use fitcoach::predictor::MAX_DAYS_AHEAD;
use fitcoach::{
    load_weight_records, Exercise, FitnessLevel, Goal, RoutineGenerator, RoutinePlan, UserProfile,
    Weekday, WeightPredictionModel,
};

const DEFAULT_PREDICTION_DAYS: u32 = 14;
const API_BINARY: &str = "fitcoach-api";

#[derive(Parser)]
#[command(name = "fitcoach")]
#[command(author, version, about = "Fitness coaching CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly workout routine
    Routine {
        /// beginner, intermediate or advanced
        #[arg(short, long, default_value = "beginner")]
        level: FitnessLevel,

        /// weight_loss, muscle_gain, endurance or maintenance
        #[arg(short, long, default_value = "maintenance")]
        goal: Goal,

        /// Workout days per week
        #[arg(short, long, default_value = "3")]
        days: u32,

        /// Minutes per session
        #[arg(short, long, default_value = "60")]
        minutes: u32,

        /// Preferred days, comma separated (e.g. mon,wed,fri)
        #[arg(short, long, value_delimiter = ',')]
        preferred: Vec<Weekday>,

        /// Seed for reproducible exercise selection
        #[arg(long)]
        seed: Option<u64>,

        /// Print the routine as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forecast body weight from a CSV history (columns: date, weight)
    PredictWeight {
        /// Weight history CSV
        #[arg(short, long)]
        csv: PathBuf,

        /// Days to forecast
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_PREDICTION_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=MAX_DAYS_AHEAD as i64)
        )]
        days: u32,

        /// Print predictions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the API server and the frontend dev server together
    Launch {
        /// Backend command (defaults to the API binary next to this CLI)
        #[arg(long)]
        backend: Option<String>,

        /// Frontend command
        #[arg(long, default_value = "npm run dev")]
        frontend: String,

        /// Frontend working directory
        #[arg(long, default_value = ".")]
        frontend_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.interactive {
        print_banner();
        run_interactive()?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Routine {
                level,
                goal,
                days,
                minutes,
                preferred,
                seed,
                json,
            } => {
                let profile = UserProfile {
                    fitness_level: level,
                    goal,
                    available_days: days,
                    time_per_session: minutes,
                    preferred_days: preferred,
                };
                if !json {
                    print_banner();
                }
                run_routine(&profile, seed, json)?;
            }
            Commands::PredictWeight { csv, days, json } => {
                if !json {
                    print_banner();
                }
                run_predict_weight(&csv, days, json)?;
            }
            Commands::Launch {
                backend,
                frontend,
                frontend_dir,
            } => {
                print_banner();
                run_launch(backend, &frontend, &frontend_dir)?;
            }
        }
    } else {
        print_banner();
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn print_banner() {
    println!(
        "{}",
        format!("Fitcoach CLI v{}", env!("CARGO_PKG_VERSION")).cyan().bold()
    );
    println!();
}

fn run_routine(profile: &UserProfile, seed: Option<u64>, json: bool) -> Result<()> {
    let plan = match seed {
        Some(seed) => RoutineGenerator::seeded(seed).generate_weekly_routine(profile),
        None => RoutineGenerator::new().generate_weekly_routine(profile),
    };

    if json {
        let output = serde_json::to_string_pretty(&plan).context("Failed to serialize routine")?;
        println!("{}", output);
    } else {
        print_routine(&plan);
    }
    Ok(())
}

fn print_routine(plan: &RoutinePlan) {
    let profile = &plan.user_profile;
    println!(
        "{}: {} / {} / {} days / {} min",
        "Routine".green(),
        profile.fitness_level,
        profile.goal,
        plan.workout_days().len(),
        profile.time_per_session
    );
    println!();

    for day in Weekday::ALL {
        let Some(daily) = plan.weekly_routine.get(&day) else {
            continue;
        };
        if daily.is_rest() {
            println!("{}", format!("{:<10} rest", day.as_str()).dimmed());
            continue;
        }

        let minutes = daily.total_time.unwrap_or(profile.time_per_session);
        println!("{} ({} min)", day.as_str().yellow().bold(), minutes);
        for exercise in &daily.exercises {
            println!("  {}", describe_exercise(exercise));
        }
    }
    println!();

    println!("{}", "Recommendations:".yellow().bold());
    for tip in &plan.recommendations {
        println!("  {} {}", "→".green(), tip);
    }
}

fn describe_exercise(exercise: &Exercise) -> String {
    match exercise {
        Exercise::Cardio {
            name,
            duration,
            intensity,
        } => {
            let label = match intensity {
                Intensity::Low => "low",
                Intensity::Medium => "medium",
                Intensity::High => "high",
            };
            format!("{:<12} {:<22} {} min, {} intensity", "cardio", name, duration, label)
        }
        Exercise::Strength {
            name,
            sets,
            rest,
            focus,
        } => {
            let mut line = format!("{:<12} {:<22} {}, rest {}", "strength", name, sets, rest);
            if let Some(focus) = focus {
                line.push_str(&format!(" [{}]", focus));
            }
            line
        }
        Exercise::Flexibility { name, duration } => {
            format!("{:<12} {:<22} {} min", "flexibility", name, duration)
        }
    }
}

fn run_predict_weight(csv_path: &Path, days: u32, json: bool) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    if json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid progress template")?,
    );
    pb.set_message("Loading weight history...");

    let records = load_weight_records(csv_path)
        .with_context(|| format!("Failed to load CSV from {:?}", csv_path))?;

    pb.set_message("Fitting trend model...");
    let mut model = WeightPredictionModel::new();
    model
        .train(&records)
        .with_context(|| format!("Failed to train on {} records", records.len()))?;
    let predictions = model
        .predict_future_weight(&records, days)
        .context("Prediction failed")?;

    pb.finish_and_clear();

    if json {
        let output =
            serde_json::to_string_pretty(&predictions).context("Failed to serialize predictions")?;
        println!("{}", output);
        return Ok(());
    }

    let last = records
        .iter()
        .max_by_key(|r| r.date)
        .map(|r| (r.date, r.weight));
    println!(
        "{}: {} records from {}",
        "Loaded".green(),
        records.len(),
        csv_path.display()
    );
    if let Some((date, weight)) = last {
        println!("Last weigh-in: {} {:.1} kg", date, weight);
    }
    println!();

    println!("{}", "Forecast:".yellow().bold());
    println!("{:>12} {:>10} {:>8}", "Date", "Weight", "Change");
    println!("{}", "-".repeat(32));

    let baseline = last.map(|(_, w)| w).unwrap_or_default();
    for point in &predictions {
        let change = point.predicted_weight - baseline;
        let change_str = format!("{:+.1}", change);
        let change_colored = if change > 0.0 {
            change_str.red()
        } else if change < 0.0 {
            change_str.green()
        } else {
            change_str.normal()
        };
        println!(
            "{:>12} {:>10.1} {:>8}",
            point.date.to_string(),
            point.predicted_weight,
            change_colored
        );
    }

    Ok(())
}

fn api_binary_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the current executable")?;
    let mut path = exe.with_file_name(API_BINARY);
    if cfg!(windows) {
        path.set_extension("exe");
    }
    Ok(path)
}

fn run_launch(backend: Option<String>, frontend: &str, frontend_dir: &Path) -> Result<()> {
    let backend = match backend {
        Some(command) => ProcessSpec::from_command_line("BACKEND", &command)?,
        None => {
            let path = api_binary_path()?;
            ProcessSpec::new("BACKEND", &path.to_string_lossy(), &[])
        }
    };
    let frontend = ProcessSpec::from_command_line("FRONTEND", frontend)?.in_dir(frontend_dir);

    println!("{}: {}", "Backend".green(), backend.program);
    println!(
        "{}: {} (in {})",
        "Frontend".green(),
        frontend.program,
        frontend_dir.display()
    );
    println!("Press Ctrl-C to stop both.");
    println!();

    let config = LaunchConfig {
        backend,
        frontend,
        ..LaunchConfig::default()
    };

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let outcome = rt
        .block_on(Launcher::new(config).run())
        .context("Launcher failed")?;

    match outcome {
        LaunchOutcome::Interrupted => println!("\n{}", "Stopped.".yellow()),
        LaunchOutcome::Exited { name, status } => {
            println!("\n{}: {} exited ({})", "Stopped".yellow(), name, status)
        }
    }
    Ok(())
}

fn run_interactive() -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!();

    let theme = ColorfulTheme::default();

    loop {
        let options = vec!["Generate a routine", "Forecast weight", "Quit"];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                let level_idx = Select::with_theme(&theme)
                    .with_prompt("Fitness level")
                    .items(&FitnessLevel::ALL.map(|l| l.as_str()))
                    .default(0)
                    .interact()?;

                let goal_idx = Select::with_theme(&theme)
                    .with_prompt("Goal")
                    .items(&Goal::ALL.map(|g| g.as_str()))
                    .default(0)
                    .interact()?;

                let days: u32 = Input::with_theme(&theme)
                    .with_prompt("Workout days per week")
                    .default(3)
                    .interact_text()?;

                let minutes: u32 = Input::with_theme(&theme)
                    .with_prompt("Minutes per session")
                    .default(60)
                    .interact_text()?;

                let preferred_idx = MultiSelect::with_theme(&theme)
                    .with_prompt("Preferred days (space to toggle, enter to skip)")
                    .items(&Weekday::ALL.map(|d| d.as_str()))
                    .interact()?;

                let profile = UserProfile {
                    fitness_level: FitnessLevel::ALL[level_idx],
                    goal: Goal::ALL[goal_idx],
                    available_days: days,
                    time_per_session: minutes,
                    preferred_days: preferred_idx.into_iter().map(|i| Weekday::ALL[i]).collect(),
                };

                println!();
                run_routine(&profile, None, false)?;
                println!();
            }
            1 => {
                let csv: String = Input::with_theme(&theme)
                    .with_prompt("Weight history CSV")
                    .interact_text()?;

                let days: u32 = Input::with_theme(&theme)
                    .with_prompt(format!("Days to forecast (1-{})", MAX_DAYS_AHEAD))
                    .default(DEFAULT_PREDICTION_DAYS)
                    .validate_with(|d: &u32| {
                        if (1..=MAX_DAYS_AHEAD).contains(d) {
                            Ok(())
                        } else {
                            Err(format!("Enter a value between 1 and {}", MAX_DAYS_AHEAD))
                        }
                    })
                    .interact_text()?;

                println!();
                if let Err(e) = run_predict_weight(Path::new(csv.trim()), days, false) {
                    println!("{}: {:#}", "Error".red(), e);
                }
                println!();
            }
            2 => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
