use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flywheel_core::{AppConfig, PickerField, PickerMode};

mod commands;

#[derive(Parser)]
#[command(name = "flywheel")]
#[command(author, version, about = "An inertial wheel picker for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI picker
    Tui,
    /// Drive a single wheel headlessly and print the event trace
    Simulate {
        /// Number of items on the wheel
        #[arg(long, default_value_t = 60)]
        count: usize,
        /// Wrap around at the ends
        #[arg(long)]
        cyclic: bool,
        /// Starting index
        #[arg(long, default_value_t = 0)]
        start: i64,
        /// Emit the trace as JSON lines
        #[arg(long)]
        json: bool,
        #[command(subcommand)]
        action: SimulateAction,
    },
    /// Resolve a date without the TUI
    Pick {
        /// Starting date, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD"
        #[arg(long)]
        date: Option<String>,
        /// Field to step
        #[arg(long, value_enum, default_value_t = FieldArg::Day)]
        field: FieldArg,
        /// Steps to apply (negative moves to earlier values)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        steps: i64,
        /// Picker layout
        #[arg(long, value_enum, default_value_t = ModeArg::YmdHm)]
        mode: ModeArg,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum SimulateAction {
    /// Drag by a pixel distance, then release
    Drag {
        /// Pointer travel in pixels (positive spins toward later items)
        #[arg(long, default_value_t = 120, allow_hyphen_values = true)]
        distance: i32,
    },
    /// Release a fling at the given velocity
    Fling {
        /// Release velocity in px/s (positive spins toward later items)
        #[arg(long, default_value_t = 1800.0, allow_hyphen_values = true)]
        velocity: f64,
    },
    /// Animate to an absolute index
    Set {
        /// Target index
        #[arg(allow_hyphen_values = true)]
        index: i64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Write the default configuration file
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl FieldArg {
    fn field(self) -> PickerField {
        match self {
            FieldArg::Year => PickerField::Year,
            FieldArg::Month => PickerField::Month,
            FieldArg::Day => PickerField::Day,
            FieldArg::Hour => PickerField::Hour,
            FieldArg::Minute => PickerField::Minute,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    YmdHm,
    YmdH,
    Ymd,
    Ym,
    Y,
    Hm,
}

impl ModeArg {
    fn mode(self) -> PickerMode {
        match self {
            ModeArg::YmdHm => PickerMode::YmdHm,
            ModeArg::YmdH => PickerMode::YmdH,
            ModeArg::Ymd => PickerMode::Ymd,
            ModeArg::Ym => PickerMode::Ym,
            ModeArg::Y => PickerMode::Y,
            ModeArg::Hm => PickerMode::Hm,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stay quiet in TUI mode unless RUST_LOG asks
    let tui_mode = matches!(cli.command, Some(Commands::Tui) | None);
    let default_filter = if tui_mode { "off" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Handle commands
    match cli.command {
        Some(Commands::Tui) | None => commands::tui::run(config).await,
        Some(Commands::Simulate {
            count,
            cyclic,
            start,
            json,
            action,
        }) => {
            let opts = commands::simulate::SimulateOpts {
                count,
                cyclic,
                start,
                json,
            };
            match action {
                SimulateAction::Drag { distance } => {
                    commands::simulate::drag(&config, &opts, distance)
                }
                SimulateAction::Fling { velocity } => {
                    commands::simulate::fling(&config, &opts, velocity)
                }
                SimulateAction::Set { index } => commands::simulate::set(&config, &opts, index),
            }
        }
        Some(Commands::Pick {
            date,
            field,
            steps,
            mode,
        }) => commands::pick::run(&config, date.as_deref(), field.field(), steps, mode.mode()),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init => commands::config::init(),
        },
    }
}
