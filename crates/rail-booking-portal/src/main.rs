//! Railway reservation portal

#![warn(missing_docs)]

mod render;
mod session;
mod settings;

use std::io;
use std::path::PathBuf;

use eyre::{eyre, Result, WrapErr};
use rail_booking_core::Config;
use session::ReservationSession;
use settings::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line options
///
/// Every option overrides the corresponding value of the settings file.
#[derive(Debug, Default, PartialEq, Eq)]
struct Opts {
    /// Settings file to use instead of looking for one
    config: Option<PathBuf>,
    /// Seed for provisioning the coaches
    seed: Option<u64>,
    /// Number of coaches per travel class
    coaches: Option<usize>,
    /// Seats per coach
    ceiling: Option<u32>,
    /// Maximum number of tickets per booking
    cap: Option<u32>,
}

impl Opts {
    fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut opts = Opts::default();

        let mut option: Option<String> = None;
        for arg in args {
            if let Some(opt) = option.take() {
                match opt.as_str() {
                    "-config" => opts.config = Some(PathBuf::from(arg)),
                    "-seed" => {
                        let seed = arg.parse::<u64>().wrap_err("-seed takes a decimal u64")?;
                        opts.seed = Some(seed);
                    }
                    "-coaches" => {
                        let coaches = arg
                            .parse::<usize>()
                            .wrap_err("-coaches takes a decimal usize")?;
                        opts.coaches = Some(coaches);
                    }
                    "-ceiling" => {
                        let ceiling = arg.parse::<u32>().wrap_err("-ceiling takes a decimal u32")?;
                        opts.ceiling = Some(ceiling);
                    }
                    "-cap" => {
                        let cap = arg.parse::<u32>().wrap_err("-cap takes a decimal u32")?;
                        opts.cap = Some(cap);
                    }
                    _ => return Err(eyre!("unknown option {opt}")),
                }
            } else {
                option = Some(arg);
            }
        }
        if let Some(opt) = option {
            return Err(eyre!("option {opt} is missing its value"));
        }

        Ok(opts)
    }

    /// Override the values of `config` given on the command line.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(coaches) = self.coaches {
            config.coaches_per_class = coaches;
        }
        if let Some(ceiling) = self.ceiling {
            config.seat_ceiling = ceiling;
        }
        if let Some(cap) = self.cap {
            config.per_request_cap = cap;
        }
        config
    }
}

fn init_tracing() {
    // Logs go to stderr so they do not mix with the menu
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let opts = Opts::from_args(std::env::args().skip(1))?;

    let mut settings = match &opts.config {
        Some(path) => Settings::load(path)?,
        None => Settings::discover()?,
    };
    settings.apply_env()?;
    if let Some(path) = &settings.path {
        tracing::info!(path = %path.display(), "loaded settings");
    }

    let config = opts.apply(settings.booking);
    let registry = rail_booking_engine::launch(&config).wrap_err("invalid booking configuration")?;

    ReservationSession::new(registry, io::stdin().lock(), io::stdout().lock()).run()?;
    Ok(())
}
