//! The `plant-pulse` command line application.

mod report;

use std::ffi::OsString;
use std::fmt::Display;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::CommandFactory;
use clap::Parser;
use clap::ValueEnum;
use fieldx::fxstruct;
use garde::Validate;
use serde_json::Value;
use strum::Display as StrumDisplay;
use tracing::info;
use tracing::instrument;

use crate::dashboard::Dashboard;
use crate::dashboard::DashboardSnapshot;
use crate::dashboard::DashboardState;
use crate::dashboard::MULTIPLIER_RANGE;
use crate::generator::DataGenerator;
use crate::generator::DEFAULT_DELAY_DAYS;
use crate::types::DelayMultiplier;
use crate::types::FactoryId;

/// Dashboard section to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    /// KPI cards.
    Overview,
    /// Production, assembly lines, inventory and quality.
    Factories,
    /// Factory locations, delays and bottlenecks.
    Logistics,
    /// Lost revenue, delay costs and product lines.
    Financial,
    All,
}

impl Section {
    /// Snapshot fields belonging to the section.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Section::Overview => &["state", "kpi", "cards"],
            Section::Factories => &["production", "assembly_lines", "inventory", "quality"],
            Section::Logistics => &["factories", "delay_impact", "bottlenecks"],
            Section::Financial => &["financial", "costs", "product_lines", "financial_summary"],
            Section::All => &[],
        }
    }

    fn includes(&self, other: Section) -> bool {
        *self == Section::All || *self == other
    }
}

#[derive(Debug, Clone, clap::Parser, Validate)]
#[fxstruct(no_new, get(copy))]
#[clap(about, version, author, name = "plant-pulse")]
pub struct Cli {
    /// Seed of the random source. Runs with the same seed on the same day print the same data.
    #[clap(long, env = "PLANT_PULSE_SEED")]
    #[garde(skip)]
    seed: Option<u64>,

    /// Limit factory-level data to a single factory.
    #[clap(long, short, env = "PLANT_PULSE_FACTORY")]
    #[garde(range(min = 1))]
    factory: Option<FactoryId>,

    /// Scale applied to the simulated delay impact.
    #[clap(long, short = 'm', env = "PLANT_PULSE_DELAY_MULTIPLIER", default_value_t = 1.0)]
    #[garde(custom(Self::within(&MULTIPLIER_RANGE)))]
    delay_multiplier: f64,

    /// Number of days of delay incidents to sample.
    #[clap(long, env = "PLANT_PULSE_DAYS", default_value_t = DEFAULT_DELAY_DAYS)]
    #[garde(range(min = 1))]
    days: u32,

    #[clap(long, short, env = "PLANT_PULSE_SECTION", value_enum, default_value_t = Section::All)]
    #[garde(skip)]
    section: Section,

    /// Print the snapshot as JSON instead of tables.
    #[clap(long, env = "PLANT_PULSE_JSON", default_value_t = false)]
    #[garde(skip)]
    json: bool,

    /// Write log records into this file instead of stderr.
    #[clap(long, env = "PLANT_PULSE_LOG_FILE")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn within<'a, T: PartialOrd + Display>(
        range: &'a std::ops::RangeInclusive<T>,
    ) -> impl FnOnce(&T, &()) -> garde::Result + 'a {
        move |value, _| {
            if range.contains(value) {
                Ok(())
            }
            else {
                Err(garde::Error::new(format!(
                    "{value} is outside of {}..={}",
                    range.start(),
                    range.end()
                )))
            }
        }
    }

    /// Parses and validates the arguments. Validation failures are reported as clap errors.
    pub fn validated_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;
        if let Err(err) = cli.validate() {
            return Err(Self::command().error(ErrorKind::InvalidValue, err));
        }
        Ok(cli)
    }
}

#[derive(Debug)]
pub struct PulseApp {
    cli:       Cli,
    dashboard: Dashboard,
}

impl PulseApp {
    pub fn new(cli: Cli) -> anyhow::Result<Self> {
        let generator = Arc::new(match cli.seed() {
            Some(seed) => DataGenerator::seeded(seed),
            None => DataGenerator::new(),
        });

        let state = DashboardState::default()
            .with_factory_filter(cli.factory())
            .with_delay_multiplier(DelayMultiplier::new(cli.delay_multiplier())?)
            .with_delay_days(cli.days());

        Ok(Self {
            dashboard: Dashboard::with_state(generator, state),
            cli,
        })
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Renders a snapshot and prints the selected section of it.
    #[instrument(level = "debug", skip(self, out))]
    pub fn execute(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let snapshot = self.dashboard.snapshot().context("failed to render the dashboard")?;
        let section = self.cli.section();

        if self.cli.json() {
            serde_json::to_writer_pretty(&mut *out, &Self::json_section(&snapshot, section)?)?;
            writeln!(out)?;
        }
        else {
            write!(out, "{}", report::render(&snapshot, section))?;
        }

        out.flush()?;
        Ok(())
    }

    fn json_section(snapshot: &DashboardSnapshot, section: Section) -> anyhow::Result<Value> {
        let mut value = serde_json::to_value(snapshot)?;
        if section != Section::All {
            if let Value::Object(map) = &mut value {
                map.retain(|key, _| section.keys().contains(&key.as_str()));
            }
        }
        Ok(value)
    }

    fn setup_tracing(cli: &Cli) -> anyhow::Result<()> {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        let (dest_writer, ansi) = if let Some(log_file) = cli.log_file() {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_file)
                .with_context(|| format!("failed to open log file {}", log_file.display()))?;
            (Box::new(file) as Box<dyn io::Write + Send>, false)
        }
        else {
            (Box::new(io::stderr()) as Box<dyn io::Write + Send>, true)
        };

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(ansi)
                    .with_writer(Mutex::new(dest_writer)),
            )
            .try_init()
            .context("failed to initialize tracing")?;

        info!("Tracing initialized");

        Ok(())
    }

    pub fn run() -> anyhow::Result<()> {
        let cli = match Cli::validated_from(std::env::args_os()) {
            Ok(cli) => cli,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    err.print()?;
                    return Ok(());
                }
                _ => err.exit(),
            },
        };

        Self::setup_tracing(&cli)?;

        let app = Self::new(cli)?;
        app.execute(&mut io::stdout().lock())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::validated_from(["plant-pulse"]).unwrap();
        assert_eq!(cli.seed(), None);
        assert_eq!(cli.factory(), None);
        assert_eq!(cli.delay_multiplier(), 1.0);
        assert_eq!(cli.days(), 30);
        assert_eq!(cli.section(), Section::All);
        assert!(!cli.json());
        assert!(cli.log_file().is_none());
    }

    #[test]
    fn section_keys_are_snapshot_fields() {
        let app = PulseApp::new(Cli::validated_from(["plant-pulse", "--seed", "5"]).unwrap()).unwrap();
        let snapshot = app.dashboard.snapshot().unwrap();
        let full = PulseApp::json_section(&snapshot, Section::All).unwrap();
        let Value::Object(map) = full
        else {
            panic!("snapshot must serialize into an object");
        };

        let mut covered = 0;
        for section in [Section::Overview, Section::Factories, Section::Logistics, Section::Financial] {
            for key in section.keys() {
                assert!(map.contains_key(*key), "unknown snapshot field {key}");
                covered += 1;
            }
            assert!(Section::All.includes(section));
        }
        assert_eq!(covered, map.len());
    }

    #[test]
    fn section_names() {
        assert_eq!(Section::Logistics.to_string(), "logistics");
        assert_eq!(Section::from_str("financial", false).unwrap(), Section::Financial);
    }
}
