//! The synthetic data generator.
//!
//! A [`DataGenerator`] fixes a roster of ten factories and their assembly lines at construction time. Every other
//! accessor draws fresh random values on each call, so two consecutive calls return different, but statistically
//! alike, series. Reproducible output is obtained by seeding the generator and anchoring its analysis window:
//!
//! ```
//! use chrono::NaiveDate;
//! use plant_pulse::generator::DataGenerator;
//! use plant_pulse::generator::GeneratorOptions;
//!
//! let anchor = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let options = GeneratorOptions::builder().seed(42).anchor(anchor).build().unwrap();
//! let a = DataGenerator::from_options(&options).unwrap();
//! let b = DataGenerator::from_options(&options).unwrap();
//!
//! assert_eq!(a.factories(), b.factories());
//! assert_eq!(a.quality_metrics(Some(3)), b.quality_metrics(Some(3)));
//! ```

pub(crate) mod roster;
pub(crate) mod sampling;

use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use fieldx::fxstruct;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;
use strum::VariantArray;
use tracing::debug;
use tracing::instrument;

use crate::entity::AssemblyLine;
use crate::entity::BottleneckEntry;
use crate::entity::DelayRecord;
use crate::entity::Factory;
use crate::entity::FinancialRecord;
use crate::entity::InventoryItem;
use crate::entity::KpiData;
use crate::entity::ProductLine;
use crate::entity::ProductionRecord;
use crate::entity::QualityMetric;
use crate::types::invalid_arg;
use crate::types::DelayCategory;
use crate::types::DelayMultiplier;
use crate::types::FactoryId;
use crate::types::Result;
use sampling::jitter;
use sampling::scaled;

/// Default length of the analysis window, in days.
pub const WINDOW_DAYS: u32 = 30;
/// Default number of days covered by [`DataGenerator::delay_data`].
pub const DEFAULT_DELAY_DAYS: u32 = 30;
/// Days in the "month" used for the monthly production KPI.
pub const MONTH_DAYS: u64 = 30;

/// Part catalog stocked at every factory.
pub const PARTS: [&str; 6] = ["Engines", "Transmissions", "Chassis", "Electronics", "Tires", "Batteries"];

const BASE_LOST_REVENUE: f64 = 15_000_000.0;
const DAILY_LOST_REVENUE: f64 = 500_000.0;
const ON_TIME_BASELINE: f64 = 0.95;
const ON_TIME_FLOOR: f64 = 0.7;
const ON_TIME_SLOPE: f64 = 0.2;
const PRODUCTION_JITTER: f64 = 0.2;
const MAX_DELAYS_PER_DAY: u32 = 5;

/// Name, profit margin, units sold, revenue.
const PRODUCT_LINES: [(&str, f64, u64, f64); 5] = [
    ("Sedan", 0.15, 450_000, 13_500_000_000.0),
    ("SUV", 0.22, 380_000, 19_000_000_000.0),
    ("Truck", 0.18, 280_000, 14_000_000_000.0),
    ("Electric", 0.12, 120_000, 6_000_000_000.0),
    ("Hybrid", 0.16, 200_000, 8_000_000_000.0),
];

/// Construction parameters for [`DataGenerator`].
#[derive(Clone, Debug)]
#[fxstruct(no_new, builder, get(copy))]
pub struct GeneratorOptions {
    /// Seed of the random source. OS entropy is used when not set.
    #[fieldx(optional, get(off))]
    seed:        u64,
    /// End of the analysis window. Defaults to the local time of construction.
    #[fieldx(optional, get(off))]
    anchor:      NaiveDateTime,
    /// Length of the analysis window, in days. Production and financial series have one record per day of it.
    #[fieldx(default(WINDOW_DAYS))]
    window_days: u32,
}

impl GeneratorOptions {
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn anchor(&self) -> Option<NaiveDateTime> {
        self.anchor
    }
}

/// Produces a self-consistent fictitious dataset and the KPIs derived from it.
///
/// The roster is immutable once built. The random source lives behind a mutex, which makes a single instance
/// shareable across threads.
#[derive(Debug)]
#[fxstruct(no_new, default(off), get)]
pub struct DataGenerator {
    factories:      Vec<Factory>,
    assembly_lines: Vec<AssemblyLine>,
    #[fieldx(get(copy))]
    start_date:     NaiveDateTime,
    #[fieldx(get(copy))]
    end_date:       NaiveDateTime,
    #[fieldx(get(copy))]
    window_days:    u32,
    #[fieldx(get(off))]
    rng:            Mutex<StdRng>,
}

impl DataGenerator {
    /// Entropy-seeded generator with the window ending now.
    pub fn new() -> Self {
        Self::generate(StdRng::from_os_rng(), Self::default_window())
    }

    /// Reproducible generator with the window ending now. Rosters of two generators with the same seed are equal.
    pub fn seeded(seed: u64) -> Self {
        Self::generate(StdRng::seed_from_u64(seed), Self::default_window())
    }

    /// Shortcut for [`GeneratorOptions::builder`].
    pub fn builder() -> GeneratorOptionsBuilder {
        GeneratorOptions::builder()
    }

    /// Fails when the window is empty or would start before the earliest date `chrono` can represent.
    pub fn from_options(options: &GeneratorOptions) -> Result<Self> {
        let window_days = options.window_days();
        if window_days == 0 {
            return Err(invalid_arg!("window_days", "must be at least 1"));
        }

        let anchor = options.anchor().unwrap_or_else(Self::now);
        let start_date = anchor
            .checked_sub_signed(Duration::days(window_days as i64))
            .ok_or_else(|| invalid_arg!("window_days", "{window_days} days before {anchor} is out of date range"))?;

        let rng = match options.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self::generate(
            rng,
            Window {
                start_date,
                end_date: anchor,
                window_days,
            },
        ))
    }

    fn now() -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn default_window() -> Window {
        let end_date = Self::now();
        Window {
            start_date: end_date - Duration::days(WINDOW_DAYS as i64),
            end_date,
            window_days: WINDOW_DAYS,
        }
    }

    fn generate(mut rng: StdRng, window: Window) -> Self {
        let factories = roster::factories(&mut rng);
        let assembly_lines = roster::assembly_lines(&mut rng, &factories);

        debug!(
            factories = factories.len(),
            assembly_lines = assembly_lines.len(),
            start = %window.start_date,
            window_days = window.window_days,
            "Generated roster"
        );

        Self {
            factories,
            assembly_lines,
            start_date: window.start_date,
            end_date: window.end_date,
            window_days: window.window_days,
            rng: Mutex::new(rng),
        }
    }

    #[inline(always)]
    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        f(&mut self.rng.lock())
    }

    /// Date of the `offset`-th day of the analysis window. Offsets past the window must be checked with
    /// `span_fits` first.
    fn window_date(&self, offset: u32) -> NaiveDate {
        (self.start_date + Duration::days(offset as i64)).date()
    }

    fn span_fits(&self, days: u32) -> bool {
        self.start_date.checked_add_signed(Duration::days(days as i64)).is_some()
    }

    pub fn factory(&self, id: FactoryId) -> Option<&Factory> {
        self.factories.iter().find(|f| f.id == id)
    }

    fn filtered(&self, filter: Option<FactoryId>) -> impl Iterator<Item = &Factory> {
        self.factories.iter().filter(move |f| filter.is_none_or(|id| f.id == id))
    }

    /// All factories, or only the one matching the filter.
    pub fn factories_for(&self, filter: Option<FactoryId>) -> Vec<&Factory> {
        self.filtered(filter).collect()
    }

    pub fn assembly_lines_for(&self, filter: Option<FactoryId>) -> Vec<&AssemblyLine> {
        self.assembly_lines
            .iter()
            .filter(|l| filter.is_none_or(|id| l.factory_id == id))
            .collect()
    }

    /// Headline KPIs. The only accessor that draws no random values: it depends on the roster and the multiplier.
    #[instrument(level = "trace", skip(self))]
    pub fn kpi_data(&self, delay_multiplier: DelayMultiplier) -> KpiData {
        let multiplier = delay_multiplier.value();
        let daily_cars: u64 = self.factories.iter().map(|f| f.current_production as u64).sum();
        let on_time = (ON_TIME_BASELINE - (multiplier - 1.0) * ON_TIME_SLOPE).clamp(ON_TIME_FLOOR, 1.0);
        let efficiency = if self.factories.is_empty() {
            0.0
        }
        else {
            self.factories.iter().map(|f| f.efficiency).sum::<f64>() / self.factories.len() as f64
        };

        KpiData {
            total_cars_produced:   daily_cars * MONTH_DAYS,
            total_factories:       self.factories.len() as u32,
            on_time_delivery_rate: on_time,
            lost_revenue:          BASE_LOST_REVENUE * multiplier,
            production_efficiency: efficiency,
        }
    }

    /// Daily production of every filtered factory over the window, factory by factory.
    #[instrument(level = "trace", skip(self))]
    pub fn production_data(&self, factory_id: Option<FactoryId>) -> Vec<ProductionRecord> {
        self.with_rng(|rng| {
            let mut records = Vec::new();
            for factory in self.filtered(factory_id) {
                let daily = factory.current_production as f64;
                for day in 0..self.window_days {
                    let produced = jitter(rng, daily, PRODUCTION_JITTER) as i64;
                    records.push(ProductionRecord {
                        factory_id:        factory.id,
                        factory_name:      factory.name.clone(),
                        date:              self.window_date(day),
                        cars_produced:     produced.max(0) as u32,
                        target_production: factory.production_capacity,
                    });
                }
            }
            records
        })
    }

    /// One record per part of [`PARTS`] for every filtered factory.
    #[instrument(level = "trace", skip(self))]
    pub fn inventory_data(&self, factory_id: Option<FactoryId>) -> Vec<InventoryItem> {
        self.with_rng(|rng| {
            let mut items = Vec::new();
            for factory in self.filtered(factory_id) {
                for part in PARTS {
                    let target: u32 = rng.random_range(500..=1500);
                    items.push(InventoryItem {
                        part_name:     part.to_string(),
                        current_stock: scaled(rng, target, 0.6, 1.2),
                        target_stock:  target,
                        reorder_point: (target as f64 * 0.3) as u32,
                        factory_id:    factory.id,
                    });
                }
            }
            items
        })
    }

    #[instrument(level = "trace", skip(self))]
    pub fn quality_metrics(&self, factory_id: Option<FactoryId>) -> Vec<QualityMetric> {
        self.with_rng(|rng| {
            self.filtered(factory_id)
                .map(|factory| {
                    let total: u32 = rng.random_range(800..=1200);
                    let passed = scaled(rng, total, 0.92, 0.98);
                    QualityMetric::new(factory.id, passed, total - passed)
                })
                .collect()
        })
    }

    /// Zero to five delay incidents per day, starting at the beginning of the window. `days` may exceed the window.
    #[instrument(level = "trace", skip(self))]
    pub fn delay_data(&self, days: u32) -> Result<Vec<DelayRecord>> {
        if days == 0 {
            return Err(invalid_arg!("days", "must be at least 1"));
        }
        if !self.span_fits(days) {
            return Err(invalid_arg!("days", "{days} days from {} is out of date range", self.start_date));
        }

        Ok(self.with_rng(|rng| {
            let mut records = Vec::new();
            for day in 0..days {
                let date = self.window_date(day);
                let count = rng.random_range(0..=MAX_DELAYS_PER_DAY);

                for _ in 0..count {
                    let (Some(factory), Some(category)) =
                        (self.factories.choose(rng), DelayCategory::VARIANTS.choose(rng))
                    else {
                        break;
                    };
                    let duration: u32 = rng.random_range(1..=24);
                    let hourly_cost = rng.random_range(50_000.0..200_000.0);

                    records.push(DelayRecord {
                        date,
                        factory_id: factory.id,
                        factory_name: factory.name.clone(),
                        category: *category,
                        duration_hours: duration,
                        financial_impact: duration as f64 * hourly_cost,
                    });
                }
            }
            records
        }))
    }

    /// Daily lost revenue over the window, scaled by the multiplier with ±20% jitter.
    #[instrument(level = "trace", skip(self))]
    pub fn financial_data(&self, delay_multiplier: DelayMultiplier) -> Vec<FinancialRecord> {
        let base = DAILY_LOST_REVENUE * delay_multiplier.value();
        self.with_rng(|rng| {
            (0..self.window_days)
                .map(|day| FinancialRecord::split(self.window_date(day), base * rng.random_range(0.8..1.2)))
                .collect()
        })
    }

    /// The static product catalog.
    pub fn product_lines(&self) -> Vec<ProductLine> {
        PRODUCT_LINES
            .iter()
            .map(|(name, profit_margin, units_sold, revenue)| ProductLine {
                name:          name.to_string(),
                profit_margin: *profit_margin,
                units_sold:    *units_sold,
                revenue:       *revenue,
            })
            .collect()
    }

    /// Incident counts per delay cause, one entry per [`DelayCategory`] in declaration order.
    #[instrument(level = "trace", skip(self))]
    pub fn bottleneck_data(&self) -> Vec<BottleneckEntry> {
        self.with_rng(|rng| {
            DelayCategory::VARIANTS
                .iter()
                .map(|category| {
                    let (low, high) = incident_range(*category);
                    BottleneckEntry {
                        category:  *category,
                        incidents: rng.random_range(low..=high),
                    }
                })
                .collect()
        })
    }
}

struct Window {
    start_date:  NaiveDateTime,
    end_date:    NaiveDateTime,
    window_days: u32,
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn incident_range(category: DelayCategory) -> (u32, u32) {
    match category {
        DelayCategory::SupplierIssues => (25, 35),
        DelayCategory::TransportBreakdown => (15, 25),
        DelayCategory::Customs => (10, 20),
        DelayCategory::Weather => (5, 15),
        DelayCategory::EquipmentFailure => (20, 30),
    }
}
