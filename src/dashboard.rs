//! Dashboard state and change propagation.
//!
//! A [`Dashboard`] owns the user-selected [`DashboardState`] and an ordered list of [`Subscriber`]s. Every state change
//! renders a single fresh [`DashboardSnapshot`] and hands it to each subscriber in registration order. Widgets never
//! re-sample the generator on their own, so all of them observe the same data for a given change.

use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::NaiveDate;
use fieldx::fxstruct;
use serde::Serialize;
use tracing::debug;
use tracing::instrument;

use crate::entity::BottleneckEntry;
use crate::entity::Factory;
use crate::entity::FinancialRecord;
use crate::entity::KpiData;
use crate::entity::ProductLine;
use crate::format::KpiCards;
use crate::generator::DataGenerator;
use crate::generator::DEFAULT_DELAY_DAYS;
use crate::summary;
use crate::summary::AssemblyLineRow;
use crate::summary::CostBreakdown;
use crate::summary::DailyImpact;
use crate::summary::FactoryProduction;
use crate::summary::FinancialSummary;
use crate::summary::PartStock;
use crate::summary::QualityTotals;
use crate::summary::ASSEMBLY_TABLE_ROWS;
use crate::types::invalid_arg;
use crate::types::DelayMultiplier;
use crate::types::FactoryId;
use crate::types::Result;

/// Values the delay multiplier slider accepts.
pub const MULTIPLIER_RANGE: RangeInclusive<f64> = 0.5..=3.0;

/// Label of the factory selector entry that removes the filter.
pub const ALL_FACTORIES: &str = "All Factories";

/// Inclusive date interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    start: NaiveDate,
    end:   NaiveDate,
}

impl TimeRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(invalid_arg!("time_range", "start {start} is after end {end}"));
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[fxstruct(no_new, default(off), get(copy))]
pub struct DashboardState {
    factory_filter:   Option<FactoryId>,
    delay_multiplier: DelayMultiplier,
    /// When set, only records dated within the range make it into the date-based series.
    time_range:       Option<TimeRange>,
    /// Number of days of delay incidents to sample.
    delay_days:       u32,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            factory_filter:   None,
            delay_multiplier: DelayMultiplier::BASELINE,
            time_range:       None,
            delay_days:       DEFAULT_DELAY_DAYS,
        }
    }
}

impl DashboardState {
    pub fn with_factory_filter(mut self, factory_filter: Option<FactoryId>) -> Self {
        self.factory_filter = factory_filter;
        self
    }

    pub fn with_delay_multiplier(mut self, delay_multiplier: DelayMultiplier) -> Self {
        self.delay_multiplier = delay_multiplier;
        self
    }

    pub fn with_time_range(mut self, time_range: Option<TimeRange>) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn with_delay_days(mut self, delay_days: u32) -> Self {
        self.delay_days = delay_days;
        self
    }

    fn in_range(&self, date: NaiveDate) -> bool {
        self.time_range.is_none_or(|range| range.contains(date))
    }
}

/// What caused a snapshot to be rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StateChange {
    FactoryFilter(Option<FactoryId>),
    DelayMultiplier(DelayMultiplier),
    TimeRange(Option<TimeRange>),
    Refresh,
}

/// Everything the dashboard widgets display, rendered in one pass over freshly sampled data.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardSnapshot {
    pub state:             DashboardState,
    pub kpi:               KpiData,
    pub cards:             KpiCards,
    pub production:        Vec<FactoryProduction>,
    pub assembly_lines:    Vec<AssemblyLineRow>,
    pub inventory:         Vec<PartStock>,
    pub quality:           QualityTotals,
    /// Map markers.
    pub factories:         Vec<Factory>,
    pub delay_impact:      Vec<DailyImpact>,
    pub bottlenecks:       Vec<BottleneckEntry>,
    pub financial:         Vec<FinancialRecord>,
    pub costs:             CostBreakdown,
    pub product_lines:     Vec<ProductLine>,
    pub financial_summary: FinancialSummary,
}

impl DashboardSnapshot {
    #[instrument(level = "trace", skip(generator))]
    pub fn render(generator: &DataGenerator, state: &DashboardState) -> Result<Self> {
        let filter = state.factory_filter;
        let multiplier = state.delay_multiplier;

        let kpi = generator.kpi_data(multiplier);

        let production = generator
            .production_data(filter)
            .into_iter()
            .filter(|r| state.in_range(r.date))
            .collect::<Vec<_>>();

        let delays = generator
            .delay_data(state.delay_days)?
            .into_iter()
            .filter(|r| state.in_range(r.date))
            .collect::<Vec<_>>();

        let financial = generator
            .financial_data(multiplier)
            .into_iter()
            .filter(|r| state.in_range(r.date))
            .collect::<Vec<_>>();

        let product_lines = generator.product_lines();

        Ok(Self {
            state: state.clone(),
            cards: KpiCards::from(&kpi),
            kpi,
            production: summary::production_by_factory(&production),
            assembly_lines: summary::assembly_line_rows(generator, filter, ASSEMBLY_TABLE_ROWS),
            inventory: summary::inventory_by_part(&generator.inventory_data(filter)),
            quality: summary::quality_totals(&generator.quality_metrics(filter)),
            factories: generator.factories_for(filter).into_iter().cloned().collect(),
            delay_impact: summary::daily_delay_impact(&delays),
            bottlenecks: generator.bottleneck_data(),
            costs: summary::cost_breakdown(&financial),
            financial_summary: summary::financial_summary(&product_lines, &financial),
            financial,
            product_lines,
        })
    }
}

/// Receiver of dashboard updates.
pub trait Subscriber: Send + 'static {
    fn on_change(&mut self, change: StateChange, snapshot: &DashboardSnapshot);
}

impl<F> Subscriber for F
where
    F: FnMut(StateChange, &DashboardSnapshot) + Send + 'static,
{
    fn on_change(&mut self, change: StateChange, snapshot: &DashboardSnapshot) {
        self(change, snapshot)
    }
}

/// Entry of the factory selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FactoryOption {
    pub label: String,
    pub value: Option<FactoryId>,
}

pub struct Dashboard {
    generator:   Arc<DataGenerator>,
    state:       DashboardState,
    subscribers: Vec<Box<dyn Subscriber>>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Dashboard {
    pub fn new(generator: Arc<DataGenerator>) -> Self {
        Self::with_state(generator, DashboardState::default())
    }

    pub fn with_state(generator: Arc<DataGenerator>, state: DashboardState) -> Self {
        Self {
            generator,
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn generator(&self) -> &Arc<DataGenerator> {
        &self.generator
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Subscribers are notified in the order they were added.
    pub fn subscribe(&mut self, subscriber: impl Subscriber) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// "All Factories" followed by every factory of the roster.
    pub fn factory_options(&self) -> Vec<FactoryOption> {
        std::iter::once(FactoryOption {
            label: ALL_FACTORIES.to_string(),
            value: None,
        })
        .chain(self.generator.factories().iter().map(|f| FactoryOption {
            label: f.name.clone(),
            value: Some(f.id),
        }))
        .collect()
    }

    pub fn snapshot(&self) -> Result<DashboardSnapshot> {
        DashboardSnapshot::render(&self.generator, &self.state)
    }

    pub fn set_factory_filter(&mut self, factory_filter: Option<FactoryId>) -> Result<DashboardSnapshot> {
        let state = self.state.clone().with_factory_filter(factory_filter);
        self.apply(state, StateChange::FactoryFilter(factory_filter))
    }

    /// Only values within [`MULTIPLIER_RANGE`] are accepted.
    pub fn set_delay_multiplier(&mut self, delay_multiplier: DelayMultiplier) -> Result<DashboardSnapshot> {
        if !MULTIPLIER_RANGE.contains(&delay_multiplier.value()) {
            return Err(invalid_arg!(
                "delay_multiplier",
                "{delay_multiplier} is outside of {:.1}..={:.1}",
                MULTIPLIER_RANGE.start(),
                MULTIPLIER_RANGE.end()
            ));
        }
        let state = self.state.clone().with_delay_multiplier(delay_multiplier);
        self.apply(state, StateChange::DelayMultiplier(delay_multiplier))
    }

    pub fn set_time_range(&mut self, time_range: Option<TimeRange>) -> Result<DashboardSnapshot> {
        let state = self.state.clone().with_time_range(time_range);
        self.apply(state, StateChange::TimeRange(time_range))
    }

    /// Re-sample everything with the current state.
    pub fn refresh(&mut self) -> Result<DashboardSnapshot> {
        let state = self.state.clone();
        self.apply(state, StateChange::Refresh)
    }

    // The state is committed only once the snapshot renders.
    fn apply(&mut self, state: DashboardState, change: StateChange) -> Result<DashboardSnapshot> {
        let snapshot = DashboardSnapshot::render(&self.generator, &state)?;
        self.state = state;

        debug!(?change, subscribers = self.subscribers.len(), "Dashboard state changed");

        for subscriber in self.subscribers.iter_mut() {
            subscriber.on_change(change, &snapshot);
        }

        Ok(snapshot)
    }
}
