use std::sync::Arc;
use std::sync::Mutex;

use chrono::Duration;
use plant_pulse::dashboard::ALL_FACTORIES;
use plant_pulse::prelude::*;

type Log = Arc<Mutex<Vec<(&'static str, StateChange, DashboardState)>>>;

fn recorder(log: &Log, name: &'static str) -> impl FnMut(StateChange, &DashboardSnapshot) + Send + 'static {
    let log = log.clone();
    move |change, snapshot| {
        log.lock().unwrap().push((name, change, snapshot.state.clone()));
    }
}

#[test]
fn subscribers_follow_state() {
    let log: Log = Arc::default();
    let generator = Arc::new(DataGenerator::seeded(8));
    let mut dashboard = Dashboard::new(generator.clone());

    dashboard.subscribe(recorder(&log, "kpi"));
    dashboard.subscribe(recorder(&log, "charts"));

    let m = DelayMultiplier::new(2.5).unwrap();
    let snapshot = dashboard.set_delay_multiplier(m).unwrap();
    assert_eq!(snapshot.kpi.lost_revenue, 37_500_000.0);
    assert_eq!(snapshot.kpi.on_time_delivery_rate, 0.7);

    dashboard.set_factory_filter(Some(9)).unwrap();

    let start = generator.start_date().date();
    let range = TimeRange::new(start + Duration::days(10), start + Duration::days(19)).unwrap();
    let snapshot = dashboard.set_time_range(Some(range)).unwrap();
    assert_eq!(snapshot.financial.len(), 10);
    assert_eq!(snapshot.production.len(), 1);
    assert_eq!(snapshot.production[0].days, 10);
    assert_eq!(snapshot.production[0].factory_name, "Birmingham Factory");

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 6);
    assert_eq!(
        log.iter().map(|(name, ..)| *name).collect::<Vec<_>>(),
        ["kpi", "charts", "kpi", "charts", "kpi", "charts"]
    );
    assert_eq!(log[0].1, StateChange::DelayMultiplier(m));
    assert_eq!(log[2].1, StateChange::FactoryFilter(Some(9)));
    assert_eq!(log[4].1, StateChange::TimeRange(Some(range)));

    let last = &log[5].2;
    assert_eq!(last.delay_multiplier(), m);
    assert_eq!(last.factory_filter(), Some(9));
    assert_eq!(last.time_range(), Some(range));
    assert_eq!(dashboard.state(), last);
}

#[test]
fn clearing_selections() {
    let mut dashboard = Dashboard::new(Arc::new(DataGenerator::seeded(4)));
    dashboard.set_factory_filter(Some(1)).unwrap();

    let snapshot = dashboard.set_factory_filter(None).unwrap();
    assert_eq!(snapshot.production.len(), 10);
    assert_eq!(snapshot.factories.len(), 10);

    let snapshot = dashboard.set_time_range(None).unwrap();
    assert_eq!(snapshot.financial.len(), 30);
}

#[test]
fn refresh_resamples() {
    let mut dashboard = Dashboard::new(Arc::new(DataGenerator::seeded(4)));
    let a = dashboard.refresh().unwrap();
    let b = dashboard.refresh().unwrap();

    // The roster is fixed, the samples are not.
    assert_eq!(a.factories, b.factories);
    assert_eq!(a.kpi, b.kpi);
    assert_ne!(a.financial, b.financial);
}

#[test]
fn selector_options() {
    let dashboard = Dashboard::new(Arc::new(DataGenerator::new()));
    let options = dashboard.factory_options();

    assert_eq!(options[0].label, ALL_FACTORIES);
    assert_eq!(
        options.iter().skip(1).filter_map(|o| o.value).collect::<Vec<_>>(),
        (1..=10).collect::<Vec<_>>()
    );
}

#[test]
fn snapshot_serializes() {
    let snapshot = Dashboard::new(Arc::new(DataGenerator::seeded(1))).snapshot().unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["state"]["delay_multiplier"], 1.0);
    assert_eq!(json["state"]["factory_filter"], serde_json::Value::Null);
    assert_eq!(json["kpi"]["total_factories"], 10);
    assert_eq!(json["cards"]["total_factories"], "10");
    assert_eq!(json["bottlenecks"][0]["category"], "supplier_issues");
    assert_eq!(json["product_lines"].as_array().map(Vec::len), Some(5));
}
