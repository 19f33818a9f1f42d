//! Aggregations over generator output, one per dashboard widget.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::entity::DelayRecord;
use crate::entity::FinancialRecord;
use crate::entity::InventoryItem;
use crate::entity::ProductLine;
use crate::entity::ProductionRecord;
use crate::entity::QualityMetric;
use crate::generator::DataGenerator;
use crate::types::FactoryId;
use crate::types::FactoryStatus;

/// Number of assembly lines the dashboard table shows.
pub const ASSEMBLY_TABLE_ROWS: usize = 8;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FactoryProduction {
    pub factory_id:   FactoryId,
    pub factory_name: String,
    pub total_cars:   u64,
    pub target_total: u64,
    pub days:         usize,
    pub daily_mean:   f64,
    /// Sample standard deviation of the daily output; zero for less than two days.
    pub daily_std_dev: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartStock {
    pub part_name:     String,
    pub current_stock: u64,
    pub target_stock:  u64,
    /// Number of factories at or below the reorder point for this part.
    pub below_reorder: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct QualityTotals {
    pub passed:    u64,
    pub failed:    u64,
    pub total:     u64,
    pub pass_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailyImpact {
    pub date:             NaiveDate,
    pub incidents:        usize,
    pub financial_impact: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub expedited_shipping: f64,
    pub idle_labor:         f64,
    pub penalties:          f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.expedited_shipping + self.idle_labor + self.penalties
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_revenue: f64,
    pub lost_revenue:  f64,
    pub delay_costs:   f64,
    /// Lost revenue plus delay costs.
    pub net_impact:    f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssemblyLineRow {
    pub factory_name: String,
    pub line_name:    String,
    pub status:       FactoryStatus,
    pub output_rate:  u32,
    pub target_rate:  u32,
    /// Output over target, in percent.
    pub efficiency:   f64,
}

/// Production totals per factory, in ascending factory id order.
pub fn production_by_factory(records: &[ProductionRecord]) -> Vec<FactoryProduction> {
    let mut grouped: BTreeMap<FactoryId, (&str, u64, Vec<f64>)> = BTreeMap::new();

    for record in records {
        let entry = grouped
            .entry(record.factory_id)
            .or_insert_with(|| (record.factory_name.as_str(), 0, Vec::new()));
        entry.1 += record.target_production as u64;
        entry.2.push(record.cars_produced as f64);
    }

    grouped
        .into_iter()
        .map(|(factory_id, (factory_name, target_total, daily))| {
            let std_dev = if daily.len() < 2 { 0.0 } else { daily.iter().std_dev() };
            FactoryProduction {
                factory_id,
                factory_name: factory_name.to_string(),
                total_cars: daily.iter().sum::<f64>() as u64,
                target_total,
                days: daily.len(),
                daily_mean: daily.iter().mean(),
                daily_std_dev: std_dev,
            }
        })
        .collect()
}

/// Stock summed over factories, per part, in the order parts first appear.
pub fn inventory_by_part(items: &[InventoryItem]) -> Vec<PartStock> {
    let mut parts: Vec<PartStock> = Vec::new();

    for item in items {
        let idx = match parts.iter().position(|p| p.part_name == item.part_name) {
            Some(idx) => idx,
            None => {
                parts.push(PartStock {
                    part_name:     item.part_name.clone(),
                    current_stock: 0,
                    target_stock:  0,
                    below_reorder: 0,
                });
                parts.len() - 1
            }
        };

        let part = &mut parts[idx];
        part.current_stock += item.current_stock as u64;
        part.target_stock += item.target_stock as u64;
        if item.needs_reorder() {
            part.below_reorder += 1;
        }
    }

    parts
}

pub fn quality_totals(metrics: &[QualityMetric]) -> QualityTotals {
    let passed: u64 = metrics.iter().map(|m| m.passed as u64).sum();
    let failed: u64 = metrics.iter().map(|m| m.failed as u64).sum();
    let total = passed + failed;

    QualityTotals {
        passed,
        failed,
        total,
        pass_rate: if total == 0 { 0.0 } else { passed as f64 / total as f64 },
    }
}

/// Financial impact of delays summed per day, ascending dates. Days without incidents are absent.
pub fn daily_delay_impact(records: &[DelayRecord]) -> Vec<DailyImpact> {
    let mut days: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();

    for record in records {
        let day = days.entry(record.date).or_default();
        day.0 += 1;
        day.1 += record.financial_impact;
    }

    days.into_iter()
        .map(|(date, (incidents, financial_impact))| DailyImpact {
            date,
            incidents,
            financial_impact,
        })
        .collect()
}

pub fn cost_breakdown(records: &[FinancialRecord]) -> CostBreakdown {
    records.iter().fold(CostBreakdown::default(), |mut acc, record| {
        acc.expedited_shipping += record.cost_expedited_shipping;
        acc.idle_labor += record.cost_idle_labor;
        acc.penalties += record.cost_penalties;
        acc
    })
}

pub fn financial_summary(product_lines: &[ProductLine], records: &[FinancialRecord]) -> FinancialSummary {
    let lost_revenue: f64 = records.iter().map(|r| r.revenue_lost).sum();
    let delay_costs = cost_breakdown(records).total();

    FinancialSummary {
        total_revenue: product_lines.iter().map(|p| p.revenue).sum(),
        lost_revenue,
        delay_costs,
        net_impact: lost_revenue + delay_costs,
    }
}

/// Status rows for the first `limit` assembly lines of the filtered factories.
pub fn assembly_line_rows(
    generator: &DataGenerator,
    factory_id: Option<FactoryId>,
    limit: usize,
) -> Vec<AssemblyLineRow> {
    generator
        .assembly_lines_for(factory_id)
        .into_iter()
        .take(limit)
        .filter_map(|line| {
            let factory = generator.factory(line.factory_id)?;
            Some(AssemblyLineRow {
                factory_name: factory.name.clone(),
                line_name:    line.name.clone(),
                status:       line.status,
                output_rate:  line.output_rate,
                target_rate:  line.target_rate,
                efficiency:   line.efficiency() * 100.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::DelayCategory;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn production(factory_id: FactoryId, day: u32, cars: u32) -> ProductionRecord {
        ProductionRecord {
            factory_id,
            factory_name: format!("Factory {factory_id}"),
            date: date(day),
            cars_produced: cars,
            target_production: 1_000,
        }
    }

    #[test]
    fn production_grouping() {
        let records = vec![
            production(2, 1, 900),
            production(1, 1, 800),
            production(2, 2, 1_100),
            production(1, 2, 800),
        ];
        let summary = production_by_factory(&records);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].factory_id, 1);
        assert_eq!(summary[0].total_cars, 1_600);
        assert_eq!(summary[0].daily_std_dev, 0.0);
        assert_eq!(summary[1].factory_name, "Factory 2");
        assert_eq!(summary[1].total_cars, 2_000);
        assert_eq!(summary[1].target_total, 2_000);
        assert_eq!(summary[1].daily_mean, 1_000.0);
        assert!((summary[1].daily_std_dev - 141.42135623730951).abs() < 1e-9);
    }

    #[test]
    fn single_day_has_no_spread() {
        let summary = production_by_factory(&[production(3, 1, 500)]);
        assert_eq!(summary[0].daily_std_dev, 0.0);
        assert_eq!(summary[0].daily_mean, 500.0);
    }

    #[test]
    fn inventory_grouping() {
        let item = |part: &str, current, target, factory_id| InventoryItem {
            part_name: part.to_string(),
            current_stock: current,
            target_stock: target,
            reorder_point: target * 3 / 10,
            factory_id,
        };
        let parts = inventory_by_part(&[
            item("Engines", 100, 1_000, 1),
            item("Tires", 700, 1_000, 1),
            item("Engines", 900, 1_000, 2),
        ]);

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].part_name, "Engines");
        assert_eq!(parts[0].current_stock, 1_000);
        assert_eq!(parts[0].target_stock, 2_000);
        assert_eq!(parts[0].below_reorder, 1);
        assert_eq!(parts[1].below_reorder, 0);
    }

    #[test]
    fn quality_sums() {
        let totals = quality_totals(&[QualityMetric::new(1, 950, 50), QualityMetric::new(2, 900, 100)]);
        assert_eq!(totals.total, 2_000);
        assert_eq!(totals.failed, 150);
        assert_eq!(totals.pass_rate, 0.925);
        assert_eq!(quality_totals(&[]), QualityTotals::default());
    }

    #[test]
    fn delay_impact_per_day() {
        let delay = |day, impact| DelayRecord {
            date:             date(day),
            factory_id:       1,
            factory_name:     "Factory 1".to_string(),
            category:         DelayCategory::Weather,
            duration_hours:   1,
            financial_impact: impact,
        };
        let impact = daily_delay_impact(&[delay(3, 10.0), delay(1, 5.0), delay(3, 2.5)]);

        assert_eq!(impact.len(), 2);
        assert_eq!(impact[0].date, date(1));
        assert_eq!(impact[1].incidents, 2);
        assert_eq!(impact[1].financial_impact, 12.5);
    }

    #[test]
    fn financial_rollup() {
        let records = vec![
            FinancialRecord::split(date(1), 1_000.0),
            FinancialRecord::split(date(2), 3_000.0),
        ];
        let costs = cost_breakdown(&records);
        assert_eq!(costs.idle_labor, 1_600.0);
        assert!((costs.total() - 4_000.0).abs() < 1e-9);

        let lines = vec![ProductLine {
            name:          "Sedan".to_string(),
            profit_margin: 0.15,
            units_sold:    1,
            revenue:       10_000.0,
        }];
        let summary = financial_summary(&lines, &records);
        assert_eq!(summary.total_revenue, 10_000.0);
        assert_eq!(summary.lost_revenue, 4_000.0);
        assert!((summary.net_impact - 8_000.0).abs() < 1e-9);
    }

    #[test]
    fn line_rows_are_limited() {
        let generator = DataGenerator::seeded(17);
        let rows = assembly_line_rows(&generator, None, ASSEMBLY_TABLE_ROWS);
        assert_eq!(rows.len(), ASSEMBLY_TABLE_ROWS);
        assert_eq!(rows[0].factory_name, "Detroit Assembly");
        assert_eq!(rows[0].line_name, "Line A");

        let single = assembly_line_rows(&generator, Some(5), ASSEMBLY_TABLE_ROWS);
        assert!(single.iter().all(|r| r.factory_name == "Shanghai Factory"));
        assert!((2..=4).contains(&single.len()));
        assert!(assembly_line_rows(&generator, Some(42), ASSEMBLY_TABLE_ROWS).is_empty());
    }
}
