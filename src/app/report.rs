use comfy_table::presets;
use comfy_table::CellAlignment;
use comfy_table::Table;
use num_format::Locale;
use num_format::ToFormattedString;

use super::Section;
use crate::dashboard::DashboardSnapshot;
use crate::dashboard::ALL_FACTORIES;
use crate::format::compact_currency;
use crate::format::percentage;

fn table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::ASCII_FULL_CONDENSED).set_header(header);
    table
}

fn align_right(table: &mut Table, columns: impl IntoIterator<Item = usize>) {
    for col in columns {
        if let Some(column) = table.column_mut(col) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn grouped(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

fn dollars(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-${}", rounded.unsigned_abs().to_formatted_string(&Locale::en))
    }
    else {
        format!("${}", rounded.to_formatted_string(&Locale::en))
    }
}

fn titled(title: &str, table: Table) -> String {
    format!("== {title} ==\n{table}\n\n")
}

fn overview(snapshot: &DashboardSnapshot) -> String {
    let state = &snapshot.state;
    let factory = match state.factory_filter() {
        Some(id) => snapshot
            .factories
            .iter()
            .find(|f| f.id == id)
            .map_or_else(|| format!("#{id}"), |f| f.name.clone()),
        None => ALL_FACTORIES.to_string(),
    };

    let mut kpis = table(["Metric", "Value", ""]);
    kpis.add_row(["Total Cars Produced", snapshot.cards.total_cars.as_str(), "Monthly Production"])
        .add_row(["Total Factories", snapshot.cards.total_factories.as_str(), "Global Operations"])
        .add_row(["On-Time Deliveries", snapshot.cards.on_time_delivery.as_str(), "Delivery Performance"])
        .add_row(["Lost Revenue (Delays)", snapshot.cards.lost_revenue.as_str(), "Due to Delays"])
        .add_row([
            "Production Efficiency",
            snapshot.cards.production_efficiency.as_str(),
            "Overall Performance",
        ]);
    align_right(&mut kpis, [1]);

    let mut out = format!(
        "Factory: {factory} | Delay multiplier: {} | Window: {}\n\n",
        state.delay_multiplier(),
        state
            .time_range()
            .map_or_else(|| "full".to_string(), |r| format!("{} to {}", r.start(), r.end()))
    );
    out.push_str(&titled("KPI Overview", kpis));
    out
}

fn factories(snapshot: &DashboardSnapshot) -> String {
    let mut production = table(["Factory", "Cars Produced", "Capacity", "Daily Mean", "Daily Std Dev"]);
    for row in &snapshot.production {
        production.add_row([
            row.factory_name.clone(),
            grouped(row.total_cars),
            grouped(row.target_total),
            format!("{:.1}", row.daily_mean),
            format!("{:.1}", row.daily_std_dev),
        ]);
    }
    align_right(&mut production, 1..=4);

    let mut lines = table(["Factory", "Line", "Status", "Output Rate", "Target Rate", "Efficiency"]);
    for row in &snapshot.assembly_lines {
        lines.add_row([
            row.factory_name.clone(),
            row.line_name.clone(),
            row.status.title().to_string(),
            format!("{} cars/hour", row.output_rate),
            format!("{} cars/hour", row.target_rate),
            format!("{:.1}%", row.efficiency),
        ]);
    }
    align_right(&mut lines, 3..=5);

    let mut inventory = table(["Part", "Current Stock", "Target Stock", "Below Reorder"]);
    for part in &snapshot.inventory {
        inventory.add_row([
            part.part_name.clone(),
            grouped(part.current_stock),
            grouped(part.target_stock),
            part.below_reorder.to_string(),
        ]);
    }
    align_right(&mut inventory, 1..=3);

    let quality = &snapshot.quality;
    let mut checks = table(["Passed", "Failed", "Total", "Pass Rate"]);
    checks.add_row([
        grouped(quality.passed),
        grouped(quality.failed),
        grouped(quality.total),
        percentage(quality.pass_rate),
    ]);
    align_right(&mut checks, 0..=3);

    [
        titled("Monthly Production by Factory", production),
        titled("Assembly Line Status", lines),
        titled("Inventory Levels by Part", inventory),
        titled("Quality Control", checks),
    ]
    .concat()
}

fn logistics(snapshot: &DashboardSnapshot) -> String {
    let mut locations = table(["Factory", "Location", "Latitude", "Longitude", "Utilization", "Status"]);
    for factory in &snapshot.factories {
        locations.add_row([
            factory.name.clone(),
            factory.location.clone(),
            format!("{:.4}", factory.latitude),
            format!("{:.4}", factory.longitude),
            percentage(factory.utilization()),
            factory.status.title().to_string(),
        ]);
    }
    align_right(&mut locations, 2..=4);

    let mut delays = table(["Date", "Incidents", "Financial Impact"]);
    for day in &snapshot.delay_impact {
        delays.add_row([day.date.to_string(), day.incidents.to_string(), dollars(day.financial_impact)]);
    }
    align_right(&mut delays, 1..=2);

    let mut bottlenecks = table(["Cause", "Incidents"]);
    for entry in &snapshot.bottlenecks {
        bottlenecks.add_row([entry.label().to_string(), entry.incidents.to_string()]);
    }
    align_right(&mut bottlenecks, [1]);

    [
        titled("Global Factory Locations", locations),
        titled("Daily Delay Impact", delays),
        titled("Supply Chain Bottlenecks", bottlenecks),
    ]
    .concat()
}

fn financial(snapshot: &DashboardSnapshot) -> String {
    let mut daily = table(["Date", "Revenue Lost", "Expedited Shipping", "Idle Labor", "Penalties"]);
    for record in &snapshot.financial {
        daily.add_row([
            record.date.to_string(),
            dollars(record.revenue_lost),
            dollars(record.cost_expedited_shipping),
            dollars(record.cost_idle_labor),
            dollars(record.cost_penalties),
        ]);
    }
    align_right(&mut daily, 1..=4);

    let costs = &snapshot.costs;
    let mut breakdown = table(["Cost", "Amount"]);
    breakdown
        .add_row(["Expedited Shipping".to_string(), dollars(costs.expedited_shipping)])
        .add_row(["Idle Labor".to_string(), dollars(costs.idle_labor)])
        .add_row(["Penalties".to_string(), dollars(costs.penalties)]);
    align_right(&mut breakdown, [1]);

    let mut products = table(["Product Line", "Units Sold", "Revenue", "Profit Margin"]);
    for line in &snapshot.product_lines {
        products.add_row([
            line.name.clone(),
            grouped(line.units_sold),
            compact_currency(line.revenue),
            percentage(line.profit_margin),
        ]);
    }
    align_right(&mut products, 1..=3);

    let summary = &snapshot.financial_summary;
    let mut totals = table(["Metric", "Value"]);
    totals
        .add_row(["Total Revenue".to_string(), compact_currency(summary.total_revenue)])
        .add_row(["Lost Revenue".to_string(), compact_currency(summary.lost_revenue)])
        .add_row(["Total Delay Costs".to_string(), compact_currency(summary.delay_costs)])
        .add_row(["Net Impact".to_string(), compact_currency(summary.net_impact)]);
    align_right(&mut totals, [1]);

    [
        titled("Revenue Loss Over Time", daily),
        titled("Delay Cost Breakdown", breakdown),
        titled("Product Line Profitability", products),
        titled("Financial Summary", totals),
    ]
    .concat()
}

/// Text report of the requested section.
pub(super) fn render(snapshot: &DashboardSnapshot, section: Section) -> String {
    let mut out = String::new();
    let parts: [(Section, fn(&DashboardSnapshot) -> String); 4] = [
        (Section::Overview, overview),
        (Section::Factories, factories),
        (Section::Logistics, logistics),
        (Section::Financial, financial),
    ];

    for (part, renderer) in parts {
        if section.includes(part) {
            out.push_str(&renderer(snapshot));
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::generator::DataGenerator;

    #[test]
    fn number_grouping() {
        assert_eq!(grouped(1_234_567), "1,234,567");
        assert_eq!(dollars(1_500.4), "$1,500");
        assert_eq!(dollars(-2_000.0), "-$2,000");
    }

    #[test]
    fn sections() {
        let dashboard = Dashboard::new(std::sync::Arc::new(DataGenerator::seeded(21)));
        let snapshot = dashboard.snapshot().unwrap();

        let overview = render(&snapshot, Section::Overview);
        assert!(overview.contains("== KPI Overview =="));
        assert!(overview.contains("Factory: All Factories"));
        assert!(!overview.contains("Assembly Line Status"));

        let all = render(&snapshot, Section::All);
        for title in [
            "KPI Overview",
            "Monthly Production by Factory",
            "Assembly Line Status",
            "Global Factory Locations",
            "Supply Chain Bottlenecks",
            "Financial Summary",
        ] {
            assert!(all.contains(title), "missing {title}");
        }
        assert!(all.contains("Detroit Assembly"));
    }

    #[test]
    fn logistics_utilization() {
        let dashboard = Dashboard::new(std::sync::Arc::new(DataGenerator::seeded(5)));
        let snapshot = dashboard.snapshot().unwrap();
        let logistics = render(&snapshot, Section::Logistics);

        assert!(logistics.contains("Utilization"));
        for factory in &snapshot.factories {
            let row = logistics
                .lines()
                .find(|line| line.contains(factory.name.as_str()))
                .unwrap();
            assert!(row.contains(&percentage(factory.utilization())), "{row}");
        }
    }
}
