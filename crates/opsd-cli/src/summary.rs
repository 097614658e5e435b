use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use opsd_ingest::{DownloadOutcome, format_bytes};
use opsd_model::{PriceColumnReport, QualityReport};
use opsd_quality::ExplorationSummary;
use opsd_transform::CleanSummary;

/// Column names previewed on the console; the report file lists all of them.
const COLUMN_PREVIEW_LIMIT: usize = 20;

/// Dropped columns listed on the console before the list is truncated.
const DROPPED_PREVIEW_LIMIT: usize = 20;

pub fn print_fetch_summary(source: &str, outcome: &DownloadOutcome) {
    if outcome.skipped {
        println!(
            "Source {source}: kept existing file {} ({})",
            outcome.path.display(),
            format_bytes(outcome.bytes)
        );
    } else {
        println!(
            "Source {source}: downloaded {} ({})",
            outcome.path.display(),
            format_bytes(outcome.bytes)
        );
    }
}

pub fn print_exploration_summary(summary: &ExplorationSummary, report_path: &Path) {
    println!("Input: {}", summary.input_path.display());
    println!("Report: {}", report_path.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("File size"),
        Cell::new(format!("{:.2} MB", summary.file_size_mb)),
    ]);
    table.add_row(vec![Cell::new("Rows"), Cell::new(summary.rows)]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(summary.columns)]);
    table.add_row(vec![
        Cell::new("Memory estimate"),
        Cell::new(format!("{:.2} MB", summary.memory_mb)),
    ]);
    table.add_row(vec![Cell::new("Time column"), Cell::new(&summary.time_column)]);
    table.add_row(vec![
        Cell::new("Period"),
        period_cell(summary.period_start.as_deref(), summary.period_end.as_deref()),
    ]);
    if let Some(duration) = &summary.duration {
        table.add_row(vec![Cell::new("Duration"), Cell::new(duration)]);
    }
    let dtypes = summary
        .dtype_counts
        .iter()
        .map(|(dtype, count)| format!("{dtype}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    table.add_row(vec![Cell::new("Column dtypes"), Cell::new(dtypes)]);
    println!("{table}");

    if !summary.column_names.is_empty() {
        let mut columns = Table::new();
        columns.set_header(vec![header_cell("#"), header_cell("Column")]);
        apply_table_style(&mut columns);
        align_column(&mut columns, 0, CellAlignment::Right);
        let shown = summary.column_names.iter().take(COLUMN_PREVIEW_LIMIT);
        for (index, name) in shown.enumerate() {
            columns.add_row(vec![Cell::new(index + 1), Cell::new(name)]);
        }
        let hidden = summary.columns.saturating_sub(COLUMN_PREVIEW_LIMIT);
        if hidden > 0 {
            columns.add_row(vec![dim_cell(""), dim_cell(format!("({hidden} more)"))]);
        }
        println!();
        println!("Columns:");
        println!("{columns}");
    }

    if !summary.countries.is_empty() {
        let mut countries = Table::new();
        countries.set_header(vec![
            header_cell("Country"),
            header_cell("Columns"),
            header_cell("Price"),
            header_cell("Generation"),
            header_cell("Load"),
        ]);
        apply_table_style(&mut countries);
        for index in 1..=4 {
            align_column(&mut countries, index, CellAlignment::Right);
        }
        for country in &summary.countries {
            countries.add_row(vec![
                country_cell(&country.country),
                Cell::new(country.total),
                Cell::new(country.price),
                Cell::new(country.generation),
                Cell::new(country.load),
            ]);
        }
        println!();
        println!("Focus countries:");
        println!("{countries}");
    }

    let mut preview_rows = Vec::new();
    for country in &summary.countries {
        for preview in &country.price_previews {
            preview_rows.push(vec![
                country_cell(&country.country),
                Cell::new(&preview.column),
                Cell::new(format!("{:.2}", preview.min)),
                Cell::new(format!("{:.2}", preview.max)),
                Cell::new(format!("{:.2}", preview.median)),
                negative_cell(preview.negative_count, preview.negative_pct),
            ]);
        }
    }
    if !preview_rows.is_empty() {
        let mut previews = Table::new();
        previews.set_header(vec![
            header_cell("Country"),
            header_cell("Price column"),
            header_cell("Min"),
            header_cell("Max"),
            header_cell("Median"),
            header_cell("Negative"),
        ]);
        apply_table_style(&mut previews);
        for index in 2..=5 {
            align_column(&mut previews, index, CellAlignment::Right);
        }
        for row in preview_rows {
            previews.add_row(row);
        }
        println!();
        println!("Price previews:");
        println!("{previews}");
    }

    if !summary.top_missing.is_empty() {
        let mut missing = Table::new();
        missing.set_header(vec![
            header_cell("Column"),
            header_cell("Missing"),
            header_cell("Percent"),
        ]);
        apply_table_style(&mut missing);
        align_column(&mut missing, 1, CellAlignment::Right);
        align_column(&mut missing, 2, CellAlignment::Right);
        for column in &summary.top_missing {
            missing.add_row(vec![
                Cell::new(&column.name),
                Cell::new(column.count),
                Cell::new(format!("{:.1}%", column.percentage)),
            ]);
        }
        println!();
        println!("Top missing columns:");
        println!("{missing}");
    }
}

pub fn print_quality_summary(report: &QualityReport, report_path: &Path) {
    println!("Report: {}", report_path.display());

    let overview = &report.overview;
    let missing = &report.missing_values;
    let temporal = &report.temporal_analysis;

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows"), Cell::new(overview.rows)]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(overview.columns)]);
    table.add_row(vec![
        Cell::new("Period"),
        period_cell(overview.period_start.as_deref(), overview.period_end.as_deref()),
    ]);
    table.add_row(vec![Cell::new("Duration (days)"), Cell::new(overview.duration_days)]);
    table.add_row(vec![
        Cell::new("Memory estimate"),
        Cell::new(format!("{:.2} MB", overview.memory_mb)),
    ]);
    table.add_row(vec![
        Cell::new("Missing cells"),
        Cell::new(format!(
            "{} ({:.2}%)",
            missing.global.missing_cells, missing.global.missing_percentage
        )),
    ]);
    let categories = &missing.column_categories;
    table.add_row(vec![
        Cell::new("Column categories"),
        Cell::new(format!(
            "{} complete, {} partial, {} mostly missing, {} empty",
            categories.complete, categories.partial, categories.mostly_missing, categories.empty
        )),
    ]);
    table.add_row(vec![Cell::new("Expected frequency"), Cell::new(&temporal.expected_frequency)]);
    table.add_row(vec![Cell::new("Time gaps"), count_cell(temporal.gaps_count, Color::Yellow)]);
    if let Some(max_gap) = &temporal.max_gap {
        table.add_row(vec![Cell::new("Largest gap"), Cell::new(max_gap)]);
    }
    table.add_row(vec![
        Cell::new("Duplicate timestamps"),
        count_cell(temporal.duplicate_timestamps, Color::Yellow),
    ]);
    println!("{table}");

    let mut price_rows = Vec::new();
    for (country, columns) in report.price_analysis.iter() {
        for (column, column_report) in columns.iter() {
            price_rows.push(match column_report {
                PriceColumnReport::Stats(stats) => vec![
                    country_cell(country),
                    Cell::new(column),
                    Cell::new(stats.count),
                    Cell::new(stats.min),
                    Cell::new(stats.max),
                    Cell::new(stats.mean),
                    Cell::new(stats.median),
                    negative_cell(stats.negative_count, stats.negative_pct),
                ],
                PriceColumnReport::NoData { .. } => vec![
                    country_cell(country),
                    Cell::new(column),
                    dim_cell("no data"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ],
            });
        }
    }
    if !price_rows.is_empty() {
        let mut price = Table::new();
        price.set_header(vec![
            header_cell("Country"),
            header_cell("Price column"),
            header_cell("Count"),
            header_cell("Min"),
            header_cell("Max"),
            header_cell("Mean"),
            header_cell("Median"),
            header_cell("Negative"),
        ]);
        apply_table_style(&mut price);
        for index in 2..=7 {
            align_column(&mut price, index, CellAlignment::Right);
        }
        for row in price_rows {
            price.add_row(row);
        }
        println!();
        println!("Price columns:");
        println!("{price}");
    }

    // Console shows the first 10; the report file holds the full top 20.
    if !missing.top_missing_columns.is_empty() {
        let mut top = Table::new();
        top.set_header(vec![
            header_cell("Column"),
            header_cell("Missing"),
            header_cell("Percent"),
        ]);
        apply_table_style(&mut top);
        align_column(&mut top, 1, CellAlignment::Right);
        align_column(&mut top, 2, CellAlignment::Right);
        for (name, column) in missing.top_missing_columns.iter().take(10) {
            top.add_row(vec![
                Cell::new(name),
                Cell::new(column.count),
                Cell::new(format!("{:.1}%", column.percentage)),
            ]);
        }
        println!();
        println!("Top missing columns:");
        println!("{top}");
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for (index, recommendation) in report.recommendations.iter().enumerate() {
            println!("{:2}. {recommendation}", index + 1);
        }
    }
}

pub fn print_clean_summary(summary: &CleanSummary) {
    println!("Cleaned: {}", summary.outputs.clean_path.display());
    println!(
        "Sample: {} ({} rows)",
        summary.outputs.sample_path.display(),
        summary.outputs.sample_rows
    );

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Initial columns"), Cell::new(summary.initial_columns)]);
    table.add_row(vec![Cell::new("Focus columns"), Cell::new(summary.selected_columns)]);
    table.add_row(vec![
        Cell::new("Dropped columns"),
        count_cell(summary.dropped.len(), Color::Red),
    ]);
    table.add_row(vec![Cell::new("Rows"), Cell::new(summary.rows)]);
    table.add_row(vec![Cell::new("Forward filled"), Cell::new(summary.fill.forward_filled)]);
    table.add_row(vec![Cell::new("Backward filled"), Cell::new(summary.fill.backward_filled)]);
    table.add_row(vec![
        Cell::new("Residual missing"),
        count_cell(summary.fill.residual_missing, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Final columns"), Cell::new(summary.final_columns)]);
    println!("{table}");

    if summary.dropped.is_empty() {
        return;
    }
    let mut dropped = Table::new();
    dropped.set_header(vec![header_cell("Dropped column"), header_cell("Missing")]);
    apply_table_style(&mut dropped);
    align_column(&mut dropped, 1, CellAlignment::Right);
    for column in summary.dropped.iter().take(DROPPED_PREVIEW_LIMIT) {
        dropped.add_row(vec![
            Cell::new(&column.name),
            Cell::new(format!("{:.1}%", column.missing_fraction * 100.0)),
        ]);
    }
    let hidden = summary.dropped.len().saturating_sub(DROPPED_PREVIEW_LIMIT);
    if hidden > 0 {
        dropped.add_row(vec![dim_cell(format!("({hidden} more)")), dim_cell("")]);
    }
    println!();
    println!("Dropped columns:");
    println!("{dropped}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(110);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn country_cell(code: &str) -> Cell {
    Cell::new(code)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn period_cell(start: Option<&str>, end: Option<&str>) -> Cell {
    match (start, end) {
        (Some(start), Some(end)) => Cell::new(format!("{start} to {end}")),
        _ => dim_cell("-"),
    }
}

fn count_cell(value: usize, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

fn negative_cell(count: usize, pct: f64) -> Cell {
    if count > 0 {
        Cell::new(format!("{count} ({pct:.2}%)"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(0)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
