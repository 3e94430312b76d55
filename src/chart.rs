//! Three-panel benchmark report rendering.
//!
//! The canvas is split into a wide timeline panel on top (stacked
//! init/execution bars at p50/p90/p99 with a billed-duration bracket), a
//! cost panel on the bottom left, and a small memory panel on the bottom
//! right.

use crate::color::{get_color_from_label, FONT_SIZE, LABEL_FONT_SIZE, STROKE_WIDTH};
use crate::summary::{RunSummary, ALLOCATED_MEMORY_MB};
use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};

const CANVAS_WIDTH_PX: u32 = 1600;
const CANVAS_HEIGHT_PX: u32 = 600;
const TIMELINE_HEIGHT_PX: u32 = 420;
const COST_PANEL_WIDTH_PX: u32 = 1280;

// The timeline x-axis covers this range unless a billed bracket overflows
// it, in which case the axis grows 5% past the largest bracket end.
const TIMELINE_X_MAX_MS: f64 = 400.0;

// Managed-runtime billing does not include the init phase, so for this one
// runtime the billed bracket starts at the end of the init segment instead
// of at zero.
const BILLED_AFTER_INIT_TITLE: &str = "Node";

const COST_X_MAX_GBS: f64 = 0.01;
const BAR_HEIGHT: f64 = 0.6;

/// Derive the chart title from the input file name, e.g.
/// `aws-lambda-node.csv` becomes `Aws Lambda Node`.
pub fn pretty_title(csv_path: &Path) -> String {
    let stem = csv_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let title = stem
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ");

    // The LLRT runtime is an acronym, not a word.
    if title == "Llrt" {
        "LLRT".to_string()
    } else {
        title
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Output image path: the input file name with a `.png` extension, relative
/// to the current working directory.
pub fn output_path(csv_path: &Path) -> PathBuf {
    match csv_path.file_name() {
        Some(name) => PathBuf::from(name).with_extension("png"),
        None => PathBuf::from("benchmark.png"),
    }
}

fn timeline_x_max(bracket_ends: &[f64]) -> f64 {
    let largest = bracket_ends.iter().fold(0.0f64, |acc, end| acc.max(*end));
    if largest > TIMELINE_X_MAX_MS {
        largest * 1.05
    } else {
        TIMELINE_X_MAX_MS
    }
}

/// Render the full report to `plot_path`. Nothing is written if any panel
/// fails to draw.
pub fn render(summary: &RunSummary, title: &str, plot_path: &Path) -> Result<()> {
    let root =
        BitMapBackend::new(plot_path, (CANVAS_WIDTH_PX, CANVAS_HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE)?;

    let (timeline_area, bottom_area) = root.split_vertically(TIMELINE_HEIGHT_PX);
    let (cost_area, mem_area) = bottom_area.split_horizontally(COST_PANEL_WIDTH_PX);

    draw_timeline_panel(&root, &timeline_area, summary, title)?;
    draw_cost_panel(&cost_area, summary)?;
    draw_memory_panel(&mem_area, summary)?;

    // Title in the top-left gutter, above the timeline rows.
    root.draw(&Text::new(
        title.to_string(),
        (15, 10),
        ("sans-serif", FONT_SIZE + 8)
            .into_font()
            .style(FontStyle::Bold),
    ))?;

    root.present()?;

    Ok(())
}

fn draw_timeline_panel(
    root: &DrawingArea<BitMapBackend, Shift>,
    area: &DrawingArea<BitMapBackend, Shift>,
    summary: &RunSummary,
    title: &str,
) -> Result<()> {
    // Rows from top to bottom: p50, p90, p99.
    let rows = [
        (
            3.0,
            "p50",
            summary.init.p50,
            summary.exec.p50,
            summary.billed.p50,
        ),
        (
            2.0,
            "p90",
            summary.init.p90,
            summary.exec.p90,
            summary.billed.p90,
        ),
        (
            1.0,
            "p99",
            summary.init.p99,
            summary.exec.p99,
            summary.billed.p99,
        ),
    ];

    let bracket_from_init = title == BILLED_AFTER_INIT_TITLE;
    let bracket_ends: Vec<f64> = rows
        .iter()
        .map(|(_, _, init, _, billed)| {
            if bracket_from_init {
                init + billed
            } else {
                *billed
            }
        })
        .collect();
    let x_max = timeline_x_max(&bracket_ends);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_top(50)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0.2f64..3.8f64)?;

    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .disable_y_mesh()
        .disable_y_axis()
        .x_labels(10)
        .x_label_style(("sans-serif", LABEL_FONT_SIZE).into_font())
        .x_label_formatter(&|x| format!("{x:.0}"))
        .x_desc("Time (ms)")
        .axis_desc_style(("sans-serif", FONT_SIZE).into_font())
        .draw()?;

    let init_color = get_color_from_label("init");
    let exec_color = get_color_from_label("execution");

    let centered = Pos::new(HPos::Center, VPos::Center);
    let label_font = TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font());

    for (y, row_label, init_value, exec_value, billed_value) in rows {
        let total_value = init_value + exec_value;
        let plotting_area = chart.plotting_area();

        // Stacked bar: init first, execution on top of it, each segment
        // framed in black.
        let init_box = [(0.0, y - BAR_HEIGHT / 2.0), (init_value, y + BAR_HEIGHT / 2.0)];
        let exec_box = [
            (init_value, y - BAR_HEIGHT / 2.0),
            (total_value, y + BAR_HEIGHT / 2.0),
        ];
        plotting_area.draw(&Rectangle::new(init_box, init_color.filled()))?;
        plotting_area.draw(&Rectangle::new(init_box, BLACK))?;
        plotting_area.draw(&Rectangle::new(exec_box, exec_color.filled()))?;
        plotting_area.draw(&Rectangle::new(exec_box, BLACK))?;

        if init_value > 0.0 {
            plotting_area.draw(&Text::new(
                format!("Init {init_value:.1} ms"),
                (init_value / 2.0, y),
                label_font.pos(centered),
            ))?;
        }
        if exec_value > 0.0 {
            plotting_area.draw(&Text::new(
                format!("Execution {exec_value:.1} ms"),
                (init_value + exec_value / 2.0, y),
                label_font.pos(centered),
            ))?;
        }

        if billed_value > 0.0 {
            let bracket_start = if bracket_from_init { init_value } else { 0.0 };
            let bracket_end = bracket_start + billed_value;
            let bracket_y = y - BAR_HEIGHT / 2.0 - 0.1;
            let tick_height = 0.12;
            let bracket_style = RED.stroke_width(STROKE_WIDTH);

            plotting_area.draw(&PathElement::new(
                vec![(bracket_start, bracket_y), (bracket_end, bracket_y)],
                bracket_style,
            ))?;
            plotting_area.draw(&PathElement::new(
                vec![
                    (bracket_start, bracket_y),
                    (bracket_start, bracket_y + tick_height),
                ],
                bracket_style,
            ))?;
            plotting_area.draw(&PathElement::new(
                vec![
                    (bracket_end, bracket_y),
                    (bracket_end, bracket_y + tick_height),
                ],
                bracket_style,
            ))?;
            plotting_area.draw(&Text::new(
                format!("{billed_value:.0}ms Billed"),
                (bracket_start + billed_value / 2.0, bracket_y - 0.05),
                label_font
                    .color(&RED)
                    .pos(Pos::new(HPos::Center, VPos::Top)),
            ))?;
        }

        // Trailing total just past the end of the stack.
        plotting_area.draw(&Text::new(
            format!("{total_value:.1} ms"),
            (total_value + 5.0, y),
            label_font.pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;

        // Row label in the left gutter.
        let (px, py) = chart.plotting_area().map_coordinate(&(0.0, y));
        root.draw(&Text::new(
            row_label.to_string(),
            (px - 12, py),
            TextStyle::from(("sans-serif", FONT_SIZE).into_font())
                .pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }

    Ok(())
}

fn draw_cost_panel(area: &DrawingArea<BitMapBackend, Shift>, summary: &RunSummary) -> Result<()> {
    let cost = summary.cost_gbs;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..COST_X_MAX_GBS, 0f64..2f64)?;

    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .disable_y_mesh()
        .disable_y_axis()
        .x_labels(10)
        .x_label_style(("sans-serif", LABEL_FONT_SIZE).into_font())
        .x_desc(format!(
            "Cost (GB-seconds, billed duration x allocated memory ({ALLOCATED_MEMORY_MB}MB))"
        ))
        .axis_desc_style(("sans-serif", FONT_SIZE).into_font())
        .draw()?;

    let plotting_area = chart.plotting_area();
    let bar_box = [(0.0, 0.5), (cost, 1.5)];
    plotting_area.draw(&Rectangle::new(
        bar_box,
        get_color_from_label("cost").filled(),
    ))?;
    plotting_area.draw(&Rectangle::new(bar_box, BLACK))?;

    let label_offset = COST_X_MAX_GBS * 0.01;
    plotting_area.draw(&Text::new(
        format!("{cost:.4}"),
        (cost + label_offset, 1.0),
        TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
            .pos(Pos::new(HPos::Left, VPos::Center)),
    ))?;

    Ok(())
}

fn draw_memory_panel(area: &DrawingArea<BitMapBackend, Shift>, summary: &RunSummary) -> Result<()> {
    let mem_avg = summary.mem_avg_mb;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(40)
        .build_cartesian_2d(0.5f64..1.5f64, 0f64..100f64)?;

    // The bar height lives on a fixed 0-100 scale; the label prints the
    // raw MB value.
    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .disable_x_mesh()
        .x_labels(2)
        .x_label_formatter(&|_| String::new())
        .y_labels(6)
        .y_label_style(("sans-serif", LABEL_FONT_SIZE).into_font())
        .y_label_formatter(&|y| format!("{y:.0}"))
        .x_desc("Max Memory (MB)")
        .axis_desc_style(("sans-serif", FONT_SIZE).into_font())
        .draw()?;

    let plotting_area = chart.plotting_area();
    let bar_box = [(0.7, 0.0), (1.3, mem_avg)];
    plotting_area.draw(&Rectangle::new(
        bar_box,
        get_color_from_label("memory").filled(),
    ))?;
    plotting_area.draw(&Rectangle::new(bar_box, BLACK))?;

    plotting_area.draw(&Text::new(
        format!("{mem_avg:.0}MB"),
        (1.0, mem_avg + 4.0),
        TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_title_capitalizes_words() {
        assert_eq!(pretty_title(Path::new("aws-lambda-node.csv")), "Aws Lambda Node");
        assert_eq!(pretty_title(Path::new("bun_baseline.csv")), "Bun Baseline");
        assert_eq!(pretty_title(Path::new("results/NODE.csv")), "Node");
    }

    #[test]
    fn test_pretty_title_acronym_override() {
        assert_eq!(pretty_title(Path::new("llrt.csv")), "LLRT");
        assert_eq!(pretty_title(Path::new("LLRT.csv")), "LLRT");
    }

    #[test]
    fn test_pretty_title_collapses_separator_runs() {
        assert_eq!(pretty_title(Path::new("deno--canary_v2.csv")), "Deno Canary V2");
    }

    #[test]
    fn test_output_path_swaps_extension() {
        assert_eq!(
            output_path(Path::new("trace-data.csv")),
            PathBuf::from("trace-data.png")
        );
    }

    #[test]
    fn test_output_path_strips_directories() {
        assert_eq!(
            output_path(Path::new("/tmp/results/node.csv")),
            PathBuf::from("node.png")
        );
    }

    #[test]
    fn test_timeline_x_max_default_range() {
        assert_eq!(timeline_x_max(&[126.0, 150.0, 380.0]), 400.0);
        assert_eq!(timeline_x_max(&[]), 400.0);
    }

    #[test]
    fn test_timeline_x_max_expands_past_overflowing_bracket() {
        assert!((timeline_x_max(&[126.0, 500.0]) - 525.0).abs() < 1e-9);
    }
}
