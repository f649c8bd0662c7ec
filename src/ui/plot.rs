use eframe::egui::{Color32, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints, Points,
};

use crate::data::model::{JobCategory, Region, RemoteWorkType};
use crate::data::stats::{self, SalaryStat};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard charts (central panel)
// ---------------------------------------------------------------------------

const CHART_HEIGHT: f32 = 240.0;
const HISTOGRAM_BINS: usize = 50;
const TOP_JOBS: usize = 10;

const ACCENT: Color32 = Color32::from_rgb(99, 110, 250);
const CONTRAST: Color32 = Color32::from_rgb(239, 85, 59);

/// Render every chart of the dashboard, stacked full-width.
pub fn charts(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore salaries  (File → Open…)");
        });
        return;
    }

    salary_distribution(ui, state);
    ui.separator();
    experience_box_plot(ui, state);
    ui.separator();
    region_category_bars(ui, state);
    ui.separator();
    salary_trend(ui, state);
    ui.separator();
    remote_distribution(ui, state);
    ui.separator();
    top_paying_jobs(ui, state);
}

/// Histogram of `salary_in_usd` over the filtered subset.
pub fn salary_distribution(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    section_heading(ui, "Salary Distribution");

    let bins = stats::salary_histogram(ds, &state.visible_indices, HISTOGRAM_BINS);
    if bins.is_empty() {
        no_rows_note(ui);
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| Bar::new(bin.center, bin.count as f64).width(bin.width))
        .collect();

    dashboard_plot("salary_distribution")
        .x_axis_label("Salary in USD")
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT));
        });
}

/// Box plot of salary per experience level, Entry → Executive.
pub fn experience_box_plot(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    section_heading(ui, "Salary by Experience Level");

    let boxes = stats::salary_by_experience(ds, &state.visible_indices);
    if boxes.is_empty() {
        no_rows_note(ui);
        return;
    }

    let labels: Vec<String> = boxes.iter().map(|(lvl, _)| lvl.label().to_string()).collect();
    let elems: Vec<BoxElem> = boxes
        .iter()
        .enumerate()
        .map(|(i, (level, b))| {
            BoxElem::new(i as f64, BoxSpread::new(b.min, b.q1, b.median, b.q3, b.max))
                .name(level.label())
        })
        .collect();

    dashboard_plot("experience_box_plot")
        .x_axis_label("Experience Level")
        .y_axis_label("Salary in USD")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark))
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(elems).color(ACCENT));
        });
}

/// Grouped bars: mean or median salary per region, one bar per job category.
pub fn region_category_bars(ui: &mut Ui, state: &mut AppState) {
    section_heading(ui, "Salary by Region and Job Category");

    ui.horizontal(|ui: &mut Ui| {
        for stat in [SalaryStat::Mean, SalaryStat::Median] {
            let text = format!("{} Salary", stat.label());
            if ui.selectable_label(state.region_stat == stat, text).clicked() {
                state.region_stat = stat;
            }
        }
    });

    let Some(ds) = &state.dataset else {
        return;
    };

    let grouped = stats::region_category_salary(ds, &state.visible_indices, state.region_stat);
    if grouped.is_empty() {
        no_rows_note(ui);
        return;
    }

    let regions: Vec<Region> = grouped.keys().copied().collect();
    let region_labels: Vec<String> = regions.iter().map(|r| r.label().to_string()).collect();

    // Only categories present in the subset get a slot in each group.
    let categories: Vec<JobCategory> = JobCategory::ALL
        .into_iter()
        .filter(|cat| grouped.values().any(|per_cat| per_cat.contains_key(cat)))
        .collect();

    let group_width = 0.8;
    let bar_width = group_width / categories.len() as f64;

    let series: Vec<BarChart> = categories
        .iter()
        .enumerate()
        .map(|(slot, &cat)| {
            let offset = (slot as f64 + 0.5) * bar_width - group_width / 2.0;
            let bars: Vec<Bar> = regions
                .iter()
                .enumerate()
                .filter_map(|(ri, region)| {
                    let value = grouped.get(region)?.get(&cat)?;
                    Some(Bar::new(ri as f64 + offset, *value).width(bar_width))
                })
                .collect();
            BarChart::new(bars)
                .name(cat.label())
                .color(state.category_colors.color_for(cat.label()))
        })
        .collect();

    dashboard_plot("region_category_bars")
        .legend(Legend::default())
        .x_axis_label("Region")
        .y_axis_label(format!("{} Salary in USD", state.region_stat.label()))
        .x_axis_formatter(move |mark, _range| index_label(&region_labels, mark))
        .show(ui, |plot_ui| {
            for chart in series {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Mean and median salary per work year, as lines with markers.
pub fn salary_trend(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    section_heading(ui, "Salary Trend Over Years");

    let trend = stats::yearly_trend(ds, &state.visible_indices);
    if trend.is_empty() {
        no_rows_note(ui);
        return;
    }

    let means: Vec<[f64; 2]> = trend.iter().map(|y| [f64::from(y.year), y.mean]).collect();
    let medians: Vec<[f64; 2]> = trend.iter().map(|y| [f64::from(y.year), y.median]).collect();

    dashboard_plot("salary_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Salary in USD")
        .x_axis_formatter(|mark, _range| whole_year(mark))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(means.clone()))
                    .name("Average Salary")
                    .color(ACCENT)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(means))
                    .name("Average Salary")
                    .color(ACCENT)
                    .radius(3.5),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(medians.clone()))
                    .name("Median Salary")
                    .color(CONTRAST)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(medians))
                    .name("Median Salary")
                    .color(CONTRAST)
                    .radius(3.5),
            );
        });
}

/// Share of each remote work type per year, as 100% stacked bars.
pub fn remote_distribution(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    section_heading(ui, "Remote Work Distribution");

    let shares = stats::remote_share_by_year(ds, &state.visible_indices);
    if shares.is_empty() {
        no_rows_note(ui);
        return;
    }

    let mut per_type: [Vec<Bar>; 3] = Default::default();
    for &(year, split) in &shares {
        for (slot, share) in split.into_iter().enumerate() {
            per_type[slot].push(Bar::new(f64::from(year), share).width(0.6));
        }
    }

    let mk = |bars: Vec<Bar>, ty: RemoteWorkType| {
        BarChart::new(bars)
            .name(ty.label())
            .color(state.remote_colors.color_for(ty.label()))
    };
    let [on_site, hybrid, full_remote] = per_type;
    let on_site = mk(on_site, RemoteWorkType::OnSite);
    let hybrid = mk(hybrid, RemoteWorkType::Hybrid).stack_on(&[&on_site]);
    let full_remote = mk(full_remote, RemoteWorkType::FullRemote).stack_on(&[&on_site, &hybrid]);

    dashboard_plot("remote_distribution")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Percentage")
        .x_axis_formatter(|mark, _range| whole_year(mark))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(on_site);
            plot_ui.bar_chart(hybrid);
            plot_ui.bar_chart(full_remote);
        });
}

/// Horizontal bars: the ten job titles with the highest median salary.
pub fn top_paying_jobs(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    section_heading(ui, "Top Paying Jobs");

    let top = stats::top_paying_titles(ds, &state.visible_indices, TOP_JOBS);
    if top.is_empty() {
        no_rows_note(ui);
        return;
    }

    // Reverse so the highest median sits at the top of the chart.
    let titles: Vec<String> = top.iter().rev().map(|(title, _)| title.clone()).collect();
    let bars: Vec<Bar> = top
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &(_, median))| Bar::new(i as f64, median).width(0.6))
        .collect();

    dashboard_plot("top_paying_jobs")
        .x_axis_label("Median Salary in USD")
        .y_axis_formatter(move |mark, _range| index_label(&titles, mark))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ACCENT).horizontal());
        });
}

// -- Shared plumbing --

/// Base configuration shared by all charts: fixed height, interactions off so
/// the surrounding page keeps scrolling normally.
fn dashboard_plot(id: &'static str) -> Plot<'static> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
}

fn section_heading(ui: &mut Ui, text: &str) {
    ui.add_space(4.0);
    ui.strong(text);
}

fn no_rows_note(ui: &mut Ui) {
    ui.weak("No rows match the current filters.");
}

/// Label integer axis marks with the matching entry of `labels`.
fn index_label(labels: &[String], mark: GridMark) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() > 0.05 || rounded < 0.0 {
        return String::new();
    }
    match labels.get(rounded as usize) {
        Some(label) => label.clone(),
        None => String::new(),
    }
}

/// Label whole-valued axis marks as years, hide fractional ones.
fn whole_year(mark: GridMark) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() > 0.001 {
        String::new()
    } else {
        format!("{rounded:.0}")
    }
}
