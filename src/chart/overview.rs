use super::*;

/// Derives the options of the small overview chart from the main chart
/// options. The overview only navigates: no legend, labels, hover or tooltip.
pub fn overview_options(options: &ChartOptions) -> ChartOptions {
    let mut overview = options.clone();

    // points only when the linked chart hides its lines
    let show_points = !options.series.shows_lines();

    overview.series.shadow_size = Some(0);
    overview
        .series
        .lines
        .get_or_insert_with(LineOptions::default)
        .line_width = Some(1);
    overview.series.points = Some(PointOptions {
        show: show_points,
        radius: Some(1),
    });

    for axis in [&mut overview.xaxis, &mut overview.yaxis] {
        axis.ticks = Some(Ticks::Count(2));
        axis.axis_label = None;
    }

    overview.legend = LegendOptions {
        no_columns: options.legend.no_columns,
        show: false,
        container: None,
    };
    overview.grid.hoverable = false;
    overview.tooltip = false;
    overview.tooltip_opts = None;

    overview
}
