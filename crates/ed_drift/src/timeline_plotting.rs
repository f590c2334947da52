use plotters::prelude::*;
use plotters::style::Palette99;

use crate::timeline::Timeline;

/// Plot the ensemble mean richness against time (in generations) on
/// log-log axes, the classic neutral-drift decay curve.
pub fn plot_richness_decay(timeline: &Timeline, filename: &str) {
    let series: Vec<(f64, f64)> = timeline.mean_richness()
        .into_iter()
        .filter(|&(g, _)| g > 0.0)
        .collect();
    assert!(!series.is_empty(), "Nothing to plot: no sampled generations > 0");

    let runs = timeline.points[0].replicates;
    let title = format!("Voter Model richness decay ({} runs, J={})",
        runs, timeline.individuals);

    let t_min = series.first().unwrap().0;
    let t_max = series.last().unwrap().0;
    let s_max = series.iter().map(|&(_, s)| s).fold(1.0, f64::max);

    let root = SVGBackend::new(filename, (800, 520)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((t_min..t_max).log_scale(), (1.0..s_max * 1.1).log_scale())
        .unwrap();

    chart
        .configure_mesh()
        .x_desc("time (generations)")
        .y_desc("mean richness")
        .x_label_formatter(&|x| if *x < 0.01 { format!("{:.1e}", x) } else { format!("{}", x) })
        .light_line_style(RGBColor(220, 220, 220))
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 15))
        .draw()
        .unwrap();

    chart.draw_series(LineSeries::new(
        series.iter().cloned(),
        Palette99::pick(0).mix(0.9).stroke_width(2),
    )).unwrap();

    root.present().unwrap();
}

/// Plot the occupancy (fraction of all recorded individuals) of the
/// `top_n` most abundant species over time on a log-scaled time axis.
pub fn plot_abundance_trajectories(timeline: &Timeline, filename: &str, top_n: usize) {
    let sampled: Vec<&crate::timeline::Timepoint> = timeline.points.iter()
        .filter(|tp| tp.replicates > 0 && tp.generation > 0.0)
        .collect();
    assert!(!sampled.is_empty(), "Nothing to plot: no sampled generations > 0");

    let runs = timeline.points[0].replicates;
    let title = format!("Species abundance trajectories ({} runs, J={})",
        runs, timeline.individuals);

    let t_min = sampled.first().unwrap().generation;
    let t_max = sampled.last().unwrap().generation;

    let root = SVGBackend::new(filename, (1024, 520)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 24))
        .margin(20)
        .margin_right(40)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((t_min..t_max).log_scale(), 0.0..1.0)
        .unwrap();

    chart
        .configure_mesh()
        .x_desc("time (generations)")
        .y_desc("occupancy")
        .x_label_formatter(&|x| if *x < 0.01 { format!("{:.1e}", x) } else { format!("{}", x) })
        .y_labels(10)
        .light_line_style(RGBColor(220, 220, 220))
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 15))
        .draw()
        .unwrap();

    for (i, sp) in timeline.ranked_species().into_iter().take(top_n).enumerate() {
        let color = Palette99::pick(i).mix(0.9);
        let series: Vec<(f64, f64)> = sampled.iter()
            .map(|tp| (tp.generation, tp.occupancy(sp)))
            .collect();

        chart.draw_series(LineSeries::new(
            series.into_iter(),
            color.stroke_width(2),
        )).unwrap()
            .label(format!("species {}", sp))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 15).into_font())
        .draw().unwrap();

    root.present().unwrap();
}
