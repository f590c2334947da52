use plotters::prelude::*;
use plotters::style::Palette99;

use ed_community::AbundanceVector;

use crate::relative_rank_abundance;

/// Plot rank-abundance curves for several named samples on a log-scaled
/// abundance axis, one colored line per sample.
pub fn plot_rank_abundance(samples: &[(&str, AbundanceVector)], filename: &str) {
    let max_rank = samples.iter()
        .map(|(_, av)| av.richness() as usize)
        .max()
        .unwrap_or(0);
    assert!(max_rank > 0, "Nothing to plot: all samples are empty");

    let min_rel = samples.iter()
        .flat_map(|(_, av)| relative_rank_abundance(av))
        .fold(1.0, f64::min);

    let root = SVGBackend::new(filename, (800, 520)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&root)
        .caption("Rank abundance", ("sans-serif", 24))
        .margin(20)
        .margin_right(40)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..(max_rank + 1) as f64, (min_rel * 0.5..1.0).log_scale())
        .unwrap();

    chart
        .configure_mesh()
        .x_desc("rank")
        .y_desc("relative abundance")
        .y_label_formatter(&|y| format!("{:.1e}", y))
        .light_line_style(RGBColor(220, 220, 220))
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 15))
        .draw()
        .unwrap();

    for (i, (name, av)) in samples.iter().enumerate() {
        let color = Palette99::pick(i).mix(0.9);
        let series: Vec<(f64, f64)> = relative_rank_abundance(av)
            .into_iter()
            .enumerate()
            .map(|(rank, p)| ((rank + 1) as f64, p))
            .collect();

        chart.draw_series(LineSeries::new(
            series.into_iter(),
            color.stroke_width(2),
        )).unwrap()
            .label(name.to_string())
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
