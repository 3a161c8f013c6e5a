// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold chart demos for `vizir_threshold`.
mod html;

use vizir_threshold::{
    ChartData, Interpolation, MaskNames, Series, Size, ThresholdOptions, ThresholdSpec, Value,
    threshold_plugin,
};
use vizir_threshold_svg::{Chart, ChartKind, LineOptions};

const SIZE: Size = Size {
    width: 640.0,
    height: 240.0,
};

fn main() {
    let sections = vec![
        constant_demo(),
        levels_demo(),
        series_reference_demo(),
        scatter_demo(),
        bar_demo(),
    ];

    let html = html::render_report("VizIR threshold demo", &sections);
    std::fs::write("vizir_threshold_demo.html", html).expect("write vizir_threshold_demo.html");
    println!("wrote vizir_threshold_demo.html");
}

/// Every chart on the page shares one document, so mask ids get a per-chart stem.
fn masks(stem: &str) -> MaskNames {
    MaskNames {
        above_threshold: format!("{stem}-mask-above"),
        below_threshold: format!("{stem}-mask-below"),
        prefix_threshold: format!("{stem}-mask-between"),
    }
}

fn render(chart: &Chart, options: ThresholdOptions) -> String {
    let attach = threshold_plugin(options);
    let plugin = attach(&chart.data).expect("threshold resolves against demo data");
    chart.render(&[&plugin]).to_svg_string()
}

fn line_chart(data: ChartData, line: LineOptions) -> Chart {
    Chart::new(ChartKind::Line(line), data, SIZE).with_padding(16.0)
}

fn constant_demo() -> html::HtmlSection {
    let data = ChartData::new()
        .with_labels((1..=12).map(|i| i.to_string()))
        .with_series(Series::new([
            5.0, -4.0, 3.0, 7.0, 20.0, 10.0, 3.0, 4.0, 8.0, -10.0, 6.0, -8.0,
        ]));
    let chart = line_chart(data, LineOptions::default().with_area(true));
    let options = ThresholdOptions::new(4.0).with_mask_names(masks("constant"));
    html::HtmlSection {
        title: "Constant threshold",
        description: "Line, area and points split at y = 4; values equal to the threshold count as above.",
        svg: render(&chart, options),
    }
}

fn levels_demo() -> html::HtmlSection {
    let data = ChartData::new().with_series(Series::new([
        -6.0, 2.0, 8.0, 14.0, 22.0, 17.0, 11.0, 4.0, -3.0, 9.0, 19.0, 25.0,
    ]));
    let chart = line_chart(
        data,
        LineOptions::default()
            .with_area(true)
            .with_line_smooth(Interpolation::cardinal()),
    );
    // Options arrive as JSON in embedding hosts.
    let options = ThresholdOptions::from_json(
        r#"{ "thresholds": [0, 10, 20], "lineSmooth": "cardinal", "maskPadding": 12 }"#,
    )
    .expect("demo options parse")
    .with_mask_names(masks("levels"));
    html::HtmlSection {
        title: "Threshold levels",
        description: "Levels 0, 10 and 20 make four horizontal bands: below, between-0, between-1 and above.",
        svg: render(&chart, options),
    }
}

fn series_reference_demo() -> html::HtmlSection {
    let data = ChartData::new()
        .with_series(Series::new([
            3.0, 5.0, 9.0, 12.0, 10.0, 7.0, 6.0, 8.0, 13.0, 15.0,
        ]))
        .with_series(
            Series::new([4.0, 5.0, 6.0, 8.0, 9.0, 9.0, 8.0, 8.0, 10.0, 12.0]).with_name("target"),
        );
    let chart = line_chart(data, LineOptions::default());
    let options = ThresholdOptions::new("target").with_mask_names(masks("reference"));
    html::HtmlSection {
        title: "Series reference",
        description: "The named series `target` is the threshold; it is drawn but never classified.",
        svg: render(&chart, options),
    }
}

fn scatter_demo() -> html::HtmlSection {
    let xs = [0.5, 1.0, 2.5, 3.0, 4.5, 6.0, 7.5];
    let ys = [2.0, 6.0, 3.0, 8.0, 5.0, 9.0, 4.0];
    let data = ChartData::new().with_series(Series::new(
        xs.iter().zip(ys).map(|(&x, y)| Value::point(x, y)),
    ));
    let threshold =
        ThresholdSpec::explicit(xs.iter().map(|&x| Value::point(x, 3.0 + x * 0.6)));
    let chart = line_chart(data, LineOptions::default());
    let options = ThresholdOptions::new(threshold).with_mask_names(masks("scatter"));
    html::HtmlSection {
        title: "Multi-dimensional data",
        description: "Explicit {x, y} threshold values, matched to data points by x.",
        svg: render(&chart, options),
    }
}

fn bar_demo() -> html::HtmlSection {
    let data = ChartData::new()
        .with_labels(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
        .with_series(Series::new([4.0, -2.0, 7.0, 1.0, 9.0, 3.0, -5.0]));
    let chart = Chart::bar(data, SIZE).with_padding(16.0);
    let options = ThresholdOptions::new(2.0).with_mask_names(masks("bar"));
    html::HtmlSection {
        title: "Bars",
        description: "Each bar is masked; a bar crossing the threshold shows both colors.",
        svg: render(&chart, options),
    }
}
