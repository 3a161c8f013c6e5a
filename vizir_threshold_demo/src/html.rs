// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Write;

use peniko::Color;
use peniko::color::palette::css;

pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) svg: String,
}

fn hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

/// Colors the classes the threshold plugin emits. Class rules win over the chart's own
/// presentation attributes.
fn stylesheet() -> String {
    let above = hex(css::SEA_GREEN);
    let below = hex(css::CRIMSON);
    let between = [css::GOLDENROD, css::DARK_ORANGE];
    let mut out = String::new();
    let _ = writeln!(
        out,
        "body {{ font-family: sans-serif; margin: 2rem; background: #fafafa; }}\n\
         section {{ margin-bottom: 2.5rem; }}\n\
         svg {{ background: white; border: 1px solid #ddd; }}\n\
         .ct-line.ct-threshold-above {{ stroke: {above}; }}\n\
         .ct-point.ct-threshold-above, .ct-bar.ct-threshold-above {{ fill: {above}; }}\n\
         .ct-area.ct-threshold-above {{ fill: {above}; fill-opacity: 0.25; }}\n\
         .ct-line.ct-threshold-below {{ stroke: {below}; }}\n\
         .ct-point.ct-threshold-below, .ct-bar.ct-threshold-below {{ fill: {below}; }}\n\
         .ct-area.ct-threshold-below {{ fill: {below}; fill-opacity: 0.25; }}"
    );
    for (i, color) in between.into_iter().enumerate() {
        let c = hex(color);
        let _ = writeln!(
            out,
            ".ct-line.ct-threshold-between-{i} {{ stroke: {c}; }}\n\
             .ct-point.ct-threshold-between-{i}, .ct-bar.ct-threshold-between-{i} {{ fill: {c}; }}\n\
             .ct-area.ct-threshold-between-{i} {{ fill: {c}; fill-opacity: 0.25; }}"
        );
    }
    out
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{}</style>\n</head>\n<body>\n<h1>{title}</h1>\n",
        stylesheet()
    );
    for section in sections {
        let _ = write!(
            out,
            "<section>\n<h2>{}</h2>\n<p>{}</p>\n{}</section>\n",
            section.title, section.description, section.svg
        );
    }
    out.push_str("</body>\n</html>\n");
    out
}
