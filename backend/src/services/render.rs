//! Plotly chart rendering for the dashboard.
//!
//! Figures are built as `serde_json` values and embedded into HTML fragments
//! that call `Plotly.newPlot`. The Plotly library itself is referenced once,
//! from the document head.

use serde_json::{json, Value};

use crate::api::{DatasetSummary, PivotMatrix, TimelineSeries};

/// Plotly bundle loaded by every rendered document.
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub const DOCUMENT_TITLE: &str = "RSF Gym Occupancy Dashboard";

/// Rendering parameters shared by both views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Colour-scale maximum, in percent.
    pub zmax: f64,
    /// Multiplier from stored fractions to displayed percent.
    pub percent_scale: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            zmax: 120.0,
            percent_scale: 100.0,
        }
    }
}

/// Heatmap figure: weekdays on y, time-of-day labels on x.
pub fn heatmap_figure(matrix: &PivotMatrix, opts: &RenderOptions) -> Value {
    let y: Vec<&str> = matrix.weekdays.iter().map(|d| d.name()).collect();
    json!({
        "data": [{
            "type": "heatmap",
            "z": matrix.scaled(opts.percent_scale),
            "x": matrix.column_labels(),
            "y": y,
            "colorscale": "YlGnBu",
            "zmin": 0,
            "zmax": opts.zmax,
            "hoverongaps": false,
            "colorbar": { "title": { "text": "% filled" } },
        }],
        "layout": {
            "title": { "text": "Average % filled by weekday and time of day" },
            "xaxis": { "title": { "text": "Time of day" }, "type": "category" },
            "yaxis": { "autorange": "reversed", "type": "category" },
            "margin": { "t": 48 },
        },
    })
}

/// Line chart with one trace per weekday that has data.
pub fn timeline_figure(series: &[TimelineSeries], opts: &RenderOptions) -> Value {
    let traces: Vec<Value> = series
        .iter()
        .filter(|s| !s.points.is_empty())
        .map(|s| {
            let x: Vec<u16> = s.points.iter().map(|p| p.minutes).collect();
            let y: Vec<f64> = s.points.iter().map(|p| p.avg_fill).collect();
            let labels: Vec<&str> = s.points.iter().map(|p| p.bucket_label.as_str()).collect();
            json!({
                "type": "scatter",
                "mode": "lines",
                "name": s.weekday.name(),
                "x": x,
                "y": y,
                "text": labels,
                "hovertemplate": "%{text}: %{y:.0%}<extra>%{fullData.name}</extra>",
            })
        })
        .collect();

    let (tick_vals, tick_text) = hour_ticks();
    json!({
        "data": traces,
        "layout": {
            "title": { "text": "Timeline by weekday" },
            "xaxis": {
                "title": { "text": "Time of day" },
                "tickmode": "array",
                "tickvals": tick_vals,
                "ticktext": tick_text,
                "range": [0, 24 * 60],
            },
            "yaxis": {
                "title": { "text": "% filled" },
                "range": [0.0, opts.zmax / opts.percent_scale],
                "tickformat": ".0%",
            },
            "margin": { "t": 48 },
        },
    })
}

/// Tick positions every two hours, 00:00 through 24:00.
pub fn hour_ticks() -> (Vec<u16>, Vec<String>) {
    (0..=24u16)
        .step_by(2)
        .map(|h| (h * 60, format!("{:02}:00", h)))
        .unzip()
}

/// `<div>` plus inline script drawing `figure` into it.
pub fn figure_fragment(div_id: &str, figure: &Value) -> String {
    let data = script_safe_json(&figure["data"]);
    let layout = script_safe_json(&figure["layout"]);
    format!(
        r#"<div id="{id}" class="plotly-graph-div" style="height:480px; width:100%;"></div>
<script type="text/javascript">
  Plotly.newPlot("{id}", {data}, {layout}, {{"responsive": true}});
</script>"#,
        id = div_id,
        data = data,
        layout = layout,
    )
}

/// JSON text that cannot terminate the surrounding `<script>` element.
fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Complete HTML document with both views.
pub fn render_document(
    heatmap: &PivotMatrix,
    timeline: &[TimelineSeries],
    summary: Option<&DatasetSummary>,
    opts: &RenderOptions,
) -> String {
    let hm_html = figure_fragment("heatmap", &heatmap_figure(heatmap, opts));
    let ln_html = figure_fragment("timeline", &timeline_figure(timeline, opts));
    let summary_html = summary.map(summary_line).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 0; padding: 16px; }}
    h1 {{ margin: 0 0 8px 0; }}
    .section {{ margin-top: 24px; }}
    .summary {{ color: #555; }}
  </style>
  <link rel="preconnect" href="https://cdn.plot.ly" />
  <meta name="description" content="Interactive heatmap and timeline of RSF gym occupancy" />
  <meta name="robots" content="noindex" />
  <meta name="color-scheme" content="light dark" />
  <meta name="referrer" content="no-referrer" />
  <meta http-equiv="Cache-Control" content="no-cache, no-store, must-revalidate" />
  <meta name="generator" content="rsf-occupancy {version}" />
  <script src="{cdn}" charset="utf-8"></script>
</head>
<body>
  <h1>{title}</h1>
{summary_html}  <div class="section">
    <h2>Heatmap: Average % filled</h2>
    {hm_html}
  </div>
  <div class="section">
    <h2>Timeline by weekday</h2>
    {ln_html}
  </div>
</body>
</html>
"#,
        title = DOCUMENT_TITLE,
        version = env!("CARGO_PKG_VERSION"),
        cdn = PLOTLY_CDN_URL,
        summary_html = summary_html,
        hm_html = hm_html,
        ln_html = ln_html,
    )
}

fn summary_line(summary: &DatasetSummary) -> String {
    let range = match (summary.first_timestamp, summary.last_timestamp) {
        (Some(first), Some(last)) => format!(
            " from {} to {}",
            first.format("%Y-%m-%d %H:%M"),
            last.format("%Y-%m-%d %H:%M")
        ),
        _ => String::new(),
    };
    let scope = if summary.filter_open_hours {
        "open hours only"
    } else {
        "all hours"
    };
    format!(
        "  <p class=\"summary\">{} of {} samples{} ({}, {} rows dropped)</p>\n",
        summary.samples_used, summary.samples_loaded, range, scope, summary.rows_dropped
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AggregateRow, TimeBucket, Weekday};

    fn matrix() -> PivotMatrix {
        let mut values = vec![vec![None, None]; 7];
        values[0] = vec![Some(0.5), None];
        values[5] = vec![None, Some(1.1)];
        PivotMatrix {
            weekdays: Weekday::ALL.to_vec(),
            times: vec![
                TimeBucket::from_minutes(420).unwrap(),
                TimeBucket::from_minutes(1080).unwrap(),
            ],
            values,
        }
    }

    fn series() -> Vec<TimelineSeries> {
        Weekday::ALL
            .iter()
            .map(|&weekday| TimelineSeries {
                weekday,
                points: if weekday == Weekday::Monday {
                    vec![AggregateRow {
                        weekday,
                        bucket_label: "07:00".to_string(),
                        minutes: 420,
                        avg_fill: 0.5,
                        samples: 2,
                    }]
                } else {
                    vec![]
                },
            })
            .collect()
    }

    #[test]
    fn test_heatmap_scales_values_and_keeps_gaps() {
        let fig = heatmap_figure(&matrix(), &RenderOptions::default());
        let trace = &fig["data"][0];
        assert_eq!(trace["z"][0][0], 50.0);
        assert!(trace["z"][0][1].is_null());
        assert_eq!(trace["z"][5][1].as_f64().map(|v| v.round()), Some(110.0));
        assert_eq!(trace["x"], json!(["07:00", "18:00"]));
        assert_eq!(trace["y"][0], "Monday");
        assert_eq!(trace["colorscale"], "YlGnBu");
        assert_eq!(trace["zmin"], 0);
        assert_eq!(trace["zmax"], 120.0);
    }

    #[test]
    fn test_timeline_axes() {
        let opts = RenderOptions {
            zmax: 90.0,
            percent_scale: 100.0,
        };
        let fig = timeline_figure(&series(), &opts);
        assert_eq!(fig["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(fig["data"][0]["name"], "Monday");
        assert_eq!(fig["layout"]["yaxis"]["range"][1], 0.9);
        assert_eq!(fig["layout"]["yaxis"]["tickformat"], ".0%");
        assert_eq!(fig["layout"]["xaxis"]["tickvals"][12], 1440);
        assert_eq!(fig["layout"]["xaxis"]["ticktext"][1], "02:00");
    }

    #[test]
    fn test_hour_ticks() {
        let (vals, text) = hour_ticks();
        assert_eq!(vals.len(), 13);
        assert_eq!(vals.first(), Some(&0));
        assert_eq!(vals.last(), Some(&1440));
        assert_eq!(text.first().map(String::as_str), Some("00:00"));
        assert_eq!(text.last().map(String::as_str), Some("24:00"));
    }

    #[test]
    fn test_fragment_escapes_script_close() {
        let fig = json!({ "data": [{ "name": "</script><b>" }], "layout": {} });
        let html = figure_fragment("x", &fig);
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script><b>"));
        assert!(html.contains(r#"Plotly.newPlot("x""#));
    }

    #[test]
    fn test_document_loads_plotly_once() {
        let html = render_document(&matrix(), &series(), None, &RenderOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<script src=").count(), 1);
        assert!(html.contains(PLOTLY_CDN_URL));
        assert!(html.contains("<title>RSF Gym Occupancy Dashboard</title>"));
        assert!(html.contains("id=\"heatmap\""));
        assert!(html.contains("id=\"timeline\""));
        assert!(!html.contains("class=\"summary\""));
    }

    #[test]
    fn test_document_summary_line() {
        let summary = DatasetSummary {
            rows_read: 10,
            rows_dropped: 1,
            samples_loaded: 9,
            samples_used: 7,
            first_timestamp: None,
            last_timestamp: None,
            filter_open_hours: true,
        };
        let html = render_document(&matrix(), &series(), Some(&summary), &RenderOptions::default());
        assert!(html.contains("7 of 9 samples (open hours only, 1 rows dropped)"));
    }
}
