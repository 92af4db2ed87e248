//! HTML Rendering
//!
//! Renders a [`Document`] as a self-contained dashboard page. Charts are
//! drawn client-side by Plotly.js from the embedded plot specifications.

use crate::dashboard::charts::{ChartRegion, Placeholder};
use crate::dashboard::plot::PlotSpec;
use crate::page::document::{Content, Document};
use crate::page::ids;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Render the whole dashboard page
pub fn render_page(doc: &Document) -> String {
    let mut scripts = Vec::new();

    let charts: String = ChartRegion::ALL
        .iter()
        .map(|region| render_chart_card(doc, *region, &mut scripts))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Toronto 311 Service Requests Dashboard</title>
    <script src="{plotly}"></script>
    <style>{css}</style>
</head>
<body>
    <header class="header">
        <h1>Toronto 311 Service Requests Dashboard</h1>
        <div class="status-bar">
            <span id="{data_status_id}">{data_status}</span>
            <span id="{last_updated_id}">{last_updated}</span>
            <form method="post" action="/refresh"><button type="submit">Refresh</button></form>
        </div>
    </header>
    <main class="container">
        <section class="kpi-grid">{kpis}</section>
        <section class="chart-grid">{charts}</section>
        <section class="model-grid">{model}{best}</section>
        <section class="prediction">{form}{results}</section>
    </main>
    {modal}
    {overlay}
    <script>{scripts}</script>
</body>
</html>"#,
        plotly = PLOTLY_CDN,
        css = inline_css(),
        data_status_id = ids::DATA_STATUS,
        data_status = own_text(doc, ids::DATA_STATUS),
        last_updated_id = ids::LAST_UPDATED,
        last_updated = own_text(doc, ids::LAST_UPDATED),
        kpis = render_kpis(doc),
        charts = charts,
        model = render_model_metrics(doc),
        best = render_best_performers(doc),
        form = render_form(doc),
        results = render_results(doc),
        modal = render_error_modal(doc),
        overlay = render_overlay(doc),
        scripts = scripts.join("\n"),
    )
}

fn render_kpis(doc: &Document) -> String {
    [
        (ids::TOTAL_REQUESTS, "Total Requests"),
        (ids::COMPLETION_RATE, "Completion Rate (%)"),
        (ids::TOP_WARD, "Top Ward"),
        (ids::TOP_SERVICE_TYPE, "Top Service Type"),
    ]
    .iter()
    .filter(|(id, _)| doc.element(id).is_some())
    .map(|(id, label)| {
        let value = doc
            .selected_text(id, ids::KPI_VALUE_SELECTOR)
            .or_else(|| doc.text(id))
            .map(html_escape)
            .unwrap_or_default();
        format!(
            r#"<div id="{id}" class="kpi-card"><div class="kpi-label">{label}</div><div class="kpi-value">{value}</div></div>"#,
        )
    })
    .collect()
}

fn render_model_metrics(doc: &Document) -> String {
    let rows = labelled_rows(
        doc,
        &[
            (ids::ML_ACCURACY, "Accuracy"),
            (ids::ML_PRECISION, "Precision"),
            (ids::ML_RECALL, "Recall"),
            (ids::ML_F1_SCORE, "F1 Score"),
        ],
    );
    format!(r#"<div class="card"><h2>Model Performance</h2>{rows}</div>"#)
}

fn render_best_performers(doc: &Document) -> String {
    let rows = labelled_rows(
        doc,
        &[
            (ids::BEST_SERVICE_TYPE, "Best Service Type"),
            (ids::BEST_WARD, "Best Ward"),
            (ids::BEST_DIVISION, "Best Division"),
        ],
    );
    format!(r#"<div class="card"><h2>Best Performers</h2>{rows}</div>"#)
}

fn labelled_rows(doc: &Document, rows: &[(&str, &str)]) -> String {
    rows.iter()
        .filter(|(id, _)| doc.element(id).is_some())
        .map(|(id, label)| {
            format!(
                r#"<div class="metric-row"><span>{label}</span><span id="{id}">{value}</span></div>"#,
                value = own_text(doc, id),
            )
        })
        .collect()
}

fn render_chart_card(doc: &Document, region: ChartRegion, scripts: &mut Vec<String>) -> String {
    let id = region.element_id();
    let Some(element) = doc.element(id) else {
        return String::new();
    };

    let body = match &element.content {
        Content::Plot(spec) => {
            scripts.push(plot_script(id, spec));
            String::new()
        }
        Content::Placeholder(placeholder) => render_placeholder(placeholder),
        _ => element.text.as_deref().map(html_escape).unwrap_or_default(),
    };

    format!(
        r#"<div class="card"><h2>{title}</h2><div id="{id}" class="chart">{body}</div></div>"#,
        title = region.title(),
    )
}

/// `Plotly.newPlot` call with the spec embedded as JSON
fn plot_script(id: &str, spec: &PlotSpec) -> String {
    format!(
        "Plotly.newPlot({id}, {data}, {layout}, {config});",
        id = script_json(id),
        data = script_json(&spec.data),
        layout = script_json(&spec.layout),
        config = script_json(&spec.config),
    )
}

/// Serialize for inclusion inside a `<script>` element
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn render_placeholder(placeholder: &Placeholder) -> String {
    format!(
        r#"<div class="placeholder"><div class="placeholder-icon">{icon}</div><div class="placeholder-title">{title}</div><div class="placeholder-detail">{detail}</div><div class="placeholder-instruction">{instruction}</div></div>"#,
        icon = placeholder.icon,
        title = html_escape(placeholder.title),
        detail = html_escape(placeholder.detail),
        instruction = html_escape(placeholder.instruction),
    )
}

fn render_form(doc: &Document) -> String {
    let field = |id: &str, name: &str, label: &str, list: Option<&str>| {
        let value = doc.element(id).map(|e| html_escape(&e.value)).unwrap_or_default();
        let list_attr = list.map(|l| format!(r#" list="{l}""#)).unwrap_or_default();
        let datalist = list.map(|l| render_datalist(doc, l)).unwrap_or_default();
        format!(
            r#"<label for="{id}">{label}</label><input id="{id}" name="{name}" value="{value}"{list_attr}>{datalist}"#,
        )
    };

    let button_disabled = if doc.is_disabled(ids::PREDICT_BUTTON) {
        " disabled"
    } else {
        ""
    };

    format!(
        r#"<div class="card"><h2>Predict Request Completion</h2><form method="post" action="/predict">{service}{ward}{division}{postal}{time}{day}<button id="{button_id}" type="submit"{button_disabled}>{button_label}</button></form></div>"#,
        service = field(ids::SERVICE_TYPE_INPUT, "service_type", "Service Type *", Some(ids::SERVICE_TYPE_LIST)),
        ward = field(ids::WARD_INPUT, "ward", "Ward *", Some(ids::WARD_LIST)),
        division = field(ids::DIVISION_INPUT, "division", "Division *", Some(ids::DIVISION_LIST)),
        postal = field(ids::POSTAL_CODE_INPUT, "postal_code", "Postal Code", None),
        time = field(ids::TIME_OF_DAY_INPUT, "time_of_day", "Time of Day", None),
        day = field(ids::DAY_OF_WEEK_INPUT, "day_of_week", "Day of Week", None),
        button_id = ids::PREDICT_BUTTON,
        button_label = own_text(doc, ids::PREDICT_BUTTON),
    )
}

fn render_datalist(doc: &Document, id: &str) -> String {
    let options = match doc.content(id) {
        Some(Content::Options(options)) => options
            .iter()
            .map(|o| format!(r#"<option value="{}">"#, html_escape(o)))
            .collect(),
        _ => String::new(),
    };
    format!(r#"<datalist id="{id}">{options}</datalist>"#)
}

fn render_results(doc: &Document) -> String {
    let factors = match doc.content(ids::INFLUENCING_FACTORS) {
        Some(Content::Items(items)) => items
            .iter()
            .map(|f| format!("<li>{}</li>", html_escape(f)))
            .collect(),
        _ => String::new(),
    };

    format!(
        r#"<div class="card"><div id="{placeholder_id}" class="{placeholder_class}">Fill in the form to predict completion.</div><div id="{results_id}" class="{results_class}"><div class="metric-row"><span>Completion Probability</span><span id="{prob_id}">{prob}</span></div><div class="metric-row"><span>Predicted Outcome</span><span id="{outcome_id}">{outcome}</span></div><div class="metric-row"><span>Confidence</span><span id="{conf_id}">{conf}</span></div><h3>Influencing Factors</h3><ul id="{factors_id}">{factors}</ul></div></div>"#,
        placeholder_id = ids::PREDICTION_PLACEHOLDER,
        placeholder_class = class_list(doc, ids::PREDICTION_PLACEHOLDER),
        results_id = ids::PREDICTION_RESULTS,
        results_class = class_list(doc, ids::PREDICTION_RESULTS),
        prob_id = ids::PROBABILITY_PERCENT,
        prob = own_text(doc, ids::PROBABILITY_PERCENT),
        outcome_id = ids::OUTCOME_VALUE,
        outcome = own_text(doc, ids::OUTCOME_VALUE),
        conf_id = ids::CONFIDENCE_VALUE,
        conf = own_text(doc, ids::CONFIDENCE_VALUE),
        factors_id = ids::INFLUENCING_FACTORS,
    )
}

fn render_error_modal(doc: &Document) -> String {
    format!(
        r#"<div id="{modal_id}" class="modal {classes}"><div class="modal-content"><h2>Error</h2><p id="{message_id}">{message}</p><form method="post" action="/dismiss-error"><button id="{close_id}" type="submit">{close}</button></form></div></div>"#,
        modal_id = ids::ERROR_MODAL,
        classes = class_list(doc, ids::ERROR_MODAL),
        message_id = ids::ERROR_MESSAGE,
        message = own_text(doc, ids::ERROR_MESSAGE),
        close_id = ids::CLOSE_ERROR,
        close = own_text(doc, ids::CLOSE_ERROR),
    )
}

fn render_overlay(doc: &Document) -> String {
    format!(
        r#"<div id="{id}" class="{classes}"><div class="spinner"></div></div>"#,
        id = ids::LOADING_OVERLAY,
        classes = class_list(doc, ids::LOADING_OVERLAY),
    )
}

fn own_text(doc: &Document, id: &str) -> String {
    doc.text(id).map(html_escape).unwrap_or_default()
}

fn class_list(doc: &Document, id: &str) -> String {
    doc.element(id)
        .map(|e| {
            e.classes
                .iter()
                .map(|c| html_escape(c))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; background: #0f0f23; color: #ffffff; font-family: system-ui, sans-serif; }
.header { display: flex; justify-content: space-between; align-items: center; padding: 16px 24px; background: #16163a; }
.header h1 { font-size: 20px; margin: 0; }
.status-bar { display: flex; gap: 16px; align-items: center; color: #9ca3af; font-size: 14px; }
.container { padding: 24px; display: flex; flex-direction: column; gap: 24px; }
.kpi-grid, .chart-grid, .model-grid, .prediction { display: grid; gap: 16px; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); }
.kpi-card, .card { background: #1a1a3e; border-radius: 12px; padding: 16px; }
.kpi-label { color: #9ca3af; font-size: 13px; }
.kpi-value { font-size: 28px; font-weight: 700; margin-top: 8px; }
.card h2 { font-size: 16px; margin: 0 0 12px; }
.chart { min-height: 280px; }
.metric-row { display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid #374151; }
.placeholder { display: flex; flex-direction: column; align-items: center; justify-content: center; height: 280px; color: #9ca3af; text-align: center; padding: 20px; }
.placeholder-icon { font-size: 48px; margin-bottom: 16px; }
.placeholder-title { font-size: 16px; font-weight: 600; margin-bottom: 8px; }
.placeholder-detail { font-size: 14px; opacity: 0.8; }
.placeholder-instruction { font-size: 12px; opacity: 0.6; margin-top: 8px; }
form label { display: block; margin-top: 8px; color: #9ca3af; font-size: 13px; }
form input { width: 100%; padding: 8px; border-radius: 6px; border: 1px solid #374151; background: #0f0f23; color: #ffffff; }
button { margin-top: 12px; padding: 8px 16px; border: none; border-radius: 6px; background: #6366f1; color: #ffffff; cursor: pointer; }
button:disabled { opacity: 0.6; cursor: wait; }
.hidden { display: none !important; }
.modal { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); display: flex; align-items: center; justify-content: center; }
.modal-content { background: #1a1a3e; padding: 24px; border-radius: 12px; max-width: 420px; }
.loading-overlay { display: none; }
.loading-overlay.active { display: flex; position: fixed; inset: 0; background: rgba(15, 15, 35, 0.8); align-items: center; justify-content: center; }
.spinner { width: 40px; height: 40px; border: 4px solid #374151; border-top-color: #6366f1; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
"#
}
