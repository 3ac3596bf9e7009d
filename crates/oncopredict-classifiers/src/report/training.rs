use maud::{html, Markup};

use crate::model_selection::TrainingReport;
use crate::report::{Report, ReportSection};
use crate::stats::ClassificationScores;

fn pct(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

fn scores_cells(s: &ClassificationScores) -> Markup {
    html! {
        td { (pct(s.f1)) }
        td { (pct(s.accuracy)) }
        td { (pct(s.precision)) }
        td { (pct(s.recall)) }
    }
}

/// Build the sectioned report of one training run.
pub fn training_report(report: &TrainingReport, version: &str) -> Report {
    let mut out = Report::new("oncopredict", version, "Model Training Report");

    /* Section 1: Overview */
    {
        let mut overview = ReportSection::new("Overview");
        overview.add_content(html! {
            p {
                "Selected model: " strong { (report.selected) }
                " (highest F1 on the validation partition)."
            }
            p {
                "Test accuracy " strong { (pct(report.test.accuracy)) }
                ", test F1 " strong { (pct(report.test.f1)) }
                ". Test metrics are reported only and play no part in selection."
            }
            p class="muted" { "Trained at " (report.trained_at) " with seed " (report.seed) "." }
        });
        out.add_section(overview);
    }

    /* Section 2: Candidates */
    {
        let mut candidates = ReportSection::new("Validation Metrics");
        candidates.add_content(html! {
            table {
                thead {
                    tr { th { "Model" } th { "F1" } th { "Accuracy" } th { "Precision" } th { "Recall" } }
                }
                tbody {
                    @for c in &report.candidates {
                        tr class=[(c.kind == report.selected).then_some("selected")] {
                            td { (c.kind) }
                            (scores_cells(&c.validation))
                        }
                    }
                }
            }
        });
        out.add_section(candidates);
    }

    /* Section 3: Preprocessing */
    {
        let mut preprocessing = ReportSection::new("Preprocessing");
        preprocessing.add_content(html! {
            table {
                tbody {
                    tr { td { "Rows loaded" } td { (report.rows_before) } }
                    tr {
                        td { "Outliers removed (|z| > " (report.outlier_z_threshold) ")" }
                        td { (report.outliers_removed) }
                    }
                    tr { td { "Rows after cleaning" } td { (report.rows_after()) } }
                    tr { td { "Training rows" } td { (report.split.train) } }
                    tr { td { "Validation rows" } td { (report.split.validation) } }
                    tr { td { "Test rows" } td { (report.split.test) } }
                    tr { td { "Features" } td { (report.feature_names.len()) } }
                }
            }
            p class="muted" { "Standardization is fit on the training rows only." }
        });
        out.add_section(preprocessing);
    }

    /* Section 4: Raw report */
    {
        let mut raw = ReportSection::new("Raw Report");
        let json = serde_json::to_string_pretty(report).unwrap_or_default();
        raw.add_content(html! {
            pre { code { (json) } }
        });
        out.add_section(raw);
    }

    out
}

/// Render a training report as a standalone HTML document.
pub fn training_report_html(report: &TrainingReport) -> Markup {
    training_report(report, env!("CARGO_PKG_VERSION")).render()
}
