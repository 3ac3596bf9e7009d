//! Minimal sectioned HTML reports rendered with maud.
//!
//! Local stand-in for the `Report`/`ReportSection` API of the
//! `report-builder` package, which is only published as a git dependency.
//! Sections are added with [`ReportSection::add_content`] and the page is
//! written with [`Report::save_to_file`].
mod training;

pub use training::{training_report, training_report_html};

use std::fs;
use std::path::Path;

use maud::{html, Markup, DOCTYPE};

use crate::error::{ClassifierError, Result};

const REPORT_STYLE: &str = "
body { font-family: Helvetica, Arial, sans-serif; margin: 0 auto; max-width: 960px; color: #222; }
header { border-bottom: 2px solid #c2185b; margin-bottom: 1.5em; }
section { margin-bottom: 2em; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 6px 10px; text-align: right; }
th:first-child, td:first-child { text-align: left; }
tr.selected { background-color: #fce4ec; font-weight: bold; }
.muted { color: #777; font-size: 0.9em; }
";

pub struct ReportSection {
    title: String,
    content: Vec<Markup>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        ReportSection {
            title: title.to_string(),
            content: Vec::new(),
        }
    }

    pub fn add_content(&mut self, content: Markup) {
        self.content.push(content);
    }

    fn render(&self) -> Markup {
        html! {
            section {
                h2 { (self.title) }
                @for block in &self.content {
                    div { (block) }
                }
            }
        }
    }
}

pub struct Report {
    tool: String,
    version: String,
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(tool: &str, version: &str, title: &str) -> Self {
        Report {
            tool: tool.to_string(),
            version: version.to_string(),
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn render(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    style { (REPORT_STYLE) }
                }
                body {
                    header {
                        h1 { (self.title) }
                        p class="muted" { (self.tool) " v" (self.version) }
                    }
                    @for section in &self.sections {
                        (section.render())
                    }
                }
            }
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render().into_string()).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
