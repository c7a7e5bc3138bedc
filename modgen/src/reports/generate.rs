//! Generate command report data structures.

use modgen_codegen::{Diagnostic, FileCategory, Generation};
use modgen_core::Action;
use serde::Serialize;

use super::output::{Output, Report};

/// How much of the plan to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Summary line only.
    Summary,
    /// Every planned change, grouped by category.
    #[default]
    Plan,
    /// The plan followed by the contents of created and updated files.
    Diff,
}

/// One planned file.
#[derive(Debug, Serialize)]
pub struct ChangeEntry {
    pub path: String,
    pub action: Action,
    pub category: FileCategory,
    #[serde(skip)]
    pub content: String,
}

impl ChangeEntry {
    fn marker(&self) -> char {
        match self.action {
            Action::Create => '+',
            Action::Update => '~',
            Action::Skip => '=',
        }
    }
}

/// Counts per action.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// Report data from a generation run.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    /// Whether the changes were only planned.
    pub dry_run: bool,

    pub summary: Summary,

    /// Planned files in category order.
    pub changes: Vec<ChangeEntry>,

    /// Lint findings.
    pub diagnostics: Vec<Diagnostic>,

    #[serde(skip)]
    pub detail: Detail,
}

impl GenerateReport {
    pub fn new(generation: Generation, detail: Detail) -> Self {
        let summary = Summary {
            created: generation.created(),
            updated: generation.updated(),
            unchanged: generation.unchanged(),
        };
        let changes = generation
            .changes
            .into_iter()
            .map(|change| ChangeEntry {
                path: change.path.to_string_lossy().replace('\\', "/"),
                category: FileCategory::of(&change.path),
                action: change.action,
                content: change.content,
            })
            .collect();

        Self {
            dry_run: generation.dry_run,
            summary,
            changes,
            diagnostics: generation.diagnostics,
            detail,
        }
    }

    /// `N created, M updated, K unchanged`, prefixed when dry-running.
    pub fn summary_line(&self) -> String {
        let counts = format!(
            "{} created, {} updated, {} unchanged",
            self.summary.created, self.summary.updated, self.summary.unchanged
        );
        if self.dry_run {
            format!("Dry run: {counts}")
        } else {
            counts
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn render_plan(&self, out: &mut dyn Output) {
        for category in FileCategory::ALL {
            let mut entries = self.changes.iter().filter(|c| c.category == category).peekable();
            if entries.peek().is_none() {
                continue;
            }
            out.section(category.label());
            for entry in entries {
                out.change(entry.marker(), &entry.path);
            }
            out.newline();
        }
    }

    fn render_diff(&self, out: &mut dyn Output) {
        for entry in self.changes.iter().filter(|c| c.action.writes()) {
            out.divider(&entry.path);
            out.preformatted(entry.content.trim_end());
        }
        if self.changes.iter().any(|c| c.action.writes()) {
            out.newline();
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for diagnostic in &self.diagnostics {
            out.diagnostic(&diagnostic.to_string());
        }

        match self.detail {
            Detail::Summary => {}
            Detail::Plan => self.render_plan(out),
            Detail::Diff => {
                self.render_plan(out);
                self.render_diff(out);
            }
        }

        out.preformatted(&self.summary_line());
    }
}

#[cfg(test)]
mod tests {
    use modgen_core::FileChange;

    use super::*;
    use crate::reports::output::RecordingOutput;

    fn generation(dry_run: bool) -> Generation {
        Generation {
            changes: vec![
                FileChange::new("src/modules/wipers/index.ts", "index\n", Action::Skip),
                FileChange::new("src/modules/wipers/models/wiper.ts", "model\n", Action::Update),
                FileChange::new("src/api/admin/wipers/route.ts", "route\n", Action::Create),
            ],
            diagnostics: vec![
                Diagnostic::warning("empty-model", "model 'wiper' has no fields")
                    .at("wipers.wiper"),
            ],
            dry_run,
        }
    }

    fn render(report: &GenerateReport) -> RecordingOutput {
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        out
    }

    #[test]
    fn test_plan_is_grouped_by_category() {
        let out = render(&GenerateReport::new(generation(false), Detail::Plan));
        assert_eq!(
            out.stdout,
            [
                "Modules:",
                "  = src/modules/wipers/index.ts",
                "",
                "Models:",
                "  ~ src/modules/wipers/models/wiper.ts",
                "",
                "API:",
                "  + src/api/admin/wipers/route.ts",
                "",
                "1 created, 1 updated, 1 unchanged",
            ]
        );
    }

    #[test]
    fn test_diagnostics_go_to_stderr() {
        let out = render(&GenerateReport::new(generation(false), Detail::Summary));
        assert_eq!(out.stderr, ["warning: model 'wiper' has no fields (at wipers.wiper)"]);
        assert_eq!(out.stdout, ["1 created, 1 updated, 1 unchanged"]);
    }

    #[test]
    fn test_diff_shows_written_files_only() {
        let out = render(&GenerateReport::new(generation(true), Detail::Diff));
        assert!(out.stdout.contains(&"── src/api/admin/wipers/route.ts ──".to_string()));
        assert!(out.stdout.contains(&"route".to_string()));
        assert!(!out.stdout.contains(&"── src/modules/wipers/index.ts ──".to_string()));
        assert_eq!(
            out.stdout.last().unwrap(),
            "Dry run: 1 created, 1 updated, 1 unchanged"
        );
    }

    #[test]
    fn test_json() {
        let report = GenerateReport::new(generation(true), Detail::Plan);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["dry_run"], true);
        assert_eq!(json["summary"]["created"], 1);
        assert_eq!(json["changes"][2]["action"], "create");
        assert_eq!(json["changes"][2]["category"], "api");
        assert!(json["changes"][2].get("content").is_none());
        assert_eq!(json["diagnostics"][0]["lint"], "empty-model");
    }
}
