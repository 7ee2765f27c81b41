//! Plain-text rendering of the version-grouped report.
//!
//! One block per version, newest first, each listing its classes and the
//! deprecated members under them. Failed fetches show their error inline.

use std::fmt::Write;

use javadep_core::{DocumentationConfig, Report, VersionGroup};

const MAX_ITEMS_PER_CLASS: usize = 25;

// ── Public API ──

pub fn print_report(report: &Report, config: &DocumentationConfig, from_cache: bool) {
    print!("{}", render_report(report, config, from_cache));
}

pub fn render_report(report: &Report, config: &DocumentationConfig, from_cache: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Deprecations in {} {} ===", config.base_url, config.version);
    let _ = writeln!(
        out,
        "{} items in {} versions, {} failed  (updated {}{})",
        report.item_count(),
        report.groups.iter().filter(|g| !g.is_unknown()).count(),
        report.failure_count(),
        report.last_updated.format("%Y-%m-%d %H:%M UTC"),
        if from_cache { ", cached" } else { "" },
    );
    let _ = writeln!(out);

    for group in &report.groups {
        render_group(&mut out, group);
    }
    out
}

// ── Group rendering ──

fn render_group(out: &mut String, group: &VersionGroup) {
    let _ = writeln!(out, "{} ({})", group.version, group.item_count());
    for class in &group.classes {
        let _ = writeln!(out, "  {}", class.class_name);

        let show = class.items.len().min(MAX_ITEMS_PER_CLASS);
        for item in &class.items[..show] {
            match &item.failure {
                Some(err) => {
                    let _ = writeln!(out, "    {:<40} ! {}", item.name, err);
                }
                None => {
                    let _ = writeln!(out, "    {}", item.name);
                }
            }
        }
        if class.items.len() > MAX_ITEMS_PER_CLASS {
            let _ = writeln!(out, "    ... and {} more", class.items.len() - MAX_ITEMS_PER_CLASS);
        }
    }
    let _ = writeln!(out);
}
