use crate::cli::{Cli, Commands};
use crate::domain::models::{AuditReport, ObjectType, Scope, XpathReport};
use crate::services::audit::{build_report, read_records};
use crate::services::output::print_one;
use crate::services::xpath::{container_xpath, entry_xpath};

pub fn handle_inspect_commands(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Xpath {
            scope,
            object_type,
            name,
        } => {
            let t: ObjectType = object_type.parse()?;
            let s = Scope::from(scope.as_str());
            let xpath = match name {
                Some(n) => entry_xpath(&s, t, n),
                None => container_xpath(&s, t),
            };
            let report = XpathReport {
                scope: s.to_string(),
                object_type: t.to_string(),
                xpath,
            };
            print_one(cli.json, report, |r| r.xpath.clone())?;
        }
        Commands::Report { audit } => {
            let records = read_records(audit)?;
            let report = build_report(audit, &records);
            print_one(cli.json, report, render_report)?;
        }
        Commands::Run { .. } => anyhow::bail!("run is handled by the runtime handler"),
    }
    Ok(())
}

fn render_report(report: &AuditReport) -> String {
    let o = &report.outcomes;
    let mut lines = vec![format!(
        "{}: {} row(s): moved={} copied={} skipped={} error={}",
        report.audit_file,
        o.total(),
        o.moved,
        o.copied,
        o.skipped,
        o.error
    )];
    if !report.needs_cleanup.is_empty() {
        lines.push("needs manual cleanup (present in both scopes):".to_string());
        for c in &report.needs_cleanup {
            lines.push(format!(
                "{}\t{}\tdelete from {}\t(already in {})",
                c.object_name, c.object_type, c.src_scope, c.dst_scope
            ));
        }
    }
    lines.join("\n")
}
