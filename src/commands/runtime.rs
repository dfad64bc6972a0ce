use crate::cli::{Cli, Commands};
use crate::domain::models::RunSummary;
use crate::services::audit::AuditLog;
use crate::services::batch::{read_requests, run_batch};
use crate::services::config::load_config;
use crate::services::mover::Mover;
use crate::services::output::{print_one, progress_line};
use crate::services::store::PanoramaClient;

pub fn handle_run(cli: &Cli) -> anyhow::Result<()> {
    let Commands::Run {
        input,
        config,
        collision,
        log_dir,
    } = &cli.command
    else {
        anyhow::bail!("handle_run called for a non-run command");
    };

    // Everything that can abort the run happens before the first API call.
    let cfg = load_config(config)?;
    let requests = read_requests(input)?;
    let client = PanoramaClient::new(&cfg)?;
    let mover = Mover::new(client, *collision);
    let mut audit = AuditLog::create_in(log_dir)?;

    tracing::info!(
        rows = requests.len(),
        policy = mover.policy().as_str(),
        audit = %audit.path().display(),
        "starting batch"
    );
    if !cli.json {
        println!("[i] Logging to {}", audit.path().display());
    }

    let json = cli.json;
    let (outcomes, records) = run_batch(&mover, &requests, &mut audit, |r| {
        if !json {
            println!("{}", progress_line(r));
        }
    })?;

    let summary = RunSummary {
        processed: records.len(),
        audit_file: audit.path().display().to_string(),
        collision_policy: mover.policy().as_str().to_string(),
        outcomes,
        records,
    };
    print_one(cli.json, summary, |s| {
        let mut lines = vec![format!(
            "[i] Processed {} row(s): moved={} copied={} skipped={} error={}",
            s.processed, s.outcomes.moved, s.outcomes.copied, s.outcomes.skipped, s.outcomes.error
        )];
        if s.outcomes.copied > 0 {
            lines.push(format!(
                "[!] {} object(s) now exist in both scopes; see `dgmove report {}`",
                s.outcomes.copied, s.audit_file
            ));
        }
        lines.push(
            "[i] NOTE: no commit was performed. Commit in Panorama when ready.".to_string(),
        );
        lines.join("\n")
    })
}
