use anyhow::Context;
use effigy_core::{Script, Session, SessionConfig, Snapshot};
use std::time::Duration;

// Built-in demo: strip a layer, poke the figure, then submerge and let the
// whole stage sequence play out before respawning.
const DEMO_SCRIPT: &str = "\
# at_ms  intent
0        toggle-layer outer
200      toggle-layer outer
400      toggle-layer inner
1200     pointer 150 40 300 400
1300     pointer 150 140 300 400
1400     pointer 40 350 300 400
1500     toggle-channel fire
3000     toggle-channel water
2705000  respawn
2706000  reset
";

// Simulated frame step between script steps
const STEP: Duration = Duration::from_millis(100);

// Snapshot logging is throttled to this period while nothing but particles move
const QUIET_LOG_PERIOD: Duration = Duration::from_secs(60);

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading script {}", path))?,
        None => DEMO_SCRIPT.to_string(),
    };
    let script: Script = source.parse().context("parsing script")?;
    log::info!("[script] {} step(s), ending at {:?}", script.len(), script.end());

    let mut session = Session::new(SessionConfig::default()).context("building session")?;
    let mut reporter = Reporter::default();
    for step in script.steps() {
        run_until(&mut session, step.at, &mut reporter);
        let accepted = session.apply(step.intent);
        log::info!(
            "[script] line {} @{:?}: {} -> {}",
            step.line,
            step.at,
            step.intent,
            if accepted { "accepted" } else { "rejected" }
        );
        reporter.observe(&session.snapshot(), true);
    }
    let tail = session.now() + Duration::from_secs(5);
    run_until(&mut session, tail, &mut reporter);
    session.teardown();
    Ok(())
}

fn run_until(session: &mut Session, until: Duration, reporter: &mut Reporter) {
    while session.now() < until {
        let dt = STEP.min(until - session.now());
        session.advance(dt);
        if session.revision() != reporter.last_revision {
            reporter.observe(&session.snapshot(), false);
        }
    }
}

#[derive(Default)]
struct Reporter {
    last_revision: u64,
    last_summary: String,
    last_logged_at: Duration,
}

impl Reporter {
    /// Log a snapshot when something other than particle churn changed, or
    /// periodically otherwise.
    fn observe(&mut self, snapshot: &Snapshot, force: bool) {
        self.last_revision = snapshot.revision;
        let summary = describe(snapshot);
        let quiet_for = snapshot.now.saturating_sub(self.last_logged_at);
        if force || summary != self.last_summary || quiet_for >= QUIET_LOG_PERIOD {
            log::info!("[snapshot] t={:?} {}", snapshot.now, summary);
            self.last_summary = summary;
            self.last_logged_at = snapshot.now;
        }
    }
}

fn describe(snapshot: &Snapshot) -> String {
    let layers = snapshot
        .layers
        .iter()
        .map(|l| format!("{}={:?}", l.id.name(), l.phase()))
        .collect::<Vec<_>>()
        .join(",");
    let channels = snapshot
        .channels
        .iter()
        .filter(|c| c.active)
        .map(|c| c.id.name())
        .collect::<Vec<_>>()
        .join(",");
    let stage = snapshot
        .stage
        .as_ref()
        .map_or_else(|| "-".to_string(), |s| s.name.clone());
    format!(
        "layers[{}] channels[{}] reactions={} stage={}/{} ({}) running={} dead={} cues={:?}",
        layers,
        channels,
        snapshot.reactions.len(),
        snapshot.run.current_stage,
        snapshot.stage_count,
        stage,
        snapshot.run.running,
        snapshot.subject.dead,
        snapshot.cues
    )
}
