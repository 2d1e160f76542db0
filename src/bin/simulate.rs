use chrono::{SecondsFormat, Utc};
use clap::Parser;
use packman_engine::autopilot::Autopilot;
use packman_engine::constants::{FRIGHTENED_TICKS, STARTING_LIVES, TICK_MS, TICK_RATE, TILE_SIZE};
use packman_engine::engine::{GameEngine, GameEngineOptions};
use packman_engine::maze::Maze;
use packman_engine::types::{Direction, RuntimeEvent, SessionState, Snapshot};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_TICKS: u64 = TICK_RATE as u64 * 60 * 10;
const DEFAULT_LEVELS: u32 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    seed: Option<u64>,
    /// Tick budget per scenario.
    #[arg(long)]
    ticks: Option<u64>,
    /// Stop a scenario once this many levels have been cleared.
    #[arg(long)]
    levels: Option<u32>,
    #[arg(long)]
    lives: Option<u32>,
    /// Run only the named scenario (`autopilot` or `idle`).
    #[arg(long)]
    scenario: Option<String>,
    #[arg(long)]
    run_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum InputPolicy {
    Autopilot,
    Idle,
}

#[derive(Clone, Debug, Serialize)]
struct Scenario {
    name: String,
    policy: InputPolicy,
    seed: u32,
    #[serde(rename = "maxTicks")]
    max_ticks: u64,
    #[serde(rename = "maxLevels")]
    max_levels: u32,
    lives: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome {
    GameOver,
    LevelLimit,
    TickLimit,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioResultLine {
    scenario: String,
    seed: u32,
    policy: InputPolicy,
    outcome: Outcome,
    ticks: u64,
    score: u32,
    level: u32,
    lives: u32,
    #[serde(rename = "levelsCleared")]
    levels_cleared: u32,
    #[serde(rename = "pickupsEaten")]
    pickups_eaten: u32,
    #[serde(rename = "ghostsEaten")]
    ghosts_eaten: u32,
    deaths: u32,
    #[serde(rename = "extraLives")]
    extra_lives: u32,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    tick: u64,
    message: String,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioRunResult {
    #[serde(flatten)]
    result: ScenarioResultLine,
    #[serde(rename = "anomalyRecords")]
    anomaly_records: Vec<AnomalyRecord>,
    #[serde(rename = "levelTicks")]
    level_ticks: Vec<u64>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(rename = "startedAtMs")]
    started_at_ms: u64,
    #[serde(rename = "finishedAtMs")]
    finished_at_ms: u64,
    #[serde(rename = "scenarioCount")]
    scenario_count: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    #[serde(rename = "averageTicks")]
    average_ticks: u64,
    #[serde(rename = "averageScore")]
    average_score: u32,
    #[serde(rename = "outcomeCounts")]
    outcome_counts: BTreeMap<String, usize>,
    scenarios: Vec<ScenarioResultLine>,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    timestamp: String,
    level: String,
    event: String,
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

fn main() {
    let cli = Cli::parse();
    let run_started_at_ms = now_ms();
    let scenarios = match resolve_scenarios(&cli) {
        Ok(scenarios) => scenarios,
        Err(message) => {
            emit_log(
                "error",
                "invalid_arguments",
                cli.run_id.as_deref().unwrap_or("sim"),
                None,
                None,
                None,
                json!({ "message": message }),
            );
            std::process::exit(2);
        }
    };
    let seed_hint = scenarios.first().map(|scenario| scenario.seed).unwrap_or(0);
    let run_id = cli
        .run_id
        .clone()
        .unwrap_or_else(|| default_run_id(seed_hint, run_started_at_ms));
    let mut has_anomaly = false;
    let mut scenario_results = Vec::new();
    let mut outcome_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_anomalies = 0usize;

    for scenario in scenarios {
        emit_log(
            "info",
            "scenario_started",
            &run_id,
            Some(&scenario.name),
            Some(scenario.seed),
            None,
            json!({
                "policy": scenario.policy,
                "maxTicks": scenario.max_ticks,
                "maxLevels": scenario.max_levels,
                "lives": scenario.lives,
            }),
        );
        let scenario_run = run_scenario(&scenario);

        for (idx, tick) in scenario_run.level_ticks.iter().enumerate() {
            emit_log(
                "info",
                "level_cleared",
                &run_id,
                Some(&scenario.name),
                Some(scenario.seed),
                Some(*tick),
                json!({ "level": idx + 1 }),
            );
        }

        for anomaly in &scenario_run.anomaly_records {
            emit_log(
                "warn",
                "anomaly_detected",
                &run_id,
                Some(&scenario.name),
                Some(scenario.seed),
                Some(anomaly.tick),
                json!({
                    "message": anomaly.message,
                }),
            );
        }

        if !scenario_run.result.anomalies.is_empty() {
            has_anomaly = true;
        }
        total_anomalies += scenario_run.anomaly_records.len();
        *outcome_counts
            .entry(outcome_key(scenario_run.result.outcome))
            .or_insert(0) += 1;

        emit_log(
            "info",
            "scenario_finished",
            &run_id,
            Some(&scenario.name),
            Some(scenario.seed),
            Some(scenario_run.result.ticks),
            json!({
                "outcome": scenario_run.result.outcome,
                "simulatedMs": scenario_run.result.ticks * TICK_MS,
                "score": scenario_run.result.score,
                "level": scenario_run.result.level,
                "anomalyCount": scenario_run.anomaly_records.len(),
            }),
        );

        match serde_json::to_string(&scenario_run.result) {
            Ok(line) => println!("{line}"),
            Err(error) => emit_log(
                "error",
                "result_serialize_failed",
                &run_id,
                Some(&scenario.name),
                Some(scenario.seed),
                None,
                json!({ "error": error.to_string() }),
            ),
        }
        scenario_results.push(scenario_run.result);
    }

    let run_finished_at_ms = now_ms();
    let summary = build_run_summary(
        run_id.clone(),
        run_started_at_ms,
        run_finished_at_ms,
        scenario_results,
        outcome_counts,
        total_anomalies,
    );

    let mut summary_out_written: Option<String> = None;
    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                &run_id,
                None,
                None,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        summary_out_written = Some(path.to_string_lossy().to_string());
    }

    emit_log(
        "info",
        "run_finished",
        &run_id,
        None,
        None,
        None,
        json!({
            "scenarioCount": summary.scenario_count,
            "anomalyCount": summary.anomaly_count,
            "averageTicks": summary.average_ticks,
            "averageScore": summary.average_score,
            "outcomeCounts": summary.outcome_counts,
            "summaryOut": summary_out_written,
        }),
    );

    if has_anomaly {
        std::process::exit(1);
    }
}

fn run_scenario(scenario: &Scenario) -> ScenarioRunResult {
    let mut engine = GameEngine::new(
        Maze::classic(),
        scenario.seed,
        GameEngineOptions {
            starting_lives: scenario.lives,
            ..GameEngineOptions::default()
        },
    );
    let mut pilot = Autopilot::new(scenario.seed);

    let mut anomalies = Vec::new();
    let mut anomaly_records = Vec::new();
    let mut anomaly_seen = HashSet::new();
    let mut tracker = ProgressTracker::default();
    let mut level_ticks = Vec::new();
    let mut extra_lives = 0;
    let mut outcome = Outcome::TickLimit;

    for _ in 0..scenario.max_ticks {
        let request = match scenario.policy {
            InputPolicy::Autopilot => pilot.choose(&engine),
            InputPolicy::Idle => Direction::None,
        };
        engine.step(request);
        let snapshot = engine.build_snapshot(true);

        let mut messages = collect_snapshot_anomalies(&snapshot);
        messages.extend(tracker.observe(&snapshot));
        for message in messages {
            push_anomaly(
                &mut anomalies,
                &mut anomaly_records,
                &mut anomaly_seen,
                snapshot.tick,
                message,
            );
        }

        for event in &snapshot.events {
            match event {
                RuntimeEvent::LevelComplete { .. } => level_ticks.push(snapshot.tick),
                RuntimeEvent::ExtraLife { .. } => extra_lives += 1,
                _ => {}
            }
        }

        match snapshot.state {
            SessionState::GameOver => {
                outcome = Outcome::GameOver;
                break;
            }
            SessionState::LevelTransition => {
                if level_ticks.len() as u32 >= scenario.max_levels {
                    outcome = Outcome::LevelLimit;
                    break;
                }
                engine.acknowledge_level_transition();
            }
            SessionState::Playing => {}
        }
    }

    let summary = engine.build_summary();
    ScenarioRunResult {
        result: ScenarioResultLine {
            scenario: scenario.name.clone(),
            seed: scenario.seed,
            policy: scenario.policy,
            outcome,
            ticks: summary.ticks,
            score: summary.score,
            level: summary.level,
            lives: summary.lives,
            levels_cleared: level_ticks.len() as u32,
            pickups_eaten: summary.pickups_eaten,
            ghosts_eaten: summary.ghosts_eaten,
            deaths: summary.deaths,
            extra_lives,
            anomalies,
        },
        anomaly_records,
        level_ticks,
    }
}

/// Cross-tick checks: score never falls and the board only empties within a level.
#[derive(Clone, Debug, Default)]
struct ProgressTracker {
    last_score: u32,
    last_level: u32,
    last_remaining: Option<u32>,
}

impl ProgressTracker {
    fn observe(&mut self, snapshot: &Snapshot) -> Vec<String> {
        let mut anomalies = Vec::new();
        if snapshot.score < self.last_score {
            anomalies.push(format!(
                "score decreased: {} -> {}",
                self.last_score, snapshot.score
            ));
        }
        if snapshot.level == self.last_level {
            if let Some(previous) = self.last_remaining {
                if snapshot.remaining_pickups > previous {
                    anomalies.push(format!(
                        "pickups reappeared within level {}: {} -> {}",
                        snapshot.level, previous, snapshot.remaining_pickups
                    ));
                }
            }
        }
        self.last_score = snapshot.score;
        self.last_level = snapshot.level;
        self.last_remaining = Some(snapshot.remaining_pickups);
        anomalies
    }
}

fn collect_snapshot_anomalies(snapshot: &Snapshot) -> Vec<String> {
    let mut anomalies = Vec::new();
    if snapshot.remaining_pickups > snapshot.total_pickups {
        anomalies.push(format!(
            "remaining pickups exceed total: {}/{}",
            snapshot.remaining_pickups, snapshot.total_pickups
        ));
    }

    let player = &snapshot.player;
    if !(0.0..TILE_SIZE).contains(&player.progress) {
        anomalies.push(format!("player progress out of range: {}", player.progress));
    }
    let (dx, dy) = player.facing.delta();
    let expected_x = player.tile.x as f32 * TILE_SIZE + dx as f32 * player.progress;
    let expected_y = player.tile.y as f32 * TILE_SIZE + dy as f32 * player.progress;
    if player.position.x != expected_x || player.position.y != expected_y {
        anomalies.push(format!(
            "player position drifted from tile ({},{})",
            player.tile.x, player.tile.y
        ));
    }

    for ghost in &snapshot.ghosts {
        if ghost.frightened_ticks > FRIGHTENED_TICKS {
            anomalies.push(format!(
                "ghost frightened timer out of range: {:?} {}",
                ghost.ghost_type, ghost.frightened_ticks
            ));
        }
    }
    anomalies
}

fn resolve_scenarios(cli: &Cli) -> Result<Vec<Scenario>, String> {
    let seed = normalize_seed(cli.seed.unwrap_or_else(|| rand::random::<u32>() as u64));
    let max_ticks = cli.ticks.unwrap_or(DEFAULT_TICKS).max(1);
    let max_levels = cli.levels.unwrap_or(DEFAULT_LEVELS).max(1);
    let lives = cli.lives.unwrap_or(STARTING_LIVES).clamp(1, 9);

    let scenarios = vec![
        Scenario {
            name: "autopilot".to_string(),
            policy: InputPolicy::Autopilot,
            seed,
            max_ticks,
            max_levels,
            lives,
        },
        Scenario {
            name: "idle".to_string(),
            policy: InputPolicy::Idle,
            seed: normalize_seed(seed as u64 + 1),
            max_ticks,
            max_levels,
            lives,
        },
    ];

    match cli.scenario.as_deref() {
        None => Ok(scenarios),
        Some(name) => {
            let selected: Vec<Scenario> = scenarios
                .into_iter()
                .filter(|scenario| scenario.name == name)
                .collect();
            if selected.is_empty() {
                Err(format!("unknown scenario: {name}"))
            } else {
                Ok(selected)
            }
        }
    }
}

fn normalize_seed(seed: u64) -> u32 {
    seed as u32
}

fn push_anomaly(
    anomalies: &mut Vec<String>,
    anomaly_records: &mut Vec<AnomalyRecord>,
    anomaly_seen: &mut HashSet<String>,
    tick: u64,
    message: String,
) {
    anomaly_records.push(AnomalyRecord {
        tick,
        message: message.clone(),
    });
    if anomaly_seen.insert(message.clone()) {
        anomalies.push(message);
    }
}

fn default_run_id(seed: u32, timestamp_ms: u64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn build_run_summary(
    run_id: String,
    started_at_ms: u64,
    finished_at_ms: u64,
    scenarios: Vec<ScenarioResultLine>,
    outcome_counts: BTreeMap<String, usize>,
    anomaly_count: usize,
) -> RunSummary {
    let scenario_count = scenarios.len();
    let (average_ticks, average_score) = if scenario_count == 0 {
        (0, 0)
    } else {
        let total_ticks: u64 = scenarios.iter().map(|scenario| scenario.ticks).sum();
        let total_score: u64 = scenarios.iter().map(|scenario| scenario.score as u64).sum();
        (
            total_ticks / scenario_count as u64,
            (total_score / scenario_count as u64) as u32,
        )
    };
    RunSummary {
        run_id,
        started_at_ms,
        finished_at_ms,
        scenario_count,
        anomaly_count,
        average_ticks,
        average_score,
        outcome_counts,
        scenarios,
    }
}

fn emit_log(
    level: &str,
    event: &str,
    run_id: &str,
    scenario: Option<&str>,
    seed: Option<u32>,
    tick: Option<u64>,
    details: Value,
) {
    let log_line = StructuredLogLine {
        timestamp_ms: now_ms(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        level: level.to_string(),
        event: event.to_string(),
        run_id: run_id.to_string(),
        scenario: scenario.map(|value| value.to_string()),
        seed,
        tick,
        details,
    };
    if let Ok(line) = serde_json::to_string(&log_line) {
        eprintln!("{line}");
    }
}

fn outcome_key(outcome: Outcome) -> String {
    match outcome {
        Outcome::GameOver => "game_over",
        Outcome::LevelLimit => "level_limit",
        Outcome::TickLimit => "tick_limit",
    }
    .to_string()
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, summary_text)
}
