//! idle-runner: headless runner for the Emily Idle core.
//!
//! Usage:
//!   idle-runner --profile emily --db save.db --offline-ms 3600000
//!   idle-runner --profile emily --ipc-mode

use anyhow::Result;
use emily_idle_core::{
    catalog_subsystem,
    clock::{Clock, ManualClock, SystemClock},
    command::PlayerCommand,
    config::GameConfig,
    engine::{GameEngine, Outcome},
    format::{format_cents, format_compact_cents, nostalgia_balance_text},
    store::GameStore,
    types::EpochMs,
};
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Advance { ms: u64 },
    Command { command: PlayerCommand },
    Save,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    now_ms:           EpochMs,
    currency:         String,
    enjoyment:        String,
    nostalgia:        String,
    points_if_reset:  u64,
    prestige_pending: bool,
    career_level:     u32,
    items:            BTreeMap<String, u32>,
    milestones:       Vec<String>,
    achievements:     Vec<String>,
    visible_tabs:     Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    declined:         Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let offline_ms = parse_arg(&args, "--offline-ms", 0u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = string_arg(&args, "--db", ":memory:");
    let profile = string_arg(&args, "--profile", "default");
    let data_dir = string_arg(&args, "--data-dir", "./data");

    if !ipc_mode {
        println!("Emily Idle: idle-runner");
        println!("  profile:     {profile}");
        println!("  db:          {db}");
        println!("  data_dir:    {data_dir}");
        println!("  offline_ms:  {offline_ms}");
        println!("  started:     {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!();
    }

    let config = load_config(data_dir)?;
    let clock = ManualClock::new(SystemClock.now_ms());

    // A named shared-memory database survives a reopen while the first
    // connection is alive, so the offline reload below sees the save.
    let db_effective: String = if db == ":memory:" {
        format!("file:idlerun_{}?mode=memory&cache=shared", clock.now_ms())
    } else {
        db.to_string()
    };
    let store = GameStore::open(&db_effective)?;
    store.migrate()?;

    let mut engine = GameEngine::open(store, profile, config.clone(), clock.now_ms())?;

    if offline_ms > 0 {
        engine.persist(clock.now_ms())?;
        let store = engine.store().reopen()?;
        let reopened = GameEngine::open(store, profile, config, clock.advance(offline_ms))?;
        engine = reopened;
    }

    if ipc_mode {
        run_ipc_loop(&mut engine, &clock)?;
    } else {
        print_summary(&engine, clock.now_ms())?;
    }
    engine.persist(clock.now_ms())?;

    Ok(())
}

fn load_config(data_dir: &str) -> Result<GameConfig> {
    if Path::new(data_dir).join("economy.json").exists() {
        GameConfig::load(data_dir)
    } else {
        log::warn!("no economy.json under {data_dir}, using the built-in economy");
        Ok(GameConfig::builtin())
    }
}

fn run_ipc_loop(engine: &mut GameEngine, clock: &ManualClock) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let mut declined = None;
        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Advance { ms } => {
                engine.tick(clock.advance(ms))?;
            }
            IpcCommand::Command { command } => {
                if let Outcome::Declined(decline) = engine.submit(command, clock.now_ms())? {
                    declined = Some(decline.to_string());
                }
            }
            IpcCommand::Save => {
                engine.persist(clock.now_ms())?;
            }
        }
        let state = build_ui_state(engine, clock.now_ms(), declined);
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &GameEngine, now: EpochMs, declined: Option<String>) -> UiState {
    let state = engine.state();
    UiState {
        now_ms:           now,
        currency:         format_cents(state.currency_cents),
        enjoyment:        format_cents(state.enjoyment_cents),
        nostalgia:        nostalgia_balance_text(state.nostalgia_points),
        points_if_reset:  engine.preview_prestige(now).points_to_gain,
        prestige_pending: engine.prestige_flow().is_pending(),
        career_level:     state.therapist_career.level,
        items:            state.items.clone(),
        milestones:       state.milestones.iter().cloned().collect(),
        achievements:     state.achievements.iter().cloned().collect(),
        visible_tabs:     engine.visible_tabs().iter().map(|t| t.id()).collect(),
        declined,
    }
}

fn print_summary(engine: &GameEngine, now: EpochMs) -> Result<()> {
    let state = engine.state();
    let log = engine.event_log()?;

    println!("=== PROFILE SUMMARY ===");
    println!("  profile:        {}", engine.profile_id);
    println!("  currency:       {}", format_cents(state.currency_cents));
    println!("  enjoyment:      {}", format_cents(state.enjoyment_cents));
    println!("  lifetime:       {}", format_compact_cents(state.lifetime_earned_cents));
    println!("  nostalgia:      {}", nostalgia_balance_text(state.nostalgia_points));
    println!("  resets:         {}", state.nostalgia_resets);
    println!("  next reset:     +{}", engine.preview_prestige(now).points_to_gain);
    println!("  career level:   {}", state.therapist_career.level);
    println!("  items owned:    {}", state.total_items());
    println!("  milestones:     {}", state.milestones.len());
    println!("  achievements:   {}/{}", state.achievements.len(), engine.config().achievements.len());
    let (found, total) = catalog_subsystem::progress(engine.config(), state);
    println!("  catalog:        {found}/{total}");
    println!("  logged events:  {}", log.len());

    println!();
    println!("=== RECENT EVENTS ===");
    if log.is_empty() {
        println!("  (none)");
    } else {
        for entry in log.iter().rev().take(8).collect::<Vec<_>>().into_iter().rev() {
            println!("  {:>14} | {:<12} | {}", entry.at_ms, entry.subsystem, entry.event_type);
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str, default: &'a str) -> &'a str {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
        .unwrap_or(default)
}
