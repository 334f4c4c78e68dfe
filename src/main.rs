//! Star Collector entry point
//!
//! Native builds run a headless session driven by a simple autopilot and print
//! a JSON summary when it ends. The browser shell links the library directly.

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use star_collector::session::Snapshot;
    use star_collector::sim::Steer;

    /// Don't chase anything closer than this
    const DEADBAND: f32 = 8.0;
    /// Meteors inside this vertical window above the player are threats
    const THREAT_WINDOW: f32 = 220.0;

    /// Pick a steering direction: dodge the nearest falling threat, otherwise
    /// chase the lowest star still above the player.
    pub fn steer(snap: &Snapshot<'_>) -> Steer {
        let player = snap.player;
        let (px, py) = (player.pos.x, player.pos.y);
        let reach = player.size.x;

        let threat = snap
            .meteors
            .iter()
            .filter(|m| m.pos.y < py && py - m.pos.y < THREAT_WINDOW)
            .filter(|m| (m.pos.x - px).abs() < m.radius + reach)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        if let Some(meteor) = threat {
            if !player.is_invincible() {
                return if meteor.pos.x >= px {
                    Steer::Left
                } else {
                    Steer::Right
                };
            }
        }

        let target = snap
            .stars
            .iter()
            .filter(|s| s.pos.y < py)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|s| s.pos.x)
            .or_else(|| snap.powerups.first().map(|p| p.pos.x));

        match target {
            Some(x) if x > px + DEADBAND => Steer::Right,
            Some(x) if x < px - DEADBAND => Steer::Left,
            _ => Steer::Idle,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use star_collector::audio::NullAudio;
    use star_collector::highscores::FileStore;
    use star_collector::session::LogHud;
    use star_collector::{QualityPreset, Session, Settings, platform};

    /// 60 Hz frame timestamps
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    platform::init_logging();
    log::info!("Star Collector (headless) starting...");

    // star-collector [settings.json] [low|medium|high]
    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load_or_default(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    if let Some(name) = args.next() {
        match QualityPreset::from_str(&name) {
            Some(preset) => settings.quality = preset,
            None => log::warn!(
                "Unknown quality preset '{}', keeping {}",
                name,
                settings.quality.as_str()
            ),
        }
    }
    log::info!("Quality: {}", settings.quality.as_str());
    let store = FileStore::new(settings.highscore_path.clone());

    let mut session = Session::new(
        &settings,
        Box::new(NullAudio),
        Box::new(store),
        Box::new(LogHud),
    );
    session.start();

    let mut frames = 0;
    let mut steer = None;
    while frames < MAX_FRAMES {
        let next = autopilot::steer(&session.snapshot());
        if steer != Some(next) {
            session.steer(next);
            steer = Some(next);
        }
        if !session.frame(frames as f64 * FRAME_MS) {
            break;
        }
        frames += 1;
    }

    let state = session.state();
    let summary = serde_json::json!({
        "seed": state.seed,
        "phase": format!("{:?}", state.phase),
        "score": state.score,
        "level": state.level,
        "lives": state.lives,
        "elapsed": state.elapsed,
        "frames": frames,
        "high_score": session.high_score(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not encode summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives `Session` from its own frame callback
}
