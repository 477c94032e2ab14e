//! Cloud Hop entry point
//!
//! Native headless host: loads settings and the coin ledger, then plays one
//! session with the autopilot on synthetic frame timestamps.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cloud Hop (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts embed the library and drive `Arcade::frame` from requestAnimationFrame
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Context;
    use cloud_hop::input::autopilot;
    use cloud_hop::present::LogPresenter;
    use cloud_hop::{Arcade, EconomyService, Ledger, Settings, Timestamp};

    fn wall_clock_ms() -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }

    pub fn run() -> anyhow::Result<()> {
        let settings_path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| Settings::FILE_NAME.to_string());
        let settings = Settings::load(&settings_path)?;
        let ledger = Ledger::load(&settings.ledger_path).with_context(|| {
            format!("loading ledger {}", settings.ledger_path.display())
        })?;

        let mut arcade = Arcade::new(ledger, LogPresenter)
            .with_gate(settings.gate())
            .with_seed(settings.seed);

        let mut now = wall_clock_ms();
        if !arcade.start(now) {
            return Ok(());
        }

        let mut last_scene = None;
        let mut settlement = None;
        for _ in 0..settings.max_frames {
            let command = arcade.session().and_then(|s| autopilot(s.state()));
            if let Some(command) = command {
                arcade.command(command);
            }
            last_scene = arcade.scene();

            now = now.saturating_add(settings.frame_interval_ms);
            settlement = arcade.frame(now);
            if settlement.is_some() {
                break;
            }
        }

        let settlement = match settlement {
            Some(s) => s,
            None => {
                log::info!("Frame cap of {} reached, stopping", settings.max_frames);
                last_scene = arcade.scene();
                arcade.stop(now).context("session was not running")?
            }
        };

        if settings.print_scene {
            if let Some(scene) = last_scene {
                println!("{}", scene.to_ascii(settings.scene_cols, settings.scene_rows));
            }
        }

        let ledger = arcade.economy();
        println!(
            "Score {} | payout {} | balance {} | next game {}",
            settlement.final_score,
            settlement.payout,
            ledger.coins,
            match arcade.can_start(wall_clock_ms().max(now)) {
                cloud_hop::Eligibility::Eligible => "now".to_string(),
                cloud_hop::Eligibility::Blocked(remaining) => format!("in {}", remaining),
            }
        );
        if ledger.has_pending_cooldown(now) {
            log::debug!("Cooldown until {:?}", ledger.cooldown_expiry());
        }
        Ok(())
    }
}
