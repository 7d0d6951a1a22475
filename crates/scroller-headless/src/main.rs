mod level;
mod offscreen;

use tracing_subscriber::EnvFilter;

use scroller_core::input::Button;
use scroller_engine::{EnvironmentConfig, FrameDriver, ScrollerConfig, Session};

use level::ContactCounter;
use offscreen::{OffscreenCanvas, SteppedClock};

/// Simulated frame length (about 60 Hz).
const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let frames = std::env::args()
        .nth(1)
        .and_then(|a| a.strip_prefix("--frames=").map(String::from))
        .and_then(|n| n.parse::<u32>().ok())
        .unwrap_or(600);

    let seed = std::env::args()
        .nth(2)
        .and_then(|a| a.strip_prefix("--seed=").map(String::from))
        .and_then(|n| n.parse::<u64>().ok())
        .unwrap_or(42);

    let mut config = ScrollerConfig::load();
    let mut session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Invalid environment ({e}), using the demo environment");
            config.environment = EnvironmentConfig::new(1600, 600, 40);
            match Session::from_config(&config) {
                Ok(session) => session,
                Err(e) => {
                    tracing::error!("Demo environment rejected: {e}");
                    std::process::exit(1);
                },
            }
        },
    };

    let ledge_contacts = ContactCounter::default();
    let tiles = level::register_tiles(&mut session, &ledge_contacts);
    level::generate_level(&mut session, tiles, seed);

    let mut canvas = OffscreenCanvas::new(800.0, 600.0);
    let mut driver = FrameDriver::new(SteppedClock::new(FRAME_MS));

    tracing::info!("Running {frames} frames (seed {seed})");
    for frame in 0..frames {
        script_input(&mut session, frame);
        driver.frame(&mut session, &mut canvas);

        if frame % 60 == 0 {
            let p = session.player();
            tracing::info!(
                frame,
                x = p.x,
                y = p.y,
                xv = p.xv,
                yv = p.yv,
                falling = p.falling,
                "player"
            );
        }
    }

    let p = session.player();
    tracing::info!(
        x = p.x,
        y = p.y,
        draw_calls = canvas.draw_calls(),
        ledge_contacts = ledge_contacts.get(),
        "Finished"
    );
}

/// Walk right the whole run and hop every second.
fn script_input(session: &mut Session, frame: u32) {
    session.set_input(Button::Right, true);
    session.set_input(Button::Jump, frame % 60 < 10);
}
