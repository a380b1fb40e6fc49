use anyhow::Context;
use clap::{Parser, ValueEnum};
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pointer_tracker::config::Platform;
use pointer_tracker::{
    Camera, EventFilter, InputState, MouseButton, Notification, ObjectId, PointerTracker, Rect,
    Scene, TouchPhase, TrackerConfig,
};

/// Runs a scripted pointer session and logs every notification
#[derive(Debug, Parser)]
#[command(name = "pointer-demo")]
struct Args {
    /// Configuration profile to load
    #[arg(long, default_value = "debug")]
    profile: String,

    /// Override the configured platform
    #[arg(long, value_enum)]
    platform: Option<PlatformArg>,

    /// Seconds per simulated frame
    #[arg(long, default_value_t = 0.05)]
    frame_time: f32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    Mouse,
    Touch,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Mouse => Platform::Mouse,
            PlatformArg::Touch => Platform::Touch,
        }
    }
}

const BUTTON: ObjectId = ObjectId(1);
const SLIDER: ObjectId = ObjectId(2);

/// What the scripted pointer does on one frame
#[derive(Debug, Clone, Copy)]
enum Step {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
    Idle,
}

fn script() -> Vec<Step> {
    let button = Vec2::new(200.0, 150.0);
    let slider = Vec2::new(600.0, 450.0);
    // Long enough for the double window to lapse under every shipped profile
    let pause = || std::iter::repeat_n(Step::Idle, 10);

    let mut steps = vec![Step::Down(button), Step::Up(button)];
    steps.extend(pause());
    steps.extend([
        Step::Down(button),
        Step::Up(button),
        Step::Down(button),
        Step::Up(button),
    ]);
    steps.extend(pause());
    // Drag from the button onto the slider
    steps.extend([
        Step::Down(button),
        Step::Move((button + slider) / 2.0),
        Step::Move(slider),
        Step::Idle,
        Step::Up(slider),
    ]);
    steps
}

fn apply(step: Step, platform: Platform, input: &mut InputState) {
    const FINGER: u64 = 0;
    match (step, platform) {
        (Step::Down(at), Platform::Mouse) => {
            input.set_mouse_position(at);
            input.press(MouseButton::Left);
        }
        (Step::Move(at), Platform::Mouse) => input.set_mouse_position(at),
        (Step::Up(at), Platform::Mouse) => {
            input.set_mouse_position(at);
            input.release(MouseButton::Left);
        }
        (Step::Down(at), Platform::Touch) => input.set_touch(FINGER, at, TouchPhase::Began),
        (Step::Move(at), Platform::Touch) => input.set_touch(FINGER, at, TouchPhase::Moved),
        (Step::Up(at), Platform::Touch) => input.set_touch(FINGER, at, TouchPhase::Ended),
        (Step::Idle, _) => {}
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = TrackerConfig::load(&args.profile)
        .with_context(|| format!("loading profile '{}'", args.profile))?;
    if let Some(platform) = args.platform {
        config = config.with_platform(platform.into());
    }
    let platform = config.platform;

    // 800x600 window looking at a 16x12 world
    let camera = Camera::centered(Vec2::new(16.0, 12.0), Vec2::new(800.0, 600.0));
    let scene = Scene::new()
        .with_object(BUTTON, Rect::new(Vec2::new(-5.0, 2.0), Vec2::new(-3.0, 4.0)), 0)
        .with_object(SLIDER, Rect::new(Vec2::new(2.0, -4.0), Vec2::new(6.0, -2.0)), 0);

    let mut tracker = PointerTracker::new(config, camera);
    tracker
        .transport_mut()
        .subscribe(EventFilter::any_global(), |n: &Notification| match n.target {
            Some(target) => info!(event = %n.event, %target, "notified"),
            None => info!(event = %n.event, "notified (no target)"),
        });

    let mut input = InputState::new();
    for (frame, step) in script().into_iter().enumerate() {
        apply(step, platform, &mut input);
        tracker.tick(args.frame_time, &input, &scene);
        input.advance_frame();

        if matches!(step, Step::Move(_)) {
            info!(
                frame,
                position = ?tracker.position(0),
                button = tracker.is_interacting(BUTTON),
                slider = tracker.is_interacting(SLIDER),
                "dragging"
            );
        }
    }

    info!(
        ticks = tracker.tick_count(),
        last = ?tracker.last_interacted(),
        "session finished"
    );
    Ok(())
}
