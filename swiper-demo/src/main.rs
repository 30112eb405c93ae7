//! Drives a swiper headlessly with a simulated 60 fps clock and logs what a
//! host would draw.
//!
//! Configuration comes from the environment:
//!
//! - `SWIPER_PAGES`: number of panels (default 4)
//! - `SWIPER_AUTOPLAY_MS`: autoplay interval, `0` disables autoplay (default 1000)
//! - `SWIPER_LOOP`: `true` or `false` (default `true`)
//!
//! Set `RUST_LOG=tessera_swiper=trace` to see every gesture and animation.

use std::{
    env,
    error::Error,
    str::FromStr,
    time::{Duration, Instant},
};

use tessera_swiper::{PointerInput, Px, SharedSwiper, Swiper, SwiperArgs};
use tracing::{info, warn};

const FRAME: Duration = Duration::from_millis(16);
const PAGE_WIDTH: Px = Px(360);
const PAGE_HEIGHT: Px = Px(240);

#[derive(Debug)]
struct DemoConfig {
    pages: usize,
    autoplay: Option<Duration>,
    looping: bool,
}

impl DemoConfig {
    fn from_env() -> Result<Self, Box<dyn Error>> {
        let autoplay_ms: u64 = env_var("SWIPER_AUTOPLAY_MS", 1000)?;
        Ok(Self {
            pages: env_var("SWIPER_PAGES", 4)?,
            autoplay: (autoplay_ms > 0).then(|| Duration::from_millis(autoplay_ms)),
            looping: env_var("SWIPER_LOOP", true)?,
        })
    }
}

fn env_var<T>(name: &str, default: T) -> Result<T, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|err| format!("invalid {name}={raw:?}: {err}").into()),
        Err(_) => Ok(default),
    }
}

/// Simulated frame clock.
struct Clock {
    now: Instant,
}

impl Clock {
    fn run(&mut self, swiper: &SharedSwiper<String>, duration: Duration) {
        let end = self.now + duration;
        while self.now < end {
            self.now += FRAME;
            swiper.with_mut(|s| s.tick(self.now));
        }
    }

    fn advance(&mut self, duration: Duration) -> Instant {
        self.now += duration;
        self.now
    }
}

fn describe(swiper: &SharedSwiper<String>) {
    swiper.with(|s| {
        let frame = s.frame(PAGE_HEIGHT);
        let visible: Vec<String> = frame
            .pages
            .iter()
            .map(|page| format!("{}@{}", page.panel, page.x.raw()))
            .collect();
        let dots: String = frame
            .dots
            .iter()
            .map(|dot| if dot.active { '●' } else { '○' })
            .collect();
        info!(
            current = s.current_page(),
            offset = s.controller().offset(),
            visible = ?visible,
            "{dots}"
        );
    });
}

fn swipe(clock: &mut Clock, swiper: &SharedSwiper<String>, from: f32, to: f32, over: Duration) {
    const STEPS: u32 = 6;
    let pressed_at = clock.now;
    swiper.with_mut(|s| {
        s.handle_pointer(
            PointerInput::Pressed {
                x: from,
                timestamp: pressed_at,
            },
            pressed_at,
        )
    });
    for step in 1..=STEPS {
        let now = clock.advance(over / STEPS);
        let x = from + (to - from) * step as f32 / STEPS as f32;
        swiper.with_mut(|s| {
            s.handle_pointer(PointerInput::Moved { x }, now);
            s.tick(now);
        });
    }
    let released_at = clock.now;
    swiper.with_mut(|s| {
        s.handle_pointer(
            PointerInput::Released {
                x: to,
                timestamp: released_at,
            },
            released_at,
        )
    });
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("off,tessera_swiper=info,swiper_demo=info")
        })?;
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let config = DemoConfig::from_env()?;
    info!(?config, "starting swiper demo");
    if config.autoplay.is_some() && !config.looping {
        warn!("autoplay only runs with looping enabled");
    }

    let panels: Vec<String> = (0..config.pages).map(|i| format!("panel-{i}")).collect();
    let mut args = SwiperArgs::default()
        .looping(config.looping)
        .on_page_change(|page| info!(page, "page changed"));
    if let Some(interval) = config.autoplay {
        args = args.autoplay(true).autoplay_timeout(interval);
    }
    let swiper = SharedSwiper::new(Swiper::new(args, panels, PAGE_WIDTH)?);

    let mut clock = Clock {
        now: Instant::now(),
    };
    swiper.with_mut(|s| s.start(clock.now));
    describe(&swiper);

    let idle = config
        .autoplay
        .map_or(Duration::from_secs(1), |interval| interval * 3);
    info!(ms = idle.as_millis() as u64, "idling");
    clock.run(&swiper, idle);
    describe(&swiper);

    info!("slow drag to the left past half a page");
    swipe(&mut clock, &swiper, 320.0, 100.0, Duration::from_millis(500));
    describe(&swiper);
    clock.run(&swiper, Duration::from_millis(300));
    describe(&swiper);

    info!("quick flick to the right");
    swipe(&mut clock, &swiper, 40.0, 90.0, Duration::from_millis(120));
    clock.run(&swiper, Duration::from_millis(300));
    describe(&swiper);

    info!("short slow drag that springs back");
    swipe(&mut clock, &swiper, 200.0, 150.0, Duration::from_millis(600));
    clock.run(&swiper, Duration::from_millis(300));
    describe(&swiper);

    let last = config.pages.saturating_sub(1);
    info!(page = last, "scrolling programmatically");
    let now = clock.now;
    swiper.with_mut(|s| s.controller_mut().scroll_to_page(last, now))?;
    clock.run(&swiper, Duration::from_millis(300));
    describe(&swiper);

    swiper.with_mut(|s| s.stop());
    info!("swiper stopped");
    Ok(())
}
