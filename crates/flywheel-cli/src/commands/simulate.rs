use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use flywheel_core::{AppConfig, NumericSource, ScrollPhase, Wheel};

/// Wheel shape shared by all simulate actions
pub struct SimulateOpts {
    pub count: usize,
    pub cyclic: bool,
    pub start: i64,
    pub json: bool,
}

/// One line of the printed trace
#[derive(Serialize)]
struct TraceRecord {
    t_ms: u64,
    event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<usize>,
}

enum WheelEvent {
    Changed(usize, usize),
    Phase(ScrollPhase),
}

/// A wheel wired to a virtual clock, with listener events routed to stdout
struct Harness {
    wheel: Wheel,
    rx: mpsc::Receiver<WheelEvent>,
    t0: Instant,
    now: Instant,
    json: bool,
}

impl Harness {
    fn new(config: &AppConfig, opts: &SimulateOpts) -> Result<Self> {
        if opts.count == 0 {
            anyhow::bail!("--count must be at least 1");
        }
        if opts.count > i32::MAX as usize {
            anyhow::bail!("--count is too large");
        }

        let (tx, rx) = mpsc::channel();
        let mut wheel = Wheel::new(config.wheel.clone());
        wheel.set_source(Box::new(NumericSource::new(0, opts.count as i32 - 1)));
        wheel.set_cyclic(opts.cyclic);

        let t0 = Instant::now();
        wheel.set_position(opts.start, false, t0);

        let changed_tx = tx.clone();
        wheel.add_changed_listener(move |from, to| {
            let _ = changed_tx.send(WheelEvent::Changed(from, to));
        });
        wheel.add_scroll_listener(move |phase| {
            let _ = tx.send(WheelEvent::Phase(phase));
        });

        Ok(Self {
            wheel,
            rx,
            t0,
            now: t0,
            json: opts.json,
        })
    }

    fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Print everything the listeners reported since the last drain
    fn drain(&self) {
        let t_ms = self.now.duration_since(self.t0).as_millis() as u64;
        while let Ok(event) = self.rx.try_recv() {
            let record = match event {
                WheelEvent::Phase(ScrollPhase::Started) => TraceRecord {
                    t_ms,
                    event: "started",
                    from: None,
                    to: None,
                },
                WheelEvent::Phase(ScrollPhase::Finished) => TraceRecord {
                    t_ms,
                    event: "finished",
                    from: None,
                    to: None,
                },
                WheelEvent::Changed(from, to) => TraceRecord {
                    t_ms,
                    event: "changed",
                    from: Some(from),
                    to: Some(to),
                },
            };
            self.print(&record);
        }
    }

    fn print(&self, record: &TraceRecord) {
        if self.json {
            if let Ok(line) = serde_json::to_string(record) {
                println!("{}", line);
            }
        } else {
            match (record.from, record.to) {
                (Some(from), Some(to)) => {
                    println!("{:>6}ms  {} {} -> {}", record.t_ms, record.event, from, to)
                }
                _ => println!("{:>6}ms  {}", record.t_ms, record.event),
            }
        }
    }

    /// Tick the virtual clock until the wheel comes to rest
    fn run_to_rest(&mut self, tick: Duration) {
        // Cap the loop; a healthy wheel settles long before this
        for _ in 0..2000 {
            if !self.wheel.needs_tick() {
                return;
            }
            self.advance(tick);
            self.wheel.tick(self.now);
            self.drain();
        }
        if self.wheel.needs_tick() {
            warn!("wheel still in motion after 2000 ticks, trace truncated");
        }
    }

    fn finish(&self) {
        let position = self.wheel.position();
        let text = self.wheel.item_text(position).unwrap_or_default();
        if self.json {
            let summary = serde_json::json!({
                "event": "settled",
                "position": position,
                "text": text,
            });
            println!("{}", summary);
        } else {
            println!("settled at {} ({})", position, text);
        }
    }
}

/// Drag by a pixel distance, release, and trace the snap
pub fn drag(config: &AppConfig, opts: &SimulateOpts, distance: i32) -> Result<()> {
    let mut harness = Harness::new(config, opts)?;
    let frame = config.wheel.animation_tick_duration();

    harness.wheel.on_press();

    // Feed the travel in frame-sized chunks like a real pointer stream
    let chunks = 10;
    let base = distance / chunks;
    let rem = distance % chunks;
    for i in 0..chunks {
        let step = base + if i == 0 { rem } else { 0 };
        if step != 0 {
            harness.wheel.on_move(step);
        }
        harness.advance(frame);
        harness.drain();
    }

    harness.wheel.on_release(0.0, harness.now);
    harness.drain();
    harness.run_to_rest(frame);
    harness.finish();
    Ok(())
}

/// Release a fling at the given velocity and trace the decay
pub fn fling(config: &AppConfig, opts: &SimulateOpts, velocity: f64) -> Result<()> {
    let mut harness = Harness::new(config, opts)?;
    let frame = config.wheel.animation_tick_duration();

    // Cross the drag threshold so the release reads as a fling
    let kick = config.wheel.drag_threshold as i32 + 4;
    let kick = if velocity < 0.0 { -kick } else { kick };

    harness.wheel.on_press();
    harness.wheel.on_move(kick);
    harness.advance(frame);
    harness.drain();

    harness.wheel.on_release(velocity, harness.now);
    harness.drain();
    harness.run_to_rest(frame);
    harness.finish();
    Ok(())
}

/// Animate to an absolute index and trace the travel
pub fn set(config: &AppConfig, opts: &SimulateOpts, index: i64) -> Result<()> {
    let mut harness = Harness::new(config, opts)?;
    let frame = config.wheel.animation_tick_duration();

    harness.wheel.set_position(index, true, harness.now);
    harness.drain();
    harness.run_to_rest(frame);
    harness.finish();
    Ok(())
}
