//! Terminal runner (default binary).
//!
//! Options:
//!   --seed <u64>       fixed RNG seed (default: from entropy)
//!   --config <path>    JSON game config; missing fields take their defaults
//!   --print-config     print the effective config as JSON and exit

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use bonus_tetris::core::{GameConfig, GameRng};
use bonus_tetris::engine::{Clock, Session, SystemClock};
use bonus_tetris::input::{should_quit, InputHandler};
use bonus_tetris::term::{BoardView, FrameBuffer, Hud, TerminalRenderer, Viewport};

// Used when the terminal reports key releases; the timeout then only covers lost events.
const RELEASE_EVENTS_TIMEOUT_SECS: f32 = 5.0;

struct Options {
    seed: Option<u64>,
    config: GameConfig,
    print_config: bool,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options {
        seed: None,
        config: GameConfig::default(),
        print_config: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                opts.seed = Some(value.parse().with_context(|| format!("bad seed {value:?}"))?);
            }
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("read config {path}"))?;
                opts.config = serde_json::from_str(&text)
                    .with_context(|| format!("parse config {path}"))?;
            }
            "--print-config" => opts.print_config = true,
            other => bail!("unknown argument {other:?}"),
        }
    }

    opts.config.validate()?;
    Ok(opts)
}

fn main() -> Result<()> {
    let opts = parse_args()?;
    if opts.print_config {
        println!("{}", serde_json::to_string_pretty(&opts.config)?);
        return Ok(());
    }

    let rng = match opts.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    log::info!("starting with seed {}", rng.seed());
    let session = Session::new(opts.config, rng)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: Session) -> Result<()> {
    let hud = Rc::new(RefCell::new(Hud::default()));
    session.set_sink(Box::new(hud.clone()));
    session.start();

    let mut input = InputHandler::new();
    if term.has_key_release_events() {
        input = input.with_key_release_timeout(RELEASE_EVENTS_TIMEOUT_SECS);
    }

    let clock = SystemClock::new();
    let frame_time = Duration::from_secs_f32(session.board().config().timing.tick);
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_input = clock.now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(
            session.board(),
            &hud.borrow(),
            session.slow_motion_remaining(),
            Viewport::new(w, h),
            &mut fb,
        );
        term.draw_swap(&mut fb)?;

        // Drain everything that arrived during the last frame.
        let mut timeout = frame_time;
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        input.handle_key_press(key.code);
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = clock.now();
        input.update(now - last_input);
        last_input = now;

        let mut source = || input.take_frame();
        session.frame(&clock, &mut source);
    }
}
