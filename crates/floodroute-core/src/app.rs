//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! The model is only ever touched from the thread that calls [`App::run`].
//! Commands run on short-lived worker threads and hand their result back as
//! a message, so a command that sleeps (a timer) never blocks input.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::cell::Cell;
use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect / Cmd
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
pub enum Effect {
    /// A one-shot command whose optional result is fed back to the model.
    Cmd(Box<dyn FnOnce() -> Option<Msg> + Send>),
    /// Multiple effects batched together.
    Batch(Vec<Effect>),
    /// Signal the application loop to stop.
    End,
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cmd(_) => f.write_str("Effect::Cmd(..)"),
            Self::Batch(v) => f.debug_tuple("Effect::Batch").field(&v.len()).finish(),
            Self::End => f.write_str("Effect::End"),
        }
    }
}

/// Convenience constructor for an [`Effect::Cmd`].
pub fn cmd<F>(f: F) -> Effect
where
    F: FnOnce() -> Option<Msg> + Send + 'static,
{
    Effect::Cmd(Box::new(f))
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (terminal, test harness, ...).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input, sending messages through `tx`. Must return promptly
    /// (poll with a short timeout) and honour `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// Borrow the model, e.g. to inspect it after [`run`](Self::run).
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`] or the driver fails.
    ///
    /// 1. Initialises the driver and sends `Msg::Init`.
    /// 2. Loops: poll → update → draw → diff → flush.
    /// 3. Closes the driver.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev_grid = Grid::new(self.width, self.height);
        let mut curr_grid = Grid::new(self.width, self.height);

        let result = self.event_loop(&ctx, &tx, &rx, &mut prev_grid, &mut curr_grid);
        ctx.cancel();
        self.driver.close();
        result
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        rx: &Receiver<Msg>,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.process_pending(rx, ctx, tx, prev_grid, curr_grid)?;
        while !ctx.is_done() {
            self.driver.poll_msgs(ctx, tx.clone())?;
            if ctx.is_done() {
                break;
            }
            self.process_pending(rx, ctx, tx, prev_grid, curr_grid)?;
        }
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        tx: &Sender<Msg>,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if matches!(msg, Msg::Screen { .. }) {
                invalidate(prev_grid);
            }
            if let Some(effect) = self.model.update(msg) {
                if Self::handle_effect(effect, ctx, tx) {
                    return Ok(());
                }
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr_grid);
            let frame = compute_frame(prev_grid, curr_grid);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev_grid.copy_from(curr_grid);
        }

        Ok(())
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(effect: Effect, ctx: &Context, tx: &Sender<Msg>) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
            Effect::Cmd(f) => {
                let tx = tx.clone();
                thread::spawn(move || {
                    if let Some(msg) = f() {
                        // The loop may already be gone.
                        tx.send(msg).ok();
                    }
                });
                false
            }
            Effect::Batch(effects) => {
                for e in effects {
                    if Self::handle_effect(e, ctx, tx) {
                        return true;
                    }
                }
                false
            }
        }
    }
}

/// Make every cell of `grid` differ from anything a model draws, so the
/// next frame repaints the whole screen.
fn invalidate(grid: &mut Grid) {
    grid.fill(Cell::default().with_char('\0'));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::geom::Point;
    use std::time::Duration;

    struct Echo(u32);

    #[derive(Default)]
    struct CountingModel {
        echoes: Vec<u32>,
    }

    impl Model for CountingModel {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            if let Some(Echo(n)) = msg.downcast_ref::<Echo>() {
                self.echoes.push(*n);
                if *n == 2 {
                    return Some(Effect::End);
                }
                let next = n + 1;
                return Some(cmd(move || {
                    thread::sleep(Duration::from_millis(1));
                    Some(Msg::custom(Echo(next)))
                }));
            }
            match msg {
                Msg::Init => Some(Effect::Batch(vec![cmd(|| Some(Msg::custom(Echo(0))))])),
                _ => None,
            }
        }

        fn draw(&self, grid: &mut Grid) {
            grid.set(
                Point::new(0, 0),
                Cell::default().with_char(char::from(b'0' + self.echoes.len() as u8)),
            );
        }
    }

    #[derive(Default)]
    struct NullDriver {
        flushed: usize,
        closed: bool,
    }

    impl Driver for NullDriver {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            _tx: Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            thread::sleep(Duration::from_millis(1));
            Ok(())
        }

        fn flush(&mut self, _frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.flushed += 1;
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn command_results_are_fed_back_until_end() {
        let mut app = App::new(AppConfig {
            model: CountingModel::default(),
            driver: NullDriver::default(),
            width: 2,
            height: 1,
        });
        app.run().unwrap();
        assert_eq!(app.model().echoes, vec![0, 1, 2]);
        assert!(app.driver.closed);
        assert!(app.driver.flushed >= 1);
    }

    /// Draws `x` everywhere and stops on `Quit`.
    struct StaticModel;

    impl Model for StaticModel {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            matches!(msg, Msg::Quit).then_some(Effect::End)
        }

        fn draw(&self, grid: &mut Grid) {
            grid.fill(Cell::default().with_char('x'));
        }
    }

    /// Sends a resize, then a quit, recording the size of each flushed frame.
    #[derive(Default)]
    struct ResizeDriver {
        polls: usize,
        frames: Vec<usize>,
    }

    impl Driver for ResizeDriver {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.polls += 1;
            let msg = match self.polls {
                1 => Msg::Screen {
                    width: 2,
                    height: 2,
                    time: std::time::Instant::now(),
                },
                _ => Msg::Quit,
            };
            tx.send(msg).ok();
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame.cells.len());
            Ok(())
        }

        fn close(&mut self) {}
    }

    #[test]
    fn resize_repaints_every_cell() {
        let mut app = App::new(AppConfig {
            model: StaticModel,
            driver: ResizeDriver::default(),
            width: 2,
            height: 2,
        });
        app.run().unwrap();
        assert_eq!(app.driver.frames, vec![4, 4]);
    }

    #[test]
    fn context_cancel_is_shared_between_clones() {
        let ctx = Context::new();
        let other = ctx.clone();
        assert!(!other.is_done());
        ctx.cancel();
        assert!(other.is_done());
    }
}
