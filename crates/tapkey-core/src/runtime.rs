//! The terminal-owning event loop.
//!
//! [`Program`] puts the kiosk terminal into raw mode, draws the model at a
//! fixed frame rate and feeds it messages one at a time, in arrival order,
//! until the model quits or the process gets Ctrl+C.

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::Once;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing_appender::non_blocking::WorkerGuard;

use crate::command::{Action, Command, CommandInner, TerminalCommand};
use crate::model::Model;
use crate::subscription::SubscriptionManager;

/// Errors that can occur while starting or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// Terminal setup, drawing or teardown failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The file logger could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// How a [`Program`] sets up the terminal.
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     title: Some("Fridge settings".into()),
///     log_file: Some("/var/log/kiosk/ui.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Frames per second, clamped to 1..=120 (default: 30).
    pub fps: u32,
    /// Draw on the alternate screen (default: true).
    pub alt_screen: bool,
    /// Report pointer events; a touch panel delivers taps this way (default: true).
    pub mouse_capture: bool,
    pub title: Option<String>,
    /// Restore the terminal before the panic message prints (default: true).
    pub catch_panics: bool,
    /// Exit on Ctrl+C (default: true).
    pub handle_signals: bool,
    /// Install a tracing subscriber that writes to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            alt_screen: true,
            mouse_capture: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
        }
    }
}

impl ProgramOptions {
    /// Time between two frames.
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.clamp(1, 120)))
    }
}

/// The terminal in kiosk mode: raw input, pointer reporting, hidden cursor.
///
/// Left by [`leave`](KioskScreen::leave), or on drop if the program bails out
/// early.
struct KioskScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    alt_screen: bool,
    left: bool,
}

impl KioskScreen {
    fn enter(options: &ProgramOptions) -> Result<Self, ProgramError> {
        if options.catch_panics {
            install_panic_hook(options.alt_screen);
        }

        enable_raw_mode()?;
        let mut out = stdout();
        if options.alt_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        if options.mouse_capture {
            execute!(out, EnableMouseCapture)?;
        }
        if let Some(title) = &options.title {
            execute!(out, SetTitle(title))?;
        }
        execute!(out, cursor::Hide)?;

        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(out))?,
            alt_screen: options.alt_screen,
            left: false,
        })
    }

    fn apply(&mut self, cmd: TerminalCommand) -> io::Result<()> {
        let out = self.terminal.backend_mut();
        match cmd {
            TerminalCommand::SetTitle(title) => execute!(out, SetTitle(title)),
        }
    }

    fn leave(&mut self) -> io::Result<()> {
        if self.left {
            return Ok(());
        }
        self.left = true;
        release_terminal(self.alt_screen)
    }
}

impl Drop for KioskScreen {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!(%err, "terminal restore failed");
        }
    }
}

/// Best-effort teardown: every step runs even if an earlier one failed.
fn release_terminal(alt_screen: bool) -> io::Result<()> {
    let raw = disable_raw_mode();
    let mut out = stdout();
    execute!(out, DisableMouseCapture).ok();
    execute!(out, cursor::Show).ok();
    if alt_screen {
        execute!(out, LeaveAlternateScreen).ok();
    }
    raw
}

fn install_panic_hook(alt_screen: bool) {
    static INSTALLED: Once = Once::new();
    INSTALLED.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = release_terminal(alt_screen);
            previous(info);
        }));
    });
}

/// Drives one [`Model`] on the real terminal.
///
/// ```rust,ignore
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let settings = Program::<Settings>::with_options(form, options)?.run().await?;
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    screen: KioskScreen,
    msg_tx: mpsc::UnboundedSender<M::Message>,
    msg_rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    dirty: bool,
    quit: bool,
    _log_guard: Option<WorkerGuard>,
}

impl<M: Model> Program<M> {
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let log_guard = options
            .log_file
            .as_ref()
            .map(|path| crate::logging::init_file_logging(path))
            .transpose()?;

        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);
        let screen = KioskScreen::enter(&options)?;

        let mut program = Self {
            model,
            screen,
            subscriptions: SubscriptionManager::new(msg_tx.clone()),
            msg_tx,
            msg_rx,
            options,
            dirty: true,
            quit: false,
            _log_guard: log_guard,
        };
        tracing::info!(fps = program.options.fps, "program started");

        program.run_command(init_cmd);
        program.subscriptions.reconcile(program.model.subscriptions());
        Ok(program)
    }

    /// Run until the model quits and hand the final model back.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let outcome = self.event_loop().await;

        tracing::info!("shutting down");
        self.subscriptions.shutdown();
        self.screen.leave()?;
        outcome?;
        Ok(self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.draw()?;

        let mut frames = tokio::time::interval(self.options.frame_period());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let handle_signals = self.options.handle_signals;

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::info!("received ctrl+c");
                    return Ok(());
                }

                Some(msg) = self.msg_rx.recv() => {
                    self.dispatch(msg);
                    while !self.quit {
                        let Ok(msg) = self.msg_rx.try_recv() else {
                            break;
                        };
                        self.dispatch(msg);
                    }
                    if self.quit {
                        return Ok(());
                    }
                }

                _ = frames.tick(), if self.dirty => {
                    self.draw()?;
                }

                else => return Ok(()),
            }
        }
    }

    fn dispatch(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.run_command(cmd);
        self.subscriptions.reconcile(self.model.subscriptions());
        self.dirty = true;
    }

    fn run_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.msg_tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => self.quit = true,
            CommandInner::Future(fut) => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(fut.await);
                });
            }
            CommandInner::Batch(cmds) => cmds.into_iter().for_each(|cmd| self.run_command(cmd)),
            CommandInner::Terminal(tcmd) => {
                if let Err(err) = self.screen.apply(tcmd) {
                    tracing::warn!(%err, "terminal command failed");
                }
            }
        }
    }

    fn draw(&mut self) -> Result<(), ProgramError> {
        self.screen.terminal.draw(|frame| self.model.view(frame))?;
        self.dirty = false;
        Ok(())
    }
}
