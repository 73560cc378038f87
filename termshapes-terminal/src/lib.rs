/// Terminal driver for termshapes: raw-mode loop, key bindings and the
/// autorotate timer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use termshapes_core::{
    Axis, Command, LoadError, RenderOptions, RenderParams, Session, SessionError, Shape, StepSizes,
};
use thiserror::Error;
use tracing::{debug, info};

pub mod renderer;

pub use renderer::GlyphRenderer;

/// How long to wait for input when nothing is animating
const IDLE_POLL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Apply(Command),
}

/// Key bindings.
///
/// t/y, u/i and o/p rotate about z, x and y; `=`/`-` scale; h/l, j/k and f/g
/// translate along x, y and z; r resets; 1 and 2 toggle vertices and edges;
/// 3 cycles occlusion; 0/9 raise and lower edge density; a toggles
/// autorotation; q or Esc quits.
pub fn action_for_key(code: KeyCode, steps: &StepSizes) -> Option<Action> {
    let rotate = |angle, axis| Some(Action::Apply(Command::Rotate { angle, axis }));
    let translate = |distance, axis| Some(Action::Apply(Command::Translate { distance, axis }));
    let apply = |command| Some(Action::Apply(command));

    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        KeyCode::Char('t') => rotate(steps.angle, Axis::Z),
        KeyCode::Char('y') => rotate(-steps.angle, Axis::Z),
        KeyCode::Char('u') => rotate(steps.angle, Axis::X),
        KeyCode::Char('i') => rotate(-steps.angle, Axis::X),
        KeyCode::Char('o') => rotate(-steps.angle, Axis::Y),
        KeyCode::Char('p') => rotate(steps.angle, Axis::Y),

        KeyCode::Char('=') => apply(Command::Scale(steps.scale)),
        KeyCode::Char('-') => apply(Command::Scale(1.0 / steps.scale)),

        KeyCode::Char('h') => translate(-steps.distance, Axis::X),
        KeyCode::Char('l') => translate(steps.distance, Axis::X),
        KeyCode::Char('j') => translate(-steps.distance, Axis::Y),
        KeyCode::Char('k') => translate(steps.distance, Axis::Y),
        KeyCode::Char('f') => translate(-steps.distance, Axis::Z),
        KeyCode::Char('g') => translate(steps.distance, Axis::Z),

        KeyCode::Char('r') => apply(Command::Reset),
        KeyCode::Char('1') => apply(Command::TogglePrintVertices),
        KeyCode::Char('2') => apply(Command::TogglePrintEdges),
        KeyCode::Char('3') => apply(Command::CycleOcclusion),
        KeyCode::Char('0') => apply(Command::IncreaseDensity),
        KeyCode::Char('9') => apply(Command::DecreaseDensity),
        KeyCode::Char('a') => apply(Command::ToggleAutoRotate),

        _ => None,
    }
}

/// Main application struct for terminal shape rendering
pub struct TerminalApp {
    session: Session,
    renderer: GlyphRenderer,
    running: bool,
    dirty: bool,
    last_tick: Instant,
}

impl TerminalApp {
    pub fn new(
        shape: Shape,
        params: RenderParams,
        steps: StepSizes,
        options: RenderOptions,
    ) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            session: Session::new(shape, params, steps, width, height).with_options(options),
            renderer: GlyphRenderer::default(),
            running: true,
            dirty: true,
            last_tick: Instant::now(),
        })
    }

    pub fn apply(&mut self, command: Command) -> Result<(), AppError> {
        self.session.apply(command)?;
        if command == Command::ToggleAutoRotate {
            self.last_tick = Instant::now();
        }
        self.dirty = true;
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        info!("entering main loop");

        while self.running {
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }

            let timeout = match self.session.autorotate() {
                Some(autorotate) => autorotate.interval.saturating_sub(self.last_tick.elapsed()),
                None => IDLE_POLL,
            };

            if event::poll(timeout)? {
                self.handle_event(event::read()?)?;
            }

            if let Some(&autorotate) = self.session.autorotate() {
                if self.last_tick.elapsed() >= autorotate.interval {
                    self.session.tick();
                    self.last_tick = Instant::now();
                    self.dirty = true;
                }
            }
        }

        info!("leaving main loop");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<(), AppError> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                match action_for_key(code, self.session.steps()) {
                    Some(Action::Quit) => self.running = false,
                    Some(Action::Apply(command)) => {
                        debug!(?command, "key command");
                        self.apply(command)?;
                    }
                    None => {}
                }
            }
            Event::Resize(width, height) => {
                self.session.resize(width, height);
                self.dirty = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), AppError> {
        let frame = self.session.frame()?;

        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;

        self.renderer.draw(&mut stdout, &frame)?;

        // Status line
        let options = self.session.options();
        queue!(
            stdout,
            cursor::MoveTo(1, 1),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Occlusion type: {} | density {} | q=Quit",
                options.mode,
                self.session.shape().edge_density()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
