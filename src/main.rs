use std::io;
use std::io::Write;
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spatial_quadtree::Point;
use spatial_quadtree::Session;
use spatial_quadtree::camera::Camera;
use spatial_quadtree::error::SettingsError;
use spatial_quadtree::events::AppEvent;
use spatial_quadtree::events::Event;
use spatial_quadtree::events::TreeEvent;
use spatial_quadtree::events::convert_event;
use spatial_quadtree::render::Viewport;
use spatial_quadtree::render::draw_tree;
use spatial_quadtree::settings::BrushMode;
use spatial_quadtree::settings::Settings;

const HELP: &str =
    "[enter] new tree  [mouse] paint/erase  [b] brush  [+/-] radius  [0-5] height  [g] grid  [f] filter  [q] quit";

#[derive(Parser, Debug)]
#[command(name = "spatial-quadtree")]
#[command(about = "Paint values into a quadtree from the terminal")]
struct Args {
    /// Max depth of created trees, 0 to 5
    #[arg(long, default_value = "3")]
    height: u8,

    /// Radius of the circle brush, in world units
    #[arg(short, long, default_value = "0.1")]
    brush_radius: f32,

    /// Side length of the root square, in world units
    #[arg(short, long, default_value = "1.0")]
    size: f32,

    /// Start with the circle brush instead of the point brush
    #[arg(long)]
    circle: bool,

    /// Don't draw the frame and subdivision lines
    #[arg(long)]
    hide_grid: bool,

    /// Only draw markers for nodes holding 1
    #[arg(long)]
    only_full: bool,

    /// Frames per second
    #[arg(long, default_value = "60")]
    fps: u32,
}

impl Args {
    fn settings(&self) -> Result<Settings, SettingsError> {
        Settings {
            tree_height: self.height,
            size: self.size,
            brush_radius: self.brush_radius,
            brush: if self.circle {
                BrushMode::Circle
            } else {
                BrushMode::Point
            },
            show_grid: !self.hide_grid,
            show_only_full_values: self.only_full,
            framerate: self.fps,
        }
        .validate()
    }
}

struct App {
    session: Session,
    settings: Settings,
    cam: Camera,

    /// Terminal width, which the status line must not exceed
    cols: u16,
}

impl App {
    fn new(settings: Settings, cols: u16, rows: u16) -> Self {
        Self {
            session: Session::new(),
            settings,
            // bottom row is the status line
            cam: Camera::new(cols, rows.saturating_sub(1)),
            cols,
        }
    }

    fn viewport(&self) -> Option<Viewport> {
        let tree = self.session.tree()?;
        Some(Viewport::fit(tree.bounds(), &self.cam))
    }

    fn handle(&mut self, event: Event) -> anyhow::Result<ControlFlow<()>> {
        match event {
            Event::TreeEvent(TreeEvent::NewTree) => {
                let height = self.settings.tree_height;
                let origin = Point::new(0.0, 0.0);

                self.session
                    .create_tree(origin, self.settings.size, 0.0, height)
                    .context("Failed to create tree")?;
                info!(height, "new tree");
            }
            Event::TreeEvent(TreeEvent::Paint { col, row, value }) => {
                let Some(view) = self.viewport() else {
                    debug!("no tree to paint on");
                    return Ok(ControlFlow::Continue(()));
                };

                let p = view.cell_to_world(col, row);
                match self.settings.brush {
                    BrushMode::Point => self.session.set_value(p, value)?,
                    BrushMode::Circle => {
                        self.session
                            .set_value_circle(value, p, self.settings.brush_radius)?
                    }
                }
            }
            Event::AppEvent(event) => match event {
                AppEvent::Exit => return Ok(ControlFlow::Break(())),
                AppEvent::ToggleGrid => self.settings.show_grid = !self.settings.show_grid,
                AppEvent::ToggleOnlyFull => {
                    self.settings.show_only_full_values = !self.settings.show_only_full_values
                }
                AppEvent::ToggleBrush => self.settings.brush = self.settings.brush.toggle(),
                AppEvent::GrowBrush => self.settings.grow_brush(),
                AppEvent::ShrinkBrush => self.settings.shrink_brush(),
                AppEvent::SetHeight(height) => self.settings.set_tree_height(height)?,
                AppEvent::Resize { cols, rows } => {
                    self.cam.resize(cols, rows.saturating_sub(1));
                    self.cols = cols;
                }
            },
        }

        Ok(ControlFlow::Continue(()))
    }

    fn status(&self) -> String {
        let brush = match self.settings.brush {
            BrushMode::Point => "point".to_string(),
            BrushMode::Circle => format!("circle r={:.3}", self.settings.brush_radius),
        };

        let tree = match self.session.tree() {
            Some(tree) => {
                let stats = tree.stats();
                format!(
                    "depth {} | nodes {} leaves {} full {}",
                    tree.max_depth(),
                    stats.nodes,
                    stats.leaves,
                    stats.full_leaves
                )
            }
            None => "no tree".to_string(),
        };

        let status = format!("{tree} | next height {} | {brush}", self.settings.tree_height);
        let width = self.cols as usize;

        // a line that wraps on the last row would scroll the whole frame up
        if status.len() + 3 + HELP.len() <= width {
            format!("{status} | {HELP}")
        } else {
            status.chars().take(width).collect()
        }
    }

    fn draw(&mut self, stdout: &mut io::Stdout) -> io::Result<()> {
        self.cam.reset();

        if let (Some(tree), Some(view)) = (self.session.tree(), self.viewport()) {
            draw_tree(&mut self.cam, tree, &view, &self.settings);
        }

        let status = self.status();
        let frame = self.cam.render();

        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for line in frame.lines() {
            queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        queue!(stdout, style::Print(status))?;
        stdout.flush()
    }
}

/// Puts the terminal back the way we found it, even if the loop bails out early.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut io::Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the frame, e.g. `RUST_LOG=debug ... 2> quadtree.log`
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let settings = args.settings().context("Invalid arguments")?;
    let frametime = Duration::from_secs_f64(1f64 / settings.framerate as f64);

    info!(?settings, "starting");

    let mut stdout = io::stdout();

    // Get the width and height of the terminal
    let (cols, rows) = terminal::size()?;
    let mut app = App::new(settings, cols, rows);

    let _guard = TerminalGuard::enter(&mut stdout)?;

    'main: loop {
        let t = Instant::now();

        // Wait up to a frame for input, then drain whatever else is queued
        if event::poll(frametime)? {
            loop {
                if let Some(event) = convert_event(event::read()?) {
                    if app.handle(event)?.is_break() {
                        break 'main;
                    }
                }

                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        app.draw(&mut stdout)?;

        thread::sleep(frametime.saturating_sub(t.elapsed()));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use spatial_quadtree::events::AppEvent;
    use spatial_quadtree::events::Event;
    use spatial_quadtree::events::TreeEvent;
    use spatial_quadtree::settings::Settings;

    use super::App;
    use super::HELP;

    #[test]
    fn status_fits_the_terminal() -> anyhow::Result<()> {
        let mut app = App::new(Settings::default(), 80, 24);
        assert!(app.status().chars().count() <= 80);

        app.handle(Event::TreeEvent(TreeEvent::NewTree))?;
        app.handle(Event::TreeEvent(TreeEvent::Paint {
            col: 3,
            row: 3,
            value: 1.0,
        }))?;
        assert!(app.status().starts_with("depth 3"));
        assert!(app.status().chars().count() <= 80);

        app.handle(Event::AppEvent(AppEvent::Resize { cols: 12, rows: 24 }))?;
        assert_eq!(app.status(), "depth 3 | no");

        Ok(())
    }

    #[test]
    fn wide_terminal_shows_help() {
        let app = App::new(Settings::default(), 300, 24);

        assert!(app.status().ends_with(HELP));
        assert!(app.status().chars().count() <= 300);
    }
}
