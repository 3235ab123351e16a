use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};
use tabpip_core::{Viewport, ViewportConfig};
use tabpip_protocol::{Point, Size};

use crate::input::{Action, InputMapper};
use crate::surface::{TestCard, layout_to_surface};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// Container size in pixels for a terminal of the given size, minus the
/// header row.
fn container_for(area: Rect) -> Size {
    Size::new(
        f64::from(area.width),
        f64::from(area.height.saturating_sub(1)) * 2.0,
    )
}

pub fn run_tui(card: TestCard, config: &ViewportConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, card, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    card: TestCard,
    config: &ViewportConfig,
) -> Result<()> {
    let term_size = terminal.size()?;
    let area = Rect::new(0, 0, term_size.width, term_size.height);
    let mut viewport = Viewport::attach(card.size(), container_for(area), config);
    let mut mapper = InputMapper::default();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(header_title(&viewport))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            paint_viewport(frame.buffer_mut(), content_area, &viewport, &card);
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let ev = event::read()?;
        let term_size = terminal.size()?;
        let area = Rect::new(0, 0, term_size.width, term_size.height);
        let content_rows = area.height.saturating_sub(1);

        match mapper.map(&ev, Instant::now(), area.width, content_rows) {
            Action::Quit => break,
            Action::Resize => viewport.resize(container_for(area)),
            Action::Gestures(gestures) => {
                for gesture in &gestures {
                    viewport.handle(gesture);
                }
            }
            Action::Ignore => {}
        }
    }

    Ok(())
}

fn header_title(viewport: &Viewport) -> String {
    let state = viewport.state();
    format!(
        " tabpip | {:.0}% | t=({:.1}, {:.1}) | {} | ctrl+wheel: zoom, drag: pan, double-click: fit/1:1, q: quit ",
        state.scale * 100.0,
        state.translate.x,
        state.translate.y,
        viewport.cursor().css_name(),
    )
}

/// Sample the test card through the viewport's inverse transform, two
/// vertical pixels per cell.
fn paint_viewport(buf: &mut Buffer, area: Rect, viewport: &Viewport, card: &TestCard) {
    let container = viewport.container();
    let sample = |px: f64, py: f64| {
        let layout = viewport.to_layout_point(Point::new(px, py));
        let surface = layout_to_surface(layout, container, card.size());
        card.color_at(surface).unwrap_or(Color::Black)
    };

    for row in 0..area.height {
        for col in 0..area.width {
            let px = f64::from(col) + 0.5;
            let py = f64::from(row) * 2.0;
            let top = sample(px, py + 0.5);
            let bottom = sample(px, py + 1.5);
            buf[(area.x + col, area.y + row)]
                .set_char(HALF_BLOCK)
                .set_fg(top)
                .set_bg(bottom);
        }
    }
}
