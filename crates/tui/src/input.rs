use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tabpip_protocol::{Gesture, Modifiers, PointerButton};

/// Two clicks on the same cell within this window count as a double click.
const DOUBLE_CLICK: Duration = Duration::from_millis(400);
/// Wheel delta reported per scroll notch when zooming (0.25 scale at the
/// default sensitivity).
const ZOOM_NOTCH: f64 = 25.0;
/// Wheel delta per scroll notch or arrow key when panning, in container
/// pixels.
const PAN_NOTCH: f64 = 4.0;

/// What the event loop should do with one terminal event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Resize,
    Gestures(Vec<Gesture>),
    Ignore,
}

/// Synthesizes double clicks, which terminals do not report.
///
/// A click is a press and release on the same cell; anything else is a drag
/// and breaks the pair.
#[derive(Debug, Default)]
pub struct ClickTracker {
    pressed: Option<(u16, u16)>,
    last: Option<(Instant, u16, u16)>,
}

impl ClickTracker {
    pub fn press(&mut self, column: u16, row: u16) {
        self.pressed = Some((column, row));
    }

    /// Record a release. Returns `true` when it completes a double click.
    pub fn release(&mut self, now: Instant, column: u16, row: u16) -> bool {
        if self.pressed.take() != Some((column, row)) {
            self.last = None;
            return false;
        }
        if let Some((at, c, r)) = self.last
            && c == column
            && r == row
            && now.duration_since(at) <= DOUBLE_CLICK
        {
            self.last = None;
            return true;
        }
        self.last = Some((now, column, row));
        false
    }
}

/// Maps terminal events to viewport gestures.
///
/// The content area starts one row below the top of the terminal (the
/// header) and every cell is one pixel wide and two pixels tall.
#[derive(Debug, Default)]
pub struct InputMapper {
    clicks: ClickTracker,
}

impl InputMapper {
    pub fn map(&mut self, event: &Event, now: Instant, content_cols: u16, content_rows: u16) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::map_key(key, content_cols, content_rows)
            }
            Event::Mouse(mouse) => self.map_mouse(mouse, now),
            Event::Resize(..) => Action::Resize,
            _ => Action::Ignore,
        }
    }

    fn map_key(key: &KeyEvent, content_cols: u16, content_rows: u16) -> Action {
        let cx = f64::from(content_cols) / 2.0;
        let cy = f64::from(content_rows);
        let wheel = |delta_x: f64, delta_y: f64, modifiers: Modifiers| {
            Action::Gestures(vec![Gesture::Wheel {
                x: cx,
                y: cy,
                delta_x,
                delta_y,
                modifiers,
            }])
        };
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('+') | KeyCode::Char('=') => wheel(0.0, -ZOOM_NOTCH, Modifiers::CTRL),
            KeyCode::Char('-') => wheel(0.0, ZOOM_NOTCH, Modifiers::CTRL),
            KeyCode::Char('0') => Action::Gestures(vec![Gesture::DoubleActivate { x: cx, y: cy }]),
            KeyCode::Left => wheel(-PAN_NOTCH, 0.0, Modifiers::NONE),
            KeyCode::Right => wheel(PAN_NOTCH, 0.0, Modifiers::NONE),
            KeyCode::Up => wheel(0.0, -PAN_NOTCH, Modifiers::NONE),
            KeyCode::Down => wheel(0.0, PAN_NOTCH, Modifiers::NONE),
            _ => Action::Ignore,
        }
    }

    fn map_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> Action {
        let (x, y) = cell_to_pixel(mouse.column, mouse.row);
        let modifiers = Modifiers {
            ctrl: mouse.modifiers.contains(KeyModifiers::CONTROL),
            meta: mouse.modifiers.contains(KeyModifiers::SUPER),
            shift: mouse.modifiers.contains(KeyModifiers::SHIFT),
            alt: mouse.modifiers.contains(KeyModifiers::ALT),
        };
        let notch = if modifiers.zoom() { ZOOM_NOTCH } else { PAN_NOTCH };
        let wheel = |delta_x: f64, delta_y: f64| {
            Action::Gestures(vec![Gesture::Wheel {
                x,
                y,
                delta_x,
                delta_y,
                modifiers,
            }])
        };

        match mouse.kind {
            MouseEventKind::ScrollUp => wheel(0.0, -notch),
            MouseEventKind::ScrollDown => wheel(0.0, notch),
            MouseEventKind::ScrollLeft => wheel(-notch, 0.0),
            MouseEventKind::ScrollRight => wheel(notch, 0.0),
            MouseEventKind::Down(button) => {
                if button == MouseButton::Left {
                    self.clicks.press(mouse.column, mouse.row);
                }
                Action::Gestures(vec![Gesture::PointerDown {
                    x,
                    y,
                    button: map_button(button),
                }])
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                Action::Gestures(vec![Gesture::PointerMove { x, y }])
            }
            MouseEventKind::Up(button) => {
                let mut gestures = vec![Gesture::PointerUp { x, y }];
                if button == MouseButton::Left && self.clicks.release(now, mouse.column, mouse.row) {
                    gestures.push(Gesture::DoubleActivate { x, y });
                }
                Action::Gestures(gestures)
            }
        }
    }
}

fn map_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Right => PointerButton::Secondary,
    }
}

/// Centre of a terminal cell in container pixels. Row 0 is the header.
pub fn cell_to_pixel(column: u16, row: u16) -> (f64, f64) {
    let x = f64::from(column) + 0.5;
    let y = (f64::from(row) - 1.0) * 2.0 + 1.0;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn mouse(kind: MouseEventKind, column: u16, row: u16, modifiers: KeyModifiers) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn ctrl_scroll_is_a_zoom_wheel() {
        let mut mapper = InputMapper::default();
        let action = mapper.map(
            &mouse(MouseEventKind::ScrollUp, 10, 3, KeyModifiers::CONTROL),
            Instant::now(),
            80,
            23,
        );
        assert_eq!(
            action,
            Action::Gestures(vec![Gesture::Wheel {
                x: 10.5,
                y: 5.0,
                delta_x: 0.0,
                delta_y: -ZOOM_NOTCH,
                modifiers: Modifiers::CTRL,
            }])
        );
    }

    #[test]
    fn plain_scroll_pans() {
        let mut mapper = InputMapper::default();
        let action = mapper.map(
            &mouse(MouseEventKind::ScrollRight, 0, 1, KeyModifiers::NONE),
            Instant::now(),
            80,
            23,
        );
        assert!(matches!(
            action,
            Action::Gestures(ref g) if matches!(g[0], Gesture::Wheel { delta_x, .. } if delta_x == PAN_NOTCH)
        ));
    }

    fn click(clicks: &mut ClickTracker, now: Instant, column: u16, row: u16) -> bool {
        clicks.press(column, row);
        clicks.release(now, column, row)
    }

    #[test]
    fn second_click_on_same_cell_is_double_activate() {
        let mut mapper = InputMapper::default();
        let t0 = Instant::now();
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 4, 4, KeyModifiers::NONE);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 4, 4, KeyModifiers::NONE);

        mapper.map(&down, t0, 80, 23);
        let first = mapper.map(&up, t0, 80, 23);
        assert_eq!(first, Action::Gestures(vec![Gesture::PointerUp { x: 4.5, y: 7.0 }]));

        mapper.map(&down, t0 + Duration::from_millis(150), 80, 23);
        let second = mapper.map(&up, t0 + Duration::from_millis(200), 80, 23);
        assert_eq!(
            second,
            Action::Gestures(vec![
                Gesture::PointerUp { x: 4.5, y: 7.0 },
                Gesture::DoubleActivate { x: 4.5, y: 7.0 },
            ])
        );
    }

    #[test]
    fn slow_or_moved_clicks_are_single() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!click(&mut clicks, t0, 1, 1));
        assert!(!click(&mut clicks, t0 + Duration::from_millis(900), 1, 1));
        assert!(!click(&mut clicks, t0 + Duration::from_millis(1000), 2, 1));
        assert!(click(&mut clicks, t0 + Duration::from_millis(1100), 2, 1));
        // A triple click starts a new pair.
        assert!(!click(&mut clicks, t0 + Duration::from_millis(1200), 2, 1));
    }

    #[test]
    fn drags_ending_on_one_cell_are_not_clicks() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        clicks.press(10, 5);
        assert!(!clicks.release(t0, 4, 4));
        clicks.press(20, 8);
        assert!(!clicks.release(t0 + Duration::from_millis(100), 4, 4));

        // A drag between two clicks also breaks the pair.
        assert!(!click(&mut clicks, t0 + Duration::from_millis(200), 4, 4));
        clicks.press(9, 9);
        assert!(!clicks.release(t0 + Duration::from_millis(250), 4, 4));
        assert!(!click(&mut clicks, t0 + Duration::from_millis(300), 4, 4));

        // A release with no press seen is ignored.
        assert!(!clicks.release(t0 + Duration::from_millis(350), 4, 4));
    }

    #[test]
    fn mapped_drags_do_not_toggle_zoom() {
        let mut mapper = InputMapper::default();
        let t0 = Instant::now();
        for (i, start) in [(10u16, 5u16), (30, 9)].into_iter().enumerate() {
            let at = t0 + Duration::from_millis(100 * i as u64);
            let down = mouse(
                MouseEventKind::Down(MouseButton::Left),
                start.0,
                start.1,
                KeyModifiers::NONE,
            );
            let up = mouse(MouseEventKind::Up(MouseButton::Left), 4, 4, KeyModifiers::NONE);
            mapper.map(&down, at, 80, 23);
            assert_eq!(
                mapper.map(&up, at, 80, 23),
                Action::Gestures(vec![Gesture::PointerUp { x: 4.5, y: 7.0 }])
            );
        }
    }

    #[test]
    fn keys_map_to_gestures() {
        let mut mapper = InputMapper::default();
        let now = Instant::now();
        assert_eq!(mapper.map(&key(KeyCode::Char('q')), now, 80, 23), Action::Quit);
        assert_eq!(
            mapper.map(&key(KeyCode::Char('0')), now, 80, 23),
            Action::Gestures(vec![Gesture::DoubleActivate { x: 40.0, y: 23.0 }])
        );
        assert!(matches!(
            mapper.map(&key(KeyCode::Char('+')), now, 80, 23),
            Action::Gestures(ref g) if matches!(g[0], Gesture::Wheel { modifiers, delta_y, .. } if modifiers.zoom() && delta_y < 0.0)
        ));
        assert_eq!(mapper.map(&key(KeyCode::Tab), now, 80, 23), Action::Ignore);
        assert_eq!(mapper.map(&Event::Resize(100, 30), now, 80, 23), Action::Resize);
    }
}
