//! Elm-architecture Model for the terminal front end.

use std::thread;

use floodroute_core::{
    Cell, Point,
    app::{Effect, Model, cmd},
    grid::Grid,
    messages::{Key, MouseAction, Msg},
    style::{AttrMask, Style},
};
use floodroute_map::{MapVariant, TileValue};

use crate::colors::*;
use crate::playback::PlaybackTick;
use crate::session::{Endpoint, SearchOutcome, Session};

/// Screen position of the map's top-left tile.
pub const MAP_ORIGIN: Point = Point::new(2, 2);
/// Each tile is drawn two columns wide so it looks roughly square.
pub const TILE_WIDTH: i32 = 2;

const MIN_WIDTH: i32 = 60;

const HELP: [&str; 2] = [
    "s start  e end  arrows+enter or click to place  enter/g find route",
    "f flood  n normal  c cancel playback  r reset  q quit",
];

/// Delivered when a scheduled playback step is due.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackTickMsg(pub PlaybackTick);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Good,
    Bad,
}

/// The floodroute terminal model.
pub struct RouteModel {
    session: Session,
    placing: Option<Endpoint>,
    cursor: Point,
    status: String,
    tone: Tone,
}

impl RouteModel {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            placing: None,
            cursor: Point::ZERO,
            status: "press s to place the start".into(),
            tone: Tone::Info,
        }
    }

    /// Screen size needed to show the map, help and status lines.
    pub fn screen_size(&self) -> Point {
        let map = self.session.grid().bounds();
        Point::new(
            (MAP_ORIGIN.x * 2 + map.width() * TILE_WIDTH).max(MIN_WIDTH),
            MAP_ORIGIN.y + map.height() + 4,
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Map cell under screen position `pos`, if any.
    pub fn cell_at(&self, pos: Point) -> Option<Point> {
        let rel = pos - MAP_ORIGIN;
        if rel.x < 0 {
            return None;
        }
        let cell = Point::new(rel.x / TILE_WIDTH, rel.y);
        self.session.grid().bounds().contains(cell).then_some(cell)
    }

    fn say(&mut self, tone: Tone, text: impl Into<String>) {
        self.status = text.into();
        self.tone = tone;
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        if let Some(role) = self.placing {
            match key {
                Key::ArrowUp => self.move_cursor(0, -1),
                Key::ArrowDown => self.move_cursor(0, 1),
                Key::ArrowLeft => self.move_cursor(-1, 0),
                Key::ArrowRight => self.move_cursor(1, 0),
                Key::Enter | Key::Space => self.place(role, self.cursor),
                Key::Escape => {
                    self.placing = None;
                    self.say(Tone::Info, "placement cancelled");
                }
                _ => return self.handle_command(key),
            }
            return None;
        }
        self.handle_command(key)
    }

    fn handle_command(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('s') => self.begin_placing(Endpoint::Start),
            Key::Char('e') => self.begin_placing(Endpoint::End),
            Key::Char('f') => self.switch(MapVariant::Flood),
            Key::Char('n') => self.switch(MapVariant::Normal),
            Key::Enter | Key::Char('g') => return self.find_route(),
            Key::Char('c') => {
                self.session.cancel_playback();
                self.say(Tone::Info, "playback cancelled");
            }
            Key::Char('r') => {
                self.session.reset();
                self.placing = None;
                self.say(Tone::Info, "reset: normal map, no endpoints");
            }
            Key::Char('q') | Key::Escape => return Some(Effect::End),
            _ => {}
        }
        None
    }

    fn begin_placing(&mut self, role: Endpoint) {
        self.placing = Some(role);
        let current = match role {
            Endpoint::Start => self.session.start(),
            Endpoint::End => self.session.end(),
        };
        if let Some(p) = current {
            self.cursor = p;
        }
        self.say(Tone::Info, format!("place the {role}: click a road tile or use arrows + enter"));
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let next = self.cursor.shift(dx, dy);
        if self.session.grid().bounds().contains(next) {
            self.cursor = next;
        }
    }

    fn place(&mut self, role: Endpoint, cell: Point) {
        let res = match role {
            Endpoint::Start => self.session.set_start(cell),
            Endpoint::End => self.session.set_end(cell),
        };
        match res {
            Ok(()) => {
                self.placing = None;
                self.cursor = cell;
                self.say(Tone::Good, format!("{role} set to {cell}"));
            }
            Err(e) => self.say(Tone::Bad, e.to_string()),
        }
    }

    fn switch(&mut self, variant: MapVariant) {
        self.session.select_variant(variant);
        self.say(Tone::Info, format!("{variant} map"));
    }

    fn find_route(&mut self) -> Option<Effect> {
        match self.session.request_search() {
            Ok(SearchOutcome::Found { tick }) => {
                let len = self.session.route().map_or(0, |r| r.len());
                self.say(Tone::Good, format!("route found: {len} cells"));
                tick.map(schedule)
            }
            Ok(SearchOutcome::Unreachable) => {
                self.say(Tone::Bad, "no safe route: blocked by buildings or flood");
                None
            }
            Err(e) => {
                self.say(Tone::Bad, e.to_string());
                None
            }
        }
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point) {
        let (Some(role), Some(cell)) = (self.placing, self.cell_at(pos)) else {
            return;
        };
        match action {
            MouseAction::Main => self.place(role, cell),
            MouseAction::Move => self.cursor = cell,
            _ => {}
        }
    }

    // -------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------

    fn draw_header(&self, grid: &mut Grid) {
        let title = Style::default().with_fg(FG_EMPH).with_attrs(AttrMask::BOLD);
        let at = grid.set_text(Point::new(1, 0), "floodroute", title);
        let info = format!("  map: {}", self.session.variant());
        grid.set_text(at, &info, Style::default().with_fg(FG));
    }

    fn draw_map(&self, grid: &mut Grid) {
        let route = self.session.route();
        for (cell, tile) in self.session.grid().map().iter() {
            let (mut text, mut style) = match tile {
                TileValue::Road => ("  ", Style::default().with_bg(ROAD_BG)),
                TileValue::Building => ("▒▒", Style::default().with_fg(BUILDING_FG).with_bg(BUILDING_BG)),
                TileValue::Flood => ("~~", Style::default().with_fg(FLOOD_FG).with_bg(FLOOD_BG)),
            };
            if route.is_some_and(|r| r.contains(cell)) {
                style = Style::default().with_bg(ROUTE_BG);
                text = "  ";
            }
            if self.session.start() == Some(cell) {
                (text, style) = ("S ", Style::default().with_fg(MARKER_FG).with_bg(START_BG));
            }
            if self.session.end() == Some(cell) {
                (text, style) = ("E ", Style::default().with_fg(MARKER_FG).with_bg(END_BG));
            }
            if self.session.marker() == Some(cell) {
                (text, style) = ("<>", Style::default().with_fg(VEHICLE_FG).with_bg(VEHICLE_BG));
            }
            if self.placing.is_some() && self.cursor == cell {
                style = style.with_attrs(AttrMask::REVERSE);
            }
            let pos = MAP_ORIGIN + Point::new(cell.x * TILE_WIDTH, cell.y);
            grid.set_text(pos, text, style);
        }
    }

    fn draw_footer(&self, grid: &mut Grid) {
        let h = grid.height();
        let dim = Style::default().with_fg(FG_DIM);
        for (i, line) in HELP.iter().enumerate() {
            grid.set_text(Point::new(1, h - 3 + i as i32), line, dim);
        }

        let fg = match self.tone {
            Tone::Info => FG_EMPH,
            Tone::Good => FG_OK,
            Tone::Bad => FG_ERROR,
        };
        let bar = Style::default().with_bg(STATUS_BG);
        for x in 0..grid.width() {
            grid.set(Point::new(x, h - 1), Cell::default().with_style(bar));
        }
        grid.set_text(Point::new(1, h - 1), &self.status, bar.with_fg(fg));
    }
}

/// A command that waits out `tick.delay` and then delivers the tick.
fn schedule(tick: PlaybackTick) -> Effect {
    cmd(move || {
        if !tick.delay.is_zero() {
            thread::sleep(tick.delay);
        }
        Some(Msg::custom(PlaybackTickMsg(tick)))
    })
}

impl Model for RouteModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        if let Some(&PlaybackTickMsg(tick)) = msg.downcast_ref::<PlaybackTickMsg>() {
            return self.session.playback_tick(tick, |_| {}).map(schedule);
        }
        match msg {
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Mouse { action, pos, .. } => {
                self.handle_mouse(action, pos);
                None
            }
            Msg::Quit => Some(Effect::End),
            _ => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::default());
        self.draw_header(grid);
        self.draw_map(grid);
        self.draw_footer(grid);
    }
}

impl Default for RouteModel {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;

    fn press(m: &mut RouteModel, c: char) -> Option<Effect> {
        m.update(Msg::key(Key::Char(c)))
    }

    fn screen(cell: Point) -> Point {
        MAP_ORIGIN + Point::new(cell.x * TILE_WIDTH + 1, cell.y)
    }

    /// Run playback commands inline until none is left.
    fn drain(m: &mut RouteModel, mut effect: Option<Effect>) -> usize {
        let mut steps = 0;
        while let Some(Effect::Cmd(f)) = effect.take() {
            let msg = f().expect("tick message");
            effect = m.update(msg);
            steps += 1;
        }
        steps
    }

    #[test]
    fn click_places_endpoints() {
        let mut m = RouteModel::default();
        press(&mut m, 's');
        m.update(Msg::click(screen(Point::new(0, 0))));
        assert_eq!(m.session().start(), Some(Point::new(0, 0)));

        press(&mut m, 'e');
        m.update(Msg::click(screen(Point::new(0, 1))));
        assert_eq!(m.session().end(), None);
        assert!(m.status().contains("not a road"), "{}", m.status());

        m.update(Msg::click(screen(Point::new(1, 12))));
        assert_eq!(m.session().end(), Some(Point::new(1, 12)));
    }

    #[test]
    fn cursor_and_enter_place_endpoint() {
        let mut m = RouteModel::default();
        press(&mut m, 's');
        m.update(Msg::key(Key::ArrowRight));
        m.update(Msg::key(Key::ArrowRight));
        m.update(Msg::key(Key::ArrowUp));
        m.update(Msg::key(Key::Enter));
        assert_eq!(m.session().start(), Some(Point::new(2, 0)));
    }

    #[test]
    fn find_route_plays_to_the_end() {
        let session = Session::new(floodroute_map::GridModel::new(), std::time::Duration::from_millis(1));
        let mut m = RouteModel::new(session);
        press(&mut m, 's');
        m.update(Msg::click(screen(Point::new(0, 0))));
        press(&mut m, 'e');
        m.update(Msg::click(screen(Point::new(4, 3))));
        let effect = press(&mut m, 'g');
        let len = m.session().route().map(|r| r.len()).unwrap();
        assert_eq!(drain(&mut m, effect), len);
        assert_eq!(m.session().playback_state(), PlaybackState::Done);
        assert_eq!(m.session().marker(), Some(Point::new(4, 3)));
    }

    #[test]
    fn search_without_endpoints_reports_error() {
        let mut m = RouteModel::default();
        assert!(press(&mut m, 'g').is_none());
        assert_eq!(m.status(), "start is not set");
    }

    #[test]
    fn quit_keys_end_the_app() {
        let mut m = RouteModel::default();
        assert!(matches!(press(&mut m, 'q'), Some(Effect::End)));
        assert!(matches!(m.update(Msg::Quit), Some(Effect::End)));
    }

    #[test]
    fn draws_markers_on_the_map() {
        let mut m = RouteModel::default();
        press(&mut m, 's');
        m.update(Msg::click(screen(Point::new(0, 0))));
        let size = m.screen_size();
        let mut grid = Grid::new(size.x, size.y);
        m.draw(&mut grid);
        assert_eq!(grid.at(MAP_ORIGIN).ch, 'S');
        assert_eq!(grid.at(MAP_ORIGIN).style.bg, START_BG);
        let flood = MAP_ORIGIN + Point::new(0, 4);
        assert_eq!(grid.at(flood).ch, '~');
        assert_eq!(m.cell_at(flood), Some(Point::new(0, 4)));
        assert_eq!(m.cell_at(Point::new(0, 0)), None);
    }
}
