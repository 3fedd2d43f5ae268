mod list;
mod source;
mod terminal;

use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, MouseEvent, MouseEventKind};
use futures::StreamExt;
use pullswipe::{
    ContentChange, GestureKind, LoadKind, PointerAction, PointerEvent, ScrollState, SwipeList,
    SwipeListConfig,
};
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

use list::TerminalList;
use source::Page;
use terminal::TerminalGuard;

/// Terminal row the list starts on, below the status line.
const LIST_TOP: u16 = 2;

#[tokio::main]
async fn main() {
    let log_file = File::create("pullswipe-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
    }
}

struct App {
    list: SwipeList,
    view: TerminalList,
    /// Row the current pointer gesture started on.
    pressed: Option<usize>,
}

async fn run() -> io::Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let mut guard = TerminalGuard::new()?;

    let config = SwipeListConfig::new().touch_slop(2).pull_enable(true, true);
    let mut app = App {
        list: SwipeList::new(config).map_err(io::Error::other)?,
        view: TerminalList::new(LIST_TOP, width, height),
        pressed: None,
    };

    app.list
        .set_menu_creator(list::menus_for)
        .map_err(io::Error::other)?;
    app.list
        .set_item_click_listener(|index| log::info!("clicked item {}", index))
        .map_err(io::Error::other)?;
    app.list
        .set_menu_item_click_listener(|click| {
            log::info!("clicked {:?} menu of item {}", click.direction, click.index)
        })
        .map_err(io::Error::other)?;
    app.list
        .set_empty_state_observer(|state| log::debug!("empty state: {:?}", state));

    let (page_tx, mut page_rx) = mpsc::unbounded_channel();
    source::spawn(app.list.connect_loader(), page_tx);

    app.list.add_header(&mut app.view);
    app.list
        .attach_adapter(&mut app.view, 0)
        .map_err(io::Error::other)?;
    app.list.add_footer(&mut app.view);
    app.list.trigger_refresh(&mut app.view);

    let mut events = EventStream::new();
    let mut frame = tokio::time::interval(Duration::from_millis(16));
    frame.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    if !app.handle_event(event) {
                        log::info!("quit requested");
                        break;
                    }
                }
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(page) = page_rx.recv() => app.apply_page(page),
            _ = frame.tick() => {}
        }

        if let Some(kind) = app.list.poll_loader(&mut app.view) {
            log::debug!("{:?} completed", kind);
        }
        app.view.layout(&mut app.list);
        let now = Instant::now();
        app.view.tick(now);
        app.view.render(guard.stdout(), &app.list, now)?;
    }
    Ok(())
}

impl App {
    /// Returns false when the demo should exit.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => return false,
                KeyCode::Char('r') => {
                    self.list.trigger_refresh(&mut self.view);
                }
                KeyCode::Esc => {
                    self.list.close_menu(&mut self.view);
                }
                _ => {}
            },
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.view.resize(width, height),
            _ => {}
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let delta = match mouse.kind {
            MouseEventKind::ScrollDown => 1,
            MouseEventKind::ScrollUp => -1,
            _ => 0,
        };
        if delta != 0 {
            self.scroll(delta);
            return;
        }

        let Some(pointer) = PointerEvent::from_mouse(&mouse) else {
            return;
        };
        let pointer = localize(pointer, self.view.local_y(0));
        let result = self.list.handle_pointer(&mut self.view, pointer);
        match pointer.action {
            PointerAction::Down { .. } => self.pressed = self.list.gesture().touched_row(),
            PointerAction::Up { x, .. } => {
                if !result.intercept && result.kind == Some(GestureKind::Tap) {
                    if let Some(position) = self.pressed {
                        self.click(position, x);
                    }
                }
                self.pressed = None;
            }
            _ => {}
        }
    }

    fn scroll(&mut self, delta: i32) {
        if !self.view.scroll_by(delta) {
            return;
        }
        self.view.layout(&mut self.list);
        self.list.on_scroll_state_changed(ScrollState::Dragging);
        self.list.on_scrolled(&mut self.view, 0, delta);
        self.list.on_scroll_state_changed(ScrollState::Idle);
    }

    fn click(&mut self, position: usize, x: i32) {
        if self.view.is_load_more(position) {
            self.list.on_footer_click(&mut self.view);
        } else if let Some(direction) = self.view.menu_hit(position, x) {
            self.list.on_menu_item_click(position, direction, 0);
            self.list.close_menu(&mut self.view);
        } else {
            self.list.on_item_click(position);
        }
    }

    fn apply_page(&mut self, page: Page) {
        let change = match page.kind {
            LoadKind::Refresh => {
                self.view.items = page.items;
                ContentChange::Reset
            }
            LoadKind::LoadMore => {
                let start = self.view.items.len();
                let count = page.items.len();
                self.view.items.extend(page.items);
                ContentChange::RangeInserted { start, count }
            }
        };
        let count = self.view.items.len();
        if let Err(e) = self.list.on_content_changed(&mut self.view, change, count) {
            log::error!("content change dropped: {}", e);
        }
    }
}

/// Shift a pointer event from terminal rows into list-local rows.
fn localize(event: PointerEvent, dy: i32) -> PointerEvent {
    let action = match event.action {
        PointerAction::Down { x, y } => PointerAction::Down { x, y: y + dy },
        PointerAction::Move { x, y } => PointerAction::Move { x, y: y + dy },
        PointerAction::Up { x, y } => PointerAction::Up { x, y: y + dy },
        PointerAction::Cancel { x, y } => PointerAction::Cancel { x, y: y + dy },
    };
    PointerEvent { action, ..event }
}
