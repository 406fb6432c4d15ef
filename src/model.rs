use colorgrid_lib::ColorGrid;
use log::{debug, info};
use rust_pixel::{
    context::Context,
    event::{event_emit, Event, KeyCode, MouseButton, MouseEventKind::*},
    game::Model,
};

/// Board layout: 16 x 12 tiles, each two terminal cells wide so tiles read
/// roughly square in text mode.
pub const GRID_COLS: usize = 16;
pub const GRID_ROWS: usize = 12;
pub const CELLW: u32 = 2;
pub const CELLH: u32 = 1;

/// Color-distance threshold of an elimination pass.
pub const TOLERANCE: f32 = 0.2;

#[repr(u8)]
pub enum ColorgridState {
    Playing,
    Finished,
}

pub struct ColorgridModel {
    pub board: ColorGrid,
}

impl ColorgridModel {
    pub fn new() -> Self {
        Self {
            board: ColorGrid::new(GRID_ROWS, GRID_COLS, CELLW, CELLH).unwrap(),
        }
    }

    fn restart(&mut self, ctx: &mut Context) {
        self.board.reset();
        ctx.state = ColorgridState::Playing as u8;
        event_emit("Colorgrid.RedrawGrid");
    }

    fn pick(&mut self, x: u16, y: u16) {
        match self.board.select(x as u32, y as u32) {
            Ok(idx) => {
                debug!("picked tile {}", idx);
                event_emit("Colorgrid.RedrawGrid");
            }
            Err(e) => debug!("ignored click: {}", e),
        }
    }
}

impl Default for ColorgridModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for ColorgridModel {
    fn init(&mut self, ctx: &mut Context) {
        self.board.reset();
        ctx.state = ColorgridState::Playing as u8;
        ctx.input_events.clear();
        event_emit("Colorgrid.RedrawGrid");
    }

    fn handle_input(&mut self, ctx: &mut Context, _dt: f32) {
        let es = ctx.input_events.clone();
        for e in &es {
            match e {
                Event::Mouse(mou) => {
                    if mou.kind == Up(MouseButton::Left) {
                        // The board sprite sits at (1, 1) inside the border.
                        if mou.column >= 1 && mou.row >= 1 {
                            self.pick(mou.column - 1, mou.row - 1);
                        }
                    }
                }
                Event::Key(key) => {
                    if key.code == KeyCode::Enter {
                        self.restart(ctx);
                    }
                }
            }
        }
        ctx.input_events.clear();
    }

    fn handle_auto(&mut self, ctx: &mut Context, _dt: f32) {
        if self.board.selected.is_none() {
            return;
        }
        if let Some(report) = self.board.resolve(TOLERANCE) {
            info!(
                "turn {}: wiped {} tiles, scored {} (total {})",
                report.turn, report.eliminated, report.gained, self.board.score
            );
            if self.board.is_cleared() {
                ctx.state = ColorgridState::Finished as u8;
                info!("board cleared, final score {}", self.board.score);
            }
            event_emit("Colorgrid.RedrawGrid");
        }
    }

    fn handle_event(&mut self, _ctx: &mut Context, _dt: f32) {}
    fn handle_timer(&mut self, _ctx: &mut Context, _dt: f32) {}
}
