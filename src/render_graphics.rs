use crate::model::{ColorgridModel, ColorgridState, CELLH, CELLW, GRID_COLS, GRID_ROWS};
use colorgrid_lib::Rgb;
use itertools::Itertools;
use rust_pixel::{
    context::Context,
    event::{event_check, event_register},
    game::Render,
    render::panel::Panel,
    render::sprite::Sprite,
    render::style::Color,
};

const BOARDW: u16 = (GRID_COLS as u16) * (CELLW as u16);
const BOARDH: u16 = (GRID_ROWS as u16) * (CELLH as u16);

fn tile_color(c: &Rgb) -> Color {
    Color::Rgb(
        (c.r * 255.0) as u8,
        (c.g * 255.0) as u8,
        (c.b * 255.0) as u8,
    )
}

pub struct ColorgridRender {
    pub panel: Panel,
}

impl ColorgridRender {
    pub fn new() -> Self {
        let mut t = Panel::new();

        let mut border = Sprite::new(0, 0, BOARDW + 2, BOARDH + 2);
        border.set_color_str(
            6,
            0,
            "COLORGRID [RustPixel]",
            Color::Indexed(222),
            Color::Reset,
        );
        t.add_sprite(border, "GRID-BORDER");
        t.add_pixel_sprite(Sprite::new(1, 1, BOARDW, BOARDH), "GRID");
        t.add_sprite(Sprite::new(0, BOARDH + 3, BOARDW + 2, 1u16), "GRID-MSG");

        event_register("Colorgrid.RedrawGrid", "draw_grid");

        Self { panel: t }
    }

    pub fn draw_grid(&mut self, _ctx: &mut Context, d: &mut ColorgridModel) {
        let l = self.panel.get_pixel_sprite("GRID");
        for (row, col) in (0..GRID_ROWS).cartesian_product(0..GRID_COLS) {
            let cell = d.board.cell(row, col);
            let x = (col as u16) * (CELLW as u16);
            let y = row as u16;
            if cell.eliminated {
                l.set_color_str(x, y, "  ", Color::Reset, Color::Reset);
            } else {
                let color = tile_color(&cell.color);
                l.set_graph_sym(x, y, 1, 102, color);
                l.set_graph_sym(x + 1, y, 1, 102, color);
            }
        }
    }

    fn draw_status(&mut self, ctx: &mut Context, d: &mut ColorgridModel) {
        let msg = if ctx.state == ColorgridState::Finished as u8 {
            format!(
                "Game over! Score: {}  Press enter to restart",
                d.board.score
            )
        } else {
            format!("Turn: {}  Score: {}", d.board.turn, d.board.score)
        };
        let ml = self.panel.get_sprite("GRID-MSG");
        ml.set_color_str(
            0,
            0,
            &format!("{:w$}", msg, w = (BOARDW + 2) as usize),
            Color::LightYellow,
            Color::Reset,
        );
    }
}

impl Default for ColorgridRender {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for ColorgridRender {
    type Model = ColorgridModel;

    fn init(&mut self, context: &mut Context, data: &mut Self::Model) {
        context
            .adapter
            .init(BOARDW + 2, BOARDH + 4, 1.0, 1.0, "colorgrid".to_string());
        self.panel.init(context);
        self.draw_grid(context, data);
    }

    fn handle_event(&mut self, context: &mut Context, data: &mut Self::Model, _dt: f32) {
        if event_check("Colorgrid.RedrawGrid", "draw_grid") {
            self.draw_grid(context, data);
        }
    }

    fn handle_timer(&mut self, _context: &mut Context, _model: &mut Self::Model, _dt: f32) {}

    fn draw(&mut self, context: &mut Context, model: &mut Self::Model, _dt: f32) {
        self.draw_status(context, model);
        self.panel.draw(context).unwrap();
    }
}
