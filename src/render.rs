use crate::GridInt;
use crate::apples::Apples;
use crate::snake::Snake;

const APPLE_RADIUS: f64 = 4.0 / 7.0;
const BODY_RADIUS: f64 = 4.0 / 7.0;
const HEAD_RADIUS: f64 = 5.0 / 7.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    LightGreen,
    Green,
    Red,
    Pink,
    Magenta,
}

/// A 2D raster target. Coordinates are in surface units with the origin in the
/// top-left corner.
pub trait RenderSurface {
    fn size(&self) -> (f64, f64);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color);
}

pub trait ScoreDisplay {
    fn set_score(&mut self, score: u32);
}

pub fn format_score(score: u32) -> String {
    format!("{:03}", score)
}

/// Redraws the whole board: background, apples, body from tail to neck, head.
pub fn draw<S: RenderSurface + ?Sized>(surface: &mut S, grid_size: GridInt, snake: &Snake, apples: &Apples) {
    let (w, h) = surface.size();
    let tile = w.min(h) / grid_size as f64;
    let center = |c: f64| c * tile + tile / 2.0;

    surface.clear_rect(0.0, 0.0, w, h);

    for y in 0..grid_size {
        for x in 0..grid_size {
            let color = if (x + y) % 2 == 0 { Color::LightGreen } else { Color::Green };
            surface.fill_rect(x as f64 * tile, y as f64 * tile, tile, tile, color);
        }
    }

    for &(x, y) in apples.iter() {
        surface.fill_circle(center(x as f64), center(y as f64), tile * APPLE_RADIUS, Color::Red);
    }

    for part in snake.parts_from_tail().take(snake.len() - 1) {
        let (cx, cy) = part.drawn();
        surface.fill_circle(center(cx), center(cy), tile * BODY_RADIUS, Color::Pink);
    }

    let (hx, hy) = snake.head().drawn();
    surface.fill_circle(center(hx), center(hy), tile * HEAD_RADIUS, Color::Magenta);
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn score_is_zero_padded() {
        assert_eq!(format_score(0), "000");
        assert_eq!(format_score(42), "042");
        assert_eq!(format_score(1234), "1234");
    }

    #[test]
    fn draws_in_fixed_order() {
        let mut snake = Snake::new((2, 1), (1, 1));
        snake.grow((-1, 0));
        snake.grow((-1, 0));
        let mut apples = Apples::new();
        apples.place((3, 3));

        let mut surface = RecordingSurface::new(40.0);
        draw(&mut surface, 4, &snake, &apples);

        assert_eq!(surface.calls[0], DrawCall::Clear);
        assert_eq!(surface.calls[1], DrawCall::Rect(Color::LightGreen));
        assert_eq!(surface.calls[2], DrawCall::Rect(Color::Green));
        assert_eq!(surface.calls.len(), 1 + 16 + 1 + 3);

        let colors: Vec<Color> = surface.calls[17..]
            .iter()
            .map(|c| match c {
                DrawCall::Circle { color, .. } => *color,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(colors, vec![Color::Red, Color::Pink, Color::Pink, Color::Magenta]);
    }

    #[test]
    fn circles_sit_on_tile_centers() {
        let mut snake = Snake::new((2, 1), (1, 1));
        snake.grow((-1, 0));
        let apples = Apples::new();

        let mut surface = RecordingSurface::new(40.0);
        draw(&mut surface, 4, &snake, &apples);

        let circles = surface.circles();
        assert_eq!(
            *circles[0],
            DrawCall::Circle { cx: 15.0, cy: 15.0, radius: 10.0 * BODY_RADIUS, color: Color::Pink }
        );
        // head is drawn at its pre-tick cell until interpolation moves it
        assert_eq!(
            *circles[1],
            DrawCall::Circle { cx: 15.0, cy: 15.0, radius: 10.0 * HEAD_RADIUS, color: Color::Magenta }
        );
    }
}
