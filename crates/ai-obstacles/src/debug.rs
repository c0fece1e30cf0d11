//! Diagnostic drawing of obstacle outlines and the last path.

use crate::{Obstacles, Vec2, Vec3};

pub const POLYGON_COLOR: u16 = 0x7FFF;
pub const ACTOR_COLOR: u16 = 0x7C00;

/// Screen a debug overlay is drawn onto.
pub trait DebugRenderer {
    /// World position to screen position (`x`, `y` in pixels).
    fn project(&self, world: Vec3) -> Vec3;

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: u16);
}

fn screen(renderer: &dyn DebugRenderer, p: Vec2, altitude: f32) -> Vec2 {
    let s = renderer.project(Vec3::new(p.x, altitude, p.y));
    Vec2::new(s.x, s.y)
}

impl Obstacles {
    /// Draw every polygon outline, the actor's collision box, and the last path, all at the
    /// actor's altitude.
    pub fn draw(&self, renderer: &mut dyn DebugRenderer, actor: Vec3) {
        let altitude = actor.y;

        for (_, poly) in self.polygons() {
            let Some(last) = poly.vertices.last() else {
                continue;
            };
            let mut p0 = screen(renderer, last.position, altitude);
            for v in &poly.vertices {
                let p1 = screen(renderer, v.position, altitude);
                renderer.draw_line(p0, p1, POLYGON_COLOR);
                p0 = p1;
            }
        }

        let m = self.config.obstacle_margin;
        let corners = [
            Vec2::new(actor.x - m, actor.z - m),
            Vec2::new(actor.x + m, actor.z - m),
            Vec2::new(actor.x + m, actor.z + m),
            Vec2::new(actor.x - m, actor.z + m),
        ];
        for i in 0..corners.len() {
            let a = screen(renderer, corners[i], altitude);
            let b = screen(renderer, corners[(i + 1) % corners.len()], altitude);
            renderer.draw_line(a, b, ACTOR_COLOR);
        }

        for w in self.path.windows(2) {
            let a = screen(renderer, w[0], altitude);
            let b = screen(renderer, w[1], altitude);
            renderer.draw_line(a, b, ACTOR_COLOR);
        }
    }
}
