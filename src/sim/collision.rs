//! Collision detection and response for axis-aligned rectangles
//!
//! Everything in the level is a box. Detection is a strict overlap test and
//! response pushes the moving body out along the axis of least penetration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// A moving box: the only thing collision response is allowed to touch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Resting on top of a platform this frame
    pub grounded: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(width, height),
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Advance position by velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Which side of the fixed box the mover was pushed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Top,
    Bottom,
    Left,
    Right,
}

impl Contact {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Contact::Left | Contact::Right)
    }
}

/// Strict overlap on both axes. Shared edges are not a collision.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Push `mover` out of `fixed` along the axis of smaller overlap
///
/// Call only after `overlaps` reported a hit. Equal overlaps resolve
/// vertically. Landing on top sets `grounded`; hitting a ceiling does not.
pub fn resolve(mover: &mut Body, fixed: &Rect) -> Contact {
    let m = mover.rect();

    let overlap_x = (m.right() - fixed.x).min(fixed.right() - m.x);
    let overlap_y = (m.bottom() - fixed.y).min(fixed.bottom() - m.y);

    if overlap_x < overlap_y {
        mover.vel.x = 0.0;
        if m.x < fixed.x {
            mover.pos.x = fixed.x - m.w;
            Contact::Left
        } else {
            mover.pos.x = fixed.right();
            Contact::Right
        }
    } else {
        mover.vel.y = 0.0;
        if m.y < fixed.y {
            mover.pos.y = fixed.y - m.h;
            mover.grounded = true;
            Contact::Top
        } else {
            mover.pos.y = fixed.bottom();
            Contact::Bottom
        }
    }
}

/// Test and resolve in one go; `None` when the boxes don't touch
#[inline]
pub fn collide(mover: &mut Body, fixed: &Rect) -> Option<Contact> {
    if overlaps(&mover.rect(), fixed) {
        Some(resolve(mover, fixed))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(overlaps(&a, &Rect::new(9.0, 9.0, 10.0, 10.0)));
    }

    #[test]
    fn test_landing_on_top_grounds_mover() {
        let platform = Rect::new(0.0, 500.0, 800.0, 70.0);
        let mut body = Body::new(100.0, 432.0, 50.0, 70.0);
        body.vel = Vec2::new(0.0, 120.0);

        let contact = collide(&mut body, &platform);
        assert_eq!(contact, Some(Contact::Top));
        assert_eq!(body.pos.y, 430.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.grounded);
    }

    #[test]
    fn test_ceiling_hit_does_not_ground() {
        let platform = Rect::new(0.0, 300.0, 800.0, 50.0);
        let mut body = Body::new(100.0, 345.0, 50.0, 70.0);
        body.vel = Vec2::new(0.0, -500.0);

        assert_eq!(resolve(&mut body, &platform), Contact::Bottom);
        assert_eq!(body.pos.y, 350.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_side_hit_zeroes_horizontal_velocity() {
        let wall = Rect::new(200.0, 0.0, 50.0, 500.0);
        let mut body = Body::new(155.0, 100.0, 50.0, 70.0);
        body.vel = Vec2::new(400.0, 30.0);

        assert_eq!(resolve(&mut body, &wall), Contact::Left);
        assert_eq!(body.pos.x, 150.0);
        assert_eq!(body.vel, Vec2::new(0.0, 30.0));

        let mut body = Body::new(245.0, 100.0, 50.0, 70.0);
        body.vel = Vec2::new(-400.0, 0.0);
        assert_eq!(resolve(&mut body, &wall), Contact::Right);
        assert_eq!(body.pos.x, 250.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_equal_overlap_resolves_vertically() {
        let fixed = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut body = Body::new(95.0, -5.0, 10.0, 10.0);

        assert_eq!(resolve(&mut body, &fixed), Contact::Top);
        assert_eq!(body.pos, Vec2::new(95.0, -10.0));
    }

    // Integer-valued coordinates keep the clamp arithmetic exact.
    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500i32..500, -500i32..500, 1i32..200, 1i32..200)
            .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
    }

    /// A mover and a fixed box placed so the two always overlap
    fn overlapping_pair() -> impl Strategy<Value = (Rect, Rect)> {
        (rect_strategy(), 1i32..200, 1i32..200).prop_flat_map(|(m, w, h)| {
            let (mx, my, mw, mh) = (m.x as i32, m.y as i32, m.w as i32, m.h as i32);
            ((mx - w + 1)..(mx + mw), (my - h + 1)..(my + mh)).prop_map(move |(x, y)| {
                (m, Rect::new(x as f32, y as f32, w as f32, h as f32))
            })
        })
    }

    proptest! {
        #[test]
        fn prop_overlaps_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_resolve_separates(
            (m, fixed) in overlapping_pair(),
            vx in -500i32..500,
            vy in -500i32..500,
        ) {
            prop_assert!(overlaps(&m, &fixed));

            let mut body = Body::new(m.x, m.y, m.w, m.h);
            body.vel = Vec2::new(vx as f32, vy as f32);
            let contact = resolve(&mut body, &fixed);

            prop_assert!(!overlaps(&body.rect(), &fixed));
            if contact.is_horizontal() {
                prop_assert_eq!(body.vel.x, 0.0);
                prop_assert_eq!(body.vel.y, vy as f32);
                prop_assert_eq!(body.pos.y, m.y);
            } else {
                prop_assert_eq!(body.vel.y, 0.0);
                prop_assert_eq!(body.vel.x, vx as f32);
                prop_assert_eq!(body.pos.x, m.x);
            }
            prop_assert_eq!(body.grounded, contact == Contact::Top);
        }
    }
}
