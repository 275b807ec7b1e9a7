use glam::{Vec2, Vec3};

/// Cosine and sine of the fixed 30 degree viewing angle.
pub(crate) const ISO_COS: f32 = 0.866_025_4;
pub(crate) const ISO_SIN: f32 = 0.5;

/// Parallel isometric projection from world space onto the screen.
///
/// `origin` is the screen position of the world origin; `scale` is the
/// pixel length of one world unit along a grid axis. Screen y grows
/// downward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub origin: Vec2,
    pub scale: f32,
}

impl Projection {
    pub const fn new(origin: Vec2, scale: f32) -> Self {
        Self { origin, scale }
    }

    /// Projection whose origin sits at the lower screen center, scaled so
    /// `world_span` world units fill the viewport width.
    pub fn fit(viewport: Vec2, world_span: f32) -> Self {
        Self {
            origin: Vec2::new(viewport.x * 0.5, viewport.y * 0.9),
            scale: viewport.x / (world_span * 2.0 * ISO_COS),
        }
    }

    pub fn project(&self, point: Vec3) -> Vec2 {
        let sx = (point.x - point.y) * self.scale * ISO_COS;
        let sy = (point.x + point.y) * self.scale * ISO_SIN + point.z * self.scale;
        Vec2::new(self.origin.x + sx, self.origin.y - sy)
    }

    /// Invert the projection on the ground plane, ignoring elevation.
    ///
    /// Good enough for pointer hit-testing; a point on top of a tall tower
    /// unprojects to a tile behind the tower's own.
    pub fn unproject(&self, screen: Vec2) -> Vec2 {
        let u = (screen.x - self.origin.x) / (self.scale * ISO_COS);
        let v = (self.origin.y - screen.y) / (self.scale * ISO_SIN);
        Vec2::new((v + u) * 0.5, (v - u) * 0.5)
    }
}
