use alloc::vec::Vec;

use glam::Vec3;
use smallvec::SmallVec;
use torri_core::{Coord2, Tile};

use crate::{Palette, Rgb};

/// Edge length of one tile footprint in world units.
pub const TILE_SIZE: f32 = 3.0;
/// Height of the board slab; stacks start at this elevation.
pub const SLAB_HEIGHT: f32 = 0.5;
/// Height of each building storey.
pub const STOREY_HEIGHT: f32 = 0.5;
/// Per-side inset applied for each storey above the first.
const STOREY_INSET: f32 = 0.25;
/// Height of the capstone pyramid.
const CAP_HEIGHT: f32 = 1.0;
/// Edge length of the worker marker cube.
const WORKER_SIZE: f32 = 1.0;

/// Geometry of a single draw call, in world units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Solid {
    /// Axis-aligned rectangular prism.
    Block { origin: Vec3, size: Vec3 },
    /// Capstone pyramid over a square base, marking a finished tower.
    Cap { origin: Vec3, base: f32, height: f32 },
    /// Flat square overlay at the top of a stack.
    Highlight { origin: Vec3, side: f32 },
    /// Worker marker cube centered on its tile.
    Worker { origin: Vec3, size: f32 },
}

/// One ordered draw call: a solid plus the color to paint it with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawPrimitive {
    pub solid: Solid,
    pub color: Rgb,
}

impl DrawPrimitive {
    pub const fn new(solid: Solid, color: Rgb) -> Self {
        Self { solid, color }
    }
}

/// Consumer at the renderer boundary.
///
/// Implementations must paint primitives in call order; the stream is
/// already depth-sorted back-to-front and occlusion depends on it.
pub trait Render {
    fn draw(&mut self, primitive: DrawPrimitive);
}

impl Render for Vec<DrawPrimitive> {
    fn draw(&mut self, primitive: DrawPrimitive) {
        self.push(primitive);
    }
}

/// Draw calls for a single tile; a full stack with a worker needs five.
pub type TilePrimitives = SmallVec<[DrawPrimitive; 5]>;

/// Build the draw calls for one tile at its display position.
///
/// Ordered for the painter's algorithm within the tile: storeys bottom to
/// top, then the capstone, then the highlight overlay, then the worker.
/// The codec is the only producer of heights and enforces `0..=4`.
pub fn tile_primitives(
    display: Coord2,
    tile: Tile,
    highlighted: bool,
    palette: &Palette,
) -> TilePrimitives {
    let stack = tile.height();
    assert!(stack <= Tile::MAX_HEIGHT, "tile height out of range");

    let x = f32::from(display.0) * TILE_SIZE;
    let y = f32::from(display.1) * TILE_SIZE;
    let mut prims = TilePrimitives::new();

    for storey in 0..stack.min(3) {
        let inset = STOREY_INSET * f32::from(storey);
        let side = TILE_SIZE - 2.0 * inset;
        prims.push(DrawPrimitive::new(
            Solid::Block {
                origin: Vec3::new(
                    x + inset,
                    y + inset,
                    SLAB_HEIGHT + f32::from(storey) * STOREY_HEIGHT,
                ),
                size: Vec3::new(side, side, STOREY_HEIGHT),
            },
            palette.building,
        ));
    }
    if stack > 3 {
        prims.push(DrawPrimitive::new(
            Solid::Cap {
                origin: Vec3::new(
                    x + 2.0 * STOREY_INSET,
                    y + 2.0 * STOREY_INSET,
                    SLAB_HEIGHT + 3.0 * STOREY_HEIGHT,
                ),
                base: TILE_SIZE - 4.0 * STOREY_INSET,
                height: CAP_HEIGHT,
            },
            palette.cap,
        ));
    }

    // a capped tower hides both overlays
    if stack < Tile::MAX_HEIGHT {
        let top = SLAB_HEIGHT + f32::from(stack) * STOREY_HEIGHT;
        if highlighted {
            let inset = (f32::from(stack) * STOREY_INSET - STOREY_INSET).max(0.0);
            prims.push(DrawPrimitive::new(
                Solid::Highlight {
                    origin: Vec3::new(x + inset, y + inset, top),
                    side: TILE_SIZE - 2.0 * inset,
                },
                palette.highlight,
            ));
        }
        if let Some(team) = tile.worker() {
            let centered = (TILE_SIZE - WORKER_SIZE) / 2.0;
            prims.push(DrawPrimitive::new(
                Solid::Worker {
                    origin: Vec3::new(x + centered, y + centered, top),
                    size: WORKER_SIZE,
                },
                palette.worker(team),
            ));
        }
    }

    prims
}

/// Ordered draw stream for one render pass: board slab first, then layered
/// content back-to-front. Built from scratch every pass, never cached.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<DrawPrimitive>,
}

impl Scene {
    pub(crate) fn from_primitives(primitives: Vec<DrawPrimitive>) -> Self {
        Self { primitives }
    }

    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Feed the whole stream to the renderer boundary, in order.
    pub fn render(&self, out: &mut impl Render) {
        for &primitive in &self.primitives {
            out.draw(primitive);
        }
    }
}
