use alloc::string::String;
use alloc::vec::Vec;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use torri_core::{decode, encode, BoardState, Coord, Coord2, Result};

use crate::{
    tile_primitives, DepthLayers, DrawPrimitive, Palette, Projection, Render, Rotation, Scene,
    Solid, SLAB_HEIGHT, TILE_SIZE,
};

/// Camera state for one board: rotation step and zoom divisor.
///
/// The zoom divisor is the number of tile spans that fit across the
/// viewport, so a smaller value moves the camera closer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub rotation: Rotation,
    pub zoom: u8,
}

impl ViewState {
    /// Default zoom divisor; the whole standard board fits the viewport.
    pub const DEFAULT_ZOOM: u8 = 5;
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation: Rotation::default(),
            zoom: Self::DEFAULT_ZOOM,
        }
    }
}

/// One rendered board: current state, camera, palette, and build
/// highlights.
///
/// Owns everything a render pass reads; independent views never share
/// state. A constructed view is always ready to render.
#[derive(Clone, Debug)]
pub struct BoardView {
    board: BoardState,
    view: ViewState,
    palette: Palette,
    highlights: Vec<Coord2>,
}

impl BoardView {
    /// View over the standard two-player opening.
    pub fn new() -> Self {
        Self::with_board(BoardState::standard())
    }

    /// View over a decoded state string.
    pub fn from_state(state: &str) -> Result<Self> {
        Ok(Self::with_board(decode(state)?))
    }

    pub fn with_board(board: BoardState) -> Self {
        warn_non_square(&board);
        Self {
            board,
            view: ViewState::default(),
            palette: Palette::default(),
            highlights: Vec::new(),
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Replace the board from a state string.
    ///
    /// On a malformed string the previous board stays authoritative; there
    /// is no partial update. Highlights are cleared because they refer to
    /// coordinates of the replaced board.
    pub fn set_state(&mut self, state: &str) -> Result<()> {
        self.board = decode(state)?;
        self.highlights.clear();
        warn_non_square(&self.board);
        log::debug!(
            "board replaced: {}x{}",
            self.board.width(),
            self.board.height()
        );
        Ok(())
    }

    /// Re-encode the current board into its state string.
    pub fn state_string(&self) -> String {
        encode(&self.board)
    }

    /// Advance the view a quarter turn. Every tile's display position
    /// changes, so the caller should re-render.
    pub fn rotate(&mut self) {
        self.view.rotation = self.view.rotation.turn();
        log::debug!("rotation now {:?}", self.view.rotation);
    }

    /// Move the camera closer; the divisor never drops below 1.
    pub fn zoom_in(&mut self) {
        self.view.zoom = self.view.zoom.saturating_sub(1).max(1);
    }

    /// Move the camera farther away.
    pub fn zoom_out(&mut self) {
        self.view.zoom = self.view.zoom.saturating_add(1);
    }

    /// Mark tiles to draw with the build-candidate overlay, in logical
    /// coordinates. Rejects coordinates outside the board.
    pub fn set_highlights(&mut self, coords: &[Coord2]) -> Result<()> {
        for &c in coords {
            self.board.validate_coords(c)?;
        }
        self.highlights.clear();
        self.highlights.extend_from_slice(coords);
        Ok(())
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    /// Run one full render pass into an ordered primitive stream: the
    /// board slab, then every tile rotated, built, and depth-sorted
    /// back-to-front.
    pub fn scene(&self) -> Scene {
        let (width, height) = self.board.size();
        let grid = self.grid_size();
        let mut layers = DepthLayers::new(usize::from(width) + usize::from(height));

        for (coords, tile) in self.board.iter() {
            let display = self.view.rotation.apply(coords, grid);
            let highlighted = self.highlights.contains(&coords);
            layers.push(
                display,
                tile_primitives(display, tile, highlighted, &self.palette),
            );
        }

        let mut primitives = Vec::with_capacity(1 + layers.primitive_count());
        primitives.push(DrawPrimitive::new(
            Solid::Block {
                origin: Vec3::ZERO,
                size: Vec3::new(
                    f32::from(width) * TILE_SIZE,
                    f32::from(height) * TILE_SIZE,
                    SLAB_HEIGHT,
                ),
            },
            self.palette.slab,
        ));
        primitives.extend(layers.iter_back_to_front().copied());
        Scene::from_primitives(primitives)
    }

    /// Render one pass straight into the renderer boundary.
    pub fn render(&self, out: &mut impl Render) {
        self.scene().render(out);
    }

    /// Projection for a pixel viewport at the current zoom.
    pub fn projection(&self, viewport: Vec2) -> Projection {
        Projection::fit(viewport, f32::from(self.view.zoom) * TILE_SIZE)
    }

    /// Map a screen pixel back to the logical tile under it.
    ///
    /// Best-effort: the inverse ignores elevation, so pointing at the top
    /// of a tall tower resolves to a tile behind it.
    pub fn pointer_to_tile(&self, pixel: Vec2, viewport: Vec2) -> Option<Coord2> {
        let world = self.projection(viewport).unproject(pixel);
        let grid = self.grid_size();
        let display = (
            world_axis_to_tile(world.x)?,
            world_axis_to_tile(world.y)?,
        );
        if display.0 >= grid || display.1 >= grid {
            return None;
        }
        let logical = self.view.rotation.inverse().apply(display, grid);
        self.board.validate_coords(logical).ok()
    }

    /// Square grid edge used by the rotation; the board's width.
    fn grid_size(&self) -> Coord {
        self.board.width()
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

fn world_axis_to_tile(axis: f32) -> Option<Coord> {
    if axis < 0.0 {
        return None;
    }
    Coord::try_from((axis / TILE_SIZE) as u32).ok()
}

fn warn_non_square(board: &BoardState) {
    if !board.is_square() {
        log::warn!(
            "non-square board {}x{}: rotation is only exact for square boards",
            board.width(),
            board.height()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torri_core::{BoardError, DEFAULT_OPENING};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn new_view_holds_the_standard_opening() {
        let view = BoardView::new();

        assert_eq!(view.state_string(), DEFAULT_OPENING);
        assert_eq!(view.view(), ViewState::default());
    }

    #[test]
    fn failed_set_state_keeps_the_previous_board() {
        let mut view = BoardView::new();
        let short = &DEFAULT_OPENING[..DEFAULT_OPENING.len() - 1];

        assert_eq!(view.set_state(short), Err(BoardError::RaggedLength));
        assert_eq!(view.state_string(), DEFAULT_OPENING);
    }

    #[test]
    fn scene_starts_with_the_board_slab() {
        let scene = BoardView::new().scene();

        assert!(matches!(
            scene.primitives()[0],
            DrawPrimitive {
                solid: Solid::Block { origin, size },
                ..
            } if origin == Vec3::ZERO && size == Vec3::new(15.0, 15.0, 0.5)
        ));
    }

    #[test]
    fn default_opening_scene_draws_slab_and_four_workers() {
        let scene = BoardView::new().scene();

        assert_eq!(scene.len(), 5);
        let workers = scene
            .primitives()
            .iter()
            .filter(|p| matches!(p.solid, Solid::Worker { .. }))
            .count();
        assert_eq!(workers, 4);
    }

    #[test]
    fn render_feeds_primitives_in_scene_order() {
        let view = BoardView::new();
        let mut sink: Vec<DrawPrimitive> = Vec::new();

        view.render(&mut sink);

        assert_eq!(sink, view.scene().primitives());
    }

    #[test]
    fn four_rotations_restore_the_primitive_stream() {
        let mut view = BoardView::new();
        let before = view.scene();

        for _ in 0..4 {
            view.rotate();
        }

        assert_eq!(view.scene(), before);
    }

    #[test]
    fn a_single_rotation_changes_the_stream() {
        let mut view = BoardView::new();
        let before = view.scene();

        view.rotate();

        assert_ne!(view.scene(), before);
    }

    #[test]
    fn zoom_steps_are_asymmetric_and_clamped() {
        let mut view = BoardView::new();

        view.zoom_out();
        assert_eq!(view.view().zoom, 6);
        view.zoom_in();
        assert_eq!(view.view().zoom, 5);

        for _ in 0..10 {
            view.zoom_in();
        }
        assert_eq!(view.view().zoom, 1);
    }

    #[test]
    fn highlights_add_an_overlay_and_validate_coords() {
        let mut view = BoardView::new();
        let plain = view.scene().len();

        view.set_highlights(&[(0, 0), (4, 4)]).unwrap();
        assert_eq!(view.scene().len(), plain + 2);

        assert_eq!(
            view.set_highlights(&[(5, 0)]),
            Err(BoardError::OutOfBounds)
        );

        view.clear_highlights();
        assert_eq!(view.scene().len(), plain);
    }

    #[test]
    fn set_state_clears_stale_highlights() {
        let mut view = BoardView::new();
        view.set_highlights(&[(4, 4)]).unwrap();

        view.set_state("AAAAAAAAAA").unwrap();

        assert_eq!(view.board().size(), (3, 3));
        assert_eq!(view.scene().len(), 1);
    }

    #[test]
    fn pointer_finds_the_tile_under_its_center() {
        let view = BoardView::new();
        let projection = view.projection(VIEWPORT);

        for coords in [(0, 0), (2, 1), (4, 4)] {
            let center = Vec3::new(
                (f32::from(coords.0) + 0.5) * TILE_SIZE,
                (f32::from(coords.1) + 0.5) * TILE_SIZE,
                0.0,
            );
            let pixel = projection.project(center);
            assert_eq!(view.pointer_to_tile(pixel, VIEWPORT), Some(coords));
        }
    }

    #[test]
    fn pointer_mapping_undoes_the_view_rotation() {
        let mut view = BoardView::new();
        view.rotate();

        let logical = (2, 1);
        let display = view.view().rotation.apply(logical, 5);
        let center = Vec3::new(
            (f32::from(display.0) + 0.5) * TILE_SIZE,
            (f32::from(display.1) + 0.5) * TILE_SIZE,
            0.0,
        );
        let pixel = view.projection(VIEWPORT).project(center);

        assert_eq!(view.pointer_to_tile(pixel, VIEWPORT), Some(logical));
    }

    #[test]
    fn pointer_outside_the_board_misses() {
        let view = BoardView::new();
        let projection = view.projection(VIEWPORT);
        let outside = projection.project(Vec3::new(-2.0 * TILE_SIZE, 0.5, 0.0));

        assert_eq!(view.pointer_to_tile(outside, VIEWPORT), None);
    }

    #[test]
    fn views_are_independent() {
        let mut a = BoardView::new();
        let b = BoardView::new();

        a.rotate();
        a.set_state("AAAAAAAAAA").unwrap();

        assert_eq!(b.state_string(), DEFAULT_OPENING);
        assert_eq!(b.view(), ViewState::default());
    }

    #[test]
    fn towers_occlude_back_to_front_when_rotated() {
        // two capped towers on the diagonal; the farther one must be
        // emitted first whatever the rotation
        let mut view = BoardView::from_state("CAAAAAAEAAAAAAAAAAEAAAAAAA").unwrap();

        for _ in 0..4 {
            view.rotate();
            let scene = view.scene();
            let caps: Vec<_> = scene
                .primitives()
                .iter()
                .filter_map(|p| match p.solid {
                    Solid::Cap { origin, .. } => {
                        Some(((origin.x + origin.y - 1.0) / TILE_SIZE) as u8)
                    }
                    _ => None,
                })
                .collect();
            assert_eq!(caps.len(), 2);
            assert!(caps[0] >= caps[1], "nearer tower drawn before farther");
        }
    }
}
