use serde::{Deserialize, Serialize};
use torri_core::Team;

/// 8-bit RGB color, handed to the external renderer untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Render colors for one board; the defaults match the classic canvas skin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub slab: Rgb,
    pub building: Rgb,
    pub cap: Rgb,
    pub highlight: Rgb,
    pub team_a: Rgb,
    pub team_b: Rgb,
}

impl Palette {
    pub const fn worker(&self, team: Team) -> Rgb {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            slab: Rgb::new(120, 120, 120),
            building: Rgb::new(209, 207, 199),
            cap: Rgb::new(163, 69, 64),
            highlight: Rgb::new(122, 204, 147),
            team_a: Rgb::new(160, 60, 50),
            team_b: Rgb::new(50, 60, 160),
        }
    }
}
