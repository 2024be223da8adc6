//! The closed set of tile kinds and their palette metadata.

use macroquad::prelude::*;

/// A tile kind. The discriminant is the id written to map files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum TileKind {
    /// Nothing drawn.
    Empty = 0,
    /// Solid wall.
    Wall = 1,
    /// Walkable floor.
    Floor = 2,
    /// Reserved marker at the origin.
    Entrance = 3,
    /// Lever.
    Lever = 4,
    /// Trap.
    Trap = 5,
    /// Chest.
    Chest = 6,
    /// Gate.
    Gate = 7,
    /// Torch.
    Torch = 8,
    /// Fountain.
    Fountain = 9,
    /// Tool: attach a note to the clicked cell.
    NoteMarker = 10,
    /// Tool: select the tile under the cursor.
    ColorPicker = 11,
}

const PALETTE: [TileKind; 10] = [
    TileKind::Wall,
    TileKind::Floor,
    TileKind::Lever,
    TileKind::Trap,
    TileKind::Chest,
    TileKind::Gate,
    TileKind::Torch,
    TileKind::Fountain,
    TileKind::NoteMarker,
    TileKind::ColorPicker,
];

const HOTKEYS: [char; 10] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0'];

impl TileKind {
    /// Every kind, in id order.
    pub const ALL: [TileKind; 12] = [
        TileKind::Empty,
        TileKind::Wall,
        TileKind::Floor,
        TileKind::Entrance,
        TileKind::Lever,
        TileKind::Trap,
        TileKind::Chest,
        TileKind::Gate,
        TileKind::Torch,
        TileKind::Fountain,
        TileKind::NoteMarker,
        TileKind::ColorPicker,
    ];

    /// On-disk id.
    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Kind for an on-disk id.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Kinds the user can select, in palette order.
    pub fn palette() -> &'static [TileKind] {
        &PALETTE
    }

    /// Everything except `Empty` and `Entrance`.
    pub fn is_palette_tile(self) -> bool {
        !matches!(self, TileKind::Empty | TileKind::Entrance)
    }

    /// Tools act on a cell instead of being stored in it.
    pub fn is_tool(self) -> bool {
        matches!(self, TileKind::NoteMarker | TileKind::ColorPicker)
    }

    /// Whether the user may store this kind in a cell.
    pub fn is_placeable(self) -> bool {
        self.is_palette_tile() && !self.is_tool()
    }

    /// Digit key that selects this kind.
    pub fn hotkey(self) -> Option<char> {
        PALETTE
            .iter()
            .position(|&k| k == self)
            .map(|i| HOTKEYS[i])
    }

    /// Kind selected by a digit key.
    pub fn from_hotkey(c: char) -> Option<Self> {
        HOTKEYS.iter().position(|&h| h == c).map(|i| PALETTE[i])
    }

    /// Label shown in the palette and status line.
    pub fn name(self) -> &'static str {
        match self {
            TileKind::Empty => "Empty",
            TileKind::Wall => "Wall",
            TileKind::Floor => "Floor",
            TileKind::Entrance => "Entrance",
            TileKind::Lever => "Lever",
            TileKind::Trap => "Trap",
            TileKind::Chest => "Chest",
            TileKind::Gate => "Gate",
            TileKind::Torch => "Torch",
            TileKind::Fountain => "Fountain",
            TileKind::NoteMarker => "Note",
            TileKind::ColorPicker => "Picker",
        }
    }

    /// Flat colour used when no sprite is available.
    pub fn color(self) -> Color {
        match self {
            TileKind::Empty => BLACK,
            TileKind::Wall => Color::from_rgba(139, 69, 19, 255),
            TileKind::Floor => Color::from_rgba(173, 216, 230, 255),
            TileKind::Entrance => Color::from_rgba(220, 20, 60, 255),
            TileKind::Lever => Color::from_rgba(192, 192, 192, 255),
            TileKind::Trap => Color::from_rgba(178, 34, 34, 255),
            TileKind::Chest => Color::from_rgba(218, 165, 32, 255),
            TileKind::Gate => Color::from_rgba(105, 105, 105, 255),
            TileKind::Torch => Color::from_rgba(255, 140, 0, 255),
            TileKind::Fountain => Color::from_rgba(30, 144, 255, 255),
            TileKind::NoteMarker => Color::from_rgba(255, 255, 153, 255),
            TileKind::ColorPicker => Color::from_rgba(50, 205, 50, 255),
        }
    }
}
