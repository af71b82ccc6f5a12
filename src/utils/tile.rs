// src/utils/tile.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of distinct tile kinds.
pub const TILE_KINDS: i32 = 34;

/// Maximum number of dora indicators a problem can carry.
pub const MAX_DORA: usize = 1;

/// Smallest and largest legal hand sizes.
pub const MIN_HAND_SIZE: usize = 13;
pub const MAX_HAND_SIZE: usize = 14;

/// Directory the tile images are served from.
pub const TILE_BASE_PATH: &str = "/tiles";

/// Asset name used for any id outside `0..=33`.
pub const FALLBACK_ASSET: &str = "Back";

/// Honor asset names for ids 27..=33: four winds, then three dragons.
const HONOR_ASSETS: [&str; 7] = ["Ton", "Nan", "Shaa", "Pei", "Haku", "Hatsu", "Chun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    fn prefix(self) -> &'static str {
        match self {
            Suit::Man => "Man",
            Suit::Pin => "Pin",
            Suit::Sou => "Sou",
            Suit::Honor => "",
        }
    }
}

/// A tile id as it travels on the wire.
///
/// Any integer is representable: the range is only checked where a caller
/// asks for it (`is_valid`), and rendering an invalid id yields the tile back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(i32);

impl Tile {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> i32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 >= 0 && self.0 < TILE_KINDS
    }

    /// All 34 tile kinds in canonical order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..TILE_KINDS).map(Tile)
    }

    pub fn suit(self) -> Option<Suit> {
        match self.0 {
            0..=8 => Some(Suit::Man),
            9..=17 => Some(Suit::Pin),
            18..=26 => Some(Suit::Sou),
            27..=33 => Some(Suit::Honor),
            _ => None,
        }
    }

    /// 1-9 for numbered suits, 1-7 for honors.
    pub fn rank(self) -> Option<u8> {
        match self.suit()? {
            Suit::Honor => Some((self.0 - 27 + 1) as u8),
            _ => Some((self.0 % 9 + 1) as u8),
        }
    }

    /// Image name without directory or extension, e.g. `Pin3` or `Chun`.
    pub fn asset_name(self) -> String {
        match (self.suit(), self.rank()) {
            (Some(Suit::Honor), Some(rank)) => HONOR_ASSETS[usize::from(rank) - 1].to_string(),
            (Some(suit), Some(rank)) => format!("{}{}", suit.prefix(), rank),
            _ => FALLBACK_ASSET.to_string(),
        }
    }

    /// Full image path, e.g. `/tiles/Man1.svg`.
    pub fn image_path(self) -> String {
        format!("{}/{}.svg", TILE_BASE_PATH, self.asset_name())
    }
}

impl From<i32> for Tile {
    fn from(id: i32) -> Self {
        Tile(id)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.asset_name())
    }
}

/// Image path for a raw integer id. Never fails.
pub fn tile_image(id: i64) -> String {
    let tile = i32::try_from(id).map(Tile).unwrap_or(Tile(-1));
    tile.image_path()
}

/// Stable ascending sort by id; duplicates keep their relative order.
pub fn sort_tiles(tiles: &mut [Tile]) {
    tiles.sort();
}

/// Encodes tiles as the JSON text stored in `hand_tiles` / `dora_tiles`.
pub fn encode_tiles(tiles: &[Tile]) -> String {
    // A slice of integers always serializes.
    serde_json::to_string(tiles).unwrap_or_else(|_| "[]".to_string())
}

/// Parses the inner JSON text of `hand_tiles` / `dora_tiles`.
/// Range is not checked here.
pub fn decode_tiles(text: &str) -> Result<Vec<Tile>, serde_json::Error> {
    serde_json::from_str(text)
}

/// An ordered sequence of tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand(Vec<Tile>);

impl Hand {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self(tiles)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The hand in canonical display order.
    pub fn sorted(mut self) -> Self {
        sort_tiles(&mut self.0);
        self
    }

    pub fn is_sorted(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn has_legal_size(&self) -> bool {
        (MIN_HAND_SIZE..=MAX_HAND_SIZE).contains(&self.0.len())
    }

    /// First tile outside `0..=33`, if any.
    pub fn first_invalid(&self) -> Option<Tile> {
        self.0.iter().copied().find(|t| !t.is_valid())
    }

    pub fn to_json_string(&self) -> String {
        encode_tiles(&self.0)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        decode_tiles(text).map(Hand)
    }

    pub fn image_paths(&self) -> Vec<String> {
        self.0.iter().map(|t| t.image_path()).collect()
    }
}

impl From<Vec<Tile>> for Hand {
    fn from(tiles: Vec<Tile>) -> Self {
        Hand(tiles)
    }
}

impl FromIterator<Tile> for Hand {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Hand(iter.into_iter().collect())
    }
}
