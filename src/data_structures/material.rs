//! Texture keys and the per-block material derived from them.

use std::{fmt, str::FromStr};

/// One of the fixed block textures.
///
/// The declaration order is the order of [`TextureKey::ALL`] and therefore the
/// left-to-right order of the swatches in the texture picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureKey {
    Grass,
    Brick,
    Dirt,
    Diamond,
    Lava,
    Stone,
    Water,
    Wood,
}

impl TextureKey {
    pub const ALL: [TextureKey; 8] = [
        TextureKey::Grass,
        TextureKey::Brick,
        TextureKey::Dirt,
        TextureKey::Diamond,
        TextureKey::Lava,
        TextureKey::Stone,
        TextureKey::Water,
        TextureKey::Wood,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextureKey::Grass => "grass",
            TextureKey::Brick => "brick",
            TextureKey::Dirt => "dirt",
            TextureKey::Diamond => "diamond",
            TextureKey::Lava => "lava",
            TextureKey::Stone => "stone",
            TextureKey::Water => "water",
            TextureKey::Wood => "wood",
        }
    }

    /// Asset path relative to the asset root, e.g. `textures/grass.png`.
    pub fn asset_path(self) -> String {
        format!("textures/{}.png", self.name())
    }

    /// Position of this key in [`TextureKey::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TextureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextureKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextureKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown texture key '{}'", s))
    }
}

/// Surface parameters of a placed block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockMaterial {
    pub opacity: f32,
    pub transparent: bool,
}

impl BlockMaterial {
    pub const OPAQUE: BlockMaterial = BlockMaterial {
        opacity: 1.0,
        transparent: false,
    };

    /// Water is the only see-through texture.
    pub fn for_texture(key: TextureKey) -> Self {
        match key {
            TextureKey::Water => BlockMaterial {
                opacity: 0.7,
                transparent: true,
            },
            _ => Self::OPAQUE,
        }
    }
}
