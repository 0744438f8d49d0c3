use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Named board configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Custom(GameConfig),
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Validated custom difficulty.
    pub fn custom(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        GameConfig::new(width, height, mines).map(Self::Custom)
    }

    pub const fn config(&self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(10, 8, 10),
            Self::Medium => GameConfig::new_unchecked(18, 14, 40),
            Self::Hard => GameConfig::new_unchecked(24, 20, 99),
            Self::Custom(config) => *config,
        }
    }

    /// Suggested on-screen tile size in pixels, smaller for larger boards.
    pub const fn tile_size(&self) -> u16 {
        match self {
            Self::Easy => 80,
            Self::Medium => 60,
            Self::Hard | Self::Custom(_) => 40,
        }
    }

    /// Stable identifier, used as a key by score storage.
    pub fn key(&self) -> alloc::string::String {
        use alloc::format;
        match self {
            Self::Easy => "easy".into(),
            Self::Medium => "medium".into(),
            Self::Hard => "hard".into(),
            Self::Custom(config) => {
                format!("custom-{}x{}-{}", config.width, config.height, config.mines)
            }
        }
    }

    /// The preset matching `config`, or a custom difficulty.
    pub fn from_config(config: GameConfig) -> Self {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.config() == config)
            .unwrap_or(Self::Custom(config))
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => f.write_str("Easy"),
            Self::Medium => f.write_str("Medium"),
            Self::Hard => f.write_str("Hard"),
            Self::Custom(config) => {
                write!(f, "Custom {}x{}/{}", config.width, config.height, config.mines)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_easy() {
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn presets_are_valid() {
        for preset in Difficulty::PRESETS {
            let config = preset.config();
            assert_eq!(config.validated(), Ok(config));
        }
        assert_eq!(Difficulty::Easy.config(), GameConfig::new(10, 8, 10).unwrap());
        assert_eq!(Difficulty::Medium.config(), GameConfig::new(18, 14, 40).unwrap());
        assert_eq!(Difficulty::Hard.config(), GameConfig::new(24, 20, 99).unwrap());
    }

    #[test]
    fn custom_rejects_overfull_board() {
        assert_eq!(
            Difficulty::custom(4, 4, 16),
            Err(GameError::TooManyMines {
                mines: 16,
                cells: 16
            })
        );
        assert!(Difficulty::custom(4, 4, 15).is_ok());
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(Difficulty::from_name("Medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_name("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_name("nightmare"), None);
        assert_eq!(Difficulty::custom(5, 6, 7).unwrap().key(), "custom-5x6-7");
    }

    #[test]
    fn config_maps_back_to_preset() {
        let medium = GameConfig::new(18, 14, 40).unwrap();
        assert_eq!(Difficulty::from_config(medium), Difficulty::Medium);

        let odd = GameConfig::new(18, 14, 41).unwrap();
        assert_eq!(Difficulty::from_config(odd), Difficulty::Custom(odd));
    }

    #[test]
    fn tile_size_shrinks_with_board() {
        assert_eq!(Difficulty::Easy.tile_size(), 80);
        assert_eq!(Difficulty::Medium.tile_size(), 60);
        assert_eq!(Difficulty::Hard.tile_size(), 40);
    }
}
