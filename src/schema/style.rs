use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The tone the story service is asked to write in.
///
/// The named presets cover the common requests; `Custom` carries any other
/// phrase verbatim onto the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StylePreset {
    #[default]
    PirateAdventure,
    FairyTale,
    EpicQuest,
    Custom(String),
}

impl StylePreset {
    /// Every named preset, in menu order.
    pub const BUILT_IN: [StylePreset; 3] = [
        StylePreset::PirateAdventure,
        StylePreset::FairyTale,
        StylePreset::EpicQuest,
    ];

    /// The phrase sent as the request's `style` field.
    pub fn as_str(&self) -> &str {
        match self {
            StylePreset::PirateAdventure => "a dramatic pirate adventure",
            StylePreset::FairyTale => "a whimsical fairy tale",
            StylePreset::EpicQuest => "an epic fantasy quest",
            StylePreset::Custom(phrase) => phrase,
        }
    }

    /// Short label used on the command line and in the browser menu.
    pub fn label(&self) -> &str {
        match self {
            StylePreset::PirateAdventure => "pirate",
            StylePreset::FairyTale => "fairy_tale",
            StylePreset::EpicQuest => "epic_quest",
            StylePreset::Custom(phrase) => phrase,
        }
    }

    /// Resolve a label to a preset. Unknown labels become `Custom`.
    pub fn from_name(name: &str) -> StylePreset {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "pirate" | "pirate_adventure" => StylePreset::PirateAdventure,
            "fairy_tale" | "fairytale" => StylePreset::FairyTale,
            "epic_quest" | "quest" => StylePreset::EpicQuest,
            _ => StylePreset::Custom(name.trim().to_string()),
        }
    }

    /// Pick one of the named presets.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> StylePreset {
        Self::BUILT_IN
            .choose(rng)
            .cloned()
            .unwrap_or_default()
    }
}

impl std::fmt::Display for StylePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
