//! Pipeline stage model and its style table.
//!
//! # Responsibility
//! - Define the named, ordered bucket of the sales pipeline.
//! - Resolve stage colors through a fixed mapping table instead of open-ended
//!   class-name lookups.
//!
//! # Invariants
//! - `order` defines left-to-right position on the board. Uniqueness is
//!   expected but not enforced.
//! - Unknown color keys are rejected, never rendered as an undefined style.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque stage identifier (`novo`, `contato`, `etapa_<token>` ...).
pub type StageId = String;

/// Color swatch offered by the stage configuration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageColor {
    Verde,
    Vermelho,
    Azul,
    Amarelo,
    Roxo,
    Rosa,
    Laranja,
    Ciano,
}

/// Presentation classes for one stage color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStyle {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub hex: &'static str,
}

const STAGE_STYLES: [(StageColor, StageStyle); 8] = [
    (
        StageColor::Verde,
        StageStyle {
            background: "bg-emerald-100",
            border: "border-emerald-300",
            text: "text-emerald-700",
            hex: "#d1fae5",
        },
    ),
    (
        StageColor::Vermelho,
        StageStyle {
            background: "bg-red-100",
            border: "border-red-300",
            text: "text-red-700",
            hex: "#fee2e2",
        },
    ),
    (
        StageColor::Azul,
        StageStyle {
            background: "bg-blue-100",
            border: "border-blue-300",
            text: "text-blue-700",
            hex: "#dbeafe",
        },
    ),
    (
        StageColor::Amarelo,
        StageStyle {
            background: "bg-yellow-100",
            border: "border-yellow-300",
            text: "text-yellow-700",
            hex: "#fef3c7",
        },
    ),
    (
        StageColor::Roxo,
        StageStyle {
            background: "bg-purple-100",
            border: "border-purple-300",
            text: "text-purple-700",
            hex: "#f3e8ff",
        },
    ),
    (
        StageColor::Rosa,
        StageStyle {
            background: "bg-pink-100",
            border: "border-pink-300",
            text: "text-pink-700",
            hex: "#fce7f3",
        },
    ),
    (
        StageColor::Laranja,
        StageStyle {
            background: "bg-orange-100",
            border: "border-orange-300",
            text: "text-orange-700",
            hex: "#ffedd5",
        },
    ),
    (
        StageColor::Ciano,
        StageStyle {
            background: "bg-cyan-100",
            border: "border-cyan-300",
            text: "text-cyan-700",
            hex: "#cffafe",
        },
    ),
];

/// Error for style keys outside the fixed mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyleKey(pub String);

impl Display for UnknownStyleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown style key: `{}`", self.0)
    }
}

impl Error for UnknownStyleKey {}

impl StageColor {
    /// All swatches in form display order.
    pub const ALL: [StageColor; 8] = [
        StageColor::Verde,
        StageColor::Vermelho,
        StageColor::Azul,
        StageColor::Amarelo,
        StageColor::Roxo,
        StageColor::Rosa,
        StageColor::Laranja,
        StageColor::Ciano,
    ];

    pub fn style(self) -> StageStyle {
        STAGE_STYLES
            .iter()
            .find(|(color, _)| *color == self)
            .map(|(_, style)| *style)
            .unwrap_or(STAGE_STYLES[0].1)
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Verde => "verde",
            Self::Vermelho => "vermelho",
            Self::Azul => "azul",
            Self::Amarelo => "amarelo",
            Self::Roxo => "roxo",
            Self::Rosa => "rosa",
            Self::Laranja => "laranja",
            Self::Ciano => "ciano",
        }
    }

    /// Parses a swatch key such as `verde`.
    pub fn from_key(key: &str) -> Result<Self, UnknownStyleKey> {
        let normalized = key.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.key() == normalized)
            .ok_or_else(|| UnknownStyleKey(key.to_string()))
    }

    /// Resolves the swatch from its background class (`bg-red-100`).
    pub fn from_background_class(class: &str) -> Result<Self, UnknownStyleKey> {
        STAGE_STYLES
            .iter()
            .find(|(_, style)| style.background == class.trim())
            .map(|(color, _)| *color)
            .ok_or_else(|| UnknownStyleKey(class.to_string()))
    }
}

impl Default for StageColor {
    fn default() -> Self {
        Self::Verde
    }
}

/// Pipeline stage (`EtapaFunil`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub label: String,
    #[serde(rename = "cor")]
    pub color: StageColor,
    #[serde(rename = "ordem")]
    pub order: i64,
}

impl Stage {
    pub fn style(&self) -> StageStyle {
        self.color.style()
    }
}

/// Input of the stage configuration form.
///
/// `id = None` creates a stage; `Some` edits the stage with that id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageForm {
    pub id: Option<StageId>,
    pub label: String,
    pub color: StageColor,
}

#[cfg(test)]
mod tests {
    use super::{StageColor, UnknownStyleKey};

    #[test]
    fn every_color_has_a_distinct_style_row() {
        let mut backgrounds: Vec<&str> = StageColor::ALL
            .iter()
            .map(|color| color.style().background)
            .collect();
        backgrounds.sort_unstable();
        backgrounds.dedup();
        assert_eq!(backgrounds.len(), StageColor::ALL.len());
    }

    #[test]
    fn from_key_and_background_class_round_through_the_table() {
        assert_eq!(StageColor::from_key(" Azul ").unwrap(), StageColor::Azul);
        assert_eq!(
            StageColor::from_background_class("bg-red-100").unwrap(),
            StageColor::Vermelho
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(
            StageColor::from_key("magenta").unwrap_err(),
            UnknownStyleKey("magenta".to_string())
        );
        assert!(StageColor::from_background_class("bg-lime-100").is_err());
    }
}
