//! Display shaping for cards: labels, badges, formatted dimensions and stat
//! bars.  Everything the page shows is computed here so the script only
//! places text.

use serde::{Deserialize, Serialize};

use pokedeck_common::card::CardRecord;

/// Stat value that fills a bar completely.
pub const MAX_STAT_VALUE: u32 = 255;

const FALLBACK_FLAVOR: &str =
    "Swipe right to add this Pokémon to your party, or swipe left to pass.";

/// A card ready to be drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub image: String,
    pub types: Vec<TypeBadge>,
    pub height: String,
    pub weight: String,
    pub category: String,
    pub abilities: String,
    pub flavor_text: String,
    pub stats: Vec<StatBar>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeBadge {
    pub name: String,
    /// CSS colour for the badge background.
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatBar {
    pub label: String,
    pub value: Option<u32>,
    /// Bar fill, 0..=100.
    pub percent: f64,
}

impl From<&CardRecord> for CardView {
    fn from(card: &CardRecord) -> Self {
        let d = &card.details;
        let types = if d.types.is_empty() {
            vec![TypeBadge {
                name: "Unknown type".into(),
                color: DEFAULT_TYPE_COLOR.into(),
            }]
        } else {
            d.types
                .iter()
                .map(|t| TypeBadge {
                    name: capitalize(t),
                    color: type_color(t).into(),
                })
                .collect()
        };

        CardView {
            id: card.id(),
            name: card.name().to_string(),
            display_name: capitalize(card.name()),
            image: card.image().to_string(),
            types,
            height: format_dimension(d.height, "m"),
            weight: format_dimension(d.weight, "kg"),
            category: d.category.clone().unwrap_or_else(|| "—".into()),
            abilities: if d.abilities.is_empty() {
                "—".into()
            } else {
                d.abilities.join(", ")
            },
            flavor_text: d
                .flavor_text
                .clone()
                .unwrap_or_else(|| FALLBACK_FLAVOR.into()),
            stats: d
                .stats
                .entries()
                .into_iter()
                .map(|(label, value)| StatBar {
                    label: label.to_string(),
                    value,
                    percent: stat_percent(value),
                })
                .collect(),
        }
    }
}

pub fn format_dimension(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.1} {suffix}"),
        None => "—".into(),
    }
}

fn stat_percent(value: Option<u32>) -> f64 {
    value.map_or(0.0, |v| {
        (f64::from(v) / f64::from(MAX_STAT_VALUE)).min(1.0) * 100.0
    })
}

/// Uppercase the first letter, leave the rest alone.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const DEFAULT_TYPE_COLOR: &str = "#e5e7eb";

fn type_color(kind: &str) -> &'static str {
    match kind.to_ascii_lowercase().as_str() {
        "bug" => "#a3e635",
        "dark" => "#404040",
        "dragon" => "#6366f1",
        "electric" => "#facc15",
        "fairy" => "#f9a8d4",
        "fighting" => "#ea580c",
        "fire" => "#f97316",
        "flying" => "#38bdf8",
        "ghost" => "#7e22ce",
        "grass" => "#34d399",
        "ground" => "#b45309",
        "ice" => "#67e8f9",
        "normal" => "#cbd5e1",
        "poison" => "#a855f7",
        "psychic" => "#d946ef",
        "rock" => "#a16207",
        "steel" => "#9ca3af",
        "water" => "#60a5fa",
        _ => DEFAULT_TYPE_COLOR,
    }
}
