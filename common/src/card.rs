//! Card records: the unit the deck displays.
//!
//! A card is created bare from a list entry (id, name, artwork URL) and may
//! later be enriched with detail and species data.  Enrichment only ever
//! replaces [`CardDetails`]; the identity fields are fixed at construction.

use serde::{Deserialize, Serialize};

use crate::protocol::{NamedResource, Pokemon, Species};

/// Upper bound on abilities shown per card.
pub const MAX_ABILITIES: usize = 3;

// ─── Card ────────────────────────────────────────────────────────────────────

/// A single displayable card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    id: u32,
    name: String,
    image: String,
    #[serde(flatten)]
    pub details: CardDetails,
}

impl CardRecord {
    pub fn new(id: u32, name: &str, artwork_base: &str) -> Self {
        CardRecord {
            id,
            name: name.to_string(),
            image: artwork_url(artwork_base, id),
            details: CardDetails::default(),
        }
    }

    /// Bare card from one upstream list entry.  An entry whose URL carries
    /// no numeric id gets id `0`.
    pub fn from_entry(entry: &NamedResource, artwork_base: &str) -> Self {
        Self::new(id_from_url(&entry.url), &entry.name, artwork_base)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Replace the enrichment fields.  Identity is untouched.
    pub fn enrich(&mut self, details: CardDetails) {
        self.details = details;
    }

    pub fn with_details(mut self, details: CardDetails) -> Self {
        self.enrich(details);
        self
    }
}

impl std::fmt::Display for CardRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}

/// Optional enrichment.  Every field may be empty independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub types: Vec<String>,
    /// Metres.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub abilities: Vec<String>,
    pub category: Option<String>,
    pub flavor_text: Option<String>,
    pub stats: Stats,
}

/// The six base stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: Option<u32>,
    pub attack: Option<u32>,
    pub defense: Option<u32>,
    pub special_attack: Option<u32>,
    pub special_defense: Option<u32>,
    pub speed: Option<u32>,
}

impl Stats {
    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, Option<u32>); 6] {
        [
            ("HP", self.hp),
            ("Attack", self.attack),
            ("Defense", self.defense),
            ("Sp. Atk", self.special_attack),
            ("Sp. Def", self.special_defense),
            ("Speed", self.speed),
        ]
    }

    fn set(&mut self, name: &str, value: u32) {
        let slot = match name {
            "hp" => &mut self.hp,
            "attack" => &mut self.attack,
            "defense" => &mut self.defense,
            "special-attack" => &mut self.special_attack,
            "special-defense" => &mut self.special_defense,
            "speed" => &mut self.speed,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl CardDetails {
    /// Assemble details from the detail record and the optional species
    /// record.  Text entries are picked by `locale`.
    pub fn from_upstream(
        pokemon: Option<&Pokemon>,
        species: Option<&Species>,
        locale: &str,
    ) -> Self {
        let mut details = CardDetails::default();

        if let Some(p) = pokemon {
            let mut types: Vec<_> = p.types.iter().collect();
            types.sort_by_key(|t| t.slot);
            details.types = types.into_iter().map(|t| t.kind.name.clone()).collect();

            details.height = tenths(p.height);
            details.weight = tenths(p.weight);

            let mut abilities: Vec<_> = p.abilities.iter().collect();
            abilities.sort_by_key(|a| a.slot);
            details.abilities = abilities
                .into_iter()
                .take(MAX_ABILITIES)
                .map(|a| title_case(&a.ability.name))
                .collect();

            for s in &p.stats {
                details.stats.set(&s.stat.name, s.base_stat);
            }
        }

        if let Some(s) = species {
            details.flavor_text = s
                .flavor_text_entries
                .iter()
                .find(|e| e.language.name == locale)
                .map(|e| clean_flavor_text(&e.flavor_text));
            details.category = s
                .genera
                .iter()
                .find(|g| g.language.name == locale)
                .map(|g| g.genus.clone());
        }

        details
    }
}

// ─── helpers ─────────────────────────────────────────────────────────────────

/// Extract the numeric id from a `…/pokemon/{id}/` URL.  Returns `0` when
/// the URL does not end in that shape.
pub fn id_from_url(url: &str) -> u32 {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    let Some((head, digits)) = trimmed.rsplit_once('/') else {
        return 0;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    if !head.ends_with("/pokemon") {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

/// Artwork location for a card id.
pub fn artwork_url(base: &str, id: u32) -> String {
    format!("{}/{id}.png", base.trim_end_matches('/'))
}

/// `"solar-power"` → `"Solar Power"`.
pub fn title_case(raw: &str) -> String {
    raw.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upstream height/weight are integer tenths; zero means "no data".
fn tenths(value: u32) -> Option<f64> {
    (value > 0).then(|| f64::from(value) / 10.0)
}

/// Flavor text carries hard line breaks and form feeds from the games.
fn clean_flavor_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ─── tests ───────────────────────────────────────────────────────────────────
