use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a hero comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    Earth,
    Mars,
    Jupiter,
    Venus,
    Mercury,
    Neptune,
    Unknown,
}

impl Origin {
    pub const ALL: [Origin; 7] = [
        Origin::Earth,
        Origin::Mars,
        Origin::Jupiter,
        Origin::Venus,
        Origin::Mercury,
        Origin::Neptune,
        Origin::Unknown,
    ];

    pub const NAMES: [&'static str; 7] =
        ["Earth", "Mars", "Jupiter", "Venus", "Mercury", "Neptune", "Unknown"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Earth => "Earth",
            Origin::Mars => "Mars",
            Origin::Jupiter => "Jupiter",
            Origin::Venus => "Venus",
            Origin::Mercury => "Mercury",
            Origin::Neptune => "Neptune",
            Origin::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Origin::ALL
            .iter()
            .copied()
            .find(|origin| origin.as_str() == s)
            .ok_or_else(|| format!("Unknown origin: {}", s))
    }
}

/// A hero as stored by the backend collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroRecord {
    pub id: u32,
    pub name: String,
    pub power: String,
    pub level: u8,
    /// Heroes created from the list page have no origin until edited
    #[serde(default)]
    pub origin: Option<Origin>,
    pub is_active: bool,
    pub description: String,
}

/// A hero without an id; the backend assigns one on create
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHero {
    pub name: String,
    #[serde(default)]
    pub power: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub origin: Option<Origin>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub description: String,
}

fn default_level() -> u8 {
    1
}

fn default_is_active() -> bool {
    true
}

impl NewHero {
    /// A hero carrying only a name, with every other field at its default
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            power: String::new(),
            level: default_level(),
            origin: None,
            is_active: default_is_active(),
            description: String::new(),
        }
    }

    pub fn with_id(self, id: u32) -> HeroRecord {
        HeroRecord {
            id,
            name: self.name,
            power: self.power,
            level: self.level,
            origin: self.origin,
            is_active: self.is_active,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_round_trips_through_str() {
        for origin in Origin::ALL {
            assert_eq!(origin.as_str().parse::<Origin>().unwrap(), origin);
        }
        assert_eq!(Origin::ALL.map(|origin| origin.as_str()), Origin::NAMES);
        assert!("Pluto".parse::<Origin>().is_err());
        assert!("earth".parse::<Origin>().is_err());
    }

    #[test]
    fn test_new_hero_defaults_from_partial_json() {
        let hero: NewHero = serde_json::from_str(r#"{"name":"Nova"}"#).unwrap();
        assert_eq!(hero, NewHero::named("Nova"));
        assert_eq!(hero.level, 1);
        assert!(hero.is_active);
        assert!(hero.origin.is_none());
    }

    #[test]
    fn test_hero_record_uses_camel_case() {
        let hero = NewHero::named("Nova").with_id(21);
        let json = serde_json::to_value(&hero).unwrap();
        assert_eq!(json["id"], 21);
        assert_eq!(json["isActive"], true);
        assert!(json.get("is_active").is_none());
    }
}
