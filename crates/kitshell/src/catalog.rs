//! The compiled-in catalog of companion web tools.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ShellError;

pub const APP_TITLE: &str = "2004Kit";
pub const GAME_URL: &str = "https://2004.lostcity.rs/serverlist?lores.x=55&lores.y=62&method=0";
pub const GAME_TAB_LABEL: &str = "⚔️ LostCity";
/// Storage scope of the primary game view.
pub const GAME_STORAGE_SCOPE: &str = "game";
pub const FALLBACK_ICON: &str = "🔧";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    Forums,
    ClueCoordinates,
    ClueScrollHelp,
    WorldMap,
    Highscores,
    MarketPrices,
    QuestHelp,
    SkillGuides,
    SkillsCalculator,
    Bestiary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: ToolId,
    pub name: &'static str,
    pub url: &'static str,
    pub icon: &'static str,
    pub slug: &'static str,
}

const CATALOG: [ToolDescriptor; 10] = [
    ToolDescriptor {
        id: ToolId::Forums,
        name: "Forums",
        url: "https://lostcity.rs",
        icon: "💬",
        slug: "forums",
    },
    ToolDescriptor {
        id: ToolId::ClueCoordinates,
        name: "Clue Coordinates",
        url: "https://razgals.github.io/2004-Coordinates/",
        icon: "📍",
        slug: "clue-coordinates",
    },
    ToolDescriptor {
        id: ToolId::ClueScrollHelp,
        name: "Clue Scroll Help",
        url: "https://razgals.github.io/Treasure/",
        icon: "📜",
        slug: "clue-scroll-help",
    },
    ToolDescriptor {
        id: ToolId::WorldMap,
        name: "World Map",
        url: "https://2004.lostcity.rs/worldmap",
        icon: "🗺️",
        slug: "world-map",
    },
    ToolDescriptor {
        id: ToolId::Highscores,
        name: "Highscores",
        url: "https://2004.lostcity.rs/hiscores",
        icon: "🏆",
        slug: "highscores",
    },
    ToolDescriptor {
        id: ToolId::MarketPrices,
        name: "Market Prices",
        url: "https://lostcity.markets",
        icon: "💰",
        slug: "market-prices",
    },
    ToolDescriptor {
        id: ToolId::QuestHelp,
        name: "Quest Help",
        url: "https://2004.losthq.rs/?p=questguides",
        icon: "🛡️",
        slug: "quest-help",
    },
    ToolDescriptor {
        id: ToolId::SkillGuides,
        name: "Skill Guides",
        url: "https://2004.losthq.rs/?p=skillguides",
        icon: "📚",
        slug: "skill-guides",
    },
    ToolDescriptor {
        id: ToolId::SkillsCalculator,
        name: "Skills Calculator",
        url: "https://2004.losthq.rs/?p=calculators",
        icon: "🧮",
        slug: "skills-calculator",
    },
    ToolDescriptor {
        id: ToolId::Bestiary,
        name: "Bestiary",
        url: "https://2004.losthq.rs/?p=droptables",
        icon: "🐉",
        slug: "bestiary",
    },
];

impl ToolId {
    /// Every tool, in panel order.
    pub const ALL: [ToolId; 10] = [
        ToolId::Forums,
        ToolId::ClueCoordinates,
        ToolId::ClueScrollHelp,
        ToolId::WorldMap,
        ToolId::Highscores,
        ToolId::MarketPrices,
        ToolId::QuestHelp,
        ToolId::SkillGuides,
        ToolId::SkillsCalculator,
        ToolId::Bestiary,
    ];

    pub fn descriptor(self) -> &'static ToolDescriptor {
        &CATALOG[self as usize]
    }

    pub fn from_name(name: &str) -> Option<ToolId> {
        CATALOG.iter().find(|tool| tool.name == name).map(|tool| tool.id)
    }

    pub fn from_slug(slug: &str) -> Option<ToolId> {
        CATALOG.iter().find(|tool| tool.slug == slug).map(|tool| tool.id)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

impl FromStr for ToolId {
    type Err = ShellError;

    /// Accepts either the display name or the slug.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ToolId::from_name(value)
            .or_else(|| ToolId::from_slug(value))
            .ok_or_else(|| ShellError::UnknownTool(value.to_string()))
    }
}

impl ToolDescriptor {
    /// Title of the tool's own top-level window; doubles as its dedup key.
    pub fn window_title(&self) -> String {
        window_title(self.name)
    }

    /// Label of the tool's tab inside the shell.
    pub fn tab_label(&self) -> String {
        tab_label(self.name)
    }

    /// Window label and storage scope, unique per tool.
    pub fn window_label(&self) -> String {
        format!("tool-{}", self.slug)
    }
}

/// Full catalog in panel order.
pub fn tools() -> &'static [ToolDescriptor] {
    &CATALOG
}

pub fn icon_for(name: &str) -> &'static str {
    ToolId::from_name(name)
        .map(|id| id.descriptor().icon)
        .unwrap_or(FALLBACK_ICON)
}

pub fn window_title(name: &str) -> String {
    format!("{APP_TITLE} - {name}")
}

pub fn tab_label(name: &str) -> String {
    format!("{} {name}", icon_for(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_ids() {
        for (index, id) in ToolId::ALL.iter().enumerate() {
            assert_eq!(tools()[index].id, *id);
            assert_eq!(id.descriptor().id, *id);
        }
    }

    #[test]
    fn names_and_slugs_are_unique() {
        let mut names: Vec<_> = tools().iter().map(|tool| tool.name).collect();
        let mut slugs: Vec<_> = tools().iter().map(|tool| tool.slug).collect();
        names.sort();
        names.dedup();
        slugs.sort();
        slugs.dedup();
        assert_eq!(names.len(), tools().len());
        assert_eq!(slugs.len(), tools().len());
    }

    #[test]
    fn parses_names_and_slugs() {
        assert_eq!("World Map".parse::<ToolId>().expect("name"), ToolId::WorldMap);
        assert_eq!("world-map".parse::<ToolId>().expect("slug"), ToolId::WorldMap);
        match "Lumbridge".parse::<ToolId>() {
            Err(ShellError::UnknownTool(name)) => assert_eq!(name, "Lumbridge"),
            other => panic!("expected UnknownTool, got {other:?}"),
        }
    }

    #[test]
    fn composes_titles_and_labels() {
        let tool = ToolId::Bestiary.descriptor();
        assert_eq!(tool.window_title(), "2004Kit - Bestiary");
        assert_eq!(tool.tab_label(), "🐉 Bestiary");
        assert_eq!(tool.window_label(), "tool-bestiary");
        assert_eq!(tab_label("Unlisted"), "🔧 Unlisted");
    }

    #[test]
    fn serde_uses_kebab_case_ids() {
        let value = serde_json::to_value(ToolId::SkillsCalculator).expect("serialize");
        assert_eq!(value, serde_json::json!("skills-calculator"));
    }
}
