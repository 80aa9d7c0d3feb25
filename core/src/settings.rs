//! Player preferences. Persisted separately from the save under
//! `emily-idle:settings`; a prestige or a save wipe never touches them.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const SETTINGS_KEY: &str = "emily-idle:settings";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    /// System -> Light -> Dark -> System.
    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light  => Self::Dark,
            Self::Dark   => Self::System,
        }
    }
}

/// Top-level screens the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Vault,
    Workshop,
    Maison,
    Career,
    Nostalgia,
    Catalog,
    Achievements,
    Save,
    Settings,
}

impl Tab {
    /// Display order.
    pub const ALL: [Tab; 9] = [
        Tab::Vault,
        Tab::Workshop,
        Tab::Maison,
        Tab::Career,
        Tab::Nostalgia,
        Tab::Catalog,
        Tab::Achievements,
        Tab::Save,
        Tab::Settings,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Vault        => "vault",
            Self::Workshop     => "workshop",
            Self::Maison       => "maison",
            Self::Career       => "career",
            Self::Nostalgia    => "nostalgia",
            Self::Catalog      => "catalog",
            Self::Achievements => "achievements",
            Self::Save         => "save",
            Self::Settings     => "settings",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(deserialize_with = "lenient")]
    pub theme_mode:                  ThemeMode,
    #[serde(deserialize_with = "lenient")]
    pub hide_completed_achievements: bool,
    #[serde(deserialize_with = "lenient")]
    pub hidden_tabs:                 BTreeSet<String>,
    #[serde(deserialize_with = "lenient")]
    pub coachmarks_dismissed:        BTreeMap<String, bool>,
}

/// One unreadable field falls back to its default; its siblings keep
/// their stored values.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        log::warn!("ignoring unreadable setting, using default: {e}");
        T::default()
    }))
}

impl Settings {
    /// Decode stored settings. A record that is not a JSON object falls
    /// back to defaults wholesale; inside one, each field is independent.
    pub fn load(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("discarding unreadable settings, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Every tab not explicitly hidden, in display order. Unknown ids in
    /// `hidden_tabs` are ignored.
    pub fn visible_tabs(&self) -> Vec<Tab> {
        Tab::ALL
            .into_iter()
            .filter(|t| !self.hidden_tabs.contains(t.id()))
            .collect()
    }

    pub fn hide_tab(&mut self, tab: Tab) {
        self.hidden_tabs.insert(tab.id().to_string());
    }

    pub fn show_tab(&mut self, tab: Tab) {
        self.hidden_tabs.remove(tab.id());
    }

    pub fn dismiss_coachmark(&mut self, coachmark_id: &str) {
        self.coachmarks_dismissed.insert(coachmark_id.to_string(), true);
    }

    pub fn is_coachmark_dismissed(&self, coachmark_id: &str) -> bool {
        self.coachmarks_dismissed.get(coachmark_id).copied().unwrap_or(false)
    }

    pub fn cycle_theme(&mut self) {
        self.theme_mode = self.theme_mode.next();
    }
}
