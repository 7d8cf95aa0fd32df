//! The site settings file (`.config`): a line-oriented `KEY=VALUE` format
//! with `#` comments.
//!
//! ```text
//! # === SITE SETTINGS ===
//! THEME=dark
//! MAINTENANCE_MODE_ENABLED=false
//! MAINTENANCE_MODE_MESSAGE=Back soon!
//! DARK_THEME_ACCENT=#007aff
//! ```
//!
//! [`parse`] turns the text into a typed [`SiteConfig`]. Problems never fail
//! the parse: unknown keys and values that don't fit their field are reported
//! as [`Warning`]s (see [`parse_with_warnings`]) and otherwise ignored.
//!
//! Writing goes the other way through [`serialize`], which patches lines in
//! the existing text rather than regenerating it, so comments and ordering
//! survive. [`SiteConfig::to_text`] renders a complete file from scratch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The parsed site settings. Consumers treat a `SiteConfig` as an immutable
/// snapshot: [`SiteConfig::with_value`] and [`SiteConfig::toggle_theme`]
/// return a new snapshot and nothing is written back to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_settings: SiteSettings,
    pub theme_config: ThemeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub theme: Theme,
    pub enable_theme_toggle: bool,
    pub maintenance_mode: MaintenanceMode,
    pub animations: Animations,
    pub features: Features,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceMode {
    pub enabled: bool,
    pub message: String,
    pub estimated_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animations {
    pub enabled: bool,
    pub reduced_motion: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub robot_interaction: bool,
    pub particle_effects: bool,
    pub glass_effect: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub dark: Palette,
    pub light: Palette,
}

impl ThemeConfig {
    pub fn palette(&self, theme: Theme) -> &Palette {
        match theme {
            Theme::Dark => &self.dark,
            Theme::Light => &self.light,
        }
    }
}

/// Color strings (typically `#rrggbb`) for one theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub text_secondary: String,
}

impl Palette {
    fn new(primary: &str, secondary: &str, accent: &str, text: &str, text_secondary: &str) -> Self {
        Palette {
            primary: primary.to_owned(),
            secondary: secondary.to_owned(),
            accent: accent.to_owned(),
            text: text.to_owned(),
            text_secondary: text_secondary.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = ();

    /// Parses `dark` or `light`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("dark") {
            Ok(Theme::Dark)
        } else if s.eq_ignore_ascii_case("light") {
            Ok(Theme::Light)
        } else {
            Err(())
        }
    }
}

/// The message shown while the site is down for maintenance, unless the
/// file provides its own.
pub const DEFAULT_MAINTENANCE_MESSAGE: &str =
    "We're currently performing maintenance. Please check back soon!";

impl SiteConfig {
    /// The configuration the site uses when `.config` can't be loaded at all.
    /// This is distinct from [`SiteConfig::default`], which is what an empty
    /// file parses to.
    pub fn fallback() -> SiteConfig {
        SiteConfig {
            site_settings: SiteSettings {
                theme: Theme::Dark,
                enable_theme_toggle: true,
                maintenance_mode: MaintenanceMode {
                    enabled: false,
                    message: DEFAULT_MAINTENANCE_MESSAGE.to_owned(),
                    estimated_time: String::new(),
                },
                animations: Animations {
                    enabled: true,
                    reduced_motion: false,
                },
                features: Features {
                    robot_interaction: true,
                    particle_effects: true,
                    glass_effect: true,
                },
            },
            theme_config: ThemeConfig {
                dark: Palette::new("#000000", "#1a1a1a", "#007aff", "#ffffff", "#a3a3a3"),
                light: Palette::new("#ffffff", "#f5f5f5", "#007aff", "#000000", "#666666"),
            },
        }
    }

    /// The palette for the current theme.
    pub fn active_palette(&self) -> &Palette {
        self.theme_config.palette(self.site_settings.theme)
    }

    pub fn in_maintenance(&self) -> bool {
        self.site_settings.maintenance_mode.enabled
    }

    /// Returns a snapshot with the theme flipped. When the theme toggle is
    /// disabled the snapshot is unchanged.
    pub fn toggle_theme(&self) -> SiteConfig {
        let mut next = self.clone();
        if next.site_settings.enable_theme_toggle {
            next.site_settings.theme = next.site_settings.theme.toggled();
        }
        next
    }

    /// Returns a snapshot with `key` set from its config-file text, or `None`
    /// if `raw` doesn't fit the field (see [`Warning::InvalidValue`]).
    pub fn with_value(&self, key: ConfigKey, raw: &str) -> Option<SiteConfig> {
        let mut next = self.clone();
        match next.apply(key, raw) {
            true => Some(next),
            false => None,
        }
    }

    /// Returns the typed value stored for `key`. Displaying it yields the
    /// text that [`parse`] would read back into the same value.
    pub fn value(&self, key: ConfigKey) -> Value {
        match self.field(key) {
            Field::Flag(flag) => Value::Bool(*flag),
            Field::Text(text) => Value::Text(text.clone()),
            Field::Theme(theme) => Value::Text(theme.to_string()),
        }
    }

    /// Renders a complete `.config` file with every key, grouped into
    /// commented sections. Parsing the result yields `self` again as long as
    /// no text value has surrounding whitespace or line breaks.
    pub fn to_text(&self) -> String {
        let mut out = String::from(
            "# Portfolio Configuration\n\
             # This file contains all site settings and configuration\n",
        );
        for (heading, keys) in SECTIONS {
            out.push('\n');
            out.push_str(heading);
            out.push('\n');
            for key in *keys {
                out.push_str(&format!("{}={}\n", key, self.value(*key)));
            }
        }
        out
    }

    /// Stores `raw` in the field for `key`. Returns `false`, leaving the
    /// field untouched, when the value doesn't fit.
    fn apply(&mut self, key: ConfigKey, raw: &str) -> bool {
        match self.field_mut(key) {
            FieldMut::Flag(flag) => match Value::from_text(raw) {
                Value::Bool(value) => {
                    *flag = value;
                    true
                }
                Value::Text(_) => false,
            },
            FieldMut::Text(text) => {
                *text = raw.to_owned();
                true
            }
            FieldMut::Theme(theme) => match raw.parse::<Theme>() {
                Ok(value) => {
                    *theme = value;
                    true
                }
                Err(()) => false,
            },
        }
    }

    fn field(&self, key: ConfigKey) -> Field<'_> {
        let settings = &self.site_settings;
        let (dark, light) = (&self.theme_config.dark, &self.theme_config.light);
        match key {
            ConfigKey::Theme => Field::Theme(&settings.theme),
            ConfigKey::EnableThemeToggle => Field::Flag(&settings.enable_theme_toggle),
            ConfigKey::MaintenanceModeEnabled => Field::Flag(&settings.maintenance_mode.enabled),
            ConfigKey::MaintenanceModeMessage => Field::Text(&settings.maintenance_mode.message),
            ConfigKey::MaintenanceModeEstimatedTime => {
                Field::Text(&settings.maintenance_mode.estimated_time)
            }
            ConfigKey::AnimationsEnabled => Field::Flag(&settings.animations.enabled),
            ConfigKey::AnimationsReducedMotion => Field::Flag(&settings.animations.reduced_motion),
            ConfigKey::FeaturesRobotInteraction => Field::Flag(&settings.features.robot_interaction),
            ConfigKey::FeaturesParticleEffects => Field::Flag(&settings.features.particle_effects),
            ConfigKey::FeaturesGlassEffect => Field::Flag(&settings.features.glass_effect),
            ConfigKey::DarkThemePrimary => Field::Text(&dark.primary),
            ConfigKey::DarkThemeSecondary => Field::Text(&dark.secondary),
            ConfigKey::DarkThemeAccent => Field::Text(&dark.accent),
            ConfigKey::DarkThemeText => Field::Text(&dark.text),
            ConfigKey::DarkThemeTextSecondary => Field::Text(&dark.text_secondary),
            ConfigKey::LightThemePrimary => Field::Text(&light.primary),
            ConfigKey::LightThemeSecondary => Field::Text(&light.secondary),
            ConfigKey::LightThemeAccent => Field::Text(&light.accent),
            ConfigKey::LightThemeText => Field::Text(&light.text),
            ConfigKey::LightThemeTextSecondary => Field::Text(&light.text_secondary),
        }
    }

    fn field_mut(&mut self, key: ConfigKey) -> FieldMut<'_> {
        let settings = &mut self.site_settings;
        let theme_config = &mut self.theme_config;
        match key {
            ConfigKey::Theme => FieldMut::Theme(&mut settings.theme),
            ConfigKey::EnableThemeToggle => FieldMut::Flag(&mut settings.enable_theme_toggle),
            ConfigKey::MaintenanceModeEnabled => {
                FieldMut::Flag(&mut settings.maintenance_mode.enabled)
            }
            ConfigKey::MaintenanceModeMessage => {
                FieldMut::Text(&mut settings.maintenance_mode.message)
            }
            ConfigKey::MaintenanceModeEstimatedTime => {
                FieldMut::Text(&mut settings.maintenance_mode.estimated_time)
            }
            ConfigKey::AnimationsEnabled => FieldMut::Flag(&mut settings.animations.enabled),
            ConfigKey::AnimationsReducedMotion => {
                FieldMut::Flag(&mut settings.animations.reduced_motion)
            }
            ConfigKey::FeaturesRobotInteraction => {
                FieldMut::Flag(&mut settings.features.robot_interaction)
            }
            ConfigKey::FeaturesParticleEffects => {
                FieldMut::Flag(&mut settings.features.particle_effects)
            }
            ConfigKey::FeaturesGlassEffect => FieldMut::Flag(&mut settings.features.glass_effect),
            ConfigKey::DarkThemePrimary => FieldMut::Text(&mut theme_config.dark.primary),
            ConfigKey::DarkThemeSecondary => FieldMut::Text(&mut theme_config.dark.secondary),
            ConfigKey::DarkThemeAccent => FieldMut::Text(&mut theme_config.dark.accent),
            ConfigKey::DarkThemeText => FieldMut::Text(&mut theme_config.dark.text),
            ConfigKey::DarkThemeTextSecondary => {
                FieldMut::Text(&mut theme_config.dark.text_secondary)
            }
            ConfigKey::LightThemePrimary => FieldMut::Text(&mut theme_config.light.primary),
            ConfigKey::LightThemeSecondary => FieldMut::Text(&mut theme_config.light.secondary),
            ConfigKey::LightThemeAccent => FieldMut::Text(&mut theme_config.light.accent),
            ConfigKey::LightThemeText => FieldMut::Text(&mut theme_config.light.text),
            ConfigKey::LightThemeTextSecondary => {
                FieldMut::Text(&mut theme_config.light.text_secondary)
            }
        }
    }
}

enum Field<'a> {
    Flag(&'a bool),
    Text(&'a String),
    Theme(&'a Theme),
}

enum FieldMut<'a> {
    Flag(&'a mut bool),
    Text(&'a mut String),
    Theme(&'a mut Theme),
}

/// Section headings and their keys, in the order [`SiteConfig::to_text`]
/// writes them.
const SECTIONS: &[(&str, &[ConfigKey])] = &[
    (
        "# === SITE SETTINGS ===",
        &[ConfigKey::Theme, ConfigKey::EnableThemeToggle],
    ),
    (
        "# Maintenance mode settings",
        &[
            ConfigKey::MaintenanceModeEnabled,
            ConfigKey::MaintenanceModeMessage,
            ConfigKey::MaintenanceModeEstimatedTime,
        ],
    ),
    (
        "# Animation settings",
        &[ConfigKey::AnimationsEnabled, ConfigKey::AnimationsReducedMotion],
    ),
    (
        "# Feature toggles",
        &[
            ConfigKey::FeaturesRobotInteraction,
            ConfigKey::FeaturesParticleEffects,
            ConfigKey::FeaturesGlassEffect,
        ],
    ),
    (
        "# === THEME COLORS ===\n# Dark theme colors",
        &[
            ConfigKey::DarkThemePrimary,
            ConfigKey::DarkThemeSecondary,
            ConfigKey::DarkThemeAccent,
            ConfigKey::DarkThemeText,
            ConfigKey::DarkThemeTextSecondary,
        ],
    ),
    (
        "# Light theme colors",
        &[
            ConfigKey::LightThemePrimary,
            ConfigKey::LightThemeSecondary,
            ConfigKey::LightThemeAccent,
            ConfigKey::LightThemeText,
            ConfigKey::LightThemeTextSecondary,
        ],
    ),
];

/// Every key the site recognizes. Each maps to exactly one field of
/// [`SiteConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Theme,
    EnableThemeToggle,
    MaintenanceModeEnabled,
    MaintenanceModeMessage,
    MaintenanceModeEstimatedTime,
    AnimationsEnabled,
    AnimationsReducedMotion,
    FeaturesRobotInteraction,
    FeaturesParticleEffects,
    FeaturesGlassEffect,
    DarkThemePrimary,
    DarkThemeSecondary,
    DarkThemeAccent,
    DarkThemeText,
    DarkThemeTextSecondary,
    LightThemePrimary,
    LightThemeSecondary,
    LightThemeAccent,
    LightThemeText,
    LightThemeTextSecondary,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 20] = [
        ConfigKey::Theme,
        ConfigKey::EnableThemeToggle,
        ConfigKey::MaintenanceModeEnabled,
        ConfigKey::MaintenanceModeMessage,
        ConfigKey::MaintenanceModeEstimatedTime,
        ConfigKey::AnimationsEnabled,
        ConfigKey::AnimationsReducedMotion,
        ConfigKey::FeaturesRobotInteraction,
        ConfigKey::FeaturesParticleEffects,
        ConfigKey::FeaturesGlassEffect,
        ConfigKey::DarkThemePrimary,
        ConfigKey::DarkThemeSecondary,
        ConfigKey::DarkThemeAccent,
        ConfigKey::DarkThemeText,
        ConfigKey::DarkThemeTextSecondary,
        ConfigKey::LightThemePrimary,
        ConfigKey::LightThemeSecondary,
        ConfigKey::LightThemeAccent,
        ConfigKey::LightThemeText,
        ConfigKey::LightThemeTextSecondary,
    ];

    /// The key as it appears in the file.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Theme => "THEME",
            ConfigKey::EnableThemeToggle => "ENABLE_THEME_TOGGLE",
            ConfigKey::MaintenanceModeEnabled => "MAINTENANCE_MODE_ENABLED",
            ConfigKey::MaintenanceModeMessage => "MAINTENANCE_MODE_MESSAGE",
            ConfigKey::MaintenanceModeEstimatedTime => "MAINTENANCE_MODE_ESTIMATED_TIME",
            ConfigKey::AnimationsEnabled => "ANIMATIONS_ENABLED",
            ConfigKey::AnimationsReducedMotion => "ANIMATIONS_REDUCED_MOTION",
            ConfigKey::FeaturesRobotInteraction => "FEATURES_ROBOT_INTERACTION",
            ConfigKey::FeaturesParticleEffects => "FEATURES_PARTICLE_EFFECTS",
            ConfigKey::FeaturesGlassEffect => "FEATURES_GLASS_EFFECT",
            ConfigKey::DarkThemePrimary => "DARK_THEME_PRIMARY",
            ConfigKey::DarkThemeSecondary => "DARK_THEME_SECONDARY",
            ConfigKey::DarkThemeAccent => "DARK_THEME_ACCENT",
            ConfigKey::DarkThemeText => "DARK_THEME_TEXT",
            ConfigKey::DarkThemeTextSecondary => "DARK_THEME_TEXT_SECONDARY",
            ConfigKey::LightThemePrimary => "LIGHT_THEME_PRIMARY",
            ConfigKey::LightThemeSecondary => "LIGHT_THEME_SECONDARY",
            ConfigKey::LightThemeAccent => "LIGHT_THEME_ACCENT",
            ConfigKey::LightThemeText => "LIGHT_THEME_TEXT",
            ConfigKey::LightThemeTextSecondary => "LIGHT_THEME_TEXT_SECONDARY",
        }
    }

    /// Looks up a key by its exact (case-sensitive) file name.
    pub fn lookup(name: &str) -> Option<ConfigKey> {
        ConfigKey::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A config value after coercion: `true`/`false` in any case become
/// booleans, everything else stays text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Text(String),
}

impl Value {
    pub fn from_text(raw: &str) -> Value {
        if raw.eq_ignore_ascii_case("true") {
            Value::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Value::Bool(false)
        } else {
            Value::Text(raw.to_owned())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{}", value),
            Value::Text(value) => f.write_str(value),
        }
    }
}

/// A non-fatal problem found while parsing. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The key isn't one of the [`ConfigKey`]s. The line is ignored.
    UnknownKey { line: usize, key: String },

    /// The value can't be stored in the key's field (e.g., `maybe` for a
    /// flag). The field keeps its previous value.
    InvalidValue {
        line: usize,
        key: ConfigKey,
        value: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::UnknownKey { line, key } => {
                write!(f, "line {}: unknown config key `{}`", line, key)
            }
            Warning::InvalidValue { line, key, value } => {
                write!(f, "line {}: invalid value `{}` for `{}`", line, value, key)
            }
        }
    }
}

/// One `KEY=VALUE` line with both sides trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub line: usize,
    pub key: &'a str,
    pub value: &'a str,
}

/// Iterates over the `KEY=VALUE` lines of `text`, skipping blank lines,
/// comments and lines with an empty key. Only the first `=` separates key
/// from value; a line without one has an empty value.
pub fn entries(text: &str) -> impl Iterator<Item = Entry<'_>> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line_text = line.trim();
        if line_text.is_empty() || line_text.starts_with('#') {
            return None;
        }
        let (key, value) = match line_text.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (line_text, ""),
        };
        match key.is_empty() {
            true => None,
            false => Some(Entry {
                line: i + 1,
                key,
                value,
            }),
        }
    })
}

/// Parses `text` into a [`SiteConfig`], logging each [`Warning`]. Fields that
/// the text doesn't mention keep their [`Default`] values, so `parse("")`
/// returns `SiteConfig::default()`.
pub fn parse(text: &str) -> SiteConfig {
    let (config, warnings) = parse_with_warnings(text);
    for warning in warnings {
        tracing::warn!("{}", warning);
    }
    config
}

/// Like [`parse`], but hands the warnings back to the caller instead of
/// logging them.
pub fn parse_with_warnings(text: &str) -> (SiteConfig, Vec<Warning>) {
    let mut config = SiteConfig::default();
    let mut warnings = Vec::new();
    for entry in entries(text) {
        match ConfigKey::lookup(entry.key) {
            None => warnings.push(Warning::UnknownKey {
                line: entry.line,
                key: entry.key.to_owned(),
            }),
            Some(key) => {
                if !config.apply(key, entry.value) {
                    warnings.push(Warning::InvalidValue {
                        line: entry.line,
                        key,
                        value: entry.value.to_owned(),
                    });
                }
            }
        }
    }
    (config, warnings)
}

/// Applies `updates` to `existing` as a textual patch. For each update, in
/// order, the first line that starts with `KEY=` is replaced by `KEY=value`;
/// if there is no such line, `KEY=value` is appended with the same line
/// terminator as the last line. Every other byte of `existing` is preserved,
/// including comments and line endings.
///
/// Values are written verbatim. A value containing a line break produces
/// extra lines in the output.
pub fn serialize<I, K, V>(updates: I, existing: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut text = existing.to_owned();
    for (key, value) in updates {
        let replacement = format!("{}={}", key.as_ref(), value.as_ref());
        match find_line(&text, key.as_ref()) {
            Some(range) => text.replace_range(range, &replacement),
            None => {
                let eol = line_ending(&text);
                let trailing_newline = text.is_empty() || text.ends_with('\n');
                if !trailing_newline {
                    text.push_str(eol);
                }
                text.push_str(&replacement);
                if trailing_newline {
                    text.push_str(eol);
                }
            }
        }
    }
    text
}

/// The terminator of the last complete line in `text`, `\n` if there is
/// none.
fn line_ending(text: &str) -> &'static str {
    match text.rfind('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Returns the byte range of the first line starting with `{key}=`, without
/// its line terminator.
fn find_line(text: &str, key: &str) -> Option<std::ops::Range<usize>> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(&['\n', '\r'][..]);
        if let Some(rest) = content.strip_prefix(key) {
            if rest.starts_with('=') {
                return Some(offset..offset + content.len());
            }
        }
        offset += line.len();
    }
    None
}

/// An ordered set of typed updates for [`serialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    updates: Vec<(ConfigKey, String)>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an update. A later update for the same key wins.
    pub fn set(mut self, key: ConfigKey, value: impl ToString) -> Self {
        self.updates.push((key, value.to_string()));
        self
    }

    /// The updates that switch maintenance mode on or off. The message is
    /// only written when given and non-empty; the estimated time whenever it
    /// is given, so `Some("")` clears it.
    pub fn maintenance(
        enabled: bool,
        message: Option<&str>,
        estimated_time: Option<&str>,
    ) -> Self {
        let mut patch = Self::new().set(ConfigKey::MaintenanceModeEnabled, enabled);
        if let Some(message) = message.filter(|message| !message.is_empty()) {
            patch = patch.set(ConfigKey::MaintenanceModeMessage, message);
        }
        if let Some(estimated_time) = estimated_time {
            patch = patch.set(ConfigKey::MaintenanceModeEstimatedTime, estimated_time);
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Patches `existing` with the updates. See [`serialize`].
    pub fn apply(&self, existing: &str) -> String {
        serialize(
            self.updates.iter().map(|(key, value)| (key.as_str(), value.as_str())),
            existing,
        )
    }
}
