use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{VignetteError, VignetteResult};
use crate::scene::palette::Palette;

/// Cinematic camera movement applied while a scene is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CameraStyle {
    /// Slow forward/back drift toward the subject.
    DollyIn,
    /// Rising, swaying boom shot.
    CraneUp,
    /// Continuous circle around the focus point.
    OrbitSlow,
    /// Shaky operator jitter.
    Handheld,
    /// Converges to one fixed framing and holds.
    LockedOff,
    /// Push/pull drift; shares the dolly-in path.
    PushPull,
}

impl CameraStyle {
    /// Every style, in declaration order.
    pub const ALL: [CameraStyle; 6] = [
        Self::DollyIn,
        Self::CraneUp,
        Self::OrbitSlow,
        Self::Handheld,
        Self::LockedOff,
        Self::PushPull,
    ];

    /// Canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DollyIn => "dolly-in",
            Self::CraneUp => "crane-up",
            Self::OrbitSlow => "orbit-slow",
            Self::Handheld => "handheld",
            Self::LockedOff => "locked-off",
            Self::PushPull => "push-pull",
        }
    }
}

impl FromStr for CameraStyle {
    type Err = VignetteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| VignetteError::validation(format!("unknown camera style \"{s}\"")))
    }
}

impl fmt::Display for CameraStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Setting a scene is staged in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Environment {
    Space,
    Desert,
    Sea,
    Forest,
    City,
    Tundra,
    Interior,
    Mountain,
    Ceremonial,
    Battlefield,
}

impl Environment {
    /// Every environment, in declaration order.
    pub const ALL: [Environment; 10] = [
        Self::Space,
        Self::Desert,
        Self::Sea,
        Self::Forest,
        Self::City,
        Self::Tundra,
        Self::Interior,
        Self::Mountain,
        Self::Ceremonial,
        Self::Battlefield,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Desert => "desert",
            Self::Sea => "sea",
            Self::Forest => "forest",
            Self::City => "city",
            Self::Tundra => "tundra",
            Self::Interior => "interior",
            Self::Mountain => "mountain",
            Self::Ceremonial => "ceremonial",
            Self::Battlefield => "battlefield",
        }
    }
}

impl FromStr for Environment {
    type Err = VignetteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| VignetteError::validation(format!("unknown environment \"{s}\"")))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Scene record as produced by a catalog.
///
/// Enumerated fields are plain strings at this boundary; [`Scene::from_def`] is where they are
/// checked.
pub struct SceneDef {
    /// Scene title.
    pub title: String,
    /// Human-readable era or date.
    pub time_period: String,
    /// Human-readable place.
    pub location: String,
    /// One-sentence summary.
    pub one_line: String,
    /// Text handed to the narration sink on activation.
    pub narration: String,
    /// Short tags in presentation order.
    #[serde(default)]
    pub visual_keywords: Vec<String>,
    /// Hex colors, usually 3 or 4.
    #[serde(default)]
    pub palette: Vec<String>,
    /// Environment name.
    pub environment: String,
    /// Camera style name.
    pub camera_style: String,
}

/// A validated, immutable scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene title.
    pub title: String,
    /// Human-readable era or date.
    pub time_period: String,
    /// Human-readable place.
    pub location: String,
    /// One-sentence summary.
    pub one_line: String,
    /// Narration text.
    pub narration: String,
    /// Tags in presentation order, first occurrence kept.
    pub visual_keywords: Vec<String>,
    /// Parsed colors.
    pub palette: Palette,
    /// Environment.
    pub environment: Environment,
    /// Camera style.
    pub camera_style: CameraStyle,
}

impl Scene {
    /// Validate a catalog record.
    pub fn from_def(def: &SceneDef) -> VignetteResult<Self> {
        let camera_style: CameraStyle = def.camera_style.parse()?;
        let environment: Environment = def.environment.parse()?;
        let palette = Palette::from_entries(&def.palette);

        let mut visual_keywords: Vec<String> = Vec::with_capacity(def.visual_keywords.len());
        for kw in &def.visual_keywords {
            if !visual_keywords.contains(kw) {
                visual_keywords.push(kw.clone());
            }
        }

        Ok(Self {
            title: def.title.clone(),
            time_period: def.time_period.clone(),
            location: def.location.clone(),
            one_line: def.one_line.clone(),
            narration: def.narration.clone(),
            visual_keywords,
            palette,
            environment,
            camera_style,
        })
    }
}

/// Validate a whole catalog batch.
///
/// The batch is all-or-nothing: an empty batch or any bad record fails everything as a
/// [`VignetteError::Provider`].
pub fn accept_batch(defs: &[SceneDef]) -> VignetteResult<Vec<Scene>> {
    if defs.is_empty() {
        return Err(VignetteError::provider("catalog returned no scenes"));
    }
    defs.iter()
        .enumerate()
        .map(|(i, def)| {
            Scene::from_def(def).map_err(|e| {
                VignetteError::provider(format!(
                    "scene {i} (\"{}\") rejected: {}",
                    def.title,
                    e.detail()
                ))
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
