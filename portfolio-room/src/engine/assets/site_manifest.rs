use bevy::prelude::*;
use constants::path::*;
use serde::{Deserialize, Serialize};

/// Environment map pair for image-based lighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentFiles {
    pub diffuse: String,
    pub specular: String,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

fn default_intensity() -> f32 {
    900.0
}

impl Default for EnvironmentFiles {
    fn default() -> Self {
        Self {
            diffuse: DEFAULT_ENVIRONMENT_DIFFUSE_PATH.to_string(),
            specular: DEFAULT_ENVIRONMENT_SPECULAR_PATH.to_string(),
            intensity: default_intensity(),
        }
    }
}

/// Site configuration as a Bevy asset. Mirrors the JSON structure exactly.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
pub struct SiteManifest {
    pub owner_name: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentFiles>,
    pub resume_url: String,
    #[serde(default = "default_resume_file_name")]
    pub resume_file_name: String,
    pub spotify_url: String,
}

fn default_resume_file_name() -> String {
    "resume.pdf".to_string()
}

impl Default for SiteManifest {
    fn default() -> Self {
        Self {
            owner_name: "Portfolio".to_string(),
            model: DEFAULT_MODEL_PATH.to_string(),
            environment: Some(EnvironmentFiles::default()),
            resume_url: DEFAULT_RESUME_URL.to_string(),
            resume_file_name: default_resume_file_name(),
            spotify_url: "https://open.spotify.com".to_string(),
        }
    }
}

impl SiteManifest {
    pub fn welcome_message(&self) -> String {
        format!("Welcome to {}'s desktop! Use the power button on the taskbar to return to the room.", self.owner_name)
    }
}
