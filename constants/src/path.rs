/// Site manifest read at startup.
pub const SITE_MANIFEST_PATH: &str = "site_manifest.json";

/// Used when the manifest is missing or fails to parse.
pub const DEFAULT_MODEL_PATH: &str = "models/room.glb";
pub const DEFAULT_ENVIRONMENT_DIFFUSE_PATH: &str = "environment/room_diffuse.dds";
pub const DEFAULT_ENVIRONMENT_SPECULAR_PATH: &str = "environment/room_specular.dds";
pub const DEFAULT_RESUME_URL: &str = "resume.pdf";
