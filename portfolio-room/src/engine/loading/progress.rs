use bevy::prelude::*;

/// Loading milestones, reported to the host page as they complete.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub room_spawned: bool,
    pub room_failed: bool,
    pub scene_indexed: bool,
    pub environment_ready: bool,
}

impl LoadingProgress {
    /// Name of the step currently in flight.
    pub fn stage(&self) -> &'static str {
        if !self.manifest_loaded {
            "manifest"
        } else if !(self.room_spawned || self.room_failed) {
            "model"
        } else if !self.scene_indexed {
            "scene"
        } else if !self.environment_ready {
            "environment"
        } else {
            "ready"
        }
    }

    pub fn fraction(&self) -> f32 {
        let steps = [
            self.manifest_loaded,
            self.room_spawned || self.room_failed,
            self.scene_indexed,
            self.environment_ready,
        ];
        steps.iter().filter(|done| **done).count() as f32 / steps.len() as f32
    }

    pub fn is_complete(&self) -> bool {
        self.manifest_loaded && self.scene_indexed && self.environment_ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_order() {
        let mut progress = LoadingProgress::default();
        assert_eq!(progress.stage(), "manifest");
        assert_eq!(progress.fraction(), 0.0);

        progress.manifest_loaded = true;
        assert_eq!(progress.stage(), "model");

        progress.room_failed = true;
        assert_eq!(progress.stage(), "scene");
        assert_eq!(progress.fraction(), 0.5);

        progress.scene_indexed = true;
        progress.environment_ready = true;
        assert_eq!(progress.stage(), "ready");
        assert!(progress.is_complete());
    }
}
