use crate::engine::camera::transition::CameraPose;
use bevy::prelude::*;
use serde::Serialize;

/// Which view the visitor is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Room,
    TransitioningIn,
    Desktop,
    TransitioningOut,
}

impl ViewMode {
    /// The only successor each mode may move to.
    pub fn successor(self) -> ViewMode {
        match self {
            ViewMode::Room => ViewMode::TransitioningIn,
            ViewMode::TransitioningIn => ViewMode::Desktop,
            ViewMode::Desktop => ViewMode::TransitioningOut,
            ViewMode::TransitioningOut => ViewMode::Room,
        }
    }

    pub fn accepts_orbit_input(self) -> bool {
        self == ViewMode::Room
    }
}

/// Sub-stage of a transition, advanced by completion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStage {
    Idle,
    /// Camera flying toward the computer.
    MovingIn,
    /// Boot overlay playing.
    Booting,
    /// Desktop UI fading out.
    HidingDesktop,
    /// Shutdown overlay playing.
    ShuttingDown,
    /// Camera flying back to the home pose.
    MovingOut,
}

/// Work the driving systems must start after a state change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageAction {
    MoveCamera(CameraPose),
    StartBoot,
    RevealDesktop,
    FadeOutDesktop,
    /// Force-close every window, hide the desktop, then play shutdown.
    CloseDesktopAndShutdown,
    EnableOrbit,
}

/// Room/desktop state machine. Owns the home pose captured at startup.
#[derive(Resource, Debug, Clone)]
pub struct ViewStateMachine {
    mode: ViewMode,
    stage: TransitionStage,
    home_pose: CameraPose,
}

impl ViewStateMachine {
    pub fn new(home_pose: CameraPose) -> Self {
        Self {
            mode: ViewMode::Room,
            stage: TransitionStage::Idle,
            home_pose,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn stage(&self) -> TransitionStage {
        self.stage
    }

    pub fn home_pose(&self) -> CameraPose {
        self.home_pose
    }

    fn advance_mode(&mut self, stage: TransitionStage) {
        let next = self.mode.successor();
        info!("View mode {:?} -> {:?}", self.mode, next);
        self.mode = next;
        self.stage = stage;
    }

    /// Start flying to the computer after a confirmed hit. No-op unless in the room.
    pub fn begin_enter(&mut self, target: CameraPose) -> Option<StageAction> {
        if self.mode != ViewMode::Room {
            debug!("Ignoring enter request while {:?}", self.mode);
            return None;
        }
        self.advance_mode(TransitionStage::MovingIn);
        Some(StageAction::MoveCamera(target))
    }

    /// Explicit "return" action. No-op unless the desktop is fully up.
    pub fn begin_return(&mut self) -> Option<StageAction> {
        if self.mode != ViewMode::Desktop {
            debug!("Ignoring return request while {:?}", self.mode);
            return None;
        }
        self.advance_mode(TransitionStage::HidingDesktop);
        Some(StageAction::FadeOutDesktop)
    }

    pub fn on_camera_arrived(&mut self) -> Option<StageAction> {
        match (self.mode, self.stage) {
            (ViewMode::TransitioningIn, TransitionStage::MovingIn) => {
                self.stage = TransitionStage::Booting;
                Some(StageAction::StartBoot)
            }
            (ViewMode::TransitioningOut, TransitionStage::MovingOut) => {
                self.advance_mode(TransitionStage::Idle);
                Some(StageAction::EnableOrbit)
            }
            _ => None,
        }
    }

    pub fn on_boot_finished(&mut self) -> Option<StageAction> {
        if self.stage != TransitionStage::Booting {
            return None;
        }
        self.advance_mode(TransitionStage::Idle);
        Some(StageAction::RevealDesktop)
    }

    pub fn on_desktop_hidden(&mut self) -> Option<StageAction> {
        if self.stage != TransitionStage::HidingDesktop {
            return None;
        }
        self.stage = TransitionStage::ShuttingDown;
        Some(StageAction::CloseDesktopAndShutdown)
    }

    pub fn on_shutdown_finished(&mut self) -> Option<StageAction> {
        if self.stage != TransitionStage::ShuttingDown {
            return None;
        }
        self.stage = TransitionStage::MovingOut;
        Some(StageAction::MoveCamera(self.home_pose))
    }
}

/// Run condition for systems that only apply in one view mode.
pub fn in_view_mode(mode: ViewMode) -> impl FnMut(Option<Res<ViewStateMachine>>) -> bool + Clone {
    move |view: Option<Res<ViewStateMachine>>| view.is_some_and(|v| v.mode() == mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> ViewStateMachine {
        ViewStateMachine::new(CameraPose::new(Vec3::new(4.0, 3.0, 5.0), Vec3::Y))
    }

    fn target() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 1.1, 1.0), Vec3::Y)
    }

    #[test]
    fn full_round_trip_follows_the_cycle() {
        let mut sm = machine();

        assert_eq!(sm.begin_enter(target()), Some(StageAction::MoveCamera(target())));
        assert_eq!(sm.mode(), ViewMode::TransitioningIn);
        assert_eq!(sm.on_camera_arrived(), Some(StageAction::StartBoot));
        assert_eq!(sm.mode(), ViewMode::TransitioningIn);
        assert_eq!(sm.on_boot_finished(), Some(StageAction::RevealDesktop));
        assert_eq!(sm.mode(), ViewMode::Desktop);

        assert_eq!(sm.begin_return(), Some(StageAction::FadeOutDesktop));
        assert_eq!(sm.mode(), ViewMode::TransitioningOut);
        assert_eq!(sm.on_desktop_hidden(), Some(StageAction::CloseDesktopAndShutdown));
        assert_eq!(sm.on_shutdown_finished(), Some(StageAction::MoveCamera(sm.home_pose())));
        assert_eq!(sm.mode(), ViewMode::TransitioningOut);
        assert_eq!(sm.on_camera_arrived(), Some(StageAction::EnableOrbit));
        assert_eq!(sm.mode(), ViewMode::Room);
    }

    #[test]
    fn enter_is_ignored_once_started() {
        let mut sm = machine();
        sm.begin_enter(target());
        assert_eq!(sm.begin_enter(target()), None);

        sm.on_camera_arrived();
        assert_eq!(sm.begin_enter(target()), None);

        sm.on_boot_finished();
        assert_eq!(sm.begin_enter(target()), None);

        sm.begin_return();
        assert_eq!(sm.begin_enter(target()), None);
        assert_eq!(sm.mode(), ViewMode::TransitioningOut);
    }

    #[test]
    fn return_only_from_desktop() {
        let mut sm = machine();
        assert_eq!(sm.begin_return(), None);

        sm.begin_enter(target());
        assert_eq!(sm.begin_return(), None);

        sm.on_camera_arrived();
        sm.on_boot_finished();
        assert!(sm.begin_return().is_some());
        assert_eq!(sm.begin_return(), None);
    }

    #[test]
    fn out_of_order_completions_are_ignored() {
        let mut sm = machine();
        assert_eq!(sm.on_camera_arrived(), None);
        assert_eq!(sm.on_boot_finished(), None);
        assert_eq!(sm.on_shutdown_finished(), None);
        assert_eq!(sm.on_desktop_hidden(), None);
        assert_eq!(sm.mode(), ViewMode::Room);

        sm.begin_enter(target());
        // Boot cannot finish before the camera lands.
        assert_eq!(sm.on_boot_finished(), None);
        assert_eq!(sm.stage(), TransitionStage::MovingIn);
    }

    #[test]
    fn modes_cycle_in_one_direction() {
        let mut mode = ViewMode::Room;
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.successor();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![ViewMode::TransitioningIn, ViewMode::Desktop, ViewMode::TransitioningOut, ViewMode::Room]
        );
    }
}
