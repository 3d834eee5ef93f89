use super::content::PanelId;
use bevy::prelude::*;
use constants::desktop::*;

/// One live window, keyed by its panel id.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub panel: PanelId,
    pub minimized: bool,
    pub maximized: bool,
    /// Current bounds in desktop pixels, origin top-left.
    pub bounds: Rect,
    /// Last non-maximised bounds.
    pub restore_bounds: Rect,
    pub z_order: u32,
    pub entity: Option<Entity>,
}

/// Projection of a window onto the taskbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub panel: PanelId,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    panel: PanelId,
    grab_offset: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Created,
    /// Window already existed and was brought to the front.
    Focused,
}

/// Desktop window collection. Taskbar order is creation order.
#[derive(Resource, Debug, Clone)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    next_z: u32,
    focused: Option<PanelId>,
    desktop_area: Rect,
    drag: Option<DragState>,
    opened_count: usize,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 1280.0, 720.0 - TASKBAR_HEIGHT))
    }
}

impl WindowManager {
    pub fn new(desktop_area: Rect) -> Self {
        Self {
            windows: Vec::new(),
            next_z: 0,
            focused: None,
            desktop_area,
            drag: None,
            opened_count: 0,
        }
    }

    pub fn desktop_area(&self) -> Rect {
        self.desktop_area
    }

    /// Resize the work area; maximised windows follow it.
    pub fn set_desktop_area(&mut self, area: Rect) {
        self.desktop_area = area;
        for window in self.windows.iter_mut().filter(|w| w.maximized) {
            window.bounds = area;
        }
    }

    pub fn get(&self, panel: PanelId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.panel == panel)
    }

    fn get_mut(&mut self, panel: PanelId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.panel == panel)
    }

    pub fn windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn focused(&self) -> Option<PanelId> {
        self.focused
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        self.windows
            .iter()
            .map(|w| TaskbarEntry {
                panel: w.panel,
                active: self.focused == Some(w.panel),
            })
            .collect()
    }

    pub fn set_entity(&mut self, panel: PanelId, entity: Entity) {
        if let Some(window) = self.get_mut(panel) {
            window.entity = Some(entity);
        }
    }

    fn default_restore_bounds(&self) -> Rect {
        let area = self.desktop_area;
        let size = Vec2::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT).min(area.size());
        let step = (self.opened_count % WINDOW_CASCADE_LIMIT) as f32 * WINDOW_CASCADE_STEP;
        let min = (area.center() - size * 0.5 + Vec2::splat(step)).min(area.max - size).max(area.min);
        Rect::from_corners(min, min + size)
    }

    /// Open a panel window, or focus it if already open. Minimised windows stay minimised.
    pub fn open_panel(&mut self, panel: PanelId) -> Option<OpenOutcome> {
        if !panel.has_window() {
            debug!("Panel {} has no window", panel.as_str());
            return None;
        }
        if self.get(panel).is_some() {
            self.focus(panel);
            return Some(OpenOutcome::Focused);
        }

        let restore_bounds = self.default_restore_bounds();
        self.opened_count += 1;
        self.windows.push(WindowRecord {
            panel,
            minimized: false,
            maximized: true,
            bounds: self.desktop_area,
            restore_bounds,
            z_order: 0,
            entity: None,
        });
        self.focus(panel);
        info!("Opened window {}", panel.as_str());
        Some(OpenOutcome::Created)
    }

    /// Raise a window to the top and make its taskbar entry active.
    pub fn focus(&mut self, panel: PanelId) -> bool {
        let z = self.next_z + 1;
        let Some(window) = self.get_mut(panel) else {
            return false;
        };
        window.z_order = z;
        self.next_z = z;
        self.focused = Some(panel);
        true
    }

    /// Destroy a window and its taskbar entry.
    pub fn close_panel(&mut self, panel: PanelId) -> Option<WindowRecord> {
        let index = self.windows.iter().position(|w| w.panel == panel)?;
        let removed = self.windows.remove(index);
        if self.drag.is_some_and(|d| d.panel == panel) {
            self.drag = None;
        }
        if self.focused == Some(panel) {
            self.focused = self.windows.iter().max_by_key(|w| w.z_order).map(|w| w.panel);
        }
        info!("Closed window {}", panel.as_str());
        Some(removed)
    }

    pub fn close_all(&mut self) -> Vec<WindowRecord> {
        self.drag = None;
        self.focused = None;
        std::mem::take(&mut self.windows)
    }

    pub fn toggle_minimize(&mut self, panel: PanelId) -> bool {
        let Some(window) = self.get_mut(panel) else {
            return false;
        };
        window.minimized = !window.minimized;
        if self.drag.is_some_and(|d| d.panel == panel) {
            self.drag = None;
        }
        true
    }

    /// Swap between filling the desktop and the remembered rectangle.
    pub fn toggle_maximize(&mut self, panel: PanelId) -> bool {
        let area = self.desktop_area;
        let Some(window) = self.get_mut(panel) else {
            return false;
        };
        if window.maximized {
            window.bounds = window.restore_bounds;
            window.maximized = false;
        } else {
            window.restore_bounds = window.bounds;
            window.bounds = area;
            window.maximized = true;
        }
        true
    }

    /// Taskbar click restores a minimised window, otherwise focuses it.
    pub fn taskbar_click(&mut self, panel: PanelId) -> bool {
        let Some(window) = self.get_mut(panel) else {
            return false;
        };
        if window.minimized {
            window.minimized = false;
        }
        self.focus(panel)
    }

    /// Focus, then start dragging if the window is restored and visible.
    pub fn begin_drag(&mut self, panel: PanelId, pointer: Vec2) -> bool {
        if !self.focus(panel) {
            return false;
        }
        let Some(window) = self.get(panel) else {
            return false;
        };
        if window.maximized || window.minimized {
            return false;
        }
        self.drag = Some(DragState {
            panel,
            grab_offset: pointer - window.bounds.min,
        });
        true
    }

    pub fn drag_to(&mut self, pointer: Vec2) {
        let Some(drag) = self.drag else {
            return;
        };
        if let Some(window) = self.get_mut(drag.panel) {
            let size = window.bounds.size();
            let min = pointer - drag.grab_offset;
            window.bounds = Rect::from_corners(min, min + size);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> WindowManager {
        WindowManager::new(Rect::new(0.0, 0.0, 1600.0, 900.0))
    }

    #[test]
    fn opening_twice_keeps_one_window_and_entry() {
        let mut wm = manager();
        assert_eq!(wm.open_panel(PanelId::About), Some(OpenOutcome::Created));
        assert_eq!(wm.open_panel(PanelId::About), Some(OpenOutcome::Focused));

        assert_eq!(wm.len(), 1);
        let entries = wm.taskbar_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].panel, PanelId::About);
    }

    #[test]
    fn new_windows_open_maximised() {
        let mut wm = manager();
        wm.open_panel(PanelId::Projects);
        let window = wm.get(PanelId::Projects).unwrap();
        assert!(window.maximized);
        assert_eq!(window.bounds, wm.desktop_area());
    }

    #[test]
    fn reopen_after_close_starts_fresh() {
        let mut wm = manager();
        wm.open_panel(PanelId::Skills);
        wm.toggle_maximize(PanelId::Skills);
        wm.begin_drag(PanelId::Skills, Vec2::new(500.0, 300.0));
        wm.drag_to(Vec2::new(100.0, 50.0));
        wm.end_drag();
        assert!(!wm.get(PanelId::Skills).unwrap().maximized);

        wm.close_panel(PanelId::Skills);
        assert!(wm.get(PanelId::Skills).is_none());
        assert!(wm.taskbar_entries().is_empty());

        wm.open_panel(PanelId::Skills);
        let window = wm.get(PanelId::Skills).unwrap();
        assert!(window.maximized);
        assert_eq!(window.bounds, wm.desktop_area());
    }

    #[test]
    fn later_focus_has_higher_z() {
        let mut wm = manager();
        wm.open_panel(PanelId::Projects);
        wm.open_panel(PanelId::Skills);
        wm.focus(PanelId::Projects);
        wm.focus(PanelId::Skills);

        let projects = wm.get(PanelId::Projects).unwrap().z_order;
        let skills = wm.get(PanelId::Skills).unwrap().z_order;
        assert!(skills > projects);
        assert_eq!(wm.focused(), Some(PanelId::Skills));
    }

    #[test]
    fn focused_window_holds_max_z_and_sole_active_entry() {
        let mut wm = manager();
        for panel in [PanelId::About, PanelId::Resume, PanelId::Contact] {
            wm.open_panel(panel);
        }
        wm.focus(PanelId::Resume);

        let max = wm.windows().map(|w| w.z_order).max().unwrap();
        assert_eq!(wm.get(PanelId::Resume).unwrap().z_order, max);
        let active: Vec<PanelId> = wm.taskbar_entries().into_iter().filter(|e| e.active).map(|e| e.panel).collect();
        assert_eq!(active, vec![PanelId::Resume]);
    }

    #[test]
    fn closing_focused_hands_focus_to_next_highest() {
        let mut wm = manager();
        wm.open_panel(PanelId::About);
        wm.open_panel(PanelId::Resume);
        wm.open_panel(PanelId::Contact);
        wm.focus(PanelId::About);

        wm.close_panel(PanelId::About);
        assert_eq!(wm.focused(), Some(PanelId::Contact));
    }

    #[test]
    fn maximise_remembers_restored_bounds() {
        let mut wm = manager();
        wm.open_panel(PanelId::About);
        wm.toggle_maximize(PanelId::About);
        let restored = wm.get(PanelId::About).unwrap().bounds;
        assert_ne!(restored, wm.desktop_area());

        wm.toggle_maximize(PanelId::About);
        assert_eq!(wm.get(PanelId::About).unwrap().bounds, wm.desktop_area());
        wm.toggle_maximize(PanelId::About);
        assert_eq!(wm.get(PanelId::About).unwrap().bounds, restored);
    }

    #[test]
    fn drag_follows_pointer_with_grab_offset() {
        let mut wm = manager();
        wm.open_panel(PanelId::About);
        wm.toggle_maximize(PanelId::About);
        let start = wm.get(PanelId::About).unwrap().bounds;

        let grab = start.min + Vec2::new(40.0, 10.0);
        assert!(wm.begin_drag(PanelId::About, grab));
        wm.drag_to(grab + Vec2::new(100.0, 60.0));
        wm.end_drag();

        let moved = wm.get(PanelId::About).unwrap().bounds;
        assert_eq!(moved.min, start.min + Vec2::new(100.0, 60.0));
        assert_eq!(moved.size(), start.size());
        assert!(!wm.is_dragging());
    }

    #[test]
    fn maximised_window_refuses_drag_but_gains_focus() {
        let mut wm = manager();
        wm.open_panel(PanelId::About);
        wm.open_panel(PanelId::Resume);

        assert!(!wm.begin_drag(PanelId::About, Vec2::new(10.0, 10.0)));
        assert_eq!(wm.focused(), Some(PanelId::About));
        wm.drag_to(Vec2::new(300.0, 300.0));
        assert_eq!(wm.get(PanelId::About).unwrap().bounds, wm.desktop_area());
    }

    #[test]
    fn reopening_minimised_window_keeps_it_minimised() {
        let mut wm = manager();
        wm.open_panel(PanelId::Contact);
        wm.toggle_minimize(PanelId::Contact);

        assert_eq!(wm.open_panel(PanelId::Contact), Some(OpenOutcome::Focused));
        assert!(wm.get(PanelId::Contact).unwrap().minimized);
        assert_eq!(wm.taskbar_entries().len(), 1);
    }

    #[test]
    fn taskbar_click_restores_minimised_window() {
        let mut wm = manager();
        wm.open_panel(PanelId::Contact);
        wm.open_panel(PanelId::About);
        wm.toggle_minimize(PanelId::Contact);

        assert!(wm.taskbar_click(PanelId::Contact));
        assert!(!wm.get(PanelId::Contact).unwrap().minimized);
        assert_eq!(wm.focused(), Some(PanelId::Contact));
    }

    #[test]
    fn unknown_panels_are_no_ops() {
        let mut wm = manager();
        assert!(!wm.focus(PanelId::About));
        assert!(!wm.toggle_minimize(PanelId::About));
        assert!(!wm.toggle_maximize(PanelId::About));
        assert!(!wm.taskbar_click(PanelId::About));
        assert!(wm.close_panel(PanelId::About).is_none());
        assert_eq!(wm.open_panel(PanelId::Spotify), None);
        assert!(wm.is_empty());
    }

    #[test]
    fn resize_keeps_maximised_windows_filling_the_area() {
        let mut wm = manager();
        wm.open_panel(PanelId::About);
        let area = Rect::new(0.0, 0.0, 800.0, 556.0);
        wm.set_desktop_area(area);
        assert_eq!(wm.get(PanelId::About).unwrap().bounds, area);
    }

    #[test]
    fn close_all_empties_everything() {
        let mut wm = manager();
        wm.open_panel(PanelId::About);
        wm.open_panel(PanelId::Skills);
        let closed = wm.close_all();
        assert_eq!(closed.len(), 2);
        assert!(wm.is_empty());
        assert_eq!(wm.focused(), None);
    }
}
