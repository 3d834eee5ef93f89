use crate::engine::core::view_state::{ViewMode, ViewStateMachine};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

/// Tell the host page whenever the view mode changes.
pub fn view_mode_notification_system(
    view: Res<ViewStateMachine>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_mode: Local<Option<ViewMode>>,
) {
    let mode = view.mode();
    if *last_mode == Some(mode) {
        return;
    }
    *last_mode = Some(mode);
    rpc_interface.send_notification("view_mode_changed", serde_json::json!({ "mode": mode }));
}
