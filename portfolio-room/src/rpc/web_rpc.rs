use crate::desktop::actions::DesktopAction;
use crate::desktop::content::PanelId;
use crate::desktop::window_manager::WindowManager;
use crate::engine::assets::site_manifest::SiteManifest;
use crate::engine::core::view_state::ViewStateMachine;
use bevy::ecs::system::SystemParam;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between React and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to React frontend without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to React frontend.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Attempt JSON parsing to validate RPC format before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from React frontend.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    // Write events using the non-deprecated method.
    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

#[derive(SystemParam)]
struct RpcContext<'w> {
    diagnostics: Res<'w, DiagnosticsStore>,
    view: Res<'w, ViewStateMachine>,
    windows: Res<'w, WindowManager>,
    site: Res<'w, SiteManifest>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    context: RpcContext,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut desktop_actions: EventWriter<DesktopAction>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &context, &mut desktop_actions) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
/// Actions run for notifications too; only requests with an ID get a response.
fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    desktop_actions: &mut EventWriter<DesktopAction>,
) -> Option<RpcResponse> {
    let result = match parse_desktop_action(&request.method, &request.params) {
        Some(Ok(action)) => {
            let action = match action {
                DesktopAction::OpenPanel(panel) => DesktopAction::for_icon(panel, &context.site),
                other => other,
            };
            info!("RPC desktop action: {:?}", action);
            desktop_actions.write(action);
            Ok(serde_json::json!({ "success": true }))
        }
        Some(Err(error)) => Err(error),
        None => match request.method.as_str() {
            "get_view_mode" => handle_get_view_mode(&context.view),
            "get_windows" => handle_get_windows(&context.windows),
            "get_fps" => handle_get_fps(&context.diagnostics),
            _ => {
                warn!("Unknown RPC method: {}", request.method);
                let id = request.id.clone()?;
                return Some(create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                ));
            }
        },
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Map desktop methods onto actions. None when the method is not a desktop action.
pub fn parse_desktop_action(
    method: &str,
    params: &serde_json::Value,
) -> Option<Result<DesktopAction, RpcError>> {
    let panel_action: fn(PanelId) -> DesktopAction = match method {
        "return_to_room" => return Some(Ok(DesktopAction::ReturnToRoom)),
        "download_resume" => return Some(Ok(DesktopAction::DownloadResume)),
        "open_resume_fullscreen" => return Some(Ok(DesktopAction::OpenResumeFullscreen)),
        "open_panel" => DesktopAction::OpenPanel,
        "close_panel" => DesktopAction::ClosePanel,
        "toggle_minimize" => DesktopAction::ToggleMinimize,
        "toggle_maximize" => DesktopAction::ToggleMaximize,
        "focus_panel" => DesktopAction::FocusPanel,
        _ => return None,
    };
    Some(parse_panel(params).map(panel_action))
}

fn parse_panel(params: &serde_json::Value) -> Result<PanelId, RpcError> {
    #[derive(serde::Deserialize)]
    struct PanelParams {
        panel: String,
    }

    let panel_params = serde_json::from_value::<PanelParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'panel' parameter"))?;

    PanelId::from_string(&panel_params.panel)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown panel: {}", panel_params.panel)))
}

fn handle_get_view_mode(view: &ViewStateMachine) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "mode": view.mode()
    }))
}

fn handle_get_windows(windows: &WindowManager) -> Result<serde_json::Value, RpcError> {
    let focused = windows.focused();
    let list: Vec<serde_json::Value> = windows
        .windows()
        .map(|w| {
            serde_json::json!({
                "panel": w.panel,
                "minimized": w.minimized,
                "maximized": w.maximized,
                "focused": focused == Some(w.panel),
                "z_order": w.z_order,
            })
        })
        .collect();
    Ok(serde_json::json!({ "windows": list }))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to React frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (React frontend).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn panel_methods_parse_their_panel() {
        let action = parse_desktop_action("open_panel", &json!({"panel": "Projects"}));
        assert_eq!(action.unwrap().unwrap(), DesktopAction::OpenPanel(PanelId::Projects));

        let action = parse_desktop_action("toggle_maximize", &json!({"panel": "about"}));
        assert_eq!(action.unwrap().unwrap(), DesktopAction::ToggleMaximize(PanelId::About));
    }

    #[test]
    fn parameterless_actions_ignore_params() {
        let action = parse_desktop_action("return_to_room", &serde_json::Value::Null);
        assert_eq!(action.unwrap().unwrap(), DesktopAction::ReturnToRoom);
    }

    #[test]
    fn bad_panels_are_invalid_params() {
        let error = parse_desktop_action("close_panel", &json!({"panel": "blog"})).unwrap().unwrap_err();
        assert_eq!(error.code, -32602);

        let error = parse_desktop_action("focus_panel", &json!({})).unwrap().unwrap_err();
        assert_eq!(error.code, -32602);
    }

    #[test]
    fn requests_without_params_deserialize() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_windows","id":7}"#).unwrap();
        assert!(request.params.is_null());
        assert_eq!(request.id, Some(json!(7)));
    }

    #[test]
    fn other_methods_are_not_desktop_actions() {
        assert!(parse_desktop_action("get_fps", &serde_json::Value::Null).is_none());
    }
}
