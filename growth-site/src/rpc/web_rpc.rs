use crate::engine::orbital::selection::ActiveNode;
use crate::strategy::dispatch::StrategyRequestEvent;
use crate::strategy::lifecycle::StrategyPanel;
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

/// JSON-RPC 2.0 notification pushed to the host page.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing traffic to the host page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Raw messages received from the host page. Filled by the browser listener on web builds.
#[derive(Resource, Clone, Default)]
pub struct MessageQueue(pub std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

/// Read-only view of the state the RPC methods report on.
pub struct RpcContext<'a> {
    pub panel: &'a StrategyPanel,
    pub active: &'a ActiveNode,
}

pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .init_resource::<MessageQueue>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_state_changes,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(queue: Res<MessageQueue>) {
    let queue_clone = queue.0.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

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
            return;
        }
    }

    // Ownership moves to JS; the listener lives for the page lifetime.
    closure.forget();
}

fn process_incoming_messages(
    message_queue: Res<MessageQueue>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let messages = if let Ok(mut queue) = message_queue.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    panel: Res<StrategyPanel>,
    active: Res<ActiveNode>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut strategy_requests: EventWriter<StrategyRequestEvent>,
) {
    let context = RpcContext {
        panel: &panel,
        active: &active,
    };
    let mut pending = Vec::new();

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &context, &mut pending) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                rpc_interface.queue_response(create_error_response(
                    serde_json::Value::Null,
                    -32700,
                    "Parse error",
                    None,
                ));
            }
        }
    }

    strategy_requests.write_batch(pending);
}

/// Run one request. Requests without an id are notifications: they act but get no response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
    strategy_requests: &mut Vec<StrategyRequestEvent>,
) -> Option<RpcResponse> {
    let id = request.id.clone();

    if request.jsonrpc != "2.0" {
        return id.map(|id| create_error_response(id, -32600, "Invalid request", None));
    }

    let result = match request.method.as_str() {
        "request_strategy" => handle_request_strategy(&request.params, strategy_requests),
        "get_strategy_state" => Ok(strategy_state_json(context.panel)),
        "get_active_node" => Ok(active_node_json(context.active)),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return id.map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = id?;
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

/// Queue a strategy request. Blank niches are reported as not accepted, mirroring the panel.
fn handle_request_strategy(
    params: &serde_json::Value,
    strategy_requests: &mut Vec<StrategyRequestEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct RequestStrategyParams {
        niche: String,
    }

    let parsed = serde_json::from_value::<RequestStrategyParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'niche' string parameter"))?;

    let accepted = !parsed.niche.trim().is_empty();
    if accepted {
        info!("Strategy request received over RPC");
        strategy_requests.push(StrategyRequestEvent {
            niche: parsed.niche,
        });
    }

    Ok(serde_json::json!({ "accepted": accepted }))
}

pub fn strategy_state_json(panel: &StrategyPanel) -> serde_json::Value {
    serde_json::json!({
        "state": panel.state().name(),
        "result": panel.state().result(),
    })
}

pub fn active_node_json(active: &ActiveNode) -> serde_json::Value {
    serde_json::json!({ "active": active.get() })
}

/// Push lifecycle and selection changes to the host page.
fn notify_state_changes(
    panel: Res<StrategyPanel>,
    active: Res<ActiveNode>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if panel.is_changed() && !panel.is_added() {
        rpc_interface.send_notification("strategy_state_changed", strategy_state_json(&panel));
    }
    if active.is_changed() && !active.is_added() {
        rpc_interface.send_notification("active_node_changed", active_node_json(&active));
    }
}

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

/// Notifications go out before responses so the host sees state before acknowledgements.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

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
        // Native builds have no host page.
        let _ = message;
    }
}

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
    use crate::strategy::model::StrategyResult;
    use serde_json::json;

    fn request(method: &str, params: serde_json::Value, id: Option<i64>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".into(),
            method: method.into(),
            params,
            id: id.map(|id| json!(id)),
        }
    }

    fn run(
        req: RpcRequest,
        panel: &StrategyPanel,
        active: &ActiveNode,
    ) -> (Option<RpcResponse>, Vec<StrategyRequestEvent>) {
        let mut pending = Vec::new();
        let context = RpcContext { panel, active };
        let response = handle_rpc_request(&req, &context, &mut pending);
        (response, pending)
    }

    #[test]
    fn request_strategy_queues_event_for_non_blank_niche() {
        let panel = StrategyPanel::default();
        let active = ActiveNode::default();

        let (response, pending) = run(
            request("request_strategy", json!({"niche": "SaaS B2B"}), Some(1)),
            &panel,
            &active,
        );
        let response = response.expect("response");
        assert_eq!(response.result, Some(json!({"accepted": true})));
        assert_eq!(response.id, Some(json!(1)));
        assert_eq!(pending, vec![StrategyRequestEvent { niche: "SaaS B2B".into() }]);

        let (response, pending) = run(
            request("request_strategy", json!({"niche": "  "}), Some(2)),
            &panel,
            &active,
        );
        assert_eq!(
            response.and_then(|r| r.result),
            Some(json!({"accepted": false}))
        );
        assert!(pending.is_empty());
    }

    #[test]
    fn bad_params_and_unknown_methods_use_standard_codes() {
        let panel = StrategyPanel::default();
        let active = ActiveNode::default();

        let (response, pending) = run(
            request("request_strategy", json!({"topic": 3}), Some(3)),
            &panel,
            &active,
        );
        assert_eq!(response.and_then(|r| r.error).map(|e| e.code), Some(-32602));
        assert!(pending.is_empty());

        let (response, _) = run(request("get_fps", json!(null), Some(4)), &panel, &active);
        assert_eq!(response.and_then(|r| r.error).map(|e| e.code), Some(-32601));
    }

    #[test]
    fn notifications_act_without_responding() {
        let panel = StrategyPanel::default();
        let active = ActiveNode::default();
        let (response, pending) = run(
            request("request_strategy", json!({"niche": "café"}), None),
            &panel,
            &active,
        );
        assert!(response.is_none());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn state_queries_report_panel_and_selection() {
        let mut panel = StrategyPanel::default();
        let mut active = ActiveNode::default();

        let (response, _) = run(request("get_strategy_state", json!({}), Some(5)), &panel, &active);
        assert_eq!(
            response.and_then(|r| r.result),
            Some(json!({"state": "idle", "result": null}))
        );

        let ticket = panel.begin("café").expect("ticket");
        panel.settle(
            &ticket,
            Ok(StrategyResult {
                headline: "h".into(),
                key_points: ["a".into(), "b".into(), "c".into()],
                call_to_action: "c".into(),
            }),
        );
        active.enter(2);

        let (response, _) = run(request("get_strategy_state", json!({}), Some(6)), &panel, &active);
        let result = response.and_then(|r| r.result).expect("result");
        assert_eq!(result["state"], "success");
        assert_eq!(result["result"]["keyPoints"][2], "c");

        let (response, _) = run(request("get_active_node", json!({}), Some(7)), &panel, &active);
        assert_eq!(response.and_then(|r| r.result), Some(json!({"active": 2})));
    }

    #[test]
    fn wrong_protocol_version_is_invalid_request() {
        let mut req = request("get_active_node", json!({}), Some(8));
        req.jsonrpc = "1.0".into();
        let (response, _) = run(req, &StrategyPanel::default(), &ActiveNode::default());
        assert_eq!(response.and_then(|r| r.error).map(|e| e.code), Some(-32600));
    }

    #[test]
    fn params_default_to_null_when_omitted() {
        let req: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_active_node","id":9}"#)
                .expect("request");
        assert!(req.params.is_null());
    }
}
