#![allow(non_snake_case)]

use super::*;
use crate::channel::{ChannelRegistry, MethodCallHandler};
use crate::reply::ReplySink;
use async_trait::async_trait;
use larapush_core::{FixedContext, HostContext, InMemoryPushSdk, PushConfig, SdkResult};
use larapush_runtime::BoxTask;
use serde_json::json;
use test_case::test_case;
use tokio::runtime::Handle;

struct Named(&'static str, Handle);

impl TaskDispatcher for Named {
    fn dispatch(&self, task: BoxTask) {
        drop(self.1.spawn(task));
    }

    fn label(&self) -> &str {
        self.0
    }
}

fn bridge(sdk: &Arc<InMemoryPushSdk>, dialect: Dialect) -> PushBridge {
    PushBridge::builder(sdk.clone())
        .context(Arc::new(FixedContext::new(HostContext::new("application"))))
        .dialect(dialect)
        .main_dispatcher(Arc::new(Named("main", Handle::current())))
        .worker_dispatcher(Arc::new(Named("worker", Handle::current())))
        .build()
        .unwrap()
}

fn initialize_call() -> MethodCall {
    MethodCall::new("initialize")
        .with_argument("panelUrl", "https://panel.example")
        .with_argument("applicationId", "app-123")
        .with_argument("debug", true)
}

async fn initialized(dialect: Dialect) -> (Arc<InMemoryPushSdk>, PushBridge) {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, dialect);
    assert!(bridge.handle(initialize_call()).await.is_success());
    (sdk, bridge)
}

#[tokio::test]
async fn PushBridge___unknown_method___not_implemented_without_sdk_call() {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);

    let reply = bridge.handle(MethodCall::new("subscribe")).await;

    assert_eq!(reply, Reply::NotImplemented);
    assert_eq!(sdk.total_calls(), 0);
}

#[tokio::test]
async fn PushBridge___initialize___replies_true_and_configures_sdk() {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);

    let reply = bridge.handle(initialize_call()).await;

    assert_eq!(reply, Reply::Success(json!(true)));
    let config = sdk.config().unwrap();
    assert_eq!(config.panel_url(), "https://panel.example");
    assert_eq!(config.application_id(), "app-123");
    assert!(config.debug());
    assert_eq!(sdk.context().unwrap().label(), "application");
}

#[tokio::test]
async fn PushBridge___initialize_without_debug___defaults_to_false() {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);
    let call = MethodCall::new("initialize")
        .with_argument("panelUrl", "https://panel.example")
        .with_argument("applicationId", "app-123");

    bridge.handle(call).await;

    assert!(!sdk.config().unwrap().debug());
}

#[test_case(json!({"applicationId": "app-123"}) ; "missing panel url")]
#[test_case(json!({"panelUrl": "https://panel.example"}) ; "missing application id")]
#[test_case(json!({"panelUrl": null, "applicationId": "app-123"}) ; "null panel url")]
#[test_case(json!({"panelUrl": "", "applicationId": "app-123"}) ; "empty panel url")]
#[test_case(json!({"panelUrl": "https://panel.example", "applicationId": "  "}) ; "blank application id")]
#[test_case(json!({"panelUrl": 7, "applicationId": "app-123"}) ; "numeric panel url")]
#[test_case(json!({"panelUrl": "https://panel.example", "applicationId": "app-123", "debug": "yes"}) ; "string debug flag")]
#[tokio::test]
async fn PushBridge___initialize_bad_arguments___invalid_arguments_without_sdk_call(
    arguments: serde_json::Value,
) {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);

    let reply = bridge
        .handle(MethodCall::from_value("initialize", arguments).unwrap())
        .await;

    assert_eq!(reply.failure_code(), Some("INVALID_ARGUMENTS"));
    assert_eq!(sdk.calls(Method::Initialize), 0);
}

#[test_case(Dialect::Flutter ; "flutter")]
#[test_case(Dialect::ReactNative ; "react native")]
#[tokio::test]
async fn PushBridge___initialize_without_context___context_error(dialect: Dialect) {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = PushBridge::builder(sdk.clone())
        .dialect(dialect)
        .worker_dispatcher(Arc::new(Handle::current()))
        .main_dispatcher(Arc::new(Handle::current()))
        .build()
        .unwrap();

    let reply = bridge.handle(initialize_call()).await;

    assert_eq!(
        reply,
        Reply::failure("CONTEXT_ERROR", Some("Context not available".to_string()))
    );
    assert_eq!(sdk.calls(Method::Initialize), 0);
}

#[test_case("setTags", "SET_TAGS_ERROR")]
#[test_case("removeTags", "REMOVE_TAGS_ERROR")]
#[test_case("clearTags", "CLEAR_TAGS_ERROR")]
#[test_case("getTags", "GET_TAGS_ERROR")]
#[test_case("getToken", "GET_TOKEN_ERROR")]
#[test_case("refreshToken", "REFRESH_TOKEN_ERROR")]
#[test_case("areNotificationsEnabled", "NOTIFICATIONS_ENABLED_ERROR")]
#[tokio::test]
async fn PushBridge___before_initialize___fails_with_method_code(method: &str, code: &str) {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);

    let reply = bridge.handle(MethodCall::new(method)).await;

    assert_eq!(
        reply,
        Reply::failure(code, Some("LaraPush is not initialized".to_string()))
    );
}

#[tokio::test]
async fn PushBridge___tag_operations___follow_sdk_state() {
    let (_sdk, bridge) = initialized(Dialect::Flutter).await;

    let set = bridge
        .handle(MethodCall::new("setTags").with_argument("tags", json!(["vip", "beta"])))
        .await;
    let removed = bridge
        .handle(MethodCall::new("removeTags").with_argument("tags", json!(["beta"])))
        .await;
    let tags = bridge.handle(MethodCall::new("getTags")).await;

    assert_eq!(set, Reply::Success(json!(true)));
    assert_eq!(removed, Reply::Success(json!(true)));
    assert_eq!(tags, Reply::Success(json!(["vip"])));
}

#[tokio::test]
async fn PushBridge___set_tags_without_argument___sends_empty_list() {
    let (sdk, bridge) = initialized(Dialect::Flutter).await;

    let reply = bridge.handle(MethodCall::new("setTags")).await;

    assert!(reply.is_success());
    assert_eq!(sdk.calls(Method::SetTags), 1);
}

#[test_case(json!("vip") ; "string instead of list")]
#[test_case(json!([1, 2]) ; "list of numbers")]
#[test_case(json!({"tag": "vip"}) ; "map")]
#[tokio::test]
async fn PushBridge___set_tags_wrong_type___invalid_arguments(tags: serde_json::Value) {
    let (sdk, bridge) = initialized(Dialect::Flutter).await;

    let reply = bridge
        .handle(MethodCall::new("setTags").with_argument("tags", tags))
        .await;

    assert_eq!(reply.failure_code(), Some("INVALID_ARGUMENTS"));
    assert_eq!(sdk.calls(Method::SetTags), 0);
}

#[tokio::test]
async fn PushBridge___get_token___returns_issued_token() {
    let (_sdk, bridge) = initialized(Dialect::Flutter).await;

    let reply = bridge.handle(MethodCall::new("getToken")).await;

    assert_eq!(reply, Reply::Success(json!("lp-app-123-0001")));
}

#[tokio::test]
async fn PushBridge___refresh_token___replaces_token() {
    let (_sdk, bridge) = initialized(Dialect::Flutter).await;

    let refreshed = bridge.handle(MethodCall::new("refreshToken")).await;
    let token = bridge.handle(MethodCall::new("getToken")).await;

    assert_eq!(refreshed, Reply::Success(json!(true)));
    assert_eq!(token, Reply::Success(json!("lp-app-123-0002")));
}

#[tokio::test]
async fn PushBridge___are_notifications_enabled___reports_sdk_flag() {
    let (sdk, bridge) = initialized(Dialect::Flutter).await;
    sdk.set_notifications_enabled(false);

    let reply = bridge
        .handle(MethodCall::new("areNotificationsEnabled"))
        .await;

    assert_eq!(reply, Reply::Success(json!(false)));
}

#[test_case(Method::SetTags, Dialect::Flutter, "SET_TAGS_ERROR")]
#[test_case(Method::RemoveTags, Dialect::Flutter, "REMOVE_TAGS_ERROR")]
#[test_case(Method::ClearTags, Dialect::Flutter, "CLEAR_TAGS_ERROR")]
#[test_case(Method::GetTags, Dialect::Flutter, "GET_TAGS_ERROR")]
#[test_case(Method::GetToken, Dialect::Flutter, "GET_TOKEN_ERROR")]
#[test_case(Method::RefreshToken, Dialect::Flutter, "REFRESH_TOKEN_ERROR")]
#[test_case(Method::AreNotificationsEnabled, Dialect::Flutter, "NOTIFICATIONS_ENABLED_ERROR")]
#[test_case(Method::AreNotificationsEnabled, Dialect::ReactNative, "NOTIFICATIONS_ERROR")]
#[test_case(Method::GetTags, Dialect::ReactNative, "GET_TAGS_ERROR")]
#[tokio::test]
async fn PushBridge___sdk_failure___maps_to_method_code(
    method: Method,
    dialect: Dialect,
    code: &str,
) {
    let (sdk, bridge) = initialized(dialect).await;
    sdk.fail_next(method, Some("sdk exploded"));

    let reply = bridge.handle(MethodCall::new(method.name())).await;

    assert_eq!(
        reply,
        Reply::failure(code, Some("sdk exploded".to_string()))
    );
}

#[tokio::test]
async fn PushBridge___initialize_sdk_failure___init_error() {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);
    sdk.fail_next(Method::Initialize, None);

    let reply = bridge.handle(initialize_call()).await;

    assert_eq!(reply, Reply::failure("INIT_ERROR", None));
}

#[tokio::test]
async fn PushBridge___sdk_panic___becomes_failure_reply() {
    let (sdk, bridge) = initialized(Dialect::Flutter).await;
    sdk.panic_next(Method::GetTags);

    let reply = bridge.handle(MethodCall::new("getTags")).await;

    match reply {
        Reply::Failure { code, message, .. } => {
            assert_eq!(code, "GET_TAGS_ERROR");
            assert!(message.unwrap().contains("injected panic in getTags"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn PushBridge___after_panic___keeps_serving_calls() {
    let (sdk, bridge) = initialized(Dialect::Flutter).await;
    sdk.panic_next(Method::GetToken);
    bridge.handle(MethodCall::new("getToken")).await;

    let reply = bridge.handle(MethodCall::new("getToken")).await;

    assert!(reply.is_success());
}

#[tokio::test]
async fn PushBridge___detached___refuses_calls_without_sdk_call() {
    let (sdk, bridge) = initialized(Dialect::Flutter).await;
    let before = sdk.total_calls();
    assert!(bridge.mark_detached());

    let reply = bridge.handle(MethodCall::new("getTags")).await;

    assert_eq!(reply.failure_code(), Some("CHANNEL_DETACHED"));
    assert_eq!(sdk.total_calls(), before);
}

#[tokio::test]
async fn PushBridge___mark_detached_twice___second_is_noop() {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);

    assert!(bridge.mark_detached());
    assert!(!bridge.mark_detached());
    assert_eq!(bridge.state(), ChannelState::Detached);
}

#[tokio::test]
async fn PushBridge___mark_attached_after_detach___fails() {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);
    bridge.mark_detached();

    let result = bridge.mark_attached();

    assert!(matches!(result, Err(BridgeError::Detached)));
}

#[test_case("setTags", "main")]
#[test_case("removeTags", "main")]
#[test_case("clearTags", "main")]
#[test_case("getToken", "main")]
#[test_case("refreshToken", "main")]
#[test_case("initialize", "worker")]
#[test_case("getTags", "worker")]
#[test_case("areNotificationsEnabled", "worker")]
#[test_case("unknown", "worker")]
#[tokio::test]
async fn PushBridge___dispatcher_for___routes_by_method(method: &str, label: &str) {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = bridge(&sdk, Dialect::Flutter);

    assert_eq!(bridge.dispatcher_for(method).label(), label);
}

#[tokio::test]
async fn PushBridge___main_thread_dispatch_disabled___routes_everything_to_worker() {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let config = BridgeConfig {
        main_thread_dispatch: false,
        ..BridgeConfig::default()
    };
    let bridge = PushBridge::builder(sdk)
        .config(&config)
        .worker_dispatcher(Arc::new(Named("worker", Handle::current())))
        .build()
        .unwrap();

    assert_eq!(bridge.dispatcher_for("setTags").label(), "worker");
}

#[tokio::test]
async fn PushBridge___on_method_call___replies_through_sink() {
    let (_sdk, bridge) = initialized(Dialect::Flutter).await;
    let (sink, receiver) = ReplySink::channel("setTags");

    bridge.on_method_call(
        MethodCall::new("setTags").with_argument("tags", json!(["vip"])),
        sink,
    );

    assert_eq!(receiver.recv().await, Reply::Success(json!(true)));
}

#[tokio::test(flavor = "multi_thread")]
async fn PushBridge___default_executors___serve_main_thread_calls() {
    let sdk = Arc::new(InMemoryPushSdk::new());
    let bridge = PushBridge::builder(sdk)
        .context(Arc::new(FixedContext::new(HostContext::new("application"))))
        .build()
        .unwrap();
    let (sink, receiver) = ReplySink::channel("initialize");
    bridge.on_method_call(initialize_call(), sink);
    assert!(receiver.recv().await.is_success());

    let (sink, receiver) = ReplySink::channel("clearTags");
    bridge.on_method_call(MethodCall::new("clearTags"), sink);

    assert_eq!(receiver.recv().await, Reply::Success(json!(true)));
    assert_eq!(bridge.dispatcher_for("clearTags").label(), MAIN_THREAD_NAME);
}

#[test]
fn PushBridge___built_outside_runtime___starts_own_worker() {
    let sdk = Arc::new(InMemoryPushSdk::new());

    let bridge = PushBridge::builder(sdk).build().unwrap();

    assert_eq!(bridge.dispatcher_for("getTags").label(), "larapush-worker");
    assert_eq!(bridge.state(), ChannelState::Created);
}

/// Delegates to the in-memory SDK and notes the thread of every call
#[derive(Default)]
struct ThreadRecordingSdk {
    inner: InMemoryPushSdk,
    threads: parking_lot::Mutex<Vec<(&'static str, String)>>,
}

impl ThreadRecordingSdk {
    fn record(&self, method: &'static str) {
        let thread = std::thread::current().name().unwrap_or_default().to_string();
        self.threads.lock().push((method, thread));
    }

    fn thread_of(&self, method: &str) -> Option<String> {
        self.threads
            .lock()
            .iter()
            .find(|(name, _)| *name == method)
            .map(|(_, thread)| thread.clone())
    }
}

#[async_trait]
impl PushSdk for ThreadRecordingSdk {
    async fn init(&self, context: &HostContext, config: PushConfig) -> SdkResult<()> {
        self.record("initialize");
        self.inner.init(context, config).await
    }

    async fn set_tags(&self, tags: &[String]) -> SdkResult<()> {
        self.record("setTags");
        self.inner.set_tags(tags).await
    }

    async fn remove_tags(&self, tags: &[String]) -> SdkResult<()> {
        self.record("removeTags");
        self.inner.remove_tags(tags).await
    }

    async fn clear_tags(&self) -> SdkResult<()> {
        self.record("clearTags");
        self.inner.clear_tags().await
    }

    async fn get_tags(&self) -> SdkResult<Vec<String>> {
        self.record("getTags");
        self.inner.get_tags().await
    }

    async fn get_token(&self) -> SdkResult<Option<String>> {
        self.record("getToken");
        self.inner.get_token().await
    }

    async fn refresh_token(&self) -> SdkResult<()> {
        self.record("refreshToken");
        self.inner.refresh_token().await
    }

    async fn are_notifications_enabled(&self) -> SdkResult<bool> {
        self.record("areNotificationsEnabled");
        self.inner.are_notifications_enabled().await
    }
}

#[test_case("setTags", true)]
#[test_case("removeTags", true)]
#[test_case("clearTags", true)]
#[test_case("getToken", true)]
#[test_case("refreshToken", true)]
#[test_case("initialize", false)]
#[test_case("getTags", false)]
#[test_case("areNotificationsEnabled", false)]
#[tokio::test(flavor = "multi_thread")]
async fn PushBridge___channel_call___sdk_runs_on_routed_thread(method: &str, on_main: bool) {
    let sdk = Arc::new(ThreadRecordingSdk::default());
    let bridge = PushBridge::builder(sdk.clone())
        .context(Arc::new(FixedContext::new(HostContext::new("application"))))
        .build()
        .unwrap();
    let registry = ChannelRegistry::new();
    let handler: Arc<dyn MethodCallHandler> = Arc::new(bridge);
    registry.set_handler("larapush", Some(handler));
    let call = match method {
        "initialize" => initialize_call(),
        other => MethodCall::new(other),
    };

    registry.invoke("larapush", call).await.unwrap();

    let thread = sdk.thread_of(method).expect("SDK should be reached");
    assert_eq!(thread == MAIN_THREAD_NAME, on_main, "{method} ran on {thread}");
}
