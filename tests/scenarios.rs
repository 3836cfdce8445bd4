//! End-to-end behaviour of the startup and dispatch pipelines.

mod common;

use std::sync::Arc;

use common::{context, demo_app, get, CountingController};
use minimvc::container::{HandlerResult, Registry};
use minimvc::dispatch::{DispatchError, DispatchStatus, NOT_FOUND_BODY};
use minimvc::{
    demo, Application, Autowired, BootError, Catalog, ComponentDescriptor, HandlerMethod,
    Invocation, Reply, ScalarType,
};

#[test]
fn test_say_hello_writes_greeting() {
    let app = demo_app();
    let outcome = app.dispatch(&get("/hello/sayHello", &[("name", "Bob")]));

    assert_eq!(outcome.status, DispatchStatus::Ok);
    assert_eq!(outcome.body, "Hello!My name is Bob!");
    assert_eq!(outcome.handler.as_deref(), Some("helloController.sayHello"));
}

#[test]
fn test_add_writes_sum() {
    let app = demo_app();
    let outcome = app.dispatch(&get("/hello/add", &[("a", "3"), ("b", "4")]));

    assert_eq!(outcome.status, DispatchStatus::Ok);
    assert_eq!(outcome.body, "a + b = 7");
}

#[test]
fn test_add_with_non_integer_is_server_error() {
    let app = demo_app();
    let request = get("/hello/add", &[("a", "x"), ("b", "4")]);

    let outcome = app.dispatch(&request);
    assert_eq!(outcome.status, DispatchStatus::Failed);
    assert_eq!(outcome.status.http_code(), 500);
    assert!(outcome.body.starts_with("500 Exception, Detail: "));
    assert!(outcome.body.contains("'a'"));

    let err = app.dispatcher().try_dispatch(&request).unwrap_err();
    assert!(matches!(err, DispatchError::ParameterConversion { ref name, ref value, .. } if name == "a" && value == "x"));
}

trait Store: Send + Sync {}

#[derive(Default)]
struct MemoryStore;
impl Store for MemoryStore {}

#[derive(Default)]
struct DiskStore;
impl Store for DiskStore {}

#[test]
fn test_duplicate_interface_alias_aborts_startup() {
    let catalog = Catalog::new()
        .with(
            ComponentDescriptor::service::<MemoryStore>("MemoryStore")
                .namespace("app")
                .implements::<MemoryStore, dyn Store, _>("Store", |s| s as Arc<dyn Store>),
        )
        .with(
            ComponentDescriptor::service::<DiskStore>("DiskStore")
                .namespace("app")
                .implements::<DiskStore, dyn Store, _>("Store", |s| s as Arc<dyn Store>),
        );
    let config = minimvc::config::ContextConfig {
        scan_package: "app".to_string(),
        ..context("")
    };

    match Application::bootstrap(&catalog, &config) {
        Err(BootError::DuplicateBinding { name, .. }) => assert_eq!(name, "store"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("startup should have failed"),
    }
}

fn counting_catalog() -> Catalog {
    Catalog::new().with(
        ComponentDescriptor::controller::<CountingController>("CountingController")
            .namespace("app.web")
            .request_mapping("/count")
            .route(HandlerMethod::new("one", "/one", CountingController::hit))
            .route(HandlerMethod::new("two", "/two", CountingController::hit)),
    )
}

fn app_config() -> minimvc::config::ContextConfig {
    minimvc::config::ContextConfig {
        scan_package: "app".to_string(),
        ..context("")
    }
}

fn counter(registry: &Registry) -> Arc<CountingController> {
    registry.resolve::<CountingController>("countingController").unwrap()
}

#[test]
fn test_unregistered_path_is_not_found_and_runs_nothing() {
    let app = Application::bootstrap(&counting_catalog(), &app_config()).unwrap();

    for path in ["/missing", "/count", "/count/one/extra", "/count/three"] {
        let outcome = app.dispatch(&get(path, &[]));
        assert_eq!(outcome.status, DispatchStatus::NotFound, "{path}");
        assert_eq!(outcome.body, NOT_FOUND_BODY);
        assert!(outcome.handler.is_none());
    }
    assert_eq!(counter(app.registry()).count(), 0);

    let outcome = app.dispatch(&get("/count/two", &[]));
    assert_eq!(outcome.body, "1");
    assert_eq!(counter(app.registry()).count(), 1);
}

#[derive(Default)]
struct OverlapController;

impl OverlapController {
    fn first(&self, _inv: &mut Invocation<'_>) -> HandlerResult {
        Ok(Reply::body("first"))
    }

    fn second(&self, _inv: &mut Invocation<'_>) -> HandlerResult {
        Ok(Reply::body("second"))
    }
}

fn overlap_app(wildcard_first: bool) -> Application {
    let wildcard = HandlerMethod::new("wildcard", "/.*", OverlapController::first);
    let literal = HandlerMethod::new("literal", "/item", OverlapController::second);
    let (p1, p2) = if wildcard_first {
        (wildcard, literal)
    } else {
        (literal, wildcard)
    };

    let catalog = Catalog::new().with(
        ComponentDescriptor::controller::<OverlapController>("OverlapController")
            .namespace("app")
            .request_mapping("/order")
            .route(p1)
            .route(p2),
    );
    Application::bootstrap(&catalog, &app_config()).unwrap()
}

#[test]
fn test_overlapping_patterns_first_inserted_wins() {
    let app = overlap_app(true);
    for _ in 0..10 {
        let outcome = app.dispatch(&get("/order/item", &[]));
        assert_eq!(outcome.body, "first");
        assert_eq!(outcome.handler.as_deref(), Some("overlapController.wildcard"));
    }

    let app = overlap_app(false);
    assert_eq!(app.dispatch(&get("/order/item", &[])).body, "second");
    assert_eq!(app.dispatch(&get("/order/other", &[])).body, "first");
}

#[test]
fn test_multi_value_parameters_are_joined() {
    let app = demo_app();
    let outcome = app.dispatch(&get("/hello/add", &[("a", "1"), ("a", "2"), ("b", "3")]));
    assert_eq!(outcome.body, "a + b = 15");

    let outcome = app.dispatch(&get("/hello/sayHello", &[("name", "Bob Smith")]));
    assert_eq!(outcome.body, "Hello!My name is BobSmith!");
}

#[test]
fn test_context_path_is_stripped_and_path_normalized() {
    let app = Application::bootstrap(&demo::catalog(), &context("/app")).unwrap();

    let outcome = app.dispatch(&get("/app//hello///sayHello", &[("name", "Ann")]));
    assert_eq!(outcome.body, "Hello!My name is Ann!");
    assert_eq!(app.dispatch(&get("/hello/sayHello", &[("name", "Ann")])).body, "Hello!My name is Ann!");
    assert_eq!(app.dispatch(&get("/application/hello/sayHello", &[])).status, DispatchStatus::NotFound);
}

#[test]
fn test_missing_parameter_is_server_error() {
    let app = demo_app();
    let outcome = app.dispatch(&get("/hello/add", &[("a", "3")]));

    assert_eq!(outcome.status, DispatchStatus::Failed);
    assert!(outcome.body.contains("argument 3 is not bound"), "{}", outcome.body);
}

#[test]
fn test_returned_value_becomes_body() {
    let app = demo_app();
    let outcome = app.dispatch(&get("/hello/greeting", &[("name", "Cy")]));
    assert_eq!(outcome.body, "Hello!My name is Cy!");
}

#[derive(Default)]
struct FragileController;

impl FragileController {
    fn boom(&self, _inv: &mut Invocation<'_>) -> HandlerResult {
        panic!("fragile handler exploded");
    }

    fn ok(&self, _inv: &mut Invocation<'_>) -> HandlerResult {
        Ok(Reply::body("still serving"))
    }
}

#[test]
fn test_handler_panic_is_contained() {
    let catalog = Catalog::new().with(
        ComponentDescriptor::controller::<FragileController>("FragileController")
            .namespace("app")
            .route(HandlerMethod::new("boom", "/boom", FragileController::boom))
            .route(HandlerMethod::new("ok", "/ok", FragileController::ok)),
    );
    let app = Application::bootstrap(&catalog, &app_config()).unwrap();

    let outcome = app.dispatch(&get("/boom", &[]));
    assert_eq!(outcome.status, DispatchStatus::Failed);
    assert!(outcome.body.contains("fragile handler exploded"));

    let outcome = app.dispatch(&get("/ok", &[]));
    assert_eq!(outcome.status, DispatchStatus::Ok);
    assert_eq!(outcome.body, "still serving");
}

#[test]
fn test_demo_routes_compiled_once_each() {
    let app = demo_app();
    let patterns: Vec<&str> = app.routes().routes().iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, ["/hello/sayHello", "/hello/add", "/hello/greeting"]);

    let registry = app.registry();
    assert!(registry.contains("helloController"));
    assert!(registry.contains("defaultHelloService"));
    assert!(registry.contains("helloService"));
    assert_eq!(app.injection_report().wired, 1);
}

trait Mailer: Send + Sync {}

#[derive(Default)]
struct Signup {
    mailer: Autowired<dyn Mailer>,
}

impl Signup {
    fn status(&self, _inv: &mut Invocation<'_>) -> HandlerResult {
        Ok(Reply::body(self.mailer.is_wired()))
    }
}

fn signup_catalog() -> Catalog {
    Catalog::new().with(
        ComponentDescriptor::controller::<Signup>("Signup")
            .namespace("app")
            .autowired("mailer", "Mailer", None, |s: &Signup| &s.mailer)
            .route(HandlerMethod::new("status", "/signup", Signup::status)),
    )
}

#[test]
fn test_unresolved_dependency_is_silent_unless_strict() {
    let app = Application::bootstrap(&signup_catalog(), &app_config()).unwrap();
    assert_eq!(app.injection_report().unresolved, ["signup.mailer"]);
    assert_eq!(app.dispatch(&get("/signup", &[])).body, "false");

    let strict = minimvc::config::ContextConfig {
        strict_injection: true,
        ..app_config()
    };
    assert!(matches!(
        Application::bootstrap(&signup_catalog(), &strict),
        Err(BootError::UnresolvedDependency { ref bean, .. }) if bean == "mailer"
    ));
}

#[test]
fn test_unknown_scan_root_aborts_startup() {
    let config = minimvc::config::ContextConfig {
        scan_package: "nowhere".to_string(),
        ..context("")
    };
    assert!(matches!(
        Application::bootstrap(&demo::catalog(), &config),
        Err(BootError::NamespaceNotFound(ref ns)) if ns == "nowhere"
    ));
}

#[test]
fn test_text_parameter_binding_is_positional() {
    #[derive(Default)]
    struct Echo;
    impl Echo {
        fn echo(&self, inv: &mut Invocation<'_>) -> HandlerResult {
            Ok(Reply::body(format!("{}-{}", inv.text(0)?, inv.integer(1)?)))
        }
    }

    let catalog = Catalog::new().with(
        ComponentDescriptor::controller::<Echo>("Echo")
            .namespace("app")
            .route(
                HandlerMethod::new("echo", "/echo", Echo::echo)
                    .param("word", ScalarType::Text)
                    .param("n", ScalarType::Integer),
            ),
    );
    let app = Application::bootstrap(&catalog, &app_config()).unwrap();
    let outcome = app.dispatch(&get("/echo", &[("n", "-5"), ("word", "hi")]));
    assert_eq!(outcome.body, "hi--5");
}

#[derive(Default)]
struct Anchor;
#[derive(Default)]
struct Early;
#[derive(Default)]
struct Late;

fn tagged<T: 'static>(
    tag: &'static str,
) -> impl Fn(&T, &mut Invocation<'_>) -> HandlerResult + Send + Sync + 'static {
    move |_, _| Ok(Reply::body(tag))
}

#[test]
fn test_route_order_follows_registration_across_namespaces() {
    // `app.web` exists before Early registers in `app`, so a namespace walk
    // would place Late ahead of Early.
    let catalog = Catalog::new()
        .with(
            ComponentDescriptor::controller::<Anchor>("Anchor")
                .namespace("app.web")
                .route(HandlerMethod::new("h", "/anchor", tagged::<Anchor>("anchor"))),
        )
        .with(
            ComponentDescriptor::controller::<Early>("Early")
                .namespace("app")
                .route(HandlerMethod::new("h", "/x/.*", tagged::<Early>("early"))),
        )
        .with(
            ComponentDescriptor::controller::<Late>("Late")
                .namespace("app.web")
                .route(HandlerMethod::new("h", "/x/y", tagged::<Late>("late"))),
        );
    let app = Application::bootstrap(&catalog, &app_config()).unwrap();

    let order: Vec<String> = app.routes().routes().iter().map(|r| r.handler_name()).collect();
    assert_eq!(order, ["anchor.h", "early.h", "late.h"]);
    assert_eq!(app.dispatch(&get("/x/y", &[])).body, "early");
}

#[derive(Default)]
struct Quiet;

impl Quiet {
    fn written(&self, inv: &mut Invocation<'_>) -> HandlerResult {
        inv.response(0)?.write("written");
        Ok(Reply::body("returned"))
    }

    fn silent(&self, _inv: &mut Invocation<'_>) -> HandlerResult {
        Ok(Reply::body("returned"))
    }
}

#[test]
fn test_void_handler_return_value_is_discarded() {
    let catalog = Catalog::new().with(
        ComponentDescriptor::controller::<Quiet>("Quiet")
            .namespace("app")
            .route(
                HandlerMethod::new("written", "/written", Quiet::written)
                    .response()
                    .returns_void(),
            )
            .route(HandlerMethod::new("silent", "/silent", Quiet::silent).returns_void()),
    );
    let app = Application::bootstrap(&catalog, &app_config()).unwrap();

    let outcome = app.dispatch(&get("/written", &[]));
    assert_eq!(outcome.status, DispatchStatus::Ok);
    assert_eq!(outcome.body, "written");

    let outcome = app.dispatch(&get("/silent", &[]));
    assert_eq!(outcome.status, DispatchStatus::Ok);
    assert_eq!(outcome.body, "");
}
