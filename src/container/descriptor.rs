//! Component descriptors.
//!
//! A descriptor is the static stand-in for what an annotated class carries:
//! capability tag, bean name, implemented interfaces, injection points and
//! routable methods. Descriptors are built with [`ComponentDescriptor`]'s
//! typed builder so every closure they hold is checked against the concrete
//! component type at compile time, then erased for the startup pipeline.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::dispatch::context::{Invocation, Reply};

/// A type-erased, shareable component instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Result type returned by handler methods.
pub type HandlerResult = anyhow::Result<Reply>;

type Constructor = fn() -> (Instance, Instance);
type ViewFn = Arc<dyn Fn(&Instance) -> Option<Instance> + Send + Sync>;
type ApplyFn = Arc<dyn Fn(&Instance, &Instance) -> InjectOutcome + Send + Sync>;
type InvokeFn = Arc<dyn Fn(&Instance, &mut Invocation<'_>) -> HandlerResult + Send + Sync>;

/// Capability tag carried by a component type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stereotype {
    /// Routable component.
    Controller,
    /// Shared logic, optionally registered under an explicit bean name.
    Service { name: Option<String> },
}

/// Scalar target type of a query-parameter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Text,
    Integer,
}

/// Declared kind of one handler argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentSpec {
    /// Receives the request context.
    Request,
    /// Receives the response context.
    Response,
    /// Bound from the named query parameter.
    Query { name: String, target: ScalarType },
}

/// Declared return of a handler method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Void,
    Value,
}

/// A single-assignment injection slot.
///
/// Filled at most once during startup, read-only afterwards.
pub struct Autowired<T: ?Sized> {
    cell: OnceLock<Arc<T>>,
}

impl<T: ?Sized> Autowired<T> {
    /// Create an empty, unwired slot.
    pub fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    /// The injected bean, if the resolver found one.
    pub fn get(&self) -> Option<&Arc<T>> {
        self.cell.get()
    }

    /// Whether a bean has been injected.
    pub fn is_wired(&self) -> bool {
        self.cell.get().is_some()
    }

    pub(crate) fn set(&self, value: Arc<T>) -> bool {
        self.cell.set(value).is_ok()
    }
}

impl<T: ?Sized> Default for Autowired<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Autowired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autowired")
            .field("wired", &self.is_wired())
            .finish()
    }
}

/// Outcome of applying one injection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InjectOutcome {
    Wired,
    AlreadyWired,
    TypeMismatch,
}

/// A capability interface the component is exposed under.
#[derive(Clone)]
pub struct InterfaceBinding {
    pub name: &'static str,
    view: ViewFn,
}

impl InterfaceBinding {
    pub(crate) fn view(&self, instance: &Instance) -> Option<Instance> {
        (self.view)(instance)
    }
}

impl fmt::Debug for InterfaceBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InterfaceBinding").field(&self.name).finish()
    }
}

/// A field tagged for injection.
#[derive(Clone)]
pub struct InjectionPoint {
    pub field: &'static str,
    /// Declared type name of the field; may be dotted.
    pub declared_type: &'static str,
    /// Explicit bean name carried by the injection marker.
    pub qualifier: Option<String>,
    apply: ApplyFn,
}

impl InjectionPoint {
    pub(crate) fn apply(&self, target: &Instance, view: &Instance) -> InjectOutcome {
        (self.apply)(target, view)
    }
}

impl fmt::Debug for InjectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("field", &self.field)
            .field("declared_type", &self.declared_type)
            .field("qualifier", &self.qualifier)
            .finish()
    }
}

/// A method carrying a route marker.
#[derive(Clone)]
pub struct HandlerMethod {
    pub name: &'static str,
    pub path: String,
    pub arguments: Vec<ArgumentSpec>,
    pub returns: ReturnKind,
    invoke: InvokeFn,
}

impl HandlerMethod {
    /// Declares a routable method on component `T`.
    ///
    /// Arguments are declared afterwards, in positional order.
    pub fn new<T, F>(name: &'static str, path: impl Into<String>, handler: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &mut Invocation<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        let invoke: InvokeFn = Arc::new(move |instance: &Instance, invocation: &mut Invocation<'_>| {
            let component = (**instance).downcast_ref::<T>().ok_or_else(|| {
                anyhow::anyhow!(
                    "handler {} bound to an instance of the wrong type",
                    name
                )
            })?;
            handler(component, invocation)
        });

        Self {
            name,
            path: path.into(),
            arguments: Vec::new(),
            returns: ReturnKind::Value,
            invoke,
        }
    }

    /// Next argument receives the request context.
    pub fn request(mut self) -> Self {
        self.arguments.push(ArgumentSpec::Request);
        self
    }

    /// Next argument receives the response context.
    pub fn response(mut self) -> Self {
        self.arguments.push(ArgumentSpec::Response);
        self
    }

    /// Next argument is bound from the query parameter `name`.
    pub fn param(mut self, name: impl Into<String>, target: ScalarType) -> Self {
        self.arguments.push(ArgumentSpec::Query {
            name: name.into(),
            target,
        });
        self
    }

    pub fn returns_void(mut self) -> Self {
        self.returns = ReturnKind::Void;
        self
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    pub(crate) fn invoke(&self, instance: &Instance, invocation: &mut Invocation<'_>) -> HandlerResult {
        (self.invoke)(instance, invocation)
    }

    /// `name(Request, Response, name: Text)`-style signature for logs.
    pub fn signature(&self) -> String {
        let args: Vec<String> = self
            .arguments
            .iter()
            .map(|arg| match arg {
                ArgumentSpec::Request => "Request".to_string(),
                ArgumentSpec::Response => "Response".to_string(),
                ArgumentSpec::Query { name, target } => format!("{}: {:?}", name, target),
            })
            .collect();
        let ret = match self.returns {
            ReturnKind::Void => "",
            ReturnKind::Value => " -> Value",
        };
        format!("{}({}){}", self.name, args.join(", "), ret)
    }
}

impl fmt::Debug for HandlerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerMethod")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("arguments", &self.arguments)
            .field("returns", &self.returns)
            .finish()
    }
}

/// Static metadata for one component type.
#[derive(Clone)]
pub struct ComponentDescriptor {
    /// Simple type name, e.g. `HelloController`.
    pub type_name: &'static str,
    /// Dotted namespace the type lives in, e.g. `demo.controller`.
    pub namespace: String,
    /// `None` for untagged types, which the factory ignores.
    pub stereotype: Option<Stereotype>,
    /// Type-level route value; empty when absent.
    pub base_path: String,
    pub interfaces: Vec<InterfaceBinding>,
    pub injections: Vec<InjectionPoint>,
    pub methods: Vec<HandlerMethod>,
    construct: Constructor,
}

impl ComponentDescriptor {
    fn of<T>(type_name: &'static str, stereotype: Option<Stereotype>) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self {
            type_name,
            namespace: String::new(),
            stereotype,
            base_path: String::new(),
            interfaces: Vec::new(),
            injections: Vec::new(),
            methods: Vec::new(),
            construct: construct::<T>,
        }
    }

    /// A type tagged as a controller.
    pub fn controller<T>(type_name: &'static str) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self::of::<T>(type_name, Some(Stereotype::Controller))
    }

    /// A type tagged as a service.
    pub fn service<T>(type_name: &'static str) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self::of::<T>(type_name, Some(Stereotype::Service { name: None }))
    }

    /// A type with no capability tag.
    pub fn plain<T>(type_name: &'static str) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self::of::<T>(type_name, None)
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Explicit bean name; only meaningful on services.
    pub fn named(mut self, bean_name: impl Into<String>) -> Self {
        if let Some(Stereotype::Service { name }) = &mut self.stereotype {
            *name = Some(bean_name.into());
        }
        self
    }

    /// Type-level route value.
    pub fn request_mapping(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Exposes the component under interface `I`.
    ///
    /// `upcast` turns the concrete instance into the interface object,
    /// usually `|svc| svc as Arc<dyn Trait>`.
    pub fn implements<T, I, F>(mut self, interface: &'static str, upcast: F) -> Self
    where
        T: Send + Sync + 'static,
        I: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        let view: ViewFn = Arc::new(move |instance: &Instance| {
            let concrete = instance.clone().downcast::<T>().ok()?;
            let exposed: Arc<I> = upcast(concrete);
            Some(Arc::new(exposed) as Instance)
        });
        self.interfaces.push(InterfaceBinding { name: interface, view });
        self
    }

    /// Declares an injection point on field `field` of `T`.
    ///
    /// The target is resolved by `qualifier` when given, otherwise by the
    /// lower-camel-cased `declared_type`.
    pub fn autowired<T, U>(
        mut self,
        field: &'static str,
        declared_type: &'static str,
        qualifier: Option<&str>,
        slot: fn(&T) -> &Autowired<U>,
    ) -> Self
    where
        T: Send + Sync + 'static,
        U: ?Sized + Send + Sync + 'static,
    {
        let apply: ApplyFn = Arc::new(move |target: &Instance, view: &Instance| {
            let Some(component) = (**target).downcast_ref::<T>() else {
                return InjectOutcome::TypeMismatch;
            };
            let Some(bean) = (**view).downcast_ref::<Arc<U>>() else {
                return InjectOutcome::TypeMismatch;
            };
            if slot(component).set(bean.clone()) {
                InjectOutcome::Wired
            } else {
                InjectOutcome::AlreadyWired
            }
        });
        self.injections.push(InjectionPoint {
            field,
            declared_type,
            qualifier: qualifier.map(str::to_string),
            apply,
        });
        self
    }

    /// Adds a routable method. Declaration order is route evaluation order.
    pub fn route(mut self, method: HandlerMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Fully qualified type name, `namespace.TypeName`.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.type_name.to_string()
        } else {
            format!("{}.{}", self.namespace, self.type_name)
        }
    }

    pub fn is_controller(&self) -> bool {
        matches!(self.stereotype, Some(Stereotype::Controller))
    }

    /// Builds a new instance.
    ///
    /// Returns the instance itself and its view under the primary bean
    /// name, an `Arc<T>` boxed as `Any`.
    pub(crate) fn construct(&self) -> (Instance, Instance) {
        (self.construct)()
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_name", &self.type_name)
            .field("namespace", &self.namespace)
            .field("stereotype", &self.stereotype)
            .field("base_path", &self.base_path)
            .field("interfaces", &self.interfaces)
            .field("injections", &self.injections)
            .field("methods", &self.methods)
            .finish()
    }
}

fn construct<T: Default + Send + Sync + 'static>() -> (Instance, Instance) {
    let concrete = Arc::new(T::default());
    (concrete.clone() as Instance, Arc::new(concrete) as Instance)
}
