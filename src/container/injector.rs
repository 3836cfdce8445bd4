//! Dependency resolution.

use crate::container::descriptor::{InjectOutcome, InjectionPoint};
use crate::container::naming::{lower_first, simple_name};
use crate::container::registry::{Registration, Registry};
use crate::lifecycle::BootError;

/// Summary of one injection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
    /// Fields that received a bean.
    pub wired: usize,
    /// `component.field` for every field left unset.
    pub unresolved: Vec<String>,
}

/// Bean name an injection point resolves against.
pub fn target_name(point: &InjectionPoint) -> String {
    match &point.qualifier {
        Some(name) if !name.is_empty() => name.clone(),
        _ => lower_first(simple_name(point.declared_type)),
    }
}

/// Wires every injection point of every registered component.
///
/// Single pass over components in discovery order. A target name with no
/// binding leaves the field unset unless `strict` is set, in which case it
/// aborts with [`BootError::UnresolvedDependency`]. A binding whose type
/// does not fit the field always aborts.
pub fn inject(registry: &Registry, strict: bool) -> Result<InjectionReport, BootError> {
    let mut report = InjectionReport::default();

    for component in registry.components() {
        for point in &component.descriptor.injections {
            let bean = target_name(point);
            let Some(view) = registry.view(&bean) else {
                if strict {
                    return Err(unresolved(component, point, bean));
                }
                tracing::debug!(
                    component = %component.name,
                    field = point.field,
                    bean = %bean,
                    "No bean for injection point, field left unset"
                );
                report.unresolved.push(format!("{}.{}", component.name, point.field));
                continue;
            };

            match point.apply(&component.instance, view) {
                InjectOutcome::Wired => {
                    tracing::debug!(component = %component.name, field = point.field, bean = %bean, "Field wired");
                    report.wired += 1;
                }
                InjectOutcome::AlreadyWired => {}
                InjectOutcome::TypeMismatch => {
                    return Err(BootError::InjectionTypeMismatch {
                        component: component.name.clone(),
                        field: point.field.to_string(),
                        bean,
                    });
                }
            }
        }
    }

    Ok(report)
}

fn unresolved(component: &Registration, point: &InjectionPoint, bean: String) -> BootError {
    BootError::UnresolvedDependency {
        component: component.name.clone(),
        field: point.field.to_string(),
        bean,
    }
}
