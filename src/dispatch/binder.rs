//! Parameter binding.
//!
//! Builds the positional argument array for one dispatch from the route's
//! bindings and the request's query parameters.

use crate::container::descriptor::ScalarType;
use crate::dispatch::context::{Argument, QueryParams};
use crate::dispatch::error::DispatchError;
use crate::routing::route::{BindingSource, RouteEntry};

/// Collapses a multi-valued parameter into one raw string.
///
/// Values are concatenated with no separator and every whitespace
/// character is dropped, so `["1", "2"]` becomes `"12"` and `"Bob Smith"`
/// becomes `"BobSmith"`.
pub fn join_values(values: &[String]) -> String {
    values
        .iter()
        .flat_map(|v| v.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Converts a raw value to the binding's target type.
pub fn convert(name: &str, raw: String, target: ScalarType) -> Result<Argument, DispatchError> {
    match target {
        ScalarType::Text => Ok(Argument::Text(raw)),
        ScalarType::Integer => raw
            .parse::<i64>()
            .map(Argument::Integer)
            .map_err(|source| DispatchError::ParameterConversion {
                name: name.to_string(),
                value: raw,
                source,
            }),
    }
}

/// Resolves every binding of `route` against `query`.
///
/// Query bindings with no matching parameter stay [`Argument::Unbound`].
pub fn bind(route: &RouteEntry, query: &QueryParams) -> Result<Vec<Argument>, DispatchError> {
    let mut args = vec![Argument::Unbound; route.arity()];

    for binding in &route.bindings {
        let Some(slot) = args.get_mut(binding.index) else {
            continue;
        };
        *slot = match &binding.source {
            BindingSource::RequestContext => Argument::Request,
            BindingSource::ResponseContext => Argument::Response,
            BindingSource::QueryParam { name, target } => match query.get_all(name) {
                Some(values) => convert(name, join_values(values), *target)?,
                None => Argument::Unbound,
            },
        };
    }

    Ok(args)
}
