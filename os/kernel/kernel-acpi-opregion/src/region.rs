use kernel_acpi::{Namespace, OperationRegion, RegionError};
use log::warn;

/// The `OperationRegion` object held by `node`.
///
/// The interpreter only attaches handlers to region nodes; anything else is
/// rejected as an invalid argument.
pub(crate) fn operation_region<N: Namespace>(
    namespace: &N,
    node: N::Node,
) -> Result<OperationRegion, RegionError> {
    namespace.operation_region(node).ok_or_else(|| {
        let error = RegionError::InvalidArgument;
        trace_region_error(namespace, node, "no operation region object at", error);
        error
    })
}

/// Report a failure to serve the region at `node`.
pub(crate) fn trace_region_error<N: Namespace>(
    namespace: &N,
    node: N::Node,
    message: &str,
    error: RegionError,
) {
    warn!("{message} region {}: {error}", namespace.name(node));
}
