use crate::error::ApiResult;
use crate::handle::TypeHandle;

/// Query surface consumed by component and route registration layers.
///
/// A consumer supplies a tag marker (e.g. "is a component") and the root
/// namespace of its application, and receives every type under that
/// namespace that resolved successfully and carries the tag.
///
/// A blank tag is rejected with [`crate::ApiError::InvalidArgument`].
pub trait TypeQuery {
    fn annotated_types_recursively(
        &self,
        tag: &str,
        namespace_prefix: &str,
    ) -> ApiResult<Vec<TypeHandle>>;
}
