use crate::context::LoadingContext;
use crate::error::{FathomError, Result};
use crate::filter::Filter;
use crate::naming;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    #[default]
    Any,
    All,
}

/// Accepts only types declaring the configured tags (annotations).
///
/// Every candidate type is resolved through its loading context, so using
/// this filter materializes each type file the scan encounters.
#[derive(Debug, Clone)]
pub struct TagFilter {
    tags: BTreeSet<String>,
    mode: TagMode,
}

impl TagFilter {
    pub fn new<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: BTreeSet<String> = tags.into_iter().map(Into::into).collect();
        if tags.is_empty() {
            return Err(FathomError::InvalidArgument(
                "Filtered tag list cannot be empty.".to_string(),
            ));
        }
        Ok(Self {
            tags,
            mode: TagMode::Any,
        })
    }

    pub fn all_required(mut self) -> Self {
        self.mode = TagMode::All;
        self
    }

    pub fn with_mode(mut self, mode: TagMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn mode(&self) -> TagMode {
        self.mode
    }
}

impl Filter for TagFilter {
    fn accept(&self, context: &LoadingContext, resource_name: &str) -> bool {
        let Some(type_name) = naming::type_name_of(resource_name) else {
            return false;
        };
        let Some(handle) = context.resolve(&type_name) else {
            return false;
        };

        match self.mode {
            TagMode::Any => self.tags.iter().any(|tag| handle.has_tag(tag)),
            TagMode::All => self.tags.iter().all(|tag| handle.has_tag(tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticResolver;
    use fathom_api::{TypeHandle, TypeKind};
    use std::sync::Arc;

    const COMPONENT: &str = "spark.annotations.SparkComponent";
    const ROUTE: &str = "spark.annotations.SparkRoute";

    fn ctx() -> Arc<LoadingContext> {
        let resolver = StaticResolver::new()
            .register(
                TypeHandle::new("com.example.HelloController", TypeKind::Class)
                    .with_tags([COMPONENT, ROUTE]),
            )
            .register(TypeHandle::new("com.example.HelloService", TypeKind::Class).with_tag(COMPONENT))
            .register(TypeHandle::new("com.example.Plain", TypeKind::Class));
        LoadingContext::builder("app")
            .resolver(Arc::new(resolver))
            .build()
    }

    #[test]
    fn test_any_mode() {
        let filter = TagFilter::new([COMPONENT, ROUTE]).unwrap();
        let ctx = ctx();

        assert!(filter.accept(&ctx, "com/example/HelloController.class"));
        assert!(filter.accept(&ctx, "com/example/HelloService.class"));
        assert!(!filter.accept(&ctx, "com/example/Plain.class"));
    }

    #[test]
    fn test_all_mode() {
        let filter = TagFilter::new([COMPONENT, ROUTE]).unwrap().all_required();
        let ctx = ctx();

        assert!(filter.accept(&ctx, "com/example/HelloController.class"));
        assert!(!filter.accept(&ctx, "com/example/HelloService.class"));
    }

    #[test]
    fn test_rejects_plain_and_unresolvable_resources() {
        let filter = TagFilter::new([COMPONENT]).unwrap();
        let ctx = ctx();

        assert!(!filter.accept(&ctx, "com/example/application.properties"));
        assert!(!filter.accept(&ctx, "com/example/Missing.class"));
    }

    #[test]
    fn test_empty_tag_set_fails_fast() {
        let result = TagFilter::new(Vec::<String>::new());
        assert!(matches!(result, Err(FathomError::InvalidArgument(_))));
    }
}
