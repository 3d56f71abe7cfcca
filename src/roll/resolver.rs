//! Named external transforms (`@name(expr)`) and the cache that remembers
//! them once resolved.

use super::num::Number;
use crate::common::{DiceOperator, MathOperator};
use crate::error::{RResult, RollError};
use crate::parse::{
    ast::{self, Node},
    visit::AstVisitor,
};
use std::collections::HashMap;
use std::fmt;
use std::future::{self, Future};
use std::sync::{Arc, PoisonError, RwLock};

/// A numeric transform bound to a replacement name.
pub type Transform = Arc<dyn Fn(Number) -> Number + Send + Sync>;

pub type ResolveError = Box<dyn std::error::Error + Send + Sync>;

/// Looks up the transform for a replacement name. Only called on a cache
/// miss, so implementations may be slow.
pub trait Resolve {
    fn resolve(&self, name: &str) -> impl Future<Output = Result<Transform, ResolveError>> + Send;
}

/// Resolves every name to the identity transform.
#[derive(Debug, Default, Copy, Clone)]
pub struct IdentityResolver;

impl Resolve for IdentityResolver {
    fn resolve(&self, _name: &str) -> impl Future<Output = Result<Transform, ResolveError>> + Send {
        let identity: Transform = Arc::new(|x: Number| x);
        future::ready(Ok::<_, ResolveError>(identity))
    }
}

/// Adapts an async closure taking the replacement name into a [Resolve].
pub struct FnResolver<F>(pub F);

impl<F, Fut> Resolve for FnResolver<F>
where
    F: Fn(String) -> Fut + Sync,
    Fut: Future<Output = Result<Transform, ResolveError>> + Send,
{
    fn resolve(&self, name: &str) -> impl Future<Output = Result<Transform, ResolveError>> + Send {
        (self.0)(name.to_string())
    }
}

/// Resolved transforms keyed by name. Entries are never evicted; share one
/// cache between rollers with an [Arc].
#[derive(Default)]
pub struct ReplacementCache {
    transforms: RwLock<HashMap<String, Transform>>,
}

impl ReplacementCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Transform> {
        let transforms = self.transforms.read().unwrap_or_else(PoisonError::into_inner);
        transforms.get(name).cloned()
    }

    pub fn insert(&self, name: impl Into<String>, transform: Transform) {
        let mut transforms = self.transforms.write().unwrap_or_else(PoisonError::into_inner);
        transforms.insert(name.into(), transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached transform for `name`, asking `resolver` for it
    /// first if it has not been seen yet.
    pub async fn get_or_resolve<R>(&self, name: &str, resolver: &R) -> RResult<Transform>
    where
        R: Resolve + ?Sized,
    {
        if let Some(transform) = self.get(name) {
            return Ok(transform);
        }

        tracing::debug!(name, "resolving replacement");
        let transform = resolver
            .resolve(name)
            .await
            .map_err(|source| RollError::Resolver {
                name: name.to_string(),
                source,
            })?;

        let mut transforms = self.transforms.write().unwrap_or_else(PoisonError::into_inner);
        Ok(transforms
            .entry(name.to_string())
            .or_insert(transform)
            .clone())
    }
}

impl fmt::Debug for ReplacementCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let transforms = self.transforms.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_set().entries(transforms.keys()).finish()
    }
}

/// Collects the replacement names a syntax tree refers to, in the order they
/// first appear.
#[derive(Default)]
pub(crate) struct ReplacementNames {
    names: Vec<String>,
}

impl ReplacementNames {
    pub fn collect(node: &Node) -> Vec<String> {
        let mut names = Self::default();
        names.visit(node);
        names.names
    }

    fn visit_target(&mut self, target: &ast::Target) {
        self.visit(&*target.expr);
    }

    fn visit_modifier(&mut self, modifier: &ast::Modifier) {
        match modifier {
            ast::Modifier::Keep(kd) | ast::Modifier::Drop(kd) => self.visit(&*kd.expr),
            ast::Modifier::Success(t)
            | ast::Modifier::Failure(t)
            | ast::Modifier::Critical(t)
            | ast::Modifier::CriticalFailure(t) => self.visit_target(t),
            ast::Modifier::Explode(ast::Explode { target, .. })
            | ast::Modifier::Reroll(ast::Reroll { target, .. }) => {
                if let Some(t) = target {
                    self.visit_target(t);
                }
            }
            ast::Modifier::Unsupported => {}
        }
    }
}

impl AstVisitor for ReplacementNames {
    type Output = ();

    fn visit_number(&mut self, _value: Number) {}

    fn visit_die(&mut self, die: &ast::Die) {
        self.visit(&*die.count);
        if let ast::Faces::Sides(faces) = &die.die {
            self.visit(&**faces);
        }
        for modifier in die.mods.iter().chain(&die.targets) {
            self.visit_modifier(modifier);
        }
        if let Some(matching) = &die.matching {
            self.visit(&*matching.min);
            if let Some(t) = &matching.target {
                self.visit_target(t);
            }
        }
    }

    fn visit_dice_expression(&mut self, expr: &ast::Expression<DiceOperator>) {
        self.visit(&*expr.head);
        for op in &expr.ops {
            self.visit(&op.tail);
        }
    }

    fn visit_expression(&mut self, expr: &ast::Expression<MathOperator>) {
        self.visit(&*expr.head);
        for op in &expr.ops {
            self.visit(&op.tail);
        }
    }

    fn visit_group(&mut self, group: &ast::Group) {
        for member in group.rolls.iter() {
            self.visit(member);
        }
        for modifier in &group.mods {
            self.visit_modifier(modifier);
        }
    }

    fn visit_function(&mut self, function: &ast::Function) {
        self.visit(&*function.expr);
    }

    fn visit_replacement(&mut self, replacement: &ast::Replacement) {
        if !self.names.contains(&replacement.name) {
            self.names.push(replacement.name.clone());
        }
        self.visit(&*replacement.expr);
    }

    fn visit_inline(&mut self, expr: &Node) {
        self.visit(expr);
    }

    fn visit_unsupported(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver {
        calls: AtomicUsize,
    }

    impl Resolve for CountingResolver {
        fn resolve(&self, name: &str) -> impl Future<Output = Result<Transform, ResolveError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result: Result<Transform, ResolveError> = match name {
                "double" => Ok(Arc::new(|x: Number| x * Number::Int(2))),
                _ => Err(format!("unknown function {}", name).into()),
            };
            future::ready(result)
        }
    }

    #[tokio::test]
    async fn test_resolves_once() {
        let cache = ReplacementCache::new();
        let resolver = CountingResolver {
            calls: AtomicUsize::new(0),
        };

        let first = cache.get_or_resolve("double", &resolver).await.unwrap();
        let second = cache.get_or_resolve("double", &resolver).await.unwrap();
        assert_eq!(first(Number::Int(3)), Number::Int(6));
        assert_eq!(second(Number::Int(4)), Number::Int(8));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_resolver_errors_propagate() {
        let cache = ReplacementCache::new();
        let resolver = CountingResolver {
            calls: AtomicUsize::new(0),
        };

        let err = cache.get_or_resolve("nope", &resolver).await.err().unwrap();
        assert!(matches!(err, RollError::Resolver { ref name, .. } if name == "nope"));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_fn_resolver() {
        let cache = ReplacementCache::new();
        let resolver = FnResolver(|name: String| async move {
            let offset = name.len() as crate::common::Int;
            let transform: Transform = Arc::new(move |x: Number| x + Number::Int(offset));
            Ok::<_, ResolveError>(transform)
        });

        let transform = cache.get_or_resolve("plus", &resolver).await.unwrap();
        assert_eq!(transform(Number::Int(1)), Number::Int(5));
    }

    #[test]
    fn test_collect_names() {
        let node = crate::parse::parse("@a(1d6) + {@b(2), @a(3)}kh(@c(1))").unwrap();
        assert_eq!(ReplacementNames::collect(&node), vec!["a", "b", "c"]);
    }
}
