//! Generation model: handler facts grouped by receiver type.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Result, bail};
use routemark_core::RouteDirective;

use crate::imports::{ImportRef, TypePath};

/// One handler to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFact {
    /// Method name
    pub name: String,
    pub request_type: TypePath,
    pub context_type: TypePath,
    pub directive: RouteDirective,
    /// Whether the call must be awaited
    pub is_async: bool,
}

/// Handlers sharing one receiver type.
#[derive(Debug, Clone)]
pub struct ReceiverGroup {
    /// Binding the generated code holds the receiver in
    pub receiver_var: String,
    pub receiver_type: TypePath,
    pub handlers: Vec<HandlerFact>,
}

/// Everything the renderer needs.
#[derive(Debug, Clone)]
pub struct GenerationModel {
    pub package_name: String,
    pub imports: BTreeMap<String, ImportRef>,
    /// Modules imported with `*`, emitted after the named imports
    pub globs: BTreeSet<TypePath>,
    pub groups: Vec<ReceiverGroup>,
}

impl GenerationModel {
    pub fn new(package_name: String) -> Self {
        Self {
            package_name,
            imports: BTreeMap::new(),
            globs: BTreeSet::new(),
            groups: Vec::new(),
        }
    }

    /// Append `handler` to the group of `receiver_type`, creating the group on
    /// first sight.
    pub fn add_handler(&mut self, receiver_type: TypePath, handler: HandlerFact) {
        if let Some(group) = self
            .groups
            .iter_mut()
            .find(|group| group.receiver_type == receiver_type)
        {
            group.handlers.push(handler);
            return;
        }
        self.groups.push(ReceiverGroup {
            receiver_var: receiver_var(receiver_type.name()),
            receiver_type,
            handlers: vec![handler],
        });
    }

    /// Sort groups by receiver type, handlers by path then method, and reject
    /// a method and path registered twice on one receiver.
    pub fn finalize(&mut self) -> Result<()> {
        self.groups
            .sort_by_cached_key(|group| group.receiver_type.to_string());
        for group in &mut self.groups {
            group.handlers.sort_by(compare_handlers);
            for pair in group.handlers.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if compare_handlers(a, b) == Ordering::Equal {
                    bail!(
                        "duplicate route {} {} on `{}`: `{}` and `{}`",
                        a.directive.method,
                        a.directive.path,
                        group.receiver_type,
                        a.name,
                        b.name
                    );
                }
            }
        }
        Ok(())
    }

    pub fn handler_count(&self) -> usize {
        self.groups.iter().map(|group| group.handlers.len()).sum()
    }
}

fn compare_handlers(a: &HandlerFact, b: &HandlerFact) -> Ordering {
    a.directive
        .path
        .cmp(&b.directive.path)
        .then_with(|| a.directive.method.as_str().cmp(b.directive.method.as_str()))
}

/// Lower-cased first letter of the type name, or `this` when the name does
/// not start with a letter.
pub fn receiver_var(type_name: &str) -> String {
    let name = type_name.strip_prefix("r#").unwrap_or(type_name);
    match name.chars().next() {
        Some(first) if first.is_alphabetic() => first.to_lowercase().collect(),
        _ => "this".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use routemark_core::HttpMethod;
    use rstest::rstest;

    use super::*;

    fn fact(name: &str, method: HttpMethod, path: &str) -> HandlerFact {
        HandlerFact {
            name: name.to_string(),
            request_type: TypePath::new(["Req"]),
            context_type: TypePath::new(["Ctx"]),
            directive: RouteDirective {
                method,
                path: path.to_string(),
            },
            is_async: true,
        }
    }

    fn svc(name: &str) -> TypePath {
        TypePath::new(["super", "svc", name])
    }

    #[rstest]
    #[case("Example", "e")]
    #[case("Svc", "s")]
    #[case("r#Type", "t")]
    #[case("_Hidden", "this")]
    #[case("Ärger", "ä")]
    fn test_receiver_var(#[case] type_name: &str, #[case] expected: &str) {
        assert_eq!(receiver_var(type_name), expected);
    }

    #[test]
    fn test_groups_by_receiver() {
        let mut model = GenerationModel::new("api".into());
        model.add_handler(svc("Svc"), fact("hello", HttpMethod::Get, "/hello"));
        model.add_handler(svc("Admin"), fact("ban", HttpMethod::Post, "/ban"));
        model.add_handler(svc("Svc"), fact("bye", HttpMethod::Get, "/bye"));
        assert_eq!(model.groups.len(), 2);
        assert_eq!(model.groups[0].receiver_var, "s");
        assert_eq!(model.groups[0].handlers.len(), 2);
        assert_eq!(model.handler_count(), 3);
    }

    #[test]
    fn test_finalize_orders_groups_and_handlers() {
        let mut model = GenerationModel::new("api".into());
        model.add_handler(svc("Svc"), fact("hello_post", HttpMethod::Post, "/hello"));
        model.add_handler(svc("Svc"), fact("hello", HttpMethod::Get, "/hello"));
        model.add_handler(svc("Svc"), fact("bye", HttpMethod::Get, "/bye"));
        model.add_handler(svc("Admin"), fact("ban", HttpMethod::Delete, "/ban"));
        model.finalize().unwrap();

        let types: Vec<String> = model.groups.iter().map(|g| g.receiver_type.to_string()).collect();
        assert_eq!(types, ["super::svc::Admin", "super::svc::Svc"]);
        let names: Vec<&str> = model.groups[1].handlers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["bye", "hello", "hello_post"]);
    }

    #[test]
    fn test_finalize_rejects_duplicate_routes() {
        let mut model = GenerationModel::new("api".into());
        model.add_handler(svc("Svc"), fact("hello", HttpMethod::Get, "/hello"));
        model.add_handler(svc("Svc"), fact("hi", HttpMethod::Get, "/hello"));
        let err = model.finalize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate route GET /hello on `super::svc::Svc`: `hello` and `hi`"
        );
    }

    #[test]
    fn test_same_route_on_different_receivers_is_allowed() {
        let mut model = GenerationModel::new("api".into());
        model.add_handler(svc("Svc"), fact("hello", HttpMethod::Get, "/hello"));
        model.add_handler(svc("Other"), fact("hello", HttpMethod::Get, "/hello"));
        assert!(model.finalize().is_ok());
    }
}
