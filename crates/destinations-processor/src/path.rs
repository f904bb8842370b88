use crate::{
    context::ProcessContext,
    markers,
    symbol::{Annotation, AnnotationValue, Declaration, DeclarationKind, TypeRef},
};
use destinations_schema::error::NavError;

///
/// DestinationPath
///
/// The chain of destination annotations leading to one concrete target.
/// `annotations[0]` is the marker itself; each following entry is the
/// annotation class instance one level further out, ending with the
/// annotation written on the target.
///

#[derive(Clone, Debug, PartialEq)]
pub struct DestinationPath {
    pub annotations: Vec<Annotation>,
    pub target: Declaration,
}

impl DestinationPath {
    /// An argument as seen by the target: the outermost annotation that sets
    /// it wins.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&AnnotationValue> {
        self.annotations
            .iter()
            .rev()
            .find_map(|annotation| annotation.argument(name))
    }

    #[must_use]
    pub fn bool_argument(&self, name: &str) -> bool {
        self.argument(name)
            .and_then(AnnotationValue::as_bool)
            .unwrap_or(false)
    }

    /// Non-empty string argument.
    #[must_use]
    pub fn str_argument(&self, name: &str) -> Option<&str> {
        self.argument(name)
            .and_then(AnnotationValue::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Class literal argument, ignoring the `Nothing::class` placeholder.
    #[must_use]
    pub fn type_argument(&self, name: &str) -> Option<&TypeRef> {
        self.argument(name)
            .and_then(AnnotationValue::as_type)
            .filter(|ty| ty.qualified_name != markers::NOTHING)
    }

    /// Graph named by the marker's type argument, e.g. `@Destination<MainGraph>`.
    #[must_use]
    pub fn graph_type(&self) -> Option<&TypeRef> {
        self.annotations
            .first()
            .and_then(|marker| marker.type_arguments.first())
            .or_else(|| self.type_argument("navGraph"))
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.annotations.len()
    }
}

/// Paths to every composable function marked as a destination.
pub fn composable_paths(ctx: &ProcessContext<'_>) -> Result<Vec<DestinationPath>, NavError> {
    PathBuilder::new(ctx, DeclarationKind::Function).collect(markers::DESTINATION)
}

/// Paths to every activity class marked as a destination, either flavour.
pub fn activity_paths(ctx: &ProcessContext<'_>) -> Result<Vec<DestinationPath>, NavError> {
    let mut paths = Vec::new();
    for marker in [markers::JAVA_ACTIVITY_DESTINATION, markers::ACTIVITY_DESTINATION] {
        paths.extend(PathBuilder::new(ctx, DeclarationKind::Class).collect(marker)?);
    }

    Ok(paths)
}

///
/// PathBuilder
///
/// Recursive walk from a marker annotation through annotation classes
/// that carry it. `visiting` holds the markers of the current chain.
///

struct PathBuilder<'a> {
    ctx: &'a ProcessContext<'a>,
    terminal: DeclarationKind,
    visiting: Vec<String>,
}

impl<'a> PathBuilder<'a> {
    const fn new(ctx: &'a ProcessContext<'a>, terminal: DeclarationKind) -> Self {
        Self {
            ctx,
            terminal,
            visiting: Vec::new(),
        }
    }

    fn collect(&mut self, marker: &str) -> Result<Vec<DestinationPath>, NavError> {
        self.walk(marker, &[])
    }

    fn walk(&mut self, marker: &str, outer: &[Annotation]) -> Result<Vec<DestinationPath>, NavError> {
        if self.visiting.iter().any(|m| m == marker) {
            return Err(NavError::setup(
                marker,
                format!(
                    "annotation class is part of a destination annotation cycle: {} -> {marker}",
                    self.visiting.join(" -> ")
                ),
            ));
        }
        self.visiting.push(marker.to_string());

        let annotated: Vec<Declaration> = self
            .ctx
            .resolver
            .declarations_annotated_with(marker)
            .collect();

        let mut paths = Vec::new();
        for decl in annotated {
            match decl.kind {
                DeclarationKind::AnnotationClass => {
                    let Some(annotation) = decl.annotation(marker) else {
                        return Err(NavError::setup(
                            &decl.qualified_name,
                            format!("annotation class does not carry '{marker}'"),
                        ));
                    };
                    let mut chain = outer.to_vec();
                    chain.push(annotation.clone());
                    self.ctx.logger.debug(&format!(
                        "following destination annotation class '{}'",
                        decl.qualified_name
                    ));
                    paths.extend(self.walk(&decl.qualified_name, &chain)?);
                }
                kind if kind == self.terminal => {
                    for annotation in decl.annotations_of(marker) {
                        let mut annotations = outer.to_vec();
                        annotations.push(annotation.clone());
                        paths.push(DestinationPath {
                            annotations,
                            target: decl.clone(),
                        });
                    }
                }
                _ => {}
            }
        }

        self.visiting.pop();

        Ok(paths)
    }
}
