//! Syntax walker.
//!
//! Visits every call expression in a module. Calls classified as translation
//! calls have their literal argument extracted; everything else is walked
//! transparently so calls nested anywhere (inside other calls, JSX, template
//! substitutions, option objects) are still found.

use swc_common::{SourceMap, Span};
use swc_ecma_ast::{CallExpr, Expr, ExprOrSpread, Lit, Module};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::Message;

use super::{CallKind, CallNames, CallShape, RawCall, classify};

/// Why the first argument of a translation call was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentShapeReason {
    #[error("no argument was given")]
    MissingArgument,
    #[error("the argument is a spread")]
    Spread,
    #[error("expected a string literal, found {found}")]
    NotAStringLiteral { found: &'static str },
    #[error("expected an array of string literals, found {found}")]
    NotAnArray { found: &'static str },
    #[error("plural form {index} is empty (array hole)")]
    ArrayHole { index: usize },
    #[error("plural form {index} is not a string literal, found {found}")]
    NonStringElement { index: usize, found: &'static str },
    #[error("the plural forms array is empty")]
    EmptyPluralForms,
    #[error("the string literal is not valid Unicode")]
    InvalidString,
}

/// A translation call whose text cannot be known statically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} translation call: {reason}")]
pub struct ArgumentShapeError {
    pub kind: CallKind,
    pub line: usize,
    pub col: usize,
    pub reason: ArgumentShapeReason,
}

/// Everything found in one module.
#[derive(Debug, Default)]
pub struct WalkResult {
    pub calls: Vec<RawCall>,
    pub errors: Vec<ArgumentShapeError>,
}

/// Walk a parsed module and collect translation calls in source order.
pub fn walk(module: &Module, source_map: &SourceMap, names: &CallNames) -> WalkResult {
    let mut walker = SyntaxWalker {
        source_map,
        names,
        result: WalkResult::default(),
    };
    module.visit_with(&mut walker);
    walker.result
}

struct SyntaxWalker<'a> {
    source_map: &'a SourceMap,
    names: &'a CallNames,
    result: WalkResult,
}

impl SyntaxWalker<'_> {
    fn position(&self, span: Span) -> (usize, usize) {
        let loc = self.source_map.lookup_char_pos(span.lo);
        (loc.line, loc.col.0 + 1)
    }

    fn visit_args(&mut self, args: &[ExprOrSpread]) {
        for arg in args {
            arg.visit_with(self);
        }
    }
}

impl Visit for SyntaxWalker<'_> {
    fn visit_call_expr(&mut self, call: &CallExpr) {
        let shape = classify(call, self.names);
        let (kind, args) = match shape {
            CallShape::NotATranslationCall => {
                call.visit_children_with(self);
                return;
            }
            CallShape::Singular(args) => (CallKind::Singular, args),
            CallShape::Plural(args) => (CallKind::Plural, args),
        };

        let (line, col) = self.position(call.span);
        match extract_literal(kind, args) {
            Ok(literal) => {
                self.result.calls.push(RawCall {
                    kind,
                    literal,
                    line,
                    col,
                });
                // Interpolation values and options may hold nested calls.
                self.visit_args(args.get(1..).unwrap_or_default());
            }
            Err(reason) => {
                self.result.errors.push(ArgumentShapeError {
                    kind,
                    line,
                    col,
                    reason,
                });
                self.visit_args(args);
            }
        }
    }
}

fn extract_literal(kind: CallKind, args: &[ExprOrSpread]) -> Result<Message, ArgumentShapeReason> {
    let first = args.first().ok_or(ArgumentShapeReason::MissingArgument)?;
    if first.spread.is_some() {
        return Err(ArgumentShapeReason::Spread);
    }
    match kind {
        CallKind::Singular => string_literal(&first.expr).map(Message::Singular),
        CallKind::Plural => plural_forms(&first.expr).map(Message::Plural),
    }
}

fn plural_forms(expr: &Expr) -> Result<Vec<String>, ArgumentShapeReason> {
    let Expr::Array(array) = unparen(expr) else {
        return Err(ArgumentShapeReason::NotAnArray {
            found: describe_expr(unparen(expr)),
        });
    };
    if array.elems.is_empty() {
        return Err(ArgumentShapeReason::EmptyPluralForms);
    }

    array
        .elems
        .iter()
        .enumerate()
        .map(|(index, elem)| {
            let elem = elem.as_ref().ok_or(ArgumentShapeReason::ArrayHole { index })?;
            if elem.spread.is_some() {
                return Err(ArgumentShapeReason::Spread);
            }
            string_literal(&elem.expr).map_err(|reason| match reason {
                ArgumentShapeReason::NotAStringLiteral { found } => {
                    ArgumentShapeReason::NonStringElement { index, found }
                }
                other => other,
            })
        })
        .collect()
}

/// A `"quoted"` literal or a template literal without substitutions.
fn string_literal(expr: &Expr) -> Result<String, ArgumentShapeReason> {
    match unparen(expr) {
        Expr::Lit(Lit::Str(s)) => s
            .value
            .as_str()
            .map(str::to_string)
            .ok_or(ArgumentShapeReason::InvalidString),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => {
            let mut text = String::new();
            for quasi in &tpl.quasis {
                let cooked = quasi
                    .cooked
                    .as_ref()
                    .and_then(|c| c.as_str())
                    .ok_or(ArgumentShapeReason::InvalidString)?;
                text.push_str(cooked);
            }
            Ok(text)
        }
        other => Err(ArgumentShapeReason::NotAStringLiteral {
            found: describe_expr(other),
        }),
    }
}

fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unparen(&paren.expr),
        _ => expr,
    }
}

/// Short human description of an expression kind, for diagnostics.
fn describe_expr(expr: &Expr) -> &'static str {
    match expr {
        Expr::Ident(_) => "an identifier",
        Expr::Lit(Lit::Str(_)) => "a string literal",
        Expr::Lit(Lit::Num(_)) => "a number",
        Expr::Lit(Lit::Bool(_)) => "a boolean",
        Expr::Lit(Lit::Null(_)) => "null",
        Expr::Lit(_) => "a non-string literal",
        Expr::Tpl(_) => "a template literal with substitutions",
        Expr::TaggedTpl(_) => "a tagged template",
        Expr::Bin(_) => "a binary expression",
        Expr::Call(_) => "a call expression",
        Expr::Member(_) | Expr::OptChain(_) => "a member expression",
        Expr::Cond(_) => "a conditional expression",
        Expr::Array(_) => "an array",
        Expr::Object(_) => "an object literal",
        Expr::Arrow(_) | Expr::Fn(_) => "a function",
        _ => "an expression",
    }
}
