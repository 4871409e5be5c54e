//! Call-shape classification.
//!
//! Every call expression is classified exactly once into a `CallShape`; the
//! walker then matches on the enum instead of comparing names itself.

use serde::{Deserialize, Serialize};
use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, MemberProp};

use super::CallKind;

/// Reserved names that mark a translation call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallNames {
    /// Unqualified singular function, e.g. `_`.
    #[serde(default = "default_singular")]
    pub singular: String,
    /// Unqualified plural function, e.g. `n_`.
    #[serde(default = "default_plural")]
    pub plural: String,
    /// Reserved module identifier for qualified calls, e.g. `I18n`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Singular method on the namespace, e.g. `translate`.
    #[serde(default = "default_singular_method")]
    pub singular_method: String,
    /// Plural method on the namespace, e.g. `pluralize`.
    #[serde(default = "default_plural_method")]
    pub plural_method: String,
}

fn default_singular() -> String {
    "_".to_string()
}

fn default_plural() -> String {
    "n_".to_string()
}

fn default_namespace() -> String {
    "I18n".to_string()
}

fn default_singular_method() -> String {
    "translate".to_string()
}

fn default_plural_method() -> String {
    "pluralize".to_string()
}

impl Default for CallNames {
    fn default() -> Self {
        Self {
            singular: default_singular(),
            plural: default_plural(),
            namespace: default_namespace(),
            singular_method: default_singular_method(),
            plural_method: default_plural_method(),
        }
    }
}

impl CallNames {
    /// Kind of an unqualified call `name(...)`.
    fn kind_of_function(&self, name: &str) -> Option<CallKind> {
        if name == self.singular {
            Some(CallKind::Singular)
        } else if name == self.plural {
            Some(CallKind::Plural)
        } else {
            None
        }
    }

    /// Kind of a qualified call `object.method(...)`.
    fn kind_of_method(&self, object: &str, method: &str) -> Option<CallKind> {
        if object != self.namespace {
            return None;
        }
        if method == self.singular_method {
            Some(CallKind::Singular)
        } else if method == self.plural_method {
            Some(CallKind::Plural)
        } else {
            None
        }
    }
}

/// Classification of a single call expression.
#[derive(Debug, Clone, Copy)]
pub enum CallShape<'a> {
    NotATranslationCall,
    Singular(&'a [ExprOrSpread]),
    Plural(&'a [ExprOrSpread]),
}

impl CallShape<'_> {
    pub fn kind(&self) -> Option<CallKind> {
        match self {
            CallShape::NotATranslationCall => None,
            CallShape::Singular(_) => Some(CallKind::Singular),
            CallShape::Plural(_) => Some(CallKind::Plural),
        }
    }
}

/// Classify a call by its callee.
///
/// Recognized: `_(...)`, `n_(...)`, `I18n.translate(...)`,
/// `I18n.pluralize(...)` (with the configured names). Computed members
/// (`I18n["translate"]`), `super` and `import()` callees are not calls to the
/// reserved names.
pub fn classify<'a>(call: &'a CallExpr, names: &CallNames) -> CallShape<'a> {
    let Callee::Expr(callee) = &call.callee else {
        return CallShape::NotATranslationCall;
    };

    let kind = match &**callee {
        Expr::Ident(ident) => names.kind_of_function(ident.sym.as_str()),
        Expr::Member(member) => match (&*member.obj, &member.prop) {
            (Expr::Ident(object), MemberProp::Ident(method)) => {
                names.kind_of_method(object.sym.as_str(), method.sym.as_str())
            }
            _ => None,
        },
        _ => None,
    };

    match kind {
        Some(CallKind::Singular) => CallShape::Singular(&call.args),
        Some(CallKind::Plural) => CallShape::Plural(&call.args),
        None => CallShape::NotATranslationCall,
    }
}
