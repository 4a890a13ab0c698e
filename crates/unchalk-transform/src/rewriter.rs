//! Call rewriting pass
//!
//! Replaces located call sites with equivalent `styleText(...)` calls.
//! Sites are processed deepest first, so a nested styled call is rebuilt
//! before any call containing it; the outer rewrite then picks the finished
//! inner node up out of its live argument list. Replacement nodes carry
//! dummy spans and can never collide with a site still waiting its turn.

use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::locator::CallSite;
use crate::STYLE_TEXT;

/// Rewrite every site in place, returning how many were replaced.
pub fn rewrite_call_sites(module: &mut Module, mut sites: Vec<CallSite>) -> usize {
    // Deepest first; the sort is stable, so sibling sites keep source order
    sites.sort_by(|a, b| b.depth.cmp(&a.depth));

    let mut rewritten = 0;
    for site in &sites {
        let mut pass = RewriteAt { site, done: false };
        module.visit_mut_with(&mut pass);
        if pass.done {
            rewritten += 1;
        } else {
            log::debug!("site for '{}' disappeared before rewrite", site.root);
        }
    }

    rewritten
}

struct RewriteAt<'a> {
    site: &'a CallSite,
    done: bool,
}

impl VisitMut for RewriteAt<'_> {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if self.done {
            return;
        }
        if let Expr::Call(call) = expr {
            if call.span == self.site.span {
                let replacement = style_text_call(&self.site.modifiers, call.args.clone());
                *expr = Expr::Call(replacement);
                self.done = true;
                return;
            }
        }
        expr.visit_mut_children_with(self);
    }
}

/// Build `styleText(format, text)` from a site's modifiers and the live
/// arguments of the call it replaces.
fn style_text_call(modifiers: &[String], args: Vec<ExprOrSpread>) -> CallExpr {
    CallExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(Expr::Ident(Ident::new(
            STYLE_TEXT.into(),
            DUMMY_SP,
            SyntaxContext::empty(),
        )))),
        args: vec![
            ExprOrSpread {
                spread: None,
                expr: Box::new(format_argument(modifiers)),
            },
            text_argument(args),
        ],
        type_args: None,
    }
}

/// One modifier stays a plain string; chains become an array literal.
fn format_argument(modifiers: &[String]) -> Expr {
    if let [only] = modifiers {
        return Expr::Lit(Lit::Str(str_lit(only)));
    }

    Expr::Array(ArrayLit {
        span: DUMMY_SP,
        elems: modifiers
            .iter()
            .map(|modifier| {
                Some(ExprOrSpread {
                    spread: None,
                    expr: Box::new(Expr::Lit(Lit::Str(str_lit(modifier)))),
                })
            })
            .collect(),
    })
}

/// A single argument passes through untouched; several are joined with
/// single spaces, folded left to right.
fn text_argument(args: Vec<ExprOrSpread>) -> ExprOrSpread {
    let mut parts = args.into_iter();
    let first = match parts.next() {
        Some(first) => first,
        // the locator never yields zero-argument sites
        None => {
            return ExprOrSpread {
                spread: None,
                expr: Box::new(Expr::Lit(Lit::Str(str_lit("")))),
            }
        }
    };
    if parts.len() == 0 {
        return first;
    }

    let mut text = *first.expr;
    for part in parts {
        text = concat(text, Expr::Lit(Lit::Str(str_lit(" "))));
        text = concat(text, *part.expr);
    }

    ExprOrSpread {
        spread: None,
        expr: Box::new(text),
    }
}

fn concat(left: Expr, right: Expr) -> Expr {
    Expr::Bin(BinExpr {
        span: DUMMY_SP,
        op: BinaryOp::Add,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn str_lit(value: &str) -> Str {
    Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }
}
