//! Call-site location pass
//!
//! Walks the module and records every call expression whose callee is a
//! member chain rooted at one of the stripped binding names, together with
//! its modifier list and nesting depth. The collection is read-only; the
//! rewrite pass mutates the tree afterwards, addressing each site by span.

use swc_core::common::Span;
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{Visit, VisitWith};

use crate::strip_parens;

/// One qualifying call expression, addressed by its span in the source tree.
#[derive(Debug, Clone)]
pub struct CallSite {
    /// Span of the original call node; parsed nodes have unique spans, so
    /// this is enough to find the node again
    pub span: Span,
    /// The binding the modifier chain is rooted at
    pub root: String,
    /// Property names along the chain, outermost object first
    /// (`chalk.bold.red` yields `["bold", "red"]`)
    pub modifiers: Vec<String>,
    /// Number of enclosing expression nodes, used to order rewrites
    pub depth: usize,
}

/// Collect the rewrite candidates rooted at `bound` names.
pub fn collect_call_sites(module: &Module, bound: &[String]) -> Vec<CallSite> {
    let mut collector = CallSiteCollector {
        bound,
        depth: 0,
        sites: Vec::new(),
    };
    module.visit_with(&mut collector);
    collector.sites
}

/// Resolve a callee into its root identifier and modifier chain.
///
/// Returns `None` when any link is a computed or private property, or when
/// the base of the chain is not a plain identifier.
pub fn resolve_chain(expr: &Expr) -> Option<(String, Vec<String>)> {
    match strip_parens(expr) {
        Expr::Ident(ident) => Some((ident.sym.to_string(), Vec::new())),
        Expr::Member(member) => {
            let property = match &member.prop {
                MemberProp::Ident(ident) => ident.sym.to_string(),
                MemberProp::Computed(_) | MemberProp::PrivateName(_) => return None,
            };
            let (root, mut modifiers) = resolve_chain(&member.obj)?;
            modifiers.push(property);
            Some((root, modifiers))
        }
        _ => None,
    }
}

struct CallSiteCollector<'a> {
    bound: &'a [String],
    depth: usize,
    sites: Vec<CallSite>,
}

impl CallSiteCollector<'_> {
    fn qualify(&self, call: &CallExpr) -> Option<CallSite> {
        let callee = match &call.callee {
            Callee::Expr(expr) => strip_parens(expr),
            _ => return None,
        };
        // A bare `chalk(...)` has no modifier to translate; only member
        // chains qualify
        if !matches!(callee, Expr::Member(_)) {
            return None;
        }
        let (root, modifiers) = resolve_chain(callee)?;
        if !self.bound.iter().any(|name| name == &root) {
            return None;
        }

        // styleText always needs a text argument
        if call.args.is_empty() {
            return None;
        }
        // A lone spread argument passes through whole; a spread mixed into
        // a join would change meaning, so those sites are skipped
        if call.args.len() > 1 && call.args.iter().any(|arg| arg.spread.is_some()) {
            return None;
        }

        Some(CallSite {
            span: call.span,
            root,
            modifiers,
            depth: self.depth,
        })
    }
}

impl Visit for CallSiteCollector<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        self.depth += 1;
        expr.visit_children_with(self);
        self.depth -= 1;
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        if let Some(site) = self.qualify(call) {
            self.sites.push(site);
        }
        call.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites_in(source: &str, bound: &[&str]) -> Vec<CallSite> {
        let module = unchalk_parser::parse_module(source, "test.js").unwrap().module;
        let bound: Vec<String> = bound.iter().map(|name| name.to_string()).collect();
        collect_call_sites(&module, &bound)
    }

    #[test]
    fn test_single_modifier_site() {
        let sites = sites_in("chalk.red('x');", &["chalk"]);

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].root, "chalk");
        assert_eq!(sites[0].modifiers, vec!["red"]);
    }

    #[test]
    fn test_chain_order_is_source_order() {
        let sites = sites_in("chalk.bold.bgRed.white('x');", &["chalk"]);

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].modifiers, vec!["bold", "bgRed", "white"]);
    }

    #[test]
    fn test_unbound_roots_skipped() {
        let sites = sites_in("other.red('x');\nchalk.red('y');", &["chalk"]);

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].root, "chalk");
    }

    #[test]
    fn test_bare_call_skipped() {
        let sites = sites_in("chalk('no modifier');", &["chalk"]);

        assert!(sites.is_empty());
    }

    #[test]
    fn test_zero_arguments_skipped() {
        let sites = sites_in("chalk.red();", &["chalk"]);

        assert!(sites.is_empty());
    }

    #[test]
    fn test_computed_properties_skipped() {
        let sites = sites_in("chalk[color]('x');\nchalk.red[color]('y');", &["chalk"]);

        assert!(sites.is_empty());
    }

    #[test]
    fn test_single_spread_allowed() {
        let sites = sites_in("chalk.red(...parts);", &["chalk"]);

        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn test_spread_in_join_skipped() {
        let sites = sites_in("chalk.red('a', ...parts);", &["chalk"]);

        assert!(sites.is_empty());
    }

    #[test]
    fn test_call_in_chain_blocks_outer() {
        let sites = sites_in("chalk.red('x').bold('y');", &["chalk"]);

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].modifiers, vec!["red"]);
    }

    #[test]
    fn test_nested_site_is_deeper() {
        let sites = sites_in("chalk.red(chalk.bold('inner'), 'outer');", &["chalk"]);

        assert_eq!(sites.len(), 2);
        let outer = sites.iter().find(|site| site.modifiers == ["red"]).unwrap();
        let inner = sites.iter().find(|site| site.modifiers == ["bold"]).unwrap();
        assert!(inner.depth > outer.depth);
    }

    #[test]
    fn test_parenthesized_callee_still_resolves() {
        let sites = sites_in("(chalk.red)('x');", &["chalk"]);

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].modifiers, vec!["red"]);
    }
}
