//! chalk/picocolors to `styleText` migration passes
//!
//! This crate contains the AST passes that move a JavaScript module off
//! terminal-color packages and onto Node's built-in helper:
//! - Binding resolution: find and remove imports/requires of target packages
//! - Call-site location: collect qualifying styled calls rooted at those bindings
//! - Rewriting: replace each call with `styleText(...)`, innermost first
//! - Injection: guarantee a single `styleText` binding from `node:util`

pub mod injector;
pub mod locator;
pub mod resolver;
pub mod rewriter;

// Re-export the pass entry points
pub use injector::ensure_style_text_import;
pub use locator::{collect_call_sites, resolve_chain, CallSite};
pub use resolver::{strip_target_bindings, Bindings, ImportStyle};
pub use rewriter::rewrite_call_sites;

use anyhow::Result;
use swc_core::ecma::ast::{Expr, Module};

/// Packages whose bindings get migrated, in processing order.
pub const TARGET_PACKAGES: [&str; 3] = ["chalk", "picocolors", "picocolor"];

/// The native helper every qualifying call is rewritten to.
pub const STYLE_TEXT: &str = "styleText";

/// The built-in module that exports [`STYLE_TEXT`].
pub const NATIVE_MODULE: &str = "node:util";

/// Counters describing what the migration did to one module.
#[derive(Debug, Clone, Copy, Default)]
pub struct Outcome {
    /// Local names that were bound to a target package
    pub bound_names: usize,
    /// Call sites replaced with `styleText(...)`
    pub calls_rewritten: usize,
    /// Whether a `styleText` binding was injected
    pub import_injected: bool,
}

/// Result of migrating one source file.
#[derive(Debug)]
pub enum Migration {
    /// The file binds none of the target packages; the input text stands.
    Unchanged,
    /// The file was rewritten; `code` is the new source text.
    Rewritten { code: String, outcome: Outcome },
}

/// Run the whole migration on an already-parsed module.
///
/// When the outcome reports zero bound names the pipeline stopped before
/// touching any call site, but the module may still have shed imports that
/// only named individual colors, which the migration deliberately does not
/// translate. Callers that need untouched output for such files should
/// discard the tree and keep the original text, as [`migrate_source`] does.
pub fn migrate_module(module: &mut Module) -> Outcome {
    let bindings = resolver::strip_target_bindings(module, &TARGET_PACKAGES);
    if bindings.names.is_empty() {
        return Outcome::default();
    }
    log::debug!("bound names: {:?}", bindings.names);

    let sites = locator::collect_call_sites(module, &bindings.names);
    let calls_rewritten = rewriter::rewrite_call_sites(module, sites);

    let import_injected = calls_rewritten > 0;
    if import_injected {
        injector::ensure_style_text_import(module, bindings.style);
    }

    Outcome {
        bound_names: bindings.names.len(),
        calls_rewritten,
        import_injected,
    }
}

/// Parse, migrate and print one file's source text.
///
/// Files that bind none of the target packages come back as
/// [`Migration::Unchanged`] without ever being printed, so their text
/// survives byte for byte and a second run over migrated output produces
/// no further changes.
pub fn migrate_source(source: &str, filename: &str) -> Result<Migration> {
    let mut parsed = unchalk_parser::parse_module(source, filename)?;

    let outcome = migrate_module(&mut parsed.module);
    if outcome.bound_names == 0 {
        return Ok(Migration::Unchanged);
    }

    let code = unchalk_parser::print_module(&parsed)?;
    Ok(Migration::Rewritten { code, outcome })
}

/// Strip any number of wrapping parentheses from an expression.
pub(crate) fn strip_parens(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}
