//! Binding resolution pass
//!
//! Finds module-level bindings of the target color packages, both ESM
//! `import` declarations and CommonJS `require` declarators, records the
//! local names they introduce, and removes them from the tree. Packages are
//! processed in order, ESM before CommonJS within each package, and the
//! style of the last match decides how the replacement binding is injected
//! later.

use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::strip_parens;

/// Which binding style the migrated file used last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    /// `import pkg from '...'`
    Esm,
    /// `const pkg = require('...')`
    Cjs,
}

/// The local names stripped from a module, with the style to re-inject in.
#[derive(Debug)]
pub struct Bindings {
    /// Local identifiers that were bound to a target package, in package
    /// processing order
    pub names: Vec<String>,
    /// Style of the most recently removed binding
    pub style: ImportStyle,
}

struct Stripped {
    names: Vec<String>,
    matched: bool,
}

/// Remove every binding of `targets` from the module and report the local
/// names that disappeared.
///
/// ESM handling collects default and namespace specifiers. Named specifiers
/// bind individual color functions rather than a package object, so their
/// imports contribute no name. CommonJS handling matches plain-identifier
/// declarators whose initializer is a direct `require` of the package;
/// destructured declarators stay untouched.
pub fn strip_target_bindings(module: &mut Module, targets: &[&str]) -> Bindings {
    let mut names = Vec::new();
    let mut style = ImportStyle::Esm;

    for package in targets {
        let esm = strip_esm_imports(module, package);
        if esm.matched {
            style = ImportStyle::Esm;
        }
        names.extend(esm.names);

        let cjs = strip_require_declarators(module, package);
        if cjs.matched {
            style = ImportStyle::Cjs;
        }
        names.extend(cjs.names);
    }

    Bindings { names, style }
}

/// Drop top-level `import ... from 'package'` declarations, collecting the
/// whole-module names they bound.
fn strip_esm_imports(module: &mut Module, package: &str) -> Stripped {
    let mut stripped = Stripped {
        names: Vec::new(),
        matched: false,
    };

    module.body.retain(|item| {
        let import = match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => import,
            _ => return true,
        };
        if import.src.value.to_string() != package {
            return true;
        }

        for specifier in &import.specifiers {
            match specifier {
                ImportSpecifier::Default(default) => {
                    stripped.names.push(default.local.sym.to_string());
                }
                ImportSpecifier::Namespace(ns) => {
                    stripped.names.push(ns.local.sym.to_string());
                }
                // Named specifiers bind single colors, not the package object
                ImportSpecifier::Named(_) => {}
            }
        }

        log::debug!("removing import of '{}'", package);
        stripped.matched = true;
        false
    });

    stripped
}

/// Remove matching `require` declarators anywhere in the tree, dropping
/// declarations that end up with no declarators left.
fn strip_require_declarators(module: &mut Module, package: &str) -> Stripped {
    let mut stripper = RequireStripper {
        package,
        stripped: Stripped {
            names: Vec::new(),
            matched: false,
        },
    };
    module.visit_mut_with(&mut stripper);
    stripper.stripped
}

struct RequireStripper<'a> {
    package: &'a str,
    stripped: Stripped,
}

impl VisitMut for RequireStripper<'_> {
    fn visit_mut_var_decl(&mut self, var: &mut VarDecl) {
        var.decls
            .retain(|declarator| match required_package_name(declarator, self.package) {
                Some(name) => {
                    log::debug!("removing require of '{}'", self.package);
                    self.stripped.names.push(name);
                    self.stripped.matched = true;
                    false
                }
                None => true,
            });
        var.visit_mut_children_with(self);
    }

    fn visit_mut_module_items(&mut self, items: &mut Vec<ModuleItem>) {
        items.visit_mut_children_with(self);
        items.retain(|item| match item {
            ModuleItem::Stmt(stmt) => !is_emptied_var_decl(stmt),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                !matches!(&export.decl, Decl::Var(var) if var.decls.is_empty())
            }
            _ => true,
        });
    }

    fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        stmts.visit_mut_children_with(self);
        stmts.retain(|stmt| !is_emptied_var_decl(stmt));
    }

    // A for-head declaration sits outside any statement list, so the
    // emptied-decl cleanup above cannot reach it
    fn visit_mut_for_stmt(&mut self, stmt: &mut ForStmt) {
        stmt.visit_mut_children_with(self);
        if matches!(&stmt.init, Some(VarDeclOrExpr::VarDecl(var)) if var.decls.is_empty()) {
            stmt.init = None;
        }
    }
}

/// A declaration whose declarators were all stripped must go too.
fn is_emptied_var_decl(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Decl(Decl::Var(var)) => var.decls.is_empty(),
        _ => false,
    }
}

/// Match `name = require('package')` and return the bound name.
fn required_package_name(declarator: &VarDeclarator, package: &str) -> Option<String> {
    let name = match &declarator.name {
        Pat::Ident(binding) => binding.id.sym.to_string(),
        _ => return None,
    };

    let call = match strip_parens(declarator.init.as_deref()?) {
        Expr::Call(call) => call,
        _ => return None,
    };
    let callee = match &call.callee {
        Callee::Expr(expr) => strip_parens(expr),
        _ => return None,
    };
    match callee {
        Expr::Ident(ident) if ident.sym.as_ref() == "require" => {}
        _ => return None,
    }

    if call.args.len() != 1 || call.args[0].spread.is_some() {
        return None;
    }
    match call.args[0].expr.as_ref() {
        Expr::Lit(Lit::Str(src)) if src.value.to_string() == package => Some(name),
        _ => None,
    }
}
