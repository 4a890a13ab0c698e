//! Import injection pass
//!
//! After a successful rewrite the module must bind `styleText` exactly once.
//! ESM files merge the specifier into their first `node:util` import, or
//! get a fresh import at the top; CommonJS files get a destructuring
//! `require` at the top. Checking existing specifiers by name keeps the
//! pass idempotent.

use swc_core::common::{SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::*;

use crate::resolver::ImportStyle;
use crate::{NATIVE_MODULE, STYLE_TEXT};

/// Make the module bind `styleText` in the given style.
pub fn ensure_style_text_import(module: &mut Module, style: ImportStyle) {
    match style {
        ImportStyle::Esm => ensure_esm_import(module),
        ImportStyle::Cjs => prepend_require(module),
    }
}

/// Merge into the first existing `node:util` import, or prepend a new one.
fn ensure_esm_import(module: &mut Module) {
    for item in &mut module.body {
        if let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item {
            if import.src.value.to_string() == NATIVE_MODULE {
                if !binds_style_text(import) {
                    import.specifiers.push(ImportSpecifier::Named(style_text_specifier()));
                }
                return;
            }
        }
    }

    let import = ImportDecl {
        span: DUMMY_SP,
        specifiers: vec![ImportSpecifier::Named(style_text_specifier())],
        src: Box::new(module_src()),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    };
    module
        .body
        .insert(0, ModuleItem::ModuleDecl(ModuleDecl::Import(import)));
}

/// Whether an import already carries the `styleText` export, under any
/// local alias.
fn binds_style_text(import: &ImportDecl) -> bool {
    import.specifiers.iter().any(|specifier| match specifier {
        ImportSpecifier::Named(named) => match &named.imported {
            Some(ModuleExportName::Ident(ident)) => ident.sym.as_ref() == STYLE_TEXT,
            Some(ModuleExportName::Str(src)) => src.value.to_string() == STYLE_TEXT,
            None => named.local.sym.as_ref() == STYLE_TEXT,
        },
        _ => false,
    })
}

/// Prepend `const { styleText } = require("node:util");`.
fn prepend_require(module: &mut Module) {
    let declarator = VarDeclarator {
        span: DUMMY_SP,
        name: Pat::Object(ObjectPat {
            span: DUMMY_SP,
            optional: false,
            type_ann: None,
            props: vec![ObjectPatProp::Assign(AssignPatProp {
                span: DUMMY_SP,
                key: style_text_ident().into(),
                value: None,
            })],
        }),
        init: Some(Box::new(Expr::Call(require_call()))),
        definite: false,
    };
    let decl = VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![declarator],
    };

    module
        .body
        .insert(0, ModuleItem::Stmt(Stmt::Decl(Decl::Var(Box::new(decl)))));
}

fn require_call() -> CallExpr {
    CallExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(Expr::Ident(Ident::new(
            "require".into(),
            DUMMY_SP,
            SyntaxContext::empty(),
        )))),
        args: vec![ExprOrSpread {
            spread: None,
            expr: Box::new(Expr::Lit(Lit::Str(module_src()))),
        }],
        type_args: None,
    }
}

fn style_text_specifier() -> ImportNamedSpecifier {
    ImportNamedSpecifier {
        span: DUMMY_SP,
        local: style_text_ident(),
        imported: None,
        is_type_only: false,
    }
}

fn style_text_ident() -> Ident {
    Ident::new(STYLE_TEXT.into(), DUMMY_SP, SyntaxContext::empty())
}

fn module_src() -> Str {
    Str {
        span: DUMMY_SP,
        value: NATIVE_MODULE.into(),
        raw: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Module {
        unchalk_parser::parse_module(source, "test.js").unwrap().module
    }

    fn first_import(module: &Module) -> &ImportDecl {
        match &module.body[0] {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => import,
            other => panic!("expected import, got {:?}", other),
        }
    }

    #[test]
    fn test_fresh_esm_import_prepended() {
        let mut module = parse("console.log(styleText('red', 'x'));");
        ensure_style_text_import(&mut module, ImportStyle::Esm);

        assert_eq!(module.body.len(), 2);
        let import = first_import(&module);
        assert_eq!(import.src.value.to_string(), "node:util");
        assert_eq!(import.specifiers.len(), 1);
    }

    #[test]
    fn test_merges_into_existing_util_import() {
        let mut module = parse("import { format } from 'node:util';");
        ensure_style_text_import(&mut module, ImportStyle::Esm);

        assert_eq!(module.body.len(), 1);
        assert_eq!(first_import(&module).specifiers.len(), 2);
    }

    #[test]
    fn test_present_specifier_not_duplicated() {
        let mut module = parse("import { styleText } from 'node:util';");
        ensure_style_text_import(&mut module, ImportStyle::Esm);
        ensure_style_text_import(&mut module, ImportStyle::Esm);

        assert_eq!(first_import(&module).specifiers.len(), 1);
    }

    #[test]
    fn test_renamed_specifier_counts_as_present() {
        let mut module = parse("import { styleText as paint } from 'node:util';");
        ensure_style_text_import(&mut module, ImportStyle::Esm);

        assert_eq!(first_import(&module).specifiers.len(), 1);
    }

    #[test]
    fn test_bare_util_import_is_not_merged_into() {
        // only the prefixed builtin counts as the native module
        let mut module = parse("import util from 'util';");
        ensure_style_text_import(&mut module, ImportStyle::Esm);

        assert_eq!(module.body.len(), 2);
        assert_eq!(first_import(&module).src.value.to_string(), "node:util");
    }

    #[test]
    fn test_cjs_require_prepended_first() {
        let mut module = parse("const fs = require('fs');\nconsole.log(styleText('red', 'x'));");
        ensure_style_text_import(&mut module, ImportStyle::Cjs);

        assert_eq!(module.body.len(), 3);
        let var = match &module.body[0] {
            ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => var,
            other => panic!("expected const declaration, got {:?}", other),
        };
        assert_eq!(var.kind, VarDeclKind::Const);
        assert_eq!(var.decls.len(), 1);
        assert!(matches!(&var.decls[0].name, Pat::Object(pat) if pat.props.len() == 1));
    }
}
