//! JavaScript parser and printer wrapper using SWC
//!
//! This crate provides a high-level interface to parse JavaScript source code
//! into an AST and to print a (possibly modified) AST back to source text.
//! The source map and comment store produced by parsing stay attached to the
//! module, so printing emits the original comments at their recorded
//! positions.

use anyhow::Result;
use swc_core::common::comments::SingleThreadedComments;
use swc_core::common::{input::StringInput, sync::Lrc, FileName, SourceMap};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::codegen::{text_writer::JsWriter, Config, Emitter};
use swc_core::ecma::parser::{lexer::Lexer, EsSyntax, Parser, Syntax};

// Re-export AST types for consumers that need to inspect the AST
pub use swc_core::ecma::ast;

// Re-export Spanned trait for getting spans from AST nodes
pub use swc_core::common::Spanned;

/// A parsed JavaScript module together with the state needed to print it.
pub struct ParsedModule {
    /// The parsed AST module
    pub module: Module,
    /// SWC source map backing the module's spans
    pub source_map: Lrc<SourceMap>,
    /// Comments collected during parsing, keyed by byte position
    pub comments: SingleThreadedComments,
}

/// Parse JavaScript source code into an AST module.
///
/// The syntax is chosen from the filename: `.jsx` files are parsed with JSX
/// enabled, everything else as plain ES2022. Sources are always parsed in
/// module position, which also accepts CommonJS files built from `require`
/// calls. Recoverable parse errors are logged and parsing continues.
pub fn parse_module(source: &str, filename: &str) -> Result<ParsedModule> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();
    let lexer = Lexer::new(
        syntax_for(filename),
        EsVersion::Es2022,
        StringInput::from(&*source_file),
        Some(&comments),
    );

    let mut parser = Parser::new_from(lexer);

    let module = parser.parse_module().map_err(|e| {
        let loc = source_map.lookup_char_pos(e.span().lo);
        anyhow::anyhow!(
            "{}:{}:{}: parse error: {}",
            filename,
            loc.line,
            loc.col_display + 1,
            e.kind().msg()
        )
    })?;

    // Recoverable errors don't abort the rewrite, but they are worth surfacing
    for error in parser.take_errors() {
        log::warn!("{}: parse warning: {}", filename, error.kind().msg());
    }

    Ok(ParsedModule {
        module,
        source_map,
        comments,
    })
}

/// Print a module back to JavaScript source text.
///
/// Comments from the original parse are emitted at their recorded positions.
/// Nodes synthesized after parsing carry no position and are printed with
/// default formatting.
pub fn print_module(parsed: &ParsedModule) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut emitter = Emitter {
            cfg: Config::default(),
            cm: parsed.source_map.clone(),
            comments: Some(&parsed.comments),
            wr: JsWriter::new(parsed.source_map.clone(), "\n", &mut buf, None),
        };
        emitter.emit_module(&parsed.module)?;
    }

    Ok(String::from_utf8(buf)?)
}

fn syntax_for(filename: &str) -> Syntax {
    Syntax::Es(EsSyntax {
        jsx: filename.ends_with(".jsx"),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_module() {
        let source = r#"
            import chalk from 'chalk';
            console.log(chalk.red('error'));
        "#;

        let parsed = parse_module(source, "test.js").unwrap();
        assert_eq!(parsed.module.body.len(), 2);
    }

    #[test]
    fn test_parse_commonjs_require() {
        let source = r#"
            const pc = require('picocolors');
            console.log(pc.green('ok'));
        "#;

        let parsed = parse_module(source, "test.cjs").unwrap();
        assert_eq!(parsed.module.body.len(), 2);
    }

    #[test]
    fn test_parse_jsx_by_extension() {
        let source = r#"const el = <div className="x">hi</div>;"#;

        assert!(parse_module(source, "component.jsx").is_ok());
        assert!(parse_module(source, "component.js").is_err());
    }

    #[test]
    fn test_parse_error_reports_location() {
        let source = "const = 1;";

        let err = match parse_module(source, "broken.js") {
            Ok(_) => panic!("expected a parse error"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("broken.js"));
    }

    #[test]
    fn test_print_preserves_comments() {
        let source = "// entry point\nconsole.log('hi');\n";

        let parsed = parse_module(source, "test.js").unwrap();
        let printed = print_module(&parsed).unwrap();

        assert!(printed.contains("// entry point"));
        assert!(printed.contains("console.log"));
    }

    #[test]
    fn test_print_roundtrip_keeps_statements() {
        let source = "const a = 1;\nfunction f(x) {\n    return x + a;\n}\n";

        let parsed = parse_module(source, "test.js").unwrap();
        let printed = print_module(&parsed).unwrap();

        assert!(printed.contains("const a = 1"));
        assert!(printed.contains("return x + a"));
    }
}
