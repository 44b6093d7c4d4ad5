//! Source parsing with swc.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Result, anyhow, bail};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Extensions recognised as JavaScript/TypeScript modules.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// A parsed source file.
#[derive(Debug)]
pub struct ParsedSource {
    pub path: PathBuf,
    pub module: Module,
}

/// Pick the parser dialect from the file extension.
///
/// Plain `.ts` is parsed without JSX so that angle-bracket type assertions
/// (`<string>value`) keep working. Unknown extensions fall back to TSX, which
/// accepts the widest range of input.
fn syntax_for(path: &Path) -> Syntax {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsSyntax {
            tsx: false,
            ..Default::default()
        }),
        Some("js" | "jsx" | "mjs" | "cjs") => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
        _ => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
    }
}

/// Parse JS/TS source code into a module AST.
///
/// All files of one scan share a `SourceMap` so that spans from any module can
/// be turned back into line/column positions. Syntax errors the parser
/// recovers from are still errors here.
pub fn parse_source(code: String, path: &Path, source_map: &Arc<SourceMap>) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(path.to_path_buf()).into(), code);

        let mut parser = Parser::new(syntax_for(path), StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", path.display(), e))?;
        if let Some(error) = parser.take_errors().into_iter().next() {
            bail!("Failed to parse {}: {:?}", path.display(), error);
        }

        Ok(ParsedSource {
            path: path.to_path_buf(),
            module,
        })
    })
}

#[cfg(test)]
mod tests {
    use crate::extract::parser::*;

    fn parse(code: &str, path: &str) -> Result<ParsedSource> {
        let source_map = Arc::new(SourceMap::default());
        parse_source(code.to_string(), Path::new(path), &source_map)
    }

    #[test]
    fn test_parse_typescript() {
        let parsed = parse(
            "const x: string = <string>value;\nexport const A = 'a';",
            "a.ts",
        )
        .unwrap();
        assert_eq!(parsed.module.body.len(), 2);
    }

    #[test]
    fn test_parse_tsx() {
        let parsed = parse("export const C = () => <div>{T('Hi')}</div>;", "c.tsx").unwrap();
        assert_eq!(parsed.module.body.len(), 1);
    }

    #[test]
    fn test_parse_javascript_with_jsx() {
        assert!(parse("export default () => <p>hi</p>;", "c.jsx").is_ok());
        assert!(parse("import { T } from 'xlate';\nT('x');", "c.mjs").is_ok());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse("const = ;", "broken.ts").unwrap_err();
        assert!(err.to_string().contains("broken.ts"));
    }

    #[test]
    fn test_recoverable_error_rejected() {
        let err = parse("const A;\nexport const B = 'b';", "recovered.ts").unwrap_err();
        assert!(err.to_string().contains("recovered.ts"));
    }
}
