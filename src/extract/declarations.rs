//! Module-level bindings collected before call sites are matched.
//!
//! Collection runs over every parsed file first, so that an identifier used
//! as a call argument can be resolved to a literal declared anywhere in its
//! own module, or exported by another scanned module and imported by name.

use std::collections::HashMap;

use swc_ecma_ast::{
    Decl, ExportSpecifier, Expr, ImportDecl, ImportSpecifier, Lit, Module, ModuleDecl,
    ModuleExportName, ModuleItem, ObjectPatProp, Pat, Stmt, VarDecl,
};

/// What a declared name is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Declared with a single literal string initializer: `const A = "text"`.
    Literal(String),
    /// Bound to anything else: an expression, a parameter, a function.
    Opaque,
}

/// Import statement information.
///
/// ```typescript
/// import { T as tr } from "xlate";   // local "tr", imported "T"
/// import * as xlate from "xlate";     // local "xlate", imported "*"
/// import xlate from "xlate";          // local "xlate", imported "default"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Local name in the importing file.
    pub local_name: String,
    /// Original name in the imported module ("*" for namespace imports).
    pub imported_name: String,
    /// Module specifier (e.g., "./strings").
    pub module_path: String,
}

impl ImportInfo {
    pub fn is_namespace(&self) -> bool {
        self.imported_name == "*"
    }
}

/// Everything one module declares or imports at its top level.
#[derive(Debug, Default)]
pub struct ModuleBindings {
    /// Top-level declarations by local name.
    pub declarations: HashMap<String, Binding>,
    /// Exported name -> local name.
    pub exports: HashMap<String, String>,
    pub imports: Vec<ImportInfo>,
}

impl ModuleBindings {
    /// Collect top-level bindings of a module.
    pub fn collect(module: &Module) -> Self {
        let mut bindings = Self::default();
        for item in &module.body {
            match item {
                ModuleItem::Stmt(Stmt::Decl(decl)) => bindings.declare(decl, false),
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    bindings.declare(&export.decl, true)
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(named)) if named.src.is_none() => {
                    for specifier in &named.specifiers {
                        if let ExportSpecifier::Named(spec) = specifier {
                            let local = export_name(&spec.orig);
                            let exported = spec
                                .exported
                                .as_ref()
                                .map(export_name)
                                .unwrap_or_else(|| local.clone());
                            bindings.exports.insert(exported, local);
                        }
                    }
                }
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => bindings.import(import),
                _ => {}
            }
        }
        bindings
    }

    /// Look up a literal exported under `exported_name`.
    ///
    /// Returns the declared name together with its value.
    pub fn exported_literal(&self, exported_name: &str) -> Option<(&str, &str)> {
        let local = self.exports.get(exported_name)?;
        match self.declarations.get(local)? {
            Binding::Literal(value) => Some((local.as_str(), value.as_str())),
            Binding::Opaque => None,
        }
    }

    fn declare(&mut self, decl: &Decl, exported: bool) {
        let names: Vec<(String, Binding)> = match decl {
            Decl::Var(var) => var_bindings(var),
            Decl::Fn(f) => vec![(f.ident.sym.to_string(), Binding::Opaque)],
            Decl::Class(c) => vec![(c.ident.sym.to_string(), Binding::Opaque)],
            _ => Vec::new(),
        };
        for (name, binding) in names {
            if exported {
                self.exports.insert(name.clone(), name.clone());
            }
            self.declarations.insert(name, binding);
        }
    }

    fn import(&mut self, node: &ImportDecl) {
        if node.type_only {
            return;
        }
        let Some(module_path) = node.src.value.as_str() else {
            return;
        };
        for specifier in &node.specifiers {
            let (local_name, imported_name) = match specifier {
                ImportSpecifier::Named(named) => {
                    if named.is_type_only {
                        continue;
                    }
                    let local_name = named.local.sym.to_string();
                    let imported_name = named
                        .imported
                        .as_ref()
                        .map(export_name)
                        .unwrap_or_else(|| local_name.clone());
                    (local_name, imported_name)
                }
                ImportSpecifier::Default(default) => {
                    (default.local.sym.to_string(), "default".to_string())
                }
                ImportSpecifier::Namespace(ns) => (ns.local.sym.to_string(), "*".to_string()),
            };
            self.imports.push(ImportInfo {
                local_name,
                imported_name,
                module_path: module_path.to_string(),
            });
        }
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.to_string(),
        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
    }
}

/// Bindings introduced by a variable declaration.
///
/// Only `name = <literal>` declarators bind a literal; destructuring and
/// non-literal initializers make every introduced name opaque.
pub fn var_bindings(var: &VarDecl) -> Vec<(String, Binding)> {
    var.decls
        .iter()
        .flat_map(|decl| match (&decl.name, decl.init.as_deref().and_then(literal_value)) {
            (Pat::Ident(ident), Some(value)) => {
                vec![(ident.id.sym.to_string(), Binding::Literal(value))]
            }
            (pat, _) => binding_names(pat)
                .into_iter()
                .map(|name| (name, Binding::Opaque))
                .collect(),
        })
        .collect()
}

/// Unwrap TypeScript-specific expression wrappers to get the inner expression.
pub fn unwrap_ts_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::TsAs(ts_as) => unwrap_ts_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_ts_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_ts_expr(&ts_sat.expr),
        Expr::TsNonNull(non_null) => unwrap_ts_expr(&non_null.expr),
        Expr::Paren(paren) => unwrap_ts_expr(&paren.expr),
        _ => expr,
    }
}

/// The string an expression denotes, if it is a literal.
///
/// Accepts string literals and template literals without substitutions.
pub fn literal_value(expr: &Expr) -> Option<String> {
    match unwrap_ts_expr(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(str::to_string)),
        _ => None,
    }
}

/// Extract all identifier names from a pattern (handles destructuring).
pub fn binding_names(pat: &Pat) -> Vec<String> {
    match pat {
        Pat::Ident(ident) => vec![ident.id.sym.to_string()],
        Pat::Object(obj) => obj
            .props
            .iter()
            .flat_map(|prop| match prop {
                ObjectPatProp::KeyValue(kv) => binding_names(&kv.value),
                ObjectPatProp::Assign(assign) => vec![assign.key.sym.to_string()],
                ObjectPatProp::Rest(rest) => binding_names(&rest.arg),
            })
            .collect(),
        Pat::Array(arr) => arr.elems.iter().flatten().flat_map(binding_names).collect(),
        Pat::Assign(assign) => binding_names(&assign.left),
        Pat::Rest(rest) => binding_names(&rest.arg),
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, sync::Arc};

    use swc_common::SourceMap;

    use crate::extract::declarations::*;
    use crate::extract::parser::parse_source;

    fn collect(code: &str) -> ModuleBindings {
        let source_map = Arc::new(SourceMap::default());
        let parsed = parse_source(code.to_string(), Path::new("test.tsx"), &source_map).unwrap();
        ModuleBindings::collect(&parsed.module)
    }

    #[test]
    fn test_collect_literal_declarations() {
        let bindings = collect(
            r#"
            const HelloWorld = "Hello, world!";
            let Plain = `no substitutions`;
            var Typed = "typed" as const;
            const Computed = "a" + "b";
            "#,
        );

        assert_eq!(
            bindings.declarations.get("HelloWorld"),
            Some(&Binding::Literal("Hello, world!".to_string()))
        );
        assert_eq!(
            bindings.declarations.get("Plain"),
            Some(&Binding::Literal("no substitutions".to_string()))
        );
        assert_eq!(
            bindings.declarations.get("Typed"),
            Some(&Binding::Literal("typed".to_string()))
        );
        assert_eq!(bindings.declarations.get("Computed"), Some(&Binding::Opaque));
    }

    #[test]
    fn test_destructuring_is_opaque() {
        let bindings = collect(r#"const { a, b: [c] } = source;"#);
        assert_eq!(bindings.declarations.get("a"), Some(&Binding::Opaque));
        assert_eq!(bindings.declarations.get("c"), Some(&Binding::Opaque));
    }

    #[test]
    fn test_function_scope_not_collected() {
        let bindings = collect(
            r#"
            function f() {
                const Inner = "inner";
            }
            "#,
        );
        assert_eq!(bindings.declarations.get("f"), Some(&Binding::Opaque));
        assert!(!bindings.declarations.contains_key("Inner"));
    }

    #[test]
    fn test_exports() {
        let bindings = collect(
            r#"
            export const Greeting = "Hello";
            const Farewell = "Bye";
            const Dynamic = compute();
            export { Farewell as Goodbye, Dynamic };
            "#,
        );

        assert_eq!(
            bindings.exported_literal("Greeting"),
            Some(("Greeting", "Hello"))
        );
        assert_eq!(
            bindings.exported_literal("Goodbye"),
            Some(("Farewell", "Bye"))
        );
        assert_eq!(bindings.exported_literal("Farewell"), None);
        assert_eq!(bindings.exported_literal("Dynamic"), None);
    }

    #[test]
    fn test_collect_imports() {
        let bindings = collect(
            r#"
            import { T } from "xlate";
            import { T as tr } from "@app/xlate";
            import * as x from "xlate";
            import def from "./def";
            import type { Lingua } from "xlate";
            "#,
        );

        assert_eq!(bindings.imports.len(), 4);
        assert_eq!(bindings.imports[0].local_name, "T");
        assert_eq!(bindings.imports[0].imported_name, "T");
        assert_eq!(bindings.imports[1].local_name, "tr");
        assert_eq!(bindings.imports[1].imported_name, "T");
        assert_eq!(bindings.imports[1].module_path, "@app/xlate");
        assert!(bindings.imports[2].is_namespace());
        assert_eq!(bindings.imports[3].imported_name, "default");
    }
}
