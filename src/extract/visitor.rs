//! Call-site collection for one module.
//!
//! The visitor walks a module AST, tracks block and function scopes, and
//! records every call of the target function together with the literal each
//! argument resolves to.

use std::collections::{HashMap, HashSet};

use swc_common::SourceMap;
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, CallExpr, Callee, CatchClause, ClassDecl, Constructor, Expr,
    ExprOrSpread, FnDecl, ForInStmt, ForOfStmt, ForStmt, Function, MemberProp, Module,
    ParamOrTsParamProp, TsParamPropParam, VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::declarations::{
    Binding, ModuleBindings, binding_names, literal_value, unwrap_ts_expr, var_bindings,
};
use super::{ArgumentBinding, CallSite, SourceLocation, TargetFunction};

/// Literals imported from other scanned modules.
///
/// **Key**: local name in the importing module.
/// **Value**: (declared name in the exporting module, literal value).
pub type ImportedLiterals = HashMap<String, (String, String)>;

/// Collects target-function call sites from a single module.
pub struct CallSiteVisitor<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    bindings: &'a ModuleBindings,
    imported: &'a ImportedLiterals,
    /// Local names bound to the target function by a named import.
    direct_names: HashSet<&'a str>,
    /// Local names bound to the target module by a namespace import.
    namespaces: HashSet<&'a str>,
    target_name: &'a str,
    /// Innermost scope last. Module-level names live in `bindings`.
    scopes: Vec<HashMap<String, Binding>>,
    call_sites: Vec<CallSite>,
}

impl<'a> CallSiteVisitor<'a> {
    pub fn new(
        file_path: &'a str,
        source_map: &'a SourceMap,
        target: &'a TargetFunction,
        bindings: &'a ModuleBindings,
        imported: &'a ImportedLiterals,
    ) -> Self {
        let from_target = bindings
            .imports
            .iter()
            .filter(|import| import.module_path == target.package);

        let mut direct_names = HashSet::new();
        let mut namespaces = HashSet::new();
        for import in from_target {
            if import.is_namespace() {
                namespaces.insert(import.local_name.as_str());
            } else if import.imported_name == target.name {
                direct_names.insert(import.local_name.as_str());
            }
        }

        Self {
            file_path,
            source_map,
            bindings,
            imported,
            direct_names,
            namespaces,
            target_name: &target.name,
            scopes: Vec::new(),
            call_sites: Vec::new(),
        }
    }

    /// Walk the module and return the collected call sites in source order.
    pub fn collect(mut self, module: &Module) -> Vec<CallSite> {
        // Nothing can match when the target module is never imported.
        if self.direct_names.is_empty() && self.namespaces.is_empty() {
            return Vec::new();
        }
        self.visit_module(module);
        self.call_sites
    }

    fn is_shadowed(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    fn declare(&mut self, bindings: impl IntoIterator<Item = (String, Binding)>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.extend(bindings);
        }
    }

    fn with_scope<F>(&mut self, params: Vec<String>, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.scopes.push(
            params
                .into_iter()
                .map(|name| (name, Binding::Opaque))
                .collect(),
        );
        f(self);
        self.scopes.pop();
    }

    fn is_target_callee(&self, callee: &Callee) -> bool {
        let Callee::Expr(expr) = callee else {
            return false;
        };
        match unwrap_ts_expr(expr) {
            Expr::Ident(ident) => {
                let name = ident.sym.as_str();
                self.direct_names.contains(name) && !self.is_shadowed(name)
            }
            Expr::Member(member) => {
                let Expr::Ident(obj) = &*member.obj else {
                    return false;
                };
                let ns = obj.sym.as_str();
                matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == self.target_name)
                    && self.namespaces.contains(ns)
                    && !self.is_shadowed(ns)
            }
            _ => false,
        }
    }

    /// Resolve one call argument to a literal, directly or through a single
    /// identifier hop.
    fn bind_argument(&self, arg: &ExprOrSpread) -> Option<ArgumentBinding> {
        if arg.spread.is_some() {
            return None;
        }
        if let Some(value) = literal_value(&arg.expr) {
            return Some(ArgumentBinding::Literal(value));
        }
        let Expr::Ident(ident) = unwrap_ts_expr(&arg.expr) else {
            return None;
        };
        self.resolve_identifier(ident.sym.as_str())
    }

    fn resolve_identifier(&self, name: &str) -> Option<ArgumentBinding> {
        let local = self
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .or_else(|| self.bindings.declarations.get(name));

        match local {
            Some(Binding::Literal(value)) => Some(ArgumentBinding::Constant {
                name: name.to_string(),
                value: value.clone(),
            }),
            Some(Binding::Opaque) => None,
            None => self
                .imported
                .get(name)
                .map(|(declared, value)| ArgumentBinding::Constant {
                    name: declared.clone(),
                    value: value.clone(),
                }),
        }
    }

    fn record_call(&mut self, node: &CallExpr) {
        let loc = self.source_map.lookup_char_pos(node.span.lo);
        let arguments: Vec<Option<ArgumentBinding>> =
            node.args.iter().map(|arg| self.bind_argument(arg)).collect();

        for (index, argument) in arguments.iter().enumerate() {
            if argument.is_none() {
                tracing::debug!(
                    file = self.file_path,
                    line = loc.line,
                    argument = index,
                    "skipping argument that does not resolve to a literal"
                );
            }
        }

        self.call_sites.push(CallSite {
            location: SourceLocation::new(self.file_path, loc.line, loc.col_display + 1),
            arguments,
        });
    }
}

impl Visit for CallSiteVisitor<'_> {
    fn visit_function(&mut self, node: &Function) {
        let params = node
            .params
            .iter()
            .flat_map(|p| binding_names(&p.pat))
            .collect();
        self.with_scope(params, |this| node.visit_children_with(this));
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        let params = node
            .params
            .iter()
            .flat_map(|param| match param {
                ParamOrTsParamProp::Param(p) => binding_names(&p.pat),
                ParamOrTsParamProp::TsParamProp(prop) => match &prop.param {
                    TsParamPropParam::Ident(ident) => vec![ident.id.sym.to_string()],
                    TsParamPropParam::Assign(assign) => binding_names(&assign.left),
                },
            })
            .collect();
        self.with_scope(params, |this| node.visit_children_with(this));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        let params = node.params.iter().flat_map(binding_names).collect();
        self.with_scope(params, |this| node.visit_children_with(this));
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.with_scope(Vec::new(), |this| node.visit_children_with(this));
    }

    // Loop heads bind names for the loop only.
    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.with_scope(Vec::new(), |this| node.visit_children_with(this));
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        self.with_scope(Vec::new(), |this| node.visit_children_with(this));
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        self.with_scope(Vec::new(), |this| node.visit_children_with(this));
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        let params = node.param.as_ref().map(binding_names).unwrap_or_default();
        self.with_scope(params, |this| node.visit_children_with(this));
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.declare([(node.ident.sym.to_string(), Binding::Opaque)]);
        node.visit_children_with(self);
    }

    fn visit_class_decl(&mut self, node: &ClassDecl) {
        self.declare([(node.ident.sym.to_string(), Binding::Opaque)]);
        node.visit_children_with(self);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        // Initializers may contain call sites themselves.
        node.visit_children_with(self);
        self.declare(var_bindings(node));
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.is_target_callee(&node.callee) {
            self.record_call(node);
        }
        node.visit_children_with(self);
    }
}
