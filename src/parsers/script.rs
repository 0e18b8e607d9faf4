//! Script extractor built on the OXC parser

use super::{push_unique, Extractor};
use crate::error::{Result, WalkerError};
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, CallExpression, ExportAllDeclaration, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportExpression,
};
use oxc_ast_visit::{walk, Visit};
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use std::path::Path;

/// Collects `import`, `export … from`, `require()`, `require.resolve()` and
/// literal `import()` specifiers
///
/// The re-export forms and literal `import()` are collected deliberately, on
/// top of the classic `import`/`require`/`require.resolve` set.
///
/// Every file is parsed as a module with JSX and TypeScript syntax enabled,
/// whatever its extension.
pub struct ScriptExtractor {
    parse_options: ParseOptions,
}

impl ScriptExtractor {
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions {
                allow_return_outside_function: true,
                ..ParseOptions::default()
            },
        }
    }
}

impl Default for ScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for ScriptExtractor {
    fn extract(&self, source: &str, path: &Path) -> Result<Vec<String>> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::tsx())
            .with_options(self.parse_options.clone())
            .parse();

        if ret.panicked || !ret.errors.is_empty() {
            return Err(WalkerError::syntax_error(path, describe(&ret.errors)));
        }

        let mut collector = SpecifierCollector::default();
        collector.visit_program(&ret.program);

        tracing::trace!(
            "extracted {} script specifiers from {}",
            collector.specifiers.len(),
            path.display()
        );
        Ok(collector.specifiers)
    }
}

fn describe(errors: &[OxcDiagnostic]) -> String {
    match errors.first() {
        Some(first) if errors.len() > 1 => {
            format!("{} (and {} more)", first, errors.len() - 1)
        }
        Some(first) => first.to_string(),
        None => "parser aborted".to_string(),
    }
}

#[derive(Default)]
struct SpecifierCollector {
    specifiers: Vec<String>,
}

impl SpecifierCollector {
    fn add(&mut self, specifier: &str) {
        push_unique(&mut self.specifiers, specifier);
    }
}

fn is_require(callee: &Expression<'_>) -> bool {
    match callee {
        Expression::Identifier(ident) => ident.name.as_str() == "require",
        Expression::StaticMemberExpression(member) => {
            matches!(&member.object, Expression::Identifier(obj) if obj.name.as_str() == "require")
                && member.property.name.as_str() == "resolve"
        }
        _ => false,
    }
}

impl<'a> Visit<'a> for SpecifierCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.add(decl.source.value.as_str());
        walk::walk_import_declaration(self, decl);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.add(source.value.as_str());
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.add(decl.source.value.as_str());
        walk::walk_export_all_declaration(self, decl);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        if let Expression::StringLiteral(lit) = &expr.source {
            self.add(lit.value.as_str());
        }
        walk::walk_import_expression(self, expr);
    }

    fn visit_call_expression(&mut self, expr: &CallExpression<'a>) {
        if is_require(&expr.callee) {
            if let Some(Argument::StringLiteral(lit)) = expr.arguments.first() {
                self.add(lit.value.as_str());
            }
        }
        walk::walk_call_expression(self, expr);
    }
}
