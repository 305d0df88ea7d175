//! Expression compiler using bidirectional type checking.
//!
//! The [`ExprCompiler`] compiles AST expressions to bytecode using a
//! bidirectional type checking approach:
//! - `infer()` - Synthesizes type from expression (bottom-up)
//! - `check()` - Verifies expression against expected type (top-down)
//!
//! Errors never abort compilation. Where a value is required but could not
//! be produced, the `*_or_trap` entry points report the error and emit a
//! trap in its place, so the surrounding code keeps its shape.
//!
//! # Example
//!
//! ```ignore
//! let mut compiler = ExprCompiler::new(&mut ctx, &mut emitter);
//!
//! // Infer type of expression
//! let info = compiler.infer(&expr)?;
//!
//! // Check expression against expected type
//! let info = compiler.check(&expr, DataType::uintptr())?;
//! ```

mod calls;
mod construct;
mod identifiers;
mod literals;

pub use construct::{
    ARRAY_CONSTRUCTOR, ARRAY_HEADER_SIZE, NEW_PTR_LOCAL, NEW_SIZE_LOCAL, STRING_CONSTRUCTOR,
    STRING_ELEMENT_SIZE,
};

use kestrel_ast::{Expr, LiteralKind};
use kestrel_core::{CompilationError, DataType};

use crate::context::CompilationContext;
use crate::conversion::{emit_conversion, find_conversion};
use crate::emit::BytecodeEmitter;
use crate::expr_info::ExprInfo;

type Result<T> = std::result::Result<T, CompilationError>;

/// Compiles expressions using bidirectional type checking.
///
/// The compiler maintains references to the compilation context and
/// bytecode emitter.
pub struct ExprCompiler<'a, 'reg, 'pool> {
    /// Compilation context with type registry, local scope and diagnostics
    ctx: &'a mut CompilationContext<'reg>,
    /// Bytecode emitter
    emitter: &'a mut BytecodeEmitter<'pool>,
}

impl<'a, 'reg, 'pool> ExprCompiler<'a, 'reg, 'pool> {
    /// Create a new expression compiler.
    pub fn new(
        ctx: &'a mut CompilationContext<'reg>,
        emitter: &'a mut BytecodeEmitter<'pool>,
    ) -> Self {
        Self { ctx, emitter }
    }

    /// Synthesize type from expression (infer mode).
    ///
    /// This is the "synthesis" direction of bidirectional type checking.
    /// The type is determined by the expression itself.
    pub fn infer(&mut self, expr: &Expr<'_>) -> Result<ExprInfo> {
        self.emitter.set_line(expr.span().line);
        match expr {
            Expr::Literal(lit) => Ok(literals::compile_literal(self, &lit.kind)),
            Expr::Ident(ident) => identifiers::compile_ident(self, ident),
            Expr::Call(call) => calls::compile_call(self, call),
            Expr::New(node) => Ok(construct::compile_new(self, node)),
            Expr::Paren(p) => self.infer(p.expr),
        }
    }

    /// Check expression against expected type (check mode).
    ///
    /// This is the "checking" direction of bidirectional type checking.
    /// The expected type guides literal typing and enables implicit
    /// conversions.
    pub fn check(&mut self, expr: &Expr<'_>, expected: DataType) -> Result<ExprInfo> {
        match expr {
            Expr::Paren(p) => return self.check(p.expr, expected),
            Expr::Literal(lit) => {
                if let LiteralKind::Int(value) = lit.kind
                    && let Some(info) = literals::check_int_literal(self, value, expected)
                {
                    return Ok(info);
                }
            }
            _ => {}
        }

        let info = self.infer(expr)?;

        // Exact type match - no conversion needed
        if info.data_type == expected {
            return Ok(info);
        }

        match find_conversion(info.data_type, expected, self.ctx.registry()) {
            Some(conversion) => {
                let pointer = self.ctx.pointer_width();
                emit_conversion(self.emitter, &conversion, pointer);
                Ok(info.with_type(expected))
            }
            None => Err(CompilationError::ConversionFailure {
                from: self.ctx.type_name(info.data_type),
                to: self.ctx.type_name(expected),
                span: expr.span(),
            }),
        }
    }

    /// Check `expr` against `expected`; on failure report the error and
    /// emit a trap standing in for the value.
    pub fn check_or_trap(&mut self, expr: &Expr<'_>, expected: DataType) -> ExprInfo {
        match self.check(expr, expected) {
            Ok(info) => info,
            Err(error) => {
                self.trap(error);
                ExprInfo::rvalue(expected)
            }
        }
    }

    /// Infer `expr`; on failure report the error, emit a trap and return `None`.
    pub fn infer_or_trap(&mut self, expr: &Expr<'_>) -> Option<ExprInfo> {
        match self.infer(expr) {
            Ok(info) => Some(info),
            Err(error) => {
                self.trap(error);
                None
            }
        }
    }

    /// Report `error` and emit a trap.
    pub fn trap(&mut self, error: CompilationError) {
        self.ctx.report(error);
        self.emitter.emit_trap();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the compilation context (immutable).
    pub fn ctx(&self) -> &CompilationContext<'reg> {
        self.ctx
    }

    /// Get the compilation context (mutable).
    pub fn ctx_mut(&mut self) -> &mut CompilationContext<'reg> {
        self.ctx
    }

    /// Get the bytecode emitter.
    pub fn emitter(&mut self) -> &mut BytecodeEmitter<'pool> {
        self.emitter
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use kestrel_ast::AstBuilder;
    use kestrel_core::{PointerWidth, Span};

    use crate::bytecode::{ConstantPool, OpCode};
    use crate::options::CompilerOptions;

    #[test]
    fn check_converts_implicitly() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W64);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        ctx.scope_mut()
            .declare("n", DataType::int32(), Span::default())
            .unwrap();
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);

        let info = ExprCompiler::new(&mut ctx, &mut emitter)
            .check(&b.var("n"), DataType::uintptr())
            .unwrap();

        assert_eq!(info.data_type, DataType::uintptr());
        emitter
            .finish()
            .assert_opcodes(&[OpCode::GetLocal, OpCode::Convert]);
    }

    #[test]
    fn check_reports_impossible_conversion() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W32);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);

        let info = ExprCompiler::new(&mut ctx, &mut emitter)
            .check_or_trap(&b.double(1.5), DataType::bool());

        assert_eq!(info.data_type, DataType::bool());
        assert!(matches!(
            ctx.diagnostics().errors(),
            [CompilationError::ConversionFailure { from, to, .. }] if from == "double" && to == "bool"
        ));
        emitter
            .finish()
            .assert_opcodes(&[OpCode::Constant, OpCode::Trap]);
    }

    #[test]
    fn parenthesized_literal_takes_expected_type() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W64);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);

        let info = ExprCompiler::new(&mut ctx, &mut emitter)
            .check(&b.paren(b.int(12)), DataType::uintptr())
            .unwrap();

        assert_eq!(info.data_type, DataType::uintptr());
        emitter.finish().assert_opcodes(&[OpCode::Constant]);
        assert_eq!(constants.get(0), Some(&crate::bytecode::Constant::I64(12)));
    }

    #[test]
    fn infer_or_trap_returns_none_on_error() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W32);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);

        let info = ExprCompiler::new(&mut ctx, &mut emitter).infer_or_trap(&b.var("missing"));

        assert_eq!(info, None);
        assert_eq!(ctx.diagnostics().error_count(), 1);
        emitter.finish().assert_opcodes(&[OpCode::Trap]);
    }
}
