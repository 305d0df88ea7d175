//! Function compiler for generating bytecode from function bodies.
//!
//! [`FunctionCompiler`] compiles a single function's body to bytecode:
//!
//! - Parameters become the first local slots, in order
//! - `expr;` evaluates the expression and drops any value
//! - `[T] name = init;` declares a local (the type is inferred when omitted)
//! - `return [value];` converts the value to the declared return type
//!
//! Falling off the end returns from `void` functions and traps otherwise.
//!
//! # Example
//!
//! ```ignore
//! let compiled = FunctionCompiler::new(&mut ctx, &mut constants, &def)
//!     .compile(decl.body, decl.span);
//! ```

use kestrel_ast::{ReturnStmt, Stmt, VarDeclStmt};
use kestrel_core::{CompilationError, DataType, FunctionDef, Span};

use crate::bytecode::{BytecodeChunk, ConstantPool};
use crate::context::CompilationContext;
use crate::emit::BytecodeEmitter;
use crate::expr::ExprCompiler;
use crate::type_resolver::TypeResolver;

/// A compiled function.
#[derive(Debug)]
pub struct CompiledFunction {
    /// Function name.
    pub name: String,
    /// Compiled bytecode.
    pub bytecode: BytecodeChunk,
    /// Number of leading local slots holding parameters.
    pub param_count: usize,
    /// Type of every local slot: parameters, variables and temporaries.
    pub locals: Vec<DataType>,
}

impl CompiledFunction {
    /// Number of local slots the function's frame needs.
    pub fn local_count(&self) -> usize {
        self.locals.len()
    }
}

/// Compiles a single function body to bytecode.
pub struct FunctionCompiler<'a, 'reg, 'pool> {
    /// Compilation context for type lookups and local scope
    ctx: &'a mut CompilationContext<'reg>,
    /// Bytecode emitter
    emitter: BytecodeEmitter<'pool>,
    /// Function definition (signature)
    def: &'a FunctionDef,
}

impl<'a, 'reg, 'pool> FunctionCompiler<'a, 'reg, 'pool> {
    /// Create a new function compiler writing constants into `constants`.
    pub fn new(
        ctx: &'a mut CompilationContext<'reg>,
        constants: &'pool mut ConstantPool,
        def: &'a FunctionDef,
    ) -> Self {
        Self {
            ctx,
            emitter: BytecodeEmitter::new(constants),
            def,
        }
    }

    /// Compile `body` and return the finished function.
    ///
    /// Errors are reported to the context's diagnostics; the function is
    /// always produced.
    #[cfg_attr(feature = "profiling", profiling::function)]
    #[tracing::instrument(level = "debug", skip_all, fields(function = %self.def.name))]
    pub fn compile(mut self, body: &[Stmt<'_>], span: Span) -> CompiledFunction {
        self.ctx.begin_function();
        for param in &self.def.params {
            if let Err(error) = self.ctx.scope_mut().declare(&param.name, param.data_type, span) {
                self.ctx.report(error);
            }
        }

        for stmt in body {
            self.emitter.set_line(stmt.span().line);
            self.compile_stmt(stmt);
        }

        if !matches!(body.last(), Some(Stmt::Return(_))) {
            if self.def.return_type.is_void() {
                self.emitter.emit_return_void();
            } else {
                self.emitter.emit_trap();
            }
        }

        CompiledFunction {
            name: self.def.name.clone(),
            bytecode: self.emitter.finish(),
            param_count: self.def.params.len(),
            locals: self.ctx.scope().slot_types().to_vec(),
        }
    }

    fn compile_stmt(&mut self, stmt: &Stmt<'_>) {
        match stmt {
            Stmt::Expr(s) => {
                let info = ExprCompiler::new(self.ctx, &mut self.emitter).infer_or_trap(s.expr);
                if let Some(info) = info
                    && !info.data_type.is_void()
                {
                    self.emitter.emit_pop();
                }
            }
            Stmt::VarDecl(decl) => self.compile_var_decl(decl),
            Stmt::Return(ret) => self.compile_return(ret),
        }
    }

    fn compile_var_decl(&mut self, decl: &VarDeclStmt<'_>) {
        let declared = match &decl.ty {
            Some(ty) => match TypeResolver::new(self.ctx).resolve(ty) {
                Ok(data_type) => Some(data_type),
                Err(error) => {
                    self.ctx.report(error);
                    self.emitter.emit_trap();
                    return;
                }
            },
            None => None,
        };

        let mut compiler = ExprCompiler::new(self.ctx, &mut self.emitter);
        let data_type = match declared {
            Some(expected) => compiler.check_or_trap(decl.init, expected).data_type,
            None => match compiler.infer_or_trap(decl.init) {
                Some(info) => info.data_type,
                None => return,
            },
        };

        if data_type.is_void() {
            let name = self.ctx.type_name(data_type);
            self.ctx.report(CompilationError::UnsizedType {
                name,
                span: decl.span,
            });
            self.emitter.emit_trap();
            return;
        }

        match self
            .ctx
            .scope_mut()
            .declare(decl.name.name, data_type, decl.name.span)
        {
            Ok(slot) => self.emitter.emit_set_local(slot),
            Err(error) => {
                self.ctx.report(error);
                self.emitter.emit_pop();
            }
        }
    }

    fn compile_return(&mut self, ret: &ReturnStmt<'_>) {
        let return_type = self.def.return_type;
        match ret.value {
            Some(value) => {
                ExprCompiler::new(self.ctx, &mut self.emitter).check_or_trap(value, return_type);
            }
            None if !return_type.is_void() => {
                let error = CompilationError::ConversionFailure {
                    from: self.ctx.type_name(DataType::void()),
                    to: self.ctx.type_name(return_type),
                    span: ret.span,
                };
                self.ctx.report(error);
                self.emitter.emit_trap();
            }
            None => {}
        }

        if return_type.is_void() {
            self.emitter.emit_return_void();
        } else {
            self.emitter.emit_return();
        }
    }
}
