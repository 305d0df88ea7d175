//! Function call compilation and argument binding.
//!
//! Calls and constructor invocations share [`bind_arguments`], which lowers
//! syntactic arguments against a parameter list positionally.

use kestrel_ast::{CallExpr, Expr};
use kestrel_core::{CompilationError, ConstValue, DataType, Param, PrimitiveKind, Span, ValueCategory};

use super::{ExprCompiler, Result};
use crate::expr_info::ExprInfo;

/// Compile a call to a registered function.
pub(super) fn compile_call(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    call: &CallExpr<'_>,
) -> Result<ExprInfo> {
    let name = call.callee.as_ident().unwrap_or("<expression>");
    let Some(func) = compiler.ctx().registry().lookup_function(name) else {
        return Err(CompilationError::UnknownFunction {
            name: name.to_string(),
            span: call.callee.span(),
        });
    };
    let def = func.def.clone();
    let argc = u8::try_from(def.param_count()).map_err(|_| CompilationError::Internal {
        message: format!("'{}' has too many parameters", def.name),
    })?;

    bind_arguments(compiler, &def.params, call.args, call.span);
    compiler.emitter().emit_call(&def.name, argc);
    Ok(ExprInfo::rvalue(def.return_type))
}

/// Lower `args` against `params`, leaving exactly one value per parameter
/// on the stack.
///
/// Arguments are compiled left to right and converted to their parameter
/// types. A missing argument takes the parameter's default when it has one
/// and a trap otherwise; the first trapped slot reports a single "too few
/// arguments" error. Surplus arguments are reported once as "too many
/// arguments" and, unless the compiler is configured to evaluate them, are
/// never compiled.
pub(crate) fn bind_arguments(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    params: &[Param],
    args: &[Expr<'_>],
    span: Span,
) {
    let (k, n) = (params.len(), args.len());
    let mut reported_missing = false;

    for (i, param) in params.iter().enumerate() {
        if let Some(arg) = args.get(i) {
            compiler.check_or_trap(arg, param.data_type);
            continue;
        }
        if let Some(default) = param.default {
            emit_default(compiler, default, param.data_type, span);
            continue;
        }
        if !reported_missing {
            reported_missing = true;
            let required = params
                .iter()
                .rposition(|p| p.default.is_none())
                .map_or(0, |last| last + 1);
            compiler.ctx_mut().report(CompilationError::TooFewArguments {
                expected: required,
                got: n,
                span,
            });
        }
        compiler.emitter().emit_trap();
    }

    if n > k {
        compiler.ctx_mut().report(CompilationError::TooManyArguments {
            expected: k,
            got: n,
            span,
        });
        if compiler.ctx().options().evaluate_excess_arguments {
            for arg in &args[k..] {
                if let Some(info) = compiler.infer_or_trap(arg)
                    && !info.data_type.is_void()
                {
                    compiler.emitter().emit_pop();
                }
            }
        }
    }
}

/// Emit a parameter default as a value of the parameter's type.
fn emit_default(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    default: ConstValue,
    data_type: DataType,
    span: Span,
) {
    let Some(layout) = compiler.ctx().layout_of(data_type) else {
        let name = compiler.ctx().type_name(data_type);
        compiler.trap(CompilationError::UnsizedType { name, span });
        return;
    };
    let emitter = compiler.emitter();
    match (default, layout.category) {
        (ConstValue::Float(value), ValueCategory::F32) => emitter.emit_f32(value as f32),
        (ConstValue::Float(value), ValueCategory::F64) => emitter.emit_f64(value),
        (ConstValue::Float(value), category) => emitter.emit_int_as(value as i64, category),
        (ConstValue::Int(value), category) => {
            let value = match data_type.primitive() {
                Some(kind) => wrap_to(kind, value),
                None => value,
            };
            emitter.emit_int_as(value, category);
        }
        (ConstValue::Bool(value), category) => emitter.emit_int_as(i64::from(value), category),
    }
}

/// Wrap an integer into the value range of a sub-word kind.
fn wrap_to(kind: PrimitiveKind, value: i64) -> i64 {
    match kind {
        PrimitiveKind::Int8 => i64::from(value as i8),
        PrimitiveKind::Uint8 => i64::from(value as u8),
        PrimitiveKind::Int16 => i64::from(value as i16),
        PrimitiveKind::Uint16 => i64::from(value as u16),
        PrimitiveKind::Bool => i64::from(value != 0),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use kestrel_ast::AstBuilder;
    use kestrel_core::PointerWidth;

    use crate::bytecode::{Constant, ConstantPool, Instruction, OpCode};
    use crate::context::CompilationContext;
    use crate::emit::BytecodeEmitter;
    use crate::expr::{ExprCompiler, test_support};
    use crate::options::CompilerOptions;

    use super::*;

    #[test]
    fn call_converts_arguments() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W32);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);

        let info = ExprCompiler::new(&mut ctx, &mut emitter)
            .infer(&b.call("h", &[b.call("f", &[])]))
            .unwrap();

        assert!(info.data_type.is_void());
        assert!(ctx.diagnostics().is_empty());
        let chunk = emitter.finish();
        chunk.assert_opcodes(&[OpCode::Call, OpCode::Mask16, OpCode::Call]);
        assert_eq!(
            chunk.disassemble(&constants).unwrap(),
            vec!["call f/0", "i32.mask16", "call h/1"]
        );
    }

    #[test]
    fn unknown_function() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W32);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);

        let result = ExprCompiler::new(&mut ctx, &mut emitter).infer(&b.call("nope", &[]));
        assert!(matches!(result, Err(CompilationError::UnknownFunction { name, .. }) if name == "nope"));
        assert!(emitter.finish().is_empty());
    }

    #[test]
    fn missing_arguments_trap_after_single_report() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W32);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);
        let span = Span::new(9, 1, 1);
        let params = [
            Param::new("a", DataType::int32()),
            Param::new("b", DataType::int32()),
            Param::new("c", DataType::int32()),
        ];

        bind_arguments(
            &mut ExprCompiler::new(&mut ctx, &mut emitter),
            &params,
            &[b.int(1)],
            span,
        );

        assert_eq!(
            ctx.diagnostics().errors(),
            &[CompilationError::TooFewArguments {
                expected: 3,
                got: 1,
                span
            }]
        );
        emitter
            .finish()
            .assert_opcodes(&[OpCode::Constant, OpCode::Trap, OpCode::Trap]);
    }

    #[test]
    fn defaults_fill_missing_arguments() {
        let mut registry = test_support::registry(PointerWidth::W32);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);
        let params = [
            Param::with_default("scale", DataType::double(), ConstValue::Int(2)),
            Param::with_default("small", DataType::from(PrimitiveKind::Int8), ConstValue::Int(200)),
            Param::with_default("flag", DataType::bool(), ConstValue::Bool(true)),
        ];

        bind_arguments(
            &mut ExprCompiler::new(&mut ctx, &mut emitter),
            &params,
            &[],
            Span::default(),
        );

        assert!(ctx.diagnostics().is_empty());
        let chunk = emitter.finish();
        assert_eq!(
            chunk.decode().unwrap(),
            vec![
                Instruction::Constant(0),
                Instruction::Constant(1),
                Instruction::Constant(2)
            ]
        );
        assert_eq!(
            constants.constants(),
            &[Constant::F64(2.0), Constant::I32(-56), Constant::I32(1)]
        );
    }

    #[test]
    fn excess_arguments_are_not_compiled_by_default() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W32);
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);
        let params = [Param::new("a", DataType::int32())];

        bind_arguments(
            &mut ExprCompiler::new(&mut ctx, &mut emitter),
            &params,
            &[b.int(1), b.call("f", &[]), b.call("g", &[])],
            Span::default(),
        );

        assert!(matches!(
            ctx.diagnostics().errors(),
            [CompilationError::TooManyArguments {
                expected: 1,
                got: 3,
                ..
            }]
        ));
        emitter.finish().assert_opcodes(&[OpCode::Constant]);
    }

    #[test]
    fn excess_arguments_can_be_evaluated_and_dropped() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = test_support::registry(PointerWidth::W32);
        let options = CompilerOptions::default().with_evaluate_excess_arguments(true);
        let mut ctx = CompilationContext::new(&mut registry, options);
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);

        bind_arguments(
            &mut ExprCompiler::new(&mut ctx, &mut emitter),
            &[],
            &[b.call("f", &[]), b.call("h", &[b.int(1)])],
            Span::default(),
        );

        assert_eq!(ctx.diagnostics().error_count(), 1);
        emitter.finish().assert_opcodes(&[
            OpCode::Call,
            OpCode::Pop,
            OpCode::Constant,
            OpCode::Call,
        ]);
    }
}
