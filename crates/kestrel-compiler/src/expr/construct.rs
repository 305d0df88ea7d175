//! Construction expressions: `new T(...)`.
//!
//! Every `new` expression evaluates to a pointer-sized handle (`uintptr`)
//! to the new object, and the node is annotated with that type. There are
//! three lowerings:
//!
//! - **Buffers**: `new Array<E>(n)` and `new String(n)` allocate a block
//!   with a 4-byte element-count header followed by `n` elements. String
//!   elements are 2-byte code units.
//! - **Classes**: allocate the instance size, then call the constructor (if
//!   any) with the new pointer as its implicit first argument.
//! - **Templates**: instantiate with the written type arguments, then
//!   lower as a class.
//!
//! Construction never fails outright. Errors are reported and a trap
//! stands in for the handle.

use kestrel_ast::{Expr, NewExpr, TypeExpr};
use kestrel_core::{CompilationError, DataType, PointerWidth, Span, TypeHash, ValueCategory};

use super::calls::bind_arguments;
use super::{ExprCompiler, Result};
use crate::context::Resolved;
use crate::expr_info::ExprInfo;
use crate::type_resolver::TypeResolver;

/// Callee name that allocates a typed array buffer.
pub const ARRAY_CONSTRUCTOR: &str = "Array";
/// Callee name that allocates a string buffer.
pub const STRING_CONSTRUCTOR: &str = "String";
/// Size of the element-count prefix of array and string buffers.
pub const ARRAY_HEADER_SIZE: u32 = 4;
/// Size of a string code unit.
pub const STRING_ELEMENT_SIZE: u32 = 2;
/// Local holding the element count between allocation and header store.
pub const NEW_SIZE_LOCAL: &str = ".newsize";
/// Local holding the allocated buffer between header store and result.
pub const NEW_PTR_LOCAL: &str = ".newptr";

/// What a `new` expression constructs.
enum Construction<'ast> {
    Buffer {
        element: BufferElement<'ast>,
        count: &'ast Expr<'ast>,
    },
    Class(TypeHash),
    Template {
        template: TypeHash,
        type_args: &'ast [TypeExpr<'ast>],
    },
    Unsupported,
}

enum BufferElement<'ast> {
    Declared(&'ast TypeExpr<'ast>),
    /// A string code unit.
    CodeUnit,
}

/// Compile a construction expression, returning a `uintptr` handle.
#[cfg_attr(feature = "profiling", profiling::function)]
#[tracing::instrument(level = "trace", skip_all, fields(span = %node.span))]
pub(super) fn compile_new<'ast>(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    node: &'ast NewExpr<'ast>,
) -> ExprInfo {
    let handle = DataType::uintptr();
    node.annotate(handle);

    let result = match classify(compiler, node) {
        Construction::Buffer { element, count } => compile_buffer(compiler, element, count),
        Construction::Class(class) => compile_class(compiler, class, node),
        Construction::Template {
            template,
            type_args,
        } => instantiate(compiler, template, type_args, node.span)
            .and_then(|class| compile_class(compiler, class, node)),
        Construction::Unsupported => Err(CompilationError::UnsupportedConstruction { span: node.span }),
    };

    if let Err(error) = result {
        tracing::debug!(%error, "construction failed");
        compiler.trap(error);
    }
    ExprInfo::rvalue(handle)
}

/// Decide how to lower `node`. Buffer forms are recognized by name and
/// shape before any name resolution.
fn classify<'ast>(compiler: &ExprCompiler<'_, '_, '_>, node: &'ast NewExpr<'ast>) -> Construction<'ast> {
    let Some(name) = node.callee_name() else {
        return Construction::Unsupported;
    };

    match (name, node.type_args, node.args) {
        (ARRAY_CONSTRUCTOR, Some([element]), Some([count])) => {
            return Construction::Buffer {
                element: BufferElement::Declared(element),
                count,
            };
        }
        (STRING_CONSTRUCTOR, None | Some([]), Some([count])) => {
            return Construction::Buffer {
                element: BufferElement::CodeUnit,
                count,
            };
        }
        _ => {}
    }

    match compiler.ctx().resolve_symbol(name) {
        Resolved::Class(class) => Construction::Class(class),
        Resolved::Template(template) => Construction::Template {
            template,
            type_args: node.type_args.unwrap_or(&[]),
        },
        Resolved::Local(_)
        | Resolved::Primitive(_)
        | Resolved::Function(_)
        | Resolved::Unresolved => Construction::Unsupported,
    }
}

/// Resolve the type arguments and instantiate `template` with them.
fn instantiate(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    template: TypeHash,
    type_args: &[TypeExpr<'_>],
    span: Span,
) -> Result<TypeHash> {
    let type_args = TypeResolver::new(compiler.ctx_mut()).resolve_all(type_args)?;
    compiler.ctx_mut().instantiate_template(template, &type_args, span)
}

// ============================================================================
// Buffers
// ============================================================================

/// Allocate `header + element_size * count` bytes, store the count in the
/// header and leave the buffer pointer on the stack.
///
/// ```text
/// ptr.const 4
/// ptr.const element_size
/// <count as uintptr>
/// local.tee .newsize
/// ptr.mul
/// ptr.add
/// call allocator/1
/// local.tee .newptr
/// local.get .newsize
/// (convert i64->i32 on 64-bit targets)
/// i32.store offset=0 align=4
/// local.get .newptr
/// ```
fn compile_buffer(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    element: BufferElement<'_>,
    count: &Expr<'_>,
) -> Result<()> {
    let element_size = match element {
        BufferElement::CodeUnit => STRING_ELEMENT_SIZE,
        BufferElement::Declared(ty) => {
            let data_type = TypeResolver::new(compiler.ctx_mut()).resolve(ty)?;
            match compiler.ctx().layout_of(data_type) {
                Some(layout) => layout.size,
                None => {
                    return Err(CompilationError::UnsizedType {
                        name: compiler.ctx().type_name(data_type),
                        span: ty.span,
                    });
                }
            }
        }
    };

    let pointer = compiler.ctx().pointer_width();
    let allocator = compiler.ctx().options().allocator.clone();
    let scope = compiler.ctx_mut().scope_mut();
    let size_slot = scope.temporary(NEW_SIZE_LOCAL, DataType::uintptr());
    let ptr_slot = scope.temporary(NEW_PTR_LOCAL, DataType::uintptr());

    let emitter = compiler.emitter();
    emitter.emit_ptr_const(u64::from(ARRAY_HEADER_SIZE), pointer);
    emitter.emit_ptr_const(u64::from(element_size), pointer);
    compiler.check_or_trap(count, DataType::uintptr());

    let emitter = compiler.emitter();
    emitter.emit_tee_local(size_slot);
    emitter.emit_ptr_mul(pointer);
    emitter.emit_ptr_add(pointer);
    emitter.emit_call(&allocator, 1);
    emitter.emit_tee_local(ptr_slot);
    emitter.emit_get_local(size_slot);
    if pointer == PointerWidth::W64 {
        emitter.emit_convert(ValueCategory::I64, ValueCategory::I32, false);
    }
    emitter.emit_store(ValueCategory::I32, 0, ARRAY_HEADER_SIZE as u8);
    emitter.emit_get_local(ptr_slot);
    Ok(())
}

// ============================================================================
// Classes
// ============================================================================

/// Allocate an instance of `class` and run its constructor.
fn compile_class(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    class: TypeHash,
    node: &NewExpr<'_>,
) -> Result<()> {
    let span = node.span;
    let size = compiler
        .ctx_mut()
        .registry_mut()
        .initialize_class(class)
        .map_err(|error| CompilationError::Registration { error, span })?;

    let constructor = compiler
        .ctx()
        .registry()
        .constructor_of(class)
        .map(|ctor| ctor.def.clone());
    let argc = match &constructor {
        Some(ctor) => Some(u8::try_from(ctor.param_count() + 1).map_err(|_| {
            CompilationError::Internal {
                message: format!("constructor '{}' has too many parameters", ctor.name),
            }
        })?),
        None => None,
    };

    let pointer = compiler.ctx().pointer_width();
    let allocator = compiler.ctx().options().allocator.clone();
    let emitter = compiler.emitter();
    emitter.emit_ptr_const(u64::from(size), pointer);
    emitter.emit_call(&allocator, 1);

    if let (Some(ctor), Some(argc)) = (constructor, argc) {
        bind_arguments(compiler, &ctor.params, node.args.unwrap_or(&[]), span);
        compiler.emitter().emit_call(&ctor.name, argc);
    }
    Ok(())
}
