//! Kestrel
//!
//! Compiles typed scripts to a compact stack bytecode, with first-class
//! lowering of construction expressions:
//!
//! - `new T(args)` allocates an instance of class `T` and runs its constructor
//! - `new Box<int>(args)` instantiates a class template on demand
//! - `new Array<T>(n)` and `new String(n)` allocate length-prefixed buffers
//!
//! Every construction evaluates to a pointer-sized handle (`uintptr`).
//!
//! # Example
//!
//! ```
//! use kestrel::prelude::*;
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let script = b.script(&[b.function(
//!     "make",
//!     &[b.param("n", b.ty("int"))],
//!     Some(b.ty("uintptr")),
//!     &[b.ret(Some(b.new_generic("Array", &[b.ty("double")], &[b.var("n")])))],
//! )]);
//!
//! let mut registry = SymbolRegistry::with_primitives(PointerWidth::W64);
//! let result = Compiler::compile(&script, &mut registry, CompilerOptions::default());
//! assert!(result.is_success());
//! ```

pub use bumpalo;
pub use kestrel_ast as ast;
pub use kestrel_compiler as compiler;
pub use kestrel_core as core;
pub use kestrel_registry as registry;

pub use kestrel_compiler::{
    CompilationResult, CompiledFunction, CompiledModule, Compiler, CompilerOptions,
};
pub use kestrel_core::{CompilationError, DataType, PointerWidth, RegistrationError, Span};
pub use kestrel_registry::SymbolRegistry;

/// Everything needed to register host types, build a script and compile it.
pub mod prelude {
    pub use bumpalo::Bump;
    pub use kestrel_ast::{AstBuilder, Expr, FunctionDecl, Script, Stmt, TypeExpr};
    pub use kestrel_compiler::bytecode::{BytecodeChunk, ConstantPool, Instruction, OpCode};
    pub use kestrel_compiler::{
        CompilationResult, CompiledFunction, CompiledModule, Compiler, CompilerOptions,
    };
    pub use kestrel_core::{
        ClassEntry, ClassTemplateEntry, CompilationError, ConstValue, DataType, FunctionDef,
        FunctionEntry, Param, PointerWidth, PrimitiveKind, Span, TypeHash,
    };
    pub use kestrel_registry::SymbolRegistry;
}
