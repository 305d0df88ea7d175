//! Kestrel Compiler
//!
//! A 2-pass bytecode compiler centred on construction expressions
//! (`new T(...)`, `new Array<T>(n)`, `new String(n)`).
//!
//! ## Architecture
//!
//! - **Pass 1 (Signatures)**: Resolve and register every function signature
//! - **Pass 2 (Compilation)**: Type check function bodies and generate bytecode
//!
//! Errors never stop compilation. They are collected in the result, and the
//! offending code is replaced by traps.
//!
//! ## Modules
//!
//! - [`bytecode`]: Bytecode types (OpCode, BytecodeChunk, ConstantPool, Instruction)
//! - [`context`]: Compilation context with name resolution and diagnostics
//! - [`conversion`]: Implicit conversions between primitives and handles
//! - [`emit`]: High-level bytecode emitter
//! - [`expr`]: Expression compiler with bidirectional type checking
//! - [`function_compiler`]: Function body compilation
//! - [`scope`]: Local scope management for function compilation
//! - [`template`]: Class template instantiation
//! - [`type_resolver`]: Type resolution from AST to semantic types

pub mod bytecode;
pub mod context;
pub mod conversion;
pub mod emit;
pub mod expr;
mod expr_info;
pub mod function_compiler;
mod options;
pub mod scope;
pub mod template;
pub mod type_resolver;

pub use context::{CompilationContext, Resolved};
pub use conversion::{
    Conversion, ConversionKind, emit_conversion, find_conversion, find_handle_conversion,
    find_primitive_conversion,
};
pub use emit::BytecodeEmitter;
pub use expr::ExprCompiler;
pub use expr_info::{ExprInfo, ValueSource};
pub use function_compiler::{CompiledFunction, FunctionCompiler};
pub use options::CompilerOptions;
pub use scope::{LocalScope, LocalVar};
pub use template::TemplateInstanceCache;
pub use type_resolver::TypeResolver;

// Re-export CompilationError from core for convenience
pub use kestrel_core::CompilationError;

use kestrel_ast::{FunctionDecl, Script};
use kestrel_core::{DataType, FunctionDef, FunctionEntry, Param};
use kestrel_registry::SymbolRegistry;

/// A compiled module containing bytecode and metadata.
#[derive(Debug, Default)]
pub struct CompiledModule {
    /// Compiled functions, in declaration order.
    pub functions: Vec<CompiledFunction>,
    /// Module-level constant pool.
    pub constants: bytecode::ConstantPool,
}

impl CompiledModule {
    /// Find a compiled function by name.
    pub fn function(&self, name: &str) -> Option<&CompiledFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Result of compilation.
#[derive(Debug)]
pub struct CompilationResult {
    /// The compiled module.
    pub module: CompiledModule,
    /// Any errors that occurred, in the order they were found.
    pub errors: Vec<CompilationError>,
}

impl CompilationResult {
    /// Check if compilation succeeded (no errors).
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The main compiler entry point.
pub struct Compiler;

impl Compiler {
    /// Compile a script against `registry`.
    ///
    /// Script functions, template instances and their constructors are
    /// registered into `registry`, so a later script compiled against the
    /// same registry can call them and reuses the instance classes.
    #[cfg_attr(feature = "profiling", profiling::function)]
    #[tracing::instrument(level = "debug", skip_all, fields(functions = script.functions().len()))]
    pub fn compile(
        script: &Script<'_>,
        registry: &mut SymbolRegistry,
        options: CompilerOptions,
    ) -> CompilationResult {
        let mut ctx = CompilationContext::new(registry, options);
        let mut constants = bytecode::ConstantPool::new();

        // Pass 1: signatures
        let mut signatures = Vec::with_capacity(script.functions().len());
        for decl in script.functions() {
            match register_signature(&mut ctx, decl) {
                Ok(def) => signatures.push((decl, def)),
                Err(error) => ctx.report(error),
            }
        }

        // Pass 2: bodies
        let functions = signatures
            .iter()
            .map(|(decl, def)| {
                FunctionCompiler::new(&mut ctx, &mut constants, def).compile(decl.body, decl.span)
            })
            .collect();

        let errors = ctx.into_diagnostics().into_errors();
        tracing::debug!(errors = errors.len(), "compilation finished");
        CompilationResult {
            module: CompiledModule {
                functions,
                constants,
            },
            errors,
        }
    }
}

/// Resolve a function's signature and register it.
fn register_signature(
    ctx: &mut CompilationContext<'_>,
    decl: &FunctionDecl<'_>,
) -> Result<FunctionDef, CompilationError> {
    let mut resolver = TypeResolver::new(ctx);
    let params = decl
        .params
        .iter()
        .map(|p| Ok(Param::new(p.name.name, resolver.resolve(&p.ty)?)))
        .collect::<Result<Vec<_>, CompilationError>>()?;
    let return_type = match &decl.return_type {
        Some(ty) => resolver.resolve(ty)?,
        None => DataType::void(),
    };

    let def = FunctionDef::new(decl.name.name, params, return_type);
    ctx.registry_mut()
        .register_function(FunctionEntry::function(def.clone()))
        .map_err(|error| CompilationError::Registration {
            error,
            span: decl.name.span,
        })?;
    Ok(def)
}
