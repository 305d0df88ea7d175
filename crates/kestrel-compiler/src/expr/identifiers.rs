//! Identifier expression compilation.

use kestrel_ast::IdentExpr;
use kestrel_core::CompilationError;

use super::{ExprCompiler, Result};
use crate::expr_info::ExprInfo;

/// Load a local variable or parameter.
pub(super) fn compile_ident(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    ident: &IdentExpr<'_>,
) -> Result<ExprInfo> {
    let name = ident.ident.name;
    let Some(var) = compiler.ctx().scope().get(name) else {
        return Err(CompilationError::UnknownVariable {
            name: name.to_string(),
            span: ident.span,
        });
    };
    let (slot, data_type) = (var.slot, var.data_type);
    compiler.emitter().emit_get_local(slot);
    Ok(ExprInfo::local(data_type))
}
