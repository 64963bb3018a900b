//! Source-to-target name tables

use crate::parser::ast::BinOp;

/// Return type that makes a definition a `procedure`.
pub const VOID: &str = "void";

/// Map a source type name to its target spelling. Unknown names pass through.
pub fn pascal_type(name: &str) -> &str {
    match name {
        "int" => "integer",
        "float" => "real",
        "char" => "char",
        "bool" => "boolean",
        "string" => "string",
        other => other,
    }
}

/// Target spelling of a binary operator
pub fn pascal_operator(op: BinOp) -> &'static str {
    match op {
        BinOp::Eq => "=",
        BinOp::Ne => "<>",
        BinOp::And => "and",
        BinOp::Or => "or",
        BinOp::Mod => "mod",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types() {
        assert_eq!(pascal_type("int"), "integer");
        assert_eq!(pascal_type("float"), "real");
        assert_eq!(pascal_type("bool"), "boolean");
        assert_eq!(pascal_type("Point"), "Point");
    }

    #[test]
    fn test_operators() {
        assert_eq!(pascal_operator(BinOp::Eq), "=");
        assert_eq!(pascal_operator(BinOp::Ne), "<>");
        assert_eq!(pascal_operator(BinOp::Or), "or");
        assert_eq!(pascal_operator(BinOp::Mod), "mod");
        assert_eq!(pascal_operator(BinOp::Le), "<=");
    }
}
