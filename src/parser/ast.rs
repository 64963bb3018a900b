// AST (Abstract Syntax Tree) definitions for the translator

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    /// Operator spelling in the source language.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    /// Binding strength, higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 3,
            BinOp::Add | BinOp::Sub => 4,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 5,
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod
        )
    }
}

/// Declared type of a variable or parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// A bare type name: `int`, `string`, or a user name
    Named {
        name: String,
        location: SourceLocation,
    },
    /// Fixed-size array of a named element type: `int[10]`
    Complex {
        name: String,
        size: usize,
        location: SourceLocation,
    },
}

impl TypeSpec {
    /// The type name looked up in the scope chain (element type for arrays).
    pub fn base_name(&self) -> &str {
        match self {
            TypeSpec::Named { name, .. } | TypeSpec::Complex { name, .. } => name,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            TypeSpec::Named { location, .. } | TypeSpec::Complex { location, .. } => *location,
        }
    }
}

/// Variable or parameter declaration: `[const] type name`
#[derive(Debug, Clone)]
pub struct Declaration {
    pub ty: TypeSpec,
    pub name: String,
    pub is_const: bool,
    pub location: SourceLocation,
}

/// Formal parameter list of a function definition
#[derive(Debug, Clone, Default)]
pub struct FormalParams {
    pub params: Vec<Declaration>,
}

/// Argument list of a function call
#[derive(Debug, Clone, Default)]
pub struct ActualParams {
    pub args: Vec<AstNode>,
}

/// A `{ ... }` delimited statement sequence
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub statements: Vec<AstNode>,
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone)]
pub enum AstNode {
    // Declarations
    Declaration(Declaration),
    /// `int a = 1, b, c = a;` -- declarations interleaved with their initializers
    MultipleDeclarations {
        items: Vec<AstNode>,
        location: SourceLocation,
    },
    Function {
        return_type: String,
        name: String,
        params: FormalParams,
        body: Block,
        location: SourceLocation,
    },

    // Statements
    Assignment {
        target: Box<AstNode>,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    If {
        condition: Box<AstNode>,
        body: Block,
        location: SourceLocation,
    },
    While {
        condition: Box<AstNode>,
        body: Block,
        location: SourceLocation,
    },
    ElseBlock {
        body: Block,
        location: SourceLocation,
    },
    Return {
        value: Box<AstNode>,
        location: SourceLocation,
    },
    Cin {
        targets: Vec<AstNode>,
        location: SourceLocation,
    },
    Cout {
        items: Vec<AstNode>,
        location: SourceLocation,
    },
    Comment {
        text: String,
        location: SourceLocation,
    },

    // Expressions
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    UnaryMinus {
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    Not {
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    Var {
        name: String,
        location: SourceLocation,
    },
    /// Bare identifier used as a stream target
    IdRef {
        name: String,
        location: SourceLocation,
    },
    FunctionCall {
        name: String,
        args: ActualParams,
        location: SourceLocation,
    },
    IndexAccess {
        target: Box<AstNode>,
        index: Box<AstNode>,
        location: SourceLocation,
    },
    Sequence {
        items: Vec<AstNode>,
        location: SourceLocation,
    },
    StringLiteral(String, SourceLocation),
    /// Numeric literals keep their spelling; the target reads the same digits
    IntLiteral(String, SourceLocation),
    FloatLiteral(String, SourceLocation),
}

impl AstNode {
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Declaration(decl) => decl.location,
            AstNode::MultipleDeclarations { location, .. }
            | AstNode::Function { location, .. }
            | AstNode::Assignment { location, .. }
            | AstNode::If { location, .. }
            | AstNode::While { location, .. }
            | AstNode::ElseBlock { location, .. }
            | AstNode::Return { location, .. }
            | AstNode::Cin { location, .. }
            | AstNode::Cout { location, .. }
            | AstNode::Comment { location, .. }
            | AstNode::BinaryOp { location, .. }
            | AstNode::UnaryMinus { location, .. }
            | AstNode::Not { location, .. }
            | AstNode::Var { location, .. }
            | AstNode::IdRef { location, .. }
            | AstNode::FunctionCall { location, .. }
            | AstNode::IndexAccess { location, .. }
            | AstNode::Sequence { location, .. } => *location,
            AstNode::StringLiteral(_, location)
            | AstNode::IntLiteral(_, location)
            | AstNode::FloatLiteral(_, location) => *location,
        }
    }

    /// Statements that carry their own braces and need no `;` after them.
    pub fn is_block_like(&self) -> bool {
        matches!(
            self,
            AstNode::Comment { .. }
                | AstNode::Function { .. }
                | AstNode::While { .. }
                | AstNode::If { .. }
                | AstNode::ElseBlock { .. }
        )
    }
}

/// Root of the AST: the top-level statement list
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<AstNode>,
    /// Where the input ended; diagnostics about the whole program point here.
    pub end_location: SourceLocation,
}

impl Program {
    pub fn new(end_location: SourceLocation) -> Self {
        Program {
            statements: Vec::new(),
            end_location,
        }
    }
}

// ===== Tree dump =====

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program")?;
        for stmt in &self.statements {
            write_node(f, stmt, 1)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, depth: usize, text: &str) -> fmt::Result {
    writeln!(f, "{}+- {}", "|  ".repeat(depth.saturating_sub(1)), text)
}

fn write_type(ty: &TypeSpec) -> String {
    match ty {
        TypeSpec::Named { name, .. } => name.clone(),
        TypeSpec::Complex { name, size, .. } => format!("ComplexType {}[{}]", name, size),
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
    write_line(f, depth, "Block")?;
    for stmt in &block.statements {
        write_node(f, stmt, depth + 1)?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &AstNode, depth: usize) -> fmt::Result {
    match node {
        AstNode::Declaration(decl) => write_line(
            f,
            depth,
            &format!(
                "Declaration {}{} {}",
                if decl.is_const { "const " } else { "" },
                write_type(&decl.ty),
                decl.name
            ),
        ),
        AstNode::MultipleDeclarations { items, .. } => {
            write_line(f, depth, "MultipleDeclarations")?;
            items.iter().try_for_each(|item| write_node(f, item, depth + 1))
        }
        AstNode::Function {
            return_type,
            name,
            params,
            body,
            ..
        } => {
            write_line(f, depth, &format!("Function {} {}", return_type, name))?;
            write_line(f, depth + 1, "FormalParams")?;
            for param in &params.params {
                write_line(
                    f,
                    depth + 2,
                    &format!("Declaration {} {}", write_type(&param.ty), param.name),
                )?;
            }
            write_block(f, body, depth + 1)
        }
        AstNode::Assignment { target, value, .. } => {
            write_line(f, depth, "Assignment")?;
            write_node(f, target, depth + 1)?;
            write_node(f, value, depth + 1)
        }
        AstNode::If {
            condition, body, ..
        } => {
            write_line(f, depth, "If")?;
            write_node(f, condition, depth + 1)?;
            write_block(f, body, depth + 1)
        }
        AstNode::While {
            condition, body, ..
        } => {
            write_line(f, depth, "While")?;
            write_node(f, condition, depth + 1)?;
            write_block(f, body, depth + 1)
        }
        AstNode::ElseBlock { body, .. } => {
            write_line(f, depth, "ElseBlock")?;
            write_block(f, body, depth + 1)
        }
        AstNode::Return { value, .. } => {
            write_line(f, depth, "Return")?;
            write_node(f, value, depth + 1)
        }
        AstNode::Cin { targets, .. } => {
            write_line(f, depth, "Cin")?;
            targets.iter().try_for_each(|t| write_node(f, t, depth + 1))
        }
        AstNode::Cout { items, .. } => {
            write_line(f, depth, "Cout")?;
            items.iter().try_for_each(|t| write_node(f, t, depth + 1))
        }
        AstNode::Comment { text, .. } => write_line(f, depth, &format!("Comment {:?}", text)),
        AstNode::BinaryOp {
            op, left, right, ..
        } => {
            write_line(f, depth, &format!("BinaryOp '{}'", op.symbol()))?;
            write_node(f, left, depth + 1)?;
            write_node(f, right, depth + 1)
        }
        AstNode::UnaryMinus { operand, .. } => {
            write_line(f, depth, "UnaryMinus")?;
            write_node(f, operand, depth + 1)
        }
        AstNode::Not { operand, .. } => {
            write_line(f, depth, "Not")?;
            write_node(f, operand, depth + 1)
        }
        AstNode::Var { name, .. } => write_line(f, depth, &format!("Var {}", name)),
        AstNode::IdRef { name, .. } => write_line(f, depth, &format!("IdRef {}", name)),
        AstNode::FunctionCall { name, args, .. } => {
            write_line(f, depth, &format!("FunctionCall {}", name))?;
            write_line(f, depth + 1, "ActualParams")?;
            args.args.iter().try_for_each(|a| write_node(f, a, depth + 2))
        }
        AstNode::IndexAccess { target, index, .. } => {
            write_line(f, depth, "IndexAccess")?;
            write_node(f, target, depth + 1)?;
            write_node(f, index, depth + 1)
        }
        AstNode::Sequence { items, .. } => {
            write_line(f, depth, "Sequence")?;
            items.iter().try_for_each(|i| write_node(f, i, depth + 1))
        }
        AstNode::StringLiteral(s, _) => write_line(f, depth, &format!("StringLiteral {:?}", s)),
        AstNode::IntLiteral(n, _) => write_line(f, depth, &format!("IntLiteral {}", n)),
        AstNode::FloatLiteral(s, _) => write_line(f, depth, &format!("FloatLiteral {}", s)),
    }
}
