#[derive(Debug, Clone, PartialEq)]
pub struct Program(pub Vec<Stmt>); // stmt { ";" stmt }

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),   // assign
    Return(Expr), // "return" assign
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(u16),                            // num-lit
    Ident(String),                          // ident
    Unary(UnaryOp, Box<Expr>),              // ( "+" | "-" ) expr
    Binary(BinaryOp, Box<Expr>, Box<Expr>), // expr (binop) expr
    Assign(String, Box<Expr>),              // ident "=" expr
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos, // "+"
    Neg, // "-"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, // "+"
    Sub, // "-"
    Mul, // "*"
    Eq,  // "=="
    Ne,  // "!="
    Lt,  // "<"
    Le,  // "<="
    Gt,  // ">"
    Ge,  // ">="
}

impl UnaryOp {
    /// `+e` and `-e` are `0 + e` and `0 - e`.
    pub fn as_binary(self) -> BinaryOp {
        match self {
            UnaryOp::Pos => BinaryOp::Add,
            UnaryOp::Neg => BinaryOp::Sub,
        }
    }
}
