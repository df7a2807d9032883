use super::ast::{BinaryOp, Expr, Program, Stmt, UnaryOp};
use super::parsercore::Parser;
use super::token::{Token, TokenKind::*};
use crate::error::Error;
use crate::{check, expect, optional};

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parse a whole program. A lexical error anywhere in the input wins over
    /// the grammar error it caused.
    pub fn parse(mut self) -> Result<Program, Error> {
        let program = self.parse_program();
        if program.is_err() {
            self.drain();
        }
        match self.take_lex_error() {
            Some(e) => Err(e),
            None => program,
        }
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// program = { ";" } stmt { ";" { ";" } [ stmt ] } EOF
    fn parse_program(&mut self) -> Result<Program, Error> {
        let mut stmts = Vec::new();
        loop {
            while optional!(self, Semicolon).is_some() {}
            if check!(self, Eof) {
                break;
            }
            stmts.push(self.parse_stmt()?);
            if check!(self, Eof) {
                break;
            }
            expect!(self, Semicolon)?;
        }
        if stmts.is_empty() {
            return Err(Error::EmptyProgram);
        }
        Ok(Program(stmts))
    }

    /// stmt = "return" assign | assign
    fn parse_stmt(&mut self) -> Result<Stmt, Error> {
        if optional!(self, Return).is_some() {
            return Ok(Stmt::Return(self.parse_assign()?));
        }
        Ok(Stmt::Expr(self.parse_assign()?))
    }

    /// assign = equality [ "=" assign ]
    fn parse_assign(&mut self) -> Result<Expr, Error> {
        let lhs = self.parse_equality()?;
        if let Some(eq) = optional!(self, Equal) {
            let rhs = self.parse_assign()?;
            return match lhs {
                Expr::Ident(name) => Ok(Expr::Assign(name, Box::new(rhs))),
                _ => Err(Error::InvalidAssignmentTarget(eq.pos)),
            };
        }
        Ok(lhs)
    }

    /// equality = relational { ( "==" | "!=" ) relational }
    fn parse_equality(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_relational()?;
        while let Some(token) = self.peek() {
            let op = match token.kind {
                EqualEqual => BinaryOp::Eq,
                ExclEqual => BinaryOp::Ne,
                _ => break,
            };
            self.next();
            let rhs = self.parse_relational()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// relational = add-expr { ( "<" | "<=" | ">" | ">=" ) add-expr }
    fn parse_relational(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_add_expr()?;
        while let Some(token) = self.peek() {
            let op = match token.kind {
                LAngle => BinaryOp::Lt,
                LAngleEqual => BinaryOp::Le,
                RAngle => BinaryOp::Gt,
                RAngleEqual => BinaryOp::Ge,
                _ => break,
            };
            self.next();
            let rhs = self.parse_add_expr()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// add-expr = mul-expr { ( "+" | "-" ) mul-expr }
    fn parse_add_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_mul_expr()?;
        while let Some(token) = self.peek() {
            let op = match token.kind {
                Plus => BinaryOp::Add,
                Minus => BinaryOp::Sub,
                _ => break,
            };
            self.next();
            let rhs = self.parse_mul_expr()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// mul-expr = unary-expr { "*" unary-expr }
    fn parse_mul_expr(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.parse_unary_expr()?;
        while optional!(self, Star).is_some() {
            let rhs = self.parse_unary_expr()?;
            lhs = Expr::Binary(BinaryOp::Mul, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// unary-expr = ( "+" | "-" ) unary-expr | primary
    fn parse_unary_expr(&mut self) -> Result<Expr, Error> {
        if optional!(self, Plus).is_some() {
            let operand = self.parse_unary_expr()?;
            return Ok(Expr::Unary(UnaryOp::Pos, Box::new(operand)));
        }
        if optional!(self, Minus).is_some() {
            let operand = self.parse_unary_expr()?;
            return Ok(Expr::Unary(UnaryOp::Neg, Box::new(operand)));
        }
        self.parse_primary()
    }

    /// primary = num-lit | ident | "(" assign ")"
    fn parse_primary(&mut self) -> Result<Expr, Error> {
        let token = expect!(self, Number(_) | Ident(_) | LParen)?;
        match token.kind {
            Number(n) => Ok(Expr::Number(n)),
            Ident(name) => Ok(Expr::Ident(name)),
            _ => {
                let expr = self.parse_assign()?;
                expect!(self, RParen)?;
                Ok(expr)
            }
        }
    }
}
