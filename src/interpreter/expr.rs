//! Expression evaluation.

use std::rc::Rc;

use talon_ast::{
    AssignExpr, BinaryExpr, BinaryOp, Expr, Ident, LiteralExpr, LiteralKind, PostfixExpr,
    PostfixOp, TernaryExpr, UnaryExpr, UnaryOp,
};
use talon_core::RuntimeError;
use talon_registry::{ClassDescriptor, Value};

use super::place::read_field;
use super::{Interpreter, ops};

impl<'r, 'ast> Interpreter<'r, 'ast> {
    pub(crate) fn eval(&mut self, expr: &Expr<'ast>) -> Result<Value<'ast>, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(self.literal(literal)),
            Expr::Ident(ident) => self.eval_ident(ident),
            Expr::This(span) => self
                .frame()?
                .this
                .clone()
                .map(Value::from)
                .ok_or_else(|| RuntimeError::StaticContext {
                    name: format!("this at {span}"),
                }),
            Expr::Member(_) | Expr::Index(_) => {
                let place = self.place(expr)?;
                self.load(&place)
            }
            Expr::Call(call) => self.eval_call(call),
            Expr::New(new) => self.eval_new(new),
            Expr::Binary(binary) => self.eval_binary(binary),
            Expr::Unary(unary) => self.eval_unary(unary),
            Expr::Postfix(postfix) => self.eval_postfix(postfix),
            Expr::Assign(assign) => self.eval_assign(assign),
            Expr::Ternary(ternary) => self.eval_ternary(ternary),
            Expr::Query(query) => Ok(talon_modules::run_query(
                self.host.query,
                self.host.credentials,
                query.query,
                self.classes,
                &self.prims,
            )?),
        }
    }

    fn literal(&self, literal: &LiteralExpr<'ast>) -> Value<'ast> {
        match literal.kind {
            LiteralKind::Integer(v) => self.prims.integer(v),
            LiteralKind::Double(v) => self.prims.double(v),
            LiteralKind::Boolean(v) => self.prims.boolean(v),
            LiteralKind::String(v) => self.prims.string(v),
            LiteralKind::Null => Value::Null,
        }
    }

    /// Locals, then fields of `this`, then statics of the running class.
    fn eval_ident(&mut self, ident: &Ident<'ast>) -> Result<Value<'ast>, RuntimeError> {
        let frame = self.frame()?;
        if let Some(value) = frame.lookup(ident.name) {
            return Ok(value.clone());
        }
        if let Some(this) = &frame.this
            && let Some(value) = read_field(this, ident.name, self.classes)
        {
            return Ok(value);
        }
        let class = Rc::clone(&frame.class);
        self.static_value(&class, ident.name)?
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: ident.name.to_string(),
            })
    }

    /// Whether `name` denotes a value (local, field or static) in the
    /// running method.
    fn names_value(&self, name: &str) -> bool {
        let Some(frame) = self.frames.last() else {
            return false;
        };
        frame.is_local(name)
            || frame
                .this
                .as_ref()
                .is_some_and(|this| read_field(this, name, self.classes).is_some())
            || frame.class.find_static_field(name, self.classes).is_some()
    }

    /// The class an expression names when it is used as a receiver
    /// (`Util.helper()`, `Outer.Inner.count`). Values shadow class names.
    pub(super) fn class_ref(&self, expr: &Expr<'ast>) -> Option<Rc<ClassDescriptor<'ast>>> {
        match expr {
            Expr::Ident(ident) if !self.names_value(ident.name) => self.lookup_class(ident.name),
            Expr::Member(member) => self
                .class_ref(member.object)
                .and_then(|outer| outer.inner_classes.get(member.member.name).cloned()),
            _ => None,
        }
    }

    fn eval_binary(&mut self, binary: &BinaryExpr<'ast>) -> Result<Value<'ast>, RuntimeError> {
        if binary.op.is_logical() {
            let left = ops::truthy(&self.eval(binary.left)?, binary.left.span())?;
            // `||` stops on true, `&&` stops on false
            if (binary.op == BinaryOp::LogicalOr) == left {
                return Ok(self.prims.boolean(left));
            }
            let right = ops::truthy(&self.eval(binary.right)?, binary.right.span())?;
            return Ok(self.prims.boolean(right));
        }
        let left = self.eval(binary.left)?;
        let right = self.eval(binary.right)?;
        ops::binary(&self.prims, binary.op, &left, &right, binary.span)
    }

    fn eval_unary(&mut self, unary: &UnaryExpr<'ast>) -> Result<Value<'ast>, RuntimeError> {
        let span = unary.span;
        match unary.op {
            UnaryOp::Plus => self.eval(unary.operand),
            UnaryOp::Neg => {
                let value = self.eval(unary.operand)?;
                ops::negate(&self.prims, &value, span)
            }
            UnaryOp::Not => {
                let value = self.eval(unary.operand)?;
                Ok(self.prims.boolean(!ops::truthy(&value, span)?))
            }
            UnaryOp::PreInc | UnaryOp::PreDec => {
                let delta = if unary.op == UnaryOp::PreInc { 1 } else { -1 };
                let place = self.place(unary.operand)?;
                let current = self.load(&place)?;
                let updated = ops::step(&self.prims, &current, delta, span)?;
                self.store(&place, updated.clone())?;
                Ok(updated)
            }
        }
    }

    /// `a++` and `a--` produce the value before the update.
    fn eval_postfix(&mut self, postfix: &PostfixExpr<'ast>) -> Result<Value<'ast>, RuntimeError> {
        let delta = match postfix.op {
            PostfixOp::PostInc => 1,
            PostfixOp::PostDec => -1,
        };
        let place = self.place(postfix.operand)?;
        let current = self.load(&place)?;
        let updated = ops::step(&self.prims, &current, delta, postfix.span)?;
        self.store(&place, updated)?;
        Ok(current)
    }

    /// The target is resolved before the right-hand side runs. The
    /// expression's value is the stored value.
    fn eval_assign(&mut self, assign: &AssignExpr<'ast>) -> Result<Value<'ast>, RuntimeError> {
        let place = self.place(assign.target)?;
        let value = match assign.op.binary_op() {
            None => self.eval(assign.value)?,
            Some(op) => {
                let current = self.load(&place)?;
                let operand = self.eval(assign.value)?;
                ops::binary(&self.prims, op, &current, &operand, assign.span)?
            }
        };
        self.store(&place, value.clone())?;
        Ok(value)
    }

    fn eval_ternary(&mut self, ternary: &TernaryExpr<'ast>) -> Result<Value<'ast>, RuntimeError> {
        let condition = self.eval(ternary.condition)?;
        if ops::truthy(&condition, ternary.condition.span())? {
            self.eval(ternary.then_expr)
        } else {
            self.eval(ternary.else_expr)
        }
    }
}
