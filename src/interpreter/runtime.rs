use crate::ast::{BinaryOperator, Expression, IfBranch, Statement};

use super::{Environment, RuntimeError};

/// Control-flow signal threaded out of statement execution.
///
/// `Break` unwinds to the nearest enclosing `while`, which absorbs it; the
/// line is kept so a `break` with no enclosing loop can be reported.
pub(super) enum ExecResult {
    Continue,
    Break { line: usize },
}

/// Walks statements against an [`Environment`], accumulating print output in
/// execution order.
pub(super) struct InterpreterRuntime {
    pub(super) output: String,
}

impl InterpreterRuntime {
    pub(super) fn exec_block(
        &mut self,
        body: &[Statement],
        environment: &mut Environment,
    ) -> Result<ExecResult, RuntimeError> {
        for statement in body {
            match self.exec_statement(statement, environment)? {
                ExecResult::Continue => {}
                signal @ ExecResult::Break { .. } => return Ok(signal),
            }
        }
        Ok(ExecResult::Continue)
    }

    fn exec_statement(
        &mut self,
        statement: &Statement,
        environment: &mut Environment,
    ) -> Result<ExecResult, RuntimeError> {
        match statement {
            Statement::Assign { name, value, line } => {
                let value = self.eval_expression(value, environment, *line)?;
                environment.set(name.clone(), value);
                Ok(ExecResult::Continue)
            }
            Statement::Print { value, line } => {
                let value = self.eval_expression(value, environment, *line)?;
                self.output.push_str(&value.to_string());
                self.output.push('\n');
                Ok(ExecResult::Continue)
            }
            Statement::If {
                branches, else_body, ..
            } => {
                // First clause whose condition is nonzero wins; at most one
                // body runs.
                for IfBranch {
                    condition,
                    body,
                    line,
                } in branches
                {
                    if self.eval_expression(condition, environment, *line)? != 0 {
                        return self.exec_block(body, environment);
                    }
                }
                if let Some(body) = else_body {
                    return self.exec_block(body, environment);
                }
                Ok(ExecResult::Continue)
            }
            Statement::While {
                condition,
                body,
                line,
            } => {
                loop {
                    if self.eval_expression(condition, environment, *line)? == 0 {
                        break;
                    }
                    if let ExecResult::Break { .. } = self.exec_block(body, environment)? {
                        break;
                    }
                }
                Ok(ExecResult::Continue)
            }
            Statement::Break { line } => Ok(ExecResult::Break { line: *line }),
        }
    }

    fn eval_expression(
        &self,
        expr: &Expression,
        environment: &Environment,
        line: usize,
    ) -> Result<i64, RuntimeError> {
        match expr {
            Expression::Integer(value) => Ok(*value),
            Expression::Identifier(name) => {
                environment.get(name).ok_or_else(|| RuntimeError::NameError {
                    name: name.clone(),
                    line,
                })
            }
            Expression::BinaryOp { left, op, right } => {
                let left = self.eval_expression(left, environment, line)?;
                let right = self.eval_expression(right, environment, line)?;
                eval_binary(left, *op, right, line)
            }
        }
    }
}

/// Fixed-width i64 semantics: arithmetic wraps, `/` and `//` both truncate
/// toward zero, `%` keeps the dividend's sign, comparisons yield 1 or 0.
fn eval_binary(
    left: i64,
    op: BinaryOperator,
    right: i64,
    line: usize,
) -> Result<i64, RuntimeError> {
    let value = match op {
        BinaryOperator::Add => left.wrapping_add(right),
        BinaryOperator::Sub => left.wrapping_sub(right),
        BinaryOperator::Mul => left.wrapping_mul(right),
        BinaryOperator::Div | BinaryOperator::FloorDiv => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            left.wrapping_div(right)
        }
        BinaryOperator::Mod => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            left.wrapping_rem(right)
        }
        BinaryOperator::LessThan => (left < right) as i64,
        BinaryOperator::LessEqual => (left <= right) as i64,
        BinaryOperator::GreaterThan => (left > right) as i64,
        BinaryOperator::GreaterEqual => (left >= right) as i64,
        BinaryOperator::Equal => (left == right) as i64,
        BinaryOperator::NotEqual => (left != right) as i64,
    };
    Ok(value)
}
