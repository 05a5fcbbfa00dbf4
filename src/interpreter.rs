use crate::ast::Program;

mod env;
mod error;
mod runtime;

pub use env::Environment;
pub use error::RuntimeError;

use runtime::{ExecResult, InterpreterRuntime};

/// Tree-walking executor.
///
/// Runs an already-parsed [`Program`] directly against an [`Environment`],
/// collecting `print` output in execution order. Parsing has finished by the
/// time a program reaches this point, so every error raised here is a runtime
/// one.
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    /// Runs `program` in a fresh environment and returns its print output,
    /// one line per executed `print`.
    pub fn run(&self, program: &Program) -> Result<String, RuntimeError> {
        let mut environment = Environment::new();
        self.run_with_env(program, &mut environment)
    }

    /// Runs `program` against a caller-owned environment, leaving the final
    /// variable state behind for inspection or reuse in a later run.
    pub fn run_with_env(
        &self,
        program: &Program,
        environment: &mut Environment,
    ) -> Result<String, RuntimeError> {
        let mut runtime = InterpreterRuntime {
            output: String::new(),
        };
        match runtime.exec_block(&program.statements, environment)? {
            ExecResult::Continue => {}
            ExecResult::Break { line } => return Err(RuntimeError::BreakOutsideLoop { line }),
        }
        Ok(runtime.output)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, Expression, IfBranch, Statement};

    fn identifier(name: &str) -> Expression {
        Expression::Identifier(name.to_string())
    }

    fn int(value: i64) -> Expression {
        Expression::Integer(value)
    }

    fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Expression {
        Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    fn assign(name: &str, value: Expression, line: usize) -> Statement {
        Statement::Assign {
            name: name.to_string(),
            value,
            line,
        }
    }

    fn print(value: Expression, line: usize) -> Statement {
        Statement::Print { value, line }
    }

    fn program(statements: Vec<Statement>) -> Program {
        Program { statements }
    }

    #[test]
    fn evaluates_assignment_and_print() {
        let program = program(vec![
            assign("n", binary(int(1), BinaryOperator::Add, int(2)), 1),
            print(identifier("n"), 2),
        ]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, "3\n");
    }

    #[test]
    fn comparisons_evaluate_to_one_or_zero() {
        let program = program(vec![
            print(binary(int(1), BinaryOperator::LessThan, int(2)), 1),
            print(binary(int(2), BinaryOperator::LessThan, int(1)), 2),
        ]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, "1\n0\n");
    }

    #[test]
    fn executes_first_true_branch_only() {
        let program = program(vec![
            assign("a", int(5), 1),
            assign("b", int(5), 2),
            Statement::If {
                branches: vec![
                    IfBranch {
                        condition: binary(
                            identifier("a"),
                            BinaryOperator::GreaterThan,
                            identifier("b"),
                        ),
                        body: vec![print(int(1), 4)],
                        line: 3,
                    },
                    IfBranch {
                        condition: binary(
                            identifier("a"),
                            BinaryOperator::Equal,
                            identifier("b"),
                        ),
                        body: vec![print(int(2), 6)],
                        line: 5,
                    },
                ],
                else_body: Some(vec![print(int(3), 8)]),
                line: 3,
            },
        ]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, "2\n");
    }

    #[test]
    fn skips_chain_without_match_or_else() {
        let program = program(vec![Statement::If {
            branches: vec![IfBranch {
                condition: binary(int(1), BinaryOperator::GreaterThan, int(2)),
                body: vec![print(int(1), 2)],
                line: 1,
            }],
            else_body: None,
            line: 1,
        }]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, "");
    }

    #[test]
    fn nonzero_condition_is_true() {
        let program = program(vec![Statement::If {
            branches: vec![IfBranch {
                condition: int(5),
                body: vec![print(int(1), 2)],
                line: 1,
            }],
            else_body: None,
            line: 1,
        }]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, "1\n");
    }

    #[test]
    fn while_loop_runs_until_condition_is_false() {
        let program = program(vec![
            assign("n", int(0), 1),
            Statement::While {
                condition: binary(identifier("n"), BinaryOperator::LessThan, int(3)),
                body: vec![assign(
                    "n",
                    binary(identifier("n"), BinaryOperator::Add, int(1)),
                    3,
                )],
                line: 2,
            },
            print(identifier("n"), 4),
        ]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, "3\n");
    }

    #[test]
    fn break_exits_loop_without_rechecking_condition() {
        // i = 0 / while i < 10: print(i); if i == 3: break; i = i + 1
        let program = program(vec![
            assign("i", int(0), 1),
            Statement::While {
                condition: binary(identifier("i"), BinaryOperator::LessThan, int(10)),
                body: vec![
                    print(identifier("i"), 3),
                    Statement::If {
                        branches: vec![IfBranch {
                            condition: binary(identifier("i"), BinaryOperator::Equal, int(3)),
                            body: vec![Statement::Break { line: 5 }],
                            line: 4,
                        }],
                        else_body: None,
                        line: 4,
                    },
                    assign(
                        "i",
                        binary(identifier("i"), BinaryOperator::Add, int(1)),
                        6,
                    ),
                ],
                line: 2,
            },
        ]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, "0\n1\n2\n3\n");
    }

    #[test]
    fn break_outside_loop_is_an_error() {
        let program = program(vec![
            assign("x", int(1), 1),
            Statement::If {
                branches: vec![IfBranch {
                    condition: binary(identifier("x"), BinaryOperator::Equal, int(1)),
                    body: vec![Statement::Break { line: 3 }],
                    line: 2,
                }],
                else_body: None,
                line: 2,
            },
        ]);

        let error = Interpreter::new()
            .run(&program)
            .expect_err("expected break outside loop");
        assert_eq!(error, RuntimeError::BreakOutsideLoop { line: 3 });
    }

    #[test]
    fn division_truncates_toward_zero() {
        let program = program(vec![
            print(binary(int(7), BinaryOperator::Div, int(2)), 1),
            print(binary(int(-7), BinaryOperator::Div, int(2)), 2),
            print(binary(int(-7), BinaryOperator::Mod, int(2)), 3),
            print(binary(int(7), BinaryOperator::FloorDiv, int(2)), 4),
            print(binary(int(-7), BinaryOperator::FloorDiv, int(2)), 5),
        ]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, "3\n-3\n-1\n3\n-3\n");
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let program = program(vec![
            assign("a", int(10), 1),
            assign("b", int(0), 2),
            print(binary(identifier("a"), BinaryOperator::Div, identifier("b")), 3),
        ]);

        let error = Interpreter::new()
            .run(&program)
            .expect_err("expected division by zero");
        assert_eq!(error, RuntimeError::DivisionByZero { line: 3 });
    }

    #[test]
    fn modulo_by_zero_is_an_error() {
        let program = program(vec![print(
            binary(int(1), BinaryOperator::Mod, int(0)),
            1,
        )]);

        let error = Interpreter::new()
            .run(&program)
            .expect_err("expected division by zero");
        assert_eq!(error, RuntimeError::DivisionByZero { line: 1 });
    }

    #[test]
    fn errors_on_reading_undefined_name() {
        let program = program(vec![print(identifier("x"), 1)]);

        let error = Interpreter::new()
            .run(&program)
            .expect_err("expected undefined variable");
        assert_eq!(
            error,
            RuntimeError::NameError {
                name: "x".to_string(),
                line: 1,
            }
        );
    }

    #[test]
    fn environment_persists_across_runs_when_reused() {
        let first = program(vec![assign("x", int(1), 1)]);
        let second = program(vec![print(identifier("x"), 1)]);

        let interpreter = Interpreter::new();
        let mut environment = Environment::new();
        interpreter
            .run_with_env(&first, &mut environment)
            .expect("first run failed");
        assert_eq!(environment.get("x"), Some(1));

        let output = interpreter
            .run_with_env(&second, &mut environment)
            .expect("second run failed");
        assert_eq!(output, "1\n");
    }

    #[test]
    fn clears_state_between_independent_runs() {
        let first = program(vec![assign("x", int(1), 1)]);
        let second = program(vec![print(identifier("x"), 1)]);

        let interpreter = Interpreter::new();
        interpreter.run(&first).expect("first run failed");

        let error = interpreter
            .run(&second)
            .expect_err("expected globals to be cleared between runs");
        assert_eq!(
            error,
            RuntimeError::NameError {
                name: "x".to_string(),
                line: 1,
            }
        );
    }

    #[test]
    fn wrapping_division_of_min_by_minus_one() {
        let program = program(vec![print(
            binary(int(i64::MIN), BinaryOperator::Div, int(-1)),
            1,
        )]);

        let output = Interpreter::new().run(&program).expect("run failed");
        assert_eq!(output, format!("{}\n", i64::MIN));
    }
}
