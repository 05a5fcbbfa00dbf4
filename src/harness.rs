use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};

use crate::ast::Program;
use crate::fixtures::{self, Case, CaseClass};
use crate::interpreter::Interpreter;
use crate::{lexer, parser};

fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").trim_end().to_string()
}

fn frontend(source: &str) -> Result<Program> {
    let tokens = lexer::tokenize(source)?;
    Ok(parser::parse_tokens(tokens)?)
}

fn expected_error(case: &Case) -> Result<String> {
    case.spec
        .expected
        .error_contains
        .clone()
        .with_context(|| format!("Case {} is missing expected.error_contains", case.name))
}

fn ensure_contains(case: &str, error: &str, needle: &str) -> Result<()> {
    ensure!(
        error.contains(needle),
        "Expected error containing '{needle}' for case {case}, got '{error}'"
    );
    Ok(())
}

#[test]
fn runs_fixture_programs() -> Result<()> {
    let cases = fixtures::load_cases(Path::new("tests/programs"))?;
    let interpreter = Interpreter::new();

    for case in cases {
        let source = fs::read_to_string(&case.program_path)
            .with_context(|| format!("Reading {}", case.program_path.display()))?;

        match case.spec.class {
            CaseClass::RuntimeSuccess => {
                let program = frontend(&source)
                    .with_context(|| format!("Front end failed for case {}", case.name))?;
                let output = interpreter
                    .run(&program)
                    .with_context(|| format!("Run failed for case {}", case.name))?;
                let stdout_file = case
                    .spec
                    .expected
                    .stdout_file
                    .as_deref()
                    .with_context(|| format!("Case {} is missing expected.stdout_file", case.name))?;
                let expected = case.read_text(stdout_file)?;
                ensure!(
                    normalize_output(&output) == normalize_output(&expected),
                    "Output mismatch for case {}: expected {:?}, got {:?}",
                    case.name,
                    normalize_output(&expected),
                    normalize_output(&output)
                );
            }
            CaseClass::FrontendError => {
                let needle = expected_error(&case)?;
                match frontend(&source) {
                    Ok(_) => bail!("Expected a front-end error for case {}", case.name),
                    Err(error) => ensure_contains(&case.name, &error.to_string(), &needle)?,
                }
            }
            CaseClass::RuntimeError => {
                let needle = expected_error(&case)?;
                let program = frontend(&source)
                    .with_context(|| format!("Front end failed for case {}", case.name))?;
                let error = interpreter
                    .run(&program)
                    .err()
                    .with_context(|| format!("Expected a runtime error for case {}", case.name))?;
                ensure_contains(&case.name, &error.to_string(), &needle)?;
            }
        }
    }

    Ok(())
}
