#![allow(dead_code)]
use std::fs;
use std::path::Path;

use pywalk::ast::Program;
use pywalk::fixtures;
use pywalk::{lexer, parser};

/// Fixture cases tagged for benchmarking, as (label, source) pairs.
pub fn workloads() -> Vec<(String, String)> {
    let cases =
        fixtures::load_cases(Path::new("tests/programs")).expect("load bench fixtures");
    cases
        .into_iter()
        .filter(|case| case.spec.bench.enabled)
        .map(|case| {
            let source = fs::read_to_string(&case.program_path)
                .unwrap_or_else(|err| panic!("read {}: {err}", case.program_path.display()));
            (case.name, source)
        })
        .collect()
}

pub fn load_program(source: &str) -> Program {
    let tokens = lexer::tokenize(source).expect("tokenize bench workload");
    parser::parse_tokens(tokens).expect("parse bench workload")
}
