//! 完整流程测试：源码 → 校验 → 转换 → 求值

use float_cmp::approx_eq;
use notate_driver::{DriverConfig, ErrorKind, Session, TableSource};
use notate_eval::Associativity;
use notate_syntax::TransitionTable;
use std::io::Write;

fn session() -> Session {
    Session::new(DriverConfig::default()).unwrap()
}

fn value(source: &str) -> f64 {
    session().evaluate(source).unwrap().value()
}

fn kind(source: &str) -> ErrorKind {
    session().evaluate(source).unwrap_err().kind()
}

#[test]
fn test_precedence_and_grouping() {
    let session = session();

    let conversion = session.convert("1+2*3").unwrap();
    assert_eq!(conversion.postfix_text(), "1 2 3 * +");
    assert_eq!(value("1+2*3"), 7.0);

    let conversion = session.convert("(1+2)*3").unwrap();
    assert_eq!(conversion.postfix_text(), "1 2 + 3 *");
    assert_eq!(value("(1+2)*3"), 9.0);
}

#[test]
fn test_left_associativity() {
    let conversion = session().convert("8-3-2").unwrap();
    assert_eq!(conversion.postfix_text(), "8 3 - 2 -");

    let evaluation = session().evaluate("8-3-2").unwrap();
    assert_eq!(evaluation.postfix.value(), 3.0);
    assert_eq!(evaluation.prefix.value(), 3.0);
}

#[test]
fn test_unary_minus() {
    let evaluation = session().evaluate("( UMINUS 5 )+3").unwrap();
    assert_eq!(evaluation.prefix.value(), -2.0);
    assert_eq!(evaluation.prefix.to_string(), "Prefix(expr=+ UMINUS 5 3, value=-2)");
}

#[test]
fn test_multi_digit_operand() {
    let conversion = session().convert("12+3").unwrap();
    assert_eq!(conversion.postfix_text(), "12 3 +");
    assert_eq!(value("12+3"), 15.0);
}

#[test]
fn test_real_division_and_floored_modulo() {
    assert!(approx_eq!(f64, value("10/4"), 2.5, ulps = 2));
    assert!(approx_eq!(f64, value("2/3"), 0.666_666_667, epsilon = 1e-9));
    assert_eq!(value("(UMINUS 7)%3"), 2.0);
}

#[test]
fn test_user_errors() {
    assert_eq!(kind("5/0"), ErrorKind::DivisionByZero);
    assert_eq!(kind("5%0"), ErrorKind::DivisionByZero);
    assert_eq!(kind("1++2"), ErrorKind::Syntax);
    assert_eq!(kind("1#2"), ErrorKind::InvalidCharacter);
    assert_eq!(kind("12 3"), ErrorKind::Syntax);
    assert_eq!(kind("( UMINUS5 )"), ErrorKind::InvalidCharacter);
}

#[test]
fn test_power_requires_validation_off() {
    assert_eq!(kind("2^3"), ErrorKind::Syntax);

    let relaxed = Session::new(DriverConfig {
        validate: false,
        ..DriverConfig::default()
    })
    .unwrap();
    assert_eq!(relaxed.evaluate("2^3^2").unwrap().value(), 64.0);

    let right = Session::new(DriverConfig {
        validate: false,
        power_associativity: Associativity::Right,
        ..DriverConfig::default()
    })
    .unwrap();
    let conversion = right.convert("2^3^2").unwrap();
    assert_eq!(conversion.postfix_text(), "2 3 2 ^ ^");
    assert_eq!(right.evaluate("2^3^2").unwrap().value(), 512.0);
}

#[test]
fn test_unvalidated_malformed_input_is_caught_later() {
    let relaxed = Session::new(DriverConfig {
        validate: false,
        ..DriverConfig::default()
    })
    .unwrap();

    assert_eq!(
        relaxed.evaluate("(1+2").unwrap_err().kind(),
        ErrorKind::Syntax
    );
    assert_eq!(relaxed.evaluate("1+").unwrap_err().kind(), ErrorKind::EmptyStack);
    assert_eq!(relaxed.evaluate("").unwrap_err().kind(), ErrorKind::EmptyStack);
    // check 总是走文法校验
    assert!(relaxed.check("1+").is_err());
}

#[test]
fn test_postfix_and_prefix_always_agree() {
    let session = session();
    for source in [
        "1",
        "9-8-7-6",
        "100/10/5",
        "7%4%3",
        "2*(3+4)-(5%(UMINUS 3))",
        "((((1))))",
        "(UMINUS (2-9))/4",
    ] {
        let evaluation = session.evaluate(source).unwrap();
        assert_eq!(
            evaluation.postfix.value(),
            evaluation.prefix.value(),
            "{}",
            source
        );
    }
}

#[test]
fn test_table_loaded_from_file() {
    let csv = TransitionTable::generate().unwrap().to_csv().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(csv.as_bytes()).unwrap();

    let session = Session::new(DriverConfig {
        table: TableSource::Path(file.path().to_path_buf()),
        ..DriverConfig::default()
    })
    .unwrap();
    assert_eq!(session.evaluate("(1+2)*3").unwrap().value(), 9.0);
}

#[test]
fn test_broken_table_is_configuration_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"state,1,$\n0,s7,acc\n").unwrap();

    let err = Session::new(DriverConfig {
        table: TableSource::Path(file.path().to_path_buf()),
        ..DriverConfig::default()
    })
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let missing = Session::new(DriverConfig {
        table: TableSource::Path("/nonexistent/notate/table.csv".into()),
        ..DriverConfig::default()
    })
    .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::Configuration);
}

#[test]
fn test_incomplete_table_fails_at_run_time() {
    // 只认识单个数字 1 的表：D -> 1 之后没有 goto
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"state,1,$\n0,s1,acc\n1,r14,r14\n").unwrap();

    let session = Session::new(DriverConfig {
        table: TableSource::Path(file.path().to_path_buf()),
        ..DriverConfig::default()
    })
    .unwrap();
    assert_eq!(session.check("1").unwrap_err().kind(), ErrorKind::Configuration);
    // 表里没有 '+' 列
    assert_eq!(session.check("1+1").unwrap_err().kind(), ErrorKind::Syntax);
}
