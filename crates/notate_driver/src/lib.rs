//! Notate Driver
//!
//! 把各阶段串成完整流程：
//! 源码 → 校验（词法 + 移进归约）→ 记号序列 → 后缀/前缀 → 求值

pub mod config;
pub mod error;

pub use config::{DriverConfig, TableSource};
pub use error::{ErrorKind, ExprError, ExprResult};

use notate_diagnostics::{Diagnostic, DiagnosticSink};
use notate_eval::{Expression, InfixConverter, OperatorTable};
use notate_syntax::{render, tokenize, tokens, Token, TransitionTable, Validator};

/// 转换结果
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub postfix: Vec<Token>,
    pub prefix: Vec<Token>,
}

impl Conversion {
    pub fn postfix_text(&self) -> String {
        render(&self.postfix)
    }

    pub fn prefix_text(&self) -> String {
        render(&self.prefix)
    }
}

/// 求值结果，两种记法各一个
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub postfix: Expression,
    pub prefix: Expression,
}

impl Evaluation {
    pub fn value(&self) -> f64 {
        self.postfix.value()
    }
}

/// 一次会话：转移表与运算符表只加载一次，之后可处理任意多个表达式
#[derive(Debug, Clone)]
pub struct Session {
    config: DriverConfig,
    table: TransitionTable,
    operators: OperatorTable,
    notices: DiagnosticSink,
}

impl Session {
    pub fn new(config: DriverConfig) -> ExprResult<Self> {
        let table = match &config.table {
            TableSource::Generated => TransitionTable::generate()?,
            TableSource::Path(path) => TransitionTable::load(path)?,
        };
        let operators = OperatorTable::new().with_power_associativity(config.power_associativity);

        let mut notices = DiagnosticSink::new();
        if !config.validate {
            notices.add(
                Diagnostic::warning("grammar validation disabled; expressions are only tokenized")
                    .code("no-validate")
                    .with_note("'^' is accepted; malformed input is reported during conversion or evaluation"),
            );
        }
        log::info!(
            "session ready ({} states, '^' is {:?}-associative)",
            table.state_count(),
            config.power_associativity
        );

        Ok(Self {
            config,
            table,
            operators,
            notices,
        })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// 会话建立时产生的警告
    pub fn notices(&self) -> &DiagnosticSink {
        &self.notices
    }

    /// 文法校验，返回确认后的记号序列（不受 `validate` 开关影响）
    pub fn check(&self, source: &str) -> ExprResult<Vec<Token>> {
        let lexemes = Validator::new(&self.table).validate(source)?;
        Ok(tokens(&lexemes))
    }

    /// 按配置取得中缀记号序列
    pub fn tokens(&self, source: &str) -> ExprResult<Vec<Token>> {
        if self.config.validate {
            self.check(source)
        } else {
            Ok(tokens(&tokenize(source)?))
        }
    }

    pub fn convert(&self, source: &str) -> ExprResult<Conversion> {
        let infix = self.tokens(source)?;
        let converter = InfixConverter::new(&self.operators);
        Ok(Conversion {
            postfix: converter.to_postfix(&infix)?,
            prefix: converter.to_prefix(&infix)?,
        })
    }

    /// 分别按后缀和前缀求值，两者必须一致
    pub fn evaluate(&self, source: &str) -> ExprResult<Evaluation> {
        let Conversion { postfix, prefix } = self.convert(source)?;
        let postfix = Expression::postfix(postfix, &self.operators)?;
        let prefix = Expression::prefix(prefix, &self.operators)?;

        let (a, b) = (postfix.value(), prefix.value());
        if a != b && !(a.is_nan() && b.is_nan()) {
            return Err(ExprError::Disagreement {
                postfix: a,
                prefix: b,
            });
        }
        Ok(Evaluation { postfix, prefix })
    }
}
