//! 运算符表
//!
//! 用数据描述每个运算符的优先级、结合性与求值函数，
//! 转换器和求值器都只通过符号查表。
//!
//! 优先级：`(` 0 < `+ -` 1 < `* / %` 2 < `^` 3 < `UMINUS` 4。
//! `(` 只作为转换栈中的哨兵，不参与求值。
//!
//! 数值为 `f64`：`/` 是实数除法，`%` 的结果与除数同号，`^` 为 `powf`。
//! 整数字面量读作 `u64` 后转为 `f64`，只有不超过 2^53 时才精确。

use crate::error::EvalError;

/// 结合性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Associativity {
    #[default]
    Left,
    Right,
}

impl Associativity {
    /// 左右互换（镜像序列上求后缀时使用）
    pub fn flipped(self) -> Self {
        match self {
            Associativity::Left => Associativity::Right,
            Associativity::Right => Associativity::Left,
        }
    }
}

/// 运算符的求值方式
#[derive(Debug, Clone, Copy)]
pub enum OperatorKind {
    /// 括号哨兵
    Sentinel,
    Unary(fn(f64) -> f64),
    Binary {
        eval: fn(f64, f64) -> f64,
        /// 右操作数为零时报 DivisionByZero
        checks_divisor: bool,
    },
}

/// 运算符条目
#[derive(Debug, Clone, Copy)]
pub struct OperatorSpec {
    pub symbol: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub kind: OperatorKind,
}

impl OperatorSpec {
    pub fn arity(&self) -> usize {
        match self.kind {
            OperatorKind::Sentinel => 0,
            OperatorKind::Unary(_) => 1,
            OperatorKind::Binary { .. } => 2,
        }
    }
}

/// 取模结果与除数同号
fn floored_mod(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

/// 运算符表
///
/// 集中管理所有运算符；表本身不可变，可在多个调用方之间共享
#[derive(Debug, Clone)]
pub struct OperatorTable {
    specs: Vec<OperatorSpec>,
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl OperatorTable {
    /// 创建默认运算符表（包含所有内置运算符）
    pub fn new() -> Self {
        let mut table = Self { specs: Vec::new() };
        table.register_builtins();
        table
    }

    fn register_builtins(&mut self) {
        self.add("(", 0, Associativity::Left, OperatorKind::Sentinel);
        self.register_arithmetic();
        self.add(
            "UMINUS",
            4,
            Associativity::Right,
            OperatorKind::Unary(|x| -x),
        );
    }

    /// 注册二元算术运算符
    ///
    /// 包括：+, -, *, /, %, ^
    fn register_arithmetic(&mut self) {
        use Associativity::Left;

        let binary = |eval: fn(f64, f64) -> f64| OperatorKind::Binary {
            eval,
            checks_divisor: false,
        };
        let division = |eval: fn(f64, f64) -> f64| OperatorKind::Binary {
            eval,
            checks_divisor: true,
        };

        self.add("+", 1, Left, binary(|a, b| a + b));
        self.add("-", 1, Left, binary(|a, b| a - b));
        self.add("*", 2, Left, binary(|a, b| a * b));
        self.add("/", 2, Left, division(|a, b| a / b));
        self.add("%", 2, Left, division(floored_mod));
        self.add("^", 3, Left, binary(f64::powf));
    }

    fn add(
        &mut self,
        symbol: &'static str,
        precedence: u8,
        associativity: Associativity,
        kind: OperatorKind,
    ) {
        self.specs.push(OperatorSpec {
            symbol,
            precedence,
            associativity,
            kind,
        });
    }

    /// 设置 `^` 的结合性
    pub fn with_power_associativity(mut self, associativity: Associativity) -> Self {
        for spec in self.specs.iter_mut().filter(|s| s.symbol == "^") {
            spec.associativity = associativity;
        }
        self
    }

    /// 去掉一个运算符，得到受限的运算符表
    pub fn without(mut self, symbol: &str) -> Self {
        self.specs.retain(|s| s.symbol != symbol);
        self
    }

    /// 查找运算符条目
    pub fn lookup(&self, symbol: &str) -> Result<&OperatorSpec, EvalError> {
        self.specs
            .iter()
            .find(|s| s.symbol == symbol)
            .ok_or_else(|| EvalError::UnknownOperator {
                symbol: symbol.to_string(),
            })
    }

    pub fn precedence(&self, symbol: &str) -> Result<u8, EvalError> {
        self.lookup(symbol).map(|s| s.precedence)
    }

    pub fn associativity(&self, symbol: &str) -> Result<Associativity, EvalError> {
        self.lookup(symbol).map(|s| s.associativity)
    }

    /// 对操作数应用运算符
    ///
    /// 二元运算符的操作数顺序为 `[left, right]`
    pub fn apply(&self, symbol: &str, operands: &[f64]) -> Result<f64, EvalError> {
        let spec = self.lookup(symbol)?;
        let mismatch = || EvalError::ArityMismatch {
            symbol: symbol.to_string(),
            expected: spec.arity(),
            found: operands.len(),
        };

        match (spec.kind, operands) {
            (OperatorKind::Unary(eval), [x]) => Ok(eval(*x)),
            (
                OperatorKind::Binary {
                    eval,
                    checks_divisor,
                },
                [left, right],
            ) => {
                if checks_divisor && *right == 0.0 {
                    return Err(EvalError::DivisionByZero {
                        symbol: symbol.to_string(),
                    });
                }
                Ok(eval(*left, *right))
            }
            _ => Err(mismatch()),
        }
    }
}
