//! Transition Table - 移进归约自动机的 action/goto 表
//!
//! 表由外部生成（或 [`TransitionTable::generate`] 现场构造），
//! 加载后立即校验；之后自动机只做查表，不再检查表的一致性。

mod resource;
mod slr;

use crate::error::TableError;
use crate::grammar::{self, NonTerminal, Terminal};
use std::fmt;
use std::str::FromStr;

/// action 表项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// 压入状态并前进一个输入符号
    Shift(usize),
    /// 按产生式（编号从 1 开始）归约
    Reduce(usize),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Reduce(production) => write!(f, "r{}", production),
            Action::Accept => f.write_str("acc"),
        }
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(cell: &str) -> Result<Self, Self::Err> {
        if cell == "acc" {
            return Ok(Action::Accept);
        }
        if let Some(state) = cell.strip_prefix('s') {
            return state.parse().map(Action::Shift).map_err(|_| ());
        }
        if let Some(production) = cell.strip_prefix('r') {
            return production.parse().map(Action::Reduce).map_err(|_| ());
        }
        Err(())
    }
}

type ActionRow = [Option<Action>; Terminal::COUNT];
type GotoRow = [Option<usize>; NonTerminal::COUNT];

/// action/goto 两张表，按 (状态, 符号) 定长索引
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    action: Vec<ActionRow>,
    goto: Vec<GotoRow>,
}

impl TransitionTable {
    /// 创建指定状态数的空表
    pub(crate) fn with_states(states: usize) -> Self {
        Self {
            action: vec![[None; Terminal::COUNT]; states],
            goto: vec![[None; NonTerminal::COUNT]; states],
        }
    }

    pub(crate) fn set_action(&mut self, state: usize, terminal: Terminal, action: Action) {
        self.action[state][terminal.index()] = Some(action);
    }

    pub(crate) fn set_goto(&mut self, state: usize, nonterminal: NonTerminal, target: usize) {
        self.goto[state][nonterminal.index()] = Some(target);
    }

    pub fn state_count(&self) -> usize {
        self.action.len()
    }

    /// 查 action 表；越界状态视为缺失
    pub fn action(&self, state: usize, terminal: Terminal) -> Option<Action> {
        self.action
            .get(state)
            .and_then(|row| row[terminal.index()])
    }

    /// 查 goto 表
    pub fn goto(&self, state: usize, nonterminal: NonTerminal) -> Option<usize> {
        self.goto
            .get(state)
            .and_then(|row| row[nonterminal.index()])
    }

    /// 任一状态下该终结符是否有 action；没有则它在整张表里都无效
    pub fn has_column(&self, terminal: Terminal) -> bool {
        self.action.iter().any(|row| row[terminal.index()].is_some())
    }

    /// 该状态下有 action 的终结符（用于报错提示）
    pub fn expected(&self, state: usize) -> Vec<Terminal> {
        Terminal::ALL
            .into_iter()
            .filter(|t| self.action(state, *t).is_some())
            .collect()
    }

    /// 检查表的自洽性：目标状态存在、产生式编号有效、至少一个 accept
    pub fn validate(&self) -> Result<(), TableError> {
        let states = self.state_count();
        if states == 0 {
            return Err(TableError::Empty);
        }

        let mut has_accept = false;
        for state in 0..states {
            for terminal in Terminal::ALL {
                match self.action(state, terminal) {
                    Some(Action::Shift(target)) if target >= states => {
                        return Err(TableError::TargetOutOfRange {
                            state,
                            column: terminal.to_string(),
                            target,
                            states,
                        })
                    }
                    Some(Action::Reduce(production)) if grammar::production(production).is_none() => {
                        return Err(TableError::UnknownProduction {
                            state,
                            column: terminal.to_string(),
                            production,
                        })
                    }
                    Some(Action::Accept) => has_accept = true,
                    _ => {}
                }
            }
            for nonterminal in NonTerminal::ALL {
                if let Some(target) = self.goto(state, nonterminal) {
                    if target >= states {
                        return Err(TableError::TargetOutOfRange {
                            state,
                            column: nonterminal.to_string(),
                            target,
                            states,
                        });
                    }
                }
            }
        }

        if has_accept {
            Ok(())
        } else {
            Err(TableError::NoAccept)
        }
    }
}
