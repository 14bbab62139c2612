//! SLR(1) 表构造
//!
//! 对增广文法 `E' -> E` 构造 LR(0) 规范项集族，再用 FOLLOW 集填写归约项。
//! 本文法是 SLR(1) 的，出现冲突说明文法被改坏了。

use super::{Action, TransitionTable};
use crate::error::TableError;
use crate::grammar::{NonTerminal, Production, Symbol, Terminal, PRODUCTIONS, START};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// LR(0) 项：产生式编号（0 为增广产生式）与点的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Item {
    production: usize,
    dot: usize,
}

type ItemSet = BTreeSet<Item>;

const AUGMENTED: &[Symbol] = &[Symbol::NonTerminal(START)];

fn rhs(production: usize) -> &'static [Symbol] {
    match production {
        0 => AUGMENTED,
        p => PRODUCTIONS[p - 1].rhs,
    }
}

fn numbered() -> impl Iterator<Item = (usize, &'static Production)> {
    PRODUCTIONS.iter().enumerate().map(|(i, p)| (i + 1, p))
}

impl Item {
    fn next_symbol(&self) -> Option<Symbol> {
        rhs(self.production).get(self.dot).copied()
    }

    fn advance(&self) -> Item {
        Item {
            production: self.production,
            dot: self.dot + 1,
        }
    }
}

fn closure(mut items: ItemSet) -> ItemSet {
    let mut pending: Vec<Item> = items.iter().copied().collect();
    while let Some(item) = pending.pop() {
        if let Some(Symbol::NonTerminal(nt)) = item.next_symbol() {
            for (index, production) in numbered() {
                if production.lhs != nt {
                    continue;
                }
                let start = Item {
                    production: index,
                    dot: 0,
                };
                if items.insert(start) {
                    pending.push(start);
                }
            }
        }
    }
    items
}

fn goto(items: &ItemSet, symbol: Symbol) -> ItemSet {
    let kernel = items
        .iter()
        .filter(|item| item.next_symbol() == Some(symbol))
        .map(Item::advance)
        .collect();
    closure(kernel)
}

fn all_symbols() -> impl Iterator<Item = Symbol> {
    Terminal::ALL
        .into_iter()
        .filter(|t| *t != Terminal::End)
        .map(Symbol::Terminal)
        .chain(NonTerminal::ALL.into_iter().map(Symbol::NonTerminal))
}

/// 文法没有空产生式，FIRST 只需看右部第一个符号
fn first_sets() -> HashMap<NonTerminal, BTreeSet<Terminal>> {
    let mut first: HashMap<NonTerminal, BTreeSet<Terminal>> = NonTerminal::ALL
        .into_iter()
        .map(|nt| (nt, BTreeSet::new()))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for (_, production) in numbered() {
            let additions: BTreeSet<Terminal> = match production.rhs[0] {
                Symbol::Terminal(t) => BTreeSet::from([t]),
                Symbol::NonTerminal(nt) => first[&nt].clone(),
            };
            let entry = first.entry(production.lhs).or_default();
            for t in additions {
                changed |= entry.insert(t);
            }
        }
    }
    first
}

fn follow_sets(
    first: &HashMap<NonTerminal, BTreeSet<Terminal>>,
) -> HashMap<NonTerminal, BTreeSet<Terminal>> {
    let mut follow: HashMap<NonTerminal, BTreeSet<Terminal>> = NonTerminal::ALL
        .into_iter()
        .map(|nt| (nt, BTreeSet::new()))
        .collect();
    follow.entry(START).or_default().insert(Terminal::End);

    let mut changed = true;
    while changed {
        changed = false;
        for (_, production) in numbered() {
            for (i, symbol) in production.rhs.iter().enumerate() {
                let Symbol::NonTerminal(b) = symbol else {
                    continue;
                };
                let additions: BTreeSet<Terminal> = match production.rhs.get(i + 1) {
                    Some(Symbol::Terminal(t)) => BTreeSet::from([*t]),
                    Some(Symbol::NonTerminal(next)) => first[next].clone(),
                    None => follow[&production.lhs].clone(),
                };
                let entry = follow.entry(*b).or_default();
                for t in additions {
                    changed |= entry.insert(t);
                }
            }
        }
    }
    follow
}

fn place(
    table: &mut TransitionTable,
    state: usize,
    terminal: Terminal,
    action: Action,
) -> Result<(), TableError> {
    match table.action(state, terminal) {
        Some(existing) if existing != action => Err(TableError::Conflict {
            state,
            terminal,
            existing,
            incoming: action,
        }),
        _ => {
            table.set_action(state, terminal, action);
            Ok(())
        }
    }
}

impl TransitionTable {
    /// 为固定的表达式文法构造 SLR(1) 表
    pub fn generate() -> Result<Self, TableError> {
        let start = closure(BTreeSet::from([Item {
            production: 0,
            dot: 0,
        }]));

        let mut states: Vec<ItemSet> = vec![start.clone()];
        let mut index: HashMap<ItemSet, usize> = HashMap::from([(start, 0)]);
        let mut transitions: Vec<(usize, Symbol, usize)> = Vec::new();
        let mut queue = VecDeque::from([0usize]);

        while let Some(state) = queue.pop_front() {
            for symbol in all_symbols() {
                let target = goto(&states[state], symbol);
                if target.is_empty() {
                    continue;
                }
                let target_id = match index.get(&target) {
                    Some(id) => *id,
                    None => {
                        let id = states.len();
                        states.push(target.clone());
                        index.insert(target, id);
                        queue.push_back(id);
                        id
                    }
                };
                transitions.push((state, symbol, target_id));
            }
        }

        let follow = follow_sets(&first_sets());
        let mut table = TransitionTable::with_states(states.len());

        for (state, symbol, target) in transitions {
            match symbol {
                Symbol::Terminal(t) => place(&mut table, state, t, Action::Shift(target))?,
                Symbol::NonTerminal(nt) => table.set_goto(state, nt, target),
            }
        }

        for (state, items) in states.iter().enumerate() {
            for item in items.iter().filter(|item| item.next_symbol().is_none()) {
                if item.production == 0 {
                    place(&mut table, state, Terminal::End, Action::Accept)?;
                    continue;
                }
                let lhs = PRODUCTIONS[item.production - 1].lhs;
                for terminal in &follow[&lhs] {
                    place(&mut table, state, *terminal, Action::Reduce(item.production))?;
                }
            }
        }

        log::debug!("generated SLR(1) table with {} states", table.state_count());
        table.validate()?;
        Ok(table)
    }
}
