//! 转移表的 CSV 资源格式
//!
//! ```text
//! state,+,-,*,/,%,(,),UMINUS,0,1,...,9,$,E,T,F,N,D
//! 0,,,,,,s4,,,s9,...,,1,2,3,5,6
//! ```
//!
//! action 单元格为 `s<k>` / `r<p>` / `acc` / 空，goto 单元格为状态号或空。
//! 列的顺序任意，但每列只能出现一次；行必须按 0..n 依次编号。

use super::{Action, TransitionTable};
use crate::error::TableError;
use crate::grammar::{NonTerminal, Terminal};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
enum Column {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl TransitionTable {
    /// 从文件加载并校验
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_csv(file)?;
        log::info!(
            "loaded transition table from {} ({} states)",
            path.display(),
            table.state_count()
        );
        Ok(table)
    }

    /// 从 CSV 读取并校验
    pub fn from_csv<R: Read>(input: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);
        let columns = parse_header(reader.headers()?)?;

        let mut table = TransitionTable::with_states(0);
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let label = record.get(0).unwrap_or_default();
            if label.parse::<usize>() != Ok(row) {
                return Err(TableError::StateOutOfOrder {
                    row,
                    found: label.to_string(),
                });
            }

            table.action.push([None; Terminal::COUNT]);
            table.goto.push([None; NonTerminal::COUNT]);
            for (column, cell) in columns.iter().zip(record.iter().skip(1)) {
                if cell.is_empty() {
                    continue;
                }
                match column {
                    Column::Terminal(terminal) => {
                        let action =
                            cell.parse::<Action>()
                                .map_err(|_| TableError::InvalidAction {
                                    state: row,
                                    column: terminal.to_string(),
                                    cell: cell.to_string(),
                                })?;
                        table.set_action(row, *terminal, action);
                    }
                    Column::NonTerminal(nonterminal) => {
                        let target =
                            cell.parse::<usize>()
                                .map_err(|_| TableError::InvalidGoto {
                                    state: row,
                                    column: nonterminal.to_string(),
                                    cell: cell.to_string(),
                                })?;
                        table.set_goto(row, *nonterminal, target);
                    }
                }
            }
        }

        table.validate()?;
        Ok(table)
    }

    /// 写出为 CSV（列顺序固定：终结符在前，非终结符在后）
    pub fn to_csv(&self) -> Result<String, TableError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let header = std::iter::once("state")
            .chain(Terminal::ALL.iter().map(Terminal::name))
            .chain(NonTerminal::ALL.iter().map(NonTerminal::name));
        writer.write_record(header)?;

        for state in 0..self.state_count() {
            let mut record = vec![state.to_string()];
            record.extend(Terminal::ALL.iter().map(|t| {
                self.action(state, *t)
                    .map(|a| a.to_string())
                    .unwrap_or_default()
            }));
            record.extend(NonTerminal::ALL.iter().map(|n| {
                self.goto(state, *n)
                    .map(|g| g.to_string())
                    .unwrap_or_default()
            }));
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| TableError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn parse_header(header: &csv::StringRecord) -> Result<Vec<Column>, TableError> {
    let mut names = header.iter();
    match names.next() {
        Some("state") => {}
        other => {
            return Err(TableError::MissingStateColumn {
                found: other.unwrap_or_default().to_string(),
            })
        }
    }

    let mut seen = HashSet::new();
    names
        .map(|name| {
            if !seen.insert(name) {
                return Err(TableError::DuplicateColumn {
                    name: name.to_string(),
                });
            }
            if let Some(terminal) = Terminal::from_name(name) {
                Ok(Column::Terminal(terminal))
            } else if let Some(nonterminal) = NonTerminal::from_name(name) {
                Ok(Column::NonTerminal(nonterminal))
            } else {
                Err(TableError::UnknownColumn {
                    name: name.to_string(),
                })
            }
        })
        .collect()
}
