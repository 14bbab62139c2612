//! Stack - 通用后进先出栈
//!
//! 自动机的状态栈、转换器的运算符栈与求值器的值栈共用此类型。
//! 在空栈上 `pop`/`peek` 返回 [`EmptyStackError`]，从不 panic。

use thiserror::Error;

/// 在空栈上弹出或查看栈顶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the stack is empty")]
pub struct EmptyStackError;

/// 基于 `Vec` 的栈
#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// 弹出栈顶元素
    pub fn pop(&mut self) -> Result<T, EmptyStackError> {
        self.items.pop().ok_or(EmptyStackError)
    }

    /// 查看栈顶元素
    pub fn peek(&self) -> Result<&T, EmptyStackError> {
        self.items.last().ok_or(EmptyStackError)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 清空整个栈
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut stack = Stack::new();
        stack.push("a");

        assert_eq!(stack.peek(), Ok(&"a"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_empty_stack_errors() {
        let mut stack: Stack<u8> = Stack::new();

        assert_eq!(stack.pop(), Err(EmptyStackError));
        assert_eq!(stack.peek(), Err(EmptyStackError));
        assert_eq!(EmptyStackError.to_string(), "the stack is empty");
    }

    #[test]
    fn test_clear() {
        let mut stack = Stack::new();
        stack.push(1.5);
        stack.push(2.5);

        stack.clear();

        assert!(stack.is_empty());
        assert_eq!(stack.pop(), Err(EmptyStackError));
    }
}
