//! Span - 源码位置信息
//!
//! 表达式文本中的字节范围

/// 源码位置范围 (字节偏移)
pub type Span = std::ops::Range<usize>;

/// Span 辅助函数
pub trait SpanExt {
    /// 创建一个新的 Span
    fn new(start: usize, end: usize) -> Self;

    /// 指向单个位置的空 Span（例如输入末尾）
    fn point(offset: usize) -> Self;
}

impl SpanExt for Span {
    fn new(start: usize, end: usize) -> Self {
        start..end
    }

    fn point(offset: usize) -> Self {
        offset..offset
    }
}
