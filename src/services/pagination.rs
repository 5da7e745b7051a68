//! 分页器 - 业务能力层
//!
//! 只保存页码和每页条数，数据本身由调用方持有。
//! 所有输入都会被夹紧到合法范围，不会报错。

use serde::Serialize;
use std::ops::Range;

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 分页状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

/// 当前页快照，用于渲染或序列化输出
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: usize,
    pub page_number: usize,
    pub page_size: usize,
    pub pages_available: usize,
    pub page_items: Vec<T>,
}

impl Paginator {
    /// 创建分页器，每页条数为 0 时按 1 处理
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    /// 针对已知条数的数据创建分页器
    pub fn for_len(total_items: usize, page_size: usize) -> Self {
        let mut paginator = Self::new(page_size);
        paginator.resize(total_items);
        paginator
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// 总页数，数据为空时为 0
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// 跳转到指定页，超出范围时夹紧到 `[1, total_pages]`
    pub fn set_page(&mut self, page: i64) {
        let last = self.total_pages().max(1) as i64;
        self.current_page = page.clamp(1, last) as usize;
    }

    /// 修改每页条数，当前页超过新的总页数时回退到最后一页
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.clamp_current();
    }

    /// 回到第一页（筛选条件变化时由调用方调用）
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// 数据条数变化后同步
    pub fn resize(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.clamp_current();
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page as i64 + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page as i64 - 1);
    }

    /// 截取当前页数据
    ///
    /// 以 `items.len()` 为准计算边界，即使调用方忘记 `resize` 也不会越界。
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range_within(items.len())]
    }

    /// 生成当前页快照
    pub fn page<'a, T>(&self, items: &'a [T]) -> Page<&'a T> {
        let total_count = items.len();
        Page {
            total_count,
            page_number: self.current_page,
            page_size: self.page_size,
            pages_available: total_count.div_ceil(self.page_size),
            page_items: self.slice(items).iter().collect(),
        }
    }

    fn range_within(&self, len: usize) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    fn clamp_current(&mut self) {
        let last = self.total_pages().max(1);
        if self.current_page > last {
            self.current_page = last;
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Page<T> {
    /// 转换页内数据
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            pages_available: self.pages_available,
            page_items: self.page_items.into_iter().map(f).collect(),
        }
    }
}
