use crate::LqRes;
use crate::enumerator::{BoxEnumerator, Cursor, Enumerator, Sequence};
use crate::err::LqErr;
use crate::linq::Linq;
use std::rc::Rc;

/// `flat_map`回调的结果：单个元素，或需要展开的嵌套序列。
pub enum Flat<S> {
    Scalar(S),
    Nested(Linq<S>),
}

impl<S: 'static> Flat<S> {
    /// 不产生任何元素。
    pub fn empty() -> Flat<S> {
        Flat::Nested(Linq::empty())
    }
}

impl<S> From<Linq<S>> for Flat<S> {
    fn from(seq: Linq<S>) -> Self {
        Flat::Nested(seq)
    }
}

/// 展开状态机：保存正在展开的嵌套游标或当前的单个元素。
///
/// 由`flat_map`和生成器共用，上游由`advance_with`的`pull`提供。
pub(crate) struct Flattener<S> {
    inner: Option<BoxEnumerator<S>>,
    scalar: Option<S>,
    cursor: Cursor,
}

impl<S> Default for Flattener<S> {
    fn default() -> Self {
        Flattener { inner: None, scalar: None, cursor: Cursor::Fresh }
    }
}

impl<S: 'static> Flattener<S> {
    /// 移动到下一个展开后的元素。
    ///
    /// `pull`返回`None`表示上游已经结束。连续的空嵌套序列在循环内跳过，不会加深调用栈。
    pub(crate) fn advance_with(&mut self, mut pull: impl FnMut() -> Option<Flat<S>>) -> bool {
        if self.cursor.is_done() {
            return false;
        }
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if inner.advance() {
                    self.cursor = Cursor::Active;
                    return true;
                }
                self.inner = None;
            }
            match pull() {
                Some(Flat::Scalar(item)) => {
                    self.scalar = Some(item);
                    self.cursor = Cursor::Active;
                    return true;
                }
                Some(Flat::Nested(seq)) => {
                    self.scalar = None;
                    self.inner = Some(seq.enumerator());
                }
                None => {
                    self.scalar = None;
                    self.cursor = Cursor::Done;
                    return false;
                }
            }
        }
    }

    pub(crate) fn try_current(&self) -> LqRes<&S> {
        self.cursor.check()?;
        match (&self.inner, &self.scalar) {
            (Some(inner), _) => inner.try_current(),
            (None, Some(item)) => Ok(item),
            (None, None) => Err(LqErr::Exhausted),
        }
    }
}

pub(crate) type Selector<T, S> = Rc<dyn Fn(&T, usize) -> Flat<S>>;

pub(crate) struct FlatMap<T, S> {
    pub(crate) source: Linq<T>,
    pub(crate) selector: Selector<T, S>,
}

impl<T: 'static, S: 'static> Sequence for FlatMap<T, S> {
    type Item = S;

    fn enumerator(&self) -> BoxEnumerator<S> {
        Box::new(FlatMapper {
            source: self.source.clone(),
            upstream: None,
            selector: Rc::clone(&self.selector),
            index: 0,
            flat: Flattener::default(),
        })
    }
}

struct FlatMapper<T, S> {
    source: Linq<T>,
    /// 首次`advance`时才创建
    upstream: Option<BoxEnumerator<T>>,
    selector: Selector<T, S>,
    /// 传给回调的上游元素下标
    index: usize,
    flat: Flattener<S>,
}

impl<T: 'static, S: 'static> Enumerator for FlatMapper<T, S> {
    type Item = S;

    fn advance(&mut self) -> bool {
        let source = &self.source;
        let upstream = self.upstream.get_or_insert_with(|| source.enumerator());
        let selector = &self.selector;
        let index = &mut self.index;
        self.flat.advance_with(|| {
            if !upstream.advance() {
                return None;
            }
            let i = *index;
            *index += 1;
            Some(selector(upstream.current(), i))
        })
    }

    fn try_current(&self) -> LqRes<&S> {
        self.flat.try_current()
    }
}
