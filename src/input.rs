use crate::LqRes;
use crate::enumerator::{BoxEnumerator, Cursor, Enumerator, Sequence};
use crate::err::LqErr;
use crate::linq::Linq;
use std::marker::PhantomData;
use std::rc::Rc;

impl<T: 'static> Linq<T> {
    /// 空序列，无状态，所有实例可以互换。
    pub fn empty() -> Linq<T> {
        Linq::new(EmptySeq::default())
    }

    pub fn from_vec(items: Vec<T>) -> Linq<T> {
        Linq::new(ArraySeq { items: Rc::from(items) })
    }

    /// 只包含一个元素的序列。
    pub fn of(value: T) -> Linq<T> {
        Linq::new(ValueSeq { value: Rc::new(value) })
    }

    /// 从任意可重复获取迭代器的数据源构造序列，每次遍历都会重新调用`into_iter`。
    ///
    /// ```
    /// use rlinq::Linq;
    ///
    /// let seq = Linq::from_source(1..=3);
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn from_source<I>(source: I) -> Linq<T>
    where
        I: IntoIterator<Item = T> + Clone + 'static,
        I::IntoIter: 'static,
    {
        Linq::new(IterSeq { source })
    }

    /// 缺失的数据源视为空序列。
    pub fn maybe<S: Into<Linq<T>>>(source: Option<S>) -> Linq<T> {
        source.map_or_else(Linq::empty, Into::into)
    }
}

impl<T: 'static> From<Vec<T>> for Linq<T> {
    fn from(items: Vec<T>) -> Self {
        Linq::from_vec(items)
    }
}

impl<T: 'static, const N: usize> From<[T; N]> for Linq<T> {
    fn from(items: [T; N]) -> Self {
        Linq::from_vec(Vec::from(items))
    }
}

impl<T: Clone + 'static> From<&[T]> for Linq<T> {
    fn from(items: &[T]) -> Self {
        Linq::new(ArraySeq { items: Rc::from(items) })
    }
}

impl<T: 'static> From<Rc<[T]>> for Linq<T> {
    fn from(items: Rc<[T]>) -> Self {
        Linq::new(ArraySeq { items })
    }
}

struct ArraySeq<T> {
    items: Rc<[T]>,
}

impl<T: 'static> Sequence for ArraySeq<T> {
    type Item = T;

    fn enumerator(&self) -> BoxEnumerator<T> {
        Box::new(ArrayEnumerator { items: Rc::clone(&self.items), next: 0, cursor: Cursor::Fresh })
    }
}

struct ArrayEnumerator<T> {
    items: Rc<[T]>,
    /// 下一次`advance`将要访问的下标
    next: usize,
    cursor: Cursor,
}

impl<T> Enumerator for ArrayEnumerator<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        if self.cursor.is_done() || self.next >= self.items.len() {
            self.cursor = Cursor::Done;
            return false;
        }
        self.next += 1;
        self.cursor = Cursor::Active;
        true
    }

    fn try_current(&self) -> LqRes<&T> {
        self.cursor.check()?;
        Ok(&self.items[self.next - 1])
    }
}

struct ValueSeq<T> {
    value: Rc<T>,
}

impl<T: 'static> Sequence for ValueSeq<T> {
    type Item = T;

    fn enumerator(&self) -> BoxEnumerator<T> {
        Box::new(ValueEnumerator { value: Rc::clone(&self.value), cursor: Cursor::Fresh })
    }
}

struct ValueEnumerator<T> {
    value: Rc<T>,
    cursor: Cursor,
}

impl<T> Enumerator for ValueEnumerator<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        match self.cursor {
            Cursor::Fresh => {
                self.cursor = Cursor::Active;
                true
            }
            _ => {
                self.cursor = Cursor::Done;
                false
            }
        }
    }

    fn try_current(&self) -> LqRes<&T> {
        self.cursor.check()?;
        Ok(&self.value)
    }
}

/// 零大小的空序列，装箱时不分配内存。
struct EmptySeq<T>(PhantomData<fn() -> T>);

impl<T> Default for EmptySeq<T> {
    fn default() -> Self {
        EmptySeq(PhantomData)
    }
}

impl<T: 'static> Sequence for EmptySeq<T> {
    type Item = T;

    fn enumerator(&self) -> BoxEnumerator<T> {
        Box::new(EmptyEnumerator(PhantomData))
    }
}

struct EmptyEnumerator<T>(PhantomData<fn() -> T>);

impl<T> Enumerator for EmptyEnumerator<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        false
    }

    /// 无状态，无论是否调用过`advance`都视为已结束。
    fn try_current(&self) -> LqRes<&T> {
        Err(LqErr::Exhausted)
    }
}

struct IterSeq<I> {
    source: I,
}

impl<I> Sequence for IterSeq<I>
where
    I: IntoIterator + Clone,
    I::IntoIter: 'static,
    I::Item: 'static,
{
    type Item = I::Item;

    fn enumerator(&self) -> BoxEnumerator<I::Item> {
        Box::new(IterEnumerator { iter: self.source.clone().into_iter(), item: None, cursor: Cursor::Fresh })
    }
}

struct IterEnumerator<I: Iterator> {
    iter: I,
    item: Option<I::Item>,
    cursor: Cursor,
}

impl<I: Iterator> Enumerator for IterEnumerator<I> {
    type Item = I::Item;

    fn advance(&mut self) -> bool {
        if self.cursor.is_done() {
            return false;
        }
        self.item = self.iter.next();
        self.cursor = if self.item.is_some() { Cursor::Active } else { Cursor::Done };
        self.item.is_some()
    }

    fn try_current(&self) -> LqRes<&I::Item> {
        self.cursor.check()?;
        self.item.as_ref().ok_or(LqErr::Exhausted)
    }
}
