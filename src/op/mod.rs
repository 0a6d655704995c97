mod join;
mod zip;

use crate::enumerator::{BoxEnumerator, Enumerator, Sequence};
use crate::flat::{Flat, FlatMap};
use crate::generate::Generate;
use crate::linq::Linq;
use std::cell::RefCell;
use std::rc::Rc;

impl<T: 'static> Linq<T> {
    /* **************************************** 展开 **************************************** */
    /// 将每个元素映射为单个元素或嵌套序列，并按顺序展开拼接。
    ///
    /// `selector`的第二个参数为上游元素的下标，每次遍历都从0开始。
    pub fn flat_map_indexed<S: 'static>(&self, selector: impl Fn(&T, usize) -> Flat<S> + 'static) -> Linq<S> {
        Linq::new(FlatMap { source: self.clone(), selector: Rc::new(selector) })
    }

    pub fn flat_map<S: 'static>(&self, selector: impl Fn(&T) -> Flat<S> + 'static) -> Linq<S> {
        self.flat_map_indexed(move |item, _| selector(item))
    }

    /* **************************************** 转换 **************************************** */
    pub fn map_indexed<S: 'static>(&self, selector: impl Fn(&T, usize) -> S + 'static) -> Linq<S> {
        self.flat_map_indexed(move |item, index| Flat::Scalar(selector(item, index)))
    }

    pub fn map<S: 'static>(&self, selector: impl Fn(&T) -> S + 'static) -> Linq<S> {
        self.flat_map_indexed(move |item, _| Flat::Scalar(selector(item)))
    }

    /* **************************************** 拼接 **************************************** */
    /// 先完整遍历自身，再遍历`other`。
    #[doc(alias = "union")]
    pub fn concat(&self, other: &Linq<T>) -> Linq<T> {
        let (first, second) = (self.clone(), other.clone());
        Linq::generate(|i| i)
            .take(2)
            .flat_map(move |&i| Flat::Nested(if i == 0 { first.clone() } else { second.clone() }))
    }
}

impl<T: Clone + 'static> Linq<T> {
    /* **************************************** 减少 **************************************** */
    pub fn filter_indexed(&self, predicate: impl Fn(&T, usize) -> bool + 'static) -> Linq<T> {
        self.flat_map_indexed(
            move |item, index| if predicate(item, index) { Flat::Scalar(item.clone()) } else { Flat::empty() },
        )
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Linq<T> {
        self.filter_indexed(move |item, _| predicate(item))
    }

    /// 保留前`count`个元素，上游最多被`advance`共`count`次。
    pub fn take(&self, count: usize) -> Linq<T> {
        Linq::new(Take { source: self.clone(), count })
    }

    /// 丢弃前`count`个元素。
    pub fn skip(&self, count: usize) -> Linq<T> {
        self.filter_indexed(move |_, index| index >= count)
    }

    /* **************************************** 访问 **************************************** */
    /// 元素被拉取时调用`action`，元素本身原样传递。
    ///
    /// 未被下游拉取的元素不会触发`action`。
    #[doc(alias = "apply")]
    #[doc(alias = "tap")]
    pub fn inspect(&self, action: impl Fn(&T) + 'static) -> Linq<T> {
        self.map(move |item| {
            action(item);
            item.clone()
        })
    }
}

struct Take<T> {
    source: Linq<T>,
    count: usize,
}

impl<T: Clone + 'static> Sequence for Take<T> {
    type Item = T;

    /// 以下标为生成器的继续条件，每个下标驱动上游前进一次。
    fn enumerator(&self) -> BoxEnumerator<T> {
        let upstream = Rc::new(RefCell::new(self.source.enumerator()));
        let cursor = Rc::clone(&upstream);
        let count = self.count;
        Generate::new(
            move |_| Flat::Scalar(upstream.borrow().current().clone()),
            move |_, index| index < count && cursor.borrow_mut().advance(),
        )
        .enumerator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linq;
    use std::cell::Cell;

    #[test]
    fn test_map() {
        assert_eq!(linq(vec![1, 2, 3]).map(|x| x + 1).to_vec(), vec![2, 3, 4]);
        assert_eq!(linq(vec!["a", "b"]).map_indexed(|s, i| format!("{s}{i}")).to_vec(), vec!["a0", "b1"]);
    }

    #[test]
    fn test_filter() {
        let source = linq(vec![5, 1, 4, 2, 3]);
        assert_eq!(source.filter(|x| x % 2 == 1).to_vec(), vec![5, 1, 3]);
        assert!(source.filter(|_| false).to_vec().is_empty());
        assert_eq!(source.filter_indexed(|_, i| i % 2 == 0).to_vec(), vec![5, 4, 3]);
    }

    #[test]
    fn test_take_infinite() {
        assert_eq!(Linq::generate(|i| i).take(3).to_vec(), vec![0, 1, 2]);
        assert_eq!(linq(vec![1, 2]).take(5).to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_take_zero() {
        let produced = Rc::new(Cell::new(false));
        let flag = Rc::clone(&produced);
        let seq = Linq::generate(move |i| {
            flag.set(true);
            i
        })
        .take(0);
        assert!(seq.to_vec().is_empty());
        assert!(!produced.get());
    }

    #[test]
    fn test_take_advances_upstream_exactly() {
        let pulled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulled);
        let seq = Linq::generate(|i| i).inspect(move |_| counter.set(counter.get() + 1)).take(4);
        let mut e = seq.enumerator();
        assert!(e.advance());
        assert_eq!(pulled.get(), 1);
        while e.advance() {}
        assert_eq!(pulled.get(), 4);
    }

    #[test]
    fn test_skip_take_slice() {
        let source = linq(vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(source.skip(2).take(3).to_vec(), vec![3, 4, 5]);
        assert!(source.skip(10).to_vec().is_empty());
        for n in 0..8 {
            assert_eq!(source.take(n).concat(&source.skip(n)).to_vec(), source.to_vec());
        }
    }

    #[test]
    fn test_concat() {
        let a = linq(vec![1, 2]);
        let b = linq(vec![3]);
        assert_eq!(a.concat(&b).to_vec(), vec![1, 2, 3]);
        assert_eq!(a.concat(&Linq::empty()).to_vec(), vec![1, 2]);
        assert_eq!(Linq::empty().concat(&b).to_vec(), vec![3]);
        assert_eq!(a.concat(&a).concat(&b).to_vec(), vec![1, 2, 1, 2, 3]);
    }

    #[test]
    fn test_concat_exhausts_first() {
        let log = Rc::new(RefCell::new(vec![]));
        let (log_a, log_b) = (Rc::clone(&log), Rc::clone(&log));
        let a = linq(vec!["a1", "a2"]).inspect(move |s| log_a.borrow_mut().push(*s));
        let b = linq(vec!["b1"]).inspect(move |s| log_b.borrow_mut().push(*s));
        let mut e = a.concat(&b).enumerator();
        assert!(e.advance());
        assert!(e.advance());
        assert_eq!(*log.borrow(), vec!["a1", "a2"]);
        assert!(e.advance());
        assert_eq!(*e.current(), "b1");
        assert!(!e.advance());
    }

    #[test]
    fn test_inspect_lazy() {
        let seen = Rc::new(RefCell::new(vec![]));
        let record = Rc::clone(&seen);
        let seq = linq(vec![1, 2, 3, 4]).inspect(move |x| record.borrow_mut().push(*x));
        assert!(seen.borrow().is_empty());
        let mut e = seq.enumerator();
        assert!(e.advance());
        assert!(e.advance());
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(seq.take(1).to_vec(), vec![1]);
        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }
}
