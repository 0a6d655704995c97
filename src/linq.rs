use crate::enumerator::{BoxEnumerator, Enumerator, Sequence};
use std::iter::FusedIterator;
use std::rc::Rc;

/// 流水线节点。
///
/// 节点创建后不可变，算子总是返回新的节点；克隆只复制句柄。
pub struct Linq<T> {
    source: Rc<dyn Sequence<Item = T>>,
}

impl<T> Clone for Linq<T> {
    fn clone(&self) -> Self {
        Linq { source: Rc::clone(&self.source) }
    }
}

impl<T: 'static> Linq<T> {
    /// 包装任意数据源。
    pub fn new(source: impl Sequence<Item = T> + 'static) -> Linq<T> {
        Linq { source: Rc::new(source) }
    }

    /// 开始一次新的遍历。
    pub fn enumerator(&self) -> BoxEnumerator<T> {
        self.source.enumerator()
    }

    /// 以标准库迭代器的形式遍历，元素被克隆出来。
    pub fn iter(&self) -> Iter<T> {
        Iter { enumerator: self.enumerator() }
    }
}

impl<T: 'static> Sequence for Linq<T> {
    type Item = T;

    fn enumerator(&self) -> BoxEnumerator<T> {
        self.source.enumerator()
    }
}

pub struct Iter<T> {
    enumerator: BoxEnumerator<T>,
}

impl<T: Clone> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.enumerator.advance() { Some(self.enumerator.current().clone()) } else { None }
    }
}

impl<T: Clone> FusedIterator for Iter<T> {}

impl<T: Clone + 'static> IntoIterator for &Linq<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
