use crate::enumerator::{BoxEnumerator, Sequence};
use crate::flat::Flat;
use crate::linq::Linq;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

/// 右侧序列按键分组的索引，在一次遍历内共享
type RightIndex<K, R> = Rc<RefCell<FxHashMap<K, Vec<R>>>>;

impl<L: Clone + 'static> Linq<L> {
    /// 等值内连接：对每个左侧元素，按顺序为每个键相等的右侧元素产出一个结果。
    ///
    /// 右侧序列在每次遍历中只被遍历一次：处理第一个左侧元素时完整遍历右侧，
    /// 边匹配边建立键索引；之后的左侧元素直接查索引。左侧序列会被遍历两次。
    ///
    /// ```
    /// use rlinq::linq;
    ///
    /// let users = linq(vec![(1, "ann"), (2, "bob")]);
    /// let orders = linq(vec![(1, "tea"), (1, "jam"), (3, "pie")]);
    /// let joined = users.join(&orders, |u| u.0, |o| o.0, |u, o| format!("{}:{}", u.1, o.1));
    /// assert_eq!(joined.to_vec(), vec!["ann:tea", "ann:jam"]);
    /// ```
    pub fn join<R, K, O>(
        &self, right: &Linq<R>, left_key: impl Fn(&L) -> K + 'static, right_key: impl Fn(&R) -> K + 'static,
        selector: impl Fn(&L, &R) -> O + 'static,
    ) -> Linq<O>
    where
        R: Clone + 'static,
        K: Eq + Hash + Clone + 'static,
        O: 'static,
    {
        Linq::new(Join {
            left: self.clone(),
            right: right.clone(),
            left_key: Rc::new(left_key),
            right_key: Rc::new(right_key),
            selector: Rc::new(selector),
        })
    }
}

struct Join<L, R, K, O> {
    left: Linq<L>,
    right: Linq<R>,
    left_key: Rc<dyn Fn(&L) -> K>,
    right_key: Rc<dyn Fn(&R) -> K>,
    selector: Rc<dyn Fn(&L, &R) -> O>,
}

impl<L, R, K, O> Join<L, R, K, O>
where
    L: Clone + 'static,
    R: Clone + 'static,
    K: Eq + Hash + Clone + 'static,
    O: 'static,
{
    /// 第一个左侧元素：遍历整个右侧，记录索引的同时筛选出匹配项。
    fn head(&self, index: RightIndex<K, R>) -> Linq<O> {
        let right = self.right.clone();
        let left_key = Rc::clone(&self.left_key);
        let right_key = Rc::clone(&self.right_key);
        let selector = Rc::clone(&self.selector);
        self.left.take(1).flat_map(move |left| {
            let key = left_key(left);
            let left = left.clone();
            let right_key = Rc::clone(&right_key);
            let index = Rc::clone(&index);
            let selector = Rc::clone(&selector);
            Flat::Nested(
                right
                    .map(move |item| {
                        let item_key = right_key(item);
                        index.borrow_mut().entry(item_key.clone()).or_default().push(item.clone());
                        (item_key, item.clone())
                    })
                    .filter(move |(item_key, _)| *item_key == key)
                    .map(move |(_, item)| selector(&left, item)),
            )
        })
    }

    /// 其余左侧元素：右侧已经遍历完毕，直接查索引。
    fn tail(&self, index: RightIndex<K, R>) -> Linq<O> {
        let left_key = Rc::clone(&self.left_key);
        let selector = Rc::clone(&self.selector);
        self.left.skip(1).flat_map(move |left| {
            let matched = index.borrow().get(&left_key(left)).cloned().unwrap_or_default();
            #[cfg(feature = "tracing")]
            tracing::trace!(matched = matched.len(), "join index lookup");
            if matched.is_empty() {
                return Flat::empty();
            }
            let left = left.clone();
            let selector = Rc::clone(&selector);
            Flat::Nested(Linq::from_vec(matched).map(move |item| selector(&left, item)))
        })
    }
}

impl<L, R, K, O> Sequence for Join<L, R, K, O>
where
    L: Clone + 'static,
    R: Clone + 'static,
    K: Eq + Hash + Clone + 'static,
    O: 'static,
{
    type Item = O;

    fn enumerator(&self) -> BoxEnumerator<O> {
        #[cfg(feature = "tracing")]
        tracing::trace!("join traversal started");
        let index = RightIndex::<K, R>::default();
        self.head(Rc::clone(&index)).concat(&self.tail(index)).enumerator()
    }
}
