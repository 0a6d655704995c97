use crate::enumerator::Enumerator;
use crate::linq::Linq;
use itertools::{Itertools, MinMaxResult};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::iter::Sum;

impl<T: 'static> Linq<T> {
    /// 遍历所有元素。
    pub fn for_each(&self, action: impl FnMut(&T)) {
        self.for_each_until(action, |_| false)
    }

    /// 遍历元素直到`stop_when`返回`true`。
    ///
    /// `stop_when`在`action`之前检查，命中的元素不会传给`action`，之后也不再拉取任何元素。
    pub fn for_each_until(&self, mut action: impl FnMut(&T), mut stop_when: impl FnMut(&T) -> bool) {
        let mut enumerator = self.enumerator();
        while enumerator.advance() {
            let item = enumerator.current();
            if stop_when(item) {
                break;
            }
            action(item);
        }
    }

    /// 遍历元素，`action`首次返回错误时立即停止并返回该错误。
    pub fn try_for_each<E>(&self, mut action: impl FnMut(&T) -> Result<(), E>) -> Result<(), E> {
        let mut enumerator = self.enumerator();
        while enumerator.advance() {
            action(enumerator.current())?;
        }
        Ok(())
    }

    /// 左折叠，空序列时原样返回`seed`。
    pub fn aggregate<A>(&self, seed: A, mut func: impl FnMut(&T, A) -> A) -> A {
        let mut acc = seed;
        let mut enumerator = self.enumerator();
        while enumerator.advance() {
            acc = func(enumerator.current(), acc);
        }
        acc
    }

    /// 不带初始值的左折叠，第一次调用`func`时累加值为`None`，空序列时返回`None`。
    pub fn aggregate_unseeded<A>(&self, mut func: impl FnMut(&T, Option<A>) -> A) -> Option<A> {
        let mut acc = None;
        let mut enumerator = self.enumerator();
        while enumerator.advance() {
            acc = Some(func(enumerator.current(), acc));
        }
        acc
    }

    /// 收集为映射，重复的键以最后一次出现的值为准。
    pub fn to_map<K: Eq + Hash, V>(
        &self, mut key_selector: impl FnMut(&T) -> K, mut value_selector: impl FnMut(&T) -> V,
    ) -> FxHashMap<K, V> {
        let mut result = FxHashMap::default();
        self.for_each(|item| {
            result.insert(key_selector(item), value_selector(item));
        });
        result
    }
}

impl<T: Clone + 'static> Linq<T> {
    #[doc(alias = "to_array")]
    pub fn to_vec(&self) -> Vec<T> {
        let mut result = Vec::new();
        self.for_each(|item| result.push(item.clone()));
        result
    }

    /// 最小值，空序列时返回`None`，存在多个最小值时取第一个。
    ///
    /// 无法比较的元素（如`NaN`）不会替换当前结果。
    pub fn min(&self) -> Option<T>
    where
        T: PartialOrd,
    {
        self.aggregate_unseeded(|item, best| match best {
            Some(best) if !(item < &best) => best,
            _ => item.clone(),
        })
    }

    /// 最大值，空序列时返回`None`，存在多个最大值时取第一个。
    pub fn max(&self) -> Option<T>
    where
        T: PartialOrd,
    {
        self.aggregate_unseeded(|item, best| match best {
            Some(best) if !(item > &best) => best,
            _ => item.clone(),
        })
    }

    /// 一次遍历同时求最小值和最大值。
    pub fn min_max(&self) -> MinMaxResult<T>
    where
        T: PartialOrd,
    {
        self.iter().minmax()
    }

    /// 求和，空序列时返回`T`的加法单位元（如`0`）。
    pub fn sum(&self) -> T
    where
        T: Sum<T>,
    {
        self.iter().sum()
    }
}
