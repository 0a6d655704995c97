use crate::LqRes;
use crate::enumerator::{BoxEnumerator, Enumerator, Sequence};
use crate::flat::{Flat, Flattener};
use crate::linq::Linq;
use std::rc::Rc;

type Produce<T> = Rc<dyn Fn(usize) -> Flat<T>>;
type Proceed<T> = Rc<dyn Fn(Option<&T>, usize) -> bool>;

impl<T: Clone + 'static> Linq<T> {
    /// 无限序列，第`i`个元素为`produce(i)`。
    ///
    /// ```
    /// use rlinq::Linq;
    ///
    /// let squares = Linq::generate(|i| i * i).take(4);
    /// assert_eq!(squares.to_vec(), vec![0, 1, 4, 9]);
    /// ```
    pub fn generate(produce: impl Fn(usize) -> T + 'static) -> Linq<T> {
        Linq::generate_while(move |i| Flat::Scalar(produce(i)), |_, _| true)
    }

    /// 带继续条件的生成器。
    ///
    /// 每一步先以上一个产出的元素（尚未产出时为`None`）和新的下标调用`proceed`，
    /// 返回`false`时序列结束，且不会再调用`produce`；否则调用`produce`，
    /// 其结果为[`Flat::Nested`]时会被展开，因此一个下标可以产出零个或多个元素。
    pub fn generate_while(
        produce: impl Fn(usize) -> Flat<T> + 'static, proceed: impl Fn(Option<&T>, usize) -> bool + 'static,
    ) -> Linq<T> {
        Linq::new(Generate::new(produce, proceed))
    }

    /// 重复`value`共`count`次。
    pub fn repeat(value: T, count: usize) -> Linq<T> {
        Linq::generate(move |_| value.clone()).take(count)
    }
}

pub(crate) struct Generate<T> {
    produce: Produce<T>,
    proceed: Proceed<T>,
}

impl<T> Generate<T> {
    pub(crate) fn new(
        produce: impl Fn(usize) -> Flat<T> + 'static, proceed: impl Fn(Option<&T>, usize) -> bool + 'static,
    ) -> Generate<T> {
        Generate { produce: Rc::new(produce), proceed: Rc::new(proceed) }
    }
}

impl<T: Clone + 'static> Sequence for Generate<T> {
    type Item = T;

    fn enumerator(&self) -> BoxEnumerator<T> {
        Box::new(Generator {
            produce: Rc::clone(&self.produce),
            proceed: Rc::clone(&self.proceed),
            index: 0,
            previous: None,
            flat: Flattener::default(),
        })
    }
}

struct Generator<T> {
    produce: Produce<T>,
    proceed: Proceed<T>,
    /// 下一次尝试使用的下标
    index: usize,
    previous: Option<T>,
    flat: Flattener<T>,
}

impl<T: Clone + 'static> Enumerator for Generator<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        let (produce, proceed, previous, index) = (&self.produce, &self.proceed, &self.previous, &mut self.index);
        let advanced = self.flat.advance_with(|| {
            let i = *index;
            *index += 1;
            if proceed(previous.as_ref(), i) {
                Some(produce(i))
            } else {
                #[cfg(feature = "tracing")]
                tracing::trace!(index = i, "generator stopped");
                None
            }
        });
        if advanced {
            self.previous = self.flat.try_current().ok().cloned();
        }
        advanced
    }

    fn try_current(&self) -> LqRes<&T> {
        self.flat.try_current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::LqErr;
    use crate::linq;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_generate_unbounded() {
        assert_eq!(Linq::generate(|i| i * 2).take(5).to_vec(), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_generate_bounded_by_index() {
        let seq = Linq::generate_while(Flat::Scalar, |_, i| i < 3);
        assert_eq!(seq.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_generate_previous() {
        // 斐波那契数列直到超过100
        let seq = Linq::generate_while(
            |i| Flat::Scalar(fib(i)),
            |previous: Option<&u64>, _| previous.is_none_or(|&p| p < 100),
        );
        assert_eq!(seq.to_vec(), vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144]);
    }

    fn fib(n: usize) -> u64 {
        (0..n).fold((0, 1), |(a, b), _| (b, a + b)).0
    }

    #[test]
    fn test_generate_previous_sequence() {
        let seen = Rc::new(RefCell::new(vec![]));
        let record = Rc::clone(&seen);
        let seq = Linq::generate_while(
            |i| if i == 1 { Flat::empty() } else { Flat::Nested(linq(vec![i * 10, i * 10 + 1])) },
            move |previous: Option<&usize>, i| {
                record.borrow_mut().push((previous.copied(), i));
                i < 3
            },
        );
        assert_eq!(seq.to_vec(), vec![0, 1, 20, 21]);
        assert_eq!(*seen.borrow(), vec![(None, 0), (Some(1), 1), (Some(1), 2), (Some(21), 3)]);
    }

    #[test]
    fn test_generate_no_produce_after_stop() {
        let produced = Rc::new(Cell::new(0));
        let counter = Rc::clone(&produced);
        let seq = Linq::generate_while(
            move |i| {
                counter.set(counter.get() + 1);
                Flat::Scalar(i)
            },
            |_, i| i < 2,
        );
        assert_eq!(seq.to_vec(), vec![0, 1]);
        assert_eq!(produced.get(), 2);
    }

    #[test]
    fn test_generate_sticky_end() {
        // 条件在结束后再次为真也不能恢复
        let mut e = Linq::generate_while(Flat::Scalar, |_, i| i != 1).enumerator();
        assert!(e.advance());
        assert!(!e.advance());
        assert!(!e.advance());
        assert_eq!(e.try_current(), Err(LqErr::Exhausted));
    }

    #[test]
    fn test_repeat() {
        assert_eq!(Linq::repeat("ab", 3).to_vec(), vec!["ab", "ab", "ab"]);
        assert!(Linq::repeat(1, 0).to_vec().is_empty());
    }
}
